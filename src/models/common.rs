use anyhow::Result;

/// The chain a client is pointed at. One parameterized client serves every
/// supported chain; the variant supplies the tag recorded in index rows.
/// Rollup chains additionally populate the extension fields on the block
/// record (mix hash, send count, send root, L1 block number).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Chain {
    Ethereum,
    Sepolia,
    Polygon,
    ArbitrumOne,
    ArbitrumSepolia,
    Xai,
    XaiSepolia,
}

impl Chain {
    pub fn from_chain_id(chain_id: u64) -> Result<Self> {
        match chain_id {
            1 => Ok(Self::Ethereum),
            11155111 => Ok(Self::Sepolia),
            137 => Ok(Self::Polygon),
            42161 => Ok(Self::ArbitrumOne),
            421614 => Ok(Self::ArbitrumSepolia),
            660279 => Ok(Self::Xai),
            37714555429 => Ok(Self::XaiSepolia),
            _ => Err(anyhow::anyhow!("unsupported chain id: {chain_id}")),
        }
    }

    /// Tag recorded in `BlockIndex.chain` rows.
    pub fn tag(&self) -> &'static str {
        match self {
            Chain::Ethereum => "ethereum",
            Chain::Sepolia => "sepolia",
            Chain::Polygon => "polygon",
            Chain::ArbitrumOne => "arbitrum_one",
            Chain::ArbitrumSepolia => "arbitrum_sepolia",
            Chain::Xai => "xai",
            Chain::XaiSepolia => "xai_sepolia",
        }
    }

}

impl std::fmt::Display for Chain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.tag())
    }
}
