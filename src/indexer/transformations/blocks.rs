use crate::models::common::Chain;
use crate::models::errors::HexError;
use crate::models::indexes::{BlockCache, BlockIndex};
use crate::models::rpc::BlockJson;
use crate::records;
use crate::utils::from_hex_u64;

pub trait BlockNormalizer {
    /// Map the wire shape onto the binary record. Hex numerics decode via
    /// the codec (absent fields are zero); string fields pass through
    /// byte-identical.
    fn normalize(&self, indexed_at: u64) -> Result<records::Block, HexError>;
}

impl BlockNormalizer for BlockJson {
    fn normalize(&self, indexed_at: u64) -> Result<records::Block, HexError> {
        Ok(records::Block {
            block_number: from_hex_u64("number", &self.block_number)?,
            difficulty: from_hex_u64("difficulty", &self.difficulty)?,
            extra_data: self.extra_data.clone(),
            gas_limit: from_hex_u64("gasLimit", &self.gas_limit)?,
            gas_used: from_hex_u64("gasUsed", &self.gas_used)?,
            base_fee_per_gas: self.base_fee_per_gas.clone(),
            hash: self.hash.clone(),
            logs_bloom: self.logs_bloom.clone(),
            miner: self.miner.clone(),
            nonce: self.nonce.clone(),
            parent_hash: self.parent_hash.clone(),
            receipts_root: self.receipts_root.clone(),
            sha3_uncles: self.sha3_uncles.clone(),
            size: from_hex_u64("size", &self.size)?,
            state_root: self.state_root.clone(),
            timestamp: from_hex_u64("timestamp", &self.timestamp)?,
            total_difficulty: self.total_difficulty.clone(),
            transactions_root: self.transactions_root.clone(),
            indexed_at,
            mix_hash: self.mix_hash.clone(),
            send_count: self.send_count.clone(),
            send_root: self.send_root.clone(),
            l1_block_number: from_hex_u64("l1BlockNumber", &self.l1_block_number)?,
        })
    }
}

pub fn cache_entry(block: &records::Block) -> BlockCache {
    BlockCache {
        block_number: block.block_number,
        block_hash: block.hash.clone(),
        block_timestamp: block.timestamp,
    }
}

pub fn block_index(chain: Chain, block: &records::Block, row_id: u64) -> BlockIndex {
    BlockIndex {
        chain: chain.tag().to_string(),
        block_number: block.block_number,
        block_hash: block.hash.clone(),
        block_timestamp: block.timestamp,
        parent_hash: block.parent_hash.clone(),
        row_id,
        path: String::new(),
        l1_block_number: block.l1_block_number,
    }
}
