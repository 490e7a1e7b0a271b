use thiserror::Error;

/// The de-facto marker EVM log endpoints put in their error message when
/// an `eth_getLogs` window overflows the server-side result cap. There is
/// no structured error code for it; the adaptive fetcher matches on this.
pub const TOO_MANY_RESULTS_FRAGMENT: &str = "query returned more than 10000 results";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HexError {
    #[error("invalid hex value for {field}: {raw:?}")]
    BadHex { field: &'static str, raw: String },
}

#[derive(Error, Debug)]
pub enum RpcError {
    #[error("failed to dial {url}: {message}")]
    Dial { url: String, message: String },

    /// Transport or server failure. `message` carries the server error
    /// verbatim so callers can recognize result-cap overflows.
    #[error("{method} failed: {message}")]
    Call {
        method: &'static str,
        message: String,
    },

    #[error("unexpected {method} response: {reason}")]
    Shape {
        method: &'static str,
        reason: String,
    },
}

impl RpcError {
    pub fn is_too_many_results(&self) -> bool {
        matches!(self, RpcError::Call { message, .. } if message.contains(TOO_MANY_RESULTS_FRAGMENT))
    }
}

/// A persisted binary record failed to decode.
#[derive(Error, Debug)]
pub enum RecordError {
    #[error("invalid base64 payload: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("invalid binary record: {0}")]
    Decode(#[from] prost::DecodeError),
}

#[derive(Error, Debug)]
pub enum AbiError {
    #[error("malformed ABI json: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("malformed {field}: {message}")]
    BadPayload {
        field: &'static str,
        message: String,
    },

    #[error("abi decode failed: {0}")]
    Decode(#[from] alloy_dyn_abi::Error),

    #[error("no event with topic {topic0} in the supplied abi")]
    UnknownEvent { topic0: String },

    #[error("no function with selector {selector} in the supplied abi")]
    UnknownFunction { selector: String },
}

#[derive(Error, Debug)]
pub enum LabelError {
    #[error(transparent)]
    Record(#[from] RecordError),

    #[error("no abi registered for {address} / {selector}")]
    AbiMiss { address: String, selector: String },

    #[error(transparent)]
    Abi(#[from] AbiError),

    #[error("failed to serialize label data: {0}")]
    LabelData(#[from] serde_json::Error),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{var} environment variable is required")]
    Missing { var: &'static str },
}
