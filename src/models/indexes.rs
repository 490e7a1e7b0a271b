//! Secondary index and label rows, the durable shapes the analytics store
//! consumes. The crate never talks to the database itself; it hands these
//! to the embedding sink.

use serde::Serialize;

/// Per-batch sidecar lookup so downstream rows can denormalize the block
/// timestamp without re-reading the block record. Never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BlockCache {
    pub block_number: u64,
    pub block_hash: String,
    pub block_timestamp: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct BlockIndex {
    pub chain: String,
    pub block_number: u64,
    pub block_hash: String,
    pub block_timestamp: u64,
    pub parent_hash: String,
    pub row_id: u64,
    pub path: String,
    pub l1_block_number: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct TransactionIndex {
    pub block_number: u64,
    pub block_hash: String,
    pub block_timestamp: u64,
    pub from_address: String,
    pub to_address: String,
    pub row_id: u64,
    /// First 10 characters of the input (`0x` + 4 selector bytes), or the
    /// literal `"0x"` when the input is shorter.
    pub selector: String,
    pub transaction_hash: String,
    pub transaction_index: u64,
    pub transaction_type: u64,
    pub path: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct LogIndex {
    pub address: String,
    pub block_number: u64,
    pub block_hash: String,
    pub block_timestamp: u64,
    pub transaction_hash: String,
    /// `topics[0]` when the log has topics.
    pub selector: Option<String>,
    pub topic1: Option<String>,
    pub topic2: Option<String>,
    pub row_id: u64,
    pub log_index: u64,
    pub path: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct EventLabel {
    pub label: String,
    pub label_name: String,
    pub label_type: String,
    pub block_number: u64,
    pub block_hash: String,
    pub address: String,
    pub transaction_hash: String,
    /// UTF-8 JSON document mapping event parameter names to decoded values.
    pub label_data: String,
    pub block_timestamp: u64,
    pub log_index: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct TransactionLabel {
    pub address: String,
    pub block_number: u64,
    pub block_hash: String,
    pub caller_address: String,
    pub label_name: String,
    pub label_type: String,
    pub origin_address: String,
    pub label: String,
    pub transaction_hash: String,
    pub label_data: String,
    pub block_timestamp: u64,
}
