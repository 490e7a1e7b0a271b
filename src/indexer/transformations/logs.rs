use std::collections::HashMap;

use crate::models::errors::HexError;
use crate::models::indexes::{BlockCache, LogIndex};
use crate::models::rpc::EventJson;
use crate::records;
use crate::utils::from_hex_u64;

pub trait EventNormalizer {
    fn normalize(&self) -> Result<records::EventLog, HexError>;
}

impl EventNormalizer for EventJson {
    fn normalize(&self) -> Result<records::EventLog, HexError> {
        Ok(records::EventLog {
            address: self.address.clone(),
            topics: self.topics.clone(),
            data: self.data.clone(),
            block_number: from_hex_u64("blockNumber", &self.block_number)?,
            transaction_hash: self.transaction_hash.clone(),
            log_index: from_hex_u64("logIndex", &self.log_index)?,
            block_hash: self.block_hash.clone(),
            removed: self.removed,
        })
    }
}

/// Build the index row for one log. The timestamp comes from the block
/// cache; a missing cache entry yields 0 rather than an error, coverage is
/// the caller's responsibility.
pub fn log_index(
    event: &records::EventLog,
    block_cache: &HashMap<u64, BlockCache>,
    row_id: u64,
) -> LogIndex {
    LogIndex {
        address: event.address.clone(),
        block_number: event.block_number,
        block_hash: event.block_hash.clone(),
        block_timestamp: block_cache
            .get(&event.block_number)
            .map(|entry| entry.block_timestamp)
            .unwrap_or(0),
        transaction_hash: event.transaction_hash.clone(),
        selector: event.topics.first().cloned(),
        topic1: event.topics.get(1).cloned(),
        topic2: event.topics.get(2).cloned(),
        row_id,
        log_index: event.log_index,
        path: String::new(),
    }
}
