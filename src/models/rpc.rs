//! On-the-wire JSON shapes, field-for-field with the EVM JSON-RPC
//! responses. Every numeric field stays a verbatim hex string; conversion
//! to integers is the normalizer's job. Shapes live only for the duration
//! of a fetch.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BlockJson {
    #[serde(rename = "number")]
    pub block_number: String,
    pub difficulty: String,
    pub extra_data: String,
    pub gas_limit: String,
    pub gas_used: String,
    pub base_fee_per_gas: String,
    pub hash: String,
    pub logs_bloom: String,
    pub miner: String,
    pub nonce: String,
    pub parent_hash: String,
    pub receipts_root: String,
    pub sha3_uncles: String,
    pub size: String,
    pub state_root: String,
    pub timestamp: String,
    pub total_difficulty: String,
    pub transactions_root: String,
    // Rollup extension fields; absent on L1 chains.
    pub mix_hash: String,
    pub send_count: String,
    pub send_root: String,
    pub l1_block_number: String,
    pub transactions: Vec<TransactionJson>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TransactionJson {
    pub hash: String,
    pub block_number: String,
    pub block_hash: String,
    #[serde(rename = "from")]
    pub from_address: String,
    #[serde(rename = "to")]
    pub to_address: String,
    pub gas: String,
    pub gas_price: String,
    pub max_fee_per_gas: String,
    pub max_priority_fee_per_gas: String,
    pub input: String,
    pub nonce: String,
    pub transaction_index: String,
    #[serde(rename = "type")]
    pub transaction_type: String,
    pub value: String,
    pub chain_id: String,
    pub v: String,
    pub r: String,
    pub s: String,
    pub y_parity: String,
    pub access_list: Vec<AccessListJson>,
    /// Not on the wire: stamped from the parent block before normalization.
    #[serde(skip)]
    pub block_timestamp: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AccessListJson {
    pub address: String,
    pub storage_keys: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EventJson {
    pub address: String,
    pub topics: Vec<String>,
    pub data: String,
    pub block_number: String,
    pub transaction_hash: String,
    pub log_index: String,
    pub block_hash: String,
    pub removed: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ReceiptJson {
    pub transaction_hash: String,
    pub transaction_index: String,
    pub block_hash: String,
    pub block_number: String,
    #[serde(rename = "from")]
    pub from_address: String,
    #[serde(rename = "to")]
    pub to_address: String,
    pub cumulative_gas_used: String,
    pub gas_used: String,
    pub effective_gas_price: String,
    pub contract_address: String,
    pub logs: Vec<EventJson>,
    pub logs_bloom: String,
    pub status: String,
    #[serde(rename = "type")]
    pub transaction_type: String,
}

/// `eth_getLogs` filter object. Block bounds are hex-encoded with natural
/// width; the field set is exactly this, camelCase on the wire.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogFilter {
    pub from_block: String,
    pub to_block: String,
    pub addresses: Vec<String>,
    pub topics: Vec<Vec<String>>,
}
