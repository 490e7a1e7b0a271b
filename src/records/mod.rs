//! Chain binary records with stable protobuf field tags. These are the
//! durable artifact of a fetch; persisted payloads travel base64-encoded.
//! Rollup chains populate the extension fields (mix hash, send count, send
//! root, L1 block number); decoders tolerate records without them, and
//! unknown fields from newer writers are skipped.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use prost::Message;

use crate::models::errors::RecordError;

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Block {
    #[prost(uint64, tag = "1")]
    pub block_number: u64,
    #[prost(uint64, tag = "2")]
    pub difficulty: u64,
    #[prost(string, tag = "3")]
    pub extra_data: String,
    #[prost(uint64, tag = "4")]
    pub gas_limit: u64,
    #[prost(uint64, tag = "5")]
    pub gas_used: u64,
    #[prost(string, tag = "6")]
    pub base_fee_per_gas: String,
    #[prost(string, tag = "7")]
    pub hash: String,
    #[prost(string, tag = "8")]
    pub logs_bloom: String,
    #[prost(string, tag = "9")]
    pub miner: String,
    #[prost(string, tag = "10")]
    pub nonce: String,
    #[prost(string, tag = "11")]
    pub parent_hash: String,
    #[prost(string, tag = "12")]
    pub receipts_root: String,
    #[prost(string, tag = "13")]
    pub sha3_uncles: String,
    #[prost(uint64, tag = "14")]
    pub size: u64,
    #[prost(string, tag = "15")]
    pub state_root: String,
    #[prost(uint64, tag = "16")]
    pub timestamp: u64,
    #[prost(string, tag = "17")]
    pub total_difficulty: String,
    #[prost(string, tag = "18")]
    pub transactions_root: String,
    #[prost(uint64, tag = "19")]
    pub indexed_at: u64,
    #[prost(string, tag = "20")]
    pub mix_hash: String,
    #[prost(string, tag = "21")]
    pub send_count: String,
    #[prost(string, tag = "22")]
    pub send_root: String,
    #[prost(uint64, tag = "23")]
    pub l1_block_number: u64,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Transaction {
    #[prost(string, tag = "1")]
    pub hash: String,
    #[prost(uint64, tag = "2")]
    pub block_number: u64,
    #[prost(string, tag = "3")]
    pub block_hash: String,
    #[prost(string, tag = "4")]
    pub from_address: String,
    #[prost(string, tag = "5")]
    pub to_address: String,
    /// Gas and fee fields are big-int decimal/hex strings; they overflow
    /// u64 on several chains.
    #[prost(string, tag = "6")]
    pub gas: String,
    #[prost(string, tag = "7")]
    pub gas_price: String,
    #[prost(string, tag = "8")]
    pub max_fee_per_gas: String,
    #[prost(string, tag = "9")]
    pub max_priority_fee_per_gas: String,
    #[prost(string, tag = "10")]
    pub input: String,
    #[prost(string, tag = "11")]
    pub nonce: String,
    #[prost(uint64, tag = "12")]
    pub transaction_index: u64,
    #[prost(uint64, tag = "13")]
    pub transaction_type: u64,
    #[prost(string, tag = "14")]
    pub value: String,
    #[prost(uint64, tag = "15")]
    pub indexed_at: u64,
    #[prost(uint64, tag = "16")]
    pub block_timestamp: u64,
    #[prost(string, tag = "17")]
    pub chain_id: String,
    #[prost(string, tag = "18")]
    pub v: String,
    #[prost(string, tag = "19")]
    pub r: String,
    #[prost(string, tag = "20")]
    pub s: String,
    #[prost(message, repeated, tag = "21")]
    pub access_list: Vec<TransactionAccessList>,
    #[prost(string, tag = "22")]
    pub y_parity: String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct TransactionAccessList {
    #[prost(string, tag = "1")]
    pub address: String,
    #[prost(string, repeated, tag = "2")]
    pub storage_keys: Vec<String>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct EventLog {
    #[prost(string, tag = "1")]
    pub address: String,
    #[prost(string, repeated, tag = "2")]
    pub topics: Vec<String>,
    #[prost(string, tag = "3")]
    pub data: String,
    #[prost(uint64, tag = "4")]
    pub block_number: u64,
    #[prost(string, tag = "5")]
    pub transaction_hash: String,
    #[prost(uint64, tag = "6")]
    pub log_index: u64,
    #[prost(string, tag = "7")]
    pub block_hash: String,
    #[prost(bool, tag = "8")]
    pub removed: bool,
}

/// Encode a record into the persisted-payload transport form.
pub fn encode_base64<M: Message>(record: &M) -> String {
    BASE64.encode(record.encode_to_vec())
}

/// Decode a persisted payload back into a record.
pub fn decode_base64<M: Message + Default>(raw: &str) -> Result<M, RecordError> {
    let bytes = BASE64.decode(raw)?;
    Ok(M::decode(bytes.as_slice())?)
}
