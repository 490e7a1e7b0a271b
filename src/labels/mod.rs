//! Decode persisted binary records against a table of known contract ABIs
//! into analyst-facing label rows.

use std::collections::hash_map::Entry;
use std::collections::HashMap;

use alloy_primitives::B256;
use serde_json::Value;

use crate::abi;
use crate::models::errors::{AbiError, LabelError};
use crate::models::indexes::{BlockCache, EventLabel, TransactionLabel};
use crate::records;

pub const EVENT_LABEL_TYPE: &str = "event";
pub const TX_CALL_LABEL_TYPE: &str = "tx_call";

/// One known contract fragment: the ABI JSON text and the human-readable
/// name recorded on the label row.
#[derive(Debug, Clone)]
pub struct AbiEntry {
    pub abi: String,
    pub abi_name: String,
}

/// ABI table keyed by lowercased contract address, then by selector
/// (10-character hex for functions, 66-character topic0 for events).
/// Read-only during a decode batch; shared by reference.
pub type AbiMap = HashMap<String, HashMap<String, AbiEntry>>;

/// Decode a batch of base64 payloads into event records.
pub fn decode_events(payloads: &[String]) -> Result<Vec<records::EventLog>, LabelError> {
    payloads
        .iter()
        .map(|raw| records::decode_base64::<records::EventLog>(raw).map_err(LabelError::from))
        .collect()
}

/// Decode a batch of base64 payloads into transaction records.
pub fn decode_transactions(payloads: &[String]) -> Result<Vec<records::Transaction>, LabelError> {
    payloads
        .iter()
        .map(|raw| records::decode_base64::<records::Transaction>(raw).map_err(LabelError::from))
        .collect()
}

/// Decode a batch of base64 payloads into block records.
pub fn decode_blocks(payloads: &[String]) -> Result<Vec<records::Block>, LabelError> {
    payloads
        .iter()
        .map(|raw| records::decode_base64::<records::Block>(raw).map_err(LabelError::from))
        .collect()
}

fn lookup<'a>(
    abi_map: &'a AbiMap,
    address: &str,
    selector: &str,
) -> Result<&'a AbiEntry, LabelError> {
    abi_map
        .get(&address.to_ascii_lowercase())
        .and_then(|entries| entries.get(selector))
        .ok_or_else(|| LabelError::AbiMiss {
            address: address.to_string(),
            selector: selector.to_string(),
        })
}

/// Decode persisted event records into `EventLabel` rows.
///
/// Records without topics are skipped; a missing ABI entry or any decode
/// failure aborts the whole batch. Output order follows input order.
pub fn decode_event_labels(
    payloads: &[String],
    block_cache: &HashMap<u64, BlockCache>,
    abi_map: &AbiMap,
    label: &str,
) -> Result<Vec<EventLabel>, LabelError> {
    let events = decode_events(payloads)?;

    let mut parsed = HashMap::new();
    let mut labels = Vec::with_capacity(events.len());

    for event in events {
        let Some(topic0) = event.topics.first() else {
            continue;
        };

        let entry = lookup(abi_map, &event.address, topic0)?;
        let contract_abi =
            match parsed.entry((event.address.to_ascii_lowercase(), topic0.clone())) {
                Entry::Occupied(slot) => slot.into_mut(),
                Entry::Vacant(slot) => slot.insert(abi::parse_abi(&entry.abi)?),
            };

        let selector = topic0.parse::<B256>().map_err(|e| AbiError::BadPayload {
            field: "topics",
            message: e.to_string(),
        })?;
        let fragment =
            abi::event_by_topic0(contract_abi, &selector).ok_or(AbiError::UnknownEvent {
                topic0: topic0.clone(),
            })?;

        let decoded = abi::decode_event(fragment, &event.topics, &event.data)?;
        let label_data = serde_json::to_string(&Value::Object(decoded))?;

        labels.push(EventLabel {
            label: label.to_string(),
            label_name: entry.abi_name.clone(),
            label_type: EVENT_LABEL_TYPE.to_string(),
            block_number: event.block_number,
            block_hash: event.block_hash,
            address: event.address,
            transaction_hash: event.transaction_hash,
            label_data,
            block_timestamp: block_cache
                .get(&event.block_number)
                .map(|entry| entry.block_timestamp)
                .unwrap_or(0),
            log_index: event.log_index,
        });
    }

    Ok(labels)
}

/// Decode persisted transaction records into `TransactionLabel` rows.
///
/// The fragment is selected by `(to_address, input selector)`; a miss or
/// any decode failure aborts the batch. Output order follows input order.
pub fn decode_transaction_labels(
    payloads: &[String],
    block_cache: &HashMap<u64, BlockCache>,
    abi_map: &AbiMap,
    label: &str,
) -> Result<Vec<TransactionLabel>, LabelError> {
    let transactions = decode_transactions(payloads)?;

    let mut parsed = HashMap::new();
    let mut labels = Vec::with_capacity(transactions.len());

    for tx in transactions {
        let selector =
            crate::indexer::transformations::transactions::input_selector(&tx.input).to_string();

        let entry = lookup(abi_map, &tx.to_address, &selector)?;
        let contract_abi =
            match parsed.entry((tx.to_address.to_ascii_lowercase(), selector.clone())) {
                Entry::Occupied(slot) => slot.into_mut(),
                Entry::Vacant(slot) => slot.insert(abi::parse_abi(&entry.abi)?),
            };

        let fragment = abi::function_by_selector(contract_abi, &selector).ok_or(
            AbiError::UnknownFunction {
                selector: selector.clone(),
            },
        )?;

        let decoded = abi::decode_function_input(fragment, &tx.input)?;
        let label_data = serde_json::to_string(&Value::Object(decoded))?;

        labels.push(TransactionLabel {
            address: tx.to_address,
            block_number: tx.block_number,
            block_hash: tx.block_hash,
            caller_address: tx.from_address.clone(),
            label_name: entry.abi_name.clone(),
            label_type: TX_CALL_LABEL_TYPE.to_string(),
            origin_address: tx.from_address,
            label: label.to_string(),
            transaction_hash: tx.hash,
            label_data,
            block_timestamp: block_cache
                .get(&tx.block_number)
                .map(|entry| entry.block_timestamp)
                .unwrap_or(0),
        });
    }

    Ok(labels)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::errors::RecordError;

    #[test]
    fn decodes_block_payload_batches() {
        let blocks = vec![
            records::Block {
                block_number: 100,
                hash: "0xb100".to_string(),
                timestamp: 1_700_000_000,
                ..Default::default()
            },
            records::Block {
                block_number: 101,
                hash: "0xb101".to_string(),
                timestamp: 1_700_000_012,
                ..Default::default()
            },
        ];
        let payloads: Vec<String> = blocks.iter().map(records::encode_base64).collect();

        let decoded = decode_blocks(&payloads).unwrap();
        assert_eq!(decoded, blocks);
    }

    #[test]
    fn corrupt_block_payloads_fail_the_batch() {
        let good = records::encode_base64(&records::Block::default());

        let err = decode_blocks(&[good, "@@not-base64@@".to_string()]).unwrap_err();
        assert!(matches!(err, LabelError::Record(RecordError::Base64(_))));

        // valid base64 (three 0xff bytes) that is not a protobuf message
        let err = decode_blocks(&["////".to_string()]).unwrap_err();
        assert!(matches!(err, LabelError::Record(RecordError::Decode(_))));
    }
}
