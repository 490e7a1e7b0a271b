use std::collections::HashMap;

use alloy_dyn_abi::DynSolValue;
use alloy_primitives::{hex, keccak256, Address, U256};

use chain_indexer::labels::{
    decode_event_labels, decode_transaction_labels, AbiEntry, AbiMap, EVENT_LABEL_TYPE,
    TX_CALL_LABEL_TYPE,
};
use chain_indexer::models::errors::LabelError;
use chain_indexer::models::indexes::BlockCache;
use chain_indexer::records;

const TRANSFER_EVENT_ABI: &str = r#"[{
    "type": "event",
    "name": "Transfer",
    "inputs": [
        {"name": "from", "type": "address", "indexed": true},
        {"name": "to", "type": "address", "indexed": true},
        {"name": "value", "type": "uint256", "indexed": false}
    ],
    "anonymous": false
}]"#;

const TRANSFER_FUNCTION_ABI: &str = r#"[{
    "type": "function",
    "name": "transfer",
    "inputs": [
        {"name": "recipient", "type": "address"},
        {"name": "amount", "type": "uint256"}
    ],
    "outputs": [{"name": "", "type": "bool"}],
    "stateMutability": "nonpayable"
}]"#;

const CRAWLER_LABEL: &str = "seer-test";

fn hex_address(address: Address) -> String {
    format!("0x{}", hex::encode(address))
}

fn topic_for(address: Address) -> String {
    format!(
        "0x{}",
        hex::encode(alloy_primitives::B256::left_padding_from(address.as_slice()))
    )
}

fn transfer_topic0() -> String {
    format!(
        "0x{}",
        hex::encode(keccak256("Transfer(address,address,uint256)"))
    )
}

fn block_cache(entries: &[(u64, u64)]) -> HashMap<u64, BlockCache> {
    entries
        .iter()
        .map(|(number, timestamp)| {
            (
                *number,
                BlockCache {
                    block_number: *number,
                    block_hash: format!("0xhash{number:x}"),
                    block_timestamp: *timestamp,
                },
            )
        })
        .collect()
}

fn transfer_event_record(contract: Address, from: Address, to: Address, value: u64) -> String {
    let data = DynSolValue::Tuple(vec![DynSolValue::Uint(U256::from(value), 256)])
        .abi_encode_params();

    records::encode_base64(&records::EventLog {
        address: hex_address(contract),
        topics: vec![transfer_topic0(), topic_for(from), topic_for(to)],
        data: format!("0x{}", hex::encode(data)),
        block_number: 1200,
        transaction_hash: "0xtxhash".to_string(),
        log_index: 7,
        block_hash: "0xhash4b0".to_string(),
        removed: false,
    })
}

fn transfer_call_record(contract: Address, caller: Address, recipient: Address, amount: u64) -> String {
    let mut input = hex::decode("a9059cbb").unwrap();
    input.extend(
        DynSolValue::Tuple(vec![
            DynSolValue::Address(recipient),
            DynSolValue::Uint(U256::from(amount), 256),
        ])
        .abi_encode_params(),
    );

    records::encode_base64(&records::Transaction {
        hash: "0xcallhash".to_string(),
        block_number: 1200,
        block_hash: "0xhash4b0".to_string(),
        from_address: hex_address(caller),
        to_address: hex_address(contract),
        input: format!("0x{}", hex::encode(input)),
        transaction_index: 3,
        transaction_type: 2,
        value: "0x0".to_string(),
        ..Default::default()
    })
}

fn event_abi_map(contract: Address) -> AbiMap {
    let mut by_selector = HashMap::new();
    by_selector.insert(
        transfer_topic0(),
        AbiEntry {
            abi: TRANSFER_EVENT_ABI.to_string(),
            abi_name: "Transfer".to_string(),
        },
    );
    HashMap::from([(hex_address(contract), by_selector)])
}

fn function_abi_map(contract: Address) -> AbiMap {
    let mut by_selector = HashMap::new();
    by_selector.insert(
        "0xa9059cbb".to_string(),
        AbiEntry {
            abi: TRANSFER_FUNCTION_ABI.to_string(),
            abi_name: "transfer".to_string(),
        },
    );
    HashMap::from([(hex_address(contract), by_selector)])
}

#[test]
fn decodes_transfer_event_into_label() {
    let contract = Address::repeat_byte(0x11);
    let from = Address::repeat_byte(0xaa);
    let to = Address::repeat_byte(0xbb);

    let payloads = vec![transfer_event_record(contract, from, to, 1000)];
    let cache = block_cache(&[(1200, 1_696_000_000)]);
    let abi_map = event_abi_map(contract);

    let labels = decode_event_labels(&payloads, &cache, &abi_map, CRAWLER_LABEL).unwrap();
    assert_eq!(labels.len(), 1);

    let label = &labels[0];
    assert_eq!(label.label, CRAWLER_LABEL);
    assert_eq!(label.label_name, "Transfer");
    assert_eq!(label.label_type, EVENT_LABEL_TYPE);
    assert_eq!(label.block_number, 1200);
    assert_eq!(label.block_hash, "0xhash4b0");
    assert_eq!(label.address, hex_address(contract));
    assert_eq!(label.transaction_hash, "0xtxhash");
    assert_eq!(label.block_timestamp, 1_696_000_000);
    assert_eq!(label.log_index, 7);

    let data: serde_json::Value = serde_json::from_str(&label.label_data).unwrap();
    assert_eq!(data["from"], from.to_checksum(None));
    assert_eq!(data["to"], to.to_checksum(None));
    assert_eq!(data["value"], "1000");
}

#[test]
fn decodes_transfer_call_into_label() {
    let contract = Address::repeat_byte(0x22);
    let caller = Address::repeat_byte(0xdd);
    let recipient = Address::repeat_byte(0xcc);

    let payloads = vec![transfer_call_record(contract, caller, recipient, 2500)];
    let cache = block_cache(&[(1200, 1_696_000_000)]);
    let abi_map = function_abi_map(contract);

    let labels = decode_transaction_labels(&payloads, &cache, &abi_map, CRAWLER_LABEL).unwrap();
    assert_eq!(labels.len(), 1);

    let label = &labels[0];
    assert_eq!(label.label, CRAWLER_LABEL);
    assert_eq!(label.label_name, "transfer");
    assert_eq!(label.label_type, TX_CALL_LABEL_TYPE);
    assert_eq!(label.address, hex_address(contract));
    assert_eq!(label.caller_address, hex_address(caller));
    assert_eq!(label.origin_address, hex_address(caller));
    assert_eq!(label.transaction_hash, "0xcallhash");
    assert_eq!(label.block_timestamp, 1_696_000_000);

    let data: serde_json::Value = serde_json::from_str(&label.label_data).unwrap();
    assert_eq!(data["recipient"], recipient.to_checksum(None));
    assert_eq!(data["amount"], "2500");
}

#[test]
fn events_without_topics_are_skipped() {
    let contract = Address::repeat_byte(0x11);
    let payload = records::encode_base64(&records::EventLog {
        address: hex_address(contract),
        topics: vec![],
        data: "0x".to_string(),
        block_number: 1200,
        ..Default::default()
    });

    let labels = decode_event_labels(
        &[payload],
        &HashMap::new(),
        &event_abi_map(contract),
        CRAWLER_LABEL,
    )
    .unwrap();
    assert!(labels.is_empty());
}

#[test]
fn missing_abi_entry_fails_the_batch() {
    let known = Address::repeat_byte(0x11);
    let unknown = Address::repeat_byte(0x99);
    let from = Address::repeat_byte(0xaa);
    let to = Address::repeat_byte(0xbb);

    let payloads = vec![
        transfer_event_record(known, from, to, 1),
        transfer_event_record(unknown, from, to, 2),
    ];

    let err = decode_event_labels(
        &payloads,
        &HashMap::new(),
        &event_abi_map(known),
        CRAWLER_LABEL,
    )
    .unwrap_err();
    assert!(matches!(err, LabelError::AbiMiss { address, .. } if address == hex_address(unknown)));
}

#[test]
fn short_input_misses_the_abi_table() {
    let contract = Address::repeat_byte(0x22);
    let payload = records::encode_base64(&records::Transaction {
        to_address: hex_address(contract),
        input: "0xab".to_string(),
        ..Default::default()
    });

    let err = decode_transaction_labels(
        &[payload],
        &HashMap::new(),
        &function_abi_map(contract),
        CRAWLER_LABEL,
    )
    .unwrap_err();
    assert!(matches!(err, LabelError::AbiMiss { selector, .. } if selector == "0x"));
}

#[test]
fn label_rows_preserve_input_order() {
    let contract = Address::repeat_byte(0x11);
    let from = Address::repeat_byte(0xaa);
    let to = Address::repeat_byte(0xbb);

    let mut first = records::decode_base64::<records::EventLog>(&transfer_event_record(
        contract, from, to, 10,
    ))
    .unwrap();
    first.log_index = 1;
    let mut second = first.clone();
    second.log_index = 2;

    let payloads = vec![
        records::encode_base64(&first),
        records::encode_base64(&second),
    ];

    let labels = decode_event_labels(
        &payloads,
        &HashMap::new(),
        &event_abi_map(contract),
        CRAWLER_LABEL,
    )
    .unwrap();
    assert_eq!(labels[0].log_index, 1);
    assert_eq!(labels[1].log_index, 2);
    // no cache entry for the block: timestamp denormalizes to zero
    assert_eq!(labels[0].block_timestamp, 0);
}

#[test]
fn addresses_match_case_insensitively() {
    let contract = Address::repeat_byte(0xab);
    let from = Address::repeat_byte(0xaa);
    let to = Address::repeat_byte(0xbb);

    // record carries a checksummed (mixed-case) address; the table is
    // keyed lowercased
    let mut event = records::decode_base64::<records::EventLog>(&transfer_event_record(
        contract, from, to, 5,
    ))
    .unwrap();
    event.address = contract.to_checksum(None);

    let labels = decode_event_labels(
        &[records::encode_base64(&event)],
        &HashMap::new(),
        &event_abi_map(contract),
        CRAWLER_LABEL,
    )
    .unwrap();
    assert_eq!(labels.len(), 1);
    assert_eq!(labels[0].address, contract.to_checksum(None));
}

#[test]
fn corrupt_payloads_fail_the_batch() {
    let err = decode_event_labels(
        &["@@not-base64@@".to_string()],
        &HashMap::new(),
        &AbiMap::new(),
        CRAWLER_LABEL,
    )
    .unwrap_err();
    assert!(matches!(err, LabelError::Record(_)));
}
