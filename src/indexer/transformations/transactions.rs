use crate::models::errors::HexError;
use crate::models::indexes::TransactionIndex;
use crate::models::rpc::TransactionJson;
use crate::records;
use crate::utils::from_hex_u64;

/// A function selector surfaced as `"0x"` + 8 hex chars. Inputs shorter
/// than a full selector (plain transfers, contract creations) yield the
/// bare `"0x"`.
pub fn input_selector(input: &str) -> &str {
    if input.len() >= 10 {
        &input[..10]
    } else {
        "0x"
    }
}

pub trait TransactionNormalizer {
    fn normalize(&self, indexed_at: u64) -> Result<records::Transaction, HexError>;
}

impl TransactionNormalizer for TransactionJson {
    fn normalize(&self, indexed_at: u64) -> Result<records::Transaction, HexError> {
        let access_list = self
            .access_list
            .iter()
            .map(|entry| records::TransactionAccessList {
                address: entry.address.clone(),
                storage_keys: entry.storage_keys.clone(),
            })
            .collect();

        Ok(records::Transaction {
            hash: self.hash.clone(),
            block_number: from_hex_u64("blockNumber", &self.block_number)?,
            block_hash: self.block_hash.clone(),
            from_address: self.from_address.clone(),
            to_address: self.to_address.clone(),
            gas: self.gas.clone(),
            gas_price: self.gas_price.clone(),
            max_fee_per_gas: self.max_fee_per_gas.clone(),
            max_priority_fee_per_gas: self.max_priority_fee_per_gas.clone(),
            input: self.input.clone(),
            nonce: self.nonce.clone(),
            transaction_index: from_hex_u64("transactionIndex", &self.transaction_index)?,
            transaction_type: from_hex_u64("type", &self.transaction_type)?,
            value: self.value.clone(),
            indexed_at,
            block_timestamp: from_hex_u64("blockTimestamp", &self.block_timestamp)?,
            chain_id: self.chain_id.clone(),
            v: self.v.clone(),
            r: self.r.clone(),
            s: self.s.clone(),
            access_list,
            y_parity: self.y_parity.clone(),
        })
    }
}

pub fn transaction_index(tx: &records::Transaction, row_id: u64) -> TransactionIndex {
    TransactionIndex {
        block_number: tx.block_number,
        block_hash: tx.block_hash.clone(),
        block_timestamp: tx.block_timestamp,
        from_address: tx.from_address.clone(),
        to_address: tx.to_address.clone(),
        row_id,
        selector: input_selector(&tx.input).to_string(),
        transaction_hash: tx.hash.clone(),
        transaction_index: tx.transaction_index,
        transaction_type: tx.transaction_type,
        path: String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::rpc::AccessListJson;

    #[test]
    fn selector_extraction() {
        let input = "0xa9059cbb000000000000000000000000deadbeefdeadbeefdeadbeefdeadbeefdeadbeef";
        assert_eq!(input_selector(input), "0xa9059cbb");
        assert_eq!(input_selector("0xa9059cbb"), "0xa9059cbb");
        assert_eq!(input_selector("0x"), "0x");
        assert_eq!(input_selector("0xab"), "0x");
        assert_eq!(input_selector(""), "0x");
    }

    #[test]
    fn normalizes_numerics_and_preserves_big_ints() {
        let json = TransactionJson {
            hash: "0xh".to_string(),
            block_number: "0x10".to_string(),
            block_hash: "0xb".to_string(),
            from_address: "0xf".to_string(),
            to_address: "0xt".to_string(),
            gas: "0x5208".to_string(),
            gas_price: "0x4a817c800".to_string(),
            input: "0xa9059cbb00".to_string(),
            nonce: "0x1".to_string(),
            transaction_index: "0x3".to_string(),
            transaction_type: "0x2".to_string(),
            value: "0xffffffffffffffffffff".to_string(),
            chain_id: "0x1".to_string(),
            v: "0x1b".to_string(),
            r: "0xr".to_string(),
            s: "0xs".to_string(),
            y_parity: "0x1".to_string(),
            access_list: vec![AccessListJson {
                address: "0xa1".to_string(),
                storage_keys: vec!["0xk1".to_string(), "0xk2".to_string()],
            }],
            block_timestamp: "0x64dcfc80".to_string(),
            ..Default::default()
        };

        let tx = json.normalize(9).unwrap();
        assert_eq!(tx.block_number, 16);
        assert_eq!(tx.transaction_index, 3);
        assert_eq!(tx.transaction_type, 2);
        assert_eq!(tx.block_timestamp, 0x64dcfc80);
        assert_eq!(tx.indexed_at, 9);
        // value overflows u64 and must survive untouched
        assert_eq!(tx.value, "0xffffffffffffffffffff");
        // access list entries keep their order
        assert_eq!(tx.access_list[0].storage_keys, vec!["0xk1", "0xk2"]);

        let index = transaction_index(&tx, 7);
        assert_eq!(index.selector, "0xa9059cbb");
        assert_eq!(index.row_id, 7);
        assert_eq!(index.from_address, "0xf");
        assert_eq!(index.to_address, "0xt");
    }

    #[test]
    fn short_input_yields_bare_selector() {
        let json = TransactionJson {
            input: "0x".to_string(),
            ..Default::default()
        };
        let tx = json.normalize(0).unwrap();
        assert_eq!(transaction_index(&tx, 0).selector, "0x");
    }
}
