//! Minimal ABI evaluation layer: fragment selection by selector/topic0 and
//! decoding of log topics, log data, and transaction input into canonical
//! JSON values (integers as decimal strings, addresses as checksummed hex,
//! bytes as 0x hex, tuples and arrays recursive).

use alloy_dyn_abi::{DynSolValue, EventExt, JsonAbiExt};
use alloy_json_abi::{Event, Function, JsonAbi};
use alloy_primitives::{hex, B256};
use serde_json::{Map, Value};

use crate::models::errors::AbiError;

pub fn parse_abi(raw: &str) -> Result<JsonAbi, AbiError> {
    Ok(serde_json::from_str(raw)?)
}

/// Find the event whose signature hash equals `topic0`.
pub fn event_by_topic0<'a>(abi: &'a JsonAbi, topic0: &B256) -> Option<&'a Event> {
    abi.events().find(|event| event.selector() == *topic0)
}

/// Find the function whose 4-byte selector matches the 10-character hex
/// form (`0x` + 8 hex chars).
pub fn function_by_selector<'a>(abi: &'a JsonAbi, selector: &str) -> Option<&'a Function> {
    abi.functions().find(|function| {
        let sel = format!("0x{}", hex::encode(function.selector()));
        sel.eq_ignore_ascii_case(selector)
    })
}

/// Decode a log against an event fragment. Indexed parameters come out of
/// the topic slots (dynamic indexed types surface as their keccak hash,
/// the original value is unrecoverable); the rest decode from `data` with
/// the standard head/tail layout.
pub fn decode_event(
    event: &Event,
    topics: &[String],
    data: &str,
) -> Result<Map<String, Value>, AbiError> {
    let parsed_topics = topics
        .iter()
        .map(|topic| {
            topic.parse::<B256>().map_err(|e| AbiError::BadPayload {
                field: "topics",
                message: e.to_string(),
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    let data_bytes = hex::decode(data).map_err(|e| AbiError::BadPayload {
        field: "data",
        message: e.to_string(),
    })?;

    let decoded = event.decode_log_parts(parsed_topics, &data_bytes, false)?;

    let mut indexed = decoded.indexed.into_iter();
    let mut body = decoded.body.into_iter();
    let mut out = Map::with_capacity(event.inputs.len());

    for (position, param) in event.inputs.iter().enumerate() {
        let value = if param.indexed {
            indexed.next()
        } else {
            body.next()
        };
        let Some(value) = value else {
            return Err(AbiError::BadPayload {
                field: "abi",
                message: format!("missing decoded value for parameter {position}"),
            });
        };
        out.insert(param_key(&param.name, position), sol_value_to_json(&value));
    }

    Ok(out)
}

/// Decode calldata against a function fragment. `input` is the full hex
/// input including the selector.
pub fn decode_function_input(
    function: &Function,
    input: &str,
) -> Result<Map<String, Value>, AbiError> {
    let input_bytes = hex::decode(input).map_err(|e| AbiError::BadPayload {
        field: "input",
        message: e.to_string(),
    })?;

    if input_bytes.len() < 4 {
        return Err(AbiError::BadPayload {
            field: "input",
            message: "shorter than a function selector".to_string(),
        });
    }

    let values = function.abi_decode_input(&input_bytes[4..], false)?;

    if values.len() != function.inputs.len() {
        return Err(AbiError::BadPayload {
            field: "input",
            message: format!(
                "decoded {} values for {} parameters",
                values.len(),
                function.inputs.len()
            ),
        });
    }

    let mut out = Map::with_capacity(function.inputs.len());
    for (position, (param, value)) in function.inputs.iter().zip(values.iter()).enumerate() {
        out.insert(param_key(&param.name, position), sol_value_to_json(value));
    }

    Ok(out)
}

fn param_key(name: &str, position: usize) -> String {
    if name.is_empty() {
        format!("arg{position}")
    } else {
        name.to_string()
    }
}

fn sol_value_to_json(value: &DynSolValue) -> Value {
    match value {
        DynSolValue::Bool(b) => Value::Bool(*b),
        DynSolValue::Int(i, _) => Value::String(i.to_string()),
        DynSolValue::Uint(u, _) => Value::String(u.to_string()),
        DynSolValue::Address(a) => Value::String(a.to_checksum(None)),
        DynSolValue::Function(f) => Value::String(format!("0x{}", hex::encode(f.as_slice()))),
        DynSolValue::FixedBytes(word, size) => {
            Value::String(format!("0x{}", hex::encode(&word[..*size])))
        }
        DynSolValue::Bytes(bytes) => Value::String(format!("0x{}", hex::encode(bytes))),
        DynSolValue::String(s) => Value::String(s.clone()),
        DynSolValue::Array(items) | DynSolValue::FixedArray(items) => {
            Value::Array(items.iter().map(sol_value_to_json).collect())
        }
        DynSolValue::Tuple(items) => Value::Array(items.iter().map(sol_value_to_json).collect()),
    }
}
