//! Response shaping shared by the facades.
//!
//! Responses have already been through [`coerce`](crate::coerce::coerce), so
//! `"1"` sentinels arrive as integer 1 and hex ids made only of digits arrive
//! as numbers. The helpers here undo the latter where a field is known to be
//! fixed-width hex.

use crate::error::RpcError;
use nano_types::Amount;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{Map, Value};
use std::collections::BTreeMap;

pub(crate) use nano_types::{HASH_HEX_LEN, WORK_HEX_LEN};

/// The error string carried by a 200 response, if any.
pub(crate) fn error_message(resp: &Value) -> Option<&str> {
    resp.get("error").and_then(Value::as_str)
}

/// True when `key` holds the integer sentinel 1.
pub(crate) fn is_one(resp: &Value, key: &str) -> bool {
    resp.get(key).and_then(Value::as_u64) == Some(1)
}

/// The node's own error if it sent one, otherwise a missing-field error.
pub(crate) fn missing(resp: &Value, action: &str, field: &str) -> RpcError {
    match error_message(resp) {
        Some(message) => RpcError::Rpc {
            action: action.to_string(),
            message: message.to_string(),
        },
        None => RpcError::MissingField {
            action: action.to_string(),
            field: field.to_string(),
        },
    }
}

pub(crate) fn field<'a>(resp: &'a Value, action: &str, key: &str) -> Result<&'a Value, RpcError> {
    resp.get(key).ok_or_else(|| missing(resp, action, key))
}

/// Render a scalar back to the text the node sent.
pub(crate) fn text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        other => other.to_string(),
    }
}

/// Like [`text`], but restores leading zeros lost when a digit-only hex
/// string was coerced into a number.
pub(crate) fn hex_text(value: &Value, width: usize) -> String {
    match value {
        Value::Number(n) => format!("{:0>width$}", n.to_string(), width = width),
        other => text(other),
    }
}

pub(crate) fn string_field(resp: &Value, action: &str, key: &str) -> Result<String, RpcError> {
    field(resp, action, key).map(text)
}

pub(crate) fn hex_field(
    resp: &Value,
    action: &str,
    key: &str,
    width: usize,
) -> Result<String, RpcError> {
    field(resp, action, key).map(|v| hex_text(v, width))
}

pub(crate) fn u64_field(resp: &Value, action: &str, key: &str) -> Result<u64, RpcError> {
    field(resp, action, key)?
        .as_u64()
        .ok_or_else(|| missing(resp, action, key))
}

pub(crate) fn as_u128(value: &Value) -> Option<u128> {
    match value {
        Value::Number(n) => n.to_string().parse().ok(),
        Value::String(s) => nano_types::parse_raw(s).ok(),
        _ => None,
    }
}

pub(crate) fn amount_field(resp: &Value, action: &str, key: &str) -> Result<Amount, RpcError> {
    as_u128(field(resp, action, key)?)
        .map(Amount::from_raw)
        .ok_or_else(|| missing(resp, action, key))
}

/// The shape an empty collection field should take.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Shape {
    List,
    Map,
}

impl Shape {
    fn empty(self) -> Value {
        match self {
            Shape::List => Value::Array(Vec::new()),
            Shape::Map => Value::Object(Map::new()),
        }
    }
}

/// Normalize a collection field: the node sends `""` instead of an empty
/// array or object.
pub(crate) fn collection(value: Value, shape: Shape) -> Value {
    match value {
        Value::String(s) if s.is_empty() => shape.empty(),
        Value::Null => shape.empty(),
        other => other,
    }
}

/// Take collection field `key` out of `resp`, or hand back the whole
/// response untouched when the field is absent (e.g. an error payload).
pub(crate) fn collection_or_raw(resp: Value, key: &str, shape: Shape) -> Value {
    match resp {
        Value::Object(mut map) if map.contains_key(key) => {
            collection(map.remove(key).unwrap_or(Value::Null), shape)
        }
        other => other,
    }
}

/// Collection field `key` as a required value.
pub(crate) fn collection_field(
    resp: &Value,
    action: &str,
    key: &str,
    shape: Shape,
) -> Result<Value, RpcError> {
    field(resp, action, key).map(|v| collection(v.clone(), shape))
}

/// A list field of arbitrary entries (e.g. history records).
pub(crate) fn list_field(resp: &Value, action: &str, key: &str) -> Result<Vec<Value>, RpcError> {
    match collection_field(resp, action, key, Shape::List)? {
        Value::Array(items) => Ok(items),
        _ => Err(missing(resp, action, key)),
    }
}

/// A list of hex ids (`["ABC…", …]`), tolerating the empty-string quirk.
pub(crate) fn hex_list(
    resp: &Value,
    action: &str,
    key: &str,
    width: usize,
) -> Result<Vec<String>, RpcError> {
    let list = collection_field(resp, action, key, Shape::List)?;
    match list {
        Value::Array(items) => Ok(items.iter().map(|v| hex_text(v, width)).collect()),
        // Some actions return the ids as object keys.
        Value::Object(map) => Ok(map.keys().cloned().collect()),
        _ => Err(missing(resp, action, key)),
    }
}

/// Decode a whole response into `T`, surfacing the node's error first.
pub(crate) fn decode<T: DeserializeOwned>(resp: Value, action: &str) -> Result<T, RpcError> {
    if let Some(message) = error_message(&resp) {
        return Err(RpcError::Rpc {
            action: action.to_string(),
            message: message.to_string(),
        });
    }
    Ok(serde_json::from_value(resp)?)
}

/// `deserialize_with` adapters for coerced responses.
pub(crate) mod de {
    use super::{as_u128, hex_text, HASH_HEX_LEN};
    use nano_types::Amount;
    use serde::de::Error;
    use serde::{Deserialize, Deserializer};
    use serde_json::Value;

    /// A raw amount, arriving as a coerced number or a digit string.
    pub(crate) fn raw_amount<'de, D: Deserializer<'de>>(d: D) -> Result<Amount, D::Error> {
        let value = Value::deserialize(d)?;
        as_u128(&value)
            .map(Amount::from_raw)
            .ok_or_else(|| D::Error::custom(format!("invalid raw amount {value}")))
    }

    /// Pair with `#[serde(default)]` for fields older nodes omit.
    pub(crate) fn opt_raw_amount<'de, D: Deserializer<'de>>(
        d: D,
    ) -> Result<Option<Amount>, D::Error> {
        raw_amount(d).map(Some)
    }

    /// A 64-digit hex id, re-padded if it was coerced into a number.
    pub(crate) fn hash_hex<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
        match Value::deserialize(d)? {
            value @ (Value::String(_) | Value::Number(_)) => Ok(hex_text(&value, HASH_HEX_LEN)),
            other => Err(D::Error::custom(format!("expected a hex id, got {other}"))),
        }
    }
}

#[derive(Deserialize)]
#[serde(transparent)]
struct RawAmount(#[serde(deserialize_with = "de::raw_amount")] Amount);

/// An object of `id -> raw amount`.
pub(crate) fn amount_map(
    resp: &Value,
    action: &str,
    key: &str,
) -> Result<BTreeMap<String, Amount>, RpcError> {
    let map = collection_field(resp, action, key, Shape::Map)?;
    let map: BTreeMap<String, RawAmount> = serde_json::from_value(map)?;
    Ok(map.into_iter().map(|(id, RawAmount(raw))| (id, raw)).collect())
}

/// Replace the string in `key` with the JSON document it contains.
///
/// The document is left as decoded: its scalars are the node's own strings,
/// so hex fields such as an all-zero `previous` keep their width.
pub(crate) fn decode_embedded(resp: &mut Value, key: &str) -> Result<(), RpcError> {
    let Some(slot) = resp.get_mut(key) else {
        return Ok(());
    };
    if let Value::String(s) = slot {
        let decoded: Value = serde_json::from_str(s)?;
        *slot = decoded;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_sentinels() {
        let resp = json!({ "valid": 1, "exists": 0, "locked": true });
        assert!(is_one(&resp, "valid"));
        assert!(!is_one(&resp, "exists"));
        assert!(!is_one(&resp, "locked"));
        assert!(!is_one(&resp, "missing"));
    }

    #[test]
    fn test_hex_text_restores_padding() {
        assert_eq!(hex_text(&json!(123), 16), "0000000000000123");
        assert_eq!(hex_text(&json!("2bf29ef00786a6bc"), 16), "2bf29ef00786a6bc");
    }

    #[test]
    fn test_missing_field_prefers_node_error() {
        let resp = json!({ "error": "Account not found" });
        match string_field(&resp, "account_info", "frontier") {
            Err(RpcError::Rpc { action, message }) => {
                assert_eq!(action, "account_info");
                assert_eq!(message, "Account not found");
            }
            other => panic!("unexpected {other:?}"),
        }
        assert!(matches!(
            string_field(&json!({}), "account_info", "frontier"),
            Err(RpcError::MissingField { .. })
        ));
    }

    #[test]
    fn test_collection_quirk() {
        assert_eq!(collection(json!(""), Shape::List), json!([]));
        assert_eq!(collection(json!(""), Shape::Map), json!({}));
        assert_eq!(collection(json!(["A"]), Shape::List), json!(["A"]));
        assert_eq!(
            collection_or_raw(json!({ "blocks": "" }), "blocks", Shape::Map),
            json!({})
        );
        assert_eq!(
            collection_or_raw(json!({ "error": "Bad account number" }), "blocks", Shape::List),
            json!({ "error": "Bad account number" })
        );
    }

    #[test]
    fn test_amount_map() {
        let resp = json!({ "delegators": { "nano_1a": 100, "nano_1b": 0 } });
        let map = amount_map(&resp, "delegators", "delegators").unwrap();
        assert_eq!(map["nano_1a"], Amount::from_raw(100));
        assert_eq!(map.len(), 2);
        let empty = amount_map(&json!({ "delegators": "" }), "delegators", "delegators").unwrap();
        assert!(empty.is_empty());

        let bad = json!({ "delegators": { "nano_1a": "lots" } });
        assert!(matches!(
            amount_map(&bad, "delegators", "delegators"),
            Err(RpcError::Json(_))
        ));
    }

    #[test]
    fn test_decode_surfaces_node_error() {
        let resp = json!({ "error": "Wallet not found" });
        let err = decode::<BTreeMap<String, Value>>(resp, "wallet_info").unwrap_err();
        assert!(matches!(err, RpcError::Rpc { ref message, .. } if message == "Wallet not found"));
    }

    #[derive(Debug, Deserialize)]
    struct Keyed {
        #[serde(deserialize_with = "de::hash_hex")]
        key: String,
        #[serde(deserialize_with = "de::raw_amount")]
        amount: Amount,
    }

    #[test]
    fn test_adapters_read_coerced_values() {
        let resp = crate::coerce::coerce(json!({
            "key": "0000000000000000000000000000000000000000000000000000000000000042",
            "amount": "340282366920938463463374607431768211455"
        }));
        let keyed: Keyed = decode(resp, "account_key").unwrap();
        assert_eq!(keyed.key.len(), HASH_HEX_LEN);
        assert!(keyed.key.ends_with("42"));
        assert_eq!(keyed.amount.raw(), u128::MAX);
    }

    #[test]
    fn test_decode_embedded() {
        let zero = "0".repeat(64);
        let mut resp = json!({
            "contents": format!("{{\"type\":\"state\",\"balance\":\"5\",\"previous\":\"{zero}\"}}"),
            "amount": 1
        });
        decode_embedded(&mut resp, "contents").unwrap();
        assert_eq!(
            resp["contents"],
            json!({ "type": "state", "balance": "5", "previous": zero })
        );

        let mut bad = json!({ "contents": "{not json" });
        assert!(matches!(decode_embedded(&mut bad, "contents"), Err(RpcError::Json(_))));
    }
}
