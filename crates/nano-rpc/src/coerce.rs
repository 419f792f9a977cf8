//! Response coercion.
//!
//! The node encodes every scalar as a JSON string. [`coerce`] turns digit
//! strings into integers and `"true"`/`"false"` into booleans, walking
//! objects and arrays without changing their shape.

use serde_json::{Map, Number, Value};

/// Retype every string scalar in `value`.
///
/// Arrays are walked element by element and each element picks its own rule
/// from its shape, so both lists of records and lists of bare ids coerce
/// correctly with no type tag on the array. Digit strings too large for 128
/// bits stay strings.
pub fn coerce(value: Value) -> Value {
    match value {
        Value::String(s) => coerce_scalar(s),
        Value::Object(map) => Value::Object(coerce_object(map)),
        Value::Array(items) => Value::Array(items.into_iter().map(coerce).collect()),
        other => other,
    }
}

fn coerce_object(map: Map<String, Value>) -> Map<String, Value> {
    map.into_iter().map(|(k, v)| (k, coerce(v))).collect()
}

fn coerce_scalar(s: String) -> Value {
    if is_digits(&s) {
        return match integer(&s) {
            Some(n) => Value::Number(n),
            None => Value::String(s),
        };
    }
    match s.as_str() {
        "true" => Value::Bool(true),
        "false" => Value::Bool(false),
        _ => Value::String(s),
    }
}

fn is_digits(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

fn integer(digits: &str) -> Option<Number> {
    let n: u128 = digits.parse().ok()?;
    match u64::try_from(n) {
        Ok(small) => Some(Number::from(small)),
        // Re-render to drop leading zeros, which JSON number syntax rejects.
        Err(_) => serde_json::from_str(&n.to_string()).ok(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_scalars() {
        assert_eq!(coerce(json!("123")), json!(123));
        assert_eq!(coerce(json!("0")), json!(0));
        assert_eq!(coerce(json!("007")), json!(7));
        assert_eq!(coerce(json!("true")), json!(true));
        assert_eq!(coerce(json!("false")), json!(false));
        assert_eq!(coerce(json!("True")), json!("True"));
        assert_eq!(coerce(json!("")), json!(""));
        assert_eq!(coerce(json!("-1")), json!("-1"));
        assert_eq!(coerce(json!("1.5")), json!("1.5"));
        assert_eq!(coerce(json!("nano_1abc")), json!("nano_1abc"));
        assert_eq!(coerce(json!(null)), json!(null));
    }

    #[test]
    fn test_raw_amount_survives() {
        let raw = "340282366920938463463374607431768211455";
        let coerced = coerce(json!(raw));
        match &coerced {
            Value::Number(n) => assert_eq!(n.to_string(), raw),
            other => panic!("expected number, got {other:?}"),
        }
    }

    #[test]
    fn test_too_large_stays_string() {
        let huge = "9".repeat(50);
        assert_eq!(coerce(json!(huge.clone())), json!(huge));
    }

    #[test]
    fn test_nested_object() {
        let wire = json!({
            "balance": "1000",
            "pending": "0",
            "info": { "locked": "false", "count": "3", "name": "main" }
        });
        assert_eq!(
            coerce(wire),
            json!({
                "balance": 1000,
                "pending": 0,
                "info": { "locked": false, "count": 3, "name": "main" }
            })
        );
    }

    #[test]
    fn test_array_of_records() {
        let wire = json!({
            "history": [
                { "type": "send", "amount": "5", "hash": "ABC" },
                { "type": "receive", "amount": "7", "hash": "DEF" }
            ]
        });
        assert_eq!(
            coerce(wire),
            json!({
                "history": [
                    { "type": "send", "amount": 5, "hash": "ABC" },
                    { "type": "receive", "amount": 7, "hash": "DEF" }
                ]
            })
        );
    }

    #[test]
    fn test_array_of_scalars() {
        assert_eq!(
            coerce(json!(["1", "true", "xrb_1", ["2"]])),
            json!([1, true, "xrb_1", [2]])
        );
    }

    #[test]
    fn test_shape_preserved() {
        let wire = json!({ "a": ["x", "y", "z"], "b": {}, "c": [] });
        let coerced = coerce(wire.clone());
        assert_eq!(coerced["a"].as_array().unwrap().len(), 3);
        assert_eq!(
            coerced.as_object().unwrap().keys().collect::<Vec<_>>(),
            wire.as_object().unwrap().keys().collect::<Vec<_>>()
        );
    }
}
