//! Typed results shared by several facades.

use crate::error::RpcError;
use crate::response::de::{opt_raw_amount, raw_amount};
use crate::response::{collection_field, Shape};
use nano_types::Amount;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Confirmed balance plus funds sent to the account but not yet received.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "BalanceWire")]
pub struct Balance {
    pub balance: Amount,
    pub pending: Amount,
}

/// `pending` was renamed `receivable`; nodes in between send both.
#[derive(Deserialize)]
struct BalanceWire {
    #[serde(deserialize_with = "raw_amount")]
    balance: Amount,
    #[serde(default, deserialize_with = "opt_raw_amount")]
    pending: Option<Amount>,
    #[serde(default, deserialize_with = "opt_raw_amount")]
    receivable: Option<Amount>,
}

impl TryFrom<BalanceWire> for Balance {
    type Error = String;

    fn try_from(wire: BalanceWire) -> Result<Self, Self::Error> {
        let pending = wire
            .pending
            .or(wire.receivable)
            .ok_or("missing field `pending`")?;
        Ok(Self {
            balance: wire.balance,
            pending,
        })
    }
}

impl Balance {
    /// Per-account balances held under `key`; `""` means none.
    pub(crate) fn map_from_response(
        resp: &Value,
        action: &str,
        key: &str,
    ) -> Result<BTreeMap<String, Balance>, RpcError> {
        let entries = collection_field(resp, action, key, Shape::Map)?;
        Ok(serde_json::from_value(entries)?)
    }
}

/// Ledger block counters from `block_count`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockCount {
    pub count: u64,
    pub unchecked: u64,
    /// Only reported by nodes that track cementing.
    #[serde(default)]
    pub cemented: Option<u64>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coerce::coerce;
    use crate::response::decode;
    use serde_json::json;

    #[test]
    fn test_balance_decode() {
        let resp = coerce(json!({ "balance": "10", "pending": "2" }));
        let b: Balance = decode(resp, "account_balance").unwrap();
        assert_eq!(b.balance, Amount::from_raw(10));
        assert_eq!(b.pending, Amount::from_raw(2));

        let newer = coerce(json!({ "balance": "10", "receivable": "3" }));
        let b: Balance = decode(newer, "account_balance").unwrap();
        assert_eq!(b.pending, Amount::from_raw(3));

        let both = coerce(json!({ "balance": "10", "pending": "4", "receivable": "4" }));
        let b: Balance = decode(both, "account_balance").unwrap();
        assert_eq!(b.pending, Amount::from_raw(4));
    }

    #[test]
    fn test_balance_needs_pending() {
        let resp = coerce(json!({ "balance": "10" }));
        assert!(matches!(
            decode::<Balance>(resp, "account_balance"),
            Err(RpcError::Json(_))
        ));
    }

    #[test]
    fn test_balance_map() {
        let resp = coerce(json!({
            "balances": {
                "nano_1a": { "balance": "1", "pending": "0" },
                "nano_1b": { "balance": "5", "pending": "5" }
            }
        }));
        let map = Balance::map_from_response(&resp, "wallet_balances", "balances").unwrap();
        assert_eq!(map.len(), 2);
        assert_eq!(map["nano_1b"].pending, Amount::from_raw(5));

        let empty = json!({ "balances": "" });
        assert!(Balance::map_from_response(&empty, "wallet_balances", "balances")
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_block_count() {
        let resp = coerce(json!({ "count": "1000", "unchecked": "10" }));
        let c: BlockCount = decode(resp, "block_count").unwrap();
        assert_eq!(c.count, 1000);
        assert_eq!(c.cemented, None);

        let resp = coerce(json!({ "count": "1000", "unchecked": "10", "cemented": "990" }));
        let c: BlockCount = decode(resp, "block_count").unwrap();
        assert_eq!(c.cemented, Some(990));
    }
}
