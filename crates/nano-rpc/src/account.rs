//! Account facade.
//!
//! Read-only queries about a single account. Every action here sends the
//! account under the `account` field; wallet-scoped mutations live on
//! [`WalletAccount`](crate::WalletAccount).

use crate::client::RpcClient;
use crate::error::{Identifier, RpcError};
use crate::key::PublicKey;
use crate::params::Params;
use crate::response::{
    amount_field, amount_map, collection_or_raw, decode, hex_field, is_one, list_field,
    string_field, u64_field, Shape, HASH_HEX_LEN,
};
use crate::types::Balance;
use nano_types::Amount;
use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Queries that only need an account id.
///
/// Implemented by [`Account`] and, by delegation, by
/// [`WalletAccount`](crate::WalletAccount).
pub trait AccountQueries {
    /// The account address, if bound.
    fn id(&self) -> Option<&str>;

    /// Balance and pending (receivable) amount.
    fn balance(&self) -> Result<Balance, RpcError>;

    /// Number of blocks in the account chain.
    fn block_count(&self) -> Result<u64, RpcError>;

    /// Accounts delegating to this one, with their balances.
    fn delegators(&self) -> Result<BTreeMap<String, Amount>, RpcError>;

    fn delegators_count(&self) -> Result<u64, RpcError>;

    /// Whether the node considers the address valid.
    fn exists(&self) -> Result<bool, RpcError>;

    /// Most recent `limit` entries of the account history.
    fn history(&self, limit: u64) -> Result<Vec<Value>, RpcError>;

    /// Raw `account_info`; `detailed` adds representative, weight and pending.
    fn info(&self, detailed: bool) -> Result<Value, RpcError>;

    /// Unix timestamp of the last change to the account.
    fn last_modified_at(&self) -> Result<u64, RpcError>;

    /// Ledger entries starting at this account.
    fn ledger(&self, limit: u64, modified_since: Option<u64>) -> Result<Value, RpcError>;

    /// Pending blocks: a list of hashes, or with `detailed` a map of
    /// hash → `{amount, source}`.
    fn pending(&self, limit: u64, detailed: bool) -> Result<Value, RpcError>;

    fn public_key(&self) -> Result<PublicKey, RpcError>;

    fn representative(&self) -> Result<String, RpcError>;

    /// Voting weight delegated to this account.
    fn weight(&self) -> Result<Amount, RpcError>;
}

#[derive(Debug, Clone)]
pub struct Account {
    rpc: Arc<RpcClient>,
    account: Option<String>,
}

impl Account {
    pub fn new(rpc: Arc<RpcClient>, account: Option<String>) -> Self {
        Self { rpc, account }
    }

    fn require_id(&self) -> Result<&str, RpcError> {
        self.account
            .as_deref()
            .ok_or(RpcError::IdentifierRequired(Identifier::Account))
    }

    fn rpc(&self, action: &str, params: Params) -> Result<Value, RpcError> {
        let account = self.require_id()?;
        self.rpc
            .call(action, Params::new().with("account", account).extend(params))
    }

    fn account_info(&self, params: Params) -> Result<Value, RpcError> {
        self.rpc("account_info", params)
    }
}

impl PartialEq for Account {
    fn eq(&self, other: &Self) -> bool {
        self.account == other.account
    }
}

impl Eq for Account {}

impl AccountQueries for Account {
    fn id(&self) -> Option<&str> {
        self.account.as_deref()
    }

    fn balance(&self) -> Result<Balance, RpcError> {
        let resp = self.rpc("account_balance", Params::new())?;
        decode(resp, "account_balance")
    }

    fn block_count(&self) -> Result<u64, RpcError> {
        let resp = self.rpc("account_block_count", Params::new())?;
        u64_field(&resp, "account_block_count", "block_count")
    }

    fn delegators(&self) -> Result<BTreeMap<String, Amount>, RpcError> {
        let resp = self.rpc("delegators", Params::new())?;
        amount_map(&resp, "delegators", "delegators")
    }

    fn delegators_count(&self) -> Result<u64, RpcError> {
        let resp = self.rpc("delegators_count", Params::new())?;
        u64_field(&resp, "delegators_count", "count")
    }

    fn exists(&self) -> Result<bool, RpcError> {
        let resp = self.rpc("validate_account_number", Params::new())?;
        Ok(is_one(&resp, "valid"))
    }

    fn history(&self, limit: u64) -> Result<Vec<Value>, RpcError> {
        let resp = self.rpc("account_history", Params::new().with("count", limit))?;
        list_field(&resp, "account_history", "history")
    }

    fn info(&self, detailed: bool) -> Result<Value, RpcError> {
        let params = if detailed {
            Params::new()
                .with("representative", true)
                .with("weight", true)
                .with("pending", true)
        } else {
            Params::new()
        };
        self.account_info(params)
    }

    fn last_modified_at(&self) -> Result<u64, RpcError> {
        let resp = self.account_info(Params::new())?;
        u64_field(&resp, "account_info", "modified_timestamp")
    }

    fn ledger(&self, limit: u64, modified_since: Option<u64>) -> Result<Value, RpcError> {
        let resp = self.rpc(
            "ledger",
            Params::new()
                .with("count", limit)
                .with_opt("modified_since", modified_since),
        )?;
        Ok(collection_or_raw(resp, "accounts", Shape::Map))
    }

    fn pending(&self, limit: u64, detailed: bool) -> Result<Value, RpcError> {
        let mut params = Params::new().with("count", limit);
        if detailed {
            params.insert("source", true);
        }
        let resp = self.rpc("pending", params)?;
        let shape = if detailed { Shape::Map } else { Shape::List };
        Ok(collection_or_raw(resp, "blocks", shape))
    }

    fn public_key(&self) -> Result<PublicKey, RpcError> {
        let resp = self.rpc("account_key", Params::new())?;
        let key = hex_field(&resp, "account_key", "key", HASH_HEX_LEN)?;
        PublicKey::new(self.rpc.clone(), key)
    }

    fn representative(&self) -> Result<String, RpcError> {
        let resp = self.rpc("account_representative", Params::new())?;
        string_field(&resp, "account_representative", "representative")
    }

    fn weight(&self) -> Result<Amount, RpcError> {
        let resp = self.rpc("account_weight", Params::new())?;
        amount_field(&resp, "account_weight", "weight")
    }
}
