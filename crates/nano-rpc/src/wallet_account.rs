//! Wallet-scoped account facade.
//!
//! Mutations (create, destroy, send, receive, change representative) need
//! both `wallet` and `account`; plain queries only need `account`, so those
//! are delegated to an inner [`Account`] through [`AccountQueries`].

use crate::account::{Account, AccountQueries};
use crate::client::RpcClient;
use crate::error::{Identifier, RpcError};
use crate::key::PublicKey;
use crate::params::Params;
use crate::response::{
    hex_field, hex_text, is_one, list_field, missing, string_field, text, HASH_HEX_LEN,
};
use crate::types::Balance;
use nano_types::Amount;
use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct WalletAccount {
    rpc: Arc<RpcClient>,
    wallet: String,
    account: Account,
}

impl WalletAccount {
    pub fn new(rpc: Arc<RpcClient>, wallet: impl Into<String>, account: Option<String>) -> Self {
        Self {
            account: Account::new(rpc.clone(), account),
            wallet: wallet.into(),
            rpc,
        }
    }

    pub fn wallet_id(&self) -> &str {
        &self.wallet
    }

    fn require_id(&self) -> Result<&str, RpcError> {
        self.account
            .id()
            .ok_or(RpcError::IdentifierRequired(Identifier::Account))
    }

    /// Call `action` with `wallet` and `account` set.
    fn rpc(&self, action: &str, params: Params) -> Result<Value, RpcError> {
        let account = self.require_id()?;
        self.rpc.call(
            action,
            Params::new()
                .with("wallet", self.wallet.as_str())
                .with("account", account)
                .extend(params),
        )
    }

    fn with_account(&self, account: String) -> WalletAccount {
        WalletAccount::new(self.rpc.clone(), self.wallet.clone(), Some(account))
    }

    /// Fail with a usage error unless the node accepts `account` as valid.
    fn check_account(&self, account: &str, what: &str) -> Result<(), RpcError> {
        let candidate = Account::new(self.rpc.clone(), Some(account.to_string()));
        if !candidate.exists()? {
            return Err(RpcError::usage(format!("invalid {what} account: {account}")));
        }
        Ok(())
    }

    /// Create `count` new accounts in the wallet.
    ///
    /// Needs only the wallet id, so it works on a facade with no account.
    pub fn create(&self, count: u64) -> Result<Vec<WalletAccount>, RpcError> {
        if count == 0 {
            return Err(RpcError::usage("count must be at least 1"));
        }
        let wallet = Params::new().with("wallet", self.wallet.as_str());
        if count == 1 {
            let resp = self.rpc.call("account_create", wallet)?;
            let account = string_field(&resp, "account_create", "account")?;
            return Ok(vec![self.with_account(account)]);
        }
        let resp = self
            .rpc
            .call("accounts_create", wallet.with("count", count))?;
        let accounts = list_field(&resp, "accounts_create", "accounts")?;
        Ok(accounts
            .iter()
            .map(|a| self.with_account(text(a)))
            .collect())
    }

    /// Remove the account from the wallet.
    pub fn destroy(&self) -> Result<bool, RpcError> {
        let resp = self.rpc("account_remove", Params::new())?;
        Ok(is_one(&resp, "removed"))
    }

    /// Send `amount` to `to`; returns the send block hash.
    ///
    /// `id` is forwarded to the node, which uses it to make retries of the
    /// same payment idempotent; it must be unique per logical payment.
    pub fn pay(&self, to: &str, amount: Amount, id: &str) -> Result<String, RpcError> {
        let source = self.require_id()?;
        if id.is_empty() {
            return Err(RpcError::usage("payment id must not be empty"));
        }
        self.check_account(to, "destination")?;

        let resp = self.rpc.call(
            "send",
            Params::new()
                .with("wallet", self.wallet.as_str())
                .with("source", source)
                .with("destination", to)
                .with("amount", amount)
                .with("id", id),
        )?;
        hex_field(&resp, "send", "block", HASH_HEX_LEN)
    }

    /// [`pay`](Self::pay) with `amount` written in the client's default
    /// unit (see [`RpcConfig::default_unit`](crate::RpcConfig)).
    pub fn pay_str(&self, to: &str, amount: &str, id: &str) -> Result<String, RpcError> {
        self.require_id()?;
        let amount = Amount::parse(amount, self.rpc.config().default_unit)?;
        self.pay(to, amount, id)
    }

    /// Receive `block`, or the oldest pending block when `None`.
    ///
    /// Returns the new receive block hash, or `None` when nothing is
    /// pending (no receive is attempted then).
    pub fn receive(&self, block: Option<&str>) -> Result<Option<String>, RpcError> {
        self.require_id()?;
        let block = match block {
            Some(block) => block.to_string(),
            None => {
                let pending = self.account.pending(1, false)?;
                let Value::Array(blocks) = &pending else {
                    return Err(missing(&pending, "pending", "blocks"));
                };
                match blocks.first() {
                    Some(hash) => hex_text(hash, HASH_HEX_LEN),
                    None => {
                        log::debug!("nothing pending for {}", self.account.id().unwrap_or_default());
                        return Ok(None);
                    }
                }
            }
        };
        let resp = self.rpc("receive", Params::new().with("block", block))?;
        hex_field(&resp, "receive", "block", HASH_HEX_LEN).map(Some)
    }

    /// Point the account at a new representative; returns the change block
    /// hash.
    pub fn change_representative(&self, representative: &str) -> Result<String, RpcError> {
        self.require_id()?;
        self.check_account(representative, "representative")?;
        let resp = self.rpc(
            "account_representative_set",
            Params::new().with("representative", representative),
        )?;
        hex_field(&resp, "account_representative_set", "block", HASH_HEX_LEN)
    }
}

impl AccountQueries for WalletAccount {
    fn id(&self) -> Option<&str> {
        self.account.id()
    }

    fn balance(&self) -> Result<Balance, RpcError> {
        self.account.balance()
    }

    fn block_count(&self) -> Result<u64, RpcError> {
        self.account.block_count()
    }

    fn delegators(&self) -> Result<BTreeMap<String, Amount>, RpcError> {
        self.account.delegators()
    }

    fn delegators_count(&self) -> Result<u64, RpcError> {
        self.account.delegators_count()
    }

    fn exists(&self) -> Result<bool, RpcError> {
        self.account.exists()
    }

    fn history(&self, limit: u64) -> Result<Vec<Value>, RpcError> {
        self.account.history(limit)
    }

    fn info(&self, detailed: bool) -> Result<Value, RpcError> {
        self.account.info(detailed)
    }

    fn last_modified_at(&self) -> Result<u64, RpcError> {
        self.account.last_modified_at()
    }

    fn ledger(&self, limit: u64, modified_since: Option<u64>) -> Result<Value, RpcError> {
        self.account.ledger(limit, modified_since)
    }

    fn pending(&self, limit: u64, detailed: bool) -> Result<Value, RpcError> {
        self.account.pending(limit, detailed)
    }

    fn public_key(&self) -> Result<PublicKey, RpcError> {
        self.account.public_key()
    }

    fn representative(&self) -> Result<String, RpcError> {
        self.account.representative()
    }

    fn weight(&self) -> Result<Amount, RpcError> {
        self.account.weight()
    }
}
