//! Wallet facade.
//!
//! Typed methods for the node's wallet actions. `create` and `restore`
//! work without a wallet id; everything else sends it as `wallet`.

use crate::account::{Account, AccountQueries};
use crate::client::RpcClient;
use crate::error::{Identifier, RpcError};
use crate::params::Params;
use crate::response::{
    collection_or_raw, decode, decode_embedded, error_message, field, hex_field, is_one,
    list_field, string_field, text, Shape, HASH_HEX_LEN,
};
use crate::types::Balance;
use crate::wallet_account::WalletAccount;
use nano_types::Amount;
use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct Wallet {
    rpc: Arc<RpcClient>,
    wallet: Option<String>,
}

impl Wallet {
    pub fn new(rpc: Arc<RpcClient>, wallet: Option<String>) -> Self {
        Self { rpc, wallet }
    }

    pub fn id(&self) -> Option<&str> {
        self.wallet.as_deref()
    }

    fn require_id(&self) -> Result<&str, RpcError> {
        self.wallet
            .as_deref()
            .ok_or(RpcError::IdentifierRequired(Identifier::Wallet))
    }

    fn rpc(&self, action: &str, params: Params) -> Result<Value, RpcError> {
        let wallet = self.require_id()?;
        self.rpc
            .call(action, Params::new().with("wallet", wallet).extend(params))
    }

    fn bound(&self, wallet: String) -> Wallet {
        Wallet::new(self.rpc.clone(), Some(wallet))
    }

    // =========================================================================
    // Lifecycle
    // =========================================================================

    /// Create a new, empty wallet on the node.
    pub fn create(&self) -> Result<Wallet, RpcError> {
        let resp = self.rpc.call("wallet_create", Params::new())?;
        let wallet = hex_field(&resp, "wallet_create", "wallet", HASH_HEX_LEN)?;
        log::debug!("created wallet {}", wallet);
        Ok(self.bound(wallet))
    }

    /// Create a wallet from `seed` and pre-create `accounts` accounts in it.
    pub fn restore(&self, seed: &str, accounts: u64) -> Result<Wallet, RpcError> {
        if seed.trim().is_empty() {
            return Err(RpcError::usage("seed must not be empty"));
        }
        let wallet = self.create()?;
        let resp = wallet.rpc("wallet_change_seed", Params::new().with("seed", seed))?;
        if let Some(message) = error_message(&resp) {
            return Err(RpcError::Rpc {
                action: "wallet_change_seed".to_string(),
                message: message.to_string(),
            });
        }
        if accounts > 0 {
            wallet.account_template()?.create(accounts)?;
        }
        Ok(wallet)
    }

    /// Destroy the wallet and everything in it.
    pub fn destroy(&self) -> Result<bool, RpcError> {
        let resp = self.rpc("wallet_destroy", Params::new())?;
        Ok(is_one(&resp, "destroyed") || error_message(&resp).is_none())
    }

    /// The wallet exported as a JSON document.
    pub fn export(&self) -> Result<Value, RpcError> {
        let mut resp = self.rpc("wallet_export", Params::new())?;
        decode_embedded(&mut resp, "json")?;
        Ok(collection_or_raw(resp, "json", Shape::Map))
    }

    pub fn info(&self) -> Result<Value, RpcError> {
        self.rpc("wallet_info", Params::new())
    }

    // =========================================================================
    // Accounts
    // =========================================================================

    fn account_template(&self) -> Result<WalletAccount, RpcError> {
        let wallet = self.require_id()?;
        Ok(WalletAccount::new(self.rpc.clone(), wallet, None))
    }

    /// A facade for `account` within this wallet. No request is made.
    pub fn account(&self, account: &str) -> Result<WalletAccount, RpcError> {
        let wallet = self.require_id()?;
        Ok(WalletAccount::new(
            self.rpc.clone(),
            wallet,
            Some(account.to_string()),
        ))
    }

    /// Create `count` new accounts in this wallet.
    pub fn create_accounts(&self, count: u64) -> Result<Vec<WalletAccount>, RpcError> {
        self.account_template()?.create(count)
    }

    pub fn accounts(&self) -> Result<Vec<WalletAccount>, RpcError> {
        let wallet = self.require_id()?;
        let resp = self.rpc("account_list", Params::new())?;
        let accounts = list_field(&resp, "account_list", "accounts")?;
        Ok(accounts
            .iter()
            .map(|a| WalletAccount::new(self.rpc.clone(), wallet, Some(text(a))))
            .collect())
    }

    pub fn contains(&self, account: &str) -> Result<bool, RpcError> {
        let resp = self.rpc("wallet_contains", Params::new().with("account", account))?;
        Ok(is_one(&resp, "exists"))
    }

    /// Total balance across all accounts.
    pub fn balance(&self) -> Result<Balance, RpcError> {
        let resp = self.rpc("wallet_balance_total", Params::new())?;
        decode(resp, "wallet_balance_total")
    }

    /// Balance of each account, keyed by address.
    pub fn balances(&self) -> Result<BTreeMap<String, Balance>, RpcError> {
        let resp = self.rpc("wallet_balances", Params::new())?;
        Balance::map_from_response(&resp, "wallet_balances", "balances")
    }

    // =========================================================================
    // Representative
    // =========================================================================

    pub fn representative(&self) -> Result<String, RpcError> {
        let resp = self.rpc("wallet_representative", Params::new())?;
        string_field(&resp, "wallet_representative", "representative")
    }

    /// Set the representative used for new accounts; returns it back.
    pub fn change_default_representative(&self, representative: &str) -> Result<String, RpcError> {
        self.require_id()?;
        let candidate = Account::new(self.rpc.clone(), Some(representative.to_string()));
        if !candidate.exists()? {
            return Err(RpcError::usage(format!(
                "invalid representative account: {representative}"
            )));
        }
        let resp = self.rpc(
            "wallet_representative_set",
            Params::new().with("representative", representative),
        )?;
        if is_one(&resp, "set") {
            Ok(representative.to_string())
        } else {
            field(&resp, "wallet_representative_set", "set")?;
            Err(RpcError::Rpc {
                action: "wallet_representative_set".to_string(),
                message: format!("representative {representative} was not set"),
            })
        }
    }

    // =========================================================================
    // Locking
    // =========================================================================

    pub fn change_password(&self, password: &str) -> Result<bool, RpcError> {
        let resp = self.rpc("password_change", Params::new().with("password", password))?;
        Ok(is_one(&resp, "changed"))
    }

    pub fn is_locked(&self) -> Result<bool, RpcError> {
        let resp = self.rpc("wallet_locked", Params::new())?;
        Ok(is_one(&resp, "locked"))
    }

    pub fn unlock(&self, password: &str) -> Result<bool, RpcError> {
        let resp = self.rpc("password_enter", Params::new().with("password", password))?;
        Ok(is_one(&resp, "valid"))
    }

    // =========================================================================
    // Funds
    // =========================================================================

    /// Send from one of this wallet's accounts. See [`WalletAccount::pay`].
    pub fn pay(&self, from: &str, to: &str, amount: Amount, id: &str) -> Result<String, RpcError> {
        self.account(from)?.pay(to, amount, id)
    }

    /// Like [`pay`](Self::pay), with `amount` in the configured default unit.
    pub fn pay_str(&self, from: &str, to: &str, amount: &str, id: &str) -> Result<String, RpcError> {
        self.account(from)?.pay_str(to, amount, id)
    }

    /// Receive into one of this wallet's accounts. See
    /// [`WalletAccount::receive`].
    pub fn receive(&self, block: Option<&str>, into: &str) -> Result<Option<String>, RpcError> {
        self.account(into)?.receive(block)
    }

    /// Pending blocks for every account in the wallet, keyed by account.
    pub fn pending(&self, limit: u64, detailed: bool) -> Result<Value, RpcError> {
        let mut params = Params::new().with("count", limit);
        if detailed {
            params.insert("source", true);
        }
        let resp = self.rpc("wallet_pending", params)?;
        Ok(collection_or_raw(resp, "blocks", Shape::Map))
    }
}
