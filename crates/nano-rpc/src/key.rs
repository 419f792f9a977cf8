//! Key facades.
//!
//! A [`PrivateKey`] may start out unbound and get its id from the node
//! (`key_create` or `deterministic_key`); once set the id never changes.
//! The public key and account derived from it are looked up at most once.

use crate::account::Account;
use crate::client::RpcClient;
use crate::error::{Identifier, RpcError};
use crate::params::Params;
use crate::response::de::hash_hex;
use crate::response::{decode, hex_field, string_field, HASH_HEX_LEN};
use serde::Deserialize;
use serde_json::Value;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::{Arc, OnceLock};

/// The `public` / `account` pair both `key_expand` and key creation return.
#[derive(Debug, Clone, Deserialize)]
struct DerivedKeys {
    #[serde(rename = "public", deserialize_with = "hash_hex")]
    public_key: String,
    account: String,
}

/// Reject a blank key the same way [`Block::new`](crate::Block::new) rejects
/// a blank hash.
fn bound_key(key: String) -> Result<String, RpcError> {
    if key.trim().is_empty() {
        return Err(RpcError::IdentifierRequired(Identifier::Key));
    }
    Ok(key)
}

#[derive(Clone)]
pub struct PrivateKey {
    rpc: Arc<RpcClient>,
    key: OnceLock<String>,
    derived: OnceLock<DerivedKeys>,
}

impl PrivateKey {
    /// `None` leaves the facade unbound until [`create`](Self::create).
    pub fn new(rpc: Arc<RpcClient>, key: Option<String>) -> Result<Self, RpcError> {
        let cell = OnceLock::new();
        if let Some(key) = key {
            let _ = cell.set(bound_key(key)?);
        }
        Ok(Self {
            rpc,
            key: cell,
            derived: OnceLock::new(),
        })
    }

    pub fn id(&self) -> Option<&str> {
        self.key.get().map(String::as_str)
    }

    /// Have the node generate a key and bind this facade to it.
    ///
    /// With `seed` and `index` the key is derived deterministically; with
    /// neither a random key is created. Giving only one of them, or calling
    /// this on a facade that already holds a key, is a usage error.
    pub fn create(&self, seed: Option<&str>, index: Option<u32>) -> Result<&str, RpcError> {
        let (action, params) = match (seed, index) {
            (Some(seed), Some(index)) => (
                "deterministic_key",
                Params::new().with("seed", seed).with("index", index),
            ),
            (None, None) => ("key_create", Params::new()),
            _ => return Err(RpcError::usage("seed and index must be given together")),
        };
        if self.key.get().is_some() {
            return Err(RpcError::usage("private key is already set"));
        }

        // The only call made without an id; this is what sets it.
        let resp = self.rpc.call(action, params)?;
        let private = hex_field(&resp, action, "private", HASH_HEX_LEN)?;
        let derived: DerivedKeys = decode(resp, action)?;

        self.key
            .set(private)
            .map_err(|_| RpcError::usage("private key is already set"))?;
        let _ = self.derived.set(derived);
        log::debug!("private key created via {}", action);
        Ok(self.key.get().map(String::as_str).unwrap_or_default())
    }

    fn rpc(&self, action: &str, params: Params) -> Result<Value, RpcError> {
        let key = self
            .id()
            .ok_or(RpcError::IdentifierRequired(Identifier::Key))?;
        self.rpc
            .call(action, Params::new().with("key", key).extend(params))
    }

    fn derived(&self) -> Result<&DerivedKeys, RpcError> {
        if let Some(derived) = self.derived.get() {
            return Ok(derived);
        }
        let resp = self.rpc("key_expand", Params::new())?;
        let derived: DerivedKeys = decode(resp, "key_expand")?;
        Ok(self.derived.get_or_init(|| derived))
    }

    /// The account this key controls.
    pub fn account(&self) -> Result<Account, RpcError> {
        let derived = self.derived()?;
        Ok(Account::new(self.rpc.clone(), Some(derived.account.clone())))
    }

    pub fn public_key(&self) -> Result<PublicKey, RpcError> {
        let derived = self.derived()?;
        PublicKey::new(self.rpc.clone(), derived.public_key.clone())
    }
}

impl fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let key = if self.key.get().is_some() { "<set>" } else { "<unset>" };
        f.debug_struct("PrivateKey").field("key", &key).finish()
    }
}

impl PartialEq for PrivateKey {
    fn eq(&self, other: &Self) -> bool {
        self.id() == other.id()
    }
}

impl Eq for PrivateKey {}

impl Hash for PrivateKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id().hash(state);
    }
}

#[derive(Debug, Clone)]
pub struct PublicKey {
    rpc: Arc<RpcClient>,
    key: String,
}

impl PublicKey {
    pub fn new(rpc: Arc<RpcClient>, key: impl Into<String>) -> Result<Self, RpcError> {
        Ok(Self {
            rpc,
            key: bound_key(key.into())?,
        })
    }

    pub fn id(&self) -> &str {
        &self.key
    }

    /// The account address encoding this public key.
    pub fn account(&self) -> Result<Account, RpcError> {
        let resp = self
            .rpc
            .call("account_get", Params::new().with("key", self.key.as_str()))?;
        let account = string_field(&resp, "account_get", "account")?;
        Ok(Account::new(self.rpc.clone(), Some(account)))
    }
}

impl fmt::Display for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.key)
    }
}

impl PartialEq for PublicKey {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl Eq for PublicKey {}

impl Hash for PublicKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key.hash(state);
    }
}
