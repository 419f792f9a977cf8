//! Block facade.
//!
//! The node is inconsistent about where a block hash goes: most actions
//! want it as `hash`, while `chain` and `successors` want `block`. Each method
//! names the field explicitly.

use crate::account::Account;
use crate::client::RpcClient;
use crate::error::{Identifier, RpcError};
use crate::params::Params;
use crate::response::{
    decode_embedded, error_message, hex_field, hex_list, is_one, list_field, string_field,
    HASH_HEX_LEN, WORK_HEX_LEN,
};
use serde_json::Value;
use std::sync::Arc;

/// Error text `unchecked_get` returns for a block it has never seen.
const BLOCK_NOT_FOUND: &str = "Block not found";

#[derive(Debug, Clone)]
pub struct Block {
    rpc: Arc<RpcClient>,
    block: String,
}

impl Block {
    /// A block facade is always bound; an empty hash is rejected.
    pub fn new(rpc: Arc<RpcClient>, block: impl Into<String>) -> Result<Self, RpcError> {
        let block = block.into();
        if block.trim().is_empty() {
            return Err(RpcError::IdentifierRequired(Identifier::Block));
        }
        Ok(Self { rpc, block })
    }

    pub fn id(&self) -> &str {
        &self.block
    }

    /// Call `action` with this block's hash under `field`.
    fn rpc(&self, action: &str, field: &str, params: Params) -> Result<Value, RpcError> {
        self.rpc
            .call(action, Params::new().with(field, self.block.as_str()).extend(params))
    }

    /// The account that owns this block.
    pub fn account(&self) -> Result<Account, RpcError> {
        let resp = self.rpc("block_account", "hash", Params::new())?;
        let account = string_field(&resp, "block_account", "account")?;
        Ok(Account::new(self.rpc.clone(), Some(account)))
    }

    /// Stop any work generation in progress for this block.
    pub fn cancel_work(&self) -> Result<bool, RpcError> {
        let resp = self.rpc("work_cancel", "hash", Params::new())?;
        Ok(error_message(&resp).is_none())
    }

    /// Hashes walking back from this block, at most `limit`.
    pub fn chain(&self, limit: u64) -> Result<Vec<String>, RpcError> {
        let resp = self.rpc("chain", "block", Params::new().with("count", limit))?;
        hex_list(&resp, "chain", "blocks", HASH_HEX_LEN)
    }

    /// Hashes walking forward from this block, at most `limit`.
    pub fn successors(&self, limit: u64) -> Result<Vec<String>, RpcError> {
        let resp = self.rpc("successors", "block", Params::new().with("count", limit))?;
        hex_list(&resp, "successors", "blocks", HASH_HEX_LEN)
    }

    /// Ask the node to start an election for this block.
    pub fn confirm(&self) -> Result<bool, RpcError> {
        let resp = self.rpc("block_confirm", "hash", Params::new())?;
        Ok(is_one(&resp, "started"))
    }

    pub fn generate_work(&self) -> Result<String, RpcError> {
        let resp = self.rpc("work_generate", "hash", Params::new())?;
        hex_field(&resp, "work_generate", "work", WORK_HEX_LEN)
    }

    pub fn history(&self, limit: u64) -> Result<Vec<Value>, RpcError> {
        let resp = self.rpc("history", "hash", Params::new().with("count", limit))?;
        list_field(&resp, "history", "history")
    }

    /// Block details with `contents` decoded into an object.
    ///
    /// With `allow_unchecked` the unchecked table is tried first; a
    /// "Block not found" there falls through to the ledger lookup. Any other
    /// node error is returned as the raw response.
    pub fn info(&self, allow_unchecked: bool) -> Result<Value, RpcError> {
        if allow_unchecked {
            let mut resp = self.rpc("unchecked_get", "hash", Params::new())?;
            if error_message(&resp) != Some(BLOCK_NOT_FOUND) {
                decode_embedded(&mut resp, "contents")?;
                return Ok(resp);
            }
            log::debug!("block {} not in unchecked table, using block_info", self.block);
        }
        let mut resp = self.rpc("block_info", "hash", Params::new())?;
        decode_embedded(&mut resp, "contents")?;
        Ok(resp)
    }

    pub fn is_valid_work(&self, work: &str) -> Result<bool, RpcError> {
        let resp = self.rpc("work_validate", "hash", Params::new().with("work", work))?;
        Ok(is_one(&resp, "valid") || is_one(&resp, "valid_all"))
    }

    /// Whether this block is still waiting to be received.
    pub fn is_pending(&self) -> Result<bool, RpcError> {
        let resp = self.rpc("pending_exists", "hash", Params::new())?;
        Ok(is_one(&resp, "exists"))
    }

    /// Re-broadcast this block's contents; returns the hash the node reports.
    pub fn publish(&self) -> Result<String, RpcError> {
        // `contents` is forwarded as the node sent it, still JSON-encoded.
        let info = self.rpc("block_info", "hash", Params::new())?;
        let contents = string_field(&info, "block_info", "contents")?;
        let resp = self.rpc.call("process", Params::new().with("block", contents))?;
        hex_field(&resp, "process", "hash", HASH_HEX_LEN)
    }

    /// Rebroadcast this block, optionally followed by `destinations` send
    /// blocks or preceded by `sources` blocks (never both).
    pub fn republish(
        &self,
        destinations: Option<u64>,
        sources: Option<u64>,
    ) -> Result<Vec<String>, RpcError> {
        if destinations.is_some() && sources.is_some() {
            return Err(RpcError::usage(
                "either destinations or sources may be given, not both",
            ));
        }
        let mut params = Params::new()
            .with_opt("destinations", destinations)
            .with_opt("sources", sources);
        if !params.is_empty() {
            params.insert("count", 1u64);
        }
        let resp = self.rpc("republish", "hash", params)?;
        hex_list(&resp, "republish", "blocks", HASH_HEX_LEN)
    }
}
