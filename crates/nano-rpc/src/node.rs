//! Node facade: queries and commands about the node itself.

use crate::client::RpcClient;
use crate::error::RpcError;
use crate::params::Params;
use crate::response::{amount_map, collection_or_raw, decode, hex_list, u64_field, Shape};
use crate::types::BlockCount;
use nano_types::Amount;
use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct Node {
    rpc: Arc<RpcClient>,
}

impl Node {
    pub fn new(rpc: Arc<RpcClient>) -> Self {
        Self { rpc }
    }

    fn rpc(&self, action: &str, params: Params) -> Result<Value, RpcError> {
        self.rpc.call(action, params)
    }

    /// Number of accounts in the ledger.
    pub fn account_count(&self) -> Result<u64, RpcError> {
        let resp = self.rpc("frontier_count", Params::new())?;
        u64_field(&resp, "frontier_count", "count")
    }

    pub fn block_count(&self) -> Result<BlockCount, RpcError> {
        let resp = self.rpc("block_count", Params::new())?;
        decode(resp, "block_count")
    }

    /// Block counts broken down by block type.
    pub fn block_count_by_type(&self) -> Result<Value, RpcError> {
        self.rpc("block_count_type", Params::new())
    }

    /// Start bootstrapping from the peer at `address:port`.
    pub fn bootstrap(&self, address: &str, port: u16) -> Result<bool, RpcError> {
        let resp = self.rpc(
            "bootstrap",
            Params::new().with("address", address).with("port", port),
        )?;
        Ok(resp.get("success").is_some())
    }

    /// Start bootstrapping from any known peer.
    pub fn bootstrap_any(&self) -> Result<bool, RpcError> {
        let resp = self.rpc("bootstrap_any", Params::new())?;
        Ok(resp.get("success").is_some())
    }

    pub fn bootstrap_status(&self) -> Result<Value, RpcError> {
        self.rpc("bootstrap_status", Params::new())
    }

    /// Connected peers keyed by `[address]:port`.
    pub fn peers(&self) -> Result<Value, RpcError> {
        let resp = self.rpc("peers", Params::new())?;
        Ok(collection_or_raw(resp, "peers", Shape::Map))
    }

    /// Every representative with its voting weight.
    pub fn representatives(&self) -> Result<BTreeMap<String, Amount>, RpcError> {
        let resp = self.rpc("representatives", Params::new())?;
        amount_map(&resp, "representatives", "representatives")
    }

    /// Addresses of representatives the node has recently seen vote.
    pub fn representatives_online(&self) -> Result<Vec<String>, RpcError> {
        let resp = self.rpc("representatives_online", Params::new())?;
        // Older nodes send a list, newer ones an object keyed by address.
        hex_list(&resp, "representatives_online", "representatives", 0)
    }

    /// Ask the node process to shut down.
    pub fn stop(&self) -> Result<bool, RpcError> {
        let resp = self.rpc("stop", Params::new())?;
        Ok(resp.get("success").is_some())
    }

    /// Blocks waiting in the unchecked table, at most `limit`.
    pub fn synchronizing_blocks(&self, limit: u64) -> Result<Value, RpcError> {
        let resp = self.rpc("unchecked", Params::new().with("count", limit))?;
        Ok(collection_or_raw(resp, "blocks", Shape::Map))
    }

    pub fn version(&self) -> Result<Value, RpcError> {
        self.rpc("version", Params::new())
    }

    /// Seconds since the node started.
    pub fn uptime(&self) -> Result<u64, RpcError> {
        let resp = self.rpc("uptime", Params::new())?;
        u64_field(&resp, "uptime", "seconds")
    }
}
