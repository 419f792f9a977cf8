//! Work peers: remote hosts the node asks to generate proof of work.

use crate::client::RpcClient;
use crate::error::RpcError;
use crate::params::Params;
use crate::response::{list_field, text};
use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct WorkPeer {
    rpc: Arc<RpcClient>,
}

impl WorkPeer {
    pub fn new(rpc: Arc<RpcClient>) -> Self {
        Self { rpc }
    }

    /// Register `address:port` as a work peer.
    pub fn add(&self, address: &str, port: u16) -> Result<bool, RpcError> {
        let resp = self.rpc.call(
            "work_peer_add",
            Params::new().with("address", address).with("port", port),
        )?;
        Ok(resp.get("success").is_some())
    }

    /// Forget every registered work peer.
    pub fn clear(&self) -> Result<bool, RpcError> {
        let resp = self.rpc.call("work_peers_clear", Params::new())?;
        Ok(resp.get("success").is_some())
    }

    /// Registered peers as `address:port` strings.
    pub fn list(&self) -> Result<Vec<String>, RpcError> {
        let resp = self.rpc.call("work_peers", Params::new())?;
        let peers = list_field(&resp, "work_peers", "work_peers")?;
        Ok(peers.iter().map(text).collect())
    }
}
