//! Entry point tying the facades to one shared client.

use crate::account::Account;
use crate::block::Block;
use crate::client::{RpcClient, RpcConfig, DEFAULT_URL};
use crate::error::RpcError;
use crate::key::{PrivateKey, PublicKey};
use crate::node::Node;
use crate::transport::HttpTransport;
use crate::wallet::Wallet;
use crate::wallet_account::WalletAccount;
use crate::work_peer::WorkPeer;
use nano_types::Amount;
use std::sync::Arc;

/// A connection to one node, handing out facades that share it.
///
/// Facades are cheap to create; none of the factories below talks to the
/// node.
#[derive(Debug, Clone)]
pub struct Nano {
    rpc: Arc<RpcClient>,
}

impl Nano {
    /// Connect to the node RPC endpoint at `uri`.
    pub fn new(uri: &str) -> Result<Self, RpcError> {
        Ok(Self::from_client(RpcClient::new(uri)?))
    }

    /// Connect to a node on this machine at the default port.
    pub fn local() -> Result<Self, RpcError> {
        Self::new(DEFAULT_URL)
    }

    pub fn with_config(config: RpcConfig) -> Result<Self, RpcError> {
        Ok(Self::from_client(RpcClient::with_config(config)?))
    }

    pub fn with_transport(
        config: RpcConfig,
        transport: impl HttpTransport + 'static,
    ) -> Result<Self, RpcError> {
        Ok(Self::from_client(RpcClient::with_transport(config, transport)?))
    }

    pub fn from_client(rpc: RpcClient) -> Self {
        Self { rpc: Arc::new(rpc) }
    }

    /// The underlying client, for actions no facade covers.
    pub fn rpc(&self) -> &Arc<RpcClient> {
        &self.rpc
    }

    pub fn account(&self, account: &str) -> Account {
        Account::new(self.rpc.clone(), Some(account.to_string()))
    }

    pub fn block(&self, hash: &str) -> Result<Block, RpcError> {
        Block::new(self.rpc.clone(), hash)
    }

    /// A private key facade; pass `None` and call
    /// [`PrivateKey::create`] to have the node generate one.
    /// A blank `key` is rejected like a blank block hash.
    pub fn private_key(&self, key: Option<&str>) -> Result<PrivateKey, RpcError> {
        PrivateKey::new(self.rpc.clone(), key.map(str::to_string))
    }

    pub fn public_key(&self, key: &str) -> Result<PublicKey, RpcError> {
        PublicKey::new(self.rpc.clone(), key)
    }

    /// A wallet facade; pass `None` to create or restore a wallet.
    pub fn wallet(&self, wallet: Option<&str>) -> Wallet {
        Wallet::new(self.rpc.clone(), wallet.map(str::to_string))
    }

    pub fn wallet_account(&self, wallet: &str, account: Option<&str>) -> WalletAccount {
        WalletAccount::new(self.rpc.clone(), wallet, account.map(str::to_string))
    }

    pub fn node(&self) -> Node {
        Node::new(self.rpc.clone())
    }

    pub fn work_peers(&self) -> WorkPeer {
        WorkPeer::new(self.rpc.clone())
    }

    /// Parse `s` in the configured default unit.
    pub fn parse_amount(&self, s: &str) -> Result<Amount, RpcError> {
        Ok(Amount::parse(s, self.rpc.config().default_unit)?)
    }

    /// Format `amount` in the configured default unit.
    pub fn display_amount(&self, amount: Amount) -> String {
        amount.format(self.rpc.config().default_unit)
    }
}
