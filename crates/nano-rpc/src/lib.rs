//! Nano node RPC client library.
//!
//! Provides a blocking client for the node's JSON-over-HTTP RPC, plus
//! facades for accounts, blocks, keys, wallets, the node itself and its
//! work peers. Every value the node sends as a numeric string is coerced to
//! a JSON number or boolean before a facade sees it; amounts are exact
//! [`Amount`]s in raw.
//!
//! # Example
//!
//! ```ignore
//! use nano_rpc::{AccountQueries, Nano};
//!
//! fn main() -> Result<(), nano_rpc::RpcError> {
//!     let nano = Nano::new("http://localhost:7076")?;
//!     let account = nano.account("nano_3t6k35gi95xu6tergt6p69ck76ogmitsa8mnijtpxm9fkcm736xtoncuohr3");
//!     let balance = account.balance()?;
//!     println!("Balance: {}", nano.display_amount(balance.balance));
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod coerce;
pub mod params;
pub mod transport;
pub mod client;
mod response;
pub mod types;
pub mod account;
pub mod block;
pub mod key;
pub mod wallet;
pub mod wallet_account;
pub mod node;
pub mod work_peer;
pub mod nano;

pub use account::{Account, AccountQueries};
pub use block::Block;
pub use client::{RpcClient, RpcConfig, DEFAULT_URL};
pub use coerce::coerce;
pub use error::{Identifier, RpcError, TransportFailure};
pub use key::{PrivateKey, PublicKey};
pub use nano::Nano;
pub use node::Node;
pub use params::{ParamValue, Params};
pub use transport::{HttpRequest, HttpResponse, HttpTransport, ReqwestTransport};
pub use types::{Balance, BlockCount};
pub use wallet::Wallet;
pub use wallet_account::WalletAccount;
pub use work_peer::WorkPeer;

pub use nano_types::{Amount, Unit, UnitError};

/// Default node ports.
pub mod ports {
    pub use nano_types::constants::{
        PEERING_PORT as PEERING, RPC_PORT as RPC, WEBSOCKET_PORT as WEBSOCKET,
    };
}
