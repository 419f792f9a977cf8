//! RPC error types.

use nano_types::UnitError;
use std::fmt;
use thiserror::Error;

/// Boxed error returned by an [`HttpTransport`](crate::transport::HttpTransport).
pub type TransportFailure = Box<dyn std::error::Error + Send + Sync>;

/// The kind of identifier a facade operation needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Identifier {
    Account,
    Block,
    Key,
    Wallet,
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Account => write!(f, "account"),
            Self::Block => write!(f, "block"),
            Self::Key => write!(f, "key"),
            Self::Wallet => write!(f, "wallet"),
        }
    }
}

#[derive(Debug, Error)]
pub enum RpcError {
    #[error("invalid RPC endpoint {uri:?}: {reason}")]
    Configuration { uri: String, reason: String },

    #[error("{0} id is required for this operation")]
    IdentifierRequired(Identifier),

    #[error("invalid arguments: {0}")]
    Usage(String),

    #[error("HTTP error calling {action} at {url}: {source}")]
    Http {
        action: String,
        url: String,
        #[source]
        source: TransportFailure,
    },

    #[error("HTTP {status} calling {action} at {url}: {body}")]
    HttpStatus {
        action: String,
        url: String,
        status: u16,
        body: String,
    },

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("RPC error from {action}: {message}")]
    Rpc { action: String, message: String },

    #[error("missing or malformed {field:?} in {action} response")]
    MissingField { action: String, field: String },

    #[error(transparent)]
    Unit(#[from] UnitError),
}

impl RpcError {
    pub(crate) fn usage(message: impl Into<String>) -> Self {
        Self::Usage(message.into())
    }

    /// Whether retrying the same request could succeed.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Http { .. } => true,
            Self::HttpStatus { status, .. } => *status >= 500,
            _ => false,
        }
    }

    /// HTTP status of a non-2xx response, if that is what failed.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::HttpStatus { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Failures raised by the transport layer rather than by local checks or
    /// the node's own error payloads.
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Http { .. } | Self::HttpStatus { .. })
    }
}
