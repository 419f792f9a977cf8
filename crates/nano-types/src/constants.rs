//! Nano network constants shared by the client crates.

// =============================================================================
// Ports
// =============================================================================

/// Node RPC port.
pub const RPC_PORT: u16 = 7076;
/// Node-to-node peering port.
pub const PEERING_PORT: u16 = 7075;
/// Node websocket port.
pub const WEBSOCKET_PORT: u16 = 7078;

/// RPC endpoint of a node on the local machine.
pub const DEFAULT_RPC_URL: &str = "http://localhost:7076";

// =============================================================================
// Field widths
// =============================================================================

/// Hex digits in a block hash, key, seed or wallet id (32 bytes).
pub const HASH_HEX_LEN: usize = 64;

/// Hex digits in a proof-of-work value (8 bytes).
pub const WORK_HEX_LEN: usize = 16;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_url_uses_rpc_port() {
        assert!(DEFAULT_RPC_URL.ends_with(&format!(":{}", RPC_PORT)));
    }
}
