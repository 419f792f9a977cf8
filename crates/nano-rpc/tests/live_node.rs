//! Integration tests against a running node.
//!
//! Run with: cargo test -p nano-rpc --test live_node -- --ignored
//!
//! Requires a node with RPC enabled at NANO_RPC_URL (default: http://localhost:7076).

use nano_rpc::{AccountQueries, Nano};

/// Genesis account of the live network.
const GENESIS: &str = "nano_3t6k35gi95xu6tergt6p69ck76ogmitsa8mnijtpxm9fkcm736xtoncuohr3";

fn node() -> Nano {
    let url = std::env::var("NANO_RPC_URL").unwrap_or_else(|_| "http://localhost:7076".to_string());
    Nano::new(&url).expect("invalid NANO_RPC_URL")
}

// ─── 1. Connectivity ────────────────────────────────────────────────────────

#[test]
#[ignore]
fn test_version() {
    let version = node().node().version().expect("version failed");
    assert!(version.get("node_vendor").is_some());
    println!("Node: {}", version["node_vendor"]);
}

#[test]
#[ignore]
fn test_block_count() {
    let count = node().node().block_count().expect("block_count failed");
    assert!(count.count > 0, "ledger should not be empty");
    println!("Blocks: {} (unchecked {})", count.count, count.unchecked);
}

#[test]
#[ignore]
fn test_uptime() {
    let seconds = node().node().uptime().expect("uptime failed");
    println!("Uptime: {}s", seconds);
}

// ─── 2. Accounts ────────────────────────────────────────────────────────────

#[test]
#[ignore]
fn test_genesis_account() {
    let nano = node();
    let genesis = nano.account(GENESIS);
    assert!(genesis.exists().expect("validate failed"));

    let key = genesis.public_key().expect("account_key failed");
    assert_eq!(key.id().len(), 64);

    let back = key.account().expect("account_get failed");
    assert_eq!(back.id(), Some(GENESIS));

    let balance = genesis.balance().expect("balance failed");
    println!("Genesis balance: {}", nano.display_amount(balance.balance));
}

#[test]
#[ignore]
fn test_genesis_history() {
    let history = node().account(GENESIS).history(3).expect("history failed");
    assert!(!history.is_empty());
    let hash = history[0]["hash"].as_str().expect("hash should be a string");
    let info = node().block(hash).unwrap().info(false).expect("block_info failed");
    assert!(info["contents"].is_object(), "contents should be decoded");
}

// ─── 3. Keys ────────────────────────────────────────────────────────────────

#[test]
#[ignore]
fn test_key_create() {
    let key = node().private_key(None).unwrap();
    let private = key.create(None, None).expect("key_create failed").to_string();
    assert_eq!(private.len(), 64);
    let account = key.account().expect("derived account");
    assert!(account.id().is_some_and(|a| a.starts_with("nano_")));
}
