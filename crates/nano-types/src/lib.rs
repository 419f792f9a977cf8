//! Core types for the Nano node RPC client.
//!
//! The amount model (the [`Unit`] an amount is written in and the exact
//! conversion between Nano and raw) plus network constants.

pub mod constants;
pub mod units;

pub use constants::{DEFAULT_RPC_URL, HASH_HEX_LEN, RPC_PORT, WORK_HEX_LEN};

pub use units::{format_nano, parse_raw, to_nano, to_raw, Amount, Unit, UnitError, NANO_DECIMALS, RAW_PER_NANO};
