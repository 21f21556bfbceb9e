//! Scalar aliases used throughout the bridge.

/// Identifier of a chain participating in the bridge.
///
/// The core does not validate this against a list of known chains.
pub type ChainId = u8;

/// Per-destination-chain sequence number of a deposit.
///
/// Nonces start at 1; a counter value of 0 means that no deposit has been made yet.
pub type DepositNonce = u64;
