//! Default values for the bridge parameters.

/// Default identifier of the chain the bridge is deployed on.
pub(crate) const ORIGIN_CHAIN_ID: u8 = 1;

/// Default number of relayer votes required to pass a proposal.
///
/// This is opaque to the core and only carried along for the relayer layer.
pub(crate) const RELAYER_THRESHOLD: u64 = 1;

/// Default fee charged per deposit.
///
/// This is opaque to the core and only carried along for the fee layer.
pub(crate) const DEPOSIT_FEE: u64 = 0;

/// Name of the operation gated by the whitelist by default.
pub(crate) const DEPOSIT_OPERATION: &str = "deposit";
