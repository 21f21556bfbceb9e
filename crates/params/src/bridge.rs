//! The top-level parameters of a bridge core.

use chainbridge_primitives::prelude::ChainId;
use serde::{Deserialize, Serialize};

use crate::{
    default::{DEPOSIT_FEE, ORIGIN_CHAIN_ID, RELAYER_THRESHOLD},
    roles::RoleParams,
    whitelist::WhitelistParams,
};

/// The parameters a bridge core is initialized with.
///
/// Differences in these values among deployments of the same bridge lead to incompatible ledgers,
/// so they are expected to be fixed at deployment time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BridgeParams {
    /// The chain on which this bridge core is deployed.
    #[serde(default = "default_origin_chain_id")]
    pub origin_chain_id: ChainId,

    /// The number of relayer votes required to pass a proposal.
    ///
    /// Opaque to the core.
    #[serde(default = "default_relayer_threshold")]
    pub relayer_threshold: u64,

    /// The fee charged per deposit.
    ///
    /// Opaque to the core.
    #[serde(default = "default_fee")]
    pub fee: u64,

    /// The initial holders of each role.
    pub roles: RoleParams,

    /// The initial state of the whitelist.
    #[serde(default)]
    pub whitelist: WhitelistParams,
}

const fn default_origin_chain_id() -> ChainId {
    ORIGIN_CHAIN_ID
}

const fn default_relayer_threshold() -> u64 {
    RELAYER_THRESHOLD
}

const fn default_fee() -> u64 {
    DEPOSIT_FEE
}

impl BridgeParams {
    /// Creates parameters for `origin_chain_id` with the given roles and defaults for the rest.
    pub fn new(origin_chain_id: ChainId, roles: RoleParams) -> Self {
        Self {
            origin_chain_id,
            relayer_threshold: RELAYER_THRESHOLD,
            fee: DEPOSIT_FEE,
            roles,
            whitelist: WhitelistParams::default(),
        }
    }
}
