//! This crate contains the parameters that a bridge core is initialized with.
//!
//! These are the values that must be agreed upon when the bridge is deployed: the origin chain, the
//! initial holders of each role, the initial shape of the whitelist and the opaque relayer/fee
//! parameters that are carried along for the collaborators that need them.

pub mod bridge;
mod default;
pub mod roles;
pub mod whitelist;

pub mod prelude {
    //! Re-exports of all the parameter types.

    pub use crate::{
        bridge::BridgeParams,
        roles::RoleParams,
        whitelist::{GatedOperation, WhitelistParams},
    };
}
