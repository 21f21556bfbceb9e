//! This crate contains the general types that need to be shared across the bridge crates.
//!
//! It lies at the bottom of the crate-hierarchy in this workspace i.e., it does not depend on any
//! other crate in this workspace. Accounts and identifiers are the EVM types from
//! [`alloy_primitives`]; none of them are interpreted beyond equality and ordering by the bridge
//! core.

pub mod errors;
pub mod resource;
pub mod roles;
pub mod types;

pub mod prelude {
    //! Re-exports of the most commonly used primitives.

    pub use alloy_primitives::Address;

    pub use crate::{
        errors::ParseError,
        resource::{derive_resource_id, FunctionSelector, ResourceId},
        roles::Role,
        types::{ChainId, DepositNonce},
    };
}
