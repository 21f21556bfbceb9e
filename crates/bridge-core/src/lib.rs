//! This crate implements the control core of the bridge.
//!
//! The core records deposits on the origin chain, assigns each one a sequence number that is
//! strictly increasing per destination chain, routes the deposit payload to the handler bound to
//! its resource and guards all of this behind two independent checks:
//!
//! - [`access_control`]: who may *administer* the bridge (roles).
//! - [`whitelist`]: who may *use* a gated operation (a toggleable allow-list).
//!
//! [`bridge::BridgeCore`] composes these with the [`registry`] and the [`ledger`] and is the only
//! entry point through which the shared state may be mutated.

pub mod access_control;
pub mod bridge;
pub mod config;
pub mod errors;
pub mod events;
pub mod handler;
pub mod ledger;
pub mod registry;
pub mod whitelist;

#[cfg(test)]
pub(crate) mod testing;

pub mod prelude {
    //! Re-exports of the types most callers need.

    pub use crate::{
        bridge::BridgeCore,
        config::BridgeCfg,
        errors::{BridgeError, BridgeResult},
        events::BridgeEvent,
        handler::{DepositCall, DepositHandler, ExecuteCall, HandlerError},
        ledger::DepositRecord,
        registry::HandlerBinding,
    };
}
