//! Testing utilities shared by the unit tests of this crate.
//!
//! - [`fixtures`] - Accounts, resources, handlers and a ready-to-use [`BridgeCore`].
//!
//! [`BridgeCore`]: crate::bridge::BridgeCore

pub(crate) mod fixtures;
