//! A toggleable allow-list of accounts.
//!
//! The whitelist is a circuit breaker layered on top of the roles: the roles decide who may
//! *administer* the whitelist, the whitelist decides who may *use* a gated operation. While the
//! whitelist is disabled every account passes the gate.
//!
//! Redundant transitions (enabling an enabled whitelist, adding a member twice, ...) are errors
//! rather than silent successes.

use std::collections::BTreeSet;

use chainbridge_primitives::prelude::{Address, Role};
use tracing::{debug, info};

use crate::{
    access_control::AccessControl,
    errors::{BridgeError, BridgeResult},
    events::BridgeEvent,
};

/// The roles allowed to toggle and edit the whitelist.
pub const WHITELIST_OPERATORS: [Role; 2] = [Role::Administrator, Role::Whitelister];

/// The whitelist state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Whitelist {
    enabled: bool,
    members: BTreeSet<Address>,
}

impl Whitelist {
    /// Creates a whitelist with the given initial state and members.
    pub fn new(enabled: bool, members: impl IntoIterator<Item = Address>) -> Self {
        Self {
            enabled,
            members: members.into_iter().collect(),
        }
    }

    /// Whether the whitelist is enabled.
    pub const fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Whether `account` is on the whitelist, regardless of whether the whitelist is enabled.
    pub fn is_whitelisted(&self, account: &Address) -> bool {
        self.members.contains(account)
    }

    /// The gate predicate for a protected operation.
    ///
    /// Passes unconditionally while the whitelist is disabled, otherwise only for members.
    pub fn check_access(&self, account: &Address) -> BridgeResult<()> {
        if !self.enabled || self.members.contains(account) {
            return Ok(());
        }

        debug!(%account, "caller is not on the whitelist");
        Err(BridgeError::NotWhitelisted(*account))
    }

    /// Enables the whitelist.
    pub fn enable(&mut self, roles: &AccessControl, caller: &Address) -> BridgeResult<BridgeEvent> {
        roles.check_any_role(caller, &WHITELIST_OPERATORS)?;

        if self.enabled {
            return Err(BridgeError::AlreadyEnabled);
        }
        self.enabled = true;

        info!(sender = %caller, "whitelist enabled");
        Ok(BridgeEvent::WhitelistEnabled)
    }

    /// Disables the whitelist.
    pub fn disable(
        &mut self,
        roles: &AccessControl,
        caller: &Address,
    ) -> BridgeResult<BridgeEvent> {
        roles.check_any_role(caller, &WHITELIST_OPERATORS)?;

        if !self.enabled {
            return Err(BridgeError::AlreadyDisabled);
        }
        self.enabled = false;

        info!(sender = %caller, "whitelist disabled");
        Ok(BridgeEvent::WhitelistDisabled)
    }

    /// Adds `account` to the whitelist.
    pub fn add(
        &mut self,
        roles: &AccessControl,
        caller: &Address,
        account: Address,
    ) -> BridgeResult<BridgeEvent> {
        roles.check_any_role(caller, &WHITELIST_OPERATORS)?;

        if !self.members.insert(account) {
            return Err(BridgeError::AlreadyWhitelisted(account));
        }

        info!(%account, sender = %caller, "account added to whitelist");
        Ok(BridgeEvent::WhitelistAccountAdded { account })
    }

    /// Removes `account` from the whitelist.
    pub fn remove(
        &mut self,
        roles: &AccessControl,
        caller: &Address,
        account: Address,
    ) -> BridgeResult<BridgeEvent> {
        roles.check_any_role(caller, &WHITELIST_OPERATORS)?;

        if !self.members.remove(&account) {
            return Err(BridgeError::NotWhitelisted(account));
        }

        info!(%account, sender = %caller, "account removed from whitelist");
        Ok(BridgeEvent::WhitelistAccountRemoved { account })
    }
}
