//! Role membership and the checks built on top of it.
//!
//! Each role has an *admin role*: only holders of the admin role may grant or revoke the role.
//! Every role is administered by [`Role::Administrator`] unless changed via
//! [`AccessControl::set_role_admin`].
//!
//! Granting a role that is already held, or revoking one that is not, is a silent no-op. Nothing
//! prevents the last administrator from revoking their own role.

use std::collections::{BTreeMap, BTreeSet};

use chainbridge_primitives::prelude::{Address, Role};
use tracing::{debug, info};

use crate::{
    errors::{BridgeError, BridgeResult},
    events::BridgeEvent,
};

/// The role assignments of the bridge.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AccessControl {
    /// role -> accounts holding it
    members: BTreeMap<Role, BTreeSet<Address>>,

    /// role -> admin role, only for roles whose admin is not the default
    admins: BTreeMap<Role, Role>,
}

impl AccessControl {
    /// Creates the role assignments from an initial set of `(role, account)` pairs.
    ///
    /// Fails with [`BridgeError::NoAdministrator`] if none of the pairs assigns
    /// [`Role::Administrator`].
    pub fn new(assignments: impl IntoIterator<Item = (Role, Address)>) -> BridgeResult<Self> {
        let mut access_control = Self::default();
        for (role, account) in assignments {
            access_control.insert(role, account);
        }

        if access_control.role_member_count(Role::Administrator) == 0 {
            return Err(BridgeError::NoAdministrator);
        }

        Ok(access_control)
    }

    /// Whether `account` holds `role`.
    pub fn has_role(&self, role: Role, account: &Address) -> bool {
        self.members
            .get(&role)
            .is_some_and(|accounts| accounts.contains(account))
    }

    /// The role whose holders may grant and revoke `role`.
    pub fn role_admin(&self, role: Role) -> Role {
        self.admins
            .get(&role)
            .copied()
            .unwrap_or(Role::Administrator)
    }

    /// The accounts holding `role`, in ascending order.
    pub fn role_members(&self, role: Role) -> Vec<Address> {
        self.members
            .get(&role)
            .map(|accounts| accounts.iter().copied().collect())
            .unwrap_or_default()
    }

    /// The number of accounts holding `role`.
    pub fn role_member_count(&self, role: Role) -> usize {
        self.members.get(&role).map_or(0, BTreeSet::len)
    }

    /// Fails with [`BridgeError::Unauthorized`] unless `account` holds `role`.
    pub fn check_role(&self, account: &Address, role: Role) -> BridgeResult<()> {
        self.check_any_role(account, &[role])
    }

    /// Fails with [`BridgeError::Unauthorized`] unless `account` holds at least one of `roles`.
    pub fn check_any_role(&self, account: &Address, roles: &[Role]) -> BridgeResult<()> {
        if roles.iter().any(|role| self.has_role(*role, account)) {
            return Ok(());
        }

        debug!(%account, ?roles, "rejecting unauthorized caller");
        Err(BridgeError::unauthorized(*account, roles))
    }

    /// Grants `role` to `account` on behalf of `caller`.
    ///
    /// Returns the event to emit, if the membership actually changed.
    pub fn grant_role(
        &mut self,
        caller: &Address,
        role: Role,
        account: Address,
    ) -> BridgeResult<Option<BridgeEvent>> {
        self.check_role(caller, self.role_admin(role))?;

        if !self.insert(role, account) {
            return Ok(None);
        }

        info!(%role, %account, sender = %caller, "role granted");
        Ok(Some(BridgeEvent::RoleGranted {
            role,
            account,
            sender: *caller,
        }))
    }

    /// Revokes `role` from `account` on behalf of `caller`.
    ///
    /// Returns the event to emit, if the membership actually changed.
    pub fn revoke_role(
        &mut self,
        caller: &Address,
        role: Role,
        account: Address,
    ) -> BridgeResult<Option<BridgeEvent>> {
        self.check_role(caller, self.role_admin(role))?;

        Ok(self.remove(role, account, caller))
    }

    /// Gives up `role` held by the caller.
    ///
    /// `account` must be the caller itself; it is taken explicitly so that a caller cannot renounce
    /// a role by accident.
    pub fn renounce_role(
        &mut self,
        caller: &Address,
        role: Role,
        account: Address,
    ) -> BridgeResult<Option<BridgeEvent>> {
        if *caller != account {
            return Err(BridgeError::CannotRenounceForOthers {
                caller: *caller,
                account,
            });
        }

        Ok(self.remove(role, account, caller))
    }

    /// Changes the admin role of `role` on behalf of `caller`.
    ///
    /// The caller must hold the current admin role of `role`.
    pub fn set_role_admin(
        &mut self,
        caller: &Address,
        role: Role,
        admin_role: Role,
    ) -> BridgeResult<BridgeEvent> {
        let previous_admin_role = self.role_admin(role);
        self.check_role(caller, previous_admin_role)?;

        if admin_role == Role::Administrator {
            self.admins.remove(&role);
        } else {
            self.admins.insert(role, admin_role);
        }

        info!(%role, %previous_admin_role, new_admin_role = %admin_role, "role admin changed");
        Ok(BridgeEvent::RoleAdminChanged {
            role,
            previous_admin_role,
            new_admin_role: admin_role,
        })
    }

    fn insert(&mut self, role: Role, account: Address) -> bool {
        self.members.entry(role).or_default().insert(account)
    }

    fn remove(&mut self, role: Role, account: Address, sender: &Address) -> Option<BridgeEvent> {
        let removed = self
            .members
            .get_mut(&role)
            .is_some_and(|accounts| accounts.remove(&account));

        if !removed {
            return None;
        }

        info!(%role, %account, %sender, "role revoked");
        Some(BridgeEvent::RoleRevoked {
            role,
            account,
            sender: *sender,
        })
    }
}
