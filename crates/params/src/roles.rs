//! Initial holders of each role.

use chainbridge_primitives::prelude::{Address, Role};
use serde::{Deserialize, Serialize};

/// The accounts that hold each role when the bridge is initialized.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleParams {
    /// Initial administrators. There must be at least one.
    pub admins: Vec<Address>,

    /// Initial whitelisters.
    #[serde(default)]
    pub whitelisters: Vec<Address>,

    /// Initial relayers.
    #[serde(default)]
    pub relayers: Vec<Address>,
}

impl RoleParams {
    /// Creates role parameters with a single administrator and no other role holders.
    pub fn with_admin(admin: Address) -> Self {
        Self {
            admins: vec![admin],
            ..Default::default()
        }
    }

    /// Iterates over every `(role, account)` pair in these parameters.
    pub fn assignments(&self) -> impl Iterator<Item = (Role, Address)> + '_ {
        let admins = self.admins.iter().map(|a| (Role::Administrator, *a));
        let whitelisters = self.whitelisters.iter().map(|a| (Role::Whitelister, *a));
        let relayers = self.relayers.iter().map(|a| (Role::Relayer, *a));

        admins.chain(whitelisters).chain(relayers)
    }
}
