//! Roles recognized by the bridge's access-control layer.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::errors::ParseError;

/// A role that an account may hold.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// May administer every other role, bind resources and pause the bridge.
    Administrator,

    /// May toggle the whitelist and edit its members.
    Whitelister,

    /// Observes deposits and submits proposals on the counterpart chain.
    ///
    /// The core only keeps track of membership; voting happens elsewhere.
    Relayer,
}

impl Role {
    /// All the known roles.
    pub const ALL: [Role; 3] = [Role::Administrator, Role::Whitelister, Role::Relayer];

    /// The canonical lower-case name of the role.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Role::Administrator => "administrator",
            Role::Whitelister => "whitelister",
            Role::Relayer => "relayer",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Role::ALL
            .into_iter()
            .find(|role| role.as_str() == s)
            .ok_or_else(|| ParseError::UnknownRole(s.to_string()))
    }
}
