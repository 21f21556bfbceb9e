//! Initial whitelist state and the set of operations it gates.

use std::{collections::BTreeSet, fmt};

use chainbridge_primitives::prelude::Address;
use serde::{Deserialize, Serialize};

use crate::default::DEPOSIT_OPERATION;

/// An operation that may be gated by the whitelist.
///
/// Which operations are gated is configuration, not code: the core consults the configured set
/// before running the whitelist predicate for an operation.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum GatedOperation {
    /// The deposit entry point of the bridge core.
    Deposit,

    /// Any other operation, named by whoever guards it (e.g., a handler-specific method).
    Named(String),
}

impl From<String> for GatedOperation {
    fn from(value: String) -> Self {
        match value.as_str() {
            DEPOSIT_OPERATION => GatedOperation::Deposit,
            _ => GatedOperation::Named(value),
        }
    }
}

impl From<GatedOperation> for String {
    fn from(value: GatedOperation) -> Self {
        value.to_string()
    }
}

impl fmt::Display for GatedOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GatedOperation::Deposit => f.write_str(DEPOSIT_OPERATION),
            GatedOperation::Named(name) => f.write_str(name),
        }
    }
}

/// The shape of the whitelist when the bridge is initialized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WhitelistParams {
    /// Whether the whitelist starts enabled.
    #[serde(default)]
    pub enabled: bool,

    /// Accounts that are on the whitelist from the start, in addition to the administrators.
    #[serde(default)]
    pub accounts: Vec<Address>,

    /// The operations that consult the whitelist.
    #[serde(default = "default_gated_operations")]
    pub gated_operations: BTreeSet<GatedOperation>,
}

fn default_gated_operations() -> BTreeSet<GatedOperation> {
    BTreeSet::from([GatedOperation::Deposit])
}

impl Default for WhitelistParams {
    fn default() -> Self {
        Self {
            enabled: false,
            accounts: Vec::new(),
            gated_operations: default_gated_operations(),
        }
    }
}

impl WhitelistParams {
    /// Whether `operation` consults the whitelist.
    pub fn is_gated(&self, operation: &GatedOperation) -> bool {
        self.gated_operations.contains(operation)
    }
}
