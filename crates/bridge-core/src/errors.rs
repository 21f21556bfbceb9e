//! Errors returned by the operations of the bridge core.

use chainbridge_primitives::prelude::{Address, ChainId, ResourceId, Role};
use thiserror::Error;

use crate::handler::HandlerError;

/// Errors that can occur while operating the bridge core.
///
/// Every error aborts the operation that produced it without any change to the state of the core.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BridgeError {
    /// The caller holds none of the roles required for the operation.
    #[error("account {account} doesn't have any of the roles {roles:?}")]
    Unauthorized {
        /// The account that attempted the operation.
        account: Address,
        /// The roles that would have authorized the operation.
        roles: Vec<Role>,
    },

    /// The account is not on the whitelist.
    ///
    /// Returned both by the whitelist gate when it is enabled and by an attempt to remove an
    /// account that is not a member.
    #[error("account {0} is not on the whitelist")]
    NotWhitelisted(Address),

    /// The account is already on the whitelist.
    #[error("account {0} is already on the whitelist")]
    AlreadyWhitelisted(Address),

    /// The whitelist is already enabled.
    #[error("whitelist is already enabled")]
    AlreadyEnabled,

    /// The whitelist is already disabled.
    #[error("whitelist is already disabled")]
    AlreadyDisabled,

    /// No handler is bound to the resource.
    #[error("no handler is bound to resource {0}")]
    UnknownResource(ResourceId),

    /// The handler bound to the resource rejected the payload.
    #[error("handler for resource {resource_id} rejected the deposit: {source}")]
    HandlerRejected {
        /// The resource whose handler rejected the payload.
        resource_id: ResourceId,
        /// The reason given by the handler.
        source: HandlerError,
    },

    /// The core cannot be initialized without an administrator.
    #[error("at least one administrator is required")]
    NoAdministrator,

    /// Roles can only be renounced by the account holding them.
    #[error("account {caller} cannot renounce roles on behalf of {account}")]
    CannotRenounceForOthers {
        /// The account that attempted to renounce.
        caller: Address,
        /// The account whose role was to be renounced.
        account: Address,
    },

    /// The bridge is paused.
    #[error("bridge is paused")]
    Paused,

    /// The bridge is not paused.
    #[error("bridge is not paused")]
    NotPaused,

    /// The deposit counter for the chain has been exhausted.
    #[error("deposit nonce for destination chain {0} has been exhausted")]
    NonceOverflow(ChainId),
}

impl BridgeError {
    pub(crate) fn unauthorized(account: Address, roles: &[Role]) -> Self {
        BridgeError::Unauthorized {
            account,
            roles: roles.to_vec(),
        }
    }
}

/// The result type for operations on the bridge core.
pub type BridgeResult<T> = Result<T, BridgeError>;
