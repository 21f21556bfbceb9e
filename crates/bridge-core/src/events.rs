//! The notifications emitted by the bridge core for external observers such as relayers.
//!
//! Each event is emitted exactly once per successful state transition and never for a failed
//! attempt. Delivery is best-effort: events are broadcast to whoever is subscribed at the time.
//! Deposit events of the same destination chain are not guaranteed to arrive in nonce order.

use std::fmt;

use chainbridge_primitives::prelude::{Address, ChainId, DepositNonce, ResourceId, Role};
use tokio::sync::broadcast;
use tracing::trace;

/// The events emitted by the bridge core.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum BridgeEvent {
    /// A deposit has been recorded.
    Deposit {
        /// The chain the deposit is headed to.
        destination_chain_id: ChainId,
        /// The resource the deposit was routed by.
        resource_id: ResourceId,
        /// The nonce assigned to the deposit.
        deposit_nonce: DepositNonce,
    },

    /// The whitelist has been enabled.
    WhitelistEnabled,

    /// The whitelist has been disabled.
    WhitelistDisabled,

    /// An account has been added to the whitelist.
    WhitelistAccountAdded {
        /// The added account.
        account: Address,
    },

    /// An account has been removed from the whitelist.
    WhitelistAccountRemoved {
        /// The removed account.
        account: Address,
    },

    /// A role has been granted to an account that did not hold it.
    RoleGranted {
        /// The granted role.
        role: Role,
        /// The account that now holds the role.
        account: Address,
        /// The account that granted the role.
        sender: Address,
    },

    /// A role has been revoked from an account that held it.
    RoleRevoked {
        /// The revoked role.
        role: Role,
        /// The account that no longer holds the role.
        account: Address,
        /// The account that revoked the role.
        sender: Address,
    },

    /// The admin role of a role has changed.
    RoleAdminChanged {
        /// The role whose admin changed.
        role: Role,
        /// The previous admin role.
        previous_admin_role: Role,
        /// The new admin role.
        new_admin_role: Role,
    },

    /// A resource has been bound to a handler.
    ResourceBound {
        /// The bound resource.
        resource_id: ResourceId,
        /// The target contract of the binding.
        target: Address,
    },

    /// The bridge has been paused.
    Paused {
        /// The account that paused the bridge.
        account: Address,
    },

    /// The bridge has been unpaused.
    Unpaused {
        /// The account that unpaused the bridge.
        account: Address,
    },
}

impl fmt::Display for BridgeEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BridgeEvent::Deposit {
                destination_chain_id,
                resource_id,
                deposit_nonce,
            } => write!(
                f,
                "Deposit #{deposit_nonce} to chain {destination_chain_id} via {resource_id}"
            ),
            BridgeEvent::WhitelistEnabled => write!(f, "WhitelistEnabled"),
            BridgeEvent::WhitelistDisabled => write!(f, "WhitelistDisabled"),
            BridgeEvent::WhitelistAccountAdded { account } => {
                write!(f, "WhitelistAccountAdded {account}")
            }
            BridgeEvent::WhitelistAccountRemoved { account } => {
                write!(f, "WhitelistAccountRemoved {account}")
            }
            BridgeEvent::RoleGranted {
                role,
                account,
                sender,
            } => write!(f, "RoleGranted {role} to {account} by {sender}"),
            BridgeEvent::RoleRevoked {
                role,
                account,
                sender,
            } => write!(f, "RoleRevoked {role} from {account} by {sender}"),
            BridgeEvent::RoleAdminChanged {
                role,
                previous_admin_role,
                new_admin_role,
            } => write!(
                f,
                "RoleAdminChanged for {role} from {previous_admin_role} to {new_admin_role}"
            ),
            BridgeEvent::ResourceBound {
                resource_id,
                target,
            } => write!(f, "ResourceBound {resource_id} to {target}"),
            BridgeEvent::Paused { account } => write!(f, "Paused by {account}"),
            BridgeEvent::Unpaused { account } => write!(f, "Unpaused by {account}"),
        }
    }
}

/// Broadcasts [`BridgeEvent`]s to every current subscriber.
#[derive(Debug, Clone)]
pub(crate) struct EventBus {
    sender: broadcast::Sender<BridgeEvent>,
}

impl EventBus {
    pub(crate) fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));

        Self { sender }
    }

    pub(crate) fn subscribe(&self) -> broadcast::Receiver<BridgeEvent> {
        self.sender.subscribe()
    }

    /// Emits an event. Having no subscribers is not an error.
    pub(crate) fn emit(&self, event: BridgeEvent) {
        trace!(%event, "emitting event");

        if self.sender.send(event).is_err() {
            trace!("no subscribers for bridge events");
        }
    }
}
