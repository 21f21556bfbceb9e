//! Routing of resources to the handlers that interpret them.

use std::{collections::HashMap, sync::Arc};

use chainbridge_primitives::prelude::{Address, FunctionSelector, ResourceId, Role};
use tracing::info;

use crate::{
    access_control::AccessControl,
    errors::{BridgeError, BridgeResult},
    events::BridgeEvent,
    handler::{DepositHandler, ExecuteCall, HandlerError},
};

/// Everything needed to route a deposit for a resource to its handler.
#[derive(Debug, Clone)]
pub struct HandlerBinding {
    handler: Arc<dyn DepositHandler>,
    target: Address,
    deposit_selector: FunctionSelector,
    execute_selector: FunctionSelector,
}

impl HandlerBinding {
    /// Creates a new binding.
    pub fn new(
        handler: Arc<dyn DepositHandler>,
        target: Address,
        deposit_selector: FunctionSelector,
        execute_selector: FunctionSelector,
    ) -> Self {
        Self {
            handler,
            target,
            deposit_selector,
            execute_selector,
        }
    }

    /// The handler that interprets deposits for the resource.
    pub fn handler(&self) -> &Arc<dyn DepositHandler> {
        &self.handler
    }

    /// The contract the handler acts upon.
    pub const fn target(&self) -> Address {
        self.target
    }

    /// The selector passed to the handler when interpreting a deposit.
    pub const fn deposit_selector(&self) -> FunctionSelector {
        self.deposit_selector
    }

    /// The selector passed to the handler when executing a proposal.
    pub const fn execute_selector(&self) -> FunctionSelector {
        self.execute_selector
    }

    /// Executes a recorded deposit through the bound handler.
    pub fn execute(&self, record: &[u8]) -> Result<(), HandlerError> {
        self.handler.execute_proposal(&ExecuteCall {
            selector: self.execute_selector,
            target: self.target,
            record,
        })
    }
}

/// Maps each resource to its [`HandlerBinding`].
#[derive(Debug, Clone, Default)]
pub struct HandlerRegistry {
    bindings: HashMap<ResourceId, HandlerBinding>,
}

impl HandlerRegistry {
    /// Binds `resource_id` on behalf of `caller`, who must be an administrator.
    ///
    /// An existing binding is overwritten; the previous binding is returned alongside the event.
    pub fn bind(
        &mut self,
        roles: &AccessControl,
        caller: &Address,
        resource_id: ResourceId,
        binding: HandlerBinding,
    ) -> BridgeResult<(Option<HandlerBinding>, BridgeEvent)> {
        roles.check_role(caller, Role::Administrator)?;

        let target = binding.target();
        let previous = self.bindings.insert(resource_id, binding);

        info!(%resource_id, %target, rebound = previous.is_some(), "resource bound");
        Ok((
            previous,
            BridgeEvent::ResourceBound {
                resource_id,
                target,
            },
        ))
    }

    /// Resolves the binding for `resource_id`.
    pub fn resolve(&self, resource_id: &ResourceId) -> BridgeResult<&HandlerBinding> {
        self.bindings
            .get(resource_id)
            .ok_or(BridgeError::UnknownResource(*resource_id))
    }

    /// All the bound resources, in ascending order.
    pub fn resource_ids(&self) -> Vec<ResourceId> {
        let mut ids = self.bindings.keys().copied().collect::<Vec<_>>();
        ids.sort();

        ids
    }
}
