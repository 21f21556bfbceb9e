//! The façade composing the access control, the whitelist, the handler registry and the ledger.
//!
//! [`BridgeCore`] owns all of the bridge's mutable state and is the only way to mutate it. Each
//! operation checks its authorization first, then validates, then commits, and emits its event
//! only after the commit. A failed operation leaves the state untouched.
//!
//! Locks are always taken in the order roles, whitelist, registry, pause flag, ledger.

use std::collections::BTreeSet;

use chainbridge_params::prelude::{BridgeParams, GatedOperation};
use chainbridge_primitives::prelude::{Address, ChainId, DepositNonce, ResourceId, Role};
use parking_lot::RwLock;
use tokio::sync::broadcast;
use tracing::{debug, info};

use crate::{
    access_control::AccessControl,
    config::BridgeCfg,
    errors::{BridgeError, BridgeResult},
    events::{BridgeEvent, EventBus},
    handler::DepositCall,
    ledger::{DepositLedger, DepositRecord},
    registry::{HandlerBinding, HandlerRegistry},
    whitelist::Whitelist,
};

#[cfg(test)]
mod tests;

/// The control core of the bridge.
#[derive(Debug)]
pub struct BridgeCore {
    origin_chain_id: ChainId,
    relayer_threshold: u64,
    fee: u64,
    gated_operations: BTreeSet<GatedOperation>,

    roles: RwLock<AccessControl>,
    whitelist: RwLock<Whitelist>,
    registry: RwLock<HandlerRegistry>,
    paused: RwLock<bool>,
    ledger: DepositLedger,

    events: EventBus,
}

impl BridgeCore {
    /// Initializes the core from its parameters.
    ///
    /// Every initial administrator is also put on the whitelist so that enabling the whitelist does
    /// not lock the administrators out of gated operations.
    pub fn new(params: BridgeParams, cfg: BridgeCfg) -> BridgeResult<Self> {
        let roles = AccessControl::new(params.roles.assignments())?;

        let members = params
            .roles
            .admins
            .iter()
            .chain(params.whitelist.accounts.iter())
            .copied();
        let whitelist = Whitelist::new(params.whitelist.enabled, members);

        info!(
            origin_chain_id = params.origin_chain_id,
            admins = params.roles.admins.len(),
            whitelist_enabled = whitelist.is_enabled(),
            gated_operations = ?params.whitelist.gated_operations,
            "bridge core initialized"
        );

        Ok(Self {
            origin_chain_id: params.origin_chain_id,
            relayer_threshold: params.relayer_threshold,
            fee: params.fee,
            gated_operations: params.whitelist.gated_operations,
            roles: RwLock::new(roles),
            whitelist: RwLock::new(whitelist),
            registry: RwLock::new(HandlerRegistry::default()),
            paused: RwLock::new(false),
            ledger: DepositLedger::default(),
            events: EventBus::new(cfg.event_channel_capacity()),
        })
    }

    /// Subscribes to the events emitted from now on.
    pub fn subscribe(&self) -> broadcast::Receiver<BridgeEvent> {
        self.events.subscribe()
    }

    // ===== Deposits =====

    /// Records a deposit of `payload` to `destination_chain_id`, routed by `resource_id`.
    ///
    /// Returns the nonce assigned to the deposit. The pause flag, the resource binding and the
    /// whitelist are read under their locks, which stay held until the deposit is committed and its
    /// event emitted. A pause, a whitelist change or a rebinding either happens entirely before the
    /// deposit or entirely after it, and a rejected caller never consumes a nonce.
    ///
    /// The handler interprets the payload while the destination chain's ledger is locked; if it
    /// rejects the payload, the nonce is not consumed either.
    ///
    /// [`BridgeEvent::Deposit`] is emitted after the chain's lock is released, so the events of two
    /// deposits to the same chain may be delivered out of nonce order.
    pub fn deposit(
        &self,
        caller: &Address,
        destination_chain_id: ChainId,
        resource_id: ResourceId,
        payload: &[u8],
    ) -> BridgeResult<DepositNonce> {
        let whitelist = self.whitelist.read();
        let registry = self.registry.read();
        let paused = self.paused.read();

        if *paused {
            debug!(%caller, %resource_id, "rejecting deposit while paused");
            return Err(BridgeError::Paused);
        }

        let binding = registry.resolve(&resource_id)?;
        self.gate(&whitelist, &GatedOperation::Deposit, caller)?;

        let deposit_nonce = self.ledger.record(destination_chain_id, |deposit_nonce| {
            let call = DepositCall {
                selector: binding.deposit_selector(),
                target: binding.target(),
                depositor: *caller,
                destination_chain_id,
                deposit_nonce,
                payload,
            };

            let data = binding.handler().interpret_deposit(&call).map_err(|source| {
                debug!(%resource_id, %source, "handler rejected deposit");
                BridgeError::HandlerRejected {
                    resource_id,
                    source,
                }
            })?;

            Ok(DepositRecord::new(resource_id, *caller, data))
        })?;

        info!(%caller, destination_chain_id, %resource_id, deposit_nonce, "deposit recorded");
        self.events.emit(BridgeEvent::Deposit {
            destination_chain_id,
            resource_id,
            deposit_nonce,
        });

        drop(paused);
        drop(registry);
        drop(whitelist);

        Ok(deposit_nonce)
    }

    /// The last nonce issued for `destination_chain_id`, or zero if there has been no deposit.
    pub fn deposit_count(&self, destination_chain_id: ChainId) -> DepositNonce {
        self.ledger.deposit_count(destination_chain_id)
    }

    /// The record of the deposit with `nonce` to `destination_chain_id`, if any.
    pub fn deposit_record(
        &self,
        nonce: DepositNonce,
        destination_chain_id: ChainId,
    ) -> Option<DepositRecord> {
        self.ledger.deposit_record(nonce, destination_chain_id)
    }

    // ===== Resources =====

    /// Binds `resource_id` to `binding` on behalf of `caller`, overwriting any existing binding.
    ///
    /// Deposits recorded under the previous binding are unaffected.
    pub fn bind_resource(
        &self,
        caller: &Address,
        resource_id: ResourceId,
        binding: HandlerBinding,
    ) -> BridgeResult<()> {
        let roles = self.roles.read();
        let (_, event) = self
            .registry
            .write()
            .bind(&roles, caller, resource_id, binding)?;
        drop(roles);

        self.events.emit(event);
        Ok(())
    }

    /// Resolves the binding for `resource_id`, e.g., to execute a proposal.
    pub fn resolve_handler(&self, resource_id: &ResourceId) -> BridgeResult<HandlerBinding> {
        self.registry.read().resolve(resource_id).cloned()
    }

    /// All the bound resources, in ascending order.
    pub fn resource_ids(&self) -> Vec<ResourceId> {
        self.registry.read().resource_ids()
    }

    // ===== Whitelist =====

    /// The gate predicate for `operation`.
    ///
    /// Operations that are not configured as gated always pass. Gated operations pass while the
    /// whitelist is disabled and, while it is enabled, only for whitelisted callers.
    pub fn check_whitelist_access(
        &self,
        operation: &GatedOperation,
        caller: &Address,
    ) -> BridgeResult<()> {
        self.gate(&self.whitelist.read(), operation, caller)
    }

    /// Enables the whitelist on behalf of `caller`.
    pub fn enable_whitelist(&self, caller: &Address) -> BridgeResult<()> {
        self.update_whitelist(|roles, whitelist| whitelist.enable(roles, caller))
    }

    /// Disables the whitelist on behalf of `caller`.
    pub fn disable_whitelist(&self, caller: &Address) -> BridgeResult<()> {
        self.update_whitelist(|roles, whitelist| whitelist.disable(roles, caller))
    }

    /// Adds `account` to the whitelist on behalf of `caller`.
    pub fn add_to_whitelist(&self, caller: &Address, account: Address) -> BridgeResult<()> {
        self.update_whitelist(|roles, whitelist| whitelist.add(roles, caller, account))
    }

    /// Removes `account` from the whitelist on behalf of `caller`.
    pub fn remove_from_whitelist(&self, caller: &Address, account: Address) -> BridgeResult<()> {
        self.update_whitelist(|roles, whitelist| whitelist.remove(roles, caller, account))
    }

    /// Whether the whitelist is enabled.
    pub fn is_whitelist_enabled(&self) -> bool {
        self.whitelist.read().is_enabled()
    }

    /// Whether `account` is on the whitelist.
    pub fn is_whitelisted(&self, account: &Address) -> bool {
        self.whitelist.read().is_whitelisted(account)
    }

    fn gate(
        &self,
        whitelist: &Whitelist,
        operation: &GatedOperation,
        caller: &Address,
    ) -> BridgeResult<()> {
        if !self.gated_operations.contains(operation) {
            return Ok(());
        }

        whitelist.check_access(caller)
    }

    fn update_whitelist<F>(&self, update: F) -> BridgeResult<()>
    where
        F: FnOnce(&AccessControl, &mut Whitelist) -> BridgeResult<BridgeEvent>,
    {
        let roles = self.roles.read();
        let event = update(&roles, &mut self.whitelist.write())?;
        drop(roles);

        self.events.emit(event);
        Ok(())
    }

    // ===== Roles =====

    /// Whether `account` holds `role`.
    pub fn has_role(&self, role: Role, account: &Address) -> bool {
        self.roles.read().has_role(role, account)
    }

    /// The role whose holders may grant and revoke `role`.
    pub fn role_admin(&self, role: Role) -> Role {
        self.roles.read().role_admin(role)
    }

    /// The accounts holding `role`, in ascending order.
    pub fn role_members(&self, role: Role) -> Vec<Address> {
        self.roles.read().role_members(role)
    }

    /// Grants `role` to `account` on behalf of `caller`. Granting a held role is a no-op.
    pub fn grant_role(&self, caller: &Address, role: Role, account: Address) -> BridgeResult<()> {
        let event = self.roles.write().grant_role(caller, role, account)?;
        self.emit_if_changed(event);

        Ok(())
    }

    /// Revokes `role` from `account` on behalf of `caller`. Revoking an unheld role is a no-op.
    pub fn revoke_role(&self, caller: &Address, role: Role, account: Address) -> BridgeResult<()> {
        let event = self.roles.write().revoke_role(caller, role, account)?;
        self.emit_if_changed(event);

        Ok(())
    }

    /// Gives up `role` held by `caller`; `account` must be `caller`.
    pub fn renounce_role(
        &self,
        caller: &Address,
        role: Role,
        account: Address,
    ) -> BridgeResult<()> {
        let event = self.roles.write().renounce_role(caller, role, account)?;
        self.emit_if_changed(event);

        Ok(())
    }

    /// Changes the admin role of `role` on behalf of `caller`.
    pub fn set_role_admin(
        &self,
        caller: &Address,
        role: Role,
        admin_role: Role,
    ) -> BridgeResult<()> {
        let event = self.roles.write().set_role_admin(caller, role, admin_role)?;
        self.events.emit(event);

        Ok(())
    }

    /// Hands the administrator role over from `caller` to `new_admin`.
    ///
    /// Both changes are applied under the same lock so that no observer sees an intermediate
    /// state.
    pub fn renounce_admin(&self, caller: &Address, new_admin: Address) -> BridgeResult<()> {
        let mut roles = self.roles.write();
        roles.check_role(caller, Role::Administrator)?;

        let granted = roles.grant_role(caller, Role::Administrator, new_admin)?;
        let renounced = roles.renounce_role(caller, Role::Administrator, *caller)?;
        drop(roles);

        info!(previous_admin = %caller, %new_admin, "administrator handed over");
        self.emit_if_changed(granted);
        self.emit_if_changed(renounced);

        Ok(())
    }

    fn emit_if_changed(&self, event: Option<BridgeEvent>) {
        if let Some(event) = event {
            self.events.emit(event);
        }
    }

    // ===== Pause =====

    /// Pauses deposits on behalf of `caller`, who must be an administrator.
    pub fn pause(&self, caller: &Address) -> BridgeResult<()> {
        self.set_paused(caller, true)
    }

    /// Resumes deposits on behalf of `caller`, who must be an administrator.
    pub fn unpause(&self, caller: &Address) -> BridgeResult<()> {
        self.set_paused(caller, false)
    }

    /// Whether deposits are paused.
    pub fn is_paused(&self) -> bool {
        *self.paused.read()
    }

    fn set_paused(&self, caller: &Address, pause: bool) -> BridgeResult<()> {
        let roles = self.roles.read();
        roles.check_role(caller, Role::Administrator)?;

        let mut paused = self.paused.write();
        match (*paused, pause) {
            (true, true) => return Err(BridgeError::Paused),
            (false, false) => return Err(BridgeError::NotPaused),
            _ => *paused = pause,
        }
        drop(paused);
        drop(roles);

        info!(sender = %caller, paused = pause, "pause flag updated");
        let event = if pause {
            BridgeEvent::Paused { account: *caller }
        } else {
            BridgeEvent::Unpaused { account: *caller }
        };
        self.events.emit(event);

        Ok(())
    }

    // ===== Configuration =====

    /// The chain on which this core is deployed.
    pub const fn origin_chain_id(&self) -> ChainId {
        self.origin_chain_id
    }

    /// The relayer threshold this core was initialized with.
    pub const fn relayer_threshold(&self) -> u64 {
        self.relayer_threshold
    }

    /// The fee this core was initialized with.
    pub const fn fee(&self) -> u64 {
        self.fee
    }
}
