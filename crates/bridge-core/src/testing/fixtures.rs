//! Fixtures for the bridge core tests.

use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc, Barrier,
};

use chainbridge_params::prelude::{BridgeParams, RoleParams};
use chainbridge_primitives::prelude::{
    derive_resource_id, Address, ChainId, FunctionSelector, ResourceId,
};

use crate::{
    bridge::BridgeCore,
    config::BridgeCfg,
    handler::{DepositCall, DepositHandler, ExecuteCall, HandlerError},
    registry::HandlerBinding,
};

/// The administrator the core is initialized with.
pub(crate) const ADMIN: Address = Address::with_last_byte(0x01);
/// An account with no role, used when a role is granted during the test.
pub(crate) const GENERIC_ACCOUNT: Address = Address::with_last_byte(0x03);
/// An account with no role that is never granted one.
pub(crate) const TEST_ACCOUNT: Address = Address::with_last_byte(0x04);

/// The chain the core under test is deployed on.
pub(crate) const ORIGIN_CHAIN_ID: ChainId = 1;
/// The chain deposits are headed to.
pub(crate) const DESTINATION_CHAIN_ID: ChainId = 2;

/// The asset contract the test resource is derived from.
pub(crate) const TEST_ASSET: Address = Address::with_last_byte(0xca);

/// Selector of the `store(bytes32)` function of the test asset.
pub(crate) const STORE_SELECTOR: FunctionSelector =
    FunctionSelector::new([0x65, 0x4c, 0xf8, 0x8c]);

/// The resource used by most tests.
pub(crate) fn test_resource_id() -> ResourceId {
    derive_resource_id(&TEST_ASSET, ORIGIN_CHAIN_ID)
}

/// Records payloads verbatim and executes any non-empty record.
#[derive(Debug, Default)]
pub(crate) struct PassthroughHandler {
    deposits: AtomicUsize,
}

impl PassthroughHandler {
    /// Number of payloads this handler has accepted.
    pub(crate) fn deposits(&self) -> usize {
        self.deposits.load(Ordering::SeqCst)
    }
}

impl DepositHandler for PassthroughHandler {
    fn interpret_deposit(&self, call: &DepositCall<'_>) -> Result<Vec<u8>, HandlerError> {
        self.deposits.fetch_add(1, Ordering::SeqCst);

        Ok(call.payload.to_vec())
    }

    fn execute_proposal(&self, call: &ExecuteCall<'_>) -> Result<(), HandlerError> {
        if call.record.is_empty() {
            return Err(HandlerError::ExecutionFailed("empty record".to_string()));
        }

        Ok(())
    }
}

/// Prefixes each record with the nonce it is recorded under.
#[derive(Debug, Default)]
pub(crate) struct NoncePrefixHandler;

impl DepositHandler for NoncePrefixHandler {
    fn interpret_deposit(&self, call: &DepositCall<'_>) -> Result<Vec<u8>, HandlerError> {
        let mut record = call.deposit_nonce.to_be_bytes().to_vec();
        record.extend_from_slice(call.payload);

        Ok(record)
    }

    fn execute_proposal(&self, _call: &ExecuteCall<'_>) -> Result<(), HandlerError> {
        Ok(())
    }
}

/// Rejects every payload.
#[derive(Debug, Default)]
pub(crate) struct RejectingHandler;

impl DepositHandler for RejectingHandler {
    fn interpret_deposit(&self, _call: &DepositCall<'_>) -> Result<Vec<u8>, HandlerError> {
        Err(HandlerError::MalformedPayload(
            "payload is always malformed".to_string(),
        ))
    }

    fn execute_proposal(&self, _call: &ExecuteCall<'_>) -> Result<(), HandlerError> {
        Err(HandlerError::ExecutionFailed("never executes".to_string()))
    }
}

/// Parks inside [`DepositHandler::interpret_deposit`] until the test releases it.
#[derive(Debug)]
pub(crate) struct BlockingHandler {
    entered: Barrier,
    release: Barrier,
}

impl Default for BlockingHandler {
    fn default() -> Self {
        Self {
            entered: Barrier::new(2),
            release: Barrier::new(2),
        }
    }
}

impl BlockingHandler {
    /// Blocks until a deposit is being interpreted.
    pub(crate) fn wait_entered(&self) {
        self.entered.wait();
    }

    /// Lets the deposit being interpreted complete.
    pub(crate) fn release(&self) {
        self.release.wait();
    }
}

impl DepositHandler for BlockingHandler {
    fn interpret_deposit(&self, call: &DepositCall<'_>) -> Result<Vec<u8>, HandlerError> {
        self.entered.wait();
        self.release.wait();

        Ok(call.payload.to_vec())
    }

    fn execute_proposal(&self, _call: &ExecuteCall<'_>) -> Result<(), HandlerError> {
        Ok(())
    }
}

/// Binds `handler` to the test asset with the blank deposit selector and the store selector.
pub(crate) fn binding_for(handler: Arc<dyn DepositHandler>) -> HandlerBinding {
    HandlerBinding::new(handler, TEST_ASSET, FunctionSelector::ZERO, STORE_SELECTOR)
}

pub(crate) fn passthrough_binding() -> HandlerBinding {
    binding_for(Arc::new(PassthroughHandler::default()))
}

pub(crate) fn rejecting_binding() -> HandlerBinding {
    binding_for(Arc::new(RejectingHandler))
}

/// Parameters with [`ADMIN`] as the only role holder.
pub(crate) fn test_params() -> BridgeParams {
    BridgeParams::new(ORIGIN_CHAIN_ID, RoleParams::with_admin(ADMIN))
}

/// A core initialized from `params` with nothing bound.
pub(crate) fn bridge_with(params: BridgeParams) -> BridgeCore {
    BridgeCore::new(params, BridgeCfg::default()).expect("test params must have an admin")
}

/// A core initialized from [`test_params`] with the test resource bound to a
/// [`PassthroughHandler`], which is returned alongside.
pub(crate) fn test_bridge() -> (BridgeCore, Arc<PassthroughHandler>) {
    let bridge = bridge_with(test_params());
    let handler = Arc::new(PassthroughHandler::default());

    bridge
        .bind_resource(&ADMIN, test_resource_id(), binding_for(handler.clone()))
        .expect("admin must be able to bind");

    (bridge, handler)
}
