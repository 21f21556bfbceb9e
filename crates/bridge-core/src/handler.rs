//! The interface the bridge core consumes from resource handlers.
//!
//! A handler translates the raw payload of a deposit into the canonical record that the core
//! persists, and later executes such a record against its target once the relayer layer has agreed
//! on it. The core never looks inside either.

use std::fmt::Debug;

use chainbridge_primitives::prelude::{Address, ChainId, DepositNonce, FunctionSelector};
use thiserror::Error;

/// Errors returned by a [`DepositHandler`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HandlerError {
    /// The payload is not well-formed for this handler.
    #[error("malformed payload: {0}")]
    MalformedPayload(String),

    /// The payload is well-formed but the handler refuses it.
    #[error("rejected: {0}")]
    Rejected(String),

    /// Executing a record on the target failed.
    #[error("execution failed: {0}")]
    ExecutionFailed(String),
}

/// The context in which a deposit payload is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DepositCall<'a> {
    /// The deposit selector of the binding.
    pub selector: FunctionSelector,
    /// The target contract of the binding.
    pub target: Address,
    /// The account making the deposit.
    pub depositor: Address,
    /// The chain the deposit is headed to.
    pub destination_chain_id: ChainId,
    /// The nonce the deposit will be recorded under if the handler accepts it.
    pub deposit_nonce: DepositNonce,
    /// The raw payload supplied by the depositor.
    pub payload: &'a [u8],
}

/// The context in which a recorded deposit is executed on the counterpart chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExecuteCall<'a> {
    /// The execute selector of the binding.
    pub selector: FunctionSelector,
    /// The target contract of the binding.
    pub target: Address,
    /// The canonical record produced by [`DepositHandler::interpret_deposit`].
    pub record: &'a [u8],
}

/// A handler for a class of resources.
///
/// The core calls [`DepositHandler::interpret_deposit`] while holding the locks of the pause flag,
/// the whitelist, the registry and the destination chain's ledger. Implementations must not call
/// back into the [`BridgeCore`](crate::bridge::BridgeCore) from it.
pub trait DepositHandler: Debug + Send + Sync {
    /// Validates the payload of a deposit and produces the canonical bytes to be recorded.
    fn interpret_deposit(&self, call: &DepositCall<'_>) -> Result<Vec<u8>, HandlerError>;

    /// Executes a canonical record on the handler's target.
    ///
    /// This is invoked by the execution path of the relayer layer, not by the deposit path.
    fn execute_proposal(&self, call: &ExecuteCall<'_>) -> Result<(), HandlerError>;
}
