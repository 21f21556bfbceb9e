//! The append-only record of deposits and their per-destination sequence numbers.
//!
//! Each destination chain has its own counter and its own records, guarded by a dedicated lock.
//! Deposits to the same chain are serialized on that lock; deposits to different chains never
//! contend with each other beyond a brief lookup of the chain's entry.

use std::{
    collections::{BTreeMap, HashMap},
    sync::Arc,
};

use chainbridge_primitives::prelude::{Address, ChainId, DepositNonce, ResourceId};
use parking_lot::{Mutex, RwLock};
use tracing::trace;

use crate::errors::{BridgeError, BridgeResult};

/// A recorded deposit.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DepositRecord {
    resource_id: ResourceId,
    depositor: Address,
    data: Vec<u8>,
}

impl DepositRecord {
    /// Creates a new record.
    pub const fn new(resource_id: ResourceId, depositor: Address, data: Vec<u8>) -> Self {
        Self {
            resource_id,
            depositor,
            data,
        }
    }

    /// The resource the deposit was routed by.
    pub const fn resource_id(&self) -> ResourceId {
        self.resource_id
    }

    /// The account that made the deposit.
    pub const fn depositor(&self) -> Address {
        self.depositor
    }

    /// The canonical bytes produced by the handler for this deposit.
    pub fn data(&self) -> &[u8] {
        &self.data
    }
}

/// The deposits headed to a single destination chain.
#[derive(Debug, Default)]
struct ChainLedger {
    /// The last issued nonce; zero if no deposit has been made yet.
    count: DepositNonce,

    /// nonce -> record
    records: BTreeMap<DepositNonce, DepositRecord>,
}

/// The deposits of every destination chain.
#[derive(Debug, Default)]
pub struct DepositLedger {
    chains: RwLock<HashMap<ChainId, Arc<Mutex<ChainLedger>>>>,
}

impl DepositLedger {
    /// Records a deposit to `destination_chain_id` under the next nonce.
    ///
    /// `make_record` is called with the nonce the deposit would receive while the chain's lock is
    /// held. The nonce is consumed only if it returns a record; on error, neither the counter nor
    /// the records change.
    pub fn record<F>(
        &self,
        destination_chain_id: ChainId,
        make_record: F,
    ) -> BridgeResult<DepositNonce>
    where
        F: FnOnce(DepositNonce) -> BridgeResult<DepositRecord>,
    {
        let chain = self.chain(destination_chain_id);

        trace!(action = "trying to acquire lock on chain ledger", %destination_chain_id);
        let mut chain = chain.lock();
        trace!(event = "lock acquired on chain ledger", %destination_chain_id);

        let nonce = chain
            .count
            .checked_add(1)
            .ok_or(BridgeError::NonceOverflow(destination_chain_id))?;

        let record = make_record(nonce)?;

        chain.count = nonce;
        chain.records.insert(nonce, record);

        Ok(nonce)
    }

    /// The last nonce issued for `destination_chain_id`, or zero if there has been no deposit.
    pub fn deposit_count(&self, destination_chain_id: ChainId) -> DepositNonce {
        self.chains
            .read()
            .get(&destination_chain_id)
            .map_or(0, |chain| chain.lock().count)
    }

    /// The record of the deposit with `nonce` to `destination_chain_id`, if any.
    pub fn deposit_record(
        &self,
        nonce: DepositNonce,
        destination_chain_id: ChainId,
    ) -> Option<DepositRecord> {
        self.chains
            .read()
            .get(&destination_chain_id)
            .and_then(|chain| chain.lock().records.get(&nonce).cloned())
    }

    /// Gets the entry for the chain, creating it if needed.
    fn chain(&self, destination_chain_id: ChainId) -> Arc<Mutex<ChainLedger>> {
        if let Some(chain) = self.chains.read().get(&destination_chain_id) {
            return chain.clone();
        }

        self.chains
            .write()
            .entry(destination_chain_id)
            .or_default()
            .clone()
    }

    #[cfg(test)]
    pub(crate) fn set_count(&self, destination_chain_id: ChainId, count: DepositNonce) {
        self.chain(destination_chain_id).lock().count = count;
    }
}
