//! Identifiers used to route a deposit to its handler.

use alloy_primitives::{Address, Selector, B256};

use crate::types::ChainId;

/// Width of a [`ResourceId`] in bytes.
pub const RESOURCE_ID_LEN: usize = 32;

const ADDRESS_LEN: usize = 20;

/// Opaque key that selects the handler responsible for a deposit.
pub type ResourceId = B256;

/// Selector of a function on a handler's target contract.
///
/// The all-zero selector means that no call is to be made.
pub type FunctionSelector = Selector;

/// Derives the conventional resource id for an asset deployed on `chain_id`.
///
/// The layout is the asset address followed by the chain id byte, left-padded with zeroes to
/// [`RESOURCE_ID_LEN`] bytes. The bridge itself treats the result as opaque; this is only a
/// convenience for callers that register resources.
pub fn derive_resource_id(asset: &Address, chain_id: ChainId) -> ResourceId {
    let mut bytes = [0u8; RESOURCE_ID_LEN];
    let end = RESOURCE_ID_LEN - 1;

    bytes[end - ADDRESS_LEN..end].copy_from_slice(asset.as_slice());
    bytes[end] = chain_id;

    ResourceId::new(bytes)
}
