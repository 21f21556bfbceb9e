//! Random generators for the bridge primitives.

use chainbridge_primitives::prelude::{derive_resource_id, Address, ResourceId};
use rand::{thread_rng, Rng, RngCore};

/// Generates a random [`Address`].
pub fn generate_address() -> Address {
    Address::new(thread_rng().gen())
}

/// Generates a random [`ResourceId`] for an asset on `chain_id`.
pub fn generate_resource_id(chain_id: u8) -> ResourceId {
    derive_resource_id(&generate_address(), chain_id)
}

/// Generates a random payload of `len` bytes.
pub fn generate_payload(len: usize) -> Vec<u8> {
    let mut payload = vec![0u8; len];
    thread_rng().fill_bytes(&mut payload);

    payload
}
