//! This crate provides test-utilities for the bridge crates.
//!
//! These utilities are mostly used to generate random identifiers and payloads for testing
//! purposes.

pub mod primitives;

pub use primitives::{generate_address, generate_payload, generate_resource_id};
