//! Shared test utilities for certificator crates.
//!
//! This crate provides:
//! - Proptest generators for domains and KV paths
//! - An in-memory Vault transport
//! - Environment and domains-file fixtures

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod fixtures;
pub mod generators;
pub mod mocks;

pub use generators::*;
pub use mocks::{MockTransport, RecordedWrite};
