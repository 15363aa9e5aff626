//! Test utilities and mock implementations.
//!
//! This module provides a reusable in-memory implementation of the
//! `DocumentStore` trait for use in unit and integration tests.

pub mod mocks;

pub use mocks::{MockConfig, MockDocumentStore};
