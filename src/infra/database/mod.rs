//! Concrete document store implementations.
//!
//! This module contains the production MongoDB adapter that implements
//! the `DocumentStore` trait defined in the domain layer.

pub mod mongo;

pub use mongo::MongoStore;
