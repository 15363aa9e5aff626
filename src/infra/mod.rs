//! Infrastructure layer implementations.

pub mod database;
pub mod observability;

pub use database::MongoStore;
pub use observability::{init_metrics_handle, init_tracing};
