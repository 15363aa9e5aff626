//! Application layer containing shared state and service orchestration.

pub mod service;
pub mod state;

pub use service::AppService;
pub use state::AppState;
