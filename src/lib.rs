//! campus-api
//!
//! A small HTTP service exposing CRUD endpoints over three MongoDB-backed
//! document collections: students, users, and gallery. Every endpoint maps
//! one-to-one onto a single store operation and returns the store's raw
//! acknowledgment or the matched document(s).
//!
//! # Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │                   API Layer                  │
//! │        HTTP handlers and routing             │
//! ├─────────────────────────────────────────────┤
//! │               Application Layer              │
//! │   Shared state, thin service orchestration   │
//! ├─────────────────────────────────────────────┤
//! │                 Domain Layer                 │
//! │   Traits, types, errors (no driver types)    │
//! ├─────────────────────────────────────────────┤
//! │             Infrastructure Layer             │
//! │     MongoDB adapter, observability setup     │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! # Key Features
//!
//! - **Trait-based abstraction**: the document store sits behind a trait
//! - **Dependency injection**: handlers receive the store through `AppState`
//! - **Testability**: an in-memory mock store enables fast, isolated tests
//! - **Error handling**: typed errors mapped to HTTP statuses in one place
//! - **Logging**: structured logging with `tracing`
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use campus_api::api::create_router;
//! use campus_api::app::AppState;
//! use campus_api::infra::MongoStore;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let store = Arc::new(MongoStore::connect(&mongodb_uri, "campus").await?);
//!     let state = Arc::new(AppState::new(store));
//!     let router = create_router(state);
//!     axum::serve(listener, router).await?;
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod app;
pub mod domain;
pub mod infra;

// Mock store implementation, shared by unit and integration tests
pub mod test_utils;
