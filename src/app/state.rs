//! Application state management.
//!
//! This module provides the shared application state that is
//! accessible to all request handlers via Axum's State extractor.

use std::sync::Arc;

use metrics_exporter_prometheus::PrometheusHandle;

use crate::domain::DocumentStore;

use super::service::AppService;

/// Shared application state for the Axum web server.
///
/// Holds a thread-safe reference to the application service, which wraps
/// the store behind its trait abstraction; handlers never touch the
/// concrete store implementation.
///
/// # Thread Safety
///
/// All contained types are wrapped in `Arc` and implement `Send + Sync`,
/// making `AppState` safe to share across async tasks.
#[derive(Clone)]
pub struct AppState {
    /// The application service wrapping store operations.
    pub service: Arc<AppService>,

    /// Prometheus handle rendered by GET /metrics, when installed.
    pub metrics: Option<Arc<PrometheusHandle>>,
}

impl AppState {
    /// Creates a new `AppState`, wiring the service to the provided store.
    #[must_use]
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        let service = Arc::new(AppService::new(store));

        Self {
            service,
            metrics: None,
        }
    }

    /// Attaches a Prometheus handle for the /metrics endpoint.
    #[must_use]
    pub fn with_metrics(mut self, handle: Arc<PrometheusHandle>) -> Self {
        self.metrics = Some(handle);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::MockDocumentStore;

    #[test]
    fn test_app_state_creation() {
        let store = Arc::new(MockDocumentStore::new());
        let state = AppState::new(store);

        assert!(Arc::strong_count(&state.service) >= 1);
        assert!(state.metrics.is_none());
    }

    #[test]
    fn test_app_state_is_clone() {
        let store = Arc::new(MockDocumentStore::new());
        let state = AppState::new(store);
        let cloned = state.clone();

        // Both should point to the same service
        assert!(Arc::ptr_eq(&state.service, &cloned.service));
    }
}
