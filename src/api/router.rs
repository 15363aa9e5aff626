//! HTTP routing configuration.

use std::sync::Arc;
use std::time::Duration;

use axum::{
    Router,
    routing::{delete, get, patch},
};
use tower::ServiceBuilder;
use tower_http::{
    timeout::TimeoutLayer,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use crate::app::AppState;

use super::handlers::{
    add_gallery_image_handler, create_student_handler, delete_gallery_image_handler,
    delete_student_handler, get_gallery_image_handler, get_student_handler, grant_admin_handler,
    health_check_handler, list_gallery_handler, list_students_handler, list_users_handler,
    metrics_handler, register_user_handler, remove_user_handler, replace_gallery_image_handler,
    replace_student_handler, root_handler,
};

/// Create the application router with the full HTTP surface.
pub fn create_router(app_state: Arc<AppState>) -> Router {
    let middleware = ServiceBuilder::new()
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(TimeoutLayer::new(Duration::from_secs(30)));

    let students_routes = Router::new()
        .route("/", get(list_students_handler).post(create_student_handler))
        .route(
            "/{id}",
            get(get_student_handler)
                .put(replace_student_handler)
                .delete(delete_student_handler),
        );

    let users_routes = Router::new()
        .route("/", get(list_users_handler).post(register_user_handler))
        .route("/{id}", delete(remove_user_handler))
        .route("/admin/{id}", patch(grant_admin_handler));

    let gallery_routes = Router::new()
        .route("/", get(list_gallery_handler).post(add_gallery_image_handler))
        .route(
            "/{id}",
            get(get_gallery_image_handler)
                .put(replace_gallery_image_handler)
                .delete(delete_gallery_image_handler),
        );

    Router::new()
        .route("/", get(root_handler))
        .route("/health", get(health_check_handler))
        .route("/metrics", get(metrics_handler))
        .nest("/students", students_routes)
        .nest("/users", users_routes)
        .nest("/gallery", gallery_routes)
        .layer(middleware)
        .with_state(app_state)
}
