//! HTTP request handlers.
//!
//! One handler per route; each forwards to a single service call and
//! serializes the raw result. Error mapping to HTTP statuses lives in the
//! `IntoResponse` impl for `AppError` at the bottom.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use tracing::error;

use crate::app::AppState;
use crate::domain::{
    AppError, DatabaseError, DeleteAck, ErrorDetail, ErrorResponse, GalleryImage, HealthResponse,
    InsertAck, PageQuery, Student, StudentPage, UpdateAck, User, UserRegistration,
};

/// Liveness text for GET /
pub async fn root_handler() -> &'static str {
    "Hello world!"
}

// Students

pub async fn create_student_handler(
    State(state): State<Arc<AppState>>,
    Json(student): Json<Student>,
) -> Result<Json<InsertAck>, AppError> {
    let ack = state.service.create_student(&student).await?;
    Ok(Json(ack))
}

pub async fn list_students_handler(
    State(state): State<Arc<AppState>>,
    Query(params): Query<PageQuery>,
) -> Result<Json<StudentPage>, AppError> {
    let page = state.service.list_students(&params).await?;
    Ok(Json(page))
}

pub async fn get_student_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Student>, AppError> {
    let student = state
        .service
        .get_student(&id)
        .await?
        .ok_or(AppError::Database(DatabaseError::NotFound(id)))?;
    Ok(Json(student))
}

pub async fn replace_student_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(fields): Json<Student>,
) -> Result<Json<UpdateAck>, AppError> {
    let ack = state.service.replace_student(&id, &fields).await?;
    Ok(Json(ack))
}

pub async fn delete_student_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<DeleteAck>, AppError> {
    let ack = state.service.delete_student(&id).await?;
    Ok(Json(ack))
}

// Users

pub async fn list_users_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<User>>, AppError> {
    let users = state.service.list_users().await?;
    Ok(Json(users))
}

pub async fn register_user_handler(
    State(state): State<Arc<AppState>>,
    Json(user): Json<User>,
) -> Result<Json<UserRegistration>, AppError> {
    let outcome = state.service.register_user(&user).await?;
    Ok(Json(outcome))
}

pub async fn remove_user_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<DeleteAck>, AppError> {
    let ack = state.service.remove_user(&id).await?;
    Ok(Json(ack))
}

pub async fn grant_admin_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<UpdateAck>, AppError> {
    let ack = state.service.grant_admin(&id).await?;
    Ok(Json(ack))
}

// Gallery

pub async fn add_gallery_image_handler(
    State(state): State<Arc<AppState>>,
    Json(image): Json<GalleryImage>,
) -> Result<Json<InsertAck>, AppError> {
    let ack = state.service.add_gallery_image(&image).await?;
    Ok(Json(ack))
}

pub async fn list_gallery_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<GalleryImage>>, AppError> {
    let images = state.service.list_gallery_images().await?;
    Ok(Json(images))
}

pub async fn get_gallery_image_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<GalleryImage>, AppError> {
    let image = state
        .service
        .get_gallery_image(&id)
        .await?
        .ok_or(AppError::Database(DatabaseError::NotFound(id)))?;
    Ok(Json(image))
}

pub async fn replace_gallery_image_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(fields): Json<GalleryImage>,
) -> Result<Json<UpdateAck>, AppError> {
    let ack = state.service.replace_gallery_image(&id, &fields).await?;
    Ok(Json(ack))
}

pub async fn delete_gallery_image_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<DeleteAck>, AppError> {
    let ack = state.service.delete_gallery_image(&id).await?;
    Ok(Json(ack))
}

// Operational

pub async fn health_check_handler(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let health = state.service.health_check().await;
    Json(health)
}

pub async fn metrics_handler(State(state): State<Arc<AppState>>) -> axum::response::Response {
    match &state.metrics {
        Some(handle) => handle.render().into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, error_type) = match &self {
            AppError::Database(db_err) => match db_err {
                DatabaseError::Connection(_) => (StatusCode::SERVICE_UNAVAILABLE, "database_error"),
                DatabaseError::NotFound(_) => (StatusCode::NOT_FOUND, "not_found"),
                DatabaseError::Duplicate(_) => (StatusCode::CONFLICT, "duplicate"),
                DatabaseError::MalformedId(_) => (StatusCode::BAD_REQUEST, "malformed_id"),
                DatabaseError::Query(_) => (StatusCode::INTERNAL_SERVER_ERROR, "database_error"),
            },
            AppError::Config(_) => (StatusCode::INTERNAL_SERVER_ERROR, "configuration_error"),
            AppError::Serialization(_) => (StatusCode::INTERNAL_SERVER_ERROR, "serialization_error"),
            AppError::Deserialization(_) => (StatusCode::BAD_REQUEST, "deserialization_error"),
            AppError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "internal_error"),
        };

        let message = self.to_string();
        if status.is_server_error() {
            error!(error_type = %error_type, message = %message, "Server error");
        }

        let body = Json(ErrorResponse {
            error: ErrorDetail {
                r#type: error_type.to_string(),
                message,
            },
        });

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status_of(err: AppError) -> StatusCode {
        err.into_response().status()
    }

    #[test]
    fn test_error_status_mapping() {
        assert_eq!(
            status_of(AppError::Database(DatabaseError::Connection("x".into()))),
            StatusCode::SERVICE_UNAVAILABLE
        );
        assert_eq!(
            status_of(AppError::Database(DatabaseError::NotFound("x".into()))),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            status_of(AppError::Database(DatabaseError::Duplicate("x".into()))),
            StatusCode::CONFLICT
        );
        assert_eq!(
            status_of(AppError::Database(DatabaseError::MalformedId("x".into()))),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_of(AppError::Database(DatabaseError::Query("x".into()))),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            status_of(AppError::Internal("x".into())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            status_of(AppError::Deserialization("x".into())),
            StatusCode::BAD_REQUEST
        );
    }
}
