//! Application service layer.
//!
//! Every method forwards to exactly one store call, except the two spots
//! where the HTTP surface composes more than the store provides: the paged
//! students list (page slice plus total count) and user registration (the
//! advisory duplicate check).

use std::sync::Arc;

use metrics::counter;
use tracing::{info, instrument, warn};

use crate::domain::{
    ADMIN_ROLE, AppError, DeleteAck, DocumentStore, GalleryImage, HealthResponse, HealthStatus,
    InsertAck, PageQuery, Student, StudentPage, UpdateAck, User, UserRegistration,
};

/// Application service wrapping the document store.
///
/// Holds the store behind its trait abstraction, enabling dependency
/// injection and testing against the in-memory mock.
pub struct AppService {
    store: Arc<dyn DocumentStore>,
}

impl AppService {
    #[must_use]
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    // Students

    #[instrument(skip(self, student))]
    pub async fn create_student(&self, student: &Student) -> Result<InsertAck, AppError> {
        let ack = self.store.insert_student(student).await?;
        counter!("campus_api_students_created_total").increment(1);
        info!(student_id = %ack.inserted_id, "Student created");
        Ok(ack)
    }

    /// Paged list: skip = page × size, limit = size, plus the collection's
    /// estimated total count. The count is read separately from the page
    /// slice and may disagree with it under concurrent writes.
    #[instrument(skip(self))]
    pub async fn list_students(&self, params: &PageQuery) -> Result<StudentPage, AppError> {
        let students = self.store.list_students(params.skip(), params.limit()).await?;
        let count = self.store.count_students().await?;
        Ok(StudentPage { count, students })
    }

    #[instrument(skip(self))]
    pub async fn get_student(&self, id: &str) -> Result<Option<Student>, AppError> {
        self.store.find_student(id).await
    }

    #[instrument(skip(self, fields))]
    pub async fn replace_student(
        &self,
        id: &str,
        fields: &Student,
    ) -> Result<UpdateAck, AppError> {
        let ack = self.store.replace_student(id, fields).await?;
        info!(student_id = %id, upserted = ack.upserted_id.is_some(), "Student replaced");
        Ok(ack)
    }

    #[instrument(skip(self))]
    pub async fn delete_student(&self, id: &str) -> Result<DeleteAck, AppError> {
        self.store.delete_student(id).await
    }

    // Users

    #[instrument(skip(self))]
    pub async fn list_users(&self) -> Result<Vec<User>, AppError> {
        self.store.list_users().await
    }

    /// Registers a user unless one with the same email already exists.
    ///
    /// The existence check is advisory: it is not atomic against concurrent
    /// writers, so a racing insert with the same email can still slip
    /// through. The store enforces nothing beyond `_id` uniqueness.
    #[instrument(skip(self, user), fields(email = %user.email))]
    pub async fn register_user(&self, user: &User) -> Result<UserRegistration, AppError> {
        if self.store.find_user_by_email(&user.email).await?.is_some() {
            warn!(email = %user.email, "User already exists, skipping insert");
            return Ok(UserRegistration::duplicate());
        }

        let ack = self.store.insert_user(user).await?;
        counter!("campus_api_users_registered_total").increment(1);
        info!(user_id = %ack.inserted_id, "User registered");
        Ok(UserRegistration::Created(ack))
    }

    #[instrument(skip(self))]
    pub async fn remove_user(&self, id: &str) -> Result<DeleteAck, AppError> {
        self.store.delete_user(id).await
    }

    /// Sets the user's role to the fixed elevated value, regardless of the
    /// prior role. No upsert: a missing id matches nothing.
    #[instrument(skip(self))]
    pub async fn grant_admin(&self, id: &str) -> Result<UpdateAck, AppError> {
        let ack = self.store.set_user_role(id, ADMIN_ROLE).await?;
        info!(user_id = %id, matched = ack.matched_count, "Admin role granted");
        Ok(ack)
    }

    // Gallery

    #[instrument(skip(self, image))]
    pub async fn add_gallery_image(&self, image: &GalleryImage) -> Result<InsertAck, AppError> {
        self.store.insert_gallery_image(image).await
    }

    #[instrument(skip(self))]
    pub async fn list_gallery_images(&self) -> Result<Vec<GalleryImage>, AppError> {
        self.store.list_gallery_images().await
    }

    #[instrument(skip(self))]
    pub async fn get_gallery_image(&self, id: &str) -> Result<Option<GalleryImage>, AppError> {
        self.store.find_gallery_image(id).await
    }

    #[instrument(skip(self, fields))]
    pub async fn replace_gallery_image(
        &self,
        id: &str,
        fields: &GalleryImage,
    ) -> Result<UpdateAck, AppError> {
        self.store.replace_gallery_image(id, fields).await
    }

    #[instrument(skip(self))]
    pub async fn delete_gallery_image(&self, id: &str) -> Result<DeleteAck, AppError> {
        self.store.delete_gallery_image(id).await
    }

    /// Performs a health check on the store connection.
    #[instrument(skip(self))]
    pub async fn health_check(&self) -> HealthResponse {
        let database = match self.store.health_check().await {
            Ok(()) => HealthStatus::Healthy,
            Err(e) => {
                warn!(error = ?e, "Store health check failed");
                HealthStatus::Unhealthy
            }
        };

        HealthResponse::new(database)
    }
}
