//! Domain traits defining the contract with the document store.

use async_trait::async_trait;

use super::error::AppError;
use super::types::{DeleteAck, GalleryImage, InsertAck, Student, UpdateAck, User};

/// Document store client. One method per store operation the HTTP surface
/// performs; implementations decide nothing beyond executing the call.
///
/// Identifiers cross this seam as hex strings; implementations backed by a
/// real store convert them to their native id type and reject malformed
/// input with `DatabaseError::MalformedId`.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Check store connectivity
    async fn health_check(&self) -> Result<(), AppError>;

    // Students collection

    async fn insert_student(&self, student: &Student) -> Result<InsertAck, AppError>;

    /// List a page of students. A limit of zero means no limit.
    async fn list_students(&self, skip: u64, limit: i64) -> Result<Vec<Student>, AppError>;

    /// Estimated total count of the students collection
    async fn count_students(&self) -> Result<u64, AppError>;

    async fn find_student(&self, id: &str) -> Result<Option<Student>, AppError>;

    /// Upsert-replace the full field set of a student by id
    async fn replace_student(&self, id: &str, fields: &Student) -> Result<UpdateAck, AppError>;

    async fn delete_student(&self, id: &str) -> Result<DeleteAck, AppError>;

    // Users collection

    async fn list_users(&self) -> Result<Vec<User>, AppError>;

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, AppError>;

    async fn insert_user(&self, user: &User) -> Result<InsertAck, AppError>;

    async fn delete_user(&self, id: &str) -> Result<DeleteAck, AppError>;

    /// Set a user's role to the given value by id (no upsert)
    async fn set_user_role(&self, id: &str, role: &str) -> Result<UpdateAck, AppError>;

    // Gallery collection

    async fn insert_gallery_image(&self, image: &GalleryImage) -> Result<InsertAck, AppError>;

    async fn list_gallery_images(&self) -> Result<Vec<GalleryImage>, AppError>;

    async fn find_gallery_image(&self, id: &str) -> Result<Option<GalleryImage>, AppError>;

    /// Upsert-replace the full field set of a gallery image by id
    async fn replace_gallery_image(
        &self,
        id: &str,
        fields: &GalleryImage,
    ) -> Result<UpdateAck, AppError>;

    async fn delete_gallery_image(&self, id: &str) -> Result<DeleteAck, AppError>;
}
