//! Mock implementations for testing.
//!
//! An in-memory document store that can be configured to simulate
//! success, failure, and unhealthy-connection scenarios.

use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use crate::domain::{
    AppError, DatabaseError, DeleteAck, DocumentStore, GalleryImage, InsertAck, Student, UpdateAck,
    User,
};

/// Configuration for mock behavior.
#[derive(Debug, Clone, Default)]
pub struct MockConfig {
    /// If true, operations will fail.
    pub should_fail: bool,
    /// Custom error message for failures.
    pub error_message: Option<String>,
}

impl MockConfig {
    /// Creates a config that always succeeds.
    #[must_use]
    pub fn success() -> Self {
        Self::default()
    }

    /// Creates a config that always fails.
    #[must_use]
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            should_fail: true,
            error_message: Some(message.into()),
        }
    }
}

/// Mock document store for testing.
///
/// Collections are `BTreeMap`s keyed by generated 24-char hex ids, so
/// iteration follows insertion order and pagination is deterministic.
/// Unlike the real store, ids are not validated for ObjectId shape;
/// unknown ids simply match nothing.
pub struct MockDocumentStore {
    students: Mutex<BTreeMap<String, Student>>,
    users: Mutex<BTreeMap<String, User>>,
    gallery: Mutex<BTreeMap<String, GalleryImage>>,
    config: MockConfig,
    next_id: AtomicU64,
    call_count: AtomicU64,
    is_healthy: AtomicBool,
}

impl MockDocumentStore {
    /// Creates a new mock with default (success) configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(MockConfig::success())
    }

    /// Creates a new mock with the given configuration.
    #[must_use]
    pub fn with_config(config: MockConfig) -> Self {
        Self {
            students: Mutex::new(BTreeMap::new()),
            users: Mutex::new(BTreeMap::new()),
            gallery: Mutex::new(BTreeMap::new()),
            config,
            next_id: AtomicU64::new(1),
            call_count: AtomicU64::new(0),
            is_healthy: AtomicBool::new(true),
        }
    }

    /// Creates a mock that always fails.
    #[must_use]
    pub fn failing(message: impl Into<String>) -> Self {
        Self::with_config(MockConfig::failure(message))
    }

    /// Gets the number of times any method was called.
    pub fn call_count(&self) -> u64 {
        self.call_count.load(Ordering::Relaxed)
    }

    /// Sets the health status.
    pub fn set_healthy(&self, healthy: bool) {
        self.is_healthy.store(healthy, Ordering::Relaxed);
    }

    /// All stored students, in insertion order.
    pub fn all_students(&self) -> Vec<Student> {
        self.students.lock().unwrap().values().cloned().collect()
    }

    /// All stored users, in insertion order.
    pub fn all_users(&self) -> Vec<User> {
        self.users.lock().unwrap().values().cloned().collect()
    }

    /// All stored gallery images, in insertion order.
    pub fn all_gallery_images(&self) -> Vec<GalleryImage> {
        self.gallery.lock().unwrap().values().cloned().collect()
    }

    fn generate_id(&self) -> String {
        let n = self.next_id.fetch_add(1, Ordering::Relaxed);
        format!("{n:024x}")
    }

    fn record_call(&self) -> Result<(), AppError> {
        self.call_count.fetch_add(1, Ordering::Relaxed);
        if self.config.should_fail {
            let msg = self
                .config
                .error_message
                .clone()
                .unwrap_or_else(|| "Mock store error".to_string());
            return Err(AppError::Database(DatabaseError::Query(msg)));
        }
        Ok(())
    }
}

impl Default for MockDocumentStore {
    fn default() -> Self {
        Self::new()
    }
}

fn slice<T: Clone>(map: &BTreeMap<String, T>, skip: u64, limit: i64) -> Vec<T> {
    let take = if limit > 0 { limit as usize } else { usize::MAX };
    map.values().skip(skip as usize).take(take).cloned().collect()
}

#[async_trait]
impl DocumentStore for MockDocumentStore {
    async fn health_check(&self) -> Result<(), AppError> {
        self.record_call()?;

        if !self.is_healthy.load(Ordering::Relaxed) {
            return Err(AppError::Database(DatabaseError::Connection(
                "Mock store unhealthy".to_string(),
            )));
        }
        Ok(())
    }

    async fn insert_student(&self, student: &Student) -> Result<InsertAck, AppError> {
        self.record_call()?;

        let id = self.generate_id();
        let stored = Student {
            id: Some(id.clone()),
            ..student.clone()
        };
        self.students.lock().unwrap().insert(id.clone(), stored);
        Ok(InsertAck::new(id))
    }

    async fn list_students(&self, skip: u64, limit: i64) -> Result<Vec<Student>, AppError> {
        self.record_call()?;
        Ok(slice(&self.students.lock().unwrap(), skip, limit))
    }

    async fn count_students(&self) -> Result<u64, AppError> {
        self.record_call()?;
        Ok(self.students.lock().unwrap().len() as u64)
    }

    async fn find_student(&self, id: &str) -> Result<Option<Student>, AppError> {
        self.record_call()?;
        Ok(self.students.lock().unwrap().get(id).cloned())
    }

    async fn replace_student(&self, id: &str, fields: &Student) -> Result<UpdateAck, AppError> {
        self.record_call()?;

        let mut students = self.students.lock().unwrap();
        let matched = students.contains_key(id);
        let replacement = Student {
            id: Some(id.to_string()),
            ..fields.clone()
        };
        students.insert(id.to_string(), replacement);

        Ok(UpdateAck {
            acknowledged: true,
            matched_count: u64::from(matched),
            modified_count: u64::from(matched),
            upserted_id: (!matched).then(|| id.to_string()),
        })
    }

    async fn delete_student(&self, id: &str) -> Result<DeleteAck, AppError> {
        self.record_call()?;

        let removed = self.students.lock().unwrap().remove(id).is_some();
        Ok(DeleteAck {
            acknowledged: true,
            deleted_count: u64::from(removed),
        })
    }

    async fn list_users(&self) -> Result<Vec<User>, AppError> {
        self.record_call()?;
        Ok(self.users.lock().unwrap().values().cloned().collect())
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        self.record_call()?;

        let users = self.users.lock().unwrap();
        Ok(users.values().find(|u| u.email == email).cloned())
    }

    async fn insert_user(&self, user: &User) -> Result<InsertAck, AppError> {
        self.record_call()?;

        let id = self.generate_id();
        let stored = User {
            id: Some(id.clone()),
            ..user.clone()
        };
        self.users.lock().unwrap().insert(id.clone(), stored);
        Ok(InsertAck::new(id))
    }

    async fn delete_user(&self, id: &str) -> Result<DeleteAck, AppError> {
        self.record_call()?;

        let removed = self.users.lock().unwrap().remove(id).is_some();
        Ok(DeleteAck {
            acknowledged: true,
            deleted_count: u64::from(removed),
        })
    }

    async fn set_user_role(&self, id: &str, role: &str) -> Result<UpdateAck, AppError> {
        self.record_call()?;

        let mut users = self.users.lock().unwrap();
        let matched = match users.get_mut(id) {
            Some(user) => {
                user.role = Some(role.to_string());
                true
            }
            None => false,
        };

        Ok(UpdateAck {
            acknowledged: true,
            matched_count: u64::from(matched),
            modified_count: u64::from(matched),
            upserted_id: None,
        })
    }

    async fn insert_gallery_image(&self, image: &GalleryImage) -> Result<InsertAck, AppError> {
        self.record_call()?;

        let id = self.generate_id();
        let stored = GalleryImage {
            id: Some(id.clone()),
            ..image.clone()
        };
        self.gallery.lock().unwrap().insert(id.clone(), stored);
        Ok(InsertAck::new(id))
    }

    async fn list_gallery_images(&self) -> Result<Vec<GalleryImage>, AppError> {
        self.record_call()?;
        Ok(self.gallery.lock().unwrap().values().cloned().collect())
    }

    async fn find_gallery_image(&self, id: &str) -> Result<Option<GalleryImage>, AppError> {
        self.record_call()?;
        Ok(self.gallery.lock().unwrap().get(id).cloned())
    }

    async fn replace_gallery_image(
        &self,
        id: &str,
        fields: &GalleryImage,
    ) -> Result<UpdateAck, AppError> {
        self.record_call()?;

        let mut gallery = self.gallery.lock().unwrap();
        let matched = gallery.contains_key(id);
        let replacement = GalleryImage {
            id: Some(id.to_string()),
            ..fields.clone()
        };
        gallery.insert(id.to_string(), replacement);

        Ok(UpdateAck {
            acknowledged: true,
            matched_count: u64::from(matched),
            modified_count: u64::from(matched),
            upserted_id: (!matched).then(|| id.to_string()),
        })
    }

    async fn delete_gallery_image(&self, id: &str) -> Result<DeleteAck, AppError> {
        self.record_call()?;

        let removed = self.gallery.lock().unwrap().remove(id).is_some();
        Ok(DeleteAck {
            acknowledged: true,
            deleted_count: u64::from(removed),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_insert_and_find_student() {
        let mock = MockDocumentStore::new();

        let ack = mock.insert_student(&Student::named("Ann")).await.unwrap();
        assert!(ack.acknowledged);
        assert_eq!(ack.inserted_id.len(), 24);

        let fetched = mock.find_student(&ack.inserted_id).await.unwrap();
        assert_eq!(fetched.unwrap().name.as_deref(), Some("Ann"));
    }

    #[tokio::test]
    async fn test_mock_list_students_respects_skip_and_limit() {
        let mock = MockDocumentStore::new();
        for i in 0..5 {
            mock.insert_student(&Student::named(format!("S{i}")))
                .await
                .unwrap();
        }

        let page = mock.list_students(2, 2).await.unwrap();
        assert_eq!(page.len(), 2);
        assert_eq!(page[0].name.as_deref(), Some("S2"));

        let unbounded = mock.list_students(0, 0).await.unwrap();
        assert_eq!(unbounded.len(), 5);
    }

    #[tokio::test]
    async fn test_mock_replace_student_upserts() {
        let mock = MockDocumentStore::new();

        let ack = mock
            .replace_student("64b7f0a2c9e77a3f4d2e9b11", &Student::named("Ann"))
            .await
            .unwrap();
        assert_eq!(ack.matched_count, 0);
        assert_eq!(
            ack.upserted_id.as_deref(),
            Some("64b7f0a2c9e77a3f4d2e9b11")
        );

        let ack = mock
            .replace_student("64b7f0a2c9e77a3f4d2e9b11", &Student::named("Bea"))
            .await
            .unwrap();
        assert_eq!(ack.matched_count, 1);
        assert!(ack.upserted_id.is_none());
    }

    #[tokio::test]
    async fn test_mock_replace_drops_previous_fields() {
        let mock = MockDocumentStore::new();

        let ack = mock
            .insert_student(&Student::named("Ann").with_email("ann@example.com"))
            .await
            .unwrap();

        mock.replace_student(&ack.inserted_id, &Student::default().with_phone("555-0100"))
            .await
            .unwrap();

        let student = mock.find_student(&ack.inserted_id).await.unwrap().unwrap();
        assert_eq!(student.phone.as_deref(), Some("555-0100"));
        assert!(student.name.is_none());
        assert!(student.email.is_none());
    }

    #[tokio::test]
    async fn test_mock_find_user_by_email() {
        let mock = MockDocumentStore::new();
        mock.insert_user(&User::new("ann@example.com")).await.unwrap();

        let found = mock.find_user_by_email("ann@example.com").await.unwrap();
        assert!(found.is_some());

        let missing = mock.find_user_by_email("bea@example.com").await.unwrap();
        assert!(missing.is_none());
    }

    #[tokio::test]
    async fn test_mock_set_user_role() {
        let mock = MockDocumentStore::new();
        let ack = mock.insert_user(&User::new("ann@example.com")).await.unwrap();

        let update = mock.set_user_role(&ack.inserted_id, "admin").await.unwrap();
        assert_eq!(update.matched_count, 1);
        assert!(mock.all_users()[0].is_admin());

        let update = mock
            .set_user_role("64b7f0a2c9e77a3f4d2e9b11", "admin")
            .await
            .unwrap();
        assert_eq!(update.matched_count, 0);
    }

    #[tokio::test]
    async fn test_mock_failure_config() {
        let mock = MockDocumentStore::failing("down for maintenance");

        let result = mock.list_users().await;
        assert!(
            matches!(result, Err(AppError::Database(DatabaseError::Query(msg))) if msg == "down for maintenance")
        );
    }

    #[tokio::test]
    async fn test_mock_call_count() {
        let mock = MockDocumentStore::new();
        assert_eq!(mock.call_count(), 0);

        mock.health_check().await.unwrap();
        mock.count_students().await.unwrap();
        assert_eq!(mock.call_count(), 2);
    }
}
