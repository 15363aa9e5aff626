//! MongoDB document store implementation.

use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{
    Client, Collection,
    bson::{self, Bson, Document, doc, oid::ObjectId},
    options::{ClientOptions, ServerApi, ServerApiVersion},
};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{info, instrument};

use crate::domain::{
    AppError, DatabaseError, DeleteAck, DocumentStore, GalleryImage, InsertAck, Student, UpdateAck,
    User,
};

const STUDENTS_COLLECTION: &str = "students";
const USERS_COLLECTION: &str = "users";
const GALLERY_COLLECTION: &str = "gallery";

/// MongoDB store client. The driver maintains its own connection pool; one
/// instance is shared for the process lifetime.
pub struct MongoStore {
    client: Client,
    students: Collection<Document>,
    users: Collection<Document>,
    gallery: Collection<Document>,
}

impl MongoStore {
    /// Connect to the store, requesting Stable API v1 in strict mode, and
    /// ping the server once to confirm the connection.
    pub async fn connect(uri: &str, database: &str) -> Result<Self, AppError> {
        info!("Connecting to MongoDB...");
        let mut options = ClientOptions::parse(uri)
            .await
            .map_err(|e| AppError::Database(DatabaseError::Connection(e.to_string())))?;

        let mut server_api = ServerApi::builder().version(ServerApiVersion::V1).build();
        server_api.strict = Some(true);
        server_api.deprecation_errors = Some(true);
        options.server_api = Some(server_api);

        let client = Client::with_options(options)
            .map_err(|e| AppError::Database(DatabaseError::Connection(e.to_string())))?;

        let db = client.database(database);
        let store = Self {
            students: db.collection(STUDENTS_COLLECTION),
            users: db.collection(USERS_COLLECTION),
            gallery: db.collection(GALLERY_COLLECTION),
            client,
        };

        store.ping().await?;
        info!(database = %database, "Connected to MongoDB");
        Ok(store)
    }

    async fn ping(&self) -> Result<(), AppError> {
        self.client
            .database("admin")
            .run_command(doc! {"ping": 1})
            .await
            .map_err(|e| AppError::Database(DatabaseError::Connection(e.to_string())))?;
        Ok(())
    }

    async fn insert_into<T: Serialize>(
        &self,
        collection: &Collection<Document>,
        value: &T,
    ) -> Result<InsertAck, AppError> {
        let doc = to_insert_document(value)?;
        let result = collection.insert_one(doc).await?;
        Ok(InsertAck::new(id_to_hex(&result.inserted_id)))
    }

    async fn find_by_id<T: DeserializeOwned>(
        &self,
        collection: &Collection<Document>,
        id: &str,
    ) -> Result<Option<T>, AppError> {
        let oid = parse_id(id)?;
        let doc = collection.find_one(doc! {"_id": oid}).await?;
        doc.map(document_into).transpose()
    }

    async fn replace_by_id(
        &self,
        collection: &Collection<Document>,
        id: &str,
        replacement: Document,
    ) -> Result<UpdateAck, AppError> {
        let oid = parse_id(id)?;
        let result = collection
            .update_one(doc! {"_id": oid}, doc! {"$set": replacement})
            .upsert(true)
            .await?;

        Ok(UpdateAck {
            acknowledged: true,
            matched_count: result.matched_count,
            modified_count: result.modified_count,
            upserted_id: result.upserted_id.as_ref().map(id_to_hex),
        })
    }

    async fn delete_by_id(
        &self,
        collection: &Collection<Document>,
        id: &str,
    ) -> Result<DeleteAck, AppError> {
        let oid = parse_id(id)?;
        let result = collection.delete_one(doc! {"_id": oid}).await?;
        Ok(DeleteAck {
            acknowledged: true,
            deleted_count: result.deleted_count,
        })
    }

    async fn list_all<T: DeserializeOwned>(
        &self,
        collection: &Collection<Document>,
    ) -> Result<Vec<T>, AppError> {
        let cursor = collection.find(doc! {}).await?;
        let docs: Vec<Document> = cursor.try_collect().await?;
        docs.into_iter().map(document_into).collect()
    }
}

#[async_trait]
impl DocumentStore for MongoStore {
    #[instrument(skip(self))]
    async fn health_check(&self) -> Result<(), AppError> {
        self.ping().await
    }

    #[instrument(skip(self, student))]
    async fn insert_student(&self, student: &Student) -> Result<InsertAck, AppError> {
        self.insert_into(&self.students, student).await
    }

    #[instrument(skip(self))]
    async fn list_students(&self, skip: u64, limit: i64) -> Result<Vec<Student>, AppError> {
        // limit(0) is the server's "no limit"
        let cursor = self.students.find(doc! {}).skip(skip).limit(limit).await?;
        let docs: Vec<Document> = cursor.try_collect().await?;
        docs.into_iter().map(document_into).collect()
    }

    #[instrument(skip(self))]
    async fn count_students(&self) -> Result<u64, AppError> {
        let count = self.students.estimated_document_count().await?;
        Ok(count)
    }

    #[instrument(skip(self))]
    async fn find_student(&self, id: &str) -> Result<Option<Student>, AppError> {
        self.find_by_id(&self.students, id).await
    }

    #[instrument(skip(self, fields))]
    async fn replace_student(&self, id: &str, fields: &Student) -> Result<UpdateAck, AppError> {
        self.replace_by_id(&self.students, id, student_replacement(fields))
            .await
    }

    #[instrument(skip(self))]
    async fn delete_student(&self, id: &str) -> Result<DeleteAck, AppError> {
        self.delete_by_id(&self.students, id).await
    }

    #[instrument(skip(self))]
    async fn list_users(&self) -> Result<Vec<User>, AppError> {
        self.list_all(&self.users).await
    }

    #[instrument(skip(self))]
    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let doc = self.users.find_one(doc! {"email": email}).await?;
        doc.map(document_into).transpose()
    }

    #[instrument(skip(self, user), fields(email = %user.email))]
    async fn insert_user(&self, user: &User) -> Result<InsertAck, AppError> {
        self.insert_into(&self.users, user).await
    }

    #[instrument(skip(self))]
    async fn delete_user(&self, id: &str) -> Result<DeleteAck, AppError> {
        self.delete_by_id(&self.users, id).await
    }

    #[instrument(skip(self))]
    async fn set_user_role(&self, id: &str, role: &str) -> Result<UpdateAck, AppError> {
        let oid = parse_id(id)?;
        let result = self
            .users
            .update_one(doc! {"_id": oid}, doc! {"$set": {"role": role}})
            .await?;

        Ok(UpdateAck {
            acknowledged: true,
            matched_count: result.matched_count,
            modified_count: result.modified_count,
            upserted_id: None,
        })
    }

    #[instrument(skip(self, image))]
    async fn insert_gallery_image(&self, image: &GalleryImage) -> Result<InsertAck, AppError> {
        self.insert_into(&self.gallery, image).await
    }

    #[instrument(skip(self))]
    async fn list_gallery_images(&self) -> Result<Vec<GalleryImage>, AppError> {
        self.list_all(&self.gallery).await
    }

    #[instrument(skip(self))]
    async fn find_gallery_image(&self, id: &str) -> Result<Option<GalleryImage>, AppError> {
        self.find_by_id(&self.gallery, id).await
    }

    #[instrument(skip(self, fields))]
    async fn replace_gallery_image(
        &self,
        id: &str,
        fields: &GalleryImage,
    ) -> Result<UpdateAck, AppError> {
        self.replace_by_id(&self.gallery, id, gallery_replacement(fields))
            .await
    }

    #[instrument(skip(self))]
    async fn delete_gallery_image(&self, id: &str) -> Result<DeleteAck, AppError> {
        self.delete_by_id(&self.gallery, id).await
    }
}

fn parse_id(id: &str) -> Result<ObjectId, AppError> {
    ObjectId::parse_str(id)
        .map_err(|_| AppError::Database(DatabaseError::MalformedId(id.to_string())))
}

fn id_to_hex(id: &Bson) -> String {
    match id {
        Bson::ObjectId(oid) => oid.to_hex(),
        other => other.to_string(),
    }
}

/// Serialize for insert: only fields present in the value end up in the
/// document (absent optionals are skipped by serde).
fn to_insert_document<T: Serialize>(value: &T) -> Result<Document, AppError> {
    bson::to_document(value).map_err(|e| AppError::Serialization(e.to_string()))
}

/// The full `$set` document for a student replace. Every known field is
/// written; absent request fields become null rather than being merged
/// around.
fn student_replacement(fields: &Student) -> Document {
    doc! {
        "photo": fields.photo.clone(),
        "name": fields.name.clone(),
        "class_name": fields.class_name.clone(),
        "subject": fields.subject.clone(),
        "email": fields.email.clone(),
        "phone": fields.phone.clone(),
        "address": fields.address.clone(),
    }
}

/// The full `$set` document for a gallery image replace.
fn gallery_replacement(fields: &GalleryImage) -> Document {
    doc! {
        "name": fields.name.clone(),
        "photoUrl": fields.photo_url.clone(),
    }
}

/// Convert a fetched document into a domain type, rendering the ObjectId
/// as its hex string first so `_id` deserializes into the string-typed id.
fn document_into<T: DeserializeOwned>(mut doc: Document) -> Result<T, AppError> {
    if let Some(Bson::ObjectId(oid)) = doc.get("_id") {
        let hex = oid.to_hex();
        doc.insert("_id", hex);
    }
    bson::from_document(doc).map_err(|e| AppError::Deserialization(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_id_accepts_hex_object_id() {
        assert!(parse_id("64b7f0a2c9e77a3f4d2e9b11").is_ok());
    }

    #[test]
    fn test_parse_id_rejects_malformed_input() {
        let err = parse_id("not-an-object-id").unwrap_err();
        assert!(matches!(
            err,
            AppError::Database(DatabaseError::MalformedId(_))
        ));
    }

    #[test]
    fn test_id_to_hex_renders_object_id() {
        let oid = ObjectId::parse_str("64b7f0a2c9e77a3f4d2e9b11").unwrap();
        assert_eq!(id_to_hex(&Bson::ObjectId(oid)), "64b7f0a2c9e77a3f4d2e9b11");
    }

    #[test]
    fn test_insert_document_skips_absent_fields() {
        let student = Student::named("Ann");
        let doc = to_insert_document(&student).unwrap();

        assert_eq!(doc.get_str("name").unwrap(), "Ann");
        assert!(!doc.contains_key("email"));
        assert!(!doc.contains_key("_id"));
    }

    #[test]
    fn test_student_replacement_writes_full_field_set() {
        let doc = student_replacement(&Student::named("Ann"));

        assert_eq!(doc.get_str("name").unwrap(), "Ann");
        // Absent fields are nulled out, not dropped
        assert_eq!(doc.get("email"), Some(&Bson::Null));
        assert_eq!(doc.len(), 7);
    }

    #[test]
    fn test_gallery_replacement_uses_wire_key() {
        let doc = gallery_replacement(&GalleryImage::new("Campus", "https://example.com/c.jpg"));
        assert_eq!(doc.get_str("photoUrl").unwrap(), "https://example.com/c.jpg");
    }

    #[test]
    fn test_document_into_renders_object_id_as_hex() {
        let oid = ObjectId::parse_str("64b7f0a2c9e77a3f4d2e9b11").unwrap();
        let doc = doc! {"_id": oid, "name": "Ann"};

        let student: Student = document_into(doc).unwrap();
        assert_eq!(student.id.as_deref(), Some("64b7f0a2c9e77a3f4d2e9b11"));
        assert_eq!(student.name.as_deref(), Some("Ann"));
    }
}
