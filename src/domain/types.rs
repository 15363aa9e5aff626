use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Hex-encoded ObjectId assigned by the store.
pub type DocumentId = String;

/// The fixed elevated role value settable via PATCH /users/admin/{id}.
pub const ADMIN_ROLE: &str = "admin";

/// A student document. The collection is schemaless: every field beyond the
/// store-assigned identifier is optional, and a document carries only the
/// fields it was inserted or replaced with.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Student {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<DocumentId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub class_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
}

impl Student {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = Some(phone.into());
        self
    }
}

/// A user document. Email is intended to be unique but is only checked
/// advisorily before insert; the store enforces nothing beyond `_id`.
/// An absent role means a regular (non-admin) user.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct User {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<DocumentId>,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}

impl User {
    pub fn new(email: impl Into<String>) -> Self {
        Self {
            id: None,
            email: email.into(),
            role: None,
        }
    }

    pub fn is_admin(&self) -> bool {
        self.role.as_deref() == Some(ADMIN_ROLE)
    }
}

/// A gallery image document. `photoUrl` is the exact wire key.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct GalleryImage {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<DocumentId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "photoUrl", default, skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<String>,
}

impl GalleryImage {
    pub fn new(name: impl Into<String>, photo_url: impl Into<String>) -> Self {
        Self {
            id: None,
            name: Some(name.into()),
            photo_url: Some(photo_url.into()),
        }
    }
}

/// Insert acknowledgment, serialized the way the driver's result reads on
/// the wire (`{acknowledged, insertedId}`).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct InsertAck {
    pub acknowledged: bool,
    pub inserted_id: DocumentId,
}

impl InsertAck {
    pub fn new(inserted_id: DocumentId) -> Self {
        Self {
            acknowledged: true,
            inserted_id,
        }
    }
}

/// Update acknowledgment. `upserted_id` is present only when the upsert
/// created a new document.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAck {
    pub acknowledged: bool,
    pub matched_count: u64,
    pub modified_count: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub upserted_id: Option<DocumentId>,
}

/// Delete acknowledgment.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DeleteAck {
    pub acknowledged: bool,
    pub deleted_count: u64,
}

/// Response envelope for the paged students list: the total estimated
/// document count alongside the requested page slice.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StudentPage {
    pub count: u64,
    pub students: Vec<Student>,
}

/// Outcome of POST /users. The duplicate branch carries the advisory
/// message and means no insert was performed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum UserRegistration {
    Created(InsertAck),
    Duplicate { message: String },
}

impl UserRegistration {
    pub fn duplicate() -> Self {
        Self::Duplicate {
            message: "User already exists!".to_string(),
        }
    }
}

/// Query parameters for GET /students. Missing parameters default to zero;
/// a size of zero means no limit, matching the store's `limit(0)` behavior.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PageQuery {
    pub page: Option<u64>,
    pub size: Option<u64>,
}

impl PageQuery {
    /// Saturates instead of overflowing: absurdly large pages skip past
    /// everything and return an empty slice.
    pub fn skip(&self) -> u64 {
        self.page.unwrap_or(0).saturating_mul(self.size.unwrap_or(0))
    }

    pub fn limit(&self) -> i64 {
        i64::try_from(self.size.unwrap_or(0)).unwrap_or(i64::MAX)
    }
}

/// Health check status for the store connection.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    Unhealthy,
}

/// Health check response for the application.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: HealthStatus,
    pub database: HealthStatus,
    pub timestamp: DateTime<Utc>,
}

impl HealthResponse {
    pub fn new(database: HealthStatus) -> Self {
        Self {
            status: database.clone(),
            database,
            timestamp: Utc::now(),
        }
    }
}

/// Structured error body returned by the error mapping.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorDetail {
    pub r#type: String,
    pub message: String,
}
