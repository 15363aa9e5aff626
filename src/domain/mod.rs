//! Domain layer containing core types, traits, and error definitions.

pub mod error;
pub mod traits;
pub mod types;

pub use error::{AppError, ConfigError, DatabaseError};
pub use traits::DocumentStore;
pub use types::{
    ADMIN_ROLE, DeleteAck, ErrorDetail, ErrorResponse, GalleryImage, HealthResponse, HealthStatus,
    InsertAck, PageQuery, Student, StudentPage, UpdateAck, User, UserRegistration,
};
