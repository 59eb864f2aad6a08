//! # API Error Type
//!
//! Unified error type for storefront commands.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in the Storefront                         │
//! │                                                                         │
//! │  Terminal adapter           Commands                                    │
//! │  ────────────────           ────────                                    │
//! │                                                                         │
//! │  "checkout"                                                             │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │  place_order() -> Result<T, ApiError>                            │  │
//! │  │       │                                                          │  │
//! │  │       ├── CoreError::EmptyCart ─────────────┐                    │  │
//! │  │       ├── DbError::Write ───────────────────┼──► ApiError ──────►│  │
//! │  │       └── SyncError::Transport ─────────────┘                    │  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! │                                                                         │
//! │  The adapter prints `message`; `code` is for scripted callers.          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Serialize;
use tracing::error;

use firewood_core::submission::SUBMIT_FAILED_NOTICE;
use firewood_core::CoreError;
use firewood_store::DbError;
use firewood_sync::SyncError;

/// Error returned from storefront commands.
///
/// ```json
/// {
///   "code": "PRECONDITION_FAILED",
///   "message": "Please enter a delivery address."
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    pub code: ErrorCode,
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Unknown product or form field
    NotFound,

    /// One or more order-form rules failed
    ValidationError,

    /// Empty cart, blank address, no order to download
    PreconditionFailed,

    /// Action not allowed in the current form/submission state
    InvalidState,

    /// Local storage or document output failed
    StorageError,

    /// The order could not be delivered
    SubmissionFailed,

    /// Webhook or app configuration is unusable
    ConfigError,

    Internal,
}

impl ApiError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
        }
    }

    pub fn not_found(resource: &str, id: &str) -> Self {
        ApiError::new(ErrorCode::NotFound, format!("{} not found: {}", resource, id))
    }

    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::ValidationError, message)
    }

    pub fn invalid_state(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::InvalidState, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::Internal, message)
    }
}

impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::EmptyCart | CoreError::MissingAddress | CoreError::NoOrderData => {
                ApiError::new(ErrorCode::PreconditionFailed, err.to_string())
            }
            CoreError::ProductNotFound(id) => ApiError::not_found("Product", &id),
            CoreError::UnknownField(name) => ApiError::not_found("Form field", &name),
            CoreError::ReadOnlyField(_) | CoreError::ValidationFailed(_) => {
                ApiError::validation(err.to_string())
            }
            CoreError::NoOpenForm | CoreError::InvalidTransition { .. } => {
                ApiError::invalid_state(err.to_string())
            }
            CoreError::CorruptSnapshot(message) => {
                error!("Saved cart unreadable: {}", message);
                ApiError::new(ErrorCode::StorageError, "Saved cart could not be restored")
            }
        }
    }
}

impl From<DbError> for ApiError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::ConnectionFailed(_) => {
                ApiError::new(ErrorCode::StorageError, "Database connection failed")
            }
            DbError::MigrationFailed(_) => {
                ApiError::new(ErrorCode::StorageError, "Database migration failed")
            }
            DbError::Write { ref path, .. } => {
                error!("Document write failed: {}", err);
                ApiError::new(
                    ErrorCode::StorageError,
                    format!("Could not save {}", path.display()),
                )
            }
            other => {
                error!("Storage operation failed: {}", other);
                ApiError::new(ErrorCode::StorageError, "Storage operation failed")
            }
        }
    }
}

impl From<SyncError> for ApiError {
    fn from(err: SyncError) -> Self {
        match err {
            SyncError::InvalidConfig(_)
            | SyncError::InvalidUrl(_)
            | SyncError::ConfigLoadFailed(_)
            | SyncError::ConfigSaveFailed(_) => ApiError::new(ErrorCode::ConfigError, err.to_string()),
            other => {
                // The shopper gets the generic notice; the cause stays in the log.
                error!("Order submission failed: {}", other);
                ApiError::new(ErrorCode::SubmissionFailed, SUBMIT_FAILED_NOTICE)
            }
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}
