use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use thiserror::Error;
use tracing::{debug, error, warn};

/// A business rule the input broke. Clients only ever see the status code;
/// the variant is kept for logs and tests.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    #[error("username is blank")]
    BlankUsername,

    #[error("password is shorter than {min} characters")]
    PasswordTooShort { min: usize },

    #[error("username is already taken")]
    UsernameTaken,

    #[error("message text is blank")]
    BlankMessage,

    #[error("message text is longer than {max} characters")]
    MessageTooLong { max: usize },
}

#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("invalid username or password")]
    Unauthorized,

    #[error("no account with id {0}")]
    UnknownAuthor(i64),

    #[error("store error: {0:#}")]
    Store(#[from] anyhow::Error),
}

pub type ServiceResult<T> = Result<T, ServiceError>;

impl ServiceError {
    pub fn is_store(&self) -> bool {
        matches!(self, ServiceError::Store(_))
    }

    /// Log the failure at a level matching its cause and hand back `status`
    /// for the response. Store failures get the same status as rule failures.
    pub fn reject(self, op: &str, status: StatusCode) -> StatusCode {
        match &self {
            ServiceError::Store(e) => error!("{} failed: store error: {:#}", op, e),
            ServiceError::Unauthorized => warn!("{} rejected: {}", op, self),
            _ => debug!("{} rejected: {}", op, self),
        }
        status
    }
}

/// Unreadable request bodies (missing content type, bad JSON, wrong field
/// types) answer with the route's ordinary failure status and no body.
pub fn reject_body(op: &str, rejection: JsonRejection, status: StatusCode) -> StatusCode {
    debug!("{} rejected body: {}", op, rejection.body_text());
    status
}
