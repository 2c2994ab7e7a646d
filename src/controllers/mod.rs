//! Resource controllers. Each one is built once at startup with its
//! repositories and shared by every request through `AppState`.

pub mod advantage;
pub mod department;

pub use advantage::AdvantageController;
pub use department::DepartmentController;

use thiserror::Error;

use crate::database::DatabaseError;
use crate::error::ErrorKind;

#[derive(Debug, Error)]
pub enum ControllerError {
    #[error("{0}")]
    Unauthenticated(&'static str),

    #[error("{0}")]
    NotFound(&'static str),

    #[error("{0}")]
    Forbidden(&'static str),

    #[error("{0}")]
    Validation(String),

    /// The repository accepted the call but reported no effect
    #[error("{0}")]
    Failed(&'static str),

    #[error(transparent)]
    Database(#[from] DatabaseError),
}

impl ControllerError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ControllerError::Unauthenticated(_) => ErrorKind::Unauthorized,
            ControllerError::NotFound(_) => ErrorKind::NotFound,
            ControllerError::Forbidden(_) => ErrorKind::Forbidden,
            ControllerError::Validation(_) => ErrorKind::Validation,
            ControllerError::Failed(_) | ControllerError::Database(_) => ErrorKind::Internal,
        }
    }
}

/// Parse a path id. Blank and non-numeric ids are rejected with `message`.
pub(crate) fn parse_id(raw: &str, message: &'static str) -> Result<i64, ControllerError> {
    raw.trim()
        .parse::<i64>()
        .map_err(|_| ControllerError::Validation(message.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_id_rejects_blank_and_text() {
        assert!(parse_id("", "missing").is_err());
        assert!(parse_id("abc", "missing").is_err());
        assert_eq!(parse_id(" 42 ", "missing").unwrap(), 42);
    }

    #[test]
    fn kinds() {
        assert_eq!(ControllerError::Unauthenticated("x").kind(), ErrorKind::Unauthorized);
        assert_eq!(ControllerError::Failed("x").kind(), ErrorKind::Internal);
        assert_eq!(ControllerError::Validation("x".into()).kind(), ErrorKind::Validation);
    }
}
