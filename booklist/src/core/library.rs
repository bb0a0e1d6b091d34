use rusqlite::ErrorCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LibraryError {
    #[error("{message} {reason_code:?} {retryable}")]
    Database {
        message: String,
        reason_code: Option<String>,
        retryable: bool,
    },
    #[error("{message}")]
    DuplicateKey {
        message: String,
    },
    #[error("{message}")]
    NotFound {
        message: String,
    },
    #[error("{message} {reason_code:?}")]
    Validation {
        message: String,
        reason_code: Option<String>,
    },
    #[error("{message}")]
    Serialization {
        message: String,
    },
    #[error("{message} {reason_code:?}")]
    Runtime {
        message: String,
        reason_code: Option<String>,
    },
}

impl LibraryError {
    pub fn database(message: &str, reason_code: Option<String>, retryable: bool) -> LibraryError {
        LibraryError::Database { message: message.to_string(), reason_code, retryable }
    }

    pub fn duplicate_key(message: &str) -> LibraryError {
        LibraryError::DuplicateKey { message: message.to_string() }
    }

    pub fn not_found(message: &str) -> LibraryError {
        LibraryError::NotFound { message: message.to_string() }
    }

    pub fn validation(message: &str, reason_code: Option<String>) -> LibraryError {
        LibraryError::Validation { message: message.to_string(), reason_code }
    }

    pub fn serialization(message: &str) -> LibraryError {
        LibraryError::Serialization { message: message.to_string() }
    }

    pub fn runtime(message: &str, reason_code: Option<String>) -> LibraryError {
        LibraryError::Runtime { message: message.to_string(), reason_code }
    }

    pub fn retryable(&self) -> bool {
        match self {
            LibraryError::Database { retryable, .. } => *retryable,
            _ => false,
        }
    }
}

// sqlite reports lock contention as BUSY/LOCKED, both of which clear up on retry
impl From<rusqlite::Error> for LibraryError {
    fn from(err: rusqlite::Error) -> Self {
        match err {
            rusqlite::Error::QueryReturnedNoRows => {
                LibraryError::not_found("no rows returned")
            }
            rusqlite::Error::SqliteFailure(ref code, _) => {
                let reason = Some(format!("{:?}", code.code));
                match code.code {
                    ErrorCode::ConstraintViolation => {
                        LibraryError::duplicate_key(format!("constraint violation {:?}", err).as_str())
                    }
                    ErrorCode::DatabaseBusy | ErrorCode::DatabaseLocked => {
                        LibraryError::database(format!("sqlite database unavailable {:?}", err).as_str(), reason, true)
                    }
                    _ => {
                        LibraryError::database(format!("sqlite database error {:?}", err).as_str(), reason, false)
                    }
                }
            }
            rusqlite::Error::FromSqlConversionFailure(..) | rusqlite::Error::InvalidColumnType(..) => {
                LibraryError::serialization(format!("sqlite row conversion {:?}", err).as_str())
            }
            other => {
                LibraryError::database(format!("sqlite error {:?}", other).as_str(), None, false)
            }
        }
    }
}

/// A specialized Result type for the catalog.
pub type LibraryResult<T> = Result<T, LibraryError>;

#[cfg(test)]
mod tests {
    use rusqlite::ErrorCode;
    use crate::core::library::LibraryError;

    #[tokio::test]
    async fn test_should_create_errors() {
        assert!(matches!(LibraryError::database("test", None, false), LibraryError::Database { .. }));
        assert!(matches!(LibraryError::duplicate_key("test"), LibraryError::DuplicateKey { .. }));
        assert!(matches!(LibraryError::not_found("test"), LibraryError::NotFound { .. }));
        assert!(matches!(LibraryError::validation("test", None), LibraryError::Validation { .. }));
        assert!(matches!(LibraryError::serialization("test"), LibraryError::Serialization { .. }));
        assert!(matches!(LibraryError::runtime("test", None), LibraryError::Runtime { .. }));
    }

    #[tokio::test]
    async fn test_should_create_retryable_error() {
        assert!(LibraryError::database("test", None, true).retryable());
        assert!(!LibraryError::database("test", None, false).retryable());
        assert!(!LibraryError::not_found("test").retryable());
        assert!(!LibraryError::validation("test", None).retryable());
        assert!(!LibraryError::runtime("test", None).retryable());
    }

    #[tokio::test]
    async fn test_should_map_sqlite_errors() {
        let no_rows = LibraryError::from(rusqlite::Error::QueryReturnedNoRows);
        assert!(matches!(no_rows, LibraryError::NotFound { .. }));

        let busy = LibraryError::from(rusqlite::Error::SqliteFailure(
            rusqlite::ffi::Error { code: ErrorCode::DatabaseBusy, extended_code: 5 }, None));
        assert!(busy.retryable());

        let constraint = LibraryError::from(rusqlite::Error::SqliteFailure(
            rusqlite::ffi::Error { code: ErrorCode::ConstraintViolation, extended_code: 19 }, None));
        assert!(matches!(constraint, LibraryError::DuplicateKey { .. }));
    }
}
