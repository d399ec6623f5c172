//! Domain error types.

use thiserror::Error;

/// Outcomes of the access-control and invite core other than success.
#[derive(Debug, Error)]
pub enum DomainError {
    /// The resource does not exist or the principal cannot see it.
    #[error("{0} not found")]
    NotFound(String),

    /// The principal can read the trip but not modify it.
    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Invite code not found")]
    InviteNotFound,

    #[error("Invite code has expired")]
    InviteExpired,

    #[error("Invite code has no remaining uses")]
    InviteExhausted,

    #[error("Invalid role: {0}")]
    InvalidRole(String),

    #[error("Missing required field: {0}")]
    MissingField(String),

    #[error("Storage unavailable: {0}")]
    StorageUnavailable(String),
}

impl From<sqlx::Error> for DomainError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => DomainError::NotFound("Resource".to_string()),
            other => DomainError::StorageUnavailable(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sqlx_row_not_found_maps_to_not_found() {
        let err: DomainError = sqlx::Error::RowNotFound.into();
        assert!(matches!(err, DomainError::NotFound(_)));
    }

    #[test]
    fn test_sqlx_pool_errors_map_to_storage_unavailable() {
        let err: DomainError = sqlx::Error::PoolTimedOut.into();
        assert!(matches!(err, DomainError::StorageUnavailable(_)));
    }

    #[test]
    fn test_display() {
        assert_eq!(
            DomainError::MissingField("title".into()).to_string(),
            "Missing required field: title"
        );
        assert_eq!(
            DomainError::InvalidRole("owner".into()).to_string(),
            "Invalid role: owner"
        );
    }
}
