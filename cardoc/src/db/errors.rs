use thiserror::Error;

/// Unified error type for store operations.
///
/// The schema has no unique constraints and every lookup is an optional fetch, so there is no
/// recoverable store failure to categorise; everything is reported as a server error.
#[derive(Error, Debug)]
pub enum DbError {
    /// Catch-all for non-recoverable errors (store unreachable, protocol errors, ...)
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl From<sqlx::Error> for DbError {
    fn from(err: sqlx::Error) -> Self {
        DbError::Other(anyhow::Error::from(err))
    }
}

impl From<sqlx::migrate::MigrateError> for DbError {
    fn from(err: sqlx::migrate::MigrateError) -> Self {
        DbError::Other(anyhow::Error::from(err))
    }
}

/// Type alias for store operation results
pub type Result<T> = std::result::Result<T, DbError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sqlx_errors_are_other() {
        assert!(matches!(DbError::from(sqlx::Error::PoolTimedOut), DbError::Other(_)));
        assert!(matches!(DbError::from(sqlx::Error::RowNotFound), DbError::Other(_)));
    }
}
