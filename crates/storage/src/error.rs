use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("Not found")]
    NotFound,

    #[error("Constraint violation: {0}")]
    ConstraintViolation(String),
}

pub type Result<T> = std::result::Result<T, StorageError>;

impl StorageError {
    pub fn is_unique_violation(&self) -> bool {
        matches!(
            self,
            StorageError::Database(sqlx::Error::Database(e))
                if e.code().as_deref() == Some("23505")
        )
    }
}

/// Rejections raised by the score submission coordinator. Each variant keeps
/// the failed precondition distinguishable for user-facing messaging.
#[derive(Debug, Error)]
pub enum ScoringError {
    #[error("Round is not accepting scores")]
    RoundClosed,

    #[error("Player is not enrolled in this season")]
    NotEnrolled,

    #[error("Player already has a score for this round")]
    DuplicateSubmission,

    #[error("Raw score {0} is outside the valid range of 50 to 150")]
    InvalidScore(i32),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl From<sqlx::Error> for ScoringError {
    fn from(error: sqlx::Error) -> Self {
        Self::Storage(StorageError::Database(error))
    }
}

pub type ScoringResult<T> = std::result::Result<T, ScoringError>;
