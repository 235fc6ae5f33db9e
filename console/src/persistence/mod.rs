pub mod sqlite;
pub mod traits;

pub use traits::{EmailLookup, OpinionReports, PlayerReports, RankingReport, Repository};

/// Errors from the persistence layer.
#[derive(Debug, thiserror::Error)]
pub enum PersistenceError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("Migration failed: {0}")]
    Migration(String),
    #[error("No {entity} found with key {key}")]
    NoRowsAffected { entity: &'static str, key: String },
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid stored data: {0}")]
    InvalidData(String),
}
