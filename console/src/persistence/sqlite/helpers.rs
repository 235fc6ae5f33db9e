//! Shared helpers for SQLite ↔ domain conversions and write outcomes.

use league::Variants;
use sqlx::sqlite::SqliteQueryResult;

use crate::persistence::PersistenceError;

/// Decode an upper-case enum column back into its variant.
pub fn decode_variant<E: Variants>(column: &str, value: &str) -> Result<E, PersistenceError> {
    E::from_name(value).ok_or_else(|| {
        PersistenceError::InvalidData(format!("unknown {column} value '{value}'"))
    })
}

/// Turn a zero-row write into [`PersistenceError::NoRowsAffected`].
pub fn ensure_affected(
    result: &SqliteQueryResult,
    entity: &'static str,
    key: impl ToString,
) -> Result<(), PersistenceError> {
    if result.rows_affected() == 0 {
        return Err(PersistenceError::NoRowsAffected {
            entity,
            key: key.to_string(),
        });
    }
    Ok(())
}
