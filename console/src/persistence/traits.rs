//! Async repository trait definitions for the persistence layer.
//!
//! [`Repository`] is the one CRUD contract shared by every table; the
//! remaining traits cover the joined and computed reads that only some
//! tables offer.
//!
//! Methods return `impl Future + Send` rather than using `async fn` so that
//! the futures are guaranteed `Send`.

use std::future::Future;

use league::{PlayerWithCoach, RankingRow, UserOpinion};

use super::PersistenceError;

/// CRUD access to one table.
///
/// Every mutating call runs in its own transaction. `update` and `delete`
/// fail with [`PersistenceError::NoRowsAffected`] when the key matches
/// nothing, leaving the table unchanged.
pub trait Repository: Send + Sync {
    type Record: Send + Sync;
    type Key: Send + Sync;

    /// Store a new record and return it with its generated id (if any).
    fn insert(
        &self,
        record: &Self::Record,
    ) -> impl Future<Output = Result<Self::Record, PersistenceError>> + Send;
    fn get(
        &self,
        key: &Self::Key,
    ) -> impl Future<Output = Result<Option<Self::Record>, PersistenceError>> + Send;
    /// All records, ordered by key.
    fn list(&self) -> impl Future<Output = Result<Vec<Self::Record>, PersistenceError>> + Send;
    /// Replace every non-key field of the stored record with the same key.
    fn update(
        &self,
        record: &Self::Record,
    ) -> impl Future<Output = Result<(), PersistenceError>> + Send;
    fn delete(&self, key: &Self::Key) -> impl Future<Output = Result<(), PersistenceError>> + Send;
}

pub trait PlayerReports: Send + Sync {
    /// Players whose coach exists, paired with that coach.
    fn players_with_coach(
        &self,
    ) -> impl Future<Output = Result<Vec<PlayerWithCoach>, PersistenceError>> + Send;
}

pub trait OpinionReports: Send + Sync {
    /// Every user with each opinion they wrote; users without opinions
    /// appear once with empty opinion columns.
    fn opinions_with_user(
        &self,
    ) -> impl Future<Output = Result<Vec<UserOpinion>, PersistenceError>> + Send;
}

pub trait RankingReport: Send + Sync {
    /// Dense ranking of all players by accumulated statistic points.
    fn ranking(&self) -> impl Future<Output = Result<Vec<RankingRow>, PersistenceError>> + Send;
}

pub trait EmailLookup: Send + Sync {
    /// Whether `email` is stored for a user other than `except_user_id`.
    fn email_taken(
        &self,
        email: &str,
        except_user_id: Option<i64>,
    ) -> impl Future<Output = Result<bool, PersistenceError>> + Send;
}
