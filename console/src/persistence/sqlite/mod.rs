//! SQLite-backed repository implementations.
//!
//! ## Database setup
//!
//! [`Database`] wraps a `sqlx::SqlitePool` capped at a single connection with
//! foreign keys enabled. The embedded migration
//! `migrations/001_league_schema.sql` runs when [`Database::open`] is called;
//! the schema is idempotent.
//!
//! ## Repository types
//!
//! | Type | Traits |
//! |------|--------|
//! | [`SqliteCoachRepository`] | `Repository` |
//! | [`SqlitePlayerRepository`] | `Repository`, `PlayerReports` |
//! | [`SqliteMatchRepository`] | `Repository` |
//! | [`SqliteStatisticRepository`] | `Repository`, `RankingReport` |
//! | [`SqliteUserRepository`] | `Repository`, `EmailLookup` |
//! | [`SqliteOpinionRepository`] | `Repository`, `OpinionReports` |
//! | [`SqliteParticipationRepository`] | `Repository` |
//! | [`SqliteFollowRepository`] | `Repository` |
//!
//! Enum columns are stored as their upper-case names and decoded through
//! [`helpers`]. Dates use sqlx's `time` support (`YYYY-MM-DD` text).

mod coach_repo;
mod database;
mod follow_repo;
mod match_repo;
mod opinion_repo;
mod participation_repo;
mod player_repo;
mod seed;
mod statistic_repo;
mod user_repo;
#[cfg(test)]
mod integration_tests;
pub(crate) mod helpers;

pub use coach_repo::SqliteCoachRepository;
pub use database::Database;
pub use follow_repo::SqliteFollowRepository;
pub use match_repo::SqliteMatchRepository;
pub use opinion_repo::SqliteOpinionRepository;
pub use participation_repo::SqliteParticipationRepository;
pub use player_repo::SqlitePlayerRepository;
pub use seed::seed_if_empty;
pub use statistic_repo::SqliteStatisticRepository;
pub use user_repo::SqliteUserRepository;
