//! SQLite-backed repository for player participations, keyed by
//! `(player_id, match_id)`.

use league::{Participation, ParticipationKey, PlayerStatus, Variants};
use sqlx::SqlitePool;

use super::helpers::{decode_variant, ensure_affected};
use crate::persistence::traits::Repository;
use crate::persistence::PersistenceError;

#[derive(sqlx::FromRow)]
struct ParticipationRow {
    player_id: i64,
    match_id: i64,
    entry_minute: i64,
    exit_minute: i64,
    status: String,
}

impl TryFrom<ParticipationRow> for Participation {
    type Error = PersistenceError;

    fn try_from(r: ParticipationRow) -> Result<Self, Self::Error> {
        Ok(Self {
            player_id: r.player_id,
            match_id: r.match_id,
            entry_minute: r.entry_minute,
            exit_minute: r.exit_minute,
            status: decode_variant::<PlayerStatus>("status", &r.status)?,
        })
    }
}

pub struct SqliteParticipationRepository {
    pool: SqlitePool,
}

impl SqliteParticipationRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

impl Repository for SqliteParticipationRepository {
    type Record = Participation;
    type Key = ParticipationKey;

    async fn insert(&self, p: &Participation) -> Result<Participation, PersistenceError> {
        let mut tx = self.pool.begin().await?;

        sqlx::query(
            "INSERT INTO participations (player_id, match_id, entry_minute, exit_minute, status) \
             VALUES (?, ?, ?, ?, ?)",
        )
        .bind(p.player_id)
        .bind(p.match_id)
        .bind(p.entry_minute)
        .bind(p.exit_minute)
        .bind(p.status.as_str())
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(p.clone())
    }

    async fn get(&self, key: &ParticipationKey) -> Result<Option<Participation>, PersistenceError> {
        let row: Option<ParticipationRow> = sqlx::query_as(
            "SELECT player_id, match_id, entry_minute, exit_minute, status \
             FROM participations WHERE player_id = ? AND match_id = ?",
        )
        .bind(key.player_id)
        .bind(key.match_id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(Participation::try_from).transpose()
    }

    async fn list(&self) -> Result<Vec<Participation>, PersistenceError> {
        let rows: Vec<ParticipationRow> = sqlx::query_as(
            "SELECT player_id, match_id, entry_minute, exit_minute, status \
             FROM participations ORDER BY player_id, match_id",
        )
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(Participation::try_from).collect()
    }

    async fn update(&self, p: &Participation) -> Result<(), PersistenceError> {
        let mut tx = self.pool.begin().await?;

        let result = sqlx::query(
            "UPDATE participations SET entry_minute = ?, exit_minute = ?, status = ? \
             WHERE player_id = ? AND match_id = ?",
        )
        .bind(p.entry_minute)
        .bind(p.exit_minute)
        .bind(p.status.as_str())
        .bind(p.player_id)
        .bind(p.match_id)
        .execute(&mut *tx)
        .await?;

        ensure_affected(&result, "participation", p.key())?;
        tx.commit().await?;
        Ok(())
    }

    async fn delete(&self, key: &ParticipationKey) -> Result<(), PersistenceError> {
        let mut tx = self.pool.begin().await?;

        let result = sqlx::query("DELETE FROM participations WHERE player_id = ? AND match_id = ?")
            .bind(key.player_id)
            .bind(key.match_id)
            .execute(&mut *tx)
            .await?;

        ensure_affected(&result, "participation", key)?;
        tx.commit().await?;
        Ok(())
    }
}
