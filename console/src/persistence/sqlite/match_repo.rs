//! SQLite-backed repository for matches.

use league::Match;
use sqlx::SqlitePool;
use time::Date;

use super::helpers::ensure_affected;
use crate::persistence::traits::Repository;
use crate::persistence::PersistenceError;

#[derive(sqlx::FromRow)]
struct MatchRow {
    id: i64,
    match_date: Date,
    team1: String,
    coach1_id: Option<i64>,
    team2: String,
    coach2_id: Option<i64>,
    result: String,
    duration_minutes: i64,
}

impl From<MatchRow> for Match {
    fn from(r: MatchRow) -> Self {
        Self {
            id: r.id,
            date: r.match_date,
            team1: r.team1,
            coach1_id: r.coach1_id,
            team2: r.team2,
            coach2_id: r.coach2_id,
            result: r.result,
            duration_minutes: r.duration_minutes,
        }
    }
}

/// SQLite implementation of [`Repository`] for [`Match`].
pub struct SqliteMatchRepository {
    pool: SqlitePool,
}

impl SqliteMatchRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

impl Repository for SqliteMatchRepository {
    type Record = Match;
    type Key = i64;

    async fn insert(&self, m: &Match) -> Result<Match, PersistenceError> {
        let mut tx = self.pool.begin().await?;

        let result = sqlx::query(
            r#"
            INSERT INTO matches
                (match_date, team1, coach1_id, team2, coach2_id, result, duration_minutes)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(m.date)
        .bind(&m.team1)
        .bind(m.coach1_id)
        .bind(&m.team2)
        .bind(m.coach2_id)
        .bind(&m.result)
        .bind(m.duration_minutes)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(Match {
            id: result.last_insert_rowid(),
            ..m.clone()
        })
    }

    async fn get(&self, id: &i64) -> Result<Option<Match>, PersistenceError> {
        let row: Option<MatchRow> = sqlx::query_as(
            r#"
            SELECT id, match_date, team1, coach1_id, team2, coach2_id, result, duration_minutes
            FROM matches
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Match::from))
    }

    async fn list(&self) -> Result<Vec<Match>, PersistenceError> {
        let rows: Vec<MatchRow> = sqlx::query_as(
            r#"
            SELECT id, match_date, team1, coach1_id, team2, coach2_id, result, duration_minutes
            FROM matches
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Match::from).collect())
    }

    async fn update(&self, m: &Match) -> Result<(), PersistenceError> {
        let mut tx = self.pool.begin().await?;

        let result = sqlx::query(
            r#"
            UPDATE matches
            SET match_date = ?, team1 = ?, coach1_id = ?, team2 = ?, coach2_id = ?,
                result = ?, duration_minutes = ?
            WHERE id = ?
            "#,
        )
        .bind(m.date)
        .bind(&m.team1)
        .bind(m.coach1_id)
        .bind(&m.team2)
        .bind(m.coach2_id)
        .bind(&m.result)
        .bind(m.duration_minutes)
        .bind(m.id)
        .execute(&mut *tx)
        .await?;

        ensure_affected(&result, "match", m.id)?;
        tx.commit().await?;
        Ok(())
    }

    async fn delete(&self, id: &i64) -> Result<(), PersistenceError> {
        let mut tx = self.pool.begin().await?;

        let result = sqlx::query("DELETE FROM matches WHERE id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        ensure_affected(&result, "match", id)?;
        tx.commit().await?;
        Ok(())
    }
}
