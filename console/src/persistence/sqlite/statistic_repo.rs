//! SQLite-backed repository for per-match player statistics.
//!
//! Also serves the player ranking: players and statistics are loaded and
//! ranked in process by [`league::compute_ranking`].

use league::{compute_ranking, Player, RankingRow, Statistic};
use sqlx::SqlitePool;

use super::helpers::ensure_affected;
use super::player_repo::SqlitePlayerRepository;
use crate::persistence::traits::{RankingReport, Repository};
use crate::persistence::PersistenceError;

#[derive(sqlx::FromRow)]
struct StatisticRow {
    id: i64,
    player_id: i64,
    match_id: i64,
    attacks: i64,
    serves: i64,
    blocks: i64,
    digs: i64,
    errors: i64,
}

impl From<StatisticRow> for Statistic {
    fn from(r: StatisticRow) -> Self {
        Self {
            id: r.id,
            player_id: r.player_id,
            match_id: r.match_id,
            attacks: r.attacks,
            serves: r.serves,
            blocks: r.blocks,
            digs: r.digs,
            errors: r.errors,
        }
    }
}

/// SQLite implementation of [`Repository`] for [`Statistic`].
pub struct SqliteStatisticRepository {
    pool: SqlitePool,
}

impl SqliteStatisticRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

impl Repository for SqliteStatisticRepository {
    type Record = Statistic;
    type Key = i64;

    async fn insert(&self, stat: &Statistic) -> Result<Statistic, PersistenceError> {
        let mut tx = self.pool.begin().await?;

        let result = sqlx::query(
            r#"
            INSERT INTO statistics
                (player_id, match_id, attacks, serves, blocks, digs, errors)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(stat.player_id)
        .bind(stat.match_id)
        .bind(stat.attacks)
        .bind(stat.serves)
        .bind(stat.blocks)
        .bind(stat.digs)
        .bind(stat.errors)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(Statistic {
            id: result.last_insert_rowid(),
            ..stat.clone()
        })
    }

    async fn get(&self, id: &i64) -> Result<Option<Statistic>, PersistenceError> {
        let row: Option<StatisticRow> = sqlx::query_as(
            "SELECT id, player_id, match_id, attacks, serves, blocks, digs, errors \
             FROM statistics WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Statistic::from))
    }

    async fn list(&self) -> Result<Vec<Statistic>, PersistenceError> {
        let rows: Vec<StatisticRow> = sqlx::query_as(
            "SELECT id, player_id, match_id, attacks, serves, blocks, digs, errors \
             FROM statistics ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Statistic::from).collect())
    }

    async fn update(&self, stat: &Statistic) -> Result<(), PersistenceError> {
        let mut tx = self.pool.begin().await?;

        let result = sqlx::query(
            r#"
            UPDATE statistics
            SET player_id = ?, match_id = ?, attacks = ?, serves = ?, blocks = ?,
                digs = ?, errors = ?
            WHERE id = ?
            "#,
        )
        .bind(stat.player_id)
        .bind(stat.match_id)
        .bind(stat.attacks)
        .bind(stat.serves)
        .bind(stat.blocks)
        .bind(stat.digs)
        .bind(stat.errors)
        .bind(stat.id)
        .execute(&mut *tx)
        .await?;

        ensure_affected(&result, "statistic", stat.id)?;
        tx.commit().await?;
        Ok(())
    }

    async fn delete(&self, id: &i64) -> Result<(), PersistenceError> {
        let mut tx = self.pool.begin().await?;

        let result = sqlx::query("DELETE FROM statistics WHERE id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        ensure_affected(&result, "statistic", id)?;
        tx.commit().await?;
        Ok(())
    }
}

impl RankingReport for SqliteStatisticRepository {
    async fn ranking(&self) -> Result<Vec<RankingRow>, PersistenceError> {
        let players: Vec<Player> = SqlitePlayerRepository::new(self.pool.clone()).list().await?;
        let statistics = self.list().await?;

        let rows = compute_ranking(&players, &statistics);
        tracing::debug!(players = players.len(), statistics = statistics.len(), "Ranking computed");
        Ok(rows)
    }
}
