//! SQLite-backed repository for coaches.

use league::Coach;
use sqlx::SqlitePool;

use super::helpers::ensure_affected;
use crate::persistence::traits::Repository;
use crate::persistence::PersistenceError;

#[derive(sqlx::FromRow)]
struct CoachRow {
    id: i64,
    name: String,
    surname: String,
    nationality: Option<String>,
    experience_years: i64,
}

impl From<CoachRow> for Coach {
    fn from(r: CoachRow) -> Self {
        Self {
            id: r.id,
            name: r.name,
            surname: r.surname,
            nationality: r.nationality,
            experience_years: r.experience_years,
        }
    }
}

/// SQLite implementation of [`Repository`] for [`Coach`].
pub struct SqliteCoachRepository {
    pool: SqlitePool,
}

impl SqliteCoachRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

impl Repository for SqliteCoachRepository {
    type Record = Coach;
    type Key = i64;

    async fn insert(&self, coach: &Coach) -> Result<Coach, PersistenceError> {
        let mut tx = self.pool.begin().await?;

        let result = sqlx::query(
            "INSERT INTO coaches (name, surname, nationality, experience_years) \
             VALUES (?, ?, ?, ?)",
        )
        .bind(&coach.name)
        .bind(&coach.surname)
        .bind(&coach.nationality)
        .bind(coach.experience_years)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(Coach {
            id: result.last_insert_rowid(),
            ..coach.clone()
        })
    }

    async fn get(&self, id: &i64) -> Result<Option<Coach>, PersistenceError> {
        let row: Option<CoachRow> = sqlx::query_as(
            "SELECT id, name, surname, nationality, experience_years FROM coaches WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Coach::from))
    }

    async fn list(&self) -> Result<Vec<Coach>, PersistenceError> {
        let rows: Vec<CoachRow> = sqlx::query_as(
            "SELECT id, name, surname, nationality, experience_years FROM coaches ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Coach::from).collect())
    }

    async fn update(&self, coach: &Coach) -> Result<(), PersistenceError> {
        let mut tx = self.pool.begin().await?;

        let result = sqlx::query(
            "UPDATE coaches SET name = ?, surname = ?, nationality = ?, experience_years = ? \
             WHERE id = ?",
        )
        .bind(&coach.name)
        .bind(&coach.surname)
        .bind(&coach.nationality)
        .bind(coach.experience_years)
        .bind(coach.id)
        .execute(&mut *tx)
        .await?;

        ensure_affected(&result, "coach", coach.id)?;
        tx.commit().await?;
        Ok(())
    }

    async fn delete(&self, id: &i64) -> Result<(), PersistenceError> {
        let mut tx = self.pool.begin().await?;

        let result = sqlx::query("DELETE FROM coaches WHERE id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        ensure_affected(&result, "coach", id)?;
        tx.commit().await?;
        Ok(())
    }
}
