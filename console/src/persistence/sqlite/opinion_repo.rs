//! SQLite-backed repository for user opinions on players.

use league::{Opinion, UserOpinion};
use sqlx::SqlitePool;

use super::helpers::ensure_affected;
use crate::persistence::traits::{OpinionReports, Repository};
use crate::persistence::PersistenceError;

#[derive(sqlx::FromRow)]
struct OpinionRow {
    id: i64,
    match_id: i64,
    player_id: i64,
    user_id: i64,
    score: i64,
    comment: String,
}

impl From<OpinionRow> for Opinion {
    fn from(r: OpinionRow) -> Self {
        Self {
            id: r.id,
            match_id: r.match_id,
            player_id: r.player_id,
            user_id: r.user_id,
            score: r.score,
            comment: r.comment,
        }
    }
}

#[derive(sqlx::FromRow)]
struct UserOpinionRow {
    user_id: i64,
    user_name: String,
    user_surname: String,
    player_id: Option<i64>,
    score: Option<i64>,
    comment: Option<String>,
}

impl From<UserOpinionRow> for UserOpinion {
    fn from(r: UserOpinionRow) -> Self {
        Self {
            user_id: r.user_id,
            user_name: r.user_name,
            user_surname: r.user_surname,
            player_id: r.player_id,
            score: r.score,
            comment: r.comment,
        }
    }
}

/// SQLite implementation of [`Repository`] for [`Opinion`].
pub struct SqliteOpinionRepository {
    pool: SqlitePool,
}

impl SqliteOpinionRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

impl Repository for SqliteOpinionRepository {
    type Record = Opinion;
    type Key = i64;

    async fn insert(&self, opinion: &Opinion) -> Result<Opinion, PersistenceError> {
        let mut tx = self.pool.begin().await?;

        let result = sqlx::query(
            "INSERT INTO opinions (match_id, player_id, user_id, score, comment) \
             VALUES (?, ?, ?, ?, ?)",
        )
        .bind(opinion.match_id)
        .bind(opinion.player_id)
        .bind(opinion.user_id)
        .bind(opinion.score)
        .bind(&opinion.comment)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(Opinion {
            id: result.last_insert_rowid(),
            ..opinion.clone()
        })
    }

    async fn get(&self, id: &i64) -> Result<Option<Opinion>, PersistenceError> {
        let row: Option<OpinionRow> = sqlx::query_as(
            "SELECT id, match_id, player_id, user_id, score, comment FROM opinions WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Opinion::from))
    }

    async fn list(&self) -> Result<Vec<Opinion>, PersistenceError> {
        let rows: Vec<OpinionRow> = sqlx::query_as(
            "SELECT id, match_id, player_id, user_id, score, comment FROM opinions ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Opinion::from).collect())
    }

    async fn update(&self, opinion: &Opinion) -> Result<(), PersistenceError> {
        let mut tx = self.pool.begin().await?;

        let result = sqlx::query(
            "UPDATE opinions SET match_id = ?, player_id = ?, user_id = ?, score = ?, comment = ? \
             WHERE id = ?",
        )
        .bind(opinion.match_id)
        .bind(opinion.player_id)
        .bind(opinion.user_id)
        .bind(opinion.score)
        .bind(&opinion.comment)
        .bind(opinion.id)
        .execute(&mut *tx)
        .await?;

        ensure_affected(&result, "opinion", opinion.id)?;
        tx.commit().await?;
        Ok(())
    }

    async fn delete(&self, id: &i64) -> Result<(), PersistenceError> {
        let mut tx = self.pool.begin().await?;

        let result = sqlx::query("DELETE FROM opinions WHERE id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        ensure_affected(&result, "opinion", id)?;
        tx.commit().await?;
        Ok(())
    }
}

impl OpinionReports for SqliteOpinionRepository {
    async fn opinions_with_user(&self) -> Result<Vec<UserOpinion>, PersistenceError> {
        let rows: Vec<UserOpinionRow> = sqlx::query_as(
            r#"
            SELECT u.id AS user_id, u.name AS user_name, u.surname AS user_surname,
                   o.player_id, o.score, o.comment
            FROM users u
            LEFT JOIN opinions o ON o.user_id = u.id
            ORDER BY u.id, o.id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(UserOpinion::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::sqlite::{
        Database, SqliteMatchRepository, SqlitePlayerRepository, SqliteUserRepository,
    };
    use league::{Match, Player, Position, User, UNSAVED_ID};
    use time::macros::date;

    struct Fixture {
        player_id: i64,
        match_id: i64,
        writer_id: i64,
        silent_id: i64,
    }

    async fn setup(db: &Database) -> Fixture {
        let player = SqlitePlayerRepository::new(db.pool().clone())
            .insert(&Player {
                id: UNSAVED_ID,
                name: "Lara".to_string(),
                surname: "Morgan".to_string(),
                position: Position::Setter,
                nationality: Some("American".to_string()),
                age: 24,
                jersey: 58,
                team_name: "Team D".to_string(),
                coach_id: None,
            })
            .await
            .unwrap();
        let m = SqliteMatchRepository::new(db.pool().clone())
            .insert(&Match {
                id: UNSAVED_ID,
                date: date!(2023 - 02 - 04),
                team1: "Team C".to_string(),
                coach1_id: None,
                team2: "Team B".to_string(),
                coach2_id: None,
                result: "Team C won the match".to_string(),
                duration_minutes: 142,
            })
            .await
            .unwrap();
        let users = SqliteUserRepository::new(db.pool().clone());
        let make_user = |name: &str| User {
            id: UNSAVED_ID,
            name: name.to_string(),
            surname: "Sanchez".to_string(),
            email: None,
            password: "hotrReu4@".to_string(),
            player_id: None,
        };
        let writer = users.insert(&make_user("Jose")).await.unwrap();
        let silent = users.insert(&make_user("Paula")).await.unwrap();
        Fixture {
            player_id: player.id,
            match_id: m.id,
            writer_id: writer.id,
            silent_id: silent.id,
        }
    }

    fn make_opinion(f: &Fixture, score: i64) -> Opinion {
        Opinion {
            id: UNSAVED_ID,
            match_id: f.match_id,
            player_id: f.player_id,
            user_id: f.writer_id,
            score,
            comment: "Great setter".to_string(),
        }
    }

    #[tokio::test]
    async fn test_roundtrip_and_score_bounds() {
        let db = Database::new_in_memory().await.unwrap();
        let f = setup(&db).await;
        let repo = SqliteOpinionRepository::new(db.pool().clone());

        let saved = repo.insert(&make_opinion(&f, 8)).await.unwrap();
        assert_eq!(repo.get(&saved.id).await.unwrap(), Some(saved));

        assert!(repo.insert(&make_opinion(&f, 11)).await.is_err());
    }

    #[tokio::test]
    async fn test_opinions_with_user_keeps_silent_users() {
        let db = Database::new_in_memory().await.unwrap();
        let f = setup(&db).await;
        let repo = SqliteOpinionRepository::new(db.pool().clone());
        repo.insert(&make_opinion(&f, 8)).await.unwrap();
        repo.insert(&make_opinion(&f, 6)).await.unwrap();

        let rows = repo.opinions_with_user().await.unwrap();
        assert_eq!(rows.len(), 3);

        let writer_rows: Vec<&UserOpinion> =
            rows.iter().filter(|r| r.user_id == f.writer_id).collect();
        assert_eq!(writer_rows.len(), 2);
        assert_eq!(writer_rows[0].score, Some(8));
        assert_eq!(writer_rows[0].player_id, Some(f.player_id));

        let silent = rows.iter().find(|r| r.user_id == f.silent_id).unwrap();
        assert_eq!(silent.user_name, "Paula");
        assert_eq!(silent.score, None);
        assert_eq!(silent.comment, None);
    }

    #[tokio::test]
    async fn test_delete_missing_is_no_rows() {
        let db = Database::new_in_memory().await.unwrap();
        let repo = SqliteOpinionRepository::new(db.pool().clone());
        assert!(matches!(
            repo.delete(&3).await,
            Err(PersistenceError::NoRowsAffected { entity: "opinion", .. })
        ));
    }
}
