//! SQLite-backed repository for users following players, keyed by
//! `(user_id, player_id, follow_date)`.

use league::{Follow, FollowKey, InteractionFrequency, Variants};
use sqlx::SqlitePool;
use time::Date;

use super::helpers::{decode_variant, ensure_affected};
use crate::persistence::traits::Repository;
use crate::persistence::PersistenceError;

#[derive(sqlx::FromRow)]
struct FollowRow {
    user_id: i64,
    player_id: i64,
    follow_date: Date,
    frequency: String,
    notes: String,
}

impl TryFrom<FollowRow> for Follow {
    type Error = PersistenceError;

    fn try_from(r: FollowRow) -> Result<Self, Self::Error> {
        Ok(Self {
            user_id: r.user_id,
            player_id: r.player_id,
            follow_date: r.follow_date,
            frequency: decode_variant::<InteractionFrequency>("frequency", &r.frequency)?,
            notes: r.notes,
        })
    }
}

pub struct SqliteFollowRepository {
    pool: SqlitePool,
}

impl SqliteFollowRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

impl Repository for SqliteFollowRepository {
    type Record = Follow;
    type Key = FollowKey;

    async fn insert(&self, follow: &Follow) -> Result<Follow, PersistenceError> {
        let mut tx = self.pool.begin().await?;

        sqlx::query(
            "INSERT INTO follows (user_id, player_id, follow_date, frequency, notes) \
             VALUES (?, ?, ?, ?, ?)",
        )
        .bind(follow.user_id)
        .bind(follow.player_id)
        .bind(follow.follow_date)
        .bind(follow.frequency.as_str())
        .bind(&follow.notes)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(follow.clone())
    }

    async fn get(&self, key: &FollowKey) -> Result<Option<Follow>, PersistenceError> {
        let row: Option<FollowRow> = sqlx::query_as(
            "SELECT user_id, player_id, follow_date, frequency, notes FROM follows \
             WHERE user_id = ? AND player_id = ? AND follow_date = ?",
        )
        .bind(key.user_id)
        .bind(key.player_id)
        .bind(key.follow_date)
        .fetch_optional(&self.pool)
        .await?;

        row.map(Follow::try_from).transpose()
    }

    async fn list(&self) -> Result<Vec<Follow>, PersistenceError> {
        let rows: Vec<FollowRow> = sqlx::query_as(
            "SELECT user_id, player_id, follow_date, frequency, notes FROM follows \
             ORDER BY user_id, player_id, follow_date",
        )
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(Follow::try_from).collect()
    }

    async fn update(&self, follow: &Follow) -> Result<(), PersistenceError> {
        let mut tx = self.pool.begin().await?;

        let result = sqlx::query(
            "UPDATE follows SET frequency = ?, notes = ? \
             WHERE user_id = ? AND player_id = ? AND follow_date = ?",
        )
        .bind(follow.frequency.as_str())
        .bind(&follow.notes)
        .bind(follow.user_id)
        .bind(follow.player_id)
        .bind(follow.follow_date)
        .execute(&mut *tx)
        .await?;

        ensure_affected(&result, "follow", follow.key())?;
        tx.commit().await?;
        Ok(())
    }

    async fn delete(&self, key: &FollowKey) -> Result<(), PersistenceError> {
        let mut tx = self.pool.begin().await?;

        let result = sqlx::query(
            "DELETE FROM follows WHERE user_id = ? AND player_id = ? AND follow_date = ?",
        )
        .bind(key.user_id)
        .bind(key.player_id)
        .bind(key.follow_date)
        .execute(&mut *tx)
        .await?;

        ensure_affected(&result, "follow", key)?;
        tx.commit().await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::sqlite::{Database, SqlitePlayerRepository, SqliteUserRepository};
    use league::{Player, Position, User, UNSAVED_ID};
    use time::macros::date;

    async fn setup(db: &Database) -> (i64, i64) {
        let player = SqlitePlayerRepository::new(db.pool().clone())
            .insert(&Player {
                id: UNSAVED_ID,
                name: "Daiana".to_string(),
                surname: "Leyba".to_string(),
                position: Position::Middle,
                nationality: Some("Mexican".to_string()),
                age: 21,
                jersey: 2,
                team_name: "Team E".to_string(),
                coach_id: None,
            })
            .await
            .unwrap();
        let user = SqliteUserRepository::new(db.pool().clone())
            .insert(&User {
                id: UNSAVED_ID,
                name: "Valentina".to_string(),
                surname: "Garcia".to_string(),
                email: Some("valentinag@gmail.com".to_string()),
                password: "wgteRed6@".to_string(),
                player_id: Some(player.id),
            })
            .await
            .unwrap();
        (user.id, player.id)
    }

    fn make_follow(user_id: i64, player_id: i64, follow_date: Date) -> Follow {
        Follow {
            user_id,
            player_id,
            follow_date,
            frequency: InteractionFrequency::Weekly,
            notes: String::new(),
        }
    }

    #[tokio::test]
    async fn test_date_is_part_of_the_key() {
        let db = Database::new_in_memory().await.unwrap();
        let (user_id, player_id) = setup(&db).await;
        let repo = SqliteFollowRepository::new(db.pool().clone());

        let first = repo
            .insert(&make_follow(user_id, player_id, date!(2022 - 08 - 25)))
            .await
            .unwrap();
        let second = repo
            .insert(&make_follow(user_id, player_id, date!(2023 - 12 - 01)))
            .await
            .unwrap();

        assert_eq!(repo.list().await.unwrap(), vec![first.clone(), second]);
        assert_eq!(repo.get(&first.key()).await.unwrap(), Some(first));
    }

    #[tokio::test]
    async fn test_update_and_delete_by_key() {
        let db = Database::new_in_memory().await.unwrap();
        let (user_id, player_id) = setup(&db).await;
        let repo = SqliteFollowRepository::new(db.pool().clone());

        let mut follow = repo
            .insert(&make_follow(user_id, player_id, date!(2024 - 02 - 11)))
            .await
            .unwrap();
        follow.frequency = InteractionFrequency::Yearly;
        follow.notes = "Season tickets".to_string();
        repo.update(&follow).await.unwrap();
        assert_eq!(repo.get(&follow.key()).await.unwrap(), Some(follow.clone()));

        repo.delete(&follow.key()).await.unwrap();
        assert!(repo.get(&follow.key()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_update_unknown_date_is_no_rows() {
        let db = Database::new_in_memory().await.unwrap();
        let (user_id, player_id) = setup(&db).await;
        let repo = SqliteFollowRepository::new(db.pool().clone());

        repo.insert(&make_follow(user_id, player_id, date!(2021 - 04 - 10)))
            .await
            .unwrap();
        let other_day = make_follow(user_id, player_id, date!(2021 - 04 - 11));
        let result = repo.update(&other_day).await;
        assert!(matches!(result, Err(PersistenceError::NoRowsAffected { entity: "follow", .. })));
    }
}
