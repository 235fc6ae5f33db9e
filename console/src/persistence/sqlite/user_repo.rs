//! SQLite-backed repository for application users.

use league::User;
use sqlx::SqlitePool;

use super::helpers::ensure_affected;
use crate::persistence::traits::{EmailLookup, Repository};
use crate::persistence::PersistenceError;

#[derive(sqlx::FromRow)]
struct UserRow {
    id: i64,
    name: String,
    surname: String,
    email: Option<String>,
    password: String,
    player_id: Option<i64>,
}

impl From<UserRow> for User {
    fn from(r: UserRow) -> Self {
        Self {
            id: r.id,
            name: r.name,
            surname: r.surname,
            email: r.email,
            password: r.password,
            player_id: r.player_id,
        }
    }
}

/// SQLite implementation of [`Repository`] for [`User`].
///
/// Email uniqueness is enforced by the `UNIQUE` column constraint;
/// [`EmailLookup::email_taken`] lets the console check it up front.
pub struct SqliteUserRepository {
    pool: SqlitePool,
}

impl SqliteUserRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

impl Repository for SqliteUserRepository {
    type Record = User;
    type Key = i64;

    async fn insert(&self, user: &User) -> Result<User, PersistenceError> {
        let mut tx = self.pool.begin().await?;

        let result = sqlx::query(
            "INSERT INTO users (name, surname, email, password, player_id) VALUES (?, ?, ?, ?, ?)",
        )
        .bind(&user.name)
        .bind(&user.surname)
        .bind(&user.email)
        .bind(&user.password)
        .bind(user.player_id)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(User {
            id: result.last_insert_rowid(),
            ..user.clone()
        })
    }

    async fn get(&self, id: &i64) -> Result<Option<User>, PersistenceError> {
        let row: Option<UserRow> = sqlx::query_as(
            "SELECT id, name, surname, email, password, player_id FROM users WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(User::from))
    }

    async fn list(&self) -> Result<Vec<User>, PersistenceError> {
        let rows: Vec<UserRow> = sqlx::query_as(
            "SELECT id, name, surname, email, password, player_id FROM users ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(User::from).collect())
    }

    async fn update(&self, user: &User) -> Result<(), PersistenceError> {
        let mut tx = self.pool.begin().await?;

        let result = sqlx::query(
            "UPDATE users SET name = ?, surname = ?, email = ?, password = ?, player_id = ? \
             WHERE id = ?",
        )
        .bind(&user.name)
        .bind(&user.surname)
        .bind(&user.email)
        .bind(&user.password)
        .bind(user.player_id)
        .bind(user.id)
        .execute(&mut *tx)
        .await?;

        ensure_affected(&result, "user", user.id)?;
        tx.commit().await?;
        Ok(())
    }

    async fn delete(&self, id: &i64) -> Result<(), PersistenceError> {
        let mut tx = self.pool.begin().await?;

        let result = sqlx::query("DELETE FROM users WHERE id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        ensure_affected(&result, "user", id)?;
        tx.commit().await?;
        Ok(())
    }
}

impl EmailLookup for SqliteUserRepository {
    async fn email_taken(
        &self,
        email: &str,
        except_user_id: Option<i64>,
    ) -> Result<bool, PersistenceError> {
        let row: Option<(i64,)> =
            sqlx::query_as("SELECT id FROM users WHERE email = ? AND id != ? LIMIT 1")
                .bind(email)
                .bind(except_user_id.unwrap_or(0))
                .fetch_optional(&self.pool)
                .await?;

        Ok(row.is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::sqlite::Database;
    use league::UNSAVED_ID;

    fn make_user(email: Option<&str>) -> User {
        User {
            id: UNSAVED_ID,
            name: "Diana".to_string(),
            surname: "Rodriguez".to_string(),
            email: email.map(str::to_string),
            password: "hgtrRed4@".to_string(),
            player_id: None,
        }
    }

    #[tokio::test]
    async fn test_insert_and_get_roundtrip() {
        let db = Database::new_in_memory().await.unwrap();
        let repo = SqliteUserRepository::new(db.pool().clone());

        let saved = repo.insert(&make_user(Some("diana@gmail.com"))).await.unwrap();
        assert_eq!(repo.get(&saved.id).await.unwrap(), Some(saved));
    }

    #[tokio::test]
    async fn test_duplicate_email_rejected_by_database() {
        let db = Database::new_in_memory().await.unwrap();
        let repo = SqliteUserRepository::new(db.pool().clone());

        repo.insert(&make_user(Some("diana@gmail.com"))).await.unwrap();
        let result = repo.insert(&make_user(Some("diana@gmail.com"))).await;
        assert!(matches!(result, Err(PersistenceError::Database(_))));
        assert_eq!(repo.list().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_users_without_email_do_not_collide() {
        let db = Database::new_in_memory().await.unwrap();
        let repo = SqliteUserRepository::new(db.pool().clone());

        repo.insert(&make_user(None)).await.unwrap();
        repo.insert(&make_user(None)).await.unwrap();
        assert_eq!(repo.list().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_email_taken_ignores_own_row() {
        let db = Database::new_in_memory().await.unwrap();
        let repo = SqliteUserRepository::new(db.pool().clone());

        let user = repo.insert(&make_user(Some("paulap@gmail.com"))).await.unwrap();

        assert!(repo.email_taken("paulap@gmail.com", None).await.unwrap());
        assert!(!repo.email_taken("paulap@gmail.com", Some(user.id)).await.unwrap());
        assert!(!repo.email_taken("other@gmail.com", None).await.unwrap());
    }

    #[tokio::test]
    async fn test_update_missing_rolls_back() {
        let db = Database::new_in_memory().await.unwrap();
        let repo = SqliteUserRepository::new(db.pool().clone());

        let mut user = make_user(Some("juanah@gmail.com"));
        user.id = 5;
        let result = repo.update(&user).await;
        assert!(matches!(result, Err(PersistenceError::NoRowsAffected { entity: "user", .. })));
        assert!(repo.list().await.unwrap().is_empty());
    }
}
