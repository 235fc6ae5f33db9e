//! SQLite-backed repository for players.

use league::{Player, PlayerWithCoach, Position, Variants};
use sqlx::SqlitePool;

use super::helpers::{decode_variant, ensure_affected};
use crate::persistence::traits::{PlayerReports, Repository};
use crate::persistence::PersistenceError;

const SELECT_PLAYER: &str = "SELECT id, name, surname, position, nationality, age, jersey, \
                             team_name, coach_id FROM players";

#[derive(sqlx::FromRow)]
struct PlayerRow {
    id: i64,
    name: String,
    surname: String,
    position: String,
    nationality: Option<String>,
    age: i64,
    jersey: i64,
    team_name: String,
    coach_id: Option<i64>,
}

impl TryFrom<PlayerRow> for Player {
    type Error = PersistenceError;

    fn try_from(r: PlayerRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: r.id,
            name: r.name,
            surname: r.surname,
            position: decode_variant::<Position>("position", &r.position)?,
            nationality: r.nationality,
            age: r.age,
            jersey: r.jersey,
            team_name: r.team_name,
            coach_id: r.coach_id,
        })
    }
}

#[derive(sqlx::FromRow)]
struct PlayerWithCoachRow {
    player_id: i64,
    player_name: String,
    coach_id: i64,
    coach_name: String,
    coach_surname: String,
    team_name: String,
}

/// SQLite implementation of [`Repository`] for [`Player`].
pub struct SqlitePlayerRepository {
    pool: SqlitePool,
}

impl SqlitePlayerRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

impl Repository for SqlitePlayerRepository {
    type Record = Player;
    type Key = i64;

    async fn insert(&self, player: &Player) -> Result<Player, PersistenceError> {
        let mut tx = self.pool.begin().await?;

        let result = sqlx::query(
            r#"
            INSERT INTO players
                (name, surname, position, nationality, age, jersey, team_name, coach_id)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&player.name)
        .bind(&player.surname)
        .bind(player.position.as_str())
        .bind(&player.nationality)
        .bind(player.age)
        .bind(player.jersey)
        .bind(&player.team_name)
        .bind(player.coach_id)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(Player {
            id: result.last_insert_rowid(),
            ..player.clone()
        })
    }

    async fn get(&self, id: &i64) -> Result<Option<Player>, PersistenceError> {
        let row: Option<PlayerRow> = sqlx::query_as(&format!("{SELECT_PLAYER} WHERE id = ?"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        row.map(Player::try_from).transpose()
    }

    async fn list(&self) -> Result<Vec<Player>, PersistenceError> {
        let rows: Vec<PlayerRow> = sqlx::query_as(&format!("{SELECT_PLAYER} ORDER BY id"))
            .fetch_all(&self.pool)
            .await?;

        rows.into_iter().map(Player::try_from).collect()
    }

    async fn update(&self, player: &Player) -> Result<(), PersistenceError> {
        let mut tx = self.pool.begin().await?;

        let result = sqlx::query(
            r#"
            UPDATE players
            SET name = ?, surname = ?, position = ?, nationality = ?, age = ?,
                jersey = ?, team_name = ?, coach_id = ?
            WHERE id = ?
            "#,
        )
        .bind(&player.name)
        .bind(&player.surname)
        .bind(player.position.as_str())
        .bind(&player.nationality)
        .bind(player.age)
        .bind(player.jersey)
        .bind(&player.team_name)
        .bind(player.coach_id)
        .bind(player.id)
        .execute(&mut *tx)
        .await?;

        ensure_affected(&result, "player", player.id)?;
        tx.commit().await?;
        Ok(())
    }

    async fn delete(&self, id: &i64) -> Result<(), PersistenceError> {
        let mut tx = self.pool.begin().await?;

        let result = sqlx::query("DELETE FROM players WHERE id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        ensure_affected(&result, "player", id)?;
        tx.commit().await?;
        Ok(())
    }
}

impl PlayerReports for SqlitePlayerRepository {
    async fn players_with_coach(&self) -> Result<Vec<PlayerWithCoach>, PersistenceError> {
        let rows: Vec<PlayerWithCoachRow> = sqlx::query_as(
            r#"
            SELECT p.id AS player_id, p.name AS player_name, c.id AS coach_id,
                   c.name AS coach_name, c.surname AS coach_surname, p.team_name
            FROM players p
            INNER JOIN coaches c ON p.coach_id = c.id
            ORDER BY p.id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|r| PlayerWithCoach {
                player_id: r.player_id,
                player_name: r.player_name,
                coach_id: r.coach_id,
                coach_name: r.coach_name,
                coach_surname: r.coach_surname,
                team_name: r.team_name,
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::sqlite::{Database, SqliteCoachRepository};
    use league::{Coach, UNSAVED_ID};

    fn make_player(name: &str, coach_id: Option<i64>) -> Player {
        Player {
            id: UNSAVED_ID,
            name: name.to_string(),
            surname: "Castillo".to_string(),
            position: Position::Libero,
            nationality: None,
            age: 38,
            jersey: 5,
            team_name: "Team A".to_string(),
            coach_id,
        }
    }

    async fn insert_coach(db: &Database) -> Coach {
        SqliteCoachRepository::new(db.pool().clone())
            .insert(&Coach {
                id: UNSAVED_ID,
                name: "Mario".to_string(),
                surname: "Martinez".to_string(),
                nationality: Some("Cuban".to_string()),
                experience_years: 2,
            })
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_insert_and_get_roundtrip() {
        let db = Database::new_in_memory().await.unwrap();
        let coach = insert_coach(&db).await;
        let repo = SqlitePlayerRepository::new(db.pool().clone());

        let saved = repo.insert(&make_player("Brenda", Some(coach.id))).await.unwrap();
        let loaded = repo.get(&saved.id).await.unwrap().unwrap();
        assert_eq!(loaded, saved);
        assert_eq!(loaded.position, Position::Libero);
    }

    #[tokio::test]
    async fn test_unknown_coach_is_rejected() {
        let db = Database::new_in_memory().await.unwrap();
        let repo = SqlitePlayerRepository::new(db.pool().clone());

        let result = repo.insert(&make_player("Brenda", Some(9))).await;
        assert!(matches!(result, Err(PersistenceError::Database(_))));
    }

    #[tokio::test]
    async fn test_players_with_coach_skips_unassigned() {
        let db = Database::new_in_memory().await.unwrap();
        let coach = insert_coach(&db).await;
        let repo = SqlitePlayerRepository::new(db.pool().clone());

        let coached = repo.insert(&make_player("Melisa", Some(coach.id))).await.unwrap();
        repo.insert(&make_player("Lara", None)).await.unwrap();

        let rows = repo.players_with_coach().await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].player_id, coached.id);
        assert_eq!(rows[0].player_name, "Melisa");
        assert_eq!(rows[0].coach_name, "Mario");
        assert_eq!(rows[0].coach_surname, "Martinez");
        assert_eq!(rows[0].team_name, "Team A");
    }

    #[tokio::test]
    async fn test_update_and_delete() {
        let db = Database::new_in_memory().await.unwrap();
        let repo = SqlitePlayerRepository::new(db.pool().clone());

        let mut player = repo.insert(&make_player("Daiana", None)).await.unwrap();
        player.position = Position::Middle;
        player.jersey = 2;
        repo.update(&player).await.unwrap();
        assert_eq!(repo.get(&player.id).await.unwrap(), Some(player.clone()));

        repo.delete(&player.id).await.unwrap();
        assert!(repo.get(&player.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_delete_coach_with_players_is_rejected() {
        let db = Database::new_in_memory().await.unwrap();
        let coach = insert_coach(&db).await;
        let repo = SqlitePlayerRepository::new(db.pool().clone());
        repo.insert(&make_player("Brenda", Some(coach.id))).await.unwrap();

        let coaches = SqliteCoachRepository::new(db.pool().clone());
        let result = coaches.delete(&coach.id).await;
        assert!(matches!(result, Err(PersistenceError::Database(_))));
        assert!(coaches.get(&coach.id).await.unwrap().is_some());
    }
}
