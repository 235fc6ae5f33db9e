//! Demonstration rows inserted into empty tables on startup.
//!
//! Tables are visited in foreign-key order so every reference in a seed row
//! points at a row seeded before it. Ids are generated, so on a fresh
//! database the seeded coaches, players, matches and users get ids 1 to 5.

use league::{
    Coach, Follow, InteractionFrequency, Match, Opinion, Participation, Player, PlayerStatus,
    Position, Statistic, User, UNSAVED_ID,
};
use sqlx::SqlitePool;
use time::macros::date;

use super::{
    Database, SqliteCoachRepository, SqliteFollowRepository, SqliteMatchRepository,
    SqliteOpinionRepository, SqliteParticipationRepository, SqlitePlayerRepository,
    SqliteStatisticRepository, SqliteUserRepository,
};
use crate::persistence::traits::Repository;
use crate::persistence::PersistenceError;

/// Seed every empty table and return how many rows were inserted.
///
/// A table that fails to seed is logged and skipped; later tables are still
/// attempted.
pub async fn seed_if_empty(db: &Database) -> usize {
    let pool = db.pool().clone();
    let mut inserted = 0;

    inserted += seed_table(&pool, "coaches", SqliteCoachRepository::new(pool.clone()), coaches()).await;
    inserted += seed_table(&pool, "players", SqlitePlayerRepository::new(pool.clone()), players()).await;
    inserted += seed_table(&pool, "matches", SqliteMatchRepository::new(pool.clone()), matches()).await;
    inserted += seed_table(
        &pool,
        "statistics",
        SqliteStatisticRepository::new(pool.clone()),
        statistics(),
    )
    .await;
    inserted += seed_table(&pool, "users", SqliteUserRepository::new(pool.clone()), users()).await;
    inserted += seed_table(&pool, "opinions", SqliteOpinionRepository::new(pool.clone()), opinions()).await;
    inserted += seed_table(
        &pool,
        "participations",
        SqliteParticipationRepository::new(pool.clone()),
        participations(),
    )
    .await;
    inserted += seed_table(&pool, "follows", SqliteFollowRepository::new(pool.clone()), follows()).await;

    inserted
}

async fn seed_table<R: Repository>(
    pool: &SqlitePool,
    table: &'static str,
    repo: R,
    rows: Vec<R::Record>,
) -> usize {
    match try_seed_table(pool, table, &repo, &rows).await {
        Ok(0) => {
            tracing::debug!(table, "Table already has data, skipping seed");
            0
        }
        Ok(count) => {
            tracing::info!(table, rows = count, "Seeded table");
            count
        }
        Err(e) => {
            tracing::error!(table, error = %e, "Failed to seed table");
            0
        }
    }
}

async fn try_seed_table<R: Repository>(
    pool: &SqlitePool,
    table: &'static str,
    repo: &R,
    rows: &[R::Record],
) -> Result<usize, PersistenceError> {
    let (existing,): (i64,) = sqlx::query_as(&format!("SELECT COUNT(*) FROM {table}"))
        .fetch_one(pool)
        .await?;
    if existing > 0 {
        return Ok(0);
    }

    for row in rows {
        repo.insert(row).await?;
    }
    Ok(rows.len())
}

fn coaches() -> Vec<Coach> {
    let coach = |name: &str, surname: &str, nationality: Option<&str>, experience_years| Coach {
        id: UNSAVED_ID,
        name: name.to_string(),
        surname: surname.to_string(),
        nationality: nationality.map(str::to_string),
        experience_years,
    };
    vec![
        coach("Mario", "Martinez", Some("Cuban"), 2),
        coach("Juan", "Lopez", Some("Spanish"), 5),
        coach("Rosa", "Rodriguez Ruiz", None, 8),
        coach("Carmen", "Moreno", Some("Mexican"), 3),
        coach("Roberto", "Fernandez", None, 6),
    ]
}

fn players() -> Vec<Player> {
    #[allow(clippy::too_many_arguments)]
    fn player(
        name: &str,
        surname: &str,
        position: Position,
        nationality: &str,
        age: i64,
        jersey: i64,
        team_name: &str,
        coach_id: i64,
    ) -> Player {
        Player {
            id: UNSAVED_ID,
            name: name.to_string(),
            surname: surname.to_string(),
            position,
            nationality: Some(nationality.to_string()),
            age,
            jersey,
            team_name: team_name.to_string(),
            coach_id: Some(coach_id),
        }
    }
    vec![
        player("Brenda", "Castillo", Position::Libero, "Dominican", 38, 5, "Team A", 2),
        player("Brayelin", "Martinez", Position::Hitter, "Cuban", 25, 14, "Team B", 5),
        player("Melisa", "Vargas", Position::Opposite, "Italian", 29, 45, "Team C", 1),
        player("Lara", "Morgan", Position::Setter, "American", 24, 58, "Team D", 3),
        player("Daiana", "Leyba", Position::Middle, "Mexican", 21, 2, "Team E", 4),
    ]
}

fn matches() -> Vec<Match> {
    let game = |date, team1: &str, coach1: i64, team2: &str, coach2: i64, result: &str, minutes| {
        Match {
            id: UNSAVED_ID,
            date,
            team1: team1.to_string(),
            coach1_id: Some(coach1),
            team2: team2.to_string(),
            coach2_id: Some(coach2),
            result: result.to_string(),
            duration_minutes: minutes,
        }
    };
    vec![
        game(date!(2021 - 05 - 18), "Team E", 1, "Team B", 3, "Team B won the match", 156),
        game(date!(2020 - 08 - 24), "Team A", 4, "Team D", 2, "Team D won the match", 172),
        game(date!(2023 - 02 - 04), "Team C", 5, "Team B", 3, "Team C won the match", 142),
        game(date!(2024 - 03 - 15), "Team A", 4, "Team C", 5, "Team A won the match", 158),
        game(date!(2022 - 07 - 21), "Team D", 2, "Team E", 1, "Team E won the match", 184),
    ]
}

fn statistics() -> Vec<Statistic> {
    [
        (2, 3, 7, 2, 5, 4, 2),
        (4, 2, 14, 5, 3, 2, 3),
        (1, 4, 9, 8, 12, 1, 1),
        (3, 5, 4, 10, 4, 9, 4),
        (5, 1, 6, 4, 3, 9, 2),
    ]
    .into_iter()
    .map(
        |(player_id, match_id, attacks, serves, blocks, digs, errors)| Statistic {
            id: UNSAVED_ID,
            player_id,
            match_id,
            attacks,
            serves,
            blocks,
            digs,
            errors,
        },
    )
    .collect()
}

fn users() -> Vec<User> {
    let user = |name: &str, surname: &str, email: &str, password: &str, player_id| User {
        id: UNSAVED_ID,
        name: name.to_string(),
        surname: surname.to_string(),
        email: Some(email.to_string()),
        password: password.to_string(),
        player_id: Some(player_id),
    };
    vec![
        user("Diana", "Rodriguez", "diana@gmail.com", "hgtrRed4@", 2),
        user("Jose", "Sanchez", "josesanch@gmail.com", "hotrReu4@", 5),
        user("Paula", "Perez", "paulap@gmail.com", "eytrRed4@", 3),
        user("Valentina", "Garcia", "valentinag@gmail.com", "wgteRed6@", 1),
        user("Juana", "Hernandez", "juanah@gmail.com", "tgtrReu4@", 4),
    ]
}

fn opinions() -> Vec<Opinion> {
    [
        (3, 4, 2, 8, "Precise sets all match long"),
        (1, 3, 3, 7, "Strong attacks from the right side"),
        (5, 1, 4, 3, "Too many reception errors"),
        (2, 2, 5, 10, "Outstanding performance"),
        (4, 5, 1, 7, "Solid blocking at the net"),
    ]
    .into_iter()
    .map(|(match_id, player_id, user_id, score, comment)| Opinion {
        id: UNSAVED_ID,
        match_id,
        player_id,
        user_id,
        score,
        comment: comment.to_string(),
    })
    .collect()
}

fn participations() -> Vec<Participation> {
    [
        (3, 1, 15, 32, PlayerStatus::Active),
        (1, 4, 1, 145, PlayerStatus::Starter),
        (2, 5, 35, 40, PlayerStatus::Substituted),
        (4, 2, 10, 25, PlayerStatus::Expelled),
        (5, 3, 2, 48, PlayerStatus::Reserve),
    ]
    .into_iter()
    .map(
        |(player_id, match_id, entry_minute, exit_minute, status)| Participation {
            player_id,
            match_id,
            entry_minute,
            exit_minute,
            status,
        },
    )
    .collect()
}

fn follows() -> Vec<Follow> {
    [
        (3, 4, date!(2022 - 08 - 25), InteractionFrequency::Weekly, "Never misses a match"),
        (1, 5, date!(2021 - 04 - 10), InteractionFrequency::Monthly, "Follows the national team"),
        (5, 1, date!(2022 - 10 - 10), InteractionFrequency::Daily, "Biggest fan"),
        (4, 2, date!(2024 - 02 - 11), InteractionFrequency::Yearly, ""),
        (2, 3, date!(2023 - 12 - 01), InteractionFrequency::Weekly, "Watches every final"),
    ]
    .into_iter()
    .map(|(user_id, player_id, follow_date, frequency, notes)| Follow {
        user_id,
        player_id,
        follow_date,
        frequency,
        notes: notes.to_string(),
    })
    .collect()
}
