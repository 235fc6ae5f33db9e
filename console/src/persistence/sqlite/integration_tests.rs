use league::{Match, Player, Position, Statistic, UNSAVED_ID};
use time::macros::date;

use super::{
    seed_if_empty, Database, SqliteCoachRepository, SqliteMatchRepository, SqlitePlayerRepository,
    SqliteStatisticRepository, SqliteUserRepository,
};
use crate::persistence::traits::{OpinionReports, PlayerReports, RankingReport, Repository};
use crate::persistence::PersistenceError;

async fn seeded() -> Database {
    let db = Database::new_in_memory().await.unwrap();
    assert_eq!(seed_if_empty(&db).await, 40);
    db
}

fn ana_lopez() -> Player {
    Player {
        id: UNSAVED_ID,
        name: "Ana".to_string(),
        surname: "Lopez".to_string(),
        position: Position::Libero,
        nationality: None,
        age: 24,
        jersey: 7,
        team_name: "Team X".to_string(),
        coach_id: Some(1),
    }
}

#[tokio::test]
async fn test_seeded_ranking_matches_manual_sums() {
    let db = seeded().await;
    let ranking = SqliteStatisticRepository::new(db.pool().clone())
        .ranking()
        .await
        .unwrap();

    // blocks + serves + attacks + digs - errors per seeded statistic row
    let expected = [(1, 29), (2, 16), (3, 23), (4, 21), (5, 20)];
    for (player_id, points) in expected {
        let row = ranking.iter().find(|r| r.player_id == player_id).unwrap();
        assert_eq!(row.points, points, "player {player_id}");
    }

    let order: Vec<(i64, u32)> = ranking.iter().map(|r| (r.player_id, r.rank)).collect();
    assert_eq!(order, vec![(1, 1), (3, 2), (4, 3), (5, 4), (2, 5)]);
}

#[tokio::test]
async fn test_end_to_end_new_player_ranking() {
    let db = seeded().await;
    let players = SqlitePlayerRepository::new(db.pool().clone());
    let stats = SqliteStatisticRepository::new(db.pool().clone());

    let ana = players.insert(&ana_lopez()).await.unwrap();
    assert_eq!(players.get(&ana.id).await.unwrap(), Some(ana.clone()));

    let lines = [
        (1, 5, 2, 1, 3, 1),
        (2, 4, 1, 0, 6, 2),
        (3, 3, 3, 2, 2, 0),
        (4, 6, 0, 1, 4, 1),
        (5, 2, 2, 2, 5, 3),
    ];
    let mut manual: i128 = 0;
    for (match_id, attacks, serves, blocks, digs, errors) in lines {
        manual += i128::from(blocks + serves + attacks + digs - errors);
        stats
            .insert(&Statistic {
                id: UNSAVED_ID,
                player_id: ana.id,
                match_id,
                attacks,
                serves,
                blocks,
                digs,
                errors,
            })
            .await
            .unwrap();
    }
    assert_eq!(manual, 47);

    let ranking = stats.ranking().await.unwrap();
    assert_eq!(ranking.len(), 6);
    let ana_row = ranking.iter().find(|r| r.player_id == ana.id).unwrap();
    assert_eq!(ana_row.points, manual);
    assert_eq!(ana_row.name, "Ana");
    assert_eq!(ana_row.surname, "Lopez");
    assert_eq!(ana_row.rank, 1);

    let ranks: Vec<u32> = ranking.iter().map(|r| r.rank).collect();
    assert_eq!(ranks, vec![1, 2, 3, 4, 5, 6]);
}

#[tokio::test]
async fn test_ties_share_a_rank_after_update() {
    let db = seeded().await;
    let stats = SqliteStatisticRepository::new(db.pool().clone());

    // Player 5's only row is statistic 5; lift it to player 4's total of 21.
    let mut row = stats.get(&5).await.unwrap().unwrap();
    assert_eq!(row.player_id, 5);
    row.digs += 1;
    stats.update(&row).await.unwrap();

    let ranking = stats.ranking().await.unwrap();
    let rank_of = |id: i64| ranking.iter().find(|r| r.player_id == id).unwrap().rank;
    assert_eq!(rank_of(4), rank_of(5));
    assert_eq!(rank_of(4), 3);
    assert_eq!(rank_of(2), 4);
}

#[tokio::test]
async fn test_joined_reads_over_seed_data() {
    let db = seeded().await;

    let with_coach = SqlitePlayerRepository::new(db.pool().clone())
        .players_with_coach()
        .await
        .unwrap();
    assert_eq!(with_coach.len(), 5);
    let brenda = with_coach.iter().find(|r| r.player_name == "Brenda").unwrap();
    assert_eq!(brenda.coach_name, "Juan");
    assert_eq!(brenda.coach_surname, "Lopez");

    let opinions = super::SqliteOpinionRepository::new(db.pool().clone())
        .opinions_with_user()
        .await
        .unwrap();
    assert_eq!(opinions.len(), 5);
    assert!(opinions.iter().all(|o| o.score.is_some()));
}

#[tokio::test]
async fn test_referenced_rows_cannot_be_deleted() {
    let db = seeded().await;

    let players = SqlitePlayerRepository::new(db.pool().clone());
    let result = players.delete(&1).await;
    assert!(matches!(result, Err(PersistenceError::Database(_))));
    assert!(players.get(&1).await.unwrap().is_some());

    let coaches = SqliteCoachRepository::new(db.pool().clone());
    assert!(coaches.delete(&1).await.is_err());
    assert_eq!(coaches.list().await.unwrap().len(), 5);
}

#[tokio::test]
async fn test_user_without_opinions_listed_once() {
    let db = seeded().await;
    let users = SqliteUserRepository::new(db.pool().clone());
    let newcomer = users
        .insert(&league::User {
            id: UNSAVED_ID,
            name: "Nuria".to_string(),
            surname: "Blanco".to_string(),
            email: None,
            password: "Secret1@pass".to_string(),
            player_id: None,
        })
        .await
        .unwrap();

    let rows = super::SqliteOpinionRepository::new(db.pool().clone())
        .opinions_with_user()
        .await
        .unwrap();
    let mine: Vec<_> = rows.iter().filter(|r| r.user_id == newcomer.id).collect();
    assert_eq!(mine.len(), 1);
    assert_eq!(mine[0].score, None);
}

#[tokio::test]
async fn test_match_update_keeps_other_rows() {
    let db = seeded().await;
    let matches = SqliteMatchRepository::new(db.pool().clone());

    let mut m: Match = matches.get(&3).await.unwrap().unwrap();
    m.date = date!(2023 - 02 - 05);
    m.coach2_id = None;
    matches.update(&m).await.unwrap();

    assert_eq!(matches.get(&3).await.unwrap(), Some(m));
    assert_eq!(matches.list().await.unwrap().len(), 5);
}
