//! Player ranking by accumulated match points.
//!
//! Every player appears in the ranking, including players without any
//! statistic rows (they score 0). Ranks are dense: tied players share a rank
//! and the next distinct score gets the following rank.

use std::collections::HashMap;

use crate::records::{Player, Statistic};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankingRow {
    pub player_id: i64,
    pub name: String,
    pub surname: String,
    pub points: i128,
    pub rank: u32,
}

/// Sum the points of every player and assign dense ranks.
///
/// Rows are ordered by rank, then by player id. Statistics that reference a
/// player missing from `players` are ignored.
pub fn compute_ranking(players: &[Player], statistics: &[Statistic]) -> Vec<RankingRow> {
    let mut totals: HashMap<i64, i128> = players.iter().map(|p| (p.id, 0)).collect();
    for stat in statistics {
        if let Some(total) = totals.get_mut(&stat.player_id) {
            *total += stat.points();
        }
    }

    let mut rows: Vec<RankingRow> = players
        .iter()
        .map(|p| RankingRow {
            player_id: p.id,
            name: p.name.clone(),
            surname: p.surname.clone(),
            points: totals.get(&p.id).copied().unwrap_or(0),
            rank: 0,
        })
        .collect();

    rows.sort_by(|a, b| b.points.cmp(&a.points).then(a.player_id.cmp(&b.player_id)));

    let mut rank = 0;
    let mut previous: Option<i128> = None;
    for row in &mut rows {
        if previous != Some(row.points) {
            rank += 1;
            previous = Some(row.points);
        }
        row.rank = rank;
    }

    rows
}
