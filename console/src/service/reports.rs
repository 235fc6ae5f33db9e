//! Read-only reports reachable from the entity menus.

use std::io::{BufRead, Write};

use league::RankingRow;
use tracing::{error, info};

use super::{ConsoleError, Prompt};
use crate::persistence::{OpinionReports, PlayerReports, RankingReport};

pub async fn players_with_coach<R: BufRead, W: Write>(
    repo: &impl PlayerReports,
    prompt: &mut Prompt<R, W>,
) -> Result<(), ConsoleError> {
    match repo.players_with_coach().await {
        Ok(rows) if rows.is_empty() => prompt.say("No player has a coach yet.")?,
        Ok(rows) => {
            info!(count = rows.len(), "Listed players with coaches");
            prompt.say("--- Players and their coaches ---")?;
            for row in &rows {
                prompt.say(row)?;
            }
        }
        Err(e) => {
            error!(error = %e, "Players with coaches report failed");
            prompt.say(format!("Could not list the players with their coaches: {e}"))?;
        }
    }
    Ok(())
}

pub async fn opinions_with_user<R: BufRead, W: Write>(
    repo: &impl OpinionReports,
    prompt: &mut Prompt<R, W>,
) -> Result<(), ConsoleError> {
    match repo.opinions_with_user().await {
        Ok(rows) if rows.is_empty() => prompt.say("There are no users yet.")?,
        Ok(rows) => {
            info!(count = rows.len(), "Listed users with opinions");
            prompt.say("--- Users and their opinions ---")?;
            for row in &rows {
                prompt.say(row)?;
            }
        }
        Err(e) => {
            error!(error = %e, "Users with opinions report failed");
            prompt.say(format!("Could not list the users with their opinions: {e}"))?;
        }
    }
    Ok(())
}

pub async fn ranking<R: BufRead, W: Write>(
    repo: &impl RankingReport,
    prompt: &mut Prompt<R, W>,
) -> Result<(), ConsoleError> {
    match repo.ranking().await {
        Ok(rows) if rows.is_empty() => prompt.say("There are no players to rank yet.")?,
        Ok(rows) => {
            info!(count = rows.len(), "Computed player ranking");
            prompt.say("--- Player ranking ---")?;
            for line in ranking_table(&rows) {
                prompt.say(line)?;
            }
        }
        Err(e) => {
            error!(error = %e, "Ranking failed");
            prompt.say(format!("Could not compute the ranking: {e}"))?;
        }
    }
    Ok(())
}

fn ranking_table(rows: &[RankingRow]) -> Vec<String> {
    let mut lines = Vec::with_capacity(rows.len() + 1);
    lines.push(format!(
        "{:>4}  {:<15} {:<20} {:>6}  {:>4}",
        "ID", "Name", "Surname", "Points", "Rank"
    ));
    for row in rows {
        lines.push(format!(
            "{:>4}  {:<15} {:<20} {:>6}  {:>4}",
            row.player_id, row.name, row.surname, row.points, row.rank
        ));
    }
    lines
}
