//! Entity records for the league database.
//!
//! Records with a surrogate key carry `id == 0` until they have been
//! persisted; the repository returns the stored copy with the generated id.
//! Participation and follow records are keyed by the ids the caller supplies.

use std::fmt;

use time::Date;

use crate::types::{InteractionFrequency, PlayerStatus, Position};
use crate::validation::DATE_FORMAT;

/// Id value of a record that has not been stored yet.
pub const UNSAVED_ID: i64 = 0;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Coach {
    pub id: i64,
    pub name: String,
    pub surname: String,
    pub nationality: Option<String>,
    pub experience_years: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Player {
    pub id: i64,
    pub name: String,
    pub surname: String,
    pub position: Position,
    pub nationality: Option<String>,
    pub age: i64,
    pub jersey: i64,
    pub team_name: String,
    pub coach_id: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Match {
    pub id: i64,
    pub date: Date,
    pub team1: String,
    pub coach1_id: Option<i64>,
    pub team2: String,
    pub coach2_id: Option<i64>,
    pub result: String,
    pub duration_minutes: i64,
}

/// Per-match performance counters of one player.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Statistic {
    pub id: i64,
    pub player_id: i64,
    pub match_id: i64,
    pub attacks: i64,
    pub serves: i64,
    pub blocks: i64,
    pub digs: i64,
    pub errors: i64,
}

impl Statistic {
    /// Ranking contribution of this row, widened so no counter values overflow.
    pub fn points(&self) -> i128 {
        i128::from(self.blocks) + i128::from(self.serves) + i128::from(self.attacks)
            + i128::from(self.digs)
            - i128::from(self.errors)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub surname: String,
    pub email: Option<String>,
    pub password: String,
    pub player_id: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Opinion {
    pub id: i64,
    pub match_id: i64,
    pub player_id: i64,
    pub user_id: i64,
    pub score: i64,
    pub comment: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ParticipationKey {
    pub player_id: i64,
    pub match_id: i64,
}

/// A player's appearance in a match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Participation {
    pub player_id: i64,
    pub match_id: i64,
    pub entry_minute: i64,
    pub exit_minute: i64,
    pub status: PlayerStatus,
}

impl Participation {
    pub fn key(&self) -> ParticipationKey {
        ParticipationKey {
            player_id: self.player_id,
            match_id: self.match_id,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FollowKey {
    pub user_id: i64,
    pub player_id: i64,
    pub follow_date: Date,
}

/// A user following a player from a given date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Follow {
    pub user_id: i64,
    pub player_id: i64,
    pub follow_date: Date,
    pub frequency: InteractionFrequency,
    pub notes: String,
}

impl Follow {
    pub fn key(&self) -> FollowKey {
        FollowKey {
            user_id: self.user_id,
            player_id: self.player_id,
            follow_date: self.follow_date,
        }
    }
}

/// A player joined with the coach assigned to them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerWithCoach {
    pub player_id: i64,
    pub player_name: String,
    pub coach_id: i64,
    pub coach_name: String,
    pub coach_surname: String,
    pub team_name: String,
}

/// A user together with one of their opinions, if they wrote any.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserOpinion {
    pub user_id: i64,
    pub user_name: String,
    pub user_surname: String,
    pub player_id: Option<i64>,
    pub score: Option<i64>,
    pub comment: Option<String>,
}

fn or_dash<T: fmt::Display>(value: &Option<T>) -> String {
    match value {
        Some(v) => v.to_string(),
        None => "-".to_string(),
    }
}

fn format_date(date: Date) -> Result<String, fmt::Error> {
    date.format(DATE_FORMAT).map_err(|_| fmt::Error)
}

impl fmt::Display for Coach {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Coach #{}: {} {} | nationality: {} | experience: {} years",
            self.id,
            self.name,
            self.surname,
            or_dash(&self.nationality),
            self.experience_years
        )
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Player #{}: {} {} | {} | nationality: {} | age: {} | jersey: {} | team: {} | coach: {}",
            self.id,
            self.name,
            self.surname,
            self.position,
            or_dash(&self.nationality),
            self.age,
            self.jersey,
            self.team_name,
            or_dash(&self.coach_id)
        )
    }
}

impl fmt::Display for Match {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Match #{} on {}: {} (coach {}) vs {} (coach {}) | {} | {} min",
            self.id,
            format_date(self.date)?,
            self.team1,
            or_dash(&self.coach1_id),
            self.team2,
            or_dash(&self.coach2_id),
            self.result,
            self.duration_minutes
        )
    }
}

impl fmt::Display for Statistic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Statistic #{}: player {} in match {} | attacks: {} serves: {} blocks: {} digs: {} errors: {}",
            self.id,
            self.player_id,
            self.match_id,
            self.attacks,
            self.serves,
            self.blocks,
            self.digs,
            self.errors
        )
    }
}

impl fmt::Display for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // The password is never echoed back.
        write!(
            f,
            "User #{}: {} {} | email: {} | favourite player: {}",
            self.id,
            self.name,
            self.surname,
            or_dash(&self.email),
            or_dash(&self.player_id)
        )
    }
}

impl fmt::Display for Opinion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Opinion #{}: user {} on player {} in match {} | score: {} | {}",
            self.id, self.user_id, self.player_id, self.match_id, self.score, self.comment
        )
    }
}

impl fmt::Display for ParticipationKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "player {} / match {}", self.player_id, self.match_id)
    }
}

impl fmt::Display for Participation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Participation of player {} in match {}: minute {} to {} | {}",
            self.player_id, self.match_id, self.entry_minute, self.exit_minute, self.status
        )
    }
}

impl fmt::Display for FollowKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "user {} / player {} / {}",
            self.user_id,
            self.player_id,
            format_date(self.follow_date)?
        )
    }
}

impl fmt::Display for Follow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "User {} follows player {} since {} | {} | {}",
            self.user_id,
            self.player_id,
            format_date(self.follow_date)?,
            self.frequency,
            self.notes
        )
    }
}

impl fmt::Display for PlayerWithCoach {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Player #{} {} | team: {} | coach #{} {} {}",
            self.player_id,
            self.player_name,
            self.team_name,
            self.coach_id,
            self.coach_name,
            self.coach_surname
        )
    }
}

impl fmt::Display for UserOpinion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "User #{} {} {} | player: {} | score: {} | {}",
            self.user_id,
            self.user_name,
            self.user_surname,
            or_dash(&self.player_id),
            or_dash(&self.score),
            self.comment.as_deref().unwrap_or("-")
        )
    }
}
