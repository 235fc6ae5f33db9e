//! Console forms: the prompts and validators of each table.

use std::io::{BufRead, Write};

use league::validation::{
    Choice, DayMonthYear, Email, Id, OptionalId, Password, ProperName, Text, AGE, COUNTER,
    DURATION, EXPERIENCE, JERSEY, MINUTE, SCORE,
};
use league::{
    Coach, Follow, FollowKey, InteractionFrequency, Match, Opinion, Participation,
    ParticipationKey, Player, PlayerStatus, Position, Statistic, User, UNSAVED_ID,
};

use super::{reports, ConsoleError, Entity, Prompt};
use crate::persistence::sqlite::{
    SqliteCoachRepository, SqliteFollowRepository, SqliteMatchRepository, SqliteOpinionRepository,
    SqliteParticipationRepository, SqlitePlayerRepository, SqliteStatisticRepository,
    SqliteUserRepository,
};
use crate::persistence::EmailLookup;

fn optional_text<R: BufRead, W: Write>(
    prompt: &mut Prompt<R, W>,
    label: &str,
) -> Result<String, ConsoleError> {
    Ok(prompt.ask(label, &Text::OPTIONAL)?.unwrap_or_default())
}

impl Entity for Coach {
    type Key = i64;
    type Repo = SqliteCoachRepository;

    const NAME: &'static str = "coach";
    const PLURAL: &'static str = "coaches";

    fn key(&self) -> i64 {
        self.id
    }

    fn read_key<R: BufRead, W: Write>(prompt: &mut Prompt<R, W>) -> Result<i64, ConsoleError> {
        prompt.ask("Coach id", &Id)
    }

    async fn read_record<R: BufRead, W: Write>(
        prompt: &mut Prompt<R, W>,
        _repo: &SqliteCoachRepository,
        key: Option<i64>,
    ) -> Result<Coach, ConsoleError> {
        Ok(Coach {
            id: key.unwrap_or(UNSAVED_ID),
            name: prompt.ask("Name", &ProperName)?,
            surname: prompt.ask("Surname", &ProperName)?,
            nationality: prompt.ask("Nationality (optional)", &Text::OPTIONAL)?,
            experience_years: prompt.ask("Years of experience", &EXPERIENCE)?,
        })
    }
}

impl Entity for Player {
    type Key = i64;
    type Repo = SqlitePlayerRepository;

    const NAME: &'static str = "player";
    const PLURAL: &'static str = "players";
    const EXTRAS: &'static [&'static str] = &["List players with their coaches"];

    fn key(&self) -> i64 {
        self.id
    }

    fn read_key<R: BufRead, W: Write>(prompt: &mut Prompt<R, W>) -> Result<i64, ConsoleError> {
        prompt.ask("Player id", &Id)
    }

    async fn read_record<R: BufRead, W: Write>(
        prompt: &mut Prompt<R, W>,
        _repo: &SqlitePlayerRepository,
        key: Option<i64>,
    ) -> Result<Player, ConsoleError> {
        Ok(Player {
            id: key.unwrap_or(UNSAVED_ID),
            name: prompt.ask("Name", &ProperName)?,
            surname: prompt.ask("Surname", &ProperName)?,
            position: prompt.ask("Position", &Choice::<Position>::new())?,
            nationality: prompt.ask("Nationality (optional)", &Text::OPTIONAL)?,
            age: prompt.ask("Age", &AGE)?,
            jersey: prompt.ask("Jersey number", &JERSEY)?,
            team_name: prompt.ask("Team", &ProperName)?,
            coach_id: Some(prompt.ask("Coach id", &Id)?),
        })
    }

    async fn run_extra<R: BufRead, W: Write>(
        _index: usize,
        repo: &SqlitePlayerRepository,
        prompt: &mut Prompt<R, W>,
    ) -> Result<(), ConsoleError> {
        reports::players_with_coach(repo, prompt).await
    }
}

impl Entity for Match {
    type Key = i64;
    type Repo = SqliteMatchRepository;

    const NAME: &'static str = "match";
    const PLURAL: &'static str = "matches";

    fn key(&self) -> i64 {
        self.id
    }

    fn read_key<R: BufRead, W: Write>(prompt: &mut Prompt<R, W>) -> Result<i64, ConsoleError> {
        prompt.ask("Match id", &Id)
    }

    async fn read_record<R: BufRead, W: Write>(
        prompt: &mut Prompt<R, W>,
        _repo: &SqliteMatchRepository,
        key: Option<i64>,
    ) -> Result<Match, ConsoleError> {
        Ok(Match {
            id: key.unwrap_or(UNSAVED_ID),
            date: prompt.ask("Date (dd-mm-yyyy)", &DayMonthYear)?,
            team1: prompt.ask("First team", &ProperName)?,
            coach1_id: prompt.ask("First team coach id (optional)", &OptionalId)?,
            team2: prompt.ask("Second team", &ProperName)?,
            coach2_id: prompt.ask("Second team coach id (optional)", &OptionalId)?,
            result: prompt
                .ask("Result", &Text::REQUIRED)?
                .unwrap_or_default(),
            duration_minutes: prompt.ask("Duration in minutes", &DURATION)?,
        })
    }
}

impl Entity for Statistic {
    type Key = i64;
    type Repo = SqliteStatisticRepository;

    const NAME: &'static str = "statistic";
    const PLURAL: &'static str = "statistics";
    const EXTRAS: &'static [&'static str] = &["Show the player ranking"];

    fn key(&self) -> i64 {
        self.id
    }

    fn read_key<R: BufRead, W: Write>(prompt: &mut Prompt<R, W>) -> Result<i64, ConsoleError> {
        prompt.ask("Statistic id", &Id)
    }

    async fn read_record<R: BufRead, W: Write>(
        prompt: &mut Prompt<R, W>,
        _repo: &SqliteStatisticRepository,
        key: Option<i64>,
    ) -> Result<Statistic, ConsoleError> {
        Ok(Statistic {
            id: key.unwrap_or(UNSAVED_ID),
            player_id: prompt.ask("Player id", &Id)?,
            match_id: prompt.ask("Match id", &Id)?,
            attacks: prompt.ask("Attacks", &COUNTER)?,
            serves: prompt.ask("Serves", &COUNTER)?,
            blocks: prompt.ask("Blocks", &COUNTER)?,
            digs: prompt.ask("Digs", &COUNTER)?,
            errors: prompt.ask("Errors", &COUNTER)?,
        })
    }

    async fn run_extra<R: BufRead, W: Write>(
        _index: usize,
        repo: &SqliteStatisticRepository,
        prompt: &mut Prompt<R, W>,
    ) -> Result<(), ConsoleError> {
        reports::ranking(repo, prompt).await
    }
}

impl Entity for User {
    type Key = i64;
    type Repo = SqliteUserRepository;

    const NAME: &'static str = "user";
    const PLURAL: &'static str = "users";

    fn key(&self) -> i64 {
        self.id
    }

    fn read_key<R: BufRead, W: Write>(prompt: &mut Prompt<R, W>) -> Result<i64, ConsoleError> {
        prompt.ask("User id", &Id)
    }

    async fn read_record<R: BufRead, W: Write>(
        prompt: &mut Prompt<R, W>,
        repo: &SqliteUserRepository,
        key: Option<i64>,
    ) -> Result<User, ConsoleError> {
        let name = prompt.ask("Name", &ProperName)?;
        let surname = prompt.ask("Surname", &ProperName)?;
        let email = read_free_email(prompt, repo, key).await?;
        let password = prompt.ask("Password", &Password)?;
        let player_id = prompt.ask("Favourite player id (optional)", &OptionalId)?;

        Ok(User {
            id: key.unwrap_or(UNSAVED_ID),
            name,
            surname,
            email,
            password,
            player_id,
        })
    }
}

/// Ask for an email that no other user has registered.
async fn read_free_email<R: BufRead, W: Write>(
    prompt: &mut Prompt<R, W>,
    repo: &SqliteUserRepository,
    user_id: Option<i64>,
) -> Result<Option<String>, ConsoleError> {
    loop {
        let Some(email) = prompt.ask("Email (optional)", &Email)? else {
            return Ok(None);
        };
        match repo.email_taken(&email, user_id).await {
            Ok(false) => return Ok(Some(email)),
            Ok(true) => {
                tracing::info!(email = %email, "Rejected duplicate email");
                prompt.say("That email is already registered, try again.")?;
            }
            Err(e) => {
                // The UNIQUE constraint still guards the insert.
                tracing::error!(error = %e, "Email lookup failed");
                return Ok(Some(email));
            }
        }
    }
}

impl Entity for Opinion {
    type Key = i64;
    type Repo = SqliteOpinionRepository;

    const NAME: &'static str = "opinion";
    const PLURAL: &'static str = "opinions";
    const EXTRAS: &'static [&'static str] = &["List users with their opinions"];

    fn key(&self) -> i64 {
        self.id
    }

    fn read_key<R: BufRead, W: Write>(prompt: &mut Prompt<R, W>) -> Result<i64, ConsoleError> {
        prompt.ask("Opinion id", &Id)
    }

    async fn read_record<R: BufRead, W: Write>(
        prompt: &mut Prompt<R, W>,
        _repo: &SqliteOpinionRepository,
        key: Option<i64>,
    ) -> Result<Opinion, ConsoleError> {
        Ok(Opinion {
            id: key.unwrap_or(UNSAVED_ID),
            match_id: prompt.ask("Match id", &Id)?,
            player_id: prompt.ask("Player id", &Id)?,
            user_id: prompt.ask("User id", &Id)?,
            score: prompt.ask("Score", &SCORE)?,
            comment: optional_text(prompt, "Comment (optional)")?,
        })
    }

    async fn run_extra<R: BufRead, W: Write>(
        _index: usize,
        repo: &SqliteOpinionRepository,
        prompt: &mut Prompt<R, W>,
    ) -> Result<(), ConsoleError> {
        reports::opinions_with_user(repo, prompt).await
    }
}

impl Entity for Participation {
    type Key = ParticipationKey;
    type Repo = SqliteParticipationRepository;

    const NAME: &'static str = "participation";
    const PLURAL: &'static str = "participations";

    fn key(&self) -> ParticipationKey {
        Participation::key(self)
    }

    fn read_key<R: BufRead, W: Write>(
        prompt: &mut Prompt<R, W>,
    ) -> Result<ParticipationKey, ConsoleError> {
        Ok(ParticipationKey {
            player_id: prompt.ask("Player id", &Id)?,
            match_id: prompt.ask("Match id", &Id)?,
        })
    }

    async fn read_record<R: BufRead, W: Write>(
        prompt: &mut Prompt<R, W>,
        _repo: &SqliteParticipationRepository,
        key: Option<ParticipationKey>,
    ) -> Result<Participation, ConsoleError> {
        let key = match key {
            Some(key) => key,
            None => Self::read_key(prompt)?,
        };
        Ok(Participation {
            player_id: key.player_id,
            match_id: key.match_id,
            entry_minute: prompt.ask("Entry minute", &MINUTE)?,
            exit_minute: prompt.ask("Exit minute", &MINUTE)?,
            status: prompt.ask("Status", &Choice::<PlayerStatus>::new())?,
        })
    }
}

impl Entity for Follow {
    type Key = FollowKey;
    type Repo = SqliteFollowRepository;

    const NAME: &'static str = "follow";
    const PLURAL: &'static str = "follows";

    fn key(&self) -> FollowKey {
        Follow::key(self)
    }

    fn read_key<R: BufRead, W: Write>(prompt: &mut Prompt<R, W>) -> Result<FollowKey, ConsoleError> {
        Ok(FollowKey {
            user_id: prompt.ask("User id", &Id)?,
            player_id: prompt.ask("Player id", &Id)?,
            follow_date: prompt.ask("Follow date (dd-mm-yyyy)", &DayMonthYear)?,
        })
    }

    async fn read_record<R: BufRead, W: Write>(
        prompt: &mut Prompt<R, W>,
        _repo: &SqliteFollowRepository,
        key: Option<FollowKey>,
    ) -> Result<Follow, ConsoleError> {
        let key = match key {
            Some(key) => key,
            None => Self::read_key(prompt)?,
        };
        Ok(Follow {
            user_id: key.user_id,
            player_id: key.player_id,
            follow_date: key.follow_date,
            frequency: prompt.ask("Interaction frequency", &Choice::<InteractionFrequency>::new())?,
            notes: optional_text(prompt, "Notes (optional)")?,
        })
    }
}
