use std::io::{BufRead, Write};

use league::{Coach, Follow, Match, Opinion, Participation, Player, Statistic, User};
use tracing::info;

use super::{ConsoleError, Entity, EntityService, Prompt};
use crate::persistence::sqlite::{
    Database, SqliteCoachRepository, SqliteFollowRepository, SqliteMatchRepository,
    SqliteOpinionRepository, SqliteParticipationRepository, SqlitePlayerRepository,
    SqliteStatisticRepository, SqliteUserRepository,
};

const TABLES: [&str; 8] = [
    "Coaches",
    "Players",
    "Matches",
    "Statistics",
    "Users",
    "Opinions",
    "Participations",
    "Follows",
];
const EXIT: usize = TABLES.len() + 1;

/// Top-level loop: pick a table, manage it, come back, until "Exit".
pub async fn run_main_menu<R: BufRead, W: Write>(
    db: &Database,
    prompt: &mut Prompt<R, W>,
) -> Result<(), ConsoleError> {
    prompt.say("Welcome to the Volleyball Nations League manager")?;

    loop {
        prompt.say("")?;
        prompt.say("=== Main menu ===")?;
        for (i, table) in TABLES.iter().enumerate() {
            prompt.say(format!("{}. {table}", i + 1))?;
        }
        prompt.say(format!("{EXIT}. Exit"))?;

        let pool = db.pool().clone();
        match prompt.choose(EXIT)? {
            1 => manage::<Coach, _, _>(SqliteCoachRepository::new(pool), prompt).await?,
            2 => manage::<Player, _, _>(SqlitePlayerRepository::new(pool), prompt).await?,
            3 => manage::<Match, _, _>(SqliteMatchRepository::new(pool), prompt).await?,
            4 => manage::<Statistic, _, _>(SqliteStatisticRepository::new(pool), prompt).await?,
            5 => manage::<User, _, _>(SqliteUserRepository::new(pool), prompt).await?,
            6 => manage::<Opinion, _, _>(SqliteOpinionRepository::new(pool), prompt).await?,
            7 => {
                manage::<Participation, _, _>(SqliteParticipationRepository::new(pool), prompt)
                    .await?
            }
            8 => manage::<Follow, _, _>(SqliteFollowRepository::new(pool), prompt).await?,
            _ => {
                info!("Exit selected");
                prompt.say("Goodbye!")?;
                return Ok(());
            }
        }
    }
}

async fn manage<E: Entity, R: BufRead, W: Write>(
    repo: E::Repo,
    prompt: &mut Prompt<R, W>,
) -> Result<(), ConsoleError> {
    info!(table = E::PLURAL, "Opened table menu");
    EntityService::<E>::new(repo).run_menu(prompt).await
}
