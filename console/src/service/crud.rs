//! Generic create/show/list/update/delete flow shared by every table.

use std::io::{BufRead, Write};

use tracing::{error, info};

use super::{ConsoleError, Entity, Prompt};
use crate::persistence::Repository;

pub struct EntityService<E: Entity> {
    repo: E::Repo,
}

impl<E: Entity> EntityService<E> {
    pub fn new(repo: E::Repo) -> Self {
        Self { repo }
    }

    /// Show the entity menu until the user picks "back".
    pub async fn run_menu<R: BufRead, W: Write>(
        &self,
        prompt: &mut Prompt<R, W>,
    ) -> Result<(), ConsoleError> {
        let extras = E::EXTRAS.len();
        let update = 4 + extras;
        let delete = update + 1;
        let back = delete + 1;

        loop {
            prompt.say("")?;
            prompt.say(format!("--- Manage {} ---", E::PLURAL))?;
            prompt.say(format!("1. Add a {}", E::NAME))?;
            prompt.say(format!("2. Find a {} by key", E::NAME))?;
            prompt.say(format!("3. List all {}", E::PLURAL))?;
            for (i, label) in E::EXTRAS.iter().enumerate() {
                prompt.say(format!("{}. {label}", 4 + i))?;
            }
            prompt.say(format!("{update}. Update a {}", E::NAME))?;
            prompt.say(format!("{delete}. Delete a {}", E::NAME))?;
            prompt.say(format!("{back}. Back"))?;

            match prompt.choose(back)? {
                1 => self.create(prompt).await?,
                2 => self.show(prompt).await?,
                3 => self.list(prompt).await?,
                n if n == update => self.update(prompt).await?,
                n if n == delete => self.delete(prompt).await?,
                n if n == back => return Ok(()),
                n => E::run_extra(n - 4, &self.repo, prompt).await?,
            }
        }
    }

    pub async fn create<R: BufRead, W: Write>(
        &self,
        prompt: &mut Prompt<R, W>,
    ) -> Result<(), ConsoleError> {
        let record = E::read_record(prompt, &self.repo, None).await?;
        match self.repo.insert(&record).await {
            Ok(saved) => {
                info!(entity = E::NAME, key = %saved.key(), "Created");
                prompt.say(format!("Added: {saved}"))?;
            }
            Err(e) => {
                error!(entity = E::NAME, error = %e, "Create failed");
                prompt.say(format!("Could not add the {}: {e}", E::NAME))?;
            }
        }
        Ok(())
    }

    pub async fn show<R: BufRead, W: Write>(
        &self,
        prompt: &mut Prompt<R, W>,
    ) -> Result<(), ConsoleError> {
        let key = E::read_key(prompt)?;
        match self.repo.get(&key).await {
            Ok(Some(record)) => {
                info!(entity = E::NAME, key = %key, "Found");
                prompt.say(format!("Found: {record}"))?;
            }
            Ok(None) => {
                info!(entity = E::NAME, key = %key, "Not found");
                prompt.say(format!("No {} found with key {key}", E::NAME))?;
            }
            Err(e) => {
                error!(entity = E::NAME, key = %key, error = %e, "Lookup failed");
                prompt.say(format!("Could not look up the {}: {e}", E::NAME))?;
            }
        }
        Ok(())
    }

    pub async fn list<R: BufRead, W: Write>(
        &self,
        prompt: &mut Prompt<R, W>,
    ) -> Result<(), ConsoleError> {
        match self.repo.list().await {
            Ok(records) if records.is_empty() => {
                prompt.say(format!("There are no {} yet.", E::PLURAL))?;
            }
            Ok(records) => {
                info!(entity = E::NAME, count = records.len(), "Listed");
                prompt.say(format!("--- {} ---", E::PLURAL))?;
                for record in &records {
                    prompt.say(record)?;
                }
            }
            Err(e) => {
                error!(entity = E::NAME, error = %e, "List failed");
                prompt.say(format!("Could not list the {}: {e}", E::PLURAL))?;
            }
        }
        Ok(())
    }

    /// Ask for the key, then a full replacement of the other fields.
    pub async fn update<R: BufRead, W: Write>(
        &self,
        prompt: &mut Prompt<R, W>,
    ) -> Result<(), ConsoleError> {
        let key = E::read_key(prompt)?;
        match self.repo.get(&key).await {
            Ok(Some(current)) => prompt.say(format!("Current: {current}"))?,
            Ok(None) => {
                prompt.say(format!("No {} found with key {key}", E::NAME))?;
                return Ok(());
            }
            Err(e) => {
                error!(entity = E::NAME, key = %key, error = %e, "Lookup failed");
                prompt.say(format!("Could not look up the {}: {e}", E::NAME))?;
                return Ok(());
            }
        }

        prompt.say(format!("Enter the new data of the {}:", E::NAME))?;
        let record = E::read_record(prompt, &self.repo, Some(key)).await?;
        match self.repo.update(&record).await {
            Ok(()) => {
                info!(entity = E::NAME, key = %record.key(), "Updated");
                prompt.say(format!("Updated: {record}"))?;
            }
            Err(e) => {
                error!(entity = E::NAME, key = %record.key(), error = %e, "Update failed");
                prompt.say(format!("Could not update the {}: {e}", E::NAME))?;
            }
        }
        Ok(())
    }

    pub async fn delete<R: BufRead, W: Write>(
        &self,
        prompt: &mut Prompt<R, W>,
    ) -> Result<(), ConsoleError> {
        let key = E::read_key(prompt)?;
        match self.repo.delete(&key).await {
            Ok(()) => {
                info!(entity = E::NAME, key = %key, "Deleted");
                prompt.say(format!("Deleted the {} with key {key}", E::NAME))?;
            }
            Err(e) => {
                error!(entity = E::NAME, key = %key, error = %e, "Delete failed");
                prompt.say(format!("Could not delete the {}: {e}", E::NAME))?;
            }
        }
        Ok(())
    }
}
