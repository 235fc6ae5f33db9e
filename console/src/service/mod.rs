//! Interactive services: one generic CRUD menu per entity plus the
//! top-level table selection.
//!
//! Every entity plugs into [`EntityService`] through the [`Entity`] trait,
//! which says how to prompt for its key and fields. Persistence failures are
//! reported to the user and logged; only a closed input or a broken output
//! ends a menu.

mod crud;
mod forms;
mod menu;
mod prompt;
mod reports;

use std::fmt::Display;
use std::future::Future;
use std::io::{BufRead, Write};

use crate::persistence::Repository;

pub use crud::EntityService;
pub use menu::run_main_menu;
pub use prompt::Prompt;

#[derive(Debug, thiserror::Error)]
pub enum ConsoleError {
    #[error("input closed")]
    InputClosed,
    #[error("console I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// A record that can be edited from the console.
pub trait Entity: Sized + Clone + Display + Send + Sync {
    type Key: Display + Send + Sync;
    type Repo: Repository<Record = Self, Key = Self::Key>;

    /// Singular name used in prompts and logs, e.g. `player`.
    const NAME: &'static str;
    /// Plural name used in menu titles and listings, e.g. `players`.
    const PLURAL: &'static str;
    /// Report options offered between "list" and "update".
    const EXTRAS: &'static [&'static str] = &[];

    fn key(&self) -> Self::Key;

    fn read_key<R: BufRead, W: Write>(prompt: &mut Prompt<R, W>)
        -> Result<Self::Key, ConsoleError>;

    /// Prompt for a full record. With `key` set (update) the key fields are
    /// taken from it and only the remaining fields are asked for.
    fn read_record<R: BufRead, W: Write>(
        prompt: &mut Prompt<R, W>,
        repo: &Self::Repo,
        key: Option<Self::Key>,
    ) -> impl Future<Output = Result<Self, ConsoleError>>;

    /// Run report `index` of [`Entity::EXTRAS`].
    fn run_extra<R: BufRead, W: Write>(
        _index: usize,
        _repo: &Self::Repo,
        _prompt: &mut Prompt<R, W>,
    ) -> impl Future<Output = Result<(), ConsoleError>> {
        async { Ok(()) }
    }
}
