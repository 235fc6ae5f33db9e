//! Line-oriented prompt over any input source.
//!
//! The validators in [`league::validation`] are pure; this type only feeds
//! them lines and repeats the question until one is accepted.

use std::fmt::Display;
use std::io::{BufRead, Write};

use league::validation::{Field, IntRange};

use super::ConsoleError;

pub struct Prompt<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompt<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Print one line.
    pub fn say(&mut self, line: impl Display) -> Result<(), ConsoleError> {
        writeln!(self.output, "{line}")?;
        Ok(())
    }

    /// Ask for `label` until `field` accepts the answer.
    pub fn ask<F: Field>(&mut self, label: &str, field: &F) -> Result<F::Value, ConsoleError> {
        loop {
            let raw = self.read_line(label)?;
            match field.parse(&raw) {
                Ok(value) => return Ok(value),
                Err(e) => {
                    tracing::info!(field = label, error = %e, "Rejected input");
                    self.say(format!("{e}, try again."))?;
                }
            }
        }
    }

    /// Read a menu option in `1..=max`.
    pub fn choose(&mut self, max: usize) -> Result<usize, ConsoleError> {
        let range = IntRange::between(1, max as i64);
        let option = self.ask("Option", &range)?;
        Ok(option as usize)
    }

    fn read_line(&mut self, label: &str) -> Result<String, ConsoleError> {
        write!(self.output, "{label}: ")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(ConsoleError::InputClosed);
        }
        let trimmed = line.trim_end_matches(['\n', '\r']).len();
        line.truncate(trimmed);
        Ok(line)
    }

    #[cfg(test)]
    pub fn output(&self) -> &W {
        &self.output
    }
}
