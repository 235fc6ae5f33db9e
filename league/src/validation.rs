//! Pure field validators for console input.
//!
//! Every rule turns one raw input line into a typed value or a
//! [`ValidationError`]. Rules never read input themselves, so the same rule
//! serves the interactive prompt, seed checks and tests alike.

use std::marker::PhantomData;

use time::format_description::BorrowedFormatItem;
use time::macros::format_description;
use time::Date;

use crate::types::Variants;

/// Textual date format accepted and displayed everywhere: `dd-mm-yyyy`.
pub const DATE_FORMAT: &[BorrowedFormatItem<'static>] = format_description!("[day]-[month]-[year]");

/// Characters of which a password must contain at least one.
pub const PASSWORD_SPECIALS: &str = "!@#$%^&*(),.?\":{}|<>";
pub const PASSWORD_MIN_LEN: usize = 8;
pub const NAME_MIN_LEN: usize = 3;
pub const EMAIL_LOCAL_MIN_LEN: usize = 3;

pub const AGE: IntRange = IntRange::between(16, 50);
pub const JERSEY: IntRange = IntRange::between(1, 99);
pub const SCORE: IntRange = IntRange::between(1, 10);
pub const MINUTE: IntRange = IntRange::at_least(0);
pub const DURATION: IntRange = IntRange::at_least(1);
pub const EXPERIENCE: IntRange = IntRange::at_least(1);
/// Per-match performance counters (attacks, serves, blocks, digs, errors).
pub const COUNTER_MAX: i64 = 9_999;
pub const COUNTER: IntRange = IntRange::between(0, COUNTER_MAX);

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("This field is required")]
    Required,
    #[error("Must be at least {min} characters long")]
    TooShort { min: usize },
    #[error("{0}")]
    Pattern(&'static str),
    #[error("Must be a whole number")]
    NotANumber,
    #[error("Must be a number {}", describe_range(.min, .max))]
    OutOfRange { min: i64, max: Option<i64> },
    #[error("Unknown value, allowed values are: {allowed}")]
    UnknownChoice { allowed: String },
    #[error("Dates must use the dd-mm-yyyy format")]
    BadDate,
    #[error("Emails need at least three characters before '@' and a domain with a dot after it")]
    BadEmail,
    #[error("Passwords need at least 8 characters, an upper-case letter and one of {}", PASSWORD_SPECIALS)]
    WeakPassword,
}

fn describe_range(min: &i64, max: &Option<i64>) -> String {
    match max {
        Some(max) => format!("between {min} and {max}"),
        None => format!("of at least {min}"),
    }
}

/// One validation rule for a raw input line.
pub trait Field {
    type Value;

    fn parse(&self, raw: &str) -> Result<Self::Value, ValidationError>;
}

/// Words of ASCII letters, each starting upper-case, single spaces between.
/// Used for names, surnames and team names.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProperName;

impl Field for ProperName {
    type Value = String;

    fn parse(&self, raw: &str) -> Result<String, ValidationError> {
        if raw.is_empty() {
            return Err(ValidationError::Required);
        }
        if raw.chars().count() < NAME_MIN_LEN {
            return Err(ValidationError::TooShort { min: NAME_MIN_LEN });
        }
        let capitalized = raw.split(' ').all(|word| {
            let mut chars = word.chars();
            matches!(chars.next(), Some(first) if first.is_ascii_uppercase())
                && chars.all(|c| c.is_ascii_alphabetic())
        });
        if !capitalized {
            return Err(ValidationError::Pattern(
                "Each word must start with an upper-case letter and contain only letters, separated by single spaces",
            ));
        }
        Ok(raw.to_string())
    }
}

/// Free text made of letters and single spaces.
///
/// When not required, empty input is accepted as `None`.
#[derive(Debug, Clone, Copy)]
pub struct Text {
    pub required: bool,
}

impl Text {
    pub const REQUIRED: Text = Text { required: true };
    pub const OPTIONAL: Text = Text { required: false };
}

impl Field for Text {
    type Value = Option<String>;

    fn parse(&self, raw: &str) -> Result<Option<String>, ValidationError> {
        if raw.is_empty() {
            return if self.required {
                Err(ValidationError::Required)
            } else {
                Ok(None)
            };
        }
        let words_ok = raw
            .split(' ')
            .all(|word| !word.is_empty() && word.chars().all(char::is_alphabetic));
        if !words_ok {
            return Err(ValidationError::Pattern(
                "Only letters are allowed, with single spaces between words",
            ));
        }
        Ok(Some(raw.to_string()))
    }
}

fn parse_int(raw: &str) -> Result<i64, ValidationError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::Required);
    }
    trimmed.parse().map_err(|_| ValidationError::NotANumber)
}

/// Integer within inclusive bounds; `max == None` means unbounded above.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IntRange {
    pub min: i64,
    pub max: Option<i64>,
}

impl IntRange {
    pub const fn between(min: i64, max: i64) -> Self {
        Self { min, max: Some(max) }
    }

    pub const fn at_least(min: i64) -> Self {
        Self { min, max: None }
    }

    pub fn contains(&self, value: i64) -> bool {
        value >= self.min && self.max.map_or(true, |max| value <= max)
    }
}

impl Field for IntRange {
    type Value = i64;

    fn parse(&self, raw: &str) -> Result<i64, ValidationError> {
        let value = parse_int(raw)?;
        if !self.contains(value) {
            return Err(ValidationError::OutOfRange {
                min: self.min,
                max: self.max,
            });
        }
        Ok(value)
    }
}

/// Mandatory positive identifier.
#[derive(Debug, Clone, Copy, Default)]
pub struct Id;

impl Field for Id {
    type Value = i64;

    fn parse(&self, raw: &str) -> Result<i64, ValidationError> {
        IntRange::at_least(1).parse(raw)
    }
}

/// Positive identifier of an optional relationship; empty input means unset.
#[derive(Debug, Clone, Copy, Default)]
pub struct OptionalId;

impl Field for OptionalId {
    type Value = Option<i64>;

    fn parse(&self, raw: &str) -> Result<Option<i64>, ValidationError> {
        if raw.trim().is_empty() {
            return Ok(None);
        }
        Id.parse(raw).map(Some)
    }
}

/// One variant of a closed set, matched after upper-casing the input.
#[derive(Debug, Clone, Copy)]
pub struct Choice<E>(PhantomData<E>);

impl<E> Choice<E> {
    pub const fn new() -> Self {
        Self(PhantomData)
    }
}

impl<E> Default for Choice<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: Variants> Field for Choice<E> {
    type Value = E;

    fn parse(&self, raw: &str) -> Result<E, ValidationError> {
        E::from_name(raw.trim()).ok_or_else(|| ValidationError::UnknownChoice {
            allowed: E::allowed(),
        })
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct DayMonthYear;

impl Field for DayMonthYear {
    type Value = Date;

    fn parse(&self, raw: &str) -> Result<Date, ValidationError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Required);
        }
        Date::parse(trimmed, DATE_FORMAT).map_err(|_| ValidationError::BadDate)
    }
}

/// Optional email address; empty input is accepted as `None`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Email;

impl Field for Email {
    type Value = Option<String>;

    fn parse(&self, raw: &str) -> Result<Option<String>, ValidationError> {
        if raw.is_empty() {
            return Ok(None);
        }
        let (local, domain) = raw.rsplit_once('@').ok_or(ValidationError::BadEmail)?;
        if local.chars().count() < EMAIL_LOCAL_MIN_LEN {
            return Err(ValidationError::BadEmail);
        }
        let (host, tld) = domain.rsplit_once('.').ok_or(ValidationError::BadEmail)?;
        let host_ok = !host.is_empty()
            && host
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '.' || c == '-');
        let tld_ok = tld.len() >= 2 && tld.chars().all(|c| c.is_ascii_alphabetic());
        if !host_ok || !tld_ok {
            return Err(ValidationError::BadEmail);
        }
        Ok(Some(raw.to_string()))
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Password;

impl Field for Password {
    type Value = String;

    fn parse(&self, raw: &str) -> Result<String, ValidationError> {
        let long_enough = raw.chars().count() >= PASSWORD_MIN_LEN;
        let has_upper = raw.chars().any(|c| c.is_ascii_uppercase());
        let has_special = raw.chars().any(|c| PASSWORD_SPECIALS.contains(c));
        if !(long_enough && has_upper && has_special) {
            return Err(ValidationError::WeakPassword);
        }
        Ok(raw.to_string())
    }
}
