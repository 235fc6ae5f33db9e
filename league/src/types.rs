//! Closed value sets stored as upper-case text.

use std::fmt;

/// A closed enumeration whose variants are identified by an upper-case name.
pub trait Variants: Sized + Copy + 'static {
    const ALL: &'static [Self];

    fn as_str(self) -> &'static str;

    /// Look up a variant by name, ignoring case.
    fn from_name(name: &str) -> Option<Self> {
        let upper = name.to_uppercase();
        Self::ALL.iter().copied().find(|v| v.as_str() == upper)
    }

    /// Comma separated list of every accepted name.
    fn allowed() -> String {
        Self::ALL
            .iter()
            .map(|v| v.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Court position of a player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Position {
    Setter,
    Opposite,
    Middle,
    Libero,
    Hitter,
}

impl Variants for Position {
    const ALL: &'static [Self] = &[
        Self::Setter,
        Self::Opposite,
        Self::Middle,
        Self::Libero,
        Self::Hitter,
    ];

    fn as_str(self) -> &'static str {
        match self {
            Self::Setter => "SETTER",
            Self::Opposite => "OPPOSITE",
            Self::Middle => "MIDDLE",
            Self::Libero => "LIBERO",
            Self::Hitter => "HITTER",
        }
    }
}

/// How a player took part in a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlayerStatus {
    Active,
    Substituted,
    Injured,
    Expelled,
    Starter,
    Reserve,
    Inactive,
}

impl Variants for PlayerStatus {
    const ALL: &'static [Self] = &[
        Self::Active,
        Self::Substituted,
        Self::Injured,
        Self::Expelled,
        Self::Starter,
        Self::Reserve,
        Self::Inactive,
    ];

    fn as_str(self) -> &'static str {
        match self {
            Self::Active => "ACTIVE",
            Self::Substituted => "SUBSTITUTED",
            Self::Injured => "INJURED",
            Self::Expelled => "EXPELLED",
            Self::Starter => "STARTER",
            Self::Reserve => "RESERVE",
            Self::Inactive => "INACTIVE",
        }
    }
}

/// How often a fan interacts with a followed player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InteractionFrequency {
    Daily,
    Weekly,
    Monthly,
    Yearly,
}

impl Variants for InteractionFrequency {
    const ALL: &'static [Self] = &[Self::Daily, Self::Weekly, Self::Monthly, Self::Yearly];

    fn as_str(self) -> &'static str {
        match self {
            Self::Daily => "DAILY",
            Self::Weekly => "WEEKLY",
            Self::Monthly => "MONTHLY",
            Self::Yearly => "YEARLY",
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for PlayerStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for InteractionFrequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_name_is_case_insensitive() {
        assert_eq!(Position::from_name("libero"), Some(Position::Libero));
        assert_eq!(Position::from_name("Setter"), Some(Position::Setter));
        assert_eq!(PlayerStatus::from_name("reserve"), Some(PlayerStatus::Reserve));
        assert_eq!(
            InteractionFrequency::from_name("WEEKLY"),
            Some(InteractionFrequency::Weekly)
        );
    }

    #[test]
    fn from_name_rejects_unknown() {
        assert_eq!(Position::from_name("GOALKEEPER"), None);
        assert_eq!(PlayerStatus::from_name(""), None);
    }

    #[test]
    fn names_roundtrip() {
        for p in Position::ALL {
            assert_eq!(Position::from_name(p.as_str()), Some(*p));
        }
        for s in PlayerStatus::ALL {
            assert_eq!(PlayerStatus::from_name(s.as_str()), Some(*s));
        }
        for f in InteractionFrequency::ALL {
            assert_eq!(InteractionFrequency::from_name(f.as_str()), Some(*f));
        }
    }

    #[test]
    fn allowed_lists_every_variant() {
        assert_eq!(
            InteractionFrequency::allowed(),
            "DAILY, WEEKLY, MONTHLY, YEARLY"
        );
        assert_eq!(Position::allowed().split(", ").count(), 5);
    }
}
