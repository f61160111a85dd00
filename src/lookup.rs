use std::fmt;

use thiserror::Error;

use crate::roster::{FighterRecord, Roster};

/// A fighter reference as the presentation layer holds it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FighterKey<'a> {
    Id(u32),
    Name(&'a str),
}

impl fmt::Display for FighterKey<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FighterKey::Id(id) => write!(f, "id {id}"),
            FighterKey::Name(name) => write!(f, "name {name:?}"),
        }
    }
}

impl From<u32> for FighterKey<'_> {
    fn from(id: u32) -> Self {
        FighterKey::Id(id)
    }
}

impl<'a> From<&'a str> for FighterKey<'a> {
    fn from(name: &'a str) -> Self {
        FighterKey::Name(name)
    }
}

impl<'a> FighterKey<'a> {
    /// Numeric input is treated as an id, anything else as a name.
    pub fn parse(raw: &'a str) -> Self {
        let trimmed = raw.trim();
        match trimmed.parse::<u32>() {
            Ok(id) => FighterKey::Id(id),
            Err(_) => FighterKey::Name(trimmed),
        }
    }

    fn matches(&self, fighter: &FighterRecord) -> bool {
        match self {
            FighterKey::Id(id) => fighter.id == *id,
            FighterKey::Name(name) => fighter.name == *name,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LookupError {
    #[error("no fighter with {key} in roster")]
    NotFound { key: String },
}

/// First fighter in roster order matching `key`.
pub fn find_fighter<'r, 'k>(
    roster: &'r Roster,
    key: impl Into<FighterKey<'k>>,
) -> Result<&'r FighterRecord, LookupError> {
    let key = key.into();
    roster
        .iter()
        .find(|f| key.matches(f))
        .ok_or_else(|| LookupError::NotFound {
            key: key.to_string(),
        })
}
