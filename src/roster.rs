use std::collections::HashSet;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result, bail};
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// Header names the dataset must carry, in file order.
pub const REQUIRED_COLUMNS: [&str; 17] = [
    "ID",
    "Fighter",
    "Record",
    "nickname",
    "height_cm",
    "weight_in_kg",
    "weightclass",
    "Points",
    "date_of_birth",
    "significant_strikes_landed_per_minute",
    "significant_striking_accuracy",
    "significant_strikes_absorbed_per_minute",
    "significant_strike_defence",
    "average_takedowns_landed_per_15_minutes",
    "takedown_accuracy",
    "takedown_defense",
    "average_submissions_attempted_per_15_minutes",
];

const BIRTH_DATE_FORMATS: [&str; 5] = [
    "%Y-%m-%d",
    "%b %d, %Y",
    "%d/%m/%Y",
    "%m/%d/%Y",
    "%d.%m.%Y",
];

/// One ranked fighter. Numeric stats are `None` when the dataset cell is empty.
///
/// Deserializes from the dataset headers; serializes with the field names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FighterRecord {
    #[serde(rename(deserialize = "ID"))]
    pub id: u32,
    #[serde(rename(deserialize = "Fighter"))]
    pub name: String,
    #[serde(rename(deserialize = "Record"))]
    pub record: String,
    pub nickname: String,
    pub height_cm: Option<f64>,
    #[serde(rename(deserialize = "weight_in_kg"))]
    pub weight_kg: Option<f64>,
    pub weightclass: String,
    #[serde(rename(deserialize = "Points"))]
    pub points: Option<f64>,
    pub date_of_birth: String,
    #[serde(rename(deserialize = "significant_strikes_landed_per_minute"))]
    pub strikes_landed_per_min: Option<f64>,
    #[serde(rename(deserialize = "significant_striking_accuracy"))]
    pub striking_accuracy_pct: Option<f64>,
    #[serde(rename(deserialize = "significant_strikes_absorbed_per_minute"))]
    pub strikes_absorbed_per_min: Option<f64>,
    #[serde(rename(deserialize = "significant_strike_defence"))]
    pub striking_defence_pct: Option<f64>,
    #[serde(rename(deserialize = "average_takedowns_landed_per_15_minutes"))]
    pub takedowns_landed_per_15min: Option<f64>,
    #[serde(rename(deserialize = "takedown_accuracy"))]
    pub takedown_accuracy_pct: Option<f64>,
    #[serde(rename(deserialize = "takedown_defense"))]
    pub takedown_defence_pct: Option<f64>,
    #[serde(rename(deserialize = "average_submissions_attempted_per_15_minutes"))]
    pub submissions_attempted_per_15min: Option<f64>,
}

impl FighterRecord {
    pub fn birth_date(&self) -> Option<NaiveDate> {
        parse_birth_date(&self.date_of_birth)
    }

    /// Age in whole years on `today`, when the birth date parses.
    pub fn age_on(&self, today: NaiveDate) -> Option<u32> {
        let born = self.birth_date()?;
        let mut years = today.year() - born.year();
        if (today.month(), today.day()) < (born.month(), born.day()) {
            years -= 1;
        }
        u32::try_from(years).ok()
    }
}

pub fn parse_birth_date(raw: &str) -> Option<NaiveDate> {
    let cleaned = raw.trim();
    if cleaned.is_empty() || cleaned == "-" {
        return None;
    }
    for fmt in BIRTH_DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(cleaned, fmt) {
            return Some(date);
        }
    }
    None
}

/// Ordered, read-only set of fighters for a session.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Roster {
    fighters: Vec<FighterRecord>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DuplicateKeys {
    pub ids: Vec<u32>,
    pub names: Vec<String>,
}

impl DuplicateKeys {
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty() && self.names.is_empty()
    }
}

impl Roster {
    pub fn new(fighters: Vec<FighterRecord>) -> Self {
        Self { fighters }
    }

    pub fn fighters(&self) -> &[FighterRecord] {
        &self.fighters
    }

    pub fn iter(&self) -> std::slice::Iter<'_, FighterRecord> {
        self.fighters.iter()
    }

    pub fn get(&self, index: usize) -> Option<&FighterRecord> {
        self.fighters.get(index)
    }

    pub fn len(&self) -> usize {
        self.fighters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fighters.is_empty()
    }

    /// Ids and names that appear more than once, each reported once in first-seen order.
    pub fn duplicate_keys(&self) -> DuplicateKeys {
        let mut seen_ids: HashSet<u32> = HashSet::new();
        let mut seen_names: HashSet<&str> = HashSet::new();
        let mut out = DuplicateKeys::default();
        for fighter in &self.fighters {
            if !seen_ids.insert(fighter.id) && !out.ids.contains(&fighter.id) {
                out.ids.push(fighter.id);
            }
            if !seen_names.insert(fighter.name.as_str()) && !out.names.contains(&fighter.name) {
                out.names.push(fighter.name.clone());
            }
        }
        out
    }
}

impl<'a> IntoIterator for &'a Roster {
    type Item = &'a FighterRecord;
    type IntoIter = std::slice::Iter<'a, FighterRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.fighters.iter()
    }
}

pub fn load_roster(path: &Path) -> Result<Roster> {
    let file = File::open(path).with_context(|| format!("open dataset {}", path.display()))?;
    parse_roster_csv(file).with_context(|| format!("parse dataset {}", path.display()))
}

pub fn parse_roster_csv<R: Read>(reader: R) -> Result<Roster> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(false)
        .from_reader(reader);

    let headers = rdr.headers().context("read dataset header")?.clone();
    for column in REQUIRED_COLUMNS {
        if !headers.iter().any(|h| h == column) {
            bail!("dataset is missing required column `{column}`");
        }
    }

    let mut fighters = Vec::with_capacity(64);
    for (idx, row) in rdr.deserialize::<FighterRecord>().enumerate() {
        // Row 1 is the header.
        let fighter = row.with_context(|| format!("parse dataset row {}", idx + 2))?;
        fighters.push(fighter);
    }
    Ok(Roster::new(fighters))
}
