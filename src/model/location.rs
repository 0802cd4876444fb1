use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::model::Id;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Address {
    pub line1: String,
    pub line2: String,
    pub city: String,
    pub state: String,
    pub postal_code: String,
    pub country: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Weekday {
    pub const ALL: [Weekday; 7] = [
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
        Weekday::Saturday,
        Weekday::Sunday,
    ];
}

/// An opening interval in local `HH:MM` time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Interval {
    pub start: String,
    pub end: String,
}

impl Interval {
    pub fn new(start: impl Into<String>, end: impl Into<String>) -> Self {
        Self {
            start: start.into(),
            end: end.into(),
        }
    }
}

pub type OpeningHours = BTreeMap<Weekday, Vec<Interval>>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub id: Id,
    pub name: String,
    #[serde(default)]
    pub address: Option<Address>,
    #[serde(default)]
    pub opening_hours: OpeningHours,
}

/// Full-replacement payload for a location update. The API overwrites the
/// whole document, so every field is always sent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationUpdate {
    pub name: String,
    pub address: Address,
    pub opening_hours: OpeningHours,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opening_hours_keys_are_lowercase_day_names() {
        let mut hours = OpeningHours::new();
        hours.insert(Weekday::Monday, vec![Interval::new("00:00", "23:59")]);

        let json = serde_json::to_value(&hours).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"monday": [{"start": "00:00", "end": "23:59"}]})
        );
    }
}
