//! The persisted progress unit
//!
//! Field names on disk match the save files the game has always written:
//! `hasWonLevel`, `intParameters` and `dateTimeParameters`.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Complete in-memory progress state
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressSnapshot {
    /// One win flag per level index
    #[serde(rename = "hasWonLevel", default)]
    pub level_won: Vec<bool>,
    /// Named counters (coins, unlocks, ...)
    #[serde(rename = "intParameters", default)]
    pub int_parameters: BTreeMap<String, i64>,
    /// Named timestamps, as save ticks (see [`crate::timestamp`])
    #[serde(rename = "dateTimeParameters", default)]
    pub time_parameters: BTreeMap<String, i64>,
}

impl ProgressSnapshot {
    /// Fresh progress for `level_count` levels, nothing won
    pub fn new(level_count: usize) -> Self {
        Self {
            level_won: vec![false; level_count],
            int_parameters: BTreeMap::new(),
            time_parameters: BTreeMap::new(),
        }
    }

    /// Discard everything
    pub fn reset(&mut self, level_count: usize) {
        *self = Self::new(level_count);
    }

    /// Pad with `false` or truncate so there is one flag per level.
    /// Returns true if the length changed.
    pub fn fit_level_count(&mut self, level_count: usize) -> bool {
        if self.level_won.len() == level_count {
            return false;
        }
        self.level_won.resize(level_count, false);
        true
    }

    /// Number of levels marked won
    pub fn won_count(&self) -> usize {
        self.level_won.iter().filter(|won| **won).count()
    }

    pub fn to_json(&self, pretty: bool) -> Result<String, serde_json::Error> {
        if pretty {
            serde_json::to_string_pretty(self)
        } else {
            serde_json::to_string(self)
        }
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_sizes_levels() {
        let snapshot = ProgressSnapshot::new(4);
        assert_eq!(snapshot.level_won, vec![false; 4]);
        assert!(snapshot.int_parameters.is_empty());
        assert!(snapshot.time_parameters.is_empty());
    }

    #[test]
    fn test_field_names_on_disk() {
        let mut snapshot = ProgressSnapshot::new(2);
        snapshot.level_won[1] = true;
        snapshot.int_parameters.insert("coins".into(), 12);
        snapshot.time_parameters.insert("lastDaily".into(), 42);

        let json = snapshot.to_json(false).unwrap();
        assert_eq!(
            json,
            r#"{"hasWonLevel":[false,true],"intParameters":{"coins":12},"dateTimeParameters":{"lastDaily":42}}"#
        );
    }

    #[test]
    fn test_parse_legacy_file() {
        // Older saves may lack fields and carry extra ones
        let snapshot =
            ProgressSnapshot::from_json(r#"{"hasWonLevel":[true],"intParameters":{"coins":3},"version":1}"#)
                .unwrap();
        assert_eq!(snapshot.level_won, vec![true]);
        assert_eq!(snapshot.int_parameters.get("coins"), Some(&3));
        assert!(snapshot.time_parameters.is_empty());
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(ProgressSnapshot::from_json("not json").is_err());
        assert!(ProgressSnapshot::from_json(r#"{"hasWonLevel":"yes"}"#).is_err());
    }

    #[test]
    fn test_fit_level_count() {
        let mut snapshot = ProgressSnapshot::new(2);
        snapshot.level_won[0] = true;

        assert!(!snapshot.fit_level_count(2));
        assert!(snapshot.fit_level_count(4));
        assert_eq!(snapshot.level_won, vec![true, false, false, false]);
        assert!(snapshot.fit_level_count(1));
        assert_eq!(snapshot.level_won, vec![true]);
    }

    #[test]
    fn test_reset_clears_everything() {
        let mut snapshot = ProgressSnapshot::new(1);
        snapshot.level_won[0] = true;
        snapshot.int_parameters.insert("coins".into(), 9);
        snapshot.reset(3);
        assert_eq!(snapshot, ProgressSnapshot::new(3));
        assert_eq!(snapshot.won_count(), 0);
    }
}
