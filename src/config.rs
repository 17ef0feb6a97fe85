//! Store configuration
//!
//! Serializable so a host can keep it inside its own settings file.

use serde::{Deserialize, Serialize};

/// What to do when a loaded save declares a different number of levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum LevelCountPolicy {
    /// Pad with `false` or truncate to the current level count
    #[default]
    Resize,
    /// Keep the persisted length as-is
    Preserve,
}

impl LevelCountPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            LevelCountPolicy::Resize => "Resize",
            LevelCountPolicy::Preserve => "Preserve",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "resize" => Some(LevelCountPolicy::Resize),
            "preserve" | "keep" => Some(LevelCountPolicy::Preserve),
            _ => None,
        }
    }
}

/// Progress store options.
///
/// Hosts can keep these in their own settings file; `from_json` and the
/// policy's `as_str`/`from_str` are the hooks for that.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Write `<file>.tmp` then rename over the save, instead of overwriting in place
    pub atomic_save: bool,
    /// Indented JSON (easier to inspect by hand)
    pub pretty: bool,
    /// Handling of `hasWonLevel` length mismatches on load
    pub level_count_policy: LevelCountPolicy,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            atomic_save: true,
            pretty: false,
            level_count_policy: LevelCountPolicy::Resize,
        }
    }
}

impl StoreConfig {
    /// Parse from JSON, falling back to defaults for absent fields
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn with_level_count_policy(mut self, policy: LevelCountPolicy) -> Self {
        self.level_count_policy = policy;
        self
    }
}
