//! Game Progress - save file for player progress
//!
//! Core modules:
//! - `store`: Write-through progress store (win flags, counters, timestamps)
//! - `snapshot`: The persisted progress unit and its JSON layout
//! - `persistence`: Storage backends (filesystem, memory, LocalStorage)
//! - `platform`: Host facts (data directory, product name, level count)
//! - `timestamp`: Timestamp <-> save tick conversion
//! - `config`: Store options

pub mod config;
pub mod error;
pub mod persistence;
pub mod platform;
pub mod snapshot;
pub mod store;
pub mod timestamp;

pub use config::{LevelCountPolicy, StoreConfig};
pub use error::{LoadError, ProgressError, Result};
pub use persistence::{DefaultBackend, FileBackend, MemoryBackend, SaveBackend};
pub use platform::{FixedPlatform, Platform};
pub use snapshot::ProgressSnapshot;
pub use store::ProgressStore;

#[cfg(not(target_arch = "wasm32"))]
pub use platform::DesktopPlatform;
#[cfg(target_arch = "wasm32")]
pub use persistence::LocalStorageBackend;
#[cfg(target_arch = "wasm32")]
pub use platform::WebPlatform;

/// Timestamp type at the API surface
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Integer parameters the game reads everywhere
pub mod keys {
    /// Soft currency balance
    pub const COINS: &str = "coins";
    /// Blocks placed over all runs
    pub const BUILT_BLOCKS: &str = "builtBlocks";
}
