//! Write-through progress store
//!
//! Owns the progress snapshot and the save file it mirrors. Reads insert defaults
//! for unknown keys in memory only; every mutator rewrites the whole save file
//! before returning.

use std::collections::BTreeMap;
use std::io;
use std::path::{Path, PathBuf};

use chrono::{DateTime, TimeZone, Utc};
use log::{debug, info, warn};

use crate::config::{LevelCountPolicy, StoreConfig};
use crate::error::{LoadError, ProgressError, Result};
use crate::keys;
use crate::persistence::{DefaultBackend, SaveBackend};
use crate::platform::{Platform, save_file_path};
use crate::snapshot::ProgressSnapshot;
use crate::timestamp::{datetime_to_ticks, ticks_to_datetime};

/// Single authority for reading, mutating and persisting player progress
pub struct ProgressStore<B: SaveBackend = DefaultBackend> {
    snapshot: ProgressSnapshot,
    /// Resolved once, then reused for the lifetime of the store
    save_path: Option<PathBuf>,
    /// Memory reflects disk (loaded, saved, or deleted at least once)
    loaded: bool,
    platform: Box<dyn Platform>,
    backend: B,
    config: StoreConfig,
}

impl ProgressStore<DefaultBackend> {
    /// Store on the platform's default backend, loaded from disk
    pub fn from_platform(platform: impl Platform + 'static) -> Self {
        Self::open(platform, DefaultBackend::default(), StoreConfig::default())
    }
}

impl<B: SaveBackend> ProgressStore<B> {
    /// Store with default progress. Nothing is read until `load`/`ensure_loaded`.
    pub fn new(platform: impl Platform + 'static, backend: B, config: StoreConfig) -> Self {
        let snapshot = ProgressSnapshot::new(platform.level_count());
        Self {
            snapshot,
            save_path: None,
            loaded: false,
            platform: Box::new(platform),
            backend,
            config,
        }
    }

    /// Construct and load. A failed load has already been logged and reset to defaults.
    pub fn open(platform: impl Platform + 'static, backend: B, config: StoreConfig) -> Self {
        let mut store = Self::new(platform, backend, config);
        store.ensure_loaded();
        store
    }

    /// Save file location, computed on first use
    pub fn resolve_save_path(&mut self) -> &Path {
        let platform = &self.platform;
        self.save_path.get_or_insert_with(|| {
            let path = save_file_path(&**platform);
            info!("Save file path: {}", path.display());
            path
        })
    }

    /// Resolved save path, if it has been resolved yet
    pub fn save_path(&self) -> Option<&Path> {
        self.save_path.as_deref()
    }

    pub fn snapshot(&self) -> &ProgressSnapshot {
        &self.snapshot
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    // === Integer parameters ===

    /// Stored value, or 0 (recorded in memory, not persisted)
    pub fn int_parameter(&mut self, key: &str) -> i64 {
        if let Some(value) = self.snapshot.int_parameters.get(key) {
            return *value;
        }
        self.snapshot.int_parameters.insert(key.to_owned(), 0);
        0
    }

    /// Failed writes leave the previous value in memory.
    pub fn set_int_parameter(&mut self, key: &str, value: i64) -> Result<()> {
        self.warn_if_unloaded();
        let previous = self.snapshot.int_parameters.insert(key.to_owned(), value);
        self.save().inspect_err(|_| {
            restore_entry(&mut self.snapshot.int_parameters, key, previous);
        })
    }

    /// Add `delta` to the stored value (absent counts as 0). Saturates on overflow.
    /// Failed writes leave the previous value in memory.
    pub fn increase_int_parameter(&mut self, key: &str, delta: i64) -> Result<()> {
        self.warn_if_unloaded();
        let previous = self.snapshot.int_parameters.get(key).copied();
        let value = previous.unwrap_or(0).saturating_add(delta);
        self.snapshot.int_parameters.insert(key.to_owned(), value);
        self.save().inspect_err(|_| {
            restore_entry(&mut self.snapshot.int_parameters, key, previous);
        })
    }

    pub fn coins(&mut self) -> i64 {
        self.int_parameter(keys::COINS)
    }

    pub fn built_blocks(&mut self) -> i64 {
        self.int_parameter(keys::BUILT_BLOCKS)
    }

    // === Timestamp parameters ===

    /// Stored timestamp, or the epoch (recorded in memory, not persisted)
    pub fn time_parameter(&mut self, key: &str) -> DateTime<Utc> {
        let ticks = match self.snapshot.time_parameters.get(key) {
            Some(ticks) => *ticks,
            None => {
                self.snapshot.time_parameters.insert(key.to_owned(), 0);
                0
            }
        };
        ticks_to_datetime(ticks)
    }

    /// Store `value` normalized to UTC. Failed writes leave the previous value in memory.
    pub fn set_time_parameter<Tz: TimeZone>(&mut self, key: &str, value: DateTime<Tz>) -> Result<()> {
        let value = value.with_timezone(&Utc);
        let ticks = datetime_to_ticks(value).ok_or(ProgressError::TimestampOutOfRange(value))?;
        self.warn_if_unloaded();
        let previous = self.snapshot.time_parameters.insert(key.to_owned(), ticks);
        self.save().inspect_err(|_| {
            restore_entry(&mut self.snapshot.time_parameters, key, previous);
        })
    }

    // === Level wins ===

    /// Number of win flags currently held
    pub fn level_count(&self) -> usize {
        self.snapshot.level_won.len()
    }

    pub fn won_level_count(&self) -> usize {
        self.snapshot.won_count()
    }

    pub fn has_won_level(&self, level_index: usize) -> Result<bool> {
        self.snapshot
            .level_won
            .get(level_index)
            .copied()
            .ok_or(ProgressError::LevelOutOfRange {
                index: level_index,
                level_count: self.level_count(),
            })
    }

    /// Record a level result. Out-of-range indices and failed writes leave progress untouched.
    pub fn set_win_state(&mut self, level_index: usize, won: bool) -> Result<()> {
        let level_count = self.level_count();
        let slot = self
            .snapshot
            .level_won
            .get_mut(level_index)
            .ok_or(ProgressError::LevelOutOfRange {
                index: level_index,
                level_count,
            })?;
        let previous = std::mem::replace(slot, won);
        self.warn_if_unloaded();
        self.save().inspect_err(|_| {
            self.snapshot.level_won[level_index] = previous;
        })
    }

    // === Whole-file operations ===

    /// Serialize the snapshot and overwrite the save file
    pub fn save(&mut self) -> Result<()> {
        let path = self.resolve_save_path().to_path_buf();
        let json = self.snapshot.to_json(self.config.pretty)?;

        let written = if self.config.atomic_save {
            self.backend.write_atomic(&path, &json)
        } else {
            self.backend.write(&path, &json)
        };
        written.map_err(|source| ProgressError::Write {
            path: path.clone(),
            source,
        })?;

        debug!("Progress saved to {} ({} bytes)", path.display(), json.len());
        self.loaded = true;
        Ok(())
    }

    /// Replace the snapshot with the save file's contents.
    ///
    /// Any failure resets progress to defaults; the cause is logged and returned.
    pub fn load(&mut self) -> Option<LoadError> {
        let path = self.resolve_save_path().to_path_buf();
        self.loaded = true;

        match self.read_snapshot(&path) {
            Ok(mut snapshot) => {
                self.apply_level_count_policy(&mut snapshot);
                info!(
                    "Loaded progress from {} ({} levels won)",
                    path.display(),
                    snapshot.won_count()
                );
                self.snapshot = snapshot;
                None
            }
            Err(err) => {
                warn!("{err}; starting with fresh progress");
                self.reset_snapshot();
                Some(err)
            }
        }
    }

    /// Load once; later calls do nothing
    pub fn ensure_loaded(&mut self) -> Option<LoadError> {
        if self.loaded {
            return None;
        }
        self.load()
    }

    /// Remove the save file and reset progress.
    ///
    /// Progress is reset even if removal fails. A missing file counts as deleted.
    pub fn delete(&mut self) -> Result<()> {
        let path = self.resolve_save_path().to_path_buf();
        let removed = self.backend.remove(&path);
        self.reset_snapshot();
        self.loaded = true;

        match removed {
            Ok(()) => {
                info!("Deleted save file {}", path.display());
                Ok(())
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!("No save file to delete at {}", path.display());
                Ok(())
            }
            Err(source) => Err(ProgressError::Delete { path, source }),
        }
    }

    fn read_snapshot(&self, path: &Path) -> std::result::Result<ProgressSnapshot, LoadError> {
        let json = self.backend.read(path).map_err(|source| match source.kind() {
            io::ErrorKind::NotFound => LoadError::Missing(path.to_path_buf()),
            _ => LoadError::Read {
                path: path.to_path_buf(),
                source,
            },
        })?;
        ProgressSnapshot::from_json(&json).map_err(|source| LoadError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    fn apply_level_count_policy(&self, snapshot: &mut ProgressSnapshot) {
        let level_count = self.platform.level_count();
        let saved = snapshot.level_won.len();
        if saved == level_count {
            return;
        }
        match self.config.level_count_policy {
            LevelCountPolicy::Resize => {
                snapshot.fit_level_count(level_count);
                warn!("Save holds {saved} level flags, resized to {level_count}");
            }
            LevelCountPolicy::Preserve => {
                info!("Save holds {saved} level flags, game declares {level_count}; kept as-is");
            }
        }
    }

    fn reset_snapshot(&mut self) {
        self.snapshot.reset(self.platform.level_count());
    }

    fn warn_if_unloaded(&self) {
        if !self.loaded {
            warn!("Progress changed before it was loaded; the existing save will be overwritten");
        }
    }
}

/// Put back what a map entry held before a failed write
fn restore_entry(map: &mut BTreeMap<String, i64>, key: &str, previous: Option<i64>) {
    match previous {
        Some(value) => {
            map.insert(key.to_owned(), value);
        }
        None => {
            map.remove(key);
        }
    }
}
