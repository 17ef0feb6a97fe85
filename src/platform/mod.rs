//! Platform collaborators
//!
//! The store needs three facts from its host:
//! - a writable directory for the save file
//! - the product name, used as the save file's base name
//! - how many levels the game ships, used to size the win flags

use std::path::PathBuf;

/// Save file extension
pub const SAVE_EXTENSION: &str = "sav";

/// Host facts the progress store depends on
pub trait Platform {
    /// Writable directory that survives restarts
    fn persistent_data_dir(&self) -> PathBuf;
    /// Display name of the application
    fn product_name(&self) -> String;
    /// Number of levels known to the application
    fn level_count(&self) -> usize;
}

/// Base name for the save file: spaces become underscores
pub fn sanitize_product_name(name: &str) -> String {
    name.replace(' ', "_")
}

/// `<data dir>/<sanitized product name>.sav`
pub fn save_file_path(platform: &dyn Platform) -> PathBuf {
    let file_name = format!(
        "{}.{}",
        sanitize_product_name(&platform.product_name()),
        SAVE_EXTENSION
    );
    platform.persistent_data_dir().join(file_name)
}

/// Platform with every fact supplied up front
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixedPlatform {
    pub data_dir: PathBuf,
    pub product_name: String,
    pub level_count: usize,
}

impl FixedPlatform {
    pub fn new(data_dir: impl Into<PathBuf>, product_name: impl Into<String>, level_count: usize) -> Self {
        Self {
            data_dir: data_dir.into(),
            product_name: product_name.into(),
            level_count,
        }
    }
}

impl Platform for FixedPlatform {
    fn persistent_data_dir(&self) -> PathBuf {
        self.data_dir.clone()
    }

    fn product_name(&self) -> String {
        self.product_name.clone()
    }

    fn level_count(&self) -> usize {
        self.level_count
    }
}

/// Desktop platform: saves under the OS per-user data directory
/// (`~/.local/share/<company>/<product>` on Linux).
#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DesktopPlatform {
    pub company_name: String,
    pub product_name: String,
    pub level_count: usize,
}

#[cfg(not(target_arch = "wasm32"))]
impl DesktopPlatform {
    pub fn new(company_name: impl Into<String>, product_name: impl Into<String>, level_count: usize) -> Self {
        Self {
            company_name: company_name.into(),
            product_name: product_name.into(),
            level_count,
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl Platform for DesktopPlatform {
    fn persistent_data_dir(&self) -> PathBuf {
        let base = dirs::data_dir().unwrap_or_else(|| {
            log::warn!("No per-user data directory, saving to the working directory");
            PathBuf::from(".")
        });
        base.join(&self.company_name).join(&self.product_name)
    }

    fn product_name(&self) -> String {
        self.product_name.clone()
    }

    fn level_count(&self) -> usize {
        self.level_count
    }
}

/// Browser platform: the "directory" is only a LocalStorage key prefix
#[cfg(target_arch = "wasm32")]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebPlatform {
    pub product_name: String,
    pub level_count: usize,
}

#[cfg(target_arch = "wasm32")]
impl WebPlatform {
    pub fn new(product_name: impl Into<String>, level_count: usize) -> Self {
        Self {
            product_name: product_name.into(),
            level_count,
        }
    }
}

#[cfg(target_arch = "wasm32")]
impl Platform for WebPlatform {
    fn persistent_data_dir(&self) -> PathBuf {
        PathBuf::from("idbfs")
    }

    fn product_name(&self) -> String {
        self.product_name.clone()
    }

    fn level_count(&self) -> usize {
        self.level_count
    }
}
