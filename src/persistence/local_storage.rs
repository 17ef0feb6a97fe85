//! Browser LocalStorage backend (wasm32 only)

use std::io;
use std::path::Path;

use web_sys::Storage;

use super::SaveBackend;

/// Saves kept in `window.localStorage`, keyed by the save path
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalStorageBackend;

impl LocalStorageBackend {
    pub fn new() -> Self {
        Self
    }

    fn storage() -> io::Result<Storage> {
        web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten()
            .ok_or_else(|| io::Error::new(io::ErrorKind::Unsupported, "LocalStorage unavailable"))
    }

    fn key(path: &Path) -> String {
        path.to_string_lossy().into_owned()
    }
}

impl SaveBackend for LocalStorageBackend {
    fn read(&self, path: &Path) -> io::Result<String> {
        match Self::storage()?.get_item(&Self::key(path)) {
            Ok(Some(contents)) => Ok(contents),
            Ok(None) => Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("{} not stored", path.display()),
            )),
            Err(e) => Err(io::Error::other(format!("{e:?}"))),
        }
    }

    fn write(&mut self, path: &Path, contents: &str) -> io::Result<()> {
        Self::storage()?
            .set_item(&Self::key(path), contents)
            .map_err(|e| io::Error::other(format!("{e:?}")))
    }

    fn remove(&mut self, path: &Path) -> io::Result<()> {
        // Surface NotFound like the filesystem does
        self.read(path)?;
        Self::storage()?
            .remove_item(&Self::key(path))
            .map_err(|e| io::Error::other(format!("{e:?}")))
    }
}
