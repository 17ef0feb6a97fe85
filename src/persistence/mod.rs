//! Save storage backends
//!
//! The store reads and writes whole text blobs addressed by path:
//! - `FileBackend`: native filesystem, optional temp-file-then-rename writes
//! - `MemoryBackend`: in-process map for tests and headless tools
//! - `LocalStorageBackend`: browser LocalStorage on wasm32, keyed by path

mod file;
#[cfg(target_arch = "wasm32")]
mod local_storage;
mod memory;

pub use file::FileBackend;
#[cfg(target_arch = "wasm32")]
pub use local_storage::LocalStorageBackend;
pub use memory::MemoryBackend;

use std::io;
use std::path::Path;

/// Backend picked by `ProgressStore::from_platform`
#[cfg(not(target_arch = "wasm32"))]
pub type DefaultBackend = FileBackend;
#[cfg(target_arch = "wasm32")]
pub type DefaultBackend = LocalStorageBackend;

/// Whole-blob storage addressed by path.
///
/// `read` and `remove` report `io::ErrorKind::NotFound` when nothing is stored.
pub trait SaveBackend {
    fn read(&self, path: &Path) -> io::Result<String>;

    /// Replace the stored contents in place
    fn write(&mut self, path: &Path, contents: &str) -> io::Result<()>;

    /// Replace the stored contents so a crash never leaves a partial save.
    /// Backends whose writes are already all-or-nothing keep the default.
    fn write_atomic(&mut self, path: &Path, contents: &str) -> io::Result<()> {
        self.write(path, contents)
    }

    fn remove(&mut self, path: &Path) -> io::Result<()>;

    fn exists(&self, path: &Path) -> bool {
        self.read(path).is_ok()
    }
}
