//! Local filesystem Storage implementation for the desktop emulator.
//!
//! `LocalFileStorage` implements `platform::Storage` using `std::fs`.
//! Used when the `std` feature is enabled (emulator builds only).
//! All paths are resolved relative to the `soul_root` provided at construction.

use std::fs;
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::PathBuf;

use crate::storage::{File, RwFile, Storage};

/// Error type for local filesystem operations.
#[derive(Debug)]
pub struct LocalStorageError(pub std::io::Error);

impl core::fmt::Display for LocalStorageError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "local storage error: {}", self.0)
    }
}

impl std::error::Error for LocalStorageError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.0)
    }
}

/// An open file on the local filesystem.
pub struct LocalFile {
    inner: fs::File,
    size: u64,
}

impl File for LocalFile {
    type Error = LocalStorageError;

    async fn read(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error> {
        Read::read(&mut self.inner, buf).map_err(LocalStorageError)
    }

    async fn seek(&mut self, pos: u64) -> Result<u64, Self::Error> {
        Seek::seek(&mut self.inner, SeekFrom::Start(pos)).map_err(LocalStorageError)
    }

    fn size(&self) -> u64 {
        self.size
    }
}

/// An open, writable file on the local filesystem.
pub struct LocalRwFile {
    inner: fs::File,
    size: u64,
}

impl File for LocalRwFile {
    type Error = LocalStorageError;

    async fn read(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error> {
        Read::read(&mut self.inner, buf).map_err(LocalStorageError)
    }

    async fn seek(&mut self, pos: u64) -> Result<u64, Self::Error> {
        Seek::seek(&mut self.inner, SeekFrom::Start(pos)).map_err(LocalStorageError)
    }

    fn size(&self) -> u64 {
        self.size
    }
}

impl RwFile for LocalRwFile {
    async fn write(&mut self, buf: &[u8]) -> Result<usize, Self::Error> {
        let n = Write::write(&mut self.inner, buf).map_err(LocalStorageError)?;
        let pos = Seek::stream_position(&mut self.inner).map_err(LocalStorageError)?;
        self.size = self.size.max(pos);
        Ok(n)
    }

    async fn truncate(&mut self) -> Result<(), Self::Error> {
        let pos = Seek::stream_position(&mut self.inner).map_err(LocalStorageError)?;
        self.inner.set_len(pos).map_err(LocalStorageError)?;
        self.size = pos;
        Ok(())
    }

    async fn flush(&mut self) -> Result<(), Self::Error> {
        Write::flush(&mut self.inner).map_err(LocalStorageError)
    }
}

/// A `platform::Storage` implementation backed by `std::fs`.
///
/// Paths passed to [`LocalFileStorage::open_file`] and [`LocalFileStorage::exists`]
/// are resolved relative to the `soul_root` provided at construction.
///
/// # Example
/// ```no_run
/// # async fn example() {
/// use platform::storage_local::LocalFileStorage;
/// use platform::Storage;
/// let mut storage = LocalFileStorage::new("/home/user/soul");
/// let file = storage.open_file("manifest.bin").await.unwrap();
/// # }
/// ```
pub struct LocalFileStorage {
    root: PathBuf,
}

impl LocalFileStorage {
    /// Create a new storage rooted at `soul_root`.
    #[must_use]
    pub fn new(soul_root: &str) -> Self {
        Self { root: PathBuf::from(soul_root) }
    }

    /// Create from the `MUSIC_PATH` environment variable.
    ///
    /// Returns `None` if `MUSIC_PATH` is not set or is not valid UTF-8.
    #[must_use]
    pub fn from_env() -> Option<Self> {
        std::env::var("MUSIC_PATH").ok().map(|p| Self::new(&p))
    }

    fn resolve(&self, path: &str) -> PathBuf {
        self.root.join(path)
    }
}

impl Storage for LocalFileStorage {
    type Error = LocalStorageError;
    type File = LocalFile;
    type RwFile = LocalRwFile;

    async fn open_file(&mut self, path: &str) -> Result<Self::File, Self::Error> {
        let full = self.resolve(path);
        let file = fs::File::open(&full).map_err(LocalStorageError)?;
        let meta = file.metadata().map_err(LocalStorageError)?;
        Ok(LocalFile { inner: file, size: meta.len() })
    }

    async fn open_rw(&mut self, path: &str) -> Result<Self::RwFile, Self::Error> {
        let full = self.resolve(path);
        let file = fs::OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .open(&full)
            .map_err(LocalStorageError)?;
        let meta = file.metadata().map_err(LocalStorageError)?;
        Ok(LocalRwFile { inner: file, size: meta.len() })
    }

    async fn exists(&mut self, path: &str) -> Result<bool, Self::Error> {
        Ok(self.resolve(path).exists())
    }
}
