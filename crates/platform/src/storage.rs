//! Storage abstraction for file systems

/// Storage trait for file system access
pub trait Storage {
    /// Error type
    type Error: core::fmt::Debug;
    /// File type
    type File: File<Error = Self::Error>;
    /// Read-write file type, used by callers that append to or truncate a
    /// file (the playlist store; the writer side of the Soul library).
    type RwFile: RwFile<Error = Self::Error>;

    /// Open file for reading
    fn open_file(
        &mut self,
        path: &str,
    ) -> impl core::future::Future<Output = Result<Self::File, Self::Error>>;

    /// Open a file for reading and writing, creating it if it does not exist.
    /// The cursor starts at position 0; existing contents are preserved.
    fn open_rw(
        &mut self,
        path: &str,
    ) -> impl core::future::Future<Output = Result<Self::RwFile, Self::Error>>;

    /// Check if path exists
    fn exists(
        &mut self,
        path: &str,
    ) -> impl core::future::Future<Output = Result<bool, Self::Error>>;
}

/// File trait for reading files
pub trait File {
    /// Error type
    type Error: core::fmt::Debug;

    /// Read from current position
    fn read(
        &mut self,
        buf: &mut [u8],
    ) -> impl core::future::Future<Output = Result<usize, Self::Error>>;

    /// Seek to position
    fn seek(&mut self, pos: u64) -> impl core::future::Future<Output = Result<u64, Self::Error>>;

    /// Get file size
    fn size(&self) -> u64;
}

/// A file opened for both reading and writing.
///
/// Extends [`File`] with the mutating operations the playlist store needs:
/// appending new entries, truncating on `clear()`, and flushing so a
/// concurrent reader observes a consistent file size.
pub trait RwFile: File {
    /// Write `buf` at the current position, returning the number of bytes
    /// written. May write fewer bytes than requested on a short write.
    fn write(
        &mut self,
        buf: &[u8],
    ) -> impl core::future::Future<Output = Result<usize, Self::Error>>;

    /// Truncate the file to the current cursor position.
    fn truncate(&mut self) -> impl core::future::Future<Output = Result<(), Self::Error>>;

    /// Flush any buffered writes to the backing medium.
    fn flush(&mut self) -> impl core::future::Future<Output = Result<(), Self::Error>>;
}
