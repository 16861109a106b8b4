//! Playlist files — plain UTF-8, one track URI per line, `#`-prefixed lines
//! treated as comments and skipped.
//!
//! [`Playlist`] is read-only traversal (`next`/`prev`/`skip_to`); it keeps a
//! sidecar byte-offset cache (one entry every `sample_size` tracks, CBOR on
//! disk) so resuming a large queue doesn't require a full linear rescan.
//! [`MutablePlaylist`] wraps it and adds `append`/`clear`.

use heapless::{String, Vec};
use minicbor::decode::Decoder;
use minicbor::encode::write::Cursor as CborCursor;
use minicbor::Encoder;
use platform::storage::{File, RwFile, Storage};

/// Default stride between cached byte offsets, in track count.
pub const DEFAULT_SAMPLE_SIZE: u32 = 50;

/// Above this on-disk size, [`MutablePlaylist::open`] aborts a missing-cache
/// scan and clears the file instead of rescanning it line by line.
pub const ABORT_RESCAN_THRESHOLD_BYTES: u64 = 50_000;

const MAX_CACHE_ENTRIES: usize = 256;
const MAX_URI_LEN: usize = 512;
const LINE_BUF_LEN: usize = 512;

/// Error from [`Playlist`]/[`MutablePlaylist`] operations.
#[derive(Debug)]
pub enum PlaylistError<E: core::fmt::Debug> {
    /// I/O error from the underlying [`Storage`] implementation.
    Storage(E),
    /// A line, or the encoded cache, did not fit in the fixed-capacity buffers.
    BufferFull,
    /// The sidecar cache was missing, corrupt, or stale and was ignored.
    StaleCache,
}

/// A playlist file opened for read-only traversal.
pub struct Playlist<S: Storage> {
    storage: S,
    file: Option<S::RwFile>,
    path: String<128>,
    total_size: u32,
    /// `None` is the "before the first entry" sentinel (`pos_ == -1` in the
    /// original implementation).
    pos: Option<u32>,
    /// Byte offset of the file cursor, tracked manually since [`File`]
    /// exposes `seek`/`size` but not a position query.
    cursor: u64,
    current_value: String<MAX_URI_LEN>,
    file_error: bool,
    offset_cache: Vec<u64, MAX_CACHE_ENTRIES>,
    sample_size: u32,
}

impl<S: Storage> Playlist<S> {
    /// Create a playlist bound to `path`. Does not touch storage until
    /// [`open`](Self::open) is called.
    pub fn new(storage: S, path: &str) -> Self {
        let mut p = String::new();
        let _ = p.push_str(path);
        Self {
            storage,
            file: None,
            path: p,
            total_size: 0,
            pos: None,
            cursor: 0,
            current_value: String::new(),
            file_error: false,
            offset_cache: Vec::new(),
            sample_size: DEFAULT_SAMPLE_SIZE,
        }
    }

    fn cache_path(&self) -> String<144> {
        let mut s = String::new();
        let _ = s.push_str(self.path.as_str());
        let _ = s.push_str(".cache");
        s
    }

    /// Open the playlist file. Loads the sidecar cache when it matches the
    /// live file size; otherwise scans linearly and rebuilds it as a side
    /// effect. Returns `true` if the file is open and readable.
    pub async fn open(&mut self) -> bool {
        if self.file.is_some() {
            return true;
        }
        let file = match self.storage.open_rw(self.path.as_str()).await {
            Ok(f) => f,
            Err(_) => return false,
        };
        self.file = Some(file);
        self.file_error = false;
        self.cursor = 0;

        if self.deserialise_cache().await.is_err() {
            self.count_items().await;
            self.skip_to_without_cache(0).await;
        }

        !self.file_error
    }

    /// 0-based position of the current entry (0 if before the first entry).
    #[must_use]
    pub fn current_position(&self) -> u32 {
        self.pos.unwrap_or(0)
    }

    /// Number of entries in the playlist.
    #[must_use]
    pub fn size(&self) -> u32 {
        self.total_size
    }

    /// The current entry's URI, empty if at/before EOF.
    #[must_use]
    pub fn value(&self) -> &str {
        self.current_value.as_str()
    }

    /// `true` if advancing once more would run off the end of the file.
    #[must_use]
    pub fn at_end(&self) -> bool {
        let next = self.pos.map_or(0, |p| p.saturating_add(1));
        next >= self.total_size
    }

    /// Advance to the next entry, if any.
    pub async fn next(&mut self) {
        if self.file_error {
            return;
        }
        let next_pos = self.pos.map_or(0, |p| p.saturating_add(1));
        if next_pos < self.total_size {
            self.advance_by(1).await;
        }
    }

    /// Move back to the previous entry. Implemented as a rescan from the
    /// nearest checkpoint, same as the general [`skip_to`](Self::skip_to)
    /// path.
    pub async fn prev(&mut self) {
        if self.file_error {
            return;
        }
        let target = self.pos.unwrap_or(0).saturating_sub(1);
        self.skip_to_locked(target).await;
    }

    /// Seek to an absolute 0-based position, using the offset cache when
    /// possible.
    pub async fn skip_to(&mut self, position: u32) {
        self.skip_to_locked(position).await;
    }

    async fn skip_to_locked(&mut self, position: u32) {
        if self.file.is_none() || self.file_error {
            return;
        }
        let remainder = position % self.sample_size;
        let stride_start = position.saturating_sub(remainder);
        let quotient = stride_start / self.sample_size;
        let Some(&entry) = self.offset_cache.get(quotient as usize) else {
            self.skip_to_without_cache(position).await;
            return;
        };
        let Some(file) = self.file.as_mut() else { return };
        if file.seek(entry).await.is_err() {
            self.file_error = true;
            return;
        }
        self.cursor = entry;
        // `entry` was recorded as the byte offset immediately before entry
        // `stride_start`, so the current logical position is the one just
        // before it.
        self.pos = if stride_start == 0 { None } else { Some(stride_start.saturating_sub(1)) };
        self.advance_by(remainder.saturating_add(1)).await;
    }

    async fn skip_to_without_cache(&mut self, position: u32) {
        let current = self.pos.map(i64::from).unwrap_or(-1);
        let target = i64::from(position);
        if target >= current {
            #[allow(clippy::cast_sign_loss)] // target >= current is checked above, so the difference is non-negative
            let amount = (target - current) as u32;
            self.advance_by(amount).await;
            return;
        }
        self.pos = None;
        let Some(file) = self.file.as_mut() else { return };
        if file.seek(0).await.is_err() {
            self.file_error = true;
            return;
        }
        self.cursor = 0;
        self.advance_by(position.saturating_add(1)).await;
    }

    /// Scan the whole file from its current position, counting entries and
    /// recording one byte offset every `sample_size` entries.
    async fn count_items(&mut self) {
        loop {
            let before = self.cursor;
            let item = self.next_item().await;
            if item.is_none() {
                break;
            }
            if self.total_size % self.sample_size == 0 {
                let _ = self.offset_cache.push(before);
            }
            self.total_size = self.total_size.saturating_add(1);
        }
        if let Some(file) = self.file.as_mut() {
            let _ = file.seek(0).await;
            self.cursor = 0;
        }
    }

    async fn advance_by(&mut self, amount: u32) -> bool {
        let mut remaining = amount;
        let mut last_item: Option<String<MAX_URI_LEN>> = None;
        while remaining > 0 {
            let Some(item) = self.next_item().await else { break };
            self.pos = Some(self.pos.map_or(0, |p| p.saturating_add(1)));
            last_item = Some(item);
            remaining = remaining.saturating_sub(1);
        }
        if let Some(item) = last_item {
            self.current_value = item;
        }
        remaining == 0
    }

    /// Read the next non-comment line from the file, advancing `self.cursor`
    /// by exactly the number of bytes consumed (including the newline).
    async fn next_item(&mut self) -> Option<String<MAX_URI_LEN>> {
        loop {
            let mut buf = [0u8; LINE_BUF_LEN];
            let mut len = 0usize;
            let line_complete = loop {
                let file = self.file.as_mut()?;
                let mut byte = [0u8; 1];
                let n = match file.read(&mut byte).await {
                    Ok(n) => n,
                    Err(_) => {
                        self.file_error = true;
                        return None;
                    }
                };
                if n == 0 {
                    break len > 0;
                }
                self.cursor = self.cursor.saturating_add(1);
                if byte[0] == b'\n' {
                    break true;
                }
                if let Some(slot) = buf.get_mut(len) {
                    *slot = byte[0];
                    len = len.saturating_add(1);
                } else {
                    self.file_error = true;
                    return None;
                }
            };
            if !line_complete {
                return None;
            }
            let Ok(line) = core::str::from_utf8(buf.get(..len).unwrap_or(&[])) else {
                self.file_error = true;
                return None;
            };
            if line.starts_with('#') {
                continue;
            }
            let mut out = String::new();
            if out.push_str(line).is_err() {
                self.file_error = true;
                return None;
            }
            return Some(out);
        }
    }

    /// Persist the offset cache alongside the playlist file.
    ///
    /// # Errors
    ///
    /// Returns an error if the playlist is not open, or if encoding or
    /// writing the cache file fails.
    pub async fn serialise_cache(&mut self) -> Result<(), PlaylistError<S::Error>> {
        let Some(file) = self.file.as_ref() else {
            return Err(PlaylistError::BufferFull);
        };
        let file_size = file.size();
        let cache_path = self.cache_path();
        let mut cache_file = self
            .storage
            .open_rw(cache_path.as_str())
            .await
            .map_err(PlaylistError::Storage)?;

        let mut buf = [0u8; 4096];
        let mut enc = Encoder::new(CborCursor::new(&mut buf[..]));
        let len = 2u64.saturating_add(self.offset_cache.len() as u64);
        enc.array(len).map_err(|_| PlaylistError::BufferFull)?;
        enc.u64(file_size).map_err(|_| PlaylistError::BufferFull)?;
        enc.u64(u64::from(self.total_size)).map_err(|_| PlaylistError::BufferFull)?;
        for &offset in &self.offset_cache {
            enc.u64(offset).map_err(|_| PlaylistError::BufferFull)?;
        }
        let written = enc.into_writer().position();

        cache_file.truncate().await.map_err(PlaylistError::Storage)?;
        cache_file
            .write(buf.get(..written).unwrap_or(&[]))
            .await
            .map_err(PlaylistError::Storage)?;
        cache_file.flush().await.map_err(PlaylistError::Storage)?;
        Ok(())
    }

    /// Load the offset cache, refusing it if the stored file size doesn't
    /// match the live playlist file size.
    ///
    /// # Errors
    ///
    /// Returns [`PlaylistError::StaleCache`] if the cache is missing,
    /// corrupt, or stale.
    pub async fn deserialise_cache(&mut self) -> Result<(), PlaylistError<S::Error>> {
        let Some(live_size) = self.file.as_ref().map(File::size) else {
            return Err(PlaylistError::StaleCache);
        };
        let cache_path = self.cache_path();
        let mut cache_file = self
            .storage
            .open_rw(cache_path.as_str())
            .await
            .map_err(|_| PlaylistError::StaleCache)?;

        let mut buf = [0u8; 4096];
        let mut total_read = 0usize;
        loop {
            let Some(slot) = buf.get_mut(total_read..) else { break };
            if slot.is_empty() {
                break;
            }
            let n = cache_file.read(slot).await.map_err(|_| PlaylistError::StaleCache)?;
            if n == 0 {
                break;
            }
            total_read = total_read.saturating_add(n);
        }

        let bytes = buf.get(..total_read).unwrap_or(&[]);
        let mut dec = Decoder::new(bytes);
        let Some(len) = dec.array().map_err(|_| PlaylistError::StaleCache)?.filter(|&l| l >= 2)
        else {
            return Err(PlaylistError::StaleCache);
        };
        let stored_size = dec.u64().map_err(|_| PlaylistError::StaleCache)?;
        if stored_size != live_size {
            return Err(PlaylistError::StaleCache);
        }
        let total = dec.u64().map_err(|_| PlaylistError::StaleCache)?;
        #[allow(clippy::cast_possible_truncation)] // playlist track counts fit well within u32 on every supported target
        let total = total as u32;

        let mut offsets = Vec::new();
        for _ in 0..len.saturating_sub(2) {
            let offset = dec.u64().map_err(|_| PlaylistError::StaleCache)?;
            if offsets.push(offset).is_err() {
                break;
            }
        }

        self.total_size = total;
        self.offset_cache = offsets;
        self.pos = None;
        // Seek to the first entry via the cache we just loaded, rather than
        // a linear scan from byte 0.
        self.skip_to_locked(0).await;
        Ok(())
    }
}

/// An append-only playlist: [`Playlist`] plus `append`/`clear`.
pub struct MutablePlaylist<S: Storage> {
    inner: Playlist<S>,
}

impl<S: Storage> MutablePlaylist<S> {
    /// Create a mutable playlist bound to `path`.
    pub fn new(storage: S, path: &str) -> Self {
        Self { inner: Playlist::new(storage, path) }
    }

    /// Open the playlist file. If no cache is found and the file exceeds
    /// [`ABORT_RESCAN_THRESHOLD_BYTES`], clears it rather than performing a
    /// slow linear rescan of a possibly-corrupt file.
    pub async fn open(&mut self) -> bool {
        if self.inner.file.is_some() {
            return true;
        }
        let file = match self.inner.storage.open_rw(self.inner.path.as_str()).await {
            Ok(f) => f,
            Err(_) => return false,
        };
        let queue_size = file.size();
        self.inner.file = Some(file);
        self.inner.file_error = false;
        self.inner.cursor = 0;

        if self.inner.deserialise_cache().await.is_err() {
            if queue_size > ABORT_RESCAN_THRESHOLD_BYTES {
                let _ = self.clear().await;
            } else {
                self.inner.count_items().await;
                self.inner.skip_to_without_cache(0).await;
            }
        }

        !self.inner.file_error
    }

    /// Append a URI as a new last entry, restoring the read cursor
    /// afterwards so an in-progress traversal is undisturbed.
    pub async fn append(&mut self, uri: &str) {
        if self.inner.file_error {
            return;
        }
        let resume_at = self.inner.cursor;
        let first_entry = self.inner.current_value.is_empty();

        let Some(file) = self.inner.file.as_mut() else { return };
        let end = file.size();
        if file.seek(end).await.is_err() {
            self.inner.file_error = true;
            return;
        }
        let mut line = String::<MAX_URI_LEN>::new();
        if line.push_str(uri).is_err() || line.push('\n').is_err() {
            self.inner.file_error = true;
            return;
        }
        if file.write(line.as_bytes()).await.is_err() {
            self.inner.file_error = true;
            return;
        }
        if self.inner.total_size % self.inner.sample_size == 0 {
            let _ = self.inner.offset_cache.push(end);
        }
        if first_entry {
            let mut v = String::new();
            let _ = v.push_str(uri);
            self.inner.current_value = v;
        }
        self.inner.total_size = self.inner.total_size.saturating_add(1);

        let Some(file) = self.inner.file.as_mut() else { return };
        if file.seek(resume_at).await.is_err() || file.flush().await.is_err() {
            self.inner.file_error = true;
            return;
        }
        self.inner.cursor = resume_at;
    }

    /// Truncate the file and reset all in-memory state, recovering from a
    /// prior I/O error if the file needs to be recreated.
    pub async fn clear(&mut self) -> bool {
        if self.inner.file_error {
            self.inner.file_error = false;
            self.inner.file = None;
        }
        if self.inner.file.is_none() {
            match self.inner.storage.open_rw(self.inner.path.as_str()).await {
                Ok(f) => self.inner.file = Some(f),
                Err(_) => {
                    self.inner.file_error = true;
                    return false;
                }
            }
        }
        let Some(file) = self.inner.file.as_mut() else { return false };
        if file.seek(0).await.is_err() || file.truncate().await.is_err() {
            self.inner.file_error = true;
            return false;
        }
        self.inner.total_size = 0;
        self.inner.current_value = String::new();
        self.inner.offset_cache = Vec::new();
        self.inner.pos = None;
        self.inner.cursor = 0;
        true
    }
}

impl<S: Storage> core::ops::Deref for MutablePlaylist<S> {
    type Target = Playlist<S>;
    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl<S: Storage> core::ops::DerefMut for MutablePlaylist<S> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.inner
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    clippy::indexing_slicing
)]
mod tests {
    use super::*;
    use platform::storage_local::LocalFileStorage;
    use tempfile::TempDir;

    async fn write_lines(dir: &str, name: &str, lines: &[&str]) {
        let mut storage = LocalFileStorage::new(dir);
        let mut file = storage.open_rw(name).await.unwrap();
        for line in lines {
            let mut s = heapless::String::<MAX_URI_LEN>::new();
            let _ = s.push_str(line);
            let _ = s.push('\n');
            file.write(s.as_bytes()).await.unwrap();
        }
        file.flush().await.unwrap();
    }

    #[tokio::test]
    async fn open_scans_linearly_without_cache() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path().to_str().unwrap();
        write_lines(root, "pl.m3u", &["a.flac", "# a comment", "b.flac", "c.flac"]).await;

        let storage = LocalFileStorage::new(root);
        let mut pl = Playlist::new(storage, "pl.m3u");
        assert!(pl.open().await);
        assert_eq!(pl.size(), 3);
        assert_eq!(pl.value(), "a.flac");
    }

    #[tokio::test]
    async fn next_and_prev_walk_entries() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path().to_str().unwrap();
        write_lines(root, "pl.m3u", &["a", "b", "c"]).await;

        let storage = LocalFileStorage::new(root);
        let mut pl = Playlist::new(storage, "pl.m3u");
        pl.open().await;
        pl.next().await;
        assert_eq!(pl.value(), "b");
        pl.next().await;
        assert_eq!(pl.value(), "c");
        assert!(pl.at_end());
        pl.prev().await;
        assert_eq!(pl.value(), "b");
    }

    #[tokio::test]
    async fn skip_to_lands_on_correct_entry_without_cache() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path().to_str().unwrap();
        let lines: std::vec::Vec<std::string::String> =
            (0..8).map(|i| std::format!("track{i}")).collect();
        let refs: std::vec::Vec<&str> = lines.iter().map(std::string::String::as_str).collect();
        write_lines(root, "pl.m3u", &refs).await;

        let storage = LocalFileStorage::new(root);
        let mut pl = Playlist::new(storage, "pl.m3u");
        pl.open().await;
        pl.skip_to(5).await;
        assert_eq!(pl.value(), "track5");
    }

    #[tokio::test]
    async fn skip_to_lands_on_correct_entry_using_cache() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path().to_str().unwrap();
        let lines: std::vec::Vec<std::string::String> =
            (0..120).map(|i| std::format!("track{i}")).collect();
        let refs: std::vec::Vec<&str> = lines.iter().map(std::string::String::as_str).collect();
        write_lines(root, "pl.m3u", &refs).await;

        let storage = LocalFileStorage::new(root);
        let mut pl = Playlist::new(storage, "pl.m3u");
        pl.open().await; // builds the offset cache as a side effect (sample_size=50)
        pl.skip_to(101).await;
        assert_eq!(pl.value(), "track101");
        pl.skip_to(49).await;
        assert_eq!(pl.value(), "track49");
    }

    #[tokio::test]
    async fn mutable_append_adds_entry_and_restores_position() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path().to_str().unwrap();
        write_lines(root, "pl.m3u", &["a", "b"]).await;

        let storage = LocalFileStorage::new(root);
        let mut pl = MutablePlaylist::new(storage, "pl.m3u");
        pl.open().await;
        pl.next().await;
        assert_eq!(pl.value(), "b");
        pl.append("c").await;
        assert_eq!(pl.size(), 3);
        assert_eq!(pl.value(), "b");
    }

    #[tokio::test]
    async fn mutable_clear_truncates_and_resets() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path().to_str().unwrap();
        write_lines(root, "pl.m3u", &["a", "b"]).await;

        let storage = LocalFileStorage::new(root);
        let mut pl = MutablePlaylist::new(storage, "pl.m3u");
        pl.open().await;
        assert!(pl.clear().await);
        assert_eq!(pl.size(), 0);
        assert_eq!(pl.value(), "");
    }

    #[tokio::test]
    async fn cache_roundtrips_through_serialise_deserialise() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path().to_str().unwrap();
        write_lines(root, "pl.m3u", &["a", "b", "c"]).await;

        let storage = LocalFileStorage::new(root);
        let mut pl = Playlist::new(storage, "pl.m3u");
        pl.open().await;
        pl.serialise_cache().await.unwrap();

        let storage2 = LocalFileStorage::new(root);
        let mut pl2 = Playlist::new(storage2, "pl.m3u");
        pl2.open().await;
        assert_eq!(pl2.size(), 3);
    }
}
