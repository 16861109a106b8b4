//! Scanner — walks a FAT32 directory tree and emits supported audio file entries.

use crate::track::AudioFormat;
use heapless::String;

/// A single audio file discovered during a directory scan.
pub struct ScanEntry {
    /// Full path on the FAT32 volume (up to 256 bytes).
    pub path: String<256>,
    /// Detected audio format (from file extension).
    pub format: AudioFormat,
}

/// Stateless helper for file-system traversal and extension filtering.
pub struct Scanner;

impl Scanner {
    /// Returns `true` when `ext` is a supported audio file extension.
    ///
    /// The comparison is **case-insensitive** and does not allocate; it
    /// operates entirely in `core` so it is `no_std` compatible.
    ///
    /// Supported extensions: `flac`, `mp3`, `wav`.
    pub fn is_supported_extension(ext: &str) -> bool {
        // Compare byte-by-byte with ASCII lowercasing to avoid std::string.
        eq_ignore_ascii_case(ext, "flac")
            || eq_ignore_ascii_case(ext, "mp3")
            || eq_ignore_ascii_case(ext, "wav")
    }

    /// Derive an [`AudioFormat`] from a file extension, or return `None`.
    pub fn format_for_extension(ext: &str) -> Option<AudioFormat> {
        if eq_ignore_ascii_case(ext, "flac") {
            Some(AudioFormat::Flac)
        } else if eq_ignore_ascii_case(ext, "mp3") {
            Some(AudioFormat::Mp3)
        } else if eq_ignore_ascii_case(ext, "wav") {
            Some(AudioFormat::Wav)
        } else {
            None
        }
    }
}

/// Compare two byte strings case-insensitively (ASCII only).
///
/// This avoids any `std` dependency; it is equivalent to
/// `a.eq_ignore_ascii_case(b)` which is available in `core`.
fn eq_ignore_ascii_case(a: &str, b: &str) -> bool {
    a.eq_ignore_ascii_case(b)
}
