//! Non-volatile key/value store abstraction.
//!
//! Backs the persisted settings table: output device, brightness, headphone
//! volume/ceiling, the paired Bluetooth MAC, and the namespace version tag.
//! A version mismatch on boot means the whole namespace is erased and
//! re-initialised rather than partially migrated.

/// Current NVS namespace layout version. Bump when the key set changes
/// incompatibly; [`Nvs::check_version`] erases the namespace on mismatch.
pub const NVS_VERSION: u8 = 1;

/// Fixed-length byte blob big enough for a Bluetooth MAC address.
pub type MacAddress = [u8; 6];

/// Error from an [`Nvs`] operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NvsError {
    /// The underlying medium returned an I/O failure.
    Io,
    /// The stored value's length did not match the requested type.
    SizeMismatch,
    /// No value is stored under this key.
    NotFound,
}

/// Non-volatile key/value store.
///
/// Implementations persist raw bytes under short string keys. Typed
/// convenience methods are provided with default implementations over
/// `get_raw`/`set_raw`, matching the reference firmware's `u8`/`u16`/blob
/// key set (`bt`, `out`, `bright`, `hp_vol_max`, `hp_vol`, `ver`).
pub trait Nvs {
    /// Error type.
    type Error: core::fmt::Debug;

    /// Fetch the raw bytes stored under `key`, writing into `buf`.
    /// Returns the number of bytes written, or `NotFound` if absent.
    fn get_raw(
        &mut self,
        key: &str,
        buf: &mut [u8],
    ) -> impl core::future::Future<Output = Result<usize, Self::Error>>;

    /// Store `value` under `key`, overwriting any previous value.
    fn set_raw(
        &mut self,
        key: &str,
        value: &[u8],
    ) -> impl core::future::Future<Output = Result<(), Self::Error>>;

    /// Erase every key in the namespace.
    fn erase_all(&mut self) -> impl core::future::Future<Output = Result<(), Self::Error>>;

    /// Fetch a `u8` value, or `default` if absent.
    fn get_u8(&mut self, key: &str, default: u8) -> impl core::future::Future<Output = u8>
    where
        Self: Sized,
    {
        async move {
            let mut buf = [0u8; 1];
            match self.get_raw(key, &mut buf).await {
                Ok(1) => buf[0],
                _ => default,
            }
        }
    }

    /// Store a `u8` value.
    fn set_u8(
        &mut self,
        key: &str,
        value: u8,
    ) -> impl core::future::Future<Output = Result<(), Self::Error>>
    where
        Self: Sized,
    {
        async move { self.set_raw(key, &[value]).await }
    }

    /// Fetch a `u16` value (little-endian), or `default` if absent.
    fn get_u16(&mut self, key: &str, default: u16) -> impl core::future::Future<Output = u16>
    where
        Self: Sized,
    {
        async move {
            let mut buf = [0u8; 2];
            match self.get_raw(key, &mut buf).await {
                Ok(2) => u16::from_le_bytes(buf),
                _ => default,
            }
        }
    }

    /// Store a `u16` value (little-endian).
    fn set_u16(
        &mut self,
        key: &str,
        value: u16,
    ) -> impl core::future::Future<Output = Result<(), Self::Error>>
    where
        Self: Sized,
    {
        async move { self.set_raw(key, &value.to_le_bytes()).await }
    }
}

/// Validate the namespace's `ver` key against [`NVS_VERSION`], erasing and
/// re-initialising the namespace when it does not match.
///
/// Returns `true` if the namespace was freshly (re)initialised.
pub async fn check_version<N: Nvs>(nvs: &mut N) -> Result<bool, N::Error> {
    let mut buf = [0u8; 1];
    let matches = matches!(nvs.get_raw("ver", &mut buf).await, Ok(1) if buf[0] == NVS_VERSION);
    if matches {
        return Ok(false);
    }
    nvs.erase_all().await?;
    nvs.set_u8("ver", NVS_VERSION).await?;
    Ok(true)
}

#[cfg(any(test, feature = "std"))]
pub use mock::MockNvs;

#[cfg(any(test, feature = "std"))]
mod mock {
    use super::Nvs;

    /// In-memory [`Nvs`] for tests and the desktop emulator.
    #[derive(Default)]
    pub struct MockNvs {
        entries: heapless::FnvIndexMap<heapless::String<16>, heapless::Vec<u8, 16>, 16>,
    }

    impl MockNvs {
        /// Create an empty store.
        #[must_use]
        pub fn new() -> Self {
            Self::default()
        }
    }

    impl Nvs for MockNvs {
        type Error = core::convert::Infallible;

        async fn get_raw(&mut self, key: &str, buf: &mut [u8]) -> Result<usize, Self::Error> {
            let Ok(k) = heapless::String::<16>::try_from(key) else {
                return Ok(0);
            };
            match self.entries.get(&k) {
                Some(v) => {
                    let n = v.len().min(buf.len());
                    buf[..n].copy_from_slice(&v[..n]);
                    Ok(n)
                }
                None => Ok(0),
            }
        }

        async fn set_raw(&mut self, key: &str, value: &[u8]) -> Result<(), Self::Error> {
            let Ok(k) = heapless::String::<16>::try_from(key) else {
                return Ok(());
            };
            let Ok(v) = heapless::Vec::<u8, 16>::try_from(value) else {
                return Ok(());
            };
            let _ = self.entries.insert(k, v);
            Ok(())
        }

        async fn erase_all(&mut self) -> Result<(), Self::Error> {
            self.entries.clear();
            Ok(())
        }
    }
}
