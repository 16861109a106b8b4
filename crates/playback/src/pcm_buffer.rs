//! Lock-free SPSC PCM ring buffer shared between the Sample Converter
//! (producer, runs on a task) and a sink's drain consumer (I²S DMA-complete
//! ISR or the Bluetooth radio callback).
//!
//! Capacity is fixed at construction and the buffer position is derived
//! entirely from the two monotonic sample counters rather than separate
//! read/write indices, which keeps the invariant in [`PcmBuffer::buffered`]
//! true by construction: `total_sent.wrapping_sub(total_received)` is always
//! exactly the number of samples currently held.

use core::cell::UnsafeCell;
use core::sync::atomic::{AtomicU32, Ordering};

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::signal::Signal;

/// A bounded circular buffer of signed 16-bit PCM samples.
///
/// `N` is the capacity in samples. The backing store is a plain array; on
/// hardware this type is placed in external RAM via `#[link_section]` at
/// the call site (it performs no allocation itself).
pub struct PcmBuffer<const N: usize> {
    buf: UnsafeCell<[i16; N]>,
    total_sent: AtomicU32,
    total_received: AtomicU32,
    space_freed: Signal<CriticalSectionRawMutex, ()>,
}

// Safety: `buf` is only ever written within the sample range
// `[total_received, total_sent)`, and only the single producer advances
// `total_sent` while only the single consumer advances `total_received`.
// Neither side touches the other's region, so concurrent access from one
// producer task and one consumer (task or ISR) never aliases mutably.
unsafe impl<const N: usize> Sync for PcmBuffer<N> {}

impl<const N: usize> PcmBuffer<N> {
    /// Create a new, empty buffer.
    pub const fn new() -> Self {
        Self {
            buf: UnsafeCell::new([0i16; N]),
            total_sent: AtomicU32::new(0),
            total_received: AtomicU32::new(0),
            space_freed: Signal::new(),
        }
    }

    /// Samples produced since construction, modulo 2³².
    pub fn total_sent(&self) -> u32 {
        self.total_sent.load(Ordering::Acquire)
    }

    /// Samples consumed since construction, modulo 2³².
    pub fn total_received(&self) -> u32 {
        self.total_received.load(Ordering::Acquire)
    }

    /// Number of samples currently buffered.
    #[allow(clippy::cast_possible_truncation)] // buffered count is always <= N, which fits usize on every supported target
    pub fn buffered(&self) -> usize {
        self.total_sent().wrapping_sub(self.total_received()) as usize
    }

    /// `true` when no single sample could currently be received — i.e. the
    /// producer is exactly caught up with the consumer.
    pub fn is_empty(&self) -> bool {
        self.buffered() == 0
    }

    /// Block until every sample in `samples` has been copied into the ring.
    /// This is the pipeline's sole producer-backpressure point.
    #[allow(clippy::arithmetic_side_effects)] // indices are reduced mod N on every use; N > 0 is an invariant of the type's only constructor
    pub async fn send(&self, samples: &[i16]) {
        let mut offset = 0;
        while offset < samples.len() {
            let free = N - self.buffered();
            if free == 0 {
                self.space_freed.wait().await;
                continue;
            }
            let n = (samples.len() - offset).min(free);
            let start = self.total_sent() as usize % N;
            // Safety: only the producer writes, and only into the region
            // starting at `total_sent % N` for `n <= free` slots — the
            // consumer never reads ahead of `total_sent`.
            unsafe {
                let buf = &mut *self.buf.get();
                for i in 0..n {
                    buf[(start + i) % N] = samples[offset + i];
                }
            }
            self.total_sent.fetch_add(n as u32, Ordering::Release);
            offset += n;
        }
    }

    /// Non-blocking drain into `dest`. When `mix` is true, samples are
    /// saturation-added into `dest`; otherwise they overwrite it and any
    /// shortfall against `dest.len()` is zero-filled. `is_isr` selects no
    /// behaviour difference in this port beyond documenting the call site —
    /// both paths are already interrupt-safe.
    ///
    /// Returns `true` if buffered samples were available to fulfil any part
    /// of the request (i.e. a waiting producer should be woken).
    #[allow(clippy::arithmetic_side_effects)] // indices are reduced mod N on every use; N > 0 is an invariant of the type's only constructor
    pub fn receive(&self, dest: &mut [i16], mix: bool, _is_isr: bool) -> bool {
        let available = self.buffered().min(dest.len());
        let start = self.total_received() as usize % N;
        // Safety: only the consumer reads, and only from the region
        // starting at `total_received % N` for `available <= buffered`
        // slots — the producer never overwrites un-consumed samples
        // because `send` blocks once `buffered() == N`.
        unsafe {
            let buf = &*self.buf.get();
            for (i, slot) in dest.iter_mut().take(available).enumerate() {
                let sample = buf[(start + i) % N];
                *slot = if mix { slot.saturating_add(sample) } else { sample };
            }
        }
        if !mix {
            for slot in dest.iter_mut().skip(available) {
                *slot = 0;
            }
        }
        if available > 0 {
            self.total_received.fetch_add(available as u32, Ordering::Release);
            self.space_freed.signal(());
        }
        available > 0
    }

    /// Drain the buffer entirely, equivalent to resetting read = write.
    pub fn clear(&self) {
        self.total_received.store(self.total_sent(), Ordering::Release);
        self.space_freed.signal(());
    }
}

impl<const N: usize> Default for PcmBuffer<N> {
    fn default() -> Self {
        Self::new()
    }
}
