//! TrackQueue — ordered, optionally-shuffled playback order.
//!
//! A `TrackQueue<N>` holds up to `N` [`QueueItem`]s plus a current position,
//! repeat/replay/random flags, and (when randomised) a shuffled-order vector
//! of indices into the backing store. Mutating the queue never touches disk
//! or the active sink directly — it only returns a [`QueueReason`] tag that
//! the caller (the Audio FSM) translates into a SetTrack event.

use heapless::{String, Vec};

/// Maximum length of a stored file URI.
pub const MAX_URI_LEN: usize = 256;

/// A single queue entry: either a resolved library track id, or a raw URI
/// (e.g. a one-off file opened outside the scanned library).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueueItem {
    /// Index into a `TrackIndex`.
    TrackId(u32),
    /// A filesystem or playlist URI not backed by the index.
    Uri(String<MAX_URI_LEN>),
}

/// Why a queue mutation happened, mirrored onto the SetTrack translation
/// the Audio FSM performs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueueReason {
    /// A user-driven jump to an explicit position.
    ExplicitUpdate,
    /// `repeat` is set; re-cut to the same URI from the start.
    RepeatingLastTrack,
    /// The previous track finished naturally and the queue advanced.
    TrackFinished,
    /// The queue was restored from persisted state; no SetTrack follows.
    Deserialised,
    /// The queue was replaced wholesale (e.g. "play this folder").
    BulkLoad,
}

/// Errors from queue mutation.
#[derive(Debug, PartialEq, Eq)]
pub enum QueueError {
    /// The queue is at its compile-time capacity `N`.
    Full,
}

/// Minimal xorshift32 PRNG — deterministic given a caller-supplied seed.
///
/// `no_std` has no entropy source; callers seed this from a hardware RNG,
/// a monotonic tick counter, or a fixed value in tests.
struct XorShift32 {
    state: u32,
}

impl XorShift32 {
    fn new(seed: u32) -> Self {
        XorShift32 {
            state: if seed == 0 { 1 } else { seed },
        }
    }

    fn next_u32(&mut self) -> u32 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 17;
        x ^= x << 5;
        self.state = x;
        x
    }
}

/// Ordered, possibly-shuffled list of queue items with a current position.
pub struct TrackQueue<const N: usize> {
    items: Vec<QueueItem, N>,
    shuffled_order: Option<Vec<u16, N>>,
    position: usize,
    repeat: bool,
    replay: bool,
    random: bool,
}

impl<const N: usize> TrackQueue<N> {
    /// Create an empty queue with all flags cleared.
    pub fn new() -> Self {
        TrackQueue {
            items: Vec::new(),
            shuffled_order: None,
            position: 0,
            repeat: false,
            replay: false,
            random: false,
        }
    }

    /// Number of items in the queue, irrespective of shuffle order.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// `true` when the queue holds no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Current position. May equal `len()`, meaning "no current item".
    pub fn position(&self) -> usize {
        self.position
    }

    /// `true` if `repeat` (repeat-current-track) is set.
    pub fn repeat(&self) -> bool {
        self.repeat
    }

    /// `true` if `replay` (wrap to start when the queue is exhausted) is set.
    pub fn replay(&self) -> bool {
        self.replay
    }

    /// `true` if the queue is presenting items in shuffled order.
    pub fn random(&self) -> bool {
        self.random
    }

    /// The item at the current position, or `None` if the queue is empty or
    /// `position()` has run past the last entry.
    pub fn current(&self) -> Option<&QueueItem> {
        let idx = self.resolve_index(self.position)?;
        self.items.get(idx)
    }

    fn resolve_index(&self, position: usize) -> Option<usize> {
        match &self.shuffled_order {
            Some(order) => order.get(position).map(|&i| i as usize),
            None => {
                if position < self.items.len() {
                    Some(position)
                } else {
                    None
                }
            }
        }
    }

    /// Set the repeat-current-track flag.
    pub fn set_repeat(&mut self, repeat: bool) {
        self.repeat = repeat;
    }

    /// Set the replay-at-end flag.
    pub fn set_replay(&mut self, replay: bool) {
        self.replay = replay;
    }

    /// Enable or disable shuffled order.
    ///
    /// `seed` drives a deterministic Fisher-Yates shuffle; the currently
    /// playing item is pinned to the front so toggling shuffle mid-playback
    /// never changes what's sounding right now. Disabling restores linear
    /// order and resets position to the current item's real index.
    pub fn set_random(&mut self, random: bool, seed: u32) {
        let current_idx = self.resolve_index(self.position);
        self.random = random;
        if !random {
            self.shuffled_order = None;
            self.position = current_idx.unwrap_or(self.items.len());
            return;
        }
        self.shuffled_order = Some(self.build_shuffled_order(seed, current_idx));
        self.position = 0;
    }

    // Arithmetic here is all bounded by `len`, established by the loop
    // ranges below (`i` and `j` are always valid indices into `order`).
    #[allow(clippy::arithmetic_side_effects)]
    fn build_shuffled_order(&self, seed: u32, pin: Option<usize>) -> Vec<u16, N> {
        let len = self.items.len();
        let mut order: Vec<u16, N> = Vec::new();
        for i in 0..len {
            // Capacity is N and len <= N, so this push cannot fail.
            let _ = order.push(i as u16);
        }
        if let Some(pin_idx) = pin {
            if let Some(front) = order.iter().position(|&i| i as usize == pin_idx) {
                order.swap(0, front);
            }
        }
        let mut rng = XorShift32::new(seed);
        let start = if pin.is_some() { 1 } else { 0 };
        let mut i = len;
        while i > start + 1 {
            i -= 1;
            let span = i - start + 1;
            let j = start + (rng.next_u32() as usize % span);
            order.swap(i, j);
        }
        order
    }

    /// Append an item to the end of the queue. Does not change `position`
    /// or emit a reason — appending never alters the current item.
    pub fn append(&mut self, item: QueueItem) -> Result<(), QueueError> {
        self.items.push(item).map_err(|_| QueueError::Full)?;
        if let Some(order) = &mut self.shuffled_order {
            let new_idx = self.items.len().saturating_sub(1);
            let _ = order.push(new_idx as u16);
        }
        Ok(())
    }

    /// Replace the whole queue with `items`, reset position to 0 (or to
    /// "none" if empty), and clear the shuffle order. Always reports
    /// [`QueueReason::BulkLoad`] — whether that should be translated into an
    /// `ExplicitUpdate` against position 0 is the caller's call, since it
    /// depends on whether the queue was empty *before* this call.
    pub fn bulk_load<I: IntoIterator<Item = QueueItem>>(
        &mut self,
        items: I,
    ) -> Result<QueueReason, QueueError> {
        let mut replacement: Vec<QueueItem, N> = Vec::new();
        for item in items {
            replacement.push(item).map_err(|_| QueueError::Full)?;
        }
        self.items = replacement;
        self.shuffled_order = None;
        self.position = 0;
        if self.random {
            self.shuffled_order = Some(self.build_shuffled_order(0, None));
        }
        Ok(QueueReason::BulkLoad)
    }

    /// Restore a previously persisted queue without emitting a SetTrack —
    /// resume logic re-seeks separately once this returns.
    pub fn load_deserialised<I: IntoIterator<Item = QueueItem>>(
        &mut self,
        items: I,
        position: usize,
    ) -> Result<QueueReason, QueueError> {
        let mut replacement: Vec<QueueItem, N> = Vec::new();
        for item in items {
            replacement.push(item).map_err(|_| QueueError::Full)?;
        }
        self.items = replacement;
        self.shuffled_order = None;
        self.position = position.min(self.items.len());
        Ok(QueueReason::Deserialised)
    }

    /// Jump explicitly to `position` (clamped to `[0, len]`).
    pub fn jump_to(&mut self, position: usize) -> QueueReason {
        self.position = position.min(self.items.len());
        QueueReason::ExplicitUpdate
    }

    /// Remove every item and reset all positional state. Flags (repeat,
    /// replay, random) are left untouched.
    pub fn clear(&mut self) {
        self.items.clear();
        self.shuffled_order = None;
        self.position = 0;
    }

    /// Advance past the current track on natural stream end.
    ///
    /// If `repeat` is set, the current position does not move and
    /// [`QueueReason::RepeatingLastTrack`] is returned so the caller re-cuts
    /// to the same URI. Otherwise the position advances by one; if that
    /// runs past the end, it wraps to 0 when `replay` is set or parks at
    /// `len()` (no current item) otherwise.
    pub fn advance(&mut self) -> QueueReason {
        if self.repeat {
            return QueueReason::RepeatingLastTrack;
        }
        let len = self.len();
        let next = self.position.saturating_add(1);
        self.position = if next < len {
            next
        } else if self.replay && len > 0 {
            0
        } else {
            len
        };
        QueueReason::TrackFinished
    }
}

impl<const N: usize> Default for TrackQueue<N> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn uri(s: &str) -> QueueItem {
        QueueItem::Uri(String::try_from(s).expect("uri fits"))
    }

    #[test]
    fn test_new_queue_is_empty_with_no_current() {
        let q: TrackQueue<8> = TrackQueue::new();
        assert!(q.is_empty());
        assert_eq!(q.current(), None);
        assert_eq!(q.position(), 0);
    }

    #[test]
    fn test_append_does_not_move_position() {
        let mut q: TrackQueue<8> = TrackQueue::new();
        q.append(uri("a.mp3")).expect("append");
        q.append(uri("b.mp3")).expect("append");
        assert_eq!(q.position(), 0);
        assert_eq!(q.current(), Some(&uri("a.mp3")));
    }

    #[test]
    fn test_append_beyond_capacity_errors() {
        let mut q: TrackQueue<2> = TrackQueue::new();
        q.append(uri("a.mp3")).expect("append 1");
        q.append(uri("b.mp3")).expect("append 2");
        assert_eq!(q.append(uri("c.mp3")), Err(QueueError::Full));
    }

    #[test]
    fn test_advance_moves_to_next_entry() {
        let mut q: TrackQueue<8> = TrackQueue::new();
        q.append(uri("a.mp3")).expect("append");
        q.append(uri("b.mp3")).expect("append");
        let reason = q.advance();
        assert_eq!(reason, QueueReason::TrackFinished);
        assert_eq!(q.current(), Some(&uri("b.mp3")));
    }

    #[test]
    fn test_advance_past_end_without_replay_parks_at_len() {
        let mut q: TrackQueue<8> = TrackQueue::new();
        q.append(uri("a.mp3")).expect("append");
        q.advance();
        assert_eq!(q.position(), 1);
        assert_eq!(q.current(), None);
    }

    #[test]
    fn test_advance_past_end_with_replay_wraps_to_zero() {
        let mut q: TrackQueue<8> = TrackQueue::new();
        q.append(uri("a.mp3")).expect("append");
        q.append(uri("b.mp3")).expect("append");
        q.set_replay(true);
        q.advance();
        q.advance();
        assert_eq!(q.position(), 0);
        assert_eq!(q.current(), Some(&uri("a.mp3")));
    }

    #[test]
    fn test_repeat_keeps_position_and_reports_repeating() {
        let mut q: TrackQueue<8> = TrackQueue::new();
        q.append(uri("a.mp3")).expect("append");
        q.append(uri("b.mp3")).expect("append");
        q.set_repeat(true);
        let reason = q.advance();
        assert_eq!(reason, QueueReason::RepeatingLastTrack);
        assert_eq!(q.position(), 0);
        assert_eq!(q.current(), Some(&uri("a.mp3")));
    }

    #[test]
    fn test_jump_to_clamps_within_bounds() {
        let mut q: TrackQueue<8> = TrackQueue::new();
        q.append(uri("a.mp3")).expect("append");
        q.append(uri("b.mp3")).expect("append");
        let reason = q.jump_to(50);
        assert_eq!(reason, QueueReason::ExplicitUpdate);
        assert_eq!(q.position(), 2);
        assert_eq!(q.current(), None);
    }

    #[test]
    fn test_bulk_load_replaces_queue_and_resets_position() {
        let mut q: TrackQueue<8> = TrackQueue::new();
        q.append(uri("old.mp3")).expect("append");
        let reason = q
            .bulk_load([uri("x.mp3"), uri("y.mp3")])
            .expect("bulk load");
        assert_eq!(reason, QueueReason::BulkLoad);
        assert_eq!(q.len(), 2);
        assert_eq!(q.current(), Some(&uri("x.mp3")));
    }

    #[test]
    fn test_load_deserialised_restores_position_without_clamping_surprises() {
        let mut q: TrackQueue<8> = TrackQueue::new();
        let reason = q
            .load_deserialised([uri("x.mp3"), uri("y.mp3"), uri("z.mp3")], 2)
            .expect("load");
        assert_eq!(reason, QueueReason::Deserialised);
        assert_eq!(q.position(), 2);
        assert_eq!(q.current(), Some(&uri("z.mp3")));
    }

    #[test]
    fn test_clear_resets_items_and_position() {
        let mut q: TrackQueue<8> = TrackQueue::new();
        q.append(uri("a.mp3")).expect("append");
        q.advance();
        q.clear();
        assert!(q.is_empty());
        assert_eq!(q.position(), 0);
    }

    #[test]
    fn test_random_shuffle_pins_current_item_at_front() {
        let mut q: TrackQueue<8> = TrackQueue::new();
        for i in 0..6 {
            let mut s = String::<MAX_URI_LEN>::new();
            s.push('a').expect("push");
            s.push((b'0' + i) as char).expect("push digit");
            q.append(QueueItem::Uri(s)).expect("append");
        }
        q.jump_to(3);
        let pinned = q.current().cloned();
        q.set_random(true, 42);
        assert!(q.random());
        assert_eq!(q.position(), 0);
        assert_eq!(q.current().cloned(), pinned);
        assert_eq!(q.len(), 6);
    }

    #[test]
    fn test_disabling_random_restores_linear_order() {
        let mut q: TrackQueue<8> = TrackQueue::new();
        q.append(uri("a.mp3")).expect("append");
        q.append(uri("b.mp3")).expect("append");
        q.append(uri("c.mp3")).expect("append");
        q.set_random(true, 7);
        q.set_random(false, 0);
        assert!(!q.random());
        assert_eq!(q.current(), Some(&uri("a.mp3")));
    }

    #[test]
    fn test_queue_starts_with_flags_cleared() {
        let q: TrackQueue<4> = TrackQueue::new();
        assert!(!q.repeat());
        assert!(!q.replay());
        assert!(!q.random());
    }
}
