//! Observable Property — a typed cell that mirrors core state for scripts
//! to read, plus a registry of bindings that get marked dirty on write and
//! are reapplied on the next main-loop turn.
//!
//! There is no embedded script runtime in this crate; `Property` is the
//! generic primitive a future scripting integration would sit on top of.
//! Bindings here are opaque [`BindingHandle`]s rather than `(lua_State*,
//! ref)` pairs, and the write-filter is a plain function pointer rather
//! than a captured closure, since `no_std` gives us no allocator to box one.

use heapless::{String, Vec};

/// The value a [`Property`] can hold.
///
/// Mirrors the shape of core state that gets written into properties:
/// simple scalars and short text. Richer payloads (track metadata, peer
/// lists) are represented by their own properties field-by-field rather
/// than folded into this enum, since `no_std` variants can't carry
/// heap-backed collections.
#[derive(Debug, Clone, PartialEq)]
pub enum PropertyValue {
    /// No value assigned yet.
    None,
    /// A boolean flag.
    Bool(bool),
    /// A signed integer.
    Int(i32),
    /// A floating-point value (e.g. a dB level).
    Float(f32),
    /// Short text, e.g. a track title or device name.
    Text(String<96>),
}

/// A write-filter predicate: given the proposed new value, return whether
/// the write should be accepted.
pub type FilterFn = fn(&PropertyValue) -> bool;

/// Outcome of a script-facing [`Property::set`] call.
///
/// A property mirrors core state; its value only ever changes via
/// [`Property::set_direct`], driven by the core event the real mutation
/// produced. `set()` itself never touches the mirror — on acceptance it
/// hands back the value so the caller (which owns the event bus this
/// crate doesn't depend on) can dispatch the matching event, e.g.
/// `volume.current_db` accepting a write dispatches `SetVolume`.
#[derive(Debug, Clone, PartialEq)]
pub enum SetOutcome {
    /// The filter rejected the write; the property is unchanged.
    Rejected,
    /// The filter accepted the write; dispatch the corresponding event.
    Dispatch(PropertyValue),
}

/// Per-subscriber bookkeeping for one binding registered against a
/// [`Property`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Binding {
    active: bool,
    dirty: bool,
}

/// Opaque handle identifying one binding registered on a [`Property`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BindingHandle(usize);

/// Error returned when a property's binding list is at capacity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BindingsFullError;

/// A typed cell with change notification.
///
/// `MAX_BINDINGS` bounds how many subscribers one property can carry.
pub struct Property<const MAX_BINDINGS: usize> {
    value: PropertyValue,
    filter: Option<FilterFn>,
    bindings: Vec<Binding, MAX_BINDINGS>,
}

impl<const MAX_BINDINGS: usize> Property<MAX_BINDINGS> {
    /// Create a property that rejects all script-originated writes (not
    /// "two-way"); only [`set_direct`][Self::set_direct] can change it.
    pub fn new(value: PropertyValue) -> Self {
        Self {
            value,
            filter: None,
            bindings: Vec::new(),
        }
    }

    /// Create a property whose script-facing [`set`][Self::set] calls run
    /// through `filter` first.
    pub fn with_filter(value: PropertyValue, filter: FilterFn) -> Self {
        Self {
            value,
            filter: Some(filter),
            bindings: Vec::new(),
        }
    }

    /// The current value.
    pub fn get(&self) -> &PropertyValue {
        &self.value
    }

    /// `true` if this property accepts script-originated writes at all.
    pub fn is_two_way(&self) -> bool {
        self.filter.is_some()
    }

    /// Assign a new value, bypassing the filter. Used for core → property
    /// mirroring (QueueUpdate, PlaybackUpdate, VolumeChanged, ...). Marks
    /// every active binding dirty unconditionally.
    pub fn set_direct(&mut self, value: PropertyValue) {
        self.value = value;
        for binding in &mut self.bindings {
            if binding.active {
                binding.dirty = true;
            }
        }
    }

    /// Script-facing write. Invokes the filter first; on rejection the
    /// mirror and bindings are left untouched. On acceptance the mirror is
    /// *still* left untouched — this only ever changes via `set_direct`,
    /// driven by the core event the caller dispatches in response to
    /// `SetOutcome::Dispatch`. This is the one-way-mirror/two-way-dispatch
    /// split: scripts mutate system state by dispatching events, not by
    /// writing the mirror directly.
    pub fn set(&mut self, value: PropertyValue) -> SetOutcome {
        if let Some(filter) = self.filter {
            if !filter(&value) {
                return SetOutcome::Rejected;
            }
        }
        SetOutcome::Dispatch(value)
    }

    /// Register a new binding, active and dirty from the start so its
    /// first read reflects the current value.
    pub fn register_binding(&mut self) -> Result<BindingHandle, BindingsFullError> {
        let handle = BindingHandle(self.bindings.len());
        self.bindings
            .push(Binding {
                active: true,
                dirty: true,
            })
            .map_err(|_| BindingsFullError)?;
        Ok(handle)
    }

    /// Activate or deactivate a binding. Deactivated bindings are skipped by
    /// `set_direct`/`set` and by `reapply_all`.
    pub fn set_binding_active(&mut self, handle: BindingHandle, active: bool) {
        if let Some(binding) = self.bindings.get_mut(handle.0) {
            binding.active = active;
        }
    }

    /// Re-mark every currently-active binding dirty without changing the
    /// value — used after a late subscription so its first poll sees the
    /// current state.
    pub fn reapply_all(&mut self) {
        for binding in &mut self.bindings {
            if binding.active {
                binding.dirty = true;
            }
        }
    }

    /// If `handle` is active and dirty, clear its dirty flag and return
    /// `true` (the caller should now re-read [`get`][Self::get]).
    /// Returns `false` for an inactive or already-clean binding.
    pub fn take_dirty(&mut self, handle: BindingHandle) -> bool {
        match self.bindings.get_mut(handle.0) {
            Some(binding) if binding.active && binding.dirty => {
                binding.dirty = false;
                true
            }
            _ => false,
        }
    }
}
