//! Event bus — two fixed-capacity queues (system-and-audio, UI) that carry
//! typed events to the task that owns the FSM reacting to them.
//!
//! `EventQueue<E, N>` wraps an [`embassy_sync::channel::Channel`] so sending
//! is safe from any task, and [`EventQueue::try_dispatch`] is safe from an
//! interrupt handler (it never awaits). Each FSM task calls
//! [`EventQueue::service`] in a loop to pull and run one work item at a
//! time; ordering within a single producer is FIFO by construction of the
//! underlying channel.
//!
//! The original design dispatched type-erased closures so one event could
//! fan out to several state machines, backed by heap-allocated
//! `std::function`. Without an allocator, this port carries a single
//! concrete `Event` type per queue instead — anything that previously
//! would have been a distinct closure per machine becomes a distinct enum
//! variant, matched in that machine's `react`.

#![cfg_attr(not(test), no_std)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::panic)]
#![deny(clippy::expect_used)]

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;
use embassy_time::Duration;

/// A state machine that reacts to one event type.
///
/// Implemented by each FSM (System, Audio, UI); `EventQueue::service` calls
/// `react` once per delivered work item.
pub trait Reactor {
    /// The event type this reactor consumes.
    type Event;

    /// Handle one event. Must not block — reactions run inline on the
    /// queue-servicing task.
    fn react(&mut self, event: Self::Event);
}

/// A zero-argument, non-capturing task closure.
///
/// `no_std` has no allocator to box an arbitrary closure into queue
/// storage, so `RunOnTask` is restricted to plain function pointers. Work
/// that needs captured state should instead be modelled as an `Event`
/// variant carrying that state.
pub type TaskFn = fn();

enum WorkItem<E> {
    Reaction(E),
    RunOnTask(TaskFn),
}

/// Error returned when a non-blocking send finds the queue at capacity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueueFullError;

/// A fixed-capacity FIFO of work items bound to one FSM's owning task.
///
/// `N` is the queue depth; SPEC parity with the original firmware uses 16.
pub struct EventQueue<E, const N: usize> {
    channel: Channel<CriticalSectionRawMutex, WorkItem<E>, N>,
}

impl<E, const N: usize> EventQueue<E, N> {
    /// Create an empty queue.
    pub const fn new() -> Self {
        Self {
            channel: Channel::new(),
        }
    }

    /// Enqueue a reaction, waiting for space if the queue is full.
    ///
    /// Safe to call from any task. Internal/structural events should use
    /// this form — queue-full here is a capacity bug, not something to
    /// recover from, so callers that need to treat it as fatal should pair
    /// this with a supervisory timeout rather than relying on `dispatch`
    /// itself to fail.
    pub async fn dispatch(&self, event: E) {
        self.channel.send(WorkItem::Reaction(event)).await;
    }

    /// Enqueue a reaction without waiting. Safe to call from an interrupt
    /// handler. Returns `Err(QueueFullError)` if the queue has no free
    /// slot; callers representing external/droppable events (e.g. input)
    /// should treat that as "drop this event", not a fault.
    pub fn try_dispatch(&self, event: E) -> Result<(), QueueFullError> {
        self.channel
            .try_send(WorkItem::Reaction(event))
            .map_err(|_| QueueFullError)
    }

    /// Enqueue a function pointer to run on this queue's owning task, used
    /// when a caller needs work to happen on a specific task (e.g. touching
    /// UI state only the UI task may touch) without going through a
    /// reactor's `react`.
    pub fn run_on_task(&self, f: TaskFn) -> Result<(), QueueFullError> {
        self.channel
            .try_send(WorkItem::RunOnTask(f))
            .map_err(|_| QueueFullError)
    }

    /// Wait up to `timeout` for one work item, executing it inline against
    /// `reactor` if one arrives. Returns `true` if a work item ran.
    pub async fn service<R>(&self, reactor: &mut R, timeout: Duration) -> bool
    where
        R: Reactor<Event = E>,
    {
        match embassy_time::with_timeout(timeout, self.channel.receive()).await {
            Ok(WorkItem::Reaction(event)) => {
                reactor.react(event);
                true
            }
            Ok(WorkItem::RunOnTask(f)) => {
                f();
                true
            }
            Err(_timeout) => false,
        }
    }
}

impl<E, const N: usize> Default for EventQueue<E, N> {
    fn default() -> Self {
        Self::new()
    }
}

/// Both halves of the event bus: the shared system-and-audio queue and the
/// UI queue, parameterised over each side's concrete event type.
pub struct EventBus<SysEvent, UiEvent, const NS: usize, const NU: usize> {
    /// Shared queue the System and Audio FSMs both consume from.
    pub system_and_audio: EventQueue<SysEvent, NS>,
    /// Queue the UI FSM consumes from.
    pub ui: EventQueue<UiEvent, NU>,
}

impl<SysEvent, UiEvent, const NS: usize, const NU: usize> EventBus<SysEvent, UiEvent, NS, NU> {
    /// Construct a bus with both queues empty.
    pub const fn new() -> Self {
        Self {
            system_and_audio: EventQueue::new(),
            ui: EventQueue::new(),
        }
    }
}

impl<SysEvent, UiEvent, const NS: usize, const NU: usize> Default
    for EventBus<SysEvent, UiEvent, NS, NU>
{
    fn default() -> Self {
        Self::new()
    }
}
