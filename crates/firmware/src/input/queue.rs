//! Channel-backed input.
//!
//! A producer (GPIO interrupt task, emulator key reader) pushes events with
//! [`try_send_event`]; the application consumes them through
//! [`QueuedInput`]. Sends never block: when the consumer stalls and the
//! channel is full, new events are dropped.
//!
//! Every event is stamped when it is sent. [`QueuedInput::poll_event`] only
//! hands out events stamped within [`SIMULTANEOUS_WINDOW`] of the one that
//! opened the current batch; anything later stays queued for the next wait.

use embassy_sync::{
    blocking_mutex::raw::CriticalSectionRawMutex,
    channel::{Channel, Receiver},
};
use embassy_time::{Duration, Instant};
use platform::{config, Button, InputDevice, InputEvent};

// ---------------------------------------------------------------------------
// Channel
// ---------------------------------------------------------------------------

/// Events that may queue before drops begin
pub const QUEUE_DEPTH: usize = 16;

/// Presses sent this close together count as pressed at the same time
pub const SIMULTANEOUS_WINDOW: Duration = Duration::from_millis(config::DEBOUNCE_MS);

/// An [`InputEvent`] with the time it was sent
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueuedEvent {
    /// The event
    pub event: InputEvent,
    /// When it was sent
    pub at: Instant,
}

/// Event channel shared between producer and [`QueuedInput`].
///
/// Declare one as a `static` so producers on other tasks or threads can
/// reach it.
pub type EventQueue = Channel<CriticalSectionRawMutex, QueuedEvent, QUEUE_DEPTH>;

/// Enqueue `event` stamped with the current time, without waiting. Returns
/// `false` if the queue was full and the event was dropped.
pub fn try_send_event(queue: &EventQueue, event: InputEvent) -> bool {
    try_send_event_at(queue, event, Instant::now())
}

/// [`try_send_event`] with an explicit timestamp
pub fn try_send_event_at(queue: &EventQueue, event: InputEvent, at: Instant) -> bool {
    match queue.try_send(QueuedEvent { event, at }) {
        Ok(()) => true,
        Err(_) => {
            tracing::warn!("input queue full, event dropped");
            false
        }
    }
}

/// Keyboard stand-ins for the badge buttons: `a`, `b`, `c` for the face
/// buttons and `u` / `d` for the rocker. Case-insensitive.
pub fn key_event(key: char) -> Option<InputEvent> {
    let button = match key.to_ascii_lowercase() {
        'a' => Button::A,
        'b' => Button::B,
        'c' => Button::C,
        'u' => Button::Up,
        'd' => Button::Down,
        _ => return None,
    };
    Some(InputEvent::ButtonPress(button))
}

// ---------------------------------------------------------------------------
// Consumer
// ---------------------------------------------------------------------------

/// [`InputDevice`] that receives from an [`EventQueue`].
pub struct QueuedInput<'q> {
    rx: Receiver<'q, CriticalSectionRawMutex, QueuedEvent, QUEUE_DEPTH>,
    /// Received but belongs to a later batch
    lookahead: Option<QueuedEvent>,
    /// Stamp of the event that opened the current batch
    batch_start: Option<Instant>,
}

impl<'q> QueuedInput<'q> {
    /// Consumer for `queue`
    pub fn new(queue: &'q EventQueue) -> Self {
        Self {
            rx: queue.receiver(),
            lookahead: None,
            batch_start: None,
        }
    }

    fn open_batch(&mut self, queued: QueuedEvent) -> InputEvent {
        self.batch_start = Some(queued.at);
        queued.event
    }
}

impl InputDevice for QueuedInput<'_> {
    async fn wait_for_event(&mut self) -> InputEvent {
        let queued = match self.lookahead.take() {
            Some(queued) => queued,
            None => self.rx.receive().await,
        };
        self.open_batch(queued)
    }

    fn poll_event(&mut self) -> Option<InputEvent> {
        // Empty is the only receive error; the channel never closes.
        let queued = self.lookahead.take().or_else(|| self.rx.try_receive().ok())?;
        let Some(start) = self.batch_start else {
            return Some(self.open_batch(queued));
        };
        if queued.at.saturating_duration_since(start) <= SIMULTANEOUS_WINDOW {
            Some(queued.event)
        } else {
            self.lookahead = Some(queued);
            None
        }
    }
}
