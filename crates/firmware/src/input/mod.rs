//! Input drivers for the badge's face buttons.
//!
//! Two implementations of [`platform::InputDevice`]:
//!
//! - [`gpio::GpioButtons`] reads three debounced GPIO pins directly.
//! - [`queue::QueuedInput`] drains a static event channel filled by another
//!   task (an interrupt handler on hardware, stdin in the emulator). Only
//!   presses sent within [`queue::SIMULTANEOUS_WINDOW`] of each other are
//!   drained together.

pub mod gpio;
pub mod queue;

pub use gpio::GpioButtons;
pub use queue::{
    key_event, try_send_event, try_send_event_at, EventQueue, QueuedEvent, QueuedInput,
    QUEUE_DEPTH, SIMULTANEOUS_WINDOW,
};

pub use platform::{Button, InputDevice, InputEvent};
