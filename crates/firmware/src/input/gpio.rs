//! Direct GPIO button driver.
//!
//! # Pin assignments (Badger 2040)
//!
//! | Button | GPIO | Notes                             |
//! |--------|------|-----------------------------------|
//! | A      | 12   | Active-high, external pull-down   |
//! | B      | 13   | Active-high, external pull-down   |
//! | C      | 14   | Active-high, external pull-down   |
//!
//! A press is reported when a pin reads high and was not already held; a
//! release when a held pin reads low. After any edge the driver waits out
//! the debounce interval before sampling again.

use embassy_futures::select::select3;
use embassy_time::{Duration, Timer};
use embedded_hal::digital::{Error as _, InputPin};
use embedded_hal_async::digital::Wait;
use platform::{config, Button, InputDevice, InputEvent};

/// Debounce interval for the badge's tactile switches
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(config::DEBOUNCE_MS);

/// Buttons in scan order, matching the pin array
const BUTTONS: [Button; 3] = [Button::A, Button::B, Button::C];

/// Debounced A/B/C buttons on three GPIO inputs.
pub struct GpioButtons<P> {
    pins: [P; 3],
    held: [bool; 3],
    debounce: Duration,
}

impl<P> GpioButtons<P>
where
    P: InputPin + Wait,
{
    /// Driver for the `a`, `b`, `c` pins with the given debounce interval
    pub fn new(a: P, b: P, c: P, debounce: Duration) -> Self {
        Self {
            pins: [a, b, c],
            held: [false; 3],
            debounce,
        }
    }

    /// Driver with [`DEFAULT_DEBOUNCE`]
    pub fn with_default_debounce(a: P, b: P, c: P) -> Self {
        Self::new(a, b, c, DEFAULT_DEBOUNCE)
    }

    /// Give the pins back
    pub fn release(self) -> [P; 3] {
        self.pins
    }
}

async fn wait_for_change<P: Wait>(pin: &mut P, held: bool) {
    let result = if held {
        pin.wait_for_low().await
    } else {
        pin.wait_for_high().await
    };
    if let Err(e) = result {
        tracing::warn!(kind = ?e.kind(), "button edge wait failed");
    }
}

impl<P> InputDevice for GpioButtons<P>
where
    P: InputPin + Wait,
{
    async fn wait_for_event(&mut self) -> InputEvent {
        loop {
            if let Some(event) = self.poll_event() {
                return event;
            }
            let [a, b, c] = &mut self.pins;
            let [held_a, held_b, held_c] = self.held;
            select3(
                wait_for_change(a, held_a),
                wait_for_change(b, held_b),
                wait_for_change(c, held_c),
            )
            .await;
            Timer::after(self.debounce).await;
        }
    }

    fn poll_event(&mut self) -> Option<InputEvent> {
        for ((pin, held), button) in self.pins.iter_mut().zip(self.held.iter_mut()).zip(BUTTONS) {
            let high = match pin.is_high() {
                Ok(high) => high,
                Err(e) => {
                    tracing::warn!(kind = ?e.kind(), "button read failed");
                    continue;
                }
            };
            if high && !*held {
                *held = true;
                tracing::debug!(button = ?button, "button press");
                return Some(InputEvent::ButtonPress(button));
            }
            if !high && *held {
                *held = false;
                tracing::debug!(button = ?button, "button release");
                return Some(InputEvent::ButtonRelease(button));
            }
        }
        None
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use embedded_hal_mock::eh1::digital::{
        Mock as PinMock, State as PinState, Transaction as PinTransaction,
    };

    fn pin(transactions: &[PinTransaction]) -> PinMock {
        PinMock::new(transactions)
    }

    fn done(pins: [PinMock; 3]) {
        for mut p in pins {
            p.done();
        }
    }

    #[test]
    fn test_idle_pins_report_nothing() {
        let low = [PinTransaction::get(PinState::Low)];
        let mut buttons = GpioButtons::new(pin(&low), pin(&low), pin(&low), Duration::from_millis(1));
        assert_eq!(buttons.poll_event(), None);
        done(buttons.release());
    }

    #[test]
    fn test_press_then_release() {
        // Polls 1 and 3 stop at B's edge; poll 2 finds no edge and reads all three
        let a = pin(&[
            PinTransaction::get(PinState::Low),
            PinTransaction::get(PinState::Low),
            PinTransaction::get(PinState::Low),
        ]);
        let b = pin(&[
            PinTransaction::get(PinState::High),
            PinTransaction::get(PinState::High),
            PinTransaction::get(PinState::Low),
        ]);
        let c = pin(&[PinTransaction::get(PinState::Low)]);
        let mut buttons = GpioButtons::with_default_debounce(a, b, c);

        assert_eq!(buttons.poll_event(), Some(InputEvent::ButtonPress(Button::B)));
        // B still held: no repeat
        assert_eq!(buttons.poll_event(), None);
        assert_eq!(buttons.poll_event(), Some(InputEvent::ButtonRelease(Button::B)));
        done(buttons.release());
    }

    #[test]
    fn test_scan_order_reports_a_first() {
        let high = [PinTransaction::get(PinState::High)];
        let mut buttons = GpioButtons::new(pin(&high), pin(&[]), pin(&[]), Duration::from_millis(1));
        assert_eq!(buttons.poll_event(), Some(InputEvent::ButtonPress(Button::A)));
        done(buttons.release());
    }

    #[tokio::test]
    async fn test_wait_sleeps_until_edge() {
        let a = pin(&[
            PinTransaction::get(PinState::Low),
            PinTransaction::wait_for_state(PinState::High),
            PinTransaction::get(PinState::High),
        ]);
        let b = pin(&[PinTransaction::get(PinState::Low)]);
        let c = pin(&[PinTransaction::get(PinState::Low)]);
        let mut buttons = GpioButtons::new(a, b, c, Duration::from_millis(1));

        assert_eq!(buttons.wait_for_event().await, InputEvent::ButtonPress(Button::A));
        done(buttons.release());
    }
}
