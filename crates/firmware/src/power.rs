//! Power latch drivers.

use embedded_hal::digital::{Error as _, OutputPin};
use platform::PowerLatch;

/// Latch driven by a GPIO output: high keeps the regulator enabled, low lets
/// the board switch off (Badger 2040 `ENABLE_3V3`, GPIO 10).
pub struct LatchPin<P> {
    pin: P,
}

impl<P: OutputPin> LatchPin<P> {
    /// Latch on `pin`
    pub fn new(pin: P) -> Self {
        Self { pin }
    }

    /// Give the pin back
    pub fn release(self) -> P {
        self.pin
    }
}

impl<P: OutputPin> PowerLatch for LatchPin<P> {
    fn keepalive(&mut self) {
        if let Err(e) = self.pin.set_high() {
            tracing::warn!(kind = ?e.kind(), "power latch keepalive failed");
        }
    }

    fn halt(&mut self) {
        tracing::debug!("releasing power latch");
        if let Err(e) = self.pin.set_low() {
            tracing::warn!(kind = ?e.kind(), "power latch release failed");
        }
    }
}

/// Latch for hosts and USB-powered boards: always on, halt only logs.
#[derive(Debug, Default, Clone, Copy)]
pub struct UsbPower;

impl PowerLatch for UsbPower {
    fn keepalive(&mut self) {}

    fn halt(&mut self) {
        tracing::debug!("halt requested on external power, staying up");
    }

    fn on_external_power(&self) -> bool {
        true
    }
}
