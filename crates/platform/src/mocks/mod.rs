//! Mock implementations for testing
//!
//! This module provides mock implementations of all platform traits
//! for use in unit and integration tests.

#![cfg(any(test, feature = "std"))]

use crate::*;
use embedded_graphics::{pixelcolor::Gray4, prelude::*};

/// Largest framebuffer the mock display keeps (one Badger 2040 panel)
pub const MOCK_MAX_PIXELS: usize = 296 * 128;

/// Mock display implementation
///
/// Keeps a real Gray4 framebuffer so tests can assert on individual pixels,
/// and counts every panel operation.
pub struct MockDisplay {
    width: u32,
    height: u32,
    frame: heapless::Vec<u8, MOCK_MAX_PIXELS>,
    refresh_count: usize,
    sleep_count: usize,
    wake_count: usize,
    speed: UpdateSpeed,
    fail_refresh: bool,
}

impl MockDisplay {
    /// Create new mock display. Dimensions beyond [`MOCK_MAX_PIXELS`] are
    /// clamped to the panel height that still fits.
    pub fn new(width: u32, height: u32) -> Self {
        let max_rows = u32::try_from(MOCK_MAX_PIXELS).unwrap_or(u32::MAX) / width.max(1);
        let height = height.min(max_rows);
        let mut frame = heapless::Vec::new();
        let len = (width * height) as usize;
        let _ = frame.resize(len, 0);
        Self {
            width,
            height,
            frame,
            refresh_count: 0,
            sleep_count: 0,
            wake_count: 0,
            speed: UpdateSpeed::default(),
            fail_refresh: false,
        }
    }

    /// Get refresh count
    pub fn refresh_count(&self) -> usize {
        self.refresh_count
    }

    /// Number of times the panel was put to sleep
    pub fn sleep_count(&self) -> usize {
        self.sleep_count
    }

    /// Number of times the panel was woken
    pub fn wake_count(&self) -> usize {
        self.wake_count
    }

    /// Make every following refresh fail with [`DisplayError::Busy`]
    pub fn fail_refreshes(&mut self, fail: bool) {
        self.fail_refresh = fail;
    }

    /// Luma of the pixel at `point`, `None` outside the panel
    pub fn pixel(&self, point: Point) -> Option<Gray4> {
        self.index(point)
            .and_then(|i| self.frame.get(i))
            .map(|&luma| Gray4::new(luma))
    }

    /// Count pixels inside `area` with the given luma
    pub fn count_in(&self, area: embedded_graphics::primitives::Rectangle, color: Gray4) -> usize {
        area.points()
            .filter(|&p| self.pixel(p) == Some(color))
            .count()
    }

    fn index(&self, point: Point) -> Option<usize> {
        let x = u32::try_from(point.x).ok()?;
        let y = u32::try_from(point.y).ok()?;
        if x >= self.width || y >= self.height {
            return None;
        }
        Some((y * self.width + x) as usize)
    }
}

impl DrawTarget for MockDisplay {
    type Color = Gray4;
    type Error = core::convert::Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            if let Some(slot) = self.index(point).and_then(|i| self.frame.get_mut(i)) {
                *slot = color.luma();
            }
        }
        Ok(())
    }
}

impl OriginDimensions for MockDisplay {
    fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }
}

impl DisplayDriver for MockDisplay {
    type DriverError = DisplayError;

    async fn refresh_full(&mut self) -> Result<(), Self::DriverError> {
        if self.fail_refresh {
            return Err(DisplayError::Busy);
        }
        self.refresh_count += 1;
        Ok(())
    }

    async fn sleep(&mut self) -> Result<(), Self::DriverError> {
        self.sleep_count += 1;
        Ok(())
    }

    async fn wake(&mut self) -> Result<(), Self::DriverError> {
        self.wake_count += 1;
        Ok(())
    }
}

impl EinkDisplay for MockDisplay {
    fn set_update_speed(&mut self, speed: UpdateSpeed) {
        self.speed = speed;
    }

    fn update_speed(&self) -> UpdateSpeed {
        self.speed
    }
}

/// Mock input device
pub struct MockInput {
    events: heapless::Deque<InputEvent, 16>,
}

impl MockInput {
    /// Create new mock input
    pub fn new() -> Self {
        Self {
            events: heapless::Deque::new(),
        }
    }

    /// Add event to queue
    pub fn add_event(&mut self, event: InputEvent) -> Result<(), InputEvent> {
        self.events.push_back(event)
    }

    /// Queue a press of `button`
    pub fn press(&mut self, button: Button) -> Result<(), InputEvent> {
        self.add_event(InputEvent::ButtonPress(button))
    }

    /// Events still queued
    pub fn pending(&self) -> usize {
        self.events.len()
    }

    /// Clear all events
    pub fn clear(&mut self) {
        self.events.clear();
    }
}

impl Default for MockInput {
    fn default() -> Self {
        Self::new()
    }
}

impl InputDevice for MockInput {
    async fn wait_for_event(&mut self) -> InputEvent {
        loop {
            if let Some(event) = self.events.pop_front() {
                return event;
            }
            embassy_time::Timer::after_millis(10).await;
        }
    }

    fn poll_event(&mut self) -> Option<InputEvent> {
        self.events.pop_front()
    }
}

/// Mock power latch
#[derive(Debug, Default)]
pub struct MockPower {
    keepalive_count: usize,
    halt_count: usize,
    external: bool,
}

impl MockPower {
    /// Create a mock latch running on battery
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a mock latch running on USB power
    pub fn on_usb() -> Self {
        Self {
            external: true,
            ..Self::default()
        }
    }

    /// Number of keepalive calls
    pub fn keepalive_count(&self) -> usize {
        self.keepalive_count
    }

    /// Number of halt calls
    pub fn halt_count(&self) -> usize {
        self.halt_count
    }
}

impl PowerLatch for MockPower {
    fn keepalive(&mut self) {
        self.keepalive_count += 1;
    }

    fn halt(&mut self) {
        self.halt_count += 1;
    }

    fn on_external_power(&self) -> bool {
        self.external
    }
}
