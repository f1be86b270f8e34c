//! Pimoroni badge panel specifications

use crate::{Controller, DisplaySpec, PanelType, RefreshTimings};

/// Pimoroni Badger 2040 (2.9", 296×128, UC8151)
///
/// 1-bit panel; intermediate greys are dithered by the driver.
/// - Normal update: ~2s (full-quality waveform)
/// - Medium: ~1s
/// - Fast: ~0.5s
/// - Turbo: ~0.25s (noticeable ghosting)
pub const BADGER_2040: DisplaySpec = DisplaySpec {
    name: "Pimoroni Badger 2040",
    width: 296,
    height: 128,
    controller: Controller::UC8151,
    panel_type: PanelType::Carta1000,
    grayscale_levels: 2,
    refresh: RefreshTimings {
        normal_ms: 2000,
        medium_ms: 1000,
        fast_ms: 500,
        turbo_ms: 250,
    },
};

/// Pimoroni Badger 2040 W (same panel as [`BADGER_2040`], Pico W based)
pub const BADGER_2040_W: DisplaySpec = DisplaySpec {
    name: "Pimoroni Badger 2040 W",
    ..BADGER_2040
};
