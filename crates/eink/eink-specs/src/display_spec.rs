//! Display specification types

use core::time::Duration;

/// Specification of an e-ink panel.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct DisplaySpec {
    /// Display name (e.g., "Pimoroni Badger 2040")
    pub name: &'static str,

    /// Width in pixels (landscape orientation)
    pub width: u32,

    /// Height in pixels (landscape orientation)
    pub height: u32,

    /// Display controller chip
    pub controller: Controller,

    /// E-ink panel type
    pub panel_type: PanelType,

    /// Number of grey levels the controller can hold per pixel
    pub grayscale_levels: u8,

    /// Refresh duration per update speed
    pub refresh: RefreshTimings,
}

/// Panel refresh durations for each controller update speed, in milliseconds.
///
/// Faster speeds use shorter waveforms and leave more ghosting behind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct RefreshTimings {
    /// Full-quality waveform
    pub normal_ms: u32,
    /// Medium waveform
    pub medium_ms: u32,
    /// Fast waveform
    pub fast_ms: u32,
    /// Fastest waveform, heaviest ghosting
    pub turbo_ms: u32,
}

impl RefreshTimings {
    /// Normal refresh as a [`Duration`]
    pub fn normal(&self) -> Duration {
        Duration::from_millis(u64::from(self.normal_ms))
    }

    /// Medium refresh as a [`Duration`]
    pub fn medium(&self) -> Duration {
        Duration::from_millis(u64::from(self.medium_ms))
    }

    /// Fast refresh as a [`Duration`]
    pub fn fast(&self) -> Duration {
        Duration::from_millis(u64::from(self.fast_ms))
    }

    /// Turbo refresh as a [`Duration`]
    pub fn turbo(&self) -> Duration {
        Duration::from_millis(u64::from(self.turbo_ms))
    }
}

impl DisplaySpec {
    /// Get display aspect ratio (width / height)
    #[allow(clippy::cast_precision_loss)]
    pub fn aspect_ratio(&self) -> f32 {
        self.width as f32 / self.height as f32
    }

    /// Get approximate diagonal size in inches
    ///
    /// Assumes typical e-ink PPI of 130. Use for rough size estimates only.
    #[allow(clippy::cast_precision_loss)]
    pub fn diagonal_inches(&self) -> f32 {
        const TYPICAL_PPI: f32 = 130.0;
        let diagonal_px = libm::sqrtf((self.width.pow(2) + self.height.pow(2)) as f32);
        diagonal_px / TYPICAL_PPI
    }

    /// Total pixel count
    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }
}

/// E-ink display controller chips
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub enum Controller {
    /// UltraChip UC8151 (Badger 2040 / 2040 W)
    UC8151,
    /// ImagEInk IL0373 (register-compatible with UC8151)
    IL0373,
    /// Solomon Systech SSD1680 (2.13" / 2.9" panels)
    SSD1680,
    /// Generic/unknown controller
    Generic,
}

/// E-ink panel technology types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub enum PanelType {
    /// E Ink Pearl (older generation)
    Pearl,
    /// E Ink Carta 1000 (improved contrast)
    Carta1000,
    /// E Ink Carta 1200 (faster response)
    Carta1200,
}
