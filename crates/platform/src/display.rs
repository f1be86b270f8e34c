//! Display abstraction layer

use embedded_graphics::prelude::*;

/// Display driver trait for E-ink displays
///
/// Drawing goes to the driver's framebuffer through [`DrawTarget`]; nothing
/// reaches the glass until [`refresh_full`](DisplayDriver::refresh_full).
pub trait DisplayDriver: DrawTarget {
    /// Error type for display operations
    type DriverError: core::fmt::Debug;

    /// Push the framebuffer to the panel at the current update speed
    fn refresh_full(&mut self)
        -> impl core::future::Future<Output = Result<(), Self::DriverError>>;

    /// Enter deep sleep mode
    fn sleep(&mut self) -> impl core::future::Future<Output = Result<(), Self::DriverError>>;

    /// Wake from sleep mode
    fn wake(&mut self) -> impl core::future::Future<Output = Result<(), Self::DriverError>>;

    /// Get display dimensions
    fn dimensions(&self) -> Size {
        self.bounding_box().size
    }
}

/// E-ink specific extensions
pub trait EinkDisplay: DisplayDriver {
    /// Select the waveform used by subsequent refreshes
    fn set_update_speed(&mut self, speed: UpdateSpeed);

    /// Currently selected waveform
    fn update_speed(&self) -> UpdateSpeed;
}

/// Panel waveform speed.
///
/// Slower waveforms clear ghosting; faster ones leave more of the previous
/// image behind. The badge redraws rarely, so [`UpdateSpeed::Normal`] is the
/// default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum UpdateSpeed {
    /// Full-quality waveform
    #[default]
    Normal,
    /// Medium waveform
    Medium,
    /// Fast waveform, some ghosting
    Fast,
    /// Fastest waveform, most ghosting
    Turbo,
}

/// Display errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayError {
    /// Display busy
    Busy,
}

#[cfg(feature = "std")]
extern crate std;

#[cfg(feature = "std")]
impl std::error::Error for DisplayError {}

impl core::fmt::Display for DisplayError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Busy => write!(f, "Display is busy"),
        }
    }
}
