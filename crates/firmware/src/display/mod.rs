//! Badge panel constants and the host framebuffer display.
//!
//! The panel is the Badger 2040's 2.9" UC8151 (296×128). On the host,
//! [`FramebufferDisplay`] stands in for it and writes each refreshed frame
//! out as a PNG.

#[cfg(any(test, feature = "emulator"))]
pub mod framebuffer;

#[cfg(any(test, feature = "emulator"))]
pub use framebuffer::{FramebufferDisplay, HostDisplayError};

/// Panel the badge ships with
pub const BADGE_SPEC: eink_specs::DisplaySpec = eink_specs::displays::BADGER_2040;

/// Display width in pixels
pub const DISPLAY_WIDTH: u32 = BADGE_SPEC.width;

/// Display height in pixels
pub const DISPLAY_HEIGHT: u32 = BADGE_SPEC.height;

/// Refresh duration of the badge panel at `speed`
pub fn refresh_time(speed: platform::UpdateSpeed) -> embassy_time::Duration {
    let timings = BADGE_SPEC.refresh;
    let ms = match speed {
        platform::UpdateSpeed::Normal => timings.normal_ms,
        platform::UpdateSpeed::Medium => timings.medium_ms,
        platform::UpdateSpeed::Fast => timings.fast_ms,
        platform::UpdateSpeed::Turbo => timings.turbo_ms,
    };
    embassy_time::Duration::from_millis(u64::from(ms))
}

#[cfg(test)]
mod tests {
    use super::*;
    use platform::UpdateSpeed;

    #[test]
    fn test_panel_dimensions() {
        assert_eq!((DISPLAY_WIDTH, DISPLAY_HEIGHT), (296, 128));
    }

    #[test]
    fn test_faster_speeds_refresh_sooner() {
        assert!(refresh_time(UpdateSpeed::Turbo) < refresh_time(UpdateSpeed::Fast));
        assert!(refresh_time(UpdateSpeed::Fast) < refresh_time(UpdateSpeed::Medium));
        assert!(refresh_time(UpdateSpeed::Medium) < refresh_time(UpdateSpeed::Normal));
    }
}
