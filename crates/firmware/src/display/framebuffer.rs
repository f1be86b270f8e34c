//! Host-side stand-in for the badge panel.
//!
//! Drawing lands in a Gray4 framebuffer. Every full refresh bumps the frame
//! counter and, when a snapshot directory is set, writes the frame out as
//! `frame-NNNN.png`. With timing simulation on, a refresh also waits as long
//! as the real panel would at the selected update speed.

extern crate std;

use std::{
    fmt,
    path::{Path, PathBuf},
    string::String,
    vec,
    vec::Vec,
};

use embedded_graphics::{pixelcolor::Gray4, prelude::*};
use image::GrayImage;
use platform::{DisplayDriver, EinkDisplay, UpdateSpeed};

use super::refresh_time;

/// Errors from writing frames to the host filesystem.
#[derive(Debug)]
pub enum HostDisplayError {
    /// Creating the snapshot directory or file failed
    Io(std::io::Error),
    /// PNG encoding failed
    Encode(image::ImageError),
}

impl fmt::Display for HostDisplayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "snapshot I/O failed: {e}"),
            Self::Encode(e) => write!(f, "snapshot encoding failed: {e}"),
        }
    }
}

impl std::error::Error for HostDisplayError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Encode(e) => Some(e),
        }
    }
}

/// In-memory panel with optional PNG snapshots.
#[derive(Debug)]
pub struct FramebufferDisplay {
    size: Size,
    pixels: Vec<u8>,
    speed: UpdateSpeed,
    frames: usize,
    asleep: bool,
    snapshot_dir: Option<PathBuf>,
    simulate_timing: bool,
}

impl FramebufferDisplay {
    /// Blank (white) panel of `width` × `height`
    pub fn new(width: u32, height: u32) -> Self {
        let len = width as usize * height as usize;
        Self {
            size: Size::new(width, height),
            pixels: vec![Gray4::WHITE.luma(); len],
            speed: UpdateSpeed::default(),
            frames: 0,
            asleep: false,
            snapshot_dir: None,
            simulate_timing: false,
        }
    }

    /// Panel sized like the badge
    pub fn badge() -> Self {
        Self::new(super::DISPLAY_WIDTH, super::DISPLAY_HEIGHT)
    }

    /// Write every refreshed frame into `dir`
    pub fn with_snapshots(mut self, dir: impl Into<PathBuf>) -> Self {
        self.snapshot_dir = Some(dir.into());
        self
    }

    /// Make refreshes take as long as the real panel's
    pub fn with_simulated_timing(mut self, simulate: bool) -> Self {
        self.simulate_timing = simulate;
        self
    }

    /// Completed full refreshes
    pub fn frames(&self) -> usize {
        self.frames
    }

    /// `true` between `sleep` and the next `wake`
    pub fn is_asleep(&self) -> bool {
        self.asleep
    }

    fn index(&self, point: Point) -> Option<usize> {
        let x = u32::try_from(point.x).ok()?;
        let y = u32::try_from(point.y).ok()?;
        if x >= self.size.width || y >= self.size.height {
            return None;
        }
        Some(y as usize * self.size.width as usize + x as usize)
    }

    /// Grey level at `point`, `None` off-panel
    pub fn luma_at(&self, point: Point) -> Option<u8> {
        self.index(point).and_then(|i| self.pixels.get(i).copied())
    }

    /// Framebuffer as an 8-bit greyscale image
    pub fn to_image(&self) -> GrayImage {
        let mut img = GrayImage::new(self.size.width, self.size.height);
        for (px, level) in img.pixels_mut().zip(&self.pixels) {
            px.0 = [level.saturating_mul(17)];
        }
        img
    }

    /// Write the framebuffer to `path` as PNG
    pub fn save_png(&self, path: &Path) -> Result<(), HostDisplayError> {
        self.to_image()
            .save_with_format(path, image::ImageFormat::Png)
            .map_err(HostDisplayError::Encode)
    }

    /// Coarse text rendering of the framebuffer, one character per
    /// `step` × `step` cell: `#` dark, `+` mid, `.` light.
    pub fn ascii_preview(&self, step: u32) -> String {
        let step = step.max(1);
        let mut out = String::new();
        for cy in (0..self.size.height).step_by(step as usize) {
            for cx in (0..self.size.width).step_by(step as usize) {
                let level = self.luma_at(Point::new(cx as i32, cy as i32)).unwrap_or(15);
                out.push(match level {
                    0..=4 => '#',
                    5..=10 => '+',
                    _ => '.',
                });
            }
            out.push('\n');
        }
        out
    }

    fn snapshot(&self) -> Result<(), HostDisplayError> {
        let Some(dir) = &self.snapshot_dir else {
            return Ok(());
        };
        std::fs::create_dir_all(dir).map_err(HostDisplayError::Io)?;
        let path = dir.join(std::format!("frame-{:04}.png", self.frames));
        self.save_png(&path)?;
        tracing::info!(path = %path.display(), "frame written");
        Ok(())
    }
}

impl DrawTarget for FramebufferDisplay {
    type Color = Gray4;
    type Error = core::convert::Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            if let Some(slot) = self.index(point).and_then(|i| self.pixels.get_mut(i)) {
                *slot = color.luma();
            }
        }
        Ok(())
    }
}

impl OriginDimensions for FramebufferDisplay {
    fn size(&self) -> Size {
        self.size
    }
}

impl DisplayDriver for FramebufferDisplay {
    type DriverError = HostDisplayError;

    async fn refresh_full(&mut self) -> Result<(), Self::DriverError> {
        if self.simulate_timing {
            embassy_time::Timer::after(refresh_time(self.speed)).await;
        }
        self.frames += 1;
        tracing::debug!(frame = self.frames, "full refresh");
        self.snapshot()
    }

    async fn sleep(&mut self) -> Result<(), Self::DriverError> {
        self.asleep = true;
        Ok(())
    }

    async fn wake(&mut self) -> Result<(), Self::DriverError> {
        self.asleep = false;
        Ok(())
    }
}

impl EinkDisplay for FramebufferDisplay {
    fn set_update_speed(&mut self, speed: UpdateSpeed) {
        self.speed = speed;
    }

    fn update_speed(&self) -> UpdateSpeed {
        self.speed
    }
}
