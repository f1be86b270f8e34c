//! Draw-command model handed to the render sink.

use embedded_graphics::{
    pixelcolor::Gray4,
    prelude::{GrayColor, Point},
    primitives::Rectangle,
};

use crate::metrics::FontFace;

/// Upper bound on commands in one frame
pub const MAX_DRAW_COMMANDS: usize = 32;

/// One frame's worth of commands, in paint order.
pub type DrawList<'a> = heapless::Vec<DrawCommand<'a>, MAX_DRAW_COMMANDS>;

/// 16-level grey pen. 0 is black, 15 is white.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pen(u8);

impl Pen {
    /// Pen 0
    pub const BLACK: Pen = Pen(0);
    /// Pen 15
    pub const WHITE: Pen = Pen(15);

    /// Pen at `level`, clamped to 15
    pub const fn new(level: u8) -> Self {
        if level > 15 {
            Pen(15)
        } else {
            Pen(level)
        }
    }

    /// Grey level, `0..=15`
    pub const fn level(self) -> u8 {
        self.0
    }
}

impl From<Pen> for Gray4 {
    fn from(pen: Pen) -> Self {
        Gray4::new(pen.0)
    }
}

impl From<Gray4> for Pen {
    fn from(color: Gray4) -> Self {
        Pen::new(color.luma())
    }
}

/// A single render directive. Shapes and text use the most recent
/// [`DrawCommand::SetPen`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DrawCommand<'a> {
    /// Fill the whole target with the current pen
    Clear,
    /// Change the current pen
    SetPen(Pen),
    /// Blit the image at `path` with its top-left corner at `origin`
    Image {
        /// Asset path from the profile
        path: &'a str,
        /// Top-left corner
        origin: Point,
    },
    /// One-pixel line, both ends inclusive
    Line {
        /// Start point
        from: Point,
        /// End point
        to: Point,
    },
    /// Filled rectangle
    Rectangle(Rectangle),
    /// Single line of text, vertically centred on `origin.y`
    Text {
        /// Text to draw
        content: &'a str,
        /// Left edge, vertical centre
        origin: Point,
        /// Nothing is drawn past `origin.x + max_width`
        max_width: u32,
        /// Render scale
        scale: f32,
        /// Face
        font: FontFace,
    },
    /// Push the frame to the panel
    Flush,
}
