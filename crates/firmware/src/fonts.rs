//! Mono-font ladder: maps a continuous text scale onto the embedded-graphics
//! ASCII fonts.
//!
//! A scale asks for a glyph height of `NOMINAL_HEIGHT_PX × scale`. The
//! ladder picks the tallest font no taller than that, taking the widest one
//! when several share a height, and falls back to the smallest font below
//! the bottom rung. Width grows with every rung, so measured width never
//! shrinks as the scale grows.
//!
//! [`MonoLadder`] measures with exactly the fonts [`font_for`] hands to the
//! renderer, so fitted text is drawn at the width it was fitted at.

use embedded_graphics::mono_font::{ascii, MonoFont};
use ui::{FontFace, MetricsError, TextMetrics};

/// Glyph height requested at scale 1.0
pub const NOMINAL_HEIGHT_PX: f32 = 24.0;

type Ladder = [&'static MonoFont<'static>; 8];

static SANS: Ladder = [
    &ascii::FONT_4X6,
    &ascii::FONT_5X8,
    &ascii::FONT_6X10,
    &ascii::FONT_7X13,
    &ascii::FONT_8X13,
    &ascii::FONT_9X15,
    &ascii::FONT_9X18,
    &ascii::FONT_10X20,
];

// The bold cuts stand in for the serif face.
static SERIF: Ladder = [
    &ascii::FONT_4X6,
    &ascii::FONT_5X8,
    &ascii::FONT_6X13_BOLD,
    &ascii::FONT_7X13_BOLD,
    &ascii::FONT_8X13_BOLD,
    &ascii::FONT_9X15_BOLD,
    &ascii::FONT_9X18_BOLD,
    &ascii::FONT_10X20,
];

/// Font used for `face` at `scale`. Non-finite or non-positive scales get the
/// smallest rung.
pub fn font_for(face: FontFace, scale: f32) -> &'static MonoFont<'static> {
    let ladder = match face {
        FontFace::Sans => &SANS,
        FontFace::Serif => &SERIF,
    };
    let target = NOMINAL_HEIGHT_PX * scale;
    let [smallest, rest @ ..] = ladder;
    rest.iter()
        .rev()
        .copied()
        .find(|font| (font.character_size.height as f32) <= target)
        .unwrap_or(*smallest)
}

/// Width of `chars` glyphs in `font`, matching `MonoTextStyle` layout
pub fn text_width(font: &MonoFont<'_>, chars: usize) -> u32 {
    let advance = font.character_size.width + font.character_spacing;
    let n = u32::try_from(chars).unwrap_or(u32::MAX);
    n.saturating_mul(advance)
        .saturating_sub(if n > 0 { font.character_spacing } else { 0 })
}

/// [`TextMetrics`] backed by the mono-font ladder.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MonoLadder;

impl TextMetrics for MonoLadder {
    type Error = MetricsError;

    fn measure(&self, text: &str, font: FontFace, scale: f32) -> Result<u32, Self::Error> {
        if !scale.is_finite() || scale <= 0.0 {
            return Err(MetricsError::InvalidScale);
        }
        Ok(text_width(font_for(font, scale), text.chars().count()))
    }
}
