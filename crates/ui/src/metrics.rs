//! Text width measurement.
//!
//! Layout never looks at glyphs; it only asks "how wide is this string at this
//! scale". Whoever renders the text must answer with the same numbers it will
//! draw, otherwise fitted text can overflow its band.

/// Typeface family. The company band uses [`FontFace::Serif`]; the name and
/// detail bands use [`FontFace::Sans`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontFace {
    /// Serif face (company / affiliation)
    Serif,
    /// Sans-serif face (name, details)
    Sans,
}

/// Measures rendered text width in pixels.
///
/// Implementations must be deterministic, and for a fixed string the width
/// must not decrease as `scale` grows.
pub trait TextMetrics {
    /// Failure to measure (bad scale, unknown face, …)
    type Error;

    /// Rendered width of `text` in `font` at `scale`, in whole pixels
    fn measure(&self, text: &str, font: FontFace, scale: f32) -> Result<u32, Self::Error>;
}

impl<T: TextMetrics + ?Sized> TextMetrics for &T {
    type Error = T::Error;

    fn measure(&self, text: &str, font: FontFace, scale: f32) -> Result<u32, Self::Error> {
        (**self).measure(text, font, scale)
    }
}

/// Error from [`FixedAdvance`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetricsError {
    /// Scale was zero, negative, or not finite
    InvalidScale,
}

impl core::fmt::Display for MetricsError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::InvalidScale => write!(f, "text scale must be a positive finite number"),
        }
    }
}

/// Every character advances by the same number of pixels at scale 1.0.
///
/// `width = floor(chars × advance_px × scale)`; the face is ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedAdvance {
    /// Per-character advance at scale 1.0
    pub advance_px: u32,
}

impl FixedAdvance {
    /// Provider with the given per-character advance
    pub const fn new(advance_px: u32) -> Self {
        Self { advance_px }
    }
}

impl TextMetrics for FixedAdvance {
    type Error = MetricsError;

    #[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn measure(&self, text: &str, _font: FontFace, scale: f32) -> Result<u32, Self::Error> {
        if !scale.is_finite() || scale <= 0.0 {
            return Err(MetricsError::InvalidScale);
        }
        let chars = text.chars().count() as f32;
        // Float → int `as` saturates, so absurd inputs clamp to u32::MAX.
        Ok(libm::floorf(chars * self.advance_px as f32 * scale) as u32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_advance_linear_in_length() {
        let m = FixedAdvance::new(8);
        assert_eq!(m.measure("", FontFace::Sans, 1.0), Ok(0));
        assert_eq!(m.measure("abcd", FontFace::Sans, 1.0), Ok(32));
        assert_eq!(m.measure("abcd", FontFace::Serif, 0.5), Ok(16));
    }

    #[test]
    fn test_fixed_advance_floors_fractional_width() {
        let m = FixedAdvance::new(8);
        // 31 × 8 × 0.61 = 151.28
        assert_eq!(m.measure("Alexandria Featherington-Smythe", FontFace::Sans, 0.61), Ok(151));
    }

    #[test]
    fn test_fixed_advance_counts_chars_not_bytes() {
        let m = FixedAdvance::new(10);
        assert_eq!(m.measure("Zoë", FontFace::Sans, 1.0), Ok(30));
    }

    #[test]
    fn test_fixed_advance_rejects_bad_scale() {
        let m = FixedAdvance::new(8);
        assert_eq!(m.measure("x", FontFace::Sans, 0.0), Err(MetricsError::InvalidScale));
        assert_eq!(m.measure("x", FontFace::Sans, -1.0), Err(MetricsError::InvalidScale));
        assert_eq!(m.measure("x", FontFace::Sans, f32::NAN), Err(MetricsError::InvalidScale));
    }

    #[test]
    fn test_metrics_by_reference() {
        fn width<M: TextMetrics>(m: M) -> Result<u32, M::Error> {
            m.measure("ab", FontFace::Sans, 1.0)
        }
        let m = FixedAdvance::new(3);
        assert_eq!(width(&m), Ok(6));
    }
}
