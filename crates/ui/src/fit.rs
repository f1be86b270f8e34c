//! Fitting engine: make single-line text respect a pixel budget.
//!
//! Two strategies:
//!
//! - [`truncate_to_width`] keeps the scale and drops trailing characters.
//! - [`scale_to_width`] keeps every character and steps the scale down.
//!
//! [`fit_title_value`] chains truncation across a title/value pair sharing
//! one band: the value gets whatever the fitted title leaves over.
//!
//! None of these report "does not fit" as an error. A budget that cannot be
//! met degrades to empty content (truncation) or the floor scale (scaling).
//! Only the metrics provider can fail.

use crate::metrics::{FontFace, TextMetrics};

/// Result of fitting one string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fitted<'t> {
    /// The prefix of the source that will be drawn
    pub content: &'t str,
    /// Measured width of `content`
    pub width: u32,
    /// `true` if `content` is shorter than the source
    pub truncated: bool,
}

/// Longest prefix of `text` whose measured width is within `budget`.
///
/// One `char` is dropped per step until the width fits or the prefix is
/// empty. A budget of zero or less yields `""` without measuring the source.
/// No ellipsis is added.
///
/// If even the empty string measures wider than the budget the result is the
/// empty string anyway; the caller gets `truncated = true` and `width` tells
/// it the budget was not met.
pub fn truncate_to_width<'t, M>(
    metrics: &M,
    text: &'t str,
    font: FontFace,
    scale: f32,
    budget: i32,
) -> Result<Fitted<'t>, M::Error>
where
    M: TextMetrics + ?Sized,
{
    let Ok(budget) = u32::try_from(budget) else {
        return Ok(empty(text));
    };
    if budget == 0 {
        return Ok(empty(text));
    }

    let mut candidate = text;
    let mut width = metrics.measure(candidate, font, scale)?;
    while width > budget {
        let Some((cut, _)) = candidate.char_indices().next_back() else {
            break;
        };
        // `cut` is a char boundary taken from `char_indices`.
        candidate = candidate.get(..cut).unwrap_or_default();
        width = metrics.measure(candidate, font, scale)?;
    }

    Ok(Fitted {
        content: candidate,
        width,
        truncated: candidate.len() < text.len(),
    })
}

fn empty(text: &str) -> Fitted<'_> {
    Fitted {
        content: "",
        width: 0,
        truncated: !text.is_empty(),
    }
}

/// Hard cap on scale candidates, whatever `step` is.
pub const MAX_SCALE_STEPS: u32 = 10_000;

/// Parameters of the descending scale search used for the name band.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScaleSearch {
    /// First (largest) scale tried
    pub start: f32,
    /// Decrement between candidates
    pub step: f32,
    /// Floor; returned when nothing larger fits
    pub min: f32,
}

impl ScaleSearch {
    /// Search from `start` down to `min` in decrements of `step`
    pub const fn new(start: f32, step: f32, min: f32) -> Self {
        Self { start, step, min }
    }

    /// Number of decrements after `start`, so `steps() + 1` candidates.
    ///
    /// Zero when `step` is not a positive finite number or `start <= min`.
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::neg_cmp_op_on_partial_ord
    )]
    pub fn steps(&self) -> u32 {
        if !(self.step.is_finite() && self.step > 0.0) || !(self.start > self.min) {
            return 0;
        }
        // The nudge keeps e.g. (2.0 - 0.1) / 0.01 = 189.99998 from losing
        // its last candidate to rounding.
        let n = libm::floorf((self.start - self.min) / self.step + 1e-3);
        if n.is_finite() {
            (n as u32).min(MAX_SCALE_STEPS)
        } else {
            MAX_SCALE_STEPS
        }
    }

    /// Candidate `k`: `start - k × step`, never below `min`.
    ///
    /// Computed by multiplication so error does not build up along the walk.
    #[allow(clippy::cast_precision_loss)]
    pub fn candidate(&self, k: u32) -> f32 {
        let s = self.start - k as f32 * self.step;
        if s < self.min {
            self.min
        } else {
            s
        }
    }
}

/// Largest candidate scale at which `text` measures strictly less than
/// `budget`, or `search.min` if no candidate does.
///
/// The search stops at the first hit, which relies on width never growing as
/// the scale shrinks. The result is always within `[min, max(start, min)]`.
#[allow(clippy::neg_cmp_op_on_partial_ord)]
pub fn scale_to_width<M>(
    metrics: &M,
    text: &str,
    font: FontFace,
    budget: i32,
    search: ScaleSearch,
) -> Result<f32, M::Error>
where
    M: TextMetrics + ?Sized,
{
    if !(search.start >= search.min) {
        return Ok(search.min);
    }
    let Ok(budget) = u32::try_from(budget) else {
        return Ok(search.min);
    };

    for k in 0..=search.steps() {
        let scale = search.candidate(k);
        if metrics.measure(text, font, scale)? < budget {
            return Ok(scale);
        }
    }
    Ok(search.min)
}

/// Title and value fitted into one band.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TitleValueFit<'t> {
    /// Title, truncated against the whole band
    pub title: Fitted<'t>,
    /// Value, truncated against what the title left over
    pub value: Fitted<'t>,
    /// Budget the value was fitted against (never negative)
    pub value_budget: i32,
}

/// Fit `title` to `region_width`, then fit `value` into
/// `region_width - title.width - gap` (clamped at 0).
#[allow(clippy::too_many_arguments)]
pub fn fit_title_value<'t, M>(
    metrics: &M,
    title: &'t str,
    value: &'t str,
    font: FontFace,
    scale: f32,
    region_width: i32,
    gap: i32,
) -> Result<TitleValueFit<'t>, M::Error>
where
    M: TextMetrics + ?Sized,
{
    let title = truncate_to_width(metrics, title, font, scale, region_width)?;
    let title_width = i32::try_from(title.width).unwrap_or(i32::MAX);
    let value_budget = region_width
        .saturating_sub(title_width)
        .saturating_sub(gap)
        .max(0);
    let value = truncate_to_width(metrics, value, font, scale, value_budget)?;
    Ok(TitleValueFit {
        title,
        value,
        value_budget,
    })
}

#[cfg(test)]
#[allow(clippy::float_cmp, clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::metrics::{FixedAdvance, MetricsError};

    const EIGHT: FixedAdvance = FixedAdvance::new(8);

    /// Measures the empty string as 5px wide.
    struct Padded;

    impl TextMetrics for Padded {
        type Error = MetricsError;

        fn measure(&self, text: &str, font: FontFace, scale: f32) -> Result<u32, MetricsError> {
            EIGHT.measure(text, font, scale).map(|w| w + 5)
        }
    }

    struct Broken;

    impl TextMetrics for Broken {
        type Error = ();

        fn measure(&self, _: &str, _: FontFace, _: f32) -> Result<u32, ()> {
            Err(())
        }
    }

    #[test]
    fn test_truncate_zero_budget_is_empty() {
        let fit = truncate_to_width(&EIGHT, "Anything at all", FontFace::Sans, 1.0, 0).unwrap();
        assert_eq!(fit.content, "");
        assert!(fit.truncated);
    }

    #[test]
    fn test_truncate_negative_budget_is_empty() {
        let fit = truncate_to_width(&EIGHT, "abc", FontFace::Sans, 1.0, -40).unwrap();
        assert_eq!(fit.content, "");
        assert_eq!(fit.width, 0);
    }

    #[test]
    fn test_truncate_keeps_text_that_fits() {
        let fit = truncate_to_width(&EIGHT, "Acme", FontFace::Serif, 1.0, 32).unwrap();
        assert_eq!(fit.content, "Acme");
        assert_eq!(fit.width, 32);
        assert!(!fit.truncated);
    }

    #[test]
    fn test_truncate_drops_trailing_chars() {
        // 8px per char at scale 1: 31px budget holds 3 chars
        let fit = truncate_to_width(&EIGHT, "Acme Corp", FontFace::Serif, 1.0, 31).unwrap();
        assert_eq!(fit.content, "Acm");
        assert_eq!(fit.width, 24);
        assert!(fit.truncated);
    }

    #[test]
    fn test_truncate_respects_char_boundaries() {
        let fit = truncate_to_width(&EIGHT, "Ünïcødé", FontFace::Sans, 1.0, 20).unwrap();
        assert_eq!(fit.content, "Ün");
    }

    #[test]
    fn test_truncate_stops_when_empty_still_too_wide() {
        let fit = truncate_to_width(&Padded, "abc", FontFace::Sans, 1.0, 3).unwrap();
        assert_eq!(fit.content, "");
        assert_eq!(fit.width, 5);
        assert!(fit.truncated);
    }

    #[test]
    fn test_truncate_propagates_metrics_error() {
        assert_eq!(truncate_to_width(&Broken, "abc", FontFace::Sans, 1.0, 10), Err(()));
    }

    #[test]
    fn test_scale_search_long_name() {
        // 31 chars × 8px: largest s on the 0.01 grid with 248·s < 150 is 0.60
        let name = "Alexandria Featherington-Smythe";
        let search = ScaleSearch::new(2.0, 0.01, 0.1);
        let s = scale_to_width(&EIGHT, name, FontFace::Sans, 150, search).unwrap();

        assert!((s - 0.60).abs() < 1e-4, "got {s}");
        assert!(EIGHT.measure(name, FontFace::Sans, s).unwrap() < 150);
        assert!(EIGHT.measure(name, FontFace::Sans, s + 0.01).unwrap() >= 150);
    }

    #[test]
    fn test_scale_search_keeps_start_when_it_fits() {
        let search = ScaleSearch::new(2.0, 0.01, 0.1);
        let s = scale_to_width(&EIGHT, "Al", FontFace::Sans, 171, search).unwrap();
        assert_eq!(s, 2.0);
    }

    #[test]
    fn test_scale_search_floor_when_nothing_fits() {
        let search = ScaleSearch::new(2.0, 0.01, 0.1);
        let long = "W".repeat(400);
        let s = scale_to_width(&EIGHT, &long, FontFace::Sans, 171, search).unwrap();
        assert_eq!(s, 0.1);
    }

    #[test]
    fn test_scale_search_non_positive_step_tries_start_only() {
        let search = ScaleSearch::new(1.0, 0.0, 0.1);
        assert_eq!(search.steps(), 0);
        let s = scale_to_width(&EIGHT, "abcdefghij", FontFace::Sans, 50, search).unwrap();
        assert_eq!(s, 0.1);

        let s = scale_to_width(&EIGHT, "ab", FontFace::Sans, 50, search).unwrap();
        assert_eq!(s, 1.0);
    }

    #[test]
    fn test_scale_search_start_below_floor() {
        let search = ScaleSearch::new(0.05, 0.01, 0.1);
        assert_eq!(scale_to_width(&EIGHT, "ab", FontFace::Sans, 50, search).unwrap(), 0.1);
    }

    #[test]
    fn test_scale_search_step_count() {
        assert_eq!(ScaleSearch::new(2.0, 0.01, 0.1).steps(), 190);
        assert_eq!(ScaleSearch::new(1.0, 1e-9, 0.0).steps(), MAX_SCALE_STEPS);
    }

    #[test]
    fn test_title_value_short_title_long_value() {
        let fit = fit_title_value(
            &EIGHT,
            "Role",
            "Senior Principal Distinguished Engineer of Everything",
            FontFace::Sans,
            0.5,
            186,
            10,
        )
        .unwrap();

        assert_eq!(fit.title.content, "Role");
        assert!(!fit.title.truncated);
        assert_eq!(fit.value_budget, 186 - 16 - 10);
        assert!(fit.value.truncated);
        assert!(fit.value.content.len() < 53);
        assert!(fit.value.width <= 160);
        assert!("Senior Principal Distinguished Engineer of Everything".starts_with(fit.value.content));
    }

    #[test]
    fn test_title_value_title_eats_budget() {
        let fit = fit_title_value(&EIGHT, "A very long title", "value", FontFace::Sans, 1.0, 40, 10)
            .unwrap();
        assert_eq!(fit.title.content, "A ver");
        assert_eq!(fit.value_budget, 0);
        assert_eq!(fit.value.content, "");
    }
}
