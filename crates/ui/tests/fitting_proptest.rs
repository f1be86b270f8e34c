//! Property-based tests for the fitting engine and the badge state machine.
//! Verifies invariants hold for ALL inputs, not just fixed examples.

#![allow(clippy::unwrap_used)]

use ui::{
    fit::{fit_title_value, scale_to_width, truncate_to_width},
    BadgeMachine, BadgeProfile, FixedAdvance, FontFace, ScaleSearch, TextMetrics, Transition,
};

const METRICS: FixedAdvance = FixedAdvance::new(8);

/// Glyph widths that vary per character, to check nothing assumes a fixed
/// advance.
struct Proportional;

impl TextMetrics for Proportional {
    type Error = ui::MetricsError;

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]
    fn measure(&self, text: &str, _font: FontFace, scale: f32) -> Result<u32, Self::Error> {
        if !(scale.is_finite() && scale > 0.0) {
            return Err(ui::MetricsError::InvalidScale);
        }
        let units: u32 = text
            .chars()
            .map(|c| match c {
                'i' | 'l' | '.' | ' ' => 3,
                'm' | 'w' | 'M' | 'W' => 11,
                _ => 7,
            })
            .sum();
        Ok((units as f32 * scale) as u32)
    }
}

proptest::proptest! {
    /// Whatever the input, the truncated text fits the budget.
    #[test]
    fn truncation_never_exceeds_budget(
        text in "\\PC{0,60}",
        scale in 0.1f32..3.0,
        budget in 0i32..400,
    ) {
        let fit = truncate_to_width(&METRICS, &text, FontFace::Sans, scale, budget).unwrap();
        let width = METRICS.measure(fit.content, FontFace::Sans, scale).unwrap();
        assert!(i64::from(width) <= i64::from(budget), "{width} > {budget}");

        let fit = truncate_to_width(&Proportional, &text, FontFace::Sans, scale, budget).unwrap();
        let width = Proportional.measure(fit.content, FontFace::Sans, scale).unwrap();
        assert!(i64::from(width) <= i64::from(budget), "{width} > {budget}");
    }

    /// Output is always a prefix of the input.
    #[test]
    fn truncation_is_prefix(text in "\\PC{0,60}", budget in -50i32..400) {
        let fit = truncate_to_width(&Proportional, &text, FontFace::Serif, 0.6, budget).unwrap();
        assert!(text.starts_with(fit.content));
        assert_eq!(fit.truncated, fit.content.len() < text.len());
    }

    /// A larger budget never keeps fewer characters.
    #[test]
    fn truncation_is_monotone(text in "\\PC{0,60}", a in 0i32..300, b in 0i32..300) {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        let short = truncate_to_width(&Proportional, &text, FontFace::Sans, 1.0, lo).unwrap();
        let long = truncate_to_width(&Proportional, &text, FontFace::Sans, 1.0, hi).unwrap();
        assert!(short.content.len() <= long.content.len());
    }

    /// Zero budget always means nothing is drawn.
    #[test]
    fn zero_budget_is_empty(text in "\\PC{0,60}") {
        let fit = truncate_to_width(&METRICS, &text, FontFace::Sans, 1.0, 0).unwrap();
        assert_eq!(fit.content, "");
    }

    /// Scale search stays within [min, start].
    #[test]
    fn scale_search_respects_floor(
        text in "\\PC{0,60}",
        budget in -10i32..400,
        start in 0.2f32..4.0,
        step in 0.001f32..0.5,
        min in 0.05f32..0.2,
    ) {
        let search = ScaleSearch::new(start, step, min);
        let s = scale_to_width(&Proportional, &text, FontFace::Sans, budget, search).unwrap();
        assert!(s >= min && s <= start.max(min), "{s} outside [{min}, {start}]");
    }

    /// When the search finds a scale above the floor it really fits.
    #[test]
    fn scale_search_result_fits(text in "[a-zA-Z ]{1,40}", budget in 1i32..400) {
        let search = ScaleSearch::new(2.0, 0.01, 0.1);
        let s = scale_to_width(&METRICS, &text, FontFace::Sans, budget, search).unwrap();
        if s > 0.1 {
            let width = METRICS.measure(&text, FontFace::Sans, s).unwrap();
            assert!(i64::from(width) < i64::from(budget));
        }
    }

    /// The value's budget is what the fitted title leaves over, never negative.
    #[test]
    fn compound_fit_budget(
        title in "\\PC{0,30}",
        value in "\\PC{0,60}",
        region in 0i32..300,
        gap in 0i32..20,
    ) {
        let fit = fit_title_value(&Proportional, &title, &value, FontFace::Sans, 0.5, region, gap)
            .unwrap();
        let expected = (region - i32::try_from(fit.title.width).unwrap() - gap).max(0);
        assert_eq!(fit.value_budget, expected);
        assert!(i64::from(fit.value.width) <= i64::from(fit.value_budget));
    }

    /// n advances over n options return to the start.
    #[test]
    fn cycling_wraps(n in 1usize..=8, start in 0usize..8) {
        let mut b = BadgeProfile::builder()
            .name("N")
            .detail1("t", "v")
            .detail2("t", "v")
            .image_path("badge.png");
        for _ in 0..n {
            b = b.company("C", 0.6);
        }
        let profile = b.build().unwrap();
        let mut machine = BadgeMachine::new(&profile);
        for _ in 0..(start % n) {
            machine.apply(Transition::AdvanceCompany);
        }
        let before = machine.selection();
        for _ in 0..n {
            let sel = machine.apply(Transition::AdvanceCompany);
            assert!(sel.company() < n);
        }
        assert_eq!(machine.selection(), before);
    }
}
