//! Badge event loop.
//!
//! One [`tick`](BadgeApp::tick) is one wake of the badge: hold the power
//! latch, wait for a button, act on the highest-priority press, redraw,
//! release the latch. On battery the release switches the board off and the
//! next press boots it again; on USB the loop simply goes round.

use embassy_time::{with_timeout, Duration};
use embedded_graphics::{pixelcolor::Gray4, prelude::DrawTarget};
use platform::{AwakeGuard, DisplayDriver, EinkDisplay, InputDevice, PowerLatch, UpdateSpeed};
use ui::{BadgeMachine, BadgeProfile, BadgeSelection, Composer, TextMetrics, Transition};

use crate::{images::ImageSource, render};

/// Most extra events drained in one tick after the one that woke it
pub const MAX_DRAINED_EVENTS: usize = 8;

/// Runtime tuning.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AppConfig {
    /// How long a tick waits for a press before releasing power
    pub idle_timeout: Duration,
    /// Waveform selected at start-up
    pub update_speed: UpdateSpeed,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            idle_timeout: Duration::from_millis(platform::config::DEFAULT_IDLE_TIMEOUT_MS),
            update_speed: UpdateSpeed::Normal,
        }
    }
}

/// What a tick did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tick {
    /// No input before the idle timeout
    Idle,
    /// Input arrived but none of it maps to a transition
    Ignored,
    /// A transition was applied and the badge redrawn
    Redrawn(Transition),
}

/// A frame that could not be put on the glass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppError<DrawE, RefreshE> {
    /// Writing to the framebuffer failed
    Draw(DrawE),
    /// Panel wake, refresh or sleep failed
    Refresh(RefreshE),
}

impl<DrawE: core::fmt::Display, RefreshE: core::fmt::Display> core::fmt::Display
    for AppError<DrawE, RefreshE>
{
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Draw(e) => write!(f, "draw failed: {e}"),
            Self::Refresh(e) => write!(f, "panel refresh failed: {e}"),
        }
    }
}

#[cfg(feature = "std")]
mod std_error {
    extern crate std;

    use core::fmt::{Debug, Display};

    impl<DrawE: Debug + Display, RefreshE: Debug + Display> std::error::Error
        for super::AppError<DrawE, RefreshE>
    {
    }
}

type FrameError<D> = AppError<<D as DrawTarget>::Error, <D as DisplayDriver>::DriverError>;

/// The badge: profile, selection state and the hardware it drives.
pub struct BadgeApp<D, I, P, M, S> {
    display: D,
    input: I,
    power: P,
    metrics: M,
    images: S,
    profile: BadgeProfile,
    machine: BadgeMachine,
    composer: Composer,
    config: AppConfig,
}

impl<D, I, P, M, S> BadgeApp<D, I, P, M, S>
where
    D: EinkDisplay + DrawTarget<Color = Gray4>,
    I: InputDevice,
    P: PowerLatch,
    M: TextMetrics,
    M::Error: core::fmt::Display,
    S: ImageSource,
{
    /// Badge showing `profile` on `display`, laid out for the display's size
    pub fn new(
        display: D,
        input: I,
        power: P,
        metrics: M,
        images: S,
        profile: BadgeProfile,
        config: AppConfig,
    ) -> Self {
        let size = display.dimensions();
        let machine = BadgeMachine::new(&profile);
        Self {
            display,
            input,
            power,
            metrics,
            images,
            profile,
            machine,
            composer: Composer::for_display(size.width, size.height),
            config,
        }
    }

    /// Select the configured update speed and draw the first frame.
    pub async fn start(&mut self) -> Result<(), FrameError<D>> {
        tracing::info!(
            name = self.profile.name(),
            external_power = self.power.on_external_power(),
            "badge starting"
        );
        let _awake = AwakeGuard::hold(&mut self.power);
        self.display.set_update_speed(self.config.update_speed);
        redraw(
            &mut self.display,
            &mut self.images,
            &self.metrics,
            &self.composer,
            &self.profile,
            self.machine.selection(),
        )
        .await
    }

    /// One wake cycle. The power latch is released on every exit path.
    pub async fn tick(&mut self) -> Result<Tick, FrameError<D>> {
        let _awake = AwakeGuard::hold(&mut self.power);

        let Ok(first) = with_timeout(self.config.idle_timeout, self.input.wait_for_event()).await else {
            tracing::debug!("idle timeout, releasing power");
            return Ok(Tick::Idle);
        };

        let input = &mut self.input;
        let drained = core::iter::from_fn(|| input.poll_event()).take(MAX_DRAINED_EVENTS);
        let pressed = core::iter::once(first)
            .chain(drained)
            .filter(|event| event.is_press())
            .filter_map(|event| Transition::for_button(event.button()));

        let Some(transition) = Transition::highest_priority(pressed) else {
            tracing::debug!("no actionable input");
            return Ok(Tick::Ignored);
        };

        let selection = self.machine.apply(transition);
        tracing::debug!(
            field = %transition.field(),
            index = selection.index(transition.field()),
            "selection advanced"
        );

        redraw(
            &mut self.display,
            &mut self.images,
            &self.metrics,
            &self.composer,
            &self.profile,
            selection,
        )
        .await?;
        Ok(Tick::Redrawn(transition))
    }

    /// Tick forever, logging frames that fail.
    pub async fn run(&mut self)
    where
        D::Error: core::fmt::Display,
        D::DriverError: core::fmt::Display,
    {
        loop {
            match self.tick().await {
                Ok(Tick::Redrawn(transition)) => {
                    tracing::debug!(field = %transition.field(), "frame drawn");
                }
                Ok(Tick::Idle | Tick::Ignored) => {}
                Err(e) => tracing::error!(error = %e, "frame failed"),
            }
        }
    }

    /// Current selection
    pub fn selection(&self) -> BadgeSelection {
        self.machine.selection()
    }

    /// Profile being shown
    pub fn profile(&self) -> &BadgeProfile {
        &self.profile
    }

    /// Layout in use
    pub fn composer(&self) -> &Composer {
        &self.composer
    }

    /// The display
    pub fn display(&self) -> &D {
        &self.display
    }

    /// The input device, for feeding events
    pub fn input_mut(&mut self) -> &mut I {
        &mut self.input
    }

    /// The power latch
    pub fn power(&self) -> &P {
        &self.power
    }
}

/// Compose `selection`, paint it and push it to the glass.
///
/// A metrics failure costs the text, not the frame: the blank layout is drawn
/// instead.
async fn redraw<D, M, S>(
    display: &mut D,
    images: &mut S,
    metrics: &M,
    composer: &Composer,
    profile: &BadgeProfile,
    selection: BadgeSelection,
) -> Result<(), FrameError<D>>
where
    D: EinkDisplay + DrawTarget<Color = Gray4>,
    M: TextMetrics,
    M::Error: core::fmt::Display,
    S: ImageSource,
{
    let frame = match composer.compose(profile, selection, metrics) {
        Ok(frame) => frame,
        Err(e) => {
            tracing::warn!(error = %e, "layout failed, drawing blank frame");
            composer.compose_blank(profile)
        }
    };
    tracing::trace!(
        company = frame.company.content,
        name = frame.name.content,
        name_scale = frame.name.scale,
        name_truncated = frame.name.truncated,
        "frame fitted"
    );

    display.wake().await.map_err(AppError::Refresh)?;
    let flush = render::draw_frame(display, &frame.commands(), images).map_err(AppError::Draw)?;
    if flush {
        display.refresh_full().await.map_err(AppError::Refresh)?;
    }
    display.sleep().await.map_err(AppError::Refresh)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::{fonts::MonoLadder, images::StaticImages};
    use embedded_graphics::prelude::GrayColor;
    use platform::{
        mocks::{MockDisplay, MockInput, MockPower},
        Button, DisplayError, InputEvent,
    };
    use ui::{FontFace, MetricsError};

    type TestApp<M = MonoLadder> = BadgeApp<MockDisplay, MockInput, MockPower, M, StaticImages>;

    fn profile() -> BadgeProfile {
        BadgeProfile::builder()
            .name("Ada Lovelace")
            .company("Analytical Engines", 0.6)
            .company("Difference Engine Co", 0.5)
            .detail1("Role", "Programmer")
            .detail1("Email", "ada@example.org")
            .detail2("Web", "example.org")
            .detail2("Pronouns", "she/her")
            .image_path("/badges/badge.jpg")
            .build()
            .unwrap()
    }

    fn config() -> AppConfig {
        AppConfig {
            idle_timeout: Duration::from_millis(50),
            ..AppConfig::default()
        }
    }

    fn app_with<M>(metrics: M) -> TestApp<M>
    where
        M: TextMetrics,
        M::Error: core::fmt::Display,
    {
        BadgeApp::new(
            MockDisplay::new(296, 128),
            MockInput::new(),
            MockPower::new(),
            metrics,
            StaticImages::empty(),
            profile(),
            config(),
        )
    }

    fn app() -> TestApp {
        app_with(MonoLadder)
    }

    struct BrokenMetrics;

    impl TextMetrics for BrokenMetrics {
        type Error = MetricsError;

        fn measure(&self, _: &str, _: FontFace, _: f32) -> Result<u32, Self::Error> {
            Err(MetricsError::InvalidScale)
        }
    }

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.idle_timeout, Duration::from_millis(5_000));
        assert_eq!(config.update_speed, UpdateSpeed::Normal);
    }

    #[tokio::test]
    async fn test_start_draws_first_frame() {
        let mut app = BadgeApp::new(
            MockDisplay::new(296, 128),
            MockInput::new(),
            MockPower::new(),
            MonoLadder,
            StaticImages::empty(),
            profile(),
            AppConfig {
                update_speed: UpdateSpeed::Fast,
                ..config()
            },
        );
        app.start().await.unwrap();

        assert_eq!(app.display().update_speed(), UpdateSpeed::Fast);
        assert_eq!(app.display().refresh_count(), 1);
        assert_eq!(app.display().sleep_count(), 1);
        assert_eq!(app.power().halt_count(), 1);
        assert_eq!(app.selection(), BadgeSelection::new());
    }

    #[tokio::test]
    async fn test_press_advances_and_redraws() {
        let mut app = app();
        app.input_mut().press(Button::A).unwrap();

        let tick = app.tick().await.unwrap();

        assert_eq!(tick, Tick::Redrawn(Transition::AdvanceCompany));
        assert_eq!(app.selection().company(), 1);
        assert_eq!(app.display().refresh_count(), 1);
        assert_eq!(app.power().keepalive_count(), 1);
        assert_eq!(app.power().halt_count(), 1);
    }

    #[tokio::test]
    async fn test_idle_timeout_halts_without_redraw() {
        let mut app = app();

        let tick = app.tick().await.unwrap();

        assert_eq!(tick, Tick::Idle);
        assert_eq!(app.display().refresh_count(), 0);
        assert_eq!(app.power().halt_count(), 1);
    }

    #[tokio::test]
    async fn test_simultaneous_presses_take_highest_priority() {
        let mut app = app();
        app.input_mut().press(Button::C).unwrap();
        app.input_mut().press(Button::B).unwrap();
        app.input_mut().press(Button::A).unwrap();

        let tick = app.tick().await.unwrap();

        assert_eq!(tick, Tick::Redrawn(Transition::AdvanceCompany));
        let selection = app.selection();
        assert_eq!((selection.company(), selection.detail1(), selection.detail2()), (1, 0, 0));
        assert_eq!(app.input_mut().pending(), 0);
        assert_eq!(app.display().refresh_count(), 1);
    }

    #[tokio::test]
    async fn test_unmapped_and_release_events_ignored() {
        let mut app = app();
        app.input_mut().press(Button::Up).unwrap();
        app.input_mut()
            .add_event(InputEvent::ButtonRelease(Button::A))
            .unwrap();

        assert_eq!(app.tick().await.unwrap(), Tick::Ignored);
        assert_eq!(app.selection(), BadgeSelection::new());
        assert_eq!(app.display().refresh_count(), 0);
        assert_eq!(app.power().halt_count(), 1);
    }

    #[tokio::test]
    async fn test_cycling_wraps_after_every_option() {
        let mut app = app();
        for _ in 0..2 {
            app.input_mut().press(Button::C).unwrap();
            app.tick().await.unwrap();
        }
        assert_eq!(app.selection().detail2(), 0);
        assert_eq!(app.display().refresh_count(), 2);
    }

    #[tokio::test]
    async fn test_refresh_failure_still_releases_power() {
        let mut display = MockDisplay::new(296, 128);
        display.fail_refreshes(true);
        let mut app = BadgeApp::new(
            display,
            MockInput::new(),
            MockPower::new(),
            MonoLadder,
            StaticImages::empty(),
            profile(),
            config(),
        );
        app.input_mut().press(Button::B).unwrap();

        let result = app.tick().await;

        assert!(matches!(result, Err(AppError::Refresh(DisplayError::Busy))));
        assert_eq!(app.selection().detail1(), 1);
        assert_eq!(app.power().halt_count(), 1);
    }

    #[tokio::test]
    async fn test_metrics_failure_draws_blank_frame() {
        let mut app = app_with(BrokenMetrics);
        app.input_mut().press(Button::A).unwrap();

        let tick = app.tick().await.unwrap();

        assert_eq!(tick, Tick::Redrawn(Transition::AdvanceCompany));
        assert_eq!(app.display().refresh_count(), 1);
        let band = app.composer().geometry().name_band;
        assert_eq!(app.display().count_in(band, Gray4::BLACK), 0);
        assert!(app.display().count_in(band, Gray4::WHITE) > 0);
    }
}
