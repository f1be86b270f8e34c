//! Input device abstraction

/// Input device trait for the badge's front-panel buttons
pub trait InputDevice {
    /// Wait for next input event (async, power-efficient)
    fn wait_for_event(&mut self) -> impl core::future::Future<Output = InputEvent>;

    /// Poll for event (non-blocking)
    fn poll_event(&mut self) -> Option<InputEvent>;
}

/// Input events from buttons
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum InputEvent {
    /// Button pressed
    ButtonPress(Button),
    /// Button released
    ButtonRelease(Button),
}

impl InputEvent {
    /// The button this event came from
    pub const fn button(self) -> Button {
        match self {
            Self::ButtonPress(b) | Self::ButtonRelease(b) => b,
        }
    }

    /// `true` for a fresh press
    pub const fn is_press(self) -> bool {
        matches!(self, Self::ButtonPress(_))
    }
}

/// Physical buttons on the badge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Button {
    /// Left face button
    A,
    /// Middle face button
    B,
    /// Right face button
    C,
    /// Up rocker
    Up,
    /// Down rocker
    Down,
    /// Back-side user button
    User,
}

impl Button {
    /// Every button, in scan order
    pub const ALL: [Button; 6] = [
        Button::A,
        Button::B,
        Button::C,
        Button::Up,
        Button::Down,
        Button::User,
    ];
}
