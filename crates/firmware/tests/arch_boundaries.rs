//! Architecture boundary tests: run with `cargo test -p firmware --test arch_boundaries`
// Architecture test file: unwrap is an intentional test mechanism.
#![allow(clippy::unwrap_used)]
//!
//! Layering rules for the badge workspace:
//!   Rule 1: eink-specs is plain panel data, no embassy, no graphics
//!   Rule 2: platform (HAL traits) must not depend on ui or firmware
//!   Rule 3: ui (fitting, selection, layout) must not depend on firmware and
//!           must not need a real font or panel to produce a frame
//!
//! The dependency graph enforces these at build time; the tests below name
//! the public surface of each layer from outside the firmware crate so an
//! accidental upward dependency shows up as a link failure here.

/// `eink-specs` carries the badge panel's geometry and timings.
#[test]
fn eink_specs_describes_badge_panel() {
    let spec = eink_specs::displays::BADGER_2040;
    assert_eq!((spec.width, spec.height), (296, 128));
    assert_eq!(firmware::BADGE_SPEC.name, spec.name);
}

/// Platform traits are nameable without any firmware types.
#[test]
fn platform_hal_is_independent() {
    fn _assert_display_trait_exists<T: platform::EinkDisplay>() {}
    fn _assert_input_trait_exists<T: platform::InputDevice>() {}
    fn _assert_power_trait_exists<T: platform::PowerLatch + ?Sized>() {}

    _assert_power_trait_exists::<dyn platform::PowerLatch>();
}

/// `ui` composes a whole frame with its own reference metrics, no firmware
/// font ladder or display involved.
#[test]
fn ui_composes_without_firmware() {
    use ui::{BadgeMachine, BadgeProfile, Composer, DrawCommand, FixedAdvance};

    let profile = BadgeProfile::builder()
        .name("N")
        .company("C", 0.6)
        .detail1("t", "v")
        .detail2("t", "v")
        .image_path("/badges/badge.png")
        .build()
        .unwrap();
    let machine = BadgeMachine::new(&profile);
    let frame = Composer::for_display(296, 128)
        .compose(&profile, machine.selection(), &FixedAdvance::new(8))
        .unwrap();
    let commands = frame.commands();
    assert_eq!(commands.last(), Some(&DrawCommand::Flush));
}
