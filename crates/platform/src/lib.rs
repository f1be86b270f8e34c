//! Hardware Abstraction Layer (HAL) for the e-ink name badge
//!
//! This crate provides trait-based abstractions for the three collaborators
//! the badge application talks to, enabling development and testing without
//! physical hardware.
//!
//! # Architecture Layers
//!
//! ```text
//! Application Layer (firmware crate)
//!         ↓
//! Feature Layer (ui: fitting, selection, layout)
//!         ↓
//! Platform HAL (this crate - trait abstractions)
//!         ↓
//! Hardware Layer (Embassy HAL + PAC, or the desktop emulator)
//! ```
//!
//! # Abstractions
//!
//! - [`DisplayDriver`] / [`EinkDisplay`] - e-ink panel control
//! - [`InputDevice`] - front-panel buttons
//! - [`PowerLatch`] - battery power hold / release
//!
//! # Features
//!
//! - `std`: Enable standard library support (for testing)
//! - `defmt`: Enable defmt logging
//!
//! # Example
//!
//! ```no_run
//! use platform::{DisplayDriver, PowerLatch, AwakeGuard};
//!
//! async fn example<D: DisplayDriver, P: PowerLatch>(display: &mut D, power: &mut P) {
//!     let _awake = AwakeGuard::hold(power);
//!     let _ = display.refresh_full().await;
//! }
//! ```

// ── Lint policy ─────────────────────────────────────────────────────────────
#![deny(clippy::unwrap_used)] // no .unwrap() in production code
#![deny(clippy::expect_used)] // no .expect() in production code
#![deny(clippy::panic)] // no panic!() in production code
#![deny(clippy::unreachable)] // no unreachable!() that isn't documented
#![deny(unused_must_use)]
// all Results must be handled
// ────────────────────────────────────────────────────────────────────────────
#![cfg_attr(not(test), no_std)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(unsafe_op_in_unsafe_fn)] // unsafe fn body is not implicitly unsafe block
#![warn(clippy::print_stdout)] // prefer tracing/defmt over println! in lib code
#![allow(clippy::must_use_candidate)] // hardware accessors: callers decide
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(async_fn_in_trait)] // Embassy no_std: single-threaded, Send bounds not needed

pub mod config;
pub mod display;
pub mod input;
pub mod mocks;
pub mod power;

// Re-export main high-level traits
pub use display::{DisplayDriver, DisplayError, EinkDisplay, UpdateSpeed};
pub use input::{Button, InputDevice, InputEvent};
pub use power::{AwakeGuard, PowerLatch};
