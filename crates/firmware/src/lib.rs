//! Ink Badge firmware
//!
//! Name badge runtime for a 2.9" 296×128 e-ink panel with three face buttons.
//!
//! # Architecture
//!
//! This firmware follows a layered architecture:
//!
//! ```text
//! Application Layer (app: event loop, power latch)
//!         ↓
//! Badge UI (ui crate: fitting, selection, layout)
//!         ↓
//! Render sink + drivers (render, fonts, images, input, display)
//!         ↓
//! Platform HAL (platform crate traits)
//! ```
//!
//! # Features
//!
//! - `emulator` - Build for desktop testing (tokio, PNG snapshots, JSON profiles)
//! - `std` - Enable standard library
//! - `defmt` - defmt derives on platform types
//!
//! # Examples
//!
//! ## Emulator Target
//!
//! ```bash
//! cargo run -p firmware --example badge_emulator --features emulator -- \
//!     --profile demos/badge_data.json --events abcc
//! ```

#![cfg_attr(all(not(test), not(feature = "std")), no_std)]
// Upgrade relevant warns to deny; keep pedantic as warn (too noisy for firmware)
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
// Critical correctness: deny these
#![deny(clippy::await_holding_lock)] // holding a blocking Mutex across .await is a bug
#![deny(unsafe_op_in_unsafe_fn)]
// unsafe fn body is not implicitly unsafe block
// Logging discipline (allow println in tests via clippy.toml)
#![warn(clippy::print_stdout)] // prefer tracing/defmt over println! in lib code
#![warn(clippy::dbg_macro)] // dbg! should not be left in committed code
// Intentional allows for this codebase:
#![allow(clippy::module_name_repetitions)] // common in Rust crates; not a real issue
#![allow(clippy::missing_errors_doc)] // most errors are self-explanatory
// Pedantic lints too noisy for firmware application code:
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::return_self_not_must_use)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::unused_async)]

pub mod app;
pub mod display;
pub mod fonts;
pub mod images;
pub mod input;
pub mod power;
pub mod render;

#[cfg(any(test, feature = "emulator"))]
pub mod profile_store;

// Re-export key types
pub use app::{AppConfig, AppError, BadgeApp, Tick};
pub use display::{BADGE_SPEC, DISPLAY_HEIGHT, DISPLAY_WIDTH};
pub use fonts::MonoLadder;
pub use images::{ImageSource, StaticImage, StaticImages};
pub use power::{LatchPin, UsbPower};

#[cfg(any(test, feature = "emulator"))]
pub use display::FramebufferDisplay;

#[cfg(any(test, feature = "emulator"))]
pub use images::FsImages;
