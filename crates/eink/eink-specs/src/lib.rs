//! E-Ink Panel Specifications
//!
//! Physical and timing characteristics of the e-ink panels a badge can be
//! built around. The layout code derives its band rectangles from
//! [`DisplaySpec::width`] and [`DisplaySpec::height`]; the host framebuffer
//! uses the refresh timings to pace simulated updates.
//!
//! # Features
//!
//! - **no_std compatible** - Works on embedded systems
//! - **Panel templates** - Pre-configured specs for Pimoroni badge panels
//! - **Serde support** - Optional serialization for TOML/JSON configs
//!
//! # Example
//!
//! ```
//! use eink_specs::displays::BADGER_2040;
//!
//! let spec = BADGER_2040;
//! assert_eq!((spec.width, spec.height), (296, 128));
//! assert!(spec.refresh.turbo_ms < spec.refresh.normal_ms);
//! ```
//!
//! # Custom Panel Specs
//!
//! ```
//! use eink_specs::{Controller, DisplaySpec, PanelType, RefreshTimings};
//!
//! const MY_PANEL: DisplaySpec = DisplaySpec {
//!     name: "Custom Panel",
//!     width: 250,
//!     height: 122,
//!     controller: Controller::SSD1680,
//!     panel_type: PanelType::Carta1000,
//!     grayscale_levels: 2,
//!     refresh: RefreshTimings {
//!         normal_ms: 2000,
//!         medium_ms: 1000,
//!         fast_ms: 500,
//!         turbo_ms: 250,
//!     },
//! };
//! ```

#![cfg_attr(not(feature = "std"), no_std)]

mod display_spec;
pub mod displays;

pub use display_spec::{Controller, DisplaySpec, PanelType, RefreshTimings};
