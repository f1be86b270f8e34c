//! Badge UI layer: text fitting, field selection, layout composition.
//!
//! Everything here is pure and `no_std`: it only uses `core`, `heapless`,
//! `libm`, and the geometry types from `embedded-graphics`. Pixels are pushed
//! by the firmware crate, which consumes the [`draw::DrawCommand`] lists
//! produced by [`layout::Composer`].
//!
//! ```
//! use ui::{BadgeMachine, BadgeProfile, Composer, FixedAdvance, Transition};
//!
//! let profile = BadgeProfile::builder()
//!     .name("Ada Lovelace")
//!     .company("Analytical Engines", 0.6)
//!     .detail1("Role", "Programmer")
//!     .detail2("Web", "example.org")
//!     .image_path("/badges/badge.jpg")
//!     .build()
//!     .unwrap();
//!
//! let mut machine = BadgeMachine::new(&profile);
//! let selection = machine.apply(Transition::AdvanceCompany);
//!
//! let composer = Composer::for_display(296, 128);
//! let frame = composer
//!     .compose(&profile, selection, &FixedAdvance::new(8))
//!     .unwrap();
//! assert_eq!(frame.name.content, "Ada Lovelace");
//! ```

#![cfg_attr(not(test), no_std)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::panic)]
#![deny(clippy::expect_used)]

pub mod draw;
pub mod fit;
pub mod layout;
pub mod metrics;
pub mod profile;
pub mod selection;

pub use draw::{DrawCommand, DrawList, Pen};
pub use fit::{Fitted, ScaleSearch, TitleValueFit};
pub use layout::{BadgeFrame, BadgeGeometry, Composer, FittedText, LayoutError, LayoutStyle};
pub use metrics::{FixedAdvance, FontFace, MetricsError, TextMetrics};
pub use profile::{BadgeProfile, CompanyOption, ConfigError, DetailOption, ProfileRecord};
pub use selection::{BadgeMachine, BadgeSelection, Field, Transition};
