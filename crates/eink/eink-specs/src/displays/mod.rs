//! Pre-configured display specifications
//!
//! Panel templates for the Pimoroni badge boards.

pub mod pimoroni;

pub use pimoroni::*;
