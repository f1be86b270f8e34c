//! Application configuration and constants
//!
//! This module defines central configuration values used across the application.
//! All branding, naming, and configuration should reference these constants
//! rather than hardcoding values.

/// The application name
pub const APP_NAME: &str = "Ink Badge";

/// Application version (synchronized with Cargo.toml)
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Idle time after a redraw before the badge releases power (milliseconds)
pub const DEFAULT_IDLE_TIMEOUT_MS: u64 = 5_000;

/// Button debounce window (milliseconds)
pub const DEBOUNCE_MS: u64 = 20;

/// Development mode banner
pub const fn dev_banner() -> &'static str {
    "Ink Badge - Development Mode"
}
