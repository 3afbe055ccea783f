//! Menu screen model for a home-automation display panel.
//!
//! A [`menu::screen::MenuScreen`] holds a named, ordered list of menu items —
//! switches, sensors, lights, covers, numbers, buttons, fans, selects, text
//! sensors, title rows, and user-defined commands — each paired with a display
//! name. It provides index-based navigation, selection driven by physical
//! input, and a single aggregated "screen changed" notification that fires
//! whenever any registered entity reports a state change or a command fires.
//!
//! The crate is single-threaded by design: it lives inside a cooperative
//! display/input loop, entity handles are `Rc`-shared, and every callback runs
//! synchronously on the caller's thread. Items are registered during startup
//! configuration and only read afterwards; there is no locking anywhere.
//!
//! Entity kinds are cargo features (all enabled by default), so a firmware
//! build compiled without e.g. `fan` cannot represent a fan item, including in
//! deserialized configuration.

pub mod callback;
pub mod config;
pub mod entity;
pub mod menu;

/// Build-time crate version, appended to the titles of screens that have
/// `show_version` set.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
