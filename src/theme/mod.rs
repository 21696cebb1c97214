//! Core theme vocabulary.
//!
//! This module provides:
//!
//! - [`Preference`]: The user-facing light/dark/system setting
//! - [`ColorMode`]: A concrete light or dark mode, used both for the
//!   resolved theme and for the OS color-scheme mirror
//! - [`InvalidPreferenceError`]: Returned when parsing a preference from
//!   an untrusted string fails
//!
//! Resolution from a preference to a concrete mode lives in
//! [`Preference::resolve`]. Every path that turns a preference into a
//! displayed mode goes through that one function, including the generated
//! pre-paint script (see [`crate::script`]).

mod preference;

pub use preference::{ColorMode, InvalidPreferenceError, Preference};
