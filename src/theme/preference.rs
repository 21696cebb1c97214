//! Preference and color mode types.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A concrete display mode.
///
/// This is the value actually applied to a UI: either light or dark,
/// never "system". It doubles as the mirror of the OS color-scheme
/// signal, which reports the same two states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorMode {
    Light,
    Dark,
}

impl ColorMode {
    /// Returns the lowercase wire form (`"light"` or `"dark"`).
    pub fn as_str(&self) -> &'static str {
        match self {
            ColorMode::Light => "light",
            ColorMode::Dark => "dark",
        }
    }

    /// True for [`ColorMode::Dark`].
    pub fn is_dark(&self) -> bool {
        matches!(self, ColorMode::Dark)
    }
}

impl fmt::Display for ColorMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The user-selected theme preference.
///
/// `Light` and `Dark` pin the display mode directly; `System` defers to
/// the OS color-scheme signal. The preference is the sole persisted
/// value: resolved modes are always derived, never stored.
///
/// # Example
///
/// ```rust
/// use duotone::{ColorMode, Preference};
///
/// assert_eq!(Preference::Dark.resolve(ColorMode::Light), ColorMode::Dark);
/// assert_eq!(Preference::System.resolve(ColorMode::Light), ColorMode::Light);
/// assert_eq!("system".parse::<Preference>().unwrap(), Preference::System);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Preference {
    Light,
    Dark,
    /// Follow the OS color-scheme signal. This is the default for a
    /// store with no persisted preference.
    #[default]
    System,
}

impl Preference {
    /// All accepted preference values, in wire order.
    pub const ALL: [Preference; 3] = [Preference::Light, Preference::Dark, Preference::System];

    /// Returns the lowercase wire form (`"light"`, `"dark"` or `"system"`).
    pub fn as_str(&self) -> &'static str {
        match self {
            Preference::Light => "light",
            Preference::Dark => "dark",
            Preference::System => "system",
        }
    }

    /// Resolves this preference to a concrete mode.
    ///
    /// `Light` and `Dark` resolve to themselves; `System` resolves to
    /// the supplied OS mode. The result is always displayable: there is
    /// no "system" variant on [`ColorMode`].
    pub fn resolve(self, system: ColorMode) -> ColorMode {
        match self {
            Preference::Light => ColorMode::Light,
            Preference::Dark => ColorMode::Dark,
            Preference::System => system,
        }
    }
}

impl fmt::Display for Preference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Preference {
    type Err = InvalidPreferenceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "light" => Ok(Preference::Light),
            "dark" => Ok(Preference::Dark),
            "system" => Ok(Preference::System),
            other => Err(InvalidPreferenceError {
                value: other.to_string(),
            }),
        }
    }
}

/// Error returned when a string is not one of the three preference values.
///
/// Surfaced only at string boundaries (parsing user input or persisted
/// state); within the crate the [`Preference`] enum makes invalid values
/// unrepresentable.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid theme preference '{value}', expected one of: light, dark, system")]
pub struct InvalidPreferenceError {
    /// The rejected input.
    pub value: String,
}
