//! Reader-tunable typography adjustments.

use serde::{Deserialize, Serialize};

const FONT_SCALE_MIN: u16 = 80;
const FONT_SCALE_MAX: u16 = 120;
const FONT_SCALE_DEFAULT: u16 = 100;

const LINE_LENGTH_MIN: u16 = 50;
const LINE_LENGTH_MAX: u16 = 80;
const LINE_LENGTH_DEFAULT: u16 = 65;

/// Font-size and line-length settings for rendered typography.
///
/// `font_scale` is a percentage of the base font size (80–120, default
/// 100); `line_length` is the measure in `ch` units (50–80, default
/// 65). Setters clamp out-of-range values instead of failing, matching
/// slider semantics.
///
/// # Example
///
/// ```rust
/// use duotone::TypographyAdjustments;
///
/// let adjustments = TypographyAdjustments::new()
///     .with_font_scale(110)
///     .with_line_length(72);
///
/// assert_eq!(
///     adjustments.css(),
///     "--typography-font-size-base: 1.1rem; max-width: clamp(20rem, 72ch, 100%);"
/// );
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypographyAdjustments {
    font_scale: u16,
    line_length: u16,
}

impl TypographyAdjustments {
    /// Creates the default settings (100%, 65ch).
    pub fn new() -> Self {
        Self {
            font_scale: FONT_SCALE_DEFAULT,
            line_length: LINE_LENGTH_DEFAULT,
        }
    }

    /// Sets the font scale percentage, clamped to [80, 120].
    pub fn with_font_scale(mut self, percent: u16) -> Self {
        self.font_scale = percent.clamp(FONT_SCALE_MIN, FONT_SCALE_MAX);
        self
    }

    /// Sets the line length in `ch`, clamped to [50, 80].
    pub fn with_line_length(mut self, ch: u16) -> Self {
        self.line_length = ch.clamp(LINE_LENGTH_MIN, LINE_LENGTH_MAX);
        self
    }

    /// The font scale percentage.
    pub fn font_scale(&self) -> u16 {
        self.font_scale
    }

    /// The line length in `ch`.
    pub fn line_length(&self) -> u16 {
        self.line_length
    }

    /// Returns the defaults, discarding any adjustments.
    pub fn reset(self) -> Self {
        Self::new()
    }

    /// The inline CSS declarations for a `typography` element.
    pub fn css(&self) -> String {
        format!(
            "--typography-font-size-base: {}rem; max-width: clamp(20rem, {}ch, 100%);",
            f64::from(self.font_scale) / 100.0,
            self.line_length
        )
    }
}

impl Default for TypographyAdjustments {
    fn default() -> Self {
        Self::new()
    }
}
