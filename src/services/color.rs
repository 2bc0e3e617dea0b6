//! Color service — hue value and HSL string formatting.
//!
//! DESIGN
//! ======
//! The hue is the only piece of mutable color state. Pointer coordinates are
//! carried as raw JSON values and rendered into the color string verbatim:
//! nothing is clamped or validated, so a malformed sample yields a malformed
//! (but harmless) string that the browser simply refuses to apply.

use std::fmt;

/// Exclusive upper bound of the hue wheel.
pub const HUE_LIMIT: u16 = 360;

/// Hue used when `INITIAL_HUE` is not configured.
pub const DEFAULT_HUE: Hue = Hue(30);

// =============================================================================
// HUE
// =============================================================================

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum HueError {
    #[error("hue {0} out of range (expected 0..360)")]
    OutOfRange(u32),
}

/// Position on the color wheel, always in `[0, 360)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Hue(u16);

impl Hue {
    /// Build a hue, rejecting values outside `[0, 360)`.
    ///
    /// # Errors
    ///
    /// Returns `HueError::OutOfRange` for values of 360 or more.
    pub fn new(value: u32) -> Result<Self, HueError> {
        match u16::try_from(value) {
            Ok(v) if v < HUE_LIMIT => Ok(Self(v)),
            _ => Err(HueError::OutOfRange(value)),
        }
    }

    /// Draw a uniformly random hue.
    pub fn random(rng: &mut impl rand::Rng) -> Self {
        Self(rng.random_range(0..HUE_LIMIT))
    }

    #[must_use]
    pub fn value(self) -> u16 {
        self.0
    }
}

impl Default for Hue {
    fn default() -> Self {
        DEFAULT_HUE
    }
}

impl fmt::Display for Hue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// =============================================================================
// POINTER SAMPLE
// =============================================================================

/// One pointer position as sent by a client. Fields are kept as raw JSON so
/// whatever the client sent ends up in the color string unchanged.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PointerSample {
    pub x: Option<serde_json::Value>,
    pub y: Option<serde_json::Value>,
}

impl PointerSample {
    /// Build a sample from already-normalized percentages.
    #[cfg(test)]
    #[must_use]
    pub fn percent(x: i64, y: i64) -> Self {
        Self { x: Some(x.into()), y: Some(y.into()) }
    }

    /// Pull `x`/`y` out of a frame payload. Missing keys stay `None`.
    #[must_use]
    pub fn from_data(data: &crate::frame::Data) -> Self {
        Self { x: data.get("x").cloned(), y: data.get("y").cloned() }
    }
}

// =============================================================================
// FORMATTING
// =============================================================================

/// Render `hsl(<hue>, <x>%, <y>%)`.
#[must_use]
pub fn hsl(hue: Hue, sample: &PointerSample) -> String {
    format!(
        "hsl({hue}, {}%, {}%)",
        render_component(sample.x.as_ref()),
        render_component(sample.y.as_ref())
    )
}

/// Render one coordinate as text. Strings lose their quotes; a missing value
/// renders as `undefined`.
fn render_component(value: Option<&serde_json::Value>) -> String {
    match value {
        None => "undefined".to_string(),
        Some(serde_json::Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

#[cfg(test)]
#[path = "color_test.rs"]
mod tests;
