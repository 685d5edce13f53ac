//! Font descriptor for text rendering.

use serde::{Deserialize, Serialize};

/// Font configuration for text drawn by the canvas.
///
/// A plain value: every scope owns its own copy, so changing the font inside a
/// `push`/`pop` pair never leaks into the enclosing scope.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FontDescriptor {
    /// Font family name (e.g., "Sans", "Monospace", "Times New Roman")
    pub family: String,

    /// Font size in points
    pub size: f64,
}

impl FontDescriptor {
    /// Creates a new font descriptor with the specified parameters.
    pub fn new(family: impl Into<String>, size: f64) -> Self {
        Self {
            family: family.into(),
            size,
        }
    }

    /// Converts this font descriptor to a Pango font description string.
    ///
    /// Format: "Family Size", e.g. "Times New Roman 12".
    pub fn to_pango_string(&self) -> String {
        format!("{} {}", self.family, format_size(self.size))
    }
}

impl Default for FontDescriptor {
    fn default() -> Self {
        Self {
            family: "Times New Roman".to_string(),
            size: 12.0,
        }
    }
}

/// Pango accepts fractional sizes; drop the fraction when it is zero.
fn format_size(size: f64) -> String {
    if size.fract() == 0.0 {
        format!("{}", size as i64)
    } else {
        format!("{size}")
    }
}
