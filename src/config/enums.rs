//! Configuration enum types.

use crate::draw::{BLACK, Color};
use crate::util::{is_transparent_name, name_to_color};
use log::warn;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Color specification - either a named color or RGB values.
///
/// # Examples
/// ```toml
/// # Named color
/// stroke_color = "red"
///
/// # Custom RGB color (0-255 per component)
/// fill_color = [255, 128, 0]  # Orange
///
/// # Only meaningful for the background
/// background = "transparent"
/// ```
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, JsonSchema)]
#[serde(untagged)]
pub enum ColorSpec {
    /// Named color: red, green, blue, yellow, orange, pink, gray, white, black
    Name(String),
    /// RGB color as [red, green, blue] where each component is 0-255
    Rgb([u8; 3]),
}

impl ColorSpec {
    /// Converts the color specification to a [`Color`] struct.
    ///
    /// Unknown color names fall back to black with a warning.
    pub fn to_color(&self) -> Color {
        match self {
            ColorSpec::Name(name) => name_to_color(name).unwrap_or_else(|| {
                warn!("Unknown color '{}', using black", name);
                BLACK
            }),
            ColorSpec::Rgb([r, g, b]) => Color::from_rgb8(*r, *g, *b),
        }
    }

    /// Like [`ColorSpec::to_color`], but `"none"` and `"transparent"` map to `None`.
    pub fn to_background(&self) -> Option<Color> {
        match self {
            ColorSpec::Name(name) if is_transparent_name(name) => None,
            _ => Some(self.to_color()),
        }
    }
}
