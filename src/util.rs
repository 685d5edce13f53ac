//! Small geometry and color helpers shared by the canvas and the rasterizers.
//!
//! This module provides:
//! - [`Point`] and [`Rect`], the integer coordinate types of the drawing API
//! - Color name lookup used by the configuration system

use crate::draw::{Color, color::*};

// ============================================================================
// Geometry
// ============================================================================

/// Integer point in either logical or device space.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const ORIGIN: Point = Point { x: 0, y: 0 };

    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Returns this point shifted by `(-other.x, -other.y)`.
    pub fn relative_to(self, other: Point) -> Self {
        Self {
            x: self.x.wrapping_sub(other.x),
            y: self.y.wrapping_sub(other.y),
        }
    }
}

impl From<(i32, i32)> for Point {
    fn from((x, y): (i32, i32)) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned rectangle as handed to the rasterizer.
///
/// Unlike a layout rectangle this keeps whatever width and height the sketch
/// asked for, negative extents included; the rasterizer decides how to draw them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Same rectangle with its top-left corner shifted by `(dx, dy)`.
    pub fn offset(self, (dx, dy): (i32, i32)) -> Self {
        Self {
            x: self.x.wrapping_add(dx),
            y: self.y.wrapping_add(dy),
            ..self
        }
    }

    /// Returns the rectangle with non-negative extents covering the same area.
    pub fn normalized(self) -> Self {
        let (x, width) = if self.width >= 0 {
            (self.x, self.width)
        } else {
            (self.x.wrapping_add(self.width), self.width.wrapping_neg())
        };
        let (y, height) = if self.height >= 0 {
            (self.y, self.height)
        } else {
            (self.y.wrapping_add(self.height), self.height.wrapping_neg())
        };
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

// ============================================================================
// Color Mapping
// ============================================================================

/// Maps color name strings to Color values.
///
/// Used by the configuration system to parse color names from the config file.
///
/// # Supported Names (case-insensitive)
/// - "red", "green", "blue", "yellow", "orange", "pink", "white", "black"
///
/// # Returns
/// - `Some(Color)` if the name matches a predefined color
/// - `None` if the name is not recognized
pub fn name_to_color(name: &str) -> Option<Color> {
    match name.to_lowercase().as_str() {
        "red" => Some(RED),
        "green" => Some(GREEN),
        "blue" => Some(BLUE),
        "yellow" => Some(YELLOW),
        "orange" => Some(ORANGE),
        "pink" => Some(PINK),
        "white" => Some(WHITE),
        "black" => Some(BLACK),
        "gray" | "grey" => Some(GRAY),
        _ => None,
    }
}

/// Returns true for the names the config accepts as "no background".
pub fn is_transparent_name(name: &str) -> bool {
    matches!(name.to_lowercase().as_str(), "none" | "transparent")
}
