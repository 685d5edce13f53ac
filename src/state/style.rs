//! Drawing attributes of a scope.

use crate::draw::{BLACK, Color, FontDescriptor, WHITE};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Whether a shape's coordinate names its top-left corner or its center.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub enum AnchorMode {
    TopLeft,
    Center,
}

impl AnchorMode {
    /// Offset to add to the anchor coordinate so it becomes the top-left
    /// corner of a `w` x `h` box. Halving truncates toward zero.
    pub fn offset(self, w: i32, h: i32) -> (i32, i32) {
        match self {
            AnchorMode::TopLeft => (0, 0),
            AnchorMode::Center => ((w / 2).wrapping_neg(), (h / 2).wrapping_neg()),
        }
    }
}

/// Style attributes shared by every draw call of a scope.
#[derive(Debug, Clone, PartialEq)]
pub struct StyleState {
    pub stroke_color: Color,
    pub fill_color: Color,
    pub stroke_enabled: bool,
    pub fill_enabled: bool,
    pub stroke_weight: f64,
    pub font: FontDescriptor,
    /// `None` clears to transparent; `Some` paints a flat color.
    pub background: Option<Color>,
    pub rect_mode: AnchorMode,
    pub ellipse_mode: AnchorMode,
    /// `mouse_pos` returns raw screen coordinates.
    pub use_absolute_position: bool,
    /// `mouse_pos` maps the pointer back through the active transforms.
    pub account_for_transformations: bool,
}

impl Default for StyleState {
    fn default() -> Self {
        Self {
            stroke_color: BLACK,
            fill_color: BLACK,
            stroke_enabled: true,
            fill_enabled: true,
            stroke_weight: 1.0,
            font: FontDescriptor::default(),
            background: Some(WHITE),
            rect_mode: AnchorMode::TopLeft,
            ellipse_mode: AnchorMode::Center,
            use_absolute_position: false,
            account_for_transformations: false,
        }
    }
}
