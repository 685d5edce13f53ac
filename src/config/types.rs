//! Configuration type definitions.

use super::enums::ColorSpec;
use crate::state::AnchorMode;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Frame buffer size.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct CanvasConfig {
    /// Width in pixels (valid range: 1 - 8192)
    #[serde(default = "default_width")]
    pub width: i32,

    /// Height in pixels (valid range: 1 - 8192)
    #[serde(default = "default_height")]
    pub height: i32,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
        }
    }
}

/// Frame loop timing and per-cycle behavior.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct FrameLoopConfig {
    /// Target cycles per second. The interval is `1000 / frame_rate` ms,
    /// never below 1 ms; zero or negative values also give 1 ms.
    #[serde(default = "default_frame_rate")]
    pub frame_rate: i32,

    /// Discard pushed scopes, style changes and the frame buffer after every
    /// cycle. When false the sketch keeps painting over the previous frame.
    #[serde(default = "default_reset_after_loop")]
    pub reset_after_loop: bool,

    /// Start with anti-aliasing enabled
    #[serde(default)]
    pub anti_alias: bool,
}

impl Default for FrameLoopConfig {
    fn default() -> Self {
        Self {
            frame_rate: default_frame_rate(),
            reset_after_loop: default_reset_after_loop(),
            anti_alias: false,
        }
    }
}

/// Style every cycle starts from.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct StyleConfig {
    /// Outline color - a named color or an RGB array like `[255, 0, 0]`
    #[serde(default = "default_black")]
    pub stroke_color: ColorSpec,

    /// Fill color - a named color or an RGB array
    #[serde(default = "default_black")]
    pub fill_color: ColorSpec,

    /// Clear color; `"none"` or `"transparent"` clears to fully transparent
    #[serde(default = "default_background")]
    pub background: ColorSpec,

    /// Outline width in pixels (valid range: 0.0 - 100.0)
    #[serde(default = "default_stroke_weight")]
    pub stroke_weight: f64,

    /// Font family name for text rendering (e.g., "Sans", "Monospace")
    #[serde(default = "default_font_family")]
    pub font_family: String,

    /// Font size in points (valid range: 1.0 - 512.0)
    #[serde(default = "default_font_size")]
    pub font_size: f64,

    /// Anchor of `rect`, `square`, `text` and `image` (top-left, center)
    #[serde(default = "default_rect_mode")]
    pub rect_mode: AnchorMode,

    /// Anchor of `ellipse` and `circle` (top-left, center)
    #[serde(default = "default_ellipse_mode")]
    pub ellipse_mode: AnchorMode,
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            stroke_color: default_black(),
            fill_color: default_black(),
            background: default_background(),
            stroke_weight: default_stroke_weight(),
            font_family: default_font_family(),
            font_size: default_font_size(),
            rect_mode: default_rect_mode(),
            ellipse_mode: default_ellipse_mode(),
        }
    }
}

/// Where saved frames go.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct OutputConfig {
    /// Directory for frames saved without an explicit path. Relative paths
    /// are resolved against the working directory; `~` is expanded.
    #[serde(default = "default_output_directory")]
    pub directory: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: default_output_directory(),
        }
    }
}

impl OutputConfig {
    /// Output directory with a leading `~` expanded to the home directory.
    pub fn resolved_directory(&self) -> PathBuf {
        match self.directory.strip_prefix("~/") {
            Some(rest) => dirs::home_dir()
                .map(|home| home.join(rest))
                .unwrap_or_else(|| PathBuf::from(&self.directory)),
            None => PathBuf::from(&self.directory),
        }
    }
}

// =============================================================================
// Default value functions
// =============================================================================

fn default_width() -> i32 {
    640
}

fn default_height() -> i32 {
    480
}

fn default_frame_rate() -> i32 {
    60
}

fn default_reset_after_loop() -> bool {
    true
}

fn default_black() -> ColorSpec {
    ColorSpec::Name("black".to_string())
}

fn default_background() -> ColorSpec {
    ColorSpec::Name("white".to_string())
}

fn default_stroke_weight() -> f64 {
    1.0
}

fn default_font_family() -> String {
    "Times New Roman".to_string()
}

fn default_font_size() -> f64 {
    12.0
}

fn default_rect_mode() -> AnchorMode {
    AnchorMode::TopLeft
}

fn default_ellipse_mode() -> AnchorMode {
    AnchorMode::Center
}

fn default_output_directory() -> String {
    ".".to_string()
}
