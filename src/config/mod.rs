//! Configuration file support for sketchloop.
//!
//! Settings are read from `~/.config/sketchloop/config.toml` (or an explicit
//! path) and cover the canvas size, frame loop timing and the style every
//! cycle starts from. If no config file exists, defaults are used.

pub mod enums;
pub mod types;

pub use enums::ColorSpec;
pub use types::{CanvasConfig, FrameLoopConfig, OutputConfig, StyleConfig};

use crate::draw::FontDescriptor;
use crate::state::StyleState;
use anyhow::{Context, Result};
use log::{debug, info, warn};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const MAX_DIMENSION: i32 = 8192;

/// Root configuration structure.
///
/// # Example TOML
/// ```toml
/// [canvas]
/// width = 800
/// height = 600
///
/// [frame_loop]
/// frame_rate = 30
/// reset_after_loop = true
///
/// [style]
/// stroke_color = "black"
/// fill_color = [255, 128, 0]
/// background = "white"
/// rect_mode = "center"
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Default, JsonSchema)]
pub struct Config {
    /// Frame buffer size
    #[serde(default)]
    pub canvas: CanvasConfig,

    /// Frame loop timing
    #[serde(default)]
    pub frame_loop: FrameLoopConfig,

    /// Style defaults restored at every state reset
    #[serde(default)]
    pub style: StyleConfig,

    /// Saved frame location
    #[serde(default)]
    pub output: OutputConfig,
}

impl Config {
    /// Replaces the canvas size with command-line overrides, clamped the same
    /// way as values read from the file.
    pub fn with_canvas_size(mut self, width: Option<i32>, height: Option<i32>) -> Self {
        if let Some(width) = width {
            self.canvas.width = width;
        }
        if let Some(height) = height {
            self.canvas.height = height;
        }
        self.validate_and_clamp();
        self
    }

    /// Validates and clamps all configuration values to acceptable ranges.
    ///
    /// Invalid values are clamped to the nearest valid value and a warning is
    /// logged.
    ///
    /// Validated ranges:
    /// - `canvas.width`, `canvas.height`: 1 - 8192
    /// - `style.stroke_weight`: 0.0 - 100.0
    /// - `style.font_size`: 1.0 - 512.0
    fn validate_and_clamp(&mut self) {
        if !(1..=MAX_DIMENSION).contains(&self.canvas.width) {
            warn!(
                "Invalid canvas width {}, clamping to 1-{} range",
                self.canvas.width, MAX_DIMENSION
            );
            self.canvas.width = self.canvas.width.clamp(1, MAX_DIMENSION);
        }

        if !(1..=MAX_DIMENSION).contains(&self.canvas.height) {
            warn!(
                "Invalid canvas height {}, clamping to 1-{} range",
                self.canvas.height, MAX_DIMENSION
            );
            self.canvas.height = self.canvas.height.clamp(1, MAX_DIMENSION);
        }

        if self.frame_loop.frame_rate <= 0 {
            warn!(
                "Invalid frame_rate {}, frames will run on a 1ms interval",
                self.frame_loop.frame_rate
            );
        }

        if !(0.0..=100.0).contains(&self.style.stroke_weight) {
            warn!(
                "Invalid stroke_weight {:.1}, clamping to 0.0-100.0 range",
                self.style.stroke_weight
            );
            self.style.stroke_weight = self.style.stroke_weight.clamp(0.0, 100.0);
        }

        if !(1.0..=512.0).contains(&self.style.font_size) {
            warn!(
                "Invalid font_size {:.1}, clamping to 1.0-512.0 range",
                self.style.font_size
            );
            self.style.font_size = self.style.font_size.clamp(1.0, 512.0);
        }

        if self.style.font_family.trim().is_empty() {
            warn!("Empty font_family, falling back to 'Times New Roman'");
            self.style.font_family = "Times New Roman".to_string();
        }
    }

    /// Style the primary scope starts with and returns to on every reset.
    pub fn style_defaults(&self) -> StyleState {
        let style = &self.style;
        StyleState {
            stroke_color: style.stroke_color.to_color(),
            fill_color: style.fill_color.to_color(),
            stroke_weight: style.stroke_weight,
            font: FontDescriptor::new(style.font_family.clone(), style.font_size),
            background: style.background.to_background(),
            rect_mode: style.rect_mode,
            ellipse_mode: style.ellipse_mode,
            ..StyleState::default()
        }
    }

    /// Returns the path to the configuration file.
    ///
    /// The config file is located at `~/.config/sketchloop/config.toml`.
    ///
    /// # Errors
    /// Returns an error if the config directory cannot be determined (e.g., HOME not set).
    pub fn get_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Could not find config directory")?
            .join("sketchloop");

        Ok(config_dir.join("config.toml"))
    }

    /// Loads the user's config file, or returns defaults if there is none.
    ///
    /// # Errors
    /// Returns an error if the config directory cannot be determined, or the
    /// file exists but cannot be read or parsed.
    pub fn load() -> Result<Self> {
        let config_path = Self::get_config_path()?;

        if !config_path.exists() {
            info!("Config file not found, using defaults");
            debug!("Expected config at: {}", config_path.display());
            return Ok(Self::default());
        }

        Self::load_from(&config_path)
    }

    /// Loads and validates the config file at `path`.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or contains invalid TOML.
    pub fn load_from(path: &Path) -> Result<Self> {
        let config_str = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {}", path.display()))?;

        let mut config: Config = toml::from_str(&config_str)
            .with_context(|| format!("Failed to parse config from {}", path.display()))?;

        config.validate_and_clamp();

        info!("Loaded config from {}", path.display());
        debug!("Config: {:?}", config);

        Ok(config)
    }

    /// Writes the configuration to `~/.config/sketchloop/config.toml`.
    pub fn save(&self) -> Result<()> {
        let config_path = Self::get_config_path()?;
        self.save_to(&config_path)
    }

    /// Serializes the configuration as TOML to `path`, creating parent
    /// directories as needed.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).context("Failed to create config directory")?;
        }

        let config_str = toml::to_string_pretty(self).context("Failed to serialize config")?;

        fs::write(path, config_str)
            .with_context(|| format!("Failed to write config to {}", path.display()))?;

        info!("Saved config to {}", path.display());
        Ok(())
    }

    /// Writes the documented example config to the user's config directory.
    ///
    /// # Errors
    /// Returns an error if a config file already exists or cannot be written.
    pub fn create_default_file() -> Result<PathBuf> {
        let config_path = Self::get_config_path()?;

        if config_path.exists() {
            return Err(anyhow::anyhow!(
                "Config file already exists at {}",
                config_path.display()
            ));
        }

        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent)?;
        }

        fs::write(&config_path, Self::example_toml())?;

        info!("Created default config at {}", config_path.display());
        Ok(config_path)
    }

    /// The documented example config shipped with the crate.
    pub fn example_toml() -> &'static str {
        include_str!("../../config.example.toml")
    }

    /// JSON schema of the config file, for editor tooling.
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(Config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::{BLACK, Color, WHITE};
    use crate::state::AnchorMode;

    fn parse(toml_str: &str) -> Config {
        let mut config: Config = toml::from_str(toml_str).unwrap();
        config.validate_and_clamp();
        config
    }

    #[test]
    fn empty_file_gives_defaults() {
        let config = parse("");
        assert_eq!(config.canvas.width, 640);
        assert_eq!(config.canvas.height, 480);
        assert_eq!(config.frame_loop.frame_rate, 60);
        assert!(config.frame_loop.reset_after_loop);
        assert!(!config.frame_loop.anti_alias);
        assert_eq!(config.style_defaults(), StyleState::default());
    }

    #[test]
    fn out_of_range_values_are_clamped() {
        let config = parse(
            r#"
            [canvas]
            width = 0
            height = 100000

            [style]
            stroke_weight = -3.0
            font_size = 2000.0
            font_family = "  "
            "#,
        );
        assert_eq!(config.canvas.width, 1);
        assert_eq!(config.canvas.height, MAX_DIMENSION);
        assert_eq!(config.style.stroke_weight, 0.0);
        assert_eq!(config.style.font_size, 512.0);
        assert_eq!(config.style.font_family, "Times New Roman");
    }

    #[test]
    fn size_overrides_are_clamped() {
        let config = Config::default().with_canvas_size(Some(100_000), Some(0));
        assert_eq!(config.canvas.width, 8192);
        assert_eq!(config.canvas.height, 1);

        let config = Config::default().with_canvas_size(None, Some(300));
        assert_eq!(config.canvas.width, 640);
        assert_eq!(config.canvas.height, 300);
    }

    #[test]
    fn style_section_maps_to_style_state() {
        let config = parse(
            r#"
            [style]
            stroke_color = "white"
            fill_color = [255, 0, 0]
            background = "none"
            stroke_weight = 2.5
            font_family = "Monospace"
            font_size = 9.0
            rect_mode = "center"
            ellipse_mode = "top-left"
            "#,
        );
        let style = config.style_defaults();
        assert_eq!(style.stroke_color, WHITE);
        assert_eq!(style.fill_color, Color::from_rgb8(255, 0, 0));
        assert_eq!(style.background, None);
        assert_eq!(style.stroke_weight, 2.5);
        assert_eq!(style.font, FontDescriptor::new("Monospace", 9.0));
        assert_eq!(style.rect_mode, AnchorMode::Center);
        assert_eq!(style.ellipse_mode, AnchorMode::TopLeft);
        assert!(style.fill_enabled && style.stroke_enabled);
        assert_ne!(style.fill_color, BLACK);
    }

    #[test]
    fn save_and_load_from_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        let mut config = Config::default();
        config.canvas.width = 320;
        config.frame_loop.reset_after_loop = false;
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.canvas.width, 320);
        assert!(!loaded.frame_loop.reset_after_loop);
    }

    #[test]
    fn invalid_toml_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[canvas\nwidth = ").unwrap();
        let err = Config::load_from(&path).unwrap_err();
        assert!(format!("{err:#}").contains("Failed to parse config"));
    }

    #[test]
    fn example_file_parses() {
        let config = parse(Config::example_toml());
        assert_eq!(config.style_defaults(), StyleState::default());
    }

    #[test]
    fn schema_lists_sections() {
        let schema = serde_json::to_value(Config::json_schema()).unwrap();
        let properties = schema["properties"].as_object().unwrap();
        for section in ["canvas", "frame_loop", "style", "output"] {
            assert!(properties.contains_key(section), "missing {section}");
        }
    }
}
