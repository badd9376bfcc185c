//! Grid configuration.
//!
//! [`GridConfig`] holds the metrics and behavior switches of a grid. It is
//! plain data, serializable with serde, and can be loaded from TOML:
//!
//! ```
//! use trellis::GridConfig;
//!
//! let config = GridConfig::from_toml_str("row_height = 28.0\nallow_user_add_rows = true").unwrap();
//! assert_eq!(config.row_height, 28.0);
//! assert_eq!(config.header_height, 24.0);
//! ```
//!
//! Colors are not part of the serialized configuration; see [`GridPalette`].

use std::path::Path;

use serde::{Deserialize, Serialize};
use trellis_render::Color;

use crate::error::{GridError, Result};

/// Metrics and behavior switches for a grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    /// Height of each body row in pixels.
    pub row_height: f32,
    /// Height of the header strip in pixels.
    pub header_height: f32,
    /// Thickness of the scrollbars.
    pub scrollbar_thickness: f32,
    /// Columns never shrink below this width.
    pub min_column_width: f32,
    /// Half-width of the resize band around each header divider.
    pub divider_tolerance: f32,
    /// Inner horizontal padding of each cell.
    pub cell_padding: f32,
    /// Scrollbar thumbs never get shorter than this.
    pub min_thumb_size: f32,
    /// Pixels panned per wheel notch with Shift held.
    pub wheel_pan_step: f32,
    /// How long the caret stays shown, then hidden, in milliseconds. Zero
    /// disables blinking.
    pub caret_blink_ms: u64,
    /// Whether Down on the last row appends a new row.
    pub allow_user_add_rows: bool,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            row_height: 24.0,
            header_height: 24.0,
            scrollbar_thickness: 14.0,
            min_column_width: 20.0,
            divider_tolerance: 5.0,
            cell_padding: 4.0,
            min_thumb_size: 20.0,
            wheel_pan_step: 40.0,
            caret_blink_ms: 530,
            allow_user_add_rows: false,
        }
    }
}

impl GridConfig {
    /// Parse a configuration from TOML. Missing keys take their defaults.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Load a configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| GridError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    /// Serialize this configuration to pretty-printed TOML.
    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }
}

/// Colors used when painting a grid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridPalette {
    pub background: Color,
    pub header_background: Color,
    pub header_text: Color,
    pub grid_line: Color,
    pub text: Color,
    pub selection_background: Color,
    pub hover_background: Color,
    pub editor_background: Color,
    pub editor_selection: Color,
    pub caret: Color,
    pub scrollbar_track: Color,
    pub scrollbar_thumb: Color,
    pub control_face: Color,
    pub control_border: Color,
}

impl Default for GridPalette {
    fn default() -> Self {
        Self {
            background: Color::WHITE,
            header_background: Color::from_rgb8(240, 240, 240),
            header_text: Color::BLACK,
            grid_line: Color::from_rgb8(208, 208, 208),
            text: Color::BLACK,
            selection_background: Color::from_rgb8(204, 232, 255),
            hover_background: Color::from_rgb8(229, 243, 255),
            editor_background: Color::WHITE,
            editor_selection: Color::from_rgb8(0, 120, 215).with_alpha(0.35),
            caret: Color::BLACK,
            scrollbar_track: Color::from_rgb8(240, 240, 240),
            scrollbar_thumb: Color::from_rgb8(192, 192, 192),
            control_face: Color::from_rgb8(225, 225, 225),
            control_border: Color::GRAY,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config = GridConfig::from_toml_str("scrollbar_thickness = 10.0").unwrap();
        assert_eq!(config.scrollbar_thickness, 10.0);
        assert_eq!(config.min_column_width, 20.0);
        assert!(!config.allow_user_add_rows);
    }

    #[test]
    fn test_toml_round_trip() {
        let config = GridConfig {
            allow_user_add_rows: true,
            caret_blink_ms: 0,
            ..GridConfig::default()
        };
        let text = config.to_toml_string().unwrap();
        assert_eq!(GridConfig::from_toml_str(&text).unwrap(), config);
    }

    #[test]
    fn test_invalid_toml_is_config_error() {
        let err = GridConfig::from_toml_str("row_height = \"tall\"").unwrap_err();
        assert!(matches!(err, GridError::Config(_)));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = GridConfig::from_file("/nonexistent/trellis-grid.toml").unwrap_err();
        assert!(matches!(err, GridError::Io { .. }));
    }
}
