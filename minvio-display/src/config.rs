//! Display configuration.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::{DisplayError, DisplayResult};

/// Settings used when opening a display.
///
/// Every field has a default, so a TOML file only needs the keys it changes:
///
/// ```
/// use minvio_display::DisplayConfig;
///
/// let config = DisplayConfig::from_toml_str("width = 640\ntarget_fps = 30").unwrap();
/// assert_eq!((config.width, config.height), (640, 400));
/// assert_eq!(config.target_fps, Some(30));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Surface width in pixels. Fixed for the life of the display.
    pub width: u32,
    /// Surface height in pixels. Fixed for the life of the display.
    pub height: u32,
    /// Window title.
    pub title: String,
    /// Frame rate for paced refreshes, if the application wants one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_fps: Option<u32>,
    /// Initial font height in pixels; the built-in default face otherwise.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_size: Option<u32>,
    /// Longest single sleep while waiting for a frame deadline, in milliseconds.
    pub pacing_poll_ms: u64,
    /// Center the window on its monitor when it opens.
    pub centered: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            width: 400,
            height: 400,
            title: "minvio".to_string(),
            target_fps: None,
            font_size: None,
            pacing_poll_ms: 5,
            centered: true,
        }
    }
}

impl DisplayConfig {
    /// Creates a new configuration builder.
    #[must_use]
    pub fn builder() -> DisplayConfigBuilder {
        DisplayConfigBuilder::default()
    }

    /// Parse a TOML document and validate the result.
    ///
    /// # Errors
    ///
    /// Returns an error if the document is malformed or the values are invalid.
    pub fn from_toml_str(text: &str) -> DisplayResult<Self> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Read and parse a TOML configuration file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or fails to parse.
    pub fn load(path: impl AsRef<Path>) -> DisplayResult<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid.
    pub fn validate(&self) -> DisplayResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(DisplayError::Config(format!(
                "Surface size must be non-zero, got {}x{}",
                self.width, self.height
            )));
        }

        if self.target_fps == Some(0) {
            return Err(DisplayError::Config(
                "Target FPS must be greater than 0".to_string(),
            ));
        }

        if self.font_size == Some(0) {
            return Err(DisplayError::Config(
                "Font size must be greater than 0".to_string(),
            ));
        }

        if self.pacing_poll_ms == 0 {
            return Err(DisplayError::Config(
                "Pacing poll interval must be at least 1 ms".to_string(),
            ));
        }

        Ok(())
    }

    /// Longest single sleep taken while pacing.
    #[must_use]
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.pacing_poll_ms)
    }
}

/// Builder for creating a `DisplayConfig`.
#[derive(Default)]
pub struct DisplayConfigBuilder {
    config: DisplayConfig,
}

impl DisplayConfigBuilder {
    /// Sets the surface size.
    #[must_use]
    pub fn size(mut self, width: u32, height: u32) -> Self {
        self.config.width = width;
        self.config.height = height;
        self
    }

    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.config.title = title.into();
        self
    }

    #[must_use]
    pub fn target_fps(mut self, fps: u32) -> Self {
        self.config.target_fps = Some(fps);
        self
    }

    #[must_use]
    pub fn font_size(mut self, px: u32) -> Self {
        self.config.font_size = Some(px);
        self
    }

    #[must_use]
    pub fn centered(mut self, centered: bool) -> Self {
        self.config.centered = centered;
        self
    }

    /// Builds the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn build(self) -> DisplayResult<DisplayConfig> {
        self.config.validate()?;
        Ok(self.config)
    }
}
