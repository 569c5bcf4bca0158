//! Configuration types for sprite preparation operations

use crate::error::{Result, SpritePrepError};
use serde::{Deserialize, Serialize};

/// Default near-white threshold, tuned for white scans with JPEG artifacts
pub const DEFAULT_THRESHOLD: u8 = 240;

/// Default padding around the content bounding box when cropping
pub const DEFAULT_CROP_PADDING: u32 = 10;

/// Background classification strategies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RemovalStrategy {
    /// Flood fill from the border: only edge-connected near-white pixels are
    /// removed, preserving enclosed white detail (default)
    FloodFill,
    /// Clear every near-white pixel regardless of connectivity
    Global,
}

impl Default for RemovalStrategy {
    fn default() -> Self {
        Self::FloodFill
    }
}

impl std::fmt::Display for RemovalStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::FloodFill => write!(f, "flood-fill"),
            Self::Global => write!(f, "global"),
        }
    }
}

/// Output image format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutputFormat {
    /// PNG with alpha channel transparency
    Png,
    /// JPEG (no transparency, alpha is dropped)
    Jpeg,
    /// TIFF with alpha channel transparency and lossless compression
    Tiff,
}

impl Default for OutputFormat {
    fn default() -> Self {
        Self::Png
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Png => write!(f, "png"),
            Self::Jpeg => write!(f, "jpeg"),
            Self::Tiff => write!(f, "tiff"),
        }
    }
}

/// Configuration for sprite preparation operations
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RemovalConfig {
    /// Near-white intensity threshold; all three channels must strictly
    /// exceed it for a pixel to qualify as background
    pub threshold: u8,

    /// Background classification strategy
    pub strategy: RemovalStrategy,

    /// Crop the result to its non-transparent content
    pub crop_to_content: bool,

    /// Padding in pixels around the content bounding box (only used when
    /// cropping is enabled)
    pub crop_padding: u32,

    /// Center the result on a transparent canvas of this size (width, height)
    pub canvas_size: Option<(u32, u32)>,

    /// Output format
    pub output_format: OutputFormat,

    /// JPEG quality (0-100, only used for JPEG output)
    pub jpeg_quality: u8,

    /// Enable debug mode (additional logging and validation)
    pub debug: bool,
}

impl Default for RemovalConfig {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            strategy: RemovalStrategy::default(),
            crop_to_content: true,
            crop_padding: DEFAULT_CROP_PADDING,
            canvas_size: None, // Default: keep the cropped dimensions
            output_format: OutputFormat::default(),
            jpeg_quality: 90,
            debug: false,
        }
    }
}

impl RemovalConfig {
    /// Create a new configuration builder for fluent API construction
    ///
    /// # Examples
    ///
    /// ```rust
    /// use spriteprep::{RemovalConfig, RemovalStrategy};
    ///
    /// let config = RemovalConfig::builder()
    ///     .threshold(230)
    ///     .strategy(RemovalStrategy::FloodFill)
    ///     .crop_padding(16)
    ///     .build()
    ///     .unwrap();
    /// ```
    #[must_use]
    pub fn builder() -> RemovalConfigBuilder {
        RemovalConfigBuilder::default()
    }

    /// Validate all configuration parameters
    ///
    /// # Errors
    ///
    /// Returns [`SpritePrepError::InvalidConfig`] for:
    /// - JPEG quality above 100
    /// - A canvas size with a zero dimension
    pub fn validate(&self) -> Result<()> {
        if self.jpeg_quality > 100 {
            return Err(SpritePrepError::config_value_error(
                "JPEG quality",
                self.jpeg_quality,
                "0-100",
            ));
        }
        if let Some((w, h)) = self.canvas_size {
            if w == 0 || h == 0 {
                return Err(SpritePrepError::invalid_config(format!(
                    "canvas size must be non-zero, got {w}x{h}"
                )));
            }
        }
        Ok(())
    }
}

/// Builder for [`RemovalConfig`]
#[derive(Debug, Default)]
pub struct RemovalConfigBuilder {
    config: RemovalConfig,
}

impl RemovalConfigBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn threshold(mut self, threshold: u8) -> Self {
        self.config.threshold = threshold;
        self
    }

    #[must_use]
    pub fn strategy(mut self, strategy: RemovalStrategy) -> Self {
        self.config.strategy = strategy;
        self
    }

    #[must_use]
    pub fn crop_to_content(mut self, crop: bool) -> Self {
        self.config.crop_to_content = crop;
        self
    }

    #[must_use]
    pub fn crop_padding(mut self, padding: u32) -> Self {
        self.config.crop_padding = padding;
        self
    }

    #[must_use]
    pub fn canvas_size(mut self, width: u32, height: u32) -> Self {
        self.config.canvas_size = Some((width, height));
        self
    }

    #[must_use]
    pub fn output_format(mut self, format: OutputFormat) -> Self {
        self.config.output_format = format;
        self
    }

    #[must_use]
    pub fn jpeg_quality(mut self, quality: u8) -> Self {
        self.config.jpeg_quality = quality.min(100);
        self
    }

    #[must_use]
    pub fn debug(mut self, debug: bool) -> Self {
        self.config.debug = debug;
        self
    }

    /// Build the configuration, validating all parameters
    ///
    /// # Errors
    ///
    /// Returns [`SpritePrepError::InvalidConfig`] when validation fails; see
    /// [`RemovalConfig::validate`].
    pub fn build(self) -> Result<RemovalConfig> {
        self.config.validate()?;
        Ok(self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = RemovalConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.threshold, 240);
        assert_eq!(config.strategy, RemovalStrategy::FloodFill);
        assert!(config.crop_to_content);
        assert_eq!(config.crop_padding, 10);
        assert_eq!(config.output_format, OutputFormat::Png);
    }

    #[test]
    fn test_builder_chain() {
        let config = RemovalConfig::builder()
            .threshold(230)
            .strategy(RemovalStrategy::Global)
            .crop_to_content(false)
            .canvas_size(512, 512)
            .output_format(OutputFormat::Tiff)
            .build()
            .unwrap();

        assert_eq!(config.threshold, 230);
        assert_eq!(config.strategy, RemovalStrategy::Global);
        assert!(!config.crop_to_content);
        assert_eq!(config.canvas_size, Some((512, 512)));
        assert_eq!(config.output_format, OutputFormat::Tiff);
    }

    #[test]
    fn test_zero_canvas_rejected() {
        let result = RemovalConfig::builder().canvas_size(0, 100).build();
        assert!(result.is_err());
    }

    #[test]
    fn test_jpeg_quality_clamped_by_builder() {
        let config = RemovalConfig::builder().jpeg_quality(255).build().unwrap();
        assert_eq!(config.jpeg_quality, 100);
    }

    #[test]
    fn test_validate_rejects_out_of_range_quality() {
        let config = RemovalConfig {
            jpeg_quality: 150,
            ..RemovalConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_serde_round_trip() {
        let config = RemovalConfig::builder()
            .threshold(200)
            .canvas_size(64, 64)
            .build()
            .unwrap();

        let json = serde_json::to_string(&config).unwrap();
        let back: RemovalConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, back);
    }
}
