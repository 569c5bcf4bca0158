//! Output format handling service
//!
//! Separates output format conversion logic from the processing pipeline.

use crate::config::OutputFormat;
use image::{DynamicImage, RgbaImage};

/// Service for handling output format conversions
pub struct OutputFormatHandler;

impl OutputFormatHandler {
    /// Convert an RGBA image to the representation expected by the format.
    ///
    /// JPEG drops the alpha channel; transparent formats keep RGBA.
    #[must_use]
    pub fn convert_format(rgba_image: RgbaImage, format: OutputFormat) -> DynamicImage {
        match format {
            OutputFormat::Png | OutputFormat::Tiff => DynamicImage::ImageRgba8(rgba_image),
            OutputFormat::Jpeg => {
                let rgb = DynamicImage::ImageRgba8(rgba_image).to_rgb8();
                DynamicImage::ImageRgb8(rgb)
            },
        }
    }

    /// File extension (without the dot) for a given output format
    #[must_use]
    pub fn extension(format: OutputFormat) -> &'static str {
        match format {
            OutputFormat::Png => "png",
            OutputFormat::Jpeg => "jpg",
            OutputFormat::Tiff => "tiff",
        }
    }

    /// Whether a format supports transparency (alpha channel)
    #[must_use]
    pub fn supports_transparency(format: OutputFormat) -> bool {
        match format {
            OutputFormat::Png | OutputFormat::Tiff => true,
            OutputFormat::Jpeg => false,
        }
    }

    /// Warn when the chosen format cannot represent the transparency the
    /// background removal produced
    pub fn warn_if_opaque(format: OutputFormat) {
        if !Self::supports_transparency(format) {
            log::warn!(
                "Output format {format} does not support transparency; removed background will appear solid"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    #[test]
    fn test_convert_format_png_keeps_alpha() {
        let rgba = RgbaImage::from_pixel(2, 2, Rgba([255, 0, 0, 0]));
        let converted = OutputFormatHandler::convert_format(rgba, OutputFormat::Png);
        assert!(matches!(converted, DynamicImage::ImageRgba8(_)));
    }

    #[test]
    fn test_convert_format_jpeg_drops_alpha() {
        let rgba = RgbaImage::from_pixel(2, 2, Rgba([255, 0, 0, 128]));
        let converted = OutputFormatHandler::convert_format(rgba, OutputFormat::Jpeg);
        assert!(matches!(converted, DynamicImage::ImageRgb8(_)));
        assert_eq!(converted.width(), 2);
    }

    #[test]
    fn test_extension() {
        assert_eq!(OutputFormatHandler::extension(OutputFormat::Png), "png");
        assert_eq!(OutputFormatHandler::extension(OutputFormat::Jpeg), "jpg");
        assert_eq!(OutputFormatHandler::extension(OutputFormat::Tiff), "tiff");
    }

    #[test]
    fn test_supports_transparency() {
        assert!(OutputFormatHandler::supports_transparency(OutputFormat::Png));
        assert!(OutputFormatHandler::supports_transparency(OutputFormat::Tiff));
        assert!(!OutputFormatHandler::supports_transparency(OutputFormat::Jpeg));
    }
}
