//! Result types produced by the sprite processing pipeline

use crate::{
    config::OutputFormat,
    error::{Result, SpritePrepError},
    removal::BackgroundMask,
};
use image::{DynamicImage, RgbaImage};
use std::io::Cursor;
use std::path::Path;

/// Timing breakdown for a single processing call, in milliseconds
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProcessingTimings {
    /// Background classification (flood fill or global pass)
    pub detect_ms: u64,
    /// Alpha channel rewrite
    pub apply_ms: u64,
    /// Content crop and canvas centering
    pub crop_ms: u64,
    /// End-to-end pipeline time
    pub total_ms: u64,
}

/// Metadata describing one processing invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessingMetadata {
    /// Threshold used for near-white classification
    pub threshold: u8,
    /// Number of pixels classified as background
    pub background_pixels: u64,
    /// Input dimensions before cropping
    pub input_dimensions: (u32, u32),
    /// Output dimensions after cropping/centering
    pub output_dimensions: (u32, u32),
    /// Stage timings
    pub timings: ProcessingTimings,
}

/// Result of a background removal pipeline run.
///
/// Holds the processed RGBA image together with the background mask computed
/// for the *uncropped* input and per-stage metadata. The mask lets callers
/// composite differently than the default "alpha 0 / alpha 255" rewrite.
#[derive(Debug, Clone)]
pub struct RemovalResult {
    image: RgbaImage,
    /// Background mask at the input image's dimensions
    pub mask: BackgroundMask,
    /// Processing metadata and timings
    pub metadata: ProcessingMetadata,
}

impl RemovalResult {
    /// Create a result from a processed image, its mask, and metadata
    #[must_use]
    pub fn new(image: RgbaImage, mask: BackgroundMask, metadata: ProcessingMetadata) -> Self {
        Self {
            image,
            mask,
            metadata,
        }
    }

    /// Borrow the processed image
    #[must_use]
    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    /// Consume the result and take the processed image
    #[must_use]
    pub fn into_image(self) -> RgbaImage {
        self.image
    }

    /// Output dimensions as (width, height)
    #[must_use]
    pub fn dimensions(&self) -> (u32, u32) {
        self.image.dimensions()
    }

    /// Save the processed image as PNG (the only format that both preserves
    /// transparency and is universally supported by game engines)
    ///
    /// # Errors
    ///
    /// Returns [`SpritePrepError`] when the parent directory cannot be
    /// created or encoding fails.
    pub fn save_png<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path_ref = path.as_ref();
        if let Some(parent) = path_ref.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| {
                    SpritePrepError::file_io_error("create output directory", parent, &e)
                })?;
            }
        }
        self.image
            .save_with_format(path_ref, image::ImageFormat::Png)?;
        Ok(())
    }

    /// Encode the processed image to bytes in the given format.
    ///
    /// JPEG output drops the alpha channel; `quality` only applies to JPEG.
    ///
    /// # Errors
    ///
    /// Returns [`SpritePrepError::Image`] when encoding fails.
    pub fn to_bytes(&self, format: OutputFormat, quality: u8) -> Result<Vec<u8>> {
        let mut buffer = Cursor::new(Vec::new());
        match format {
            OutputFormat::Png => {
                DynamicImage::ImageRgba8(self.image.clone())
                    .write_to(&mut buffer, image::ImageFormat::Png)?;
            },
            OutputFormat::Jpeg => {
                let rgb = DynamicImage::ImageRgba8(self.image.clone()).to_rgb8();
                let encoder =
                    image::codecs::jpeg::JpegEncoder::new_with_quality(&mut buffer, quality);
                rgb.write_with_encoder(encoder)?;
            },
            OutputFormat::Tiff => {
                DynamicImage::ImageRgba8(self.image.clone())
                    .write_to(&mut buffer, image::ImageFormat::Tiff)?;
            },
        }
        Ok(buffer.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    fn sample_result() -> RemovalResult {
        let image = RgbaImage::from_pixel(4, 4, Rgba([10, 20, 30, 255]));
        let mask = BackgroundMask::new(4, 4);
        let metadata = ProcessingMetadata {
            threshold: 240,
            background_pixels: 0,
            input_dimensions: (4, 4),
            output_dimensions: (4, 4),
            timings: ProcessingTimings::default(),
        };
        RemovalResult::new(image, mask, metadata)
    }

    #[test]
    fn test_png_bytes_round_trip() {
        let result = sample_result();
        let bytes = result.to_bytes(OutputFormat::Png, 90).unwrap();
        let decoded = image::load_from_memory(&bytes).unwrap().to_rgba8();
        assert_eq!(decoded.dimensions(), (4, 4));
        assert_eq!(decoded.get_pixel(0, 0), &Rgba([10, 20, 30, 255]));
    }

    #[test]
    fn test_jpeg_bytes_decode_as_rgb() {
        let result = sample_result();
        let bytes = result.to_bytes(OutputFormat::Jpeg, 90).unwrap();
        let decoded = image::load_from_memory(&bytes).unwrap();
        assert_eq!(decoded.width(), 4);
        assert_eq!(decoded.height(), 4);
    }

    #[test]
    fn test_save_png_creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a").join("b").join("out.png");

        sample_result().save_png(&nested).unwrap();
        assert!(nested.exists());

        let decoded = image::open(&nested).unwrap().to_rgba8();
        assert_eq!(decoded.dimensions(), (4, 4));
    }
}
