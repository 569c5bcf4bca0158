//! Image I/O operations service
//!
//! This module separates file I/O operations from business logic,
//! making the system more testable and maintainable.

use crate::{
    config::OutputFormat,
    error::{Result, SpritePrepError},
};
use image::DynamicImage;
use std::path::Path;

/// Service for handling image file input/output operations
pub struct ImageIoService;

impl ImageIoService {
    /// Load an image from a file path
    ///
    /// # Arguments
    /// * `path` - Path to the image file
    ///
    /// # Returns
    /// * `Ok(DynamicImage)` - Successfully loaded image
    /// * `Err(SpritePrepError)` - Failed to load image
    ///
    /// # Examples
    /// ```rust,no_run
    /// use spriteprep::services::ImageIoService;
    ///
    /// let image = ImageIoService::load_image("scan.jpg")?;
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn load_image<P: AsRef<Path>>(path: P) -> Result<DynamicImage> {
        let path_ref = path.as_ref();

        if !path_ref.exists() {
            return Err(SpritePrepError::file_io_error(
                "read image file",
                path_ref,
                &std::io::Error::new(std::io::ErrorKind::NotFound, "file does not exist"),
            ));
        }

        // First try extension-based format detection
        match image::open(path_ref) {
            Ok(img) => Ok(img),
            Err(e) => {
                // Scans occasionally arrive with a wrong extension; fall back
                // to content-based detection before giving up
                log::debug!(
                    "Extension-based loading failed for {}: {}. Attempting content-based detection.",
                    path_ref.display(),
                    e
                );

                let data = std::fs::read(path_ref).map_err(|io_err| {
                    SpritePrepError::file_io_error("read image data", path_ref, &io_err)
                })?;

                image::load_from_memory(&data).map_err(|content_err| {
                    SpritePrepError::processing(format!(
                        "Failed to load {} with both extension-based and content-based detection. \
                         Extension error: {e}. Content error: {content_err}",
                        path_ref.display()
                    ))
                })
            },
        }
    }

    /// Save an image to a file with the specified format
    ///
    /// Creates the parent directory when missing.
    ///
    /// # Arguments
    /// * `image` - The image to save
    /// * `path` - Output file path
    /// * `format` - Output format specification
    ///
    /// # Errors
    /// Returns [`SpritePrepError`] when directory creation or encoding fails.
    pub fn save_image<P: AsRef<Path>>(
        image: &DynamicImage,
        path: P,
        format: OutputFormat,
    ) -> Result<()> {
        let path_ref = path.as_ref();

        if let Some(parent) = path_ref.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| {
                    SpritePrepError::file_io_error("create output directory", parent, &e)
                })?;
            }
        }

        let result = match format {
            OutputFormat::Png => image.save_with_format(path_ref, image::ImageFormat::Png),
            OutputFormat::Jpeg => {
                // JPEG has no alpha channel; encode the RGB projection
                let rgb = DynamicImage::ImageRgb8(image.to_rgb8());
                rgb.save_with_format(path_ref, image::ImageFormat::Jpeg)
            },
            OutputFormat::Tiff => image.save_with_format(path_ref, image::ImageFormat::Tiff),
        };

        result.map_err(|e| {
            SpritePrepError::processing(format!(
                "Failed to save as {format} to {}: {e}",
                path_ref.display()
            ))
        })
    }
}
