//! Sprite processing pipeline
//!
//! [`SpriteProcessor`] consolidates the per-image business logic: coerce the
//! input to RGBA, classify and clear the background, crop to content, and
//! optionally center the sprite on a transparent canvas. The same processor
//! also drives sheet splitting, running the pipeline once per tile.
//!
//! Processing is synchronous and CPU-bound with no state shared across
//! images, so a batch driver may run one processor per worker thread with no
//! coordination.

use crate::{
    config::{RemovalConfig, RemovalStrategy},
    error::Result,
    geometry::{self, SplitLayout},
    removal,
    services::ImageIoService,
    types::{ProcessingMetadata, ProcessingTimings, RemovalResult},
};
use image::DynamicImage;
use log::debug;
use std::path::Path;
use std::time::Instant;
use tracing::instrument;

/// Pipeline for preparing sprites from scanned artwork
pub struct SpriteProcessor {
    config: RemovalConfig,
}

impl SpriteProcessor {
    /// Create a processor, validating the configuration up front
    ///
    /// # Errors
    ///
    /// Returns [`crate::SpritePrepError::InvalidConfig`] when the
    /// configuration fails validation.
    pub fn new(config: RemovalConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// The active configuration
    #[must_use]
    pub fn config(&self) -> &RemovalConfig {
        &self.config
    }

    /// Run the full pipeline on an in-memory image.
    ///
    /// The input is coerced to RGBA8 before processing; any pixel format the
    /// codec can decode is accepted. A zero-dimension input passes through
    /// unchanged as an empty result.
    ///
    /// # Errors
    ///
    /// Returns [`crate::SpritePrepError`] for processing failures.
    #[instrument(skip_all, fields(width = image.width(), height = image.height()))]
    pub fn process_image(&self, image: &DynamicImage) -> Result<RemovalResult> {
        let total_start = Instant::now();

        let rgba = image.to_rgba8();
        let input_dimensions = rgba.dimensions();

        let detect_start = Instant::now();
        let mask = match self.config.strategy {
            RemovalStrategy::FloodFill => removal::detect_background(&rgba, self.config.threshold),
            RemovalStrategy::Global => {
                removal::detect_background_global(&rgba, self.config.threshold)
            },
        };
        let detect_ms = detect_start.elapsed().as_millis() as u64;

        let apply_start = Instant::now();
        let mut working = removal::apply_mask(&rgba, &mask)?;
        let apply_ms = apply_start.elapsed().as_millis() as u64;

        let crop_start = Instant::now();
        if self.config.crop_to_content {
            working = geometry::crop_to_content(&working, self.config.crop_padding);
        }
        if let Some(canvas_size) = self.config.canvas_size {
            working = geometry::center_on_canvas(&working, canvas_size);
        }
        let crop_ms = crop_start.elapsed().as_millis() as u64;

        let background_pixels = mask.background_count();
        let output_dimensions = working.dimensions();
        let timings = ProcessingTimings {
            detect_ms,
            apply_ms,
            crop_ms,
            total_ms: total_start.elapsed().as_millis() as u64,
        };

        if self.config.debug {
            debug!(
                "processed {}x{} -> {}x{}: {} background pixels ({} strategy, threshold {})",
                input_dimensions.0,
                input_dimensions.1,
                output_dimensions.0,
                output_dimensions.1,
                background_pixels,
                self.config.strategy,
                self.config.threshold,
            );
        }

        Ok(RemovalResult::new(
            working,
            mask,
            ProcessingMetadata {
                threshold: self.config.threshold,
                background_pixels,
                input_dimensions,
                output_dimensions,
                timings,
            },
        ))
    }

    /// Load an image file and run the full pipeline on it
    ///
    /// # Errors
    ///
    /// Returns [`crate::SpritePrepError`] for I/O, decode, or processing
    /// failures.
    pub fn process_file<P: AsRef<Path>>(&self, input_path: P) -> Result<RemovalResult> {
        let image = ImageIoService::load_image(input_path)?;
        self.process_image(&image)
    }

    /// Split a composite sheet into tiles and run the pipeline on each.
    ///
    /// Tiles are returned in the layout's reading order (top-left to
    /// bottom-right).
    ///
    /// # Errors
    ///
    /// Returns [`crate::SpritePrepError`] for invalid layouts or processing
    /// failures.
    #[instrument(skip_all, fields(tiles = layout.tile_count()))]
    pub fn process_sheet(
        &self,
        image: &DynamicImage,
        layout: &SplitLayout,
    ) -> Result<Vec<RemovalResult>> {
        let rgba = image.to_rgba8();
        let regions = geometry::split_regions(rgba.width(), rgba.height(), layout)?;

        let mut results = Vec::with_capacity(regions.len());
        for region in regions {
            let tile = geometry::extract_region(&rgba, region);
            results.push(self.process_image(&DynamicImage::ImageRgba8(tile))?);
        }
        Ok(results)
    }
}
