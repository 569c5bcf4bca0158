#![allow(clippy::too_many_lines)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::uninlined_format_args)]

//! # Sprite Preparation Library
//!
//! A Rust library for preparing scanned art assets as game-ready sprites:
//! flood-fill background removal, content cropping, canvas centering, and
//! composite-sheet splitting.
//!
//! The core algorithm distinguishes true background (near-white pixels
//! reachable from the image border via 4-connected paths) from enclosed
//! near-white regions such as eye highlights, which are preserved. A naive
//! global strategy that clears every near-white pixel is available as an
//! alternative.
//!
//! ## Features
//!
//! - **Flood-fill background removal**: border-seeded BFS, 4-connectivity,
//!   O(width × height) time and space
//! - **Content cropping**: bounding box of non-transparent pixels plus
//!   configurable padding, always clamped to the image bounds
//! - **Canvas centering**: place sprites on a transparent canvas
//! - **Sheet splitting**: 2×2 grid, vertical halves, or a custom vertical
//!   ratio, with a margin trimmed around the cut lines
//! - **Format Support**: JPEG, PNG, TIFF input; PNG/JPEG/TIFF output
//! - **CLI Integration**: optional batch command-line interface (enable with
//!   the `cli` feature)
//!
//! ## Quick Start
//!
//! ```rust
//! use spriteprep::{remove_background_from_image, RemovalConfig};
//! use image::{DynamicImage, RgbaImage};
//!
//! # fn example() -> spriteprep::Result<()> {
//! let scan = DynamicImage::ImageRgba8(RgbaImage::new(64, 64));
//! let config = RemovalConfig::builder()
//!     .threshold(240)
//!     .crop_padding(10)
//!     .build()?;
//!
//! let result = remove_background_from_image(&scan, &config)?;
//! result.save_png("sprite.png")?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Sheet splitting
//!
//! ```rust,no_run
//! use spriteprep::{RemovalConfig, SplitLayout, SpriteProcessor};
//!
//! # fn example() -> anyhow::Result<()> {
//! let processor = SpriteProcessor::new(RemovalConfig::default())?;
//! let sheet = image::open("sheet.jpg")?;
//! let tiles = processor.process_sheet(&sheet, &SplitLayout::Grid2x2 { margin: 80 })?;
//! for (i, tile) in tiles.iter().enumerate() {
//!     tile.save_png(format!("tile-{}.png", i + 1))?;
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Library vs CLI Usage
//!
//! - **Library usage**: all processing functionality is available with
//!   `default-features = false`
//! - **CLI usage**: the `cli` feature (default) adds the `spriteprep` binary
//!   with batch processing and progress reporting

#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod error;
pub mod geometry;
pub mod processor;
pub mod removal;
pub mod services;
#[cfg(feature = "cli")]
pub mod tracing_config;
pub mod types;

// Public API exports
pub use config::{
    OutputFormat, RemovalConfig, RemovalConfigBuilder, RemovalStrategy, DEFAULT_CROP_PADDING,
    DEFAULT_THRESHOLD,
};
pub use error::{Result, SpritePrepError};
pub use geometry::{
    center_on_canvas, content_bounding_box, crop_to_content, extract_region, split_regions,
    Region, SplitLayout,
};
pub use processor::SpriteProcessor;
pub use removal::{
    apply_mask, detect_background, detect_background_global, remove_background, BackgroundMask,
};
pub use services::{ImageIoService, OutputFormatHandler};
pub use types::{ProcessingMetadata, ProcessingTimings, RemovalResult};

#[cfg(feature = "cli")]
pub use tracing_config::{init_cli_tracing, TracingConfig, TracingFormat, TracingOutput};

/// Remove the background from an image provided as bytes.
///
/// Accepts any format the image codec can decode (JPEG, PNG, TIFF, ...) and
/// runs the full pipeline configured in `config`.
///
/// # Errors
///
/// Returns [`SpritePrepError`] when decoding or processing fails.
pub fn remove_background_from_bytes(
    image_bytes: &[u8],
    config: &RemovalConfig,
) -> Result<RemovalResult> {
    let image = image::load_from_memory(image_bytes).map_err(|e| {
        SpritePrepError::processing(format!("Failed to decode image from bytes: {e}"))
    })?;
    remove_background_from_image(&image, config)
}

/// Remove the background from a `DynamicImage` directly.
///
/// This is the most flexible API for in-memory processing; it performs no
/// file I/O.
///
/// # Errors
///
/// Returns [`SpritePrepError`] for invalid configuration or processing
/// failures.
pub fn remove_background_from_image(
    image: &image::DynamicImage,
    config: &RemovalConfig,
) -> Result<RemovalResult> {
    let processor = SpriteProcessor::new(config.clone())?;
    processor.process_image(image)
}

/// Remove the background from an image file.
///
/// # Errors
///
/// Returns [`SpritePrepError`] for I/O, decode, or processing failures.
pub fn remove_background_from_file<P: AsRef<std::path::Path>>(
    path: P,
    config: &RemovalConfig,
) -> Result<RemovalResult> {
    let processor = SpriteProcessor::new(config.clone())?;
    processor.process_file(path)
}
