//! Geometric supporting utilities
//!
//! Content-bounding-box cropping, transparent-canvas centering, and the
//! generic sheet-splitting layouts used to cut composite scans into
//! individual sprite tiles. None of these operations ever sample outside the
//! image bounds.

use crate::error::{Result, SpritePrepError};
use image::{imageops, RgbaImage};
use serde::{Deserialize, Serialize};

/// Rectangular pixel region with exclusive right/bottom edges
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Region {
    /// Leftmost column (inclusive)
    pub left: u32,
    /// Topmost row (inclusive)
    pub top: u32,
    /// Rightmost column (exclusive)
    pub right: u32,
    /// Bottom row (exclusive)
    pub bottom: u32,
}

impl Region {
    /// Construct a region from inclusive left/top and exclusive right/bottom
    #[must_use]
    pub fn new(left: u32, top: u32, right: u32, bottom: u32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Region width in pixels (zero when degenerate)
    #[must_use]
    pub fn width(&self) -> u32 {
        self.right.saturating_sub(self.left)
    }

    /// Region height in pixels (zero when degenerate)
    #[must_use]
    pub fn height(&self) -> u32 {
        self.bottom.saturating_sub(self.top)
    }

    /// Intersect the region with an image of the given dimensions
    #[must_use]
    pub fn clamped_to(&self, width: u32, height: u32) -> Self {
        Self {
            left: self.left.min(width),
            top: self.top.min(height),
            right: self.right.min(width),
            bottom: self.bottom.min(height),
        }
    }

    /// True when the region contains no pixels
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.width() == 0 || self.height() == 0
    }
}

/// Layouts for splitting a composite sheet into tiles.
///
/// The margin is trimmed away around each cut line so that artwork bleeding
/// over the nominal grid boundary does not leak into the neighboring tile.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum SplitLayout {
    /// Four tiles: top-left, top-right, bottom-left, bottom-right
    Grid2x2 {
        /// Pixels trimmed on each side of the midlines
        margin: u32,
    },
    /// Two tiles: top and bottom halves
    Vertical {
        /// Pixels trimmed on each side of the midline
        margin: u32,
    },
    /// Two tiles split at a custom height ratio
    VerticalRatio {
        /// Split position as a fraction of the image height, in (0, 1)
        ratio: f32,
        /// Pixels trimmed on each side of the split line
        margin: u32,
    },
}

impl SplitLayout {
    /// Validate layout parameters
    ///
    /// # Errors
    ///
    /// Returns [`SpritePrepError::InvalidConfig`] when a ratio lies outside
    /// the open interval (0, 1).
    pub fn validate(&self) -> Result<()> {
        if let Self::VerticalRatio { ratio, .. } = self {
            if !(*ratio > 0.0 && *ratio < 1.0) {
                return Err(SpritePrepError::config_value_error(
                    "split ratio",
                    ratio,
                    "0.0 < ratio < 1.0 exclusive",
                ));
            }
        }
        Ok(())
    }

    /// Number of tiles the layout produces
    #[must_use]
    pub fn tile_count(&self) -> usize {
        match self {
            Self::Grid2x2 { .. } => 4,
            Self::Vertical { .. } | Self::VerticalRatio { .. } => 2,
        }
    }
}

/// Compute the tile regions for splitting an image of the given dimensions.
///
/// Regions are returned in reading order (top-left, top-right, bottom-left,
/// bottom-right for the grid; top then bottom for vertical splits) and are
/// always clamped to the image bounds.
///
/// # Errors
///
/// Returns [`SpritePrepError::InvalidConfig`] when the layout parameters are
/// invalid or when the margin consumes an entire tile.
pub fn split_regions(width: u32, height: u32, layout: &SplitLayout) -> Result<Vec<Region>> {
    layout.validate()?;

    let regions = match *layout {
        SplitLayout::Grid2x2 { margin } => {
            let mid_w = width / 2;
            let mid_h = height / 2;
            vec![
                Region::new(0, 0, mid_w.saturating_sub(margin), mid_h.saturating_sub(margin)),
                Region::new(mid_w + margin, 0, width, mid_h.saturating_sub(margin)),
                Region::new(0, mid_h + margin, mid_w.saturating_sub(margin), height),
                Region::new(mid_w + margin, mid_h + margin, width, height),
            ]
        },
        SplitLayout::Vertical { margin } => {
            let mid_h = height / 2;
            vec![
                Region::new(0, 0, width, mid_h.saturating_sub(margin)),
                Region::new(0, mid_h + margin, width, height),
            ]
        },
        SplitLayout::VerticalRatio { ratio, margin } => {
            let split_h = ((f64::from(height) * f64::from(ratio)) as u32).min(height);
            vec![
                Region::new(0, 0, width, split_h.saturating_sub(margin)),
                Region::new(0, (split_h + margin).min(height), width, height),
            ]
        },
    };

    let regions: Vec<Region> = regions
        .into_iter()
        .map(|r| r.clamped_to(width, height))
        .collect();

    if let Some(empty) = regions.iter().find(|r| r.is_empty()) {
        return Err(SpritePrepError::invalid_config(format!(
            "split margin leaves an empty tile ({}x{} region in a {width}x{height} image)",
            empty.width(),
            empty.height(),
        )));
    }

    Ok(regions)
}

/// Extract a region of an image as a new image
#[must_use]
pub fn extract_region(image: &RgbaImage, region: Region) -> RgbaImage {
    let region = region.clamped_to(image.width(), image.height());
    imageops::crop_imm(image, region.left, region.top, region.width(), region.height()).to_image()
}

/// Bounding box of all non-transparent pixels, or `None` for a fully
/// transparent (or empty) image
#[must_use]
pub fn content_bounding_box(image: &RgbaImage) -> Option<Region> {
    let mut min_x = u32::MAX;
    let mut min_y = u32::MAX;
    let mut max_x = 0u32;
    let mut max_y = 0u32;
    let mut found = false;

    for (x, y, pixel) in image.enumerate_pixels() {
        if pixel[3] > 0 {
            found = true;
            min_x = min_x.min(x);
            min_y = min_y.min(y);
            max_x = max_x.max(x);
            max_y = max_y.max(y);
        }
    }

    found.then(|| Region::new(min_x, min_y, max_x + 1, max_y + 1))
}

/// Crop an image to its non-transparent content plus padding.
///
/// Padding is clamped to the image bounds; the crop never extends outside
/// the image. Fully transparent images are returned unchanged.
#[must_use]
pub fn crop_to_content(image: &RgbaImage, padding: u32) -> RgbaImage {
    match content_bounding_box(image) {
        Some(bbox) => {
            let padded = Region::new(
                bbox.left.saturating_sub(padding),
                bbox.top.saturating_sub(padding),
                bbox.right.saturating_add(padding),
                bbox.bottom.saturating_add(padding),
            )
            .clamped_to(image.width(), image.height());
            extract_region(image, padded)
        },
        None => image.clone(),
    }
}

/// Center an image on a fully transparent canvas.
///
/// The canvas grows to fit the sprite when the requested size is smaller on
/// either axis, so centering never discards pixels.
#[must_use]
pub fn center_on_canvas(image: &RgbaImage, canvas_size: (u32, u32)) -> RgbaImage {
    let canvas_w = canvas_size.0.max(image.width());
    let canvas_h = canvas_size.1.max(image.height());

    let mut canvas = RgbaImage::new(canvas_w, canvas_h);
    let x = i64::from((canvas_w - image.width()) / 2);
    let y = i64::from((canvas_h - image.height()) / 2);
    imageops::overlay(&mut canvas, image, x, y);
    canvas
}
