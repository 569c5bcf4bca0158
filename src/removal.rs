//! Flood-fill background removal
//!
//! The core of the crate: classify near-white pixels that are connected to
//! the image border as background and make them fully transparent, while
//! leaving enclosed near-white regions (eye highlights, teeth, pattern
//! details) untouched.
//!
//! A naive global pass that clears every near-white pixel regardless of
//! connectivity is also provided; it is faster but destroys interior white
//! detail, so the flood-fill strategy is the default.

use crate::error::Result;
use image::RgbaImage;
use std::collections::VecDeque;

/// Boolean grid marking which pixels are classified as removable background.
///
/// Same dimensions as the image it was computed from. Transient: scoped to a
/// single removal invocation, but returned to callers that want to composite
/// differently than the default alpha rewrite.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackgroundMask {
    width: u32,
    height: u32,
    data: Vec<bool>,
}

impl BackgroundMask {
    /// Create an all-false mask of the given dimensions
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            data: vec![false; (width as usize) * (height as usize)],
        }
    }

    /// Mask dimensions as (width, height)
    #[must_use]
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Whether the pixel at (x, y) is classified as background.
    ///
    /// Out-of-bounds coordinates are never background.
    #[must_use]
    pub fn is_background(&self, x: u32, y: u32) -> bool {
        if x >= self.width || y >= self.height {
            return false;
        }
        self.data
            .get((y as usize) * (self.width as usize) + (x as usize))
            .copied()
            .unwrap_or(false)
    }

    fn set(&mut self, x: u32, y: u32) {
        let index = (y as usize) * (self.width as usize) + (x as usize);
        if let Some(slot) = self.data.get_mut(index) {
            *slot = true;
        }
    }

    /// Number of pixels classified as background
    #[must_use]
    pub fn background_count(&self) -> u64 {
        self.data.iter().filter(|&&b| b).count() as u64
    }

    /// True when no pixel is classified as background
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.iter().all(|&b| !b)
    }
}

/// Whether all three color channels strictly exceed the threshold
#[inline]
fn is_near_white(pixel: &image::Rgba<u8>, threshold: u8) -> bool {
    pixel[0] > threshold && pixel[1] > threshold && pixel[2] > threshold
}

/// Classify edge-connected near-white pixels as background.
///
/// Runs a multi-source breadth-first flood fill seeded from every near-white
/// pixel on the image border (first/last row and first/last column). Only
/// 4-connected neighbors are explored; diagonal-only connections do not
/// propagate, which keeps thin white bridges from leaking the fill into
/// enclosed regions.
///
/// A pixel ends up in the returned mask exactly when a path of 4-connected
/// near-white pixels links it to the border. Runs in O(width × height) time
/// and space: every pixel enters the queue at most once.
///
/// Zero-dimension images yield an empty mask.
#[must_use]
pub fn detect_background(image: &RgbaImage, threshold: u8) -> BackgroundMask {
    let (width, height) = image.dimensions();
    let mut mask = BackgroundMask::new(width, height);
    if width == 0 || height == 0 {
        return mask;
    }

    let near_white: Vec<bool> = image
        .pixels()
        .map(|pixel| is_near_white(pixel, threshold))
        .collect();
    let index = |x: u32, y: u32| (y as usize) * (width as usize) + (x as usize);

    let mut visited = vec![false; near_white.len()];
    let mut queue: VecDeque<(u32, u32)> = VecDeque::new();

    // Seed with every near-white border pixel
    let seed = |x: u32, y: u32, visited: &mut Vec<bool>, queue: &mut VecDeque<(u32, u32)>| {
        let i = index(x, y);
        if near_white.get(i).copied().unwrap_or(false) && !visited.get(i).copied().unwrap_or(true) {
            if let Some(slot) = visited.get_mut(i) {
                *slot = true;
            }
            queue.push_back((x, y));
        }
    };
    for x in 0..width {
        seed(x, 0, &mut visited, &mut queue);
        seed(x, height - 1, &mut visited, &mut queue);
    }
    for y in 0..height {
        seed(0, y, &mut visited, &mut queue);
        seed(width - 1, y, &mut visited, &mut queue);
    }

    // Explicit worklist rather than recursion: stack depth must not scale
    // with image size
    while let Some((x, y)) = queue.pop_front() {
        mask.set(x, y);

        let neighbors = [
            (x, y.wrapping_sub(1)),
            (x, y + 1),
            (x.wrapping_sub(1), y),
            (x + 1, y),
        ];
        for (nx, ny) in neighbors {
            if nx >= width || ny >= height {
                continue;
            }
            let i = index(nx, ny);
            let unvisited = !visited.get(i).copied().unwrap_or(true);
            if unvisited && near_white.get(i).copied().unwrap_or(false) {
                if let Some(slot) = visited.get_mut(i) {
                    *slot = true;
                }
                queue.push_back((nx, ny));
            }
        }
    }

    mask
}

/// Classify every near-white pixel as background, ignoring connectivity.
///
/// This is the naive strategy: it also clears enclosed white regions, which
/// is usually wrong for scanned artwork but acceptable for assets without
/// interior white detail.
#[must_use]
pub fn detect_background_global(image: &RgbaImage, threshold: u8) -> BackgroundMask {
    let (width, height) = image.dimensions();
    let mut mask = BackgroundMask::new(width, height);
    for (x, y, pixel) in image.enumerate_pixels() {
        if is_near_white(pixel, threshold) {
            mask.set(x, y);
        }
    }
    mask
}

/// Apply a background mask to an image.
///
/// Returns a new image of identical dimensions where masked pixels have
/// alpha 0 and all other pixels have alpha 255. Color channels are never
/// modified. Matches the reference behavior of forcing full opacity on
/// non-background pixels; callers that must preserve partial source alpha
/// can composite from the mask themselves.
///
/// # Errors
///
/// Returns [`crate::SpritePrepError::Processing`] when the mask dimensions
/// do not match the image.
pub fn apply_mask(image: &RgbaImage, mask: &BackgroundMask) -> Result<RgbaImage> {
    if mask.dimensions() != image.dimensions() {
        return Err(crate::error::SpritePrepError::processing(format!(
            "mask dimensions {:?} do not match image dimensions {:?}",
            mask.dimensions(),
            image.dimensions()
        )));
    }

    let mut output = image.clone();
    for (x, y, pixel) in output.enumerate_pixels_mut() {
        pixel[3] = if mask.is_background(x, y) { 0 } else { 255 };
    }
    Ok(output)
}

/// Remove the edge-connected near-white background from an image.
///
/// Convenience wrapper combining [`detect_background`] and [`apply_mask`].
#[must_use]
pub fn remove_background(image: &RgbaImage, threshold: u8) -> RgbaImage {
    let mask = detect_background(image, threshold);
    // Dimensions always match: the mask was computed from this image
    apply_mask(image, &mask).unwrap_or_else(|_| image.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);
    const BLACK: Rgba<u8> = Rgba([0, 0, 0, 255]);

    fn solid(width: u32, height: u32, pixel: Rgba<u8>) -> RgbaImage {
        RgbaImage::from_pixel(width, height, pixel)
    }

    #[test]
    fn test_all_white_image_becomes_fully_transparent() {
        let img = solid(4, 4, WHITE);
        let out = remove_background(&img, 240);
        assert!(out.pixels().all(|p| p[3] == 0));
    }

    #[test]
    fn test_all_black_image_is_unchanged() {
        let img = solid(3, 3, BLACK);
        let mask = detect_background(&img, 240);
        assert!(mask.is_empty());
        let out = remove_background(&img, 240);
        assert!(out.pixels().all(|p| p[3] == 255));
        for (a, b) in img.pixels().zip(out.pixels()) {
            assert_eq!(&a.0[..3], &b.0[..3]);
        }
    }

    #[test]
    fn test_five_by_five_with_black_center() {
        // All white except the exact center pixel
        let mut img = solid(5, 5, WHITE);
        img.put_pixel(2, 2, BLACK);

        let out = remove_background(&img, 240);
        for (x, y, pixel) in out.enumerate_pixels() {
            if (x, y) == (2, 2) {
                assert_eq!(pixel, &Rgba([0, 0, 0, 255]));
            } else {
                assert_eq!(pixel[3], 0, "border-connected white at ({x}, {y})");
            }
        }
        assert_eq!(detect_background(&img, 240).background_count(), 24);
    }

    #[test]
    fn test_enclosed_white_region_is_preserved() {
        // 5x5 black frame with a single white pixel strictly inside
        let mut img = solid(5, 5, BLACK);
        img.put_pixel(2, 2, WHITE);

        let mask = detect_background(&img, 240);
        assert!(mask.is_empty());

        let out = remove_background(&img, 240);
        assert_eq!(out.get_pixel(2, 2), &WHITE);
    }

    #[test]
    fn test_enclosed_region_behind_diagonal_gap_is_preserved() {
        // A white pixel whose only connection to the border is diagonal
        // must not be flooded: connectivity is 4-way, not 8-way.
        let mut img = solid(3, 3, WHITE);
        img.put_pixel(1, 0, BLACK);
        img.put_pixel(0, 1, BLACK);
        img.put_pixel(1, 2, BLACK);
        img.put_pixel(2, 1, BLACK);

        let mask = detect_background(&img, 240);
        assert!(!mask.is_background(1, 1));
        assert!(mask.is_background(0, 0));
        assert!(mask.is_background(2, 2));
    }

    #[test]
    fn test_white_inlet_from_border_is_removed() {
        // A near-white channel reaching in from the border floods inward
        let mut img = solid(5, 5, BLACK);
        img.put_pixel(2, 0, WHITE);
        img.put_pixel(2, 1, WHITE);
        img.put_pixel(2, 2, WHITE);

        let mask = detect_background(&img, 240);
        assert!(mask.is_background(2, 0));
        assert!(mask.is_background(2, 1));
        assert!(mask.is_background(2, 2));
        assert_eq!(mask.background_count(), 3);
    }

    #[test]
    fn test_idempotence() {
        let mut img = solid(6, 6, WHITE);
        img.put_pixel(3, 3, BLACK);
        img.put_pixel(2, 3, Rgba([200, 10, 10, 255]));

        let once = remove_background(&img, 240);
        let twice = remove_background(&once, 240);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_threshold_monotonicity() {
        // Raising the threshold can only shrink the background set
        let mut img = solid(6, 6, Rgba([245, 245, 245, 255]));
        img.put_pixel(3, 3, BLACK);

        let loose = detect_background(&img, 240);
        let strict = detect_background(&img, 250);
        assert!(strict.background_count() <= loose.background_count());
        for y in 0..6 {
            for x in 0..6 {
                if strict.is_background(x, y) {
                    assert!(loose.is_background(x, y));
                }
            }
        }
    }

    #[test]
    fn test_threshold_is_strict() {
        // Channel values equal to the threshold do not qualify as near-white
        let img = solid(2, 2, Rgba([240, 240, 240, 255]));
        assert!(detect_background(&img, 240).is_empty());
        assert_eq!(detect_background(&img, 239).background_count(), 4);
    }

    #[test]
    fn test_zero_dimension_image() {
        let img = RgbaImage::new(0, 0);
        let mask = detect_background(&img, 240);
        assert_eq!(mask.dimensions(), (0, 0));
        assert!(mask.is_empty());
        let out = remove_background(&img, 240);
        assert_eq!(out.dimensions(), (0, 0));
    }

    #[test]
    fn test_single_row_image() {
        let mut img = solid(5, 1, WHITE);
        img.put_pixel(2, 0, BLACK);
        let mask = detect_background(&img, 240);
        assert!(mask.is_background(0, 0));
        assert!(mask.is_background(1, 0));
        assert!(!mask.is_background(2, 0));
        assert!(mask.is_background(3, 0));
        assert!(mask.is_background(4, 0));
    }

    #[test]
    fn test_global_strategy_clears_enclosed_regions() {
        let mut img = solid(5, 5, BLACK);
        img.put_pixel(2, 2, WHITE);

        let mask = detect_background_global(&img, 240);
        assert!(mask.is_background(2, 2));
        assert_eq!(mask.background_count(), 1);
    }

    #[test]
    fn test_apply_mask_rejects_mismatched_dimensions() {
        let img = solid(4, 4, WHITE);
        let mask = BackgroundMask::new(3, 3);
        assert!(apply_mask(&img, &mask).is_err());
    }

    #[test]
    fn test_apply_mask_forces_full_opacity_on_foreground() {
        let img = solid(2, 2, Rgba([10, 20, 30, 128]));
        let mask = BackgroundMask::new(2, 2);
        let out = apply_mask(&img, &mask).unwrap();
        assert!(out.pixels().all(|p| p[3] == 255));
    }
}
