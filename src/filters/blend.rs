//! Opacity blending and binary thresholding of grayscale buffers.

use image::GrayImage;
use rayon::prelude::*;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FilterError {
    #[error(
        "dimension mismatch: base is {base_width}x{base_height}, overlay is {overlay_width}x{overlay_height}"
    )]
    DimensionMismatch {
        base_width: u32,
        base_height: u32,
        overlay_width: u32,
        overlay_height: u32,
    },
}

/// Mix `overlay` over `base`: `base·(1−opacity) + overlay·opacity` per
/// pixel, rounded to the nearest 8-bit value.
///
/// Opacity outside 0.0–1.0 is clamped to the nearest bound. Differing
/// dimensions are an error — both buffers must be reductions of the same
/// source, so a mismatch means an upstream invariant was broken.
pub fn blend(base: &GrayImage, overlay: &GrayImage, opacity: f32) -> Result<GrayImage, FilterError> {
    if base.dimensions() != overlay.dimensions() {
        let (base_width, base_height) = base.dimensions();
        let (overlay_width, overlay_height) = overlay.dimensions();
        return Err(FilterError::DimensionMismatch {
            base_width,
            base_height,
            overlay_width,
            overlay_height,
        });
    }
    let alpha = opacity.clamp(0.0, 1.0);
    let (width, height) = base.dimensions();

    let mixed: Vec<u8> = base
        .as_raw()
        .par_iter()
        .zip(overlay.as_raw().par_iter())
        .map(|(&b, &o)| (f32::from(b) * (1.0 - alpha) + f32::from(o) * alpha).round() as u8)
        .collect();

    Ok(GrayImage::from_raw(width, height, mixed).expect("blend output sized to dimensions"))
}

/// Posterize to pure black/white: luminance ≥ `level` maps to white,
/// everything below to black.
pub fn threshold(src: &GrayImage, level: u8) -> GrayImage {
    let (width, height) = src.dimensions();
    let cut: Vec<u8> = src
        .as_raw()
        .iter()
        .map(|&v| if v >= level { 255 } else { 0 })
        .collect();
    GrayImage::from_raw(width, height, cut).expect("threshold output sized to dimensions")
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Luma;

    fn gradient(width: u32, height: u32) -> GrayImage {
        GrayImage::from_fn(width, height, |x, y| Luma([(x * 40 + y * 10) as u8]))
    }

    #[test]
    fn opacity_zero_returns_the_base() {
        let base = gradient(4, 4);
        let overlay = GrayImage::from_pixel(4, 4, Luma([255]));
        assert_eq!(blend(&base, &overlay, 0.0).unwrap(), base);
    }

    #[test]
    fn opacity_one_returns_the_overlay() {
        let base = gradient(4, 4);
        let overlay = GrayImage::from_pixel(4, 4, Luma([255]));
        assert_eq!(blend(&base, &overlay, 1.0).unwrap(), overlay);
    }

    #[test]
    fn out_of_range_opacity_clamps() {
        let base = gradient(3, 3);
        let overlay = GrayImage::from_pixel(3, 3, Luma([200]));
        assert_eq!(
            blend(&base, &overlay, -2.5).unwrap(),
            blend(&base, &overlay, 0.0).unwrap()
        );
        assert_eq!(
            blend(&base, &overlay, 7.0).unwrap(),
            blend(&base, &overlay, 1.0).unwrap()
        );
    }

    #[test]
    fn blend_is_monotonic_in_opacity() {
        let base = GrayImage::from_pixel(2, 2, Luma([40]));
        let overlay = GrayImage::from_pixel(2, 2, Luma([220]));
        let mut previous = 0u8;
        for step in 0..=10 {
            let alpha = step as f32 / 10.0;
            let value = blend(&base, &overlay, alpha).unwrap().get_pixel(0, 0).0[0];
            assert!(value >= previous, "alpha {alpha}: {value} < {previous}");
            previous = value;
        }
    }

    #[test]
    fn blend_rounds_to_nearest() {
        let base = GrayImage::from_pixel(1, 1, Luma([0]));
        let overlay = GrayImage::from_pixel(1, 1, Luma([255]));
        // 255 * 0.5 = 127.5, rounds up
        assert_eq!(blend(&base, &overlay, 0.5).unwrap().get_pixel(0, 0).0[0], 128);
    }

    #[test]
    fn mismatched_dimensions_are_an_error() {
        let base = gradient(4, 4);
        let overlay = gradient(4, 5);
        let err = blend(&base, &overlay, 0.5).unwrap_err();
        assert!(matches!(
            err,
            FilterError::DimensionMismatch {
                base_height: 4,
                overlay_height: 5,
                ..
            }
        ));
    }

    #[test]
    fn threshold_splits_at_the_level() {
        let src = GrayImage::from_fn(4, 1, |x, _| Luma([(x * 80) as u8]));
        let out = threshold(&src, 160);
        assert_eq!(out.as_raw(), &[0, 0, 255, 255]);
    }

    #[test]
    fn threshold_level_itself_maps_to_white() {
        let src = GrayImage::from_pixel(1, 1, Luma([200]));
        assert_eq!(threshold(&src, 200).get_pixel(0, 0).0[0], 255);
    }

    #[test]
    fn threshold_is_idempotent_on_binary_input() {
        let src = gradient(5, 5);
        let binary = threshold(&src, 90);
        assert_eq!(threshold(&binary, 90), binary);
    }
}
