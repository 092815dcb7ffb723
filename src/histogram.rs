//! Intensity-distribution bar chart of the final heightmap.
//!
//! Narrow interface on purpose: [`render`] takes the grayscale result and
//! returns a chart image, nothing else. Bucket counting is split out as
//! [`counts`] so the distribution itself stays testable without pixel
//! comparisons on the rendered chart.

use image::{GrayImage, Rgba, RgbaImage};

/// Chart column width per intensity bucket.
const BAR_WIDTH: u32 = 2;
/// Chart height; the tallest bucket spans the full height.
const CHART_HEIGHT: u32 = 160;

const BACKGROUND: Rgba<u8> = Rgba([24, 24, 24, 255]);
const BAR: Rgba<u8> = Rgba([220, 220, 220, 255]);

/// Count how many pixels fall into each of the 256 intensity buckets.
pub fn counts(img: &GrayImage) -> [u64; 256] {
    let mut counts = [0u64; 256];
    for &v in img.as_raw() {
        counts[v as usize] += 1;
    }
    counts
}

/// Render the frequency distribution as a bar chart, one column per
/// intensity bucket, tallest bucket normalized to the full chart height.
/// Always succeeds for a valid buffer.
pub fn render(img: &GrayImage) -> RgbaImage {
    let counts = counts(img);
    let tallest = counts.iter().copied().max().unwrap_or(0).max(1);

    let mut chart = RgbaImage::from_pixel(256 * BAR_WIDTH, CHART_HEIGHT, BACKGROUND);
    for (bucket, &count) in counts.iter().enumerate() {
        let bar = ((count as f64 / tallest as f64) * f64::from(CHART_HEIGHT)).round() as u32;
        for dy in 0..bar {
            for dx in 0..BAR_WIDTH {
                chart.put_pixel(
                    bucket as u32 * BAR_WIDTH + dx,
                    CHART_HEIGHT - 1 - dy,
                    BAR,
                );
            }
        }
    }
    chart
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Luma;

    #[test]
    fn counts_cover_every_pixel() {
        let img = GrayImage::from_fn(10, 10, |x, y| Luma([(x * 25 + y) as u8]));
        let counts = counts(&img);
        assert_eq!(counts.iter().sum::<u64>(), 100);
    }

    #[test]
    fn uniform_image_fills_a_single_bucket() {
        let img = GrayImage::from_pixel(8, 8, Luma([130]));
        let counts = counts(&img);
        assert_eq!(counts[130], 64);
        assert_eq!(counts.iter().sum::<u64>(), 64);
    }

    #[test]
    fn chart_has_fixed_dimensions() {
        let img = GrayImage::from_pixel(3, 3, Luma([0]));
        let chart = render(&img);
        assert_eq!(chart.dimensions(), (256 * BAR_WIDTH, CHART_HEIGHT));
    }

    #[test]
    fn tallest_bucket_spans_the_full_height() {
        let img = GrayImage::from_pixel(4, 4, Luma([200]));
        let chart = render(&img);
        let x = 200 * BAR_WIDTH;
        assert_eq!(*chart.get_pixel(x, 0), BAR);
        assert_eq!(*chart.get_pixel(x, CHART_HEIGHT - 1), BAR);
        // A bucket with no pixels stays background.
        assert_eq!(*chart.get_pixel(0, CHART_HEIGHT - 1), BACKGROUND);
    }
}
