//! The fixed-order filter pipeline.
//!
//! Stage order matters and never changes:
//!
//! 1. **Emboss** — runs on the original color data, before any blur can
//!    soften the edges the relief effect depends on.
//! 2. **Contrast**, 3. **Invert** — tone adjustments on the emboss result
//!    so the depth effect stays legible.
//! 4. **Box blur**, 5. **Gaussian blur** — smooth noise last among the
//!    color-space edits, just before reduction.
//! 6. **Grayscale reduction** — always applied; produces the destination
//!    buffer.
//! 7. **Threshold/blend** — posterizes the grayscale reduction to pure
//!    black/white and mixes it back over the destination with the
//!    configured opacity, selectively reintroducing sharp detail.
//!
//! Each optional stage is skipped at its parameter's neutral value, so a
//! fully neutral config degenerates to a plain grayscale conversion. The
//! pipeline owns the single evolving buffer; every stage consumes it and
//! produces the next one.

use crate::config::PipelineConfig;
use crate::filters::kernel::Kernel;
use crate::filters::{FilterError, blend, convolve, threshold};
use image::{DynamicImage, GrayImage};

/// Run the full filter sequence over a decoded source image.
///
/// # Errors
///
/// Only the blend stage can fail, and only on a base/overlay dimension
/// mismatch — which cannot occur for buffers reduced from the same
/// source, so an error here signals an internal invariant violation.
pub fn render(src: DynamicImage, config: &PipelineConfig) -> Result<GrayImage, FilterError> {
    let mut src = src;

    if let Some(kernel) = config.emboss.kernel() {
        src = DynamicImage::ImageRgba8(convolve(&src.to_rgba8(), &kernel, true));
    }

    if config.contrast > 0.0 {
        src = src.adjust_contrast(config.contrast);
    }

    if config.invert {
        src.invert();
    }

    if config.box_blur > 0.0 {
        let kernel = Kernel::box_mean(config.box_blur);
        src = DynamicImage::ImageRgba8(convolve(&src.to_rgba8(), &kernel, true));
    }

    if config.gaussian_blur > 0.0 {
        src = src.blur(config.gaussian_blur);
    }

    let mut dst = src.to_luma8();

    if config.mono_threshold > 0 {
        // The threshold source is the post-blur, pre-grayscale buffer;
        // at this point `dst` is exactly its grayscale reduction. Base
        // and overlay are both single-channel, so the blended buffer is
        // already the final grayscale result.
        let mono = threshold(&dst, config.mono_threshold);
        dst = blend(&dst, &mono, config.blend_opacity)?;
    }

    Ok(dst)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filters::kernel::EmbossLevel;
    use image::{Luma, Rgba, RgbaImage};

    fn sample_rgba() -> RgbaImage {
        RgbaImage::from_fn(8, 6, |x, y| {
            Rgba([(x * 30) as u8, (y * 40) as u8, ((x + y) * 10) as u8, 255])
        })
    }

    #[test]
    fn neutral_config_is_plain_grayscale() {
        let src = DynamicImage::ImageRgba8(sample_rgba());
        let expected = src.to_luma8();
        let out = render(src, &PipelineConfig::default()).unwrap();
        assert_eq!(out, expected);
    }

    #[test]
    fn emboss_of_uniform_mid_gray_is_a_fixpoint() {
        // Zero-sum kernel over a flat field plus bias 128 reproduces the
        // uniform 128 buffer; grayscale keeps it uniform.
        let src = DynamicImage::ImageRgba8(RgbaImage::from_pixel(
            2,
            2,
            Rgba([128, 128, 128, 255]),
        ));
        let config = PipelineConfig {
            emboss: EmbossLevel::Low,
            ..PipelineConfig::default()
        };
        let out = render(src, &config).unwrap();
        assert_eq!(out.dimensions(), (2, 2));
        for p in out.pixels() {
            assert_eq!(p.0[0], 128);
        }
    }

    #[test]
    fn full_opacity_mono_is_pure_black_and_white() {
        let src = DynamicImage::ImageRgba8(sample_rgba());
        let expected = threshold(&src.to_luma8(), 200);
        let config = PipelineConfig {
            mono_threshold: 200,
            blend_opacity: 1.0,
            ..PipelineConfig::default()
        };
        let out = render(src, &config).unwrap();
        assert_eq!(out, expected);
        assert!(out.pixels().all(|p| p.0[0] == 0 || p.0[0] == 255));
    }

    #[test]
    fn mono_zero_skips_the_blend_entirely() {
        let src = DynamicImage::ImageRgba8(sample_rgba());
        let expected = src.to_luma8();
        let config = PipelineConfig {
            mono_threshold: 0,
            blend_opacity: 123.0,
            ..PipelineConfig::default()
        };
        assert_eq!(render(src, &config).unwrap(), expected);
    }

    #[test]
    fn partial_opacity_mono_keeps_intermediate_tones() {
        let src = DynamicImage::ImageRgba8(sample_rgba());
        let config = PipelineConfig {
            mono_threshold: 128,
            blend_opacity: 0.5,
            ..PipelineConfig::default()
        };
        let out = render(src, &config).unwrap();
        assert!(out.pixels().any(|p| p.0[0] != 0 && p.0[0] != 255));
    }

    #[test]
    fn invert_is_an_involution_across_two_runs() {
        // Grayscale source keeps the check exact: inversion on a Luma
        // buffer is 255 − v and the final reduction is the identity.
        let gray = GrayImage::from_fn(5, 5, |x, y| Luma([(x * 37 + y * 11) as u8]));
        let config = PipelineConfig {
            invert: true,
            ..PipelineConfig::default()
        };

        let once = render(DynamicImage::ImageLuma8(gray.clone()), &config).unwrap();
        let twice = render(DynamicImage::ImageLuma8(once), &config).unwrap();
        assert_eq!(twice, gray);
    }

    #[test]
    fn negative_contrast_and_radii_are_skipped() {
        let src = DynamicImage::ImageRgba8(sample_rgba());
        let expected = src.to_luma8();
        let config = PipelineConfig {
            contrast: -30.0,
            box_blur: -1.0,
            gaussian_blur: -0.5,
            ..PipelineConfig::default()
        };
        assert_eq!(render(src, &config).unwrap(), expected);
    }

    #[test]
    fn box_blur_smooths_a_sharp_edge() {
        let src = DynamicImage::ImageRgba8(RgbaImage::from_fn(8, 8, |x, _| {
            if x < 4 {
                Rgba([0, 0, 0, 255])
            } else {
                Rgba([255, 255, 255, 255])
            }
        }));
        let config = PipelineConfig {
            box_blur: 1.0,
            ..PipelineConfig::default()
        };
        let out = render(src, &config).unwrap();
        // Pixels straddling the edge average black and white neighbors.
        let edge = out.get_pixel(4, 4).0[0];
        assert!(edge > 0 && edge < 255, "edge pixel stayed binary: {edge}");
    }
}
