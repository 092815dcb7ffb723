//! Pipeline configuration.
//!
//! Everything the pipeline can be told to do arrives here, once, from the
//! CLI: an immutable [`PipelineConfig`] value plus an [`OutputFormat`]
//! resolved from the destination path's extension. No stage reads flags or
//! any other ambient state during execution.
//!
//! Threshold and opacity values are clamped inside the filter stages
//! themselves (see [`crate::filters::blend`]); the config carries them as
//! given.

use crate::filters::kernel::EmbossLevel;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error(
        "unsupported output format \".{extension}\" for {path} — supported: bmp, gif, jpg, jpeg, png, tif, tiff"
    )]
    UnsupportedFormat { path: String, extension: String },
}

/// Full set of optional stage parameters, constructed once from the CLI
/// and read-only during pipeline execution.
///
/// Each field's neutral value disables its stage: `EmbossLevel::None`,
/// contrast ≤ 0, `invert` false, radii ≤ 0, mono threshold 0.
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineConfig {
    /// Emboss intensity, or `None` to skip the emboss stage.
    pub emboss: EmbossLevel,
    /// Contrast adjustment in the range -100 to 100; applied only when > 0.
    pub contrast: f32,
    /// Invert colors before the blur stages.
    pub invert: bool,
    /// Box blur radius; applied only when > 0.
    pub box_blur: f32,
    /// Gaussian blur radius; applied only when > 0.
    pub gaussian_blur: f32,
    /// Monochrome threshold (0–255); 0 skips the threshold/blend pass.
    pub mono_threshold: u8,
    /// Opacity for blending the thresholded buffer over the grayscale
    /// result. Nominal range 0.0 to 1.0; out-of-range values are clamped
    /// at blend time.
    pub blend_opacity: f32,
}

impl Default for PipelineConfig {
    /// All stages disabled: the pipeline reduces to a plain grayscale
    /// conversion.
    fn default() -> Self {
        Self {
            emboss: EmbossLevel::None,
            contrast: 0.0,
            invert: false,
            box_blur: 0.0,
            gaussian_blur: 0.0,
            mono_threshold: 0,
            blend_opacity: 0.5,
        }
    }
}

/// Output encodings with a guaranteed encoder.
///
/// Resolved exactly once, at configuration time, from the destination
/// file's extension. Save-time format dispatch would push an unsupported
/// extension error past the (potentially slow) processing stages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Bmp,
    Jpeg,
    Png,
    Gif,
    Tiff,
}

impl OutputFormat {
    /// Resolve the output format from a destination path.
    ///
    /// A missing extension defaults to PNG. An extension outside the
    /// supported set is a hard configuration error.
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let Some(ext) = path.extension().and_then(|e| e.to_str()) else {
            return Ok(Self::Png);
        };
        match ext.to_ascii_lowercase().as_str() {
            "bmp" => Ok(Self::Bmp),
            "jpg" | "jpeg" => Ok(Self::Jpeg),
            "png" => Ok(Self::Png),
            "gif" => Ok(Self::Gif),
            "tif" | "tiff" => Ok(Self::Tiff),
            other => Err(ConfigError::UnsupportedFormat {
                path: path.display().to_string(),
                extension: other.to_string(),
            }),
        }
    }

    /// The `image` crate format this variant encodes with.
    pub fn image_format(self) -> image::ImageFormat {
        match self {
            Self::Bmp => image::ImageFormat::Bmp,
            Self::Jpeg => image::ImageFormat::Jpeg,
            Self::Png => image::ImageFormat::Png,
            Self::Gif => image::ImageFormat::Gif,
            Self::Tiff => image::ImageFormat::Tiff,
        }
    }
}
