//! Decode/encode boundary over the `image` crate.
//!
//! | Operation | Crate / function |
//! |---|---|
//! | Decode (BMP, GIF, JPEG, PNG, TIFF, WebP) | `image::ImageReader` with format guessing |
//! | Encode → JPEG | `JpegEncoder::new_with_quality` at quality 100 |
//! | Encode → GIF | RGBA conversion + `save_with_format` (the gif encoder has no Luma8 path) |
//! | Encode → BMP/PNG/TIFF | `save_with_format` on the Luma8 buffer |
//!
//! Every error carries the offending file path. A failed run writes no
//! partial output — encoding either completes or the destination is left
//! to whatever `File::create` produced before the failure surfaced.

use crate::config::OutputFormat;
use image::codecs::jpeg::JpegEncoder;
use image::{DynamicImage, GrayImage, ImageEncoder, ImageFormat, ImageReader, RgbaImage};
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CodecError {
    #[error("IO error for {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("failed to decode {path}: {source}")]
    Decode {
        path: String,
        source: image::ImageError,
    },
    #[error("failed to encode {path}: {source}")]
    Encode {
        path: String,
        source: image::ImageError,
    },
}

fn io_error(path: &Path, source: std::io::Error) -> CodecError {
    CodecError::Io {
        path: path.display().to_string(),
        source,
    }
}

/// Load and decode the input image, reporting the detected format.
///
/// The format is guessed from the file content, not the extension, so a
/// mislabeled file still decodes.
pub fn decode(path: &Path) -> Result<(DynamicImage, Option<ImageFormat>), CodecError> {
    let reader = ImageReader::open(path)
        .map_err(|e| io_error(path, e))?
        .with_guessed_format()
        .map_err(|e| io_error(path, e))?;
    let format = reader.format();
    let img = reader.decode().map_err(|e| CodecError::Decode {
        path: path.display().to_string(),
        source: e,
    })?;
    Ok((img, format))
}

/// Encode the heightmap to `path` in the already-resolved format.
pub fn encode(img: &GrayImage, path: &Path, format: OutputFormat) -> Result<(), CodecError> {
    let encode_error = |e| CodecError::Encode {
        path: path.display().to_string(),
        source: e,
    };
    match format {
        OutputFormat::Jpeg => {
            let file = File::create(path).map_err(|e| io_error(path, e))?;
            let writer = BufWriter::new(file);
            JpegEncoder::new_with_quality(writer, 100)
                .write_image(
                    img.as_raw(),
                    img.width(),
                    img.height(),
                    image::ExtendedColorType::L8,
                )
                .map_err(encode_error)
        }
        OutputFormat::Gif => {
            let rgba = DynamicImage::ImageLuma8(img.clone()).to_rgba8();
            rgba.save_with_format(path, ImageFormat::Gif)
                .map_err(encode_error)
        }
        other => img
            .save_with_format(path, other.image_format())
            .map_err(encode_error),
    }
}

/// Write an RGBA image as PNG — used for the histogram chart, which is
/// always PNG regardless of the heightmap's output format.
pub fn encode_png(img: &RgbaImage, path: &Path) -> Result<(), CodecError> {
    img.save_with_format(path, ImageFormat::Png)
        .map_err(|e| CodecError::Encode {
            path: path.display().to_string(),
            source: e,
        })
}
