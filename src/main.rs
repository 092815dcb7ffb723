use clap::Parser;
use reliefmap::config::{OutputFormat, PipelineConfig};
use reliefmap::filters::kernel::EmbossLevel;
use reliefmap::{codec, histogram, pipeline};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "reliefmap")]
#[command(about = "Turn a color photograph into a stylized grayscale heightmap")]
#[command(long_about = "\
Turn a color photograph into a stylized grayscale heightmap

The filters run in a fixed order, each skipped at its neutral value:

  emboss → contrast → invert → box blur → gaussian blur
         → grayscale → threshold/blend

Emboss runs first so the relief effect sees the original edges; the
blurs run last among the color edits to smooth noise before the
grayscale reduction. The threshold/blend pass posterizes the result to
black/white and mixes it back over the grayscale image, so --blend
dials in partial posterization instead of an all-or-nothing cut.

The output format follows the destination extension (PNG when absent).
With --hist, a histogram of the output's intensity distribution is
written as a second image.")]
#[command(version)]
struct Cli {
    /// Input image — supported formats: BMP, GIF, JPG, PNG, TIFF, WEBP
    #[arg(short, long)]
    input: PathBuf,

    /// Output image — format from the extension: BMP, GIF, JPG, PNG, TIFF
    #[arg(short, long, default_value = "output.png")]
    output: PathBuf,

    /// Emboss level
    #[arg(long, value_enum, default_value = "low")]
    emboss: EmbossLevel,

    /// Contrast adjustment, -100 to 100 (values <= 0 leave contrast untouched)
    #[arg(long, default_value_t = 0.0)]
    contrast: f32,

    /// Invert the colors of the image
    #[arg(long)]
    invert: bool,

    /// Box blur radius (0 disables)
    #[arg(long, default_value_t = 0.0)]
    blur: f32,

    /// Gaussian blur radius (0 disables)
    #[arg(long, default_value_t = 0.0)]
    gauss: f32,

    /// Monochrome threshold, 0 to 255 (0 disables the threshold pass)
    #[arg(long, default_value_t = 0)]
    mono: u8,

    /// Blend opacity for the threshold pass, 0.0 to 1.0
    #[arg(long, default_value_t = 0.5)]
    blend: f32,

    /// Write a histogram of the output image to this path (PNG)
    #[arg(long)]
    hist: Option<PathBuf>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Resolve the output format up front so a bad extension fails before
    // any decoding or processing work.
    let format = OutputFormat::from_path(&cli.output)?;
    let config = PipelineConfig {
        emboss: cli.emboss,
        contrast: cli.contrast,
        invert: cli.invert,
        box_blur: cli.blur,
        gaussian_blur: cli.gauss,
        mono_threshold: cli.mono,
        blend_opacity: cli.blend,
    };

    println!("==> Loading {}", cli.input.display());
    let (src, detected) = codec::decode(&cli.input)?;
    println!(
        "    {}x{}{}",
        src.width(),
        src.height(),
        detected.map_or(String::new(), |f| format!(" ({f:?})"))
    );

    println!("==> Processing");
    let dst = pipeline::render(src, &config)?;

    println!("==> Saving {}", cli.output.display());
    codec::encode(&dst, &cli.output, format)?;

    if let Some(hist_path) = &cli.hist {
        println!("==> Writing histogram {}", hist_path.display());
        let chart = histogram::render(&dst);
        codec::encode_png(&chart, hist_path)?;
    }

    println!("==> Done");
    Ok(())
}
