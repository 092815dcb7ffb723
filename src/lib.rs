//! # Reliefmap
//!
//! Turns a color photograph into a stylized grayscale heightmap: an ordered
//! chain of optional filters ending in a grayscale reduction, with an
//! optional histogram image of the result.
//!
//! # Architecture: One Buffer Through a Fixed Stage Order
//!
//! The pipeline owns a single evolving image buffer and hands it through a
//! fixed sequence of stages, each skipped when its parameter sits at the
//! neutral value:
//!
//! ```text
//! decode → emboss → contrast → invert → box blur → gaussian blur
//!        → grayscale → threshold/blend → encode (+ histogram)
//! ```
//!
//! Every stage consumes the previous buffer and produces a new one — no
//! stage ever observes a half-written successor, and nothing reads ambient
//! global state. All tuning arrives once, up front, as an immutable
//! [`config::PipelineConfig`].
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`config`] | Immutable pipeline parameters + output format resolution from the destination extension |
//! | [`filters`] | The algorithmic core: emboss kernel synthesis, convolution, thresholding, opacity blending |
//! | [`pipeline`] | Stage ordering — applies the filters in their fixed sequence |
//! | [`codec`] | Decode/encode boundary over the `image` crate |
//! | [`histogram`] | Intensity-distribution bar chart of the final heightmap |
//!
//! # Design Decisions
//!
//! ## Closed Enums Over Strings
//!
//! Stage selection (`--emboss low`, output format from the file extension)
//! is parsed once into enums — [`filters::kernel::EmbossLevel`] and
//! [`config::OutputFormat`] — so every later `match` is exhaustive. A typo
//! in a flag fails at argument parsing instead of silently disabling a
//! stage, and an unsupported output extension fails before any decoding
//! work happens.
//!
//! ## Kernels By Construction
//!
//! The three emboss kernels (3×3, 5×5, 7×7) follow a single closed-form
//! weight rule rather than hand-copied tables; the rule is stated and
//! tested in [`filters::kernel`]. Box blur reuses the same convolution
//! engine with a uniform mean kernel instead of carrying a second blur
//! implementation.
//!
//! ## Library Primitives Stay Library Primitives
//!
//! Contrast, inversion, Gaussian blur, grayscale reduction, and all codecs
//! come from the `image` crate. Only the pieces with behavior of their
//! own — kernel synthesis, convolution, thresholding, blending — live in
//! this crate.

pub mod codec;
pub mod config;
pub mod filters;
pub mod histogram;
pub mod pipeline;
