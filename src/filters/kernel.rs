//! Convolution kernels for the emboss and box-blur stages.
//!
//! The emboss kernels approximate a directional second-derivative filter:
//! weights transition from −1 in the upper-left triangle through 0 on the
//! anti-diagonal to +1 in the lower-right triangle. Combined with a
//! neutral-gray bias, flat regions render as mid gray and edges as
//! raised/sunken relief. The weight rule is
//!
//! ```text
//! weight(i, j) = −1  if i + j < N − 1
//!                 0  if i + j = N − 1
//!                +1  if i + j > N − 1
//! ```
//!
//! for row `i`, column `j`, kernel dimension `N`. Generating the matrices
//! from this rule keeps the three intensity levels correct by construction
//! instead of relying on hand-copied tables.

use clap::ValueEnum;
use std::cmp::Ordering;

/// Bias added after the emboss convolution so a zero net edge response
/// renders as neutral gray rather than black.
const EMBOSS_BIAS: f32 = 128.0;

/// Emboss intensity.
///
/// Larger levels sample a wider neighborhood and produce a more
/// pronounced, softer depth effect. `None` is a valid configuration — the
/// emboss stage is simply skipped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum EmbossLevel {
    /// Emboss disabled.
    None,
    /// 3×3 kernel.
    Low,
    /// 5×5 kernel.
    Mid,
    /// 7×7 kernel.
    High,
}

impl EmbossLevel {
    /// The fixed kernel for this level, or `None` when embossing is
    /// disabled.
    pub fn kernel(self) -> Option<Kernel> {
        let dim = match self {
            Self::None => return None,
            Self::Low => 3,
            Self::Mid => 5,
            Self::High => 7,
        };
        Some(Kernel::emboss(dim))
    }
}

/// An immutable square convolution matrix with odd dimension, paired with
/// the scalar bias added to each channel after the weighted sum.
///
/// The boundary policy (clamp at the image edge, never wrap) belongs to
/// the convolver, not the kernel.
#[derive(Debug, Clone, PartialEq)]
pub struct Kernel {
    weights: Vec<f32>,
    dim: usize,
    bias: f32,
}

impl Kernel {
    /// Construct a kernel from row-major weights.
    ///
    /// # Panics
    ///
    /// If `dim` is zero or even, or `weights.len() != dim * dim`.
    pub fn new(weights: Vec<f32>, dim: usize, bias: f32) -> Self {
        assert!(dim % 2 == 1, "kernel dimension must be odd, got {dim}");
        assert_eq!(
            weights.len(),
            dim * dim,
            "kernel weights must be {dim}x{dim}"
        );
        Self { weights, dim, bias }
    }

    /// The emboss kernel of the given odd dimension, built from the
    /// closed-form weight rule in the module docs.
    fn emboss(dim: usize) -> Self {
        let mut weights = Vec::with_capacity(dim * dim);
        for i in 0..dim {
            for j in 0..dim {
                weights.push(match (i + j).cmp(&(dim - 1)) {
                    Ordering::Less => -1.0,
                    Ordering::Equal => 0.0,
                    Ordering::Greater => 1.0,
                });
            }
        }
        Self::new(weights, dim, EMBOSS_BIAS)
    }

    /// A uniform mean kernel covering the given radius — box blur expressed
    /// as a convolution. The dimension is `2·⌈radius⌉ + 1`, so fractional
    /// radii round up to the next full neighborhood.
    pub fn box_mean(radius: f32) -> Self {
        let dim = 2 * (radius.ceil() as usize) + 1;
        let weight = 1.0 / (dim * dim) as f32;
        Self::new(vec![weight; dim * dim], dim, 0.0)
    }

    /// Kernel dimension (always odd).
    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Bias added after convolution.
    pub fn bias(&self) -> f32 {
        self.bias
    }

    /// Weight at row `i`, column `j`.
    #[inline]
    pub fn weight(&self, i: usize, j: usize) -> f32 {
        self.weights[i * self.dim + j]
    }
}
