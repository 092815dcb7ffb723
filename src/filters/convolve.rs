//! Neighborhood convolution over RGBA buffers.

use super::kernel::Kernel;
use image::{Rgba, RgbaImage};
use rayon::prelude::*;

/// Convolve `src` with `kernel`, producing a buffer of the same size.
///
/// Each output channel is the kernel-weighted sum of the corresponding
/// channel over the neighborhood, plus the kernel bias, clamped to u8.
/// Neighborhood coordinates outside the image are clamped to the nearest
/// edge pixel (replicate-edge — never wrapped). With `keep_alpha`, the
/// alpha channel is copied from the source pixel instead of convolved.
///
/// Pure function of its inputs; output rows are computed in parallel.
pub fn convolve(src: &RgbaImage, kernel: &Kernel, keep_alpha: bool) -> RgbaImage {
    let (width, height) = src.dimensions();
    let dim = kernel.dim() as i64;
    let half = dim / 2;
    let row_len = width as usize * 4;

    let mut out = vec![0u8; row_len * height as usize];
    out.par_chunks_exact_mut(row_len)
        .enumerate()
        .for_each(|(y, row)| {
            for x in 0..width as usize {
                let mut acc = [kernel.bias(); 4];
                for ky in 0..dim {
                    let sy = (y as i64 + ky - half).clamp(0, height as i64 - 1) as u32;
                    for kx in 0..dim {
                        let weight = kernel.weight(ky as usize, kx as usize);
                        if weight == 0.0 {
                            continue;
                        }
                        let sx = (x as i64 + kx - half).clamp(0, width as i64 - 1) as u32;
                        let Rgba(p) = *src.get_pixel(sx, sy);
                        for (a, &v) in acc.iter_mut().zip(&p) {
                            *a += weight * f32::from(v);
                        }
                    }
                }
                let px = &mut row[x * 4..x * 4 + 4];
                for (slot, a) in px.iter_mut().zip(acc) {
                    *slot = a.round().clamp(0.0, 255.0) as u8;
                }
                if keep_alpha {
                    px[3] = src.get_pixel(x as u32, y as u32).0[3];
                }
            }
        });

    // Length is row_len * height by construction.
    RgbaImage::from_raw(width, height, out).expect("output buffer sized to dimensions")
}
