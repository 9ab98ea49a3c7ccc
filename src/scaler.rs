//! Stretches the internal framebuffer to the window surface with a
//! precomputed bilinear lookup table. Rows are independent, so the blit
//! runs them in parallel.

use rayon::iter::{IndexedParallelIterator, ParallelIterator};
use rayon::slice::ParallelSliceMut;

/// Per-axis mapping from a destination coordinate to its two source
/// neighbors and an 8.8 fixed-point blend weight.
struct AxisLut {
    lo: Vec<usize>,
    hi: Vec<usize>,
    frac: Vec<u16>,
}

impl AxisLut {
    fn build(dst: usize, src: usize) -> Self {
        let ratio = src as f32 / dst as f32;
        let mut lo = vec![0; dst];
        let mut hi = vec![0; dst];
        let mut frac = vec![0; dst];
        for d in 0..dst {
            let s = d as f32 * ratio;
            let a = s.floor() as usize;
            lo[d] = a.min(src - 1);
            hi[d] = (a + 1).min(src - 1);
            frac[d] = ((s - a as f32) * 256.0).round() as u16;
        }
        Self { lo, hi, frac }
    }
}

pub struct ScaleLut {
    x: AxisLut,
    y: AxisLut,
}

impl ScaleLut {
    pub fn empty() -> Self {
        Self {
            x: AxisLut {
                lo: Vec::new(),
                hi: Vec::new(),
                frac: Vec::new(),
            },
            y: AxisLut {
                lo: Vec::new(),
                hi: Vec::new(),
                frac: Vec::new(),
            },
        }
    }

    pub fn build(dst_w: usize, dst_h: usize, src_w: usize, src_h: usize) -> Self {
        if dst_w == 0 || dst_h == 0 || src_w == 0 || src_h == 0 {
            return Self::empty();
        }
        Self {
            x: AxisLut::build(dst_w, src_w),
            y: AxisLut::build(dst_h, src_h),
        }
    }

    pub fn dst_width(&self) -> usize {
        self.x.lo.len()
    }

    pub fn dst_height(&self) -> usize {
        self.y.lo.len()
    }
}

/// Blend two packed colors; weight is 8.8 fixed point in `[0, 256]`.
#[inline]
fn lerp_color(a: u32, b: u32, w: u32) -> u32 {
    let inv = 256 - w;
    let rb = ((a & 0x00FF00FF) * inv + (b & 0x00FF00FF) * w) >> 8 & 0x00FF00FF;
    let g = ((a & 0x0000FF00) * inv + (b & 0x0000FF00) * w) >> 8 & 0x0000FF00;
    rb | g
}

/// Bilinear stretch of `src` into `dst`, one destination row per rayon
/// task for cache-friendly writes.
pub fn blit_stretched(dst: &mut [u32], dst_w: usize, src: &[u32], src_w: usize, lut: &ScaleLut) {
    if lut.dst_width() != dst_w || dst.len() < dst_w * lut.dst_height() {
        return;
    }
    dst.par_chunks_mut(dst_w)
        .enumerate()
        .take(lut.dst_height())
        .for_each(|(dy, row)| {
            let row0 = lut.y.lo[dy] * src_w;
            let row1 = lut.y.hi[dy] * src_w;
            let wy = lut.y.frac[dy] as u32;

            for (dx, out) in row.iter_mut().enumerate() {
                let x0 = lut.x.lo[dx];
                let x1 = lut.x.hi[dx];
                let wx = lut.x.frac[dx] as u32;

                let top = lerp_color(src[row0 + x0], src[row0 + x1], wx);
                let bot = lerp_color(src[row1 + x0], src[row1 + x1], wx);
                *out = lerp_color(top, bot, wy);
            }
        });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lut_covers_destination_and_stays_in_source() {
        let lut = ScaleLut::build(800, 600, 640, 480);
        assert_eq!(lut.dst_width(), 800);
        assert_eq!(lut.dst_height(), 600);
        assert!(lut.x.lo.iter().all(|&v| v < 640));
        assert!(lut.x.hi.iter().all(|&v| v < 640));
        assert!(lut.y.hi.iter().all(|&v| v < 480));
    }

    #[test]
    fn uniform_source_blits_uniform() {
        let src = vec![0x00112233u32; 4 * 4];
        let mut dst = vec![0u32; 8 * 8];
        let lut = ScaleLut::build(8, 8, 4, 4);
        blit_stretched(&mut dst, 8, &src, 4, &lut);
        assert!(dst.iter().all(|&c| c == 0x00112233));
    }

    #[test]
    fn identity_scale_preserves_pixels() {
        let src: Vec<u32> = (0..16).map(|i| i * 0x010101).collect();
        let mut dst = vec![0u32; 16];
        let lut = ScaleLut::build(4, 4, 4, 4);
        blit_stretched(&mut dst, 4, &src, 4, &lut);
        assert_eq!(dst, src);
    }

    #[test]
    fn mismatched_lut_is_a_no_op() {
        let src = vec![0xFFu32; 4];
        let mut dst = vec![0u32; 4];
        let lut = ScaleLut::build(4, 4, 2, 2);
        blit_stretched(&mut dst, 2, &src, 2, &lut);
        assert!(dst.iter().all(|&c| c == 0));
    }
}
