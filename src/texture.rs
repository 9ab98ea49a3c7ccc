//! CPU-side textures: decoded PNG pixels packed for the framebuffer, with
//! a procedural fallback so the binary runs without any asset files.

use std::path::Path;

use crate::surface::pack_rgb;

pub struct Texture {
    width: usize,
    height: usize,
    pixels: Vec<u32>,
}

impl Texture {
    pub fn from_png(path: &Path) -> anyhow::Result<Self> {
        let img = image::open(path)
            .map_err(|e| anyhow::anyhow!("loading texture {}: {e}", path.display()))?
            .to_rgba8();
        let (w, h) = img.dimensions();
        let pixels = img
            .pixels()
            .map(|p| pack_rgb(p.0[0], p.0[1], p.0[2]))
            .collect();
        Ok(Self {
            width: w as usize,
            height: h as usize,
            pixels,
        })
    }

    /// Procedural brick pattern used when no wall texture is on disk.
    pub fn bricks(width: usize, height: usize) -> Self {
        let brick = pack_rgb(158, 66, 52);
        let mortar = pack_rgb(180, 174, 166);
        let row_h = height / 8;
        let col_w = width / 4;
        let mut pixels = vec![0u32; width * height];
        for y in 0..height {
            let row = y / row_h.max(1);
            for x in 0..width {
                // Offset every other course by half a brick.
                let shifted = x + if row % 2 == 0 { 0 } else { col_w / 2 };
                let in_mortar = y % row_h.max(1) == 0 || shifted % col_w.max(1) == 0;
                pixels[y * width + x] = if in_mortar { mortar } else { brick };
            }
        }
        Self {
            width,
            height,
            pixels,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Samples at normalized coordinates; both axes wrap.
    #[inline]
    pub fn sample(&self, u: f32, v: f32) -> u32 {
        let x = ((u.rem_euclid(1.0)) * self.width as f32) as usize % self.width;
        let y = ((v.rem_euclid(1.0)) * self.height as f32) as usize % self.height;
        self.pixels[y * self.width + x]
    }

    #[inline]
    pub fn texel(&self, x: usize, y: usize) -> u32 {
        self.pixels[(y % self.height) * self.width + (x % self.width)]
    }
}
