//! Drawing primitives over the internal `u32` framebuffer: rectangle
//! fills, lines, and color packing/shading. Everything clips against the
//! framebuffer edges so callers can pass unclamped geometry.

pub struct Frame<'a> {
    pub buf: &'a mut [u32],
    pub width: usize,
    pub height: usize,
}

/// BGRA8 in little-endian memory, alpha left at 0.
#[inline]
pub fn pack_rgb(r: u8, g: u8, b: u8) -> u32 {
    (b as u32) | ((g as u32) << 8) | ((r as u32) << 16)
}

/// Multiplies each channel by `factor` in `[0, 1]`.
#[inline]
pub fn shade_color(color: u32, factor: f32) -> u32 {
    let f = (factor.clamp(0.0, 1.0) * 256.0) as u32;
    let rb = ((color & 0x00FF00FF) * f) >> 8 & 0x00FF00FF;
    let g = ((color & 0x0000FF00) * f) >> 8 & 0x0000FF00;
    rb | g
}

impl<'a> Frame<'a> {
    pub fn new(buf: &'a mut [u32], width: usize, height: usize) -> Self {
        debug_assert_eq!(buf.len(), width * height);
        Self { buf, width, height }
    }

    #[inline]
    pub fn put_pixel(&mut self, x: i32, y: i32, color: u32) {
        if x < 0 || y < 0 || x as usize >= self.width || y as usize >= self.height {
            return;
        }
        self.buf[y as usize * self.width + x as usize] = color;
    }

    pub fn fill_rect(&mut self, x: i32, y: i32, w: i32, h: i32, color: u32) {
        let x0 = x.max(0) as usize;
        let y0 = y.max(0) as usize;
        let x1 = ((x + w).max(0) as usize).min(self.width);
        let y1 = ((y + h).max(0) as usize).min(self.height);
        for row in y0..y1 {
            let base = row * self.width;
            self.buf[base + x0..base + x1].fill(color);
        }
    }

    /// Unit-step line walk; fine for the short minimap segments this is
    /// used for.
    pub fn draw_line(&mut self, x0: f32, y0: f32, x1: f32, y1: f32, color: u32) {
        let dx = x1 - x0;
        let dy = y1 - y0;
        let len = dx.hypot(dy);
        if len < 1.0 {
            self.put_pixel(x0 as i32, y0 as i32, color);
            return;
        }
        let steps = len.ceil() as i32;
        let sx = dx / steps as f32;
        let sy = dy / steps as f32;
        let mut x = x0;
        let mut y = y0;
        for _ in 0..=steps {
            self.put_pixel(x as i32, y as i32, color);
            x += sx;
            y += sy;
        }
    }
}
