use glam::Vec3;

use super::{Rgba, Surface, pack_rgb};

/// CPU frame-buffer in 0x00RRGGBB, row-major.
#[derive(Default)]
pub struct Framebuffer {
    scratch: Vec<Rgba>,
    width: usize,
    height: usize,
    /// Last text handed to `draw_text`; hosts show it however they can.
    status: String,
}

impl Framebuffer {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            scratch: vec![0; width * height],
            width,
            height,
            status: String::new(),
        }
    }

    /// (Re)allocate for a new resolution; contents are zeroed on change.
    pub fn resize(&mut self, width: usize, height: usize) {
        if width != self.width || height != self.height {
            self.width = width;
            self.height = height;
            self.scratch.clear();
            self.scratch.resize(width * height, 0);
        }
    }

    #[inline]
    pub fn pixel(&self, x: usize, y: usize) -> Option<Rgba> {
        if x < self.width && y < self.height {
            Some(self.scratch[y * self.width + x])
        } else {
            None
        }
    }

    #[inline]
    pub fn as_slice(&self) -> &[Rgba] {
        &self.scratch
    }

    #[inline]
    pub fn status(&self) -> &str {
        &self.status
    }

    /// Finish the frame and **loan** the finished buffer to `submit`.
    pub fn end_frame<F, R>(&self, submit: F) -> R
    where
        F: FnOnce(&[Rgba], usize, usize) -> R,
    {
        submit(&self.scratch, self.width, self.height)
    }
}

impl Surface for Framebuffer {
    #[inline]
    fn width(&self) -> usize {
        self.width
    }

    #[inline]
    fn height(&self) -> usize {
        self.height
    }

    #[inline]
    fn set_pixel(&mut self, x: i32, y: i32, color: Vec3) {
        if (0..self.width as i32).contains(&x) && (0..self.height as i32).contains(&y) {
            self.scratch[y as usize * self.width + x as usize] = pack_rgb(color);
        }
    }

    fn clear(&mut self, color: Vec3) {
        self.scratch.fill(pack_rgb(color));
    }

    fn draw_text(&mut self, text: &str, _x: i32, _y: i32, _color: Vec3) {
        self.status.clear();
        self.status.push_str(text);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn out_of_bounds_writes_are_dropped() {
        let mut fb = Framebuffer::new(4, 3);
        fb.clear(Vec3::ZERO);
        for (x, y) in [(-1, 0), (0, -1), (4, 0), (0, 3), (i32::MAX, i32::MIN)] {
            fb.set_pixel(x, y, Vec3::ONE);
        }
        assert!(fb.as_slice().iter().all(|&p| p == 0));
        fb.set_pixel(3, 2, Vec3::ONE);
        assert_eq!(fb.pixel(3, 2), Some(0x00_FF_FF_FF));
        assert_eq!(fb.pixel(4, 2), None);
    }

    #[test]
    fn clear_fills_every_pixel() {
        let mut fb = Framebuffer::new(5, 5);
        fb.clear(Vec3::new(0.0, 0.0, 1.0));
        assert!(fb.as_slice().iter().all(|&p| p == 0x00_00_00_FF));
    }

    #[test]
    fn end_frame_loans_buffer() {
        let mut fb = Framebuffer::default();
        fb.resize(8, 2);
        let (len, w, h) = fb.end_frame(|buf, w, h| (buf.len(), w, h));
        assert_eq!((len, w, h), (16, 8, 2));
    }

    #[test]
    fn draw_text_keeps_last_status() {
        let mut fb = Framebuffer::new(1, 1);
        fb.draw_text("x: 1", 0, 0, Vec3::ONE);
        fb.draw_text("x: 2", 0, 0, Vec3::ONE);
        assert_eq!(fb.status(), "x: 2");
    }
}
