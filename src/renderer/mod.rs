//! Rendering abstraction layer.
//!
//! *The renderer never touches a window directly.*
//! It writes through a [`Surface`]: anything that knows its size and can
//! store a colour per pixel.  [`Framebuffer`] is the in-memory one; tests
//! and the headless snapshot tool draw into it, the windowed host copies it
//! to the screen.

use glam::Vec3;

pub mod framebuffer;
pub mod overlay;
pub mod software;

pub use framebuffer::Framebuffer;
pub use software::Software;

/// Pixel format of the software frame-buffer (0x00RRGGBB).
pub type Rgba = u32;

/// Quantise a colour channel, clamping it into `0 ..= 255`.
#[inline]
pub fn channel(v: f32) -> u8 {
    (v * 255.0).clamp(0.0, 255.0) as u8
}

/// Pack a linear `[0, 1]` colour into 0x00RRGGBB.
#[inline]
pub fn pack_rgb(c: Vec3) -> Rgba {
    ((channel(c.x) as u32) << 16) | ((channel(c.y) as u32) << 8) | channel(c.z) as u32
}

/// Split 0x00RRGGBB back into bytes.
#[inline]
pub fn unpack_rgb(p: Rgba) -> [u8; 3] {
    [(p >> 16) as u8, (p >> 8) as u8, p as u8]
}

/// Drawing target of one frame.
pub trait Surface {
    fn width(&self) -> usize;
    fn height(&self) -> usize;

    /// Store `color` at `(x, y)`.  Out-of-range coordinates are ignored.
    fn set_pixel(&mut self, x: i32, y: i32, color: Vec3);

    /// Fill the whole surface with a flat colour.
    fn clear(&mut self, color: Vec3);

    /// Diagnostic text overlay; surfaces without a font ignore it.
    fn draw_text(&mut self, _text: &str, _x: i32, _y: i32, _color: Vec3) {}
}
