// Decoded RGB textures and the bank that owns them.
// Models refer to textures through `TextureId`; per-frame lines borrow the
// resolved `&Texture` straight out of the bank.

use std::collections::HashMap;

use glam::Vec3;

use crate::math::mix;

/// Runtime handle for a texture in a [`TextureBank`].
///
/// *Guaranteed* to remain stable for the lifetime of the bank.
pub type TextureId = u16;

/// `TextureId` of the empty texture that samples as magenta.
/// Always = 0 because `TextureBank::new()` inserts it first.
pub const NO_TEXTURE: TextureId = 0;

/// Colour returned by every lookup into an empty texture.
pub const MISSING_COLOR: Vec3 = Vec3::new(1.0, 0.0, 1.0);

/// CPU-side storage: 8-bit **RGB** triples in row-major order.
///
/// A texture with zero width or height is valid; it stands for a texture
/// that failed to load and samples as [`MISSING_COLOR`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Texture {
    w: usize,
    h: usize,
    pixels: Vec<u8>,
}

/// Things that can go wrong when building textures or using the bank.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum TextureError {
    /// Pixel buffer does not hold exactly `w * h` RGB triples.
    #[error("texture {w}x{h} needs {expected} bytes, got {actual}")]
    BadSize {
        w: usize,
        h: usize,
        expected: usize,
        actual: usize,
    },

    /// Attempted to insert a second texture with an existing name.
    #[error("texture name `{0}` already present in bank")]
    Duplicate(String),

    /// Requested ID is outside `0 .. bank.len()`.
    #[error("texture id {0} out of range")]
    BadId(TextureId),

    /// Every `TextureId` is already taken.
    #[error("texture bank is full")]
    Full,
}

impl Texture {
    /// Wrap an already decoded RGB grid.
    pub fn new(w: usize, h: usize, pixels: Vec<u8>) -> Result<Self, TextureError> {
        let expected = w * h * 3;
        if pixels.len() != expected {
            return Err(TextureError::BadSize {
                w,
                h,
                expected,
                actual: pixels.len(),
            });
        }
        Ok(Self { w, h, pixels })
    }

    /// The zero-sized texture.
    pub fn missing() -> Self {
        Self::default()
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.w
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.h
    }

    #[inline]
    pub fn is_missing(&self) -> bool {
        self.w == 0 || self.h == 0
    }

    /// Texel at integer coordinates, wrapping in both axes.
    #[inline]
    pub fn get(&self, x: i64, y: i64) -> Vec3 {
        if self.is_missing() {
            return MISSING_COLOR;
        }
        let x = x.rem_euclid(self.w as i64) as usize;
        let y = y.rem_euclid(self.h as i64) as usize;
        let i = (x + y * self.w) * 3;
        Vec3::new(
            self.pixels[i] as f32 / 255.0,
            self.pixels[i + 1] as f32 / 255.0,
            self.pixels[i + 2] as f32 / 255.0,
        )
    }

    /// Bilinear sample at normalised `(u, v)`; tiles infinitely.
    #[inline]
    pub fn sample(&self, u: f32, v: f32) -> Vec3 {
        if self.is_missing() {
            return MISSING_COLOR;
        }
        let u = u * self.w as f32;
        let v = v * self.h as f32;

        let fx = u.floor();
        let fy = v.floor();
        // non-finite coordinates snap to the texel corner
        let frac = |f: f32| if f.is_finite() { f } else { 0.0 };
        let (ur, vr) = (frac(u - fx), frac(v - fy));
        // `as` saturates; wrap first so the +1 neighbour cannot overflow
        let x = (fx as i64).rem_euclid(self.w as i64);
        let y = (fy as i64).rem_euclid(self.h as i64);

        let top = mix(self.get(x, y), self.get(x + 1, y), ur);
        let bottom = mix(self.get(x, y + 1), self.get(x + 1, y + 1), ur);
        mix(top, bottom, vr)
    }
}

/// A registry of every texture used by a scene.
///
/// * Stores exactly one copy of every name.
/// * ID **0** is always the empty “missing” texture.
pub struct TextureBank {
    by_name: HashMap<String, TextureId>,
    data: Vec<Texture>,
}

impl Default for TextureBank {
    fn default() -> Self {
        Self::new()
    }
}

impl TextureBank {
    pub fn new() -> Self {
        let mut by_name = HashMap::new();
        by_name.insert("MISSING".into(), NO_TEXTURE);
        Self {
            by_name,
            data: vec![Texture::missing()],
        }
    }

    /// Number of textures stored (including the “missing” one).
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.len() == 1
    }

    /// Obtain the id for a texture by name.
    pub fn id(&self, name: &str) -> Option<TextureId> {
        self.by_name.get(name).copied()
    }

    /// Borrow a texture by id, with bounds-checking.
    pub fn texture(&self, id: TextureId) -> Result<&Texture, TextureError> {
        self.data.get(id as usize).ok_or(TextureError::BadId(id))
    }

    /// Fallback-safe borrow: unknown ids resolve to the missing texture.
    pub fn texture_or_missing(&self, id: TextureId) -> &Texture {
        self.texture(id).unwrap_or_else(|err| {
            log::warn!("{err}; using missing texture");
            &self.data[NO_TEXTURE as usize]
        })
    }

    /// Insert a texture under `name` and return its new id.
    pub fn insert<S: Into<String>>(
        &mut self,
        name: S,
        tex: Texture,
    ) -> Result<TextureId, TextureError> {
        let name = name.into();
        if self.by_name.contains_key(&name) {
            return Err(TextureError::Duplicate(name));
        }
        let id = TextureId::try_from(self.data.len()).map_err(|_| TextureError::Full)?;
        self.data.push(tex);
        self.by_name.insert(name, id);
        Ok(id)
    }
}

/*======================================================================*/
/*                               Tests                                  */
/*======================================================================*/
