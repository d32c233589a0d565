//! Procedural textures used by the demo map and the tests.
//!
//! Image decoding is not part of the engine; these stand in for the floor,
//! ceiling, brick and pillar images.

use super::texture::Texture;

type Rgb = [u8; 3];

fn from_fn(w: usize, h: usize, f: impl Fn(usize, usize) -> Rgb) -> Texture {
    let mut pixels = Vec::with_capacity(w * h * 3);
    for y in 0..h {
        for x in 0..w {
            pixels.extend_from_slice(&f(x, y));
        }
    }
    // length is w*h*3 by construction
    Texture::new(w, h, pixels).unwrap_or_default()
}

/// 1×1 texture of a single colour.
pub fn solid(c: Rgb) -> Texture {
    from_fn(1, 1, |_, _| c)
}

/// `cells`×`cells` checkerboard, `cell` pixels per square.
pub fn checker(cells: usize, cell: usize, a: Rgb, b: Rgb) -> Texture {
    let size = cells * cell;
    from_fn(size, size, |x, y| {
        if (x / cell + y / cell) % 2 == 0 { a } else { b }
    })
}

/// Running-bond brick wall: 4 courses, every other course offset by half a
/// brick, one-pixel mortar lines.
pub fn bricks(w: usize, h: usize, brick: Rgb, mortar: Rgb) -> Texture {
    let course = (h / 4).max(2);
    let brick_w = (w / 2).max(2);
    from_fn(w, h, |x, y| {
        let row = y / course;
        let shift = if row % 2 == 0 { 0 } else { brick_w / 2 };
        let bx = (x + shift) % brick_w;
        if y % course == 0 || bx == 0 {
            mortar
        } else {
            // slight per-brick shading so neighbours differ
            let k = ((x + shift) / brick_w + row) % 3;
            let shade = |c: u8| c.saturating_sub(k as u8 * 12);
            [shade(brick[0]), shade(brick[1]), shade(brick[2])]
        }
    })
}

/// Vertical stripes alternating `a`/`b`, `stripe` pixels wide.
pub fn stripes(w: usize, h: usize, stripe: usize, a: Rgb, b: Rgb) -> Texture {
    let stripe = stripe.max(1);
    from_fn(w, h, |x, _| if (x / stripe) % 2 == 0 { a } else { b })
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    #[test]
    fn solid_is_single_texel() {
        let t = solid([255, 0, 0]);
        assert_eq!((t.width(), t.height()), (1, 1));
        assert_eq!(t.get(0, 0), Vec3::X);
    }

    #[test]
    fn checker_alternates() {
        let t = checker(2, 4, [0, 0, 0], [255, 255, 255]);
        assert_eq!(t.width(), 8);
        assert_eq!(t.get(0, 0), Vec3::ZERO);
        assert_eq!(t.get(4, 0), Vec3::ONE);
        assert_eq!(t.get(4, 4), Vec3::ZERO);
    }

    #[test]
    fn bricks_have_mortar_rows() {
        let mortar = [200, 200, 200];
        let t = bricks(16, 16, [150, 40, 30], mortar);
        let m = Vec3::new(200.0, 200.0, 200.0) / 255.0;
        for x in 0..16 {
            assert_eq!(t.get(x, 0), m);
            assert_eq!(t.get(x, 4), m);
        }
    }
}
