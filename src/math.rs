//! Planar helpers on top of `glam::Vec3`.
//!
//! The renderer works in the X–Y plane; `z` rides along untouched.  The same
//! type doubles as an RGB colour (`x = r`, `y = g`, `z = b`).

use glam::Vec3;

/// XY-plane operations glam does not ship.
pub trait Planar {
    /// Unit heading vector `(cos a, sin a, 0)`.
    fn from_angle(angle: f32) -> Self;

    /// Rotate around the Z axis (counter-clockwise for positive `angle`).
    fn rotate_z(self, angle: f32) -> Self;

    /// Heading of the XY part, `atan2(y, x)`.
    fn angle_z(self) -> f32;

    /// Left-hand perpendicular in XY: `(x, y) -> (-y, x)`.
    fn perp(self) -> Self;
}

impl Planar for Vec3 {
    #[inline]
    fn from_angle(angle: f32) -> Self {
        let (s, c) = angle.sin_cos();
        Vec3::new(c, s, 0.0)
    }

    #[inline]
    fn rotate_z(self, angle: f32) -> Self {
        let (s, c) = angle.sin_cos();
        Vec3::new(self.x * c - self.y * s, self.x * s + self.y * c, self.z)
    }

    #[inline]
    fn angle_z(self) -> f32 {
        self.y.atan2(self.x)
    }

    #[inline]
    fn perp(self) -> Self {
        Vec3::new(-self.y, self.x, 0.0)
    }
}

/// `a + (b - a) * t`; yields `a` exactly when both ends are equal.
#[inline]
pub fn mix(a: Vec3, b: Vec3, t: f32) -> Vec3 {
    a + (b - a) * t
}

/*====================================================================*/
/*                                Tests                                */
/*====================================================================*/
