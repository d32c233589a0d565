use glam::Vec3;

use crate::math::Planar;
use crate::world::geometry::Object;

/// Player view-point in world space.
///
/// * Only **yaw** is simulated – there is no looking up or down.
/// * `fov` is the horizontal field of view in radians.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewer {
    pub object: Object,
    pub fov: f32,
}

impl Viewer {
    /// Create a viewer at `position`, facing `rotation`, with horizontal FoV `fov`.
    pub fn new(position: Vec3, rotation: f32, fov: f32) -> Self {
        Self {
            object: Object { position, rotation },
            fov,
        }
    }

    #[inline]
    pub fn position(&self) -> Vec3 {
        self.object.position
    }

    #[inline]
    pub fn rotation(&self) -> f32 {
        self.object.rotation
    }

    /*──────────────────────── derived vectors ───────────────────────*/

    /// Unit vector pointing where the viewer looks on the X-Y plane.
    #[inline]
    pub fn forward(&self) -> Vec3 {
        Vec3::from_angle(self.object.rotation)
    }

    /// `tan(fov / 2)`, the half-width of the projection plane at depth 1.
    #[inline]
    pub fn half_plane(&self) -> f32 {
        (self.fov * 0.5).tan()
    }

    /// Camera plane: perpendicular to `forward`, scaled by `tan(fov/2)`.
    #[inline]
    pub fn camera_plane(&self) -> Vec3 {
        Vec3::from_angle(self.object.rotation + std::f32::consts::FRAC_PI_2) * self.half_plane()
    }

    /// Direction of the ray through normalised screen offset `xf ∈ [-1, 1]`.
    ///
    /// Not unit length: its forward component is always 1, so the ray
    /// parameter of a hit is the hit's depth along the view axis.
    #[inline]
    pub fn ray_dir(&self, xf: f32) -> Vec3 {
        self.forward() + self.camera_plane() * xf
    }

    /*──────────────────────── movement helpers ──────────────────────*/

    /// Rotate around the Z axis (positive = counter-clockwise).
    pub fn turn(&mut self, delta: f32) {
        self.object.rotation = (self.object.rotation + delta).rem_euclid(std::f32::consts::TAU);
    }

    /// Widen (`delta > 0`) or narrow the field of view within `[min, max]`.
    pub fn zoom(&mut self, delta: f32, min: f32, max: f32) {
        self.fov = (self.fov + delta).max(min).min(max);
    }
}

/*====================================================================*/
/*                                Tests                                */
/*====================================================================*/
