//! Ray and circle queries against the per-frame segment soup.
//!
//! There is no spatial index: every query walks the whole list, which is
//! fine for the few dozen walls a scene holds.

use glam::Vec3;

use crate::math::Planar;
use crate::world::geometry::{HitInfo, Line};

/// Below this |denominator| a ray is treated as parallel to the segment.
const PARALLEL_EPS: f32 = 1e-9;

/// Raw result of [`ray_segment`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SegmentHit {
    pub position: Vec3,
    pub normal: Vec3,
    /// Ray parameter `t1`; equals the Euclidean distance when `d` is unit.
    pub t: f32,
    /// Segment parameter `t2` in `0 ..= 1`.
    pub u: f32,
}

/// Intersect the ray `o + t·d` (`t >= 0`) with segment `a → b` in XY.
///
/// `d` need not be normalised.  Parallel rays never hit.
pub fn ray_segment(o: Vec3, d: Vec3, a: Vec3, b: Vec3) -> Option<SegmentHit> {
    let v1 = o - a;
    let v2 = b - a;
    let v3 = d.perp();

    let d23 = v2.dot(v3);
    if d23.abs() < PARALLEL_EPS {
        return None;
    }
    let t1 = v2.cross(v1).z / d23;
    let t2 = v1.dot(v3) / d23;

    if t1 >= 0.0 && (0.0..=1.0).contains(&t2) {
        Some(SegmentHit {
            // taken from the segment so the point sits exactly on the wall
            position: Vec3::new(a.x + v2.x * t2, a.y + v2.y * t2, 0.0),
            normal: v2.perp(),
            t: t1,
            u: t2,
        })
    } else {
        None
    }
}

/// Point of segment `a → b` nearest to `p`.
pub fn closest_point_on_segment(p: Vec3, a: Vec3, b: Vec3) -> Vec3 {
    let ab = b - a;
    let len2 = ab.length_squared();
    if len2 == 0.0 {
        return a;
    }
    let t = ((p - a).dot(ab) / len2).clamp(0.0, 1.0);
    a + ab * t
}

/// World lines of one frame together with the map-to-world scale.
///
/// Lines are stored in map units; every query scales them by
/// `block_size` so that viewer positions and ray distances are in world
/// units.
pub struct LineCache<'a> {
    lines: Vec<Line<'a>>,
    block_size: f32,
}

impl<'a> LineCache<'a> {
    pub fn new(lines: Vec<Line<'a>>, block_size: f32) -> Self {
        Self { lines, block_size }
    }

    #[inline]
    pub fn lines(&self) -> &[Line<'a>] {
        &self.lines
    }

    #[inline]
    pub fn block_size(&self) -> f32 {
        self.block_size
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Nearest wall along `o + t·d`.  Ties keep the earlier line.
    pub fn nearest_hit(&self, o: Vec3, d: Vec3) -> Option<HitInfo<'_>> {
        let mut best: Option<HitInfo<'_>> = None;
        for line in &self.lines {
            let a = line.a * self.block_size;
            let b = line.b * self.block_size;
            let Some(hit) = ray_segment(o, d, a, b) else {
                continue;
            };
            if best.is_some_and(|prev| prev.distance <= hit.t) {
                continue;
            }
            best = Some(HitInfo {
                line,
                position: hit.position,
                normal: hit.normal,
                distance: hit.t,
                u: hit.u,
                length: (b - a).length() / self.block_size,
            });
        }
        best
    }

    /// True if any wall passes strictly within `radius` of `pos`.
    pub fn circle_hits(&self, pos: Vec3, radius: f32) -> bool {
        let pos = pos.truncate().extend(0.0);
        self.lines.iter().any(|line| {
            let a = line.a * self.block_size;
            let b = line.b * self.block_size;
            closest_point_on_segment(pos, a, b).distance(pos) < radius
        })
    }
}

/*====================================================================*/
/*                                Tests                                */
/*====================================================================*/
