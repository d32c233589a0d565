use glam::Vec3;

use crate::math::Planar;
use crate::world::texture::{NO_TEXTURE, Texture, TextureId};

/// Number of sides of the polygon a pillar is approximated by.
pub const PILLAR_SEGMENTS: u32 = 12;

/*------------------------- placeable objects ------------------------*/

/// Anything that can be placed in the world.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Object {
    pub position: Vec3,
    pub rotation: f32, // radians
}

/// Model-local vertex with its texture-U coordinate.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Vertex {
    pub pos: Vec3,
    pub u: f32,
}

/// Wall geometry built once at scene setup.
///
/// Every consecutive pair in `indices` is one wall segment in the model's
/// local frame.  Immutable after construction except for the texture.
///
/// `object.rotation` is stored but not applied when the model is placed in
/// the world: rotating a model currently has no visual effect.
#[derive(Clone, Debug)]
pub struct Model {
    pub object: Object,
    vertices: Vec<Vertex>,
    indices: Vec<u32>,
    texture: TextureId,
}

impl Model {
    pub fn new(position: Vec3) -> Self {
        Self {
            object: Object {
                position,
                rotation: 0.0,
            },
            vertices: Vec::new(),
            indices: Vec::new(),
            texture: NO_TEXTURE,
        }
    }

    /// Axis-aligned `w`×`h` rectangle with its corner at `(x, y)`.
    ///
    /// Walls are emitted bottom, right, top, left; U runs `0 ..= 2*len`
    /// along each so the texture repeats twice per map unit.
    pub fn block(x: f32, y: f32, w: f32, h: f32) -> Self {
        let mut m = Self::new(Vec3::new(x, y, 0.0));
        let (uw, uh) = (w * 2.0, h * 2.0);
        let corners = [
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(w, 0.0, 0.0),
            Vec3::new(w, h, 0.0),
            Vec3::new(0.0, h, 0.0),
        ];
        for (i, &len) in [uw, uh, uw, uh].iter().enumerate() {
            let base = m.vertices.len() as u32;
            m.add_vert(corners[i], 0.0);
            m.add_vert(corners[(i + 1) % 4], len);
            m.add_wall(base, base + 1);
        }
        m
    }

    /// Circle of `radius` around `(x, y)`, approximated by a
    /// [`PILLAR_SEGMENTS`]-gon.  U accumulates around the perimeter.
    pub fn pillar(x: f32, y: f32, radius: f32) -> Self {
        let mut m = Self::new(Vec3::new(x, y, 0.0));
        let step = std::f32::consts::TAU / PILLAR_SEGMENTS as f32;
        let u_step = std::f32::consts::TAU * radius / (PILLAR_SEGMENTS as f32 / 2.0);

        for i in 0..PILLAR_SEGMENTS {
            let a = step * i as f32;
            m.add_vert(Vec3::from_angle(a) * radius, u_step * i as f32);
        }
        for i in 0..PILLAR_SEGMENTS - 1 {
            m.add_wall(i, i + 1);
        }
        m.add_wall(PILLAR_SEGMENTS - 1, 0);
        m
    }

    #[inline]
    pub fn add_vert(&mut self, pos: Vec3, u: f32) {
        self.vertices.push(Vertex { pos, u });
    }

    #[inline]
    pub fn add_wall(&mut self, a: u32, b: u32) {
        self.indices.push(a);
        self.indices.push(b);
    }

    pub fn with_texture(mut self, texture: TextureId) -> Self {
        self.texture = texture;
        self
    }

    pub fn set_texture(&mut self, texture: TextureId) {
        self.texture = texture;
    }

    #[inline]
    pub fn texture(&self) -> TextureId {
        self.texture
    }

    #[inline]
    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    /// Number of wall segments.
    #[inline]
    pub fn wall_count(&self) -> usize {
        self.indices.len() / 2
    }

    /// Local-frame endpoint pairs, one per wall.  Pairs referencing a
    /// vertex that does not exist are skipped.
    pub fn walls(&self) -> impl Iterator<Item = (Vertex, Vertex)> + '_ {
        self.indices.chunks_exact(2).filter_map(|pair| {
            let a = self.vertices.get(pair[0] as usize)?;
            let b = self.vertices.get(pair[1] as usize)?;
            Some((*a, *b))
        })
    }
}

/*--------------------------- per-frame view -------------------------*/

/// World-space wall segment, rebuilt every frame from the models.
#[derive(Clone, Copy, Debug)]
pub struct Line<'a> {
    pub a: Vec3,
    pub b: Vec3,
    pub u0: f32,
    pub u1: f32,
    pub texture: &'a Texture,
}

impl Line<'_> {
    /// Texture U at segment parameter `t`.
    #[inline]
    pub fn uv(&self, t: f32) -> f32 {
        (1.0 - t) * self.u0 + self.u1 * t
    }
}

/// Nearest intersection of a ray with the line soup.
#[derive(Clone, Copy, Debug)]
pub struct HitInfo<'a> {
    pub line: &'a Line<'a>,
    pub position: Vec3,
    pub normal: Vec3,
    /// Ray parameter of the hit (in units of the ray direction).
    pub distance: f32,
    /// Parameter along the segment, `0 ..= 1`.
    pub u: f32,
    /// Segment length in map units.
    pub length: f32,
}

/*====================================================================*/
/*                                Tests                                */
/*====================================================================*/
