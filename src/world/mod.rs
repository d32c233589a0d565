pub mod camera;
pub mod geometry;
pub mod patterns;
pub mod scene;
pub mod texture;
pub mod trace;

pub use camera::Viewer;

pub use geometry::{HitInfo, Line, Model, Object, PILLAR_SEGMENTS, Vertex};

pub use scene::Scene;

pub use texture::{MISSING_COLOR, NO_TEXTURE, Texture, TextureBank, TextureError, TextureId};

pub use trace::{LineCache, SegmentHit, closest_point_on_segment, ray_segment};
