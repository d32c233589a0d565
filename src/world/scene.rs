use crate::world::geometry::{Line, Model};
use crate::world::texture::{Texture, TextureBank, TextureError, TextureId};
use crate::world::trace::LineCache;

/// Every model of the session plus the textures they use.
///
/// Models are built once during setup and outlive every per-frame
/// [`LineCache`] borrowed from the scene.
#[derive(Default)]
pub struct Scene {
    bank: TextureBank,
    models: Vec<Model>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn bank(&self) -> &TextureBank {
        &self.bank
    }

    /// Register a texture under `name`.
    pub fn add_texture<S: Into<String>>(
        &mut self,
        name: S,
        tex: Texture,
    ) -> Result<TextureId, TextureError> {
        self.bank.insert(name, tex)
    }

    /// Resolve a texture id, falling back to the missing texture.
    #[inline]
    pub fn texture(&self, id: TextureId) -> &Texture {
        self.bank.texture_or_missing(id)
    }

    pub fn add(&mut self, model: Model) {
        self.models.push(model);
    }

    #[inline]
    pub fn models(&self) -> &[Model] {
        &self.models
    }

    #[inline]
    pub fn models_mut(&mut self) -> &mut [Model] {
        &mut self.models
    }

    /// Flatten every model into world-space lines.
    ///
    /// Vertices are offset by the model position only; the model's rotation
    /// is not applied.
    pub fn lines(&self) -> Vec<Line<'_>> {
        let mut lines = Vec::with_capacity(self.models.iter().map(Model::wall_count).sum());
        for model in &self.models {
            let texture = self.texture(model.texture());
            let origin = model.object.position;
            lines.extend(model.walls().map(|(va, vb)| Line {
                a: va.pos + origin,
                b: vb.pos + origin,
                u0: va.u,
                u1: vb.u,
                texture,
            }));
        }
        lines
    }

    /// Fresh per-frame cache of [`Scene::lines`].
    pub fn line_cache(&self, block_size: f32) -> LineCache<'_> {
        LineCache::new(self.lines(), block_size)
    }
}
