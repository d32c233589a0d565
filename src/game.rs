//! Host-facing hooks and the demo raycaster built on them.
//!
//! The host calls [`Game::setup`] once, [`Game::update`] at a fixed rate and
//! [`Game::draw`] whenever at least one update ran.

use glam::Vec3;

use crate::{
    config::{ConfigError, Settings},
    renderer::{Software, Surface, overlay, software::Planes},
    sim::{Controls, update_viewer},
    world::{Model, NO_TEXTURE, Scene, TextureError, TextureId, Viewer, patterns},
};

pub trait Game {
    /// Build the scene; runs once before the first update.
    fn setup(&mut self) -> Result<(), TextureError>;

    /// One fixed-length simulation step of `dt` seconds.
    fn update(&mut self, controls: &dyn Controls, dt: f32);

    /// Render the current state.
    fn draw(&mut self, surface: &mut dyn Surface);
}

/// Number of pillars ringed around the middle of the demo room.
const PILLARS: u32 = 12;

pub struct RaycastGame {
    pub settings: Settings,
    pub scene: Scene,
    pub viewer: Viewer,
    floor: TextureId,
    ceiling: TextureId,
    renderer: Software,
}

impl RaycastGame {
    /// Fails if `settings` does not pass [`Settings::validate`].
    pub fn new(settings: Settings) -> Result<Self, ConfigError> {
        settings.validate()?;
        let viewer = Viewer::new(Vec3::new(8.0, 8.0, 0.0), 0.0, settings.fov());
        Ok(Self {
            settings,
            scene: Scene::new(),
            viewer,
            floor: NO_TEXTURE,
            ceiling: NO_TEXTURE,
            renderer: Software::default(),
        })
    }

    /// Use already registered textures for the floor and ceiling planes.
    pub fn set_planes(&mut self, floor: TextureId, ceiling: TextureId) {
        self.floor = floor;
        self.ceiling = ceiling;
    }

    /// Text of the position readout.
    pub fn status(&self) -> String {
        let p = self.viewer.position() / self.settings.block_size;
        format!(
            "x: {:.2} y: {:.2} heading: {:.0} fov: {:.0}",
            p.x,
            p.y,
            self.viewer.rotation().to_degrees(),
            self.viewer.fov.to_degrees()
        )
    }
}

impl Game for RaycastGame {
    fn setup(&mut self) -> Result<(), TextureError> {
        let scene = &mut self.scene;
        let floor = patterns::checker(2, 8, [90, 90, 90], [60, 60, 70]);
        let ceiling = patterns::checker(4, 4, [170, 170, 150], [140, 140, 125]);
        let bricks = patterns::bricks(32, 32, [160, 60, 40], [190, 185, 170]);
        let pillar = patterns::stripes(16, 16, 4, [210, 200, 170], [120, 110, 90]);

        let floor = scene.add_texture("FLOOR", floor)?;
        let ceiling = scene.add_texture("CEILING", ceiling)?;
        let bricks = scene.add_texture("BRICKS", bricks)?;
        let pillar = scene.add_texture("PILLAR", pillar)?;
        self.set_planes(floor, ceiling);

        self.scene.add(Model::block(0.0, 0.0, 6.0, 6.0).with_texture(bricks));

        let step = std::f32::consts::TAU / PILLARS as f32;
        for i in 0..PILLARS {
            let (s, c) = (step * i as f32).sin_cos();
            self.scene
                .add(Model::pillar(c * 2.0 + 3.0, s * 2.0 + 3.0, 0.15).with_texture(pillar));
        }

        log::info!(
            "scene ready: {} models, {} textures",
            self.scene.models().len(),
            self.scene.bank().len()
        );
        Ok(())
    }

    fn update(&mut self, controls: &dyn Controls, dt: f32) {
        let lines = self.scene.line_cache(self.settings.block_size);
        if update_viewer(&mut self.viewer, controls, &lines, dt, &self.settings) {
            log::trace!("move blocked at {:?}", self.viewer.position());
        }
    }

    fn draw(&mut self, surface: &mut dyn Surface) {
        surface.clear(self.settings.background());

        let lines = self.scene.line_cache(self.settings.block_size);
        let planes = Planes {
            floor: self.scene.texture(self.floor),
            ceiling: self.scene.texture(self.ceiling),
        };
        self.renderer
            .draw_frame(surface, &lines, &self.viewer, planes, &self.settings);

        if self.settings.show_map {
            overlay::draw_minimap(surface, &lines, &self.viewer, self.renderer.column_hits());
        }
        surface.draw_text(&self.status(), 0, 0, Vec3::ONE);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        renderer::Framebuffer,
        sim::{HeldKeys, SIM_FPS},
    };

    fn demo() -> RaycastGame {
        let mut game = RaycastGame::new(Settings::default()).unwrap();
        game.setup().unwrap();
        game
    }

    #[test]
    fn invalid_settings_are_rejected() {
        let settings = Settings {
            fov_min_deg: 90.0,
            fov_max_deg: 30.0,
            ..Settings::default()
        };
        assert!(matches!(
            RaycastGame::new(settings),
            Err(ConfigError::FovRange { .. })
        ));
    }

    #[test]
    fn setup_builds_block_and_pillars() {
        let game = demo();
        assert_eq!(game.scene.models().len(), 1 + PILLARS as usize);
        // 4 block walls + 12 sides per pillar
        assert_eq!(game.scene.lines().len(), 4 + 12 * PILLARS as usize);
    }

    #[test]
    fn start_position_is_clear_of_walls() {
        let game = demo();
        let lines = game.scene.line_cache(game.settings.block_size);
        assert!(!lines.circle_hits(game.viewer.position(), game.settings.collision_radius));
    }

    #[test]
    fn second_setup_fails_on_duplicate_texture() {
        let mut game = demo();
        assert!(matches!(game.setup(), Err(TextureError::Duplicate(_))));
    }

    #[test]
    fn holding_forward_never_leaves_the_room() {
        let mut game = demo();
        for _ in 0..SIM_FPS * 30 {
            game.update(&HeldKeys::MOVE_FORWARD, 1.0 / SIM_FPS as f32);
        }
        let p = game.viewer.position();
        let r = game.settings.collision_radius;
        assert!(p.x >= r && p.x <= 48.0 - r, "{p:?}");
        assert!(p.y >= r && p.y <= 48.0 - r, "{p:?}");
    }

    #[test]
    fn draw_fills_frame_and_status() {
        let mut game = demo();
        let mut fb = Framebuffer::new(80, 60);
        game.draw(&mut fb);
        assert!(fb.status().starts_with("x: 1.00 y: 1.00"));
        // inside a closed room every column hits a wall
        let background = 0;
        assert!((0..80).all(|x| fb.pixel(x, 30) != Some(background)));
    }

    #[test]
    fn minimap_draws_when_enabled() {
        let mut game = demo();
        game.settings.show_map = true;
        let mut fb = Framebuffer::new(80, 60);
        game.draw(&mut fb);
        // top-left corner of the room outline
        assert_eq!(fb.pixel(0, 0), Some(0x00_FF_FF_FF));
    }
}
