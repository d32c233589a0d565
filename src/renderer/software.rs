//! ---------------------------------------------------------------------------
//! Software column renderer
//!
//! * One ray per screen column against the frame's [`LineCache`].
//! * Each hit column is split into ceiling / wall / floor bands; the planes
//!   are back-projected onto the ground between the viewer and the hit.
//! * Everything is modulated by a linear distance fog.
//! ---------------------------------------------------------------------------

use glam::Vec3;

use crate::{
    config::Settings,
    math::mix,
    renderer::Surface,
    world::{HitInfo, LineCache, Texture, Viewer},
};

/// Hits closer than this are projected as if they were this far away.
const MIN_DEPTH: f32 = 1e-3;

/// Textures of the two horizontal planes.
#[derive(Clone, Copy)]
pub struct Planes<'a> {
    pub floor: &'a Texture,
    pub ceiling: &'a Texture,
}

/// Linear fog: 1 at distance 0, 0 at `max_depth` and beyond.
#[inline]
pub fn fog(distance: f32, max_depth: f32) -> f32 {
    (1.0 - distance / max_depth).clamp(0.0, 1.0)
}

/*───────────────────────────────────────────────────────────────────────*/
/*                              Backend                                 */
/*───────────────────────────────────────────────────────────────────────*/

#[derive(Default)]
pub struct Software {
    pub width: usize,
    pub height: usize,

    pub width_f: f32,
    pub height_f: f32,
    pub half_h: f32,
    pub tan_half: f32,

    /// World-space hit point of every column in the last frame.
    column_hits: Vec<Option<Vec3>>,
}

/// Screen-space split of one hit column.
#[derive(Clone, Copy, Debug)]
struct ColumnSpan {
    /// projected depth, `distance * tan(fov/2)`
    depth: f32,
    ceil: f32,
    floor: f32,
    wall_h: f32,
    fog: f32,
}

impl ColumnSpan {
    fn new(distance: f32, sw: &Software, max_depth: f32) -> Self {
        let depth = distance.max(MIN_DEPTH) * sw.tan_half;
        let ceil = sw.half_h - sw.height_f / depth;
        let floor = sw.height_f - ceil;
        Self {
            depth,
            ceil,
            floor,
            wall_h: floor - ceil,
            fog: fog(distance, max_depth),
        }
    }
}

impl Software {
    /// Cache per-frame constants for the surface size and viewer FoV.
    pub fn begin_frame(&mut self, w: usize, h: usize, viewer: &Viewer) {
        if w != self.width || h != self.height {
            self.width = w;
            self.height = h;
            self.width_f = w as f32;
            self.height_f = h as f32;
            self.half_h = self.height_f * 0.5;
        }
        self.tan_half = viewer.half_plane();
        self.column_hits.clear();
        self.column_hits.resize(w, None);
    }

    /// Hit points of the last rendered frame, one entry per column.
    #[inline]
    pub fn column_hits(&self) -> &[Option<Vec3>] {
        &self.column_hits
    }

    /// Render every column.  The surface is expected to be cleared already;
    /// columns without a hit in range keep the background.
    pub fn draw_frame<S: Surface + ?Sized>(
        &mut self,
        surface: &mut S,
        lines: &LineCache<'_>,
        viewer: &Viewer,
        planes: Planes<'_>,
        settings: &Settings,
    ) {
        self.begin_frame(surface.width(), surface.height(), viewer);

        for x in 0..self.width {
            let xf = (x as f32 / self.width_f) * 2.0 - 1.0;
            let dir = viewer.ray_dir(xf);

            let Some(hit) = lines.nearest_hit(viewer.position(), dir) else {
                continue;
            };
            if hit.distance > settings.max_depth {
                continue;
            }
            self.column_hits[x] = Some(hit.position);
            self.draw_column(surface, x as i32, &hit, viewer, planes, settings);
        }
    }

    /*──────────────────────── column rendering ───────────────────────────*/

    fn draw_column<S: Surface + ?Sized>(
        &self,
        surface: &mut S,
        x: i32,
        hit: &HitInfo<'_>,
        viewer: &Viewer,
        planes: Planes<'_>,
        settings: &Settings,
    ) {
        let span = ColumnSpan::new(hit.distance, self, settings.max_depth);
        let wall_tex = hit.line.texture;
        let wall_u = hit.line.uv(hit.u);
        let eye = viewer.position();

        // ground point between the eye and the wall foot for a plane row
        let ground = |row_depth: f32| {
            let we = row_depth / span.depth;
            let p = mix(eye, hit.position, we) * settings.plane_scale;
            (p, we)
        };
        let plane_fog = |dy: f32| (dy / settings.max_depth).clamp(0.0, 1.0);

        for y in 0..self.height {
            let yf = y as f32;

            let color = if yf <= span.ceil {
                let (p, _) = ground(self.height_f / (self.half_h - yf));
                planes.ceiling.sample(p.x, p.y) * plane_fog(self.half_h - yf)
            } else if yf <= span.floor {
                let v = (yf - span.ceil) / span.wall_h;
                wall_tex.sample(wall_u, v) * span.fog
            } else {
                let (p, we) = ground(self.height_f / (yf - self.half_h));
                let base = planes.floor.sample(p.x, p.y) * plane_fog(yf - self.half_h);

                // mirrored wall, strongest right under the wall band
                let below = (yf - span.floor) / span.wall_h;
                let weight = settings.reflection * (1.0 - below).clamp(0.0, 1.0) * we;
                if weight > 0.0 {
                    let mirrored = wall_tex.sample(wall_u, 1.0 - below) * span.fog;
                    mix(base, mirrored, weight)
                } else {
                    base
                }
            };
            surface.set_pixel(x, y as i32, color);
        }
    }
}

/*──────────────────────────────── Tests ───────────────────────────────*/
#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        renderer::{Framebuffer, unpack_rgb},
        world::{Model, Scene, patterns},
    };
    use std::f32::consts::FRAC_PI_2;

    const W: usize = 64;
    const H: usize = 48;

    /// 6×6 red block, viewer in its middle looking along +X.
    fn room() -> (Scene, Texture, Texture) {
        let mut scene = Scene::new();
        let red = scene.add_texture("RED", patterns::solid([255, 0, 0])).unwrap();
        scene.add(Model::block(0.0, 0.0, 6.0, 6.0).with_texture(red));
        (
            scene,
            patterns::solid([0, 0, 255]),
            patterns::solid([0, 255, 0]),
        )
    }

    fn render(
        scene: &Scene,
        floor: &Texture,
        ceiling: &Texture,
        viewer: &Viewer,
        s: &Settings,
    ) -> Framebuffer {
        let mut fb = Framebuffer::new(W, H);
        fb.clear(s.background());
        let lines = scene.line_cache(s.block_size);
        Software::default().draw_frame(&mut fb, &lines, viewer, Planes { floor, ceiling }, s);
        fb
    }

    fn rgb(fb: &Framebuffer, x: usize, y: usize) -> [u8; 3] {
        unpack_rgb(fb.pixel(x, y).unwrap())
    }

    fn centred_viewer(fov: f32) -> Viewer {
        Viewer::new(Vec3::new(24.0, 24.0, 0.0), 0.0, fov)
    }

    #[test]
    fn fog_is_linear_and_clamped() {
        assert_eq!(fog(0.0, 60.0), 1.0);
        assert_eq!(fog(30.0, 60.0), 0.5);
        assert_eq!(fog(90.0, 60.0), 0.0);
        assert_eq!(fog(-10.0, 60.0), 1.0);
    }

    #[test]
    fn column_split_is_symmetric() {
        let mut sw = Software::default();
        sw.begin_frame(W, H, &centred_viewer(FRAC_PI_2));
        let span = ColumnSpan::new(24.0, &sw, 60.0);
        assert!((span.ceil - 22.0).abs() < 1e-4);
        assert!((span.floor - 26.0).abs() < 1e-4);
        assert!((span.ceil + span.floor - H as f32).abs() < 1e-4);
    }

    #[test]
    fn room_shows_ceiling_wall_floor() {
        let (scene, floor, ceiling) = room();
        let s = Settings::default();
        let fb = render(&scene, &floor, &ceiling, &centred_viewer(FRAC_PI_2), &s);

        for x in 0..W {
            // wall band around the horizon, fogged red
            let [r, g, b] = rgb(&fb, x, H / 2);
            assert!((140..=160).contains(&r) && g == 0 && b == 0, "x={x}: {r},{g},{b}");

            // ceiling at the top, floor at the bottom
            let [r, g, b] = rgb(&fb, x, 0);
            assert!(r == 0 && g > 0 && b == 0, "x={x} top: {r},{g},{b}");
            let [r, g, b] = rgb(&fb, x, H - 1);
            assert!(r == 0 && g == 0 && b > 0, "x={x} bottom: {r},{g},{b}");
        }
    }

    #[test]
    fn planes_darken_towards_horizon() {
        let (scene, floor, ceiling) = room();
        let s = Settings::default();
        let fb = render(&scene, &floor, &ceiling, &centred_viewer(FRAC_PI_2), &s);
        let x = W / 2;
        assert!(rgb(&fb, x, 0)[1] > rgb(&fb, x, 10)[1]);
        assert!(rgb(&fb, x, H - 1)[2] > rgb(&fb, x, H - 10)[2]);
    }

    #[test]
    fn reflection_fades_away_from_wall() {
        let (scene, floor, ceiling) = room();
        let s = Settings::default();
        let fb = render(&scene, &floor, &ceiling, &centred_viewer(FRAC_PI_2), &s);
        let x = W / 2;
        // first floor row below the band (floor edge is row 26) mirrors the wall
        let near = rgb(&fb, x, 27);
        assert!(near[0] > 0 && near[0] < 150, "{near:?}");
        let far = rgb(&fb, x, H - 1);
        assert_eq!(far[0], 0);
    }

    #[test]
    fn reflection_can_be_disabled() {
        let (scene, floor, ceiling) = room();
        let s = Settings {
            reflection: 0.0,
            ..Settings::default()
        };
        let fb = render(&scene, &floor, &ceiling, &centred_viewer(FRAC_PI_2), &s);
        assert_eq!(rgb(&fb, W / 2, 27)[0], 0);
    }

    #[test]
    fn closer_walls_are_taller_and_brighter() {
        let (scene, floor, ceiling) = room();
        let s = Settings::default();
        let far = render(&scene, &floor, &ceiling, &centred_viewer(FRAC_PI_2), &s);
        let near_viewer = Viewer::new(Vec3::new(36.0, 24.0, 0.0), 0.0, FRAC_PI_2);
        let near = render(&scene, &floor, &ceiling, &near_viewer, &s);

        let red_rows = |fb: &Framebuffer| {
            (0..H)
                .filter(|&y| {
                    let [r, g, b] = rgb(fb, W / 2, y);
                    r > 0 && g == 0 && b == 0
                })
                .count()
        };
        assert!(red_rows(&near) > red_rows(&far));
        assert!(rgb(&near, W / 2, H / 2)[0] > rgb(&far, W / 2, H / 2)[0]);
    }

    #[test]
    fn wider_fov_shrinks_wall_band() {
        let mut sw = Software::default();
        sw.begin_frame(W, H, &centred_viewer(60f32.to_radians()));
        let narrow = ColumnSpan::new(24.0, &sw, 60.0);
        sw.begin_frame(W, H, &centred_viewer(120f32.to_radians()));
        let wide = ColumnSpan::new(24.0, &sw, 60.0);
        assert!(wide.wall_h < narrow.wall_h);
    }

    #[test]
    fn walls_beyond_render_distance_keep_background() {
        let (scene, floor, ceiling) = room();
        let s = Settings {
            max_depth: 10.0,
            background: [0.0, 0.0, 0.0],
            ..Settings::default()
        };
        let fb = render(&scene, &floor, &ceiling, &centred_viewer(FRAC_PI_2), &s);
        assert!(fb.as_slice().iter().all(|&p| p == 0));
    }

    #[test]
    fn empty_scene_keeps_background() {
        let scene = Scene::new();
        let (floor, ceiling) = (Texture::missing(), Texture::missing());
        let s = Settings {
            background: [0.0, 0.0, 1.0],
            ..Settings::default()
        };
        let fb = render(&scene, &floor, &ceiling, &centred_viewer(FRAC_PI_2), &s);
        assert!(fb.as_slice().iter().all(|&p| p == 0x00_00_00_FF));
    }

    #[test]
    fn missing_wall_texture_draws_magenta() {
        let mut scene = Scene::new();
        scene.add(Model::block(0.0, 0.0, 6.0, 6.0));
        let (floor, ceiling) = (Texture::missing(), Texture::missing());
        let s = Settings::default();
        let fb = render(&scene, &floor, &ceiling, &centred_viewer(FRAC_PI_2), &s);
        let [r, g, b] = rgb(&fb, W / 2, H / 2);
        assert!(r > 0 && g == 0 && r == b);
    }

    #[test]
    fn column_hits_recorded() {
        let (scene, floor, ceiling) = room();
        let s = Settings::default();
        let mut fb = Framebuffer::new(W, H);
        let lines = scene.line_cache(s.block_size);
        let mut sw = Software::default();
        let planes = Planes {
            floor: &floor,
            ceiling: &ceiling,
        };
        sw.draw_frame(&mut fb, &lines, &centred_viewer(FRAC_PI_2), planes, &s);

        assert_eq!(sw.column_hits().len(), W);
        let mid = sw.column_hits()[W / 2].unwrap();
        assert!((mid - Vec3::new(48.0, 24.0, 0.0)).length() < 1e-3);
    }
}
