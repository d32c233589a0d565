//! Input-driven viewer update with move rejection.
//!
//! There is no slide response: a step that would bring the viewer within
//! `collision_radius` of any wall is undone as a whole.

use super::{Controls, Key};
use crate::{
    config::Settings,
    world::{LineCache, Viewer},
};

/// Apply one update tick of zoom, turn and movement to `viewer`.
///
/// Returns `true` if a move was rejected by a wall.
pub fn update_viewer(
    viewer: &mut Viewer,
    controls: &dyn Controls,
    lines: &LineCache<'_>,
    dt: f32,
    settings: &Settings,
) -> bool {
    /* ----- field of view --------------------------------------------- */
    let (min_fov, max_fov) = settings.fov_range();
    let zoom = settings.zoom_speed * dt;
    if controls.is_held(Key::WidenFov) {
        viewer.zoom(zoom, min_fov, max_fov);
    } else if controls.is_held(Key::NarrowFov) {
        viewer.zoom(-zoom, min_fov, max_fov);
    }

    /* ----- heading ---------------------------------------------------- */
    let turn = settings.turn_speed * dt;
    if controls.is_held(Key::TurnLeft) {
        viewer.turn(-turn);
    } else if controls.is_held(Key::TurnRight) {
        viewer.turn(turn);
    }

    /* ----- position --------------------------------------------------- */
    let step = viewer.forward() * settings.move_speed * dt;
    let delta = if controls.is_held(Key::MoveForward) {
        step
    } else if controls.is_held(Key::MoveBackward) {
        -step
    } else {
        return false;
    };

    let before = viewer.object.position;
    viewer.object.position += delta;
    if lines.circle_hits(viewer.object.position, settings.collision_radius) {
        viewer.object.position = before;
        return true;
    }
    false
}

/*====================================================================*/
/*                                Tests                                */
/*====================================================================*/
#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::HeldKeys;
    use crate::world::{Model, Scene};
    use glam::Vec3;

    const DT: f32 = 1.0 / 60.0;

    fn room() -> Scene {
        let mut scene = Scene::new();
        scene.add(Model::block(0.0, 0.0, 6.0, 6.0));
        scene
    }

    fn viewer_at(x: f32, y: f32) -> Viewer {
        let s = Settings::default();
        Viewer::new(Vec3::new(x, y, 0.0), 0.0, s.fov())
    }

    #[test]
    fn idle_input_changes_nothing() {
        let scene = room();
        let lines = scene.line_cache(8.0);
        let mut v = viewer_at(24.0, 24.0);
        let before = v;
        assert!(!update_viewer(&mut v, &HeldKeys::empty(), &lines, DT, &Settings::default()));
        assert_eq!(v, before);
    }

    #[test]
    fn forward_moves_along_heading() {
        let scene = room();
        let lines = scene.line_cache(8.0);
        let s = Settings::default();
        let mut v = viewer_at(24.0, 24.0);
        assert!(!update_viewer(&mut v, &HeldKeys::MOVE_FORWARD, &lines, DT, &s));
        assert!((v.position().x - (24.0 + s.move_speed * DT)).abs() < 1e-5);
        assert!((v.position().y - 24.0).abs() < 1e-5);
    }

    #[test]
    fn backward_moves_against_heading() {
        let scene = room();
        let lines = scene.line_cache(8.0);
        let s = Settings::default();
        let mut v = viewer_at(24.0, 24.0);
        update_viewer(&mut v, &HeldKeys::MOVE_BACKWARD, &lines, DT, &s);
        assert!(v.position().x < 24.0);
    }

    #[test]
    fn move_into_wall_is_rejected() {
        let scene = room();
        let lines = scene.line_cache(8.0);
        let s = Settings::default();
        // right wall at x = 48; one step would cross the collision radius
        let start_x = 48.0 - s.collision_radius - s.move_speed * DT * 0.5;
        let mut v = viewer_at(start_x, 24.0);

        assert!(update_viewer(&mut v, &HeldKeys::MOVE_FORWARD, &lines, DT, &s));
        assert_eq!(v.position(), Vec3::new(start_x, 24.0, 0.0));

        // backing away is still allowed
        assert!(!update_viewer(&mut v, &HeldKeys::MOVE_BACKWARD, &lines, DT, &s));
        assert!(v.position().x < start_x);
    }

    #[test]
    fn turning_keeps_priority_left() {
        let scene = room();
        let lines = scene.line_cache(8.0);
        let s = Settings::default();
        let mut v = viewer_at(24.0, 24.0);
        let keys = HeldKeys::TURN_LEFT | HeldKeys::TURN_RIGHT;
        update_viewer(&mut v, &keys, &lines, DT, &s);
        let expected = std::f32::consts::TAU - s.turn_speed * DT;
        assert!((v.rotation() - expected).abs() < 1e-5);
    }

    #[test]
    fn fov_stays_in_range() {
        let scene = room();
        let lines = scene.line_cache(8.0);
        let s = Settings::default();
        let (min, max) = s.fov_range();
        let mut v = viewer_at(24.0, 24.0);

        for _ in 0..10_000 {
            update_viewer(&mut v, &HeldKeys::WIDEN_FOV, &lines, DT, &s);
            assert!(v.fov <= max);
        }
        assert!((v.fov - max).abs() < 1e-6);

        for _ in 0..10_000 {
            update_viewer(&mut v, &HeldKeys::NARROW_FOV, &lines, DT, &s);
            assert!(v.fov >= min);
        }
        assert!((v.fov - min).abs() < 1e-6);
    }
}
