//! Top-down debug map drawn over the 3-D view.
//!
//! World units map 1:1 to pixels, so with the default block size of 8 a
//! 6×6 room covers a 48×48 pixel square in the top-left corner.

use glam::Vec3;

use crate::{
    math::Planar,
    renderer::Surface,
    world::{LineCache, Viewer},
};

const WALL: Vec3 = Vec3::ONE;
const RAY: Vec3 = Vec3::new(0.0, 0.0, 1.0);
const HEADING: Vec3 = Vec3::new(0.0, 1.0, 0.0);
const HEADING_LEN: f32 = 10.0;

/// Integer Bresenham line-drawing algorithm; clipped per pixel by the surface.
pub fn draw_line<S: Surface + ?Sized>(
    surface: &mut S,
    mut x0: i32,
    mut y0: i32,
    x1: i32,
    y1: i32,
    color: Vec3,
) {
    let dx = (x1 - x0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let dy = -(y1 - y0).abs();
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;
    loop {
        surface.set_pixel(x0, y0, color);
        if x0 == x1 && y0 == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x0 += sx;
        }
        if e2 <= dx {
            err += dx;
            y0 += sy;
        }
    }
}

#[inline]
fn line_between<S: Surface + ?Sized>(surface: &mut S, a: Vec3, b: Vec3, color: Vec3) {
    draw_line(
        surface,
        a.x as i32,
        a.y as i32,
        b.x as i32,
        b.y as i32,
        color,
    );
}

/// Rays of the last frame, every wall, and the viewer's heading.
pub fn draw_minimap<S: Surface + ?Sized>(
    surface: &mut S,
    lines: &LineCache<'_>,
    viewer: &Viewer,
    column_hits: &[Option<Vec3>],
) {
    let eye = viewer.position();

    for hit in column_hits.iter().flatten() {
        line_between(surface, eye, *hit, RAY);
    }

    let eye_end = eye + Vec3::from_angle(viewer.rotation()) * HEADING_LEN;
    line_between(surface, eye, eye_end, HEADING);

    let scale = lines.block_size();
    for line in lines.lines() {
        line_between(surface, line.a * scale, line.b * scale, WALL);
    }
}
