//! Overhead minimap: a small top-down panel in the bottom-right corner
//! with the wall layout, the player marker, and a fan of FOV rays. The
//! rays here use coarse unit-step marching, not the precise engine; it is
//! a debugging view, so cheap and approximate is the point.

use crate::config::{MINIMAP_RAYS_PER_SIDE, TILE_SIZE, minimap_ray_step};
use crate::map::{Map, Tile};
use crate::player::Player;
use crate::surface::{Frame, pack_rgb};

pub fn draw_minimap(frame: &mut Frame<'_>, map: &Map, player: &Player) {
    let panel = (frame.height / 4) as i32;
    let tile_px = (panel / map.height().max(1) as i32).max(1);
    let panel_x = frame.width as i32 - panel;
    let panel_y = frame.height as i32 - panel;

    frame.fill_rect(panel_x, panel_y, panel, panel, pack_rgb(100, 100, 100));

    let wall_color = pack_rgb(200, 200, 200);
    for y in 0..map.height() {
        for x in 0..map.width() {
            if map.tile(x, y) == Some(Tile::Wall) {
                frame.fill_rect(
                    panel_x + x as i32 * tile_px,
                    panel_y + y as i32 * tile_px,
                    tile_px,
                    tile_px,
                    wall_color,
                );
            }
        }
    }

    let scale = tile_px as f32 / TILE_SIZE;
    let marker = (tile_px / 4).max(2);
    let px = panel_x as f32 + player.pos[0] * scale;
    let py = panel_y as f32 + player.pos[1] * scale;
    frame.fill_rect(
        px as i32 - marker / 2,
        py as i32 - marker / 2,
        marker,
        marker,
        pack_rgb(255, 0, 0),
    );

    draw_fov_rays(frame, map, player, panel_x as f32, panel_y as f32, scale);
}

fn draw_fov_rays(
    frame: &mut Frame<'_>,
    map: &Map,
    player: &Player,
    panel_x: f32,
    panel_y: f32,
    scale: f32,
) {
    let color = pack_rgb(0, 255, 0);
    let step = minimap_ray_step();
    let origin_x = panel_x + player.pos[0] * scale;
    let origin_y = panel_y + player.pos[1] * scale;

    for i in -MINIMAP_RAYS_PER_SIDE..=MINIMAP_RAYS_PER_SIDE {
        if i == 0 {
            continue;
        }
        let angle = player.angle() + i as f32 * step;
        let (end_x, end_y) = march(map, player.pos, angle);
        frame.draw_line(
            origin_x,
            origin_y,
            panel_x + end_x * scale,
            panel_y + end_y * scale,
            color,
        );
    }
}

/// Unit-step ray march: walk one world unit at a time until a wall cell or
/// the map boundary. Deliberately coarser than the rendering engine's
/// grid-line search.
pub fn march(map: &Map, origin: [f32; 2], angle: f32) -> (f32, f32) {
    let step_x = angle.cos();
    let step_y = angle.sin();
    let mut x = origin[0];
    let mut y = origin[1];
    while map.in_bounds_world(x, y) {
        if map.wall_at_world(x, y) {
            break;
        }
        x += step_x;
        y += step_y;
    }
    (x, y)
}
