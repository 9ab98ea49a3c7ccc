//! Projection pipeline: turns one ray's hit record into the screen-space
//! geometry of its wall strip. Pure computation; drawing happens in the
//! renderer so the per-column order stays in one place.

use crate::config::{MAX_STRIP_HEIGHT, MIN_WALL_DISTANCE, TILE_SIZE, projection_plane_distance};
use crate::ray::{HitRecord, Orientation};

/// One screen column's worth of wall geometry.
#[derive(Debug, Clone, Copy)]
pub struct Strip {
    pub screen_x: usize,
    /// On-screen height in pixels, already clipped to the framebuffer.
    pub height: f32,
    /// Top of the strip; 0 when the wall overflows the screen.
    pub vertical_offset: f32,
    /// Pre-clip height, used to step texture rows at the right rate.
    pub full_height: f32,
    /// Horizontal texture coordinate in `[0, 1)`.
    pub texture_u: f32,
    /// First texture row fraction; non-zero when the strip top is clipped.
    pub texture_v_start: f32,
    /// Distance shade multiplier in `[0.3, 1.0]`.
    pub shade: f32,
}

/// Perpendicular distance to the projection plane. Removes the radial
/// bow ("fisheye") that raw per-ray distance produces near screen edges.
pub fn corrected_distance(distance: f32, ray_angle: f32, player_angle: f32) -> f32 {
    distance * (ray_angle - player_angle).cos()
}

/// Shade multiplier for a wall at the given corrected distance, relative
/// to the map's world width. The 0.3 floor keeps far walls visible.
pub fn shade_factor(corrected: f32, world_width: f32) -> f32 {
    (1.0 - corrected / world_width).clamp(0.3, 1.0)
}

pub fn project(
    hit: &HitRecord,
    ray_angle: f32,
    player_angle: f32,
    column: usize,
    fb_width: usize,
    fb_height: usize,
    world_width: f32,
) -> Strip {
    let corrected =
        corrected_distance(hit.distance, ray_angle, player_angle).max(MIN_WALL_DISTANCE);

    let plane = projection_plane_distance(fb_width as f32);
    let full_height = ((TILE_SIZE / corrected) * plane).min(MAX_STRIP_HEIGHT);

    let mut offset = (fb_height as f32 - full_height) * 0.5;
    let mut v_start = 0.0;
    let mut height = full_height;
    if offset < 0.0 {
        // Wall overflows the screen: pin the strip to the top and start
        // sampling partway down the texture so the visible slice is not
        // stretched.
        v_start = -offset / full_height;
        offset = 0.0;
        height = fb_height as f32;
    }

    // Vertical wall faces run along Y, horizontal faces along X; sampling
    // the run-axis component keeps adjacent strips on contiguous texture
    // columns.
    let along = match hit.orientation {
        Orientation::Vertical => hit.point[1],
        Orientation::Horizontal => hit.point[0],
    };
    let texture_u = along.rem_euclid(TILE_SIZE) / TILE_SIZE;

    Strip {
        screen_x: column,
        height,
        vertical_offset: offset,
        full_height,
        texture_u,
        texture_v_start: v_start,
        shade: shade_factor(corrected, world_width),
    }
}
