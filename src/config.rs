//! Engine tuning constants and the handful of values derived from them.

use std::f32::consts::PI;

/// World-space edge length of one map cell.
pub const TILE_SIZE: f32 = 64.0;

/// Total horizontal field of view in degrees.
pub const FOV_DEGREES: f32 = 60.0;

/// Internal framebuffer height; width follows the window aspect.
pub const FB_HEIGHT: usize = 480;

/// Default window size.
pub const WINDOW_WIDTH: u32 = 1200;
pub const WINDOW_HEIGHT: u32 = 600;

/// Absolute cap on a wall strip's pre-clip height, in framebuffer pixels.
pub const MAX_STRIP_HEIGHT: f32 = 4096.0;

/// World units per second of forward/strafe movement.
pub const PLAYER_SPEED: f32 = 200.0;

/// Radians per second of turning.
pub const ROTATION_SPEED: f32 = 2.0;

/// Distance from the player center to each collision sample point.
pub const PLAYER_RADIUS: f32 = 5.0;

/// Distances below this are treated as touching the wall; keeps the
/// projected height finite.
pub const MIN_WALL_DISTANCE: f32 = 1.0e-4;

/// Frame budget for the fixed frame-rate cap (~60 fps).
pub const FRAME_BUDGET_MS: u64 = 16;

/// Minimap fan: rays per side of center, and the angular step between them.
pub const MINIMAP_RAYS_PER_SIDE: i32 = 11;

pub fn minimap_ray_step() -> f32 {
    fov_radians() / 19.0
}

pub fn fov_radians() -> f32 {
    FOV_DEGREES * PI / 180.0
}

pub fn half_fov() -> f32 {
    fov_radians() * 0.5
}

/// Distance from the eye to the projection plane for a framebuffer of the
/// given width. Recomputed when the internal framebuffer is resized.
pub fn projection_plane_distance(fb_width: f32) -> f32 {
    (fb_width * 0.5) / half_fov().tan()
}
