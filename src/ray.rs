//! The ray-cast engine: for one ray angle, find the nearest wall crossing
//! by stepping the two grid-line families independently (one tile per step
//! along the stepped axis) and keeping the closer hit.
//!
//! The slope used for stepping comes from `tan(angle)` with its magnitude
//! clamped into a large finite range, so rays at or near the axis-aligned
//! angles (0, π/2, π, 3π/2) stay continuous instead of propagating
//! inf/NaN through the loop.

use crate::config::TILE_SIZE;
use crate::map::Map;
use crate::player::normalize_angle;

/// Which grid-line family produced the hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    /// Crossing of a horizontal grid line (wall face runs east-west).
    Horizontal,
    /// Crossing of a vertical grid line (wall face runs north-south).
    Vertical,
}

#[derive(Debug, Clone, Copy)]
pub struct HitRecord {
    pub point: [f32; 2],
    pub distance: f32,
    pub orientation: Orientation,
}

/// Magnitude bound for the effective slope. Steep enough that the first
/// step of the losing axis family leaves the map, shallow enough to stay
/// finite.
const SLOPE_LIMIT: f32 = 1.0e6;

/// `tan(angle)` with magnitude clamped into `[1/SLOPE_LIMIT, SLOPE_LIMIT]`,
/// sign preserved. The stepping code re-derives step signs from the facing
/// flags, so only the magnitude matters here.
fn bounded_tan(angle: f32) -> f32 {
    let t = angle.tan();
    if !t.is_finite() {
        return SLOPE_LIMIT;
    }
    let mag = t.abs().clamp(1.0 / SLOPE_LIMIT, SLOPE_LIMIT);
    if t.is_sign_negative() { -mag } else { mag }
}

/// Angle of column `i` across the FOV fan. A single-ray fan degenerates to
/// the straight-ahead ray instead of dividing by `num_rays - 1 == 0`.
pub fn column_angle(player_angle: f32, fov: f32, num_rays: usize, i: usize) -> f32 {
    if num_rays <= 1 {
        return player_angle;
    }
    let step = fov / (num_rays - 1) as f32;
    player_angle - fov * 0.5 + step * i as f32
}

/// Casts one ray and returns the nearest wall hit. A ray that leaves the
/// map without hitting anything gets a finite sentinel record at the
/// maximum render distance, never an infinity.
pub fn cast(map: &Map, origin: [f32; 2], ray_angle: f32) -> HitRecord {
    let angle = normalize_angle(ray_angle);
    let facing_down = angle > 0.0 && angle < std::f32::consts::PI;
    let facing_right =
        angle < std::f32::consts::FRAC_PI_2 || angle > 1.5 * std::f32::consts::PI;

    let horiz = horizontal_hit(map, origin, angle, facing_down, facing_right);
    let vert = vertical_hit(map, origin, angle, facing_down, facing_right);

    match (horiz, vert) {
        (Some((hp, hd)), Some((vp, vd))) => {
            if hd < vd {
                HitRecord {
                    point: hp,
                    distance: hd,
                    orientation: Orientation::Horizontal,
                }
            } else {
                HitRecord {
                    point: vp,
                    distance: vd,
                    orientation: Orientation::Vertical,
                }
            }
        }
        (Some((hp, hd)), None) => HitRecord {
            point: hp,
            distance: hd,
            orientation: Orientation::Horizontal,
        },
        (None, Some((vp, vd))) => HitRecord {
            point: vp,
            distance: vd,
            orientation: Orientation::Vertical,
        },
        (None, None) => no_hit(map, origin, angle),
    }
}

/// Bounded fallback for rays that exit the map: a point at the maximum
/// render distance along the ray.
fn no_hit(map: &Map, origin: [f32; 2], angle: f32) -> HitRecord {
    let max = map.world_width().hypot(map.world_height());
    HitRecord {
        point: [
            origin[0] + angle.cos() * max,
            origin[1] + angle.sin() * max,
        ],
        distance: max,
        orientation: Orientation::Vertical,
    }
}

/// Steps along horizontal grid lines (one tile of Y per step) until the
/// cell behind the crossed line is a wall or the crossing leaves the map.
fn horizontal_hit(
    map: &Map,
    origin: [f32; 2],
    angle: f32,
    facing_down: bool,
    facing_right: bool,
) -> Option<([f32; 2], f32)> {
    let tan = bounded_tan(angle);

    let mut y = (origin[1] / TILE_SIZE).floor() * TILE_SIZE;
    if facing_down {
        y += TILE_SIZE;
    }
    let mut x = origin[0] + (y - origin[1]) / tan;

    let y_step = if facing_down { TILE_SIZE } else { -TILE_SIZE };
    let mut x_step = TILE_SIZE / tan;
    if facing_right != (x_step > 0.0) {
        x_step = -x_step;
    }

    loop {
        // Peek the cell on the far side of the crossed line: the row at
        // the line when travelling down, the row above it when travelling
        // up. One world unit of offset is enough to land in that row.
        let peek_y = if facing_down { y } else { y - 1.0 };
        if !map.in_bounds_world(x, peek_y) {
            return None;
        }
        if map.wall_at_world(x, peek_y) {
            return Some(([x, y], distance(origin, [x, y])));
        }
        x += x_step;
        y += y_step;
    }
}

/// Symmetric search over vertical grid lines (one tile of X per step).
fn vertical_hit(
    map: &Map,
    origin: [f32; 2],
    angle: f32,
    facing_down: bool,
    facing_right: bool,
) -> Option<([f32; 2], f32)> {
    let tan = bounded_tan(angle);

    let mut x = (origin[0] / TILE_SIZE).floor() * TILE_SIZE;
    if facing_right {
        x += TILE_SIZE;
    }
    let mut y = origin[1] + (x - origin[0]) * tan;

    let x_step = if facing_right { TILE_SIZE } else { -TILE_SIZE };
    let mut y_step = TILE_SIZE * tan;
    if facing_down != (y_step > 0.0) {
        y_step = -y_step;
    }

    loop {
        let peek_x = if facing_right { x } else { x - 1.0 };
        if !map.in_bounds_world(peek_x, y) {
            return None;
        }
        if map.wall_at_world(peek_x, y) {
            return Some(([x, y], distance(origin, [x, y])));
        }
        x += x_step;
        y += y_step;
    }
}

fn distance(a: [f32; 2], b: [f32; 2]) -> f32 {
    (b[0] - a[0]).hypot(b[1] - a[1])
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::{FRAC_PI_2, PI, TAU};

    fn ring(size: usize) -> Map {
        let mut rows = Vec::new();
        for y in 0..size {
            let row: String = (0..size)
                .map(|x| {
                    if x == 0 || y == 0 || x == size - 1 || y == size - 1 {
                        '1'
                    } else {
                        '0'
                    }
                })
                .collect();
            rows.push(row);
        }
        Map::from_str(&rows.join("\n")).unwrap()
    }

    #[test]
    fn straight_east_hits_vertical_face_one_tile_out() {
        // Player on the grid line at x = 1 tile; wall column at x = 2.
        let map = Map::from_str("000\n001\n000").unwrap();
        let origin = [TILE_SIZE, 1.5 * TILE_SIZE];
        let hit = cast(&map, origin, 0.0);
        assert_eq!(hit.orientation, Orientation::Vertical);
        assert!((hit.distance - TILE_SIZE).abs() < 1e-2, "{}", hit.distance);
        assert!((hit.point[0] - 2.0 * TILE_SIZE).abs() < 1e-2);
    }

    #[test]
    fn straight_south_hits_horizontal_face_one_tile_out() {
        let map = Map::from_str("000\n000\n010").unwrap();
        let origin = [1.5 * TILE_SIZE, TILE_SIZE];
        let hit = cast(&map, origin, FRAC_PI_2);
        assert_eq!(hit.orientation, Orientation::Horizontal);
        assert!((hit.distance - TILE_SIZE).abs() < 1e-2, "{}", hit.distance);
        assert!((hit.point[1] - 2.0 * TILE_SIZE).abs() < 1e-2);
    }

    #[test]
    fn axis_aligned_angles_stay_finite() {
        let map = ring(8);
        let origin = [3.5 * TILE_SIZE, 3.5 * TILE_SIZE];
        for angle in [0.0, FRAC_PI_2, PI, 1.5 * PI, TAU, -FRAC_PI_2] {
            let hit = cast(&map, origin, angle);
            assert!(hit.distance.is_finite());
            assert!(hit.point[0].is_finite() && hit.point[1].is_finite());
            // Inside a closed ring every ray lands on a wall face within
            // the map.
            assert!(hit.distance <= map.world_width().hypot(map.world_height()));
        }
    }

    #[test]
    fn near_axis_angles_match_axis_distance() {
        let map = ring(8);
        let origin = [3.5 * TILE_SIZE, 3.5 * TILE_SIZE];
        let on_axis = cast(&map, origin, 0.0).distance;
        let near = cast(&map, origin, 1.0e-4).distance;
        assert!((on_axis - near).abs() < 0.5, "{on_axis} vs {near}");
    }

    #[test]
    fn open_map_ray_returns_bounded_sentinel() {
        let map = Map::from_str("000\n000\n000").unwrap();
        let hit = cast(&map, [1.5 * TILE_SIZE, 1.5 * TILE_SIZE], 0.7);
        let max = map.world_width().hypot(map.world_height());
        assert!(hit.distance.is_finite());
        assert!((hit.distance - max).abs() < 1e-3);
    }

    #[test]
    fn ring_scenario_center_ray() {
        // 10x10 ring; player at the center of tile (2, 2) facing east sees
        // the inner face of the x = 9 wall column, 6.5 tiles away.
        let map = ring(10);
        let origin = [2.5 * TILE_SIZE, 2.5 * TILE_SIZE];
        let hit = cast(&map, origin, 0.0);
        assert_eq!(hit.orientation, Orientation::Vertical);
        assert!(
            (hit.distance - 6.5 * TILE_SIZE).abs() < 1e-2,
            "{}",
            hit.distance
        );
    }

    #[test]
    fn diagonal_hit_prefers_nearer_family() {
        // Wall directly south-east; a 45 degree ray from a tile center
        // crosses both families at the same corner, and the tie goes to
        // the vertical family.
        let map = ring(6);
        let origin = [1.5 * TILE_SIZE, 1.5 * TILE_SIZE];
        let hit = cast(&map, origin, PI / 4.0);
        assert!(hit.distance.is_finite());
        assert!(hit.distance > 0.0);
    }

    #[test]
    fn single_ray_fan_is_straight_ahead() {
        let fov = 0.0;
        let a = column_angle(1.25, fov, 1, 0);
        assert!((a - 1.25).abs() < 1e-6);
    }

    #[test]
    fn fan_spans_the_fov() {
        let fov = 1.0;
        let first = column_angle(2.0, fov, 5, 0);
        let last = column_angle(2.0, fov, 5, 4);
        assert!((first - 1.5).abs() < 1e-6);
        assert!((last - 2.5).abs() < 1e-6);
        assert!((column_angle(2.0, fov, 5, 2) - 2.0).abs() < 1e-6);
    }
}
