//! Player pose: continuous world position, facing angle, and the unit
//! direction vector derived from it. The direction is recomputed whenever
//! the angle changes so the two can never drift apart.

use std::f32::consts::TAU;

use crate::config::TILE_SIZE;

#[derive(Debug, Clone, Copy)]
pub struct Player {
    pub pos: [f32; 2],
    angle: f32,
    dir: [f32; 2],
}

/// Wraps an angle into `[0, 2π)`.
pub fn normalize_angle(angle: f32) -> f32 {
    let a = angle.rem_euclid(TAU);
    // rem_euclid of a tiny negative value can round to exactly TAU
    if a >= TAU { 0.0 } else { a }
}

impl Player {
    pub fn new(pos: [f32; 2], angle: f32) -> Self {
        let angle = normalize_angle(angle);
        Self {
            pos,
            angle,
            dir: [angle.cos(), angle.sin()],
        }
    }

    /// Spawn at the center of tile (1, 1) facing east.
    pub fn spawn() -> Self {
        Self::new([TILE_SIZE * 1.5, TILE_SIZE * 1.5], 0.0)
    }

    pub fn angle(&self) -> f32 {
        self.angle
    }

    pub fn dir(&self) -> [f32; 2] {
        self.dir
    }

    pub fn set_angle(&mut self, angle: f32) {
        self.angle = normalize_angle(angle);
        self.dir = [self.angle.cos(), self.angle.sin()];
    }

    pub fn turn(&mut self, delta: f32) {
        self.set_angle(self.angle + delta);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::PI;

    #[test]
    fn normalize_lands_in_range_and_is_idempotent() {
        for raw in [-7.5, -PI, -0.001, 0.0, 0.5, PI, 6.2, 12.0, 100.0] {
            let a = normalize_angle(raw);
            assert!((0.0..TAU).contains(&a), "angle {raw} normalized to {a}");
            assert!((normalize_angle(a) - a).abs() < 1e-6);
        }
    }

    #[test]
    fn direction_tracks_angle() {
        let mut p = Player::new([0.0, 0.0], 0.0);
        assert!((p.dir()[0] - 1.0).abs() < 1e-6);
        assert!(p.dir()[1].abs() < 1e-6);

        p.set_angle(PI / 2.0);
        assert!(p.dir()[0].abs() < 1e-6);
        assert!((p.dir()[1] - 1.0).abs() < 1e-6);

        p.turn(-PI / 2.0);
        assert!((p.angle()).abs() < 1e-6);
        assert!((p.dir()[0] - 1.0).abs() < 1e-6);
    }

    #[test]
    fn turning_past_two_pi_wraps() {
        let mut p = Player::new([0.0, 0.0], 0.1);
        p.turn(TAU);
        assert!((p.angle() - 0.1).abs() < 1e-5);
        p.turn(-0.3);
        assert!(p.angle() > TAU - 0.3);
    }
}
