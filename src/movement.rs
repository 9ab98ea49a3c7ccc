//! Movement and collision: per-frame directional intent is scaled by the
//! elapsed time, validated against the map, and either committed or
//! dropped. Rotation is applied directly and is never collision checked.

use crate::config::{PLAYER_RADIUS, PLAYER_SPEED, ROTATION_SPEED, TILE_SIZE};
use crate::map::Map;
use crate::player::Player;

/// Raw directional input for one frame, read off the key state.
#[derive(Debug, Clone, Copy, Default)]
pub struct MoveIntent {
    pub forward: bool,
    pub back: bool,
    pub strafe_left: bool,
    pub strafe_right: bool,
    pub turn_left: bool,
    pub turn_right: bool,
}

/// Advances the player by one frame of input. Returns the committed state;
/// a move into a wall leaves the position unchanged, which is the expected
/// outcome rather than an error.
pub fn resolve(player: &Player, map: &Map, intent: &MoveIntent, dt: f32) -> Player {
    let mut next = *player;

    if intent.turn_left {
        next.turn(-ROTATION_SPEED * dt);
    }
    if intent.turn_right {
        next.turn(ROTATION_SPEED * dt);
    }

    let step = PLAYER_SPEED * dt;
    let [dx, dy] = next.dir();
    let mut cand = next.pos;

    if intent.forward {
        cand[0] += dx * step;
        cand[1] += dy * step;
    }
    if intent.back {
        cand[0] -= dx * step;
        cand[1] -= dy * step;
    }
    // Strafe along the perpendicular of the facing direction.
    if intent.strafe_right {
        cand[0] -= dy * step;
        cand[1] += dx * step;
    }
    if intent.strafe_left {
        cand[0] += dy * step;
        cand[1] -= dx * step;
    }

    if can_stand(map, &next, cand) {
        next.pos = cand;
    }

    clamp_to_world(map, &mut next);
    next
}

/// Two sample points offset along the facing direction stand in for the
/// player's body. Crude on purpose: it blocks clipping along the travel
/// direction but not fully sideways.
fn can_stand(map: &Map, player: &Player, pos: [f32; 2]) -> bool {
    let [dx, dy] = player.dir();
    let fwd = (pos[0] + PLAYER_RADIUS * dx, pos[1] + PLAYER_RADIUS * dy);
    let back = (pos[0] - PLAYER_RADIUS * dx, pos[1] - PLAYER_RADIUS * dy);
    map.floor_at_world(fwd.0, fwd.1) && map.floor_at_world(back.0, back.1)
}

/// Hard backstop so the position can never leave the map rectangle even if
/// the collision samples straddle the boundary.
fn clamp_to_world(map: &Map, player: &mut Player) {
    player.pos[0] = player.pos[0].clamp(0.0, map.world_width());
    player.pos[1] = player.pos[1].clamp(0.0, map.world_height());
}
