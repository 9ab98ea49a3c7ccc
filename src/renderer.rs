//! Frame composition: clear the sky and ground halves, then walk the
//! columns left to right casting, projecting, and drawing one wall strip
//! each. Column order matters for overdraw at strip boundaries, so the
//! loop stays sequential.

use crate::config::fov_radians;
use crate::map::Map;
use crate::player::Player;
use crate::projection::{Strip, project};
use crate::ray::{cast, column_angle};
use crate::surface::{Frame, pack_rgb, shade_color};
use crate::texture::Texture;

const SKY: (u8, u8, u8) = (38, 44, 72);
const GROUND: (u8, u8, u8) = (52, 44, 38);

pub fn render_frame(frame: &mut Frame<'_>, map: &Map, player: &Player, wall: &Texture) {
    let width = frame.width;
    let height = frame.height;

    // Sky above the horizon, ground below; wall strips draw on top.
    frame.fill_rect(
        0,
        0,
        width as i32,
        (height / 2) as i32,
        pack_rgb(SKY.0, SKY.1, SKY.2),
    );
    frame.fill_rect(
        0,
        (height / 2) as i32,
        width as i32,
        (height - height / 2) as i32,
        pack_rgb(GROUND.0, GROUND.1, GROUND.2),
    );

    let num_rays = width;
    let fov = fov_radians();
    for column in 0..num_rays {
        let ray_angle = column_angle(player.angle(), fov, num_rays, column);
        let hit = cast(map, player.pos, ray_angle);
        let strip = project(
            &hit,
            ray_angle,
            player.angle(),
            column,
            width,
            height,
            map.world_width(),
        );
        draw_strip(frame, &strip, wall);
    }
}

/// Draws one textured, shaded wall strip. The texture row advances at the
/// pre-clip rate so over-tall walls show the correct slice instead of a
/// stretched one.
fn draw_strip(frame: &mut Frame<'_>, strip: &Strip, wall: &Texture) {
    let x = strip.screen_x;
    if x >= frame.width || strip.height <= 0.0 {
        return;
    }

    let tex_x = ((strip.texture_u * wall.width() as f32) as usize).min(wall.width() - 1);
    let v_step = 1.0 / strip.full_height;
    let mut v = strip.texture_v_start;

    let y0 = strip.vertical_offset.max(0.0) as usize;
    let y1 = ((strip.vertical_offset + strip.height) as usize).min(frame.height);
    for y in y0..y1 {
        let tex_y = ((v * wall.height() as f32) as usize).min(wall.height() - 1);
        let color = shade_color(wall.texel(tex_x, tex_y), strip.shade);
        frame.buf[y * frame.width + x] = color;
        v += v_step;
    }
}

/// Bottom-center weapon overlay at 0.3x frame width, aspect preserved.
/// Black texels are treated as transparent.
pub fn draw_weapon(frame: &mut Frame<'_>, weapon: &Texture) {
    let w = (frame.width as f32 * 0.3) as usize;
    if w == 0 || weapon.width() == 0 {
        return;
    }
    let h = w * weapon.height() / weapon.width();
    let x0 = frame.width.saturating_sub(w) / 2;
    let y0 = frame.height.saturating_sub(h);

    for dy in 0..h.min(frame.height - y0) {
        let v = dy as f32 / h as f32;
        for dx in 0..w.min(frame.width - x0) {
            let u = dx as f32 / w as f32;
            let color = weapon.sample(u, v);
            if color & 0x00FFFFFF != 0 {
                frame.buf[(y0 + dy) * frame.width + (x0 + dx)] = color;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TILE_SIZE;

    #[test]
    fn closed_room_renders_walls_over_background() {
        let map = Map::from_str("11111\n10001\n10001\n10001\n11111").unwrap();
        let player = Player::new([2.5 * TILE_SIZE, 2.5 * TILE_SIZE], 0.0);
        let wall = Texture::bricks(64, 64);

        let (w, h) = (160, 120);
        let mut buf = vec![0u32; w * h];
        let mut frame = Frame::new(&mut buf, w, h);
        render_frame(&mut frame, &map, &player, &wall);

        // The center row must contain wall pixels, not the sky clear.
        let sky = pack_rgb(SKY.0, SKY.1, SKY.2);
        let center_row = buf[(h / 2) * w..(h / 2 + 1) * w].to_vec();
        assert!(center_row.iter().any(|&c| c != sky));
        // Alpha byte stays clear everywhere.
        assert!(buf.iter().all(|&c| c & 0xFF00_0000 == 0));
    }

    #[test]
    fn strip_off_the_right_edge_is_ignored() {
        let wall = Texture::bricks(8, 8);
        let mut buf = vec![0u32; 16 * 16];
        let mut frame = Frame::new(&mut buf, 16, 16);
        let strip = Strip {
            screen_x: 99,
            height: 10.0,
            vertical_offset: 3.0,
            full_height: 10.0,
            texture_u: 0.5,
            texture_v_start: 0.0,
            shade: 1.0,
        };
        draw_strip(&mut frame, &strip, &wall);
        assert!(buf.iter().all(|&c| c == 0));
    }
}
