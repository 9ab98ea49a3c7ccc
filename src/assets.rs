//! Texture assets. The wall texture falls back to a procedural pattern;
//! weapon overlays are optional and simply absent when their files are.

use std::path::Path;

use crate::texture::Texture;

const WALL_PATH: &str = "assets/wall.png";
const WEAPON_PATHS: [&str; 3] = [
    "assets/pistol.png",
    "assets/shotgun.png",
    "assets/rifle.png",
];

pub struct Assets {
    pub wall: Texture,
    pub weapons: Vec<Texture>,
}

impl Assets {
    pub fn load() -> Self {
        let wall = match Texture::from_png(Path::new(WALL_PATH)) {
            Ok(t) => t,
            Err(e) => {
                if Path::new(WALL_PATH).exists() {
                    eprintln!("{e}; using procedural wall texture");
                }
                Texture::bricks(64, 64)
            }
        };

        let weapons = WEAPON_PATHS
            .iter()
            .filter_map(|p| Texture::from_png(Path::new(p)).ok())
            .collect();

        Self { wall, weapons }
    }
}
