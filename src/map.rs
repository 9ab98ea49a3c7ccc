//! Grid map: a fixed rectangle of floor/wall cells, loaded once from a
//! plain-text file and never mutated afterwards. All cell queries are
//! bounds checked; callers get `None`/`false` instead of a panic for
//! coordinates outside the grid.

use std::fmt;
use std::fs;
use std::path::Path;

use crate::config::TILE_SIZE;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tile {
    Floor,
    Wall,
}

#[derive(Debug)]
pub enum MapError {
    Empty,
    RaggedLine {
        line: usize,
        expected: usize,
        found: usize,
    },
    InvalidChar {
        line: usize,
        column: usize,
        ch: char,
    },
}

impl fmt::Display for MapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MapError::Empty => write!(f, "map file contains no rows"),
            MapError::RaggedLine {
                line,
                expected,
                found,
            } => write!(
                f,
                "line {line}: expected {expected} characters, found {found}"
            ),
            MapError::InvalidChar { line, column, ch } => {
                write!(f, "line {line}, column {column}: invalid character '{ch}'")
            }
        }
    }
}

impl std::error::Error for MapError {}

#[derive(Debug)]
pub struct Map {
    width: usize,
    height: usize,
    tiles: Vec<Tile>,
}

impl Map {
    /// Parses the text map format: one line per row, '0' = floor,
    /// '1' = wall, every row the same width. Anything else is fatal.
    pub fn from_str(text: &str) -> Result<Self, MapError> {
        let mut tiles = Vec::new();
        let mut width = 0usize;
        let mut height = 0usize;

        for (row, line) in text.lines().enumerate() {
            let count = line.chars().count();
            if row == 0 {
                if count == 0 {
                    return Err(MapError::Empty);
                }
                width = count;
            } else if count != width {
                return Err(MapError::RaggedLine {
                    line: row + 1,
                    expected: width,
                    found: count,
                });
            }
            for (col, ch) in line.chars().enumerate() {
                match ch {
                    '0' => tiles.push(Tile::Floor),
                    '1' => tiles.push(Tile::Wall),
                    other => {
                        return Err(MapError::InvalidChar {
                            line: row + 1,
                            column: col + 1,
                            ch: other,
                        });
                    }
                }
            }
            height += 1;
        }

        if height == 0 {
            return Err(MapError::Empty);
        }
        Ok(Self {
            width,
            height,
            tiles,
        })
    }

    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let text = fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("opening map file {}: {e}", path.display()))?;
        let map = Self::from_str(&text)
            .map_err(|e| anyhow::anyhow!("parsing map file {}: {e}", path.display()))?;
        Ok(map)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Map extent in world units.
    pub fn world_width(&self) -> f32 {
        self.width as f32 * TILE_SIZE
    }

    pub fn world_height(&self) -> f32 {
        self.height as f32 * TILE_SIZE
    }

    pub fn tile(&self, x: usize, y: usize) -> Option<Tile> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.tiles[y * self.width + x])
    }

    /// Cell under a world-space point, or `None` outside the map.
    pub fn cell_at_world(&self, x: f32, y: f32) -> Option<Tile> {
        if x < 0.0 || y < 0.0 {
            return None;
        }
        let cx = (x / TILE_SIZE) as usize;
        let cy = (y / TILE_SIZE) as usize;
        self.tile(cx, cy)
    }

    /// Shared wall query for the ray engine and the minimap marcher.
    /// Out-of-bounds points are not walls; callers treat them as the end
    /// of the search instead.
    pub fn wall_at_world(&self, x: f32, y: f32) -> bool {
        matches!(self.cell_at_world(x, y), Some(Tile::Wall))
    }

    pub fn floor_at_world(&self, x: f32, y: f32) -> bool {
        matches!(self.cell_at_world(x, y), Some(Tile::Floor))
    }

    pub fn in_bounds_world(&self, x: f32, y: f32) -> bool {
        x >= 0.0 && y >= 0.0 && x < self.world_width() && y < self.world_height()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn all_floor(w: usize, h: usize) -> String {
        let row = "0".repeat(w);
        let mut s = String::new();
        for _ in 0..h {
            s.push_str(&row);
            s.push('\n');
        }
        s
    }

    #[test]
    fn all_floor_round_trip() {
        let map = Map::from_str(&all_floor(6, 4)).unwrap();
        assert_eq!(map.width(), 6);
        assert_eq!(map.height(), 4);
        for y in 0..4 {
            for x in 0..6 {
                assert_eq!(map.tile(x, y), Some(Tile::Floor));
            }
        }
    }

    #[test]
    fn single_wall_is_the_only_wall() {
        let mut rows: Vec<String> = (0..5).map(|_| "00000".to_string()).collect();
        rows[2].replace_range(3..4, "1");
        let map = Map::from_str(&rows.join("\n")).unwrap();
        for y in 0..5 {
            for x in 0..5 {
                let expect = if (x, y) == (3, 2) { Tile::Wall } else { Tile::Floor };
                assert_eq!(map.tile(x, y), Some(expect));
            }
        }
    }

    #[test]
    fn invalid_character_is_fatal() {
        let err = Map::from_str("010\n0x0\n010").unwrap_err();
        match err {
            MapError::InvalidChar { line, column, ch } => {
                assert_eq!((line, column, ch), (2, 2, 'x'));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn short_line_is_fatal() {
        assert!(matches!(
            Map::from_str("0000\n000"),
            Err(MapError::RaggedLine { line: 2, .. })
        ));
    }

    #[test]
    fn empty_input_is_fatal() {
        assert!(matches!(Map::from_str(""), Err(MapError::Empty)));
    }

    #[test]
    fn out_of_range_queries_are_guarded() {
        let map = Map::from_str(&all_floor(3, 3)).unwrap();
        assert_eq!(map.tile(3, 0), None);
        assert_eq!(map.tile(0, 3), None);
        assert_eq!(map.cell_at_world(-1.0, 0.0), None);
        assert!(!map.wall_at_world(-0.5, 10.0));
        assert!(!map.floor_at_world(map.world_width() + 1.0, 0.0));
    }
}
