//! Tile grid: static collision geometry and tile visuals
//!
//! The level is a rectangular grid of [`Tile`]s parsed from a character map.
//! Rows are stored top-down (text order) while the public coordinate system
//! is bottom-up: tile `(0, 0)` is the bottom-left corner of the map. All
//! index arithmetic goes through [`Level::get_tile`] so the two conventions
//! never mix.
//!
//! Farmland moisture is encoded in the tile index parity: indices `1..=10`
//! are soil/crop visuals where odd means dry and even means watered. A crop
//! at stage `s` shows index `2s + 1` (dry) or `2s + 2` (watered); empty
//! tilled soil is `1`/`2`.

use glam::IVec2;

use super::rect::Rect;
use crate::consts::TILE_SIZE;
use crate::world_to_tile;

/// One cell of the static world grid
///
/// `index` is a 1-based tileset lookup; `0` means nothing to draw.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Tile {
    pub index: i32,
    pub solid: bool,
}

/// Tileset footprint of a multi-tile building
#[derive(Debug, Clone, Copy)]
pub struct BuildingInfo {
    /// Tileset index of the building's top-left cell
    pub start_index: i32,
    /// Footprint in tiles
    pub width: i32,
    pub height: i32,
}

/// Building metadata for a map character, if it starts a building
pub fn building_info(ch: char) -> Option<BuildingInfo> {
    match ch {
        'W' => Some(BuildingInfo { start_index: 13, width: 2, height: 2 }),
        'B' => Some(BuildingInfo { start_index: 17, width: 2, height: 2 }),
        _ => None,
    }
}

/// Whether a map character belongs to a building footprint
fn is_building_cell(ch: char) -> bool {
    ch == '+' || building_info(ch).is_some()
}

/// The static tile grid
#[derive(Debug, Clone)]
pub struct Level {
    tiles: Vec<Tile>,
    width: i32,
    height: i32,
}

impl Level {
    /// Parse a character map into a grid.
    ///
    /// Map characters: `'D'` tilled soil, `'C'` pre-sown crop, `'S'` spawn
    /// point, `'G'` grass, `'b'`/`'w'` grass with a starting pickup, `'#'`
    /// fence, `'W'` well, `'B'` drop-off bin, `'+'` building continuation.
    /// Short rows are padded with empty tiles.
    ///
    /// `on_spawn` is called once per cell with the map character and the
    /// tile coordinate, so the caller can place entities for spawn-point
    /// characters; tile data itself is handled here.
    pub fn parse(text: &str, mut on_spawn: impl FnMut(char, IVec2)) -> Self {
        let rows: Vec<Vec<char>> = text.lines().map(|l| l.chars().collect()).collect();
        let height = rows.len() as i32;
        let width = rows.iter().map(|r| r.len()).max().unwrap_or(0) as i32;
        if width == 0 {
            log::warn!("level text is empty");
        }

        let cell = |r: usize, x: usize| -> char {
            rows[r].get(x).copied().unwrap_or(' ')
        };

        let mut tiles = Vec::with_capacity((width * height) as usize);
        for r in 0..height as usize {
            for x in 0..width as usize {
                let ch = cell(r, x);
                let tile = match ch {
                    'D' => Tile { index: 1, solid: false },
                    'C' => Tile { index: 3, solid: false },
                    'S' | 'G' | 'b' | 'w' => Tile { index: 11, solid: false },
                    '#' => Tile { index: 12, solid: true },
                    'W' | 'B' => Tile {
                        index: building_info(ch).map(|b| b.start_index).unwrap_or(0),
                        solid: true,
                    },
                    '+' => {
                        // Walk left, then up, to the building origin this
                        // cell belongs to; its offset picks the tileset cell.
                        let mut bx = 0;
                        while x >= bx + 1 && is_building_cell(cell(r, x - bx - 1)) {
                            bx += 1;
                        }
                        let mut by = 0;
                        while r >= by + 1 && is_building_cell(cell(r - by - 1, x)) {
                            by += 1;
                        }
                        match building_info(cell(r - by, x - bx)) {
                            Some(b) => Tile { index: b.start_index + bx as i32 + by as i32 * b.width, solid: true },
                            None => {
                                log::warn!("stray building cell at column {x}, row {r}");
                                Tile::default()
                            }
                        }
                    }
                    ' ' => Tile::default(),
                    other => {
                        log::debug!("unknown map character {other:?} treated as empty");
                        Tile::default()
                    }
                };
                tiles.push(tile);
                on_spawn(ch, IVec2::new(x as i32, height - 1 - r as i32));
            }
        }

        Self { tiles, width, height }
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    #[inline]
    fn idx(&self, x: i32, y: i32) -> usize {
        ((self.height - 1 - y) * self.width + x) as usize
    }

    /// Tile at `(x, y)`, or `None` outside the grid
    pub fn get_tile(&self, x: i32, y: i32) -> Option<&Tile> {
        if x < 0 || x >= self.width || y < 0 || y >= self.height {
            return None;
        }
        Some(&self.tiles[self.idx(x, y)])
    }

    pub fn get_tile_mut(&mut self, x: i32, y: i32) -> Option<&mut Tile> {
        if x < 0 || x >= self.width || y < 0 || y >= self.height {
            return None;
        }
        let i = self.idx(x, y);
        Some(&mut self.tiles[i])
    }

    /// First solid tile rect overlapping `rect`, if any.
    ///
    /// Only the 3x3 tile neighborhood around the rect's center is scanned.
    /// That window is sufficient because bodies are at most one tile wide
    /// and the movement resolver never steps more than one world unit per
    /// iteration. Tiles outside the map act as a solid boundary.
    pub fn overlap(&self, rect: &Rect) -> Option<Rect> {
        let center = world_to_tile(rect.position());
        for dy in -1..=1 {
            for dx in -1..=1 {
                let t = center + IVec2::new(dx, dy);
                let solid = match self.get_tile(t.x, t.y) {
                    Some(tile) => tile.solid,
                    None => true,
                };
                if !solid {
                    continue;
                }
                let r = Rect::tile(t);
                if r.overlaps(rect) {
                    return Some(r);
                }
            }
        }
        None
    }

    /// Step every watered farmland tile back to its dry variant.
    ///
    /// Runs at each day boundary; indices outside `1..=10` (grass,
    /// buildings, fences) are untouched.
    pub fn reset_watered(&mut self) {
        for tile in &mut self.tiles {
            if (1..=10).contains(&tile.index) {
                tile.index += tile.index % 2 - 1;
            }
        }
    }

    /// Bounding rect of the whole map in world units
    pub fn map_bounds(&self) -> Rect {
        let w = self.width as f32 * TILE_SIZE;
        let h = self.height as f32 * TILE_SIZE;
        Rect::new(w / 2.0, h / 2.0, w, h)
    }
}
