//! Furrow - a tiny top-down farming sim
//!
//! Core modules:
//! - `sim`: Deterministic simulation (tile grid, movement resolution, crops, interactions)
//! - `tuning`: Data-driven game balance
//!
//! Rendering, audio and input polling live in the host; the host feeds a
//! `TickInput` per fixed step and reads simulation state back for drawing.

pub mod sim;
pub mod tuning;

pub use tuning::Tuning;

use glam::{IVec2, Vec2};

/// Game configuration constants
pub mod consts {
    /// World units per grid tile
    pub const TILE_SIZE: f32 = 16.0;

    /// Length of a run; the day counter never exceeds this
    pub const TOTAL_DAYS: u32 = 7;
    /// Number of entries in a crop's per-day stage history
    pub const STAGE_HISTORY_LEN: usize = TOTAL_DAYS as usize + 1;

    /// Final growth stage; a crop at this stage is harvestable
    pub const MAX_STAGE: i32 = 4;
    /// Stage value marking a harvested record awaiting cleanup
    pub const GROWTH_FLOOR: i32 = -1;

    /// Player collision box
    pub const PLAYER_SIZE: f32 = 16.0;
    /// Collision box of a pickup resting on a tile
    pub const PICKUP_SIZE: f32 = 16.0;

    /// Per-axis displacement below this counts as fully resolved
    pub const MOVE_EPSILON: f32 = 1e-7;
}

/// Tile coordinate containing a world position
#[inline]
pub fn world_to_tile(pos: Vec2) -> IVec2 {
    (pos / consts::TILE_SIZE).floor().as_ivec2()
}

/// World-space center of a tile
#[inline]
pub fn tile_center(tile: IVec2) -> Vec2 {
    tile.as_vec2() * consts::TILE_SIZE + Vec2::splat(consts::TILE_SIZE / 2.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_world_tile_round_trip() {
        assert_eq!(world_to_tile(Vec2::new(0.0, 0.0)), IVec2::new(0, 0));
        assert_eq!(world_to_tile(Vec2::new(15.9, 15.9)), IVec2::new(0, 0));
        assert_eq!(world_to_tile(Vec2::new(16.0, 31.0)), IVec2::new(1, 1));
        assert_eq!(world_to_tile(Vec2::new(-0.1, 5.0)), IVec2::new(-1, 0));

        assert_eq!(tile_center(IVec2::new(0, 0)), Vec2::new(8.0, 8.0));
        assert_eq!(tile_center(IVec2::new(2, 1)), Vec2::new(40.0, 24.0));
        assert_eq!(world_to_tile(tile_center(IVec2::new(7, 3))), IVec2::new(7, 3));
    }
}
