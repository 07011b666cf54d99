//! Axis-aligned rectangles in center + size form
//!
//! All collision shapes in the game are AABBs; `x`/`y` is the center, so a
//! rect can be built straight from an entity position and a body size.

use glam::{IVec2, Vec2};

use crate::consts::TILE_SIZE;
use crate::tile_center;

/// Center + size axis-aligned rectangle
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    /// Rect at `pos` with extent `size`
    pub fn from_center(pos: Vec2, size: Vec2) -> Self {
        Self::new(pos.x, pos.y, size.x, size.y)
    }

    /// The 16x16 rect covering a grid tile
    pub fn tile(tile: IVec2) -> Self {
        let c = tile_center(tile);
        Self::new(c.x, c.y, TILE_SIZE, TILE_SIZE)
    }

    #[inline]
    pub fn position(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.x - self.w / 2.0
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.w / 2.0
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.y + self.h / 2.0
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y - self.h / 2.0
    }

    /// Strict overlap test; rects that merely touch do not overlap
    #[inline]
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.overlaps_x(other) && self.overlaps_y(other)
    }

    /// Overlap along the X axis only
    #[inline]
    pub fn overlaps_x(&self, other: &Rect) -> bool {
        (self.x - other.x).abs() < self.w / 2.0 + other.w / 2.0
    }

    /// Overlap along the Y axis only
    #[inline]
    pub fn overlaps_y(&self, other: &Rect) -> bool {
        (self.y - other.y).abs() < self.h / 2.0 + other.h / 2.0
    }

    /// Whether a point lies inside the rect (edges count as inside)
    pub fn contains_point(&self, p: Vec2) -> bool {
        p.x >= self.left() && p.x <= self.right() && p.y >= self.bottom() && p.y <= self.top()
    }
}
