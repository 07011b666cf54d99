//! Simulation state and entity records
//!
//! Everything the simulation mutates lives in [`FarmState`], which is passed
//! explicitly to every operation - there are no ambient globals. Entities sit
//! in typed vecs and carry monotonically increasing ids that are never
//! reused, so a stale held-object id can never alias a later entity.

use glam::{IVec2, Vec2};

use super::level::{Level, building_info};
use super::physics::{BodyRect, RigidBody};
use super::rect::Rect;
use crate::consts::{PICKUP_SIZE, PLAYER_SIZE, STAGE_HISTORY_LEN, TILE_SIZE};
use crate::tuning::Tuning;
use crate::{tile_center, world_to_tile};

/// Stable entity handle; allocated once, never reused
pub type EntityId = u32;

/// Facing the player returns to at the start of each day
pub const IDLE_FACING: Vec2 = Vec2::new(0.0, -1.0);

/// The single mobile agent
#[derive(Debug, Clone)]
pub struct Player {
    pub id: EntityId,
    pub pos: Vec2,
    pub spawn: Vec2,
    /// Unit vector toward the tile the player is addressing
    pub facing: Vec2,
    pub body: RigidBody,
    /// Carried pickup, if any; mutually exclusive with that pickup resting
    pub held: Option<EntityId>,
}

/// What a portable object is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickupKind {
    /// Watering tool with a limited number of uses
    WateringCan { charges: u32 },
    /// Sows crops, never runs out
    SeedBag,
    /// Harvested produce, tagged with the day it was picked
    Parsnip { harvested_day: u32 },
}

/// Where a portable object currently is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickupState {
    /// Resting on a tile, collidable
    Resting { tile: IVec2 },
    /// In the player's hands
    Held,
}

/// A portable object
#[derive(Debug, Clone)]
pub struct Pickup {
    pub id: EntityId,
    pub kind: PickupKind,
    /// World position; only meaningful while resting
    pub pos: Vec2,
    pub body: RigidBody,
    pub state: PickupState,
}

/// Fixed structures the player can address
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StructureKind {
    Well,
    DropOff,
}

/// A fixed structure; solidity comes from its building tiles, interaction
/// from the box formed by `pos` and `interactable`
#[derive(Debug, Clone)]
pub struct Structure {
    pub id: EntityId,
    pub kind: StructureKind,
    pub pos: Vec2,
    /// Extent of the interaction box centered on `pos`
    pub interactable: Vec2,
}

/// Per-crop growth record
#[derive(Debug, Clone)]
pub struct Crop {
    pub id: EntityId,
    /// Current growth stage; values at or below zero mark a record that the
    /// next day boundary sweeps away
    pub stage: i32,
    pub watered: bool,
    pub tile: IVec2,
    /// Stage in effect during each day, indexed by day number; the rollback
    /// source when a day ends with unwatered crops
    pub stage_history: [i32; STAGE_HISTORY_LEN],
}

/// Complete simulation state for one run
#[derive(Debug, Clone)]
pub struct FarmState {
    pub level: Level,
    pub tuning: Tuning,
    /// Current day, starting at 1; never exceeds `TOTAL_DAYS`
    pub day: u32,
    /// Seconds until the day boundary
    pub day_remaining: f32,
    /// Set once the final day is brought in; the sim freezes afterwards
    pub run_complete: bool,
    pub player: Player,
    pub crops: Vec<Crop>,
    pub pickups: Vec<Pickup>,
    pub structures: Vec<Structure>,
    /// Produce banked at the drop-off bin on completed days
    pub delivered: u32,
    /// Produce dropped off since the last day boundary; banked only if the
    /// day ends fully watered
    pub delivered_today: u32,
    next_id: EntityId,
}

impl FarmState {
    /// Build a run from a level map, placing entities for its spawn markers.
    pub fn new(level_text: &str, tuning: Tuning) -> Self {
        let mut markers = Vec::new();
        let level = Level::parse(level_text, |ch, tile| match ch {
            'S' | 'b' | 'w' | 'C' | 'W' | 'B' => markers.push((ch, tile)),
            _ => {}
        });

        let day_remaining = tuning.day_length;
        let mut state = Self {
            level,
            tuning,
            day: 1,
            day_remaining,
            run_complete: false,
            player: Player {
                id: 0,
                pos: Vec2::ZERO,
                spawn: Vec2::ZERO,
                facing: IDLE_FACING,
                body: RigidBody { size: Vec2::splat(PLAYER_SIZE) },
                held: None,
            },
            crops: Vec::new(),
            pickups: Vec::new(),
            structures: Vec::new(),
            delivered: 0,
            delivered_today: 0,
            next_id: 1,
        };
        state.player.id = state.next_entity_id();

        let mut saw_spawn = false;
        for (ch, tile) in markers {
            match ch {
                'S' => {
                    state.player.spawn = tile_center(tile);
                    state.player.pos = state.player.spawn;
                    saw_spawn = true;
                }
                'b' => {
                    state.spawn_pickup(PickupKind::SeedBag, tile);
                }
                'w' => {
                    let charges = state.tuning.can_charges;
                    state.spawn_pickup(PickupKind::WateringCan { charges }, tile);
                }
                'C' => state.spawn_sown_crop(tile),
                'W' => state.spawn_structure(StructureKind::Well, 'W', tile),
                'B' => state.spawn_structure(StructureKind::DropOff, 'B', tile),
                _ => {}
            }
        }
        if !saw_spawn {
            log::warn!("level has no spawn marker, player starts at the origin tile");
            state.player.spawn = tile_center(IVec2::ZERO);
            state.player.pos = state.player.spawn;
        }

        state
    }

    /// Allocate a fresh entity id
    pub fn next_entity_id(&mut self) -> EntityId {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Place a new pickup resting on `tile`
    pub fn spawn_pickup(&mut self, kind: PickupKind, tile: IVec2) -> EntityId {
        let id = self.next_entity_id();
        self.pickups.push(Pickup {
            id,
            kind,
            pos: tile_center(tile),
            body: RigidBody { size: Vec2::splat(PICKUP_SIZE) },
            state: PickupState::Resting { tile },
        });
        id
    }

    /// Create a new pickup directly in the player's hands
    pub fn spawn_held_pickup(&mut self, kind: PickupKind) -> EntityId {
        debug_assert!(self.player.held.is_none());
        let id = self.next_entity_id();
        self.pickups.push(Pickup {
            id,
            kind,
            pos: self.player.pos,
            body: RigidBody { size: Vec2::splat(PICKUP_SIZE) },
            state: PickupState::Held,
        });
        self.player.held = Some(id);
        id
    }

    /// Record for a crop already sown on the map (the `'C'` marker; the
    /// parser has set the matching tile visual)
    fn spawn_sown_crop(&mut self, tile: IVec2) {
        let id = self.next_entity_id();
        let mut stage_history = [0; STAGE_HISTORY_LEN];
        stage_history[self.day as usize] = 1;
        self.crops.push(Crop { id, stage: 1, watered: false, tile, stage_history });
    }

    /// Register a structure whose building origin tile is `origin` (the
    /// top-left cell of its footprint)
    fn spawn_structure(&mut self, kind: StructureKind, ch: char, origin: IVec2) {
        let Some(info) = building_info(ch) else {
            debug_assert!(false, "structure marker {ch:?} without building info");
            return;
        };
        let size = Vec2::new(info.width as f32, info.height as f32) * TILE_SIZE;
        let pos = tile_center(origin)
            + Vec2::new(
                (info.width - 1) as f32 * TILE_SIZE / 2.0,
                -((info.height - 1) as f32 * TILE_SIZE / 2.0),
            );
        let id = self.next_entity_id();
        self.structures.push(Structure { id, kind, pos, interactable: size });
    }

    /// Index of the crop record at `tile`, live or pending removal
    pub fn crop_index_at(&self, tile: IVec2) -> Option<usize> {
        self.crops.iter().position(|c| c.tile == tile)
    }

    /// Index of the pickup resting on `tile`, if any
    pub fn pickup_index_at(&self, tile: IVec2) -> Option<usize> {
        self.pickups
            .iter()
            .position(|p| p.state == PickupState::Resting { tile })
    }

    pub fn pickup_index_by_id(&self, id: EntityId) -> Option<usize> {
        self.pickups.iter().position(|p| p.id == id)
    }

    /// First structure whose interaction box contains `point`
    pub fn structure_at_point(&self, point: Vec2) -> Option<&Structure> {
        self.structures
            .iter()
            .find(|s| Rect::from_center(s.pos, s.interactable).contains_point(point))
    }

    /// Snapshot of every collidable body for the movement resolver: the
    /// player plus all resting pickups. Held pickups have no world presence.
    pub fn body_rects(&self) -> Vec<BodyRect> {
        let mut bodies = vec![BodyRect {
            entity: self.player.id,
            rect: Rect::from_center(self.player.pos, self.player.body.size),
        }];
        bodies.extend(self.pickups.iter().filter_map(|p| match p.state {
            PickupState::Resting { .. } => Some(BodyRect {
                entity: p.id,
                rect: Rect::from_center(p.pos, p.body.size),
            }),
            PickupState::Held => None,
        }));
        bodies
    }

    /// Delete pickups by id, releasing the player's held reference if it
    /// points at one of them
    pub fn delete_pickups(&mut self, ids: &[EntityId]) {
        if ids.is_empty() {
            return;
        }
        if let Some(held) = self.player.held {
            if ids.contains(&held) {
                self.player.held = None;
            }
        }
        self.pickups.retain(|p| !ids.contains(&p.id));
    }

    /// Tile directly ahead of the player
    pub fn target_tile(&self) -> IVec2 {
        world_to_tile(self.probe_point())
    }

    /// World point one tile ahead of the player, used for structure tests
    pub fn probe_point(&self) -> Vec2 {
        self.player.pos + self.player.facing * TILE_SIZE
    }
}
