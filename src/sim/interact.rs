//! Player actions: picking up, dropping, and using carried objects
//!
//! Both actions address the tile directly ahead of the player. Every blocked
//! action is a silent no-op; the `bool` returns exist so a host can play an
//! error cue.

use super::crops;
use super::rect::Rect;
use super::state::{EntityId, FarmState, PickupKind, PickupState, StructureKind};
use crate::consts::{GROWTH_FLOOR, MAX_STAGE};
use crate::{tile_center, world_to_tile};

/// Pickup/drop action. Empty-handed it tries, in order: take a resting
/// pickup, draw from a structure, harvest a mature crop. Holding something
/// it tries structure-specific hand-offs, then a plain drop.
pub fn interact(state: &mut FarmState) -> bool {
    match state.player.held {
        None => try_take(state),
        Some(id) => try_give_or_drop(state, id),
    }
}

fn try_take(state: &mut FarmState) -> bool {
    let tile = state.target_tile();

    if let Some(i) = state.pickup_index_at(tile) {
        let id = state.pickups[i].id;
        state.pickups[i].state = PickupState::Held;
        state.player.held = Some(id);
        return true;
    }

    if let Some(kind) = state.structure_at_point(state.probe_point()).map(|s| s.kind) {
        return match kind {
            StructureKind::Well => {
                let charges = state.tuning.can_charges;
                state.spawn_held_pickup(PickupKind::WateringCan { charges });
                true
            }
            // Nothing to take from the bin
            StructureKind::DropOff => false,
        };
    }

    if let Some(i) = state.crop_index_at(tile) {
        if state.crops[i].stage == MAX_STAGE {
            let day = state.day;
            state.crops[i].stage = GROWTH_FLOOR;
            state.crops[i].watered = true;
            if let Some(t) = state.level.get_tile_mut(tile.x, tile.y) {
                // Harvesting leaves watered soil behind
                t.index = 2;
            }
            state.spawn_held_pickup(PickupKind::Parsnip { harvested_day: day });
            return true;
        }
    }

    false
}

fn try_give_or_drop(state: &mut FarmState, id: EntityId) -> bool {
    let Some(held) = state.pickup_index_by_id(id) else {
        debug_assert!(false, "held pickup {id} does not exist");
        state.player.held = None;
        return false;
    };

    // Structure hand-offs take priority over dropping
    if let Some(kind) = state.structure_at_point(state.probe_point()).map(|s| s.kind) {
        match (kind, state.pickups[held].kind) {
            (StructureKind::DropOff, PickupKind::Parsnip { .. }) => {
                state.delete_pickups(&[id]);
                state.delivered_today += 1;
                log::info!("produce dropped off ({} waiting for day's end)", state.delivered_today);
                return true;
            }
            (StructureKind::Well, PickupKind::WateringCan { .. }) => {
                state.pickups[held].kind =
                    PickupKind::WateringCan { charges: state.tuning.can_charges };
                return true;
            }
            _ => {}
        }
    }

    let tile = state.target_tile();
    let Some(t) = state.level.get_tile(tile.x, tile.y) else {
        return false;
    };
    if t.solid
        || tile == world_to_tile(state.player.spawn)
        || state.pickup_index_at(tile).is_some()
        || state.crops.iter().any(|c| c.tile == tile && c.stage > 0)
    {
        return false;
    }
    let rect = Rect::from_center(tile_center(tile), state.pickups[held].body.size);
    if state
        .structures
        .iter()
        .any(|s| Rect::from_center(s.pos, s.interactable).overlaps(&rect))
    {
        return false;
    }

    state.pickups[held].state = PickupState::Resting { tile };
    state.pickups[held].pos = tile_center(tile);
    state.player.held = None;

    // Step back out of the placed box so the player is not left overlapping it
    let player_rect = Rect::from_center(state.player.pos, state.player.body.size);
    if rect.overlaps(&player_rect) {
        let facing = state.player.facing;
        if facing.x.abs() > facing.y.abs() {
            state.player.pos.x = rect.x - facing.x.signum() * (rect.w + player_rect.w) / 2.0;
        } else {
            state.player.pos.y = rect.y - facing.y.signum() * (rect.h + player_rect.h) / 2.0;
        }
    }
    true
}

/// Use the held object on the tile ahead: a watering can waters it, a seed
/// bag sows it. Produce has no use.
pub fn use_held(state: &mut FarmState) -> bool {
    let Some(id) = state.player.held else {
        return false;
    };
    let Some(held) = state.pickup_index_by_id(id) else {
        debug_assert!(false, "held pickup {id} does not exist");
        state.player.held = None;
        return false;
    };
    let tile = state.target_tile();

    match state.pickups[held].kind {
        PickupKind::WateringCan { charges } => {
            if !crops::water(state, tile) {
                return false;
            }
            debug_assert!(charges > 0);
            let charges = charges - 1;
            if charges == 0 {
                log::info!("watering can ran dry");
                state.delete_pickups(&[id]);
            } else {
                state.pickups[held].kind = PickupKind::WateringCan { charges };
            }
            true
        }
        PickupKind::SeedBag => crops::sow(state, tile).is_some(),
        PickupKind::Parsnip { .. } => false,
    }
}
