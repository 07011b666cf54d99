//! Crop lifecycle: sowing, watering, and the day-boundary transition
//!
//! Growth only happens at day boundaries, and only when every live crop was
//! watered during the day. A day that ends with any crop dry is rolled back:
//! each crop returns to the stage recorded for the previous day, the day
//! counter stays put, and produce harvested during the failed day evaporates.
//! The per-day `stage_history` on each record is what makes the rollback
//! possible.

use glam::IVec2;

use super::state::{Crop, EntityId, FarmState, IDLE_FACING, PickupKind};
use crate::consts::{MAX_STAGE, STAGE_HISTORY_LEN, TOTAL_DAYS};

/// Result of a day-boundary transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayOutcome {
    /// Whether every live crop had been watered (vacuously true with none)
    pub all_watered: bool,
}

/// Tileset index for farmland carrying a crop at `stage`
///
/// Stage `s >= 1` maps to `2s + 1` / `2s + 2` (dry / watered); anything at or
/// below zero reads as empty tilled soil (`1` / `2`).
pub(crate) fn stage_tile_index(stage: i32, watered: bool) -> i32 {
    let base = if stage <= 0 { 1 } else { 2 * stage + 1 };
    base + watered as i32
}

/// Sow a crop on `tile`.
///
/// Requires empty farmland with no crop record (live or pending removal) and
/// no resting pickup on the tile. The new crop inherits the soil's moisture,
/// and its stage is recorded for the current day.
pub fn sow(state: &mut FarmState, tile: IVec2) -> Option<EntityId> {
    let index = state.level.get_tile(tile.x, tile.y)?.index;
    if !(1..=2).contains(&index) {
        return None;
    }
    if state.crop_index_at(tile).is_some() || state.pickup_index_at(tile).is_some() {
        return None;
    }

    let watered = index % 2 == 0;
    let id = state.next_entity_id();
    let mut stage_history = [0; STAGE_HISTORY_LEN];
    stage_history[state.day as usize] = 1;
    state.crops.push(Crop { id, stage: 1, watered, tile, stage_history });
    if let Some(t) = state.level.get_tile_mut(tile.x, tile.y) {
        t.index = stage_tile_index(1, watered);
    }
    Some(id)
}

/// Water `tile`: advance a dry farmland tile to its watered visual and mark
/// at most one crop there as watered. No-op on non-farmland or when the tile
/// is already wet.
pub fn water(state: &mut FarmState, tile: IVec2) -> bool {
    let Some(t) = state.level.get_tile_mut(tile.x, tile.y) else {
        return false;
    };
    if !(1..=10).contains(&t.index) || t.index % 2 == 0 {
        return false;
    }
    t.index += 1;
    if let Some(crop) = state.crops.iter_mut().find(|c| c.tile == tile && c.stage > 0) {
        crop.watered = true;
    }
    true
}

/// The day-boundary transition.
///
/// On a fully watered day every crop advances a stage (capped) and the new
/// stage is recorded under the incremented day number; deliveries made during
/// the day are banked. Otherwise every crop reverts to the previous day's
/// recorded stage, the day repeats, and the day's harvests and deliveries are
/// undone. Either way watered flags clear, tile visuals refresh, records at
/// or below the growth floor are swept, soil dries out, and the player is
/// put back at the spawn point.
///
/// Once the final day completes fully watered the run is over and no further
/// transition occurs.
pub fn advance_day(state: &mut FarmState) -> DayOutcome {
    let all_watered = state
        .crops
        .iter()
        .filter(|c| c.stage > 0)
        .all(|c| c.watered);

    if all_watered {
        state.delivered += std::mem::take(&mut state.delivered_today);
        if state.day >= TOTAL_DAYS {
            state.run_complete = true;
            log::info!(
                "day {} complete, run finished with {} delivered",
                state.day,
                state.delivered
            );
            return DayOutcome { all_watered };
        }
        state.day += 1;
        for crop in &mut state.crops {
            crop.stage = (crop.stage + 1).min(MAX_STAGE);
            crop.stage_history[state.day as usize] = crop.stage;
            crop.watered = false;
        }
        log::info!("day {} begins, {} crops growing", state.day, state.crops.len());
    } else {
        let previous = (state.day - 1) as usize;
        for crop in &mut state.crops {
            crop.stage = crop.stage_history[previous];
            crop.watered = false;
        }
        state.delivered_today = 0;
        log::info!("crops went dry, day {} repeats", state.day);
    }

    for crop in &state.crops {
        if let Some(t) = state.level.get_tile_mut(crop.tile.x, crop.tile.y) {
            t.index = stage_tile_index(crop.stage, false);
        }
    }

    // Sweep records that fell to or below the growth floor, and on a failed
    // day also undo the day's harvests (the produce never happened).
    state.crops.retain(|c| c.stage > 0);
    if !all_watered {
        let day = state.day;
        let undone: Vec<EntityId> = state
            .pickups
            .iter()
            .filter(|p| matches!(p.kind, PickupKind::Parsnip { harvested_day } if harvested_day == day))
            .map(|p| p.id)
            .collect();
        state.delete_pickups(&undone);
    }

    state.level.reset_watered();
    state.player.pos = state.player.spawn;
    state.player.facing = IDLE_FACING;

    DayOutcome { all_watered }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Tuning;
    use crate::consts::GROWTH_FLOOR;

    const MAP: &str = "\
GGGGG
GDDDG
GDDDG
GGSGG";

    fn state() -> FarmState {
        FarmState::new(MAP, Tuning::default())
    }

    #[test]
    fn test_sow_water_advance_scenario() {
        let mut state = state();
        let tile = IVec2::new(2, 2);

        let id = sow(&mut state, tile).expect("tilled soil accepts a seed");
        let crop = &state.crops[0];
        assert_eq!(crop.id, id);
        assert_eq!(crop.stage, 1);
        assert!(!crop.watered);
        assert_eq!(crop.stage_history, [0, 1, 0, 0, 0, 0, 0, 0]);
        assert_eq!(state.level.get_tile(2, 2).unwrap().index, 3);

        assert!(water(&mut state, tile));
        assert!(state.crops[0].watered);
        assert_eq!(state.level.get_tile(2, 2).unwrap().index, 4);

        let outcome = advance_day(&mut state);
        assert!(outcome.all_watered);
        assert_eq!(state.day, 2);
        let crop = &state.crops[0];
        assert_eq!(crop.stage, 2);
        assert!(!crop.watered);
        assert_eq!(crop.stage_history, [0, 1, 2, 0, 0, 0, 0, 0]);
        assert_eq!(state.level.get_tile(2, 2).unwrap().index, 5);

        // Day 2 passes dry: the day's growth is discarded and day 2 repeats
        let outcome = advance_day(&mut state);
        assert!(!outcome.all_watered);
        assert_eq!(state.day, 2);
        assert_eq!(state.crops[0].stage, 1);
        assert_eq!(state.level.get_tile(2, 2).unwrap().index, 3);
    }

    #[test]
    fn test_sow_preconditions() {
        let mut state = state();
        // Grass is not farmland
        assert!(sow(&mut state, IVec2::new(0, 0)).is_none());
        // Out of bounds
        assert!(sow(&mut state, IVec2::new(-1, 0)).is_none());

        let tile = IVec2::new(1, 1);
        assert!(sow(&mut state, tile).is_some());
        // Occupied by a crop now
        assert!(sow(&mut state, tile).is_none());

        // Occupied by a resting pickup
        let blocked = IVec2::new(2, 1);
        state.spawn_pickup(PickupKind::SeedBag, blocked);
        assert!(sow(&mut state, blocked).is_none());
    }

    #[test]
    fn test_sowing_wet_soil_starts_watered() {
        let mut state = state();
        let tile = IVec2::new(1, 2);
        assert!(water(&mut state, tile));
        let id = sow(&mut state, tile).unwrap();
        let crop = state.crops.iter().find(|c| c.id == id).unwrap();
        assert!(crop.watered);
        assert_eq!(state.level.get_tile(1, 2).unwrap().index, 4);
    }

    #[test]
    fn test_water_is_idempotent_per_day() {
        let mut state = state();
        let tile = IVec2::new(3, 1);
        assert!(water(&mut state, tile));
        // Already wet: no-op
        assert!(!water(&mut state, tile));
        assert_eq!(state.level.get_tile(3, 1).unwrap().index, 2);
        // Grass can't be watered
        assert!(!water(&mut state, IVec2::new(0, 3)));
    }

    #[test]
    fn test_vacuous_day_advances_without_crops() {
        let mut state = state();
        let outcome = advance_day(&mut state);
        assert!(outcome.all_watered);
        assert_eq!(state.day, 2);
    }

    #[test]
    fn test_stage_caps_at_max() {
        let mut state = state();
        let tile = IVec2::new(2, 1);
        sow(&mut state, tile).unwrap();
        for _ in 0..5 {
            water(&mut state, tile);
            advance_day(&mut state);
        }
        assert_eq!(state.crops[0].stage, MAX_STAGE);
        assert_eq!(state.day, 6);
    }

    #[test]
    fn test_unwatered_first_day_kills_fresh_crop() {
        let mut state = state();
        sow(&mut state, IVec2::new(2, 2)).unwrap();
        let outcome = advance_day(&mut state);
        assert!(!outcome.all_watered);
        // Reverts to the (zero) stage recorded before it existed and is swept
        assert!(state.crops.is_empty());
        assert_eq!(state.level.get_tile(2, 2).unwrap().index, 1);
    }

    #[test]
    fn test_harvested_record_is_swept_after_a_watered_day() {
        let mut state = state();
        let tile = IVec2::new(1, 1);
        sow(&mut state, tile).unwrap();
        state.crops[0].stage = GROWTH_FLOOR;
        state.crops[0].watered = true;

        let outcome = advance_day(&mut state);
        assert!(outcome.all_watered);
        assert!(state.crops.is_empty());
        assert_eq!(state.level.get_tile(1, 1).unwrap().index, 1);
    }

    #[test]
    fn test_failed_day_undoes_harvest() {
        let mut state = state();
        let tile = IVec2::new(1, 1);
        sow(&mut state, tile).unwrap();
        water(&mut state, tile);
        advance_day(&mut state);
        water(&mut state, tile);
        advance_day(&mut state);
        // Leave it dry on day 3 while holding produce picked "today"
        let held = state.spawn_held_pickup(PickupKind::Parsnip { harvested_day: state.day });
        let resting = state.spawn_pickup(PickupKind::Parsnip { harvested_day: state.day }, IVec2::new(3, 2));
        let stale = state.spawn_pickup(PickupKind::Parsnip { harvested_day: 1 }, IVec2::new(3, 1));

        let outcome = advance_day(&mut state);
        assert!(!outcome.all_watered);
        assert!(state.pickup_index_by_id(held).is_none());
        assert!(state.pickup_index_by_id(resting).is_none());
        assert!(state.pickup_index_by_id(stale).is_some());
        assert_eq!(state.player.held, None);
    }

    #[test]
    fn test_deliveries_bank_only_on_watered_days() {
        let mut state = state();
        state.delivered_today = 2;
        advance_day(&mut state);
        assert_eq!(state.delivered, 2);
        assert_eq!(state.delivered_today, 0);

        // A dry crop makes the next boundary fail and forfeits the chute
        sow(&mut state, IVec2::new(1, 1)).unwrap();
        state.delivered_today = 3;
        advance_day(&mut state);
        assert_eq!(state.delivered, 2);
        assert_eq!(state.delivered_today, 0);
    }

    #[test]
    fn test_final_day_completes_the_run() {
        {
            let mut state = state();
            state.day = TOTAL_DAYS;
            let outcome = advance_day(&mut state);
            assert!(outcome.all_watered);
            assert!(state.run_complete);
            assert_eq!(state.day, TOTAL_DAYS);
        }

        // A failed final day repeats instead of completing
        let mut state = state();
        state.day = TOTAL_DAYS;
        sow(&mut state, IVec2::new(1, 1)).unwrap();
        state.crops[0].stage_history[TOTAL_DAYS as usize - 1] = 1;
        let outcome = advance_day(&mut state);
        assert!(!outcome.all_watered);
        assert!(!state.run_complete);
        assert_eq!(state.day, TOTAL_DAYS);
        assert_eq!(state.crops[0].stage, 1);
    }

    #[test]
    fn test_day_boundary_resets_soil_and_player() {
        let mut state = state();
        water(&mut state, IVec2::new(3, 2));
        state.player.pos = crate::tile_center(IVec2::new(1, 1));
        state.player.facing = glam::Vec2::new(1.0, 0.0);

        advance_day(&mut state);
        assert_eq!(state.level.get_tile(3, 2).unwrap().index, 1);
        assert_eq!(state.player.pos, state.player.spawn);
        assert_eq!(state.player.facing, IDLE_FACING);
    }

    #[test]
    fn test_stage_history_len_covers_every_day() {
        assert_eq!(STAGE_HISTORY_LEN, TOTAL_DAYS as usize + 1);
    }
}
