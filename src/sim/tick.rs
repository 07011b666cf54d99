//! Fixed timestep simulation tick
//!
//! One call per frame step: movement intent goes through the resolver,
//! button edges drive the interaction layer, and the day timer counts down
//! toward the next boundary.

use glam::Vec2;

use super::state::FarmState;
use super::{crops, interact, physics};

/// Input commands for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Directional intent; clamped to unit length before use
    pub move_dir: Vec2,
    /// Pickup/drop button edge
    pub interact: bool,
    /// Use-held-object button edge
    pub use_held: bool,
}

/// Advance the simulation by one timestep of `dt` seconds
pub fn tick(state: &mut FarmState, input: &TickInput, dt: f32) {
    if state.run_complete {
        return;
    }

    let intent = input.move_dir.clamp_length_max(1.0);
    if intent != Vec2::ZERO {
        state.player.facing = intent.normalize();
        let displacement = intent * state.tuning.move_speed * dt;
        let bodies = state.body_rects();
        let size = state.player.body.size;
        physics::resolve_move(
            &state.level,
            state.player.id,
            &mut state.player.pos,
            size,
            &bodies,
            displacement,
        );
    }

    if input.interact {
        interact::interact(state);
    }
    if input.use_held {
        interact::use_held(state);
    }

    state.day_remaining -= dt;
    if state.day_remaining <= 0.0 {
        crops::advance_day(state);
        state.day_remaining = state.tuning.day_length;
    }
}
