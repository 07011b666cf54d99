//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must stay pure and
//! deterministic:
//! - Fixed timestep only
//! - Stable iteration order (by entity vec position)
//! - No rendering or platform dependencies
//!
//! Hosts drive it with a [`TickInput`] per step and read state back for
//! drawing.

pub mod crops;
pub mod interact;
pub mod level;
pub mod physics;
pub mod rect;
pub mod state;
pub mod tick;

pub use crops::{DayOutcome, advance_day, sow, water};
pub use interact::{interact, use_held};
pub use level::{BuildingInfo, Level, Tile, building_info};
pub use physics::{BodyRect, RigidBody, resolve_move};
pub use rect::Rect;
pub use state::{
    Crop, EntityId, FarmState, IDLE_FACING, Pickup, PickupKind, PickupState, Player, Structure,
    StructureKind,
};
pub use tick::{TickInput, tick};
