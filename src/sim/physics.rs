//! Movement resolution against the tile grid and other dynamic bodies
//!
//! Not a true continuous sweep: the resolver repeatedly tries to commit the
//! remaining displacement, clamped to one world unit per attempt, and on a
//! hit cancels the blocked axis and halves what is left. The halving makes
//! termination a geometric certainty; the one-unit clamp is what keeps the
//! grid's 3x3 overlap window (and the no-tunneling behavior) valid. At
//! extreme speeds against very thin geometry this can still stall or skip -
//! accepted as a trade for simplicity.

use glam::Vec2;

use super::level::Level;
use super::rect::Rect;
use super::state::EntityId;
use crate::consts::MOVE_EPSILON;

/// Collision box size of a dynamic entity; position lives on the owner
#[derive(Debug, Clone, Copy)]
pub struct RigidBody {
    pub size: Vec2,
}

/// A dynamic body's world rect paired with its owning entity
#[derive(Debug, Clone, Copy)]
pub struct BodyRect {
    pub entity: EntityId,
    pub rect: Rect,
}

/// Advance `pos` by `movement`, deflecting off solid tiles and other bodies.
///
/// `others` may contain the mover itself; it is skipped by entity identity,
/// never by geometry, so two coincident bodies still collide. The grid is
/// always tested before other bodies - a tile hit must not be masked by a
/// body hit in the same iteration.
///
/// A body that already overlaps an obstacle simply cannot move along the
/// blocked axes until the overlap resolves externally; there is no error
/// path.
pub fn resolve_move(
    level: &Level,
    mover: EntityId,
    pos: &mut Vec2,
    size: Vec2,
    others: &[BodyRect],
    mut movement: Vec2,
) {
    debug_assert!(movement.is_finite());

    // Blocked iterations halve what is left and free iterations commit up to
    // one unit, so 2|d| plus the halvings down to epsilon always suffice.
    // The cap only exists to stop pathological float cases from spinning.
    let max_iterations = 64 + (2.0 * movement.length()) as u32;
    let mut iterations = 0;

    while movement.x.abs() > MOVE_EPSILON || movement.y.abs() > MOVE_EPSILON {
        iterations += 1;
        if iterations > max_iterations {
            log::warn!("movement resolution hit iteration cap, dropping {movement:?}");
            return;
        }

        let mut step = movement;
        if step.length() > 1.0 {
            step = step.normalize();
        }
        let stepped = Rect::from_center(*pos + step, size);

        let hit = level.overlap(&stepped).or_else(|| {
            others
                .iter()
                .filter(|other| other.entity != mover)
                .find(|other| other.rect.overlaps(&stepped))
                .map(|other| other.rect)
        });

        match hit {
            Some(obstacle) => {
                // Cancel whichever axes collide on their own, then halve the
                // rest; nothing commits this iteration.
                if Rect::from_center(*pos + Vec2::new(step.x, 0.0), size).overlaps(&obstacle) {
                    movement.x -= step.x / 2.0;
                }
                if Rect::from_center(*pos + Vec2::new(0.0, step.y), size).overlaps(&obstacle) {
                    movement.y -= step.y / 2.0;
                }
                movement -= step / 2.0;
            }
            None => {
                movement -= step;
                *pos += step;
            }
        }
    }
}
