//! Movement integration and bounds policies.
//!
//! Displacement is computed per tick and scaled by the frame's tick count,
//! so catch-up frames cover exactly as much ground as the frames they
//! replace. Diagonal movement is normalized by 1/sqrt(2) to keep speed
//! uniform in all directions.

use crate::game::constants::{area, tick};
use crate::game::state::{Entities, Entity};
use crate::util::rect::Rect;

/// Integrates one frame of movement for every entity, then culls entities
/// whose rectangle no longer overlaps the play area.
pub fn update(entities: &mut Entities, ticks: u32) {
    if ticks == 0 {
        return;
    }
    for id in entities.ids() {
        let mut gone = false;
        if let Some(entity) = entities.get_mut(&id) {
            let step = step_px(entity) * ticks as i32;
            let dx = (i32::from(entity.move_right) - i32::from(entity.move_left)) * step;
            let dy = (i32::from(entity.move_down) - i32::from(entity.move_up)) * step;
            let proposed = entity.rect.translated(dx, dy);
            apply_bounds(entity, proposed);
            gone = !entity.rect.overlaps(&area::BOUNDS);
        }
        if gone {
            // Flew off; no score for escapes
            entities.remove(&id);
        }
    }
}

/// Per-tick displacement in pixels along each active axis.
///
/// With exactly two movement flags set the entity moves diagonally, so both
/// axis components shrink by 1/sqrt(2); opposite flags cancel in the caller.
fn step_px(entity: &Entity) -> i32 {
    let active = u32::from(entity.move_up)
        + u32::from(entity.move_down)
        + u32::from(entity.move_left)
        + u32::from(entity.move_right);
    if active == 0 {
        return 0;
    }
    let diag = if active == 2 {
        std::f64::consts::FRAC_1_SQRT_2
    } else {
        1.0
    };
    let per_tick =
        entity.base_speed * entity.speed_multi * f64::from(area::WIDTH) * diag
            / f64::from(tick::TICK_RATE);
    per_tick.round() as i32
}

/// Applies the entity's bounds policy to its proposed rectangle.
///
/// The player is clamped inside the area. Everything else follows its bounce
/// flags: a vertical bouncer moving into the top/bottom edge is pinned to it
/// with its vertical flags flipped, and a non-exiting entity (the boss) gets
/// the same treatment on the left/right edges. Entities that are merely
/// parked across an edge without moving toward it are left alone.
fn apply_bounds(entity: &mut Entity, proposed: Rect) {
    if entity.kind.is_player() {
        entity.rect = proposed.clamp_within(&area::BOUNDS);
        return;
    }
    let mut rect = proposed;
    if entity.bounce_vertical && (entity.move_up || entity.move_down) {
        if rect.top() < 0 {
            rect.y = 0;
            entity.move_up = false;
            entity.move_down = true;
        } else if rect.bottom() > area::HEIGHT {
            rect.y = area::HEIGHT - rect.h;
            entity.move_up = true;
            entity.move_down = false;
        }
    }
    if !entity.exit_horizontal && (entity.move_left || entity.move_right) {
        if rect.left() < 0 {
            rect.x = 0;
            entity.move_left = false;
            entity.move_right = true;
        } else if rect.right() > area::WIDTH {
            rect.x = area::WIDTH - rect.w;
            entity.move_left = true;
            entity.move_right = false;
        }
    }
    entity.rect = rect;
}
