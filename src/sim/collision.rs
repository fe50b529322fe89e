//! Collision queries and response for boxes against static platforms
//!
//! Every query re-derives its rectangles from the current positions; nothing
//! here caches bounds between calls.

use glam::Vec2;

use super::geometry::Rect;
use super::state::Platform;
use crate::consts::*;

/// Outcome of moving a box through the platform set for one tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MoveResult {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Box came down onto the top face of a platform this tick
    pub on_ground: bool,
}

/// Bounding box of a body segment (top-left anchored)
#[inline]
pub fn segment_bounds(pos: Vec2) -> Rect {
    Rect::at(pos, SEGMENT_SIZE, SEGMENT_SIZE)
}

/// Bounding box of a poison bolt (top-left anchored)
#[inline]
pub fn poison_bounds(pos: Vec2) -> Rect {
    Rect::at(pos, POISON_SIZE, POISON_SIZE)
}

/// Bounding box of the enemy (centre anchored)
#[inline]
pub fn enemy_bounds(center: Vec2) -> Rect {
    Rect::centered(center, ENEMY_RADIUS)
}

/// First platform, in list order, overlapping `rect`
fn first_hit<'a>(rect: &Rect, platforms: &'a [Platform]) -> Option<&'a Platform> {
    platforms.iter().find(|p| rect.overlaps(&p.rect))
}

/// Move a `size`-square box by `vel`, resolving X then Y against platforms
///
/// The X pass runs on the pre-move Y; the Y pass runs on the corrected X.
/// On each axis the first overlapping platform in list order decides the
/// correction. Velocity is zeroed on the blocked axis. A box that overlaps a
/// platform without moving on that axis keeps its position but still has its
/// velocity zeroed.
pub fn move_and_collide(pos: Vec2, vel: Vec2, size: f32, platforms: &[Platform]) -> MoveResult {
    let mut pos = pos;
    let mut vel = vel;
    let mut on_ground = false;
    let move_x = vel.x;
    let move_y = vel.y;

    pos.x += move_x;
    if let Some(p) = first_hit(&Rect::at(pos, size, size), platforms) {
        if move_x > 0.0 {
            pos.x = p.rect.left() - size;
        } else if move_x < 0.0 {
            pos.x = p.rect.right();
        }
        vel.x = 0.0;
    }

    pos.y += move_y;
    if let Some(p) = first_hit(&Rect::at(pos, size, size), platforms) {
        if move_y > 0.0 {
            pos.y = p.rect.top() - size;
            on_ground = true;
            vel.y = 0.0;
        } else if move_y < 0.0 {
            pos.y = p.rect.bottom();
            vel.y = 0.0;
        }
    }

    MoveResult { pos, vel, on_ground }
}

/// Positional correction pulling `pos` back within `max_distance` of `anchor`
///
/// Returns the offset to subtract from `pos`. Zero when already within range,
/// and zero when the two points coincide (no defined direction).
pub fn follow_correction(pos: Vec2, anchor: Vec2, max_distance: f32) -> Vec2 {
    let direction = pos - anchor;
    let distance = direction.length();
    if distance <= max_distance {
        return Vec2::ZERO;
    }
    direction.normalize_or_zero() * (distance - max_distance)
}
