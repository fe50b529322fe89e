//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only, every constant tuned per 60 Hz tick
//! - Stable iteration order (platform list order, chain index order)
//! - No rendering or platform dependencies

pub mod collision;
pub mod geometry;
pub mod levels;
pub mod state;
pub mod tick;

pub use collision::{
    MoveResult, enemy_bounds, follow_correction, move_and_collide, poison_bounds, segment_bounds,
};
pub use geometry::Rect;
pub use levels::{EnemyPreset, LevelId};
pub use state::{Chain, Enemy, EnemyMotion, Level, Platform, Projectile, Segment};
pub use tick::{Outcome, TickInput, TickReport, check_outcome, tick};
