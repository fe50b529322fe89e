//! Serpent Platformer - a segmented snake versus a patrolling owl
//!
//! Core modules:
//! - `sim`: Deterministic simulation (chain physics, collisions, enemy, level)
//! - `session`: Menu / level select / playing screen state machine
//! - `snapshot`: Read-only view of a tick for whatever draws the game
//! - `driver`: Fixed timestep accumulator
//! - `autopilot`: Seeded demo player for headless runs
//! - `settings`: Runtime settings loaded from JSON

pub mod autopilot;
pub mod driver;
pub mod session;
pub mod settings;
pub mod sim;
pub mod snapshot;

pub use session::{GameState, MenuInput, Session};
pub use settings::{Settings, SettingsError};
pub use snapshot::RenderSnapshot;

/// Game configuration constants
///
/// Every rate is expressed per tick at [`consts::TICK_HZ`]; the simulation
/// never scales by elapsed time.
pub mod consts {
    /// Logical tick rate
    pub const TICK_HZ: u32 = 60;
    /// Seconds per logical tick
    pub const SIM_DT: f32 = 1.0 / TICK_HZ as f32;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Screen dimensions (the world is exactly one screen)
    pub const SCREEN_WIDTH: f32 = 800.0;
    pub const SCREEN_HEIGHT: f32 = 600.0;

    /// Downward acceleration shared by the snake and the enemy
    pub const GRAVITY: f32 = 0.5;

    /// Snake body
    pub const SEGMENT_SIZE: f32 = 20.0;
    pub const SEGMENT_DISTANCE: f32 = SEGMENT_SIZE;
    pub const CHAIN_LENGTH: usize = 6;
    pub const JUMP_STRENGTH: f32 = -12.0;
    pub const MOVE_SPEED: f32 = 5.0;
    pub const PLAYER_MAX_HEALTH: i32 = 100;
    /// Head position at level start; the body trails to the left
    pub const CHAIN_START_X: f32 = 400.0;
    pub const CHAIN_START_Y: f32 = 300.0;

    /// Enemy
    pub const ENEMY_RADIUS: f32 = 20.0;
    pub const ENEMY_LEFT_LIMIT: f32 = 100.0;
    pub const ENEMY_RIGHT_LIMIT: f32 = 700.0;
    pub const ENEMY_JUMP_STRENGTH: f32 = -10.0;
    pub const ENEMY_JUMP_INTERVAL: u32 = 120;
    pub const ENEMY_START_X: f32 = 400.0;
    pub const ENEMY_START_Y: f32 = SCREEN_HEIGHT - 300.0 - ENEMY_RADIUS;
    /// The enemy lands on the floor line, not on floating platforms
    pub const ENEMY_GROUND_Y: f32 = SCREEN_HEIGHT - 50.0;

    /// Poison bolts
    pub const POISON_SIZE: f32 = 10.0;
    pub const POISON_SPEED: f32 = 10.0;
    /// Default slack around the screen before a stray bolt is dropped
    pub const POISON_DESPAWN_MARGIN: f32 = 100.0;
}

/// Fill fraction for a health bar, clamped to [0, 1]
///
/// A zero or negative maximum yields an empty bar instead of dividing by zero.
#[inline]
pub fn health_fraction(health: i32, max_health: i32) -> f32 {
    debug_assert!(max_health > 0, "health bar maximum must be positive");
    if max_health <= 0 {
        return 0.0;
    }
    (health as f32 / max_health as f32).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_health_fraction() {
        assert_eq!(health_fraction(100, 100), 1.0);
        assert_eq!(health_fraction(50, 200), 0.25);
        assert_eq!(health_fraction(-3, 100), 0.0);
        assert_eq!(health_fraction(150, 100), 1.0);
    }
}
