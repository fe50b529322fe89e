//! Demo player for headless runs
//!
//! Stands in for the keyboard: walks into firing range, turns toward the
//! owl, spits poison and hops now and then. All randomness comes from a
//! seeded PCG stream, so a given seed always plays the same game.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::consts::*;
use crate::session::{GameState, MenuInput, Session};
use crate::sim::{Level, LevelId, TickInput};

/// Preferred horizontal gap to the enemy
const STANDOFF_MIN: f32 = 90.0;
const STANDOFF_MAX: f32 = 220.0;
/// Vertical window in which a bolt can connect
const AIM_WINDOW: f32 = ENEMY_RADIUS + POISON_SIZE;

#[derive(Debug, Clone)]
pub struct Autopilot {
    rng: Pcg32,
    level: LevelId,
}

impl Autopilot {
    pub fn new(seed: u64, level: LevelId) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
            level,
        }
    }

    /// Menu keys: confirm on the title screen, pick the level on the next
    pub fn menu_input(&self, session: &Session) -> MenuInput {
        match session.state() {
            GameState::Menu => MenuInput {
                confirm: true,
                ..Default::default()
            },
            GameState::LevelSelect => MenuInput {
                level_digit: Some(self.level.number()),
                ..Default::default()
            },
            GameState::Playing => MenuInput::default(),
        }
    }

    /// Gameplay keys for the next tick
    pub fn play_input(&mut self, level: &Level) -> TickInput {
        let mut input = TickInput::default();
        if !level.enemy.is_alive() {
            return input;
        }

        let head = level.chain.head();
        let head_center = head.pos + glam::Vec2::splat(SEGMENT_SIZE / 2.0);
        let to_enemy = level.enemy.pos - head_center;
        let toward = to_enemy.x.signum();
        let gap = to_enemy.x.abs();

        if gap > STANDOFF_MAX {
            Self::steer(&mut input, toward);
        } else if gap < STANDOFF_MIN {
            Self::steer(&mut input, -toward);
        } else if level.last_direction != toward {
            // Tap toward the enemy to turn around before firing
            Self::steer(&mut input, toward);
        }

        let facing = if input.move_left {
            -1.0
        } else if input.move_right {
            1.0
        } else {
            level.last_direction
        };
        if facing == toward && to_enemy.y.abs() < AIM_WINDOW {
            input.fire = self.rng.random_bool(0.35);
        }

        // Hop over a closing enemy, otherwise jump occasionally
        let closing = gap < STANDOFF_MIN && level.enemy.vel.x.signum() == -toward;
        if head.on_ground && (closing || self.rng.random_bool(0.02)) {
            input.jump = true;
        }
        input
    }

    fn steer(input: &mut TickInput, direction: f32) {
        if direction < 0.0 {
            input.move_left = true;
        } else {
            input.move_right = true;
        }
    }
}
