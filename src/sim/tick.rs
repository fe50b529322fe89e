//! Fixed timestep simulation tick
//!
//! One call advances a level by exactly one 60 Hz tick. Gravity, speeds and
//! jump impulses are all per tick; there is no delta time.

use serde::{Deserialize, Serialize};

use super::collision::segment_bounds;
use super::state::{Level, Projectile};
use crate::consts::*;

/// Input intents sampled once per tick
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickInput {
    pub move_left: bool,
    pub move_right: bool,
    /// Only honoured while the head is on the ground
    pub jump: bool,
    /// Spawns one bolt per tick while held
    pub fire: bool,
}

/// How a session ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    /// Enemy contact drained the snake's health
    Drained,
    /// The head dropped below the bottom of the screen
    Fell,
    /// The enemy's health ran out
    Victory,
    /// Headless run hit its tick cap before anything else happened
    TimedOut,
}

impl Outcome {
    pub fn message(&self) -> &'static str {
        match self {
            Outcome::Drained => "Game Over! The snake ran out of health.",
            Outcome::Fell => "Game Over! The snake fell.",
            Outcome::Victory => "You defeated the enemy!",
            Outcome::TimedOut => "Time's up! The fight was called off.",
        }
    }

    /// Process exit code for this outcome
    pub fn exit_code(&self) -> i32 {
        match self {
            Outcome::Victory => 0,
            Outcome::Drained => 1,
            Outcome::Fell => 2,
            Outcome::TimedOut => 3,
        }
    }
}

/// What happened during a tick
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickReport {
    /// Bolts that struck the enemy (each one consumed)
    pub hits: u32,
    /// Bolts dropped for leaving the world
    pub despawned: u32,
    /// Enemy reversed its patrol direction
    pub enemy_turned: bool,
    /// Head overlapped the enemy and lost health
    pub contact: bool,
    pub outcome: Option<Outcome>,
}

/// Advance the level by one tick
pub fn tick(level: &mut Level, input: &TickInput) -> TickReport {
    let mut report = TickReport::default();
    level.time_ticks += 1;

    apply_input(level, input);

    level.chain.update(&level.platforms);

    let (hits, despawned) = update_projectiles(level);
    report.hits = hits;
    report.despawned = despawned;
    if despawned > 0 {
        log::debug!("Dropped {} stray bolt(s)", despawned);
    }

    if level.enemy.is_alive() {
        report.enemy_turned = level.enemy.update();
    }

    let head_box = segment_bounds(level.chain.head().pos);
    if level.enemy.is_alive() && head_box.overlaps(&level.enemy.bounds()) {
        level.player_health -= 1;
        report.contact = true;
    }

    report.outcome = check_outcome(level);
    if let Some(outcome) = report.outcome {
        log::info!(
            "Level {} ended at tick {}: {:?}",
            level.id.number(),
            level.time_ticks,
            outcome
        );
    }
    report
}

/// Steer the head and spawn bolts
fn apply_input(level: &mut Level, input: &TickInput) {
    let head = level.chain.head_mut();
    head.vel.x = 0.0;
    if input.move_left {
        head.vel.x = -MOVE_SPEED;
        level.last_direction = -1.0;
    }
    if input.move_right {
        head.vel.x = MOVE_SPEED;
        level.last_direction = 1.0;
    }
    if input.jump && head.on_ground {
        head.vel.y = JUMP_STRENGTH;
    }
    if input.fire {
        let origin = level.chain.head().pos;
        level.projectiles.push(Projectile::new(origin, level.last_direction));
    }
}

/// Move every bolt, consume the ones that hit, drop the ones that left
///
/// Returns (hits, despawned).
fn update_projectiles(level: &mut Level) -> (u32, u32) {
    let world = level.despawn_bounds();
    let enemy = &mut level.enemy;
    let mut hits = 0;
    let mut despawned = 0;

    level.projectiles.retain_mut(|bolt| {
        bolt.update();
        // Re-derived per bolt: a kill mid-loop lets the rest fly on
        if enemy.is_alive() && bolt.hits(&enemy.bounds()) {
            enemy.hit();
            hits += 1;
            if !enemy.is_alive() {
                log::info!("Enemy defeated");
            }
            return false;
        }
        if !bolt.bounds().overlaps(&world) {
            despawned += 1;
            return false;
        }
        true
    });

    (hits, despawned)
}

/// End conditions, checked in order: drained, fell, victory
pub fn check_outcome(level: &Level) -> Option<Outcome> {
    if level.player_health <= 0 {
        Some(Outcome::Drained)
    } else if level.chain.head().pos.y > SCREEN_HEIGHT {
        Some(Outcome::Fell)
    } else if !level.enemy.is_alive() {
        Some(Outcome::Victory)
    } else {
        None
    }
}
