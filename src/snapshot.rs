//! Read-only view of one tick for whatever draws the game
//!
//! Plain data, detached from the simulation; nothing here can mutate a level.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::{ENEMY_RADIUS, PLAYER_MAX_HEALTH};
use crate::health_fraction;
use crate::session::GameState;
use crate::sim::{Level, LevelId, Rect};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SegmentView {
    pub pos: Vec2,
    pub is_head: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EnemyView {
    pub pos: Vec2,
    pub radius: f32,
    pub health: i32,
    /// Health bar fill in [0, 1]
    pub health_fraction: f32,
}

/// Everything a renderer needs for one frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderSnapshot {
    pub state: GameState,
    pub selected_level: LevelId,
    pub segments: Vec<SegmentView>,
    pub platforms: Vec<Rect>,
    /// Absent once the enemy is defeated
    pub enemy: Option<EnemyView>,
    pub projectiles: Vec<Vec2>,
    pub player_health: i32,
    pub player_health_fraction: f32,
}

impl RenderSnapshot {
    pub fn capture(state: GameState, selected_level: LevelId, level: Option<&Level>) -> Self {
        let Some(level) = level else {
            return Self {
                state,
                selected_level,
                segments: Vec::new(),
                platforms: Vec::new(),
                enemy: None,
                projectiles: Vec::new(),
                player_health: PLAYER_MAX_HEALTH,
                player_health_fraction: 1.0,
            };
        };

        let enemy = level.enemy.is_alive().then(|| EnemyView {
            pos: level.enemy.pos,
            radius: ENEMY_RADIUS,
            health: level.enemy.health,
            health_fraction: health_fraction(level.enemy.health, level.enemy.max_health),
        });

        Self {
            state,
            selected_level,
            segments: level
                .chain
                .segments()
                .iter()
                .map(|s| SegmentView {
                    pos: s.pos,
                    is_head: s.is_head,
                })
                .collect(),
            platforms: level.platforms.iter().map(|p| p.rect).collect(),
            enemy,
            projectiles: level.projectiles.iter().map(|p| p.pos).collect(),
            player_health: level.player_health,
            player_health_fraction: health_fraction(level.player_health, PLAYER_MAX_HEALTH),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::Projectile;

    #[test]
    fn test_capture_playing() {
        let mut level = Level::new(LevelId::Two);
        level.enemy.health = 50;
        level.player_health = 25;
        level.projectiles.push(Projectile::new(Vec2::new(10.0, 20.0), 1.0));

        let snap = RenderSnapshot::capture(GameState::Playing, LevelId::Two, Some(&level));
        assert_eq!(snap.segments.len(), 6);
        assert!(snap.segments[0].is_head);
        assert_eq!(snap.platforms.len(), 5);
        assert_eq!(snap.projectiles, vec![Vec2::new(10.0, 20.0)]);
        assert_eq!(snap.enemy.map(|e| e.health_fraction), Some(0.25));
        assert_eq!(snap.player_health_fraction, 0.25);
    }

    #[test]
    fn test_dead_enemy_hidden() {
        let mut level = Level::new(LevelId::One);
        level.enemy.health = 0;
        let snap = RenderSnapshot::capture(GameState::Playing, LevelId::One, Some(&level));
        assert!(snap.enemy.is_none());
    }

    #[test]
    fn test_capture_menu() {
        let snap = RenderSnapshot::capture(GameState::Menu, LevelId::One, None);
        assert!(snap.segments.is_empty());
        assert_eq!(snap.state, GameState::Menu);
    }
}
