//! Level state and entity types
//!
//! Everything a running level needs lives in [`Level`]; the tick function
//! takes it by `&mut` and there is no other simulation state.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::{enemy_bounds, follow_correction, move_and_collide, poison_bounds};
use super::geometry::Rect;
use super::levels::LevelId;
use crate::consts::*;

/// A static collision surface
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Platform {
    pub rect: Rect,
}

impl Platform {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            rect: Rect::new(x, y, w, h),
        }
    }
}

/// One unit of the snake's body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Segment {
    /// Top-left corner
    pub pos: Vec2,
    pub vel: Vec2,
    pub is_head: bool,
    pub on_ground: bool,
}

impl Segment {
    pub fn new(pos: Vec2, is_head: bool) -> Self {
        Self {
            pos,
            vel: Vec2::ZERO,
            is_head,
            on_ground: false,
        }
    }

    /// Apply gravity and move through the platforms, X axis first
    pub fn update_physics(&mut self, platforms: &[Platform]) {
        self.on_ground = false;
        self.vel.y += GRAVITY;

        let moved = move_and_collide(self.pos, self.vel, SEGMENT_SIZE, platforms);
        self.pos = moved.pos;
        self.vel = moved.vel;
        self.on_ground = moved.on_ground;
    }

    /// Pull toward `target` so the pair is at most `SEGMENT_DISTANCE` apart
    ///
    /// When a correction happens and the target is moving horizontally, its
    /// horizontal velocity is copied so the body keeps walking with the head.
    pub fn follow(&mut self, target: &Segment) {
        let correction = follow_correction(self.pos, target.pos, SEGMENT_DISTANCE);
        if correction == Vec2::ZERO {
            return;
        }
        self.pos -= correction;
        if target.vel.x != 0.0 {
            self.vel.x = target.vel.x;
        }
    }
}

/// The snake: a fixed-length run of segments, head first
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Chain {
    segments: Vec<Segment>,
}

impl Chain {
    /// Lay the chain out horizontally with the head at `head` and the body
    /// trailing to the left
    pub fn new(head: Vec2) -> Self {
        let segments = (0..CHAIN_LENGTH)
            .map(|i| Segment::new(head - Vec2::new(i as f32 * SEGMENT_DISTANCE, 0.0), i == 0))
            .collect();
        Self { segments }
    }

    pub fn head(&self) -> &Segment {
        &self.segments[0]
    }

    pub fn head_mut(&mut self) -> &mut Segment {
        &mut self.segments[0]
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Mutable access for tests and tools; the chain length cannot change
    pub fn segments_mut(&mut self) -> &mut [Segment] {
        &mut self.segments
    }

    /// Physics for the head, then for each follower in order: its own
    /// physics followed by a follow step toward the already-updated
    /// predecessor
    pub fn update(&mut self, platforms: &[Platform]) {
        debug_assert_eq!(self.segments.len(), CHAIN_LENGTH);

        self.segments[0].update_physics(platforms);
        for i in 1..self.segments.len() {
            let (done, rest) = self.segments.split_at_mut(i);
            let segment = &mut rest[0];
            segment.update_physics(platforms);
            segment.follow(&done[i - 1]);
        }
    }
}

/// A poison bolt
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Projectile {
    /// Top-left corner
    pub pos: Vec2,
    /// Horizontal only
    pub vel: Vec2,
}

impl Projectile {
    /// Fire from `pos` toward `direction` (-1 left, 1 right)
    pub fn new(pos: Vec2, direction: f32) -> Self {
        Self {
            pos,
            vel: Vec2::new(direction.signum() * POISON_SPEED, 0.0),
        }
    }

    pub fn update(&mut self) {
        self.pos += self.vel;
    }

    pub fn bounds(&self) -> Rect {
        poison_bounds(self.pos)
    }

    pub fn hits(&self, enemy_rect: &Rect) -> bool {
        self.bounds().overlaps(enemy_rect)
    }
}

/// Vertical state of the enemy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EnemyMotion {
    /// Resting on the ground line
    Grounded,
    /// Rising from a jump or falling
    Airborne,
}

/// The patrolling owl
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    /// Centre of the sprite
    pub pos: Vec2,
    pub vel: Vec2,
    pub vertical_vel: f32,
    pub health: i32,
    pub max_health: i32,
    pub jump_timer: u32,
    pub motion: EnemyMotion,
    pub left_limit: f32,
    pub right_limit: f32,
}

impl Enemy {
    pub fn new(health: i32, speed: f32) -> Self {
        Self {
            pos: Vec2::new(ENEMY_START_X, ENEMY_START_Y),
            vel: Vec2::new(speed, 0.0),
            vertical_vel: 0.0,
            health,
            max_health: health,
            jump_timer: 0,
            motion: EnemyMotion::Airborne,
            left_limit: ENEMY_LEFT_LIMIT,
            right_limit: ENEMY_RIGHT_LIMIT,
        }
    }

    pub fn is_alive(&self) -> bool {
        self.health > 0
    }

    pub fn bounds(&self) -> Rect {
        enemy_bounds(self.pos)
    }

    /// Advance one tick of patrol, gravity and the periodic jump
    ///
    /// Returns true when the horizontal direction flipped this tick.
    pub fn update(&mut self) -> bool {
        self.pos += self.vel;
        self.vertical_vel += GRAVITY;
        self.pos.y += self.vertical_vel;
        self.motion = EnemyMotion::Airborne;

        if self.pos.y + ENEMY_RADIUS >= ENEMY_GROUND_Y {
            self.pos.y = ENEMY_GROUND_Y - ENEMY_RADIUS;
            self.vertical_vel = 0.0;
            self.motion = EnemyMotion::Grounded;
        }

        // Forced jump on a fixed period, whether grounded or not
        self.jump_timer += 1;
        if self.jump_timer >= ENEMY_JUMP_INTERVAL {
            self.vertical_vel = ENEMY_JUMP_STRENGTH;
            self.jump_timer = 0;
            self.motion = EnemyMotion::Airborne;
        }

        self.reflect_at_bounds()
    }

    /// Reverse horizontal direction when past a patrol bound and still
    /// heading outward; at most one flip per call
    fn reflect_at_bounds(&mut self) -> bool {
        let past_left = self.pos.x - ENEMY_RADIUS <= self.left_limit && self.vel.x < 0.0;
        let past_right = self.pos.x + ENEMY_RADIUS >= self.right_limit && self.vel.x > 0.0;
        if past_left || past_right {
            self.vel.x = -self.vel.x;
            true
        } else {
            false
        }
    }

    /// Take one poison hit
    pub fn hit(&mut self) {
        self.health -= 1;
    }
}

/// Everything owned by a running level
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Level {
    pub id: LevelId,
    pub platforms: Vec<Platform>,
    pub chain: Chain,
    pub enemy: Enemy,
    pub projectiles: Vec<Projectile>,
    /// Facing used for new bolts (-1 left, 1 right)
    pub last_direction: f32,
    pub player_health: i32,
    /// Bolts further than this outside the screen are dropped
    pub despawn_margin: f32,
    /// Simulation tick counter
    pub time_ticks: u64,
}

impl Level {
    /// Fresh level in its start configuration
    pub fn new(id: LevelId) -> Self {
        let preset = id.enemy_preset();
        log::info!(
            "Starting level {} (enemy health {}, speed {})",
            id.number(),
            preset.health,
            preset.speed
        );
        Self {
            id,
            platforms: id.platforms(),
            chain: Chain::new(Vec2::new(CHAIN_START_X, CHAIN_START_Y)),
            enemy: Enemy::new(preset.health, preset.speed),
            projectiles: Vec::new(),
            last_direction: 1.0,
            player_health: PLAYER_MAX_HEALTH,
            despawn_margin: POISON_DESPAWN_MARGIN,
            time_ticks: 0,
        }
    }

    pub fn with_despawn_margin(mut self, margin: f32) -> Self {
        self.despawn_margin = margin;
        self
    }

    /// Put the level back in its start configuration
    pub fn reset(&mut self) {
        let margin = self.despawn_margin;
        *self = Self::new(self.id).with_despawn_margin(margin);
    }

    /// Region outside of which bolts are dropped
    pub fn despawn_bounds(&self) -> Rect {
        Rect::new(0.0, 0.0, SCREEN_WIDTH, SCREEN_HEIGHT).inflate(self.despawn_margin)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chain_layout() {
        let chain = Chain::new(Vec2::new(400.0, 300.0));
        assert_eq!(chain.segments().len(), CHAIN_LENGTH);
        assert!(chain.head().is_head);
        assert!(chain.segments()[1..].iter().all(|s| !s.is_head));
        assert_eq!(chain.segments()[5].pos, Vec2::new(300.0, 300.0));
    }

    #[test]
    fn test_follow_pulls_to_distance_and_copies_velocity() {
        let mut target = Segment::new(Vec2::new(100.0, 0.0), true);
        target.vel.x = 5.0;
        let mut follower = Segment::new(Vec2::new(50.0, 0.0), false);
        follower.follow(&target);
        assert_eq!(follower.pos, Vec2::new(80.0, 0.0));
        assert_eq!(follower.vel.x, 5.0);
    }

    #[test]
    fn test_follow_within_distance_is_noop() {
        let mut target = Segment::new(Vec2::new(100.0, 0.0), true);
        target.vel.x = 5.0;
        let mut follower = Segment::new(Vec2::new(85.0, 0.0), false);
        follower.follow(&target);
        assert_eq!(follower.pos, Vec2::new(85.0, 0.0));
        assert_eq!(follower.vel.x, 0.0);
    }

    #[test]
    fn test_follow_coincident_is_noop() {
        let target = Segment::new(Vec2::new(10.0, 10.0), true);
        let mut follower = Segment::new(Vec2::new(10.0, 10.0), false);
        follower.follow(&target);
        assert_eq!(follower.pos, Vec2::new(10.0, 10.0));
        assert!(follower.pos.is_finite());
    }

    #[test]
    fn test_chain_update_keeps_links() {
        let platforms = LevelId::One.platforms();
        let mut chain = Chain::new(Vec2::new(400.0, 300.0));
        for _ in 0..30 {
            chain.head_mut().vel.x = MOVE_SPEED;
            chain.update(&platforms);
            for pair in chain.segments().windows(2) {
                assert!(pair[0].pos.distance(pair[1].pos) <= SEGMENT_DISTANCE + 1e-3);
            }
        }
    }

    #[test]
    fn test_enemy_lands_on_ground_line() {
        let mut enemy = Enemy::new(100, 0.0);
        for _ in 0..60 {
            enemy.update();
        }
        assert_eq!(enemy.pos.y, ENEMY_GROUND_Y - ENEMY_RADIUS);
        assert_eq!(enemy.vertical_vel, 0.0);
        assert_eq!(enemy.motion, EnemyMotion::Grounded);
    }

    #[test]
    fn test_enemy_periodic_jump() {
        let mut enemy = Enemy::new(100, 0.0);
        for _ in 0..ENEMY_JUMP_INTERVAL - 1 {
            enemy.update();
        }
        assert_eq!(enemy.motion, EnemyMotion::Grounded);
        enemy.update();
        assert_eq!(enemy.vertical_vel, ENEMY_JUMP_STRENGTH);
        assert_eq!(enemy.jump_timer, 0);
        assert_eq!(enemy.motion, EnemyMotion::Airborne);
    }

    #[test]
    fn test_enemy_reflects_once_at_bound() {
        let mut enemy = Enemy::new(100, 4.0);
        enemy.pos.x = ENEMY_RIGHT_LIMIT - ENEMY_RADIUS - 2.0;
        assert!(enemy.update());
        assert_eq!(enemy.vel.x, -4.0);
        // Still past the bound after the move, but heading back in
        enemy.pos.x = ENEMY_RIGHT_LIMIT;
        assert!(!enemy.update());
        assert_eq!(enemy.vel.x, -4.0);
    }

    #[test]
    fn test_projectile_direction() {
        let mut p = Projectile::new(Vec2::new(400.0, 300.0), -1.0);
        p.update();
        assert_eq!(p.pos, Vec2::new(390.0, 300.0));
    }

    #[test]
    fn test_level_reset_restores_start() {
        let mut level = Level::new(LevelId::Two).with_despawn_margin(10.0);
        level.player_health = 3;
        level.enemy.health = 1;
        level.projectiles.push(Projectile::new(Vec2::ZERO, 1.0));
        level.chain.head_mut().pos = Vec2::new(0.0, 0.0);
        level.reset();
        assert_eq!(level.player_health, PLAYER_MAX_HEALTH);
        assert_eq!(level.enemy.health, 200);
        assert!(level.projectiles.is_empty());
        assert_eq!(level.chain.head().pos, Vec2::new(400.0, 300.0));
        assert_eq!(level.despawn_margin, 10.0);
    }
}
