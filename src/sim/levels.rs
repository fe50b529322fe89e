//! The two fixed level layouts and their enemy difficulty presets

use serde::{Deserialize, Serialize};

use super::state::Platform;
use crate::consts::{SCREEN_HEIGHT, SCREEN_WIDTH};

/// Selectable level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum LevelId {
    /// Easy
    #[default]
    One,
    /// Hard
    Two,
}

/// Enemy difficulty for a level
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnemyPreset {
    pub health: i32,
    /// Patrol speed in pixels per tick
    pub speed: f32,
}

impl LevelId {
    /// Map a level-select digit to a level
    pub fn from_number(n: u8) -> Option<Self> {
        match n {
            1 => Some(LevelId::One),
            2 => Some(LevelId::Two),
            _ => None,
        }
    }

    pub fn number(&self) -> u8 {
        match self {
            LevelId::One => 1,
            LevelId::Two => 2,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            LevelId::One => "Easy Level",
            LevelId::Two => "Hard Level",
        }
    }

    pub fn enemy_preset(&self) -> EnemyPreset {
        match self {
            LevelId::One => EnemyPreset {
                health: 100,
                speed: 2.0,
            },
            LevelId::Two => EnemyPreset {
                health: 200,
                speed: 4.0,
            },
        }
    }

    /// Platform layout; the full-width floor is always last
    pub fn platforms(&self) -> Vec<Platform> {
        let h = SCREEN_HEIGHT;
        let floor = Platform::new(0.0, h - 50.0, SCREEN_WIDTH, 50.0);
        match self {
            LevelId::One => vec![
                Platform::new(100.0, h - 150.0, 200.0, 20.0),
                Platform::new(400.0, h - 250.0, 150.0, 20.0),
                Platform::new(600.0, h - 350.0, 200.0, 20.0),
                floor,
            ],
            LevelId::Two => vec![
                Platform::new(50.0, h - 200.0, 150.0, 20.0),
                Platform::new(250.0, h - 300.0, 150.0, 20.0),
                Platform::new(500.0, h - 250.0, 200.0, 20.0),
                Platform::new(300.0, h - 150.0, 150.0, 20.0),
                floor,
            ],
        }
    }
}

impl TryFrom<u8> for LevelId {
    type Error = String;

    fn try_from(n: u8) -> Result<Self, Self::Error> {
        LevelId::from_number(n).ok_or_else(|| format!("unknown level {n}, expected 1 or 2"))
    }
}

impl From<LevelId> for u8 {
    fn from(id: LevelId) -> u8 {
        id.number()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_number() {
        assert_eq!(LevelId::from_number(1), Some(LevelId::One));
        assert_eq!(LevelId::from_number(2), Some(LevelId::Two));
        assert_eq!(LevelId::from_number(3), None);
    }

    #[test]
    fn test_layouts_end_with_floor() {
        for id in [LevelId::One, LevelId::Two] {
            let platforms = id.platforms();
            let floor = platforms.last().map(|p| p.rect);
            assert_eq!(floor.map(|r| r.top()), Some(550.0));
            assert_eq!(floor.map(|r| r.w), Some(SCREEN_WIDTH));
        }
        assert_eq!(LevelId::One.platforms().len(), 4);
        assert_eq!(LevelId::Two.platforms().len(), 5);
    }

    #[test]
    fn test_level_serde_as_number() {
        let json = serde_json::to_string(&LevelId::Two).unwrap();
        assert_eq!(json, "2");
        let id: LevelId = serde_json::from_str("1").unwrap();
        assert_eq!(id, LevelId::One);
        assert!(serde_json::from_str::<LevelId>("7").is_err());
    }
}
