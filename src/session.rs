//! Screen flow: main menu, level select, then one playing session
//!
//! A session plays exactly one level. Any end condition finishes it for good;
//! there is no retry.

use serde::{Deserialize, Serialize};

use crate::consts::POISON_DESPAWN_MARGIN;
use crate::sim::{Level, LevelId, Outcome, TickInput, tick};
use crate::snapshot::RenderSnapshot;

/// Which screen is active
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameState {
    Menu,
    LevelSelect,
    Playing,
}

/// Menu intents sampled once per frame
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MenuInput {
    /// Enter / select
    pub confirm: bool,
    /// Level-select digit key, if any is held
    pub level_digit: Option<u8>,
    /// Window close
    pub quit: bool,
}

/// Result of stepping the session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStatus {
    Running,
    Finished(Outcome),
    Quit,
}

/// The whole game: screen state plus the running level, if any
#[derive(Debug, Clone)]
pub struct Session {
    state: GameState,
    selected_level: LevelId,
    level: Option<Level>,
    despawn_margin: f32,
    status: SessionStatus,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    pub fn new() -> Self {
        Self {
            state: GameState::Menu,
            selected_level: LevelId::One,
            level: None,
            despawn_margin: POISON_DESPAWN_MARGIN,
            status: SessionStatus::Running,
        }
    }

    pub fn with_despawn_margin(mut self, margin: f32) -> Self {
        self.despawn_margin = margin;
        self
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn selected_level(&self) -> LevelId {
        self.selected_level
    }

    pub fn level(&self) -> Option<&Level> {
        self.level.as_ref()
    }

    pub fn status(&self) -> SessionStatus {
        self.status
    }

    /// Advance one frame; gameplay input only matters while playing
    pub fn step(&mut self, menu: &MenuInput, play: &TickInput) -> SessionStatus {
        if self.status != SessionStatus::Running {
            return self.status;
        }
        if menu.quit {
            log::info!("Quit requested");
            self.status = SessionStatus::Quit;
            return self.status;
        }

        match self.state {
            GameState::Menu => {
                if menu.confirm {
                    self.state = GameState::LevelSelect;
                }
            }
            GameState::LevelSelect => {
                if let Some(id) = menu.level_digit.and_then(LevelId::from_number) {
                    self.start_level(id);
                }
            }
            GameState::Playing => {
                if let Some(level) = self.level.as_mut() {
                    if let Some(outcome) = tick(level, play).outcome {
                        self.status = SessionStatus::Finished(outcome);
                    }
                } else {
                    debug_assert!(false, "playing without a level");
                    self.state = GameState::LevelSelect;
                }
            }
        }
        self.status
    }

    /// Select a level and enter play with fresh state
    pub fn start_level(&mut self, id: LevelId) {
        log::info!("Level {} selected: {}", id.number(), id.name());
        self.selected_level = id;
        self.level = Some(Level::new(id).with_despawn_margin(self.despawn_margin));
        self.state = GameState::Playing;
    }

    /// End the session from outside, e.g. when a headless run times out
    pub fn finish(&mut self, outcome: Outcome) {
        if self.status == SessionStatus::Running {
            self.status = SessionStatus::Finished(outcome);
        }
    }

    /// Read-only view for rendering
    pub fn snapshot(&self) -> RenderSnapshot {
        RenderSnapshot::capture(self.state, self.selected_level, self.level.as_ref())
    }
}
