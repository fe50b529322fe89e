//! Fixed timestep accumulator
//!
//! Wall-clock frame time is banked and paid out in whole logical ticks, so
//! the simulation always advances in 60 Hz steps no matter how fast frames
//! arrive.

use std::time::{Duration, Instant};

use crate::autopilot::Autopilot;
use crate::consts::{MAX_SUBSTEPS, SIM_DT};
use crate::session::{Session, SessionStatus};
use crate::settings::Settings;
use crate::sim::Outcome;

/// Longest frame we are willing to catch up on
const MAX_FRAME_DT: f32 = 0.1;

#[derive(Debug, Clone)]
pub struct FixedStepper {
    accumulator: f32,
    step: f32,
    max_substeps: u32,
}

impl Default for FixedStepper {
    fn default() -> Self {
        Self::new(SIM_DT, MAX_SUBSTEPS)
    }
}

impl FixedStepper {
    pub fn new(step: f32, max_substeps: u32) -> Self {
        debug_assert!(step > 0.0, "tick length must be positive");
        Self {
            accumulator: 0.0,
            step,
            max_substeps,
        }
    }

    /// Bank `frame_dt` seconds and return how many ticks to run now
    pub fn advance(&mut self, frame_dt: f32) -> u32 {
        let frame_dt = if frame_dt.is_finite() {
            frame_dt.clamp(0.0, MAX_FRAME_DT)
        } else {
            0.0
        };
        self.accumulator += frame_dt;

        let mut substeps = 0;
        while self.accumulator >= self.step && substeps < self.max_substeps {
            self.accumulator -= self.step;
            substeps += 1;
        }
        if substeps == self.max_substeps && self.accumulator >= self.step {
            // Spiral of death: drop the backlog instead of chasing it
            log::warn!("Dropping {:.3}s of simulation backlog", self.accumulator);
            self.accumulator = 0.0;
        }
        substeps
    }

    /// Fraction of a tick left in the bank, for render interpolation
    pub fn alpha(&self) -> f32 {
        self.accumulator / self.step
    }
}

/// Play one session with the autopilot at the keys until it ends
///
/// With `realtime` the loop sleeps to hold 60 frames per second and feeds
/// measured frame times through the accumulator; otherwise each frame is
/// exactly one tick. Gameplay beyond `max_ticks` ends as timed out.
pub fn run_session(settings: &Settings) -> SessionStatus {
    let mut session = Session::new().with_despawn_margin(settings.despawn_margin);
    let mut pilot = Autopilot::new(settings.autopilot_seed, settings.level);
    let mut stepper = FixedStepper::default();
    let frame = Duration::from_secs_f32(SIM_DT);
    let mut last = Instant::now();

    loop {
        let ticks = if settings.realtime {
            let elapsed = last.elapsed();
            if elapsed < frame {
                std::thread::sleep(frame - elapsed);
            }
            let now = Instant::now();
            let frame_dt = now.duration_since(last).as_secs_f32();
            last = now;
            stepper.advance(frame_dt)
        } else {
            1
        };

        for _ in 0..ticks {
            let menu = pilot.menu_input(&session);
            let play = match session.level() {
                Some(level) => pilot.play_input(level),
                None => Default::default(),
            };
            let status = session.step(&menu, &play);
            if status != SessionStatus::Running {
                return status;
            }
            if session.level().is_some_and(|l| l.time_ticks >= settings.max_ticks) {
                log::info!("Tick cap of {} reached", settings.max_ticks);
                session.finish(Outcome::TimedOut);
                return session.status();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::LevelId;

    #[test]
    fn test_one_tick_per_frame_at_tick_rate() {
        let mut stepper = FixedStepper::new(0.015625, 8);
        assert_eq!(stepper.advance(0.015625), 1);
        assert_eq!(stepper.advance(0.015625), 1);
    }

    #[test]
    fn test_accumulates_short_frames() {
        let mut stepper = FixedStepper::new(0.015625, 8);
        assert_eq!(stepper.advance(0.0078125), 0);
        assert_eq!(stepper.alpha(), 0.5);
        assert_eq!(stepper.advance(0.0078125), 1);
    }

    #[test]
    fn test_substep_cap() {
        let mut stepper = FixedStepper::new(0.0078125, 4);
        assert_eq!(stepper.advance(0.09375), 4);
        assert_eq!(stepper.alpha(), 0.0);
    }

    #[test]
    fn test_bad_frame_times() {
        let mut stepper = FixedStepper::default();
        assert_eq!(stepper.advance(f32::NAN), 0);
        assert_eq!(stepper.advance(-1.0), 0);
    }

    #[test]
    fn test_run_session_ends() {
        let settings = Settings {
            max_ticks: 600,
            ..Default::default()
        };
        let status = run_session(&settings);
        assert!(matches!(status, SessionStatus::Finished(_)));
    }

    #[test]
    fn test_run_session_is_deterministic() {
        let settings = Settings {
            level: LevelId::Two,
            autopilot_seed: 42,
            max_ticks: 900,
            ..Default::default()
        };
        assert_eq!(run_session(&settings), run_session(&settings));
    }

    #[test]
    fn test_tiny_cap_times_out() {
        let settings = Settings {
            max_ticks: 1,
            ..Default::default()
        };
        assert_eq!(run_session(&settings), SessionStatus::Finished(Outcome::TimedOut));
    }
}
