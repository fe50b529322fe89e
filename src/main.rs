//! Serpent Platformer entry point
//!
//! Runs one headless session with the demo player at the keys, prints how it
//! ended and exits with a code per outcome.

use serpent_platformer::Settings;
use serpent_platformer::driver::run_session;
use serpent_platformer::session::SessionStatus;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Serpent Platformer starting...");

    let path = std::env::args().nth(1);
    let settings = Settings::load(path.as_deref());
    log::info!(
        "Level {}, autopilot seed {}, tick cap {}",
        settings.level.number(),
        settings.autopilot_seed,
        settings.max_ticks
    );

    match run_session(&settings) {
        SessionStatus::Finished(outcome) => {
            println!("{}", outcome.message());
            std::process::exit(outcome.exit_code());
        }
        SessionStatus::Quit | SessionStatus::Running => {
            log::info!("Goodbye");
        }
    }
}
