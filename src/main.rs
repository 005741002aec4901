//! Terminal entry point
//!
//! Logging goes to stderr through `env_logger`; with `RUST_LOG` raised,
//! redirect stderr (`2>crawler.log`) to keep the playfield clean.

use std::io::{BufWriter, stdout};
use std::process::ExitCode;

use thiserror::Error;

use crawler_shooter::platform::terminal::{KeyboardInput, TerminalGuard};
use crawler_shooter::platform::{FixedPacer, SessionEnd, run};
use crawler_shooter::renderer::TerminalRenderer;
use crawler_shooter::settings::USAGE;
use crawler_shooter::sim::GameState;
use crawler_shooter::{Settings, SettingsError, TuningError};

#[derive(Debug, Error)]
enum HostError {
    #[error("{0}\n\n{usage}", usage = USAGE)]
    Settings(#[from] SettingsError),

    #[error(transparent)]
    Tuning(#[from] TuningError),

    #[error("terminal error: {0}")]
    Io(#[from] std::io::Error),
}

fn main() -> ExitCode {
    env_logger::init();

    match play() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{}", e);
            eprintln!("crawler-shooter: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn play() -> Result<(), HostError> {
    let settings = Settings::from_args(std::env::args().skip(1))?;
    let tuning = settings.load_tuning()?;
    let mut seed = settings.resolve_seed();

    log::info!("Crawler Shooter starting (seed {})", seed);

    let mut guard = TerminalGuard::enter(BufWriter::new(stdout()))?;
    let mut renderer = TerminalRenderer::new(guard.writer(), settings.color);
    let mut input = KeyboardInput::new();
    let mut pacer = FixedPacer::new(settings.frame_duration());

    loop {
        let mut state = GameState::with_tuning(seed, tuning.clone());
        renderer.reset();

        match run(&mut state, &mut input, &mut pacer, &mut renderer)? {
            SessionEnd::Quit => break,
            SessionEnd::GameOver { score, level } => {
                renderer.show_game_over(score, level)?;
                if !input.wait_for_restart()? {
                    break;
                }
                seed = seed.wrapping_add(1);
                log::info!("Restarting with seed {}", seed);
            }
        }
    }

    Ok(())
}
