//! Host settings and preferences
//!
//! Parsed from command-line flags; everything has a sensible default so a
//! bare invocation just starts a game.

use std::path::PathBuf;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::TICK_MS;
use crate::tuning::{Tuning, TuningError};

pub const USAGE: &str = "\
usage: crawler-shooter [--seed N] [--frame-ms N] [--tuning FILE] [--mono]

  --seed N       fixed RNG seed (default: derived from the clock)
  --frame-ms N   delay between ticks in milliseconds (default: 30)
  --tuning FILE  JSON file overriding gameplay constants
  --mono         disable colors";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SettingsError {
    #[error("unknown flag `{0}`")]
    UnknownFlag(String),

    #[error("flag `{0}` expects a value")]
    MissingValue(&'static str),

    #[error("flag `{flag}` expects a number, got `{value}`")]
    InvalidNumber { flag: &'static str, value: String },
}

/// Host preferences
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Fixed seed; `None` picks one from the clock
    pub seed: Option<u64>,
    /// Delay between ticks
    pub frame_ms: u64,
    /// Colored output
    pub color: bool,
    /// Optional tuning override file
    pub tuning_path: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            seed: None,
            frame_ms: TICK_MS,
            color: true,
            tuning_path: None,
        }
    }
}

impl Settings {
    /// Parse flags (without the program name)
    pub fn from_args<I, S>(args: I) -> Result<Self, SettingsError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut settings = Self::default();
        let mut args = args.into_iter().map(Into::into);

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--seed" => {
                    let value = args.next().ok_or(SettingsError::MissingValue("--seed"))?;
                    settings.seed = Some(parse_number("--seed", value)?);
                }
                "--frame-ms" => {
                    let value = args
                        .next()
                        .ok_or(SettingsError::MissingValue("--frame-ms"))?;
                    settings.frame_ms = parse_number("--frame-ms", value)?;
                }
                "--tuning" => {
                    let value = args.next().ok_or(SettingsError::MissingValue("--tuning"))?;
                    settings.tuning_path = Some(PathBuf::from(value));
                }
                "--mono" => settings.color = false,
                _ => return Err(SettingsError::UnknownFlag(arg)),
            }
        }

        Ok(settings)
    }

    pub fn frame_duration(&self) -> Duration {
        Duration::from_millis(self.frame_ms)
    }

    /// The configured seed, or one derived from the wall clock
    pub fn resolve_seed(&self) -> u64 {
        self.seed.unwrap_or_else(|| {
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_nanos() as u64)
                .unwrap_or_else(|e| {
                    log::warn!("System clock before epoch ({}), using default seed", e);
                    crate::consts::DEFAULT_SEED
                })
        })
    }

    /// Tuning from the override file, or the defaults
    pub fn load_tuning(&self) -> Result<Tuning, TuningError> {
        match &self.tuning_path {
            Some(path) => Tuning::load(path),
            None => {
                log::info!("Using default tuning");
                Ok(Tuning::default())
            }
        }
    }
}

fn parse_number(flag: &'static str, value: String) -> Result<u64, SettingsError> {
    value
        .parse()
        .map_err(|_| SettingsError::InvalidNumber { flag, value })
}
