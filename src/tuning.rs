//! Data-driven game balance
//!
//! Every gameplay constant lives on [`Tuning`] so difficulty curves and point
//! values can be audited (and overridden from a JSON file) without touching
//! the simulation code.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::{CRAWLER_CAPACITY, FIELD_MAX_SIDE};

/// Errors raised while loading or validating a tuning file
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("failed to read tuning file: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed tuning JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid tuning value `{field}`: {reason}")]
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}

/// Gameplay constants
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Playfield ===
    pub field_width: i32,
    pub field_height: i32,
    /// Rows at the bottom reserved for the player and the wanderer
    pub player_zone_rows: i32,

    // === Player ===
    pub starting_lives: u32,

    // === Obstacles ===
    pub obstacles_base: u32,
    pub obstacles_per_level: u32,
    pub obstacles_max: u32,
    /// Upper bound on random placement attempts per population
    pub obstacle_place_attempts: u32,

    // === Crawler ===
    pub crawler_base_length: usize,
    /// Ticks between advances at level 0 (lower is faster)
    pub crawler_speed_base: u32,
    /// Levels per one-tick speed-up
    pub crawler_speed_divisor: u32,

    // === Scoring ===
    pub obstacle_points: u64,
    pub segment_points: u64,
    pub wanderer_points: u64,

    // === Wanderer ===
    /// Inclusive lower bound of the spawn countdown (ticks)
    pub wanderer_spawn_min: u32,
    /// Exclusive upper bound of the spawn countdown (ticks)
    pub wanderer_spawn_max: u32,
    pub wanderer_move_interval: u32,
    /// 1-in-N chance of a vertical step per move
    pub wanderer_vertical_step_odds: u32,
    /// 1-in-N chance of flipping vertical direction per move
    pub wanderer_vertical_flip_odds: u32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            field_width: 40,
            field_height: 24,
            player_zone_rows: 4,

            starting_lives: 3,

            obstacles_base: 20,
            obstacles_per_level: 5,
            obstacles_max: 60,
            obstacle_place_attempts: 500,

            crawler_base_length: 8,
            crawler_speed_base: 4,
            crawler_speed_divisor: 3,

            obstacle_points: 1,
            segment_points: 10,
            wanderer_points: 100,

            wanderer_spawn_min: 90,
            wanderer_spawn_max: 240,
            wanderer_move_interval: 2,
            wanderer_vertical_step_odds: 3,
            wanderer_vertical_flip_odds: 5,
        }
    }
}

impl Tuning {
    /// First row of the player zone
    #[inline]
    pub fn zone_top(&self) -> i32 {
        self.field_height - self.player_zone_rows
    }

    /// Last row of the playfield
    #[inline]
    pub fn zone_bottom(&self) -> i32 {
        self.field_height - 1
    }

    /// Obstacles to place for a level: `min(max, base + per_level * level)`
    pub fn obstacle_target(&self, level: u32) -> u32 {
        self.obstacles_base
            .saturating_add(self.obstacles_per_level.saturating_mul(level))
            .min(self.obstacles_max)
    }

    /// Crawler length for a level, capped at the segment array capacity
    pub fn crawler_length(&self, level: u32) -> usize {
        self.crawler_base_length
            .saturating_add(level as usize)
            .min(CRAWLER_CAPACITY)
    }

    /// Ticks between crawler advances: `max(1, base - level / divisor)`
    pub fn crawler_speed(&self, level: u32) -> u32 {
        self.crawler_speed_base
            .saturating_sub(level / self.crawler_speed_divisor.max(1))
            .max(1)
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<(), TuningError> {
        fn invalid(field: &'static str, reason: &'static str) -> Result<(), TuningError> {
            Err(TuningError::Invalid { field, reason })
        }

        // A full-length crawler must fit on row 0
        if self.field_width < CRAWLER_CAPACITY as i32 {
            return invalid("field_width", "must hold a full-length crawler (20 columns)");
        }
        if self.field_width > FIELD_MAX_SIDE {
            return invalid("field_width", "must be at most 1000");
        }
        if self.field_height > FIELD_MAX_SIDE {
            return invalid("field_height", "must be at most 1000");
        }
        if self.player_zone_rows < 1 {
            return invalid("player_zone_rows", "must be at least 1");
        }
        if self.field_height <= self.player_zone_rows {
            return invalid("field_height", "must leave rows above the player zone");
        }
        if self.starting_lives == 0 {
            return invalid("starting_lives", "must be at least 1");
        }
        if self.crawler_base_length == 0 {
            return invalid("crawler_base_length", "must be at least 1");
        }
        if self.crawler_speed_divisor == 0 {
            return invalid("crawler_speed_divisor", "must be non-zero");
        }
        if self.wanderer_spawn_min == 0 {
            return invalid("wanderer_spawn_min", "must be at least 1");
        }
        if self.wanderer_spawn_max <= self.wanderer_spawn_min {
            return invalid("wanderer_spawn_max", "must exceed wanderer_spawn_min");
        }
        if self.wanderer_move_interval == 0 {
            return invalid("wanderer_move_interval", "must be at least 1");
        }
        if self.wanderer_vertical_step_odds == 0 || self.wanderer_vertical_flip_odds == 0 {
            return invalid("wanderer_vertical_*_odds", "must be at least 1");
        }
        Ok(())
    }

    /// Parse and validate a JSON document; missing keys keep their defaults
    pub fn from_json_str(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Load and validate a JSON tuning file
    pub fn load(path: &Path) -> Result<Self, TuningError> {
        let json = std::fs::read_to_string(path)?;
        let tuning = Self::from_json_str(&json)?;
        log::info!("Loaded tuning from {}", path.display());
        Ok(tuning)
    }
}
