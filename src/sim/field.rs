//! Obstacle field: a dense grid of destructible cells
//!
//! Health runs 0..=4, where 0 is an empty cell and 4 a fresh obstacle.
//! Out-of-bounds coordinates read as empty and ignore writes.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::consts::OBSTACLE_MAX_HEALTH;
use crate::tuning::Tuning;

/// Width x height grid of obstacle health values (row-major)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObstacleField {
    width: i32,
    height: i32,
    cells: Vec<u8>,
    /// Number of non-zero cells
    occupied: usize,
}

impl ObstacleField {
    pub fn new(width: i32, height: i32) -> Self {
        let width = width.max(0);
        let height = height.max(0);
        Self {
            width,
            height,
            cells: vec![0; (width * height) as usize],
            occupied: 0,
        }
    }

    #[inline]
    pub fn width(&self) -> i32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> i32 {
        self.height
    }

    /// Raw cells, row-major
    pub fn cells(&self) -> &[u8] {
        &self.cells
    }

    /// Number of cells currently holding an obstacle
    pub fn count(&self) -> usize {
        self.occupied
    }

    #[inline]
    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x >= self.width || y >= self.height {
            None
        } else {
            Some((y * self.width + x) as usize)
        }
    }

    /// Health at (x, y); 0 when empty or out of bounds
    pub fn get(&self, x: i32, y: i32) -> u8 {
        self.index(x, y).map(|i| self.cells[i]).unwrap_or(0)
    }

    #[inline]
    pub fn is_blocked(&self, x: i32, y: i32) -> bool {
        self.get(x, y) > 0
    }

    /// Overwrite a cell's health (clamped to the max); no-op out of bounds
    pub fn set(&mut self, x: i32, y: i32, health: u8) {
        let Some(i) = self.index(x, y) else {
            return;
        };
        let health = health.min(OBSTACLE_MAX_HEALTH);
        match (self.cells[i] > 0, health > 0) {
            (false, true) => self.occupied += 1,
            (true, false) => self.occupied -= 1,
            _ => {}
        }
        self.cells[i] = health;
    }

    /// Remove one point of health. Returns true iff the cell hit 0 on this call.
    pub fn damage(&mut self, x: i32, y: i32) -> bool {
        let Some(i) = self.index(x, y) else {
            return false;
        };
        if self.cells[i] == 0 {
            return false;
        }
        self.cells[i] -= 1;
        if self.cells[i] == 0 {
            self.occupied -= 1;
            true
        } else {
            false
        }
    }

    pub fn clear(&mut self) {
        self.cells.fill(0);
        self.occupied = 0;
    }

    /// Clear and scatter fresh obstacles above the player zone.
    ///
    /// Placement retries on occupied cells but gives up after
    /// `obstacle_place_attempts` draws, so the returned count may fall short
    /// of the level's target on crowded fields.
    pub fn populate<R: Rng + ?Sized>(&mut self, level: u32, tuning: &Tuning, rng: &mut R) -> usize {
        self.clear();

        let target = tuning.obstacle_target(level) as usize;
        let rows = tuning.zone_top().min(self.height);
        if rows <= 0 || self.width <= 0 {
            return 0;
        }

        let mut placed = 0;
        let mut attempts = 0;
        while placed < target && attempts < tuning.obstacle_place_attempts {
            attempts += 1;
            let x = rng.random_range(0..self.width);
            let y = rng.random_range(0..rows);
            if self.get(x, y) == 0 {
                self.set(x, y, OBSTACLE_MAX_HEALTH);
                placed += 1;
            }
        }

        if placed < target {
            log::warn!(
                "Level {}: gave up placing obstacles after {} attempts ({}/{})",
                level,
                attempts,
                placed,
                target
            );
        } else {
            log::debug!("Level {}: placed {} obstacles in {} attempts", level, placed, attempts);
        }
        placed
    }
}
