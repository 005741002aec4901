//! Read-only per-tick view handed to render sinks

use glam::IVec2;
use serde::{Deserialize, Serialize};

use super::state::GamePhase;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SegmentView {
    pub pos: IVec2,
    pub head: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub width: i32,
    pub height: i32,
    /// First row of the player zone
    pub zone_top: i32,
    /// Obstacle health, row-major
    pub cells: Vec<u8>,
    pub player: IVec2,
    pub projectile: Option<IVec2>,
    /// Active crawler segments only
    pub segments: Vec<SegmentView>,
    pub wanderer: Option<IVec2>,
    pub lives: u32,
    pub score: u64,
    pub level: u32,
    pub phase: GamePhase,
}

impl Snapshot {
    /// Obstacle health at (x, y); 0 out of bounds
    pub fn cell(&self, x: i32, y: i32) -> u8 {
        if x < 0 || y < 0 || x >= self.width || y >= self.height {
            return 0;
        }
        self.cells[(y * self.width + x) as usize]
    }
}
