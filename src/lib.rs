//! Crawler Shooter - a grid-based Centipede-style arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (field, crawler, wanderer, collisions, rounds)
//! - `tuning`: Data-driven game balance
//! - `renderer`: Glyph frames and the terminal draw sink
//! - `platform`: Input / pacing / render seams and the host loop
//! - `settings`: Host preferences from the command line

pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use settings::{Settings, SettingsError};
pub use tuning::{Tuning, TuningError};

use glam::IVec2;

/// Game configuration constants
pub mod consts {
    /// Fixed delay between simulation ticks (milliseconds, ~33 Hz)
    pub const TICK_MS: u64 = 30;

    /// Compile-time capacity of the crawler segment array
    pub const CRAWLER_CAPACITY: usize = 20;

    /// Health of a freshly placed obstacle
    pub const OBSTACLE_MAX_HEALTH: u8 = 4;

    /// Largest field width or height; keeps cell counts in `i32` and
    /// screen coordinates in `u16`
    pub const FIELD_MAX_SIDE: i32 = 1000;

    /// Seed used when the host is asked for a reproducible default run
    pub const DEFAULT_SEED: u64 = 0x5EED_C0DE;
}

/// Unit step for a horizontal direction (-1 or +1)
#[inline]
pub fn horizontal(dir_x: i32) -> IVec2 {
    IVec2::new(dir_x.signum(), 0)
}

/// Whether `pos` lies inside a `width` x `height` grid
#[inline]
pub fn in_bounds(pos: IVec2, width: i32, height: i32) -> bool {
    pos.x >= 0 && pos.y >= 0 && pos.x < width && pos.y < height
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_in_bounds_edges() {
        assert!(in_bounds(IVec2::new(0, 0), 40, 24));
        assert!(in_bounds(IVec2::new(39, 23), 40, 24));
        assert!(!in_bounds(IVec2::new(40, 0), 40, 24));
        assert!(!in_bounds(IVec2::new(0, -1), 40, 24));
    }

    #[test]
    fn test_horizontal_is_unit() {
        assert_eq!(horizontal(1), IVec2::X);
        assert_eq!(horizontal(-3), IVec2::NEG_X);
    }
}
