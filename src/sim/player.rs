//! Player shooter and its single projectile

use glam::IVec2;
use serde::{Deserialize, Serialize};

use crate::tuning::Tuning;

/// The player's shooter
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub pos: IVec2,
    pub lives: u32,
    pub score: u64,
}

impl Player {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            pos: Self::spawn_point(tuning),
            lives: tuning.starting_lives,
            score: 0,
        }
    }

    /// Bottom row, horizontally centered
    pub fn spawn_point(tuning: &Tuning) -> IVec2 {
        IVec2::new(tuning.field_width / 2, tuning.zone_bottom())
    }

    pub fn respawn(&mut self, tuning: &Tuning) {
        self.pos = Self::spawn_point(tuning);
    }

    /// Move one cell, staying inside the player zone
    pub fn step(&mut self, delta: IVec2, tuning: &Tuning) {
        let next = self.pos + delta;
        self.pos = IVec2::new(
            next.x.clamp(0, tuning.field_width - 1),
            next.y.clamp(tuning.zone_top(), tuning.zone_bottom()),
        );
    }

    /// Remove one life. Returns true if none remain.
    pub fn lose_life(&mut self) -> bool {
        self.lives = self.lives.saturating_sub(1);
        self.lives == 0
    }
}

/// The single in-flight shot. Travels one row up per tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Projectile {
    pub pos: IVec2,
    pub active: bool,
}

impl Projectile {
    /// Launch from just above `shooter`. No-op while a shot is in flight.
    pub fn fire(&mut self, shooter: IVec2) -> bool {
        if self.active {
            return false;
        }
        self.pos = shooter - IVec2::Y;
        self.active = true;
        true
    }

    /// Move one row up. Returns false once the shot is (or already was) gone.
    pub fn advance(&mut self) -> bool {
        if !self.active {
            return false;
        }
        self.pos.y -= 1;
        if self.pos.y < 0 {
            self.active = false;
        }
        self.active
    }

    #[inline]
    pub fn deactivate(&mut self) {
        self.active = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_player_spawns_bottom_center() {
        let t = Tuning::default();
        let p = Player::new(&t);
        assert_eq!(p.pos, IVec2::new(20, 23));
        assert_eq!(p.lives, 3);
        assert_eq!(p.score, 0);
    }

    #[test]
    fn test_player_clamped_to_zone() {
        let t = Tuning::default();
        let mut p = Player::new(&t);

        for _ in 0..10 {
            p.step(IVec2::NEG_Y, &t);
        }
        assert_eq!(p.pos.y, t.zone_top());

        for _ in 0..10 {
            p.step(IVec2::Y, &t);
        }
        assert_eq!(p.pos.y, t.zone_bottom());

        for _ in 0..50 {
            p.step(IVec2::NEG_X, &t);
        }
        assert_eq!(p.pos.x, 0);

        for _ in 0..50 {
            p.step(IVec2::X, &t);
        }
        assert_eq!(p.pos.x, t.field_width - 1);
    }

    #[test]
    fn test_fire_while_active_is_noop() {
        let mut shot = Projectile::default();
        assert!(shot.fire(IVec2::new(5, 20)));
        assert_eq!(shot.pos, IVec2::new(5, 19));

        shot.advance();
        let before = shot;
        assert!(!shot.fire(IVec2::new(9, 22)));
        assert_eq!(shot, before);
    }

    #[test]
    fn test_projectile_leaves_top() {
        let mut shot = Projectile::default();
        shot.fire(IVec2::new(3, 2));
        assert!(shot.advance()); // y = 0
        assert!(!shot.advance()); // off the top
        assert!(!shot.active);
        assert!(!shot.advance());
    }

    #[test]
    fn test_lose_life_reports_last() {
        let mut p = Player::new(&Tuning::default());
        p.lives = 2;
        assert!(!p.lose_life());
        assert!(p.lose_life());
        assert!(p.lose_life());
        assert_eq!(p.lives, 0);
    }
}
