//! The wanderer: an intermittent bonus enemy roaming the player zone
//!
//! While inactive it counts down to its next appearance. Once spawned it
//! crosses the field horizontally from one edge, jittering up and down
//! inside the player zone and eating any obstacle it passes over.

use glam::IVec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::field::ObstacleField;
use crate::tuning::Tuning;

/// Result of a wanderer update
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WandererStep {
    /// Inactive, or between moves
    Idle,
    /// Entered the field this tick
    Spawned,
    Moved,
    /// Walked off a side edge and deactivated
    Exited,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Wanderer {
    pub pos: IVec2,
    /// `x` is the fixed horizontal heading, `y` the current vertical one
    pub dir: IVec2,
    pub active: bool,
    pub move_timer: u32,
    pub spawn_countdown: u32,
}

impl Wanderer {
    /// An inactive wanderer with a freshly rolled spawn countdown
    pub fn new<R: Rng + ?Sized>(tuning: &Tuning, rng: &mut R) -> Self {
        Self {
            pos: IVec2::ZERO,
            dir: IVec2::new(1, 1),
            active: false,
            move_timer: 0,
            spawn_countdown: Self::roll_countdown(tuning, rng),
        }
    }

    fn roll_countdown<R: Rng + ?Sized>(tuning: &Tuning, rng: &mut R) -> u32 {
        rng.random_range(tuning.wanderer_spawn_min..tuning.wanderer_spawn_max)
    }

    /// Per-tick update: spawn gating while inactive, throttled movement while active
    pub fn update<R: Rng + ?Sized>(
        &mut self,
        field: &mut ObstacleField,
        tuning: &Tuning,
        rng: &mut R,
    ) -> WandererStep {
        if !self.active {
            self.spawn_countdown = self.spawn_countdown.saturating_sub(1);
            if self.spawn_countdown > 0 {
                return WandererStep::Idle;
            }
            self.spawn(field, tuning, rng);
            return WandererStep::Spawned;
        }

        self.move_timer += 1;
        if self.move_timer < tuning.wanderer_move_interval {
            return WandererStep::Idle;
        }
        self.move_timer = 0;
        self.step(field, tuning, rng)
    }

    fn spawn<R: Rng + ?Sized>(&mut self, field: &mut ObstacleField, tuning: &Tuning, rng: &mut R) {
        let y = rng.random_range(tuning.zone_top()..=tuning.zone_bottom());
        let from_left = rng.random_bool(0.5);
        let dir_y = if rng.random_bool(0.5) { 1 } else { -1 };

        self.pos = if from_left {
            IVec2::new(0, y)
        } else {
            IVec2::new(tuning.field_width - 1, y)
        };
        self.dir = IVec2::new(if from_left { 1 } else { -1 }, dir_y);
        self.active = true;
        self.move_timer = 0;
        self.spawn_countdown = Self::roll_countdown(tuning, rng);
        self.eat(field);

        log::debug!("Wanderer spawned at {:?} heading {:?}", self.pos, self.dir);
    }

    /// One erratic move
    pub fn step<R: Rng + ?Sized>(
        &mut self,
        field: &mut ObstacleField,
        tuning: &Tuning,
        rng: &mut R,
    ) -> WandererStep {
        if !self.active {
            return WandererStep::Idle;
        }

        self.pos.x += self.dir.x;
        if self.pos.x < 0 || self.pos.x >= tuning.field_width {
            self.active = false;
            return WandererStep::Exited;
        }

        if rng.random_ratio(1, tuning.wanderer_vertical_step_odds) {
            self.pos.y += self.dir.y;
            self.clamp_to_zone(tuning);
        }
        if rng.random_ratio(1, tuning.wanderer_vertical_flip_odds) {
            self.dir.y = -self.dir.y;
        }

        self.eat(field);
        WandererStep::Moved
    }

    /// Snap back inside the zone, bouncing off whichever edge was crossed
    fn clamp_to_zone(&mut self, tuning: &Tuning) {
        if self.pos.y < tuning.zone_top() {
            self.pos.y = tuning.zone_top();
            self.dir.y = 1;
        } else if self.pos.y > tuning.zone_bottom() {
            self.pos.y = tuning.zone_bottom();
            self.dir.y = -1;
        }
    }

    /// Obstacles under the wanderer are removed without scoring
    fn eat(&self, field: &mut ObstacleField) {
        field.set(self.pos.x, self.pos.y, 0);
    }

    /// Deactivate. Returns false if it was not active.
    pub fn kill(&mut self) -> bool {
        std::mem::replace(&mut self.active, false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::OBSTACLE_MAX_HEALTH;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn active_at(pos: IVec2, dir: IVec2) -> Wanderer {
        Wanderer {
            pos,
            dir,
            active: true,
            move_timer: 0,
            spawn_countdown: 100,
        }
    }

    #[test]
    fn test_countdown_in_range() {
        let t = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(3);
        for _ in 0..100 {
            let w = Wanderer::new(&t, &mut rng);
            assert!(!w.active);
            assert!((t.wanderer_spawn_min..t.wanderer_spawn_max).contains(&w.spawn_countdown));
        }
    }

    #[test]
    fn test_spawns_when_countdown_expires() {
        let t = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(11);
        let mut field = ObstacleField::new(t.field_width, t.field_height);
        let mut w = Wanderer::new(&t, &mut rng);
        w.spawn_countdown = 3;

        assert_eq!(w.update(&mut field, &t, &mut rng), WandererStep::Idle);
        assert_eq!(w.update(&mut field, &t, &mut rng), WandererStep::Idle);
        assert_eq!(w.update(&mut field, &t, &mut rng), WandererStep::Spawned);

        assert!(w.active);
        assert!(w.pos.x == 0 || w.pos.x == t.field_width - 1);
        assert_eq!(w.dir.x, if w.pos.x == 0 { 1 } else { -1 });
        assert!(w.dir.y == 1 || w.dir.y == -1);
        assert!((t.zone_top()..=t.zone_bottom()).contains(&w.pos.y));
        assert!((t.wanderer_spawn_min..t.wanderer_spawn_max).contains(&w.spawn_countdown));
    }

    #[test]
    fn test_moves_every_second_tick() {
        let t = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(5);
        let mut field = ObstacleField::new(t.field_width, t.field_height);
        let mut w = active_at(IVec2::new(10, 21), IVec2::new(1, 1));

        assert_eq!(w.update(&mut field, &t, &mut rng), WandererStep::Idle);
        assert_eq!(w.pos.x, 10);
        assert_eq!(w.update(&mut field, &t, &mut rng), WandererStep::Moved);
        assert_eq!(w.pos.x, 11);
    }

    #[test]
    fn test_exits_field_and_deactivates() {
        let t = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(5);
        let mut field = ObstacleField::new(t.field_width, t.field_height);
        let mut w = active_at(IVec2::new(t.field_width - 1, 22), IVec2::new(1, 1));

        assert_eq!(w.step(&mut field, &t, &mut rng), WandererStep::Exited);
        assert!(!w.active);
        assert_eq!(w.step(&mut field, &t, &mut rng), WandererStep::Idle);
    }

    #[test]
    fn test_eats_obstacles_it_crosses() {
        let t = Tuning {
            wanderer_vertical_step_odds: u32::MAX,
            wanderer_vertical_flip_odds: u32::MAX,
            ..Tuning::default()
        };
        let mut rng = Pcg32::seed_from_u64(5);
        let mut field = ObstacleField::new(t.field_width, t.field_height);
        field.set(11, 22, OBSTACLE_MAX_HEALTH);
        let mut w = active_at(IVec2::new(10, 22), IVec2::new(1, 1));

        // 1-in-u32::MAX vertical odds keep it on row 22
        assert_eq!(w.step(&mut field, &t, &mut rng), WandererStep::Moved);
        assert_eq!(w.pos, IVec2::new(11, 22));
        assert_eq!(field.get(11, 22), 0);
        assert_eq!(field.count(), 0);
    }

    #[test]
    fn test_clamp_bounces_at_zone_edges() {
        let t = Tuning::default();
        let mut w = active_at(IVec2::new(5, t.zone_top() - 1), IVec2::new(1, -1));
        w.clamp_to_zone(&t);
        assert_eq!(w.pos.y, t.zone_top());
        assert_eq!(w.dir.y, 1);

        let mut w = active_at(IVec2::new(5, t.zone_bottom() + 1), IVec2::new(1, 1));
        w.clamp_to_zone(&t);
        assert_eq!(w.pos.y, t.zone_bottom());
        assert_eq!(w.dir.y, -1);
    }

    #[test]
    fn test_kill() {
        let mut w = active_at(IVec2::new(5, 22), IVec2::new(1, 1));
        assert!(w.kill());
        assert!(!w.kill());
    }

    proptest! {
        #[test]
        fn prop_stays_in_zone(seed in any::<u64>(), ticks in 1usize..600) {
            let t = Tuning {
                wanderer_spawn_min: 1,
                wanderer_spawn_max: 5,
                ..Tuning::default()
            };
            let mut rng = Pcg32::seed_from_u64(seed);
            let mut field = ObstacleField::new(t.field_width, t.field_height);
            let mut w = Wanderer::new(&t, &mut rng);

            for _ in 0..ticks {
                w.update(&mut field, &t, &mut rng);
                if w.active {
                    prop_assert!(w.pos.y >= t.zone_top() && w.pos.y <= t.zone_bottom());
                    prop_assert!(w.pos.x >= 0 && w.pos.x < t.field_width);
                }
            }
        }
    }
}
