//! Game state and core simulation types
//!
//! `GameState` is the single owner of everything a tick touches: the
//! obstacle field, crawler, wanderer, player, projectile and the seeded RNG.

use glam::IVec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::crawler::Crawler;
use super::field::ObstacleField;
use super::player::{Player, Projectile};
use super::snapshot::{SegmentView, Snapshot};
use super::wanderer::Wanderer;
use crate::tuning::Tuning;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// Out of lives (terminal)
    GameOver,
}

/// What cost the player a life
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HitCause {
    Crawler,
    Wanderer,
    /// A crawler segment dropped past the last row
    CrawlerLanded,
}

/// Things that happened during a tick, in order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    LevelStarted { level: u32, obstacles: usize },
    ObstacleDestroyed { pos: IVec2 },
    SegmentKilled { index: usize, pos: IVec2 },
    WandererSpawned { pos: IVec2 },
    WandererKilled { pos: IVec2 },
    PlayerHit { cause: HitCause, lives: u32 },
    RoundCleared { level: u32 },
    GameOver { score: u64, level: u32 },
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub tuning: Tuning,
    /// Current level (1-based)
    pub level: u32,
    /// Cleared by a quit command
    pub running: bool,
    pub phase: GamePhase,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub field: ObstacleField,
    pub player: Player,
    pub projectile: Projectile,
    pub crawler: Crawler,
    pub wanderer: Wanderer,
    pub(crate) rng: Pcg32,
    events: Vec<GameEvent>,
}

impl GameState {
    /// New game at level 1 with default tuning
    pub fn new(seed: u64) -> Self {
        Self::with_tuning(seed, Tuning::default())
    }

    /// New game at level 1
    pub fn with_tuning(seed: u64, tuning: Tuning) -> Self {
        let rng = Pcg32::seed_from_u64(seed);
        let field = ObstacleField::new(tuning.field_width, tuning.field_height);
        let player = Player::new(&tuning);

        let mut state = Self {
            seed,
            tuning,
            level: 1,
            running: true,
            phase: GamePhase::Playing,
            time_ticks: 0,
            field,
            player,
            projectile: Projectile::default(),
            // Laid out by start_level below
            crawler: Crawler::default(),
            wanderer: Wanderer::default(),
            rng,
            events: Vec::new(),
        };

        log::info!("Game initialized with seed: {}", seed);
        state.start_level(1);
        state
    }

    /// Set up a round: new field population, crawler, wanderer, player
    /// position and an idle projectile. Lives and score carry over.
    pub fn start_level(&mut self, level: u32) {
        self.level = level;
        let obstacles = self.field.populate(level, &self.tuning, &mut self.rng);
        self.crawler = Crawler::spawn(level, self.crawler_start_column(), &self.tuning);
        self.wanderer = Wanderer::new(&self.tuning, &mut self.rng);
        self.player.respawn(&self.tuning);
        self.projectile.deactivate();

        log::info!(
            "Level {}: {} obstacles, crawler length {} speed {}",
            level,
            obstacles,
            self.crawler.length(),
            self.crawler.speed()
        );
        self.push_event(GameEvent::LevelStarted { level, obstacles });
    }

    /// Column of the crawler head at spawn; keeps the whole chain on-field
    pub fn crawler_start_column(&self) -> i32 {
        let length = self.tuning.crawler_length(self.level) as i32;
        (self.tuning.field_width / 2)
            .max(length - 1)
            .min(self.tuning.field_width - 1)
    }

    /// Replace the crawler with a fresh one for the current level
    pub fn respawn_crawler(&mut self) {
        self.crawler = Crawler::spawn(self.level, self.crawler_start_column(), &self.tuning);
    }

    #[inline]
    pub fn is_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    pub(crate) fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Events recorded since the last drain
    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }

    /// Drain recorded events
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Read-only view for renderers
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            width: self.field.width(),
            height: self.field.height(),
            zone_top: self.tuning.zone_top(),
            cells: self.field.cells().to_vec(),
            player: self.player.pos,
            projectile: self.projectile.active.then_some(self.projectile.pos),
            segments: self
                .crawler
                .active_segments()
                .map(|(_, s)| SegmentView {
                    pos: s.pos,
                    head: s.is_head,
                })
                .collect(),
            wanderer: self.wanderer.active.then_some(self.wanderer.pos),
            lives: self.player.lives,
            score: self.player.score,
            level: self.level,
            phase: self.phase,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::CRAWLER_CAPACITY;

    #[test]
    fn test_new_game_starts_level_one() {
        let state = GameState::new(12345);
        assert_eq!(state.level, 1);
        assert!(state.running);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.crawler.active_count(), 9);
        assert_eq!(state.crawler.head(), Some(0));
        assert!((1..=25).contains(&state.field.count()));
        assert!(!state.wanderer.active);
        assert!(!state.projectile.active);
        assert_eq!(
            state.events(),
            &[GameEvent::LevelStarted {
                level: 1,
                obstacles: state.field.count()
            }]
        );
    }

    #[test]
    fn test_start_column_keeps_chain_on_field() {
        let tuning = Tuning {
            field_width: CRAWLER_CAPACITY as i32,
            ..Tuning::default()
        };
        let mut state = GameState::with_tuning(1, tuning);
        for level in [1, 11, 12, 40] {
            state.start_level(level);
            let width = state.field.width();
            assert!(state.crawler_start_column() < width);
            for s in state.crawler.segments() {
                assert!((0..width).contains(&s.pos.x), "{:?} at level {}", s.pos, level);
            }
        }
        // Full-length crawler fills the narrowest field exactly
        assert_eq!(state.crawler.length(), CRAWLER_CAPACITY);
        assert_eq!(state.crawler_start_column(), CRAWLER_CAPACITY as i32 - 1);

        let state = GameState::new(1);
        assert_eq!(state.crawler_start_column(), 20);
    }

    #[test]
    fn test_field_population_draws_first() {
        let state = GameState::new(77);
        let mut rng = Pcg32::seed_from_u64(77);
        let mut field = ObstacleField::new(40, 24);
        field.populate(1, &Tuning::default(), &mut rng);
        assert_eq!(state.field, field);
    }

    #[test]
    fn test_snapshot_mirrors_state() {
        let mut state = GameState::new(42);
        state.projectile.fire(state.player.pos);
        let snap = state.snapshot();
        assert_eq!(snap.width, 40);
        assert_eq!(snap.height, 24);
        assert_eq!(snap.cells.len(), 40 * 24);
        assert_eq!(snap.player, state.player.pos);
        assert_eq!(snap.projectile, Some(state.player.pos - IVec2::Y));
        assert_eq!(snap.segments.len(), 9);
        assert_eq!(snap.segments.iter().filter(|s| s.head).count(), 1);
        assert_eq!(snap.wanderer, None);
        assert_eq!(snap.lives, 3);
        assert_eq!(snap.level, 1);
    }

    #[test]
    fn test_take_events_drains() {
        let mut state = GameState::new(7);
        assert_eq!(state.take_events().len(), 1);
        assert!(state.events().is_empty());
    }
}
