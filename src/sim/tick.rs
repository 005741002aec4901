//! Fixed timestep simulation tick
//!
//! One call advances the session by exactly one step, in a fixed order:
//! input, projectile, crawler, crawler contact, wanderer, wanderer contact,
//! round-clear check.

use glam::IVec2;
use serde::{Deserialize, Serialize};

use super::collision::{player_hits_crawler, player_hits_wanderer, resolve_projectile};
use super::crawler::CrawlerStep;
use super::state::{GameEvent, GamePhase, GameState, HitCause};
use super::wanderer::WandererStep;

/// Input command for a single tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Command {
    #[default]
    None,
    MoveUp,
    MoveDown,
    MoveLeft,
    MoveRight,
    Fire,
    Quit,
}

impl Command {
    /// Grid delta for movement commands
    pub fn delta(self) -> Option<IVec2> {
        match self {
            Command::MoveUp => Some(IVec2::NEG_Y),
            Command::MoveDown => Some(IVec2::Y),
            Command::MoveLeft => Some(IVec2::NEG_X),
            Command::MoveRight => Some(IVec2::X),
            _ => None,
        }
    }
}

/// Advance the game state by one tick
pub fn tick(state: &mut GameState, command: Command) {
    if !state.running || state.phase == GamePhase::GameOver {
        return;
    }
    if command == Command::Quit {
        log::info!("Quit requested at level {}", state.level);
        state.running = false;
        return;
    }

    state.time_ticks += 1;

    // Player input
    let fired = match command {
        Command::Fire => state.projectile.fire(state.player.pos),
        other => {
            if let Some(delta) = other.delta() {
                state.player.step(delta, &state.tuning);
            }
            false
        }
    };

    // A fresh shot is checked where it appears; an older one moves first
    if fired || state.projectile.advance() {
        resolve_projectile(state);
    }

    // Crawler
    if state.crawler.advance(&state.field) == CrawlerStep::ReachedBottom {
        log::info!("Crawler reached the bottom at level {}", state.level);
        if lose_life(state, HitCause::CrawlerLanded) {
            return;
        }
        state.respawn_crawler();
    }

    if player_hits_crawler(&state.player, &state.crawler) {
        if lose_life(state, HitCause::Crawler) {
            return;
        }
        state.respawn_crawler();
    }

    // Wanderer
    match state
        .wanderer
        .update(&mut state.field, &state.tuning, &mut state.rng)
    {
        WandererStep::Spawned => {
            let pos = state.wanderer.pos;
            state.push_event(GameEvent::WandererSpawned { pos });
        }
        WandererStep::Exited => log::debug!("Wanderer left the field"),
        WandererStep::Idle | WandererStep::Moved => {}
    }

    if player_hits_wanderer(&state.player, &state.wanderer) {
        if lose_life(state, HitCause::Wanderer) {
            return;
        }
        state.wanderer.kill();
        state.player.respawn(&state.tuning);
    }

    // Round clear
    if state.crawler.is_cleared() {
        let level = state.level;
        log::info!("Round {} cleared, score {}", level, state.player.score);
        state.push_event(GameEvent::RoundCleared { level });
        state.start_level(level + 1);
    }
}

/// Take a life for `cause`. Returns true when that ended the game.
fn lose_life(state: &mut GameState, cause: HitCause) -> bool {
    let out = state.player.lose_life();
    let lives = state.player.lives;
    state.push_event(GameEvent::PlayerHit { cause, lives });
    log::debug!("Player hit by {:?}, {} lives left", cause, lives);

    if out {
        state.phase = GamePhase::GameOver;
        state.projectile.deactivate();
        let score = state.player.score;
        let level = state.level;
        state.push_event(GameEvent::GameOver { score, level });
        log::info!("Game over at level {} with score {}", level, score);
    }
    out
}
