//! Collision resolution
//!
//! The projectile is checked against obstacles, then crawler segments, then
//! the wanderer; the first hit consumes it. Player contact checks are plain
//! cell-equality tests and leave the consequences to the tick.

use glam::IVec2;

use super::crawler::Crawler;
use super::player::Player;
use super::state::{GameEvent, GameState};
use super::wanderer::Wanderer;

/// What the projectile struck
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectileHit {
    Obstacle { pos: IVec2, destroyed: bool },
    Segment { index: usize, pos: IVec2 },
    Wanderer { pos: IVec2 },
}

/// Resolve the active projectile against the field, crawler and wanderer.
///
/// Awards points, records events and deactivates the projectile on a hit.
pub fn resolve_projectile(state: &mut GameState) -> Option<ProjectileHit> {
    if !state.projectile.active {
        return None;
    }
    let pos = state.projectile.pos;

    let hit = if state.field.is_blocked(pos.x, pos.y) {
        let destroyed = state.field.damage(pos.x, pos.y);
        if destroyed {
            state.player.score += state.tuning.obstacle_points;
            state.push_event(GameEvent::ObstacleDestroyed { pos });
        }
        ProjectileHit::Obstacle { pos, destroyed }
    } else if let Some(index) = state.crawler.segment_at(pos) {
        state.player.score += state.crawler.kill(index, &mut state.field);
        state.push_event(GameEvent::SegmentKilled { index, pos });
        log::debug!("Segment {} killed at {:?}", index, pos);
        ProjectileHit::Segment { index, pos }
    } else if wanderer_at(&state.wanderer, pos) {
        state.wanderer.kill();
        state.player.score += state.tuning.wanderer_points;
        state.push_event(GameEvent::WandererKilled { pos });
        log::debug!("Wanderer shot at {:?}", pos);
        ProjectileHit::Wanderer { pos }
    } else {
        return None;
    };

    state.projectile.deactivate();
    Some(hit)
}

#[inline]
fn wanderer_at(wanderer: &Wanderer, pos: IVec2) -> bool {
    wanderer.active && wanderer.pos == pos
}

/// Any active segment sharing the player's cell
pub fn player_hits_crawler(player: &Player, crawler: &Crawler) -> bool {
    crawler.segment_at(player.pos).is_some()
}

pub fn player_hits_wanderer(player: &Player, wanderer: &Wanderer) -> bool {
    wanderer_at(wanderer, player.pos)
}
