//! The segmented crawler
//!
//! A fixed-capacity array of segment slots. The live prefix
//! (`0..length`) is laid out at round start; segments are deactivated as
//! they die and never reused within the round. The lowest-index active
//! segment is always the head.
//!
//! Movement is throttled: every `speed` ticks each active segment tries to
//! step sideways, and drops a row and turns around when a wall or obstacle
//! is in the way.

use glam::IVec2;
use serde::{Deserialize, Serialize};

use super::field::ObstacleField;
use crate::consts::{CRAWLER_CAPACITY, OBSTACLE_MAX_HEALTH};
use crate::horizontal;
use crate::tuning::Tuning;

/// One body unit of the crawler
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Segment {
    pub pos: IVec2,
    /// Horizontal heading, +1 or -1
    pub dir_x: i32,
    pub active: bool,
    pub is_head: bool,
}

impl Default for Segment {
    fn default() -> Self {
        Self {
            pos: IVec2::ZERO,
            dir_x: 1,
            active: false,
            is_head: false,
        }
    }
}

/// Result of a crawler advance
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CrawlerStep {
    /// Movement timer still running
    Waiting,
    /// Segments moved
    Moved,
    /// A segment dropped past the last row
    ReachedBottom,
}

/// `Default` is an empty crawler with no slots laid out
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Crawler {
    segments: [Segment; CRAWLER_CAPACITY],
    /// Slots laid out this round
    length: usize,
    /// Ticks between advances, fixed at spawn
    speed: u32,
    move_timer: u32,
    segment_points: u64,
}

impl Crawler {
    /// Lay out a fresh crawler for `level` along row 0, head at `start_col`
    pub fn spawn(level: u32, start_col: i32, tuning: &Tuning) -> Self {
        let length = tuning.crawler_length(level);
        let speed = tuning.crawler_speed(level);

        let mut segments = [Segment::default(); CRAWLER_CAPACITY];
        for (i, segment) in segments.iter_mut().take(length).enumerate() {
            *segment = Segment {
                pos: IVec2::new(start_col - i as i32, 0),
                dir_x: 1,
                active: true,
                is_head: i == 0,
            };
        }

        log::debug!(
            "Crawler spawned: level={} length={} speed={} start_col={}",
            level,
            length,
            speed,
            start_col
        );

        Self {
            segments,
            length,
            speed,
            move_timer: speed,
            segment_points: tuning.segment_points,
        }
    }

    /// Number of slots laid out this round
    #[inline]
    pub fn length(&self) -> usize {
        self.length
    }

    #[inline]
    pub fn speed(&self) -> u32 {
        self.speed
    }

    /// Slots laid out this round, dead ones included
    pub fn segments(&self) -> &[Segment] {
        &self.segments[..self.length]
    }

    pub fn active_segments(&self) -> impl Iterator<Item = (usize, &Segment)> {
        self.segments().iter().enumerate().filter(|(_, s)| s.active)
    }

    pub fn active_count(&self) -> usize {
        self.segments().iter().filter(|s| s.active).count()
    }

    #[inline]
    pub fn is_cleared(&self) -> bool {
        self.active_count() == 0
    }

    /// Index of the head segment
    pub fn head(&self) -> Option<usize> {
        self.active_segments()
            .find(|(_, s)| s.is_head)
            .map(|(i, _)| i)
    }

    /// First active segment occupying `pos`
    pub fn segment_at(&self, pos: IVec2) -> Option<usize> {
        self.active_segments()
            .find(|(_, s)| s.pos == pos)
            .map(|(i, _)| i)
    }

    /// Count down the movement timer and step every segment when it expires
    pub fn advance(&mut self, field: &ObstacleField) -> CrawlerStep {
        self.move_timer = self.move_timer.saturating_sub(1);
        if self.move_timer > 0 {
            return CrawlerStep::Waiting;
        }
        self.move_timer = self.speed;

        if self.step(field) {
            CrawlerStep::ReachedBottom
        } else {
            CrawlerStep::Moved
        }
    }

    /// Move every active segment once. Returns true if any fell off the bottom.
    pub fn step(&mut self, field: &ObstacleField) -> bool {
        let width = field.width();
        let height = field.height();
        let mut reached_bottom = false;

        for segment in self.segments[..self.length].iter_mut().filter(|s| s.active) {
            let candidate = segment.pos + horizontal(segment.dir_x);
            let blocked = candidate.x < 0
                || candidate.x >= width
                || field.is_blocked(candidate.x, candidate.y);

            if blocked {
                segment.pos.y += 1;
                segment.dir_x = -segment.dir_x;
                if segment.pos.y >= height {
                    reached_bottom = true;
                }
            } else {
                segment.pos = candidate;
            }
        }

        reached_bottom
    }

    /// Kill the segment at `index`, leaving a fresh obstacle where it died.
    ///
    /// Returns the points earned, or 0 when the slot is already dead or
    /// out of range.
    pub fn kill(&mut self, index: usize, field: &mut ObstacleField) -> u64 {
        if index >= self.length || !self.segments[index].active {
            return 0;
        }

        let segment = &mut self.segments[index];
        segment.active = false;
        segment.is_head = false;
        field.set(segment.pos.x, segment.pos.y, OBSTACLE_MAX_HEALTH);

        self.promote_head();
        self.segment_points
    }

    /// Re-establish the single head on the lowest-index active segment
    fn promote_head(&mut self) {
        let mut promoted = false;
        for segment in self.segments[..self.length].iter_mut() {
            segment.is_head = segment.active && !promoted;
            promoted |= segment.is_head;
        }
    }
}
