//! Rendering module
//!
//! Snapshots are flattened into a [`Frame`] of glyphs. Comparing two frames
//! yields just the cells that changed, which is all a sink has to redraw.

pub mod terminal;

pub use terminal::TerminalRenderer;

use crate::sim::Snapshot;

/// What occupies a single cell on screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Glyph {
    #[default]
    Empty,
    /// Obstacle with its remaining health (1..=4)
    Obstacle(u8),
    Projectile,
    Head,
    Body,
    Wanderer,
    Player,
}

impl Glyph {
    pub fn symbol(self) -> char {
        match self {
            Glyph::Empty => ' ',
            Glyph::Obstacle(4) => '#',
            Glyph::Obstacle(3) => '%',
            Glyph::Obstacle(2) => '+',
            Glyph::Obstacle(_) => '.',
            Glyph::Projectile => '|',
            Glyph::Head => '@',
            Glyph::Body => 'o',
            Glyph::Wanderer => 'W',
            Glyph::Player => 'A',
        }
    }
}

/// A changed cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellChange {
    pub x: i32,
    pub y: i32,
    pub glyph: Glyph,
}

/// Glyph grid for one tick
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    width: i32,
    height: i32,
    glyphs: Vec<Glyph>,
}

impl Frame {
    pub fn blank(width: i32, height: i32) -> Self {
        let width = width.max(0);
        let height = height.max(0);
        Self {
            width,
            height,
            glyphs: vec![Glyph::Empty; (width * height) as usize],
        }
    }

    /// Layer a snapshot: obstacles, then the shot, crawler, wanderer and player on top
    pub fn compose(snapshot: &Snapshot) -> Self {
        let mut frame = Self::blank(snapshot.width, snapshot.height);

        for (glyph, &health) in frame.glyphs.iter_mut().zip(&snapshot.cells) {
            if health > 0 {
                *glyph = Glyph::Obstacle(health);
            }
        }
        if let Some(pos) = snapshot.projectile {
            frame.put(pos.x, pos.y, Glyph::Projectile);
        }
        // Body first so a head sharing a cell stays visible
        for segment in snapshot.segments.iter().filter(|s| !s.head) {
            frame.put(segment.pos.x, segment.pos.y, Glyph::Body);
        }
        for segment in snapshot.segments.iter().filter(|s| s.head) {
            frame.put(segment.pos.x, segment.pos.y, Glyph::Head);
        }
        if let Some(pos) = snapshot.wanderer {
            frame.put(pos.x, pos.y, Glyph::Wanderer);
        }
        frame.put(snapshot.player.x, snapshot.player.y, Glyph::Player);

        frame
    }

    #[inline]
    pub fn width(&self) -> i32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> i32 {
        self.height
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x >= self.width || y >= self.height {
            None
        } else {
            Some((y * self.width + x) as usize)
        }
    }

    /// Off-grid writes are dropped
    fn put(&mut self, x: i32, y: i32, glyph: Glyph) {
        if let Some(i) = self.index(x, y) {
            self.glyphs[i] = glyph;
        }
    }

    pub fn get(&self, x: i32, y: i32) -> Glyph {
        self.index(x, y).map(|i| self.glyphs[i]).unwrap_or_default()
    }

    /// Cells that differ from `previous`; every non-empty cell when there is
    /// no previous frame of the same size
    pub fn diff(&self, previous: Option<&Frame>) -> Vec<CellChange> {
        let previous = previous.filter(|p| p.width == self.width && p.height == self.height);
        let width = self.width.max(1);

        self.glyphs
            .iter()
            .enumerate()
            .filter(|&(i, glyph)| match previous {
                Some(prev) => prev.glyphs[i] != *glyph,
                None => *glyph != Glyph::Empty,
            })
            .map(|(i, &glyph)| CellChange {
                x: i as i32 % width,
                y: i as i32 / width,
                glyph,
            })
            .collect()
    }
}
