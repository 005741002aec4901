//! Terminal render sink
//!
//! All terminal output lives here. The first frame (and any frame after a
//! resize or `reset`) clears the screen and draws the border; later frames
//! only rewrite the cells that changed plus the HUD line.

use std::io::{self, Write};

use crossterm::{
    QueueableCommand, cursor,
    style::{self, Color, Print},
    terminal,
};

use super::{CellChange, Frame, Glyph};
use crate::platform::RenderSink;
use crate::sim::Snapshot;

// ── Colour palette ────────────────────────────────────────────────────────────

const C_BORDER: Color = Color::DarkBlue;
const C_ZONE: Color = Color::DarkGrey;
const C_HUD: Color = Color::Yellow;
const C_PLAYER: Color = Color::White;
const C_PROJECTILE: Color = Color::Cyan;
const C_HEAD: Color = Color::Red;
const C_BODY: Color = Color::Magenta;
const C_WANDERER: Color = Color::Yellow;

fn glyph_color(glyph: Glyph) -> Color {
    match glyph {
        Glyph::Empty => Color::Reset,
        Glyph::Obstacle(4) => Color::Green,
        Glyph::Obstacle(3) => Color::DarkGreen,
        Glyph::Obstacle(2) => Color::DarkYellow,
        Glyph::Obstacle(_) => Color::DarkGrey,
        Glyph::Projectile => C_PROJECTILE,
        Glyph::Head => C_HEAD,
        Glyph::Body => C_BODY,
        Glyph::Wanderer => C_WANDERER,
        Glyph::Player => C_PLAYER,
    }
}

/// Screen row of the HUD; the border starts one row below
const HUD_ROW: u16 = 0;
const FIELD_TOP: u16 = 2;
const FIELD_LEFT: u16 = 1;

pub struct TerminalRenderer<W: Write> {
    out: W,
    previous: Option<Frame>,
    color: bool,
}

impl<W: Write> TerminalRenderer<W> {
    pub fn new(out: W, color: bool) -> Self {
        Self {
            out,
            previous: None,
            color,
        }
    }

    /// Force a full redraw on the next frame
    pub fn reset(&mut self) {
        self.previous = None;
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn set_color(&mut self, color: Color) -> io::Result<()> {
        if self.color {
            self.out.queue(style::SetForegroundColor(color))?;
        }
        Ok(())
    }

    fn draw_border(&mut self, snapshot: &Snapshot) -> io::Result<()> {
        let w = snapshot.width.max(0) as usize;
        let h = snapshot.height.max(0) as u16;

        self.set_color(C_BORDER)?;
        self.out.queue(cursor::MoveTo(0, FIELD_TOP - 1))?;
        self.out.queue(Print(format!("┌{}┐", "─".repeat(w))))?;
        for row in 0..h {
            // Player zone rows get a dimmer frame
            let in_zone = row as i32 >= snapshot.zone_top;
            self.set_color(if in_zone { C_ZONE } else { C_BORDER })?;
            self.out.queue(cursor::MoveTo(0, FIELD_TOP + row))?;
            self.out.queue(Print("│"))?;
            self.out
                .queue(cursor::MoveTo(FIELD_LEFT + w as u16, FIELD_TOP + row))?;
            self.out.queue(Print("│"))?;
        }
        self.set_color(C_BORDER)?;
        self.out.queue(cursor::MoveTo(0, FIELD_TOP + h))?;
        self.out.queue(Print(format!("└{}┘", "─".repeat(w))))?;
        Ok(())
    }

    fn draw_hud(&mut self, snapshot: &Snapshot) -> io::Result<()> {
        self.set_color(C_HUD)?;
        self.out.queue(cursor::MoveTo(0, HUD_ROW))?;
        self.out.queue(terminal::Clear(terminal::ClearType::CurrentLine))?;
        self.out.queue(Print(format!(
            "Score: {:<8} Lives: {:<3} Level: {}",
            snapshot.score, snapshot.lives, snapshot.level
        )))?;
        Ok(())
    }

    fn draw_cell(&mut self, change: CellChange) -> io::Result<()> {
        self.out.queue(cursor::MoveTo(
            FIELD_LEFT + change.x as u16,
            FIELD_TOP + change.y as u16,
        ))?;
        self.set_color(glyph_color(change.glyph))?;
        self.out.queue(Print(change.glyph.symbol()))?;
        Ok(())
    }

    /// Centered banner over the field
    pub fn show_game_over(&mut self, score: u64, level: u32) -> io::Result<()> {
        let Some(frame) = self.previous.as_ref() else {
            return Ok(());
        };
        let (width, height) = (frame.width(), frame.height());
        let lines = [
            "  GAME  OVER  ".to_string(),
            format!("  Score {} - level {}  ", score, level),
            "  R : restart   Q : quit  ".to_string(),
        ];

        self.set_color(Color::Red)?;
        for (i, line) in lines.iter().enumerate() {
            let col = (width - line.chars().count() as i32).max(0) / 2;
            let row = height / 2 - 1 + i as i32;
            self.out.queue(cursor::MoveTo(
                FIELD_LEFT + col as u16,
                FIELD_TOP + row.max(0) as u16,
            ))?;
            self.out.queue(Print(line))?;
        }
        self.out.queue(style::ResetColor)?;
        self.out.flush()
    }
}

impl<W: Write> RenderSink for TerminalRenderer<W> {
    fn present(&mut self, snapshot: &Snapshot) -> io::Result<()> {
        let frame = Frame::compose(snapshot);
        let resized = self
            .previous
            .as_ref()
            .is_none_or(|p| p.width() != frame.width() || p.height() != frame.height());
        if resized {
            self.out.queue(terminal::Clear(terminal::ClearType::All))?;
            self.draw_border(snapshot)?;
            self.previous = None;
        }

        for change in frame.diff(self.previous.as_ref()) {
            self.draw_cell(change)?;
        }
        self.draw_hud(snapshot)?;

        // Park cursor below the field and flush
        self.out.queue(style::ResetColor)?;
        self.out
            .queue(cursor::MoveTo(0, FIELD_TOP + frame.height().max(0) as u16 + 1))?;
        self.out.flush()?;

        self.previous = Some(frame);
        Ok(())
    }
}
