//! Platform abstraction layer
//!
//! The simulation talks to the outside world through three seams:
//! - [`InputSource`]: one command per tick, never blocking
//! - [`Pacer`]: the fixed delay between ticks
//! - [`RenderSink`]: receives a snapshot after every tick
//!
//! [`run`] drives a session through them until the player quits or runs out
//! of lives.

pub mod terminal;

use std::io;
use std::thread;
use std::time::{Duration, Instant};

use crate::sim::{Command, GameState, Snapshot, tick};

/// Polled once per tick; `Command::None` when nothing was pressed
pub trait InputSource {
    fn poll(&mut self) -> io::Result<Command>;
}

/// Blocks between ticks
pub trait Pacer {
    fn wait(&mut self);
}

/// Consumes read-only snapshots
pub trait RenderSink {
    fn present(&mut self, snapshot: &Snapshot) -> io::Result<()>;
}

/// Sleeps whatever remains of a fixed frame budget
#[derive(Debug)]
pub struct FixedPacer {
    frame: Duration,
    frame_start: Instant,
}

impl FixedPacer {
    pub fn new(frame: Duration) -> Self {
        Self {
            frame,
            frame_start: Instant::now(),
        }
    }
}

impl Pacer for FixedPacer {
    fn wait(&mut self) {
        let elapsed = self.frame_start.elapsed();
        if elapsed < self.frame {
            thread::sleep(self.frame - elapsed);
        }
        self.frame_start = Instant::now();
    }
}

/// How a session ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEnd {
    Quit,
    GameOver { score: u64, level: u32 },
}

/// Poll, tick, present, pace; repeat until quit or game over
pub fn run<I, P, S>(
    state: &mut GameState,
    input: &mut I,
    pacer: &mut P,
    sink: &mut S,
) -> io::Result<SessionEnd>
where
    I: InputSource + ?Sized,
    P: Pacer + ?Sized,
    S: RenderSink + ?Sized,
{
    sink.present(&state.snapshot())?;

    loop {
        let command = input.poll()?;
        tick(state, command);

        for event in state.take_events() {
            log::trace!("tick {}: {:?}", state.time_ticks, event);
        }
        sink.present(&state.snapshot())?;

        if !state.running {
            return Ok(SessionEnd::Quit);
        }
        if state.is_over() {
            return Ok(SessionEnd::GameOver {
                score: state.player.score,
                level: state.level,
            });
        }

        pacer.wait();
    }
}
