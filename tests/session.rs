use std::collections::VecDeque;
use std::io;

use crawler_shooter::platform::{InputSource, Pacer, RenderSink, SessionEnd, run};
use crawler_shooter::sim::{Command, GamePhase, GameState, Snapshot};
use glam::IVec2;

struct ScriptedInput(VecDeque<Command>);

impl ScriptedInput {
    fn new(commands: &[Command]) -> Self {
        Self(commands.iter().copied().collect())
    }
}

impl InputSource for ScriptedInput {
    fn poll(&mut self) -> io::Result<Command> {
        Ok(self.0.pop_front().unwrap_or_default())
    }
}

#[derive(Default)]
struct CountingPacer {
    waits: usize,
}

impl Pacer for CountingPacer {
    fn wait(&mut self) {
        self.waits += 1;
    }
}

#[derive(Default)]
struct RecordingSink {
    frames: Vec<Snapshot>,
}

impl RenderSink for RecordingSink {
    fn present(&mut self, snapshot: &Snapshot) -> io::Result<()> {
        self.frames.push(snapshot.clone());
        Ok(())
    }
}

#[test]
fn quit_ends_the_session() {
    let mut state = GameState::new(3);
    let start = state.player.pos;
    let mut input = ScriptedInput::new(&[Command::MoveLeft, Command::Fire, Command::Quit]);
    let mut pacer = CountingPacer::default();
    let mut sink = RecordingSink::default();

    let end = run(&mut state, &mut input, &mut pacer, &mut sink).unwrap();

    assert_eq!(end, SessionEnd::Quit);
    assert!(!state.running);
    // Initial frame plus one per tick
    assert_eq!(sink.frames.len(), 4);
    assert_eq!(pacer.waits, 2);
    assert_eq!(sink.frames[1].player, start - IVec2::X);
    assert!(sink.frames[2].projectile.is_some());
}

#[test]
fn game_over_ends_the_session() {
    let mut state = GameState::new(3);
    state.field.clear();
    state.wanderer.spawn_countdown = u32::MAX;
    state.player.lives = 1;
    state.player.pos = state.crawler.segments()[0].pos + IVec2::X;

    let mut input = ScriptedInput::new(&[]);
    let mut pacer = CountingPacer::default();
    let mut sink = RecordingSink::default();

    let end = run(&mut state, &mut input, &mut pacer, &mut sink).unwrap();

    assert_eq!(end, SessionEnd::GameOver { score: 0, level: 1 });
    let last = sink.frames.last().unwrap();
    assert_eq!(last.phase, GamePhase::GameOver);
    assert_eq!(last.lives, 0);
    // Events were drained by the loop
    assert!(state.events().is_empty());
}

#[test]
fn same_seed_same_session() {
    let script = [
        Command::Fire,
        Command::MoveRight,
        Command::MoveUp,
        Command::Fire,
        Command::MoveLeft,
        Command::None,
    ];
    let mut commands: Vec<Command> = script.iter().copied().cycle().take(900).collect();
    commands.push(Command::Quit);

    let play = |seed| {
        let mut state = GameState::new(seed);
        let mut sink = RecordingSink::default();
        run(
            &mut state,
            &mut ScriptedInput::new(&commands),
            &mut CountingPacer::default(),
            &mut sink,
        )
        .unwrap();
        sink.frames
    };

    assert_eq!(play(2026), play(2026));
}
