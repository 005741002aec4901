//! Crossterm-backed keyboard input and terminal lifecycle

use std::io::{self, Write};
use std::time::Duration;

use crossterm::{
    ExecutableCommand, cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    terminal,
};

use super::InputSource;
use crate::sim::Command;

/// Map a key press to a simulation command
pub fn command_for(code: KeyCode, modifiers: KeyModifiers) -> Command {
    match code {
        KeyCode::Up | KeyCode::Char('w') | KeyCode::Char('W') => Command::MoveUp,
        KeyCode::Down | KeyCode::Char('s') | KeyCode::Char('S') => Command::MoveDown,
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => Command::MoveLeft,
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => Command::MoveRight,
        KeyCode::Char(' ') => Command::Fire,
        KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => Command::Quit,
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => Command::Quit,
        _ => Command::None,
    }
}

/// Non-blocking keyboard reader.
///
/// Drains every pending event each poll so key-repeat bursts don't queue up
/// behind the tick rate; a quit anywhere in the burst wins, otherwise the
/// latest command does.
#[derive(Debug, Default)]
pub struct KeyboardInput;

impl KeyboardInput {
    pub fn new() -> Self {
        Self
    }

    /// Block until a key arrives; true for restart (`r`), false for quit
    pub fn wait_for_restart(&mut self) -> io::Result<bool> {
        loop {
            if let Event::Key(KeyEvent {
                code,
                modifiers,
                kind: KeyEventKind::Press,
                ..
            }) = event::read()?
            {
                match code {
                    KeyCode::Char('r') | KeyCode::Char('R') => return Ok(true),
                    _ if command_for(code, modifiers) == Command::Quit => return Ok(false),
                    _ => {}
                }
            }
        }
    }
}

impl InputSource for KeyboardInput {
    fn poll(&mut self) -> io::Result<Command> {
        let mut command = Command::None;
        while event::poll(Duration::ZERO)? {
            if let Event::Key(KeyEvent {
                code,
                modifiers,
                kind: KeyEventKind::Press | KeyEventKind::Repeat,
                ..
            }) = event::read()?
            {
                match command_for(code, modifiers) {
                    Command::Quit => return Ok(Command::Quit),
                    Command::None => {}
                    other => command = other,
                }
            }
        }
        Ok(command)
    }
}

/// Raw mode + alternate screen for the lifetime of the guard
pub struct TerminalGuard<W: Write> {
    out: W,
}

impl<W: Write> TerminalGuard<W> {
    pub fn enter(mut out: W) -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        out.execute(terminal::EnterAlternateScreen)?;
        out.execute(cursor::Hide)?;
        Ok(Self { out })
    }

    pub fn writer(&mut self) -> &mut W {
        &mut self.out
    }
}

impl<W: Write> Drop for TerminalGuard<W> {
    fn drop(&mut self) {
        // Always restore the terminal, even on error paths
        let _ = self.out.execute(cursor::Show);
        let _ = self.out.execute(terminal::LeaveAlternateScreen);
        let _ = terminal::disable_raw_mode();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_mapping() {
        let none = KeyModifiers::NONE;
        assert_eq!(command_for(KeyCode::Left, none), Command::MoveLeft);
        assert_eq!(command_for(KeyCode::Char('d'), none), Command::MoveRight);
        assert_eq!(command_for(KeyCode::Char('W'), none), Command::MoveUp);
        assert_eq!(command_for(KeyCode::Down, none), Command::MoveDown);
        assert_eq!(command_for(KeyCode::Char(' '), none), Command::Fire);
        assert_eq!(command_for(KeyCode::Esc, none), Command::Quit);
        assert_eq!(
            command_for(KeyCode::Char('c'), KeyModifiers::CONTROL),
            Command::Quit
        );
        assert_eq!(command_for(KeyCode::Char('c'), none), Command::None);
        assert_eq!(command_for(KeyCode::Tab, none), Command::None);
    }
}
