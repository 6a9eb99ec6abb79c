use std::{io, time::Duration};

use ratatui::crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};

/// Ctrl+P: toggle drawing.
pub const CTRL_P: u8 = 16;
/// Ctrl+Q: stop after the current dispatch.
pub const CTRL_Q: u8 = 17;

/// Non-blocking source of key bytes.
pub trait InputSource {
    /// One pending byte, or `None` when nothing was typed.
    fn poll_byte(&mut self) -> io::Result<Option<u8>>;
}

/// Reads the terminal through crossterm. Expects raw mode to be enabled so
/// control chords arrive as key events.
#[derive(Debug, Default)]
pub struct TerminalInput;

impl InputSource for TerminalInput {
    fn poll_byte(&mut self) -> io::Result<Option<u8>> {
        if !event::poll(Duration::ZERO)? {
            return Ok(None);
        }
        let Event::Key(key) = event::read()? else {
            return Ok(None);
        };
        if key.kind != KeyEventKind::Press {
            return Ok(None);
        }
        let KeyCode::Char(c) = key.code else {
            return Ok(None);
        };
        if !c.is_ascii() {
            return Ok(None);
        }
        let byte = c as u8;
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            Ok(Some(byte.to_ascii_lowercase() & 0x1f))
        } else {
            Ok(Some(byte))
        }
    }
}

/// No keyboard at all, e.g. when stdout is not a terminal.
#[derive(Debug, Default)]
pub struct NoInput;

impl InputSource for NoInput {
    fn poll_byte(&mut self) -> io::Result<Option<u8>> {
        Ok(None)
    }
}

/// Replays a fixed list of polls, then reports nothing.
#[cfg(test)]
#[derive(Debug, Default)]
pub struct ScriptedInput {
    polls: std::collections::VecDeque<Option<u8>>,
}

#[cfg(test)]
impl ScriptedInput {
    pub fn new(polls: impl IntoIterator<Item = Option<u8>>) -> Self {
        Self {
            polls: polls.into_iter().collect(),
        }
    }
}

#[cfg(test)]
impl InputSource for ScriptedInput {
    fn poll_byte(&mut self) -> io::Result<Option<u8>> {
        Ok(self.polls.pop_front().flatten())
    }
}
