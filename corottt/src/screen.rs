use std::io::{self, Write};

use crate::game::Snapshot;

pub trait Screen {
    fn draw(&mut self, snapshot: &Snapshot) -> io::Result<()>;
}

/// Prints boards as text, for runs without a terminal UI.
pub struct PlainScreen<W> {
    out: W,
}

impl PlainScreen<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> PlainScreen<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    #[cfg(test)]
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Screen for PlainScreen<W> {
    fn draw(&mut self, snapshot: &Snapshot) -> io::Result<()> {
        if let Some(result) = snapshot.result {
            writeln!(self.out, "{result}")?;
        }
        write!(self.out, "{}", snapshot.board)?;
        if let Some(popup) = &snapshot.popup {
            writeln!(self.out, "{popup}")?;
        }
        writeln!(self.out)?;
        self.out.flush()
    }
}

#[cfg(test)]
pub use recorder::Recorder;
