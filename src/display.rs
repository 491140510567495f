//! The output device cues are painted on.
//!
//! Painting is caret-relative: callers move the caret first, then paint. All
//! commands are queued and only reach the device on `flush`.

use std::io::{self, Write};

use crossterm::cursor::{Hide, MoveTo, Show};
use crossterm::style::{Color, Print, ResetColor, SetForegroundColor};
use crossterm::terminal::{Clear, ClearType};
use crossterm::{execute, queue};

pub trait Display: Send {
    /// Width and height of the device in character cells.
    fn size(&self) -> io::Result<(u16, u16)>;
    fn move_to(&mut self, column: u16, row: u16) -> io::Result<()>;
    /// Paints `text` at the caret, leaving the caret after the last cell.
    fn paint(&mut self, text: &str, color: Color) -> io::Result<()>;
    fn flush(&mut self) -> io::Result<()>;
}

/// A [`Display`] writing crossterm escape sequences to `W`.
pub struct TerminalDisplay<W: Write> {
    out: W,
}

impl<W: Write> TerminalDisplay<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    /// Clears the screen and hides the cursor.
    pub fn enter(&mut self) -> io::Result<()> {
        execute!(self.out, Hide, Clear(ClearType::All), MoveTo(0, 0))
    }

    /// Restores the cursor and default colours.
    pub fn leave(&mut self) -> io::Result<()> {
        execute!(self.out, ResetColor, MoveTo(0, 0), Show)
    }
}

impl<W: Write + Send> Display for TerminalDisplay<W> {
    fn size(&self) -> io::Result<(u16, u16)> {
        crossterm::terminal::size()
    }

    fn move_to(&mut self, column: u16, row: u16) -> io::Result<()> {
        queue!(self.out, MoveTo(column, row))
    }

    fn paint(&mut self, text: &str, color: Color) -> io::Result<()> {
        queue!(self.out, SetForegroundColor(color), Print(text), ResetColor)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.out.flush()
    }
}
