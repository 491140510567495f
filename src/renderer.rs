use crate::cue::Placement;
use crate::display::Display;
use crate::error::RenderError;
use crate::surface::Surface;

use std::collections::HashMap;

use crossterm::style::Color;
use tracing::{debug, trace};

/// Colour used for cues that do not name one.
pub const DEFAULT_COLOR: Color = Color::White;

/// Maps a cue's colour name to a terminal colour, ignoring case.
pub fn resolve_color(name: Option<&str>) -> Result<Color, RenderError> {
    let Some(name) = name else {
        return Ok(DEFAULT_COLOR);
    };
    let color = match name.to_ascii_lowercase().as_str() {
        "black" => Color::Black,
        "red" => Color::Red,
        "green" => Color::Green,
        "yellow" => Color::Yellow,
        "blue" => Color::Blue,
        "magenta" => Color::Magenta,
        "cyan" => Color::Cyan,
        "white" => Color::White,
        "grey" | "gray" => Color::Grey,
        "darkred" => Color::DarkRed,
        "darkgreen" => Color::DarkGreen,
        "darkyellow" => Color::DarkYellow,
        "darkblue" => Color::DarkBlue,
        "darkmagenta" => Color::DarkMagenta,
        "darkcyan" => Color::DarkCyan,
        "darkgrey" | "darkgray" => Color::DarkGrey,
        _ => return Err(RenderError::UnknownColor(name.to_string())),
    };
    Ok(color)
}

/// Draws cue text on a [`Display`] and remembers where each text went so it
/// can be erased again.
///
/// Visible texts are keyed by their content: showing the same text twice while
/// it is still visible keeps only the latest placement, and a later `hide`
/// erases at that placement.
pub struct Renderer<D: Display> {
    surface: Surface,
    display: D,
    shown: HashMap<String, Placement>,
}

impl<D: Display> Renderer<D> {
    pub fn new(surface: Surface, display: D) -> Self {
        Self {
            surface,
            display,
            shown: HashMap::new(),
        }
    }

    /// Paints the box around the frame.
    pub fn draw_frame(&mut self) -> Result<(), RenderError> {
        let border = self.surface.border();
        let inner = border.inner_width as usize;
        let horizontal = "═".repeat(inner);

        self.display.move_to(border.left, border.top)?;
        self.display.paint(&format!("╔{}╗", horizontal), DEFAULT_COLOR)?;
        for row in 1..=border.inner_height {
            self.display.move_to(border.left, border.top + row)?;
            self.display
                .paint(&format!("║{}║", " ".repeat(inner)), DEFAULT_COLOR)?;
        }
        self.display
            .move_to(border.left, border.top + border.inner_height + 1)?;
        self.display.paint(&format!("╚{}╝", horizontal), DEFAULT_COLOR)?;
        self.rest()
    }

    pub fn show(
        &mut self,
        placement: Placement,
        color: Color,
        text: &str,
    ) -> Result<(), RenderError> {
        let pos = self.surface.layout(placement, text.chars().count());
        debug!(text, %placement, column = pos.column, row = pos.row, "showing cue");

        self.display.move_to(pos.column, pos.row)?;
        self.display.paint(text, color)?;
        self.shown.insert(text.to_string(), placement);
        self.rest()
    }

    /// Erases `text` if it is visible. Returns whether anything was erased.
    pub fn hide(&mut self, text: &str) -> Result<bool, RenderError> {
        let Some(placement) = self.shown.get(text).copied() else {
            trace!(text, "nothing to hide");
            return Ok(false);
        };
        let len = text.chars().count();
        let pos = self.surface.layout(placement, len);
        debug!(text, %placement, column = pos.column, row = pos.row, "hiding cue");

        self.display.move_to(pos.column, pos.row)?;
        self.display.paint(&" ".repeat(len), DEFAULT_COLOR)?;
        self.shown.remove(text);
        self.rest()?;
        Ok(true)
    }

    pub fn is_shown(&self, text: &str) -> bool {
        self.shown.contains_key(text)
    }

    pub fn shown(&self) -> &HashMap<String, Placement> {
        &self.shown
    }

    pub fn into_display(self) -> D {
        self.display
    }

    // Parks the caret at the origin so the next paint starts from a known state.
    fn rest(&mut self) -> Result<(), RenderError> {
        self.display.move_to(0, 0)?;
        self.display.flush()?;
        Ok(())
    }
}
