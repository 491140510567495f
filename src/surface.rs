use crate::cue::Placement;
use crate::error::SurfaceError;

/// Size of the whole drawable area, in character cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    pub column: u16,
    pub row: u16,
}

/// Rectangle of the decorative border drawn around the frame.
///
/// `left`/`top` address the corner glyph; the inner area starts one cell to the
/// right and one cell down.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Border {
    pub left: u16,
    pub top: u16,
    pub inner_width: u16,
    pub inner_height: u16,
}

/// The frame cues are drawn in, derived once from the viewport.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Surface {
    viewport: Viewport,
    frame_left: u16,
    frame_top: u16,
    frame_right: u16,
    frame_bottom: u16,
}

impl Surface {
    pub fn new(viewport: Viewport) -> Result<Self, SurfaceError> {
        let Viewport { width, height } = viewport;
        let frame_left = width / 4;
        let frame_top = height / 4;
        let frame_right = (3 * u32::from(width) / 4).saturating_sub(1) as u16;
        let frame_bottom = (3 * u32::from(height) / 4).saturating_sub(1) as u16;

        if frame_left >= frame_right || frame_top >= frame_bottom {
            return Err(SurfaceError::ViewportTooSmall { width, height });
        }

        Ok(Self {
            viewport,
            frame_left,
            frame_top,
            frame_right,
            frame_bottom,
        })
    }

    /// Where text of `text_len` cells starts when drawn at `placement`.
    ///
    /// Columns that would fall left of the viewport are clamped to zero.
    pub fn layout(&self, placement: Placement, text_len: usize) -> Position {
        let text_len = u16::try_from(text_len).unwrap_or(u16::MAX);
        let centered_column = self.horizontal_center().saturating_sub(text_len / 2);

        let (column, row) = match placement {
            Placement::Left => (self.frame_left, self.vertical_center()),
            Placement::Right => (
                self.frame_right.saturating_sub(text_len),
                self.vertical_center(),
            ),
            Placement::Top => (centered_column, self.frame_top),
            Placement::Bottom => (centered_column, self.frame_bottom),
            Placement::Centered => (centered_column, self.vertical_center()),
        };
        Position { column, row }
    }

    pub fn border(&self) -> Border {
        let Viewport { width, height } = self.viewport;
        Border {
            left: (width / 4).saturating_sub(2),
            top: (height / 4).saturating_sub(1),
            inner_width: width / 2,
            inner_height: height / 2,
        }
    }

    fn vertical_center(&self) -> u16 {
        (self.viewport.height / 2).saturating_sub(1)
    }

    fn horizontal_center(&self) -> u16 {
        self.viewport.width / 2
    }
}
