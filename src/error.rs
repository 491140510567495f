use std::io;
use std::time::Duration;

use thiserror::Error;

/// Why a single cue line could not be turned into a cue.
#[derive(Debug, Error)]
pub enum CueError {
    #[error("expected two time tokens (MM:SS), found {found}")]
    MissingTimeToken { found: usize },
    #[error("hide time {hide:?} is earlier than show time {show:?}")]
    HideBeforeShow { show: Duration, hide: Duration },
    #[error("no display text")]
    EmptyText,
    #[error("unknown placement '{0}'")]
    UnknownPlacement(String),
}

#[derive(Debug, Error)]
#[error("malformed cue: '{line}'")]
pub struct MalformedCue {
    pub line: String,
    #[source]
    pub source: CueError,
}

#[derive(Debug, Error)]
pub enum SurfaceError {
    #[error("viewport {width}x{height} is too small to hold a frame")]
    ViewportTooSmall { width: u16, height: u16 },
}

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("unknown color '{0}'")]
    UnknownColor(String),
    #[error("failed to write to the display")]
    Display(#[from] io::Error),
}
