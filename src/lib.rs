//! Timed captions drawn inside a frame on the terminal.
//!
//! Cue lines are parsed into [`cue::Cue`]s, armed on a shared session clock by
//! the [`scheduler::Scheduler`], and painted and erased by a
//! [`renderer::Renderer`] that a single render task owns.

pub mod cue;
pub mod display;
pub mod error;
pub mod ingest;
pub mod parser;
pub mod renderer;
pub mod scheduler;
pub mod serialiser;
pub mod surface;
