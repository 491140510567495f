use crate::cue::Cue;
use crate::parser::Parser;

use std::io;

use anyhow::{Context, Result};
use tracing::{debug, warn};

#[derive(Debug, Default, PartialEq, Eq)]
pub struct IngestReport {
    pub accepted: usize,
    pub rejected: usize,
}

/// Parses `lines` one at a time and hands every valid cue to `sink`.
///
/// Blank lines are skipped. Malformed lines are logged and skipped so that a
/// single bad line never ends the session; only a failure to read the input
/// itself is returned as an error.
pub fn ingest<I, F>(lines: I, mut sink: F) -> Result<IngestReport>
where
    I: IntoIterator<Item = io::Result<String>>,
    F: FnMut(Cue),
{
    let parser = Parser::new();
    let mut report = IngestReport::default();

    for (idx, line) in lines.into_iter().enumerate() {
        let number = idx + 1;
        let line = line.with_context(|| format!("Failed to read cue line {}", number))?;
        if line.trim().is_empty() {
            continue;
        }
        match parser.parse(&line) {
            Ok(cue) => {
                debug!(line = number, "accepted cue");
                sink(cue);
                report.accepted += 1;
            }
            Err(err) => {
                warn!(line = number, error = %err, reason = %err.source, "skipping malformed cue");
                report.rejected += 1;
            }
        }
    }
    Ok(report)
}
