use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use crate::error::CueError;

/// Named region of the frame a cue is drawn in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Placement {
    /// No explicit placement: horizontally and vertically centred.
    #[default]
    Centered,
    Top,
    Bottom,
    Left,
    Right,
}

impl FromStr for Placement {
    type Err = CueError;

    // `Centered` is never named in a cue line, it is what an absent bracket means.
    fn from_str(name: &str) -> Result<Self, Self::Err> {
        const NAMED: [(&str, Placement); 4] = [
            ("top", Placement::Top),
            ("bottom", Placement::Bottom),
            ("left", Placement::Left),
            ("right", Placement::Right),
        ];
        NAMED
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, p)| *p)
            .ok_or_else(|| CueError::UnknownPlacement(name.to_string()))
    }
}

impl fmt::Display for Placement {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            Placement::Centered => "Centered",
            Placement::Top => "Top",
            Placement::Bottom => "Bottom",
            Placement::Left => "Left",
            Placement::Right => "Right",
        };
        f.write_str(name)
    }
}

/// A single timed caption, as parsed from one input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cue {
    pub(crate) show_at: Duration,
    pub(crate) hide_at: Duration,
    pub(crate) text: String,
    pub(crate) placement: Option<Placement>,
    pub(crate) color: Option<String>,
}

impl Cue {
    /// Offset from the session start at which the cue appears.
    pub fn show_at(&self) -> Duration {
        self.show_at
    }

    /// Offset from the session start at which the cue is erased.
    pub fn hide_at(&self) -> Duration {
        self.hide_at
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// `None` means the cue is drawn [`Placement::Centered`].
    pub fn placement(&self) -> Option<Placement> {
        self.placement
    }

    pub fn color(&self) -> Option<&str> {
        self.color.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::Parser;

    #[test]
    fn accessors_expose_parsed_fields() {
        let cue = Parser::new()
            .parse("00:05 01:00 [Top, Red] Hello World")
            .unwrap();

        assert_eq!(cue.show_at(), Duration::from_secs(5));
        assert_eq!(cue.hide_at(), Duration::from_secs(60));
        assert_eq!(cue.text(), "Hello World");
        assert_eq!(cue.placement(), Some(Placement::Top));
        assert_eq!(cue.color(), Some("Red"));
    }

    #[test]
    fn placement_names_are_case_insensitive() {
        assert_eq!("RIGHT".parse::<Placement>().unwrap(), Placement::Right);
        assert!("Centered".parse::<Placement>().is_err());
    }
}
