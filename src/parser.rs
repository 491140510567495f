use crate::cue::{Cue, Placement};
use crate::error::{CueError, MalformedCue};

use std::sync::LazyLock;
use std::time::Duration;

use nom::bytes::complete::{tag, take_while1, take_while_m_n};
use nom::combinator::{all_consuming, map_res};
use nom::sequence::{delimited, separated_pair};
use nom::IResult;
use regex::Regex;

static TIME_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[0-9]{2}:[0-9]{2}").expect("valid time token pattern"));
static PARAM_TOKEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\[[a-zA-Z]+, [a-zA-Z]+\]").expect("valid parameter token pattern")
});
static WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[a-zA-Z]+").expect("valid word pattern"));

/// Turns cue lines such as `00:05 01:00 [Top, Red] Hello World` into cues.
///
/// The line is scanned for patterns rather than parsed left to right, so tokens
/// may appear in any order and be separated by arbitrary whitespace or
/// punctuation. Only the first two time tokens and the first parameter token
/// are used; anything beyond that is ignored (time tokens) or treated as text
/// (parameter tokens).
#[derive(Debug, Default)]
pub struct Parser;

impl Parser {
    pub fn new() -> Self {
        Self {}
    }

    pub fn parse(&self, line: &str) -> Result<Cue, MalformedCue> {
        cue(line).map_err(|source| MalformedCue {
            line: line.to_string(),
            source,
        })
    }
}

fn cue(line: &str) -> Result<Cue, CueError> {
    let times: Vec<Duration> = TIME_TOKEN
        .find_iter(line)
        .filter_map(|m| time_offset(m.as_str()))
        .take(2)
        .collect();
    let (show_at, hide_at) = match times[..] {
        [show_at, hide_at] => (show_at, hide_at),
        _ => return Err(CueError::MissingTimeToken { found: times.len() }),
    };
    if hide_at < show_at {
        return Err(CueError::HideBeforeShow {
            show: show_at,
            hide: hide_at,
        });
    }

    let param = PARAM_TOKEN.find(line);
    let text = WORD
        .find_iter(line)
        .filter(|w| param.map_or(true, |p| w.end() <= p.start() || w.start() >= p.end()))
        .map(|w| w.as_str())
        .collect::<Vec<_>>()
        .join(" ");
    if text.is_empty() {
        return Err(CueError::EmptyText);
    }

    let (placement, color) = match param.and_then(|p| param_token(p.as_str()).ok()) {
        Some((_, (placement, color))) => (
            Some(placement.parse::<Placement>()?),
            Some(color.to_string()),
        ),
        None => (None, None),
    };

    Ok(Cue {
        show_at,
        hide_at,
        text,
        placement,
        color,
    })
}

/// Converts an `MM:SS` token into an offset from the start of the session.
pub fn time_offset(token: &str) -> Option<Duration> {
    all_consuming(time_token)(token).ok().map(|(_, offset)| offset)
}

fn time_token(input: &str) -> IResult<&str, Duration> {
    let (input, (minutes, seconds)) = separated_pair(two_digits, tag(":"), two_digits)(input)?;
    Ok((input, Duration::from_millis((minutes * 60 + seconds) * 1000)))
}

fn two_digits(input: &str) -> IResult<&str, u64> {
    map_res(take_while_m_n(2, 2, |c: char| c.is_ascii_digit()), |s: &str| {
        s.parse::<u64>()
    })(input)
}

fn param_token(input: &str) -> IResult<&str, (&str, &str)> {
    delimited(tag("["), separated_pair(word, tag(", "), word), tag("]"))(input)
}

fn word(input: &str) -> IResult<&str, &str> {
    take_while1(|c: char| c.is_ascii_alphabetic())(input)
}
