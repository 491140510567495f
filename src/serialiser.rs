use crate::cue::Cue;

use std::io::{BufWriter, Write};
use std::time::Duration;

use anyhow::{bail, Context, Result};

/// Writes `cues` back out in canonical cue-line form, one per line.
pub fn serialise<W: Write>(cues: &[Cue], output: W) -> Result<()> {
    let mut writer = BufWriter::new(output);
    write_cues(&mut writer, cues).context("Failed to write cues.")?;
    writer.flush().context("Failed to write cues.")?;
    Ok(())
}

fn write_cues<W: Write>(buf: &mut W, cues: &[Cue]) -> Result<()> {
    for cue in cues {
        write_cue(buf, cue)?;
    }
    Ok(())
}

fn write_cue<W: Write>(buf: &mut W, cue: &Cue) -> Result<()> {
    write_ts(buf, cue.show_at)?;
    write!(buf, " ")?;
    write_ts(buf, cue.hide_at)?;
    if let (Some(placement), Some(color)) = (cue.placement, &cue.color) {
        write!(buf, " [{}, {}]", placement, color)?;
    }
    writeln!(buf, " {}", cue.text)?;
    Ok(())
}

// Both fields are two digits wide, so offsets past 99:59 carry the overflow in
// the seconds field (99:99 at most) to stay readable by the parser.
fn write_ts<W: Write>(buf: &mut W, timestamp: Duration) -> Result<()> {
    let total_secs = timestamp.as_secs();
    let minutes = (total_secs / 60).min(99);
    let seconds = total_secs - minutes * 60;
    if seconds > 99 {
        bail!("Offset {:?} does not fit in MM:SS", timestamp);
    }
    write!(buf, "{:02}:{:02}", minutes, seconds)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::Parser;
    use std::io::Cursor;
    use std::time::Duration;

    macro_rules! test_write_ts {
        ($($name:ident: $value:expr,)*) => {
        $(
            #[test]
            fn $name() {
                let (input, expected) = $value;

                let ts = Duration::from_millis(input);
                let mut buf = Cursor::new(vec![]);

                write_ts(&mut buf, ts).expect("Failed to write to buffer");

                assert_eq!(String::from_utf8(buf.into_inner()).unwrap(), expected);
            }
        )*
        }
    }

    test_write_ts! {
        test_write_ts_0: (0, "00:00"),
        test_write_ts_1: (999, "00:00"),
        test_write_ts_2: (1000, "00:01"),
        test_write_ts_3: (59_000, "00:59"),
        test_write_ts_4: (60_000, "01:00"),
        test_write_ts_5: (75_000, "01:15"),
        test_write_ts_6: (5_999_000, "99:59"),
        test_write_ts_7: (6_000_000, "99:60"),
        test_write_ts_8: (6_039_000, "99:99"),
    }

    #[test]
    fn offset_past_largest_token_is_an_error() {
        let mut buf = Cursor::new(vec![]);

        assert!(write_ts(&mut buf, Duration::from_secs(6040)).is_err());
    }

    #[test]
    fn written_cues_parse_back_unchanged() {
        let parser = Parser::new();
        let cues = vec![
            parser.parse("00:00 99:99 Late").unwrap(),
            parser.parse("00:75 99:60 [Left, Blue] Overflow").unwrap(),
        ];
        let mut out = Vec::new();

        serialise(&cues, &mut out).unwrap();

        let reparsed: Vec<Cue> = String::from_utf8(out)
            .unwrap()
            .lines()
            .map(|line| parser.parse(line).unwrap())
            .collect();
        assert_eq!(reparsed, cues);
    }

    #[test]
    fn cues_are_written_in_canonical_form() {
        let parser = Parser::new();
        let cues = vec![
            parser.parse("Hello  00:05, 01:00 [top, Red] World!").unwrap(),
            parser.parse("00:00 00:00 Bye").unwrap(),
        ];
        let mut out = Vec::new();

        serialise(&cues, &mut out).unwrap();

        assert_eq!(
            String::from_utf8(out).unwrap(),
            "00:05 01:00 [Top, Red] Hello World\n00:00 00:00 Bye\n"
        );
    }
}
