use cuecast::display::{Display, TerminalDisplay};
use cuecast::renderer::Renderer;
use cuecast::scheduler::Scheduler;
use cuecast::surface::{Surface, Viewport};
use cuecast::{ingest, serialiser};

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::sync::Mutex;

use anyhow::{anyhow, Context, Result};
use clap::Parser as ClapParser;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    match run().await {
        Ok(()) => (),
        Err(err) => {
            eprintln!("An error occurred: {}", err);
            for cause in err.chain().skip(1) {
                eprintln!("    {}", cause);
            }
            std::process::exit(1);
        }
    }
}

#[derive(ClapParser)]
#[command(about = "Play timed captions in a frame on the terminal")]
struct Cli {
    #[arg(
        short,
        long,
        value_name = "FILE",
        help = "The cue file to read from. If not supplied, cues will be read from standard input.",
        default_value = "-"
    )]
    input: String,
    #[arg(
        long,
        value_name = "COLUMNS",
        help = "Width of the viewport. Defaults to the width of the terminal."
    )]
    width: Option<u16>,
    #[arg(
        long,
        value_name = "ROWS",
        help = "Height of the viewport. Defaults to the height of the terminal."
    )]
    height: Option<u16>,
    #[arg(long, help = "Do not draw a border around the frame.")]
    no_frame: bool,
    #[arg(
        long,
        help = "Check the cues and print them in canonical form instead of playing them."
    )]
    dry_run: bool,
    #[arg(
        long,
        value_name = "FILE",
        help = "Write diagnostics to the specified file instead of standard error."
    )]
    log_file: Option<String>,
}

async fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_file.as_deref())?;

    let reader: Box<dyn BufRead> = if cli.input == "-" {
        Box::new(io::stdin().lock())
    } else {
        let file = File::open(&cli.input)
            .context(format!("Failed to open input file: '{}'", cli.input))?;
        Box::new(BufReader::new(file))
    };

    if cli.dry_run {
        let mut cues = Vec::new();
        let report = ingest::ingest(reader.lines(), |cue| cues.push(cue))?;
        serialiser::serialise(&cues, io::stdout())?;
        if report.rejected > 0 {
            return Err(anyhow!(
                "{} malformed cue line(s) in '{}'",
                report.rejected,
                cli.input
            ));
        }
        return Ok(());
    }

    let mut display = TerminalDisplay::new(io::stdout());
    let viewport = match (cli.width, cli.height) {
        (Some(width), Some(height)) => Viewport { width, height },
        (width, height) => {
            let (columns, rows) = display
                .size()
                .context("Failed to query the terminal size")?;
            Viewport {
                width: width.unwrap_or(columns),
                height: height.unwrap_or(rows),
            }
        }
    };
    let surface = Surface::new(viewport)?;

    display.enter().context("Failed to prepare the terminal")?;
    let mut renderer = Renderer::new(surface, display);
    if !cli.no_frame {
        renderer.draw_frame().context("Failed to draw the frame")?;
    }

    let mut scheduler = Scheduler::start(renderer);
    let ingested = ingest::ingest(reader.lines(), |cue| {
        scheduler.schedule(cue);
    });
    let renderer = scheduler
        .finish()
        .await
        .context("Render loop stopped unexpectedly")?;
    renderer
        .into_display()
        .leave()
        .context("Failed to restore the terminal")?;

    let report = ingested.context(format!("Failed to read cues from '{}'", cli.input))?;
    info!(
        accepted = report.accepted,
        rejected = report.rejected,
        "session finished"
    );
    Ok(())
}

fn init_logging(log_file: Option<&str>) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    match log_file {
        Some(path) => {
            let file =
                File::create(path).context(format!("Failed to create log file: '{}'", path))?;
            builder.with_ansi(false).with_writer(Mutex::new(file)).init();
        }
        None => builder.with_writer(io::stderr).init(),
    }
    Ok(())
}
