// Cache Crafter terminal driver: CLI entry point.
//
// A headless stand-in for the map UI: draws the player's neighborhood as
// text, reads clicks from stdin, and reports the events the core returns.
// All game rules live in `cache_crafter_core`; this binary only translates
// lines into `on_cell_clicked` calls and events into text.
//
// Usage:
//   cache-crafter [OPTIONS]
//     --config <PATH>   JSON game config (see `GameConfig`); defaults apply
//                       to any field it omits
//     --json            Print events as JSON lines instead of prose
//     --help            Show this message
//
// Logs go to stderr; set RUST_LOG (e.g. RUST_LOG=debug) to see transitions.

mod board;
mod input;

use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use cache_crafter_core::config::GameConfig;
use cache_crafter_core::event::{GameEventKind, StepResult};
use cache_crafter_core::game::GameCore;
use cache_crafter_core::types::CellCoord;
use tracing::error;
use tracing_subscriber::EnvFilter;

use crate::board::render_board;
use crate::input::{Command, parse_command};

#[derive(Debug, Default, PartialEq, Eq)]
struct CliArgs {
    config: Option<PathBuf>,
    json: bool,
    help: bool,
}

fn main() {
    init_tracing();

    let args = match parse_args(std::env::args().skip(1)) {
        Ok(args) => args,
        Err(msg) => {
            eprintln!("{msg}");
            print_usage();
            std::process::exit(2);
        }
    };
    if args.help {
        print_usage();
        return;
    }

    if let Err(err) = run(&args) {
        error!(error = %err, "cache-crafter failed");
        eprintln!("Error: {err:#}");
        std::process::exit(1);
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .compact()
        .init();
}

/// Parse command-line arguments. Simple matching over `std::env::args()`.
fn parse_args(args: impl IntoIterator<Item = String>) -> Result<CliArgs, String> {
    let mut parsed = CliArgs::default();
    let mut args = args.into_iter();
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--config" => {
                let path = args.next().ok_or("--config requires a path")?;
                parsed.config = Some(PathBuf::from(path));
            }
            "--json" => parsed.json = true,
            "--help" | "-h" => parsed.help = true,
            other => return Err(format!("Unknown argument: {other}")),
        }
    }
    Ok(parsed)
}

fn print_usage() {
    println!("Usage: cache-crafter [OPTIONS]");
    println!();
    println!("Options:");
    println!("  --config <PATH>   JSON game config");
    println!("  --json            Print events as JSON lines");
    println!("  --help            Show this message");
}

fn load_config(path: Option<&Path>) -> Result<GameConfig> {
    let Some(path) = path else {
        return Ok(GameConfig::default());
    };
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("reading config {}", path.display()))?;
    GameConfig::from_json(&json).with_context(|| format!("loading config {}", path.display()))
}

fn run(args: &CliArgs) -> Result<()> {
    let config = load_config(args.config.as_deref())?;
    let mut game = GameCore::with_config(config).context("invalid config")?;

    let mut out = io::stdout().lock();
    writeln!(out, "=== Cache Crafter ===")?;
    writeln!(out, "{}", render_board(&game))?;
    writeln!(out, "{}", game.status_line())?;

    for line in io::stdin().lock().lines() {
        let line = line.context("reading stdin")?;
        match parse_command(&line) {
            Ok(Command::Click(coord)) => {
                let result = game.on_cell_clicked(coord);
                if args.json {
                    write_json_events(&mut out, &result)?;
                } else {
                    write_prose_events(&mut out, &game, coord, &result)?;
                }
            }
            Ok(Command::Look) => writeln!(out, "{}", render_board(&game))?,
            Ok(Command::Status) => writeln!(out, "{}", game.status_line())?,
            Ok(Command::Help) => write_help(&mut out)?,
            Ok(Command::Quit) => break,
            Ok(Command::Empty) => {}
            Err(msg) => writeln!(out, "{msg}")?,
        }
        out.flush()?;
    }
    Ok(())
}

fn write_json_events(out: &mut impl Write, result: &StepResult) -> Result<()> {
    for event in &result.events {
        writeln!(out, "{}", serde_json::to_string(event)?)?;
    }
    Ok(())
}

fn write_prose_events<O>(
    out: &mut impl Write,
    game: &GameCore<O>,
    coord: CellCoord,
    result: &StepResult,
) -> Result<()>
where
    O: cache_crafter_core::oracle::ValueOracle,
{
    if result.is_empty() {
        if game.is_nearby(coord) {
            writeln!(out, "Nothing happens at {coord}.")?;
        } else {
            writeln!(out, "{coord} is out of reach.")?;
        }
        return Ok(());
    }
    for event in &result.events {
        match event.kind {
            GameEventKind::CellChanged { coord, value } => {
                writeln!(out, "{coord} now holds {value}.")?;
            }
            GameEventKind::HoldingChanged { .. } => {
                writeln!(out, "{}", game.status_line())?;
            }
            GameEventKind::Won { value } => {
                writeln!(out, "You made {value} and won! Keep playing if you like.")?;
            }
        }
    }
    Ok(())
}

fn write_help(out: &mut impl Write) -> io::Result<()> {
    writeln!(out, "Commands:")?;
    writeln!(out, "  click <i> <j>   pick up, drop, or merge at cell (i, j)")?;
    writeln!(out, "  look            redraw the board")?;
    writeln!(out, "  status          show what you are holding")?;
    writeln!(out, "  quit            exit")
}
