use std::fs;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::Parser;
use minegrid_core::*;

use command::{Command, HELP};

mod command;
mod render;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// What log level to use
    #[command(flatten)]
    verbose: clap_verbosity_flag::Verbosity,

    /// Force a seed instead of random
    #[arg(short, long)]
    seed: Option<u64>,

    /// Board preset: easy, medium or hard
    #[arg(short, long, default_value_t = Preset::Easy)]
    preset: Preset,

    /// Custom row count, overrides the preset
    #[arg(long, requires_all = ["cols", "mines"])]
    rows: Option<Coord>,

    /// Custom column count, overrides the preset
    #[arg(long, requires_all = ["rows", "mines"])]
    cols: Option<Coord>,

    /// Custom mine count, overrides the preset
    #[arg(long, requires_all = ["rows", "cols"])]
    mines: Option<CellCount>,

    /// JSON file with rule overrides
    #[arg(long)]
    rules: Option<PathBuf>,
}

impl Args {
    fn game_config(&self) -> Result<GameConfig> {
        Ok(match (self.rows, self.cols, self.mines) {
            (Some(rows), Some(cols), Some(mines)) => GameConfig::new(rows, cols, mines)?,
            (None, None, None) => self.preset.config(),
            _ => bail!("--rows, --cols and --mines must be given together"),
        })
    }

    fn rules(&self) -> Result<Rules> {
        match &self.rules {
            Some(path) => load_rules(path),
            None => Ok(Rules::default()),
        }
    }
}

fn load_rules(path: &Path) -> Result<Rules> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Could not read rules file {}", path.display()))?;
    serde_json::from_str(&text)
        .with_context(|| format!("Could not parse rules file {}", path.display()))
}

fn init_logger(args: &Args) {
    env_logger::Builder::from_default_env()
        .filter_level(args.verbose.log_level_filter())
        .format_timestamp(None)
        .init();
}

/// What the loop prints after a move.
#[derive(Debug, PartialEq, Eq)]
struct Reply {
    /// The board changed and should be drawn again.
    redraw: bool,
    message: Option<&'static str>,
}

impl Reply {
    fn new(redraw: bool, message: Option<&'static str>) -> Self {
        Self { redraw, message }
    }
}

/// Applies one move and reports whether the board changed, with a short
/// message for the player if any.
fn apply(session: &mut Session, command: Command) -> Result<Reply> {
    Ok(match command {
        Command::Reveal(coords) => {
            let outcome = session.reveal(coords)?;
            let message = match outcome {
                RevealOutcome::AlreadyRevealed => Some("Cell already revealed"),
                RevealOutcome::NoChange if session.state().is_finished() => {
                    Some("Game is over, restart with `n`")
                }
                RevealOutcome::NoChange => Some("Cell is flagged, unflag it first"),
                RevealOutcome::HitMine => Some("Boom! You hit a mine"),
                RevealOutcome::Won => Some("You won!"),
                RevealOutcome::Revealed => None,
            };
            Reply::new(outcome.has_update(), message)
        }
        Command::Flag(coords) => {
            let outcome = session.toggle_flag(coords)?;
            let message = match outcome {
                MarkOutcome::NoChange => Some("Cannot flag that cell"),
                MarkOutcome::Won => Some("You won!"),
                MarkOutcome::Changed => None,
            };
            Reply::new(outcome.has_update(), message)
        }
        Command::Undo => {
            let outcome = session.undo();
            let message = match outcome {
                UndoOutcome::NoChange => Some("Nothing to undo"),
                UndoOutcome::Restored => None,
            };
            Reply::new(outcome.has_update(), message)
        }
        Command::Restart => {
            session.restart()?;
            Reply::new(true, Some("New game"))
        }
        Command::Status | Command::Quit => Reply::new(false, None),
    })
}

fn run(args: &Args) -> Result<()> {
    let config = args.game_config()?;
    let rules = args.rules()?;
    log::debug!("config: {:?}, rules: {:?}, seed: {:?}", config, rules, args.seed);

    let mut session = match args.seed {
        Some(seed) => Session::with_seed(config, rules, seed)?,
        None => Session::with_rules(config, rules)?,
    };

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    println!("{}\n", HELP);
    print!("{}", render::board_text(session.board()));

    for line in stdin.lock().lines() {
        let line = line.context("Could not read from stdin")?;
        let command = match Command::parse(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(err) => {
                println!("{:#}", err);
                continue;
            }
        };

        match command {
            Command::Quit => break,
            Command::Status => println!("{}", render::status_text(&session.status())),
            _ => match apply(&mut session, command) {
                Ok(Reply { redraw, message }) => {
                    if redraw {
                        print!("{}", render::board_text(session.board()));
                    }
                    if let Some(message) = message {
                        println!("{}", message);
                    }
                }
                Err(err) => println!("{:#}", err),
            },
        }
        stdout.flush()?;
    }

    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logger(&args);
    run(&args)
}
