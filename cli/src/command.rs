use anyhow::{Context, Result, bail};
use minegrid_core::{Coord, Coord2};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Reveal(Coord2),
    Flag(Coord2),
    Undo,
    Restart,
    Status,
    Quit,
}

impl Command {
    pub fn parse(line: &str) -> Result<Option<Self>> {
        let mut words = line.split_whitespace();
        let Some(verb) = words.next() else {
            return Ok(None);
        };

        let command = match verb {
            "r" | "reveal" => Self::Reveal(parse_coords(&mut words)?),
            "f" | "flag" => Self::Flag(parse_coords(&mut words)?),
            "u" | "undo" => Self::Undo,
            "n" | "new" | "restart" => Self::Restart,
            "s" | "status" => Self::Status,
            "q" | "quit" => Self::Quit,
            other => bail!("Unknown command `{}`", other),
        };

        if let Some(extra) = words.next() {
            bail!("Unexpected argument `{}`", extra);
        }
        Ok(Some(command))
    }
}

fn parse_coords<'a>(words: &mut impl Iterator<Item = &'a str>) -> Result<Coord2> {
    let mut next = |axis: &str| -> Result<Coord> {
        let word = words.next().with_context(|| format!("Missing {}", axis))?;
        word.parse()
            .with_context(|| format!("Invalid {} `{}`", axis, word))
    };
    let row = next("row")?;
    let col = next("column")?;
    Ok((row, col))
}

pub const HELP: &str = "\
commands:
  r <row> <col>   reveal a cell
  f <row> <col>   toggle a flag
  u               undo the last move (once per game)
  n               restart with a new board
  s               show game status
  q               quit";
