//! Plain-text front-end for the grid puzzles.
//!
//! Commands (only the first letter matters):
//!   h(int)              advance one step along a shortest solution
//!   l(oad) <file>       load a new puzzle file
//!   s(elect) <r> <c>    select a cell, then enter the destination `<r> <c>`
//!   r(eset)             return to the loaded configuration
//!   q(uit)              leave

use std::io::{self, BufRead, Write};
use std::path::Path;

use crate::model::{Playable, PuzzleModel};
use crate::puzzles::Position;

const HELP: &str = "\
h(int)              -- hint next move
l(oad) filename     -- load new puzzle file
s(elect) r c        -- select cell at r, c
q(uit)              -- quit the game
r(eset)             -- reset the current game
";

/// Board with row and column indices, for choosing cells by coordinate.
pub fn display_board<C: Playable>(config: &C) -> String {
    let mut out = String::from("\n   ");
    for col in 0..config.cols() {
        out.push_str(&format!("{} ", col));
    }
    out.push_str("\n  ");
    out.push_str(&"--".repeat(config.cols()));
    out.push('\n');

    for row in 0..config.rows() {
        out.push_str(&format!("{}| ", row));
        for col in 0..config.cols() {
            out.push(config.cell(Position::new(row, col)));
            out.push(' ');
        }
        out.push('\n');
    }
    out
}

fn parse_position<'a>(mut fields: impl Iterator<Item = &'a str>) -> Option<Position> {
    let row = fields.next()?.parse().ok()?;
    let col = fields.next()?.parse().ok()?;
    Some(Position::new(row, col))
}

/// Run the command loop until `quit` or end of input.
pub fn run<C: Playable>(
    model: &mut PuzzleModel<C>,
    input: &mut impl BufRead,
    output: &mut impl Write,
) -> io::Result<()> {
    writeln!(output, "{}", display_board(model.current()))?;

    let mut line = String::new();
    loop {
        if model.current().is_goal() {
            writeln!(output, "The puzzle has been solved!")?;
        }
        writeln!(output, "Game command: ")?;

        line.clear();
        if input.read_line(&mut line)? == 0 {
            break;
        }
        let mut fields = line.split_whitespace();
        let Some(command) = fields.next() else {
            continue;
        };

        let event = match command.chars().next() {
            Some('q') => break,
            Some('h') => model.hint(),
            Some('r') => model.reset(),
            Some('l') => match fields.next() {
                Some(file) => model.load(Path::new(file)),
                None => {
                    writeln!(output, "Usage: load filename")?;
                    continue;
                }
            },
            Some('s') => {
                let Some(from) = parse_position(fields) else {
                    writeln!(output, "Usage: select row col")?;
                    continue;
                };
                write!(output, "Destination: ")?;
                output.flush()?;

                let mut destination = String::new();
                input.read_line(&mut destination)?;
                match parse_position(destination.split_whitespace()) {
                    Some(to) => model.select(from, to),
                    None => {
                        writeln!(output, "Invalid destination: expected row col")?;
                        continue;
                    }
                }
            }
            _ => {
                write!(output, "{}", HELP)?;
                continue;
            }
        };

        writeln!(output, "{}", event)?;
        writeln!(output, "{}", display_board(model.current()))?;
    }
    Ok(())
}
