//! Hoppers: frogs jump over green frogs, removing them, until only the red
//! frog is left.
//!
//! Diagonal jumps are legal from every cell. Orthogonal jumps cover two cells
//! and are only legal from cells whose row and column are both even.

use std::fmt;
use std::str::FromStr;

use smallvec::SmallVec;

use crate::configuration::Configuration;
use crate::error::{MoveError, PuzzleError};
use crate::puzzles::{parse_dimensions, render_grid, Lines, Position};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cell {
    Green,
    Red,
    Empty,
    Invalid,
}

impl Cell {
    pub fn from_char(c: char) -> Option<Cell> {
        match c {
            'G' => Some(Cell::Green),
            'R' => Some(Cell::Red),
            '.' => Some(Cell::Empty),
            '*' => Some(Cell::Invalid),
            _ => None,
        }
    }

    pub fn to_char(self) -> char {
        match self {
            Cell::Green => 'G',
            Cell::Red => 'R',
            Cell::Empty => '.',
            Cell::Invalid => '*',
        }
    }

    pub fn is_frog(self) -> bool {
        matches!(self, Cell::Green | Cell::Red)
    }
}

/// A jump: where the frog lands and which green frog it removes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Jump {
    pub landing: Position,
    pub captured: Position,
}

const DIAGONAL: [(isize, isize); 4] = [(-1, -1), (-1, 1), (1, -1), (1, 1)];
const ORTHOGONAL: [(isize, isize); 4] = [(-2, 0), (2, 0), (0, -2), (0, 2)];

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct HoppersConfig {
    rows: usize,
    cols: usize,
    cells: Vec<Cell>,
}

impl HoppersConfig {
    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Cell at `pos`, `None` outside the board.
    pub fn get(&self, pos: Position) -> Option<Cell> {
        (pos.row < self.rows && pos.col < self.cols).then(|| self.cells[self.index(pos)])
    }

    fn index(&self, pos: Position) -> usize {
        pos.row * self.cols + pos.col
    }

    fn is(&self, pos: Option<Position>, cell: Cell) -> bool {
        pos.and_then(|p| self.get(p)) == Some(cell)
    }

    /// Every jump available to the frog at `from`, in a fixed order.
    pub fn jumps_from(&self, from: Position) -> SmallVec<[Jump; 8]> {
        let mut jumps = SmallVec::new();
        if !self.get(from).map_or(false, Cell::is_frog) {
            return jumps;
        }

        let orthogonal_allowed = from.row % 2 == 0 && from.col % 2 == 0;
        let directions = DIAGONAL
            .iter()
            .chain(ORTHOGONAL.iter().filter(|_| orthogonal_allowed));

        for &(dr, dc) in directions {
            let captured = from.offset(dr, dc, self.rows, self.cols);
            let landing = from.offset(dr * 2, dc * 2, self.rows, self.cols);
            if self.is(captured, Cell::Green) && self.is(landing, Cell::Empty) {
                if let (Some(captured), Some(landing)) = (captured, landing) {
                    jumps.push(Jump { landing, captured });
                }
            }
        }
        jumps
    }

    fn apply(&self, from: Position, jump: Jump) -> Self {
        let mut next = self.clone();
        let frog = self.cells[self.index(from)];
        let (landing, captured, origin) = (
            self.index(jump.landing),
            self.index(jump.captured),
            self.index(from),
        );
        next.cells[landing] = frog;
        next.cells[captured] = Cell::Empty;
        next.cells[origin] = Cell::Empty;
        next
    }

    fn positions(&self) -> impl Iterator<Item = Position> + '_ {
        (0..self.rows).flat_map(move |row| (0..self.cols).map(move |col| Position::new(row, col)))
    }

    /// Jump the frog at `from` so that it lands on `to`.
    pub fn jump(&self, from: Position, to: Position) -> Result<Self, MoveError> {
        match self.get(from) {
            None => {
                return Err(MoveError::OutOfBounds {
                    row: from.row,
                    col: from.col,
                })
            }
            Some(cell) if !cell.is_frog() => {
                return Err(MoveError::NoPiece {
                    row: from.row,
                    col: from.col,
                })
            }
            Some(_) => {}
        }

        self.jumps_from(from)
            .into_iter()
            .find(|jump| jump.landing == to)
            .map(|jump| self.apply(from, jump))
            .ok_or(MoveError::InvalidDestination {
                row: to.row,
                col: to.col,
            })
    }
}

impl Configuration for HoppersConfig {
    fn is_goal(&self) -> bool {
        let mut frogs = self.cells.iter().filter(|c| c.is_frog());
        matches!((frogs.next(), frogs.next()), (Some(Cell::Red), None))
    }

    fn successors(&self) -> Vec<Self> {
        self.positions()
            .flat_map(|from| {
                self.jumps_from(from)
                    .into_iter()
                    .map(move |jump| self.apply(from, jump))
            })
            .collect()
    }

    fn render(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for HoppersConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let grid = render_grid(self.rows, self.cols, |row, col| {
            self.cells[self.index(Position::new(row, col))].to_char()
        });
        f.write_str(&grid)
    }
}

impl FromStr for HoppersConfig {
    type Err = PuzzleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut lines = Lines::new(s);
        let (rows, cols) = parse_dimensions(&mut lines)?;

        let mut cells = Vec::with_capacity(rows * cols);
        for _ in 0..rows {
            let (line, fields) = lines.next_fields("board row")?;
            let row: Vec<&str> = fields.collect();
            if row.len() != cols {
                return Err(PuzzleError::RowLength {
                    line,
                    expected: cols,
                    found: row.len(),
                });
            }
            for field in row {
                let mut chars = field.chars();
                let cell = match (chars.next(), chars.next()) {
                    (Some(c), None) => Cell::from_char(c),
                    _ => None,
                };
                cells.push(cell.ok_or_else(|| PuzzleError::UnknownCell {
                    line,
                    cell: field.to_string(),
                })?);
            }
        }

        Ok(Self { rows, cols, cells })
    }
}
