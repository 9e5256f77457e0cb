//! Traffic jam: slide cars one cell along their axis until car `X` reaches
//! the rightmost column.

use std::fmt;
use std::str::FromStr;

use smallvec::SmallVec;

use crate::configuration::Configuration;
use crate::error::{MoveError, PuzzleError};
use crate::puzzles::{parse_dimensions, parse_number, render_grid, Lines, Position};

pub const EMPTY: char = '.';
/// The car that has to reach the exit.
pub const GOAL_CAR: char = 'X';

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Car {
    pub name: char,
    pub start: Position,
    pub end: Position,
}

impl Car {
    /// Single-cell cars count as horizontal.
    pub fn is_horizontal(&self) -> bool {
        self.start.row == self.end.row
    }

    fn cells(&self) -> impl Iterator<Item = Position> + '_ {
        (self.start.row..=self.end.row).flat_map(move |row| {
            (self.start.col..=self.end.col).map(move |col| Position::new(row, col))
        })
    }

    fn shifted(&self, forward: bool) -> Car {
        let (dr, dc) = match (self.is_horizontal(), forward) {
            (true, false) => (0, -1),
            (true, true) => (0, 1),
            (false, false) => (-1, 0),
            (false, true) => (1, 0),
        };
        let shift = |p: Position| Position {
            row: p.row.wrapping_add_signed(dr),
            col: p.col.wrapping_add_signed(dc),
        };
        Car {
            name: self.name,
            start: shift(self.start),
            end: shift(self.end),
        }
    }

    /// The cell the car would move into, `None` if that is off the board.
    fn target(&self, forward: bool, rows: usize, cols: usize) -> Option<Position> {
        let (dr, dc) = if self.is_horizontal() { (0, 1) } else { (1, 0) };
        if forward {
            self.end.offset(dr, dc, rows, cols)
        } else {
            self.start.offset(-dr, -dc, rows, cols)
        }
    }
}

/// One legal slide: which car, and which way along its axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Slide {
    car: usize,
    forward: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct JamConfig {
    rows: usize,
    cols: usize,
    cars: Vec<Car>,
    /// Occupancy grid derived from `cars`, row-major.
    board: Vec<char>,
}

impl JamConfig {
    /// Lay out `cars` on an empty `rows x cols` grid.
    pub fn new(rows: usize, cols: usize, cars: Vec<Car>) -> Result<Self, PuzzleError> {
        if rows == 0 || cols == 0 {
            return Err(PuzzleError::EmptyBoard);
        }
        let mut board = vec![EMPTY; rows * cols];
        for (i, car) in cars.iter().enumerate() {
            let invalid = |reason: &str| PuzzleError::InvalidCar {
                name: car.name,
                reason: reason.to_string(),
            };
            if car.name == EMPTY || car.name.is_whitespace() {
                return Err(invalid("name is not a visible character"));
            }
            if cars[..i].iter().any(|other| other.name == car.name) {
                return Err(invalid("duplicate name"));
            }
            if car.start.row != car.end.row && car.start.col != car.end.col {
                return Err(invalid("must lie in a single row or column"));
            }
            if car.start > car.end {
                return Err(invalid("start must come before end"));
            }
            if car.end.row >= rows || car.end.col >= cols {
                return Err(invalid("extends past the board"));
            }
            for pos in car.cells() {
                let cell = &mut board[pos.row * cols + pos.col];
                if *cell != EMPTY {
                    return Err(invalid(&format!("overlaps car {}", cell)));
                }
                *cell = car.name;
            }
        }
        Ok(Self {
            rows,
            cols,
            cars,
            board,
        })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn cars(&self) -> &[Car] {
        &self.cars
    }

    /// Car name at `pos`, `'.'` for an empty cell, `None` off the board.
    pub fn get(&self, pos: Position) -> Option<char> {
        (pos.row < self.rows && pos.col < self.cols).then(|| self.board[pos.row * self.cols + pos.col])
    }

    fn is_open(&self, pos: Option<Position>) -> bool {
        pos.and_then(|p| self.get(p)) == Some(EMPTY)
    }

    fn slides(&self) -> SmallVec<[Slide; 16]> {
        let mut slides = SmallVec::new();
        for (car, c) in self.cars.iter().enumerate() {
            for forward in [false, true] {
                if self.is_open(c.target(forward, self.rows, self.cols)) {
                    slides.push(Slide { car, forward });
                }
            }
        }
        slides
    }

    fn apply(&self, slide: Slide) -> Self {
        let mut next = self.clone();
        let old = self.cars[slide.car];
        let new = old.shifted(slide.forward);
        for pos in old.cells() {
            next.board[pos.row * self.cols + pos.col] = EMPTY;
        }
        for pos in new.cells() {
            next.board[pos.row * self.cols + pos.col] = new.name;
        }
        next.cars[slide.car] = new;
        next
    }

    /// Slide the car covering `from` one cell so that it enters `to`.
    ///
    /// Returns the new configuration and a short description of the move.
    pub fn slide(&self, from: Position, to: Position) -> Result<(Self, String), MoveError> {
        let name = match self.get(from) {
            None => {
                return Err(MoveError::OutOfBounds {
                    row: from.row,
                    col: from.col,
                })
            }
            Some(EMPTY) => {
                return Err(MoveError::NoPiece {
                    row: from.row,
                    col: from.col,
                })
            }
            Some(name) => name,
        };
        let invalid = MoveError::InvalidDestination {
            row: to.row,
            col: to.col,
        };
        let car = self
            .cars
            .iter()
            .position(|c| c.name == name)
            .ok_or(MoveError::NoPiece {
                row: from.row,
                col: from.col,
            })?;

        let c = &self.cars[car];
        let forward = [false, true]
            .into_iter()
            .find(|&forward| c.target(forward, self.rows, self.cols) == Some(to))
            .ok_or(invalid.clone())?;
        if !self.is_open(Some(to)) {
            return Err(invalid);
        }

        let direction = match (c.is_horizontal(), forward) {
            (true, false) => "left",
            (true, true) => "right",
            (false, false) => "up",
            (false, true) => "down",
        };
        Ok((
            self.apply(Slide { car, forward }),
            format!("Car {} -> {} one space", name, direction),
        ))
    }
}

impl Configuration for JamConfig {
    fn is_goal(&self) -> bool {
        let last = self.cols - 1;
        (0..self.rows).any(|row| self.board[row * self.cols + last] == GOAL_CAR)
    }

    fn successors(&self) -> Vec<Self> {
        self.slides().into_iter().map(|slide| self.apply(slide)).collect()
    }

    fn render(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for JamConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let grid = render_grid(self.rows, self.cols, |row, col| self.board[row * self.cols + col]);
        f.write_str(&grid)
    }
}

impl FromStr for JamConfig {
    type Err = PuzzleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut lines = Lines::new(s);
        let (rows, cols) = parse_dimensions(&mut lines)?;

        let (line, mut fields) = lines.next_fields("car count")?;
        let count = parse_number(fields.next(), line, "car count")?;

        let mut cars = Vec::with_capacity(count);
        for _ in 0..count {
            let (line, mut fields) = lines.next_fields("car description")?;
            let name_field = fields.next().ok_or(PuzzleError::MissingField {
                line,
                expected: "car name",
            })?;
            let mut chars = name_field.chars();
            let name = match (chars.next(), chars.next()) {
                (Some(c), None) => c,
                _ => {
                    return Err(PuzzleError::UnknownCell {
                        line,
                        cell: name_field.to_string(),
                    })
                }
            };
            let mut coord = |expected| parse_number(fields.next(), line, expected);
            let start = Position::new(coord("start row")?, coord("start column")?);
            let end = Position::new(coord("end row")?, coord("end column")?);
            cars.push(Car { name, start, end });
        }

        JamConfig::new(rows, cols, cars)
    }
}
