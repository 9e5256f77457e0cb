//! Interactive play on a "current configuration".
//!
//! The model owns the loaded and current configurations. Each operation
//! produces a [`ModelEvent`] which is handed to every subscriber along with
//! the configuration as it stands afterwards.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::configuration::Configuration;
use crate::error::{MoveError, PuzzleError};
use crate::puzzles::hoppers::HoppersConfig;
use crate::puzzles::jam::JamConfig;
use crate::puzzles::Position;
use crate::solver::Solver;

/// A grid puzzle a person can play one move at a time.
pub trait Playable: Configuration + FromStr<Err = PuzzleError> {
    fn rows(&self) -> usize;
    fn cols(&self) -> usize;
    /// Display character for the cell at `pos`.
    fn cell(&self, pos: Position) -> char;

    /// Apply the user move `from -> to`, describing it on success.
    fn play(&self, from: Position, to: Position) -> Result<(Self, String), MoveError>;

    fn load(path: &Path) -> Result<Self, PuzzleError> {
        let text = std::fs::read_to_string(path).map_err(|source| PuzzleError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        text.parse()
    }
}

impl Playable for HoppersConfig {
    fn rows(&self) -> usize {
        HoppersConfig::rows(self)
    }

    fn cols(&self) -> usize {
        HoppersConfig::cols(self)
    }

    fn cell(&self, pos: Position) -> char {
        self.get(pos).map_or(' ', |c| c.to_char())
    }

    fn play(&self, from: Position, to: Position) -> Result<(Self, String), MoveError> {
        let next = self.jump(from, to)?;
        let description = format!("({}, {}) -> ({}, {})", from.row, from.col, to.row, to.col);
        Ok((next, description))
    }
}

impl Playable for JamConfig {
    fn rows(&self) -> usize {
        JamConfig::rows(self)
    }

    fn cols(&self) -> usize {
        JamConfig::cols(self)
    }

    fn cell(&self, pos: Position) -> char {
        self.get(pos).unwrap_or(' ')
    }

    fn play(&self, from: Position, to: Position) -> Result<(Self, String), MoveError> {
        self.slide(from, to)
    }
}

/// What happened as a result of a model operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModelEvent {
    Loaded { path: PathBuf },
    LoadFailed { path: PathBuf, reason: String },
    Reset,
    HintApplied,
    AlreadySolved,
    NoSolution,
    Moved { description: String },
    MoveRejected(MoveError),
}

impl fmt::Display for ModelEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModelEvent::Loaded { path } => write!(f, "Loaded {}", path.display()),
            ModelEvent::LoadFailed { path, reason } => {
                write!(f, "Could not load {}: {}", path.display(), reason)
            }
            ModelEvent::Reset => f.write_str("Board reset"),
            ModelEvent::HintApplied => f.write_str("Performed next step"),
            ModelEvent::AlreadySolved => f.write_str("Puzzle already solved"),
            ModelEvent::NoSolution => f.write_str("No solution for this puzzle"),
            ModelEvent::Moved { description } => write!(f, "Move made: {}", description),
            ModelEvent::MoveRejected(err) => write!(f, "Invalid move: {}", err),
        }
    }
}

type Subscriber<C> = Box<dyn FnMut(&C, &ModelEvent)>;

pub struct PuzzleModel<C: Playable> {
    initial: C,
    current: C,
    subscribers: Vec<Subscriber<C>>,
}

impl<C: Playable> PuzzleModel<C> {
    pub fn new(config: C) -> Self {
        Self {
            initial: config.clone(),
            current: config,
            subscribers: Vec::new(),
        }
    }

    pub fn current(&self) -> &C {
        &self.current
    }

    pub fn subscribe(&mut self, subscriber: impl FnMut(&C, &ModelEvent) + 'static) {
        self.subscribers.push(Box::new(subscriber));
    }

    /// Solve from the current configuration and take its first step.
    pub fn hint(&mut self) -> ModelEvent {
        let event = match Solver::new().solve(&self.current) {
            None => ModelEvent::NoSolution,
            Some(path) => match path.into_iter().nth(1) {
                Some(next) => {
                    self.current = next;
                    ModelEvent::HintApplied
                }
                None => ModelEvent::AlreadySolved,
            },
        };
        self.emit(event)
    }

    /// Replace both the initial and current configuration from a file.
    pub fn load(&mut self, path: &Path) -> ModelEvent {
        let event = match C::load(path) {
            Ok(config) => {
                self.initial = config.clone();
                self.current = config;
                ModelEvent::Loaded {
                    path: path.to_path_buf(),
                }
            }
            Err(err) => ModelEvent::LoadFailed {
                path: path.to_path_buf(),
                reason: err.to_string(),
            },
        };
        self.emit(event)
    }

    pub fn select(&mut self, from: Position, to: Position) -> ModelEvent {
        let event = match self.current.play(from, to) {
            Ok((next, description)) => {
                self.current = next;
                ModelEvent::Moved { description }
            }
            Err(err) => ModelEvent::MoveRejected(err),
        };
        self.emit(event)
    }

    pub fn reset(&mut self) -> ModelEvent {
        self.current = self.initial.clone();
        self.emit(ModelEvent::Reset)
    }

    fn emit(&mut self, event: ModelEvent) -> ModelEvent {
        for subscriber in &mut self.subscribers {
            subscriber(&self.current, &event);
        }
        event
    }
}
