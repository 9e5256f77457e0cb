//! Breadth-first puzzle solving.
//!
//! A single search engine ([`Solver`]) finds shortest solutions for any type
//! implementing [`Configuration`]. Four puzzles ship with the crate: clock,
//! water buckets, hoppers and traffic jam. The grid puzzles can also be played
//! a move at a time through [`model::PuzzleModel`].

pub mod configuration;
pub mod error;
pub mod model;
pub mod ptui;
pub mod puzzles;
pub mod solver;

// Re-export main types
pub use configuration::Configuration;
pub use error::{MoveError, PuzzleError};
pub use model::{ModelEvent, Playable, PuzzleModel};
pub use puzzles::clock::ClockConfig;
pub use puzzles::hoppers::HoppersConfig;
pub use puzzles::jam::JamConfig;
pub use puzzles::water::WaterConfig;
pub use puzzles::Position;
pub use solver::{SearchStats, SolveReport, Solver};
