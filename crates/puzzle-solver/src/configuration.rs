//! The state abstraction every puzzle implements.
//!
//! The solver only ever talks to puzzles through this trait, so any type that
//! can say whether it is solved and list its one-move neighbours can be
//! searched.

use std::hash::Hash;

/// One immutable configuration of a puzzle.
///
/// Equality and hashing must agree: two values describing the same board
/// compare equal and hash identically no matter which moves produced them.
pub trait Configuration: Clone + Eq + Hash {
    /// True iff this configuration satisfies the puzzle's terminal condition.
    fn is_goal(&self) -> bool;

    /// Every configuration reachable by exactly one legal move.
    ///
    /// Must be finite and must not contain `self`. The order only decides
    /// which of several equally short solutions gets returned.
    fn successors(&self) -> Vec<Self>;

    /// Human-readable rendering used in reports.
    fn render(&self) -> String;

    /// The single target configuration, for puzzles that have one.
    ///
    /// Puzzles where several configurations count as solved return `None`.
    fn goal_template(&self) -> Option<Self> {
        None
    }
}
