//! Clock puzzle: turn the hand one hour forward or back until it shows the goal.

use crate::configuration::Configuration;
use crate::error::PuzzleError;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ClockConfig {
    hours: u32,
    current: u32,
    goal: u32,
}

impl ClockConfig {
    /// A clock with faces `1..=hours` showing `start`.
    ///
    /// A `goal` outside the face is accepted; such a clock has no solution.
    pub fn new(hours: u32, start: u32, goal: u32) -> Result<Self, PuzzleError> {
        if hours == 0 {
            return Err(PuzzleError::NoHours);
        }
        if !(1..=hours).contains(&start) {
            return Err(PuzzleError::StartOutOfRange { start, hours });
        }
        Ok(Self {
            hours,
            current: start,
            goal,
        })
    }

    pub fn current(&self) -> u32 {
        self.current
    }

    fn forward(&self) -> Self {
        let current = if self.current >= self.hours { 1 } else { self.current + 1 };
        Self { current, ..*self }
    }

    fn backward(&self) -> Self {
        let current = if self.current <= 1 { self.hours } else { self.current - 1 };
        Self { current, ..*self }
    }
}

impl Configuration for ClockConfig {
    fn is_goal(&self) -> bool {
        self.current == self.goal
    }

    fn successors(&self) -> Vec<Self> {
        [self.forward(), self.backward()]
            .into_iter()
            .filter(|next| next != self)
            .collect()
    }

    fn render(&self) -> String {
        self.current.to_string()
    }

    fn goal_template(&self) -> Option<Self> {
        Some(Self {
            current: self.goal,
            ..*self
        })
    }
}
