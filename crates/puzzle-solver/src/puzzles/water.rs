//! Water buckets: fill, empty and pour between buckets until one holds the
//! target amount.

use crate::configuration::Configuration;
use crate::error::PuzzleError;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct WaterConfig {
    capacities: Vec<u32>,
    levels: Vec<u32>,
    goal: u32,
}

impl WaterConfig {
    /// All buckets empty, looking for `goal` units in any one of them.
    pub fn new(capacities: Vec<u32>, goal: u32) -> Result<Self, PuzzleError> {
        if capacities.is_empty() {
            return Err(PuzzleError::NoBuckets);
        }
        let levels = vec![0; capacities.len()];
        Ok(Self {
            capacities,
            levels,
            goal,
        })
    }

    pub fn levels(&self) -> &[u32] {
        &self.levels
    }

    fn with_levels(&self, levels: Vec<u32>) -> Self {
        Self {
            capacities: self.capacities.clone(),
            levels,
            goal: self.goal,
        }
    }

    /// Pour bucket `from` into bucket `to` until `to` is full or `from` is empty.
    fn pour(&self, from: usize, to: usize) -> Vec<u32> {
        let mut levels = self.levels.clone();
        let moved = levels[from].min(self.capacities[to] - levels[to]);
        levels[from] -= moved;
        levels[to] += moved;
        levels
    }
}

impl Configuration for WaterConfig {
    fn is_goal(&self) -> bool {
        self.levels.iter().any(|&level| level == self.goal)
    }

    fn successors(&self) -> Vec<Self> {
        let n = self.levels.len();
        let mut successors = Vec::with_capacity(n * (n + 1));

        for i in 0..n {
            let mut filled = self.levels.clone();
            filled[i] = self.capacities[i];
            let mut emptied = self.levels.clone();
            emptied[i] = 0;

            let pours = (0..n).filter(|&j| j != i).map(|j| self.pour(i, j));
            for levels in [filled, emptied].into_iter().chain(pours) {
                if levels != self.levels {
                    successors.push(self.with_levels(levels));
                }
            }
        }

        successors
    }

    fn render(&self) -> String {
        format!("{:?}", self.levels)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn levels(configs: &[WaterConfig]) -> Vec<Vec<u32>> {
        configs.iter().map(|c| c.levels().to_vec()).collect()
    }

    #[test]
    fn test_successor_order_from_partial_state() {
        let config = WaterConfig::new(vec![5, 3], 4).unwrap().with_levels(vec![4, 1]);
        assert_eq!(
            levels(&config.successors()),
            vec![
                vec![5, 1], // fill 0
                vec![0, 1], // empty 0
                vec![2, 3], // pour 0 -> 1
                vec![4, 3], // fill 1
                vec![4, 0], // empty 1
                vec![5, 0], // pour 1 -> 0
            ]
        );
    }

    #[test]
    fn test_noop_moves_are_skipped() {
        let config = WaterConfig::new(vec![5, 3], 4).unwrap();
        assert_eq!(levels(&config.successors()), vec![vec![5, 0], vec![0, 3]]);
        assert!(!config.successors().contains(&config));
    }

    #[test]
    fn test_goal_in_any_bucket() {
        let config = WaterConfig::new(vec![5, 3], 3).unwrap();
        assert!(!config.is_goal());
        assert!(config.with_levels(vec![0, 3]).is_goal());
        assert!(config.with_levels(vec![3, 0]).is_goal());
        assert!(config.goal_template().is_none());
    }

    #[test]
    fn test_zero_goal_is_solved_at_start() {
        assert!(WaterConfig::new(vec![4], 0).unwrap().is_goal());
    }

    #[test]
    fn test_render_and_validation() {
        let config = WaterConfig::new(vec![5, 3, 8], 4).unwrap();
        assert_eq!(config.render(), "[0, 0, 0]");
        assert!(matches!(WaterConfig::new(vec![], 1), Err(PuzzleError::NoBuckets)));
    }
}
