//! Breadth-first solver shared by every puzzle.
//!
//! The search expands configurations strictly in FIFO order and records each
//! configuration the first time it is produced, so the first goal dequeued is
//! reached by a shortest sequence of moves. The path is rebuilt by walking the
//! predecessor map back from the goal.
//!
//! Memory grows with the number of distinct reachable configurations; nothing
//! is pruned or spilled, so puzzles whose reachable space does not fit in
//! memory are out of reach.

use std::collections::{HashMap, HashSet, VecDeque};
use std::fmt::Write as _;
use std::time::Instant;

use serde::Serialize;

use crate::configuration::Configuration;

/// Expansion counters from the most recent search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchStats {
    /// Every successor produced, duplicates included, plus the start.
    pub total_configs: usize,
    /// Every distinct configuration dequeued, the start included.
    pub unique_configs: usize,
}

impl Default for SearchStats {
    fn default() -> Self {
        // The start configuration counts once for each before expansion.
        Self {
            total_configs: 1,
            unique_configs: 1,
        }
    }
}

/// Machine-readable summary of one solve, printed by `--json`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SolveReport {
    pub puzzle: String,
    pub solved: bool,
    #[serde(flatten)]
    pub stats: SearchStats,
    /// Rendered configurations from start to goal, empty when unsolved.
    pub steps: Vec<String>,
    pub time_elapsed_ms: u64,
}

/// Breadth-first search engine.
#[derive(Debug, Clone, Default)]
pub struct Solver {
    stats: SearchStats,
}

impl Solver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Find a shortest path from `initial` to a goal configuration.
    ///
    /// Returns the configurations from start to goal inclusive, or `None`
    /// when no goal is reachable. Counters are reset at the start of every
    /// call.
    pub fn solve<C: Configuration>(&mut self, initial: &C) -> Option<Vec<C>> {
        self.stats = SearchStats::default();

        let mut queue: VecDeque<C> = VecDeque::new();
        let mut predecessors: HashMap<C, Option<C>> = HashMap::new();
        let mut accounted: HashSet<C> = HashSet::new();
        let mut goal = initial.goal_template();

        queue.push_back(initial.clone());
        predecessors.insert(initial.clone(), None);
        accounted.insert(initial.clone());

        while let Some(current) = queue.pop_front() {
            if !accounted.contains(&current) {
                self.stats.unique_configs += 1;
                accounted.insert(current.clone());
            }

            if current.is_goal() {
                goal = Some(current);
                break;
            }

            for child in current.successors() {
                self.stats.total_configs += 1;
                if !predecessors.contains_key(&child) {
                    predecessors.insert(child.clone(), Some(current.clone()));
                    queue.push_back(child);
                }
            }
        }

        let path = match goal {
            Some(goal) if predecessors.contains_key(&goal) => {
                reconstruct_path(&predecessors, goal)
            }
            _ => Vec::new(),
        };

        if path.is_empty() {
            None
        } else {
            Some(path)
        }
    }

    /// `(total_generated, unique_visited)` from the last search.
    pub fn counts(&self) -> (usize, usize) {
        (self.stats.total_configs, self.stats.unique_configs)
    }

    pub fn stats(&self) -> SearchStats {
        self.stats
    }

    /// Text report: both counters, then each step or "No solution".
    pub fn format_report<C: Configuration>(&self, path: &[C]) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "Total configs: {}", self.stats.total_configs);
        let _ = writeln!(out, "Unique configs: {}", self.stats.unique_configs);

        if path.is_empty() {
            out.push_str("No solution\n");
            return out;
        }

        for (i, config) in path.iter().enumerate() {
            let rendered = config.render();
            if rendered.contains('\n') {
                let _ = writeln!(out, "Step {}:\n{}", i, rendered.trim_end());
            } else {
                let _ = writeln!(out, "Step {}: {}", i, rendered);
            }
        }
        out
    }

    /// Run a search and package the outcome for JSON output.
    pub fn report<C: Configuration>(&mut self, puzzle: &str, initial: &C) -> SolveReport {
        let start_time = Instant::now();
        let path = self.solve(initial).unwrap_or_default();

        SolveReport {
            puzzle: puzzle.to_string(),
            solved: !path.is_empty(),
            stats: self.stats,
            steps: path.iter().map(|c| c.render()).collect(),
            time_elapsed_ms: start_time.elapsed().as_millis() as u64,
        }
    }
}

/// Walk predecessor links from `goal` back to the root and reverse.
fn reconstruct_path<C: Configuration>(predecessors: &HashMap<C, Option<C>>, goal: C) -> Vec<C> {
    let mut path = vec![goal];
    while let Some(Some(prev)) = path.last().and_then(|c| predecessors.get(c)) {
        path.push(prev.clone());
    }
    path.reverse();
    path
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::puzzles::clock::ClockConfig;
    use crate::puzzles::hoppers::HoppersConfig;
    use crate::puzzles::jam::JamConfig;
    use crate::puzzles::water::WaterConfig;

    /// Small explicit graph: node ids with a fixed adjacency list.
    #[derive(Debug, Clone, PartialEq, Eq, Hash)]
    struct Node {
        id: usize,
        goal: usize,
        template: bool,
    }

    const EDGES: &[&[usize]] = &[
        &[1, 2], // 0
        &[3],    // 1
        &[3, 4], // 2
        &[5],    // 3
        &[5],    // 4
        &[],     // 5
        &[],     // 6: unreachable from 0
    ];

    impl Node {
        fn start(goal: usize, template: bool) -> Self {
            Self { id: 0, goal, template }
        }
    }

    impl Configuration for Node {
        fn is_goal(&self) -> bool {
            self.id == self.goal
        }

        fn successors(&self) -> Vec<Self> {
            EDGES[self.id]
                .iter()
                .map(|&id| Node { id, ..self.clone() })
                .collect()
        }

        fn render(&self) -> String {
            format!("n{}", self.id)
        }

        fn goal_template(&self) -> Option<Self> {
            self.template.then(|| Node { id: self.goal, ..self.clone() })
        }
    }

    /// Independent BFS distance used to cross-check path lengths.
    fn bfs_depth<C: Configuration>(initial: &C) -> Option<usize> {
        let mut seen = HashSet::new();
        let mut layer = vec![initial.clone()];
        seen.insert(initial.clone());
        let mut depth = 0;
        while !layer.is_empty() {
            if layer.iter().any(|c| c.is_goal()) {
                return Some(depth);
            }
            let mut next = Vec::new();
            for config in &layer {
                for child in config.successors() {
                    if seen.insert(child.clone()) {
                        next.push(child);
                    }
                }
            }
            layer = next;
            depth += 1;
        }
        None
    }

    /// Every reachable configuration, for exhaustion checks.
    fn reachable<C: Configuration>(initial: &C) -> HashSet<C> {
        let mut seen = HashSet::new();
        let mut stack = vec![initial.clone()];
        seen.insert(initial.clone());
        while let Some(config) = stack.pop() {
            for child in config.successors() {
                if seen.insert(child.clone()) {
                    stack.push(child);
                }
            }
        }
        seen
    }

    fn assert_valid_path<C: Configuration + std::fmt::Debug>(initial: &C, path: &[C]) {
        assert_eq!(path.first(), Some(initial));
        assert!(path.last().unwrap().is_goal());
        for pair in path.windows(2) {
            assert!(
                pair[0].successors().contains(&pair[1]),
                "{:?} is not one move from {:?}",
                pair[1],
                pair[0]
            );
        }
        assert_eq!(Some(path.len() - 1), bfs_depth(initial));
    }

    #[test]
    fn test_initial_goal_returns_single_step() {
        let mut solver = Solver::new();
        let start = Node::start(0, false);
        assert_eq!(solver.solve(&start), Some(vec![start]));
        assert_eq!(solver.counts(), (1, 1));

        let clock = ClockConfig::new(12, 4, 4).unwrap();
        assert_eq!(solver.solve(&clock), Some(vec![clock]));
    }

    #[test]
    fn test_graph_shortest_path() {
        let mut solver = Solver::new();
        let start = Node::start(5, false);
        let path = solver.solve(&start).unwrap();
        let ids: Vec<usize> = path.iter().map(|n| n.id).collect();
        // 0 -> 1 -> 3 -> 5 wins the tie because 1 is enqueued before 2
        assert_eq!(ids, vec![0, 1, 3, 5]);
        assert_valid_path(&start, &path);
    }

    #[test]
    fn test_unreachable_goal_without_template() {
        let mut solver = Solver::new();
        assert_eq!(solver.solve(&Node::start(6, false)), None);
        // Six nodes dequeued; edges: 2 + 1 + 2 + 1 + 1 = 7 successors.
        assert_eq!(solver.counts(), (8, 6));
    }

    #[test]
    fn test_unreachable_goal_template() {
        let mut solver = Solver::new();
        assert_eq!(solver.solve(&Node::start(6, true)), None);

        // Out-of-range clock goal: the template is never discovered.
        let clock = ClockConfig::new(12, 3, 13).unwrap();
        assert_eq!(solver.solve(&clock), None);
        assert_eq!(solver.counts(), (25, 12));
    }

    #[test]
    fn test_reachable_goal_template() {
        let mut solver = Solver::new();
        let start = Node::start(4, true);
        let path = solver.solve(&start).unwrap();
        assert_eq!(path.iter().map(|n| n.id).collect::<Vec<_>>(), vec![0, 2, 4]);
    }

    #[test]
    fn test_clock_twelve_hours() {
        let mut solver = Solver::new();
        let start = ClockConfig::new(12, 6, 12).unwrap();
        let path = solver.solve(&start).unwrap();

        let rendered: Vec<String> = path.iter().map(|c| c.render()).collect();
        assert_eq!(rendered, vec!["6", "7", "8", "9", "10", "11", "12"]);
        assert_valid_path(&start, &path);
        assert_eq!(solver.counts(), (23, 12));
    }

    #[test]
    fn test_water_finds_one_move_solution() {
        let mut solver = Solver::new();
        let start = WaterConfig::new(vec![5, 3], 3).unwrap();
        let path = solver.solve(&start).unwrap();

        assert_eq!(path.len(), 2);
        assert_eq!(path[1].render(), "[0, 3]");
        assert_valid_path(&start, &path);
        assert_eq!(solver.counts(), (6, 3));
    }

    #[test]
    fn test_water_unreachable_amount_exhausts_space() {
        let mut solver = Solver::new();
        let start = WaterConfig::new(vec![2, 6], 5).unwrap();
        assert_eq!(solver.solve(&start), None);

        let space = reachable(&start);
        let edges: usize = space.iter().map(|c| c.successors().len()).sum();
        let (total, unique) = solver.counts();
        assert_eq!(unique, space.len());
        assert_eq!(total, edges + 1);
        assert!(unique <= total);
    }

    #[test]
    fn test_water_paths_are_shortest() {
        let mut solver = Solver::new();
        for (capacities, amount) in [(vec![3, 5], 4), (vec![4, 9], 6), (vec![2, 3, 7], 1)] {
            let start = WaterConfig::new(capacities, amount).unwrap();
            let path = solver.solve(&start).unwrap();
            assert_valid_path(&start, &path);
        }
    }

    #[test]
    fn test_hoppers_and_jam_paths() {
        let mut solver = Solver::new();

        let hoppers: HoppersConfig = "5 5\n\
                                      R * G * .\n\
                                      * . * G *\n\
                                      . * . * .\n\
                                      * . * . *\n\
                                      . * . * .\n"
            .parse()
            .unwrap();
        let path = solver.solve(&hoppers).unwrap();
        assert_eq!(path.len(), 3);
        assert_valid_path(&hoppers, &path);

        let jam: JamConfig = "4 4\n2\nX 1 0 1 1\nA 0 2 1 2\n".parse().unwrap();
        let path = solver.solve(&jam).unwrap();
        assert_eq!(path.len(), 5);
        assert_valid_path(&jam, &path);
    }

    #[test]
    fn test_solve_is_repeatable() {
        let mut solver = Solver::new();
        let first = solver.solve(&WaterConfig::new(vec![3, 5], 4).unwrap()).unwrap();
        let first_counts = solver.counts();
        let second = solver.solve(&WaterConfig::new(vec![3, 5], 4).unwrap()).unwrap();

        assert_eq!(first, second);
        assert_eq!(first_counts, solver.counts());
    }

    #[test]
    fn test_unique_never_exceeds_total() {
        let mut solver = Solver::new();
        for goal in 1..=10 {
            solver.solve(&ClockConfig::new(10, 1, goal).unwrap());
            let (total, unique) = solver.counts();
            assert!(unique <= total);
        }
    }

    #[test]
    fn test_format_report() {
        let mut solver = Solver::new();
        let start = ClockConfig::new(4, 1, 2).unwrap();
        let path = solver.solve(&start).unwrap();
        let report = solver.format_report(&path);

        assert_eq!(
            report,
            "Total configs: 3\nUnique configs: 2\nStep 0: 1\nStep 1: 2\n"
        );
    }

    #[test]
    fn test_format_report_no_solution() {
        let mut solver = Solver::new();
        let start = WaterConfig::new(vec![2], 1).unwrap();
        assert!(solver.solve(&start).is_none());
        let report = solver.format_report::<WaterConfig>(&[]);
        assert!(report.ends_with("No solution\n"));
        assert!(report.starts_with("Total configs: "));
    }

    #[test]
    fn test_format_report_multiline_render() {
        let mut solver = Solver::new();
        let jam: JamConfig = "1 3\n1\nX 0 0 0 1\n".parse().unwrap();
        let path = solver.solve(&jam).unwrap();
        let report = solver.format_report(&path);
        assert!(report.contains("Step 0:\nX X .\n"));
        assert!(report.contains("Step 1:\n. X X\n"));
    }

    #[test]
    fn test_report_json() {
        let mut solver = Solver::new();
        let report = solver.report("clock", &ClockConfig::new(4, 1, 2).unwrap());
        assert!(report.solved);
        assert_eq!(report.steps, vec!["1", "2"]);

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["totalConfigs"], 3);
        assert_eq!(json["uniqueConfigs"], 2);
        assert_eq!(json["puzzle"], "clock");
    }
}
