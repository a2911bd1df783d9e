use tracing::debug;

use crate::{
    error::{Result, SolverError},
    solver::{
        rule::PlacementRule,
        rules::{
            collinear::{CollinearRule, SlopeComparison},
            column::ColumnRule,
            diagonal::DiagonalRule,
        },
        solution::Solution,
        state::SearchState,
        stats::SearchStats,
    },
};

/// Restricts a search to the root columns `col % count == index`.
///
/// This is the only place the parallel split happens: every row below the
/// root is explored in full by whichever worker owns the root column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RootPartition {
    pub index: usize,
    pub count: usize,
}

impl RootPartition {
    fn validate(&self) -> Result<()> {
        if self.count == 0 || self.index >= self.count {
            return Err(SolverError::InvalidPartition {
                index: self.index,
                count: self.count,
            }
            .into());
        }
        Ok(())
    }
}

/// The engine enumerating every feasible placement for a board size.
///
/// It drives a recursive depth-first search over one mutate-and-backtrack
/// [`SearchState`], trying columns in ascending order at every row so
/// single-threaded discovery order is deterministic. Each candidate is run
/// through the placement rules in increasing cost order; any veto prunes the
/// branch.
///
/// Mutating one shared state and undoing on return was chosen over cloning a
/// snapshot per branch: the state holds no cross-references, the unwind
/// order is trivial, and it costs no allocation per search node.
pub struct SearchEngine {
    rules: Vec<Box<dyn PlacementRule>>,
    comparison: SlopeComparison,
}

impl SearchEngine {
    pub fn new(comparison: SlopeComparison) -> Self {
        Self {
            rules: vec![
                Box::new(ColumnRule),
                Box::new(DiagonalRule),
                Box::new(CollinearRule::new(comparison)),
            ],
            comparison,
        }
    }

    /// The rules this engine applies, in application order. Indices match
    /// the rule IDs in [`SearchStats`].
    pub fn rules(&self) -> &[Box<dyn PlacementRule>] {
        &self.rules
    }

    /// Enumerates every solution on an `n` by `n` board.
    pub fn solve(&self, n: usize) -> Result<(Vec<Solution>, SearchStats)> {
        self.solve_partition(n, None)
    }

    /// Enumerates the solutions whose root column falls in `partition`, or
    /// all of them when no partition is given.
    pub fn solve_partition(
        &self,
        n: usize,
        partition: Option<RootPartition>,
    ) -> Result<(Vec<Solution>, SearchStats)> {
        if let Some(p) = partition {
            p.validate()?;
        }
        if let SlopeComparison::Approximate { epsilon } = self.comparison {
            if !epsilon.is_finite() || epsilon < 0.0 {
                return Err(SolverError::InvalidEpsilon { epsilon }.into());
            }
        }

        // The empty board completes before the root-level loop ever runs, so
        // the trivial solution would be reported once per partition. Hand it
        // to partition 0 alone to keep the split an actual partition.
        if n == 0 {
            let mut solutions = Vec::new();
            let mut stats = SearchStats::default();
            if partition.map_or(true, |p| p.index == 0) {
                solutions.push(SearchState::new(0).snapshot());
                stats.solutions_found = 1;
            }
            return Ok((solutions, stats));
        }

        let mut state = SearchState::new(n);
        let mut solutions = Vec::new();
        let mut stats = SearchStats::default();
        self.search(&mut state, partition, &mut solutions, &mut stats);

        debug!(
            n,
            solutions = solutions.len(),
            nodes = stats.nodes_visited,
            "search finished"
        );
        Ok((solutions, stats))
    }

    fn search(
        &self,
        state: &mut SearchState,
        partition: Option<RootPartition>,
        solutions: &mut Vec<Solution>,
        stats: &mut SearchStats,
    ) {
        if state.is_complete() {
            solutions.push(state.snapshot());
            stats.solutions_found += 1;
            return;
        }

        let row = state.next_row();
        for col in 0..state.size() {
            if row == 0 {
                if let Some(p) = partition {
                    if col % p.count != p.index {
                        continue;
                    }
                }
            }

            stats.nodes_visited += 1;
            if !self.admits(state, col, stats) {
                continue;
            }

            state.extend(col);
            self.search(state, partition, solutions, stats);
            state.retract();
        }
    }

    fn admits(&self, state: &SearchState, col: usize, stats: &mut SearchStats) -> bool {
        for (rule_id, rule) in self.rules.iter().enumerate() {
            stats.record_check(rule_id);
            if !rule.admits(state, col) {
                stats.record_rejection(rule_id);
                return false;
            }
        }
        true
    }
}

impl Default for SearchEngine {
    fn default() -> Self {
        Self::new(SlopeComparison::Exact)
    }
}
