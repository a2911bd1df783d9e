use crate::solver::{
    rule::{PlacementRule, RuleDescriptor},
    state::SearchState,
};

/// Vetoes a candidate on a ±45° diagonal with any placed queen.
///
/// The collinearity rule subsumes this one (a diagonal attack is the
/// slope ±1 special case of three-in-line once two queens are involved in a
/// line through the candidate), but the O(row) scan here is much cheaper
/// than the slope machinery, so it stays as an early-exit filter.
#[derive(Debug, Clone, Default)]
pub struct DiagonalRule;

impl PlacementRule for DiagonalRule {
    fn descriptor(&self) -> RuleDescriptor {
        RuleDescriptor {
            name: "DiagonalRule".to_string(),
            description: "no two queens share a diagonal".to_string(),
        }
    }

    fn admits(&self, state: &SearchState, col: usize) -> bool {
        let row = state.next_row();
        state
            .queens()
            .iter()
            .enumerate()
            .all(|(prev_row, &prev_col)| row - prev_row != prev_col.abs_diff(col))
    }
}
