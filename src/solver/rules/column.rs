use crate::solver::{
    rule::{PlacementRule, RuleDescriptor},
    state::SearchState,
};

/// Vetoes a candidate whose column already holds a queen.
///
/// O(1) via the state's occupancy marker.
#[derive(Debug, Clone, Default)]
pub struct ColumnRule;

impl PlacementRule for ColumnRule {
    fn descriptor(&self) -> RuleDescriptor {
        RuleDescriptor {
            name: "ColumnRule".to_string(),
            description: "no two queens share a column".to_string(),
        }
    }

    fn admits(&self, state: &SearchState, col: usize) -> bool {
        !state.column_occupied(col)
    }
}
