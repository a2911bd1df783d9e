use crate::solver::state::SearchState;

#[derive(Debug, Clone)]
pub struct RuleDescriptor {
    pub name: String,
    pub description: String,
}

/// A feasibility check applied to each candidate placement.
///
/// Rules are pure: they read the current [`SearchState`] and the candidate
/// column, and veto or admit it without side effects. The engine applies its
/// rules in increasing cost order and stops at the first veto.
pub trait PlacementRule: std::fmt::Debug + Send + Sync {
    fn descriptor(&self) -> RuleDescriptor;

    /// Returns true if placing a queen in `col` on the next undecided row
    /// keeps the assignment feasible under this rule.
    fn admits(&self, state: &SearchState, col: usize) -> bool;
}
