pub mod engine;
pub mod pool;
pub mod rule;
pub mod rules;
pub mod solution;
pub mod state;
pub mod stats;

use crate::error::Result;
use crate::solver::{engine::SearchEngine, solution::Solution};

/// Enumerates every solution on an `n` by `n` board with the default engine
/// (exact slope comparison, single-threaded, deterministic order).
///
/// ```
/// let solutions = trine::solver::solve(4).unwrap();
/// assert_eq!(solutions.len(), 2);
/// ```
pub fn solve(n: usize) -> Result<Vec<Solution>> {
    let (solutions, _stats) = SearchEngine::default().solve(n)?;
    Ok(solutions)
}
