//! Trine enumerates all placements of N non-attacking queens on an N-by-N
//! board under one extra rule: no three queens may be collinear at *any*
//! angle, not just along the classical rows, columns and diagonals.
//!
//! # Core Concepts
//!
//! - **[`PlacementRule`]**: a pure feasibility check for one candidate
//!   placement. The crate ships three: column conflicts, classical diagonal
//!   conflicts, and the any-angle collinearity rule.
//! - **[`SearchEngine`]**: a recursive backtracking driver that tries
//!   columns in ascending order at every row and prunes with the rules.
//! - **[`solve_parallel`]**: splits the root level of the search across a
//!   fixed pool of worker threads (worker `k` owns the root columns with
//!   `col % workers == k`) and merges the results in worker-index order.
//!
//! Collinearity is decided with exact integer arithmetic by default; the
//! floating-point comparison with an absolute tolerance that the rule
//! historically used survives as [`SlopeComparison::Approximate`].
//!
//! # Example
//!
//! ```
//! use trine::solver::engine::SearchEngine;
//!
//! let engine = SearchEngine::default();
//! let (solutions, stats) = engine.solve(4).unwrap();
//!
//! assert_eq!(solutions.len(), 2);
//! assert_eq!(solutions[0].columns(), &[1, 3, 0, 2]);
//! assert_eq!(stats.solutions_found, 2);
//! ```
//!
//! [`PlacementRule`]: crate::solver::rule::PlacementRule
//! [`SearchEngine`]: crate::solver::engine::SearchEngine
//! [`solve_parallel`]: crate::solver::pool::solve_parallel
//! [`SlopeComparison::Approximate`]: crate::solver::rules::collinear::SlopeComparison
pub mod error;
pub mod solver;
