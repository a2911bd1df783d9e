use std::thread;

use tracing::{debug, warn};

use crate::{
    error::{Result, SolverError},
    solver::{
        engine::{RootPartition, SearchEngine},
        rules::collinear::SlopeComparison,
        solution::Solution,
        stats::SearchStats,
    },
};

/// A worker that did not run to completion. Its root columns contributed
/// nothing to the combined result; sibling workers are unaffected.
#[derive(Debug, Clone)]
pub struct WorkerFailure {
    pub worker: usize,
    pub message: String,
}

/// The combined result of a parallel search.
///
/// `solutions` concatenates the per-worker result lists in worker-index
/// order, which makes the combined ordering deterministic for a given
/// worker count. `failures` lists workers that panicked; the caller decides
/// whether a partial result is acceptable.
#[derive(Debug)]
pub struct ParallelOutcome {
    pub solutions: Vec<Solution>,
    pub stats: SearchStats,
    pub failures: Vec<WorkerFailure>,
}

/// The number of workers used when the caller expresses no preference: one
/// per available execution unit.
pub fn default_worker_count() -> usize {
    thread::available_parallelism().map_or(1, |p| p.get())
}

/// Splits the search across `worker_count` threads at the root level and
/// merges their results.
///
/// Worker `k` owns exactly the root columns `col % worker_count == k` and
/// runs a completely independent engine and search state over them; nothing
/// mutable is shared, and the only synchronization is the final join. Joins
/// happen in worker-index order, so two runs with the same worker count
/// produce identically ordered output.
///
/// A worker that panics is reported in [`ParallelOutcome::failures`] rather
/// than aborting the others.
pub fn solve_parallel(
    comparison: SlopeComparison,
    n: usize,
    worker_count: usize,
) -> Result<ParallelOutcome> {
    if worker_count == 0 {
        return Err(SolverError::InvalidWorkerCount.into());
    }

    debug!(n, worker_count, "starting parallel search");

    let mut handles = Vec::with_capacity(worker_count);
    for index in 0..worker_count {
        let builder = thread::Builder::new().name(format!("trine-worker-{index}"));
        let handle = builder
            .spawn(move || {
                let engine = SearchEngine::new(comparison);
                engine.solve_partition(
                    n,
                    Some(RootPartition {
                        index,
                        count: worker_count,
                    }),
                )
            })
            .map_err(|source| SolverError::WorkerSpawn {
                worker: index,
                source,
            })?;
        handles.push(handle);
    }

    let mut solutions = Vec::new();
    let mut stats = SearchStats::default();
    let mut failures = Vec::new();
    for (index, handle) in handles.into_iter().enumerate() {
        match handle.join() {
            Ok(Ok((mut worker_solutions, worker_stats))) => {
                solutions.append(&mut worker_solutions);
                stats.merge(&worker_stats);
            }
            Ok(Err(error)) => {
                warn!(worker = index, %error, "worker failed");
                failures.push(WorkerFailure {
                    worker: index,
                    message: error.to_string(),
                });
            }
            Err(panic) => {
                let message = panic_message(panic);
                warn!(worker = index, panic = %message, "worker panicked");
                failures.push(WorkerFailure {
                    worker: index,
                    message,
                });
            }
        }
    }

    Ok(ParallelOutcome {
        solutions,
        stats,
        failures,
    })
}

fn panic_message(panic: Box<dyn std::any::Any + Send>) -> String {
    if let Some(message) = panic.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = panic.downcast_ref::<String>() {
        message.clone()
    } else {
        "worker panicked".to_string()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    use super::*;

    fn single_threaded(n: usize) -> Vec<Solution> {
        let (solutions, _) = SearchEngine::default().solve(n).unwrap();
        solutions
    }

    #[test]
    fn zero_workers_is_an_error() {
        assert!(solve_parallel(SlopeComparison::Exact, 4, 0).is_err());
    }

    #[test]
    fn one_worker_reproduces_the_single_threaded_ordering() {
        let outcome = solve_parallel(SlopeComparison::Exact, 6, 1).unwrap();
        assert!(outcome.failures.is_empty());
        assert_eq!(outcome.solutions, single_threaded(6));
    }

    #[test]
    fn the_empty_board_is_not_duplicated_across_workers() {
        let outcome = solve_parallel(SlopeComparison::Exact, 0, 4).unwrap();
        assert!(outcome.failures.is_empty());
        assert_eq!(outcome.solutions.len(), 1);
        assert!(outcome.solutions[0].is_empty());
    }

    #[test]
    fn more_workers_than_columns_is_fine() {
        let outcome = solve_parallel(SlopeComparison::Exact, 4, 16).unwrap();
        assert!(outcome.failures.is_empty());
        let combined: HashSet<_> = outcome.solutions.into_iter().collect();
        let expected: HashSet<_> = single_threaded(4).into_iter().collect();
        assert_eq!(combined, expected);
    }

    #[test]
    fn failed_workers_are_reported_instead_of_aborting_the_run() {
        // A NaN tolerance makes every worker's engine reject its own
        // configuration, so each partition fails independently.
        let outcome =
            solve_parallel(SlopeComparison::Approximate { epsilon: f64::NAN }, 4, 3).unwrap();
        assert!(outcome.solutions.is_empty());
        assert_eq!(outcome.failures.len(), 3);
        let workers: Vec<_> = outcome.failures.iter().map(|f| f.worker).collect();
        assert_eq!(workers, vec![0, 1, 2]);
        assert!(outcome
            .failures
            .iter()
            .all(|f| !f.message.is_empty()));
    }

    #[test]
    fn merged_stats_count_all_solutions() {
        let outcome = solve_parallel(SlopeComparison::Exact, 6, 3).unwrap();
        assert_eq!(outcome.stats.solutions_found, outcome.solutions.len() as u64);
    }

    #[test]
    fn repeated_runs_produce_identical_output() {
        let first = solve_parallel(SlopeComparison::Exact, 7, 4).unwrap();
        let second = solve_parallel(SlopeComparison::Exact, 7, 4).unwrap();
        assert_eq!(first.solutions, second.solutions);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(32))]

        // The parallel result equals the single-threaded result as a set,
        // for any worker count.
        #[test]
        fn parallel_equals_single_threaded(n in 0..=6usize, workers in 1..=6usize) {
            let outcome = solve_parallel(SlopeComparison::Exact, n, workers).unwrap();
            prop_assert!(outcome.failures.is_empty());
            let combined: HashSet<_> = outcome.solutions.into_iter().collect();
            let expected: HashSet<_> = single_threaded(n).into_iter().collect();
            prop_assert_eq!(combined, expected);
        }
    }
}
