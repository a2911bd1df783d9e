use std::process::ExitCode;
use std::time::Instant;

use clap::Parser;
use tracing::error;
use tracing_subscriber::EnvFilter;

use trine::solver::{
    pool::{default_worker_count, solve_parallel},
    rules::collinear::{SlopeComparison, LEGACY_EPSILON},
    solution::Solution,
};

const SOLUTION_PRINT_LIMIT: usize = 10;
const EXAMPLE_SOLUTION: usize = 1;

#[derive(Parser, Debug)]
#[command(
    name = "trine",
    about = "Enumerates N-queens placements where no three queens are collinear at any angle."
)]
struct Args {
    /// Board size.
    n: usize,

    /// Number of worker threads. Defaults to the available parallelism.
    #[arg(short, long)]
    workers: Option<usize>,

    /// Use the legacy floating-point slope comparison instead of exact
    /// integer arithmetic.
    #[arg(long)]
    float_slopes: bool,

    /// Tolerance for the legacy comparison. Implies --float-slopes.
    #[arg(long, value_name = "EPS")]
    epsilon: Option<f64>,

    /// Emit the solutions as JSON instead of the text report.
    #[arg(long)]
    json: bool,

    /// Print per-rule search statistics.
    #[arg(long)]
    stats: bool,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let comparison = if args.float_slopes || args.epsilon.is_some() {
        SlopeComparison::Approximate {
            epsilon: args.epsilon.unwrap_or(LEGACY_EPSILON),
        }
    } else {
        SlopeComparison::Exact
    };
    let workers = args.workers.unwrap_or_else(default_worker_count);

    let start = Instant::now();
    let outcome = match solve_parallel(comparison, args.n, workers) {
        Ok(outcome) => outcome,
        Err(err) => {
            error!("{err}");
            return ExitCode::FAILURE;
        }
    };
    let elapsed = start.elapsed();

    for failure in &outcome.failures {
        error!(worker = failure.worker, "worker failed: {}", failure.message);
    }

    if args.json {
        match serde_json::to_string_pretty(&outcome.solutions) {
            Ok(json) => println!("{json}"),
            Err(err) => {
                error!("{err}");
                return ExitCode::FAILURE;
            }
        }
    } else {
        print_report(args.n, &outcome.solutions);
    }

    if args.stats {
        let engine = trine::solver::engine::SearchEngine::new(comparison);
        println!(
            "{}",
            trine::solver::stats::render_stats_table(&outcome.stats, engine.rules())
        );
    }

    println!(
        "Runtime (seconds): {} by {} threads",
        elapsed.as_secs_f64(),
        workers
    );

    if outcome.failures.is_empty() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

fn print_report(n: usize, solutions: &[Solution]) {
    let shown = solutions.len().min(SOLUTION_PRINT_LIMIT);
    println!("N={n}. There are {} solutions.", solutions.len());
    println!("The first {shown} solutions are:");
    for solution in &solutions[..shown] {
        println!("  {solution}");
    }

    if solutions.len() > EXAMPLE_SOLUTION {
        let example = &solutions[EXAMPLE_SOLUTION];
        println!("Solution(#{EXAMPLE_SOLUTION}): {example}");
        print!("{}", example.render_board());
    }
}
