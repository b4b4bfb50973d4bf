//! Command-line Futoshiki solver.
//!
//! Reads a board in the JSON wire format (rows of `2n - 1` slots
//! alternating cell values and `"<"`/`">"`/`"."` markers), builds the
//! chosen CSP encoding, searches it, and prints the solved grid.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use futoshiki_csp::{
    board::{Board, Slot},
    model::{binary::build_binary_model, nary::build_nary_model},
    solver::{
        heuristics::{restart::BacktrackLimitRestart, variable::RandomVariableHeuristic},
        propagate::{ArcConsistency, AssignmentChecking, ForwardChecking, Propagator},
        solution::Solution,
        stats::render_stats_table,
        strategy::{BacktrackingSearch, RestartingSearch, SearchStrategy},
    },
};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Model {
    /// Pairwise not-equal constraints per row and column.
    Binary,
    /// One all-different constraint per row and column.
    Nary,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Propagation {
    /// Plain backtracking: check fully assigned constraints only.
    Assign,
    /// Forward checking.
    Fc,
    /// Generalized arc consistency.
    Gac,
}

#[derive(Debug, Parser)]
#[command(about = "Solve a Futoshiki board given in the JSON wire format")]
struct Args {
    /// Path to the board JSON file.
    board: PathBuf,

    #[arg(long, value_enum, default_value_t = Model::Binary)]
    model: Model,

    #[arg(long, value_enum, default_value_t = Propagation::Gac)]
    propagation: Propagation,

    /// Restart with a seeded random variable order after this many
    /// backtracks (at most 10 attempts).
    #[arg(long)]
    restart_after: Option<u64>,

    /// Seed for the random variable order used with --restart-after.
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Print per-constraint search statistics.
    #[arg(long)]
    stats: bool,
}

fn print_grid(board: &Board, grid: &[Vec<i64>]) {
    use futoshiki_csp::board::Ordering;

    let n = board.n();
    let mut markers = vec![vec![' '; n.saturating_sub(1)]; n];
    for inequality in board.inequalities() {
        markers[inequality.row][inequality.left] = match inequality.ordering {
            Ordering::Less => '<',
            Ordering::Greater => '>',
        };
    }

    for (row, values) in grid.iter().enumerate() {
        let mut line = String::new();
        for (col, value) in values.iter().enumerate() {
            line.push_str(&value.to_string());
            if col + 1 < n {
                line.push(' ');
                line.push(markers[row][col]);
                line.push(' ');
            }
        }
        println!("{line}");
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = Args::parse();

    let raw = std::fs::read_to_string(&args.board)
        .unwrap_or_else(|e| panic!("cannot read {}: {e}", args.board.display()));
    let rows: Vec<Vec<Slot>> =
        serde_json::from_str(&raw).expect("board is not valid wire-format JSON");
    let board = Board::parse(&rows).unwrap_or_else(|e| panic!("malformed board: {e}"));

    let built = match args.model {
        Model::Binary => build_binary_model(&rows),
        Model::Nary => build_nary_model(&rows),
    };
    let (csp, grid) = built.unwrap_or_else(|e| panic!("model construction failed: {e}"));
    println!(
        "{}: {} variables, {} constraints",
        csp.name(),
        csp.variables().len(),
        csp.constraints().len()
    );

    let propagator: Box<dyn Propagator> = match args.propagation {
        Propagation::Assign => Box::new(AssignmentChecking),
        Propagation::Fc => Box::new(ForwardChecking),
        Propagation::Gac => Box::new(ArcConsistency),
    };
    let solver: Box<dyn SearchStrategy> = match args.restart_after {
        None => Box::new(BacktrackingSearch::with_defaults(propagator)),
        Some(max_backtracks) => Box::new(RestartingSearch::new(
            Box::new(BacktrackingSearch::new(
                propagator,
                Box::new(RandomVariableHeuristic::seeded(args.seed)),
                Box::new(futoshiki_csp::solver::heuristics::value::IdentityValueHeuristic),
            )),
            Box::new(BacktrackLimitRestart {
                max_backtracks,
                max_attempts: 10,
            }),
        )),
    };

    let (solution, stats) = solver
        .solve(&csp, Solution::initial(&csp))
        .expect("search failed");

    match solution {
        Some(solution) => {
            let solved = grid.to_grid(&solution).expect("complete solution");
            println!("\nSolved:");
            print_grid(&board, &solved);
        }
        None => println!("\nNo solution exists."),
    }
    println!(
        "\n{} nodes visited, {} backtracks",
        stats.nodes_visited, stats.backtracks
    );
    if args.stats {
        println!("{}", render_stats_table(&stats, &csp));
    }
}
