use std::collections::HashMap;

use prettytable::{Cell, Row, Table};

use crate::csp::{ConstraintId, Csp};

/// Propagation work attributed to a single constraint.
#[derive(Debug, Default, Clone, Copy)]
pub struct PerConstraintStats {
    /// How many times the constraint was taken off the propagation queue.
    pub checks: u64,
    /// Total number of values pruned on its behalf.
    pub prunings: u64,
    pub time_spent_micros: u64,
}

/// Counters accumulated over one search (or over all attempts, for a
/// restarting strategy).
#[derive(Debug, Default, Clone)]
pub struct SearchStats {
    pub nodes_visited: u64,
    pub backtracks: u64,
    pub constraint_stats: HashMap<ConstraintId, PerConstraintStats>,
}

impl SearchStats {
    /// Folds another run's counters into this one.
    pub fn merge(&mut self, other: &SearchStats) {
        self.nodes_visited += other.nodes_visited;
        self.backtracks += other.backtracks;
        for (id, stats) in &other.constraint_stats {
            let entry = self.constraint_stats.entry(*id).or_default();
            entry.checks += stats.checks;
            entry.prunings += stats.prunings;
            entry.time_spent_micros += stats.time_spent_micros;
        }
    }
}

/// Renders the per-constraint counters as a table, slowest constraints last.
pub fn render_stats_table(stats: &SearchStats, csp: &Csp) -> String {
    let mut table = Table::new();
    table.add_row(Row::new(vec![
        Cell::new("Constraint"),
        Cell::new("ID"),
        Cell::new("Arity"),
        Cell::new("Tuples"),
        Cell::new("Checks"),
        Cell::new("Prunings"),
        Cell::new("Time / Check (µs)"),
        Cell::new("Total Time (ms)"),
    ]));

    let mut sorted_stats: Vec<(&ConstraintId, &PerConstraintStats)> =
        stats.constraint_stats.iter().collect();
    sorted_stats.sort_by_key(|(id, stats)| (stats.time_spent_micros, **id));

    for (constraint_id, constraint_stats) in sorted_stats {
        let constraint = csp.constraint(*constraint_id);
        let avg_time = if constraint_stats.checks > 0 {
            constraint_stats.time_spent_micros as f64 / constraint_stats.checks as f64
        } else {
            0.0
        };

        table.add_row(Row::new(vec![
            Cell::new(constraint.name()),
            Cell::new(&constraint_id.to_string()),
            Cell::new(&constraint.arity().to_string()),
            Cell::new(&constraint.num_satisfying_tuples().to_string()),
            Cell::new(&constraint_stats.checks.to_string()),
            Cell::new(&constraint_stats.prunings.to_string()),
            Cell::new(&format!("{:.2}", avg_time)),
            Cell::new(&format!(
                "{:.2}",
                constraint_stats.time_spent_micros as f64 / 1000.0
            )),
        ]));
    }

    table.to_string()
}
