use std::collections::HashMap;

use prettytable::{Cell, Row, Table};
use serde::Serialize;

use crate::solver::rule::PlacementRule;

pub type RuleId = usize;

#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct PerRuleStats {
    /// Candidate placements this rule was asked about.
    pub checks: u64,
    /// Candidates this rule vetoed.
    pub rejections: u64,
}

/// Counters collected while searching. Cheap to merge, so each parallel
/// worker keeps its own and the pool folds them together afterwards.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SearchStats {
    pub nodes_visited: u64,
    pub solutions_found: u64,
    pub rule_stats: HashMap<RuleId, PerRuleStats>,
}

impl SearchStats {
    pub fn record_check(&mut self, rule: RuleId) {
        self.rule_stats.entry(rule).or_default().checks += 1;
    }

    pub fn record_rejection(&mut self, rule: RuleId) {
        self.rule_stats.entry(rule).or_default().rejections += 1;
    }

    /// Folds another worker's counters into this one.
    pub fn merge(&mut self, other: &SearchStats) {
        self.nodes_visited += other.nodes_visited;
        self.solutions_found += other.solutions_found;
        for (&rule, stats) in &other.rule_stats {
            let entry = self.rule_stats.entry(rule).or_default();
            entry.checks += stats.checks;
            entry.rejections += stats.rejections;
        }
    }
}

pub fn render_stats_table(stats: &SearchStats, rules: &[Box<dyn PlacementRule>]) -> String {
    let mut table = Table::new();
    table.add_row(Row::new(vec![
        Cell::new("Rule"),
        Cell::new("ID"),
        Cell::new("Description"),
        Cell::new("Checks"),
        Cell::new("Rejections"),
        Cell::new("Rejection %"),
    ]));

    let mut sorted_stats: Vec<(&RuleId, &PerRuleStats)> = stats.rule_stats.iter().collect();
    sorted_stats.sort_by_key(|(rule_id, _)| **rule_id);

    for (rule_id, rule_stats) in sorted_stats {
        let descriptor = rules[*rule_id].descriptor();
        let rejection_rate = if rule_stats.checks > 0 {
            100.0 * rule_stats.rejections as f64 / rule_stats.checks as f64
        } else {
            0.0
        };

        table.add_row(Row::new(vec![
            Cell::new(&descriptor.name),
            Cell::new(&rule_id.to_string()),
            Cell::new(&descriptor.description),
            Cell::new(&rule_stats.checks.to_string()),
            Cell::new(&rule_stats.rejections.to_string()),
            Cell::new(&format!("{rejection_rate:.1}")),
        ]));
    }

    table.to_string()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn merge_sums_every_counter() {
        let mut a = SearchStats {
            nodes_visited: 10,
            solutions_found: 1,
            ..Default::default()
        };
        a.record_check(0);
        a.record_rejection(0);

        let mut b = SearchStats {
            nodes_visited: 5,
            solutions_found: 2,
            ..Default::default()
        };
        b.record_check(0);
        b.record_check(1);

        a.merge(&b);
        assert_eq!(a.nodes_visited, 15);
        assert_eq!(a.solutions_found, 3);
        assert_eq!(a.rule_stats[&0].checks, 2);
        assert_eq!(a.rule_stats[&0].rejections, 1);
        assert_eq!(a.rule_stats[&1].checks, 1);
    }
}
