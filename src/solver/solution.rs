use std::fmt;

use serde::Serialize;

/// A complete, feasible placement: one column index per row.
///
/// Solutions are immutable once recorded by the search. They compare and
/// hash by their column sequence, which is what the set-equality tests and
/// the duplicate checks rely on.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Solution(Vec<usize>);

impl Solution {
    pub(crate) fn new(columns: Vec<usize>) -> Self {
        Self(columns)
    }

    /// The column of the queen on each row, in row order.
    pub fn columns(&self) -> &[usize] {
        &self.0
    }

    /// The board size this solution was found on.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Re-verifies the placement from scratch: distinct columns, no two
    /// queens on a common diagonal, and no three queens on a common line of
    /// any slope (checked by exact integer cross-multiplication over every
    /// triple of rows).
    ///
    /// Deliberately independent of the search-time memoization, so tests can
    /// use it to validate the search itself.
    pub fn satisfies_all_rules(&self) -> bool {
        let q = &self.0;
        for i in 0..q.len() {
            for j in (i + 1)..q.len() {
                if q[i] == q[j] {
                    return false;
                }
                if j - i == q[i].abs_diff(q[j]) {
                    return false;
                }
                for k in (j + 1)..q.len() {
                    let lhs = (q[j] as i64 - q[i] as i64) * (k as i64 - i as i64);
                    let rhs = (q[k] as i64 - q[i] as i64) * (j as i64 - i as i64);
                    if lhs == rhs {
                        return false;
                    }
                }
            }
        }
        true
    }

    /// Renders the placement as an N-by-N grid, one row per line, `*` for a
    /// queen, cells comma-separated and each line delimited by `|`.
    pub fn render_board(&self) -> String {
        let n = self.0.len();
        let mut out = String::new();
        for &col in &self.0 {
            out.push('|');
            for cell in 0..n {
                if cell > 0 {
                    out.push(',');
                }
                out.push(if cell == col { '*' } else { ' ' });
            }
            out.push_str("|\n");
        }
        out
    }
}

impl fmt::Display for Solution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, col) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{col}")?;
        }
        write!(f, "]")
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn verification_accepts_a_known_good_placement() {
        assert!(Solution::new(vec![1, 3, 0, 2]).satisfies_all_rules());
        assert!(Solution::new(vec![2, 5, 7, 1, 3, 0, 6, 4]).satisfies_all_rules());
    }

    #[test]
    fn verification_rejects_column_conflicts() {
        assert!(!Solution::new(vec![1, 3, 1, 2]).satisfies_all_rules());
    }

    #[test]
    fn verification_rejects_diagonal_conflicts() {
        assert!(!Solution::new(vec![0, 2, 1, 3]).satisfies_all_rules());
    }

    #[test]
    fn verification_rejects_any_angle_collinearity() {
        // (0,0), (1,2), (2,4) lie on a slope-2 line but attack no one
        // classically.
        assert!(!Solution::new(vec![0, 2, 4]).satisfies_all_rules());
    }

    #[test]
    fn empty_and_singleton_placements_are_valid() {
        assert!(Solution::new(vec![]).satisfies_all_rules());
        assert!(Solution::new(vec![0]).satisfies_all_rules());
    }

    #[test]
    fn board_rendering_matches_the_reference_format() {
        let solution = Solution::new(vec![1, 3, 0, 2]);
        let expected = "\
| ,*, , |\n\
| , , ,*|\n\
|*, , , |\n\
| , ,*, |\n";
        assert_eq!(solution.render_board(), expected);
    }

    #[test]
    fn display_is_a_bracketed_column_list() {
        assert_eq!(Solution::new(vec![2, 0, 3, 1]).to_string(), "[2, 0, 3, 1]");
        assert_eq!(Solution::new(vec![]).to_string(), "[]");
    }
}
