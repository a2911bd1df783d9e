use std::collections::HashSet;

use crate::solver::solution::Solution;

/// The slope between two board squares, in lowest terms.
///
/// The row delta is kept strictly positive, so any two segments with the
/// same rational slope reduce to the same representative and plain `Eq`
/// comparison decides collinearity with no floating-point tolerance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Slope {
    dr: i64,
    dc: i64,
}

impl Slope {
    /// Computes the reduced slope between two queens given as `(row, col)`.
    ///
    /// The two rows must differ; the search places one queen per row, so
    /// this always holds for placed queens.
    pub fn between(a: (usize, usize), b: (usize, usize)) -> Self {
        debug_assert_ne!(a.0, b.0, "slopes are only defined across distinct rows");
        let (lo, hi) = if a.0 < b.0 { (a, b) } else { (b, a) };
        let dr = (hi.0 - lo.0) as i64;
        let dc = hi.1 as i64 - lo.1 as i64;
        let g = gcd(dr, dc.abs());
        Slope {
            dr: dr / g,
            dc: dc / g,
        }
    }
}

fn gcd(a: i64, b: i64) -> i64 {
    if b == 0 {
        a
    } else {
        gcd(b, a % b)
    }
}

/// The mutable state of one search path: a partial assignment of one column
/// per decided row, plus the derived state that makes the feasibility checks
/// cheap.
///
/// The state is owned exclusively by the search frame driving it and is
/// mutated in place: [`extend`](SearchState::extend) appends a row,
/// [`retract`](SearchState::retract) undoes the most recent append. Two
/// invariants are maintained across every such pair:
///
/// - `occupied[c]` is true iff column `c` appears in the assignment;
/// - `slopes[r]` is exactly the set of reduced slopes queen `r` forms with
///   every queen on a row below `r`.
#[derive(Debug, Clone)]
pub struct SearchState {
    n: usize,
    queens: Vec<usize>,
    occupied: Vec<bool>,
    slopes: Vec<HashSet<Slope>>,
}

impl SearchState {
    /// Creates an empty state for an `n` by `n` board.
    pub fn new(n: usize) -> Self {
        Self {
            n,
            queens: Vec::with_capacity(n),
            occupied: vec![false; n],
            slopes: Vec::with_capacity(n),
        }
    }

    /// The board size.
    pub fn size(&self) -> usize {
        self.n
    }

    /// The row the next queen would be placed on.
    pub fn next_row(&self) -> usize {
        self.queens.len()
    }

    /// True once every row holds a queen.
    pub fn is_complete(&self) -> bool {
        self.queens.len() == self.n
    }

    /// The columns of the queens placed so far, indexed by row.
    pub fn queens(&self) -> &[usize] {
        &self.queens
    }

    /// True if some placed queen already sits in `col`.
    pub fn column_occupied(&self, col: usize) -> bool {
        self.occupied[col]
    }

    /// The memoized slopes queen `row` forms with every earlier queen.
    pub fn slopes_through(&self, row: usize) -> &HashSet<Slope> {
        &self.slopes[row]
    }

    /// Places a queen in `col` on the next row.
    ///
    /// The caller is responsible for having checked feasibility first; this
    /// only updates the assignment and its derived state.
    pub fn extend(&mut self, col: usize) {
        debug_assert!(col < self.n);
        debug_assert!(!self.occupied[col]);
        let row = self.queens.len();
        let new_slopes = self
            .queens
            .iter()
            .enumerate()
            .map(|(prev, &prev_col)| Slope::between((prev, prev_col), (row, col)))
            .collect();
        self.queens.push(col);
        self.occupied[col] = true;
        self.slopes.push(new_slopes);
    }

    /// Removes the most recently placed queen.
    pub fn retract(&mut self) {
        let col = self
            .queens
            .pop()
            .expect("retract called on an empty assignment");
        self.occupied[col] = false;
        self.slopes.pop();
    }

    /// Deep-copies the current assignment into an immutable [`Solution`].
    ///
    /// Only meaningful once the state [`is_complete`](SearchState::is_complete);
    /// the snapshot lives independently of further mutation.
    pub fn snapshot(&self) -> Solution {
        Solution::new(self.queens.clone())
    }
}
