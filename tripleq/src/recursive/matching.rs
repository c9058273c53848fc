//! Bijections between unordered collections.

use pathfinding::kuhn_munkres::{Weights, kuhn_munkres};

/// 0/1 weights of a square assignment problem. A cell is 1 when the pair matches.
struct MatchMatrix {
    data: Vec<Vec<i64>>,
    size: usize,
}

impl MatchMatrix {
    fn new<L, R>(lhs: &[L], rhs: &[R], mut matches: impl FnMut(&L, &R) -> bool) -> Self {
        let data = lhs
            .iter()
            .map(|l| rhs.iter().map(|r| i64::from(matches(l, r))).collect())
            .collect();
        Self {
            data,
            size: lhs.len(),
        }
    }
}

impl Weights<i64> for MatchMatrix {
    fn rows(&self) -> usize {
        self.size
    }

    fn columns(&self) -> usize {
        self.size
    }

    fn at(&self, row: usize, col: usize) -> i64 {
        self.data
            .get(row)
            .and_then(|r| r.get(col))
            .copied()
            .unwrap_or(0)
    }

    fn neg(&self) -> Self {
        let data = self
            .data
            .iter()
            .map(|row| row.iter().map(|&v| -v).collect())
            .collect();
        Self {
            data,
            size: self.size,
        }
    }
}

/// Returns true if every element on the left can be paired with a distinct matching element on
/// the right and no element is left over.
pub fn has_perfect_matching<L, R>(
    lhs: &[L],
    rhs: &[R],
    matches: impl FnMut(&L, &R) -> bool,
) -> bool {
    if lhs.len() != rhs.len() {
        return false;
    }
    if lhs.is_empty() {
        return true;
    }
    let matrix = MatchMatrix::new(lhs, rhs, matches);
    let (matched, _) = kuhn_munkres(&matrix);
    log::trace!("Matched {matched} out of {} elements", matrix.size);
    matched == matrix.size as i64
}
