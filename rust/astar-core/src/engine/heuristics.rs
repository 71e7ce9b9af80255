use std::collections::HashMap;
use std::hash::Hash;

use crate::cost::Cost;

/// The uninformed estimate. Searching with it is Dijkstra's algorithm.
pub fn zero<N, C: Cost>(_node: &N) -> C {
    C::ZERO
}

/// Precomputed per-node estimates. Nodes missing from the table estimate zero,
/// which keeps the heuristic admissible whenever the listed values are.
#[derive(Clone, Debug, Default)]
pub struct TableHeuristic<N, C> {
    estimates: HashMap<N, C>,
}

impl<N: Eq + Hash, C: Cost> TableHeuristic<N, C> {
    pub fn new(estimates: HashMap<N, C>) -> Self {
        Self { estimates }
    }

    pub fn estimate(&self, node: &N) -> C {
        self.estimates.get(node).copied().unwrap_or(C::ZERO)
    }
}

impl<N: Eq + Hash, C: Cost> FromIterator<(N, C)> for TableHeuristic<N, C> {
    fn from_iter<I: IntoIterator<Item = (N, C)>>(iter: I) -> Self {
        Self { estimates: iter.into_iter().collect() }
    }
}
