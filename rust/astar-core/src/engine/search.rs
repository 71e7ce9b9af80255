use std::collections::{HashMap, HashSet};
use std::hash::Hash;
use std::marker::PhantomData;

use serde::Serialize;
use tracing::{debug, trace};

use super::heuristics;
use super::queue::UpdatableQueue;
use crate::cost::Cost;
use crate::errors::{Result, SearchError};
use crate::path::{reconstruct, ParentMap};

/// The caller's domain: goal test, successor generation and cost estimate.
///
/// `neighbors` must be deterministic for a node within one search and yield
/// non-negative costs. `heuristic` must never overestimate the remaining cost
/// for the result to be optimal; nothing here checks that.
pub trait SearchSpace {
    type Node: Eq + Hash + Clone;
    type Cost: Cost;

    fn is_goal(&self, node: &Self::Node) -> bool;

    fn neighbors(&self, node: &Self::Node) -> impl IntoIterator<Item = (Self::Node, Self::Cost)>;

    fn heuristic(&self, _node: &Self::Node) -> Self::Cost {
        Self::Cost::ZERO
    }
}

/// Closure-backed [`SearchSpace`].
pub struct FnSpace<N, C, I, G, S, H> {
    is_goal: G,
    neighbors: S,
    heuristic: H,
    _marker: PhantomData<fn(&N) -> (C, I)>,
}

impl<N, C, I, G, S, H> FnSpace<N, C, I, G, S, H>
where
    G: Fn(&N) -> bool,
    S: Fn(&N) -> I,
    I: IntoIterator<Item = (N, C)>,
    H: Fn(&N) -> C,
{
    pub fn new(is_goal: G, neighbors: S, heuristic: H) -> Self {
        Self { is_goal, neighbors, heuristic, _marker: PhantomData }
    }
}

impl<N, C, I, G, S, H> SearchSpace for FnSpace<N, C, I, G, S, H>
where
    N: Eq + Hash + Clone,
    C: Cost,
    G: Fn(&N) -> bool,
    S: Fn(&N) -> I,
    I: IntoIterator<Item = (N, C)>,
    H: Fn(&N) -> C,
{
    type Node = N;
    type Cost = C;

    fn is_goal(&self, node: &N) -> bool {
        (self.is_goal)(node)
    }

    fn neighbors(&self, node: &N) -> impl IntoIterator<Item = (N, C)> {
        (self.neighbors)(node)
    }

    fn heuristic(&self, node: &N) -> C {
        (self.heuristic)(node)
    }
}

/// The goal entry as it left the queue.
#[derive(Clone, Debug, PartialEq)]
pub struct Found<N, C> {
    pub node: N,
    /// Queue priority at extraction: `g + h`.
    pub priority: C,
    /// Cost-so-far of `node` at extraction.
    pub cost: C,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Outcome<N, C> {
    Found(Found<N, C>),
    /// Every reachable node was expanded without meeting the goal test.
    NotFound,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct SearchStats {
    /// Nodes moved to the closed set.
    pub expanded: u64,
    /// First-time discoveries pushed to the queue.
    pub generated: u64,
    /// Cheaper paths that re-prioritized an open node.
    pub updated: u64,
    /// Successors ignored because they were already closed.
    pub skipped_closed: u64,
    /// Stale queue keys discarded during extraction.
    pub stale_purged: u64,
    pub peak_open: usize,
}

#[derive(Clone, Debug)]
pub struct SearchResult<N: Eq + Hash, C> {
    pub outcome: Outcome<N, C>,
    pub parents: ParentMap<N>,
    pub stats: SearchStats,
}

impl<N, C> SearchResult<N, C>
where
    N: Eq + Hash + Clone,
{
    pub fn is_found(&self) -> bool {
        matches!(self.outcome, Outcome::Found(_))
    }

    pub fn found(&self) -> Option<&Found<N, C>> {
        match &self.outcome {
            Outcome::Found(found) => Some(found),
            Outcome::NotFound => None,
        }
    }

    /// Start-to-goal route, or `None` when no goal was reached.
    pub fn path(&self) -> Result<Option<Vec<N>>> {
        self.found()
            .map(|found| reconstruct(&self.parents, &found.node))
            .transpose()
    }
}

/// A* over a [`SearchSpace`]. All search state lives inside one [`run`](AStar::run)
/// call, so a single `AStar` can serve any number of independent searches.
pub struct AStar<S: SearchSpace> {
    space: S,
}

impl<S: SearchSpace> AStar<S> {
    pub fn new(space: S) -> Self {
        Self { space }
    }

    /// Search from `start` until a goal node is extracted or the frontier is exhausted.
    ///
    /// Integer cost sums that overflow abort with [`SearchError::CostOverflow`].
    ///
    /// Closed nodes are never reopened, and the cost-so-far of a node is dropped
    /// once it closes. Both are sound only for an admissible heuristic with
    /// non-negative edge costs; with an inadmissible heuristic the result is a
    /// valid path that may not be the cheapest.
    pub fn run(&self, start: S::Node) -> Result<SearchResult<S::Node, S::Cost>> {
        let mut queue: UpdatableQueue<S::Node, S::Cost> = UpdatableQueue::new();
        let mut closed: HashSet<S::Node> = HashSet::new();
        let mut g_score: HashMap<S::Node, S::Cost> = HashMap::new();
        let mut parents = ParentMap::new();
        let mut stats = SearchStats::default();

        g_score.insert(start.clone(), S::Cost::ZERO);
        parents.insert_root(start.clone());
        queue.insert_or_update(self.space.heuristic(&start), start);
        stats.peak_open = 1;

        // Open set membership is the queue's liveness index.
        while !queue.is_empty() {
            let (priority, cur) = queue.extract_min()?;
            let cur_g = g_score
                .remove(&cur)
                .ok_or(SearchError::MissingCost)?;

            if self.space.is_goal(&cur) {
                stats.stale_purged = queue.stale_purged();
                debug!(cost=?cur_g, expanded = stats.expanded, generated = stats.generated, updated = stats.updated, stale_purged = stats.stale_purged, "search_found");
                let found = Found { node: cur, priority, cost: cur_g };
                return Ok(SearchResult { outcome: Outcome::Found(found), parents, stats });
            }

            trace!(priority=?priority, g=?cur_g, open = queue.len(), "expand");
            closed.insert(cur.clone());
            stats.expanded += 1;

            for (nbr, edge_cost) in self.space.neighbors(&cur) {
                debug_assert!(!edge_cost.is_negative(), "negative edge cost {edge_cost:?}");
                if closed.contains(&nbr) {
                    stats.skipped_closed += 1;
                    continue;
                }
                let tentative = cur_g.checked_add(edge_cost).ok_or(SearchError::CostOverflow)?;
                if !queue.contains(&nbr) {
                    let f = self.space.heuristic(&nbr).checked_add(tentative).ok_or(SearchError::CostOverflow)?;
                    g_score.insert(nbr.clone(), tentative);
                    parents.set_parent(nbr.clone(), cur.clone());
                    queue.insert_or_update(f, nbr);
                    stats.generated += 1;
                } else if g_score.get(&nbr).is_some_and(|&known| tentative < known) {
                    let f = self.space.heuristic(&nbr).checked_add(tentative).ok_or(SearchError::CostOverflow)?;
                    g_score.insert(nbr.clone(), tentative);
                    parents.set_parent(nbr.clone(), cur.clone());
                    queue.insert_or_update(f, nbr);
                    stats.updated += 1;
                }
            }
            stats.peak_open = stats.peak_open.max(queue.len());
        }

        stats.stale_purged = queue.stale_purged();
        debug!(expanded = stats.expanded, generated = stats.generated, reached = parents.len(), "search_exhausted");
        Ok(SearchResult { outcome: Outcome::NotFound, parents, stats })
    }
}

/// A* from `start` with closure callbacks.
pub fn search<N, C, I, G, S, H>(start: N, is_goal: G, neighbors: S, heuristic: H) -> Result<SearchResult<N, C>>
where
    N: Eq + Hash + Clone,
    C: Cost,
    G: Fn(&N) -> bool,
    S: Fn(&N) -> I,
    I: IntoIterator<Item = (N, C)>,
    H: Fn(&N) -> C,
{
    AStar::new(FnSpace::new(is_goal, neighbors, heuristic)).run(start)
}

/// [`search`] with the zero heuristic, i.e. Dijkstra's algorithm.
pub fn search_dijkstra<N, C, I, G, S>(start: N, is_goal: G, neighbors: S) -> Result<SearchResult<N, C>>
where
    N: Eq + Hash + Clone,
    C: Cost,
    G: Fn(&N) -> bool,
    S: Fn(&N) -> I,
    I: IntoIterator<Item = (N, C)>,
{
    search(start, is_goal, neighbors, heuristics::zero::<N, C>)
}
