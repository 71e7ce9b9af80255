use std::collections::{HashMap, HashSet};
use std::hash::Hash;

use crate::errors::{Result, SearchError};

/// Predecessor links recorded by a search. The root maps to `None`.
///
/// Links only ever get added or overwritten, never removed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParentMap<N: Eq + Hash> {
    links: HashMap<N, Option<N>>,
}

impl<N: Eq + Hash + Clone> ParentMap<N> {
    pub fn new() -> Self {
        Self { links: HashMap::new() }
    }

    pub fn insert_root(&mut self, root: N) {
        self.links.insert(root, None);
    }

    pub fn set_parent(&mut self, node: N, parent: N) {
        self.links.insert(node, Some(parent));
    }

    /// `Some(None)` for the root, `None` for a node never reached.
    pub fn parent_of(&self, node: &N) -> Option<Option<&N>> {
        self.links.get(node).map(Option::as_ref)
    }

    pub fn contains(&self, node: &N) -> bool {
        self.links.contains_key(node)
    }

    pub fn len(&self) -> usize {
        self.links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }
}

impl<N: Eq + Hash + Clone> Default for ParentMap<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<N: Eq + Hash> FromIterator<(N, Option<N>)> for ParentMap<N> {
    fn from_iter<I: IntoIterator<Item = (N, Option<N>)>>(iter: I) -> Self {
        Self { links: iter.into_iter().collect() }
    }
}

/// Route from the root of `parents` to `end`, both inclusive.
///
/// A node the map never saw yields `[end]`. A revisited node or a link to a
/// node without its own entry means the map is corrupt and is an error.
pub fn reconstruct<N>(parents: &ParentMap<N>, end: &N) -> Result<Vec<N>>
where
    N: Eq + Hash + Clone,
{
    let mut path = vec![end.clone()];
    let Some(mut link) = parents.parent_of(end) else {
        return Ok(path);
    };
    let mut seen: HashSet<&N> = HashSet::new();
    seen.insert(end);
    while let Some(prev) = link {
        if !seen.insert(prev) {
            return Err(SearchError::CyclicParentMap);
        }
        path.push(prev.clone());
        link = parents
            .parent_of(prev)
            .ok_or(SearchError::DanglingParent)?;
    }
    path.reverse();
    Ok(path)
}
