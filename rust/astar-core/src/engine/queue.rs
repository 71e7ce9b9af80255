use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap};
use std::hash::Hash;

use crate::cost::Cost;
use crate::errors::{Result, SearchError};

/// A min-priority queue keyed by node, with priority updates done by lazy deletion.
///
/// Every insert creates a fresh entry record. Updating a node clears the
/// `valid` flag on its previous record and drops it from the liveness index;
/// the stale heap key stays where it is and is discarded when it surfaces in
/// [`extract_min`](UpdatableQueue::extract_min).
///
/// Invariants:
/// - at most one live entry per node, and it is the one the index points at;
/// - `len()` counts live entries, `heap_len()` counts live and stale keys.
///
/// Equal priorities pop in insertion order.
#[derive(Debug)]
pub struct UpdatableQueue<N, C> {
    heap: BinaryHeap<HeapKey<C>>,
    entries: Vec<Option<QueueEntry<N, C>>>,
    free: Vec<usize>,
    index: HashMap<N, usize>,
    seq: u64,
    stale_purged: u64,
}

#[derive(Clone, Debug)]
struct QueueEntry<N, C> {
    priority: C,
    node: N,
    valid: bool,
}

#[derive(Clone, Copy, Debug)]
struct HeapKey<C> {
    priority: C,
    seq: u64,
    slot: usize,
}

impl<C: Cost> PartialEq for HeapKey<C> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}
impl<C: Cost> Eq for HeapKey<C> {}
impl<C: Cost> PartialOrd for HeapKey<C> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
impl<C: Cost> Ord for HeapKey<C> {
    fn cmp(&self, other: &Self) -> Ordering {
        // BinaryHeap is max-heap; invert for min-heap on (priority, seq)
        other
            .priority
            .cost_cmp(&self.priority)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl<N, C> UpdatableQueue<N, C>
where
    N: Eq + Hash + Clone,
    C: Cost,
{
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            heap: BinaryHeap::with_capacity(capacity),
            entries: Vec::with_capacity(capacity),
            free: Vec::new(),
            index: HashMap::with_capacity(capacity),
            seq: 0,
            stale_purged: 0,
        }
    }

    /// Insert `node` with `priority`, replacing any live entry it already has.
    ///
    /// Returns `true` when an older live entry was invalidated.
    pub fn insert_or_update(&mut self, priority: C, node: N) -> bool {
        let replaced = match self.index.remove(&node) {
            Some(old) => {
                if let Some(entry) = self.entries[old].as_mut() {
                    entry.valid = false;
                }
                true
            }
            None => false,
        };
        let slot = self.alloc(QueueEntry { priority, node: node.clone(), valid: true });
        self.index.insert(node, slot);
        self.heap.push(HeapKey { priority, seq: self.seq, slot });
        self.seq += 1;
        replaced
    }

    /// Pop the live entry with the smallest priority, purging stale keys on the way.
    pub fn extract_min(&mut self) -> Result<(C, N)> {
        while let Some(key) = self.heap.pop() {
            let entry = self.entries[key.slot].take();
            self.free.push(key.slot);
            match entry {
                Some(entry) if entry.valid => {
                    self.index.remove(&entry.node);
                    return Ok((entry.priority, entry.node));
                }
                _ => self.stale_purged += 1,
            }
        }
        Err(SearchError::EmptyQueue)
    }

    pub fn contains(&self, node: &N) -> bool {
        self.index.contains_key(node)
    }

    /// Priority of the live entry for `node`, if it has one.
    pub fn priority_of(&self, node: &N) -> Option<C> {
        let slot = *self.index.get(node)?;
        self.entries[slot].as_ref().map(|e| e.priority)
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Physical heap size, stale keys included.
    pub fn heap_len(&self) -> usize {
        self.heap.len()
    }

    pub fn stale_purged(&self) -> u64 {
        self.stale_purged
    }

    pub fn clear(&mut self) {
        self.heap.clear();
        self.entries.clear();
        self.free.clear();
        self.index.clear();
        self.seq = 0;
        self.stale_purged = 0;
    }

    // A slot is only recycled after its heap key was popped, so no live key aliases it.
    fn alloc(&mut self, entry: QueueEntry<N, C>) -> usize {
        match self.free.pop() {
            Some(slot) => {
                self.entries[slot] = Some(entry);
                slot
            }
            None => {
                self.entries.push(Some(entry));
                self.entries.len() - 1
            }
        }
    }
}

impl<N, C> Default for UpdatableQueue<N, C>
where
    N: Eq + Hash + Clone,
    C: Cost,
{
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pops_in_priority_order() {
        let mut q = UpdatableQueue::new();
        q.insert_or_update(5, "e");
        q.insert_or_update(1, "a");
        q.insert_or_update(3, "c");
        assert_eq!(q.extract_min(), Ok((1, "a")));
        assert_eq!(q.extract_min(), Ok((3, "c")));
        assert_eq!(q.extract_min(), Ok((5, "e")));
        assert_eq!(q.extract_min(), Err(SearchError::EmptyQueue));
    }

    #[test]
    fn update_lowers_priority_and_leaves_one_live_entry() {
        let mut q = UpdatableQueue::new();
        q.insert_or_update(10, 'x');
        q.insert_or_update(4, 'y');
        assert!(q.insert_or_update(2, 'x'));
        assert_eq!(q.len(), 2);
        assert_eq!(q.heap_len(), 3);
        assert_eq!(q.priority_of(&'x'), Some(2));

        assert_eq!(q.extract_min(), Ok((2, 'x')));
        assert_eq!(q.extract_min(), Ok((4, 'y')));
        // stale (10, 'x') is purged, never returned
        assert_eq!(q.extract_min(), Err(SearchError::EmptyQueue));
        assert_eq!(q.stale_purged(), 1);
    }

    #[test]
    fn update_to_higher_priority_replaces_the_old_one() {
        let mut q = UpdatableQueue::new();
        q.insert_or_update(1, 'x');
        q.insert_or_update(3, 'y');
        q.insert_or_update(7, 'x');
        assert_eq!(q.priority_of(&'x'), Some(7));
        assert_eq!(q.extract_min(), Ok((3, 'y')));
        assert_eq!(q.extract_min(), Ok((7, 'x')));
        assert!(q.is_empty());
    }

    #[test]
    fn equal_priorities_pop_fifo() {
        let mut q = UpdatableQueue::new();
        for n in ["first", "second", "third"] {
            q.insert_or_update(0u32, n);
        }
        assert_eq!(q.extract_min().unwrap().1, "first");
        assert_eq!(q.extract_min().unwrap().1, "second");
        assert_eq!(q.extract_min().unwrap().1, "third");
    }

    #[test]
    fn reinsert_after_extract_is_allowed() {
        let mut q = UpdatableQueue::new();
        q.insert_or_update(1.5f64, 7u32);
        assert_eq!(q.extract_min(), Ok((1.5, 7)));
        assert!(!q.contains(&7));
        assert!(!q.insert_or_update(0.5, 7));
        assert_eq!(q.extract_min(), Ok((0.5, 7)));
    }

    #[test]
    fn slots_are_recycled() {
        let mut q = UpdatableQueue::new();
        for round in 0..4 {
            q.insert_or_update(round, 'a');
            q.insert_or_update(round + 1, 'b');
            q.extract_min().unwrap();
            q.extract_min().unwrap();
        }
        assert!(q.entries.len() <= 2);
    }

    #[test]
    fn clear_resets_everything() {
        let mut q = UpdatableQueue::new();
        q.insert_or_update(2, 1);
        q.insert_or_update(1, 1);
        q.clear();
        assert!(q.is_empty());
        assert_eq!(q.heap_len(), 0);
        assert_eq!(q.extract_min(), Err(SearchError::EmptyQueue));
    }
}
