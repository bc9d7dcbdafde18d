//! Array-backed indexed binary min-heap
//!
//! A binary min-heap over `(item, priority)` entries plus an auxiliary hash
//! index from each item to the slot it currently occupies. The index is what
//! makes [`contains`](MinPriorityQueue::contains) O(1) and lets
//! [`change_priority`](MinPriorityQueue::change_priority) find the entry to
//! repair without scanning the array.
//!
//! # Time Complexity
//!
//! | Operation         | Complexity             |
//! |-------------------|------------------------|
//! | `insert`          | O(log n) amortized     |
//! | `extract_min`     | O(log n) amortized     |
//! | `peek_min`        | O(1)                   |
//! | `contains`        | O(1) expected          |
//! | `change_priority` | O(log n)               |
//!
//! The amortized bounds come from growing and shrinking the index table.
//!
//! # Example
//!
//! ```rust
//! use rust_astar_search::MinPriorityQueue;
//! use rust_astar_search::heap::ArrayHeapMinPq;
//!
//! let mut pq = ArrayHeapMinPq::new();
//! pq.insert('a', 3).unwrap();
//! pq.insert('b', 1).unwrap();
//! pq.insert('c', 2).unwrap();
//!
//! assert!(pq.contains(&'c'));
//! assert_eq!(pq.extract_min(), Ok('b'));
//! assert_eq!(pq.extract_min(), Ok('c'));
//! assert_eq!(pq.extract_min(), Ok('a'));
//! assert!(pq.is_empty());
//! ```

use std::hash::Hash;

use rustc_hash::FxHashMap;

use crate::error::QueueError;
use crate::traits::MinPriorityQueue;

/// Capacity below which the index table is never shrunk.
const MIN_INDEX_CAPACITY: usize = 16;

/// A slot of the heap array.
#[derive(Debug, Clone)]
struct Entry<T, P> {
    item: T,
    priority: P,
}

/// An indexed min-heap. The smallest `priority` is at the root.
///
/// Invariants, restored after every public operation:
/// - for every slot `k > 0`, `nodes[(k - 1) / 2].priority <= nodes[k].priority`
/// - `index[nodes[k].item] == k` for every slot, and `index` has no other keys
///
/// Slot `k` here is slot `k + 1` of the textbook 1-indexed layout, so the
/// parent `(k - 1) / 2` is the usual `j / 2` with `j = k + 1`.
#[derive(Debug, Clone)]
pub struct ArrayHeapMinPq<T, P> {
    /// The heap storage, root at slot 0
    nodes: Vec<Entry<T, P>>,
    /// Maps items -> slot in `nodes`
    index: FxHashMap<T, usize>,
}

impl<T, P> ArrayHeapMinPq<T, P>
where
    T: Eq + Hash + Clone,
    P: Ord,
{
    /// Creates an empty queue with room for `capacity` items.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: Vec::with_capacity(capacity),
            index: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
        }
    }

    /// Checks the heap property and the consistency of the item index.
    #[doc(hidden)]
    pub fn verify_heap_property(&self) -> bool {
        if self.index.len() != self.nodes.len() {
            return false;
        }
        let ordered = (1..self.nodes.len())
            .all(|k| self.nodes[Self::parent(k)].priority <= self.nodes[k].priority);
        let indexed = self
            .nodes
            .iter()
            .enumerate()
            .all(|(k, entry)| self.index.get(&entry.item) == Some(&k));
        ordered && indexed
    }

    #[inline]
    fn parent(k: usize) -> usize {
        (k - 1) / 2
    }

    /// Swaps two slots and records their new positions in the index.
    fn swap(&mut self, a: usize, b: usize) {
        self.nodes.swap(a, b);
        self.reindex(a);
        self.reindex(b);
    }

    fn reindex(&mut self, k: usize) {
        if let Some(slot) = self.index.get_mut(&self.nodes[k].item) {
            *slot = k;
        }
    }

    /// Move the entry at `k` up while it is smaller than its parent (swim)
    fn sift_up(&mut self, mut k: usize) {
        while k > 0 {
            let parent = Self::parent(k);
            if self.nodes[k].priority < self.nodes[parent].priority {
                self.swap(k, parent);
                k = parent;
            } else {
                break;
            }
        }
    }

    /// Move the entry at `k` down while a child is smaller (sink)
    ///
    /// The right child is only chosen when it is strictly smaller than the
    /// left, so ties go to the left child.
    fn sift_down(&mut self, mut k: usize) {
        let len = self.nodes.len();
        loop {
            let left = 2 * k + 1;
            if left >= len {
                break;
            }
            let right = left + 1;
            let mut child = left;
            if right < len && self.nodes[right].priority < self.nodes[left].priority {
                child = right;
            }
            if self.nodes[k].priority <= self.nodes[child].priority {
                break;
            }
            self.swap(k, child);
            k = child;
        }
    }

    /// Shrinks the index table once it is mostly empty.
    fn maybe_shrink_index(&mut self) {
        let capacity = self.index.capacity();
        if capacity > MIN_INDEX_CAPACITY && self.index.len() * 4 < capacity {
            let target = (self.index.len() * 2).max(MIN_INDEX_CAPACITY);
            self.index.shrink_to(target);
            self.nodes.shrink_to(target);
        }
    }
}

impl<T, P> MinPriorityQueue<T, P> for ArrayHeapMinPq<T, P>
where
    T: Eq + Hash + Clone,
    P: Ord,
{
    fn new() -> Self {
        Self {
            nodes: Vec::new(),
            index: FxHashMap::default(),
        }
    }

    fn len(&self) -> usize {
        self.nodes.len()
    }

    fn contains(&self, item: &T) -> bool {
        self.index.contains_key(item)
    }

    fn insert(&mut self, item: T, priority: P) -> Result<(), QueueError> {
        if self.index.contains_key(&item) {
            return Err(QueueError::DuplicateItem);
        }
        let k = self.nodes.len();
        self.index.insert(item.clone(), k);
        self.nodes.push(Entry { item, priority });
        self.sift_up(k);
        Ok(())
    }

    fn peek_min(&self) -> Result<&T, QueueError> {
        self.nodes
            .first()
            .map(|entry| &entry.item)
            .ok_or(QueueError::EmptyQueue)
    }

    fn extract_min(&mut self) -> Result<T, QueueError> {
        if self.nodes.is_empty() {
            return Err(QueueError::EmptyQueue);
        }
        let last = self.nodes.len() - 1;
        self.swap(0, last);
        let min = self.nodes.pop().ok_or(QueueError::EmptyQueue)?;
        self.index.remove(&min.item);

        if !self.nodes.is_empty() {
            self.sift_down(0);
        }
        self.maybe_shrink_index();

        Ok(min.item)
    }

    fn change_priority(&mut self, item: &T, priority: P) -> Result<(), QueueError> {
        let &k = self.index.get(item).ok_or(QueueError::ItemNotFound)?;
        self.nodes[k].priority = priority;
        // Only one of these moves the entry.
        self.sift_down(k);
        let k = self.index.get(item).copied().unwrap_or(k);
        self.sift_up(k);
        Ok(())
    }

    fn priority_of(&self, item: &T) -> Option<&P> {
        self.index.get(item).map(|&k| &self.nodes[k].priority)
    }
}

impl<T, P> Default for ArrayHeapMinPq<T, P>
where
    T: Eq + Hash + Clone,
    P: Ord,
{
    fn default() -> Self {
        Self::new()
    }
}
