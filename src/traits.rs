//! Common traits for priority queues and edge costs
//!
//! - [`MinPriorityQueue`]: an *extrinsic* min-priority queue, where the
//!   priority is stored next to the item instead of being derived from it,
//!   and where an item already in the queue can have its priority changed.
//! - [`Cost`]: the numeric type used for edge weights, distances and
//!   heuristic estimates.
//!
//! Items are identified by value, so every item may be present at most once.
//! This is what lets the solver say "lower the priority of vertex `v`"
//! without holding a handle.

use std::hash::Hash;
use std::ops::Add;

use crate::error::QueueError;

/// Trait for types that can be used as costs in pathfinding algorithms.
///
/// This requires the type to be orderable, copyable, and support addition.
/// `Default` must be the additive zero. Use
/// [`OrderedFloat<f64>`](ordered_float::OrderedFloat) for real-valued weights.
pub trait Cost: Ord + Copy + Add<Output = Self> + Default {}

impl<T> Cost for T where T: Ord + Copy + Add<Output = Self> + Default {}

/// Min-priority queue keyed by item value
///
/// # Example
///
/// ```rust
/// use rust_astar_search::MinPriorityQueue;
/// use rust_astar_search::heap::ArrayHeapMinPq;
///
/// let mut pq = ArrayHeapMinPq::new();
/// pq.insert("three", 3).unwrap();
/// pq.insert("one", 1).unwrap();
/// pq.change_priority(&"three", 0).unwrap();
///
/// assert_eq!(pq.peek_min(), Ok(&"three"));
/// assert_eq!(pq.extract_min(), Ok("three"));
/// assert_eq!(pq.len(), 1);
/// ```
pub trait MinPriorityQueue<T: Eq + Hash, P: Ord> {
    /// Creates a new empty queue
    fn new() -> Self;

    /// Returns the number of items in the queue
    fn len(&self) -> usize;

    /// Returns true if the queue is empty
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns true if `item` is currently queued
    fn contains(&self, item: &T) -> bool;

    /// Adds `item` with the given priority
    ///
    /// # Errors
    /// Returns [`QueueError::DuplicateItem`] if the item is already queued.
    fn insert(&mut self, item: T, priority: P) -> Result<(), QueueError>;

    /// Returns the item with the smallest priority without removing it
    ///
    /// # Errors
    /// Returns [`QueueError::EmptyQueue`] if there is nothing to peek at.
    fn peek_min(&self) -> Result<&T, QueueError>;

    /// Removes and returns the item with the smallest priority
    ///
    /// When several items share the smallest priority, any one of them may
    /// be returned.
    ///
    /// # Errors
    /// Returns [`QueueError::EmptyQueue`] if the queue is empty.
    fn extract_min(&mut self) -> Result<T, QueueError>;

    /// Replaces the priority of a queued item, raising or lowering it
    ///
    /// # Errors
    /// Returns [`QueueError::ItemNotFound`] if the item is not queued.
    fn change_priority(&mut self, item: &T, priority: P) -> Result<(), QueueError>;

    /// Returns the stored priority of `item`, if it is queued
    fn priority_of(&self, item: &T) -> Option<&P>;
}
