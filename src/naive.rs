//! Linear-scan priority queue
//!
//! Keeps entries in insertion order and scans for the minimum. Every
//! operation except `insert` is O(n). It exists as a reference the indexed
//! heap can be checked against, not for use in searches.

use std::hash::Hash;

use crate::error::QueueError;
use crate::traits::MinPriorityQueue;

/// Unordered list of `(item, priority)` pairs
#[derive(Debug, Clone)]
pub struct NaiveMinPq<T, P> {
    entries: Vec<(T, P)>,
}

impl<T: Eq, P: Ord> NaiveMinPq<T, P> {
    fn position(&self, item: &T) -> Option<usize> {
        self.entries.iter().position(|(t, _)| t == item)
    }

    fn min_position(&self) -> Option<usize> {
        self.entries
            .iter()
            .enumerate()
            .min_by(|(_, a), (_, b)| a.1.cmp(&b.1))
            .map(|(i, _)| i)
    }
}

impl<T: Eq + Hash, P: Ord> MinPriorityQueue<T, P> for NaiveMinPq<T, P> {
    fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    fn len(&self) -> usize {
        self.entries.len()
    }

    fn contains(&self, item: &T) -> bool {
        self.position(item).is_some()
    }

    fn insert(&mut self, item: T, priority: P) -> Result<(), QueueError> {
        if self.contains(&item) {
            return Err(QueueError::DuplicateItem);
        }
        self.entries.push((item, priority));
        Ok(())
    }

    fn peek_min(&self) -> Result<&T, QueueError> {
        self.min_position()
            .map(|i| &self.entries[i].0)
            .ok_or(QueueError::EmptyQueue)
    }

    fn extract_min(&mut self) -> Result<T, QueueError> {
        let i = self.min_position().ok_or(QueueError::EmptyQueue)?;
        Ok(self.entries.swap_remove(i).0)
    }

    fn change_priority(&mut self, item: &T, priority: P) -> Result<(), QueueError> {
        let i = self.position(item).ok_or(QueueError::ItemNotFound)?;
        self.entries[i].1 = priority;
        Ok(())
    }

    fn priority_of(&self, item: &T) -> Option<&P> {
        self.position(item).map(|i| &self.entries[i].1)
    }
}

impl<T: Eq + Hash, P: Ord> Default for NaiveMinPq<T, P> {
    fn default() -> Self {
        Self::new()
    }
}
