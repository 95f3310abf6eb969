//! A minimal min-priority queue keyed by squared distances.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use crate::r#type::CoordFloat;

/// A min-priority queue over real-valued priorities.
///
/// Built on [`BinaryHeap`] with the comparison reversed, the same shape as a
/// best-first neighbor search over `Reverse`-wrapped heap entries. Priorities
/// are squared distances and must not be NaN; entries of equal priority pop
/// in unspecified order.
pub struct PriorityQueue<N: CoordFloat, T> {
    heap: BinaryHeap<Entry<N, T>>,
}

impl<N: CoordFloat, T> PriorityQueue<N, T> {
    /// Create an empty queue.
    pub fn new() -> Self {
        Self {
            heap: BinaryHeap::new(),
        }
    }

    /// Insert a value with the given priority.
    pub fn push(&mut self, priority: N, value: T) {
        debug_assert!(!priority.is_nan(), "priority must not be NaN");
        self.heap.push(Entry { priority, value });
    }

    /// Remove and return the value with the minimum priority, or `None` if
    /// the queue is empty.
    pub fn pop(&mut self) -> Option<T> {
        self.heap.pop().map(|entry| entry.value)
    }

    /// The minimum priority without removing its value, or `None` if the
    /// queue is empty.
    pub fn peek_priority(&self) -> Option<N> {
        self.heap.peek().map(|entry| entry.priority)
    }

    /// The number of queued values.
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    /// Test if the queue holds no values.
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }
}

impl<N: CoordFloat, T> Default for PriorityQueue<N, T> {
    fn default() -> Self {
        Self::new()
    }
}

struct Entry<N, T> {
    priority: N,
    value: T,
}

impl<N: PartialOrd, T> PartialEq for Entry<N, T> {
    fn eq(&self, other: &Self) -> bool {
        self.priority == other.priority
    }
}

impl<N: PartialOrd, T> Eq for Entry<N, T> {}

impl<N: PartialOrd, T> PartialOrd for Entry<N, T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<N: PartialOrd, T> Ord for Entry<N, T> {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed so the max-heap pops the minimum priority first. NaN
        // priorities are excluded on push.
        other
            .priority
            .partial_cmp(&self.priority)
            .unwrap_or(Ordering::Equal)
    }
}
