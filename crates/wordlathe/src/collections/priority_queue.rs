//! # Bounded Priority Queue
//!
//! A binary heap ordered by a "beats" comparator rather than [`Ord`],
//! so float-keyed entries (BPE merge scores) can be ordered directly.

use core::fmt::Debug;

/// A binary heap over a `(a, b) -> bool` "a beats b" comparator.
///
/// The winning element is at the top. With a `max_size`, a full queue
/// accepts a new value only if it beats the element in the slot at
/// ``2^floor(log2(len)) - 1``, which it replaces.
pub struct PriorityQueue<V, F>
where
    F: Fn(&V, &V) -> bool,
{
    heap: Vec<V>,
    comparator: F,
    max_size: Option<usize>,
}

impl<V: Debug, F> Debug for PriorityQueue<V, F>
where
    F: Fn(&V, &V) -> bool,
{
    fn fmt(
        &self,
        f: &mut core::fmt::Formatter<'_>,
    ) -> core::fmt::Result {
        f.debug_struct("PriorityQueue")
            .field("len", &self.heap.len())
            .field("max_size", &self.max_size)
            .finish()
    }
}

impl<V, F> PriorityQueue<V, F>
where
    F: Fn(&V, &V) -> bool,
{
    /// Create an unbounded queue.
    pub fn new(comparator: F) -> Self {
        Self {
            heap: Vec::new(),
            comparator,
            max_size: None,
        }
    }

    /// Create a queue holding at most `max_size` values.
    pub fn with_max_size(
        comparator: F,
        max_size: usize,
    ) -> Self {
        Self {
            heap: Vec::new(),
            comparator,
            max_size: Some(max_size),
        }
    }

    /// The number of queued values.
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    /// Is the queue empty?
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// The winning value, if any.
    pub fn peek(&self) -> Option<&V> {
        self.heap.first()
    }

    /// Push a value; returns the new length.
    pub fn push(
        &mut self,
        value: V,
    ) -> usize {
        let full = self.max_size.is_some_and(|max| self.heap.len() >= max);
        if !full {
            self.heap.push(value);
            self.sift_up_from(self.heap.len() - 1);
        } else if !self.heap.is_empty() {
            let smallest = self.smallest();
            if (self.comparator)(&value, &self.heap[smallest]) {
                self.heap[smallest] = value;
                self.sift_up_from(smallest);
            }
        }
        self.heap.len()
    }

    /// Push every value; returns the new length.
    pub fn extend<I>(
        &mut self,
        values: I,
    ) -> usize
    where
        I: IntoIterator<Item = V>,
    {
        for value in values {
            self.push(value);
        }
        self.heap.len()
    }

    /// Remove and return the winning value.
    pub fn pop(&mut self) -> Option<V> {
        if self.heap.is_empty() {
            return None;
        }
        let bottom = self.heap.len() - 1;
        if bottom > 0 {
            self.heap.swap(0, bottom);
        }
        let value = self.heap.pop();
        self.sift_down();
        value
    }

    /// Drop every queued value.
    pub fn clear(&mut self) {
        self.heap.clear();
    }

    fn beats(
        &self,
        i: usize,
        j: usize,
    ) -> bool {
        (self.comparator)(&self.heap[i], &self.heap[j])
    }

    fn sift_up_from(
        &mut self,
        mut node: usize,
    ) {
        while node > 0 {
            let parent = ((node + 1) >> 1) - 1;
            if !self.beats(node, parent) {
                break;
            }
            self.heap.swap(node, parent);
            node = parent;
        }
    }

    fn sift_down(&mut self) {
        let size = self.heap.len();
        let mut node = 0;
        loop {
            let left = (node << 1) + 1;
            let right = (node + 1) << 1;
            let left_wins = left < size && self.beats(left, node);
            let right_wins = right < size && self.beats(right, node);
            if !left_wins && !right_wins {
                break;
            }
            let child = if right < size && self.beats(right, left) {
                right
            } else {
                left
            };
            self.heap.swap(node, child);
            node = child;
        }
    }

    /// The first slot of the deepest complete level.
    fn smallest(&self) -> usize {
        let size = self.heap.len();
        (1usize << size.ilog2()) - 1
    }
}
