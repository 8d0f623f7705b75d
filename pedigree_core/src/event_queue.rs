//! Min-ordered priority queue for scheduled items.
//!
//! Items are ordered by their scheduling time only. Items sharing an exact
//! time come out in insertion order, which keeps a seeded run reproducible.
//! Nothing in the queue is ever mutated after insertion.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

/// Anything that can be placed on an [`EventQueue`].
pub trait Scheduled {
    /// The ordering key. Must be finite.
    fn time(&self) -> f64;
}

/// Heap slot carrying the key captured at insertion.
struct Slot<T> {
    time: f64,
    seq: u64,
    item: T,
}

impl<T> PartialEq for Slot<T> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<T> Eq for Slot<T> {}

impl<T> PartialOrd for Slot<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Ord for Slot<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        // BinaryHeap is a max-heap, so the earliest slot must compare greatest
        other
            .time
            .total_cmp(&self.time)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

/// Binary min-heap keyed by [`Scheduled::time`].
///
/// `insert` and `extract_min` are O(log n); `peek_min` is O(1).
pub struct EventQueue<T> {
    heap: BinaryHeap<Slot<T>>,
    next_seq: u64,
}

impl<T: Scheduled> EventQueue<T> {
    /// Creates an empty queue.
    pub fn new() -> Self {
        Self {
            heap: BinaryHeap::new(),
            next_seq: 0,
        }
    }

    /// Creates an empty queue with room for `capacity` items.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            heap: BinaryHeap::with_capacity(capacity),
            next_seq: 0,
        }
    }

    /// Adds an item.
    pub fn insert(&mut self, item: T) {
        let slot = Slot {
            time: item.time(),
            seq: self.next_seq,
            item,
        };
        self.next_seq += 1;
        self.heap.push(slot);
    }

    /// Removes and returns the item with the smallest time.
    pub fn extract_min(&mut self) -> Option<T> {
        self.heap.pop().map(|slot| slot.item)
    }

    /// Returns the item with the smallest time without removing it.
    pub fn peek_min(&self) -> Option<&T> {
        self.heap.peek().map(|slot| &slot.item)
    }

    /// Number of queued items.
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    /// Returns true if nothing is queued.
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Drops every queued item.
    pub fn clear(&mut self) {
        self.heap.clear();
    }
}

impl<T: Scheduled> Default for EventQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Scheduled> Extend<T> for EventQueue<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for item in iter {
            self.insert(item);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[derive(Debug, Clone, Copy, PartialEq)]
    struct Tick {
        at: f64,
        tag: u32,
    }

    impl Scheduled for Tick {
        fn time(&self) -> f64 {
            self.at
        }
    }

    fn tick(at: f64, tag: u32) -> Tick {
        Tick { at, tag }
    }

    #[test]
    fn test_extract_in_time_order() {
        let mut queue = EventQueue::new();
        queue.extend([tick(3.0, 0), tick(1.0, 1), tick(2.0, 2), tick(0.5, 3)]);

        let order: Vec<f64> = std::iter::from_fn(|| queue.extract_min())
            .map(|t| t.at)
            .collect();
        assert_eq!(order, vec![0.5, 1.0, 2.0, 3.0]);
        assert!(queue.is_empty());
    }

    #[test]
    fn test_equal_times_are_fifo() {
        let mut queue = EventQueue::new();
        for tag in 0..5 {
            queue.insert(tick(7.0, tag));
        }
        queue.insert(tick(1.0, 99));

        assert_eq!(queue.extract_min().unwrap().tag, 99);
        let tags: Vec<u32> = std::iter::from_fn(|| queue.extract_min())
            .map(|t| t.tag)
            .collect();
        assert_eq!(tags, vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn test_peek_does_not_remove() {
        let mut queue = EventQueue::with_capacity(4);
        assert!(queue.peek_min().is_none());

        queue.insert(tick(4.0, 0));
        queue.insert(tick(2.0, 1));

        assert_eq!(queue.peek_min().map(|t| t.tag), Some(1));
        assert_eq!(queue.len(), 2);
        assert_eq!(queue.extract_min().map(|t| t.tag), Some(1));
        assert_eq!(queue.len(), 1);
    }

    #[test]
    fn test_extract_from_empty() {
        let mut queue: EventQueue<Tick> = EventQueue::default();
        assert!(queue.extract_min().is_none());
        assert_eq!(queue.len(), 0);
    }

    #[test]
    fn test_clear() {
        let mut queue = EventQueue::new();
        queue.extend((0..10).map(|i| tick(i as f64, i)));
        queue.clear();
        assert!(queue.is_empty());
    }

    proptest! {
        /// Each extraction returns the minimum of what is currently queued.
        #[test]
        fn prop_extract_matches_sorted_model(
            ops in prop::collection::vec(prop::option::of(0.0f64..1_000.0), 0..300)
        ) {
            let mut queue = EventQueue::new();
            let mut model: Vec<f64> = Vec::new();

            for (i, op) in ops.into_iter().enumerate() {
                match op {
                    Some(at) => {
                        queue.insert(tick(at, i as u32));
                        model.push(at);
                    }
                    None => {
                        model.sort_by(|a, b| b.total_cmp(a));
                        let expected = model.pop();
                        prop_assert_eq!(queue.extract_min().map(|t| t.at), expected);
                    }
                }
                prop_assert_eq!(queue.len(), model.len());
            }
        }

        /// Scheduling relative to the last extracted time, as the engine
        /// does, yields a non-decreasing extraction sequence.
        #[test]
        fn prop_relative_scheduling_is_monotone(
            ops in prop::collection::vec(prop::option::of(0.0f64..50.0), 0..300)
        ) {
            let mut queue = EventQueue::new();
            let mut now = 0.0;
            let mut last = f64::NEG_INFINITY;

            for (i, op) in ops.into_iter().enumerate() {
                match op {
                    Some(delay) => queue.insert(tick(now + delay, i as u32)),
                    None => {
                        if let Some(t) = queue.extract_min() {
                            prop_assert!(t.at >= last);
                            last = t.at;
                            now = t.at;
                        }
                    }
                }
            }
        }
    }
}
