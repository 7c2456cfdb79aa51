//! Queue-like overflow buffer: the oldest buffered value pops first.

use std::collections::VecDeque;
use std::fmt;
use std::hash::Hash;

use super::{Buffer, Multiplicity};

/// Fixed-capacity FIFO buffer.
///
/// A push at capacity evicts the front (oldest) value before appending, the
/// same overwrite rule as [`LifoBuffer`](super::LifoBuffer). Pops drain from
/// the front, so a robin backed by this buffer promotes values in the order
/// they overflowed.
///
/// A capacity of 0 yields a buffer that discards every push.
pub struct FifoBuffer<T> {
    queue: VecDeque<T>,
    cap: usize,
    counts: Multiplicity<T>,
}

impl<T: Eq + Hash + Clone> FifoBuffer<T> {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            queue: VecDeque::with_capacity(capacity),
            cap: capacity,
            counts: Multiplicity::with_capacity(capacity),
        }
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.cap
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        self.queue.len() == self.cap
    }
}

impl<T: Eq + Hash + Clone> Buffer<T> for FifoBuffer<T> {
    fn push(&mut self, value: T) {
        if self.cap == 0 {
            return;
        }
        if self.is_full() {
            if let Some(evicted) = self.queue.pop_front() {
                self.counts.dec(&evicted);
            }
        }
        self.counts.inc(&value);
        self.queue.push_back(value);
    }

    fn pop(&mut self) -> Option<T> {
        let value = self.queue.pop_front()?;
        self.counts.dec(&value);
        Some(value)
    }

    #[inline]
    fn contains(&self, value: &T) -> bool {
        self.counts.contains(value)
    }

    #[inline]
    fn len(&self) -> usize {
        self.queue.len()
    }

    fn reset(&mut self) {
        self.queue.clear();
        self.counts.clear();
    }
}

impl<T: fmt::Debug> fmt::Debug for FifoBuffer<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FifoBuffer")
            .field("capacity", &self.cap)
            .field("len", &self.queue.len())
            .finish()
    }
}
