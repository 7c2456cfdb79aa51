//! Overflow buffers that back a bounded [`Robin`](crate::Robin).
//!
//! A bounded robin that is full pushes new values into its buffer instead of
//! dropping them, and pops from the buffer to refill the slot of a removed
//! value. The robin only relies on the [`Buffer`] contract; the pop order is a
//! property of the implementation:
//!
//! - [`LifoBuffer`]: most recently pushed value pops first.
//! - [`FifoBuffer`]: oldest value pops first.
//!
//! Both are fixed-capacity and overwrite the oldest value when a push arrives
//! at capacity.

mod fifo;
mod lifo;

pub use fifo::FifoBuffer;
pub use lifo::LifoBuffer;

/// Fixed-capacity store consulted by a bounded robin.
///
/// Implementations must keep every operation total: `push` always accepts the
/// value (evicting per the implementation's policy), and "empty" is reported
/// through `pop` returning `None`.
pub trait Buffer<T> {
    /// Stores `value`, evicting the oldest buffered value if at capacity.
    fn push(&mut self, value: T);

    /// Removes and returns one value, or `None` when the buffer is empty.
    fn pop(&mut self) -> Option<T>;

    /// Returns true if at least one copy of `value` is buffered.
    fn contains(&self, value: &T) -> bool;

    /// Number of buffered values, duplicates included.
    fn len(&self) -> usize;

    /// Drops every buffered value. Capacity is unchanged.
    fn reset(&mut self);

    #[inline]
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<T, B: Buffer<T> + ?Sized> Buffer<T> for Box<B> {
    #[inline]
    fn push(&mut self, value: T) {
        (**self).push(value)
    }

    #[inline]
    fn pop(&mut self) -> Option<T> {
        (**self).pop()
    }

    #[inline]
    fn contains(&self, value: &T) -> bool {
        (**self).contains(value)
    }

    #[inline]
    fn len(&self) -> usize {
        (**self).len()
    }

    #[inline]
    fn reset(&mut self) {
        (**self).reset()
    }
}

/// Occurrence counts shared by the buffer implementations.
///
/// Buffers accept duplicates, so membership is tracked as a multiplicity map
/// rather than a set. Invariant: the sum of all counts equals `total`.
#[derive(Debug)]
pub(crate) struct Multiplicity<T> {
    counts: ahash::AHashMap<T, u32>,
    total: usize,
}

impl<T: Eq + std::hash::Hash + Clone> Multiplicity<T> {
    pub(crate) fn with_capacity(cap: usize) -> Self {
        Self {
            counts: ahash::AHashMap::with_capacity(cap),
            total: 0,
        }
    }

    #[inline]
    pub(crate) fn inc(&mut self, value: &T) {
        self.total += 1;
        if let Some(count) = self.counts.get_mut(value) {
            *count += 1;
        } else {
            self.counts.insert(value.clone(), 1);
        }
    }

    #[inline]
    pub(crate) fn dec(&mut self, value: &T) {
        debug_assert!(self.total > 0, "multiplicity underflow");
        self.total -= 1;
        if let Some(count) = self.counts.get_mut(value) {
            *count -= 1;
            if *count == 0 {
                self.counts.remove(value);
            }
        }
    }

    #[inline]
    pub(crate) fn contains(&self, value: &T) -> bool {
        self.counts.contains_key(value)
    }

    #[inline]
    pub(crate) fn total(&self) -> usize {
        self.total
    }

    pub(crate) fn clear(&mut self) {
        self.counts.clear();
        self.total = 0;
    }

    #[cfg(test)]
    pub(crate) fn count_sum(&self) -> usize {
        self.counts.values().map(|&c| c as usize).sum()
    }
}
