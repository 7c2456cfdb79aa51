//! Stack-like overflow buffer with wraparound overwrite.
//!
//! # Invariants
//! - `pos < capacity` (or `pos == 0` when capacity is 0).
//! - `len <= capacity`, where `len` is the multiplicity total.
//! - Live values occupy the `len` slots immediately before `pos` (wrapping);
//!   every other slot is `None`.
//!
//! Pops return values in reverse push order. A push at capacity overwrites the
//! slot at `pos`, which holds the oldest live value, so the stack silently
//! forgets its bottom.

use std::fmt;
use std::hash::Hash;

use super::{Buffer, Multiplicity};

/// Fixed-capacity LIFO buffer.
///
/// All operations are O(1). Membership is tracked with a multiplicity map, so
/// duplicates are allowed; a [`Robin`](crate::Robin) only ever pushes values
/// the buffer does not already hold.
///
/// A capacity of 0 yields a buffer that discards every push.
///
/// # Example
///
/// ```
/// use robin_rs::{Buffer, LifoBuffer};
///
/// let mut buf = LifoBuffer::with_capacity(2);
/// buf.push(1);
/// buf.push(2);
/// buf.push(3); // overwrites 1
///
/// assert!(!buf.contains(&1));
/// assert_eq!(buf.pop(), Some(3));
/// assert_eq!(buf.pop(), Some(2));
/// assert_eq!(buf.pop(), None);
/// ```
pub struct LifoBuffer<T> {
    slots: Vec<Option<T>>,
    /// Write cursor: next push lands here, next pop reads the slot before it.
    pos: usize,
    counts: Multiplicity<T>,
}

impl<T: Eq + Hash + Clone> LifoBuffer<T> {
    pub fn with_capacity(capacity: usize) -> Self {
        let mut slots = Vec::with_capacity(capacity);
        slots.resize_with(capacity, || None);
        Self {
            slots,
            pos: 0,
            counts: Multiplicity::with_capacity(capacity),
        }
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        self.counts.total() == self.capacity()
    }
}

impl<T: Eq + Hash + Clone> Buffer<T> for LifoBuffer<T> {
    fn push(&mut self, value: T) {
        let cap = self.capacity();
        if cap == 0 {
            return;
        }

        if let Some(evicted) = self.slots[self.pos].take() {
            debug_assert!(self.is_full(), "occupied write slot on a non-full buffer");
            self.counts.dec(&evicted);
        }

        self.counts.inc(&value);
        self.slots[self.pos] = Some(value);
        self.pos = (self.pos + 1) % cap;

        debug_assert!(self.counts.total() <= cap);
    }

    fn pop(&mut self) -> Option<T> {
        if self.counts.total() == 0 {
            return None;
        }

        let cap = self.capacity();
        self.pos = (self.pos + cap - 1) % cap;
        let value = self.slots[self.pos].take();
        debug_assert!(value.is_some(), "live slot must be occupied");
        if let Some(v) = &value {
            self.counts.dec(v);
        }
        value
    }

    #[inline]
    fn contains(&self, value: &T) -> bool {
        self.counts.contains(value)
    }

    #[inline]
    fn len(&self) -> usize {
        self.counts.total()
    }

    /// Clears only the live slots before `pos`, so the cost is O(len) rather
    /// than O(capacity). The allocation is kept.
    fn reset(&mut self) {
        let cap = self.capacity();
        for back in 1..=self.counts.total() {
            self.slots[(self.pos + cap - back) % cap] = None;
        }
        self.pos = 0;
        self.counts.clear();
    }
}

impl<T: fmt::Debug> fmt::Debug for LifoBuffer<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LifoBuffer")
            .field("capacity", &self.slots.len())
            .field("len", &self.counts.total)
            .finish()
    }
}

#[cfg(test)]
impl<T: Eq + Hash + Clone> LifoBuffer<T> {
    pub(crate) fn debug_validate(&self) {
        let cap = self.capacity();
        let len = self.counts.total();
        assert!(len <= cap, "len exceeds capacity");
        assert_eq!(self.counts.count_sum(), len, "count sum must equal len");
        if cap == 0 {
            return;
        }
        assert!(self.pos < cap, "pos out of bounds");

        for back in 0..cap {
            let slot = (self.pos + cap - 1 - back) % cap;
            let occupied = self.slots[slot].is_some();
            assert_eq!(occupied, back < len, "slot {slot} occupancy mismatch");
        }
    }
}
