//! Round-robin rotation over unique values.
//!
//! The ring is a circular doubly-linked list stored in an index arena
//! (`prev`/`next` are `u32` slot indices, `NONE_U32` is the empty sentinel).
//! A hash map from value to slot gives O(1) membership and removal; the ring
//! gives O(1) rotation. Freed slots are chained through `next` into an
//! intrusive free list and reused by later adds.
//!
//! ```text
//!   add(d, e) with cursor at A:
//!
//!     before:  ... -> C -> [A] -> B -> C -> ...
//!     after:   ... -> C -> [D] -> E -> A -> B -> C -> ...
//!
//!   The new chain is spliced in front of the cursor and the cursor moves to
//!   its head, so the first added value is the next one returned.
//! ```
//!
//! # Invariants
//! - `index` and the ring hold exactly the same values, one node per value.
//! - If `cursor != NONE_U32`, following `next` from `cursor` visits every live
//!   node exactly once before returning to `cursor`; `prev` mirrors `next`.
//! - If `cursor == NONE_U32`, the ring and `index` are empty.
//! - Bounded (`max_len > 0`): `index.len() <= max_len`.
//! - A buffer is only ever attached to a bounded robin.
//! - Free slots hold `None` and are reachable from `free_head` exactly once.
//!
//! # Threading
//! Not synchronized. Callers sharing a robin across threads must serialize
//! access themselves (for example behind a `Mutex`).

use std::borrow::Borrow;
use std::fmt;
use std::hash::Hash;

use ahash::AHashMap;

use crate::buffer::{Buffer, LifoBuffer};
#[cfg(feature = "stats")]
use crate::stats::{sat_add_u64, RobinStats};

const NONE_U32: u32 = u32::MAX;

/// Upper bound on the up-front arena/index reservation. `max_len` is a
/// ceiling, not a reservation; larger robins grow on demand.
const PREALLOC_MAX: usize = 1024;

/// Round-robin structure over unique values of `T`.
///
/// A robin is either unbounded ([`Robin::unbounded`]) or bounded by a maximum
/// length ([`Robin::bounded`]). A bounded robin may own a [`Buffer`]
/// ([`Robin::bounded_with_buffer`]): values added while the robin is full go to
/// the buffer, and a removed value is replaced in place by a value popped from
/// it.
///
/// `add`, `remove` and `next` are O(1) per value. Lookups go through a hash map,
/// so a `T` with an expensive or degenerate `Hash` degrades every operation to
/// the map's cost.
///
/// No operation fails: duplicates, absent values and overflow without a buffer
/// are absorbed silently, and emptiness is reported as `None`.
///
/// # Example
///
/// ```
/// use robin_rs::Robin;
///
/// let mut robin = Robin::unbounded();
/// robin.add(["a", "b", "c"]);
/// assert_eq!(robin.next(), Some("a"));
/// assert_eq!(robin.next(), Some("b"));
///
/// robin.add(["d"]);
/// assert_eq!(robin.next(), Some("d"));
/// assert_eq!(robin.next(), Some("c"));
///
/// robin.remove(&["a"]);
/// assert_eq!(robin.next(), Some("b"));
/// ```
///
/// # Panics
///
/// Adding a value when `u32::MAX - 1` nodes are already live panics.
pub struct Robin<T, B = LifoBuffer<T>> {
    // Node arena (SoA). Slot `i` is live iff `values[i].is_some()`.
    values: Vec<Option<T>>,
    prev: Vec<u32>,
    next: Vec<u32>,
    free_head: u32,

    index: AHashMap<T, u32>,
    cursor: u32,

    max_len: usize,
    buffer: Option<B>,

    #[cfg(feature = "stats")]
    stats: RobinStats,
}

impl<T: Eq + Hash + Clone> Robin<T, LifoBuffer<T>> {
    /// Creates a robin that grows without limit.
    pub fn unbounded() -> Self {
        Self::from_parts(0, None)
    }

    /// Creates a robin holding at most `max_len` values, without a buffer.
    ///
    /// Once full, further adds are ignored until a value is removed. A
    /// `max_len` of 0 yields an unbounded robin.
    pub fn bounded(max_len: usize) -> Self {
        Self::from_parts(max_len, None)
    }
}

impl<T: Eq + Hash + Clone, B: Buffer<T>> Robin<T, B> {
    /// Creates a robin holding at most `max_len` values, backed by `buffer`.
    ///
    /// A `max_len` of 0 yields an unbounded robin and `buffer` is dropped.
    pub fn bounded_with_buffer(max_len: usize, buffer: B) -> Self {
        if max_len == 0 {
            return Self::from_parts(0, None);
        }
        Self::from_parts(max_len, Some(buffer))
    }

    pub(crate) fn from_parts(max_len: usize, buffer: Option<B>) -> Self {
        let buffer = if max_len == 0 { None } else { buffer };
        let hint = max_len.min(PREALLOC_MAX);
        Self {
            values: Vec::with_capacity(hint),
            prev: Vec::with_capacity(hint),
            next: Vec::with_capacity(hint),
            free_head: NONE_U32,
            index: AHashMap::with_capacity(hint),
            cursor: NONE_U32,
            max_len,
            buffer,
            #[cfg(feature = "stats")]
            stats: RobinStats::default(),
        }
    }

    #[inline]
    fn is_full(&self) -> bool {
        self.max_len > 0 && self.index.len() == self.max_len
    }

    /// Adds `values` in front of the current position.
    ///
    /// The next call to [`next`](Self::next) returns the first value that was
    /// actually added by this call. Values already in the robin, and repeats
    /// within `values`, are ignored.
    ///
    /// When a bounded robin fills up, the remaining values are pushed to the
    /// buffer (skipping those it already holds). Without a buffer the rest of
    /// `values` is not consumed.
    pub fn add<I: IntoIterator<Item = T>>(&mut self, values: I) {
        if self.is_full() && self.buffer.is_none() {
            #[cfg(feature = "stats")]
            sat_add_u64(&mut self.stats.full_stops, 1);
            return;
        }

        let mut head = NONE_U32;
        let mut tail = NONE_U32;

        for value in values {
            if self.index.contains_key(&value) {
                #[cfg(feature = "stats")]
                sat_add_u64(&mut self.stats.duplicates, 1);
                continue;
            }

            if self.is_full() {
                let Some(buffer) = self.buffer.as_mut() else {
                    #[cfg(feature = "stats")]
                    sat_add_u64(&mut self.stats.full_stops, 1);
                    break;
                };
                if !buffer.contains(&value) {
                    buffer.push(value);
                    #[cfg(feature = "stats")]
                    sat_add_u64(&mut self.stats.buffered, 1);
                }
                continue;
            }

            let idx = self.alloc_node(value.clone());
            self.index.insert(value, idx);
            #[cfg(feature = "stats")]
            sat_add_u64(&mut self.stats.added, 1);

            if head == NONE_U32 {
                head = idx;
            } else {
                self.next[tail as usize] = idx;
                self.prev[idx as usize] = tail;
            }
            tail = idx;
        }

        self.attach(head, tail);

        debug_assert!(self.max_len == 0 || self.index.len() <= self.max_len);
    }

    /// Removes `values` from the robin. Values not in the robin, including
    /// values that only sit in the buffer, are ignored.
    ///
    /// With a non-empty buffer, each removed value is replaced in place by a
    /// popped buffer value: the ring keeps its shape and the cursor stays put.
    /// Otherwise the node is unlinked and, if it was under the cursor, the
    /// cursor moves to its successor.
    pub fn remove<'a, Q, I>(&mut self, values: I)
    where
        I: IntoIterator<Item = &'a Q>,
        T: Borrow<Q>,
        Q: Hash + Eq + ?Sized + 'a,
    {
        for value in values {
            let Some(idx) = self.index.remove(value) else {
                continue;
            };
            if self.replace_value(idx) {
                #[cfg(feature = "stats")]
                sat_add_u64(&mut self.stats.replaced, 1);
            } else {
                self.unlink(idx);
                #[cfg(feature = "stats")]
                sat_add_u64(&mut self.stats.unlinked, 1);
            }
        }
    }

    /// Returns the value under the cursor and advances the cursor, or `None`
    /// when the robin is empty.
    // Not an `Iterator`: rotation never ends and interleaves with mutation.
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> Option<T> {
        if self.cursor == NONE_U32 {
            return None;
        }
        let idx = self.cursor as usize;
        self.cursor = self.next[idx];
        #[cfg(feature = "stats")]
        sat_add_u64(&mut self.stats.rotations, 1);
        self.values[idx].clone()
    }

    /// Returns true if `value` is in the buffer. False without a buffer.
    #[inline]
    pub fn buffer_contains(&self, value: &T) -> bool {
        self.buffer.as_ref().is_some_and(|b| b.contains(value))
    }

    /// Number of buffered values. 0 without a buffer.
    #[inline]
    pub fn buffer_len(&self) -> usize {
        self.buffer.as_ref().map_or(0, |b| b.len())
    }

    /// Removes every value from the robin and its buffer.
    ///
    /// Boundedness, `max_len` and the attached buffer are kept, as is the
    /// arena allocation.
    pub fn reset(&mut self) {
        self.values.clear();
        self.prev.clear();
        self.next.clear();
        self.free_head = NONE_U32;
        self.index.clear();
        self.cursor = NONE_U32;
        if let Some(buffer) = self.buffer.as_mut() {
            buffer.reset();
        }
    }

    /// Takes a slot from the free list, or grows the arena.
    fn alloc_node(&mut self, value: T) -> u32 {
        let idx = self.free_head;
        if idx != NONE_U32 {
            let i = idx as usize;
            debug_assert!(self.values[i].is_none(), "free slot holds a value");
            self.free_head = self.next[i];
            self.values[i] = Some(value);
            self.prev[i] = NONE_U32;
            self.next[i] = NONE_U32;
            return idx;
        }

        assert!(
            self.values.len() < NONE_U32 as usize,
            "robin node arena exhausted"
        );
        let idx = self.values.len() as u32;
        self.values.push(Some(value));
        self.prev.push(NONE_U32);
        self.next.push(NONE_U32);
        idx
    }

    #[inline]
    fn free_node(&mut self, idx: u32) {
        let i = idx as usize;
        self.values[i] = None;
        self.prev[i] = NONE_U32;
        self.next[i] = self.free_head;
        self.free_head = idx;
    }

    /// Splices the chain `head..=tail` in front of the cursor and moves the
    /// cursor to `head`. An empty ring becomes the chain closed on itself.
    fn attach(&mut self, head: u32, tail: u32) {
        if head == NONE_U32 {
            return;
        }
        let (h, t) = (head as usize, tail as usize);

        if self.cursor == NONE_U32 {
            self.prev[h] = tail;
            self.next[t] = head;
            self.cursor = head;
            return;
        }

        let next = self.cursor;
        let prev = self.prev[next as usize];
        self.prev[h] = prev;
        self.next[t] = next;
        self.next[prev as usize] = head;
        self.prev[next as usize] = tail;
        self.cursor = head;
    }

    /// Unlinks a node whose value has already left the index.
    fn unlink(&mut self, idx: u32) {
        let i = idx as usize;
        let next = self.next[i];

        if next == idx {
            // Last node.
            self.cursor = NONE_U32;
        } else {
            let prev = self.prev[i];
            self.next[prev as usize] = next;
            self.prev[next as usize] = prev;
            if self.cursor == idx {
                self.cursor = next;
            }
        }

        self.free_node(idx);
    }

    /// Refills slot `idx` from the buffer. Returns false if nothing usable was
    /// buffered, in which case the caller must unlink the node.
    fn replace_value(&mut self, idx: u32) -> bool {
        let Some(buffer) = self.buffer.as_mut() else {
            return false;
        };
        // A custom buffer may hand back a value that is already linked; skip
        // it so the index stays a bijection.
        while let Some(value) = buffer.pop() {
            if self.index.contains_key(&value) {
                continue;
            }
            self.index.insert(value.clone(), idx);
            self.values[idx as usize] = Some(value);
            return true;
        }
        false
    }
}

impl<T, B> Robin<T, B> {
    /// Number of values in the robin (buffer excluded).
    #[inline]
    pub fn len(&self) -> usize {
        self.index.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Returns true if the robin has a maximum length.
    #[inline]
    pub fn is_bounded(&self) -> bool {
        self.max_len > 0
    }

    /// Maximum length, or `None` for an unbounded robin.
    #[inline]
    pub fn max_len(&self) -> Option<usize> {
        (self.max_len > 0).then_some(self.max_len)
    }

    #[inline]
    pub fn has_buffer(&self) -> bool {
        self.buffer.is_some()
    }

    /// Returns the value [`next`](Robin::next) would return, without
    /// advancing.
    #[inline]
    pub fn peek(&self) -> Option<&T> {
        if self.cursor == NONE_U32 {
            return None;
        }
        self.values[self.cursor as usize].as_ref()
    }

    /// Iterates over one full rotation starting at the cursor. The cursor
    /// does not move.
    pub fn iter(&self) -> Iter<'_, T, B> {
        Iter {
            robin: self,
            cur: self.cursor,
            remaining: self.index.len(),
        }
    }

    /// Counters accumulated since creation or the last
    /// [`reset_stats`](Robin::reset_stats).
    #[cfg(feature = "stats")]
    pub fn stats(&self) -> &RobinStats {
        &self.stats
    }

    #[cfg(feature = "stats")]
    pub fn reset_stats(&mut self) {
        self.stats = RobinStats::default();
    }
}

impl<T: Hash + Eq, B> Robin<T, B> {
    /// Returns true if `value` is in the robin (buffer excluded).
    #[inline]
    pub fn contains<Q>(&self, value: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.index.contains_key(value)
    }
}

/// One rotation over a [`Robin`], in the order `next` would yield it.
pub struct Iter<'a, T, B> {
    robin: &'a Robin<T, B>,
    cur: u32,
    remaining: usize,
}

impl<'a, T, B> Iterator for Iter<'a, T, B> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        if self.remaining == 0 || self.cur == NONE_U32 {
            return None;
        }
        let idx = self.cur as usize;
        self.cur = self.robin.next[idx];
        self.remaining -= 1;
        self.robin.values[idx].as_ref()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T, B> ExactSizeIterator for Iter<'_, T, B> {}

impl<'a, T, B> IntoIterator for &'a Robin<T, B> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T, B>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T: Eq + Hash + Clone> Default for Robin<T, LifoBuffer<T>> {
    fn default() -> Self {
        Self::unbounded()
    }
}

impl<T: Eq + Hash + Clone, B: Buffer<T>> Extend<T> for Robin<T, B> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        self.add(iter);
    }
}

impl<T: Eq + Hash + Clone> FromIterator<T> for Robin<T, LifoBuffer<T>> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut robin = Self::unbounded();
        robin.add(iter);
        robin
    }
}

impl<T: fmt::Debug, B: Buffer<T>> fmt::Debug for Robin<T, B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Robin")
            .field("rotation", &DebugRotation(self))
            .field("max_len", &self.max_len())
            .field("has_buffer", &self.has_buffer())
            .field("buffer_len", &self.buffer.as_ref().map_or(0, |b| b.len()))
            .finish()
    }
}

struct DebugRotation<'a, T, B>(&'a Robin<T, B>);

impl<T: fmt::Debug, B> fmt::Debug for DebugRotation<'_, T, B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.0.iter()).finish()
    }
}

#[cfg(test)]
impl<T: Eq + Hash + Clone, B: Buffer<T>> Robin<T, B> {
    pub(crate) fn debug_validate(&self) {
        let cap = self.values.len();
        assert_eq!(self.prev.len(), cap);
        assert_eq!(self.next.len(), cap);
        if self.max_len == 0 {
            assert!(self.buffer.is_none(), "buffer on an unbounded robin");
        } else {
            assert!(self.index.len() <= self.max_len, "bounded robin overfull");
        }

        let mut mark = vec![0u8; cap]; // 0=unseen, 1=free, 2=live

        // Walk the ring from the cursor.
        let mut live = 0usize;
        if self.cursor == NONE_U32 {
            assert!(self.index.is_empty(), "empty ring with indexed values");
        } else {
            let mut cur = self.cursor;
            loop {
                let i = cur as usize;
                assert!(i < cap, "ring index out of bounds");
                assert_eq!(mark[i], 0, "node appears twice in the ring");
                mark[i] = 2;
                live += 1;

                let value = self.values[i].as_ref().expect("live node without a value");
                assert_eq!(self.index.get(value), Some(&cur), "index does not map to node");

                let nxt = self.next[i];
                assert!((nxt as usize) < cap, "next out of bounds");
                assert_eq!(self.prev[nxt as usize], cur, "prev does not mirror next");
                cur = nxt;
                if cur == self.cursor {
                    break;
                }
            }
        }
        assert_eq!(live, self.index.len(), "ring and index disagree on size");

        // Walk the free list.
        let mut free = 0usize;
        let mut cur = self.free_head;
        while cur != NONE_U32 {
            let i = cur as usize;
            assert!(i < cap, "free index out of bounds");
            assert_eq!(mark[i], 0, "node is both free and live");
            assert!(self.values[i].is_none(), "free slot holds a value");
            mark[i] = 1;
            free += 1;
            cur = self.next[i];
        }

        assert_eq!(live + free, cap, "every slot must be free or live exactly once");
    }
}
