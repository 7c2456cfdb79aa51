//! Operation counters for a [`Robin`](crate::Robin) (feature: `stats`).
//!
//! Counters are per instance, saturate at `u64::MAX`, and survive
//! [`Robin::reset`](crate::Robin::reset). Use
//! [`Robin::reset_stats`](crate::Robin::reset_stats) to zero them.

/// Cumulative counters for one robin.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RobinStats {
    /// Values linked into the ring by `add`.
    pub added: u64,
    /// Values passed to `add` that were already in the ring.
    pub duplicates: u64,
    /// Values pushed to the buffer because the ring was full.
    pub buffered: u64,
    /// `add` calls cut short by a full ring with no buffer.
    pub full_stops: u64,
    /// Removals refilled in place from the buffer.
    pub replaced: u64,
    /// Removals that unlinked a node from the ring.
    pub unlinked: u64,
    /// Successful `next` calls.
    pub rotations: u64,
}

/// Saturating add for a `u64` counter.
#[inline(always)]
pub(crate) fn sat_add_u64(counter: &mut u64, delta: u64) {
    *counter = counter.saturating_add(delta);
}
