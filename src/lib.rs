//! Round-robin rotation over a set of unique values.
//!
//! ## Scope
//! [`Robin`] cycles through its values in a stable rotation with O(1) `add`,
//! `remove`, `contains` and `next`. It is a building block for fair-cycling
//! consumers: connection pools, worker assignment, token rotation.
//!
//! ## Key invariants
//! - Values are unique; adding a present value is a no-op.
//! - Values added in one call are returned next, in call order, ahead of
//!   values that were already waiting.
//! - A bounded robin never exceeds its maximum length.
//! - No operation fails. Absent values, duplicates and overflow are absorbed
//!   silently; emptiness is reported as `None`.
//!
//! ## Overflow buffers
//! A bounded robin can own a [`Buffer`]. Values that arrive while the robin is
//! full are parked in the buffer, and each removal is refilled in place from
//! it, so the rotation keeps its shape. [`LifoBuffer`] promotes the most recent
//! overflow first, [`FifoBuffer`] the oldest. Custom policies implement
//! [`Buffer`].
//!
//! ## Threading
//! Nothing here is synchronized. Wrap a robin in a `Mutex` (or keep it owned by
//! a single task) to share it.
//!
//! ## Notable entry points
//! - `Robin::unbounded` / `Robin::bounded` / `Robin::bounded_with_buffer`.
//! - `RobinConfig`: build a robin from a JSON config.
//! - `RobinStats` (feature `stats`): per-instance operation counters.

pub mod buffer;
mod config;
mod robin;
#[cfg(feature = "stats")]
mod stats;


pub use buffer::{Buffer, FifoBuffer, LifoBuffer};
pub use config::{BufferConfig, BufferPolicy, ConfigError, RobinConfig};
pub use robin::{Iter, Robin};
#[cfg(feature = "stats")]
pub use stats::RobinStats;
