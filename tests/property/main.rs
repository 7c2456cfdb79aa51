//! Property-based tests for the public API.
//!
//! Run with: `cargo test --test property`

mod rotation_order;
