//! A robin depends only on the `Buffer` contract.

use std::collections::BTreeSet;

use robin_rs::{Buffer, Robin};

/// Unbounded-capacity buffer that always promotes the smallest value.
#[derive(Default)]
struct MinBuffer(BTreeSet<u32>);

impl Buffer<u32> for MinBuffer {
    fn push(&mut self, value: u32) {
        self.0.insert(value);
    }

    fn pop(&mut self) -> Option<u32> {
        self.0.pop_first()
    }

    fn contains(&self, value: &u32) -> bool {
        self.0.contains(value)
    }

    fn len(&self) -> usize {
        self.0.len()
    }

    fn reset(&mut self) {
        self.0.clear();
    }
}

#[test]
fn custom_policy_drives_replacement() {
    let mut r = Robin::bounded_with_buffer(2, MinBuffer::default());
    r.add([10, 20, 50, 30, 40]);
    assert_eq!(r.buffer_len(), 3);

    r.remove(&[10]);
    assert!(r.contains(&30));
    r.remove(&[20]);
    assert!(r.contains(&40));
    assert_eq!(r.buffer_len(), 1);
    assert!(r.buffer_contains(&50));

    r.reset();
    assert_eq!(r.buffer_len(), 0);
}

/// Misbehaving buffer that hands out a value the robin already holds.
struct EchoBuffer(Vec<u32>);

impl Buffer<u32> for EchoBuffer {
    fn push(&mut self, value: u32) {
        self.0.push(value);
    }

    fn pop(&mut self) -> Option<u32> {
        self.0.pop()
    }

    fn contains(&self, value: &u32) -> bool {
        self.0.contains(value)
    }

    fn len(&self) -> usize {
        self.0.len()
    }

    fn reset(&mut self) {
        self.0.clear();
    }
}

#[test]
fn replacement_skips_values_already_linked() {
    // 9 at the bottom, a duplicate of a linked value on top.
    let mut forged = Robin::bounded_with_buffer(2, EchoBuffer(vec![9, 2]));
    forged.add([1, 2]);

    forged.remove(&[1]);
    assert_eq!(forged.len(), 2);
    assert!(forged.contains(&9));
    assert!(forged.contains(&2));
    assert_eq!(forged.buffer_len(), 0);
}
