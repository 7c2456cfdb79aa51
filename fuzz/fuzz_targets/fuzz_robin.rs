#![no_main]

use std::collections::VecDeque;

use libfuzzer_sys::fuzz_target;

use robin_rs::{LifoBuffer, Robin};

// Interprets a byte stream as an operation sequence against a `Robin` with a
// LIFO buffer, checking every observation against a `VecDeque` model whose
// front is the cursor.
//
// Byte layout:
// - Byte 0 → `max_len` (`% 8`, 0 = unbounded, buffer ignored)
// - Byte 1 → buffer capacity (`% 5`)
// - Remaining bytes as `(opcode, operand)` pairs, operands `% 16`:
//   - 0 → `add([operand])`
//   - 1 → `remove([operand])`
//   - 2 → `next()`
//   - 3 → `reset()`
fuzz_target!(|data: &[u8]| {
    if data.len() < 2 {
        return;
    }

    let max_len = (data[0] % 8) as usize;
    let buf_cap = (data[1] % 5) as usize;
    let mut robin = Robin::bounded_with_buffer(max_len, LifoBuffer::with_capacity(buf_cap));

    let mut ring: VecDeque<u8> = VecDeque::new();
    let mut stack: VecDeque<u8> = VecDeque::new();

    let ops = &data[2..];
    let mut i = 0;
    while i + 1 < ops.len() {
        let opcode = ops[i];
        let v = ops[i + 1] % 16;
        i += 2;

        match opcode % 4 {
            // add
            0 => {
                robin.add([v]);
                if !ring.contains(&v) {
                    if max_len > 0 && ring.len() == max_len {
                        if buf_cap > 0 && !stack.contains(&v) {
                            if stack.len() == buf_cap {
                                stack.pop_front();
                            }
                            stack.push_back(v);
                        }
                    } else {
                        ring.push_front(v);
                    }
                }
            }
            // remove
            1 => {
                robin.remove(&[v]);
                if let Some(pos) = ring.iter().position(|x| *x == v) {
                    match stack.pop_back() {
                        Some(b) => ring[pos] = b,
                        None => {
                            ring.remove(pos);
                        }
                    }
                }
            }
            // next
            2 => {
                let want = ring.pop_front();
                if let Some(w) = want {
                    ring.push_back(w);
                }
                assert_eq!(robin.next(), want, "next mismatch");
            }
            // reset
            _ => {
                robin.reset();
                ring.clear();
                stack.clear();
            }
        }

        assert_eq!(robin.len(), ring.len(), "len mismatch");
        assert_eq!(robin.buffer_len(), stack.len(), "buffer_len mismatch");
        assert_eq!(robin.contains(&v), ring.contains(&v), "contains({v}) mismatch");
        assert_eq!(
            robin.buffer_contains(&v),
            stack.contains(&v),
            "buffer_contains({v}) mismatch"
        );
    }
});
