//! Scenario tables: each case is a sequence of operations on one robin and the
//! value each operation observes.

use std::fmt::Debug;

use robin_rs::{LifoBuffer, Robin};

#[derive(Debug, PartialEq)]
enum Obs {
    Val(i32),
    Len(usize),
    Flag(bool),
}

type Step = fn(&mut Robin<i32>) -> Obs;

struct Case {
    name: &'static str,
    max_len: usize,
    buffer_cap: Option<usize>,
    steps: &'static [Step],
    want: &'static [Obs],
}

fn next(r: &mut Robin<i32>) -> Obs {
    r.next().map_or(Obs::Flag(false), Obs::Val)
}

fn run<T: Debug + PartialEq>(name: &str, got: Vec<T>, want: &[T]) {
    assert_eq!(got.as_slice(), want, "case {name:?}");
}

const CASES: &[Case] = &[
    Case {
        name: "basic round-robin",
        max_len: 0,
        buffer_cap: None,
        steps: &[
            |r| {
                r.add([1, 2, 3]);
                next(r)
            },
            next,
            |r| {
                r.add([4]);
                next(r)
            },
            next,
            next,
            next,
        ],
        want: &[Obs::Val(1), Obs::Val(2), Obs::Val(4), Obs::Val(3), Obs::Val(1), Obs::Val(2)],
    },
    Case {
        name: "removing and next on empty robin",
        max_len: 0,
        buffer_cap: None,
        steps: &[
            |r| {
                r.add([1, 2, 3]);
                r.remove(&[1]);
                next(r)
            },
            |r| {
                r.remove(&[2]);
                next(r)
            },
            next,
            |r| {
                r.remove(&[1, 3]);
                next(r)
            },
        ],
        want: &[Obs::Val(2), Obs::Val(3), Obs::Val(3), Obs::Flag(false)],
    },
    Case {
        name: "duplicates are ignored",
        max_len: 0,
        buffer_cap: None,
        steps: &[
            |r| Obs::Len(r.len()),
            |r| {
                r.add([1, 2, 3]);
                Obs::Len(r.len())
            },
            |r| {
                r.add([1, 2, 3]);
                Obs::Len(r.len())
            },
            |r| {
                r.remove(&[1]);
                Obs::Len(r.len())
            },
            |r| {
                r.remove(&[2]);
                Obs::Len(r.len())
            },
            |r| {
                r.remove(&[3]);
                Obs::Len(r.len())
            },
        ],
        want: &[Obs::Len(0), Obs::Len(3), Obs::Len(3), Obs::Len(2), Obs::Len(1), Obs::Len(0)],
    },
    Case {
        name: "basic contains",
        max_len: 0,
        buffer_cap: None,
        steps: &[
            |r| {
                r.add([1, 2, 3]);
                Obs::Flag(r.contains(&3))
            },
            |r| Obs::Flag(r.contains(&0)),
            |r| {
                r.remove(&[3]);
                Obs::Flag(r.contains(&3))
            },
        ],
        want: &[Obs::Flag(true), Obs::Flag(false), Obs::Flag(false)],
    },
    Case {
        name: "full bounded robin without buffer ignores adds",
        max_len: 2,
        buffer_cap: None,
        steps: &[
            |r| {
                r.add([1, 2, 3]);
                Obs::Len(r.len())
            },
            |r| {
                r.add([4]);
                Obs::Len(r.len())
            },
            |r| Obs::Flag(r.contains(&3)),
            |r| Obs::Flag(r.contains(&4)),
            |r| {
                r.remove(&[1]);
                Obs::Len(r.len())
            },
            next,
            next,
        ],
        want: &[
            Obs::Len(2),
            Obs::Len(2),
            Obs::Flag(false),
            Obs::Flag(false),
            Obs::Len(1),
            Obs::Val(2),
            Obs::Val(2),
        ],
    },
    Case {
        name: "full bounded robin with buffer pushes and pops",
        max_len: 2,
        buffer_cap: Some(2),
        steps: &[
            |r| {
                r.add([1, 2, 3]);
                Obs::Len(r.len())
            },
            |r| Obs::Flag(r.contains(&3)),
            |r| Obs::Len(r.buffer_len()),
            |r| Obs::Flag(r.buffer_contains(&3)),
            |r| {
                r.remove(&[2]);
                Obs::Len(r.len())
            },
            |r| Obs::Flag(r.buffer_contains(&3)),
            |r| Obs::Len(r.buffer_len()),
            next,
            next,
        ],
        want: &[
            Obs::Len(2),
            Obs::Flag(false),
            Obs::Len(1),
            Obs::Flag(true),
            Obs::Len(2),
            Obs::Flag(false),
            Obs::Len(0),
            Obs::Val(1),
            Obs::Val(3),
        ],
    },
    Case {
        name: "basic reset",
        max_len: 2,
        buffer_cap: Some(2),
        steps: &[
            |r| {
                r.add([1, 2, 3]);
                r.reset();
                Obs::Len(r.len())
            },
            |r| Obs::Len(r.buffer_len()),
            next,
        ],
        want: &[Obs::Len(0), Obs::Len(0), Obs::Flag(false)],
    },
];

#[test]
fn scenario_table() {
    for case in CASES {
        let mut robin = match case.buffer_cap {
            Some(cap) => Robin::bounded_with_buffer(case.max_len, LifoBuffer::with_capacity(cap)),
            None => Robin::bounded(case.max_len),
        };
        let got: Vec<Obs> = case.steps.iter().map(|step| step(&mut robin)).collect();
        run(case.name, got, case.want);
    }
}

#[test]
fn reset_behaves_like_fresh_instance() {
    let mut used = Robin::bounded_with_buffer(3, LifoBuffer::with_capacity(2));
    used.add(10..20);
    used.remove(&[10, 11]);
    used.next();
    used.reset();

    let mut fresh = Robin::bounded_with_buffer(3, LifoBuffer::with_capacity(2));
    for robin in [&mut used, &mut fresh] {
        robin.add([5, 6, 7, 8, 9]);
        robin.remove(&[6]);
    }

    for _ in 0..6 {
        assert_eq!(used.next(), fresh.next());
    }
    assert_eq!(used.buffer_len(), fresh.buffer_len());
    assert_eq!(used.len(), fresh.len());
}

#[test]
fn insertion_lands_before_cursor() {
    let mut r = Robin::unbounded();
    r.add(['a', 'b']);
    r.add(['c']);
    let seen: Vec<char> = (0..3).filter_map(|_| r.next()).collect();
    assert_eq!(seen, ['c', 'a', 'b']);
}

#[test]
fn idempotent_membership() {
    let mut once = Robin::unbounded();
    once.add(["x"]);
    let mut twice = Robin::unbounded();
    twice.add(["x"]);
    twice.add(["x"]);
    assert_eq!(once.len(), twice.len());
    assert!(twice.contains("x"));
    assert_eq!(twice.iter().filter(|v| **v == "x").count(), 1);
}

#[test]
fn shared_behind_mutex() {
    use std::sync::{Arc, Mutex};
    use std::thread;

    let robin = Arc::new(Mutex::new(Robin::unbounded()));
    robin.lock().unwrap().add(0..4u32);

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let robin = Arc::clone(&robin);
            thread::spawn(move || {
                (0..100)
                    .map(|_| robin.lock().unwrap().next().unwrap())
                    .collect::<Vec<_>>()
            })
        })
        .collect();

    let mut counts = [0usize; 4];
    for h in handles {
        for v in h.join().unwrap() {
            counts[v as usize] += 1;
        }
    }
    assert_eq!(counts, [100; 4]);
}
