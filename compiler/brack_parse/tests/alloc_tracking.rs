//! Heap accounting for parse and teardown.
//!
//! A counting global allocator tracks live bytes on the test thread only.
//! After a tree (or a failed parse) is dropped, live bytes must return to
//! where they started: every node and attribute was released, and none
//! twice.

#![allow(unsafe_code, reason = "counting wrapper around the system allocator")]
#![allow(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]

use std::alloc::{GlobalAlloc, Layout, System};
use std::cell::Cell;
use std::sync::atomic::{AtomicIsize, AtomicUsize, Ordering};

use brack_parse::{parse, parse_with, ParseConfig};

struct Counting;

static LIVE_BYTES: AtomicIsize = AtomicIsize::new(0);
static ALLOCATIONS: AtomicUsize = AtomicUsize::new(0);

thread_local! {
    static TRACKING: Cell<bool> = const { Cell::new(false) };
}

fn tracking() -> bool {
    TRACKING.try_with(Cell::get).unwrap_or(false)
}

#[allow(clippy::cast_possible_wrap, reason = "allocation sizes fit in isize")]
fn bytes(layout: Layout) -> isize {
    layout.size() as isize
}

// SAFETY: every call is forwarded unchanged to `System`.
unsafe impl GlobalAlloc for Counting {
    unsafe fn alloc(&self, layout: Layout) -> *mut u8 {
        // SAFETY: caller upholds `GlobalAlloc::alloc` requirements.
        let ptr = unsafe { System.alloc(layout) };
        if !ptr.is_null() && tracking() {
            LIVE_BYTES.fetch_add(bytes(layout), Ordering::Relaxed);
            ALLOCATIONS.fetch_add(1, Ordering::Relaxed);
        }
        ptr
    }

    unsafe fn dealloc(&self, ptr: *mut u8, layout: Layout) {
        // SAFETY: caller upholds `GlobalAlloc::dealloc` requirements.
        unsafe { System.dealloc(ptr, layout) };
        if tracking() {
            LIVE_BYTES.fetch_sub(bytes(layout), Ordering::Relaxed);
        }
    }
}

#[global_allocator]
static GLOBAL: Counting = Counting;

/// Run `f` with tracking on; returns (net live bytes, allocations).
fn measure(f: impl FnOnce()) -> (isize, usize) {
    // Callsite registration in `tracing` allocates once per process.
    warm_up();
    LIVE_BYTES.store(0, Ordering::Relaxed);
    ALLOCATIONS.store(0, Ordering::Relaxed);
    TRACKING.with(|t| t.set(true));
    f();
    TRACKING.with(|t| t.set(false));
    (
        LIVE_BYTES.load(Ordering::Relaxed),
        ALLOCATIONS.load(Ordering::Relaxed),
    )
}

fn warm_up() {
    let config = ParseConfig::default().with_sibling_roots(true);
    for source in ["[a k=v [b] [c]] [d]", "[a", "]", "[a] x", "[a 'q"] {
        let _ = parse_with(source, &config);
    }
    let _ = parse("[a] [b]");
    if let Ok(tree) = parse("[a [b]]") {
        tree.release();
    }
    let _ = parse_with("[a [b]]", &ParseConfig::default().with_max_depth(1));
}

fn assert_balanced(source: &str, config: &ParseConfig, expect_ok: bool) {
    let (net, allocations) = measure(|| {
        let result = parse_with(source, config);
        assert_eq!(result.is_ok(), expect_ok, "{source:?}: {result:?}");
    });
    assert!(allocations > 0, "{source:?} made no allocations");
    assert_eq!(net, 0, "{source:?} leaked {net} bytes");
}

#[test]
fn parse_and_teardown_release_everything() {
    let defaults = ParseConfig::default();
    let siblings = ParseConfig::default().with_sibling_roots(true);
    let shallow = ParseConfig::default().with_max_depth(2);

    // Successful parses, released by dropping the tree.
    assert_balanced("[root]", &defaults, true);
    assert_balanced(
        "[config debug [server host=localhost port=\"80\\\"80\" [tls]] [client]]",
        &defaults,
        true,
    );
    assert_balanced("[a x=1] [b [c]] [d]", &siblings, true);

    // Failures at every stage of building.
    assert_balanced("[root [child a=1] [other", &defaults, false);
    assert_balanced("[root [child]]]", &defaults, false);
    assert_balanced("[root [child] !]", &defaults, false);
    assert_balanced("[root [child k=\"unterminated", &defaults, false);
    assert_balanced("[root [a] [b]] [again]", &defaults, false);
    assert_balanced("[a [b [c]]]", &shallow, false);
    assert_balanced("[root [ ]", &defaults, false);

    // Explicit release.
    let (net, _) = measure(|| {
        let tree = parse("[root a b=c [x [y z]] [w]]").unwrap();
        let released = tree.release();
        assert_eq!(released.nodes, 4);
        assert_eq!(released.attributes, 3);
    });
    assert_eq!(net, 0);

    // Deep and wide documents.
    let levels = 5_000;
    let deep = format!("{}{}", "[n k=v".repeat(levels), "]".repeat(levels));
    let deep_config = ParseConfig::default().with_max_depth(levels);
    assert_balanced(&deep, &deep_config, true);
    assert_balanced(&deep[..deep.len() - 1], &deep_config, false);

    let wide = format!("[list {}]", "[item flag] ".repeat(5_000));
    assert_balanced(&wide, &defaults, true);
}
