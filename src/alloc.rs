//! Allocation counting for tests.
//!
//! This module provides a global allocator wrapper that counts the
//! allocations made by the current thread. Tests use it to check that the
//! read paths of the tree (lookups, navigation, iteration over small trees)
//! never touch the heap, and that insertion only allocates when the arena
//! grows.
//!
//! # Usage
//!
//! In a test binary:
//!
//! ```ignore
//! use redwood::alloc::{self, TrackingAllocator};
//!
//! #[global_allocator]
//! static ALLOC: TrackingAllocator = TrackingAllocator;
//!
//! #[test]
//! fn lookups_do_not_allocate() {
//!     let tree: redwood::Tree = (0..100).collect();
//!     let (_, stats) = alloc::measure(|| tree.contains(&42));
//!     assert_eq!(stats.alloc_count, 0);
//! }
//! ```
//!
//! Counters are thread-local, so tests running in parallel on other threads
//! do not disturb a measurement.

use std::alloc::{GlobalAlloc, Layout, System};
use std::cell::Cell;

thread_local! {
	static ALLOC_COUNT: Cell<usize> = const { Cell::new(0) };
	static BYTES_REQUESTED: Cell<usize> = const { Cell::new(0) };
}

/// A global allocator that forwards to [`System`] and counts every
/// allocation and reallocation made by the calling thread.
pub struct TrackingAllocator;

#[inline]
fn record(size: usize) {
	// try_with fails only while the thread's locals are being torn down.
	let _ = ALLOC_COUNT.try_with(|count| count.set(count.get() + 1));
	let _ = BYTES_REQUESTED.try_with(|bytes| bytes.set(bytes.get() + size));
}

unsafe impl GlobalAlloc for TrackingAllocator {
	unsafe fn alloc(&self, layout: Layout) -> *mut u8 {
		record(layout.size());
		System.alloc(layout)
	}

	unsafe fn dealloc(&self, ptr: *mut u8, layout: Layout) {
		System.dealloc(ptr, layout)
	}

	unsafe fn alloc_zeroed(&self, layout: Layout) -> *mut u8 {
		record(layout.size());
		System.alloc_zeroed(layout)
	}

	unsafe fn realloc(&self, ptr: *mut u8, layout: Layout, new_size: usize) -> *mut u8 {
		record(new_size);
		System.realloc(ptr, layout, new_size)
	}
}

/// Allocation statistics for the current thread.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AllocationStats {
	/// Number of allocations and reallocations since the last reset.
	pub alloc_count: usize,
	/// Bytes requested by those allocations.
	pub bytes_requested: usize,
}

/// Resets the current thread's counters to zero.
pub fn reset_counters() {
	ALLOC_COUNT.with(|count| count.set(0));
	BYTES_REQUESTED.with(|bytes| bytes.set(0));
}

/// Returns the current thread's counters.
pub fn get_stats() -> AllocationStats {
	AllocationStats {
		alloc_count: ALLOC_COUNT.with(Cell::get),
		bytes_requested: BYTES_REQUESTED.with(Cell::get),
	}
}

/// Runs `f` and returns its result along with the allocations it made.
///
/// Only meaningful when [`TrackingAllocator`] is the global allocator;
/// otherwise the statistics are always zero.
pub fn measure<R>(f: impl FnOnce() -> R) -> (R, AllocationStats) {
	reset_counters();
	let result = f();
	let stats = get_stats();
	(result, stats)
}
