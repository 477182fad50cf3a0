//! In-place quicksort shared by both containers.
//!
//! # Pivot Policy
//!
//! Lomuto partitioning with the **last element of the current partition** as
//! pivot. An element is moved left of the pivot only when it compares
//! strictly [`Less`](core::cmp::Ordering::Less) than the pivot, so elements
//! that compare equal end up on the right. Equal elements keep their
//! relative order only by chance; the sort is not stable. Because the
//! policy is fixed, output order on ties is reproducible.
//!
//! # Stack Depth
//!
//! The recursion of the textbook form is replaced by an explicit work stack.
//! After each partition the larger side is pushed and the smaller side is
//! processed next, which keeps the stack at `O(log n)` entries even on
//! adversarial input (time remains `O(n²)` in the worst case). That bound
//! lets the stack be reserved once, up front, so the sort itself never
//! allocates.
//!
//! ```text
//! [ < pivot | >= pivot | unscanned | pivot ]
//!  low     store       j          high
//! ```

use core::mem::size_of;

use crate::{Error, Result};

/// Each pending range is at least twice the size of the one above it, so
/// the stack never holds more than one entry per bit of `usize`.
const MAX_PENDING: usize = usize::BITS as usize;

/// Positional access required by [`quicksort`].
pub(crate) trait SortSlots {
    /// Returns `true` if the element at `a` orders strictly before the one at `b`.
    fn less(&mut self, a: usize, b: usize) -> bool;

    /// Exchanges the elements at positions `a` and `b`.
    fn swap(&mut self, a: usize, b: usize);
}

/// Sorts positions `[0, len)` of `slots`.
///
/// # Errors
///
/// [`Error::AllocationFailed`] if the work stack cannot be reserved. No
/// element has been moved in that case.
pub(crate) fn quicksort<S: SortSlots + ?Sized>(slots: &mut S, len: usize) -> Result<()> {
    if len < 2 {
        return Ok(());
    }

    // Inclusive ranges.
    let mut pending: Vec<(usize, usize)> = Vec::new();
    pending
        .try_reserve_exact(MAX_PENDING)
        .map_err(|_| Error::alloc(MAX_PENDING * size_of::<(usize, usize)>()))?;
    let (mut low, mut high) = (0, len - 1);

    loop {
        if low < high {
            let pivot = partition(slots, low, high);

            let left = (pivot > low).then(|| (low, pivot - 1));
            let right = (pivot < high).then(|| (pivot + 1, high));

            match (left, right) {
                (Some(l), Some(r)) => {
                    let (small, large) = if l.1 - l.0 <= r.1 - r.0 { (l, r) } else { (r, l) };
                    debug_assert!(pending.len() < MAX_PENDING);
                    pending.push(large);
                    (low, high) = small;
                    continue;
                }
                (Some(only), None) | (None, Some(only)) => {
                    (low, high) = only;
                    continue;
                }
                (None, None) => {}
            }
        }

        match pending.pop() {
            Some(next) => (low, high) = next,
            None => return Ok(()),
        }
    }
}

/// Partitions `[low, high]` around the element at `high` and returns the
/// pivot's final position.
fn partition<S: SortSlots + ?Sized>(slots: &mut S, low: usize, high: usize) -> usize {
    let mut store = low;
    for j in low..high {
        if slots.less(j, high) {
            slots.swap(store, j);
            store += 1;
        }
    }
    slots.swap(store, high);
    store
}
