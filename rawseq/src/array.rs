//! Growable contiguous array of run-time sized elements.
//!
//! A [`ByteArray`] owns one buffer of `capacity * element_size` bytes. Slots
//! `[0, len)` hold element bytes written by the caller; slots
//! `[len, capacity)` are allocated but logically empty.
//!
//! ```text
//! element_size = 4, len = 3, capacity = 5
//!
//! ┌────┬────┬────┬────┬────┐
//! │ e0 │ e1 │ e2 │ -- │ -- │
//! └────┴────┴────┴────┴────┘
//!   live (len)     vacant
//! ```
//!
//! # Growth
//!
//! When an append or insert finds the array full, capacity becomes
//! `capacity * 2 + 1`, which also makes progress from a cleared array
//! (capacity 0). Every reallocation builds the new buffer first and swaps it
//! in only on success, so an allocation failure leaves the array untouched.
//!
//! # Example
//!
//! ```
//! use rawseq::ByteArray;
//!
//! let mut arr = ByteArray::new(4, 2)?;
//! arr.append(&42i32.to_ne_bytes())?;
//! arr.insert(0, &7i32.to_ne_bytes())?;
//! arr.append(&98i32.to_ne_bytes())?; // grows to 2 * 2 + 1
//!
//! assert_eq!(arr.len()?, 3);
//! assert_eq!(arr.capacity()?, 5);
//! assert_eq!(arr.get(0)?, &7i32.to_ne_bytes());
//! # Ok::<(), rawseq::Error>(())
//! ```

use core::cmp::Ordering;
use core::ops::Range;
use core::slice::ChunksExact;

use log::debug;

use crate::error::check_width;
use crate::sort::{SortSlots, quicksort};
use crate::state::State;
use crate::{Error, Result};

const DEFAULT_CAPACITY: usize = 1;

// =============================================================================
// Builder
// =============================================================================

/// Builder for [`ByteArray`].
///
/// ```
/// use rawseq::ArrayBuilder;
///
/// let arr = ArrayBuilder::new(8).capacity(64).zero_vacated(false).build()?;
/// assert_eq!(arr.capacity()?, 64);
/// # Ok::<(), rawseq::Error>(())
/// ```
#[derive(Clone, Debug)]
pub struct ArrayBuilder {
    element_size: usize,
    capacity: usize,
    zero_vacated: bool,
}

impl ArrayBuilder {
    /// Starts a builder for elements of `element_size` bytes.
    /// Default capacity is 1 slot.
    pub fn new(element_size: usize) -> Self {
        Self {
            element_size,
            capacity: DEFAULT_CAPACITY,
            zero_vacated: true,
        }
    }

    /// Number of slots allocated up front. Must be > 0.
    pub fn capacity(mut self, slots: usize) -> Self {
        self.capacity = slots;
        self
    }

    /// Whether `remove` zeroes the tail slot it vacates. Default: `true`.
    pub fn zero_vacated(mut self, zero: bool) -> Self {
        self.zero_vacated = zero;
        self
    }

    /// Allocates the array.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidArgument`] if element size or capacity is 0
    /// - [`Error::AllocationFailed`] if the buffer cannot be reserved
    pub fn build(self) -> Result<ByteArray> {
        if self.element_size == 0 {
            return Err(Error::InvalidArgument("element size must be > 0"));
        }
        if self.capacity == 0 {
            return Err(Error::InvalidArgument("capacity must be > 0"));
        }

        let data = zeroed(slot_bytes(self.capacity, self.element_size)?)?;

        Ok(ByteArray {
            data,
            element_size: self.element_size,
            len: 0,
            capacity: self.capacity,
            zero_vacated: self.zero_vacated,
            state: State::Live,
        })
    }
}

// =============================================================================
// ByteArray
// =============================================================================

/// A growable array of fixed-width byte elements.
///
/// See the [module documentation](self) for layout and growth policy.
#[derive(Debug)]
pub struct ByteArray {
    /// Exactly `capacity * element_size` bytes.
    data: Vec<u8>,
    element_size: usize,
    len: usize,
    capacity: usize,
    zero_vacated: bool,
    state: State,
}

impl ByteArray {
    /// Creates an array of `capacity` slots, each `element_size` bytes wide.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidArgument`] if either argument is 0
    /// - [`Error::AllocationFailed`] if the buffer cannot be reserved
    pub fn new(element_size: usize, capacity: usize) -> Result<Self> {
        ArrayBuilder::new(element_size).capacity(capacity).build()
    }

    /// Returns a builder for arrays of `element_size`-byte elements.
    pub fn builder(element_size: usize) -> ArrayBuilder {
        ArrayBuilder::new(element_size)
    }

    /// Releases all storage. Every later call, including another `destroy`,
    /// fails with [`Error::NullReference`].
    pub fn destroy(&mut self) -> Result<()> {
        self.state.ensure_live()?;
        debug!(
            "destroying array: len={} capacity={} element_size={}",
            self.len, self.capacity, self.element_size
        );
        self.data = Vec::new();
        self.len = 0;
        self.capacity = 0;
        self.state = State::Destroyed;
        Ok(())
    }

    // ========================================================================
    // Queries
    // ========================================================================

    /// Width of one element in bytes.
    #[inline]
    pub fn element_size(&self) -> Result<usize> {
        self.state.ensure_live()?;
        Ok(self.element_size)
    }

    /// Number of live elements.
    #[inline]
    pub fn len(&self) -> Result<usize> {
        self.state.ensure_live()?;
        Ok(self.len)
    }

    /// Number of allocated slots.
    #[inline]
    pub fn capacity(&self) -> Result<usize> {
        self.state.ensure_live()?;
        Ok(self.capacity)
    }

    /// Returns `true` if there are no live elements.
    #[inline]
    pub fn is_empty(&self) -> Result<bool> {
        self.state.ensure_live()?;
        Ok(self.len == 0)
    }

    /// Returns `true` if the next append must reallocate.
    #[inline]
    pub fn is_full(&self) -> Result<bool> {
        self.state.ensure_live()?;
        Ok(self.len == self.capacity)
    }

    // ========================================================================
    // Element access
    // ========================================================================

    /// Returns the bytes of the element at `index`.
    ///
    /// # Errors
    ///
    /// [`Error::IndexOutOfRange`] if `index >= len`.
    #[inline]
    pub fn get(&self, index: usize) -> Result<&[u8]> {
        self.check_index(index)?;
        Ok(&self.data[self.span(index)])
    }

    /// Returns the bytes of the element at `index` for in-place mutation.
    #[inline]
    pub fn get_mut(&mut self, index: usize) -> Result<&mut [u8]> {
        self.check_index(index)?;
        let span = self.span(index);
        Ok(&mut self.data[span])
    }

    /// Returns the first element.
    pub fn first(&self) -> Result<&[u8]> {
        self.get(0)
    }

    /// Returns the last element.
    pub fn last(&self) -> Result<&[u8]> {
        self.state.ensure_live()?;
        match self.len.checked_sub(1) {
            Some(index) => self.get(index),
            None => Err(Error::out_of_range(0, 0)),
        }
    }

    /// Overwrites the element at `index` with `element`.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidArgument`] if `element.len() != element_size`
    /// - [`Error::IndexOutOfRange`] if `index >= len`
    pub fn set(&mut self, index: usize, element: &[u8]) -> Result<()> {
        self.state.ensure_live()?;
        check_width(element, self.element_size)?;
        self.check_index(index)?;
        let span = self.span(index);
        self.data[span].copy_from_slice(element);
        Ok(())
    }

    /// Returns the index of the first element byte-equal to `element`.
    ///
    /// # Errors
    ///
    /// [`Error::NotFound`] if no element matches.
    pub fn find(&self, element: &[u8]) -> Result<usize> {
        self.state.ensure_live()?;
        check_width(element, self.element_size)?;
        self.live()
            .chunks_exact(self.element_size)
            .position(|slot| slot == element)
            .ok_or(Error::NotFound)
    }

    // ========================================================================
    // Structural mutation
    // ========================================================================

    /// Copies `element` into the next free slot, growing first if full.
    pub fn append(&mut self, element: &[u8]) -> Result<()> {
        self.state.ensure_live()?;
        let len = self.len;
        self.insert(len, element)
    }

    /// Inserts `element` at `index`, shifting `[index, len)` one slot right.
    ///
    /// `index == len` appends.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidArgument`] if `element.len() != element_size`
    /// - [`Error::IndexOutOfRange`] if `index > len`
    /// - [`Error::AllocationFailed`] if growth fails (array unchanged)
    pub fn insert(&mut self, index: usize, element: &[u8]) -> Result<()> {
        self.state.ensure_live()?;
        check_width(element, self.element_size)?;
        if index > self.len {
            return Err(Error::out_of_range(index, self.len));
        }

        if self.len == self.capacity {
            self.grow()?;
        }

        let size = self.element_size;
        let start = index * size;
        let end = self.len * size;
        self.data.copy_within(start..end, start + size);
        self.data[start..start + size].copy_from_slice(element);
        self.len += 1;
        Ok(())
    }

    /// Removes the element at `index`, shifting `(index, len)` one slot left.
    ///
    /// # Errors
    ///
    /// [`Error::IndexOutOfRange`] if `index >= len`.
    pub fn remove(&mut self, index: usize) -> Result<()> {
        self.check_index(index)?;

        let size = self.element_size;
        let start = index * size;
        let end = self.len * size;
        self.data.copy_within(start + size..end, start);
        if self.zero_vacated {
            self.data[end - size..end].fill(0);
        }
        self.len -= 1;
        Ok(())
    }

    /// Exchanges the elements at `a` and `b`. `a == b` is a no-op.
    pub fn swap(&mut self, a: usize, b: usize) -> Result<()> {
        self.check_index(a)?;
        self.check_index(b)?;
        swap_slots(&mut self.data, self.element_size, a, b);
        Ok(())
    }

    /// Overwrites every live element with `element`.
    pub fn fill(&mut self, element: &[u8]) -> Result<()> {
        self.state.ensure_live()?;
        check_width(element, self.element_size)?;
        let live = self.len * self.element_size;
        for slot in self.data[..live].chunks_exact_mut(self.element_size) {
            slot.copy_from_slice(element);
        }
        Ok(())
    }

    /// Reallocates storage to exactly `new_capacity` slots.
    ///
    /// Shrinking below `len` **truncates**: elements at `new_capacity..len`
    /// are dropped and `len` becomes `new_capacity`. This is the intended
    /// policy, not an error.
    ///
    /// # Errors
    ///
    /// [`Error::AllocationFailed`] if the new buffer cannot be reserved; the
    /// array, including `len`, is unchanged.
    pub fn resize(&mut self, new_capacity: usize) -> Result<()> {
        self.state.ensure_live()?;
        self.reallocate(new_capacity)
    }

    /// Releases all element storage. `len` and `capacity` become 0; the
    /// array remains usable and regrows on the next append.
    pub fn clear(&mut self) -> Result<()> {
        self.state.ensure_live()?;
        debug!(
            "clearing array: len={} capacity={} -> 0",
            self.len, self.capacity
        );
        self.data = Vec::new();
        self.len = 0;
        self.capacity = 0;
        Ok(())
    }

    // ========================================================================
    // Traversal
    // ========================================================================

    /// Calls `visitor` on each live element in index order.
    ///
    /// The visitor may rewrite element bytes but cannot change the length.
    pub fn iterate<F>(&mut self, mut visitor: F) -> Result<()>
    where
        F: FnMut(&mut [u8]),
    {
        self.state.ensure_live()?;
        let live = self.len * self.element_size;
        for slot in self.data[..live].chunks_exact_mut(self.element_size) {
            visitor(slot);
        }
        Ok(())
    }

    /// Returns an iterator over live elements in index order.
    pub fn iter(&self) -> Result<Iter<'_>> {
        self.state.ensure_live()?;
        Ok(Iter {
            inner: self.live().chunks_exact(self.element_size),
        })
    }

    /// Sorts live elements in place with `compare`.
    ///
    /// Quicksort with the last element of each partition as pivot. An
    /// element moves before the pivot only if `compare` returns `Less`.
    /// Not stable.
    ///
    /// # Errors
    ///
    /// [`Error::AllocationFailed`] if the sort's work stack cannot be
    /// reserved; the array is unchanged.
    pub fn sort<F>(&mut self, compare: F) -> Result<()>
    where
        F: FnMut(&[u8], &[u8]) -> Ordering,
    {
        self.state.ensure_live()?;
        let live = self.len * self.element_size;
        let mut slots = ArraySlots {
            data: &mut self.data[..live],
            element_size: self.element_size,
            compare,
        };
        quicksort(&mut slots, self.len)?;
        Ok(())
    }

    // ========================================================================
    // Internals
    // ========================================================================

    #[inline]
    fn check_index(&self, index: usize) -> Result<()> {
        self.state.ensure_live()?;
        if index < self.len {
            Ok(())
        } else {
            Err(Error::out_of_range(index, self.len))
        }
    }

    #[inline]
    fn span(&self, index: usize) -> Range<usize> {
        let start = index * self.element_size;
        start..start + self.element_size
    }

    #[inline]
    fn live(&self) -> &[u8] {
        &self.data[..self.len * self.element_size]
    }

    fn grow(&mut self) -> Result<()> {
        let new_capacity = self
            .capacity
            .checked_mul(2)
            .and_then(|c| c.checked_add(1))
            .ok_or(Error::alloc(usize::MAX))?;
        self.reallocate(new_capacity)
    }

    /// Moves the first `min(len, new_capacity)` elements into a fresh buffer.
    /// Nothing is modified unless the allocation succeeds.
    fn reallocate(&mut self, new_capacity: usize) -> Result<()> {
        let bytes = slot_bytes(new_capacity, self.element_size)?;
        let keep = self.len.min(new_capacity);
        let keep_bytes = keep * self.element_size;

        let mut data = Vec::new();
        data.try_reserve_exact(bytes)
            .map_err(|_| Error::alloc(bytes))?;
        data.extend_from_slice(&self.data[..keep_bytes]);
        data.resize(bytes, 0);

        debug!(
            "reallocating array: capacity {} -> {} (element_size={}, len {} -> {})",
            self.capacity, new_capacity, self.element_size, self.len, keep
        );

        self.data = data;
        self.capacity = new_capacity;
        self.len = keep;
        Ok(())
    }
}

/// Iterator over the live elements of a [`ByteArray`].
#[derive(Debug, Clone)]
pub struct Iter<'a> {
    inner: ChunksExact<'a, u8>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a [u8];

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl DoubleEndedIterator for Iter<'_> {
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back()
    }
}

impl ExactSizeIterator for Iter<'_> {}

// =============================================================================
// Helpers
// =============================================================================

struct ArraySlots<'a, F> {
    data: &'a mut [u8],
    element_size: usize,
    compare: F,
}

impl<F> SortSlots for ArraySlots<'_, F>
where
    F: FnMut(&[u8], &[u8]) -> Ordering,
{
    #[inline]
    fn less(&mut self, a: usize, b: usize) -> bool {
        let size = self.element_size;
        let lhs = &self.data[a * size..(a + 1) * size];
        let rhs = &self.data[b * size..(b + 1) * size];
        (self.compare)(lhs, rhs) == Ordering::Less
    }

    #[inline]
    fn swap(&mut self, a: usize, b: usize) {
        swap_slots(self.data, self.element_size, a, b);
    }
}

/// Swaps two element slots without a temporary buffer.
#[inline]
fn swap_slots(data: &mut [u8], size: usize, a: usize, b: usize) {
    if a == b {
        return;
    }
    let (lo, hi) = if a < b { (a, b) } else { (b, a) };
    let (left, right) = data.split_at_mut(hi * size);
    left[lo * size..(lo + 1) * size].swap_with_slice(&mut right[..size]);
}

#[inline]
fn slot_bytes(slots: usize, element_size: usize) -> Result<usize> {
    slots
        .checked_mul(element_size)
        .ok_or(Error::alloc(usize::MAX))
}

fn zeroed(bytes: usize) -> Result<Vec<u8>> {
    let mut data = Vec::new();
    data.try_reserve_exact(bytes)
        .map_err(|_| Error::alloc(bytes))?;
    data.resize(bytes, 0);
    Ok(data)
}
