//! Slab arena with stable keys.
//!
//! [`NodeStorage`] hands out a key on insert; the key stays valid until that
//! value is removed, regardless of other inserts and removes. Vacated slots
//! go on a free stack and are reused last-in first-out. This lets node-based
//! structures link by key instead of by pointer, so node lifetimes are owned
//! by the arena rather than paired alloc/free calls.
//!
//! Growth is fallible: inserts reserve memory with `try_reserve` and report
//! [`Error::AllocationFailed`] instead of aborting.

use core::mem::size_of;
use core::ops::{Index, IndexMut};

use crate::{Error, Key, Result};

/// Growable slab of `T` addressed by keys of type `K`.
#[derive(Debug)]
pub(crate) struct NodeStorage<T, K: Key = u32> {
    slots: Vec<Option<T>>,
    /// Vacant slot keys. `free.capacity() >= slots.len()` always holds, so
    /// pushing onto it never allocates.
    free: Vec<K>,
    len: usize,
}

impl<T, K: Key> Default for NodeStorage<T, K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, K: Key> NodeStorage<T, K> {
    /// Creates empty storage without allocating.
    pub(crate) const fn new() -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
            len: 0,
        }
    }

    /// Creates storage with room for at least `capacity` values.
    ///
    /// # Errors
    ///
    /// [`Error::AllocationFailed`] if the slots cannot be reserved.
    pub(crate) fn with_capacity(capacity: usize) -> Result<Self> {
        let mut storage = Self::new();
        let bytes = capacity.saturating_mul(size_of::<Option<T>>());
        storage
            .slots
            .try_reserve_exact(capacity)
            .map_err(|_| Error::alloc(bytes))?;
        storage
            .free
            .try_reserve_exact(capacity)
            .map_err(|_| Error::alloc(bytes))?;
        Ok(storage)
    }

    /// Number of occupied slots.
    #[inline]
    pub(crate) const fn len(&self) -> usize {
        self.len
    }

    /// Stores `value` and returns its key.
    ///
    /// # Errors
    ///
    /// [`Error::AllocationFailed`] if the arena cannot grow or the key type
    /// has no unused keys left. Storage is unchanged on error.
    pub(crate) fn try_insert(&mut self, value: T) -> Result<K> {
        if let Some(key) = self.free.pop() {
            self.slots[key.as_usize()] = Some(value);
            self.len += 1;
            return Ok(key);
        }

        let index = self.slots.len();
        let slot_bytes = size_of::<Option<T>>();
        if index >= K::MAX_SLOTS {
            return Err(Error::alloc(slot_bytes));
        }

        self.slots
            .try_reserve(1)
            .map_err(|_| Error::alloc(slot_bytes))?;
        if self.free.capacity() <= index {
            self.free
                .try_reserve(index + 1 - self.free.len())
                .map_err(|_| Error::alloc(size_of::<K>()))?;
        }

        self.slots.push(Some(value));
        self.len += 1;
        Ok(K::from_usize(index))
    }

    /// Removes and returns the value at `key`, if occupied.
    pub(crate) fn remove(&mut self, key: K) -> Option<T> {
        let value = self.slots.get_mut(key.as_usize())?.take()?;
        self.free.push(key);
        self.len -= 1;
        Some(value)
    }

    /// Returns a reference to the value at `key`, if occupied.
    #[inline]
    pub(crate) fn get(&self, key: K) -> Option<&T> {
        self.slots.get(key.as_usize())?.as_ref()
    }

    /// Returns a mutable reference to the value at `key`, if occupied.
    #[inline]
    pub(crate) fn get_mut(&mut self, key: K) -> Option<&mut T> {
        self.slots.get_mut(key.as_usize())?.as_mut()
    }

    /// Drops every value. Keys restart from zero; the allocation is kept.
    ///
    /// Any key handed out before the call is invalid afterwards.
    pub(crate) fn clear(&mut self) {
        self.slots.clear();
        self.free.clear();
        self.len = 0;
    }
}

impl<T, K: Key> Index<K> for NodeStorage<T, K> {
    type Output = T;

    /// # Panics
    ///
    /// Panics if `key` is vacant or out of range.
    #[inline]
    fn index(&self, key: K) -> &T {
        match self.get(key) {
            Some(value) => value,
            None => panic!("vacant storage key {key:?}"),
        }
    }
}

impl<T, K: Key> IndexMut<K> for NodeStorage<T, K> {
    #[inline]
    fn index_mut(&mut self, key: K) -> &mut T {
        match self.get_mut(key) {
            Some(value) => value,
            None => panic!("vacant storage key {key:?}"),
        }
    }
}
