//! Singly-linked list of run-time sized elements.
//!
//! Each node owns a heap copy of exactly `element_size` bytes and the key of
//! its successor. Nodes live in a [`NodeStorage`] arena and link by key, so
//! every node is owned by the arena and referenced by exactly one link:
//! `head` or its predecessor's `next`.
//!
//! ```text
//! head ──> [7 | ●]──> [15 | ●]──> [42 | ●]──> [98 | NONE]
//! ```
//!
//! Positional operations walk from `head`, so `get`, `insert` and `remove`
//! are `O(index)`. [`ByteList::sort`] collects the node keys once and sorts
//! those, keeping every comparison and swap `O(1)`.
//!
//! # Example
//!
//! ```
//! use rawseq::ByteList;
//!
//! let mut list = ByteList::new(4)?;
//! list.append(&42i32.to_ne_bytes())?;
//! list.prepend(&7i32.to_ne_bytes())?;
//! list.append(&98i32.to_ne_bytes())?;
//! list.insert(1, &15i32.to_ne_bytes())?;
//!
//! assert_eq!(list.len()?, 4);
//! assert_eq!(list.get(1)?, &15i32.to_ne_bytes());
//!
//! list.remove(1)?;
//! assert_eq!(list.find(&42i32.to_ne_bytes())?, 1);
//! # Ok::<(), rawseq::Error>(())
//! ```

use core::cmp::Ordering;

use log::{debug, trace};

use crate::error::check_width;
use crate::sort::{SortSlots, quicksort};
use crate::state::State;
use crate::{Error, Key, NodeStorage, Result};

/// A list node: one element's bytes plus the successor link.
#[derive(Debug)]
struct Node {
    data: Box<[u8]>,
    next: u32,
}

/// A singly-linked list of fixed-width byte elements.
///
/// See the [module documentation](self) for layout and complexity.
#[derive(Debug)]
pub struct ByteList {
    nodes: NodeStorage<Node>,
    head: u32,
    len: usize,
    element_size: usize,
    state: State,
}

impl ByteList {
    /// Creates an empty list for elements of `element_size` bytes.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidArgument`] if `element_size` is 0.
    pub fn new(element_size: usize) -> Result<Self> {
        check_element_size(element_size)?;
        Ok(Self::with_nodes(element_size, NodeStorage::new()))
    }

    /// Creates an empty list with arena room for `capacity` nodes.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidArgument`] if `element_size` is 0
    /// - [`Error::AllocationFailed`] if the arena cannot be reserved
    pub fn with_capacity(element_size: usize, capacity: usize) -> Result<Self> {
        check_element_size(element_size)?;
        let nodes = NodeStorage::with_capacity(capacity)?;
        Ok(Self::with_nodes(element_size, nodes))
    }

    fn with_nodes(element_size: usize, nodes: NodeStorage<Node>) -> Self {
        Self {
            nodes,
            head: u32::NONE,
            len: 0,
            element_size,
            state: State::Live,
        }
    }

    /// Frees every node. Every later call, including another `destroy`,
    /// fails with [`Error::NullReference`].
    pub fn destroy(&mut self) -> Result<()> {
        self.state.ensure_live()?;
        debug!(
            "destroying list: len={} element_size={}",
            self.len, self.element_size
        );
        self.nodes = NodeStorage::new();
        self.head = u32::NONE;
        self.len = 0;
        self.state = State::Destroyed;
        Ok(())
    }

    /// Frees every node; the list stays usable.
    pub fn clear(&mut self) -> Result<()> {
        self.state.ensure_live()?;
        debug!("clearing list: len={} -> 0", self.len);
        self.nodes.clear();
        self.head = u32::NONE;
        self.len = 0;
        Ok(())
    }

    /// Number of nodes.
    #[inline]
    pub fn len(&self) -> Result<usize> {
        self.state.ensure_live()?;
        Ok(self.len)
    }

    /// Returns `true` if the list has no nodes.
    #[inline]
    pub fn is_empty(&self) -> Result<bool> {
        self.state.ensure_live()?;
        Ok(self.len == 0)
    }

    /// Width of one element in bytes.
    #[inline]
    pub fn element_size(&self) -> Result<usize> {
        self.state.ensure_live()?;
        Ok(self.element_size)
    }

    // ========================================================================
    // Insert / remove
    // ========================================================================

    /// Inserts a copy of `element` at `index`.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidArgument`] if `element.len() != element_size`
    /// - [`Error::IndexOutOfRange`] if `index > len`
    /// - [`Error::AllocationFailed`] if the node cannot be allocated
    pub fn insert(&mut self, index: usize, element: &[u8]) -> Result<()> {
        self.state.ensure_live()?;
        check_width(element, self.element_size)?;
        if index > self.len {
            return Err(Error::out_of_range(index, self.len));
        }

        let data = copy_element(element)?;
        let prev = match index {
            0 => u32::NONE,
            _ => self.key_at(index - 1),
        };
        let next = if prev.is_none() {
            self.head
        } else {
            self.nodes[prev].next
        };
        let key = self.nodes.try_insert(Node { data, next })?;
        self.set_link(prev, key);
        self.len += 1;
        Ok(())
    }

    /// Inserts a copy of `element` before the first node.
    pub fn prepend(&mut self, element: &[u8]) -> Result<()> {
        self.insert(0, element)
    }

    /// Inserts a copy of `element` after the last node.
    pub fn append(&mut self, element: &[u8]) -> Result<()> {
        self.state.ensure_live()?;
        let len = self.len;
        self.insert(len, element)
    }

    /// Unlinks and frees the node at `index`.
    ///
    /// # Errors
    ///
    /// [`Error::IndexOutOfRange`] if `index >= len`.
    pub fn remove(&mut self, index: usize) -> Result<()> {
        self.check_index(index)?;

        let key = match index {
            0 => {
                let key = self.head;
                self.head = self.nodes[key].next;
                key
            }
            _ => {
                let prev = self.key_at(index - 1);
                let key = self.nodes[prev].next;
                let next = self.nodes[key].next;
                self.nodes[prev].next = next;
                key
            }
        };

        self.nodes.remove(key);
        self.len -= 1;
        debug_assert_eq!(self.nodes.len(), self.len);
        Ok(())
    }

    // ========================================================================
    // Element access
    // ========================================================================

    /// Returns the bytes of the node at `index`.
    ///
    /// # Errors
    ///
    /// [`Error::IndexOutOfRange`] if `index >= len`.
    pub fn get(&self, index: usize) -> Result<&[u8]> {
        self.check_index(index)?;
        Ok(&self.nodes[self.key_at(index)].data[..])
    }

    /// Returns the bytes of the node at `index` for in-place mutation.
    pub fn get_mut(&mut self, index: usize) -> Result<&mut [u8]> {
        self.check_index(index)?;
        let key = self.key_at(index);
        Ok(&mut self.nodes[key].data[..])
    }

    /// Overwrites the bytes of the node at `index`.
    pub fn set(&mut self, index: usize, element: &[u8]) -> Result<()> {
        self.state.ensure_live()?;
        check_width(element, self.element_size)?;
        self.get_mut(index)?.copy_from_slice(element);
        Ok(())
    }

    /// Returns the index of the first node byte-equal to `element`.
    ///
    /// # Errors
    ///
    /// [`Error::NotFound`] if no node matches.
    pub fn find(&self, element: &[u8]) -> Result<usize> {
        self.state.ensure_live()?;
        check_width(element, self.element_size)?;
        self.iter()?
            .position(|data| data == element)
            .ok_or(Error::NotFound)
    }

    // ========================================================================
    // Traversal
    // ========================================================================

    /// Calls `visitor` on each node's bytes from head to tail.
    pub fn iterate<F>(&mut self, mut visitor: F) -> Result<()>
    where
        F: FnMut(&mut [u8]),
    {
        self.state.ensure_live()?;
        let mut key = self.head;
        while key.is_some() {
            let node = &mut self.nodes[key];
            visitor(&mut node.data);
            key = node.next;
        }
        Ok(())
    }

    /// Returns an iterator over node bytes from head to tail.
    pub fn iter(&self) -> Result<Iter<'_>> {
        self.state.ensure_live()?;
        Ok(Iter {
            nodes: &self.nodes,
            current: self.head,
            remaining: self.len,
        })
    }

    // ========================================================================
    // Reordering
    // ========================================================================

    /// Exchanges the positions of the nodes at `a` and `b` by relinking.
    /// Node bytes are not copied. `a == b` is a no-op.
    ///
    /// # Errors
    ///
    /// [`Error::IndexOutOfRange`] if either index is `>= len`.
    pub fn swap(&mut self, a: usize, b: usize) -> Result<()> {
        self.check_index(a)?;
        self.check_index(b)?;
        if a == b {
            return Ok(());
        }
        let (lo, hi) = if a < b { (a, b) } else { (b, a) };

        // One walk collects both predecessors and both nodes.
        let mut prev_lo = u32::NONE;
        let mut prev_hi = u32::NONE;
        let mut key = self.head;
        for position in 0..hi {
            if position + 1 == lo {
                prev_lo = key;
            }
            if position + 1 == hi {
                prev_hi = key;
            }
            key = self.nodes[key].next;
        }
        let node_hi = key;
        let node_lo = match lo {
            0 => self.head,
            _ => self.nodes[prev_lo].next,
        };

        let after_hi = self.nodes[node_hi].next;
        if hi == lo + 1 {
            // prev_lo -> lo -> hi -> after  becomes  prev_lo -> hi -> lo -> after
            self.nodes[node_hi].next = node_lo;
            self.nodes[node_lo].next = after_hi;
        } else {
            let after_lo = self.nodes[node_lo].next;
            self.nodes[node_hi].next = after_lo;
            self.nodes[node_lo].next = after_hi;
            self.nodes[prev_hi].next = node_lo;
        }
        self.set_link(prev_lo, node_hi);
        Ok(())
    }

    /// Sorts the list in place with `compare`.
    ///
    /// Same quicksort and pivot policy as [`ByteArray::sort`](crate::ByteArray::sort):
    /// the last element of each partition is the pivot and elements move
    /// before it only when `compare` returns `Less`. Node keys are gathered
    /// into a position-ordered buffer first, the buffer is sorted, and the
    /// chain is relinked in the resulting order.
    ///
    /// # Errors
    ///
    /// [`Error::AllocationFailed`] if the key buffer or the sort's work
    /// stack cannot be allocated; the list is unchanged.
    pub fn sort<F>(&mut self, compare: F) -> Result<()>
    where
        F: FnMut(&[u8], &[u8]) -> Ordering,
    {
        self.state.ensure_live()?;
        if self.len < 2 {
            return Ok(());
        }
        trace!("sorting list of {} nodes", self.len);

        let mut keys: Vec<u32> = Vec::new();
        keys.try_reserve_exact(self.len)
            .map_err(|_| Error::alloc(self.len.saturating_mul(size_of::<u32>())))?;
        let mut key = self.head;
        while key.is_some() {
            keys.push(key);
            key = self.nodes[key].next;
        }

        let mut slots = KeySlots {
            keys: &mut keys,
            nodes: &self.nodes,
            compare,
        };
        quicksort(&mut slots, self.len)?;

        self.head = keys[0];
        for pair in keys.windows(2) {
            self.nodes[pair[0]].next = pair[1];
        }
        if let Some(&last) = keys.last() {
            self.nodes[last].next = u32::NONE;
        }
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

    /// Key of the node at `index`. Caller guarantees `index < len`.
    fn key_at(&self, index: usize) -> u32 {
        let mut key = self.head;
        for _ in 0..index {
            key = self.nodes[key].next;
        }
        key
    }

    /// Points `prev.next` (or `head` when `prev` is `NONE`) at `key`.
    #[inline]
    fn set_link(&mut self, prev: u32, key: u32) {
        if prev.is_none() {
            self.head = key;
        } else {
            self.nodes[prev].next = key;
        }
    }
}

/// Iterator over node bytes, head to tail.
#[derive(Debug, Clone)]
pub struct Iter<'a> {
    nodes: &'a NodeStorage<Node>,
    current: u32,
    remaining: usize,
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a [u8];

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        if self.current.is_none() {
            return None;
        }
        let node = &self.nodes[self.current];
        self.current = node.next;
        self.remaining -= 1;
        Some(&node.data[..])
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for Iter<'_> {}

struct KeySlots<'a, F> {
    keys: &'a mut [u32],
    nodes: &'a NodeStorage<Node>,
    compare: F,
}

impl<F> SortSlots for KeySlots<'_, F>
where
    F: FnMut(&[u8], &[u8]) -> Ordering,
{
    #[inline]
    fn less(&mut self, a: usize, b: usize) -> bool {
        let lhs = &self.nodes[self.keys[a]].data;
        let rhs = &self.nodes[self.keys[b]].data;
        (self.compare)(lhs, rhs) == Ordering::Less
    }

    #[inline]
    fn swap(&mut self, a: usize, b: usize) {
        self.keys.swap(a, b);
    }
}

fn check_element_size(element_size: usize) -> Result<()> {
    if element_size == 0 {
        return Err(Error::InvalidArgument("element size must be > 0"));
    }
    Ok(())
}

fn copy_element(element: &[u8]) -> Result<Box<[u8]>> {
    let mut data = Vec::new();
    data.try_reserve_exact(element.len())
        .map_err(|_| Error::alloc(element.len()))?;
    data.extend_from_slice(element);
    Ok(data.into_boxed_slice())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn int(v: i32) -> [u8; 4] {
        v.to_ne_bytes()
    }

    fn ints(list: &ByteList) -> Vec<i32> {
        list.iter()
            .unwrap()
            .map(|b| i32::from_ne_bytes(b.try_into().unwrap()))
            .collect()
    }

    fn list_of(values: &[i32]) -> ByteList {
        let mut list = ByteList::new(4).unwrap();
        for &v in values {
            list.append(&int(v)).unwrap();
        }
        list
    }

    fn by_int(a: &[u8], b: &[u8]) -> Ordering {
        let a = i32::from_ne_bytes(a.try_into().unwrap());
        let b = i32::from_ne_bytes(b.try_into().unwrap());
        a.cmp(&b)
    }

    /// Key of each position, head to tail.
    fn keys(list: &ByteList) -> Vec<u32> {
        (0..list.len).map(|i| list.key_at(i)).collect()
    }

    /// Chain length agrees with `len` and the arena.
    fn assert_consistent(list: &ByteList) {
        let mut count = 0;
        let mut key = list.head;
        while key.is_some() {
            count += 1;
            assert!(count <= list.len, "chain longer than len");
            key = list.nodes[key].next;
        }
        assert_eq!(count, list.len);
        assert_eq!(list.nodes.len(), list.len);
    }

    #[test]
    fn new_list_is_empty() {
        let list = ByteList::new(4).unwrap();
        assert_eq!(list.len(), Ok(0));
        assert_eq!(list.is_empty(), Ok(true));
        assert_eq!(list.element_size(), Ok(4));
        assert!(list.head.is_none());
    }

    #[test]
    fn new_rejects_zero_width() {
        assert!(matches!(ByteList::new(0), Err(Error::InvalidArgument(_))));
        assert!(matches!(
            ByteList::with_capacity(0, 8),
            Err(Error::InvalidArgument(_))
        ));
        // Width is checked before the arena is reserved.
        assert!(matches!(
            ByteList::with_capacity(0, usize::MAX),
            Err(Error::InvalidArgument(_))
        ));
    }

    #[test]
    fn with_capacity_preallocates() {
        let mut list = ByteList::with_capacity(4, 32).unwrap();
        assert_eq!(list.len(), Ok(0));
        for v in 0..32 {
            list.append(&int(v)).unwrap();
        }
        assert_eq!(list.nodes.len(), 32);
    }

    #[test]
    fn append_prepend_insert() {
        let mut list = ByteList::new(4).unwrap();
        list.append(&int(42)).unwrap();
        list.prepend(&int(7)).unwrap();
        list.append(&int(98)).unwrap();
        list.insert(1, &int(15)).unwrap();

        assert_eq!(ints(&list), vec![7, 15, 42, 98]);
        assert_consistent(&list);
    }

    #[test]
    fn insert_out_of_range() {
        let mut list = list_of(&[1]);
        assert_eq!(list.insert(2, &int(0)), Err(Error::out_of_range(2, 1)));
        assert_eq!(ints(&list), vec![1]);
    }

    #[test]
    fn insert_wrong_width() {
        let mut list = list_of(&[1]);
        assert!(matches!(
            list.append(&[0u8; 8]),
            Err(Error::InvalidArgument(_))
        ));
        assert_consistent(&list);
    }

    #[test]
    fn remove_head_middle_tail() {
        let mut list = list_of(&[7, 15, 42, 98]);
        list.remove(1).unwrap();
        assert_eq!(ints(&list), vec![7, 42, 98]);
        list.remove(0).unwrap();
        assert_eq!(ints(&list), vec![42, 98]);
        list.remove(1).unwrap();
        assert_eq!(ints(&list), vec![42]);
        list.remove(0).unwrap();
        assert_eq!(list.is_empty(), Ok(true));
        assert!(list.head.is_none());
        assert_eq!(list.remove(0), Err(Error::out_of_range(0, 0)));
        assert_consistent(&list);
    }

    #[test]
    fn remove_frees_node() {
        let mut list = list_of(&[1, 2, 3]);
        list.remove(1).unwrap();
        assert_eq!(list.nodes.len(), 2);
        // Freed arena slot is reused by the next insert.
        list.append(&int(4)).unwrap();
        assert_eq!(list.nodes.len(), 3);
        assert_eq!(ints(&list), vec![1, 3, 4]);
    }

    #[test]
    fn get_set_get_mut() {
        let mut list = list_of(&[1, 2, 3]);
        assert_eq!(list.get(2), Ok(&int(3)[..]));
        list.set(0, &int(10)).unwrap();
        list.get_mut(1).unwrap().copy_from_slice(&int(20));
        assert_eq!(ints(&list), vec![10, 20, 3]);
        assert_eq!(list.get(3), Err(Error::out_of_range(3, 3)));
        assert!(matches!(list.set(0, &[1]), Err(Error::InvalidArgument(_))));
    }

    #[test]
    fn stores_copies() {
        let mut source = int(5);
        let mut list = ByteList::new(4).unwrap();
        list.append(&source).unwrap();
        source = int(6);
        assert_eq!(list.get(0), Ok(&int(5)[..]));
        assert_ne!(list.get(0), Ok(&source[..]));
    }

    #[test]
    fn find_first_match() {
        let list = list_of(&[4, 8, 4]);
        assert_eq!(list.find(&int(4)), Ok(0));
        assert_eq!(list.find(&int(8)), Ok(1));
        assert_eq!(list.find(&int(1)), Err(Error::NotFound));
        assert_eq!(ByteList::new(4).unwrap().find(&int(1)), Err(Error::NotFound));
    }

    #[test]
    fn iterate_mutates() {
        let mut list = list_of(&[1, 2, 3]);
        list.iterate(|data| {
            let v = i32::from_ne_bytes((&*data).try_into().unwrap());
            data.copy_from_slice(&(v + 100).to_ne_bytes());
        })
        .unwrap();
        assert_eq!(ints(&list), vec![101, 102, 103]);
        assert_eq!(list.iter().unwrap().len(), 3);
    }

    #[test]
    fn swap_relinks_nodes() {
        let mut list = list_of(&[0, 1, 2, 3, 4]);
        let before = keys(&list);

        list.swap(1, 3).unwrap();
        assert_eq!(ints(&list), vec![0, 3, 2, 1, 4]);
        // Keys moved with their bytes: relinked, not copied.
        let after = keys(&list);
        assert_eq!(after, vec![before[0], before[3], before[2], before[1], before[4]]);
        assert_consistent(&list);
    }

    #[test]
    fn swap_adjacent() {
        let mut list = list_of(&[0, 1, 2, 3]);
        list.swap(1, 2).unwrap();
        assert_eq!(ints(&list), vec![0, 2, 1, 3]);
        list.swap(3, 2).unwrap();
        assert_eq!(ints(&list), vec![0, 2, 3, 1]);
        assert_consistent(&list);
    }

    #[test]
    fn swap_with_head_and_tail() {
        let mut list = list_of(&[0, 1, 2, 3]);
        list.swap(0, 3).unwrap();
        assert_eq!(ints(&list), vec![3, 1, 2, 0]);
        list.swap(0, 1).unwrap();
        assert_eq!(ints(&list), vec![1, 3, 2, 0]);
        list.append(&int(9)).unwrap();
        assert_eq!(ints(&list), vec![1, 3, 2, 0, 9]);
        assert_consistent(&list);

        let mut pair = list_of(&[1, 2]);
        pair.swap(1, 0).unwrap();
        assert_eq!(ints(&pair), vec![2, 1]);
        assert_consistent(&pair);
    }

    #[test]
    fn swap_same_and_out_of_range() {
        let mut list = list_of(&[1, 2]);
        list.swap(1, 1).unwrap();
        assert_eq!(ints(&list), vec![1, 2]);
        assert_eq!(list.swap(0, 2), Err(Error::out_of_range(2, 2)));
        assert_eq!(ints(&list), vec![1, 2]);
    }

    #[test]
    fn sort_matches_array_order() {
        let input = [37, -12, 94, 0, -56, 789, 23, -987, 456, -72];
        let mut list = list_of(&input);
        list.sort(by_int).unwrap();
        assert_eq!(
            ints(&list),
            vec![-987, -72, -56, -12, 0, 23, 37, 94, 456, 789]
        );
        assert_consistent(&list);

        // Appending after a sort links onto the new tail.
        list.append(&int(1000)).unwrap();
        assert_eq!(list.get(10), Ok(&int(1000)[..]));
    }

    #[test]
    fn sort_small_lists() {
        let mut empty = ByteList::new(4).unwrap();
        empty.sort(by_int).unwrap();
        assert_eq!(empty.len(), Ok(0));

        let mut one = list_of(&[5]);
        one.sort(by_int).unwrap();
        assert_eq!(ints(&one), vec![5]);
    }

    #[test]
    fn sort_keeps_keys_with_bytes() {
        let mut list = list_of(&[3, 1, 2]);
        let before = keys(&list);
        list.sort(by_int).unwrap();
        assert_eq!(keys(&list), vec![before[1], before[2], before[0]]);
    }

    #[test]
    fn clear_keeps_list_usable() {
        let mut list = list_of(&[1, 2, 3]);
        list.clear().unwrap();
        assert_eq!(list.len(), Ok(0));
        assert_eq!(list.nodes.len(), 0);
        list.append(&int(8)).unwrap();
        assert_eq!(ints(&list), vec![8]);
    }

    #[test]
    fn destroyed_rejects_everything() {
        let mut list = list_of(&[1, 2]);
        list.destroy().unwrap();

        assert_eq!(list.destroy(), Err(Error::NullReference));
        assert_eq!(list.clear(), Err(Error::NullReference));
        assert_eq!(list.len(), Err(Error::NullReference));
        assert_eq!(list.is_empty(), Err(Error::NullReference));
        assert_eq!(list.element_size(), Err(Error::NullReference));
        assert_eq!(list.append(&int(1)), Err(Error::NullReference));
        assert_eq!(list.prepend(&int(1)), Err(Error::NullReference));
        assert_eq!(list.insert(0, &int(1)), Err(Error::NullReference));
        assert_eq!(list.remove(0), Err(Error::NullReference));
        assert_eq!(list.get(0), Err(Error::NullReference));
        assert_eq!(list.set(0, &int(1)), Err(Error::NullReference));
        assert_eq!(list.find(&int(1)), Err(Error::NullReference));
        assert_eq!(list.swap(0, 1), Err(Error::NullReference));
        assert_eq!(list.iterate(|_| {}), Err(Error::NullReference));
        assert_eq!(list.sort(by_int), Err(Error::NullReference));
        assert!(list.iter().is_err());
    }
}

// Cycle counts come from `rdtscp`, so these only build on x86_64.
#[cfg(all(test, target_arch = "x86_64"))]
mod bench_list {
    use super::*;
    use hdrhistogram::Histogram;

    #[inline]
    fn rdtscp() -> u64 {
        // SAFETY: rdtscp is available on every x86_64 target we bench on.
        unsafe { core::arch::x86_64::__rdtscp(&mut 0) }
    }

    fn print_histogram(name: &str, hist: &Histogram<u64>) {
        println!(
            "{:24} p50: {:4} cycles | p99: {:4} cycles | p999: {:5} cycles | min: {:4} | max: {:5}",
            name,
            hist.value_at_quantile(0.50),
            hist.value_at_quantile(0.99),
            hist.value_at_quantile(0.999),
            hist.min(),
            hist.max(),
        );
    }

    const WARMUP: usize = 10_000;
    const ITERATIONS: usize = 100_000;

    #[test]
    #[ignore]
    fn bench_list_prepend() {
        let mut list = ByteList::with_capacity(8, 1).unwrap();
        let mut hist = Histogram::<u64>::new(3).unwrap();

        for i in 0..WARMUP {
            let _ = list.prepend(&(i as u64).to_ne_bytes());
            let _ = list.remove(0);
        }

        for i in 0..ITERATIONS {
            let start = rdtscp();
            let _ = list.prepend(&(i as u64).to_ne_bytes());
            let elapsed = rdtscp() - start;
            hist.record(elapsed).unwrap();
            let _ = list.remove(0);
        }

        print_histogram("prepend", &hist);
    }

    #[test]
    #[ignore]
    fn bench_list_get_head() {
        let mut list = ByteList::new(8).unwrap();
        for i in 0..64u64 {
            list.append(&i.to_ne_bytes()).unwrap();
        }
        let mut hist = Histogram::<u64>::new(3).unwrap();

        for _ in 0..WARMUP {
            std::hint::black_box(list.get(0).unwrap());
        }

        for _ in 0..ITERATIONS {
            let start = rdtscp();
            std::hint::black_box(list.get(0).unwrap());
            let elapsed = rdtscp() - start;
            hist.record(elapsed).unwrap();
        }

        print_histogram("get(0)", &hist);
    }

    #[test]
    #[ignore]
    fn bench_list_sort_1k() {
        let mut hist = Histogram::<u64>::new(3).unwrap();
        let values: Vec<i64> = (0..1_000).map(|i| (i * 7_919) % 1_009).collect();

        for _ in 0..100 {
            let mut list = ByteList::new(8).unwrap();
            for v in &values {
                list.append(&v.to_ne_bytes()).unwrap();
            }
            let start = rdtscp();
            list.sort(|a, b| {
                let a = i64::from_ne_bytes(a.try_into().unwrap());
                let b = i64::from_ne_bytes(b.try_into().unwrap());
                a.cmp(&b)
            })
            .unwrap();
            let elapsed = rdtscp() - start;
            hist.record(elapsed).unwrap();
        }

        print_histogram("sort 1k", &hist);
    }
}
