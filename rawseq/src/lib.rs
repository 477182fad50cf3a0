//! Sequences of run-time sized elements.
//!
//! Element width is chosen when a container is created, not by a type
//! parameter. Elements go in and come out as byte slices of exactly that
//! width, and the containers store copies.
//!
//! # Containers
//!
//! | Container | Layout | Indexed access | Insert / remove |
//! |-----------|--------|----------------|-----------------|
//! | [`ByteArray`] | one contiguous buffer | O(1) | O(n) shift, amortized O(1) append |
//! | [`ByteList`] | singly-linked nodes in a slab | O(index) walk | O(index) walk, O(1) relink |
//!
//! Both offer the same vocabulary: `insert`, `append`, `get`, `set`, `remove`,
//! `find`, `swap`, `iterate`, `sort`, `clear` and `destroy`.
//!
//! # Quick Start
//!
//! ```
//! use rawseq::{ByteArray, ByteList};
//!
//! let mut arr = ByteArray::new(4, 1)?;
//! for v in [37i32, -12, 94] {
//!     arr.append(&v.to_ne_bytes())?;
//! }
//! arr.sort(|a, b| {
//!     let a = i32::from_ne_bytes(a.try_into().unwrap());
//!     let b = i32::from_ne_bytes(b.try_into().unwrap());
//!     a.cmp(&b)
//! })?;
//! assert_eq!(arr.get(0)?, &(-12i32).to_ne_bytes());
//!
//! let mut list = ByteList::new(4)?;
//! list.append(&1i32.to_ne_bytes())?;
//! list.prepend(&0i32.to_ne_bytes())?;
//! assert_eq!(list.find(&1i32.to_ne_bytes())?, 1);
//! # Ok::<(), rawseq::Error>(())
//! ```
//!
//! # Errors
//!
//! Every operation returns [`Result`]. Arguments are validated before anything
//! is mutated, and allocation is fallible, so on any error the container is
//! exactly as it was. After `destroy` a container rejects every call with
//! [`Error::NullReference`].
//!
//! # Sorting
//!
//! Both containers sort with the same in-place quicksort: the last element
//! of each partition is the pivot, and only elements the comparator reports
//! as [`Less`](core::cmp::Ordering::Less) move before it. The sort is not
//! stable, but for a given input and comparator the array and the list
//! produce the same order.
//!
//! # Feature Flags
//!
//! - `bytemuck` (default) - typed `push_value` / `value_at` / `sort_values`
//!   helpers for [`Pod`](bytemuck::Pod) element types

#![warn(missing_docs)]

pub mod array;
mod error;
mod key;
pub mod list;
mod sort;
mod state;
mod storage;
#[cfg(feature = "bytemuck")]
mod typed;

pub use array::{ArrayBuilder, ByteArray};
pub use error::{Error, Result};
pub use list::ByteList;

pub(crate) use key::Key;
pub(crate) use storage::NodeStorage;
