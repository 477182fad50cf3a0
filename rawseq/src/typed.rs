//! Typed access for [`Pod`] values.
//!
//! Both containers are byte-oriented. This layer marshals plain-old-data
//! values in and out as exactly `size_of::<T>()` bytes, so callers storing
//! integers or `#[repr(C)]` records don't have to go through `to_ne_bytes`
//! by hand. Reads copy unaligned because the backing storage is a plain
//! byte buffer.
//!
//! ```
//! use rawseq::{ByteArray, ByteList};
//!
//! let mut arr = ByteArray::for_type::<i32>(4)?;
//! for v in [37, -12, 94, 0] {
//!     arr.push_value(v)?;
//! }
//! arr.sort_values::<i32>()?;
//! assert_eq!(arr.to_vec_of::<i32>()?, vec![-12, 0, 37, 94]);
//!
//! let mut list = ByteList::for_type::<u64>()?;
//! list.push_value(7u64)?;
//! assert_eq!(list.value_at::<u64>(0)?, 7);
//! # Ok::<(), rawseq::Error>(())
//! ```

use core::mem::size_of;

use bytemuck::Pod;

use crate::{ByteArray, ByteList, Error, Result};

const WIDTH_MISMATCH: &str = "value type width does not match element size";

#[inline]
fn read<T: Pod>(bytes: &[u8]) -> Result<T> {
    bytemuck::try_pod_read_unaligned(bytes).map_err(|_| Error::InvalidArgument(WIDTH_MISMATCH))
}

#[inline]
fn check_type<T>(element_size: usize) -> Result<()> {
    if size_of::<T>() == element_size {
        Ok(())
    } else {
        Err(Error::InvalidArgument(WIDTH_MISMATCH))
    }
}

/// Generates the typed methods shared by both containers. Each container
/// already exposes the byte-level operations these forward to.
macro_rules! impl_typed {
    ($container:ty) => {
        impl $container {
            /// Appends `value`.
            ///
            /// # Errors
            ///
            /// [`Error::InvalidArgument`] if `size_of::<T>()` differs from the
            /// element size, plus any error of the byte-level `append`.
            pub fn push_value<T: Pod>(&mut self, value: T) -> Result<()> {
                self.append(bytemuck::bytes_of(&value))
            }

            /// Inserts `value` at `index`.
            pub fn insert_value<T: Pod>(&mut self, index: usize, value: T) -> Result<()> {
                self.insert(index, bytemuck::bytes_of(&value))
            }

            /// Overwrites the element at `index` with `value`.
            pub fn set_value<T: Pod>(&mut self, index: usize, value: T) -> Result<()> {
                self.set(index, bytemuck::bytes_of(&value))
            }

            /// Reads the element at `index` as a `T`.
            pub fn value_at<T: Pod>(&self, index: usize) -> Result<T> {
                read(self.get(index)?)
            }

            /// Index of the first element equal to `value`.
            pub fn find_value<T: Pod>(&self, value: T) -> Result<usize> {
                self.find(bytemuck::bytes_of(&value))
            }

            /// Sorts elements ascending by their `T` ordering.
            pub fn sort_values<T: Pod + Ord>(&mut self) -> Result<()> {
                check_type::<T>(self.element_size()?)?;
                self.sort(|a, b| {
                    let a: T = bytemuck::pod_read_unaligned(a);
                    let b: T = bytemuck::pod_read_unaligned(b);
                    a.cmp(&b)
                })
            }

            /// Copies every element out as a `T`, in order.
            pub fn to_vec_of<T: Pod>(&self) -> Result<Vec<T>> {
                check_type::<T>(self.element_size()?)?;
                self.iter()?.map(read::<T>).collect()
            }
        }
    };
}

impl_typed!(ByteArray);
impl_typed!(ByteList);

impl ByteArray {
    /// Creates an array whose elements are `T`-sized, with `capacity` slots.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidArgument`] if `T` is zero-sized or `capacity` is 0.
    pub fn for_type<T: Pod>(capacity: usize) -> Result<Self> {
        Self::new(size_of::<T>(), capacity)
    }
}

impl ByteList {
    /// Creates an empty list whose elements are `T`-sized.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidArgument`] if `T` is zero-sized.
    pub fn for_type<T: Pod>() -> Result<Self> {
        Self::new(size_of::<T>())
    }
}
