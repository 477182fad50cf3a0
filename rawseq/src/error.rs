//! Error type shared by [`ByteArray`](crate::ByteArray) and
//! [`ByteList`](crate::ByteList).

use thiserror::Error;

/// Failure reported by a container operation.
///
/// Every operation validates before it mutates, so receiving an `Error`
/// means the container is exactly as it was before the call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Error {
    /// An argument was rejected (zero element size, zero capacity, or an
    /// element slice whose length differs from the container's element size).
    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),

    /// Memory for `bytes` bytes could not be reserved, or the size
    /// computation overflowed.
    #[error("allocation of {bytes} bytes failed")]
    AllocationFailed {
        /// Requested allocation size (saturated on overflow).
        bytes: usize,
    },

    /// `index` is outside the valid range for a container of length `len`.
    #[error("index {index} out of range for length {len}")]
    IndexOutOfRange {
        /// The offending index.
        index: usize,
        /// Logical length at the time of the call.
        len: usize,
    },

    /// A linear search found no matching element.
    #[error("element not found")]
    NotFound,

    /// The container was destroyed and can no longer be used.
    #[error("container has been destroyed")]
    NullReference,
}

/// Result alias used throughout the crate.
pub type Result<T> = core::result::Result<T, Error>;

impl Error {
    pub(crate) const fn out_of_range(index: usize, len: usize) -> Self {
        Error::IndexOutOfRange { index, len }
    }

    pub(crate) const fn alloc(bytes: usize) -> Self {
        Error::AllocationFailed { bytes }
    }
}

/// Checks that `element` is exactly `element_size` bytes wide.
#[inline]
pub(crate) fn check_width(element: &[u8], element_size: usize) -> Result<()> {
    if element.len() == element_size {
        Ok(())
    } else {
        Err(Error::InvalidArgument("element width does not match element size"))
    }
}
