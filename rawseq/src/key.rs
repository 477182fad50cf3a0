//! Node handle type for [`NodeStorage`](crate::storage::NodeStorage).
//!
//! Links between list nodes are stored as plain integers with a reserved
//! sentinel (`NONE`, the type's `MAX`) instead of `Option<K>`, which keeps a
//! node's link field the size of the integer itself.

/// A copyable node key with a sentinel "no node" value.
pub(crate) trait Key: Copy + Eq + core::fmt::Debug {
    /// Sentinel value marking the end of a chain.
    const NONE: Self;

    /// Number of distinct keys available before `NONE`.
    const MAX_SLOTS: usize;

    /// Returns `true` if this is the sentinel.
    #[inline]
    fn is_none(self) -> bool {
        self == Self::NONE
    }

    /// Returns `true` if this is not the sentinel.
    #[inline]
    fn is_some(self) -> bool {
        !self.is_none()
    }

    /// Slot position addressed by this key.
    fn as_usize(self) -> usize;

    /// Key for slot position `val`. `val` must be below `MAX_SLOTS`.
    fn from_usize(val: usize) -> Self;
}

macro_rules! impl_key_for_unsigned {
    ($($ty:ty),*) => {
        $(
            impl Key for $ty {
                const NONE: Self = <$ty>::MAX;
                const MAX_SLOTS: usize = {
                    if (<$ty>::MAX as u128) < (usize::MAX as u128) {
                        <$ty>::MAX as usize
                    } else {
                        usize::MAX
                    }
                };

                #[inline]
                fn as_usize(self) -> usize {
                    self as usize
                }

                #[inline]
                fn from_usize(val: usize) -> Self {
                    debug_assert!(val < Self::MAX_SLOTS);
                    val as Self
                }
            }
        )*
    };
}

impl_key_for_unsigned!(u8, u16, u32, u64, usize);
