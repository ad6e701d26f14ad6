//! see [`InternalIndex`]

/// The integer type a handle uses for its slot index
///
/// The same type is used for the dense positions stored inside the pool, since there can never
/// be more live values than there are slots.
pub trait InternalIndex:
    Copy + Eq + Ord + core::hash::Hash + core::fmt::Debug + crate::seal::Seal
{
    /// The number of slots addressable by this index type, i.e. `2^BITS`
    ///
    /// Clamped to [`usize::MAX`] if the index space is larger than the address space
    const SLOT_LIMIT: usize;

    /// Tries to convert a usize to Self, returning [`None`] if it is too large
    fn try_from_usize(x: usize) -> Option<Self>;

    /// Converts a usize to Self
    ///
    /// `x` must be less than [`InternalIndex::SLOT_LIMIT`], this is only checked in debug builds
    fn from_usize(x: usize) -> Self;

    /// converts self to a usize, and will preserve any legal values passed to
    /// [`InternalIndex::from_usize`] or [`InternalIndex::try_from_usize`]
    fn to_usize(self) -> usize;
}

macro_rules! prim {
    ($ty:ident) => {
        impl InternalIndex for $ty {
            const SLOT_LIMIT: usize = match (<$ty>::MAX as usize).checked_add(1) {
                Some(limit) => limit,
                None => usize::MAX,
            };

            #[inline]
            fn try_from_usize(x: usize) -> Option<Self> {
                x.try_into().ok()
            }

            #[inline]
            fn from_usize(x: usize) -> Self {
                debug_assert!(Self::try_from(x).is_ok(), "{x} does not fit in a slot index");
                x as Self
            }

            #[inline]
            fn to_usize(self) -> usize {
                self as usize
            }
        }
    };
}

prim!(u16);
prim!(u32);

#[cfg(test)]
mod tests {
    use super::InternalIndex;

    #[test]
    fn slot_limit() {
        assert_eq!(<u16 as InternalIndex>::SLOT_LIMIT, 1 << 16);
        #[cfg(target_pointer_width = "64")]
        assert_eq!(<u32 as InternalIndex>::SLOT_LIMIT, 1 << 32);
    }

    #[test]
    fn conversions() {
        assert_eq!(u16::try_from_usize(65_535), Some(u16::MAX));
        assert_eq!(u16::try_from_usize(65_536), None);
        assert_eq!(u32::from_usize(7).to_usize(), 7);
    }
}
