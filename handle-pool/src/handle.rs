//! Handles, and how they are packed into a single integer
//!
//! A handle is a `(slot index, generation)` pair. The index lives in the low half of the
//! packed integer and the generation in the high half. Since no live slot ever has a generation
//! of zero, the all-zero value can never name a live value, and is reserved as the null handle.
//!
//! ```
//! use handle_pool::handle::Handle32;
//!
//! let handle = Handle32::encode(3, 7);
//! assert_eq!(handle.decode(), (3, 7));
//! assert_eq!(handle.to_bits(), 0x0007_0003);
//!
//! assert!(Handle32::NULL.is_null());
//! assert!(Handle32::default().is_null());
//! assert!(!handle.is_null());
//! ```

use core::{fmt, hash::Hash};

use crate::{generation::Generation, internal_index::InternalIndex};

/// The interface shared by all handle widths
///
/// This trait is sealed, it is implemented by [`Handle32`] and [`Handle64`]
pub trait PoolHandle: Copy + Ord + Hash + Default + fmt::Debug + crate::seal::Seal {
    /// The slot index half of the handle
    type Index: InternalIndex;

    /// The generation half of the handle
    type Generation: Generation;

    /// The handle that never refers to a value
    const NULL: Self;

    /// Pack a slot index and a generation into a handle
    fn encode(index: Self::Index, generation: Self::Generation) -> Self;

    /// Unpack the slot index and generation of a handle
    fn decode(self) -> (Self::Index, Self::Generation);

    /// Returns true if this is the null handle
    fn is_null(self) -> bool;
}

macro_rules! handle {
    (
        $(#[$meta:meta])*
        $name:ident($bits:ident)

        index: $index:ident,
        generation: $generation:ident,
    ) => {
        $(#[$meta])*
        #[repr(transparent)]
        #[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
        pub struct $name($bits);

        impl $name {
            /// The handle that never refers to a value
            pub const NULL: Self = Self(0);

            #[doc = concat!("Pack a slot index and a generation into a [`", stringify!($name), "`]")]
            #[inline]
            pub const fn encode(index: $index, generation: $generation) -> Self {
                Self(((generation as $bits) << <$index>::BITS) | index as $bits)
            }

            /// Unpack the slot index and generation
            #[inline]
            pub const fn decode(self) -> ($index, $generation) {
                (self.index(), self.generation())
            }

            /// The slot index this handle refers to
            #[inline]
            pub const fn index(self) -> $index {
                self.0 as $index
            }

            /// The generation this handle was issued with
            #[inline]
            pub const fn generation(self) -> $generation {
                (self.0 >> <$index>::BITS) as $generation
            }

            /// Returns true if this is the null handle
            #[inline]
            pub const fn is_null(self) -> bool {
                self.0 == 0
            }

            /// The packed representation
            #[inline]
            pub const fn to_bits(self) -> $bits {
                self.0
            }

            /// Rebuild a handle from its packed representation
            ///
            /// A handle made up this way is checked like any other when it is used, but it
            /// may happen to match a live value if it guesses the right generation.
            #[inline]
            pub const fn from_bits(bits: $bits) -> Self {
                Self(bits)
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                if self.is_null() {
                    return f.write_str(concat!(stringify!($name), "(null)"));
                }

                f.debug_struct(stringify!($name))
                    .field("index", &self.index())
                    .field("generation", &self.generation())
                    .finish()
            }
        }

        impl crate::seal::Seal for $name {}

        impl PoolHandle for $name {
            type Index = $index;
            type Generation = $generation;

            const NULL: Self = Self(0);

            #[inline]
            fn encode(index: $index, generation: $generation) -> Self {
                $name::encode(index, generation)
            }

            #[inline]
            fn decode(self) -> ($index, $generation) {
                $name::decode(self)
            }

            #[inline]
            fn is_null(self) -> bool {
                $name::is_null(self)
            }
        }
    };
}

handle!(
    /// A 32-bit handle, with a 16-bit slot index and a 16-bit generation
    ///
    /// A pool using this handle holds at most `2^16` slots
    Handle32(u32)

    index: u16,
    generation: u16,
);

handle!(
    /// A 64-bit handle, with a 32-bit slot index and a 32-bit generation
    ///
    /// A pool using this handle holds at most `2^32` slots
    Handle64(u64)

    index: u32,
    generation: u32,
);
