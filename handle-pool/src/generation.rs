//! generations are used for two purposes, to track if a given slot is occupied and to harden
//! against the ABA-problem
//!
//! see [`Generation`] for details

use core::{fmt, hash::Hash};

/// [`Generation`] is the tag a slot carries to tell the handles pointing at it apart
///
/// Here's how the generation of a slot evolves over the lifetime of a pool
///
/// * every slot starts off free, so [`Generation::EMPTY`] is used as the generation
/// * when a slot is bound to a new value, it takes the next generation issued by the pool-wide
///   generation counter, which is never [`Generation::EMPTY`]
/// * when the value is released, the slot goes back to [`Generation::EMPTY`]
/// * a handle is only valid if its generation equals the generation of its slot
///
/// The counter wraps around once it reaches the maximum, but it always skips
/// [`Generation::EMPTY`], so a free slot can never be matched by any handle.
pub trait Generation: Copy + Ord + Hash + fmt::Debug + crate::seal::Seal {
    /// The generation of a free slot, and of the null handle
    const EMPTY: Self;

    /// The first generation handed out by a fresh counter, and the one it restarts at after
    /// wrapping around
    const FIRST: Self;

    /// The generation issued after this one, wrapping around to [`Generation::FIRST`]
    fn next(self) -> Self;

    /// Check if the generation is the free marker
    fn is_empty(self) -> bool;

    /// Check if the generation belongs to an occupied slot
    #[inline]
    fn is_filled(self) -> bool {
        !self.is_empty()
    }
}

macro_rules! prim {
    ($ty:ident) => {
        impl Generation for $ty {
            const EMPTY: Self = 0;
            const FIRST: Self = 1;

            #[inline]
            fn next(self) -> Self {
                match self.wrapping_add(1) {
                    0 => Self::FIRST,
                    next => next,
                }
            }

            #[inline]
            fn is_empty(self) -> bool {
                self == 0
            }
        }
    };
}

prim!(u16);
prim!(u32);

/// The pool-wide source of generations
///
/// Starts at [`Generation::FIRST`] and advances after every issue.
#[derive(Debug, Clone, Copy)]
pub(crate) struct GenerationCounter<G> {
    next: G,
}

impl<G: Generation> GenerationCounter<G> {
    pub(crate) fn new() -> Self {
        Self { next: G::FIRST }
    }

    pub(crate) fn issue(&mut self) -> G {
        let generation = self.next;
        self.next = generation.next();
        debug_assert!(generation.is_filled());
        generation
    }
}

#[cfg(test)]
mod tests {
    use super::{Generation, GenerationCounter};

    #[test]
    fn counter_starts_at_one() {
        let mut counter = GenerationCounter::<u16>::new();
        assert_eq!(counter.issue(), 1);
        assert_eq!(counter.issue(), 2);
        assert_eq!(counter.issue(), 3);
    }

    #[test]
    fn wrapping_skips_empty() {
        assert_eq!(u16::MAX.next(), 1);
        assert_eq!(u32::MAX.next(), 1);
        assert_eq!(0u16.next(), 1);

        let mut counter = GenerationCounter::<u16>::new();
        let mut previous = counter.issue();
        for _ in 0..u16::MAX {
            let generation = counter.issue();
            assert!(generation.is_filled());
            assert_ne!(generation, previous);
            previous = generation;
        }

        // every non-zero value has been issued once, so the counter is back at the start
        assert_eq!(previous, 1);
        assert_eq!(counter.issue(), 2);
    }

    #[test]
    fn empty_is_not_filled() {
        assert!(u16::EMPTY.is_empty());
        assert!(!u32::EMPTY.is_filled());
        assert!(u32::FIRST.is_filled());
    }
}
