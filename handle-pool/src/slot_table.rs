use alloc::vec::Vec;

use crate::{
    error::CapacityExhausted,
    free_list::FreeList,
    generation::{Generation, GenerationCounter},
    handle::PoolHandle,
    internal_index::InternalIndex,
};

/// The generation of every slot ever allocated, along with the slots that are free for reuse
///
/// Slots are never removed, only emptied, so the table only grows.
#[derive(Debug)]
pub(crate) struct SlotTable<H: PoolHandle> {
    generations: Vec<H::Generation>,
    free: FreeList<H::Index>,
    counter: GenerationCounter<H::Generation>,
}

impl<H: PoolHandle> SlotTable<H> {
    pub(crate) fn new() -> Self {
        Self {
            generations: Vec::new(),
            free: FreeList::new(),
            counter: GenerationCounter::new(),
        }
    }

    /// Reserve room for `additional` more slots
    pub(crate) fn reserve(&mut self, additional: usize) {
        self.generations.reserve(additional)
    }

    /// The number of slots allocated so far, free or not
    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.generations.len()
    }

    /// The number of slots that currently hold a value
    #[inline]
    pub(crate) fn occupied(&self) -> usize {
        self.generations.len() - self.free.len()
    }

    /// Pick an empty slot, reusing a released one if there are any
    ///
    /// The slot stays empty until it is passed to [`SlotTable::bind`]
    pub(crate) fn allocate(&mut self) -> Result<H::Index, CapacityExhausted> {
        if let Some(index) = self.free.pop() {
            #[cfg(feature = "log")]
            log::trace!("reusing slot {index:?}");
            return Ok(index);
        }

        self.grow()
    }

    #[cold]
    #[inline(never)]
    fn grow(&mut self) -> Result<H::Index, CapacityExhausted> {
        let len = self.generations.len();

        let index = match H::Index::try_from_usize(len) {
            Some(index) => index,
            None => {
                #[cfg(feature = "log")]
                log::debug!("cannot allocate a slot, all {len} slots are in use");
                return Err(CapacityExhausted::new(H::Index::SLOT_LIMIT));
            }
        };

        #[cfg(feature = "log")]
        log::trace!("growing slot table to {} slots", len + 1);

        self.generations.push(H::Generation::EMPTY);
        Ok(index)
    }

    /// Fill an empty slot with the next generation, and return the handle for it
    pub(crate) fn bind(&mut self, index: H::Index) -> H {
        let slot = &mut self.generations[index.to_usize()];
        debug_assert!(slot.is_empty(), "binding occupied slot {index:?}");

        let generation = self.counter.issue();
        *slot = generation;
        H::encode(index, generation)
    }

    /// Returns the slot index of the handle if it refers to an occupied slot with the same
    /// generation
    #[inline]
    pub(crate) fn validate(&self, handle: H) -> Option<H::Index> {
        let (index, generation) = handle.decode();
        let &current = self.generations.get(index.to_usize())?;

        if generation.is_filled() && current == generation {
            Some(index)
        } else {
            None
        }
    }

    #[inline]
    pub(crate) fn is_valid(&self, handle: H) -> bool {
        self.validate(handle).is_some()
    }

    /// Empty an occupied slot and make it available to [`SlotTable::allocate`]
    pub(crate) fn release(&mut self, index: H::Index) {
        let slot = &mut self.generations[index.to_usize()];
        debug_assert!(slot.is_filled(), "releasing empty slot {index:?}");

        *slot = H::Generation::EMPTY;
        self.free.push(index);

        #[cfg(feature = "log")]
        log::trace!("released slot {index:?}");
    }

    /// Rebuild the live handle of an occupied slot
    #[inline]
    pub(crate) fn key_of(&self, index: H::Index) -> H {
        let generation = self.generations[index.to_usize()];
        debug_assert!(generation.is_filled());
        H::encode(index, generation)
    }
}
