//! The contiguous storage behind a [`Pool`](crate::Pool)
//!
//! [`DensePool`] keeps every live value in a single [`Vec`] with no holes, along with two maps
//!
//! * `slot_to_dense`: for each occupied slot, the position of its value in the [`Vec`]
//! * `dense_to_slot`: for each position in the [`Vec`], the slot that owns it
//!
//! Removing a value [`Vec::swap_remove`]s it out of the array, and the reverse map tells us
//! which slot owned the value that got moved into the hole, so its forward entry can be fixed
//! up without searching.

use alloc::vec::Vec;

use crate::internal_index::InternalIndex;

#[derive(Debug)]
pub(crate) struct DensePool<T, I> {
    values: Vec<T>,
    slot_to_dense: Vec<I>,
    dense_to_slot: Vec<I>,
}

impl<T, I: InternalIndex> DensePool<T, I> {
    pub(crate) const fn new() -> Self {
        Self {
            values: Vec::new(),
            slot_to_dense: Vec::new(),
            dense_to_slot: Vec::new(),
        }
    }

    pub(crate) fn reserve(&mut self, additional: usize) {
        self.values.reserve(additional);
        self.slot_to_dense.reserve(additional);
        self.dense_to_slot.reserve(additional);
    }

    /// The number of live values
    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.values.len()
    }

    #[inline]
    pub(crate) fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Append a value owned by `slot`, and return its position
    ///
    /// `slot` must be empty, and at most one past the highest slot seen so far
    pub(crate) fn insert(&mut self, slot: I, value: T) -> usize {
        let position = self.values.len();
        let slot_index = slot.to_usize();

        match slot_index.cmp(&self.slot_to_dense.len()) {
            core::cmp::Ordering::Less => self.slot_to_dense[slot_index] = I::from_usize(position),
            core::cmp::Ordering::Equal => self.slot_to_dense.push(I::from_usize(position)),
            core::cmp::Ordering::Greater => {
                unreachable!("slot {slot:?} was inserted before the slots in front of it")
            }
        }

        self.dense_to_slot.push(slot);
        self.values.push(value);
        position
    }

    /// The position of the value owned by an occupied slot
    #[inline]
    fn position(&self, slot: I) -> usize {
        let position = self.slot_to_dense[slot.to_usize()].to_usize();
        debug_assert_eq!(self.dense_to_slot[position], slot);
        position
    }

    #[inline]
    pub(crate) fn get(&self, slot: I) -> &T {
        &self.values[self.position(slot)]
    }

    #[inline]
    pub(crate) fn get_mut(&mut self, slot: I) -> &mut T {
        let position = self.position(slot);
        &mut self.values[position]
    }

    /// Remove the value owned by an occupied slot, moving the last value into its place
    pub(crate) fn remove_compacting(&mut self, slot: I) -> T {
        let position = self.position(slot);

        let value = self.values.swap_remove(position);
        self.dense_to_slot.swap_remove(position);

        // If we removed the end of the array, nothing moved and there is nothing to update
        if let Some(&moved) = self.dense_to_slot.get(position) {
            self.slot_to_dense[moved.to_usize()] = I::from_usize(position);
        }

        value
    }

    #[inline]
    pub(crate) fn values(&self) -> &[T] {
        &self.values
    }

    #[inline]
    pub(crate) fn values_mut(&mut self) -> &mut [T] {
        &mut self.values
    }

    /// The slot owning each value, in the same order as [`DensePool::values`]
    #[inline]
    pub(crate) fn slots(&self) -> &[I] {
        &self.dense_to_slot
    }

    /// [`DensePool::slots`] and [`DensePool::values_mut`] at the same time
    ///
    /// This method is to work around limitations in Rust's borrow checker
    #[inline]
    pub(crate) fn slots_and_values_mut(&mut self) -> (&[I], &mut [T]) {
        (&self.dense_to_slot, &mut self.values)
    }
}

#[cfg(test)]
mod tests {
    use super::DensePool;

    fn assert_consistent(dense: &DensePool<char, u16>) {
        assert_eq!(dense.values.len(), dense.dense_to_slot.len());
        for (position, &slot) in dense.dense_to_slot.iter().enumerate() {
            assert_eq!(usize::from(dense.slot_to_dense[usize::from(slot)]), position);
        }
    }

    #[test]
    fn remove_last_does_not_move() {
        let mut dense = DensePool::<char, u16>::new();
        dense.insert(0, 'a');
        dense.insert(1, 'b');

        assert_eq!(dense.remove_compacting(1), 'b');
        assert_eq!(dense.values(), ['a']);
        assert_eq!(dense.slots(), [0]);
        assert_consistent(&dense);
    }

    #[test]
    fn remove_middle_moves_last() {
        let mut dense = DensePool::<char, u16>::new();
        for (slot, value) in ['a', 'b', 'c', 'd'].into_iter().enumerate() {
            assert_eq!(dense.insert(slot as u16, value), slot);
        }

        assert_eq!(dense.remove_compacting(1), 'b');
        assert_eq!(dense.values(), ['a', 'd', 'c']);
        assert_eq!(dense.slots(), [0, 3, 2]);
        assert_consistent(&dense);

        assert_eq!(*dense.get(3), 'd');
        *dense.get_mut(3) = 'D';
        assert_eq!(*dense.get(3), 'D');

        assert_eq!(dense.remove_compacting(0), 'a');
        assert_eq!(dense.values(), ['c', 'D']);
        assert_consistent(&dense);

        // reuse a freed slot
        assert_eq!(dense.insert(1, 'e'), 2);
        assert_eq!(*dense.get(1), 'e');
        assert_eq!(*dense.get(2), 'c');
        assert_eq!(dense.len(), 3);
        assert_consistent(&dense);
    }

    #[test]
    fn remove_everything() {
        let mut dense = DensePool::<u32, u16>::new();
        for slot in 0..16 {
            dense.insert(slot, u32::from(slot) * 10);
        }

        for slot in [7, 0, 15, 3, 8, 1, 14, 2, 13, 4, 12, 5, 11, 6, 10, 9] {
            assert_eq!(dense.remove_compacting(slot), u32::from(slot) * 10);
            for (&owner, &value) in dense.slots().iter().zip(dense.values()) {
                assert_eq!(value, u32::from(owner) * 10);
            }
        }

        assert_eq!(dense.len(), 0);
        assert!(dense.is_empty());
    }
}
