//! The handle pool
//!
//! see [`Pool`] for details

use core::fmt;

use crate::{
    dense::DensePool,
    error::CapacityExhausted,
    handle::{Handle32, Handle64, PoolHandle},
    internal_index::InternalIndex,
    slot_table::SlotTable,
};

/// A [`Pool`] handing out [`Handle32`]s, holding at most `2^16` values
pub type Pool32<T> = Pool<T, Handle32>;

/// A [`Pool`] handing out [`Handle64`]s, holding at most `2^32` values
pub type Pool64<T> = Pool<T, Handle64>;

/// A pool of values addressed by generational handles
///
/// Values are stored contiguously, so [`Pool::values`] only ever walks live values. To keep
/// them contiguous, freeing a value moves the last value into the hole it leaves behind, so
/// the position of a value is not stable. Handles are: a handle keeps resolving to the same
/// value until that value is freed, and never resolves to anything after that, even once its
/// slot is reused.
///
/// Every operation takes an arbitrary handle. Handles that are null, stale, or from another
/// pool are not an error, they just don't resolve to anything.
///
/// References into the pool borrow it, so they cannot be held across a call that creates, frees,
/// or overwrites a value. Acquire the value again through its handle instead.
///
/// ```
/// use handle_pool::Pool;
///
/// let mut pool = Pool::<&str>::new();
/// let a = pool.create_from("a");
/// let b = pool.create_from("b");
///
/// assert_eq!(pool.get(a), Some(&"a"));
///
/// pool.free(a);
/// assert_eq!(pool.get(a), None);
///
/// // this reuses the slot that 'a' was in
/// let c = pool.create_from("c");
/// assert_eq!(a.index(), c.index());
///
/// // but a still doesn't resolve, since the slot has a new generation
/// assert_eq!(pool.get(a), None);
/// assert_eq!(pool.get(c), Some(&"c"));
///
/// if let Some(value) = pool.acquire(b) {
///     *value = "B";
/// }
/// pool.set(c, "C");
///
/// let mut values = pool.values().to_vec();
/// values.sort();
/// assert_eq!(values, ["B", "C"]);
/// ```
///
/// Freeing `b` may move `a`'s value, so holding on to it is rejected
///
/// ```compile_fail,E0499
/// use handle_pool::Pool;
///
/// let mut pool = Pool::<u32>::new();
/// let a = pool.create_from(1);
/// let b = pool.create_from(2);
///
/// let value = pool.acquire(a).unwrap();
/// pool.free(b);
/// *value += 1;
/// ```
pub struct Pool<T, H: PoolHandle = Handle32> {
    slots: SlotTable<H>,
    dense: DensePool<T, H::Index>,
}

impl<T, H: PoolHandle> Pool<T, H> {
    /// Create a new, empty [`Pool`]
    pub fn new() -> Self {
        Self {
            slots: SlotTable::new(),
            dense: DensePool::new(),
        }
    }

    /// Create a new, empty [`Pool`] with room for `capacity` values before it reallocates
    pub fn with_capacity(capacity: usize) -> Self {
        let mut pool = Self::new();
        pool.reserve(capacity);
        pool
    }

    /// Reserve room for at least `additional` more values
    pub fn reserve(&mut self, additional: usize) {
        let additional = additional.min(H::Index::SLOT_LIMIT - self.dense.len());
        self.slots.reserve(additional);
        self.dense.reserve(additional);
    }

    /// The number of live values
    #[inline]
    pub fn len(&self) -> usize {
        self.dense.len()
    }

    /// Returns true if there are no live values
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.dense.is_empty()
    }

    /// The number of slots ever allocated, whether they currently hold a value or not
    #[inline]
    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }

    /// The maximum number of slots this pool can allocate
    #[inline]
    pub const fn capacity(&self) -> usize {
        H::Index::SLOT_LIMIT
    }

    /// Create a handle to a default constructed value
    ///
    /// Returns the null handle if every slot is in use
    pub fn create(&mut self) -> H
    where
        T: Default,
    {
        self.create_from(T::default())
    }

    /// Create a handle to `value`
    ///
    /// Returns the null handle if every slot is in use, `value` is dropped in that case
    pub fn create_from(&mut self, value: T) -> H {
        self.try_create_from(value).unwrap_or(H::NULL)
    }

    /// Create a handle to `value`
    ///
    /// # Errors
    ///
    /// [`CapacityExhausted`] if every slot is in use, `value` is dropped in that case
    pub fn try_create_from(&mut self, value: T) -> Result<H, CapacityExhausted> {
        let index = self.slots.allocate()?;
        let handle = self.slots.bind(index);
        self.dense.insert(index, value);

        debug_assert_eq!(self.slots.occupied(), self.dense.len());
        Ok(handle)
    }

    /// Returns true if the handle refers to a live value
    #[inline]
    pub fn contains(&self, handle: H) -> bool {
        self.slots.is_valid(handle)
    }

    /// Get a reference to the value associated with the handle
    ///
    /// Returns None if the handle is invalid (null, stale, or out of bounds)
    #[inline]
    pub fn get(&self, handle: H) -> Option<&T> {
        let index = self.slots.validate(handle)?;
        Some(self.dense.get(index))
    }

    /// Get a mutable reference to the value associated with the handle
    ///
    /// Returns None if the handle is invalid (null, stale, or out of bounds)
    #[inline]
    pub fn acquire(&mut self, handle: H) -> Option<&mut T> {
        let index = self.slots.validate(handle)?;
        Some(self.dense.get_mut(index))
    }

    /// Copy the value associated with the handle into `out`
    ///
    /// Returns false and leaves `out` untouched if the handle is invalid
    pub fn acquire_into(&self, handle: H, out: &mut T) -> bool
    where
        T: Clone,
    {
        match self.get(handle) {
            Some(value) => {
                out.clone_from(value);
                true
            }
            None => false,
        }
    }

    /// Overwrite the value associated with the handle
    ///
    /// Does nothing if the handle is invalid, `value` is dropped in that case
    pub fn set(&mut self, handle: H, value: T) {
        if let Some(slot) = self.acquire(handle) {
            *slot = value;
        }
    }

    /// Free the value associated with the handle
    ///
    /// Does nothing if the handle is invalid, so freeing a handle twice is harmless
    pub fn free(&mut self, handle: H) {
        self.try_free(handle);
    }

    /// Free the value associated with the handle, and return it
    ///
    /// Returns None if the handle is invalid
    pub fn try_free(&mut self, handle: H) -> Option<T> {
        let Some(index) = self.slots.validate(handle) else {
            #[cfg(feature = "log")]
            log::debug!("ignoring free of invalid handle {handle:?}");
            return None;
        };

        self.slots.release(index);
        let value = self.dense.remove_compacting(index);

        debug_assert_eq!(self.slots.occupied(), self.dense.len());
        Some(value)
    }

    /// The live values, in no particular order
    ///
    /// The order only holds until the next value is created or freed
    #[inline]
    pub fn values(&self) -> &[T] {
        self.dense.values()
    }

    /// The live values, in no particular order
    ///
    /// The order only holds until the next value is created or freed
    #[inline]
    pub fn values_mut(&mut self) -> &mut [T] {
        self.dense.values_mut()
    }

    /// An iterator over the handles of all live values, in the same order as [`Pool::values`]
    pub fn handles(&self) -> Handles<'_, H> {
        Handles {
            slots: self.dense.slots().iter(),
            table: &self.slots,
        }
    }

    /// An iterator over all live values and their handles
    pub fn iter(&self) -> Iter<'_, T, H> {
        Iter {
            handles: self.handles(),
            values: self.dense.values().iter(),
        }
    }

    /// An iterator over all live values and their handles, with mutable access to the values
    pub fn iter_mut(&mut self) -> IterMut<'_, T, H> {
        let (slots, values) = self.dense.slots_and_values_mut();
        IterMut {
            handles: Handles {
                slots: slots.iter(),
                table: &self.slots,
            },
            values: values.iter_mut(),
        }
    }
}

impl<T, H: PoolHandle> Default for Pool<T, H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: fmt::Debug, H: PoolHandle> fmt::Debug for Pool<T, H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<'a, T, H: PoolHandle> IntoIterator for &'a Pool<T, H> {
    type Item = (H, &'a T);
    type IntoIter = Iter<'a, T, H>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, T, H: PoolHandle> IntoIterator for &'a mut Pool<T, H> {
    type Item = (H, &'a mut T);
    type IntoIter = IterMut<'a, T, H>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

/// An iterator over the handles in a [`Pool`], created from [`Pool::handles`]
pub struct Handles<'a, H: PoolHandle> {
    slots: core::slice::Iter<'a, H::Index>,
    table: &'a SlotTable<H>,
}

impl<H: PoolHandle> ExactSizeIterator for Handles<'_, H> {}
impl<H: PoolHandle> Iterator for Handles<'_, H> {
    type Item = H;

    fn next(&mut self) -> Option<Self::Item> {
        let &index = self.slots.next()?;
        Some(self.table.key_of(index))
    }

    fn nth(&mut self, n: usize) -> Option<Self::Item> {
        let &index = self.slots.nth(n)?;
        Some(self.table.key_of(index))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.slots.size_hint()
    }
}

impl<H: PoolHandle> DoubleEndedIterator for Handles<'_, H> {
    fn next_back(&mut self) -> Option<Self::Item> {
        let &index = self.slots.next_back()?;
        Some(self.table.key_of(index))
    }
}

/// An iterator over the handles and values in a [`Pool`], created from [`Pool::iter`]
pub struct Iter<'a, T, H: PoolHandle> {
    handles: Handles<'a, H>,
    values: core::slice::Iter<'a, T>,
}

impl<T, H: PoolHandle> ExactSizeIterator for Iter<'_, T, H> {}
impl<'a, T, H: PoolHandle> Iterator for Iter<'a, T, H> {
    type Item = (H, &'a T);

    fn next(&mut self) -> Option<Self::Item> {
        Some((self.handles.next()?, self.values.next()?))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.values.size_hint()
    }
}

impl<T, H: PoolHandle> DoubleEndedIterator for Iter<'_, T, H> {
    fn next_back(&mut self) -> Option<Self::Item> {
        Some((self.handles.next_back()?, self.values.next_back()?))
    }
}

/// A mutable iterator over the handles and values in a [`Pool`], created from
/// [`Pool::iter_mut`]
pub struct IterMut<'a, T, H: PoolHandle> {
    handles: Handles<'a, H>,
    values: core::slice::IterMut<'a, T>,
}

impl<T, H: PoolHandle> ExactSizeIterator for IterMut<'_, T, H> {}
impl<'a, T, H: PoolHandle> Iterator for IterMut<'a, T, H> {
    type Item = (H, &'a mut T);

    fn next(&mut self) -> Option<Self::Item> {
        Some((self.handles.next()?, self.values.next()?))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.values.size_hint()
    }
}

impl<T, H: PoolHandle> DoubleEndedIterator for IterMut<'_, T, H> {
    fn next_back(&mut self) -> Option<Self::Item> {
        Some((self.handles.next_back()?, self.values.next_back()?))
    }
}

#[cfg(test)]
mod tests {
    use alloc::{string::String, vec::Vec};

    use super::{Pool, Pool32, Pool64};
    use crate::handle::{Handle32, Handle64};

    #[test]
    fn basic() {
        let mut pool = Pool32::<u32>::new();

        let a = pool.create_from(0);
        assert!(!a.is_null());
        assert_eq!(pool.get(a), Some(&0));

        pool.free(a);

        let b = pool.create_from(10);

        assert_eq!(a.index(), b.index());
        assert_ne!(a.generation(), b.generation());
        assert_eq!(pool.get(b), Some(&10));
        assert_eq!(pool.get(a), None);
        assert_eq!(pool.len(), 1);
        assert_eq!(pool.slot_count(), 1);
    }

    #[test]
    fn create_default() {
        let mut pool = Pool64::<String>::new();
        let handle = pool.create();
        assert_eq!(pool.get(handle).map(String::as_str), Some(""));

        pool.acquire(handle).unwrap().push_str("hello");
        assert_eq!(pool.get(handle).map(String::as_str), Some("hello"));
    }

    #[test]
    fn acquire_into() {
        let mut pool = Pool32::<String>::new();
        let handle = pool.create_from(String::from("value"));

        let mut out = String::from("untouched");
        assert!(pool.acquire_into(handle, &mut out));
        assert_eq!(out, "value");

        pool.free(handle);
        out = String::from("untouched");
        assert!(!pool.acquire_into(handle, &mut out));
        assert_eq!(out, "untouched");
    }

    #[test]
    fn invalid_handles_are_ignored() {
        let mut pool = Pool32::<u8>::new();

        assert_eq!(pool.get(Handle32::NULL), None);
        assert_eq!(pool.acquire(Handle32::encode(12, 1)), None);
        pool.set(Handle32::encode(12, 1), 5);
        pool.free(Handle32::NULL);
        assert_eq!(pool.try_free(Handle32::encode(0, 1)), None);
        assert!(pool.is_empty());
        assert_eq!(pool.slot_count(), 0);

        let handle = pool.create_from(1);
        pool.set(Handle32::encode(handle.index(), handle.generation() + 1), 2);
        assert_eq!(pool.get(handle), Some(&1));
    }

    #[test]
    fn double_free() {
        let mut pool = Pool32::<char>::new();
        let a = pool.create_from('a');
        let b = pool.create_from('b');
        let c = pool.create_from('c');

        assert_eq!(pool.try_free(a), Some('a'));
        assert_eq!(pool.try_free(a), None);
        pool.free(a);

        assert_eq!(pool.len(), 2);
        assert_eq!(pool.get(b), Some(&'b'));
        assert_eq!(pool.get(c), Some(&'c'));

        // only one copy of the slot went back on the free list
        let d = pool.create_from('d');
        let e = pool.create_from('e');
        assert_eq!(d.index(), a.index());
        assert_eq!(e.index(), 3);
    }

    #[test]
    fn references_do_not_survive_mutation() {
        let mut pool = Pool32::<u64>::new();
        let a = pool.create_from(1);
        let b = pool.create_from(2);

        // the value of b lives at the end of the array, freeing a moves it
        assert_eq!(pool.values(), [1, 2]);
        pool.free(a);
        assert_eq!(pool.values(), [2]);

        // so it has to be reacquired through its handle
        *pool.acquire(b).unwrap() += 40;
        assert_eq!(pool.get(b), Some(&42));
    }

    #[test]
    fn iteration() {
        let mut pool = Pool64::<u32>::with_capacity(8);
        let handles: Vec<Handle64> = (0..8).map(|i| pool.create_from(i)).collect();

        for &handle in handles.iter().step_by(3) {
            pool.free(handle);
        }

        assert_eq!(pool.len(), 5);
        assert_eq!(pool.handles().len(), 5);
        assert_eq!(pool.iter().len(), 5);

        for (handle, &value) in &pool {
            assert_eq!(handles[value as usize], handle);
        }

        for (_, value) in &mut pool {
            *value *= 10;
        }

        let mut values = pool.values().to_vec();
        values.sort();
        assert_eq!(values, [10, 20, 40, 50, 70]);

        let handles_back: Vec<_> = pool.handles().rev().collect();
        let pairs_back: Vec<_> = pool.iter().rev().map(|(handle, _)| handle).collect();
        assert_eq!(handles_back, pairs_back);

        for value in pool.values_mut() {
            *value += 1;
        }
        for (handle, &value) in pool.iter() {
            assert_eq!(pool.get(handle), Some(&value));
            assert_eq!(value % 10, 1);
        }
    }

    #[test]
    fn capacity() {
        let pool = Pool::<(), Handle32>::new();
        assert_eq!(pool.capacity(), 1 << 16);
    }

    #[test]
    fn debug() {
        use alloc::format;

        let mut pool = Pool32::<char>::new();
        pool.create_from('x');
        assert_eq!(
            format!("{pool:?}"),
            "{Handle32 { index: 0, generation: 1 }: 'x'}"
        );
    }
}
