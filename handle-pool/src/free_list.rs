use alloc::vec::Vec;

/// A stack of slot indices that are free to be bound again
///
/// The most recently released slot is the first to be reused.
#[derive(Debug)]
pub(crate) struct FreeList<I> {
    indices: Vec<I>,
}

impl<I: Copy> FreeList<I> {
    pub(crate) const fn new() -> Self {
        Self {
            indices: Vec::new(),
        }
    }

    #[inline]
    pub(crate) fn push(&mut self, index: I) {
        self.indices.push(index)
    }

    #[inline]
    pub(crate) fn pop(&mut self) -> Option<I> {
        self.indices.pop()
    }

    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.indices.len()
    }
}
