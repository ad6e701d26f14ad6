//! The errors a pool can report

/// Every slot index a pool can address is taken by a live value
///
/// Returned by [`Pool::try_create_from`](crate::Pool::try_create_from). The infallible
/// [`Pool::create`](crate::Pool::create) reports the same condition by returning the null handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, thiserror::Error)]
#[error("tried to create a handle in a pool whose {limit} slots are all in use")]
pub struct CapacityExhausted {
    limit: usize,
}

impl CapacityExhausted {
    pub(crate) const fn new(limit: usize) -> Self {
        Self { limit }
    }

    /// The number of slots the pool could address
    pub const fn limit(&self) -> usize {
        self.limit
    }
}
