#![no_std]
#![forbid(
    unsafe_code,
    missing_docs,
    clippy::std_instead_of_core,
    clippy::std_instead_of_alloc,
    clippy::alloc_instead_of_core
)]

//! # handle-pool
//!
//! A pool that stores values densely and hands out small, copyable [handles](handle) to them.
//!
//! Callers never hold the address of a value, since the pool moves values around to keep them
//! contiguous. Instead they hold a handle, which the pool resolves back into the value in O(1).
//!
//! ## ABA-hardening
//!
//! The [ABA problem](https://en.wikipedia.org/wiki/ABA_problem) is where
//! you expect a handle to refer to a value, but that value has since been freed and its slot
//! reused, so the handle looks like it still refers to something, but it no longer does.
//!
//! To fix this, every handle carries a [`generation`]. Each time a slot is filled, it is tagged
//! with a fresh generation from a pool-wide counter, and a handle only resolves if its generation
//! matches the one its slot currently carries.
//!
//! ```
//! use handle_pool::Pool;
//!
//! let mut pool = Pool::<char>::new();
//! let handle_a = pool.create_from('a');
//! let handle_b = pool.create_from('b');
//!
//! assert_eq!(pool.try_free(handle_a), Some('a'));
//!
//! // this will be inserted into the same slot that 'a' was inserted into
//! let handle_c = pool.create_from('c');
//!
//! assert_eq!(handle_a.index(), handle_c.index());
//!
//! // even though handle_a has the same index as handle_c, using handle_a
//! // will still fail to access any values, because the slot was tagged with
//! // a new generation when 'c' was inserted
//! assert_eq!(pool.get(handle_a), None);
//! assert_eq!(pool.try_free(handle_a), None);
//! assert_eq!(pool.get(handle_b), Some(&'b'));
//! ```
//!
//! The generation counter wraps around once it is exhausted, skipping zero, so a free slot (which
//! carries generation zero) never matches any handle. After wrapping, a handle that was stale
//! for a very long time could match again, which is practically only a concern for the 16-bit
//! generations of [`Handle32`](handle::Handle32).
//!
//! ## Handle widths
//!
//! * [`Handle32`](handle::Handle32): 16-bit index, 16-bit generation, at most `2^16` slots
//! * [`Handle64`](handle::Handle64): 32-bit index, 32-bit generation, at most `2^32` slots
//!
//! The all-zero handle is the null handle, and is never handed out. [`Pool::create`] returns it
//! when the index space is exhausted, [`Pool::try_create_from`] reports [`CapacityExhausted`]
//! instead.
//!
//! ## Dense storage
//!
//! Live values are kept in one contiguous array, so iterating over [`Pool::values`] is bounded
//! by the number of live values, not by how many slots were ever allocated. Freeing a value
//! moves the last value of the array into its place.
//!
//! ## Logging
//!
//! With the `log` feature enabled, slot growth, reuse, and release are logged at the trace
//! level through the [`log`](https://docs.rs/log) facade, and ignored frees and failed creates
//! at the debug level.

extern crate alloc;

pub mod generation;
pub mod handle;
pub mod internal_index;

mod dense;
mod free_list;
mod slot_table;

mod error;
mod pool;

mod seal {
    pub trait Seal {}

    impl Seal for u16 {}
    impl Seal for u32 {}
}

pub use error::CapacityExhausted;
pub use handle::{Handle32, Handle64, PoolHandle};
pub use pool::{Handles, Iter, IterMut, Pool, Pool32, Pool64};
