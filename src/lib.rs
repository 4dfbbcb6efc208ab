//! Fixed-capacity byte ring buffer.
//!
//! [`RingBuffer`] keeps `capacity + 1` slots and two cursors; full and empty
//! are told apart by the one slot that is never filled. Storage comes from an
//! injected [`Allocator`]: [`Heap`] over the global allocator, or `Malloc`
//! (feature `malloc`) over the C heap. Without `std` the crate builds on
//! `core` + `alloc`; kernel-style targets use [`Heap`] with their own global
//! allocator.

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;
#[cfg(test)]
extern crate std;

pub mod allocator;
pub mod ring;

#[cfg(feature = "malloc")]
pub use allocator::Malloc;
pub use allocator::{AllocError, Allocator, Heap};
pub use ring::{Consumer, Producer, RingBuffer, RingError, SpscRingBuffer};
