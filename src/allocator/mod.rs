//! Memory acquisition strategies for ring storage.
//!
//! A ring buffer asks for exactly one region of bytes when it is created and
//! hands it back when it is dropped. Where that region comes from is the only
//! thing that differs between a general-purpose build and a constrained one,
//! so it is injected as an [`Allocator`] instead of duplicating construction.

mod heap;
#[cfg(feature = "malloc")]
mod malloc;

pub use heap::Heap;
#[cfg(feature = "malloc")]
pub use malloc::Malloc;

use core::ptr::NonNull;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("allocator `{allocator}` could not provide {bytes} bytes")]
pub struct AllocError {
    pub allocator: &'static str,
    pub bytes: usize,
}

/// A source of raw byte regions.
///
/// # Safety
/// `allocate` must return a pointer to `bytes` writable bytes that stay valid
/// until the same pointer is passed to `deallocate` on this allocator with the
/// same `bytes`. Regions returned by separate calls must not overlap.
pub unsafe trait Allocator {
    fn name(&self) -> &'static str;

    fn allocate(&self, bytes: usize) -> Result<NonNull<u8>, AllocError>;

    /// # Safety
    /// `ptr` must come from `allocate` on this allocator with the same `bytes`,
    /// and must not be used afterwards.
    unsafe fn deallocate(&self, ptr: NonNull<u8>, bytes: usize);

    #[inline]
    fn error(&self, bytes: usize) -> AllocError {
        AllocError {
            allocator: self.name(),
            bytes,
        }
    }
}

unsafe impl<A: Allocator + ?Sized> Allocator for &A {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn allocate(&self, bytes: usize) -> Result<NonNull<u8>, AllocError> {
        (**self).allocate(bytes)
    }

    unsafe fn deallocate(&self, ptr: NonNull<u8>, bytes: usize) {
        unsafe { (**self).deallocate(ptr, bytes) }
    }
}
