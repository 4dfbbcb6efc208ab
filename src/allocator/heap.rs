use super::{AllocError, Allocator};
use alloc::alloc::{self as global, Layout};
use core::ptr::NonNull;

/// General-purpose allocator backed by Rust's global allocator.
#[derive(Debug, Default, Clone, Copy)]
pub struct Heap;

unsafe impl Allocator for Heap {
    fn name(&self) -> &'static str {
        "heap"
    }

    fn allocate(&self, bytes: usize) -> Result<NonNull<u8>, AllocError> {
        if bytes == 0 {
            return Err(self.error(bytes));
        }
        let layout = Layout::array::<u8>(bytes).map_err(|_| self.error(bytes))?;

        // SAFETY: layout has a non-zero size.
        let ptr = unsafe { global::alloc(layout) };
        NonNull::new(ptr).ok_or_else(|| self.error(bytes))
    }

    unsafe fn deallocate(&self, ptr: NonNull<u8>, bytes: usize) {
        // The same layout was accepted by `allocate`.
        let layout = unsafe { Layout::from_size_align_unchecked(bytes, 1) };
        unsafe { global::dealloc(ptr.as_ptr(), layout) }
    }
}
