use super::{AllocError, Allocator};
use core::ptr::NonNull;

/// The C heap, through `malloc`/`free`. Needs a libc, so it sits behind the
/// `malloc` feature; kernel builds use [`Heap`](super::Heap) over their own
/// global allocator instead. A null return from `malloc` becomes an
/// [`AllocError`].
#[derive(Debug, Default, Clone, Copy)]
pub struct Malloc;

unsafe impl Allocator for Malloc {
    fn name(&self) -> &'static str {
        "malloc"
    }

    fn allocate(&self, bytes: usize) -> Result<NonNull<u8>, AllocError> {
        if bytes == 0 || bytes > isize::MAX as usize {
            return Err(self.error(bytes));
        }

        let ptr = unsafe { libc::malloc(bytes) }.cast::<u8>();
        NonNull::new(ptr).ok_or_else(|| self.error(bytes))
    }

    unsafe fn deallocate(&self, ptr: NonNull<u8>, _bytes: usize) {
        unsafe { libc::free(ptr.as_ptr().cast()) }
    }
}
