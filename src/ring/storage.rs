use crate::allocator::Allocator;
use crate::ring::RingError;
use core::ops::{Deref, DerefMut};
use core::ptr::{self, NonNull};
use core::slice;

/// Zero-filled byte region owned together with the allocator that produced it.
pub(crate) struct RawStorage<A: Allocator> {
    ptr: NonNull<u8>,
    len: usize,
    alloc: A,
}

// The region is exclusively owned; moving it moves the only handle.
unsafe impl<A: Allocator + Send> Send for RawStorage<A> {}
unsafe impl<A: Allocator + Sync> Sync for RawStorage<A> {}

impl<A: Allocator> RawStorage<A> {
    /// Acquires the backing region for a ring of `capacity` logical bytes,
    /// which is one slot larger than `capacity`.
    pub fn for_capacity(capacity: usize, alloc: A) -> Result<Self, RingError> {
        if capacity == 0 {
            return Err(RingError::InvalidCapacity {
                capacity,
                reason: "must be greater than zero",
            });
        }

        let len = match capacity.checked_add(1) {
            Some(len) if len <= isize::MAX as usize => len,
            _ => {
                return Err(RingError::InvalidCapacity {
                    capacity,
                    reason: "slot count exceeds isize::MAX",
                });
            }
        };

        let ptr = alloc.allocate(len)?;
        unsafe { ptr::write_bytes(ptr.as_ptr(), 0, len) };

        Ok(Self { ptr, len, alloc })
    }

    #[inline(always)]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline(always)]
    pub fn as_mut_ptr(&self) -> *mut u8 {
        self.ptr.as_ptr()
    }

    pub fn allocator(&self) -> &A {
        &self.alloc
    }
}

impl<A: Allocator> Deref for RawStorage<A> {
    type Target = [u8];

    #[inline(always)]
    fn deref(&self) -> &[u8] {
        unsafe { slice::from_raw_parts(self.ptr.as_ptr(), self.len) }
    }
}

impl<A: Allocator> DerefMut for RawStorage<A> {
    #[inline(always)]
    fn deref_mut(&mut self) -> &mut [u8] {
        unsafe { slice::from_raw_parts_mut(self.ptr.as_ptr(), self.len) }
    }
}

impl<A: Allocator> Drop for RawStorage<A> {
    fn drop(&mut self) {
        unsafe { self.alloc.deallocate(self.ptr, self.len) }
    }
}
