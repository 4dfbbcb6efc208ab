use super::{RawStorage, RingError};
use crate::allocator::{Allocator, Heap};
use core::fmt;
use tracing::{debug, trace};

/// Fixed-capacity FIFO of bytes.
///
/// Storage holds `capacity + 1` slots; one is always left unused so that
/// `head == tail` means empty and `next(head) == tail` means full, with no
/// element counter.
///
/// # Overwrite on full
/// [`push`](Self::push) never fails. Pushing into a full buffer silently
/// discards the oldest unread byte to make room. Check
/// [`is_full`](Self::is_full) first if losing data is not acceptable.
///
/// The type is not synchronized. Every mutation takes `&mut self`; share it
/// across threads behind a lock, or use [`SpscRingBuffer`](super::SpscRingBuffer).
pub struct RingBuffer<A: Allocator = Heap> {
    storage: RawStorage<A>,
    capacity: usize,
    head: usize,
    tail: usize,
}

impl RingBuffer<Heap> {
    pub fn new(capacity: usize) -> Result<Self, RingError> {
        Self::with_allocator(capacity, Heap)
    }
}

impl<A: Allocator> RingBuffer<A> {
    /// Storage is handed back to `alloc` on drop.
    pub fn with_allocator(capacity: usize, alloc: A) -> Result<Self, RingError> {
        let allocator = alloc.name();
        let storage = RawStorage::for_capacity(capacity, alloc)?;
        debug!(capacity, allocator, "ring buffer created");

        Ok(Self {
            storage,
            capacity,
            head: 0,
            tail: 0,
        })
    }

    pub fn destroy(self) {
        debug!(
            capacity = self.capacity,
            allocator = self.storage.allocator().name(),
            "ring buffer destroyed"
        );
    }

    /// Storage content is left as is.
    #[inline]
    pub fn flush(&mut self) {
        self.head = 0;
        self.tail = 0;
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.head == self.tail
    }

    #[inline(always)]
    pub fn is_full(&self) -> bool {
        self.next(self.head) == self.tail
    }

    #[inline(always)]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    #[inline(always)]
    pub fn len(&self) -> usize {
        let slots = self.storage.len();
        (self.head + slots - self.tail) % slots
    }

    #[inline(always)]
    pub fn available(&self) -> usize {
        self.capacity - self.len()
    }

    pub fn allocator(&self) -> &A {
        self.storage.allocator()
    }

    /// On a full buffer the oldest byte is dropped and returned.
    #[inline]
    pub fn push(&mut self, value: u8) -> Option<u8> {
        self.storage[self.head] = value;
        self.head = self.next(self.head);

        if self.head == self.tail {
            let lost = self.storage[self.tail];
            self.tail = self.next(self.tail);
            trace!(lost, "ring buffer full, oldest byte overwritten");
            return Some(lost);
        }
        None
    }

    #[inline]
    pub fn pop(&mut self) -> Result<u8, RingError> {
        if self.is_empty() {
            return Err(RingError::Empty);
        }
        // SAFETY: emptiness checked above.
        Ok(unsafe { self.pop_unchecked() })
    }

    /// # Safety
    /// The buffer must not be empty. Debug builds assert it. In release builds
    /// a call on an empty buffer returns a stale byte and moves `tail` past
    /// `head`, so the buffer reports `capacity` bytes that were never pushed
    /// until the next `flush`. Storage indexing stays bounds-checked.
    #[inline(always)]
    pub unsafe fn pop_unchecked(&mut self) -> u8 {
        debug_assert!(!self.is_empty(), "pop on empty ring buffer");

        let value = self.storage[self.tail];
        self.tail = self.next(self.tail);
        value
    }

    /// Returns how many old bytes were overwritten.
    pub fn extend_from_slice(&mut self, data: &[u8]) -> usize {
        let mut overwritten = 0;
        for &byte in data {
            if self.push(byte).is_some() {
                overwritten += 1;
            }
        }
        overwritten
    }

    pub fn pop_into(&mut self, dst: &mut [u8]) -> usize {
        let n = dst.len().min(self.len());
        for slot in &mut dst[..n] {
            // SAFETY: at most `len()` pops.
            *slot = unsafe { self.pop_unchecked() };
        }
        n
    }

    #[inline(always)]
    fn next(&self, position: usize) -> usize {
        (position + 1) % self.storage.len()
    }
}

impl<A: Allocator> fmt::Debug for RingBuffer<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RingBuffer")
            .field("allocator", &self.storage.allocator().name())
            .field("capacity", &self.capacity)
            .field("head", &self.head)
            .field("tail", &self.tail)
            .finish()
    }
}
