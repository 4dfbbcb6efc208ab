use super::{RawStorage, RingError};
use crate::allocator::{Allocator, Heap};
use core::ptr;
use core::sync::atomic::{AtomicUsize, Ordering};
use tracing::debug;

/// Lock-free single-producer/single-consumer byte queue. The producer never
/// moves `tail`, so a full queue rejects bytes instead of overwriting.
pub struct SpscRingBuffer<A: Allocator = Heap> {
    storage: RawStorage<A>,
    capacity: usize,
    head: AtomicUsize,
    tail: AtomicUsize,
}

unsafe impl<A: Allocator + Send> Send for SpscRingBuffer<A> {}
unsafe impl<A: Allocator + Sync> Sync for SpscRingBuffer<A> {}

impl SpscRingBuffer<Heap> {
    pub fn new(capacity: usize) -> Result<Self, RingError> {
        Self::with_allocator(capacity, Heap)
    }
}

impl<A: Allocator> SpscRingBuffer<A> {
    pub fn with_allocator(capacity: usize, alloc: A) -> Result<Self, RingError> {
        let allocator = alloc.name();
        let storage = RawStorage::for_capacity(capacity, alloc)?;
        debug!(capacity, allocator, "spsc ring buffer created");

        Ok(Self {
            storage,
            capacity,
            head: AtomicUsize::new(0),
            tail: AtomicUsize::new(0),
        })
    }

    pub fn split(&mut self) -> (Producer<'_, A>, Consumer<'_, A>) {
        let ring = &*self;
        (Producer { ring }, Consumer { ring })
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    #[inline]
    pub fn len(&self) -> usize {
        let head = self.head.load(Ordering::Acquire);
        let tail = self.tail.load(Ordering::Acquire);
        self.distance(tail, head)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.head.load(Ordering::Acquire) == self.tail.load(Ordering::Acquire)
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        self.len() == self.capacity
    }

    #[inline(always)]
    fn slots(&self) -> usize {
        self.storage.len()
    }

    #[inline(always)]
    fn next(&self, position: usize) -> usize {
        (position + 1) % self.slots()
    }

    #[inline(always)]
    fn distance(&self, from: usize, to: usize) -> usize {
        (to + self.slots() - from) % self.slots()
    }
}

pub struct Producer<'a, A: Allocator = Heap> {
    ring: &'a SpscRingBuffer<A>,
}

pub struct Consumer<'a, A: Allocator = Heap> {
    ring: &'a SpscRingBuffer<A>,
}

impl<A: Allocator> Producer<'_, A> {
    #[inline]
    pub fn push(&mut self, value: u8) -> bool {
        let head = self.ring.head.load(Ordering::Relaxed);
        let next = self.ring.next(head);
        if next == self.ring.tail.load(Ordering::Acquire) {
            return false;
        }

        unsafe { self.ring.storage.as_mut_ptr().add(head).write(value) };
        self.ring.head.store(next, Ordering::Release);
        true
    }

    #[inline]
    pub fn write(&mut self, src: &[u8]) -> usize {
        let head = self.ring.head.load(Ordering::Relaxed);
        let tail = self.ring.tail.load(Ordering::Acquire);
        let free = self.ring.capacity - self.ring.distance(tail, head);
        let total = src.len().min(free);
        if total == 0 {
            return 0;
        }

        let slots = self.ring.slots();
        let first = total.min(slots - head);
        unsafe {
            let buf_ptr = self.ring.storage.as_mut_ptr();
            ptr::copy_nonoverlapping(src.as_ptr(), buf_ptr.add(head), first);
            ptr::copy_nonoverlapping(src.as_ptr().add(first), buf_ptr, total - first);
        }

        self.ring
            .head
            .store((head + total) % slots, Ordering::Release);
        total
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        self.ring.is_full()
    }
}

impl<A: Allocator> Consumer<'_, A> {
    #[inline]
    pub fn pop(&mut self) -> Option<u8> {
        let tail = self.ring.tail.load(Ordering::Relaxed);
        if tail == self.ring.head.load(Ordering::Acquire) {
            return None;
        }

        let value = unsafe { self.ring.storage.as_mut_ptr().add(tail).read() };
        self.ring.tail.store(self.ring.next(tail), Ordering::Release);
        Some(value)
    }

    #[inline]
    pub fn read(&mut self, dst: &mut [u8]) -> usize {
        let tail = self.ring.tail.load(Ordering::Relaxed);
        let head = self.ring.head.load(Ordering::Acquire);
        let total = dst.len().min(self.ring.distance(tail, head));
        if total == 0 {
            return 0;
        }

        let slots = self.ring.slots();
        let first = total.min(slots - tail);
        unsafe {
            let buf_ptr = self.ring.storage.as_mut_ptr();
            ptr::copy_nonoverlapping(buf_ptr.add(tail), dst.as_mut_ptr(), first);
            ptr::copy_nonoverlapping(buf_ptr, dst.as_mut_ptr().add(first), total - first);
        }

        self.ring
            .tail
            .store((tail + total) % slots, Ordering::Release);
        total
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.ring.is_empty()
    }
}
