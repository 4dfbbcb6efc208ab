//! Byte rings over allocator-provided storage.
//!
//! The backing region is private to the ring types:
//!
//! ```compile_fail
//! use cbuffer::ring::RawStorage;
//! ```
//!
//! ```compile_fail
//! use cbuffer::ring::storage::RawStorage;
//! ```

pub mod buffer;
pub mod ring_error;
pub mod spsc;
mod storage;

pub use buffer::RingBuffer;
pub use ring_error::*;
pub use spsc::*;
pub(crate) use storage::RawStorage;
