use crate::allocator::AllocError;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RingError {
    #[error("Invalid capacity {capacity}: {reason}")]
    InvalidCapacity {
        capacity: usize,
        reason: &'static str,
    },
    #[error(transparent)]
    Alloc(#[from] AllocError),
    #[error("Ring buffer is empty")]
    Empty,
}
