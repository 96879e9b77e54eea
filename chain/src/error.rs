/// Errors returned by [`Chain`](crate::Chain) and [`ByteChain`](crate::ByteChain) operations.
///
/// These are all logic errors on the caller's side: the offending call has no
/// effect, and retrying it unchanged will fail again.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, thiserror::Error)]
pub enum ChainError {
    /// A position was outside the chain.
    #[error("index {index} is out of range for a chain of length {len}")]
    IndexOutOfRange { index: usize, len: usize },
    /// A range extended past the end of the chain.
    #[error("range {start}..{end} is out of range for a chain of length {len}")]
    RangeOutOfRange { start: usize, end: usize, len: usize },
    #[error(transparent)]
    InvalidArgument(#[from] InvalidArgument),
}

impl ChainError {
    /// Returns `true` for both positional and range errors.
    pub fn is_out_of_range(&self) -> bool {
        matches!(
            self,
            ChainError::IndexOutOfRange { .. } | ChainError::RangeOutOfRange { .. }
        )
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, thiserror::Error)]
pub enum InvalidArgument {
    #[error("item size must be non-zero")]
    ZeroItemSize,
    /// A single item, or a buffer of several items, didn't have a length
    /// compatible with the chain's item size.
    #[error("expected items of {expected} bytes, got {found} bytes")]
    ItemSize { expected: usize, found: usize },
    /// Two byte chains with different item sizes were combined.
    #[error("cannot combine chains with item sizes {expected} and {found}")]
    ItemSizeMismatch { expected: usize, found: usize },
}

/// Checks that `offset` is a valid position to insert at (which includes `len`).
pub(crate) fn check_offset(offset: usize, len: usize) -> Result<(), ChainError> {
    if offset <= len {
        Ok(())
    } else {
        Err(ChainError::IndexOutOfRange { index: offset, len })
    }
}

/// Checks that `count` elements starting at `offset` all lie within the chain.
pub(crate) fn check_range(offset: usize, count: usize, len: usize) -> Result<(), ChainError> {
    match offset.checked_add(count) {
        Some(end) if end <= len => Ok(()),
        end => Err(ChainError::RangeOutOfRange {
            start: offset,
            end: end.unwrap_or(usize::MAX),
            len,
        }),
    }
}
