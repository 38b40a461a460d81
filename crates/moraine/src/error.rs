//! Arena-specific error types.

use std::error::Error;
use std::fmt;

/// Errors that can occur while constructing an arena.
///
/// Allocation itself has no recoverable errors: running out of memory leaves
/// no way to keep the cursor invariants intact, so it aborts through
/// [`std::alloc::handle_alloc_error`] instead of surfacing here.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ArenaError {
    /// The configured standard block size is unusable.
    InvalidBlockSize {
        /// The rejected block size in bytes.
        block_size: usize,
    },
}

impl fmt::Display for ArenaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidBlockSize { block_size } => {
                write!(
                    f,
                    "invalid standard block size: {block_size} bytes (must be a power of two, at least {})",
                    crate::config::ArenaConfig::MIN_BLOCK_SIZE
                )
            }
        }
    }
}

impl Error for ArenaError {}
