//! Error types for the allocator simulator.
//!
//! Every failure the simulator can report is an ordinary, recoverable
//! outcome: a request that does not fit, a free of an unknown block, or
//! malformed input rejected at the boundary. Nothing here is fatal.
//!
//! # Examples
//!
//! ```rust
//! use memsim::{Allocator, Error, Strategy};
//!
//! let mut allocator = Allocator::new(64).unwrap();
//! let err = allocator.allocate(128, Strategy::FirstFit).unwrap_err();
//!
//! assert!(matches!(err, Error::AllocationFailed { .. }));
//! assert_eq!(err.code(), "ALLOCATION_FAILED");
//! ```

use crate::block::BlockId;
use crate::strategy::Strategy;
use std::fmt;

/// Main error type for the simulator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// No free block large enough exists for the request.
    ///
    /// For the buddy system only power-of-two sized free blocks count.
    AllocationFailed {
        /// Size the caller asked for.
        requested: usize,
        /// Size the strategy actually needed (rounded up for buddy).
        required: usize,
        /// Strategy that was attempted.
        strategy: Strategy,
    },

    /// `free` was called with an id that is not currently allocated.
    BlockNotFound(BlockId),

    /// A zero-sized request.
    InvalidSize(usize),

    /// A strategy name that does not parse.
    UnknownStrategy(String),

    /// Invalid configuration.
    Config(String),

    /// An internal invariant was violated.
    Internal(String),
}

impl Error {
    /// Create an allocation failure.
    pub const fn allocation_failed(requested: usize, required: usize, strategy: Strategy) -> Self {
        Self::AllocationFailed {
            requested,
            required,
            strategy,
        }
    }

    /// Create a block-not-found error.
    pub const fn block_not_found(id: BlockId) -> Self {
        Self::BlockNotFound(id)
    }

    /// Create an invalid size error.
    pub const fn invalid_size(size: usize) -> Self {
        Self::InvalidSize(size)
    }

    /// Create an unknown strategy error.
    pub fn unknown_strategy(name: impl Into<String>) -> Self {
        Self::UnknownStrategy(name.into())
    }

    /// Create a config error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create an internal error.
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// Check if the caller can reasonably retry with other parameters.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use memsim::{Error, Strategy};
    ///
    /// assert!(Error::allocation_failed(10, 16, Strategy::BuddySystem).is_retryable());
    /// assert!(!Error::invalid_size(0).is_retryable());
    /// ```
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::AllocationFailed { .. })
    }

    /// Check if the error stems from caller input.
    pub const fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidSize(_) | Self::UnknownStrategy(_) | Self::Config(_) | Self::BlockNotFound(_)
        )
    }

    /// Get error code for logging.
    pub const fn code(&self) -> &'static str {
        match self {
            Self::AllocationFailed { .. } => "ALLOCATION_FAILED",
            Self::BlockNotFound(_) => "BLOCK_NOT_FOUND",
            Self::InvalidSize(_) => "INVALID_SIZE",
            Self::UnknownStrategy(_) => "UNKNOWN_STRATEGY",
            Self::Config(_) => "CONFIG",
            Self::Internal(_) => "INTERNAL",
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AllocationFailed {
                requested,
                required,
                strategy,
            } => {
                if requested == required {
                    write!(f, "allocation failed: no free block of {requested} KB ({strategy})")
                } else {
                    write!(
                        f,
                        "allocation failed: no free block of {required} KB for {requested} KB request ({strategy})"
                    )
                }
            }
            Self::BlockNotFound(id) => write!(f, "block {id} is not allocated"),
            Self::InvalidSize(size) => write!(f, "invalid allocation size: {size}"),
            Self::UnknownStrategy(name) => write!(f, "unknown strategy: {name:?}"),
            Self::Config(msg) => write!(f, "config error: {msg}"),
            Self::Internal(msg) => write!(f, "internal error: {msg}"),
        }
    }
}

impl std::error::Error for Error {}

/// Result type alias for simulator operations.
pub type Result<T> = std::result::Result<T, Error>;
