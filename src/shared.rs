//! Thread-safe handle to an allocator.
//!
//! The block-list invariants span the whole list, so every operation is
//! serialized behind a single mutex; there is no finer-grained locking.
//!
//! # Examples
//!
//! ```rust
//! use memsim::{SharedAllocator, Strategy};
//! use std::thread;
//!
//! let shared = SharedAllocator::new(256).unwrap();
//!
//! let handles: Vec<_> = (0..4)
//!     .map(|_| {
//!         let shared = shared.clone();
//!         thread::spawn(move || shared.allocate(16, Strategy::BestFit).unwrap())
//!     })
//!     .collect();
//!
//! for handle in handles {
//!     handle.join().unwrap();
//! }
//! assert_eq!(shared.stats().used_memory, 64);
//! ```

use crate::allocator::Allocator;
use crate::block::{Block, BlockId};
use crate::config::AllocatorConfig;
use crate::stats::MemoryStats;
use crate::strategy::Strategy;
use crate::Result;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Cloneable handle sharing one [`Allocator`] across threads.
#[derive(Debug, Clone)]
pub struct SharedAllocator {
    inner: Arc<Mutex<Allocator>>,
}

impl SharedAllocator {
    /// Create a shared allocator for a region of `total_size`.
    pub fn new(total_size: usize) -> Result<Self> {
        Allocator::new(total_size).map(Self::from)
    }

    /// Create a shared allocator from a configuration.
    pub fn with_config(config: AllocatorConfig) -> Result<Self> {
        Allocator::with_config(config).map(Self::from)
    }

    // Allocator operations do not panic, so a lock poisoned by a panicking
    // `with` closure still guards a consistent list.
    fn lock(&self) -> MutexGuard<'_, Allocator> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// See [`Allocator::allocate`].
    pub fn allocate(&self, size: usize, strategy: Strategy) -> Result<BlockId> {
        self.lock().allocate(size, strategy)
    }

    /// See [`Allocator::free`].
    pub fn free(&self, id: BlockId) -> Result<()> {
        self.lock().free(id)
    }

    /// See [`Allocator::reset`].
    pub fn reset(&self) {
        self.lock().reset();
    }

    /// Owned copy of the block list.
    pub fn snapshot(&self) -> Vec<Block> {
        self.lock().snapshot()
    }

    /// Summary statistics.
    pub fn stats(&self) -> MemoryStats {
        self.lock().stats()
    }

    /// Run `f` with exclusive access, for several reads under one lock.
    pub fn with<R>(&self, f: impl FnOnce(&mut Allocator) -> R) -> R {
        f(&mut *self.lock())
    }
}

impl From<Allocator> for SharedAllocator {
    fn from(allocator: Allocator) -> Self {
        Self {
            inner: Arc::new(Mutex::new(allocator)),
        }
    }
}
