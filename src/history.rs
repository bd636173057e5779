//! Bounded log of allocator operations.
//!
//! Purely observational: the allocator records into it but never reads
//! from it, so correctness does not depend on it.

use crate::block::BlockId;
use crate::strategy::Strategy;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::fmt;

/// One recorded operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum HistoryEvent {
    /// A block was allocated.
    Allocated {
        /// New block id.
        id: BlockId,
        /// Size the caller asked for.
        size: usize,
        /// Size actually reserved.
        granted: usize,
        /// Strategy used.
        strategy: Strategy,
    },
    /// An allocation request could not be satisfied.
    AllocationFailed {
        /// Size the caller asked for.
        size: usize,
        /// Size the strategy needed.
        required: usize,
        /// Strategy used.
        strategy: Strategy,
    },
    /// A block was freed.
    Freed {
        /// Id of the freed block.
        id: BlockId,
        /// Size returned to the free pool.
        size: usize,
    },
    /// The allocator was reset.
    Reset,
}

impl HistoryEvent {
    /// Whether the operation succeeded.
    pub const fn is_success(&self) -> bool {
        !matches!(self, Self::AllocationFailed { .. })
    }
}

impl fmt::Display for HistoryEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Allocated {
                id,
                size,
                granted,
                strategy,
            } if size != granted => write!(
                f,
                "allocated block {id} ({granted} KB for {size} KB request) via {strategy}"
            ),
            Self::Allocated { id, size, strategy, .. } => {
                write!(f, "allocated block {id} ({size} KB) via {strategy}")
            }
            Self::AllocationFailed {
                size,
                required,
                strategy,
            } if size != required => write!(
                f,
                "failed to allocate {size} KB (needed {required} KB) via {strategy}"
            ),
            Self::AllocationFailed { size, strategy, .. } => {
                write!(f, "failed to allocate {size} KB via {strategy}")
            }
            Self::Freed { id, size } => write!(f, "freed block {id} ({size} KB)"),
            Self::Reset => f.write_str("memory reset"),
        }
    }
}

/// Fixed-capacity history; the oldest entry is dropped when full.
#[derive(Debug, Clone, Default)]
pub struct History {
    entries: VecDeque<HistoryEvent>,
    capacity: usize,
}

impl History {
    /// Create a history holding at most `capacity` entries.
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity.min(1024)),
            capacity,
        }
    }

    /// Record an event.
    pub fn record(&mut self, event: HistoryEvent) {
        if self.capacity == 0 {
            return;
        }
        if self.entries.len() == self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(event);
    }

    /// Entries, oldest first.
    pub fn entries(&self) -> impl Iterator<Item = &HistoryEvent> {
        self.entries.iter()
    }

    /// Most recent entry.
    pub fn last(&self) -> Option<&HistoryEvent> {
        self.entries.back()
    }

    /// Number of stored entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Maximum number of entries.
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// Drop all entries.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
