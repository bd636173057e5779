//! Memory statistics.
//!
//! External fragmentation is measured as
//!
//! ```text
//! fragmentation = (1 - largest_free_block / free_memory) * 100
//! ```
//!
//! 0% means all free memory sits in one contiguous block; the value
//! approaches 100% as free memory scatters into many small blocks.

use serde::{Deserialize, Serialize};

/// External fragmentation in percent; 0 when nothing is free.
///
/// # Examples
///
/// ```rust
/// use memsim::stats::fragmentation_percent;
///
/// assert_eq!(fragmentation_percent(0, 0), 0.0);
/// assert_eq!(fragmentation_percent(48, 48), 0.0);
/// assert_eq!(fragmentation_percent(48, 32), (1.0 - 32.0 / 48.0) * 100.0);
/// ```
pub fn fragmentation_percent(free_memory: usize, largest_free_block: usize) -> f64 {
    if free_memory == 0 {
        return 0.0;
    }
    (1.0 - largest_free_block as f64 / free_memory as f64) * 100.0
}

/// Allocation attempt counters.
///
/// `total == successful + failed` holds at all times.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllocationCounters {
    /// Allocation attempts.
    pub total: u64,
    /// Attempts that returned a block.
    pub successful: u64,
    /// Attempts that found no suitable block.
    pub failed: u64,
}

impl AllocationCounters {
    /// Record a successful attempt.
    pub(crate) fn record_success(&mut self) {
        self.total += 1;
        self.successful += 1;
    }

    /// Record a failed attempt.
    pub(crate) fn record_failure(&mut self) {
        self.total += 1;
        self.failed += 1;
    }

    /// Successful attempts as a fraction of all attempts, 0 when none.
    pub fn success_rate(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.successful as f64 / self.total as f64
        }
    }
}

/// Point-in-time summary of an allocator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemoryStats {
    /// Size of the simulated region.
    pub total_size: usize,
    /// Sum of allocated block sizes.
    pub used_memory: usize,
    /// `total_size - used_memory`.
    pub free_memory: usize,
    /// Largest free block, 0 if none.
    pub largest_free_block: usize,
    /// Number of free blocks.
    pub free_blocks: usize,
    /// Number of allocated blocks.
    pub allocated_blocks: usize,
    /// External fragmentation in percent.
    pub fragmentation_percent: f64,
    /// Allocation counters.
    pub allocations: AllocationCounters,
}

impl MemoryStats {
    /// Used memory as a percentage of the region.
    pub fn usage_percent(&self) -> f64 {
        if self.total_size == 0 {
            0.0
        } else {
            self.used_memory as f64 / self.total_size as f64 * 100.0
        }
    }

    /// Free memory as a percentage of the region.
    pub fn free_percent(&self) -> f64 {
        if self.total_size == 0 {
            0.0
        } else {
            self.free_memory as f64 / self.total_size as f64 * 100.0
        }
    }

    /// Successful allocations as a fraction of attempts.
    pub fn success_rate(&self) -> f64 {
        self.allocations.success_rate()
    }

    /// Serialize to JSON for collaborators that render it.
    pub fn to_json(&self) -> crate::Result<String> {
        serde_json::to_string(self).map_err(|e| crate::Error::internal(e.to_string()))
    }
}
