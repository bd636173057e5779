//! Block-list allocator over a simulated linear region.
//!
//! The allocator owns an ordered `Vec<Block>` that always tiles
//! `[0, total_size)` exactly. Allocation picks a free block according to a
//! [`Strategy`] and splits it; freeing marks a block free and coalesces
//! neighbours so that no two adjacent blocks are both free. Buddy splits
//! leave free buddies side by side until the next free merges them.
//!
//! ```text
//!   total_size = 64, first-fit 10 then 20:
//!
//!   ┌──────────┬────────────────────┬──────────────────────────────────┐
//!   │ #1  10KB │ #2       20KB      │             free 34KB            │
//!   └──────────┴────────────────────┴──────────────────────────────────┘
//!   0          10                   30                                 64
//! ```
//!
//! # Examples
//!
//! ```rust
//! use memsim::{Allocator, Strategy};
//!
//! let mut allocator = Allocator::new(64).unwrap();
//!
//! let a = allocator.allocate(10, Strategy::BuddySystem).unwrap();
//! let b = allocator.allocate(10, Strategy::FirstFit).unwrap();
//! assert_eq!(allocator.used_memory(), 16 + 10);
//!
//! allocator.free(a).unwrap();
//! allocator.free(b).unwrap();
//! assert_eq!(allocator.free_block_count(), 1);
//! ```

use crate::block::{Block, BlockId, BlockState};
use crate::config::AllocatorConfig;
use crate::history::{History, HistoryEvent};
use crate::stats::{self, AllocationCounters, MemoryStats};
use crate::strategy::Strategy;
use crate::{Error, Result};
use log::debug;
use std::collections::HashSet;

/// Simulated memory region managed as an ordered block list.
#[derive(Debug, Clone)]
pub struct Allocator {
    config: AllocatorConfig,

    /// Blocks ordered by ascending start, tiling the whole region.
    blocks: Vec<Block>,

    /// Source of fresh ids, never decremented.
    next_id: u64,

    counters: AllocationCounters,

    history: History,
}

impl Allocator {
    /// Create an allocator for a region of `total_size` (KB).
    ///
    /// Fails with [`Error::Config`] when `total_size` is zero.
    pub fn new(total_size: usize) -> Result<Self> {
        Self::with_config(AllocatorConfig::with_size(total_size))
    }

    /// Create an allocator from a full configuration.
    pub fn with_config(config: AllocatorConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::from_validated(config))
    }

    fn from_validated(config: AllocatorConfig) -> Self {
        Self {
            blocks: vec![Block::free(0, config.total_size)],
            next_id: 1,
            counters: AllocationCounters::default(),
            history: History::new(config.history_capacity),
            config,
        }
    }

    /// Get configuration.
    pub const fn config(&self) -> &AllocatorConfig {
        &self.config
    }

    /// Size of the simulated region.
    pub const fn total_size(&self) -> usize {
        self.config.total_size
    }

    /// Allocate `size` using `strategy`.
    ///
    /// Every call with a non-zero size counts as an allocation attempt.
    /// A zero size is rejected with [`Error::InvalidSize`] before anything
    /// is counted.
    ///
    /// A buddy request whose power-of-two rounding overflows `usize` can
    /// never fit and fails like any other unsatisfiable request.
    pub fn allocate(&mut self, size: usize, strategy: Strategy) -> Result<BlockId> {
        if size == 0 {
            return Err(Error::invalid_size(size));
        }

        let Some(required) = strategy.required_size(size) else {
            return Err(self.fail(size, usize::MAX, strategy));
        };
        let candidate = match strategy {
            Strategy::FirstFit => self.find_first_fit(required),
            Strategy::BestFit => self.find_best_fit(required),
            Strategy::BuddySystem => self.find_buddy(required),
        };

        let Some(index) = candidate else {
            return Err(self.fail(size, required, strategy));
        };

        if strategy == Strategy::BuddySystem {
            self.split_buddies(index, required);
        }

        let id = self.place(index, required);
        self.history.record(HistoryEvent::Allocated {
            id,
            size,
            granted: required,
            strategy,
        });
        debug!(
            "allocated block {} at {} ({} KB for {} KB) via {}",
            id, self.blocks[index].start, required, size, strategy
        );
        Ok(id)
    }

    /// Allocate with the configured default strategy.
    pub fn allocate_default(&mut self, size: usize) -> Result<BlockId> {
        self.allocate(size, self.config.default_strategy)
    }

    /// Allocate using [`Strategy::FirstFit`].
    pub fn allocate_first_fit(&mut self, size: usize) -> Result<BlockId> {
        self.allocate(size, Strategy::FirstFit)
    }

    /// Allocate using [`Strategy::BestFit`].
    pub fn allocate_best_fit(&mut self, size: usize) -> Result<BlockId> {
        self.allocate(size, Strategy::BestFit)
    }

    /// Allocate using [`Strategy::BuddySystem`].
    pub fn allocate_buddy(&mut self, size: usize) -> Result<BlockId> {
        self.allocate(size, Strategy::BuddySystem)
    }

    /// Free the block allocated under `id` and coalesce free neighbours.
    ///
    /// An id that is not currently allocated yields
    /// [`Error::BlockNotFound`] and leaves the allocator untouched; this is
    /// not counted as an allocation attempt.
    pub fn free(&mut self, id: BlockId) -> Result<()> {
        let index = self
            .blocks
            .iter()
            .position(|b| b.id() == Some(id))
            .ok_or(Error::block_not_found(id))?;

        let size = self.blocks[index].size;
        self.blocks[index].state = BlockState::Free;
        self.coalesce();

        self.history.record(HistoryEvent::Freed { id, size });
        debug!("freed block {} ({} KB)", id, size);
        Ok(())
    }

    /// Return to the freshly constructed state.
    ///
    /// The history is cleared and then records the reset itself.
    pub fn reset(&mut self) {
        self.blocks.clear();
        self.blocks.push(Block::free(0, self.config.total_size));
        self.next_id = 1;
        self.counters = AllocationCounters::default();
        self.history.clear();
        self.history.record(HistoryEvent::Reset);
        debug!("memory reset ({} KB)", self.config.total_size);
    }

    /// Blocks in address order.
    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    /// Owned copy of the block list, for display.
    pub fn snapshot(&self) -> Vec<Block> {
        self.blocks.clone()
    }

    /// Allocated blocks in address order.
    pub fn allocated_blocks(&self) -> Vec<Block> {
        self.blocks.iter().filter(|b| !b.is_free()).copied().collect()
    }

    /// Look up an allocated block by id.
    pub fn get(&self, id: BlockId) -> Option<Block> {
        self.blocks.iter().find(|b| b.id() == Some(id)).copied()
    }

    /// Id the next successful allocation will receive.
    pub const fn next_id(&self) -> BlockId {
        BlockId::new(self.next_id)
    }

    /// Recorded operations, oldest first.
    pub fn history(&self) -> impl Iterator<Item = &HistoryEvent> {
        self.history.entries()
    }

    /// Sum of allocated block sizes.
    pub fn used_memory(&self) -> usize {
        self.blocks.iter().filter(|b| !b.is_free()).map(|b| b.size).sum()
    }

    /// `total_size - used_memory`.
    pub fn free_memory(&self) -> usize {
        self.config.total_size - self.used_memory()
    }

    /// Largest free block, 0 if none is free.
    pub fn largest_free_block(&self) -> usize {
        self.blocks
            .iter()
            .filter(|b| b.is_free())
            .map(|b| b.size)
            .max()
            .unwrap_or(0)
    }

    /// Number of free blocks.
    pub fn free_block_count(&self) -> usize {
        self.blocks.iter().filter(|b| b.is_free()).count()
    }

    /// External fragmentation in percent.
    pub fn fragmentation_percent(&self) -> f64 {
        stats::fragmentation_percent(self.free_memory(), self.largest_free_block())
    }

    /// Successful allocations as a fraction of attempts.
    pub fn success_rate(&self) -> f64 {
        self.counters.success_rate()
    }

    /// Allocation attempts so far.
    pub const fn total_allocations(&self) -> u64 {
        self.counters.total
    }

    /// Successful allocation attempts.
    pub const fn successful_allocations(&self) -> u64 {
        self.counters.successful
    }

    /// Failed allocation attempts.
    pub const fn failed_allocations(&self) -> u64 {
        self.counters.failed
    }

    /// Allocation counters.
    pub const fn counters(&self) -> AllocationCounters {
        self.counters
    }

    /// Summary statistics.
    pub fn stats(&self) -> MemoryStats {
        let used_memory = self.used_memory();
        let free_memory = self.config.total_size - used_memory;
        let largest_free_block = self.largest_free_block();
        let free_blocks = self.free_block_count();

        MemoryStats {
            total_size: self.config.total_size,
            used_memory,
            free_memory,
            largest_free_block,
            free_blocks,
            allocated_blocks: self.blocks.len() - free_blocks,
            fragmentation_percent: stats::fragmentation_percent(free_memory, largest_free_block),
            allocations: self.counters,
        }
    }

    /// Verify the block list invariants that hold after every operation.
    ///
    /// Checks that blocks tile the region without gaps or overlaps, have
    /// non-zero sizes, and that allocated ids are unique and were minted by
    /// this allocator. Adjacent free blocks are allowed here: a buddy split
    /// leaves them; see [`Allocator::check_coalesced`].
    pub fn check_invariants(&self) -> Result<()> {
        let mut expected_start = 0;
        let mut seen = HashSet::new();

        for (i, block) in self.blocks.iter().enumerate() {
            if block.size == 0 {
                return Err(Error::internal(format!("block {i} has zero size")));
            }
            if block.start != expected_start {
                return Err(Error::internal(format!(
                    "block {i} starts at {} but previous block ends at {expected_start}",
                    block.start
                )));
            }
            expected_start = block.end();

            if let BlockState::Allocated(id) = block.state {
                if id.is_sentinel() || id.value() >= self.next_id {
                    return Err(Error::internal(format!("block {i} has unminted id {id}")));
                }
                if !seen.insert(id) {
                    return Err(Error::internal(format!("duplicate id {id}")));
                }
            }
        }

        if expected_start != self.config.total_size {
            return Err(Error::internal(format!(
                "blocks cover {expected_start} of {} KB",
                self.config.total_size
            )));
        }
        Ok(())
    }

    /// Verify that no two adjacent blocks are both free.
    ///
    /// Holds after every successful [`Allocator::free`] and after
    /// [`Allocator::reset`].
    pub fn check_coalesced(&self) -> Result<()> {
        match self
            .blocks
            .windows(2)
            .position(|pair| pair[0].is_free() && pair[1].is_free())
        {
            Some(i) => Err(Error::internal(format!("blocks {i} and {} are both free", i + 1))),
            None => Ok(()),
        }
    }

    fn fail(&mut self, size: usize, required: usize, strategy: Strategy) -> Error {
        self.counters.record_failure();
        self.history.record(HistoryEvent::AllocationFailed {
            size,
            required,
            strategy,
        });
        let err = Error::allocation_failed(size, required, strategy);
        debug!("{}: {}", err.code(), err);
        err
    }

    fn find_first_fit(&self, size: usize) -> Option<usize> {
        self.blocks.iter().position(|b| b.fits(size))
    }

    // min_by_key keeps the first minimum, so ties go to the lowest address.
    fn find_best_fit(&self, size: usize) -> Option<usize> {
        self.blocks
            .iter()
            .enumerate()
            .filter(|(_, b)| b.fits(size))
            .min_by_key(|(_, b)| b.size)
            .map(|(i, _)| i)
    }

    // Free blocks of non power-of-two size are never buddy candidates, even
    // when large enough: halving them would not land on `size`.
    fn find_buddy(&self, size: usize) -> Option<usize> {
        self.blocks
            .iter()
            .enumerate()
            .filter(|(_, b)| b.fits(size) && b.is_power_of_two())
            .min_by_key(|(_, b)| b.size)
            .map(|(i, _)| i)
    }

    /// Halve `blocks[index]` until it is exactly `size`, inserting each
    /// right half as a free buddy.
    fn split_buddies(&mut self, index: usize, size: usize) {
        while self.blocks[index].size > size {
            let half = self.blocks[index].size / 2;
            let buddy = Block::free(self.blocks[index].start + half, half);
            self.blocks[index].size = half;
            self.blocks.insert(index + 1, buddy);
        }
    }

    /// Carve `size` off the front of the free block at `index` and mark it
    /// allocated under a fresh id.
    fn place(&mut self, index: usize, size: usize) -> BlockId {
        if let Some(remainder) = self.blocks[index].split_off(size) {
            self.blocks.insert(index + 1, remainder);
        }

        let id = BlockId::new(self.next_id);
        self.next_id += 1;
        self.blocks[index].state = BlockState::Allocated(id);
        self.counters.record_success();
        id
    }

    fn coalesce(&mut self) {
        let mut i = 0;
        while i + 1 < self.blocks.len() {
            if self.blocks[i].is_free() && self.blocks[i + 1].is_free() {
                let right = self.blocks.remove(i + 1);
                self.blocks[i].size += right.size;
            } else {
                i += 1;
            }
        }
    }
}

impl Default for Allocator {
    fn default() -> Self {
        Self::from_validated(AllocatorConfig::default())
    }
}
