//! Blocks of the simulated address space.
//!
//! A [`Block`] is a contiguous span `[start, start + size)` that is either
//! free or allocated. Allocated blocks carry a [`BlockId`]; free blocks
//! carry none, so the "free blocks have the sentinel id" rule holds by
//! construction.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of an allocated block.
///
/// Ids are minted from a monotonic counter starting at 1 and are never
/// reused for the lifetime of an allocator (reset aside).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BlockId(pub u64);

impl BlockId {
    /// Raw sentinel value used for free blocks in flat records.
    pub const FREE: Self = Self(0);

    /// Create a new block ID.
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    pub const fn value(&self) -> u64 {
        self.0
    }

    /// Whether this is the free sentinel.
    pub const fn is_sentinel(&self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for BlockId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

impl From<u64> for BlockId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

/// Block allocation state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlockState {
    /// Block is free and available.
    Free,
    /// Block is allocated under the given id.
    Allocated(BlockId),
}

impl BlockState {
    /// Check if block is free.
    pub const fn is_free(&self) -> bool {
        matches!(self, Self::Free)
    }

    /// Check if block is allocated.
    pub const fn is_allocated(&self) -> bool {
        matches!(self, Self::Allocated(_))
    }

    /// Id of the allocated block, if any.
    pub const fn id(&self) -> Option<BlockId> {
        match self {
            Self::Free => None,
            Self::Allocated(id) => Some(*id),
        }
    }
}

/// One contiguous region of the simulated address space.
///
/// Values handed out by the allocator are snapshots; mutating them has no
/// effect on the allocator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    /// Offset from the start of the region.
    pub start: usize,
    /// Length of the region, always non-zero.
    pub size: usize,
    /// Free or allocated.
    pub state: BlockState,
}

impl Block {
    /// Create a free block.
    pub const fn free(start: usize, size: usize) -> Self {
        Self {
            start,
            size,
            state: BlockState::Free,
        }
    }

    /// Create an allocated block.
    pub const fn allocated(id: BlockId, start: usize, size: usize) -> Self {
        Self {
            start,
            size,
            state: BlockState::Allocated(id),
        }
    }

    /// Id of the block, `None` when free.
    pub const fn id(&self) -> Option<BlockId> {
        self.state.id()
    }

    /// Id of the block, [`BlockId::FREE`] when free.
    pub fn raw_id(&self) -> BlockId {
        self.id().unwrap_or(BlockId::FREE)
    }

    /// Check if block is free.
    pub const fn is_free(&self) -> bool {
        self.state.is_free()
    }

    /// One past the last offset covered by the block.
    pub const fn end(&self) -> usize {
        self.start + self.size
    }

    /// Whether the size is a power of two (a buddy candidate when free).
    pub const fn is_power_of_two(&self) -> bool {
        self.size.is_power_of_two()
    }

    /// Check if the block is free and can hold `size`.
    pub const fn fits(&self, size: usize) -> bool {
        self.is_free() && self.size >= size
    }

    /// Shrink the block to `size` and return the free remainder, if any.
    ///
    /// Returns `None` when the block is already exactly `size`.
    pub(crate) fn split_off(&mut self, size: usize) -> Option<Block> {
        if self.size <= size {
            return None;
        }
        let remainder = Block::free(self.start + size, self.size - size);
        self.size = size;
        Some(remainder)
    }
}

impl fmt::Display for Block {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.state {
            BlockState::Free => write!(f, "[free {}..{} ({} KB)]", self.start, self.end(), self.size),
            BlockState::Allocated(id) => {
                write!(f, "[{} {}..{} ({} KB)]", id, self.start, self.end(), self.size)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_block_id() {
        let id = BlockId::new(42);
        assert_eq!(id.value(), 42);
        assert_eq!(id, BlockId(42));
        assert_eq!(BlockId::from(7), BlockId(7));
        assert!(BlockId::FREE.is_sentinel());
        assert!(!id.is_sentinel());
        assert_eq!(id.to_string(), "#42");
    }

    #[test]
    fn test_block_state() {
        assert!(BlockState::Free.is_free());
        assert!(!BlockState::Free.is_allocated());
        assert_eq!(BlockState::Free.id(), None);

        let state = BlockState::Allocated(BlockId::new(3));
        assert!(!state.is_free());
        assert!(state.is_allocated());
        assert_eq!(state.id(), Some(BlockId::new(3)));
    }

    #[test]
    fn test_block_accessors() {
        let free = Block::free(10, 54);
        assert!(free.is_free());
        assert_eq!(free.id(), None);
        assert_eq!(free.raw_id(), BlockId::FREE);
        assert_eq!(free.end(), 64);

        let used = Block::allocated(BlockId::new(1), 0, 10);
        assert!(!used.is_free());
        assert_eq!(used.raw_id(), BlockId::new(1));
    }

    #[test]
    fn test_block_fits() {
        let free = Block::free(0, 16);
        assert!(free.fits(16));
        assert!(free.fits(1));
        assert!(!free.fits(17));
        assert!(!Block::allocated(BlockId::new(1), 0, 16).fits(1));
    }

    #[test]
    fn test_block_power_of_two() {
        assert!(Block::free(0, 32).is_power_of_two());
        assert!(Block::free(0, 1).is_power_of_two());
        assert!(!Block::free(0, 54).is_power_of_two());
    }

    #[test]
    fn test_split_off() {
        let mut block = Block::free(8, 56);
        let rest = block.split_off(10).unwrap();
        assert_eq!(block, Block::free(8, 10));
        assert_eq!(rest, Block::free(18, 46));

        let mut exact = Block::free(0, 4);
        assert!(exact.split_off(4).is_none());
        assert_eq!(exact.size, 4);
    }

    #[test]
    fn test_block_display() {
        assert_eq!(Block::free(10, 54).to_string(), "[free 10..64 (54 KB)]");
        assert_eq!(
            Block::allocated(BlockId::new(2), 10, 20).to_string(),
            "[#2 10..30 (20 KB)]"
        );
    }
}
