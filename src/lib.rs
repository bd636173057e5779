//! memsim
//!
//! A simulated linear memory region managed by a block-list allocator.
//!
//! # Overview
//!
//! The region is an ordered list of blocks that always tiles
//! `[0, total_size)` exactly. Requests are served by one of three
//! strategies:
//!
//! - **First-fit**: first free block large enough, in address order
//! - **Best-fit**: smallest free block large enough
//! - **Buddy system**: power-of-two blocks halved down to the request
//!
//! Freeing a block coalesces it with free neighbours, and the allocator
//! reports usage, external fragmentation and allocation success rate.
//!
//! # Crate Structure
//!
//! ```text
//!   memsim
//!   ├── allocator  - Allocator: allocate / free / reset / statistics
//!   ├── block      - Block, BlockId, BlockState
//!   ├── strategy   - Strategy and next_power_of_two
//!   ├── stats      - MemoryStats, counters, fragmentation
//!   ├── history    - bounded operation log
//!   ├── config     - AllocatorConfig and builder
//!   ├── shared     - SharedAllocator (single mutex)
//!   └── error      - Error and Result
//! ```
//!
//! # Examples
//!
//! ```rust
//! use memsim::{Allocator, Block, Strategy};
//!
//! let mut allocator = Allocator::new(64).unwrap();
//!
//! let a = allocator.allocate(10, Strategy::FirstFit).unwrap();
//! let b = allocator.allocate(20, Strategy::FirstFit).unwrap();
//!
//! assert_eq!(
//!     allocator.blocks(),
//!     &[
//!         Block::allocated(a, 0, 10),
//!         Block::allocated(b, 10, 20),
//!         Block::free(30, 34),
//!     ]
//! );
//!
//! allocator.free(a).unwrap();
//! assert_eq!(allocator.free_block_count(), 2);
//! assert!(allocator.fragmentation_percent() > 0.0);
//! ```
//!
//! # Logging
//!
//! Operations are reported through the [`log`] facade at `debug` level.
//! The crate installs no logger.
//!
//! # Quality Standards
//!
//! - Property-based testing of the block-list invariants
//! - Benchmarks for each strategy

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::return_self_not_must_use)]
#![allow(clippy::missing_const_for_fn)]
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::float_cmp)]

pub mod allocator;
pub mod block;
pub mod config;
pub mod error;
pub mod history;
pub mod shared;
pub mod stats;
pub mod strategy;

pub use allocator::Allocator;
pub use block::{Block, BlockId, BlockState};
pub use config::AllocatorConfig;
pub use error::{Error, Result};
pub use history::HistoryEvent;
pub use shared::SharedAllocator;
pub use stats::MemoryStats;
pub use strategy::Strategy;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
