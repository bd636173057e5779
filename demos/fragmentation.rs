//! Fragmentation Comparison
//!
//! Runs the same allocate/free workload under each strategy and compares
//! external fragmentation and success rate.
//!
//! # Run
//!
//! ```bash
//! cargo run --example fragmentation
//! ```

use memsim::{Allocator, BlockId, Strategy};

const TOTAL_SIZE: usize = 1024;

/// Deterministic request sizes (KB).
const SIZES: [usize; 16] = [12, 40, 7, 64, 3, 25, 100, 9, 33, 5, 70, 16, 2, 48, 21, 8];

fn run(strategy: Strategy) -> Allocator {
    let mut allocator = Allocator::new(TOTAL_SIZE).expect("non-zero region size");
    let mut live: Vec<BlockId> = Vec::new();

    for round in 0..8 {
        for (i, &size) in SIZES.iter().enumerate() {
            if let Ok(id) = allocator.allocate(size + round, strategy) {
                live.push(id);
            }
            // Every third request, free a live block from the middle.
            if i % 3 == 2 && !live.is_empty() {
                let victim = live.remove(live.len() / 2);
                let _ = allocator.free(victim);
            }
        }
    }
    allocator
}

fn main() {
    println!("=== Fragmentation Comparison ({} KB) ===\n", TOTAL_SIZE);
    println!(
        "  {:<13} {:>8} {:>8} {:>10} {:>8} {:>9}",
        "strategy", "used KB", "free KB", "largest", "holes", "frag %"
    );
    println!("  {}", "-".repeat(62));

    for strategy in Strategy::ALL {
        let allocator = run(strategy);
        let stats = allocator.stats();

        if let Err(e) = allocator.check_invariants() {
            eprintln!("  {}: {}", strategy, e);
        }

        println!(
            "  {:<13} {:>8} {:>8} {:>10} {:>8} {:>8.1}%",
            strategy.name(),
            stats.used_memory,
            stats.free_memory,
            stats.largest_free_block,
            stats.free_blocks,
            stats.fragmentation_percent
        );
        println!(
            "  {:<13} {} of {} requests served ({:.0}%)",
            "",
            stats.allocations.successful,
            stats.allocations.total,
            stats.success_rate() * 100.0
        );
    }
}
