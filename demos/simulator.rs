//! Allocator Simulator
//!
//! Walks through first-fit, best-fit and buddy-system allocation on a
//! small region, printing the block map and statistics after each step.
//!
//! # Run
//!
//! ```bash
//! cargo run --example simulator
//! cargo run --example simulator -- 128 buddy-system
//! ```

use memsim::{Allocator, AllocatorConfig, Block, Strategy};
use std::env;
use std::process;
use std::time::Instant;

const BAR_WIDTH: usize = 64;

/// Render the block list as a proportional bar: digits for allocated
/// blocks (id modulo 10), dots for free space.
fn render(allocator: &Allocator) -> String {
    let total = allocator.total_size();
    let mut bar = String::with_capacity(BAR_WIDTH);

    for block in allocator.blocks() {
        let width = (block.size * BAR_WIDTH / total).max(1);
        let glyph = match block.id() {
            Some(id) => char::from_digit((id.value() % 10) as u32, 10).unwrap_or('#'),
            None => '.',
        };
        bar.extend(std::iter::repeat(glyph).take(width));
    }
    bar
}

fn print_state(allocator: &Allocator) {
    let stats = allocator.stats();

    println!("  [{}]", render(allocator));
    for block in allocator.blocks() {
        println!("    {}", block);
    }
    println!(
        "  used {} KB ({:.1}%), free {} KB, largest free {} KB, {} free block(s)",
        stats.used_memory,
        stats.usage_percent(),
        stats.free_memory,
        stats.largest_free_block,
        stats.free_blocks
    );
    println!(
        "  fragmentation {:.1}%, success rate {:.0}% ({}/{})",
        stats.fragmentation_percent,
        stats.success_rate() * 100.0,
        stats.allocations.successful,
        stats.allocations.total
    );
    println!();
}

fn parse_args() -> memsim::Result<AllocatorConfig> {
    let mut args = env::args().skip(1);
    let mut builder = AllocatorConfig::builder();

    if let Some(size) = args.next() {
        let size = size
            .parse::<usize>()
            .map_err(|e| memsim::Error::config(format!("invalid size {size:?}: {e}")))?;
        builder = builder.total_size(size);
    }
    if let Some(strategy) = args.next() {
        builder = builder.default_strategy(strategy.parse::<Strategy>()?);
    }

    let config = builder.build();
    config.validate()?;
    Ok(config)
}

fn main() {
    let config = match parse_args() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("error: {e}");
            process::exit(2);
        }
    };

    println!("=== Memory Allocator Simulator ===\n");
    println!("Configuration:");
    println!("  Total size: {} KB", config.total_size);
    println!("  Default strategy: {}", config.default_strategy);
    println!();

    println!("Strategies:");
    for strategy in Strategy::ALL {
        println!("  {:<13} {}", strategy.name(), strategy.description());
    }
    println!();

    let mut allocator = match Allocator::with_config(config) {
        Ok(allocator) => allocator,
        Err(e) => {
            eprintln!("error: {e}");
            process::exit(2);
        }
    };

    println!("--- Initial State ---");
    print_state(&allocator);

    let requests = [
        (10, Strategy::FirstFit),
        (20, Strategy::FirstFit),
        (5, Strategy::BestFit),
        (8, Strategy::BuddySystem),
    ];

    let mut ids = Vec::new();
    for (size, strategy) in requests {
        println!("--- Allocate {} KB ({}) ---", size, strategy);
        match allocator.allocate(size, strategy) {
            Ok(id) => {
                println!("  -> block {}", id);
                ids.push(id);
            }
            Err(e) => println!("  -> {}", e),
        }
        print_state(&allocator);
    }

    println!("--- Allocate {} KB ({}) ---", 6, allocator.config().default_strategy);
    match allocator.allocate_default(6) {
        Ok(id) => {
            println!("  -> block {}", id);
            ids.push(id);
        }
        Err(e) => println!("  -> {}", e),
    }
    print_state(&allocator);

    if let Some(&first) = ids.first() {
        println!("--- Free block {} ---", first);
        if let Err(e) = allocator.free(first) {
            println!("  -> {}", e);
        }
        print_state(&allocator);
    }

    println!("--- Free unknown block #999 ---");
    match allocator.free(memsim::BlockId::new(999)) {
        Ok(()) => println!("  -> freed"),
        Err(e) => println!("  -> {}", e),
    }
    println!();

    println!("Allocated blocks:");
    let allocated: Vec<Block> = allocator.allocated_blocks();
    if allocated.is_empty() {
        println!("  none");
    }
    for block in &allocated {
        println!("  {} ({} KB)", block.raw_id(), block.size);
    }
    println!();

    println!("History:");
    for event in allocator.history() {
        println!("  {}", event);
    }
    println!();

    match allocator.stats().to_json() {
        Ok(json) => println!("Stats JSON:\n  {}\n", json),
        Err(e) => println!("Stats JSON unavailable: {}\n", e),
    }

    println!("--- Reset ---");
    allocator.reset();
    print_state(&allocator);

    // === PROFILING ===
    println!("--- Performance Profiling ---\n");

    const ITERATIONS: u32 = 10_000;
    for strategy in Strategy::ALL {
        let start = Instant::now();
        for i in 0..ITERATIONS {
            if let Ok(id) = allocator.allocate(1 + (i as usize % 7), strategy) {
                let _ = allocator.free(id);
            }
        }
        let elapsed = start.elapsed();
        println!(
            "  {:<13} {:?} total, {:.0} ns/alloc+free",
            strategy.name(),
            elapsed,
            elapsed.as_nanos() as f64 / f64::from(ITERATIONS)
        );
        allocator.reset();
    }
}
