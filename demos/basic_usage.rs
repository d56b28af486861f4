//! Basic usage example
//!
//! Demonstrates the joining thread, the thread-safe queue and stack, and the
//! parallel reduction.
//!
//! Run with: cargo run --example basic_usage

use rust_concurrent_blocks::prelude::*;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

fn main() -> Result<()> {
    println!("=== Rust Concurrent Blocks - Basic Usage Example ===\n");

    println!("1. Producer/consumer over a ThreadSafeQueue:");
    let queue = Arc::new(ThreadSafeQueue::new());
    let producer = {
        let queue = Arc::clone(&queue);
        JoiningThread::spawn_named("producer", move || {
            for i in 0..5 {
                queue.push(format!("message {}", i));
                thread::sleep(Duration::from_millis(10));
            }
        })?
    };

    for _ in 0..5 {
        println!("   received {}", queue.wait_and_pop());
    }
    // Joined here, even if we had returned early above
    drop(producer);

    println!("\n2. ThreadSafeStack:");
    let stack = ThreadSafeStack::new();
    for i in 1..=3 {
        stack.push(i);
    }
    while let Ok(top) = stack.pop() {
        println!("   popped {}", top);
    }
    match stack.pop() {
        Err(e) => println!("   popping again: {}", e),
        Ok(v) => println!("   unexpected value {}", v),
    }

    println!("\n3. Parallel reduction:");
    let data: Vec<u64> = (1..=1_000_000).collect();
    let config = ReduceConfig::new().with_max_partitions(4);
    println!(
        "   {} elements in {} partitions",
        data.len(),
        config.partition_count(data.len())
    );
    let sum = parallel_sum_with(&config, &data, 0)?;
    println!("   sum = {}", sum);

    let max = parallel_reduce(&data, 0, |a, b| a.max(b))?;
    println!("   max = {}", max);

    println!("\n=== Example completed successfully ===");
    Ok(())
}
