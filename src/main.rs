// reuse_pool - bounded and unbounded object pools
// This is just a binary wrapper - the actual library is in lib.rs

use reuse_pool::{BoundedPool, LifecycleHooks, Pool, UnboundedPool};
use std::sync::Arc;
use std::thread;

fn main() {
    println!("=== reuse_pool ===");
    println!();

    println!("Bounded pool (cap 2, four workers):");
    let pool = Arc::new(
        BoundedPool::new(1, 2, LifecycleHooks::new(|| Vec::<u8>::with_capacity(64)))
            .expect("valid pool parameters"),
    );

    let workers: Vec<_> = (0..4u8)
        .map(|id| {
            let pool = Arc::clone(&pool);
            thread::spawn(move || {
                if let Some(mut buf) = pool.get() {
                    buf.clear();
                    buf.push(id);
                }
            })
        })
        .collect();
    for worker in workers {
        worker.join().expect("worker panicked");
    }

    let metrics = pool.get_metrics();
    println!("  Constructed: {}", metrics.constructed);
    println!("  Reused: {}", metrics.reused);
    println!("  Blocked acquires: {}", metrics.blocked_acquires);
    println!("  Available after return: {}", pool.available());
    println!();

    println!("Unbounded pool (sizing hint 1):");
    let pool = UnboundedPool::new(0, 1, LifecycleHooks::new(String::new))
        .expect("valid pool parameters");
    let a = pool.get();
    let b = pool.get();
    drop(a);
    drop(b);
    println!("  Cached after return: {}", pool.available());
    println!("  Disposed: {}", pool.get_metrics().disposed);

    pool.destroy();
    println!("  Closed: {}", pool.is_closed());
}
