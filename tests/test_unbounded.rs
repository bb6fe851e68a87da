use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Barrier, Mutex};
use std::thread;
use std::time::{Duration, Instant};

use reuse_pool::{LifecycleHooks, Pool, PoolError, UnboundedPool};

#[test]
fn rejects_invalid_parameters() {
    assert!(matches!(
        UnboundedPool::new(2, 1, LifecycleHooks::new(|| 1u32)),
        Err(PoolError::InvalidParameters { .. })
    ));
    assert!(matches!(
        UnboundedPool::<u32>::new(0, 1, LifecycleHooks::default()),
        Err(PoolError::InvalidParameters { .. })
    ));
}

#[test]
fn reuses_cached_item_before_constructing() {
    let constructed = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&constructed);
    let pool = UnboundedPool::new(
        1,
        4,
        LifecycleHooks::new(move || counter.fetch_add(1, Ordering::SeqCst)),
    )
    .unwrap();

    assert_eq!(pool.acquire(), Some(0));
    assert_eq!(pool.acquire(), Some(1));
    assert_eq!(constructed.load(Ordering::SeqCst), 2);
}

#[test]
fn invalid_reused_item_is_replaced() {
    let released = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&released);
    let pool = UnboundedPool::new(
        0,
        1,
        LifecycleHooks::new(|| "B")
            .with_validate(|item| *item != "A")
            .with_release(move |item| sink.lock().unwrap().push(item)),
    )
    .unwrap();

    pool.release("A");
    assert_eq!(pool.acquire(), Some("B"));
    assert_eq!(*released.lock().unwrap(), vec!["A"]);
    assert_eq!(pool.get_metrics().replaced, 1);
}

#[test]
fn destroy_is_idempotent_and_final() {
    let released = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&released);
    let pool = UnboundedPool::new(
        3,
        3,
        LifecycleHooks::new(|| 0u32).with_release(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        }),
    )
    .unwrap();

    pool.destroy();
    pool.destroy();
    assert_eq!(released.load(Ordering::SeqCst), 3);

    assert!(pool.is_closed());
    assert_eq!(pool.acquire(), None);

    pool.release(7);
    assert_eq!(released.load(Ordering::SeqCst), 4);
    assert_eq!(pool.available(), 0);
}

#[test]
fn concurrent_acquires_never_block() {
    const THREADS: usize = 8;
    const PER_THREAD: usize = 50;

    let pool = Arc::new(UnboundedPool::new(0, 2, LifecycleHooks::new(|| vec![0u8; 32])).unwrap());
    let barrier = Arc::new(Barrier::new(THREADS));
    let started = Instant::now();

    let handles: Vec<_> = (0..THREADS)
        .map(|_| {
            let pool = Arc::clone(&pool);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                // Hold every item so the cache stays empty.
                (0..PER_THREAD)
                    .map(|_| pool.acquire().unwrap())
                    .collect::<Vec<_>>()
            })
        })
        .collect();

    let total: usize = handles
        .into_iter()
        .map(|handle| handle.join().unwrap().len())
        .sum();

    assert_eq!(total, THREADS * PER_THREAD);
    assert!(started.elapsed() < Duration::from_secs(10));

    let metrics = pool.get_metrics();
    assert_eq!(metrics.constructed, THREADS * PER_THREAD);
    assert_eq!(metrics.blocked_acquires, 0);
}

#[test]
fn shared_trait_object_dispatch() {
    let pools: Vec<Box<dyn Pool<u32>>> = vec![
        Box::new(UnboundedPool::new(1, 1, LifecycleHooks::new(|| 1)).unwrap()),
        Box::new(reuse_pool::BoundedPool::new(1, 1, LifecycleHooks::new(|| 2)).unwrap()),
    ];

    for pool in &pools {
        let item = pool.acquire().unwrap();
        pool.release(item);
        assert_eq!(pool.available(), 1);
        pool.destroy();
        assert!(pool.is_closed());
    }
}
