//! Pool that constructs on demand and never blocks

use crate::config::PoolConfiguration;
use crate::errors::PoolResult;
use crate::health::HealthStatus;
use crate::hooks::LifecycleHooks;
use crate::metrics::{MetricsExporter, PoolMetrics};
use crate::pool::Pool;
use crate::shared::PoolCore;

use std::collections::HashMap;

/// Thread-safe pool whose reuse queue is only a cache
///
/// The sizing hint caps how many idle items are kept around, not how many
/// may exist. Acquisition reuses an idle item when one is queued and
/// constructs a new one otherwise.
///
/// # Examples
///
/// ```
/// use reuse_pool::{LifecycleHooks, Pool, UnboundedPool};
///
/// let pool = UnboundedPool::new(0, 1, LifecycleHooks::new(|| vec![0u8; 1024])).unwrap();
///
/// let a = pool.acquire().unwrap();
/// let b = pool.acquire().unwrap();
///
/// pool.release(a);
/// pool.release(b); // cache already full, dropped
/// assert_eq!(pool.available(), 1);
/// ```
pub struct UnboundedPool<T> {
    core: PoolCore<T>,
}

impl<T: Send + 'static> UnboundedPool<T> {
    /// Create a pool with `initial` prebuilt items caching up to `sizing_hint` idle items
    pub fn new(initial: usize, sizing_hint: usize, hooks: LifecycleHooks<T>) -> PoolResult<Self> {
        Self::with_config(
            PoolConfiguration::new()
                .with_initial_size(initial)
                .with_max_size(sizing_hint),
            hooks,
        )
    }

    /// Create a pool from a configuration
    pub fn with_config(config: PoolConfiguration, hooks: LifecycleHooks<T>) -> PoolResult<Self> {
        Ok(Self {
            core: PoolCore::new(config, hooks, false)?,
        })
    }

    /// Get health status
    pub fn get_health_status(&self) -> HealthStatus {
        let (hint, closed) = {
            let ledger = self.core.ledger();
            (ledger.max, ledger.closed)
        };
        HealthStatus::unbounded(self.core.available(), hint, closed)
    }

    /// Get pool metrics
    ///
    /// `max_capacity` reports the sizing hint, or zero once the pool is destroyed.
    pub fn get_metrics(&self) -> PoolMetrics {
        self.core.snapshot(false)
    }

    /// Export metrics
    pub fn export_metrics(&self) -> HashMap<String, String> {
        self.get_metrics().export()
    }

    /// Export metrics in Prometheus format
    pub fn export_metrics_prometheus(
        &self,
        pool_name: &str,
        tags: Option<&HashMap<String, String>>,
    ) -> String {
        MetricsExporter::export_prometheus(&self.get_metrics(), pool_name, tags)
    }
}

impl<T: Send + 'static> Pool<T> for UnboundedPool<T> {
    fn acquire(&self) -> Option<T> {
        if self.core.is_closed() {
            return None;
        }

        match self.core.take_reused() {
            Some(item) => Some(item),
            None => Some(self.core.construct()),
        }
    }

    fn release(&self, item: T) {
        if let Err(item) = self.core.offer(item) {
            self.core.dispose(item);
        }
    }

    fn destroy(&self) {
        self.core.teardown();
    }

    fn is_closed(&self) -> bool {
        self.core.is_closed()
    }

    fn available(&self) -> usize {
        self.core.available()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::PoolError;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_inverted_bounds_rejected() {
        let result = UnboundedPool::new(3, 2, LifecycleHooks::new(|| 0u32));
        assert!(matches!(result, Err(PoolError::InvalidParameters { .. })));
    }

    #[test]
    fn test_constructs_beyond_sizing_hint() {
        let pool = UnboundedPool::new(0, 1, LifecycleHooks::new(|| 0u32)).unwrap();
        let items: Vec<_> = (0..10).map(|_| pool.acquire().unwrap()).collect();
        assert_eq!(items.len(), 10);
        assert_eq!(pool.get_metrics().constructed, 10);
        assert_eq!(pool.get_metrics().blocked_acquires, 0);
    }

    #[test]
    fn test_overflow_release_disposes() {
        let released = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&released);
        let pool = UnboundedPool::new(
            0,
            2,
            LifecycleHooks::new(|| 0u32).with_release(move |_| {
                counter.fetch_add(1, Ordering::SeqCst);
            }),
        )
        .unwrap();

        for item in 0..5 {
            pool.release(item);
        }
        assert_eq!(pool.available(), 2);
        assert_eq!(released.load(Ordering::SeqCst), 3);
        assert_eq!(pool.get_metrics().over_releases, 0);
    }

    #[test]
    fn test_zero_sizing_hint_never_caches() {
        let pool = UnboundedPool::new(0, 0, LifecycleHooks::new(|| 1u32)).unwrap();
        let item = pool.acquire().unwrap();
        pool.release(item);
        assert_eq!(pool.available(), 0);
        assert_eq!(pool.get_metrics().disposed, 1);
    }

    #[test]
    fn test_metrics_report_no_allocation() {
        let pool = UnboundedPool::new(2, 4, LifecycleHooks::new(|| 0u32)).unwrap();
        let _item = pool.acquire().unwrap();
        let metrics = pool.get_metrics();
        assert_eq!(metrics.allocated_objects, 0);
        assert_eq!(metrics.max_capacity, 4);
        assert_eq!(metrics.utilization, 0.0);
    }

    #[test]
    fn test_destroyed_pool_reports_zero_capacity() {
        let pool = UnboundedPool::new(1, 4, LifecycleHooks::new(|| 0u32)).unwrap();
        pool.destroy();

        let metrics = pool.get_metrics();
        assert_eq!(metrics.max_capacity, 0);
        assert_eq!(metrics.allocated_objects, 0);
        assert_eq!(pool.get_health_status().total_capacity, 0);
    }
}
