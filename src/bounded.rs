//! Pool with a hard cap on live items

use crate::config::PoolConfiguration;
use crate::errors::PoolResult;
use crate::health::HealthStatus;
use crate::hooks::LifecycleHooks;
use crate::metrics::{MetricsExporter, MetricsTracker, PoolMetrics};
use crate::pool::Pool;
use crate::shared::PoolCore;

use std::collections::HashMap;

/// Thread-safe pool that never holds more than `max` live items
///
/// Acquisition first reuses an idle item, then lazily constructs new ones
/// while fewer than `max` exist, and finally blocks until another thread
/// releases an item or the pool is destroyed.
///
/// # Examples
///
/// ```
/// use reuse_pool::{BoundedPool, LifecycleHooks, Pool};
///
/// let pool = BoundedPool::new(0, 2, LifecycleHooks::new(|| String::from("conn"))).unwrap();
///
/// let a = pool.acquire().unwrap();
/// let b = pool.acquire().unwrap();
/// assert_eq!(pool.allocated(), 2);
///
/// pool.release(a);
/// pool.release(b);
/// assert_eq!(pool.available(), 2);
/// ```
pub struct BoundedPool<T> {
    core: PoolCore<T>,
}

impl<T: Send + 'static> BoundedPool<T> {
    /// Create a pool with `initial` prebuilt items and a ceiling of `max`
    pub fn new(initial: usize, max: usize, hooks: LifecycleHooks<T>) -> PoolResult<Self> {
        Self::with_config(
            PoolConfiguration::new()
                .with_initial_size(initial)
                .with_max_size(max),
            hooks,
        )
    }

    /// Create a pool from a configuration
    pub fn with_config(config: PoolConfiguration, hooks: LifecycleHooks<T>) -> PoolResult<Self> {
        Ok(Self {
            core: PoolCore::new(config, hooks, true)?,
        })
    }

    /// Number of constructed items not yet disposed, idle or checked out
    pub fn allocated(&self) -> usize {
        self.core.ledger().allocated
    }

    /// Capacity ceiling; zero once destroyed
    pub fn max_size(&self) -> usize {
        self.core.ledger().max
    }

    /// Get health status
    pub fn get_health_status(&self) -> HealthStatus {
        let (allocated, max, closed) = {
            let ledger = self.core.ledger();
            (ledger.allocated, ledger.max, ledger.closed)
        };
        HealthStatus::bounded(self.core.available(), allocated, max, closed)
    }

    /// Get pool metrics
    pub fn get_metrics(&self) -> PoolMetrics {
        self.core.snapshot(true)
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

    /// Reserves a slot under the cap; `None` means closed, `Some(false)` means full.
    fn reserve_slot(&self) -> Option<bool> {
        let mut ledger = self.core.ledger();
        if ledger.closed {
            return None;
        }
        if ledger.allocated < ledger.max {
            ledger.allocated += 1;
            return Some(true);
        }
        Some(false)
    }
}

impl<T: Send + 'static> Pool<T> for BoundedPool<T> {
    fn acquire(&self) -> Option<T> {
        if self.core.is_closed() {
            return None;
        }

        if let Some(item) = self.core.take_reused() {
            return Some(item);
        }

        if self.reserve_slot()? {
            return Some(self.core.construct());
        }

        self.core.wait_for_release()
    }

    fn release(&self, item: T) {
        let Err(item) = self.core.offer(item) else {
            return;
        };

        {
            let mut ledger = self.core.ledger();
            if ledger.allocated > 0 {
                ledger.allocated -= 1;
            } else if !ledger.closed {
                MetricsTracker::increment(&self.core.metrics.over_releases);
                tracing::warn!(
                    max = ledger.max,
                    "Released more items than were allocated; allocation count left at zero"
                );
            }
        }

        self.core.dispose(item);
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
