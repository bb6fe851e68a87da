//! State and hook plumbing shared by both pool variants

use crate::config::PoolConfiguration;
use crate::errors::{PoolError, PoolResult};
use crate::hooks::{LifecycleHooks, ResolvedHooks};
use crate::metrics::{MetricsTracker, PoolMetrics};
use crate::queue::ReuseQueue;

use parking_lot::{Mutex, MutexGuard};

/// Allocation counter and teardown flag, guarded by one lock.
#[derive(Debug)]
pub(crate) struct Ledger {
    pub allocated: usize,
    pub max: usize,
    pub closed: bool,
}

pub(crate) struct PoolCore<T> {
    queue: ReuseQueue<T>,
    hooks: ResolvedHooks<T>,
    ledger: Mutex<Ledger>,
    pub metrics: MetricsTracker,
}

impl<T> PoolCore<T> {
    /// Builds the core and eagerly fills the queue with `initial_size` items.
    ///
    /// `counts_initial` decides whether those items are charged to the
    /// allocation counter.
    pub fn new(
        config: PoolConfiguration,
        hooks: LifecycleHooks<T>,
        counts_initial: bool,
    ) -> PoolResult<Self> {
        config.validate()?;
        let hooks = hooks
            .into_resolved()
            .ok_or_else(|| PoolError::invalid("construct hook is required"))?;

        let core = Self {
            queue: ReuseQueue::new(config.max_size),
            hooks,
            ledger: Mutex::new(Ledger {
                allocated: if counts_initial { config.initial_size } else { 0 },
                max: config.max_size,
                closed: false,
            }),
            metrics: MetricsTracker::new(),
        };

        for _ in 0..config.initial_size {
            let item = core.construct();
            if let Err(item) = core.queue.try_push(item) {
                // initial <= max, so the queue always has room here.
                core.dispose(item);
            }
        }

        tracing::debug!(
            initial = config.initial_size,
            max = config.max_size,
            "Created pool"
        );

        Ok(core)
    }

    pub fn ledger(&self) -> MutexGuard<'_, Ledger> {
        self.ledger.lock()
    }

    pub fn is_closed(&self) -> bool {
        self.ledger.lock().closed
    }

    pub fn available(&self) -> usize {
        self.queue.len()
    }

    pub fn construct(&self) -> T {
        MetricsTracker::increment(&self.metrics.constructed);
        self.hooks.construct()
    }

    pub fn dispose(&self, item: T) {
        MetricsTracker::increment(&self.metrics.disposed);
        self.hooks.release(item);
    }

    /// Pops an idle item without blocking, replacing it if it fails validation.
    pub fn take_reused(&self) -> Option<T> {
        self.queue.try_pop().map(|item| self.revalidate(item))
    }

    /// Blocks until a released item arrives or the queue is closed.
    pub fn wait_for_release(&self) -> Option<T> {
        MetricsTracker::increment(&self.metrics.blocked_acquires);
        tracing::trace!("Pool exhausted, waiting for a release");

        let item = self.queue.pop_blocking()?;
        if self.is_closed() {
            // Raced with teardown; the item must not outlive the pool.
            self.dispose(item);
            return None;
        }
        Some(self.revalidate(item))
    }

    /// Offers the item to the reuse queue, handing it back on overflow or close.
    pub fn offer(&self, item: T) -> Result<(), T> {
        self.queue.try_push(item)?;
        MetricsTracker::increment(&self.metrics.returned);
        Ok(())
    }

    fn revalidate(&self, item: T) -> T {
        if self.hooks.is_valid(&item) {
            MetricsTracker::increment(&self.metrics.reused);
            return item;
        }

        MetricsTracker::increment(&self.metrics.replaced);
        tracing::trace!("Reused item failed validation, replacing it");
        self.dispose(item);
        self.construct()
    }

    /// Closes the pool and releases every queued item.
    ///
    /// Only the first call does any work; the rest return `false`.
    pub fn teardown(&self) -> bool {
        {
            let mut ledger = self.ledger.lock();
            if ledger.closed {
                return false;
            }
            ledger.closed = true;
            ledger.allocated = 0;
            ledger.max = 0;
            self.queue.close();
        }

        let drained = self.queue.drain();
        let count = drained.len();
        for item in drained {
            self.dispose(item);
        }

        tracing::debug!(drained = count, "Pool destroyed");
        true
    }

    pub fn snapshot(&self, counts_allocation: bool) -> PoolMetrics {
        let (allocated, max) = {
            let ledger = self.ledger.lock();
            (ledger.allocated, ledger.max)
        };
        let allocated = if counts_allocation { allocated } else { 0 };
        self.metrics.get_metrics(self.queue.len(), allocated, max)
    }
}

impl<T> Drop for PoolCore<T> {
    fn drop(&mut self) {
        self.teardown();
    }
}
