//! Metrics collection and export for object pools

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Metrics snapshot for a pool
///
/// # Examples
///
/// ```
/// use reuse_pool::{BoundedPool, LifecycleHooks, Pool};
///
/// let pool = BoundedPool::new(2, 4, LifecycleHooks::new(|| 0u32)).unwrap();
///
/// let item = pool.acquire().unwrap();
/// pool.release(item);
///
/// let metrics = pool.get_metrics();
/// assert_eq!(metrics.constructed, 2);
/// assert_eq!(metrics.reused, 1);
/// assert_eq!(metrics.returned, 1);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct PoolMetrics {
    /// Items built by the construct hook, including replacements
    pub constructed: usize,

    /// Acquisitions served from the reuse queue
    pub reused: usize,

    /// Reused items rejected by the validate hook and replaced
    pub replaced: usize,

    /// Releases that went back into the reuse queue
    pub returned: usize,

    /// Items handed to the release hook
    pub disposed: usize,

    /// Acquisitions that had to wait for a release
    pub blocked_acquires: usize,

    /// Releases that found the allocation counter already at zero
    pub over_releases: usize,

    /// Idle items currently queued
    pub available_objects: usize,

    /// Live items counted against the cap (bounded pools only)
    pub allocated_objects: usize,

    /// Capacity ceiling or sizing hint
    pub max_capacity: usize,

    /// Allocation ratio (0.0 to 1.0); always 0.0 for unbounded pools
    pub utilization: f64,
}

impl PoolMetrics {
    /// Export metrics as a HashMap
    pub fn export(&self) -> HashMap<String, String> {
        let mut metrics = HashMap::new();
        metrics.insert("constructed".to_string(), self.constructed.to_string());
        metrics.insert("reused".to_string(), self.reused.to_string());
        metrics.insert("replaced".to_string(), self.replaced.to_string());
        metrics.insert("returned".to_string(), self.returned.to_string());
        metrics.insert("disposed".to_string(), self.disposed.to_string());
        metrics.insert("blocked_acquires".to_string(), self.blocked_acquires.to_string());
        metrics.insert("over_releases".to_string(), self.over_releases.to_string());
        metrics.insert("available_objects".to_string(), self.available_objects.to_string());
        metrics.insert("allocated_objects".to_string(), self.allocated_objects.to_string());
        metrics.insert("max_capacity".to_string(), self.max_capacity.to_string());
        metrics.insert("utilization".to_string(), format!("{:.2}", self.utilization));
        metrics
    }
}

/// Metrics exporter for Prometheus format
pub struct MetricsExporter;

impl MetricsExporter {
    /// Export metrics in Prometheus exposition format
    ///
    /// # Examples
    ///
    /// ```
    /// use reuse_pool::{LifecycleHooks, UnboundedPool};
    /// use std::collections::HashMap;
    ///
    /// let pool = UnboundedPool::new(1, 8, LifecycleHooks::new(String::new)).unwrap();
    ///
    /// let mut tags = HashMap::new();
    /// tags.insert("service".to_string(), "parser".to_string());
    ///
    /// let output = pool.export_metrics_prometheus("scratch", Some(&tags));
    /// assert!(output.contains("reuse_pool_objects_available"));
    /// assert!(output.contains("service=\"parser\""));
    /// ```
    pub fn export_prometheus(
        metrics: &PoolMetrics,
        pool_name: &str,
        tags: Option<&HashMap<String, String>>,
    ) -> String {
        let labels = Self::format_labels(pool_name, tags);
        let mut output = String::new();

        let gauges = [
            (
                "reuse_pool_objects_available",
                "Idle objects in the reuse queue",
                metrics.available_objects,
            ),
            (
                "reuse_pool_objects_allocated",
                "Live objects counted against the cap",
                metrics.allocated_objects,
            ),
            ("reuse_pool_capacity", "Capacity ceiling or sizing hint", metrics.max_capacity),
        ];
        for (name, help, value) in gauges {
            Self::write_metric(&mut output, name, help, "gauge", &labels, &value.to_string());
        }
        Self::write_metric(
            &mut output,
            "reuse_pool_utilization",
            "Allocation ratio",
            "gauge",
            &labels,
            &format!("{:.2}", metrics.utilization),
        );

        let counters = [
            (
                "reuse_pool_objects_constructed_total",
                "Objects built by the construct hook",
                metrics.constructed,
            ),
            (
                "reuse_pool_objects_reused_total",
                "Acquisitions served from the reuse queue",
                metrics.reused,
            ),
            (
                "reuse_pool_objects_replaced_total",
                "Reused objects that failed validation",
                metrics.replaced,
            ),
            (
                "reuse_pool_objects_returned_total",
                "Releases accepted back into the queue",
                metrics.returned,
            ),
            (
                "reuse_pool_objects_disposed_total",
                "Objects passed to the release hook",
                metrics.disposed,
            ),
            (
                "reuse_pool_acquires_blocked_total",
                "Acquisitions that waited for a release",
                metrics.blocked_acquires,
            ),
            (
                "reuse_pool_over_releases_total",
                "Releases beyond the allocation count",
                metrics.over_releases,
            ),
        ];
        for (name, help, value) in counters {
            Self::write_metric(&mut output, name, help, "counter", &labels, &value.to_string());
        }

        output
    }

    fn write_metric(
        output: &mut String,
        name: &str,
        help: &str,
        kind: &str,
        labels: &str,
        value: &str,
    ) {
        output.push_str(&format!("# HELP {} {}\n", name, help));
        output.push_str(&format!("# TYPE {} {}\n", name, kind));
        output.push_str(&format!("{}{{{}}} {}\n", name, labels, value));
    }

    fn format_labels(pool_name: &str, tags: Option<&HashMap<String, String>>) -> String {
        let mut labels = vec![format!("pool=\"{}\"", pool_name)];

        if let Some(tags) = tags {
            let mut tags: Vec<_> = tags.iter().collect();
            tags.sort();
            for (key, value) in tags {
                labels.push(format!("{}=\"{}\"", key, value));
            }
        }

        labels.join(",")
    }
}

/// Internal metrics tracker
#[derive(Debug, Default)]
pub(crate) struct MetricsTracker {
    pub constructed: AtomicUsize,
    pub reused: AtomicUsize,
    pub replaced: AtomicUsize,
    pub returned: AtomicUsize,
    pub disposed: AtomicUsize,
    pub blocked_acquires: AtomicUsize,
    pub over_releases: AtomicUsize,
}

impl MetricsTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn increment(counter: &AtomicUsize) {
        counter.fetch_add(1, Ordering::Relaxed);
    }

    pub fn get_metrics(&self, available: usize, allocated: usize, capacity: usize) -> PoolMetrics {
        let utilization = if capacity > 0 {
            allocated as f64 / capacity as f64
        } else {
            0.0
        };

        PoolMetrics {
            constructed: self.constructed.load(Ordering::Relaxed),
            reused: self.reused.load(Ordering::Relaxed),
            replaced: self.replaced.load(Ordering::Relaxed),
            returned: self.returned.load(Ordering::Relaxed),
            disposed: self.disposed.load(Ordering::Relaxed),
            blocked_acquires: self.blocked_acquires.load(Ordering::Relaxed),
            over_releases: self.over_releases.load(Ordering::Relaxed),
            available_objects: available,
            allocated_objects: allocated,
            max_capacity: capacity,
            utilization,
        }
    }
}
