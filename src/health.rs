//! Health monitoring for object pools

/// Health status of an object pool
///
/// # Examples
///
/// ```
/// use reuse_pool::{BoundedPool, LifecycleHooks, Pool};
///
/// let pool = BoundedPool::new(3, 10, LifecycleHooks::new(|| 0u8)).unwrap();
///
/// let health = pool.get_health_status();
/// assert!(health.is_healthy());
/// assert_eq!(health.available_objects, 3);
///
/// pool.destroy();
/// assert!(!pool.get_health_status().is_healthy());
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct HealthStatus {
    /// Whether the pool is healthy
    pub is_healthy: bool,

    /// Number of warnings detected
    pub warning_count: usize,

    /// Allocation ratio (0.0 to 1.0); always 0.0 for unbounded pools
    pub utilization: f64,

    /// Idle objects in the reuse queue
    pub available_objects: usize,

    /// Live objects counted against the cap
    pub allocated_objects: usize,

    /// Capacity ceiling or sizing hint
    pub total_capacity: usize,

    /// Whether the pool has been torn down
    pub closed: bool,

    /// Warning messages
    pub warnings: Vec<String>,
}

impl HealthStatus {
    /// Health of a bounded pool, where allocation is measured against the cap
    pub fn bounded(available: usize, allocated: usize, capacity: usize, closed: bool) -> Self {
        let utilization = if capacity > 0 {
            allocated as f64 / capacity as f64
        } else {
            0.0
        };

        let mut status = Self::base(available, allocated, capacity, closed, utilization);

        if utilization > 0.9 {
            status.warn(format!("High utilization: {:.1}%", utilization * 100.0));
            status.is_healthy = false;
        }

        if !closed && capacity > 0 && allocated == capacity && available == 0 {
            status.warn("Pool exhausted - acquirers will block".to_string());
        }

        status
    }

    /// Health of an unbounded pool, which never runs out of capacity
    pub fn unbounded(available: usize, sizing_hint: usize, closed: bool) -> Self {
        let mut status = Self::base(available, 0, sizing_hint, closed, 0.0);

        if !closed && available == 0 {
            status.warn("Reuse cache is empty".to_string());
        }

        status
    }

    fn base(
        available: usize,
        allocated: usize,
        capacity: usize,
        closed: bool,
        utilization: f64,
    ) -> Self {
        let mut status = Self {
            is_healthy: true,
            warning_count: 0,
            utilization,
            available_objects: available,
            allocated_objects: allocated,
            total_capacity: capacity,
            closed,
            warnings: Vec::new(),
        };

        if closed {
            status.warn("Pool is closed".to_string());
            status.is_healthy = false;
        }

        status
    }

    fn warn(&mut self, message: String) {
        self.warnings.push(message);
        self.warning_count = self.warnings.len();
    }

    /// Check if the pool is healthy
    pub fn is_healthy(&self) -> bool {
        self.is_healthy
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_high_utilization_is_unhealthy() {
        let status = HealthStatus::bounded(0, 10, 10, false);
        assert!(!status.is_healthy());
        assert_eq!(status.warning_count, 2);
        assert!(status.warnings[0].starts_with("High utilization"));
    }

    #[test]
    fn test_moderate_utilization_is_healthy() {
        let status = HealthStatus::bounded(2, 5, 10, false);
        assert!(status.is_healthy());
        assert_eq!(status.warning_count, 0);
        assert_eq!(status.utilization, 0.5);
    }

    #[test]
    fn test_unbounded_empty_cache_warns_but_stays_healthy() {
        let status = HealthStatus::unbounded(0, 16, false);
        assert!(status.is_healthy());
        assert_eq!(status.warnings, vec!["Reuse cache is empty".to_string()]);
    }

    #[test]
    fn test_closed_pool_is_unhealthy() {
        let status = HealthStatus::unbounded(0, 0, true);
        assert!(!status.is_healthy());
        assert!(status.closed);
        assert_eq!(status.warning_count, 1);
    }
}
