//! Pool configuration options

use crate::errors::{PoolError, PoolResult};

/// Sizing configuration shared by both pool variants
///
/// For a [`BoundedPool`](crate::BoundedPool) `max_size` is the hard ceiling on
/// live items. For an [`UnboundedPool`](crate::UnboundedPool) it is only a
/// sizing hint for how many idle items are cached.
///
/// # Examples
///
/// ```
/// use reuse_pool::PoolConfiguration;
///
/// let config = PoolConfiguration::new()
///     .with_initial_size(4)
///     .with_max_size(16);
///
/// assert_eq!(config.initial_size, 4);
/// assert_eq!(config.max_size, 16);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PoolConfiguration {
    /// Number of items constructed eagerly when the pool is created
    pub initial_size: usize,

    /// Capacity ceiling (bounded) or idle cache size (unbounded)
    pub max_size: usize,
}

impl Default for PoolConfiguration {
    fn default() -> Self {
        Self {
            initial_size: 0,
            max_size: 100,
        }
    }
}

impl PoolConfiguration {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the number of eagerly constructed items
    pub fn with_initial_size(mut self, size: usize) -> Self {
        self.initial_size = size;
        self
    }

    /// Set the capacity ceiling or sizing hint
    pub fn with_max_size(mut self, size: usize) -> Self {
        self.max_size = size;
        self
    }

    /// Check that the configured bounds are not inverted
    ///
    /// # Examples
    ///
    /// ```
    /// use reuse_pool::{PoolConfiguration, PoolError};
    ///
    /// let config = PoolConfiguration::new()
    ///     .with_initial_size(5)
    ///     .with_max_size(2);
    ///
    /// assert!(matches!(config.validate(), Err(PoolError::InvalidParameters { .. })));
    /// ```
    pub fn validate(&self) -> PoolResult<()> {
        if self.initial_size > self.max_size {
            return Err(PoolError::invalid(format!(
                "initial size {} exceeds max size {}",
                self.initial_size, self.max_size
            )));
        }
        Ok(())
    }
}
