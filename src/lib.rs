//! # reuse_pool
//!
//! Thread-safe object pools for reusing expensive-to-construct resources
//! (buffers, connections, parsers) across many concurrent consumers.
//!
//! ## Features
//!
//! - [`BoundedPool`]: caps live items and blocks acquirers when exhausted
//! - [`UnboundedPool`]: constructs on demand and never blocks
//! - Construct, validate and release lifecycle hooks
//! - Automatic return of items via RAII guards
//! - Idempotent teardown, also run when the pool is dropped
//! - Async acquisition on tokio's blocking thread pool
//! - Metrics, Prometheus export and health status
//!
//! ## Quick Start
//!
//! ```rust
//! use reuse_pool::{BoundedPool, LifecycleHooks, Pool};
//!
//! let hooks = LifecycleHooks::new(|| Vec::<u8>::with_capacity(1024))
//!     .with_validate(|buf: &Vec<u8>| buf.capacity() >= 1024);
//! let pool = BoundedPool::new(2, 8, hooks).unwrap();
//! {
//!     let mut buf = pool.get().unwrap();
//!     buf.extend_from_slice(b"payload");
//!     // Buffer automatically returned when `buf` goes out of scope
//! }
//! assert_eq!(pool.available(), 2);
//! ```

mod async_pool;
mod bounded;
mod config;
mod errors;
mod health;
mod hooks;
mod metrics;
mod pool;
mod queue;
mod shared;
mod unbounded;

pub use async_pool::AsyncPool;
pub use bounded::BoundedPool;
pub use config::PoolConfiguration;
pub use errors::{PoolError, PoolResult};
pub use health::HealthStatus;
pub use hooks::LifecycleHooks;
pub use metrics::{MetricsExporter, PoolMetrics};
pub use pool::{OwnedPooledObject, Pool, PooledObject};
pub use unbounded::UnboundedPool;
