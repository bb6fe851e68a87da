//! Async acquisition on top of the blocking pool contract

use crate::pool::{OwnedPooledObject, Pool};

use async_trait::async_trait;
use std::sync::Arc;

/// Acquire pooled items from async code
///
/// A bounded pool at capacity blocks its caller, so acquisition runs on
/// tokio's blocking thread pool instead of stalling the runtime. Dropping the
/// returned future does not cancel the acquire; an item obtained after that
/// point is released back through its guard.
///
/// # Examples
///
/// ```
/// use reuse_pool::{AsyncPool, BoundedPool, LifecycleHooks};
/// use std::sync::Arc;
///
/// let runtime = tokio::runtime::Runtime::new().unwrap();
/// runtime.block_on(async {
///     let pool = Arc::new(BoundedPool::new(1, 1, LifecycleHooks::new(|| 7u32)).unwrap());
///     let item = pool.acquire_async().await.unwrap();
///     assert_eq!(*item, 7);
/// });
/// ```
#[async_trait]
pub trait AsyncPool<T> {
    /// Acquire an item without blocking the async runtime
    async fn acquire_async(&self) -> Option<OwnedPooledObject<T>>;
}

#[async_trait]
impl<T, P> AsyncPool<T> for Arc<P>
where
    T: Send + 'static,
    P: Pool<T> + 'static,
{
    async fn acquire_async(&self) -> Option<OwnedPooledObject<T>> {
        let pool = Arc::clone(self);
        match tokio::task::spawn_blocking(move || OwnedPooledObject::acquire(pool)).await {
            Ok(item) => item,
            Err(err) if err.is_panic() => std::panic::resume_unwind(err.into_panic()),
            Err(err) => {
                tracing::debug!(error = %err, "Blocking acquire was cancelled");
                None
            }
        }
    }
}
