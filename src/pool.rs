//! The pool contract and checkout guards

use std::ops::{Deref, DerefMut};
use std::sync::Arc;

/// Contract shared by [`BoundedPool`](crate::BoundedPool) and
/// [`UnboundedPool`](crate::UnboundedPool).
///
/// `acquire` returns `None` only once the pool has been destroyed. `release`
/// always succeeds from the caller's point of view: the item is either queued
/// for reuse or handed to the release hook.
pub trait Pool<T>: Send + Sync {
    /// Take an item out of the pool, constructing or waiting as the variant dictates
    fn acquire(&self) -> Option<T>;

    /// Give an item back to the pool
    fn release(&self, item: T);

    /// Close the pool and release every idle item. Idempotent.
    fn destroy(&self);

    /// Whether the pool has been destroyed
    fn is_closed(&self) -> bool;

    /// Number of idle items waiting in the reuse queue
    fn available(&self) -> usize;

    /// Acquire an item wrapped in a guard that releases it when dropped
    ///
    /// # Examples
    ///
    /// ```
    /// use reuse_pool::{BoundedPool, LifecycleHooks, Pool};
    ///
    /// let pool = BoundedPool::new(1, 1, LifecycleHooks::new(String::new)).unwrap();
    /// {
    ///     let mut buf = pool.get().unwrap();
    ///     buf.push_str("scratch");
    ///     assert_eq!(pool.available(), 0);
    /// }
    /// assert_eq!(pool.available(), 1);
    /// ```
    fn get(&self) -> Option<PooledObject<'_, T>>
    where
        Self: Sized,
    {
        let item = self.acquire()?;
        Some(PooledObject::new(item, self))
    }
}

/// A pooled item borrowed from a pool; released back when dropped
pub struct PooledObject<'a, T> {
    value: Option<T>,
    pool: &'a dyn Pool<T>,
}

impl<'a, T> PooledObject<'a, T> {
    fn new(value: T, pool: &'a dyn Pool<T>) -> Self {
        Self {
            value: Some(value),
            pool,
        }
    }

    /// Take the item out of the guard without releasing it
    ///
    /// The caller becomes responsible for handing it back with
    /// [`Pool::release`], or for disposing of it.
    pub fn detach(mut self) -> T {
        self.value.take().expect("Value already taken")
    }
}

impl<T> Deref for PooledObject<'_, T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        self.value.as_ref().expect("Value already taken")
    }
}

impl<T> DerefMut for PooledObject<'_, T> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.value.as_mut().expect("Value already taken")
    }
}

impl<T> Drop for PooledObject<'_, T> {
    fn drop(&mut self) {
        if let Some(value) = self.value.take() {
            self.pool.release(value);
        }
    }
}

/// A pooled item that keeps its pool alive through an [`Arc`]
///
/// Unlike [`PooledObject`] it carries no lifetime, so it can be moved to
/// other threads or tasks.
///
/// # Examples
///
/// ```
/// use reuse_pool::{LifecycleHooks, OwnedPooledObject, Pool, UnboundedPool};
/// use std::sync::Arc;
///
/// let pool = Arc::new(UnboundedPool::new(0, 4, LifecycleHooks::new(|| vec![0u8; 16])).unwrap());
///
/// let buf = OwnedPooledObject::acquire(Arc::clone(&pool)).unwrap();
/// std::thread::spawn(move || assert_eq!(buf.len(), 16)).join().unwrap();
///
/// assert_eq!(pool.available(), 1);
/// ```
pub struct OwnedPooledObject<T> {
    value: Option<T>,
    pool: Arc<dyn Pool<T>>,
}

impl<T: 'static> OwnedPooledObject<T> {
    /// Acquire an item from a shared pool
    pub fn acquire<P>(pool: Arc<P>) -> Option<Self>
    where
        P: Pool<T> + 'static,
    {
        Self::acquire_shared(pool)
    }

    /// Acquire an item from a type-erased shared pool
    pub fn acquire_shared(pool: Arc<dyn Pool<T>>) -> Option<Self> {
        let value = pool.acquire()?;
        Some(Self {
            value: Some(value),
            pool,
        })
    }
}

impl<T> OwnedPooledObject<T> {
    /// Take the item out of the guard without releasing it
    pub fn detach(mut self) -> T {
        self.value.take().expect("Value already taken")
    }
}

impl<T> Deref for OwnedPooledObject<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        self.value.as_ref().expect("Value already taken")
    }
}

impl<T> DerefMut for OwnedPooledObject<T> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.value.as_mut().expect("Value already taken")
    }
}

impl<T> Drop for OwnedPooledObject<T> {
    fn drop(&mut self) {
        if let Some(value) = self.value.take() {
            self.pool.release(value);
        }
    }
}
