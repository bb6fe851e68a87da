//! Caller-supplied lifecycle hooks

use std::fmt;
use std::sync::Arc;

type ConstructFn<T> = Arc<dyn Fn() -> T + Send + Sync>;
type ValidateFn<T> = Arc<dyn Fn(&T) -> bool + Send + Sync>;
type ReleaseFn<T> = Arc<dyn Fn(T) + Send + Sync>;

/// Construct, validate and release functions for pooled items
///
/// The construct hook is total: if building an item can fail, encode the
/// failure in `T` itself (for example `T = Result<Conn, io::Error>`).
///
/// # Examples
///
/// ```
/// use reuse_pool::LifecycleHooks;
///
/// let hooks = LifecycleHooks::new(|| Vec::<u8>::with_capacity(4096))
///     .with_validate(|buf: &Vec<u8>| buf.capacity() >= 4096)
///     .with_release(drop);
///
/// assert!(hooks.has_construct());
/// ```
pub struct LifecycleHooks<T> {
    construct: Option<ConstructFn<T>>,
    validate: Option<ValidateFn<T>>,
    release: Option<ReleaseFn<T>>,
}

impl<T> Default for LifecycleHooks<T> {
    /// Hooks without a constructor; pool construction rejects these.
    fn default() -> Self {
        Self {
            construct: None,
            validate: None,
            release: None,
        }
    }
}

impl<T> Clone for LifecycleHooks<T> {
    fn clone(&self) -> Self {
        Self {
            construct: self.construct.clone(),
            validate: self.validate.clone(),
            release: self.release.clone(),
        }
    }
}

impl<T> fmt::Debug for LifecycleHooks<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LifecycleHooks")
            .field("construct", &self.construct.is_some())
            .field("validate", &self.validate.is_some())
            .field("release", &self.release.is_some())
            .finish()
    }
}

impl<T> LifecycleHooks<T> {
    /// Create hooks with the given constructor
    pub fn new<F>(construct: F) -> Self
    where
        F: Fn() -> T + Send + Sync + 'static,
    {
        Self::default().with_construct(construct)
    }

    /// Set the constructor
    pub fn with_construct<F>(mut self, construct: F) -> Self
    where
        F: Fn() -> T + Send + Sync + 'static,
    {
        self.construct = Some(Arc::new(construct));
        self
    }

    /// Set the predicate run on items taken back out of the reuse queue
    pub fn with_validate<F>(mut self, validate: F) -> Self
    where
        F: Fn(&T) -> bool + Send + Sync + 'static,
    {
        self.validate = Some(Arc::new(validate));
        self
    }

    /// Set the disposal function for items that will not be reused
    pub fn with_release<F>(mut self, release: F) -> Self
    where
        F: Fn(T) + Send + Sync + 'static,
    {
        self.release = Some(Arc::new(release));
        self
    }

    /// Whether a constructor has been supplied
    pub fn has_construct(&self) -> bool {
        self.construct.is_some()
    }

    pub(crate) fn into_resolved(self) -> Option<ResolvedHooks<T>> {
        Some(ResolvedHooks {
            construct: self.construct?,
            validate: self.validate,
            release: self.release,
        })
    }
}

/// Hooks after the constructor has been checked to be present.
pub(crate) struct ResolvedHooks<T> {
    construct: ConstructFn<T>,
    validate: Option<ValidateFn<T>>,
    release: Option<ReleaseFn<T>>,
}

impl<T> ResolvedHooks<T> {
    pub fn construct(&self) -> T {
        (self.construct)()
    }

    /// Items are considered valid when no validator is set.
    pub fn is_valid(&self, item: &T) -> bool {
        self.validate.as_ref().is_none_or(|validate| validate(item))
    }

    /// Without a release hook the item is simply dropped.
    pub fn release(&self, item: T) {
        match &self.release {
            Some(release) => release(item),
            None => drop(item),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_default_has_no_constructor() {
        let hooks = LifecycleHooks::<u32>::default();
        assert!(!hooks.has_construct());
        assert!(hooks.into_resolved().is_none());
    }

    #[test]
    fn test_missing_validator_accepts_everything() {
        let hooks = LifecycleHooks::new(|| 7u32).into_resolved().unwrap();
        assert_eq!(hooks.construct(), 7);
        assert!(hooks.is_valid(&0));
    }

    #[test]
    fn test_release_hook_receives_item() {
        let released = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&released);
        let hooks = LifecycleHooks::new(|| 1usize)
            .with_release(move |item| {
                counter.fetch_add(item, Ordering::SeqCst);
            })
            .into_resolved()
            .unwrap();

        hooks.release(5);
        hooks.release(2);
        assert_eq!(released.load(Ordering::SeqCst), 7);
    }

    #[test]
    fn test_debug_shows_presence_only() {
        let hooks = LifecycleHooks::new(|| 0u8).with_validate(|_| true);
        let rendered = format!("{hooks:?}");
        assert!(rendered.contains("construct: true"));
        assert!(rendered.contains("validate: true"));
        assert!(rendered.contains("release: false"));
    }
}
