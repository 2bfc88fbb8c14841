use std::fmt;
use std::sync::Arc;

use parking_lot::Mutex;

use crate::{Key, Poolable, Result, TaggedPool};

/// A thread-safe handle to a [`TaggedPool`].
///
/// All operations on the pool are serialized behind a single lock, so handing out and taking
/// back instances from different threads is totally ordered. Cloning the handle is cheap and
/// every clone refers to the same pool.
///
/// Instances are accessed through closures ([`with_item()`][1], [`with_item_mut()`][2]) so that
/// no reference to an instance outlives the lock.
///
/// # Example
///
/// ```rust
/// use std::thread;
///
/// use tagged_pool::{ItemSpec, TaggedPool};
/// # use tagged_pool::Poolable;
/// # #[derive(Clone, Debug, Default)]
/// # struct Spark { hits: u32 }
/// # impl Poolable for Spark {
/// #     fn instantiate(&self) -> Self { self.clone() }
/// # }
///
/// let pool = TaggedPool::builder()
///     .register(ItemSpec::new("spark", Spark::default()).amount(4))
///     .build_shared()
///     .unwrap();
///
/// let pool_clone = pool.clone();
///
/// thread::spawn(move || {
///     let key = pool_clone.get("spark").unwrap();
///     pool_clone.with_item_mut(key, |spark| spark.hits += 1);
///     pool_clone.return_item(key);
/// })
/// .join()
/// .unwrap();
///
/// assert_eq!(pool.active_len(), 0);
/// ```
///
/// [1]: Self::with_item
/// [2]: Self::with_item_mut
pub struct SharedTaggedPool<T> {
    inner: Arc<Mutex<TaggedPool<T>>>,
}

impl<T> From<TaggedPool<T>> for SharedTaggedPool<T> {
    fn from(pool: TaggedPool<T>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(pool)),
        }
    }
}

impl<T> Clone for SharedTaggedPool<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T: Poolable> SharedTaggedPool<T> {
    /// Hands out an inactive instance with the given tag.
    ///
    /// See [`TaggedPool::get()`].
    #[must_use]
    pub fn get(&self, tag: &str) -> Option<Key> {
        self.inner.lock().get(tag)
    }

    /// Hands out an inactive instance with the given tag, reporting why if there is none.
    ///
    /// See [`TaggedPool::try_get()`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownTag`][crate::Error::UnknownTag] if no spec is registered with the
    /// tag and [`Error::Exhausted`][crate::Error::Exhausted] if all its instances are in use and
    /// it is not expandable.
    pub fn try_get(&self, tag: &str) -> Result<Key> {
        self.inner.lock().try_get(tag)
    }

    /// Takes back an instance so it can be handed out again.
    ///
    /// See [`TaggedPool::return_item()`].
    pub fn return_item(&self, key: Key) {
        self.inner.lock().return_item(key);
    }
}

impl<T> SharedTaggedPool<T> {
    /// Calls `f` with a shared reference to the instance behind the key.
    ///
    /// The pool stays locked while `f` runs, so `f` must not call back into this pool.
    ///
    /// # Panics
    ///
    /// Panics if the key was not issued by this pool.
    pub fn with_item<R>(&self, key: Key, f: impl FnOnce(&T) -> R) -> R {
        f(self.inner.lock().item(key))
    }

    /// Calls `f` with an exclusive reference to the instance behind the key.
    ///
    /// The pool stays locked while `f` runs, so `f` must not call back into this pool.
    ///
    /// # Panics
    ///
    /// Panics if the key was not issued by this pool.
    pub fn with_item_mut<R>(&self, key: Key, f: impl FnOnce(&mut T) -> R) -> R {
        f(self.inner.lock().item_mut(key))
    }

    /// Whether the instance behind the key is currently handed out.
    ///
    /// # Panics
    ///
    /// Panics if the key was not issued by this pool.
    #[must_use]
    pub fn is_active(&self, key: Key) -> bool {
        self.inner.lock().is_active(key)
    }

    /// The total number of instances in the pool, active or not.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    /// Whether the pool contains no instances at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }

    /// The number of instances currently handed out.
    #[must_use]
    pub fn active_len(&self) -> usize {
        self.inner.lock().active_len()
    }

    /// The number of instances with the given tag, active or not.
    #[must_use]
    pub fn instance_count(&self, tag: &str) -> usize {
        self.inner.lock().instance_count(tag)
    }

    /// The number of instances with the given tag that are currently handed out.
    #[must_use]
    pub fn active_count(&self, tag: &str) -> usize {
        self.inner.lock().active_count(tag)
    }

    /// Keys of all instances currently handed out, in creation order.
    #[must_use]
    pub fn active_keys(&self) -> Vec<Key> {
        self.inner.lock().active_keys().collect()
    }
}

impl<T> fmt::Debug for SharedTaggedPool<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SharedTaggedPool")
            .field("inner", &*self.inner.lock())
            .finish()
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use std::collections::HashSet;
    use std::thread;

    use static_assertions::assert_impl_all;

    use super::*;
    use crate::{Error, ItemSpec};

    #[derive(Debug, Default)]
    struct Counter {
        uses: u32,
    }

    impl Poolable for Counter {
        fn instantiate(&self) -> Self {
            Self::default()
        }
    }

    assert_impl_all!(SharedTaggedPool<Counter>: Send, Sync, Clone, fmt::Debug);

    fn shared(amount: usize, expandable: bool) -> SharedTaggedPool<Counter> {
        TaggedPool::builder()
            .register(
                ItemSpec::new("fx", Counter::default())
                    .amount(amount)
                    .expandable(expandable),
            )
            .build_shared()
            .unwrap()
    }

    #[test]
    fn clones_share_one_pool() {
        let pool = shared(1, false);
        let clone = pool.clone();

        let key = pool.get("fx").unwrap();

        assert!(clone.get("fx").is_none());
        assert!(matches!(clone.try_get("fx"), Err(Error::Exhausted { .. })));

        clone.return_item(key);

        assert_eq!(pool.get("fx"), Some(key));
    }

    #[test]
    fn item_access_through_closures() {
        let pool = shared(1, false);

        let key = pool.get("fx").unwrap();
        pool.with_item_mut(key, |counter| counter.uses = 7);

        assert_eq!(pool.with_item(key, |counter| counter.uses), 7);
        assert!(pool.is_active(key));
    }

    #[test]
    fn concurrent_gets_never_share_an_instance() {
        const THREADS: usize = 4;
        const PER_THREAD: usize = 25;

        let pool = shared(10, true);

        let handles = (0..THREADS)
            .map(|_| {
                let pool = pool.clone();
                thread::spawn(move || {
                    (0..PER_THREAD)
                        .map(|_| pool.get("fx").unwrap())
                        .collect::<Vec<_>>()
                })
            })
            .collect::<Vec<_>>();

        let mut keys = HashSet::new();

        for handle in handles {
            for key in handle.join().unwrap() {
                assert!(keys.insert(key));
            }
        }

        assert_eq!(keys.len(), THREADS * PER_THREAD);
        assert_eq!(pool.active_len(), THREADS * PER_THREAD);
        assert_eq!(pool.active_count("fx"), pool.instance_count("fx"));
        assert_eq!(pool.active_keys().len(), THREADS * PER_THREAD);
    }

    #[test]
    fn concurrent_churn_respects_capacity() {
        let pool = shared(3, false);

        let handles = (0..6)
            .map(|_| {
                let pool = pool.clone();
                thread::spawn(move || {
                    for _ in 0..200 {
                        if let Some(key) = pool.get("fx") {
                            pool.with_item_mut(key, |counter| counter.uses += 1);
                            pool.return_item(key);
                        }
                    }
                })
            })
            .collect::<Vec<_>>();

        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(pool.len(), 3);
        assert_eq!(pool.active_len(), 0);
        assert!(!pool.is_empty());
    }
}
