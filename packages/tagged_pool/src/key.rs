use std::sync::atomic::{self, AtomicU64};

/// Identifies one instance owned by a [`TaggedPool`][crate::TaggedPool].
///
/// Keys are returned by [`TaggedPool::get()`][crate::TaggedPool::get] and handed back via
/// [`TaggedPool::return_item()`][crate::TaggedPool::return_item]. They can be copied freely.
///
/// Each key remembers which pool created it, so a pool recognizes keys that belong to a different
/// pool and ignores them on return.
///
/// # Key reuse
///
/// The instance behind a key is reused after it is returned. A caller that keeps a key after
/// returning it may observe the instance while somebody else holds it. The pool does not guard
/// against this.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Key {
    pub(crate) pool_id: PoolId,
    pub(crate) index_in_pool: usize,
}

/// Distinguishes pools from each other so keys cannot be confused between them.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub(crate) struct PoolId(u64);

static NEXT_POOL_ID: AtomicU64 = AtomicU64::new(0);

impl PoolId {
    pub(crate) fn next() -> Self {
        // Relaxed is enough, we only need uniqueness, not ordering with other memory.
        Self(NEXT_POOL_ID.fetch_add(1, atomic::Ordering::Relaxed))
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use static_assertions::assert_impl_all;

    use super::*;

    assert_impl_all!(Key: Send, Sync, Copy);

    #[test]
    fn pool_ids_are_unique() {
        let a = PoolId::next();
        let b = PoolId::next();

        assert_ne!(a, b);
    }
}
