use std::any::type_name;
use std::fmt;

use crate::{ItemSpec, PoolLayout, Poolable, Result, SharedTaggedPool, Tag, TaggedPool};

/// Builder for creating an instance of [`TaggedPool`].
///
/// The builder collects item specs from anywhere in the host (each gameplay component may
/// register the specs it needs) and then initializes the pool once with all of them.
///
/// # Examples
///
/// ```
/// use tagged_pool::{ItemSpec, TaggedPool};
/// # use tagged_pool::Poolable;
/// # #[derive(Clone, Debug)]
/// # struct Effect;
/// # impl Poolable for Effect {
/// #     fn instantiate(&self) -> Self { Effect }
/// # }
///
/// let pool = TaggedPool::builder()
///     .register(ItemSpec::new("dust", Effect).amount(4))
///     .register(ItemSpec::new("after_image", Effect).amount(8).expandable(true))
///     .build()
///     .unwrap();
///
/// assert_eq!(pool.len(), 12);
/// ```
#[must_use]
pub struct TaggedPoolBuilder<T> {
    specs: Vec<ItemSpec<T>>,
}

impl<T> fmt::Debug for TaggedPoolBuilder<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TaggedPoolBuilder")
            .field("item_type", &format_args!("{}", type_name::<T>()))
            .field(
                "tags",
                &self.specs.iter().map(ItemSpec::tag).collect::<Vec<_>>(),
            )
            .finish()
    }
}

impl<T> TaggedPoolBuilder<T> {
    pub(crate) fn new() -> Self {
        Self { specs: Vec::new() }
    }

    /// Adds an item spec to the pool being built.
    ///
    /// Tags must be unique. Duplicates are reported when the pool is built.
    pub fn register(mut self, spec: ItemSpec<T>) -> Self {
        self.specs.push(spec);
        self
    }

    /// Adds several item specs to the pool being built, in order.
    pub fn register_all(mut self, specs: impl IntoIterator<Item = ItemSpec<T>>) -> Self {
        self.specs.extend(specs);
        self
    }

    /// Adds one item spec for every entry of a [`PoolLayout`], taking the prototype of each from
    /// `prototype_for`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingPrototype`][crate::Error::MissingPrototype] if `prototype_for`
    /// returns `None` for any tag in the layout.
    ///
    /// # Examples
    ///
    /// ```
    /// use tagged_pool::{PoolLayout, TaggedPool};
    /// # use tagged_pool::Poolable;
    /// # #[derive(Clone, Debug)]
    /// # struct Effect;
    /// # impl Poolable for Effect {
    /// #     fn instantiate(&self) -> Self { Effect }
    /// # }
    ///
    /// let layout: PoolLayout = r#"
    ///     [[items]]
    ///     tag = "dust"
    ///     amount = 3
    /// "#
    /// .parse()
    /// .unwrap();
    ///
    /// let pool = TaggedPool::builder()
    ///     .layout(layout, |_tag| Some(Effect))
    ///     .unwrap()
    ///     .build()
    ///     .unwrap();
    ///
    /// assert_eq!(pool.instance_count("dust"), 3);
    /// ```
    pub fn layout(
        self,
        layout: PoolLayout,
        prototype_for: impl FnMut(&Tag) -> Option<T>,
    ) -> Result<Self> {
        Ok(self.register_all(layout.into_specs(prototype_for)?))
    }
}

impl<T: Poolable> TaggedPoolBuilder<T> {
    /// Builds and initializes the pool with all registered specs.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DuplicateTag`][crate::Error::DuplicateTag] if two registered specs
    /// share a tag.
    pub fn build(self) -> Result<TaggedPool<T>> {
        let mut pool = TaggedPool::new();
        pool.initialize(self.specs)?;
        Ok(pool)
    }

    /// Builds and initializes the pool, wrapping it for use from multiple threads.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DuplicateTag`][crate::Error::DuplicateTag] if two registered specs
    /// share a tag.
    pub fn build_shared(self) -> Result<SharedTaggedPool<T>> {
        self.build().map(SharedTaggedPool::from)
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use crate::Error;

    #[derive(Debug)]
    struct Marker(u8);

    impl Poolable for Marker {
        fn instantiate(&self) -> Self {
            Self(self.0)
        }
    }

    #[test]
    fn empty_builder_builds_initialized_pool() {
        let pool = TaggedPool::<Marker>::builder().build().unwrap();

        assert!(pool.is_initialized());
        assert!(pool.is_empty());
    }

    #[test]
    fn specs_from_several_registrations() {
        let mut pool = TaggedPool::builder()
            .register(ItemSpec::new("a", Marker(1)).amount(1))
            .register_all([
                ItemSpec::new("b", Marker(2)).amount(2),
                ItemSpec::new("c", Marker(3)).expandable(true),
            ])
            .build()
            .unwrap();

        assert_eq!(pool.len(), 3);
        assert_eq!(
            pool.tags().map(Tag::as_str).collect::<Vec<_>>(),
            vec!["a", "b", "c"]
        );

        let c = pool.get("c").unwrap();
        assert_eq!(pool.item(c).0, 3);
    }

    #[test]
    fn duplicate_tags_fail_build() {
        let result = TaggedPool::builder()
            .register(ItemSpec::new("a", Marker(1)))
            .register(ItemSpec::new("a", Marker(2)))
            .build();

        assert!(matches!(result, Err(Error::DuplicateTag { .. })));
    }

    #[test]
    fn layout_without_prototype_fails() {
        let layout: PoolLayout = "[[items]]\ntag = \"a\"\n".parse().unwrap();

        let result = TaggedPool::<Marker>::builder().layout(layout, |_| None);

        assert!(matches!(result, Err(Error::MissingPrototype { tag }) if tag.as_str() == "a"));
    }

    #[test]
    fn debug_lists_tags() {
        let builder = TaggedPool::builder().register(ItemSpec::new("a", Marker(1)));

        let output = format!("{builder:?}");

        assert!(output.contains("TaggedPoolBuilder"));
        assert!(output.contains("\"a\""));
    }
}
