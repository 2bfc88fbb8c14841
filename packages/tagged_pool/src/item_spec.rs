use crate::Tag;

/// Describes one kind of pooled item: which tag it is requested by, what prototype its instances
/// are created from, how many instances to create up front and whether the pool may create more
/// on demand.
///
/// Once registered with a pool, a spec can no longer be modified.
///
/// # Example
///
/// ```rust
/// use tagged_pool::ItemSpec;
///
/// let spec = ItemSpec::new("spark", 'x').amount(16).expandable(true);
///
/// assert_eq!(spec.tag().as_str(), "spark");
/// assert_eq!(spec.prototype(), &'x');
/// assert_eq!(spec.initial_amount(), 16);
/// assert!(spec.is_expandable());
/// ```
#[derive(Clone, Debug)]
#[must_use]
pub struct ItemSpec<T> {
    tag: Tag,
    prototype: T,
    amount: usize,
    expandable: bool,
}

impl<T> ItemSpec<T> {
    /// Creates a spec with no pre-created instances that does not expand.
    ///
    /// Use [`amount()`][Self::amount] and [`expandable()`][Self::expandable] to configure it.
    pub fn new(tag: impl Into<Tag>, prototype: T) -> Self {
        Self {
            tag: tag.into(),
            prototype,
            amount: 0,
            expandable: false,
        }
    }

    /// Sets how many instances the pool creates when it is initialized.
    pub fn amount(mut self, amount: usize) -> Self {
        self.amount = amount;
        self
    }

    /// Sets whether the pool may create additional instances once all existing instances of this
    /// tag are in use.
    pub fn expandable(mut self, expandable: bool) -> Self {
        self.expandable = expandable;
        self
    }

    /// The tag that instances of this spec are requested by.
    #[must_use]
    pub fn tag(&self) -> &Tag {
        &self.tag
    }

    /// The object that new instances are created from.
    #[must_use]
    pub fn prototype(&self) -> &T {
        &self.prototype
    }

    /// How many instances are created when the pool is initialized.
    #[must_use]
    pub fn initial_amount(&self) -> usize {
        self.amount
    }

    /// Whether the pool creates new instances on demand once the existing ones are all in use.
    #[must_use]
    pub fn is_expandable(&self) -> bool {
        self.expandable
    }
}
