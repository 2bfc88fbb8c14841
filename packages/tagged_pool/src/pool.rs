use std::any::type_name;
use std::fmt;

use foldhash::{HashMap, HashMapExt};
use tracing::{debug, trace, warn};

use crate::key::PoolId;
use crate::{Error, ItemSpec, Key, Poolable, Result, Tag, TaggedPoolBuilder};

/// An object pool that hands out reusable instances by tag.
///
/// The pool is initialized once from a set of [`ItemSpec`]s. For each spec it creates the
/// configured number of instances up front, all of them inactive. Callers then request instances
/// by tag:
///
/// * [`get()`][1] activates and returns the first inactive instance with the tag, in the order
///   the instances were created. If there is none and the tag is expandable, the pool creates one
///   more instance. Otherwise the result is `None`.
/// * [`return_item()`][2] deactivates an instance so it can be handed out again.
///
/// Instances are never destroyed while the pool exists. They only move between the active and
/// inactive states. The pool informs each instance of these transitions via
/// [`Poolable::set_active()`].
///
/// # Thread safety
///
/// This type is thread-mobile ([`Send`] if the items are) but requires exclusive access to hand
/// out or take back instances. To share one pool between threads, use
/// [`SharedTaggedPool`][crate::SharedTaggedPool].
///
/// # Example
///
/// ```rust
/// use tagged_pool::{ItemSpec, Poolable, TaggedPool};
///
/// #[derive(Debug, Default)]
/// struct Spark {
///     visible: bool,
/// }
///
/// impl Poolable for Spark {
///     fn instantiate(&self) -> Self {
///         Self::default()
///     }
///
///     fn set_active(&mut self, active: bool) {
///         self.visible = active;
///     }
/// }
///
/// let mut pool = TaggedPool::builder()
///     .register(ItemSpec::new("spark", Spark::default()).amount(2))
///     .build()
///     .unwrap();
///
/// let first = pool.get("spark").unwrap();
/// let second = pool.get("spark").unwrap();
/// assert!(pool.item(first).visible);
///
/// // Both instances are in use and the tag is not expandable.
/// assert!(pool.get("spark").is_none());
///
/// pool.return_item(first);
/// assert!(!pool.item(first).visible);
///
/// // The returned instance is handed out again.
/// assert_eq!(pool.get("spark"), Some(first));
/// # pool.return_item(second);
/// ```
///
/// [1]: Self::get
/// [2]: Self::return_item
pub struct TaggedPool<T> {
    id: PoolId,

    /// Registered specs, in registration order. Each remembers which instances it created.
    specs: Vec<RegisteredSpec<T>>,

    /// Maps a tag to its index in `specs`, so requests never scan the specs.
    /// We use foldhash for better performance with small hash tables.
    spec_index_by_tag: HashMap<Tag, usize>,

    /// Every instance ever created, in creation order. Keys index into this.
    instances: Vec<Instance<T>>,

    initialized: bool,
}

struct RegisteredSpec<T> {
    spec: ItemSpec<T>,

    /// Indexes into `TaggedPool::instances`, in creation order.
    instance_indexes: Vec<usize>,
}

struct Instance<T> {
    value: T,

    /// Index into `TaggedPool::specs` of the spec this instance was created from.
    spec_index: usize,

    active: bool,
}

/// Outcome of looking for an instance to hand out.
enum Acquisition {
    Acquired(Key),
    UnknownTag,
    Exhausted,
}

impl<T> TaggedPool<T> {
    /// Creates an empty pool that has not been initialized yet.
    ///
    /// Until [`initialize()`][Self::initialize] is called, the pool knows no tags and every
    /// request comes back empty. Most callers will want [`builder()`][Self::builder] instead,
    /// which registers specs and initializes the pool in one go.
    ///
    /// # Example
    ///
    /// ```rust
    /// use tagged_pool::TaggedPool;
    ///
    /// let pool = TaggedPool::<char>::new();
    ///
    /// assert!(!pool.is_initialized());
    /// assert!(pool.is_empty());
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Self {
            id: PoolId::next(),
            specs: Vec::new(),
            spec_index_by_tag: HashMap::new(),
            instances: Vec::new(),
            initialized: false,
        }
    }

    /// Starts building a new [`TaggedPool`] from a set of item specs.
    ///
    /// # Example
    ///
    /// ```rust
    /// use tagged_pool::{ItemSpec, TaggedPool};
    /// # use tagged_pool::Poolable;
    /// # #[derive(Clone, Debug)]
    /// # struct Bullet;
    /// # impl Poolable for Bullet {
    /// #     fn instantiate(&self) -> Self { Bullet }
    /// # }
    ///
    /// let pool = TaggedPool::builder()
    ///     .register(ItemSpec::new("bullet", Bullet).amount(32).expandable(true))
    ///     .build()
    ///     .unwrap();
    ///
    /// assert_eq!(pool.len(), 32);
    /// ```
    pub fn builder() -> TaggedPoolBuilder<T> {
        TaggedPoolBuilder::new()
    }

    /// Whether [`initialize()`][Self::initialize] has completed successfully.
    #[must_use]
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// The total number of instances in the pool, active or not.
    #[must_use]
    pub fn len(&self) -> usize {
        self.instances.len()
    }

    /// Whether the pool contains no instances at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }

    /// The number of instances currently handed out.
    #[must_use]
    pub fn active_len(&self) -> usize {
        self.instances
            .iter()
            .filter(|instance| instance.active)
            .count()
    }

    /// The number of instances with the given tag, active or not.
    ///
    /// Returns zero for a tag that is not registered.
    #[must_use]
    pub fn instance_count(&self, tag: &str) -> usize {
        self.registered_spec(tag)
            .map_or(0, |registered| registered.instance_indexes.len())
    }

    /// The number of instances with the given tag that are currently handed out.
    ///
    /// Returns zero for a tag that is not registered.
    #[must_use]
    pub fn active_count(&self, tag: &str) -> usize {
        self.registered_spec(tag).map_or(0, |registered| {
            registered
                .instance_indexes
                .iter()
                .filter(|&&index| self.instance_at(index).active)
                .count()
        })
    }

    /// The spec registered with the given tag, if any.
    #[must_use]
    pub fn spec(&self, tag: &str) -> Option<&ItemSpec<T>> {
        self.registered_spec(tag).map(|registered| &registered.spec)
    }

    /// The registered tags, in registration order.
    pub fn tags(&self) -> impl Iterator<Item = &Tag> {
        self.specs.iter().map(|registered| registered.spec.tag())
    }

    /// Keys of all instances currently handed out, in creation order.
    ///
    /// This is useful for hosts that update every live instance once per tick.
    pub fn active_keys(&self) -> impl Iterator<Item = Key> + '_ {
        self.instances
            .iter()
            .enumerate()
            .filter(|(_, instance)| instance.active)
            .map(|(index, _)| self.key_at(index))
    }

    /// Whether the instance behind the key is currently handed out.
    ///
    /// # Panics
    ///
    /// Panics if the key was not issued by this pool.
    #[must_use]
    pub fn is_active(&self, key: Key) -> bool {
        self.instance_for_key(key).active
    }

    /// The tag of the instance behind the key.
    ///
    /// # Panics
    ///
    /// Panics if the key was not issued by this pool.
    #[must_use]
    pub fn tag_of(&self, key: Key) -> &Tag {
        let spec_index = self.instance_for_key(key).spec_index;
        self.spec_at(spec_index).spec.tag()
    }

    /// Borrows the instance behind the key.
    ///
    /// # Panics
    ///
    /// Panics if the key was not issued by this pool.
    #[must_use]
    pub fn item(&self, key: Key) -> &T {
        &self.instance_for_key(key).value
    }

    /// Exclusively borrows the instance behind the key.
    ///
    /// # Panics
    ///
    /// Panics if the key was not issued by this pool.
    #[must_use]
    pub fn item_mut(&mut self, key: Key) -> &mut T {
        &mut self.instance_for_key_mut(key).value
    }

    fn registered_spec(&self, tag: &str) -> Option<&RegisteredSpec<T>> {
        let spec_index = *self.spec_index_by_tag.get(tag)?;
        Some(self.spec_at(spec_index))
    }

    fn key_at(&self, index_in_pool: usize) -> Key {
        Key {
            pool_id: self.id,
            index_in_pool,
        }
    }

    fn owns(&self, key: Key) -> bool {
        key.pool_id == self.id && key.index_in_pool < self.instances.len()
    }

    fn instance_for_key(&self, key: Key) -> &Instance<T> {
        assert!(self.owns(key), "key was not issued by this pool");
        self.instance_at(key.index_in_pool)
    }

    fn instance_for_key_mut(&mut self, key: Key) -> &mut Instance<T> {
        assert!(self.owns(key), "key was not issued by this pool");
        self.instance_at_mut(key.index_in_pool)
    }

    // Instance and spec indexes are only ever produced by the pool itself, so they are always
    // in bounds. The lookups below panic only if that internal bookkeeping is broken.

    fn instance_at(&self, index: usize) -> &Instance<T> {
        self.instances
            .get(index)
            .expect("instance indexes are produced by the pool and are always in bounds")
    }

    fn instance_at_mut(&mut self, index: usize) -> &mut Instance<T> {
        self.instances
            .get_mut(index)
            .expect("instance indexes are produced by the pool and are always in bounds")
    }

    fn spec_at(&self, index: usize) -> &RegisteredSpec<T> {
        self.specs
            .get(index)
            .expect("spec indexes are produced by the pool and are always in bounds")
    }
}

impl<T: Poolable> TaggedPool<T> {
    /// Registers the item specs and creates the initial instances of each.
    ///
    /// For every spec, [`ItemSpec::initial_amount()`] instances are created from the prototype
    /// and immediately deactivated. A pool is initialized exactly once.
    ///
    /// # Errors
    ///
    /// Returns [`Error::AlreadyInitialized`] if the pool has already been initialized and
    /// [`Error::DuplicateTag`] if two specs share a tag. In both cases the pool is left exactly as
    /// it was.
    ///
    /// # Example
    ///
    /// ```rust
    /// use tagged_pool::{Error, ItemSpec, TaggedPool};
    /// # use tagged_pool::Poolable;
    /// # #[derive(Clone, Debug)]
    /// # struct Decal;
    /// # impl Poolable for Decal {
    /// #     fn instantiate(&self) -> Self { Decal }
    /// # }
    ///
    /// let mut pool = TaggedPool::new();
    /// pool.initialize([ItemSpec::new("decal", Decal).amount(4)]).unwrap();
    ///
    /// assert_eq!(pool.instance_count("decal"), 4);
    ///
    /// let again = pool.initialize([ItemSpec::new("decal", Decal).amount(4)]);
    /// assert!(matches!(again, Err(Error::AlreadyInitialized)));
    /// ```
    pub fn initialize(&mut self, specs: impl IntoIterator<Item = ItemSpec<T>>) -> Result<()> {
        if self.initialized {
            warn!("refusing to initialize a pool that has already been initialized");
            return Err(Error::AlreadyInitialized);
        }

        let specs = specs.into_iter().collect::<Vec<_>>();

        let mut spec_index_by_tag = HashMap::with_capacity(specs.len());

        for (spec_index, spec) in specs.iter().enumerate() {
            if spec_index_by_tag
                .insert(spec.tag().clone(), spec_index)
                .is_some()
            {
                return Err(Error::DuplicateTag {
                    tag: spec.tag().clone(),
                });
            }
        }

        self.spec_index_by_tag = spec_index_by_tag;
        self.specs = specs
            .into_iter()
            .map(|spec| RegisteredSpec {
                instance_indexes: Vec::with_capacity(spec.initial_amount()),
                spec,
            })
            .collect();

        for spec_index in 0..self.specs.len() {
            let spec = &self.spec_at(spec_index).spec;
            let amount = spec.initial_amount();

            debug!(
                tag = %spec.tag(),
                amount,
                expandable = spec.is_expandable(),
                "registering pooled item"
            );

            for _ in 0..amount {
                self.create_instance(spec_index);
            }
        }

        self.initialized = true;

        Ok(())
    }

    /// Hands out an inactive instance with the given tag, marking it active.
    ///
    /// Instances are considered in the order they were created, so the result is deterministic.
    /// If every instance with the tag is in use and the tag is expandable, one new instance is
    /// created and handed out.
    ///
    /// Returns `None` if the tag is not registered or if all its instances are in use and it is
    /// not expandable. Callers are expected to handle this as a normal outcome, for example by
    /// skipping a visual effect. Use [`try_get()`][Self::try_get] to tell the two cases apart.
    ///
    /// # Example
    ///
    /// ```rust
    /// use tagged_pool::{ItemSpec, TaggedPool};
    /// # use tagged_pool::Poolable;
    /// # #[derive(Clone, Debug)]
    /// # struct Ghost;
    /// # impl Poolable for Ghost {
    /// #     fn instantiate(&self) -> Self { Ghost }
    /// # }
    ///
    /// let mut pool = TaggedPool::builder()
    ///     .register(ItemSpec::new("ghost", Ghost).amount(1).expandable(true))
    ///     .build()
    ///     .unwrap();
    ///
    /// let first = pool.get("ghost").unwrap();
    ///
    /// // The tag is expandable, so the pool grows instead of running dry.
    /// let second = pool.get("ghost").unwrap();
    /// assert_ne!(first, second);
    /// assert_eq!(pool.len(), 2);
    ///
    /// assert!(pool.get("unknown").is_none());
    /// ```
    #[must_use]
    pub fn get(&mut self, tag: &str) -> Option<Key> {
        match self.acquire(tag) {
            Acquisition::Acquired(key) => Some(key),
            Acquisition::UnknownTag | Acquisition::Exhausted => None,
        }
    }

    /// Hands out an inactive instance with the given tag, reporting why if there is none.
    ///
    /// Behaves like [`get()`][Self::get] but distinguishes an unregistered tag from a registered
    /// tag whose instances are all in use.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownTag`] if no spec is registered with the tag and
    /// [`Error::Exhausted`] if all its instances are in use and it is not expandable.
    pub fn try_get(&mut self, tag: &str) -> Result<Key> {
        match self.acquire(tag) {
            Acquisition::Acquired(key) => Ok(key),
            Acquisition::UnknownTag => Err(Error::UnknownTag {
                tag: Tag::from(tag),
            }),
            Acquisition::Exhausted => Err(Error::Exhausted {
                tag: Tag::from(tag),
            }),
        }
    }

    /// Takes back an instance, marking it inactive so it can be handed out again.
    ///
    /// Returning an instance that is already inactive does nothing. Returning a key that was not
    /// issued by this pool also does nothing, apart from logging a warning.
    ///
    /// The caller must not keep using the key afterwards, as the instance may be handed out to
    /// somebody else.
    pub fn return_item(&mut self, key: Key) {
        if !self.owns(key) {
            warn!(?key, "ignoring return of an item that does not belong to this pool");
            return;
        }

        let instance = self.instance_at_mut(key.index_in_pool);

        if !instance.active {
            debug!(?key, "ignoring return of an item that is already inactive");
            return;
        }

        instance.active = false;
        instance.value.set_active(false);

        trace!(?key, "item returned to pool");
    }

    fn acquire(&mut self, tag: &str) -> Acquisition {
        let Some(&spec_index) = self.spec_index_by_tag.get(tag) else {
            trace!(tag, "requested tag is not registered");
            return Acquisition::UnknownTag;
        };

        let registered = self.spec_at(spec_index);
        let expandable = registered.spec.is_expandable();

        let vacant = registered
            .instance_indexes
            .iter()
            .copied()
            .find(|&index| !self.instance_at(index).active);

        let index = match vacant {
            Some(index) => index,
            None if expandable => {
                let index = self.create_instance(spec_index);
                debug!(tag, len = self.instance_count(tag), "expanded pooled item");
                index
            }
            None => {
                trace!(tag, "all instances are in use");
                return Acquisition::Exhausted;
            }
        };

        // Expanded instances go through the same activation as pre-created ones.
        let instance = self.instance_at_mut(index);
        instance.active = true;
        instance.value.set_active(true);

        let key = self.key_at(index);
        trace!(tag, ?key, "item handed out");

        Acquisition::Acquired(key)
    }

    /// Creates one inactive instance from the spec's prototype and returns its index.
    fn create_instance(&mut self, spec_index: usize) -> usize {
        let index = self.instances.len();

        let registered = self
            .specs
            .get_mut(spec_index)
            .expect("spec indexes are produced by the pool and are always in bounds");

        let mut value = registered.spec.prototype().instantiate();
        value.set_active(false);

        self.instances.push(Instance {
            value,
            spec_index,
            active: false,
        });
        registered.instance_indexes.push(index);

        index
    }
}

impl<T> Default for TaggedPool<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for TaggedPool<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TaggedPool")
            .field("item_type", &format_args!("{}", type_name::<T>()))
            .field("tags", &self.tags().collect::<Vec<_>>())
            .field("len", &self.len())
            .field("active_len", &self.active_len())
            .field("initialized", &self.initialized)
            .finish_non_exhaustive()
    }
}
