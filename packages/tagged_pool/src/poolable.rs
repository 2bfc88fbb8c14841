/// What a [`TaggedPool`][crate::TaggedPool] needs from the objects it manages.
///
/// The pool does not know what its items are. The host provides a factory that creates a new
/// instance from a prototype and, optionally, a hook that mirrors the pool's active/inactive
/// bookkeeping into the item itself (e.g. to show or hide it).
///
/// # Example
///
/// ```rust
/// use tagged_pool::Poolable;
///
/// #[derive(Debug)]
/// struct AfterImage {
///     alpha: f32,
///     visible: bool,
/// }
///
/// impl Poolable for AfterImage {
///     fn instantiate(&self) -> Self {
///         Self {
///             alpha: self.alpha,
///             visible: false,
///         }
///     }
///
///     fn set_active(&mut self, active: bool) {
///         self.visible = active;
///
///         if active {
///             self.alpha = 1.0;
///         }
///     }
/// }
/// ```
pub trait Poolable: Sized {
    /// Creates a new instance, using `self` as the prototype.
    ///
    /// Called once for every instance the pool pre-creates and once for every instance created
    /// when an expandable tag runs out of inactive instances.
    fn instantiate(&self) -> Self;

    /// Called whenever the pool changes the active state of this instance.
    ///
    /// The pool calls this with `false` right after creating an instance, with `true` when it hands
    /// the instance out and with `false` again when the instance is returned. The pool's own flag
    /// remains the source of truth; this hook only lets the item react.
    ///
    /// The default implementation does nothing.
    #[cfg_attr(test, mutants::skip)] // Empty by definition.
    fn set_active(&mut self, active: bool) {
        _ = active;
    }
}
