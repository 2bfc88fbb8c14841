use thiserror::Error;

use crate::Tag;

/// Errors that can occur when setting up or querying a tagged pool.
///
/// Running out of instances is not an error for [`TaggedPool::get()`][crate::TaggedPool::get],
/// which simply returns `None`. Only the stricter
/// [`TaggedPool::try_get()`][crate::TaggedPool::try_get] reports the reason.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// The pool was already initialized. A pool is initialized exactly once.
    #[error("the pool has already been initialized")]
    AlreadyInitialized,

    /// More than one item spec was registered with the same tag.
    #[error("more than one item spec is registered with the tag '{tag}'")]
    DuplicateTag {
        /// The tag that was registered more than once.
        tag: Tag,
    },

    /// No item spec is registered with the requested tag.
    #[error("no item spec is registered with the tag '{tag}'")]
    UnknownTag {
        /// The tag that was requested.
        tag: Tag,
    },

    /// Every instance with the requested tag is in use and the tag is not expandable.
    #[error("all instances tagged '{tag}' are in use and the tag is not expandable")]
    Exhausted {
        /// The tag that was requested.
        tag: Tag,
    },

    /// A pool layout could not be parsed.
    #[error("invalid pool layout: {0}")]
    InvalidLayout(#[from] toml::de::Error),

    /// A pool layout names a tag for which the host supplied no prototype.
    #[error("no prototype was supplied for the tag '{tag}' named in the pool layout")]
    MissingPrototype {
        /// The tag that has no prototype.
        tag: Tag,
    },
}

/// A specialized `Result` type for tagged pool operations, returning the crate's
/// [`Error`] type as the error value.
pub(crate) type Result<T> = std::result::Result<T, Error>;
