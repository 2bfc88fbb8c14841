use std::borrow::Borrow;
use std::fmt;
use std::sync::Arc;

/// Identifies a kind of pooled item, such as `"dash_effect"`.
///
/// Every [`ItemSpec`][crate::ItemSpec] registered with a pool has a unique tag and every
/// instance created from that spec carries it. Tags are compared by their string content and are
/// cheap to clone.
///
/// # Example
///
/// ```rust
/// use tagged_pool::Tag;
///
/// let tag = Tag::from("dash_effect");
///
/// assert_eq!(tag.as_str(), "dash_effect");
/// assert_eq!(tag, Tag::from("dash_effect".to_string()));
/// ```
#[derive(Clone, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Tag(Arc<str>);

impl Tag {
    /// The tag as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Tag {
    fn from(value: &str) -> Self {
        Self(Arc::from(value))
    }
}

impl From<String> for Tag {
    fn from(value: String) -> Self {
        Self(Arc::from(value))
    }
}

impl From<&Tag> for Tag {
    fn from(value: &Tag) -> Self {
        value.clone()
    }
}

// Lets maps keyed by `Tag` be queried with a plain `&str`.
impl Borrow<str> for Tag {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for Tag {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&*self.0, f)
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use std::collections::HashSet;

    use static_assertions::assert_impl_all;

    use super::*;

    assert_impl_all!(Tag: Send, Sync, Clone, fmt::Debug);

    #[test]
    fn equal_by_content() {
        let a = Tag::from("fx");
        let b = Tag::from("fx".to_string());
        let c = Tag::from("other");

        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn lookup_by_str() {
        let mut set = HashSet::new();
        set.insert(Tag::from("fx"));

        assert!(set.contains("fx"));
        assert!(!set.contains("other"));
    }

    #[test]
    fn display_and_debug() {
        let tag = Tag::from("fx");

        assert_eq!(tag.to_string(), "fx");
        assert_eq!(format!("{tag:?}"), "\"fx\"");
    }
}
