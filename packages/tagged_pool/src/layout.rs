use std::str::FromStr;

use serde::Deserialize;

use crate::{Error, ItemSpec, Result, Tag};

/// Describes the contents of a pool as data, typically loaded from a TOML file at startup.
///
/// A layout lists the tags, initial amounts and expansion flags. The prototypes themselves are
/// supplied by the host when the layout is turned into [`ItemSpec`]s, because only the host knows
/// how to construct them.
///
/// ```toml
/// [[items]]
/// tag = "after_image"
/// amount = 8
/// expandable = true
///
/// [[items]]
/// tag = "dust"
/// amount = 4
/// ```
///
/// `amount` defaults to zero and `expandable` to false. Unknown keys are rejected.
///
/// # Example
///
/// ```rust
/// use tagged_pool::PoolLayout;
///
/// let layout = PoolLayout::from_toml_str(
///     r#"
///     [[items]]
///     tag = "after_image"
///     amount = 8
///     expandable = true
///     "#,
/// )
/// .unwrap();
///
/// let item = &layout.items()[0];
/// assert_eq!(item.tag(), "after_image");
/// assert_eq!(item.amount(), 8);
/// assert!(item.is_expandable());
/// ```
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct PoolLayout {
    #[serde(default)]
    items: Vec<LayoutItem>,
}

/// One entry of a [`PoolLayout`].
#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct LayoutItem {
    tag: String,

    #[serde(default)]
    amount: usize,

    #[serde(default)]
    expandable: bool,
}

impl PoolLayout {
    /// Parses a layout from TOML.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidLayout`] if the text is not valid TOML or does not have the
    /// expected shape.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// The entries of the layout, in the order they were listed.
    #[must_use]
    pub fn items(&self) -> &[LayoutItem] {
        &self.items
    }

    /// Turns the layout into item specs, asking `prototype_for` for the prototype of each tag.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingPrototype`] for the first tag for which `prototype_for` returns
    /// `None`.
    pub fn into_specs<T>(
        self,
        mut prototype_for: impl FnMut(&Tag) -> Option<T>,
    ) -> Result<Vec<ItemSpec<T>>> {
        self.items
            .into_iter()
            .map(|item| {
                let tag = Tag::from(item.tag);

                let Some(prototype) = prototype_for(&tag) else {
                    return Err(Error::MissingPrototype { tag });
                };

                Ok(ItemSpec::new(tag, prototype)
                    .amount(item.amount)
                    .expandable(item.expandable))
            })
            .collect()
    }
}

impl FromStr for PoolLayout {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_toml_str(s)
    }
}

impl LayoutItem {
    /// The tag this entry configures.
    #[must_use]
    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// How many instances to create up front.
    #[must_use]
    pub fn amount(&self) -> usize {
        self.amount
    }

    /// Whether the pool may create more instances on demand.
    #[must_use]
    pub fn is_expandable(&self) -> bool {
        self.expandable
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    #![allow(
        clippy::indexing_slicing,
        reason = "we do not need to worry about these things when writing test code"
    )]

    use super::*;

    const LAYOUT: &str = r#"
        [[items]]
        tag = "after_image"
        amount = 8
        expandable = true

        [[items]]
        tag = "dust"
        amount = 4
    "#;

    #[test]
    fn parses_items_with_defaults() {
        let layout = PoolLayout::from_toml_str(LAYOUT).unwrap();

        assert_eq!(layout.items().len(), 2);

        let dust = &layout.items()[1];
        assert_eq!(dust.tag(), "dust");
        assert_eq!(dust.amount(), 4);
        assert!(!dust.is_expandable());
    }

    #[test]
    fn missing_amount_is_zero() {
        let layout: PoolLayout = "[[items]]\ntag = \"x\"\n".parse().unwrap();

        assert_eq!(layout.items()[0].amount(), 0);
    }

    #[test]
    fn empty_text_is_empty_layout() {
        let layout = PoolLayout::from_toml_str("").unwrap();

        assert_eq!(layout, PoolLayout::default());
    }

    #[test]
    fn rejects_unknown_fields() {
        let result = PoolLayout::from_toml_str("[[items]]\ntag = \"x\"\ncolor = \"red\"\n");

        assert!(matches!(result, Err(Error::InvalidLayout(_))));
    }

    #[test]
    fn rejects_negative_amount() {
        let result = PoolLayout::from_toml_str("[[items]]\ntag = \"x\"\namount = -1\n");

        assert!(matches!(result, Err(Error::InvalidLayout(_))));
    }

    #[test]
    fn into_specs_pairs_prototypes() {
        let layout = PoolLayout::from_toml_str(LAYOUT).unwrap();

        let specs = layout
            .into_specs(|tag| Some(tag.as_str().len()))
            .unwrap();

        assert_eq!(specs.len(), 2);
        assert_eq!(specs[0].tag().as_str(), "after_image");
        assert_eq!(*specs[0].prototype(), "after_image".len());
        assert_eq!(specs[0].initial_amount(), 8);
        assert!(specs[0].is_expandable());
        assert!(!specs[1].is_expandable());
    }

    #[test]
    fn into_specs_reports_missing_prototype() {
        let layout = PoolLayout::from_toml_str(LAYOUT).unwrap();

        let result = layout.into_specs(|tag| (tag.as_str() == "after_image").then_some(1_u8));

        assert!(matches!(result, Err(Error::MissingPrototype { tag }) if tag.as_str() == "dust"));
    }
}
