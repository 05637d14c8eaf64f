//! Strips non-semantic keys (mapper metadata, bulk-import
//! artefacts) from tag maps before classification.

pub mod rule;

#[doc(hidden)]
mod test;

#[doc(inline)]
pub use rule::{FilterRule, InvalidRule, DEFAULT_RULES};

use rustc_hash::FxHashSet;

use crate::element::Tags;

/// The outcome of filtering a tag map.
#[derive(Clone, Debug, PartialEq)]
pub struct Filtered {
    pub tags: Tags,
    /// No tags survived the filter.
    pub empty: bool,
}

#[derive(Clone, Debug)]
pub struct TagFilter {
    exact: FxHashSet<String>,
    prefixes: Vec<String>,
}

impl Default for TagFilter {
    fn default() -> Self {
        TagFilter::new(DEFAULT_RULES.iter().filter_map(|rule| rule.parse().ok()))
    }
}

impl TagFilter {
    pub fn new(rules: impl IntoIterator<Item = FilterRule>) -> Self {
        let mut exact = FxHashSet::default();
        let mut prefixes = Vec::new();

        for rule in rules {
            match rule {
                FilterRule::Exact(key) => {
                    exact.insert(key);
                }
                FilterRule::Prefix(prefix) => prefixes.push(prefix),
            }
        }

        TagFilter { exact, prefixes }
    }

    /// Parses each textual rule, `"key"` or `"key:*"`.
    pub fn from_rules<S: AsRef<str>>(rules: &[S]) -> Result<Self, InvalidRule> {
        let rules = rules
            .iter()
            .map(|rule| rule.as_ref().parse::<FilterRule>())
            .collect::<Result<Vec<_>, _>>()?;

        Ok(TagFilter::new(rules))
    }

    #[inline]
    pub fn discards(&self, key: &str) -> bool {
        self.exact.contains(key)
            || self
                .prefixes
                .iter()
                .any(|prefix| key.starts_with(prefix.as_str()))
    }

    pub fn filter(&self, mut tags: Tags) -> Filtered {
        tags.retain(|key, _| !self.discards(key));

        Filtered {
            empty: tags.is_empty(),
            tags,
        }
    }
}
