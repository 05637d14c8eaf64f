//! Element variants

pub mod node;
pub mod relation;
pub mod way;

pub use node::*;
pub use relation::*;
pub use way::*;

pub mod common {
    use serde::{Deserialize, Serialize};
    use std::borrow::Borrow;
    use std::collections::BTreeMap;
    use std::fmt::{Display, Formatter};
    use std::ops::Deref;
    use std::str::FromStr;
    use strum::{AsRefStr, Display as StrumDisplay, EnumString};

    use crate::classify::RoadClass;

    #[derive(
        Clone,
        Copy,
        Debug,
        PartialEq,
        Eq,
        PartialOrd,
        Ord,
        Hash,
        StrumDisplay,
        EnumString,
        AsRefStr,
        Serialize,
        Deserialize,
    )]
    #[strum(serialize_all = "lowercase")]
    #[serde(rename_all = "lowercase")]
    pub enum MemberType {
        Node,
        Way,
        Relation,
    }

    /// Identity of an entity within the source stream.
    ///
    /// Nodes, ways and relations live in separate id spaces,
    /// so node `5` and way `5` are distinct entries.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
    pub struct OsmEntryId {
        #[serde(rename = "id")]
        pub identifier: i64,
        #[serde(rename = "type")]
        pub variant: MemberType,
    }

    impl OsmEntryId {
        pub const fn new(identifier: i64, variant: MemberType) -> OsmEntryId {
            OsmEntryId {
                identifier,
                variant,
            }
        }

        #[inline]
        pub const fn node(identifier: i64) -> OsmEntryId {
            OsmEntryId::new(identifier, MemberType::Node)
        }

        #[inline]
        pub const fn way(identifier: i64) -> OsmEntryId {
            OsmEntryId::new(identifier, MemberType::Way)
        }

        #[inline]
        pub const fn relation(identifier: i64) -> OsmEntryId {
            OsmEntryId::new(identifier, MemberType::Relation)
        }

        #[inline]
        pub const fn is_way(&self) -> bool {
            matches!(self.variant, MemberType::Way)
        }
    }

    impl Display for OsmEntryId {
        fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
            write!(f, "{}/{}", self.variant, self.identifier)
        }
    }

    #[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(transparent)]
    pub struct Role(pub TagString);

    impl Role {
        pub fn is(&self, role: &str) -> bool {
            self.0.as_str() == role
        }
    }

    #[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
    pub struct Reference {
        #[serde(flatten)]
        pub id: OsmEntryId,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub role: Option<Role>,
    }

    impl Reference {
        pub const fn new(id: OsmEntryId, role: Option<Role>) -> Self {
            Reference { id, role }
        }

        #[inline]
        pub const fn without_role(id: OsmEntryId) -> Self {
            Reference { id, role: None }
        }

        /// An empty role is treated as no role at all.
        #[inline]
        pub fn with_role(id: OsmEntryId, role: &str) -> Self {
            let role = (!role.is_empty()).then(|| Role(TagString::from(role)));
            Reference { id, role }
        }

        #[inline]
        pub fn has_role(&self, role: &str) -> bool {
            self.role.as_ref().is_some_and(|r| r.is(role))
        }
    }

    #[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(transparent)]
    pub struct References(Vec<Reference>);

    impl Deref for References {
        type Target = Vec<Reference>;

        fn deref(&self) -> &Self::Target {
            &self.0
        }
    }

    impl From<Vec<Reference>> for References {
        fn from(v: Vec<Reference>) -> Self {
            References(v)
        }
    }

    impl FromIterator<Reference> for References {
        fn from_iter<I: IntoIterator<Item = Reference>>(iter: I) -> Self {
            References(iter.into_iter().collect())
        }
    }

    #[derive(Clone, Debug, PartialEq, PartialOrd, Eq, Ord, Hash, Serialize, Deserialize)]
    #[serde(transparent)]
    pub struct TagString(String);

    impl Deref for TagString {
        type Target = String;

        fn deref(&self) -> &Self::Target {
            &self.0
        }
    }

    impl Borrow<str> for TagString {
        fn borrow(&self) -> &str {
            self.0.as_str()
        }
    }

    impl From<String> for TagString {
        fn from(s: String) -> Self {
            TagString(s)
        }
    }

    impl From<&str> for TagString {
        fn from(s: &str) -> Self {
            TagString(s.to_string())
        }
    }

    impl Display for TagString {
        fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
            f.write_str(&self.0)
        }
    }

    impl TagString {
        pub(crate) const HIGHWAY: &'static str = "highway";
        pub(crate) const NAME: &'static str = "name";
        pub(crate) const TYPE: &'static str = "type";
        pub(crate) const REF: &'static str = "ref";
        pub(crate) const RESTRICTION: &'static str = "restriction";
        pub(crate) const ADDR_STREET: &'static str = "addr:street";
        pub(crate) const ADDR_HOUSENUMBER: &'static str = "addr:housenumber";

        pub fn parse<F: FromStr>(&self) -> Option<F> {
            FromStr::from_str(self.as_str()).ok()
        }
    }

    /// Free-form key/value attributes of an entity.
    ///
    /// Keys are unique within one map, and iterate in key order
    /// so that persisted rows are reproducible between runs.
    #[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(transparent)]
    pub struct Tags(BTreeMap<TagString, TagString>);

    impl Tags {
        pub fn new(map: BTreeMap<TagString, TagString>) -> Self {
            Tags(map)
        }

        #[inline]
        pub fn get(&self, assoc: &str) -> Option<&str> {
            self.0.get(assoc).map(|v| v.as_str())
        }

        pub fn r#as<F: FromStr>(&self, assoc: &str) -> Option<F> {
            self.0.get(assoc).and_then(TagString::parse::<F>)
        }

        /// Whether `key` holds `value`, honouring `;` separated multi-values.
        pub fn is(&self, key: &str, value: &str) -> bool {
            self.tag_in(key, &[value])
        }

        pub fn tag_in(&self, key: &str, options: &[&str]) -> bool {
            self.get(key)
                .into_iter()
                .flat_map(|v| v.split(';'))
                .any(|actual| options.contains(&actual.trim()))
        }

        pub fn insert(&mut self, key: impl Into<TagString>, value: impl Into<TagString>) {
            self.0.insert(key.into(), value.into());
        }

        pub fn remove(&mut self, key: &str) -> Option<TagString> {
            self.0.remove(key)
        }

        /// Adds the tags of `other`. A key held by both with different
        /// values keeps both, `;` separated.
        pub fn merge(&mut self, other: &Tags) {
            for (key, value) in other.iter() {
                match self.get(key) {
                    None => self.insert(key.clone(), value.clone()),
                    Some(_) if self.is(key, value) => {}
                    Some(existing) => {
                        let joined = format!("{existing};{value}");
                        self.insert(key.clone(), joined);
                    }
                }
            }
        }

        pub fn retain(&mut self, mut keep: impl FnMut(&str, &str) -> bool) {
            self.0.retain(|k, v| keep(k.as_str(), v.as_str()))
        }

        #[inline]
        pub fn road_tag(&self) -> Option<RoadClass> {
            self.r#as::<RoadClass>(TagString::HIGHWAY)
        }

        #[inline]
        pub fn name(&self) -> Option<&str> {
            self.get(TagString::NAME)
        }
    }

    impl Deref for Tags {
        type Target = BTreeMap<TagString, TagString>;

        fn deref(&self) -> &Self::Target {
            &self.0
        }
    }

    impl<K, V> FromIterator<(K, V)> for Tags
    where
        K: Into<TagString>,
        V: Into<TagString>,
    {
        fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
            Tags(
                iter.into_iter()
                    .map(|(k, v)| (k.into(), v.into()))
                    .collect(),
            )
        }
    }
}

pub use common::*;
