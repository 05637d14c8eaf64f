use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Keys which carry no routing or search semantics.
///
/// Source: the osm2pgsql generic style `delete_keys` list.
pub const DEFAULT_RULES: [&str; 34] = [
    // Mapper metadata
    "note",
    "note:*",
    "source",
    "source:*",
    "source_ref",
    "attribution",
    "comment",
    "fixme",
    "FIXME",
    "created_by",
    "odbl",
    "odbl:*",
    // Bulk-import artefacts
    "tiger:*",
    "NHD:*",
    "nhd:*",
    "gnis:*",
    "geobase:*",
    "KSJ2:*",
    "yh:*",
    "osak:*",
    "kms:*",
    "ngbe:*",
    "naptan:*",
    "CLC:*",
    "it:fvg:*",
    "import",
    "import_uuid",
    "SK53_bulk:load",
    "accuracy:meters",
    "sub_sea:type",
    "waterway:type",
    "3dshapes:ggmodelk",
    "lat",
    "lon",
];

/// A key to discard, either matched exactly or by its `prefix:` namespace.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FilterRule {
    Exact(String),
    /// Holds the prefix including its trailing `:`.
    Prefix(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidRule(pub String);

impl Display for InvalidRule {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "invalid tag filter rule {:?}", self.0)
    }
}

impl FromStr for FilterRule {
    type Err = InvalidRule;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let rule = s.trim();

        match rule.strip_suffix('*') {
            Some(prefix) if prefix.ends_with(':') && prefix.len() > 1 => {
                Ok(FilterRule::Prefix(prefix.to_string()))
            }
            Some(_) => Err(InvalidRule(s.to_string())),
            None if rule.is_empty() || rule.contains('*') => Err(InvalidRule(s.to_string())),
            None => Ok(FilterRule::Exact(rule.to_string())),
        }
    }
}
