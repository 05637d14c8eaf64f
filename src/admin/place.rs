use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString};

/// Administrative levels a POI is enriched with, from the
/// largest to the smallest.
///
/// *Learn more [at whosonfirst](https://whosonfirst.org/docs/placetypes/).*
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Display,
    EnumString,
    EnumIter,
    AsRefStr,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum PlaceType {
    Country,
    Region,
    County,
    Locality,
    Neighbourhood,
    Borough,
    Campus,
    Dependency,
    Localadmin,
    Macrohood,
    Marketarea,
    Microhood,
}

impl PlaceType {
    /// The POI tag holding the names of this level, `admin:<place_type>`.
    pub fn key(&self) -> String {
        format!("admin:{}", self.as_ref())
    }
}
