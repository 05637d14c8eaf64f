use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString};

/// Recognised `highway=*` roadway values.
///
/// *Learn more [at the osm wiki](https://wiki.openstreetmap.org/wiki/Key:highway).*
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
#[repr(u8)]
pub enum RoadClass {
    /// A restricted access major divided highway.
    Motorway,
    MotorwayLink,
    /// The most important roads in a country's system that aren't motorways.
    Trunk,
    TrunkLink,
    Primary,
    PrimaryLink,
    Secondary,
    SecondaryLink,
    Tertiary,
    TertiaryLink,
    /// The least important through roads. Does not mean the classification is unknown.
    Unclassified,
    Residential,

    // Special Road Types
    LivingStreet,
    Service,
    Busway,
    Track,
    /// A road of unknown type, used until the way has been surveyed.
    Road,

    // Pedestrian & Cycle Network
    Pedestrian,
    Footway,
    Path,
    Cycleway,
    Steps,
    Bridleway,
    /// Indoor walkways, such as those inside a station or mall.
    Corridor,
}
