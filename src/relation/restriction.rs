use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};

use crate::element::{MemberType, OsmEntryId, References, Relation, TagString, Tags};

/// The `restriction=*` value of a turn restriction.
///
/// *Learn more [at the osm wiki](https://wiki.openstreetmap.org/wiki/Relation:restriction).*
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, AsRefStr, Serialize, Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum RestrictionKind {
    NoLeftTurn,
    NoRightTurn,
    NoStraightOn,
    NoUTurn,
    NoEntry,
    NoExit,
    OnlyLeftTurn,
    OnlyRightTurn,
    OnlyStraightOn,
    OnlyUTurn,
}

/// A turn restriction relation.
///
/// Any of the member roles may be missing or point at an entity
/// which never became a road, such a restriction is kept as-is and
/// simply never matches a transition.
#[derive(Debug, Clone, PartialEq)]
pub struct Restriction {
    pub relation_id: i64,
    pub r#ref: Option<String>,
    pub from_way_id: Option<i64>,
    pub to_way_id: Option<i64>,
    pub via: Option<OsmEntryId>,
    pub kind: Option<RestrictionKind>,
    pub tags: Tags,
    pub members: References,
}

impl Restriction {
    const FROM: &'static str = "from";
    const TO: &'static str = "to";
    const VIA: &'static str = "via";

    /// Materialises a restriction from its relation, storing `tags`
    /// in place of the relation's own (already filtered) tags.
    pub fn from_relation(relation: Relation, tags: Tags) -> Self {
        let first_way = |role| {
            relation
                .members_with_role(role)
                .find(OsmEntryId::is_way)
                .map(|entry| entry.identifier)
        };

        let from_way_id = first_way(Restriction::FROM);
        let to_way_id = first_way(Restriction::TO);
        let via = relation
            .members_with_role(Restriction::VIA)
            .find(|entry| !matches!(entry.variant, MemberType::Relation));

        Restriction {
            relation_id: relation.id,
            r#ref: relation.tags.get(TagString::REF).map(str::to_owned),
            from_way_id,
            to_way_id,
            via,
            kind: relation.tags.r#as(TagString::RESTRICTION),
            tags,
            members: relation.refs,
        }
    }

    #[inline]
    pub fn connects(&self, from: i64, to: i64) -> bool {
        self.from_way_id == Some(from) && self.to_way_id == Some(to)
    }
}
