//! The ordered rule table deciding what an entity becomes.

use rustc_hash::FxHashSet;

use crate::classify::RoadClass;
use crate::element::{TagString, Tags};

/// What a classified entity is stored as.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Road,
    Poi,
}

/// The geometric shape of a source entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    Point,
    /// A way which does not end where it starts.
    Line,
    /// A closed way.
    Area,
}

#[derive(Debug, Clone, Copy)]
pub enum Predicate {
    /// `highway=*` holds one of the accepted road classes.
    Roadway,
    AllOf(&'static [&'static str]),
    AnyOf(&'static [&'static str]),
}

impl Predicate {
    pub fn matches(&self, tags: &Tags, roadways: &FxHashSet<RoadClass>) -> bool {
        match self {
            Predicate::Roadway => tags.road_tag().is_some_and(|class| roadways.contains(&class)),
            Predicate::AllOf(keys) => keys.iter().all(|key| tags.contains_key(*key)),
            Predicate::AnyOf(keys) => keys.iter().any(|key| tags.contains_key(*key)),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Rule {
    pub name: &'static str,
    pub category: Category,
    pub shapes: &'static [Shape],
    pub predicate: Predicate,
}

impl Rule {
    #[inline]
    pub fn accepts(&self, shape: Shape, tags: &Tags, roadways: &FxHashSet<RoadClass>) -> bool {
        self.shapes.contains(&shape) && self.predicate.matches(tags, roadways)
    }
}

pub const POI_KEYS: [&str; 9] = [
    "amenity",
    "shop",
    "leisure",
    "office",
    "tourism",
    "natural",
    "healthcare",
    "emergency",
    "craft",
];

/// Evaluated top to bottom, the first accepting rule wins.
pub static RULES: [Rule; 3] = [
    Rule {
        name: "roadway",
        category: Category::Road,
        shapes: &[Shape::Line],
        predicate: Predicate::Roadway,
    },
    Rule {
        name: "address",
        category: Category::Poi,
        shapes: &[Shape::Point, Shape::Area],
        predicate: Predicate::AllOf(&[TagString::ADDR_HOUSENUMBER, TagString::ADDR_STREET]),
    },
    Rule {
        name: "feature",
        category: Category::Poi,
        shapes: &[Shape::Point, Shape::Area],
        predicate: Predicate::AnyOf(&POI_KEYS),
    },
];
