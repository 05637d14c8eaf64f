use geo::Point;

use crate::element::Tags;

/// A directed transition from one road onto another at a crossing.
#[derive(Debug, Clone, PartialEq)]
pub struct Intersection {
    pub way_id: i64,
    pub transition_to_way_id: i64,
    /// Metres from the start of `way_id` to the crossing.
    pub distance_along_way: f64,
    /// Metres from the start of `transition_to_way_id` to the crossing.
    pub transition_to_distance_along_way: f64,
    pub way_tags: Tags,
    pub transition_to_way_tags: Tags,
    /// Merged tags of the restrictions from `way_id` onto `transition_to_way_id`.
    pub restriction_tags: Option<Tags>,
    pub point: Point,
}

impl Intersection {
    #[inline]
    pub fn is_restricted(&self) -> bool {
        self.restriction_tags.is_some()
    }
}
