use geo::{LineString, Rect};
use indexmap::IndexSet;

use crate::element::Tags;

/// A routable edge, one per qualifying open way.
#[derive(Debug, Clone, PartialEq)]
pub struct Road {
    pub way_id: i64,
    pub tags: Tags,
    /// Restriction relations this way is a member of, in the order they were seen.
    pub rel_ids: IndexSet<i64>,
    pub geometry: LineString,
}

impl Road {
    pub fn new(way_id: i64, tags: Tags, rel_ids: IndexSet<i64>, geometry: LineString) -> Self {
        Road {
            way_id,
            tags,
            rel_ids,
            geometry,
        }
    }

    /// Bounding box of the road, `None` only for an empty line.
    #[inline]
    pub fn envelope(&self) -> Option<Rect> {
        geo::BoundingRect::bounding_rect(&self.geometry)
    }
}
