//! Describes the minimal `Way` structure, an ordered
//! sequence of positions forming a line or a closed boundary.

use geo::LineString;

use super::common::{OsmEntryId, Tags};

#[derive(Clone, Debug, PartialEq)]
pub struct Way {
    pub id: i64,
    pub geometry: LineString,
    pub tags: Tags,
}

impl Way {
    pub fn new(id: i64, geometry: LineString, tags: Tags) -> Self {
        Way { id, geometry, tags }
    }

    #[inline]
    pub fn entry(&self) -> OsmEntryId {
        OsmEntryId::way(self.id)
    }

    /// A way is closed when it ends where it started.
    /// Fewer than two vertices cannot be closed.
    #[inline]
    pub fn is_closed(&self) -> bool {
        self.geometry.0.len() >= 2 && self.geometry.is_closed()
    }

    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.geometry.0.len()
    }
}
