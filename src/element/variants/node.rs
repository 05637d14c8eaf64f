//! Describes a simplification of an OSM node, stripped of the
//! changelog context and carrying only its position and tags.

use geo::Point;

use super::common::{OsmEntryId, Tags};

#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub id: i64,
    pub position: Point,
    pub tags: Tags,
}

impl Node {
    /// Constructs a `Node` from a given position and `id`.
    ///
    /// ```rust
    /// use geo::point;
    /// use roadnet::element::{Node, Tags};
    ///
    /// let node = Node::new(1, point! { x: -77.0365, y: 38.8977 }, Tags::default());
    /// assert_eq!(node.id, 1);
    /// ```
    pub fn new(id: i64, position: Point, tags: Tags) -> Self {
        Node { id, position, tags }
    }

    #[inline]
    pub fn entry(&self) -> OsmEntryId {
        OsmEntryId::node(self.id)
    }
}
