use geo::{Centroid, Geometry, Point, Polygon};
use crate::element::{OsmEntryId, Tags};

/// The entity a [`Poi`] was derived from.
///
/// Exactly one of the node or way id is ever present.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PoiSource {
    Node(i64),
    Way(i64),
}

impl PoiSource {
    pub const fn entry(&self) -> OsmEntryId {
        match self {
            PoiSource::Node(id) => OsmEntryId::node(*id),
            PoiSource::Way(id) => OsmEntryId::way(*id),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum PoiGeometry {
    Point(Point),
    Polygon(Polygon),
}

impl PoiGeometry {
    /// The point used for containment joins: the point itself, or the
    /// centroid of the polygon (its first vertex if it is degenerate).
    pub fn representative_point(&self) -> Option<Point> {
        match self {
            PoiGeometry::Point(point) => Some(*point),
            PoiGeometry::Polygon(polygon) => polygon
                .centroid()
                .or_else(|| polygon.exterior().points().next()),
        }
    }
}

impl From<PoiGeometry> for Geometry {
    fn from(value: PoiGeometry) -> Self {
        match value {
            PoiGeometry::Point(point) => Geometry::Point(point),
            PoiGeometry::Polygon(polygon) => Geometry::Polygon(polygon),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Poi {
    /// Sequential within a run, assigned once the POI enters the store.
    pub(crate) id: u64,
    pub source: PoiSource,
    pub tags: Tags,
    pub geometry: PoiGeometry,
}

impl Poi {
    /// Creates an unnumbered POI.
    pub fn new(source: PoiSource, tags: Tags, geometry: PoiGeometry) -> Self {
        Poi {
            id: 0,
            source,
            tags,
            geometry,
        }
    }

    #[inline]
    pub const fn id(&self) -> u64 {
        self.id
    }

    pub(crate) fn with_id(mut self, id: u64) -> Self {
        self.id = id;
        self
    }

    pub const fn node_id(&self) -> Option<i64> {
        match self.source {
            PoiSource::Node(id) => Some(id),
            PoiSource::Way(_) => None,
        }
    }

    pub const fn way_id(&self) -> Option<i64> {
        match self.source {
            PoiSource::Way(id) => Some(id),
            PoiSource::Node(_) => None,
        }
    }

    #[inline]
    pub fn representative_point(&self) -> Option<Point> {
        self.geometry.representative_point()
    }
}
