//! Classified roads, POIs and restrictions, indexed for
//! spatial and keyed lookups.

pub mod table;

#[doc(hidden)]
mod test;

#[doc(inline)]
pub use table::{TableError, TableStore};

use std::fmt::{Debug, Formatter};

use geo::Rect;
use rstar::primitives::{GeomWithData, Rectangle};
use rstar::{RTree, AABB};
use rustc_hash::FxHashMap;
use smallvec::SmallVec;

use crate::classify::{Poi, Road};
use crate::relation::Restriction;

/// A road's bounding box, keyed by its position in the store.
pub type RoadEnvelope = GeomWithData<Rectangle<[f64; 2]>, usize>;

#[inline]
pub(crate) fn aabb(rect: &Rect) -> AABB<[f64; 2]> {
    AABB::from_corners([rect.min().x, rect.min().y], [rect.max().x, rect.max().y])
}

pub struct GeometryStore {
    roads: Vec<Road>,
    pois: Vec<Poi>,
    restrictions: Vec<Restriction>,

    road_index: FxHashMap<i64, usize>,
    /// Every restriction for each `(from, to)` way pair, in stream order.
    restriction_index: FxHashMap<(i64, i64), SmallVec<[usize; 1]>>,
    index: RTree<RoadEnvelope>,
}

impl Debug for GeometryStore {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "GeometryStore with Roads: {}, Pois: {}, Restrictions: {}",
            self.roads.len(),
            self.pois.len(),
            self.restrictions.len()
        )
    }
}

impl Default for GeometryStore {
    fn default() -> Self {
        GeometryStore::new(vec![], vec![], vec![])
    }
}

impl GeometryStore {
    pub fn new(roads: Vec<Road>, pois: Vec<Poi>, restrictions: Vec<Restriction>) -> Self {
        let mut road_index = FxHashMap::default();
        for (position, road) in roads.iter().enumerate() {
            road_index.entry(road.way_id).or_insert(position);
        }

        let mut restriction_index: FxHashMap<(i64, i64), SmallVec<[usize; 1]>> =
            FxHashMap::default();
        for (position, restriction) in restrictions.iter().enumerate() {
            if let (Some(from), Some(to)) = (restriction.from_way_id, restriction.to_way_id) {
                restriction_index.entry((from, to)).or_default().push(position);
            }
        }

        let envelopes = roads
            .iter()
            .enumerate()
            .filter_map(|(position, road)| {
                let rect = road.envelope()?;
                let aabb = aabb(&rect);
                Some(GeomWithData::new(
                    Rectangle::from_corners(aabb.lower(), aabb.upper()),
                    position,
                ))
            })
            .collect();

        GeometryStore {
            roads,
            pois,
            restrictions,
            road_index,
            restriction_index,
            index: RTree::bulk_load(envelopes),
        }
    }

    #[inline]
    pub fn roads(&self) -> &[Road] {
        &self.roads
    }

    #[inline]
    pub fn pois(&self) -> &[Poi] {
        &self.pois
    }

    #[inline]
    pub fn restrictions(&self) -> &[Restriction] {
        &self.restrictions
    }

    #[inline]
    pub fn index(&self) -> &RTree<RoadEnvelope> {
        &self.index
    }

    #[inline]
    pub fn road(&self, way_id: i64) -> Option<&Road> {
        self.road_index.get(&way_id).map(|position| &self.roads[*position])
    }

    /// Restrictions leading from `from` onto `to`, in stream order.
    pub fn restrictions_between(&self, from: i64, to: i64) -> impl Iterator<Item = &Restriction> {
        self.restriction_index
            .get(&(from, to))
            .into_iter()
            .flatten()
            .map(|position| &self.restrictions[*position])
    }

    /// Roads whose bounding box intersects `rect`.
    pub fn roads_within<'a>(&'a self, rect: &Rect) -> impl Iterator<Item = &'a Road> + 'a {
        self.index
            .locate_in_envelope_intersecting(&aabb(rect))
            .map(|envelope| &self.roads[envelope.data])
    }
}
