//! Enriches POIs with the names of the administrative areas they
//! lie in, one `admin:<place_type>` tag per level.

pub mod place;
pub mod polygon;

#[doc(hidden)]
mod test;

#[doc(inline)]
pub use place::PlaceType;
#[doc(inline)]
pub use polygon::{AdminError, AdminPolygon};

use geo::{BoundingRect, Contains, Point};
use itertools::Itertools;
use log::{debug, info};
use rayon::prelude::*;
use rstar::primitives::{GeomWithData, Rectangle};
use rstar::{RTree, AABB};
use rustc_hash::FxHashMap;
use strum::IntoEnumIterator;
#[cfg(feature = "tracing")]
use tracing::Level;

use crate::classify::Poi;

/// Separates multiple names within one tag value.
pub const SEPARATOR: &str = ";";

type Envelope = GeomWithData<Rectangle<[f64; 2]>, usize>;

/// The polygons of one place type, indexed by their envelopes.
struct Layer {
    tree: RTree<Envelope>,
}

pub struct AdminEnricher {
    polygons: Vec<AdminPolygon>,
    layers: FxHashMap<PlaceType, Layer>,
}

impl AdminEnricher {
    pub fn new(polygons: Vec<AdminPolygon>) -> Self {
        let layers = polygons
            .iter()
            .enumerate()
            .filter_map(|(position, polygon)| {
                let rect = polygon.geometry.bounding_rect()?;
                let envelope = Rectangle::from_corners(
                    [rect.min().x, rect.min().y],
                    [rect.max().x, rect.max().y],
                );
                Some((polygon.place_type, GeomWithData::new(envelope, position)))
            })
            .into_group_map()
            .into_iter()
            .map(|(place_type, envelopes)| {
                let layer = Layer {
                    tree: RTree::bulk_load(envelopes),
                };
                (place_type, layer)
            })
            .collect::<FxHashMap<_, _>>();

        debug!(
            "Indexed {} admin polygons over {} place types",
            polygons.len(),
            layers.len()
        );

        AdminEnricher { polygons, layers }
    }

    /// Names of the polygons of `place_type` containing `point`, in
    /// dataset order.
    pub fn names_at(&self, place_type: PlaceType, point: &Point) -> Vec<&str> {
        let Some(layer) = self.layers.get(&place_type) else {
            return vec![];
        };

        layer
            .tree
            .locate_in_envelope_intersecting(&AABB::from_point([point.x(), point.y()]))
            .map(|envelope| envelope.data)
            .filter(|position| self.polygons[*position].geometry.contains(point))
            .sorted_unstable()
            .map(|position| self.polygons[position].name.as_str())
            .collect()
    }

    /// Sets, or clears, the `admin:<place_type>` tag of every POI.
    pub fn enrich_place_type(&self, place_type: PlaceType, pois: &mut [Poi]) -> usize {
        let key = place_type.key();

        pois.par_iter_mut()
            .map(|poi| {
                let names = match poi.representative_point() {
                    Some(point) => self.names_at(place_type, &point),
                    None => vec![],
                };

                if names.is_empty() {
                    poi.tags.remove(&key);
                    0
                } else {
                    poi.tags.insert(key.as_str(), names.join(SEPARATOR));
                    1
                }
            })
            .sum()
    }

    /// Enriches every POI at every place type, returning how many
    /// tags were set.
    #[cfg_attr(feature = "tracing", tracing::instrument(skip_all, level = Level::INFO))]
    pub fn enrich(&self, pois: &mut [Poi]) -> usize {
        let tagged = PlaceType::iter()
            .map(|place_type| {
                let tagged = self.enrich_place_type(place_type, pois);
                debug!("Tagged {tagged} pois with {place_type}");
                tagged
            })
            .sum();

        info!("Set {tagged} admin tags across {} pois", pois.len());
        tagged
    }
}
