//! Turns crossings into transitions, annotated with where along each
//! road they occur and whether a restriction applies.

pub mod distance;
pub mod intersection;


#[doc(inline)]
pub use distance::{distance_along, length};
#[doc(inline)]
pub use intersection::Intersection;

use log::{info, warn};
use rayon::prelude::*;
#[cfg(feature = "tracing")]
use tracing::Level;

use crate::intersect::Crossing;
use crate::store::GeometryStore;

#[derive(Debug, Default, Clone, Copy)]
pub struct TransitionBuilder;

impl TransitionBuilder {
    /// Builds one transition for each crossing whose roads are both
    /// present in the store.
    #[cfg_attr(feature = "tracing", tracing::instrument(skip_all, level = Level::INFO))]
    pub fn build(&self, store: &GeometryStore, crossings: &[Crossing]) -> Vec<Intersection> {
        let intersections = crossings
            .par_iter()
            .filter_map(|crossing| self.transition(store, crossing))
            .collect::<Vec<_>>();

        if intersections.len() != crossings.len() {
            warn!(
                "Dropped {} crossings referring to unknown roads",
                crossings.len() - intersections.len()
            );
        }

        info!("Built {} transitions", intersections.len());
        intersections
    }

    pub fn transition(&self, store: &GeometryStore, crossing: &Crossing) -> Option<Intersection> {
        let from = store.road(crossing.way_id)?;
        let to = store.road(crossing.transition_to_way_id)?;

        let mut restrictions = store.restrictions_between(from.way_id, to.way_id);
        let restriction_tags = restrictions.next().map(|first| {
            restrictions.fold(first.tags.clone(), |mut tags, other| {
                tags.merge(&other.tags);
                tags
            })
        });

        Some(Intersection {
            way_id: from.way_id,
            transition_to_way_id: to.way_id,
            distance_along_way: distance_along(&from.geometry, crossing.point)?,
            transition_to_distance_along_way: distance_along(&to.geometry, crossing.point)?,
            way_tags: from.tags.clone(),
            transition_to_way_tags: to.tags.clone(),
            restriction_tags,
            point: crossing.point,
        })
    }
}
