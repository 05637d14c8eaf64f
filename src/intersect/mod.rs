//! Finds the point-like crossings between pairs of distinct roads.
//!
//! Candidate pairs come from the store's envelope index, the exact
//! crossings from segment-to-segment intersection. Stretches where two
//! roads run collinearly are not crossings, and neither is any point
//! lying on such a stretch.

pub mod crossing;

#[doc(hidden)]
mod test;

#[doc(inline)]
pub use crossing::Crossing;

use geo::algorithm::line_intersection::{line_intersection, LineIntersection};
use geo::{BoundingRect, Coord, Line, Point};
use log::info;
use rayon::prelude::*;
#[cfg(feature = "tracing")]
use tracing::Level;

use crate::classify::Road;
use crate::store::{aabb, GeometryStore};

/// Tolerance, in degrees, under which two crossing points are one, or a
/// point lies on an overlap.
pub const DEFAULT_EPSILON: f64 = 1e-9;

#[derive(Debug, Clone, Copy)]
pub struct IntersectionResolver {
    epsilon: f64,
}

impl Default for IntersectionResolver {
    fn default() -> Self {
        IntersectionResolver {
            epsilon: DEFAULT_EPSILON,
        }
    }
}

impl IntersectionResolver {
    pub const fn new(epsilon: f64) -> Self {
        IntersectionResolver { epsilon }
    }

    /// Every crossing between distinct roads in the store, once in
    /// each direction.
    #[cfg_attr(feature = "tracing", tracing::instrument(skip_all, level = Level::INFO))]
    pub fn resolve(&self, store: &GeometryStore) -> Vec<Crossing> {
        let roads = store.roads();

        let crossings = roads
            .par_iter()
            .enumerate()
            .flat_map_iter(|(position, road)| {
                let candidates = road
                    .geometry
                    .bounding_rect()
                    .map(|rect| {
                        store
                            .index()
                            .locate_in_envelope_intersecting(&aabb(&rect))
                            .map(|envelope| envelope.data)
                            .filter(|other| *other > position)
                            .collect::<Vec<_>>()
                    })
                    .unwrap_or_default();

                let mut crossings = vec![];
                for other in candidates {
                    let other = &roads[other];
                    if other.way_id == road.way_id {
                        continue;
                    }

                    for point in self.crossings_between(road, other) {
                        let crossing = Crossing::new(road.way_id, other.way_id, point);
                        crossings.push(crossing);
                        crossings.push(crossing.reversed());
                    }
                }

                crossings
            })
            .collect::<Vec<_>>();

        info!(
            "Resolved {} directed crossings between {} roads",
            crossings.len(),
            roads.len()
        );

        crossings
    }

    /// The distinct crossing points of two roads, in the order they
    /// are met along `a`. A point within tolerance of a vertex of
    /// either road is that vertex.
    pub fn crossings_between(&self, a: &Road, b: &Road) -> Vec<Point> {
        let mut points = vec![];
        let mut overlaps = vec![];

        for segment in a.geometry.lines() {
            for other in b.geometry.lines() {
                match line_intersection(segment, other) {
                    Some(LineIntersection::SinglePoint { intersection, .. }) => {
                        points.push(intersection)
                    }
                    Some(LineIntersection::Collinear { intersection }) => {
                        if intersection.start == intersection.end {
                            points.push(intersection.start);
                        } else {
                            overlaps.push(intersection);
                        }
                    }
                    None => {}
                }
            }
        }

        let vertices = a.geometry.coords().chain(b.geometry.coords()).copied().collect::<Vec<_>>();
        let near = |p: Coord, q: Coord| (p.x - q.x).hypot(p.y - q.y) <= self.epsilon;

        let mut kept: Vec<Coord> = vec![];
        for point in points {
            if overlaps
                .iter()
                .any(|overlap| distance_to_segment(point, overlap) <= self.epsilon)
            {
                continue;
            }

            // Snap onto a road vertex within tolerance.
            let point = vertices
                .iter()
                .copied()
                .find(|vertex| near(point, *vertex))
                .unwrap_or(point);

            if !kept.iter().any(|other| near(point, *other)) {
                kept.push(point);
            }
        }

        kept.into_iter().map(Point::from).collect()
    }
}

/// Planar distance from `point` to the closest point of `line`.
fn distance_to_segment(point: Coord, line: &Line) -> f64 {
    let delta = line.delta();
    let offset = point - line.start;
    let length = delta.x * delta.x + delta.y * delta.y;
    if length == 0.0 {
        return offset.x.hypot(offset.y);
    }

    let t = ((offset.x * delta.x + offset.y * delta.y) / length).clamp(0.0, 1.0);
    let closest = line.start + delta * t;

    (point.x - closest.x).hypot(point.y - closest.y)
}
