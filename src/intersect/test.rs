#![cfg(test)]

use geo::{line_string, point, LineString};
use indexmap::IndexSet;

use crate::classify::Road;
use crate::intersect::{Crossing, IntersectionResolver};
use crate::store::GeometryStore;

fn road(way_id: i64, geometry: LineString) -> Road {
    Road::new(
        way_id,
        [("highway", "residential")].into_iter().collect(),
        IndexSet::new(),
        geometry,
    )
}

fn store(roads: Vec<Road>) -> GeometryStore {
    GeometryStore::new(roads, vec![], vec![])
}

#[test_log::test]
fn perpendicular_roads_cross_once_each_way() {
    let store = store(vec![
        road(1, line_string![(x: 0., y: 0.), (x: 2., y: 0.)]),
        road(2, line_string![(x: 1., y: -1.), (x: 1., y: 1.)]),
    ]);

    let crossings = IntersectionResolver::default().resolve(&store);

    assert_eq!(
        crossings,
        vec![
            Crossing::new(1, 2, point! { x: 1., y: 0. }),
            Crossing::new(2, 1, point! { x: 1., y: 0. }),
        ]
    );
}

#[test_log::test]
fn collinear_overlap_is_not_a_crossing() {
    let store = store(vec![
        road(1, line_string![(x: 0., y: 0.), (x: 2., y: 0.)]),
        road(2, line_string![(x: 1., y: 0.), (x: 3., y: 0.)]),
    ]);

    assert!(IntersectionResolver::default().resolve(&store).is_empty());
}

#[test_log::test]
fn points_on_an_overlap_are_dropped() {
    // Shares the stretch (1,0)-(2,0) with road 1, and touches it again at (1,0).
    let store = store(vec![
        road(1, line_string![(x: 0., y: 0.), (x: 3., y: 0.)]),
        road(
            2,
            line_string![(x: 1., y: 1.), (x: 1., y: 0.), (x: 2., y: 0.), (x: 2., y: 1.)]
        ),
    ]);

    assert!(IntersectionResolver::default().resolve(&store).is_empty());
}

#[test_log::test]
fn t_junction_meets_at_the_endpoint() {
    let store = store(vec![
        road(1, line_string![(x: 0., y: 0.), (x: 2., y: 0.)]),
        road(2, line_string![(x: 1., y: 0.), (x: 1., y: 1.)]),
    ]);

    let crossings = IntersectionResolver::default().resolve(&store);

    assert_eq!(crossings.len(), 2);
    assert!(crossings.iter().all(|c| c.point == point! { x: 1., y: 0. }));
}

#[test_log::test]
fn shared_vertex_is_counted_once() {
    // Both segments of road 2 touch road 1 at the same vertex.
    let store = store(vec![
        road(1, line_string![(x: 0., y: 0.), (x: 2., y: 0.)]),
        road(2, line_string![(x: 0.5, y: 1.), (x: 1., y: 0.), (x: 1.5, y: 1.)]),
    ]);

    let crossings = IntersectionResolver::default().resolve(&store);
    assert_eq!(crossings.len(), 2);
}

#[test_log::test]
fn distinct_points_between_one_pair() {
    let store = store(vec![
        road(1, line_string![(x: 0., y: 0.), (x: 4., y: 0.)]),
        road(
            2,
            line_string![(x: 1., y: -1.), (x: 1., y: 1.), (x: 3., y: 1.), (x: 3., y: -1.)]
        ),
    ]);

    let points = IntersectionResolver::default()
        .crossings_between(&store.roads()[0], &store.roads()[1]);

    assert_eq!(points, vec![point! { x: 1., y: 0. }, point! { x: 3., y: 0. }]);
}

#[test_log::test]
fn disjoint_and_self_pairs_are_ignored() {
    let store = store(vec![
        road(1, line_string![(x: 0., y: 0.), (x: 1., y: 0.)]),
        road(2, line_string![(x: 5., y: 5.), (x: 6., y: 5.)]),
        road(1, line_string![(x: 0.5, y: -1.), (x: 0.5, y: 1.)]),
    ]);

    assert!(IntersectionResolver::default().resolve(&store).is_empty());
}

#[test_log::test]
fn crossing_through_an_interior_vertex_is_one_point() {
    for step in 0..20 {
        for turn in 0..20 {
            let a = (-77.0012 + step as f64 * 1.7e-4, 38.8993 + turn as f64 * 1.3e-4);
            let b = (a.0 + 3.1e-3 + turn as f64 * 2.3e-4, a.1 + 1.9e-3 - step as f64 * 1.1e-4);
            let vertex = (a.0 + 0.3 * (b.0 - a.0), a.1 + 0.3 * (b.1 - a.1));
            let normal = (b.1 - a.1, a.0 - b.0);

            let store = store(vec![
                road(1, line_string![(x: a.0, y: a.1), (x: vertex.0, y: vertex.1), (x: b.0, y: b.1)]),
                road(
                    2,
                    line_string![
                        (x: vertex.0 - normal.0, y: vertex.1 - normal.1),
                        (x: vertex.0 + normal.0, y: vertex.1 + normal.1),
                    ]
                ),
            ]);

            let points = IntersectionResolver::default()
                .crossings_between(&store.roads()[0], &store.roads()[1]);

            assert_eq!(points, vec![point! { x: vertex.0, y: vertex.1 }], "at {a:?} {b:?}");
            assert_eq!(IntersectionResolver::default().resolve(&store).len(), 2);
        }
    }
}
