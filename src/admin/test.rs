#![cfg(test)]

use std::io::Cursor;

use geo::{point, polygon, MultiPolygon};

use crate::admin::{AdminEnricher, AdminError, AdminPolygon, PlaceType};
use crate::classify::{Poi, PoiGeometry, PoiSource};
use crate::element::Tags;

fn square(min: f64, max: f64) -> MultiPolygon {
    MultiPolygon::new(vec![polygon![
        (x: min, y: min),
        (x: max, y: min),
        (x: max, y: max),
        (x: min, y: max),
        (x: min, y: min),
    ]])
}

fn poi_at(x: f64, y: f64, tags: Tags) -> Poi {
    Poi::new(PoiSource::Node(1), tags, PoiGeometry::Point(point! { x: x, y: y }))
}

fn enricher() -> AdminEnricher {
    AdminEnricher::new(vec![
        AdminPolygon::new(1, PlaceType::Locality, "Springfield", square(0., 10.)),
        AdminPolygon::new(2, PlaceType::Neighbourhood, "Old Town", square(0., 5.)),
        AdminPolygon::new(3, PlaceType::Locality, "Shelbyville", square(2., 8.)),
    ])
}

#[test]
fn place_type_keys() {
    assert_eq!(PlaceType::Neighbourhood.key(), "admin:neighbourhood");
    assert_eq!("localadmin".parse::<PlaceType>().ok(), Some(PlaceType::Localadmin));
}

#[test_log::test]
fn names_are_merged_in_dataset_order() {
    let mut pois = vec![poi_at(3., 3., Tags::default())];
    enricher().enrich(&mut pois);

    let tags = &pois[0].tags;
    assert_eq!(tags.get("admin:locality"), Some("Springfield;Shelbyville"));
    assert_eq!(tags.get("admin:neighbourhood"), Some("Old Town"));
    assert_eq!(tags.get("admin:country"), None);
}

#[test_log::test]
fn stale_admin_tags_are_removed() {
    let stale: Tags = [("admin:locality", "Nowhere"), ("amenity", "cafe")]
        .into_iter()
        .collect();

    let mut pois = vec![poi_at(50., 50., stale)];
    enricher().enrich(&mut pois);

    let tags = &pois[0].tags;
    assert_eq!(tags.get("admin:locality"), None);
    assert_eq!(tags.get("amenity"), Some("cafe"));
}

#[test_log::test]
fn enrichment_is_idempotent() {
    let enricher = enricher();
    let mut pois = vec![poi_at(6., 6., Tags::default()), poi_at(1., 1., Tags::default())];

    enricher.enrich(&mut pois);
    let first = pois.clone();
    enricher.enrich(&mut pois);

    assert_eq!(pois, first);
}

#[test_log::test]
fn polygon_pois_use_their_centroid() {
    let footprint = polygon![
        (x: 0.5, y: 0.5),
        (x: 1.5, y: 0.5),
        (x: 1.5, y: 1.5),
        (x: 0.5, y: 1.5),
        (x: 0.5, y: 0.5),
    ];

    let mut pois = vec![Poi::new(
        PoiSource::Way(4),
        Tags::default(),
        PoiGeometry::Polygon(footprint),
    )];
    enricher().enrich(&mut pois);

    assert_eq!(pois[0].tags.get("admin:neighbourhood"), Some("Old Town"));
    assert_eq!(pois[0].tags.get("admin:locality"), Some("Springfield"));
}

#[test_log::test]
fn reads_jsonl_and_skips_unknown_place_types() {
    let input = concat!(
        r#"{"id":1,"place_type":"country","name":"Freedonia","geometry":"POLYGON((0 0,1 0,1 1,0 1,0 0))"}"#,
        "\n",
        r#"{"id":2,"place_type":"planet","name":"Earth","geometry":"POLYGON((0 0,1 0,1 1,0 1,0 0))"}"#,
        "\n\n",
        r#"{"id":3,"place_type":"region","name":"North","geometry":"MULTIPOLYGON(((0 0,1 0,1 1,0 1,0 0)))"}"#,
        "\n",
    );

    let polygons = AdminPolygon::read(Cursor::new(input)).expect("read");
    let ids = polygons.iter().map(|p| (p.id, p.place_type)).collect::<Vec<_>>();

    assert_eq!(ids, vec![(1, PlaceType::Country), (3, PlaceType::Region)]);
}

#[test_log::test]
fn invalid_boundary_is_an_error() {
    let input = r#"{"id":1,"place_type":"country","name":"X","geometry":"LINESTRING(0 0,1 1)"}"#;

    assert!(matches!(
        AdminPolygon::read(Cursor::new(input)),
        Err(AdminError::Geometry { line: 1, .. })
    ));
}
