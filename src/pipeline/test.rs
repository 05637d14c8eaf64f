#![cfg(test)]

use std::fs;

use approx::assert_relative_eq;
use geo::{line_string, point};

use crate::classify::{Poi, Road};
use crate::config::CompileConfig;
use crate::element::{Element, Node, OsmEntryId, Reference, References, Relation, Tags, Way};
use crate::error::Error;
use crate::intersect::Crossing;
use crate::pipeline::{Compiler, Stage};
use crate::relation::Restriction;
use crate::source::MemorySource;
use crate::store::TableStore;
use crate::tile::{Tile, TileGrid};
use crate::transition::{length, Intersection};

fn tags(pairs: &[(&str, &str)]) -> Tags {
    pairs.iter().copied().collect()
}

fn source() -> MemorySource {
    [
        Element::from(Way::new(
            1,
            line_string![(x: -0.01, y: 0.), (x: 0.01, y: 0.)],
            tags(&[("highway", "primary"), ("name", "East")]),
        )),
        Element::from(Way::new(
            2,
            line_string![(x: 0., y: -0.01), (x: 0., y: 0.01)],
            tags(&[("highway", "residential"), ("tiger:cfcc", "A41")]),
        )),
        Element::from(Node::new(
            3,
            point! { x: 0.005, y: 0.005 },
            tags(&[("amenity", "cafe")]),
        )),
    ]
    .into_iter()
    .collect()
}

#[test_log::test]
fn compiles_two_crossing_roads() {
    let dir = tempfile::tempdir().expect("tempdir");

    let admin = dir.path().join("admin.jsonl");
    fs::write(
        &admin,
        r#"{"id":1,"place_type":"locality","name":"Nulltown","geometry":"POLYGON((-1 -1,1 -1,1 1,-1 1,-1 -1))"}"#,
    )
    .expect("write admin");

    let mut config = CompileConfig::default();
    config.admin.polygons = Some(admin);
    config.tiles.zoom = 2;

    let tables = TableStore::create(dir.path().join("graph")).expect("tables");
    let compiler = Compiler::new(config, tables.clone());

    compiler.extract(&mut source()).expect("extract");
    for stage in [Stage::Intersections, Stage::Transitions, Stage::Admin, Stage::Tiles] {
        compiler.run(stage).expect("stage");
    }

    let roads = tables.read::<Road>().expect("roads");
    assert_eq!(roads.len(), 2);
    assert_eq!(roads[1].tags.get("tiger:cfcc"), None);

    assert!(tables.read::<Restriction>().expect("restrictions").is_empty());
    assert_eq!(tables.read::<Crossing>().expect("crossings").len(), 2);

    let intersections = tables.read::<Intersection>().expect("intersections");
    assert_eq!(intersections.len(), 2);
    for intersection in &intersections {
        let way = roads.iter().find(|road| road.way_id == intersection.way_id);
        let half = way.map(|road| length(&road.geometry) / 2.).unwrap_or(0.);

        assert_relative_eq!(intersection.distance_along_way, half, epsilon = 1e-3);
        assert!(intersection.restriction_tags.is_none());
    }

    let pois = tables.read::<Poi>().expect("poi");
    assert_eq!(pois.len(), 1);
    assert_eq!(pois[0].tags.get("admin:locality"), Some("Nulltown"));

    let tiles = tables.read::<Tile>().expect("tiles");
    assert_eq!(tiles.len() as u64, TileGrid::new(2).map(|grid| grid.len()).unwrap_or(0));

    let tile = Tile::containing(point! { x: 0., y: 0. }, 2);
    let rows = compiler
        .window(tile, |window| (window.roads.len(), window.intersections.len()))
        .expect("window");
    assert!(rows.0 >= 1);
}

#[test_log::test]
fn admin_stage_is_idempotent() {
    let dir = tempfile::tempdir().expect("tempdir");

    let admin = dir.path().join("admin.jsonl");
    fs::write(
        &admin,
        r#"{"id":1,"place_type":"country","name":"Nullia","geometry":"POLYGON((-1 -1,1 -1,1 1,-1 1,-1 -1))"}"#,
    )
    .expect("write admin");

    let mut config = CompileConfig::default();
    config.admin.polygons = Some(admin);

    let tables = TableStore::create(dir.path()).expect("tables");
    let compiler = Compiler::new(config, tables.clone());

    compiler.extract(&mut source()).expect("extract");
    compiler.run(Stage::Admin).expect("admin");
    let once = tables.read::<Poi>().expect("poi");
    compiler.run(Stage::Admin).expect("admin");
    let twice = tables.read::<Poi>().expect("poi");

    assert_eq!(once, twice);
    assert_eq!(twice[0].tags.get("admin:country"), Some("Nullia"));
}

fn no_left_turn() -> Element {
    Element::from(Relation::new(
        7,
        tags(&[("type", "restriction"), ("restriction", "no_left_turn")]),
        References::from(vec![
            Reference::with_role(OsmEntryId::way(1), "from"),
            Reference::with_role(OsmEntryId::way(2), "to"),
        ]),
    ))
}

fn east_to_north(tables: &TableStore) -> Option<Intersection> {
    tables
        .read::<Intersection>()
        .expect("intersections")
        .into_iter()
        .find(|i| i.way_id == 1 && i.transition_to_way_id == 2)
}

#[test_log::test]
fn removed_restriction_is_cleared_on_rerun() {
    let dir = tempfile::tempdir().expect("tempdir");
    let tables = TableStore::create(dir.path()).expect("tables");
    let compiler = Compiler::new(CompileConfig::default(), tables.clone());

    let mut restricted = source();
    restricted.push(no_left_turn());

    compiler.extract(&mut restricted).expect("extract");
    compiler.run(Stage::Intersections).expect("intersections");
    compiler.run(Stage::Transitions).expect("transitions");

    let before = east_to_north(&tables).expect("transition");
    assert_eq!(
        before.restriction_tags.as_ref().and_then(|t| t.get("restriction")),
        Some("no_left_turn")
    );

    compiler.extract(&mut source()).expect("extract");
    compiler.run(Stage::Intersections).expect("intersections");
    compiler.run(Stage::Transitions).expect("transitions");

    assert!(tables.read::<Restriction>().expect("restrictions").is_empty());
    let after = east_to_north(&tables).expect("transition");
    assert_eq!(after.restriction_tags, None);
}

#[test_log::test]
fn stages_fail_without_their_inputs() {
    let dir = tempfile::tempdir().expect("tempdir");
    let compiler = Compiler::new(CompileConfig::default(), TableStore::new(dir.path()));

    assert!(matches!(compiler.run(Stage::Extract), Err(Error::Config(_))));
    assert!(matches!(compiler.run(Stage::Transitions), Err(Error::Table(_))));
}

#[test]
fn stages_parse() {
    assert_eq!("transitions".parse::<Stage>().ok(), Some(Stage::Transitions));
    assert_eq!(Stage::Intersections.to_string(), "intersections");
}
