//! The contract between the compiled network and the routing engine
//! consuming it one tile at a time.

use std::collections::BTreeMap;

use log::debug;

use crate::classify::Road;
use crate::store::GeometryStore;
use crate::tile::{Tile, TileGrid};
use crate::transition::Intersection;

/// The part of the network inside one tile.
#[derive(Debug, Clone)]
pub struct Window<'a> {
    pub tile: Tile,
    /// Roads whose envelope intersects the tile.
    pub roads: Vec<&'a Road>,
    /// Transitions located inside the tile.
    pub intersections: Vec<&'a Intersection>,
}

impl<'a> Window<'a> {
    pub fn for_tile(
        store: &'a GeometryStore,
        intersections: &'a [Intersection],
        tile: Tile,
    ) -> Self {
        let intersections = intersections
            .iter()
            .filter(|intersection| Tile::containing(intersection.point, tile.z) == tile)
            .collect();

        Window::assemble(store, tile, intersections)
    }

    fn assemble(store: &'a GeometryStore, tile: Tile, intersections: Vec<&'a Intersection>) -> Self {
        let mut roads = store.roads_within(&tile.envelope()).collect::<Vec<_>>();
        roads.sort_unstable_by_key(|road| road.way_id);

        Window {
            tile,
            roads,
            intersections,
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.roads.is_empty() && self.intersections.is_empty()
    }
}

/// A routing engine loading the network window by window.
pub trait TileConsumer {
    type Error;

    /// Drops everything ingested so far.
    fn clear(&mut self) -> Result<(), Self::Error>;

    fn ingest_tile(&mut self, tile: Tile, window: &Window<'_>) -> Result<(), Self::Error>;
}

/// Clears `consumer` and hands it every non-empty window of the
/// grid, in tile index order. Returns the number of windows fed.
pub fn feed_tiles<C: TileConsumer>(
    consumer: &mut C,
    store: &GeometryStore,
    intersections: &[Intersection],
    grid: &TileGrid,
) -> Result<usize, C::Error> {
    consumer.clear()?;

    let mut tiles: BTreeMap<u64, (Tile, Vec<&Intersection>)> = BTreeMap::new();
    for intersection in intersections {
        let tile = Tile::containing(intersection.point, grid.zoom());
        tiles
            .entry(tile.index())
            .or_insert_with(|| (tile, vec![]))
            .1
            .push(intersection);
    }

    for rect in store.roads().iter().filter_map(Road::envelope) {
        for tile in grid.covering(&rect) {
            tiles.entry(tile.index()).or_insert_with(|| (tile, vec![]));
        }
    }

    let mut fed = 0;
    for (tile, intersections) in tiles.into_values() {
        let window = Window::assemble(store, tile, intersections);
        if window.is_empty() {
            continue;
        }

        consumer.ingest_tile(tile, &window)?;
        fed += 1;
    }

    debug!("Fed {fed} windows at zoom {}", grid.zoom());
    Ok(fed)
}
