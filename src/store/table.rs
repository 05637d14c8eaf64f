//! JSON-lines tables with WKT geometry.
//!
//! Every stage writes its output through [`TableStore::write`], which
//! drops the previous table first and only renames the new one into
//! place once it has been written in full.

use std::borrow::Borrow;
use std::fmt::{Display, Formatter};
use std::fs::{self, File};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::PathBuf;

use geo::{Geometry, LineString, Point};
use log::debug;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use wkt::{ToWkt, TryFromWkt};

use crate::classify::{Poi, PoiGeometry, PoiSource, Road};
use crate::element::{OsmEntryId, References, Tags};
use crate::intersect::Crossing;
use crate::relation::{Restriction, RestrictionKind};
use crate::store::GeometryStore;
use crate::tile::Tile;
use crate::transition::Intersection;

#[derive(Debug)]
pub enum TableError {
    Io {
        table: &'static str,
        source: std::io::Error,
    },
    Row {
        table: &'static str,
        line: usize,
        source: serde_json::Error,
    },
    Geometry {
        table: &'static str,
        line: usize,
        message: String,
    },
    /// The table has not been written by its stage yet.
    Missing(&'static str),
}

impl Display for TableError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            TableError::Io { table, source } => write!(f, "{table}: {source}"),
            TableError::Row {
                table,
                line,
                source,
            } => write!(f, "{table}:{line}: {source}"),
            TableError::Geometry {
                table,
                line,
                message,
            } => write!(f, "{table}:{line}: invalid geometry, {message}"),
            TableError::Missing(table) => write!(f, "table {table} has not been compiled"),
        }
    }
}

impl std::error::Error for TableError {}

/// A record type persisted as one row per line.
pub trait Table: Sized {
    const NAME: &'static str;
    type Row: Serialize + DeserializeOwned;

    fn to_row(&self) -> Self::Row;
    fn from_row(row: Self::Row) -> Result<Self, String>;
}

fn parse_wkt<G>(text: &str) -> Result<G, String>
where
    G: TryFromWkt<f64>,
    G::Error: Display,
{
    G::try_from_wkt_str(text).map_err(|err| err.to_string())
}

#[derive(Serialize, Deserialize)]
pub struct RoadRow {
    pub way_id: i64,
    pub tags: Tags,
    pub rel_ids: Vec<i64>,
    pub geometry: String,
}

impl Table for Road {
    const NAME: &'static str = "roads";
    type Row = RoadRow;

    fn to_row(&self) -> RoadRow {
        RoadRow {
            way_id: self.way_id,
            tags: self.tags.clone(),
            rel_ids: self.rel_ids.iter().copied().collect(),
            geometry: self.geometry.wkt_string(),
        }
    }

    fn from_row(row: RoadRow) -> Result<Self, String> {
        let geometry: LineString = parse_wkt(&row.geometry)?;
        Ok(Road::new(
            row.way_id,
            row.tags,
            row.rel_ids.into_iter().collect(),
            geometry,
        ))
    }
}

#[derive(Serialize, Deserialize)]
pub struct PoiRow {
    pub id: u64,
    pub way_id: Option<i64>,
    pub node_id: Option<i64>,
    pub tags: Tags,
    pub geometry: String,
}

impl Table for Poi {
    const NAME: &'static str = "poi";
    type Row = PoiRow;

    fn to_row(&self) -> PoiRow {
        PoiRow {
            id: self.id(),
            way_id: self.way_id(),
            node_id: self.node_id(),
            tags: self.tags.clone(),
            geometry: Geometry::from(self.geometry.clone()).wkt_string(),
        }
    }

    fn from_row(row: PoiRow) -> Result<Self, String> {
        let source = match (row.node_id, row.way_id) {
            (Some(node), None) => PoiSource::Node(node),
            (None, Some(way)) => PoiSource::Way(way),
            _ => return Err(format!("poi {} must have exactly one source", row.id)),
        };

        let geometry = match parse_wkt::<Geometry>(&row.geometry)? {
            Geometry::Point(point) => PoiGeometry::Point(point),
            Geometry::Polygon(polygon) => PoiGeometry::Polygon(polygon),
            _ => return Err(format!("poi {} is neither a point nor a polygon", row.id)),
        };

        Ok(Poi::new(source, row.tags, geometry).with_id(row.id))
    }
}

#[derive(Serialize, Deserialize)]
pub struct RestrictionRow {
    pub relation_id: i64,
    #[serde(rename = "ref")]
    pub r#ref: Option<String>,
    pub from_way_id: Option<i64>,
    pub to_way_id: Option<i64>,
    pub via: Option<OsmEntryId>,
    pub kind: Option<RestrictionKind>,
    pub tags: Tags,
    pub members: References,
}

impl Table for Restriction {
    const NAME: &'static str = "restrictions";
    type Row = RestrictionRow;

    fn to_row(&self) -> RestrictionRow {
        RestrictionRow {
            relation_id: self.relation_id,
            r#ref: self.r#ref.clone(),
            from_way_id: self.from_way_id,
            to_way_id: self.to_way_id,
            via: self.via,
            kind: self.kind,
            tags: self.tags.clone(),
            members: self.members.clone(),
        }
    }

    fn from_row(row: RestrictionRow) -> Result<Self, String> {
        Ok(Restriction {
            relation_id: row.relation_id,
            r#ref: row.r#ref,
            from_way_id: row.from_way_id,
            to_way_id: row.to_way_id,
            via: row.via,
            kind: row.kind,
            tags: row.tags,
            members: row.members,
        })
    }
}

#[derive(Serialize, Deserialize)]
pub struct CrossingRow {
    pub way_id: i64,
    pub transition_to_way_id: i64,
    pub geometry: String,
}

impl Table for Crossing {
    const NAME: &'static str = "crossings";
    type Row = CrossingRow;

    fn to_row(&self) -> CrossingRow {
        CrossingRow {
            way_id: self.way_id,
            transition_to_way_id: self.transition_to_way_id,
            geometry: self.point.wkt_string(),
        }
    }

    fn from_row(row: CrossingRow) -> Result<Self, String> {
        let point: Point = parse_wkt(&row.geometry)?;
        Ok(Crossing::new(row.way_id, row.transition_to_way_id, point))
    }
}

#[derive(Serialize, Deserialize)]
pub struct IntersectionRow {
    pub way_id: i64,
    pub transition_to_way_id: i64,
    pub distance_along_way: f64,
    pub transition_to_distance_along_way: f64,
    pub way_tags: Tags,
    pub transition_to_way_tags: Tags,
    pub restriction_tags: Option<Tags>,
    pub geometry: String,
}

impl Table for Intersection {
    const NAME: &'static str = "intersections";
    type Row = IntersectionRow;

    fn to_row(&self) -> IntersectionRow {
        IntersectionRow {
            way_id: self.way_id,
            transition_to_way_id: self.transition_to_way_id,
            distance_along_way: self.distance_along_way,
            transition_to_distance_along_way: self.transition_to_distance_along_way,
            way_tags: self.way_tags.clone(),
            transition_to_way_tags: self.transition_to_way_tags.clone(),
            restriction_tags: self.restriction_tags.clone(),
            geometry: self.point.wkt_string(),
        }
    }

    fn from_row(row: IntersectionRow) -> Result<Self, String> {
        let point: Point = parse_wkt(&row.geometry)?;
        Ok(Intersection {
            way_id: row.way_id,
            transition_to_way_id: row.transition_to_way_id,
            distance_along_way: row.distance_along_way,
            transition_to_distance_along_way: row.transition_to_distance_along_way,
            way_tags: row.way_tags,
            transition_to_way_tags: row.transition_to_way_tags,
            restriction_tags: row.restriction_tags,
            point,
        })
    }
}

#[derive(Serialize, Deserialize)]
pub struct TileRow {
    pub index: u64,
    pub x: u32,
    pub y: u32,
    pub z: u8,
    pub geometry: String,
}

impl Table for Tile {
    const NAME: &'static str = "tiles";
    type Row = TileRow;

    fn to_row(&self) -> TileRow {
        TileRow {
            index: self.index(),
            x: self.x,
            y: self.y,
            z: self.z,
            geometry: self.polygon().wkt_string(),
        }
    }

    fn from_row(row: TileRow) -> Result<Self, String> {
        let tile = Tile::new(row.x, row.y, row.z).ok_or_else(|| {
            format!("tile ({}, {}) is outside zoom {}", row.x, row.y, row.z)
        })?;

        if tile.index() != row.index {
            return Err(format!("tile index {} does not match its position", row.index));
        }

        Ok(tile)
    }
}

/// The directory holding a compiled network.
#[derive(Debug, Clone)]
pub struct TableStore {
    root: PathBuf,
}

impl TableStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        TableStore { root: root.into() }
    }

    /// Opens `root`, creating it if absent.
    pub fn create(root: impl Into<PathBuf>) -> Result<Self, TableError> {
        let store = TableStore::new(root);
        fs::create_dir_all(&store.root).map_err(|source| TableError::Io {
            table: "output directory",
            source,
        })?;

        Ok(store)
    }

    pub fn path<T: Table>(&self) -> PathBuf {
        self.root.join(format!("{}.jsonl", T::NAME))
    }

    pub fn exists<T: Table>(&self) -> bool {
        self.path::<T>().is_file()
    }

    /// Recreates the table of `T` from `items`, returning the rows written.
    pub fn write<T, I>(&self, items: I) -> Result<usize, TableError>
    where
        T: Table,
        I: IntoIterator,
        I::Item: Borrow<T>,
    {
        let io = |source| TableError::Io {
            table: T::NAME,
            source,
        };

        let path = self.path::<T>();
        if path.exists() {
            fs::remove_file(&path).map_err(io)?;
        }

        let partial = path.with_extension("jsonl.partial");
        let mut writer = BufWriter::new(File::create(&partial).map_err(io)?);

        let mut written = 0;
        for item in items {
            serde_json::to_writer(&mut writer, &item.borrow().to_row()).map_err(|source| {
                TableError::Row {
                    table: T::NAME,
                    line: written + 1,
                    source,
                }
            })?;
            writer.write_all(b"\n").map_err(io)?;
            written += 1;
        }

        writer.flush().map_err(io)?;
        drop(writer);
        fs::rename(&partial, &path).map_err(io)?;

        debug!("Wrote {written} rows to {}", path.display());
        Ok(written)
    }

    pub fn read<T: Table>(&self) -> Result<Vec<T>, TableError> {
        if !self.exists::<T>() {
            return Err(TableError::Missing(T::NAME));
        }

        let path = self.path::<T>();

        let file = File::open(&path).map_err(|source| TableError::Io {
            table: T::NAME,
            source,
        })?;

        let mut items = vec![];
        for (index, line) in BufReader::new(file).lines().enumerate() {
            let line = line.map_err(|source| TableError::Io {
                table: T::NAME,
                source,
            })?;

            if line.trim().is_empty() {
                continue;
            }

            let row = serde_json::from_str::<T::Row>(&line).map_err(|source| TableError::Row {
                table: T::NAME,
                line: index + 1,
                source,
            })?;

            let item = T::from_row(row).map_err(|message| TableError::Geometry {
                table: T::NAME,
                line: index + 1,
                message,
            })?;

            items.push(item);
        }

        Ok(items)
    }

    /// Loads the extracted roads, POIs and restrictions.
    pub fn load_store(&self) -> Result<GeometryStore, TableError> {
        Ok(GeometryStore::new(
            self.read::<Road>()?,
            self.read::<Poi>()?,
            self.read::<Restriction>()?,
        ))
    }

    pub fn write_store(&self, store: &GeometryStore) -> Result<(), TableError> {
        self.write::<Road, _>(store.roads())?;
        self.write::<Poi, _>(store.pois())?;
        self.write::<Restriction, _>(store.restrictions())?;
        Ok(())
    }
}
