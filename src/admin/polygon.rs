use std::fmt::{Display, Formatter};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use geo::{Geometry, MultiPolygon};
use log::warn;
use serde::Deserialize;
use wkt::TryFromWkt;

use crate::admin::PlaceType;
use crate::impl_err;

#[derive(Debug)]
pub enum AdminError {
    Io(std::io::Error),
    Row {
        line: usize,
        source: serde_json::Error,
    },
    Geometry {
        line: usize,
        message: String,
    },
}

impl_err!(std::io::Error, AdminError, Io);

impl Display for AdminError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            AdminError::Io(err) => write!(f, "{err}"),
            AdminError::Row { line, source } => write!(f, "line {line}: {source}"),
            AdminError::Geometry { line, message } => {
                write!(f, "line {line}: invalid boundary, {message}")
            }
        }
    }
}

impl std::error::Error for AdminError {}

/// An administrative boundary.
#[derive(Debug, Clone, PartialEq)]
pub struct AdminPolygon {
    pub id: i64,
    pub place_type: PlaceType,
    pub name: String,
    pub geometry: MultiPolygon,
}

#[derive(Deserialize)]
struct AdminRow {
    id: i64,
    place_type: String,
    name: String,
    geometry: String,
}

impl AdminPolygon {
    pub fn new(id: i64, place_type: PlaceType, name: impl Into<String>, geometry: MultiPolygon) -> Self {
        AdminPolygon {
            id,
            place_type,
            name: name.into(),
            geometry,
        }
    }

    /// Reads boundaries from a JSON-lines file. Rows of an unknown
    /// place type are skipped.
    pub fn load(path: impl AsRef<Path>) -> Result<Vec<AdminPolygon>, AdminError> {
        let reader = BufReader::new(File::open(path)?);
        AdminPolygon::read(reader)
    }

    pub fn read(reader: impl BufRead) -> Result<Vec<AdminPolygon>, AdminError> {
        let mut polygons = vec![];

        for (index, line) in reader.lines().enumerate() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }

            let row = serde_json::from_str::<AdminRow>(&line).map_err(|source| AdminError::Row {
                line: index + 1,
                source,
            })?;

            let Ok(place_type) = row.place_type.parse::<PlaceType>() else {
                warn!(
                    "Skipping admin polygon {} with unknown place type {}",
                    row.id, row.place_type
                );
                continue;
            };

            let geometry = match Geometry::<f64>::try_from_wkt_str(&row.geometry) {
                Ok(Geometry::Polygon(polygon)) => MultiPolygon::new(vec![polygon]),
                Ok(Geometry::MultiPolygon(multi)) => multi,
                Ok(_) => {
                    return Err(AdminError::Geometry {
                        line: index + 1,
                        message: "expected a polygon or multipolygon".to_string(),
                    })
                }
                Err(err) => {
                    return Err(AdminError::Geometry {
                        line: index + 1,
                        message: err.to_string(),
                    })
                }
            };

            polygons.push(AdminPolygon::new(row.id, place_type, row.name, geometry));
        }

        Ok(polygons)
    }
}
