//! Compiler configuration, read from a TOML file.
//!
//! Every field has a default, so an empty file (or none at all)
//! compiles with the standard rules:
//!
//! ```toml
//! [filter]
//! rules = ["note", "source:*"]
//!
//! [classify]
//! roadways = ["motorway", "primary", "residential"]
//! area_threshold = 2500.0
//!
//! [tiles]
//! zoom = 10
//! ```

use std::fmt::{Display, Formatter};
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::classify::{Classifier, RoadClass, DEFAULT_AREA_THRESHOLD};
use crate::filter::{InvalidRule, TagFilter};
use crate::intersect::{IntersectionResolver, DEFAULT_EPSILON};
use crate::tile::{TileGrid, MAX_ZOOM};

#[derive(Debug)]
pub enum ConfigError {
    Io(PathBuf, std::io::Error),
    Parse(toml::de::Error),
    Filter(InvalidRule),
    Zoom(u8),
    AreaThreshold(f64),
    /// A stage was run without an input it needs.
    MissingInput(&'static str),
    OutsideGrid { x: u32, y: u32, zoom: u8 },
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(path, err) => write!(f, "{}: {err}", path.display()),
            ConfigError::Parse(err) => write!(f, "{err}"),
            ConfigError::Filter(err) => write!(f, "{err}"),
            ConfigError::Zoom(zoom) => write!(f, "zoom {zoom} exceeds the maximum of {MAX_ZOOM}"),
            ConfigError::AreaThreshold(area) => {
                write!(f, "area threshold must be a non-negative number, got {area}")
            }
            ConfigError::MissingInput(input) => write!(f, "no {input} was given"),
            ConfigError::OutsideGrid { x, y, zoom } => {
                write!(f, "tile ({x}, {y}) lies outside the grid at zoom {zoom}")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

crate::impl_err!(toml::de::Error, ConfigError, Parse);
crate::impl_err!(InvalidRule, ConfigError, Filter);

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterConfig {
    /// Replaces the built-in rule set when present.
    pub rules: Option<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifyConfig {
    /// Narrows the accepted roadways, all classes when absent.
    pub roadways: Option<Vec<RoadClass>>,
    /// In square metres.
    pub area_threshold: f64,
}

impl Default for ClassifyConfig {
    fn default() -> Self {
        ClassifyConfig {
            roadways: None,
            area_threshold: DEFAULT_AREA_THRESHOLD,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IntersectConfig {
    pub epsilon: f64,
}

impl Default for IntersectConfig {
    fn default() -> Self {
        IntersectConfig {
            epsilon: DEFAULT_EPSILON,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdminConfig {
    /// JSON-lines boundary file, the admin stage is skipped without one.
    pub polygons: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TilesConfig {
    pub zoom: u8,
}

impl Default for TilesConfig {
    fn default() -> Self {
        TilesConfig {
            zoom: TileGrid::DEFAULT_ZOOM,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompileConfig {
    pub filter: FilterConfig,
    pub classify: ClassifyConfig,
    pub intersections: IntersectConfig,
    pub admin: AdminConfig,
    pub tiles: TilesConfig,
}

impl CompileConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;

        CompileConfig::parse(&text)
    }

    /// Parses and validates a configuration.
    pub fn parse(text: &str) -> Result<Self, ConfigError> {
        let config: CompileConfig = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.tag_filter()?;
        self.grid()?;

        let area = self.classify.area_threshold;
        if !area.is_finite() || area < 0.0 {
            return Err(ConfigError::AreaThreshold(area));
        }

        Ok(())
    }

    pub fn tag_filter(&self) -> Result<TagFilter, ConfigError> {
        match &self.filter.rules {
            Some(rules) => Ok(TagFilter::from_rules(rules)?),
            None => Ok(TagFilter::default()),
        }
    }

    pub fn classifier(&self) -> Result<Classifier, ConfigError> {
        Ok(Classifier::from_config(self.tag_filter()?, &self.classify))
    }

    #[inline]
    pub fn resolver(&self) -> IntersectionResolver {
        IntersectionResolver::new(self.intersections.epsilon)
    }

    pub fn grid(&self) -> Result<TileGrid, ConfigError> {
        TileGrid::new(self.tiles.zoom).ok_or(ConfigError::Zoom(self.tiles.zoom))
    }
}
