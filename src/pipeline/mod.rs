//! Runs the compiler stages in dependency order.
//!
//! Each stage reads the tables of the stages before it and recreates
//! its own, so any one of them can be re-run alone.

pub mod stage;

#[doc(hidden)]
mod test;

#[doc(inline)]
pub use stage::Stage;

use std::path::PathBuf;

use log::info;
use measure_time::info_time;
use strum::IntoEnumIterator;
#[cfg(feature = "tracing")]
use tracing::Level;

use crate::admin::{AdminEnricher, AdminPolygon};
use crate::classify::{Poi, Road};
use crate::config::{CompileConfig, ConfigError};
use crate::intersect::Crossing;
use crate::source::{self, PbfSource, Source};
use crate::store::{GeometryStore, TableError, TableStore};
use crate::tile::{Tile, Window};
use crate::transition::{Intersection, TransitionBuilder};

#[derive(Debug, Clone)]
pub struct Compiler {
    config: CompileConfig,
    tables: TableStore,
    source: Option<PathBuf>,
}

impl Compiler {
    pub fn new(config: CompileConfig, tables: TableStore) -> Self {
        Compiler {
            config,
            tables,
            source: None,
        }
    }

    /// Sets the extract read by the `extract` stage.
    pub fn with_source(mut self, path: impl Into<PathBuf>) -> Self {
        self.source = Some(path.into());
        self
    }

    #[inline]
    pub fn tables(&self) -> &TableStore {
        &self.tables
    }

    #[inline]
    pub fn config(&self) -> &CompileConfig {
        &self.config
    }

    pub fn run_all(&self) -> crate::Result<()> {
        info_time!("Compiled network");
        Stage::iter().try_for_each(|stage| self.run(stage))
    }

    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self), level = Level::INFO))]
    pub fn run(&self, stage: Stage) -> crate::Result<()> {
        info_time!("Stage {stage}");

        match stage {
            Stage::Extract => {
                let path = self
                    .source
                    .as_ref()
                    .ok_or(ConfigError::MissingInput("source extract"))?;
                self.extract(&mut PbfSource::new(path))
            }
            Stage::Intersections => self.intersections(),
            Stage::Transitions => self.transitions(),
            Stage::Admin => self.admin(),
            Stage::Tiles => self.tiles(),
        }
    }

    /// Runs the `extract` stage over any source.
    pub fn extract<S: Source>(&self, source: &mut S) -> crate::Result<()> {
        let store = source::extract(source, self.config.classifier()?)?;
        self.tables.write_store(&store)?;
        Ok(())
    }

    fn intersections(&self) -> crate::Result<()> {
        let store = self.load_roads()?;
        let crossings = self.config.resolver().resolve(&store);
        self.tables.write::<Crossing, _>(&crossings)?;
        Ok(())
    }

    fn transitions(&self) -> crate::Result<()> {
        let store = self.tables.load_store()?;
        let crossings = self.tables.read::<Crossing>()?;
        let intersections = TransitionBuilder.build(&store, &crossings);
        self.tables.write::<Intersection, _>(&intersections)?;
        Ok(())
    }

    fn admin(&self) -> crate::Result<()> {
        let Some(path) = &self.config.admin.polygons else {
            info!("No admin polygons configured, skipping enrichment");
            return Ok(());
        };

        let enricher = AdminEnricher::new(AdminPolygon::load(path)?);
        let mut pois = self.tables.read::<Poi>()?;
        enricher.enrich(&mut pois);
        self.tables.write::<Poi, _>(&pois)?;
        Ok(())
    }

    fn tiles(&self) -> crate::Result<()> {
        let grid = self.config.grid()?;
        let written = self.tables.write::<Tile, _>(grid.tiles())?;
        info!("Indexed {written} tiles at zoom {}", grid.zoom());
        Ok(())
    }

    fn load_roads(&self) -> Result<GeometryStore, TableError> {
        Ok(GeometryStore::new(self.tables.read::<Road>()?, vec![], vec![]))
    }

    /// Reads back the compiled window of one tile, as a routing
    /// engine would receive it.
    pub fn window<T>(&self, tile: Tile, inspect: impl FnOnce(&Window<'_>) -> T) -> crate::Result<T> {
        let store = self.load_roads()?;
        let intersections = self.tables.read::<Intersection>()?;

        Ok(inspect(&Window::for_tile(&store, &intersections, tile)))
    }
}
