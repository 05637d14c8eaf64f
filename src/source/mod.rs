//! Sources of raw entities, read in two passes: relations first,
//! then every entity in stream order.

pub mod memory;
pub mod pbf;


#[doc(inline)]
pub use memory::MemorySource;
#[doc(inline)]
pub use pbf::PbfSource;

use std::fmt::{Display, Formatter};
use std::path::PathBuf;

use log::info;

use crate::classify::Classifier;
use crate::element::{Element, Relation};
use crate::relation::Extractor;
use crate::store::GeometryStore;

#[derive(Debug)]
pub enum SourceError {
    Open(PathBuf, osmpbf::Error),
    Read(osmpbf::Error),
}

impl Display for SourceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            SourceError::Open(path, err) => write!(f, "cannot open {}: {err}", path.display()),
            SourceError::Read(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for SourceError {}

crate::impl_err!(osmpbf::Error, SourceError, Read);

pub trait Source {
    /// First pass, over relations only.
    fn scan_relations<F>(&mut self, visit: F) -> Result<(), SourceError>
    where
        F: FnMut(Relation);

    /// Second pass, over every entity.
    fn scan_entities<F>(&mut self, visit: F) -> Result<(), SourceError>
    where
        F: FnMut(Element);
}

/// Runs both passes of `source` through a fresh extraction run.
pub fn extract<S: Source>(source: &mut S, classifier: Classifier) -> Result<GeometryStore, SourceError> {
    let mut extractor = Extractor::new(classifier);

    let mut tracked = 0usize;
    source.scan_relations(|relation| {
        let members = extractor.collect_relation_members(&relation);
        tracked += members.node_ids.len() + members.way_ids.len();
    })?;
    info!("Recorded {tracked} relation members");

    source.scan_entities(|element| extractor.visit(element))?;

    let store = extractor.finish();
    info!("Extracted {store:?}");
    Ok(store)
}
