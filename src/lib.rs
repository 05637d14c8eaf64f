#![doc = include_str!("../readme.md")]

#[cfg(feature = "mimalloc")]
use mimalloc::MiMalloc;
#[cfg_attr(feature = "mimalloc", global_allocator)]
#[cfg(feature = "mimalloc")]
static GLOBAL: MiMalloc = MiMalloc;

pub mod admin;
pub mod classify;
pub mod config;
pub mod element;
pub mod error;
pub mod filter;
pub mod intersect;
pub mod pipeline;
pub mod relation;
pub mod source;
pub mod store;
pub mod tile;
pub mod transition;

#[doc(hidden)]
pub mod util;

#[doc(inline)]
pub use error::{Error, Result};

#[doc(inline)]
pub use admin::{AdminEnricher, AdminPolygon, PlaceType};
#[doc(inline)]
pub use classify::{Classified, Classifier, Poi, Road, RoadClass};
#[doc(inline)]
pub use config::CompileConfig;
#[doc(inline)]
pub use element::{Element, Node, Relation, Tags, Way};
#[doc(inline)]
pub use filter::TagFilter;
#[doc(inline)]
pub use intersect::{Crossing, IntersectionResolver};
#[doc(inline)]
pub use pipeline::{Compiler, Stage};
#[doc(inline)]
pub use relation::{Extractor, Restriction};
#[doc(inline)]
pub use store::GeometryStore;
#[doc(inline)]
pub use tile::{Tile, TileGrid, Window};
#[doc(inline)]
pub use transition::{Intersection, TransitionBuilder};
