//! A fixed-zoom grid partitioning the network, so that downstream
//! consumers can load it window by window.

pub mod grid;
pub mod project;
pub mod window;


#[doc(inline)]
pub use grid::{Tile, TileGrid, MAX_ZOOM};
#[doc(inline)]
pub use window::{feed_tiles, TileConsumer, Window};
