//! Raw source entities, as handed over by a source reader,
//! and the tag map they carry.

pub mod item;

#[doc(hidden)]
pub mod variants;

#[doc(inline)]
pub use item::Element;
#[doc(inline)]
pub use variants::OsmEntryId;

pub use variants::common::*;
pub use variants::{Node, Relation, Way};
