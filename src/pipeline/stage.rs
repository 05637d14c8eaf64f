use strum::{AsRefStr, Display, EnumIter, EnumString};

/// A step of compilation, in the order they depend on each other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter, AsRefStr)]
#[strum(serialize_all = "snake_case")]
pub enum Stage {
    /// Classifies the source into roads, POIs and restrictions.
    Extract,
    /// Finds where roads cross.
    Intersections,
    /// Measures and annotates every crossing.
    Transitions,
    /// Tags POIs with their administrative areas.
    Admin,
    /// Writes the tile grid.
    Tiles,
}
