use geo::{Point, Polygon, Rect};

use crate::tile::project::{Project, SlippyTile};

/// The deepest zoom a grid may be built at.
pub const MAX_ZOOM: u8 = 24;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Tile {
    pub x: u32,
    pub y: u32,
    pub z: u8,
}

impl Tile {
    /// `None` when `(x, y)` lies outside the grid at zoom `z`.
    pub fn new(x: u32, y: u32, z: u8) -> Option<Self> {
        let width = 1u64 << z.min(MAX_ZOOM);
        (z <= MAX_ZOOM && u64::from(x) < width && u64::from(y) < width).then_some(Tile { x, y, z })
    }

    /// The tile holding `point`.
    pub fn containing(point: Point, z: u8) -> Self {
        let SlippyTile(x, y, z) = SlippyTile::project(point, z);
        Tile { x, y, z }
    }

    #[inline]
    pub fn width(&self) -> u64 {
        1u64 << self.z
    }

    /// Position of the tile in the grid, `x * W + y`.
    #[inline]
    pub fn index(&self) -> u64 {
        u64::from(self.x) * self.width() + u64::from(self.y)
    }

    pub fn envelope(&self) -> Rect {
        let northwest = SlippyTile::northwest_corner(self.x, self.y, self.z);
        let southeast = SlippyTile::northwest_corner(self.x + 1, self.y + 1, self.z);
        Rect::new(northwest.0, southeast.0)
    }

    #[inline]
    pub fn polygon(&self) -> Polygon {
        self.envelope().to_polygon()
    }
}

/// Every tile of a single zoom level.
///
/// ```rust
/// use roadnet::TileGrid;
///
/// let grid = TileGrid::new(2).unwrap();
/// assert_eq!(grid.len(), 16);
/// assert_eq!(grid.tiles().map(|tile| tile.index()).max(), Some(15));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileGrid {
    zoom: u8,
}

impl TileGrid {
    pub const DEFAULT_ZOOM: u8 = 10;

    pub fn new(zoom: u8) -> Option<Self> {
        (zoom <= MAX_ZOOM).then_some(TileGrid { zoom })
    }

    #[inline]
    pub const fn zoom(&self) -> u8 {
        self.zoom
    }

    /// Tiles along one side, `2^zoom`.
    #[inline]
    pub const fn width(&self) -> u64 {
        1u64 << self.zoom
    }

    #[inline]
    pub const fn len(&self) -> u64 {
        self.width() * self.width()
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        false
    }

    pub fn tile(&self, x: u32, y: u32) -> Option<Tile> {
        Tile::new(x, y, self.zoom)
    }

    pub fn from_index(&self, index: u64) -> Option<Tile> {
        if index >= self.len() {
            return None;
        }

        let x = u32::try_from(index / self.width()).ok()?;
        let y = u32::try_from(index % self.width()).ok()?;
        self.tile(x, y)
    }

    /// Walks the grid lazily in index order.
    pub fn tiles(&self) -> impl Iterator<Item = Tile> {
        let width = 1u32 << self.zoom;
        let z = self.zoom;
        (0..width).flat_map(move |x| (0..width).map(move |y| Tile { x, y, z }))
    }

    /// Tiles covering `rect`, in index order.
    pub fn covering(&self, rect: &Rect) -> impl Iterator<Item = Tile> {
        // Latitude grows northwards, tile rows grow southwards.
        let northwest = Point::new(rect.min().x, rect.max().y);
        let southeast = Point::new(rect.max().x, rect.min().y);

        let SlippyTile(min_x, min_y, z) = SlippyTile::project(northwest, self.zoom);
        let SlippyTile(max_x, max_y, _) = SlippyTile::project(southeast, self.zoom);

        (min_x..=max_x).flat_map(move |x| (min_y..=max_y).map(move |y| Tile { x, y, z }))
    }
}

impl Default for TileGrid {
    fn default() -> Self {
        TileGrid {
            zoom: TileGrid::DEFAULT_ZOOM,
        }
    }
}
