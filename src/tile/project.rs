//! Projection between lon/lat positions and slippy tiles.

use std::f64::consts::PI;

use geo::Point;

use crate::tile::grid::MAX_ZOOM;

/// The latitude beyond which Web-Mercator is undefined.
pub const MAX_LATITUDE: f64 = 85.051_128_779_806_59;

/// Allows for projection of a position onto a standard.
pub trait Project {
    /// Projects a lon/lat position at the given zoom level.
    ///
    /// ### Example
    /// ```rust
    /// use geo::point;
    /// use roadnet::tile::project::{Project, SlippyTile};
    ///
    /// let SlippyTile(x, y, z) = SlippyTile::project(point! { x: -77.0234, y: 38.9126 }, 14);
    /// assert_eq!((x, y, z), (4686, 6266, 14));
    /// ```
    fn project(value: Point, zoom: u8) -> Self;
}

/// A Slippy tile is one which has a defined x and y, which is distinct to its zoom level.
///
/// To discover this for yourself, use an explorer tool like [this one](https://chrishewett.com/blog/slippy-tile-explorer/).
/// *Learn more [at the osm wiki](https://wiki.openstreetmap.org/wiki/Slippy_map_tilenames).*
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlippyTile(pub u32, pub u32, pub u8);

impl SlippyTile {
    /// The north-west corner of tile `(x, y)`, which is also the
    /// south-east corner of tile `(x - 1, y - 1)`.
    pub fn northwest_corner(x: u32, y: u32, zoom: u8) -> Point {
        let zoom = zoom.min(MAX_ZOOM);
        let n = f64::from(1u32 << zoom);
        let lng = f64::from(x) / n * 360.0 - 180.0;
        let lat = f64::atan(f64::sinh(PI * (1.0 - 2.0 * f64::from(y) / n))).to_degrees();

        Point::new(lng, lat)
    }
}

impl Project for SlippyTile {
    /// See the [OSM Wiki](https://wiki.openstreetmap.org/wiki/Slippy_map_tilenames#Mathematics) for the projection source.
    /// Positions outside the projection are clamped onto the edge tiles,
    /// and zoom levels deeper than [`MAX_ZOOM`] onto it.
    fn project(value: Point, zoom: u8) -> Self {
        let zoom = zoom.min(MAX_ZOOM);
        let n = f64::from(1u32 << zoom);
        let last = (1u32 << zoom) - 1;
        let cell = |value: f64| (value.floor().max(0.0) as u32).min(last);

        let (lng, lat) = value.x_y();
        let lat = lat.clamp(-MAX_LATITUDE, MAX_LATITUDE).to_radians();

        let x = n * ((lng + 180.0) / 360.0);
        let y = n * (1.0 - (lat.tan() + 1.0 / lat.cos()).ln() / PI) / 2.0;

        SlippyTile(cell(x), cell(y), zoom)
    }
}
