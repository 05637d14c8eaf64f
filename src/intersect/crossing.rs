use geo::Point;

/// A point where a road meets another, directed from `way_id`
/// onto `transition_to_way_id`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Crossing {
    pub way_id: i64,
    pub transition_to_way_id: i64,
    pub point: Point,
}

impl Crossing {
    pub const fn new(way_id: i64, transition_to_way_id: i64, point: Point) -> Self {
        Crossing {
            way_id,
            transition_to_way_id,
            point,
        }
    }

    /// The same crossing, travelled the other way around.
    #[inline]
    pub const fn reversed(&self) -> Self {
        Crossing::new(self.transition_to_way_id, self.way_id, self.point)
    }
}
