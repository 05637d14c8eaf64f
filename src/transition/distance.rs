use geo::{Distance, Haversine, Line, LineLocatePoint, LineString, Point};

/// Length of the line in metres, as the sum of its segments.
pub fn length(line: &LineString) -> f64 {
    line.lines()
        .map(|segment| Haversine.distance(segment.start_point(), segment.end_point()))
        .sum()
}

/// Metres travelled from the start of `line` to the projection of
/// `point` onto its nearest segment, clamped to the line's length.
///
/// Returns `None` for a line without segments.
pub fn distance_along(line: &LineString, point: Point) -> Option<f64> {
    let (index, fraction) = nearest_segment(line, point)?;

    let mut travelled = 0.0;
    let mut total = 0.0;
    for (position, segment) in line.lines().enumerate() {
        let metres = Haversine.distance(segment.start_point(), segment.end_point());
        if position < index {
            travelled += metres;
        } else if position == index {
            travelled += metres * fraction;
        }

        total += metres;
    }

    Some(travelled.clamp(0.0, total))
}

/// The segment closest to `point`, with the fraction along it of
/// the projected point.
fn nearest_segment(line: &LineString, point: Point) -> Option<(usize, f64)> {
    line.lines()
        .enumerate()
        .filter_map(|(index, segment)| {
            let fraction = segment.line_locate_point(&point)?;
            Some((index, fraction, planar_offset(&segment, fraction, point)))
        })
        .min_by(|(_, _, a), (_, _, b)| a.total_cmp(b))
        .map(|(index, fraction, _)| (index, fraction))
}

#[inline]
fn planar_offset(segment: &Line, fraction: f64, point: Point) -> f64 {
    let projected = segment.start + segment.delta() * fraction;
    (projected.x - point.x()).hypot(projected.y - point.y())
}
