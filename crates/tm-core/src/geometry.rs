//! Distance, length and centroid primitives.
//!
//! Points follow the `geo` convention: `x` is longitude (or easting), `y` is
//! latitude (or northing).  All geographic computations assume a spherical
//! Earth.

use std::cmp::Ordering;

use geo::{Centroid, Coord, LineString, MultiPoint, Point};

/// Mean Earth radius in metres.
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// A pluggable point-to-point distance.
pub type PointDistance = fn(Point<f64>, Point<f64>) -> f64;

/// Haversine great-circle distance in metres between two lon/lat points.
pub fn haversine_m(a: Point<f64>, b: Point<f64>) -> f64 {
    let d_lat = (b.y() - a.y()).to_radians();
    let d_lon = (b.x() - a.x()).to_radians();

    let lat1 = a.y().to_radians();
    let lat2 = b.y().to_radians();

    let h = (d_lat * 0.5).sin().powi(2)
        + lat1.cos() * lat2.cos() * (d_lon * 0.5).sin().powi(2);

    // Clamp guards against `h` drifting a hair above 1.0 for antipodes.
    2.0 * EARTH_RADIUS_M * h.sqrt().min(1.0).asin()
}

/// Straight-line distance in CRS units.
#[inline]
pub fn euclidean(a: Point<f64>, b: Point<f64>) -> f64 {
    (b.x() - a.x()).hypot(b.y() - a.y())
}

/// Length of `line` in metres: haversine segments for geographic input,
/// Euclidean segments for planar input.
pub fn line_length_m(line: &LineString<f64>, planar: bool) -> f64 {
    let dist: PointDistance = if planar { euclidean } else { haversine_m };
    line.0
        .windows(2)
        .map(|w| dist(Point::from(w[0]), Point::from(w[1])))
        .sum()
}

/// Distinct points of `points`, as in a point-set union.  Order is not
/// preserved.
pub fn unique_points(points: &[Point<f64>]) -> Vec<Point<f64>> {
    let mut coords: Vec<Coord<f64>> = points.iter().map(|p| p.0).collect();
    coords.sort_by(|a, b| a.x.total_cmp(&b.x).then(a.y.total_cmp(&b.y)));
    coords.dedup();
    coords.into_iter().map(Point::from).collect()
}

/// Angular centroid of lon/lat points: the circular mean of each axis taken
/// independently.  `None` for an empty slice.
pub fn angle_centroid(points: &[Point<f64>]) -> Option<Point<f64>> {
    if points.is_empty() {
        return None;
    }
    let (mut sin_x, mut cos_x, mut sin_y, mut cos_y) = (0.0, 0.0, 0.0, 0.0);
    for p in points {
        let (x, y) = (p.x().to_radians(), p.y().to_radians());
        sin_x += x.sin();
        cos_x += x.cos();
        sin_y += y.sin();
        cos_y += y.cos();
    }
    Some(Point::new(
        sin_x.atan2(cos_x).to_degrees(),
        sin_y.atan2(cos_y).to_degrees(),
    ))
}

/// Centroid of the union of `points`.
///
/// Planar CRS: ordinary centroid of the multipoint.  Geographic CRS:
/// [`angle_centroid`].  Duplicated coordinates count once.
pub fn centroid(points: &[Point<f64>], planar: bool) -> Option<Point<f64>> {
    let unique = unique_points(points);
    if planar {
        MultiPoint::new(unique).centroid()
    } else {
        angle_centroid(&unique)
    }
}

/// Median of `values`, ignoring NaN.  `None` when nothing remains.
pub fn median(values: impl IntoIterator<Item = f64>) -> Option<f64> {
    let mut v: Vec<f64> = values.into_iter().filter(|x| !x.is_nan()).collect();
    if v.is_empty() {
        return None;
    }
    v.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));
    let mid = v.len() / 2;
    Some(if v.len() % 2 == 0 { (v[mid - 1] + v[mid]) * 0.5 } else { v[mid] })
}
