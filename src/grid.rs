use std::{fmt, str::FromStr};

use geo::{GeodesicDistance, Point};
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// A WGS84 coordinate in degrees. Displays and parses as `"lat,lon"`, the
/// form the API takes in its `location` parameter.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

impl GeoPoint {
    pub fn new(lat: f64, lon: f64) -> Self {
        GeoPoint { lat, lon }
    }

    /// Geodesic distance to another point, in metres.
    pub fn distance(&self, other: &GeoPoint) -> f64 {
        self.geo().geodesic_distance(&other.geo())
    }

    fn geo(&self) -> Point {
        Point::new(self.lon, self.lat)
    }
}

impl fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.lat, self.lon)
    }
}

impl FromStr for GeoPoint {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || Error::Parse(format!("invalid coordinate: {s}"));
        let (lat, lon) = s.split_once(',').ok_or_else(invalid)?;
        Ok(GeoPoint {
            lat: lat.trim().parse().map_err(|_| invalid())?,
            lon: lon.trim().parse().map_err(|_| invalid())?,
        })
    }
}

/// Builds the lattice of points covering the parallelogram spanned by three
/// of its corners. `center` is the shared corner; the x axis runs towards
/// `bottom_right` and the y axis towards `top_left`. Steps are in metres.
///
/// Points are interpolated linearly in lat/lon space, a fair approximation
/// for parallelograms a few kilometres across. The first point is `center`
/// itself; the x index runs outermost.
pub fn build(
    center: GeoPoint,
    top_left: GeoPoint,
    bottom_right: GeoPoint,
    x_step: f64,
    y_step: f64,
) -> Result<Vec<GeoPoint>> {
    if !x_step.is_finite() || !y_step.is_finite() || x_step <= 0.0 || y_step <= 0.0 {
        return Err(Error::Grid(format!("bad step sizes: {x_step} x {y_step}")));
    }

    let x_span = center.distance(&bottom_right);
    let y_span = center.distance(&top_left);
    if x_span == 0.0 || y_span == 0.0 {
        return Err(Error::Grid("corners are coincident".to_string()));
    }

    let vector_x = (bottom_right.lat - center.lat, bottom_right.lon - center.lon);
    let vector_y = (top_left.lat - center.lat, top_left.lon - center.lon);

    // a span shorter than its step leaves a single row/column
    let num_x = (x_span / x_step).floor() as usize;
    let num_y = (y_span / y_step).floor() as usize;
    let fraction = |i: usize, num: usize| if num == 0 { 0.0 } else { i as f64 / num as f64 };

    let mut points = Vec::with_capacity((num_x + 1) * (num_y + 1));
    for i in 0..=num_x {
        for j in 0..=num_y {
            let fx = fraction(i, num_x);
            let fy = fraction(j, num_y);
            points.push(GeoPoint {
                lat: center.lat + fx * vector_x.0 + fy * vector_y.0,
                lon: center.lon + fx * vector_x.1 + fy * vector_y.1,
            });
        }
    }

    Ok(points)
}
