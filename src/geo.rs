//! Positions, bounding regions and bearings on the globe.

use std::fmt::{self, Display, Formatter};

use serde::{Deserialize, Serialize};

/// A geographic position in decimal degrees.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

/// A `Bounds` is a rectangular area on the globe specified by coordinates of
/// the southwest and northeast edges in decimal degrees.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
    /// Latitude of the south side of the bounding box.
    pub south: f64,
    /// Longitude of the west side of the bounding box.
    pub west: f64,
    /// Latitude of the north side of the bounding box.
    pub north: f64,
    /// Longitude of the east side of the bounding box.
    pub east: f64,
}

impl LatLng {
    pub const fn new(lat: f64, lng: f64) -> Self {
        LatLng { lat, lng }
    }
}

impl Display for LatLng {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.lat, self.lng)
    }
}

impl Bounds {
    /// A zero-area region around a single position.
    pub const fn from_point(p: LatLng) -> Self {
        Bounds {
            south: p.lat,
            west: p.lng,
            north: p.lat,
            east: p.lng,
        }
    }

    /// The smallest region covering every position, or `None` for no positions.
    ///
    /// # Example
    ///
    /// ```rust
    /// use date_spots::geo::{Bounds, LatLng};
    ///
    /// let bounds = Bounds::covering(vec![
    ///     LatLng::new(37.7946, -122.4102), // Top of the Mark
    ///     LatLng::new(37.8199, -122.4783), // Golden Gate Bridge
    /// ])
    /// .unwrap();
    /// assert_eq!(bounds.north, 37.8199);
    /// assert_eq!(bounds.west, -122.4783);
    /// ```
    pub fn covering<I>(positions: I) -> Option<Self>
    where
        I: IntoIterator<Item = LatLng>,
    {
        let mut iter = positions.into_iter();
        let mut bounds = Bounds::from_point(iter.next()?);
        for p in iter {
            bounds.extend(p);
        }
        Some(bounds)
    }

    /// Grows the region so that it contains `p`.
    pub fn extend(&mut self, p: LatLng) {
        self.south = self.south.min(p.lat);
        self.north = self.north.max(p.lat);
        self.west = self.west.min(p.lng);
        self.east = self.east.max(p.lng);
    }

    pub fn contains(&self, p: LatLng) -> bool {
        (self.south..=self.north).contains(&p.lat) && (self.west..=self.east).contains(&p.lng)
    }

    pub fn center(&self) -> LatLng {
        LatLng::new(
            (self.south + self.north) / 2.0,
            (self.west + self.east) / 2.0,
        )
    }
}

/// The initial bearing of the great-circle path from `from` to `to`,
/// in degrees clockwise from true north, within `[-180, 180)`.
pub fn heading(from: LatLng, to: LatLng) -> f64 {
    let phi1 = from.lat.to_radians();
    let phi2 = to.lat.to_radians();
    let delta = (to.lng - from.lng).to_radians();

    let y = delta.sin() * phi2.cos();
    let x = phi1.cos() * phi2.sin() - phi1.sin() * phi2.cos() * delta.cos();
    let degrees = y.atan2(x).to_degrees();

    // atan2 yields (-180, 180]; fold 180 onto -180.
    if degrees >= 180.0 {
        degrees - 360.0
    } else {
        degrees
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-6
    }

    #[test]
    fn covering_none() {
        assert_eq!(Bounds::covering(Vec::new()), None);
    }

    #[test]
    fn covering_extends_every_side() {
        let points = [
            LatLng::new(37.7946, -122.4102),
            LatLng::new(37.8199, -122.4783),
            LatLng::new(37.7544, -122.4477),
        ];
        let bounds = Bounds::covering(points.iter().copied()).unwrap();
        assert_eq!(
            bounds,
            Bounds {
                south: 37.7544,
                west: -122.4783,
                north: 37.8199,
                east: -122.4102,
            }
        );
        assert!(points.iter().all(|&p| bounds.contains(p)));
        assert!(!bounds.contains(LatLng::new(40.7, -74.0)));
        assert!(bounds.contains(bounds.center()));
    }

    #[test]
    fn cardinal_headings() {
        let origin = LatLng::new(0.0, 0.0);
        assert!(close(heading(origin, LatLng::new(1.0, 0.0)), 0.0));
        assert!(close(heading(origin, LatLng::new(0.0, 1.0)), 90.0));
        assert!(close(heading(origin, LatLng::new(0.0, -1.0)), -90.0));
        assert!(close(heading(origin, LatLng::new(-1.0, 0.0)), -180.0));
    }
}
