//! Small-scale geographic helpers.
//!
//! Offsets use a flat-earth approximation, which is fine for the tens to hundreds
//! of meters the player moves around in. Distances use the haversine formula.

use rand::Rng;
use serde::{Deserialize, Serialize};

/// Meters per degree of latitude.
pub const METERS_PER_DEGREE: f64 = 111_320.0;
/// Mean Earth radius in meters.
pub const EARTH_RADIUS_METERS: f64 = 6_371_000.0;

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub lat: f64,
    pub lng: f64,
}

impl Position {
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

/// Meters per degree of longitude at the given latitude.
fn meters_per_degree_lng(lat: f64) -> f64 {
    METERS_PER_DEGREE * lat.to_radians().cos()
}

/// Moves `origin` by `dx` meters east and `dy` meters north.
pub fn offset_position(origin: Position, dx: f64, dy: f64) -> Position {
    Position {
        lat: origin.lat + dy / METERS_PER_DEGREE,
        lng: origin.lng + dx / meters_per_degree_lng(origin.lat),
    }
}

/// Inverse of [`offset_position`]: the (east, north) meter offset of `target` seen from `origin`.
pub fn local_offset(origin: Position, target: Position) -> (f64, f64) {
    let dx = (target.lng - origin.lng) * meters_per_degree_lng(origin.lat);
    let dy = (target.lat - origin.lat) * METERS_PER_DEGREE;
    (dx, dy)
}

/// Great-circle distance in meters.
pub fn distance(a: Position, b: Position) -> f64 {
    let lat1 = a.lat.to_radians();
    let lat2 = b.lat.to_radians();
    let dlat = lat2 - lat1;
    let dlng = (b.lng - a.lng).to_radians();
    let h = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlng / 2.0).sin().powi(2);
    2.0 * EARTH_RADIUS_METERS * h.sqrt().min(1.0).asin()
}

/// Uniform sample from the square of side `2 * radius` meters centered on `center`.
pub fn random_nearby<R: Rng + ?Sized>(center: Position, radius: f64, rng: &mut R) -> Position {
    let dx = (rng.r#gen::<f64>() - 0.5) * radius * 2.0;
    let dy = (rng.r#gen::<f64>() - 0.5) * radius * 2.0;
    offset_position(center, dx, dy)
}
