// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};

/// Mean Earth radius in kilometers, used for great-circle distance.
const EARTH_RADIUS_KM: f64 = 6371.0;

/// A WGS84 geocoordinate attached to a lot.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    /// Longitude in decimal degrees (-180..=180).
    pub longitude: f64,
    /// Latitude in decimal degrees (-90..=90).
    pub latitude: f64,
}

impl GeoPoint {
    /// Creates a new `GeoPoint`, validating coordinate ranges.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidCoordinate` if either component is
    /// outside its valid range or not finite.
    pub fn new(longitude: f64, latitude: f64) -> Result<Self, DomainError> {
        if !longitude.is_finite()
            || !latitude.is_finite()
            || !(-180.0..=180.0).contains(&longitude)
            || !(-90.0..=90.0).contains(&latitude)
        {
            return Err(DomainError::InvalidCoordinate {
                longitude,
                latitude,
            });
        }
        Ok(Self {
            longitude,
            latitude,
        })
    }
}

/// Computes the great-circle distance between two points in kilometers.
///
/// Uses the haversine formula, which is accurate enough for
/// nearest-lot ordering at city scale.
#[must_use]
pub fn distance_km(a: GeoPoint, b: GeoPoint) -> f64 {
    let lat_a: f64 = a.latitude.to_radians();
    let lat_b: f64 = b.latitude.to_radians();
    let d_lat: f64 = (b.latitude - a.latitude).to_radians();
    let d_lng: f64 = (b.longitude - a.longitude).to_radians();

    let h: f64 = (d_lat / 2.0).sin().powi(2)
        + lat_a.cos() * lat_b.cos() * (d_lng / 2.0).sin().powi(2);

    2.0 * EARTH_RADIUS_KM * h.sqrt().asin()
}
