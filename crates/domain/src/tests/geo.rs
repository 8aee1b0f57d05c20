// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{GeoPoint, distance_km};

#[test]
fn test_coordinate_ranges_enforced() {
    assert!(GeoPoint::new(-106.65, 35.08).is_ok());
    assert!(GeoPoint::new(-181.0, 0.0).is_err());
    assert!(GeoPoint::new(0.0, 90.5).is_err());
    assert!(GeoPoint::new(f64::NAN, 0.0).is_err());
}

#[test]
fn test_distance_to_self_is_zero() {
    let p: GeoPoint = GeoPoint::new(-106.65, 35.08).unwrap();
    assert!(distance_km(p, p) < 1e-9);
}

#[test]
fn test_distance_is_symmetric() {
    let a: GeoPoint = GeoPoint::new(-106.65, 35.08).unwrap();
    let b: GeoPoint = GeoPoint::new(-106.60, 35.11).unwrap();
    let d_ab: f64 = distance_km(a, b);
    let d_ba: f64 = distance_km(b, a);
    assert!((d_ab - d_ba).abs() < 1e-9);
}

#[test]
fn test_known_distance_roughly_correct() {
    // One degree of latitude is about 111 km.
    let a: GeoPoint = GeoPoint::new(0.0, 0.0).unwrap();
    let b: GeoPoint = GeoPoint::new(0.0, 1.0).unwrap();
    let d: f64 = distance_km(a, b);
    assert!((d - 111.19).abs() < 0.5, "unexpected distance: {d}");
}
