// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{DomainError, GeoPoint, LotPatch, ParkingLot};
use rust_decimal::Decimal;

fn create_test_lot() -> ParkingLot {
    ParkingLot::new(
        String::from("Central Garage"),
        String::from("12 Main St"),
        Some(GeoPoint::new(-106.65, 35.08).unwrap()),
        10,
        None,
        Decimal::new(250, 2),
        String::from("06:00-23:00"),
        Some(3),
        String::from("2026-01-15T08:00:00Z"),
    )
}

#[test]
fn test_new_lot_starts_fully_free() {
    let lot: ParkingLot = create_test_lot();
    assert_eq!(lot.total_slots, 10);
    assert_eq!(lot.available_slots, 10);
    assert_eq!(lot.held_slots(), 0);
    assert!(lot.validate_counters().is_ok());
}

#[test]
fn test_explicit_available_slots_respected() {
    let mut lot: ParkingLot = create_test_lot();
    lot.available_slots = 4;
    assert_eq!(lot.held_slots(), 6);
    assert!(lot.validate_counters().is_ok());
}

#[test]
fn test_counter_invariant_violations_detected() {
    let mut lot: ParkingLot = create_test_lot();
    lot.available_slots = 11;
    assert_eq!(
        lot.validate_counters(),
        Err(DomainError::InvalidAvailableSlots {
            available: 11,
            total: 10,
        })
    );

    lot.available_slots = -1;
    assert!(lot.validate_counters().is_err());
}

#[test]
fn test_patch_updates_metadata() {
    let mut lot: ParkingLot = create_test_lot();
    let patch: LotPatch = LotPatch {
        name: Some(String::from("North Garage")),
        price_per_hour: Some(Decimal::new(300, 2)),
        ..LotPatch::default()
    };

    patch.apply(&mut lot).unwrap();
    assert_eq!(lot.name, "North Garage");
    assert_eq!(lot.price_per_hour, Decimal::new(300, 2));
    // Untouched fields survive.
    assert_eq!(lot.location, "12 Main St");
}

#[test]
fn test_patch_rejects_empty_name() {
    let mut lot: ParkingLot = create_test_lot();
    let patch: LotPatch = LotPatch {
        name: Some(String::from("   ")),
        ..LotPatch::default()
    };
    assert!(patch.apply(&mut lot).is_err());
}

#[test]
fn test_capacity_grow_preserves_held_slots() {
    let mut lot: ParkingLot = create_test_lot();
    lot.available_slots = 7; // 3 held

    let patch: LotPatch = LotPatch {
        total_slots: Some(20),
        ..LotPatch::default()
    };
    patch.apply(&mut lot).unwrap();

    assert_eq!(lot.total_slots, 20);
    assert_eq!(lot.available_slots, 17);
    assert_eq!(lot.held_slots(), 3);
}

#[test]
fn test_capacity_shrink_below_held_clamps_to_zero() {
    let mut lot: ParkingLot = create_test_lot();
    lot.available_slots = 2; // 8 held

    let patch: LotPatch = LotPatch {
        total_slots: Some(5),
        ..LotPatch::default()
    };
    patch.apply(&mut lot).unwrap();

    assert_eq!(lot.total_slots, 5);
    assert_eq!(lot.available_slots, 0);
    assert!(lot.validate_counters().is_ok());
}

#[test]
fn test_patch_rejects_negative_capacity() {
    let mut lot: ParkingLot = create_test_lot();
    let patch: LotPatch = LotPatch {
        total_slots: Some(-1),
        ..LotPatch::default()
    };
    assert_eq!(
        patch.apply(&mut lot),
        Err(DomainError::InvalidCapacity { total: -1 })
    );
}

#[test]
fn test_patch_rejects_negative_price() {
    let mut lot: ParkingLot = create_test_lot();
    let patch: LotPatch = LotPatch {
        price_per_hour: Some(Decimal::new(-100, 2)),
        ..LotPatch::default()
    };
    assert!(patch.apply(&mut lot).is_err());
}
