// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::tests::{
    TEST_TIMESTAMP, assert_counter_consistent, create_confirmed_booking, seed_account, seed_lot,
    setup,
};
use crate::{Persistence, PersistenceError};
use parkhub_domain::{GeoPoint, LotPatch, ParkingLot};
use rust_decimal::Decimal;

#[test]
fn test_create_and_get_lot() {
    let mut persistence: Persistence = setup();
    let lot: ParkingLot = ParkingLot::new(
        String::from("Airport P3"),
        String::from("Terminal Rd"),
        Some(GeoPoint::new(-106.61, 35.04).unwrap()),
        200,
        None,
        Decimal::new(450, 2),
        String::from("24/7"),
        None,
        String::from(TEST_TIMESTAMP),
    );

    let lot_id: i64 = persistence.create_lot(&lot).unwrap();
    let loaded: ParkingLot = persistence.get_lot(lot_id).unwrap().unwrap();

    assert_eq!(loaded.lot_id, Some(lot_id));
    assert_eq!(loaded.name, "Airport P3");
    assert_eq!(loaded.total_slots, 200);
    assert_eq!(loaded.available_slots, 200);
    assert_eq!(loaded.price_per_hour, Decimal::new(450, 2));
    let coordinate: GeoPoint = loaded.coordinate.unwrap();
    assert!((coordinate.longitude - (-106.61)).abs() < 1e-9);
}

#[test]
fn test_missing_lot_reads_as_none() {
    let mut persistence: Persistence = setup();
    assert!(persistence.get_lot(404).unwrap().is_none());
}

#[test]
fn test_update_lot_metadata() {
    let mut persistence: Persistence = setup();
    let lot_id: i64 = seed_lot(&mut persistence, 10, 10);

    let mut lot: ParkingLot = persistence.get_lot(lot_id).unwrap().unwrap();
    let patch: LotPatch = LotPatch {
        name: Some(String::from("Central Garage East")),
        price_per_hour: Some(Decimal::new(350, 2)),
        ..LotPatch::default()
    };
    patch.apply(&mut lot).unwrap();
    persistence
        .update_lot(lot_id, &lot, None, "2026-03-02T09:00:00Z")
        .unwrap();

    let loaded: ParkingLot = persistence.get_lot(lot_id).unwrap().unwrap();
    assert_eq!(loaded.name, "Central Garage East");
    assert_eq!(loaded.price_per_hour, Decimal::new(350, 2));
    assert_eq!(loaded.updated_at, "2026-03-02T09:00:00Z");
    // The counter is untouched by metadata edits.
    assert_eq!(loaded.available_slots, 10);
}

#[test]
fn test_capacity_resize_preserves_held_slots() {
    let mut persistence: Persistence = setup();
    let account_id: i64 = seed_account(&mut persistence);
    let lot_id: i64 = seed_lot(&mut persistence, 10, 10);
    create_confirmed_booking(&mut persistence, account_id, lot_id);
    create_confirmed_booking(&mut persistence, account_id, lot_id);
    create_confirmed_booking(&mut persistence, account_id, lot_id);

    let lot: ParkingLot = persistence.get_lot(lot_id).unwrap().unwrap();
    persistence
        .update_lot(lot_id, &lot, Some(20), "2026-03-02T09:00:00Z")
        .unwrap();

    let loaded: ParkingLot = persistence.get_lot(lot_id).unwrap().unwrap();
    assert_eq!(loaded.total_slots, 20);
    assert_eq!(loaded.available_slots, 17);
    assert_counter_consistent(&mut persistence, lot_id);
}

#[test]
fn test_capacity_shrink_below_held_floors_at_zero() {
    let mut persistence: Persistence = setup();
    let account_id: i64 = seed_account(&mut persistence);
    let lot_id: i64 = seed_lot(&mut persistence, 10, 10);
    for _ in 0..8 {
        create_confirmed_booking(&mut persistence, account_id, lot_id);
    }

    let lot: ParkingLot = persistence.get_lot(lot_id).unwrap().unwrap();
    persistence
        .update_lot(lot_id, &lot, Some(5), "2026-03-02T09:00:00Z")
        .unwrap();

    let loaded: ParkingLot = persistence.get_lot(lot_id).unwrap().unwrap();
    assert_eq!(loaded.total_slots, 5);
    assert_eq!(loaded.available_slots, 0);
    assert!(loaded.validate_counters().is_ok());
}

#[test]
fn test_delete_lot_with_confirmed_bookings_is_rejected() {
    let mut persistence: Persistence = setup();
    let account_id: i64 = seed_account(&mut persistence);
    let lot_id: i64 = seed_lot(&mut persistence, 10, 10);
    create_confirmed_booking(&mut persistence, account_id, lot_id);

    let result = persistence.delete_lot(lot_id, false);
    assert_eq!(
        result,
        Err(PersistenceError::ActiveBookingsExist {
            lot_id,
            confirmed: 1,
        })
    );
    assert!(persistence.get_lot(lot_id).unwrap().is_some());

    // Force deletion is the admin escape hatch.
    persistence.delete_lot(lot_id, true).unwrap();
    assert!(persistence.get_lot(lot_id).unwrap().is_none());
}

#[test]
fn test_delete_missing_lot_is_not_found() {
    let mut persistence: Persistence = setup();
    assert!(matches!(
        persistence.delete_lot(404, false),
        Err(PersistenceError::NotFound(_))
    ));
}

#[test]
fn test_list_lots_ordered_by_id() {
    let mut persistence: Persistence = setup();
    let first: i64 = seed_lot(&mut persistence, 10, 10);
    let second: i64 = seed_lot(&mut persistence, 5, 5);

    let lots: Vec<ParkingLot> = persistence.list_lots().unwrap();
    assert_eq!(lots.len(), 2);
    assert_eq!(lots[0].lot_id, Some(first));
    assert_eq!(lots[1].lot_id, Some(second));
}
