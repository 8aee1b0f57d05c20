// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::unwrap_used, clippy::expect_used)]

mod coordinator_tests;
mod lot_directory_tests;

use crate::Persistence;
use parkhub::{plan_create, plan_delete, plan_update};
use parkhub_audit::{Actor, Cause};
use parkhub_domain::{BookingPatch, BookingStatus, ParkingLot};
use rust_decimal::Decimal;

pub const TEST_TIMESTAMP: &str = "2026-03-01T12:00:00Z";

pub fn create_test_actor() -> Actor {
    Actor::new(String::from("test-actor"), String::from("system"))
}

pub fn create_test_cause() -> Cause {
    Cause::new(String::from("test-cause"), String::from("Test operation"))
}

pub fn setup() -> Persistence {
    Persistence::new_in_memory().expect("in-memory database")
}

pub fn seed_account(persistence: &mut Persistence) -> i64 {
    persistence
        .create_account(
            "driver7",
            "Test Driver",
            "correct horse battery staple",
            "Driver",
            TEST_TIMESTAMP,
        )
        .expect("seeded account")
}

pub fn seed_lot(persistence: &mut Persistence, total: i32, available: i32) -> i64 {
    let lot: ParkingLot = ParkingLot::new(
        String::from("Central Garage"),
        String::from("12 Main St"),
        None,
        total,
        Some(available),
        Decimal::new(250, 2),
        String::from("06:00-23:00"),
        None,
        String::from(TEST_TIMESTAMP),
    );
    persistence.create_lot(&lot).expect("seeded lot")
}

/// Creates a Confirmed booking through the coordinator path and returns
/// its ID.
pub fn create_confirmed_booking(
    persistence: &mut Persistence,
    account_id: i64,
    lot_id: i64,
) -> i64 {
    let lot: ParkingLot = persistence.get_lot(lot_id).unwrap().expect("lot exists");
    let plan = plan_create(
        &lot,
        account_id,
        String::from("2026-03-14"),
        String::from("09:30"),
        Decimal::new(2000, 2),
        BookingStatus::Confirmed,
        String::from(TEST_TIMESTAMP),
        create_test_actor(),
        create_test_cause(),
    )
    .expect("plan");
    persistence
        .execute_plan(&plan, TEST_TIMESTAMP)
        .expect("executed plan")
        .booking_id
        .expect("booking id")
}

/// Transitions a booking's status through the coordinator path.
pub fn transition_booking(
    persistence: &mut Persistence,
    booking_id: i64,
    status: BookingStatus,
) -> Result<(), crate::PersistenceError> {
    let booking = persistence
        .get_booking(booking_id)
        .unwrap()
        .expect("booking exists");
    let lot = persistence.get_lot(booking.lot_id).unwrap();
    let plan = plan_update(
        &booking,
        lot.as_ref(),
        &BookingPatch {
            status: Some(status),
        },
        create_test_actor(),
        create_test_cause(),
    )
    .expect("plan");
    persistence.execute_plan(&plan, TEST_TIMESTAMP).map(|_| ())
}

/// Deletes a booking through the coordinator path.
pub fn delete_booking(
    persistence: &mut Persistence,
    booking_id: i64,
) -> Result<(), crate::PersistenceError> {
    let booking = persistence
        .get_booking(booking_id)
        .unwrap()
        .expect("booking exists");
    let lot = persistence.get_lot(booking.lot_id).unwrap();
    let plan = plan_delete(
        &booking,
        lot.as_ref(),
        create_test_actor(),
        create_test_cause(),
    )
    .expect("plan");
    persistence.execute_plan(&plan, TEST_TIMESTAMP).map(|_| ())
}

/// Asserts the cross-record invariant: the available counter equals
/// `total - confirmed` for the given lot.
pub fn assert_counter_consistent(persistence: &mut Persistence, lot_id: i64) {
    let lot: ParkingLot = persistence.get_lot(lot_id).unwrap().expect("lot exists");
    let confirmed: i64 = persistence.confirmed_count_for_lot(lot_id).unwrap();
    assert!(lot.validate_counters().is_ok());
    assert_eq!(
        i64::from(lot.total_slots) - i64::from(lot.available_slots),
        confirmed,
        "counter drifted from confirmed bookings"
    );
}
