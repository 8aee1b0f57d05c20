// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! End-to-end coordinator behavior against real storage: every test
//! drives plan + execute and then checks the booking/counter invariant.

use crate::tests::{
    TEST_TIMESTAMP, assert_counter_consistent, create_confirmed_booking, create_test_actor,
    create_test_cause, delete_booking, seed_account, seed_lot, setup, transition_booking,
};
use crate::{Persistence, PersistenceError};
use parkhub::plan_create;
use parkhub_domain::{BookingStatus, ParkingLot};
use rust_decimal::Decimal;

#[test]
fn test_create_booking_decrements_counter() {
    let mut persistence: Persistence = setup();
    let account_id: i64 = seed_account(&mut persistence);
    let lot_id: i64 = seed_lot(&mut persistence, 10, 10);

    let booking_id: i64 = create_confirmed_booking(&mut persistence, account_id, lot_id);

    let lot: ParkingLot = persistence.get_lot(lot_id).unwrap().unwrap();
    assert_eq!(lot.available_slots, 9);

    let booking = persistence.get_booking(booking_id).unwrap().unwrap();
    assert_eq!(booking.status, BookingStatus::Confirmed);
    assert_eq!(booking.lot_name, "Central Garage");

    assert_counter_consistent(&mut persistence, lot_id);
}

#[test]
fn test_filling_a_lot_then_overbooking_is_rejected() {
    let mut persistence: Persistence = setup();
    let account_id: i64 = seed_account(&mut persistence);
    let lot_id: i64 = seed_lot(&mut persistence, 10, 10);

    for _ in 0..10 {
        create_confirmed_booking(&mut persistence, account_id, lot_id);
    }

    let lot: ParkingLot = persistence.get_lot(lot_id).unwrap().unwrap();
    assert_eq!(lot.available_slots, 0);

    // The 11th reservation fails at planning time against the loaded lot.
    let plan_result = plan_create(
        &lot,
        account_id,
        String::from("2026-03-14"),
        String::from("09:30"),
        Decimal::new(2000, 2),
        BookingStatus::Confirmed,
        String::from(TEST_TIMESTAMP),
        create_test_actor(),
        create_test_cause(),
    );
    assert!(plan_result.is_err());

    assert_counter_consistent(&mut persistence, lot_id);
}

#[test]
fn test_cancel_then_reconfirm_is_net_zero() {
    let mut persistence: Persistence = setup();
    let account_id: i64 = seed_account(&mut persistence);
    let lot_id: i64 = seed_lot(&mut persistence, 10, 10);
    let booking_id: i64 = create_confirmed_booking(&mut persistence, account_id, lot_id);

    transition_booking(&mut persistence, booking_id, BookingStatus::Cancelled).unwrap();
    let lot: ParkingLot = persistence.get_lot(lot_id).unwrap().unwrap();
    assert_eq!(lot.available_slots, 10);
    assert_counter_consistent(&mut persistence, lot_id);

    transition_booking(&mut persistence, booking_id, BookingStatus::Confirmed).unwrap();
    let lot: ParkingLot = persistence.get_lot(lot_id).unwrap().unwrap();
    assert_eq!(lot.available_slots, 9);
    assert_counter_consistent(&mut persistence, lot_id);
}

#[test]
fn test_recancelling_does_not_double_increment() {
    let mut persistence: Persistence = setup();
    let account_id: i64 = seed_account(&mut persistence);
    let lot_id: i64 = seed_lot(&mut persistence, 10, 10);
    let booking_id: i64 = create_confirmed_booking(&mut persistence, account_id, lot_id);

    transition_booking(&mut persistence, booking_id, BookingStatus::Cancelled).unwrap();
    transition_booking(&mut persistence, booking_id, BookingStatus::Cancelled).unwrap();

    let lot: ParkingLot = persistence.get_lot(lot_id).unwrap().unwrap();
    assert_eq!(lot.available_slots, 10);
    assert_counter_consistent(&mut persistence, lot_id);
}

#[test]
fn test_completion_holds_no_slot_but_keeps_counter() {
    let mut persistence: Persistence = setup();
    let account_id: i64 = seed_account(&mut persistence);
    let lot_id: i64 = seed_lot(&mut persistence, 10, 10);
    let booking_id: i64 = create_confirmed_booking(&mut persistence, account_id, lot_id);

    transition_booking(&mut persistence, booking_id, BookingStatus::Completed).unwrap();

    // Counter-neutral edge: the slot stays consumed.
    let lot: ParkingLot = persistence.get_lot(lot_id).unwrap().unwrap();
    assert_eq!(lot.available_slots, 9);
}

#[test]
fn test_create_then_delete_round_trips_counter() {
    let mut persistence: Persistence = setup();
    let account_id: i64 = seed_account(&mut persistence);
    let lot_id: i64 = seed_lot(&mut persistence, 10, 7);
    let booking_id: i64 = create_confirmed_booking(&mut persistence, account_id, lot_id);

    delete_booking(&mut persistence, booking_id).unwrap();

    let lot: ParkingLot = persistence.get_lot(lot_id).unwrap().unwrap();
    assert_eq!(lot.available_slots, 7);
    assert!(persistence.get_booking(booking_id).unwrap().is_none());
}

#[test]
fn test_delete_booking_after_lot_force_deleted() {
    let mut persistence: Persistence = setup();
    let account_id: i64 = seed_account(&mut persistence);
    let lot_id: i64 = seed_lot(&mut persistence, 10, 10);
    let booking_id: i64 = create_confirmed_booking(&mut persistence, account_id, lot_id);

    persistence.delete_lot(lot_id, true).unwrap();
    assert!(persistence.get_lot(lot_id).unwrap().is_none());

    // Deleting the orphaned booking must still succeed.
    delete_booking(&mut persistence, booking_id).unwrap();
    assert!(persistence.get_booking(booking_id).unwrap().is_none());
}

#[test]
fn test_cancel_booking_after_lot_force_deleted() {
    let mut persistence: Persistence = setup();
    let account_id: i64 = seed_account(&mut persistence);
    let lot_id: i64 = seed_lot(&mut persistence, 10, 10);
    let booking_id: i64 = create_confirmed_booking(&mut persistence, account_id, lot_id);

    persistence.delete_lot(lot_id, true).unwrap();

    transition_booking(&mut persistence, booking_id, BookingStatus::Cancelled).unwrap();
    let booking = persistence.get_booking(booking_id).unwrap().unwrap();
    assert_eq!(booking.status, BookingStatus::Cancelled);
}

#[test]
fn test_stale_plan_against_deleted_booking_rolls_back() {
    let mut persistence: Persistence = setup();
    let account_id: i64 = seed_account(&mut persistence);
    let lot_id: i64 = seed_lot(&mut persistence, 10, 10);
    let booking_id: i64 = create_confirmed_booking(&mut persistence, account_id, lot_id);

    // Plan a cancellation from a pre-deletion read, then delete the
    // booking out from under it.
    let stale_booking = persistence.get_booking(booking_id).unwrap().unwrap();
    let lot: ParkingLot = persistence.get_lot(lot_id).unwrap().unwrap();
    let stale_plan = parkhub::plan_update(
        &stale_booking,
        Some(&lot),
        &parkhub_domain::BookingPatch {
            status: Some(BookingStatus::Cancelled),
        },
        create_test_actor(),
        create_test_cause(),
    )
    .unwrap();

    delete_booking(&mut persistence, booking_id).unwrap();
    let available_before: i32 = persistence.get_lot(lot_id).unwrap().unwrap().available_slots;

    let result = persistence.execute_plan(&stale_plan, TEST_TIMESTAMP);
    assert!(matches!(result, Err(PersistenceError::NotFound(_))));

    // The whole transaction rolled back: no counter change leaked.
    let lot: ParkingLot = persistence.get_lot(lot_id).unwrap().unwrap();
    assert_eq!(lot.available_slots, available_before);
    assert_counter_consistent(&mut persistence, lot_id);
}

#[test]
fn test_every_operation_emits_an_audit_event() {
    let mut persistence: Persistence = setup();
    let account_id: i64 = seed_account(&mut persistence);
    let lot_id: i64 = seed_lot(&mut persistence, 10, 10);
    let booking_id: i64 = create_confirmed_booking(&mut persistence, account_id, lot_id);
    transition_booking(&mut persistence, booking_id, BookingStatus::Cancelled).unwrap();
    delete_booking(&mut persistence, booking_id).unwrap();

    let events = persistence.list_audit_events(10).unwrap();
    assert_eq!(events.len(), 3);
    assert_eq!(events[0].action_name, "DeleteBooking");
    assert_eq!(events[1].action_name, "UpdateBooking");
    assert_eq!(events[2].action_name, "CreateBooking");
    assert_eq!(events[2].before_snapshot, "total_slots=10,available_slots=10");
    assert_eq!(events[2].after_snapshot, "total_slots=10,available_slots=9");

    let lot_events = persistence.list_audit_events_for_lot(lot_id, 10).unwrap();
    assert_eq!(lot_events.len(), 3);
}
