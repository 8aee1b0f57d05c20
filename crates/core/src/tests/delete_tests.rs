// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::tests::helpers::{
    create_test_actor, create_test_booking, create_test_cause, create_test_lot,
};
use crate::{BookingPlan, CounterOp, LedgerOp, plan_delete};
use parkhub_domain::{Booking, BookingStatus, ParkingLot};

#[test]
fn test_delete_confirmed_compensates_counter() {
    let lot: ParkingLot = create_test_lot(42, 10, 9);
    let booking: Booking = create_test_booking(11, 42, BookingStatus::Confirmed);

    let plan: BookingPlan = plan_delete(
        &booking,
        Some(&lot),
        create_test_actor(),
        create_test_cause(),
    )
    .unwrap();

    assert_eq!(plan.counter_op, CounterOp::ClampedIncrement { lot_id: 42 });
    assert_eq!(plan.ledger_op, LedgerOp::Delete { booking_id: 11 });
    assert_eq!(plan.audit_event.after.available_slots, 10);
}

#[test]
fn test_delete_cancelled_skips_counter() {
    let lot: ParkingLot = create_test_lot(42, 10, 10);
    let booking: Booking = create_test_booking(11, 42, BookingStatus::Cancelled);

    let plan: BookingPlan = plan_delete(
        &booking,
        Some(&lot),
        create_test_actor(),
        create_test_cause(),
    )
    .unwrap();

    assert_eq!(plan.counter_op, CounterOp::None);
}

#[test]
fn test_delete_orphaned_booking_always_succeeds() {
    let booking: Booking = create_test_booking(11, 42, BookingStatus::Confirmed);

    let plan: BookingPlan =
        plan_delete(&booking, None, create_test_actor(), create_test_cause()).unwrap();

    assert_eq!(plan.counter_op, CounterOp::None);
    assert_eq!(plan.ledger_op, LedgerOp::Delete { booking_id: 11 });
    assert_eq!(plan.audit_event.lot_id, None);
}

#[test]
fn test_delete_completed_is_counter_neutral() {
    let lot: ParkingLot = create_test_lot(42, 10, 10);
    let booking: Booking = create_test_booking(11, 42, BookingStatus::Completed);

    let plan: BookingPlan = plan_delete(
        &booking,
        Some(&lot),
        create_test_actor(),
        create_test_cause(),
    )
    .unwrap();

    assert_eq!(plan.counter_op, CounterOp::None);
    assert_eq!(plan.audit_event.before, plan.audit_event.after);
}
