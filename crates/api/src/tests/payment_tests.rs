// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::auth::Role;
use crate::request_response::CreateBookingRequest;
use crate::tests::{create_test_cause, seed_lot_via_api, seed_principal, setup};
use crate::{AlwaysDecline, ApiError, create_booking, get_lot, list_my_bookings};
use parkhub_persistence::Persistence;

#[test]
fn test_declined_payment_fails_creation_with_no_side_effects() {
    let mut persistence: Persistence = setup();
    let owner = seed_principal(&mut persistence, "owner1", Role::Owner);
    let driver = seed_principal(&mut persistence, "driver1", Role::Driver);
    let lot_id: i64 = seed_lot_via_api(&mut persistence, &owner, 10);

    let request: CreateBookingRequest = CreateBookingRequest {
        lot_id,
        date: String::from("2026-03-14"),
        time: String::from("09:30"),
        price: None,
        status: None,
    };
    let result = create_booking(
        &mut persistence,
        &request,
        &driver,
        &AlwaysDecline,
        create_test_cause(),
    );

    assert!(matches!(result, Err(ApiError::PaymentDeclined { .. })));

    // Nothing was written: no booking, no counter change.
    assert!(list_my_bookings(&mut persistence, &driver)
        .unwrap()
        .bookings
        .is_empty());
    assert_eq!(get_lot(&mut persistence, lot_id).unwrap().available_slots, 10);
}
