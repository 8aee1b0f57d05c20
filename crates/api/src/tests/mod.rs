// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::unwrap_used, clippy::expect_used)]

mod payment_tests;

use crate::auth::{AuthenticatedPrincipal, Role};
use crate::request_response::{CreateBookingRequest, CreateLotRequest};
use crate::{AlwaysAuthorize, BookingResponse, LotResponse, create_booking, create_lot};
use parkhub_audit::Cause;
use parkhub_persistence::Persistence;
use rust_decimal::Decimal;

pub fn setup() -> Persistence {
    Persistence::new_in_memory().expect("in-memory database")
}

pub fn create_test_cause() -> Cause {
    Cause::new(String::from("req-1"), String::from("Test request"))
}

/// Seeds an account with the given role and returns its principal.
pub fn seed_principal(
    persistence: &mut Persistence,
    login_name: &str,
    role: Role,
) -> AuthenticatedPrincipal {
    let account_id: i64 = persistence
        .create_account(
            login_name,
            "Test Account",
            "correct horse battery staple",
            role.as_str(),
            "2026-03-01T12:00:00Z",
        )
        .expect("seeded account");
    AuthenticatedPrincipal::new(account_id, login_name.to_string(), role)
}

/// Creates a lot through the API as the given principal.
pub fn seed_lot_via_api(
    persistence: &mut Persistence,
    principal: &AuthenticatedPrincipal,
    total_slots: i32,
) -> i64 {
    let request: CreateLotRequest = CreateLotRequest {
        name: String::from("Central Garage"),
        location: String::from("12 Main St"),
        longitude: Some(-106.65),
        latitude: Some(35.08),
        total_slots,
        available_slots: None,
        price_per_hour: Decimal::new(250, 2),
        operating_hours: String::from("06:00-23:00"),
    };
    let response: LotResponse = create_lot(persistence, &request, principal).expect("seeded lot");
    response.lot.lot_id
}

/// Creates a Confirmed booking through the API and returns the response.
pub fn book_via_api(
    persistence: &mut Persistence,
    principal: &AuthenticatedPrincipal,
    lot_id: i64,
) -> Result<BookingResponse, crate::ApiError> {
    let request: CreateBookingRequest = CreateBookingRequest {
        lot_id,
        date: String::from("2026-03-14"),
        time: String::from("09:30"),
        price: None,
        status: None,
    };
    create_booking(
        persistence,
        &request,
        principal,
        &AlwaysAuthorize,
        create_test_cause(),
    )
}
