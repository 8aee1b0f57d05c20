// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use parkhub_audit::{Actor, Cause};
use parkhub_domain::{Booking, BookingStatus, ParkingLot};
use rust_decimal::Decimal;

pub fn create_test_actor() -> Actor {
    Actor::new(String::from("driver-7"), String::from("driver"))
}

pub fn create_test_cause() -> Cause {
    Cause::new(String::from("req-456"), String::from("Driver request"))
}

pub fn create_test_lot(lot_id: i64, total: i32, available: i32) -> ParkingLot {
    let mut lot: ParkingLot = ParkingLot::new(
        String::from("Central Garage"),
        String::from("12 Main St"),
        None,
        total,
        Some(available),
        Decimal::new(250, 2),
        String::from("06:00-23:00"),
        Some(3),
        String::from("2026-01-15T08:00:00Z"),
    );
    lot.lot_id = Some(lot_id);
    lot
}

pub fn create_test_booking(booking_id: i64, lot_id: i64, status: BookingStatus) -> Booking {
    Booking::with_id(
        booking_id,
        7,
        lot_id,
        String::from("Central Garage"),
        String::from("2026-03-14"),
        String::from("09:30"),
        status,
        Decimal::new(2000, 2),
        String::from("2026-03-01T12:00:00Z"),
    )
}
