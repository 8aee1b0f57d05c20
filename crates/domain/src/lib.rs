// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod booking;
mod capacity;
mod error;
mod geo;
mod lot;
mod validation;

#[cfg(test)]
mod tests;

pub use booking::{Booking, BookingPatch, BookingStatus, SlotDelta};
pub use capacity::{CapacityError, DeltaPolicy, apply_delta};
pub use error::DomainError;
pub use geo::{GeoPoint, distance_km};
pub use lot::{LotPatch, ParkingLot};
pub use validation::{
    validate_booking_fields, validate_date, validate_lot_fields, validate_price, validate_time,
};
