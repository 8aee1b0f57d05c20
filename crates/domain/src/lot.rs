// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use crate::geo::GeoPoint;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A parking facility with a fixed total capacity and a live
/// available-slot count.
///
/// The invariant `0 <= available_slots <= total_slots` holds at all
/// times. `available_slots` is a stored aggregate over the set of
/// Confirmed bookings against this lot, maintained incrementally by the
/// booking coordinator; it is never recomputed on read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParkingLot {
    /// Canonical identifier assigned by the database.
    /// `None` indicates the lot has not been persisted yet.
    pub lot_id: Option<i64>,
    /// Display name.
    pub name: String,
    /// Free-text location description.
    pub location: String,
    /// Optional geocoordinate used for nearest-first search.
    pub coordinate: Option<GeoPoint>,
    /// Fixed total capacity.
    pub total_slots: i32,
    /// Live count of free slots.
    pub available_slots: i32,
    /// Price per hour.
    pub price_per_hour: Decimal,
    /// Free-text operating hours (e.g. "06:00-23:00").
    pub operating_hours: String,
    /// The owning principal, if any.
    pub owner_id: Option<i64>,
    /// Creation timestamp (ISO 8601).
    pub created_at: String,
    /// Last update timestamp (ISO 8601).
    pub updated_at: String,
}

impl ParkingLot {
    /// Creates a new `ParkingLot` without a persisted ID.
    ///
    /// When `available_slots` is `None` the lot starts fully free.
    #[must_use]
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        name: String,
        location: String,
        coordinate: Option<GeoPoint>,
        total_slots: i32,
        available_slots: Option<i32>,
        price_per_hour: Decimal,
        operating_hours: String,
        owner_id: Option<i64>,
        created_at: String,
    ) -> Self {
        Self {
            lot_id: None,
            name,
            location,
            coordinate,
            total_slots,
            available_slots: available_slots.unwrap_or(total_slots),
            price_per_hour,
            operating_hours,
            owner_id,
            updated_at: created_at.clone(),
            created_at,
        }
    }

    /// Returns the number of slot-units currently held by Confirmed
    /// bookings.
    #[must_use]
    pub const fn held_slots(&self) -> i32 {
        self.total_slots - self.available_slots
    }

    /// Validates the counter invariant for this lot.
    ///
    /// # Errors
    ///
    /// Returns an error if `total_slots` is negative or
    /// `available_slots` is outside `0..=total_slots`.
    pub const fn validate_counters(&self) -> Result<(), DomainError> {
        if self.total_slots < 0 {
            return Err(DomainError::InvalidCapacity {
                total: self.total_slots,
            });
        }
        if self.available_slots < 0 || self.available_slots > self.total_slots {
            return Err(DomainError::InvalidAvailableSlots {
                available: self.available_slots,
                total: self.total_slots,
            });
        }
        Ok(())
    }
}

/// Fields of a lot that owners may change after creation.
///
/// `available_slots` is deliberately absent: the live counter is owned
/// by the booking coordinator. A capacity change re-derives it from the
/// held-slot count instead.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LotPatch {
    /// New display name.
    pub name: Option<String>,
    /// New location description.
    pub location: Option<String>,
    /// New geocoordinate.
    pub coordinate: Option<GeoPoint>,
    /// New total capacity.
    pub total_slots: Option<i32>,
    /// New price per hour.
    pub price_per_hour: Option<Decimal>,
    /// New operating hours.
    pub operating_hours: Option<String>,
}

impl LotPatch {
    /// Returns whether the patch carries no changes.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.location.is_none()
            && self.coordinate.is_none()
            && self.total_slots.is_none()
            && self.price_per_hour.is_none()
            && self.operating_hours.is_none()
    }

    /// Applies the patch to a lot in place.
    ///
    /// A capacity change preserves the held-slot count where possible:
    /// `available_slots` becomes `new_total - held` clamped into
    /// `0..=new_total`. Shrinking a lot below its held count therefore
    /// leaves `available_slots` at zero rather than driving it negative.
    ///
    /// # Errors
    ///
    /// Returns an error if a patched field fails validation.
    pub fn apply(&self, lot: &mut ParkingLot) -> Result<(), DomainError> {
        if let Some(name) = &self.name {
            if name.trim().is_empty() {
                return Err(DomainError::InvalidName(String::from(
                    "Name cannot be empty",
                )));
            }
            lot.name.clone_from(name);
        }
        if let Some(location) = &self.location {
            if location.trim().is_empty() {
                return Err(DomainError::InvalidLocation(String::from(
                    "Location cannot be empty",
                )));
            }
            lot.location.clone_from(location);
        }
        if let Some(coordinate) = self.coordinate {
            // Re-validate: the patch may have been built from raw parts.
            lot.coordinate = Some(GeoPoint::new(coordinate.longitude, coordinate.latitude)?);
        }
        if let Some(price) = self.price_per_hour {
            if price.is_sign_negative() {
                return Err(DomainError::NegativePrice {
                    price: price.to_string(),
                });
            }
            lot.price_per_hour = price;
        }
        if let Some(hours) = &self.operating_hours {
            if hours.trim().is_empty() {
                return Err(DomainError::InvalidOperatingHours(String::from(
                    "Operating hours cannot be empty",
                )));
            }
            lot.operating_hours.clone_from(hours);
        }
        if let Some(new_total) = self.total_slots {
            if new_total < 0 {
                return Err(DomainError::InvalidCapacity { total: new_total });
            }
            let held: i32 = lot.held_slots();
            lot.total_slots = new_total;
            lot.available_slots = (new_total - held).clamp(0, new_total);
        }
        lot.validate_counters()
    }
}
