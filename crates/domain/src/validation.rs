// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Field-level validation shared by the coordinator and the API layer.

use crate::error::DomainError;
use rust_decimal::Decimal;
use time::macros::format_description;

/// Validates an ISO 8601 date string (`YYYY-MM-DD`).
///
/// # Errors
///
/// Returns `DomainError::InvalidDate` if the string does not parse.
pub fn validate_date(value: &str) -> Result<(), DomainError> {
    let format = format_description!("[year]-[month]-[day]");
    time::Date::parse(value, &format).map_err(|e| DomainError::InvalidDate {
        value: value.to_string(),
        error: e.to_string(),
    })?;
    Ok(())
}

/// Validates a wall-clock time string (`HH:MM`).
///
/// # Errors
///
/// Returns `DomainError::InvalidTime` if the string does not parse.
pub fn validate_time(value: &str) -> Result<(), DomainError> {
    let format = format_description!("[hour]:[minute]");
    time::Time::parse(value, &format).map_err(|e| DomainError::InvalidTime {
        value: value.to_string(),
        error: e.to_string(),
    })?;
    Ok(())
}

/// Validates that a price is non-negative.
///
/// # Errors
///
/// Returns `DomainError::NegativePrice` otherwise.
pub fn validate_price(price: Decimal) -> Result<(), DomainError> {
    if price.is_sign_negative() {
        return Err(DomainError::NegativePrice {
            price: price.to_string(),
        });
    }
    Ok(())
}

/// Validates the creation-time fields of a booking.
///
/// # Errors
///
/// Returns the first field validation failure.
pub fn validate_booking_fields(date: &str, time: &str, price: Decimal) -> Result<(), DomainError> {
    validate_date(date)?;
    validate_time(time)?;
    validate_price(price)?;
    Ok(())
}

/// Validates the creation-time fields of a lot.
///
/// # Errors
///
/// Returns the first field validation failure.
pub fn validate_lot_fields(
    name: &str,
    location: &str,
    total_slots: i32,
    price_per_hour: Decimal,
) -> Result<(), DomainError> {
    if name.trim().is_empty() {
        return Err(DomainError::InvalidName(String::from(
            "Name cannot be empty",
        )));
    }
    if location.trim().is_empty() {
        return Err(DomainError::InvalidLocation(String::from(
            "Location cannot be empty",
        )));
    }
    if total_slots < 0 {
        return Err(DomainError::InvalidCapacity { total: total_slots });
    }
    validate_price(price_per_hour)?;
    Ok(())
}
