// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::booking::BookingStatus;
use crate::capacity::CapacityError;

/// Errors that can occur during domain validation.
///
/// Not `Eq`: the coordinate variant carries the offending `f64` pair.
#[derive(Debug, Clone, PartialEq)]
pub enum DomainError {
    /// Lot name is empty or invalid.
    InvalidName(String),
    /// Lot location is empty or invalid.
    InvalidLocation(String),
    /// Operating hours string is invalid.
    InvalidOperatingHours(String),
    /// Total slot count is negative.
    InvalidCapacity {
        /// The invalid total slot count.
        total: i32,
    },
    /// Available slot count is outside `0..=total`.
    InvalidAvailableSlots {
        /// The invalid available slot count.
        available: i32,
        /// The total slot count it was validated against.
        total: i32,
    },
    /// Price is negative.
    NegativePrice {
        /// The offending price value, rendered for display.
        price: String,
    },
    /// Geocoordinate is outside valid longitude/latitude ranges.
    InvalidCoordinate {
        /// The longitude value.
        longitude: f64,
        /// The latitude value.
        latitude: f64,
    },
    /// Failed to parse a booking date.
    InvalidDate {
        /// The invalid date string.
        value: String,
        /// The parsing error message.
        error: String,
    },
    /// Failed to parse a booking time.
    InvalidTime {
        /// The invalid time string.
        value: String,
        /// The parsing error message.
        error: String,
    },
    /// Booking status string is not recognized.
    InvalidStatus(String),
    /// The requested status transition is not permitted.
    InvalidStatusTransition {
        /// The persisted status before the transition.
        from: BookingStatus,
        /// The requested target status.
        to: BookingStatus,
    },
    /// A slot counter bound was violated.
    CapacityViolation(CapacityError),
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidName(msg) => write!(f, "Invalid name: {msg}"),
            Self::InvalidLocation(msg) => write!(f, "Invalid location: {msg}"),
            Self::InvalidOperatingHours(msg) => write!(f, "Invalid operating hours: {msg}"),
            Self::InvalidCapacity { total } => {
                write!(f, "Invalid capacity: total slots must be >= 0, got {total}")
            }
            Self::InvalidAvailableSlots { available, total } => {
                write!(
                    f,
                    "Invalid available slots: {available} is outside 0..={total}"
                )
            }
            Self::NegativePrice { price } => {
                write!(f, "Invalid price: {price} is negative")
            }
            Self::InvalidCoordinate {
                longitude,
                latitude,
            } => {
                write!(
                    f,
                    "Invalid coordinate: ({longitude}, {latitude}) is outside valid ranges"
                )
            }
            Self::InvalidDate { value, error } => {
                write!(f, "Failed to parse date '{value}': {error}")
            }
            Self::InvalidTime { value, error } => {
                write!(f, "Failed to parse time '{value}': {error}")
            }
            Self::InvalidStatus(value) => write!(f, "Unknown booking status: {value}"),
            Self::InvalidStatusTransition { from, to } => {
                write!(f, "Status transition {from} -> {to} is not permitted")
            }
            Self::CapacityViolation(err) => write!(f, "Capacity violation: {err}"),
        }
    }
}

impl std::error::Error for DomainError {}

impl From<CapacityError> for DomainError {
    fn from(err: CapacityError) -> Self {
        Self::CapacityViolation(err)
    }
}
