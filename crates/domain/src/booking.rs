// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Represents the lifecycle state of a booking.
///
/// Only `Confirmed` holds a slot against the referenced lot. `Completed`
/// is terminal and counter-neutral; `Cancelled` releases the held slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum BookingStatus {
    /// An active reservation holding exactly one slot.
    #[default]
    Confirmed,
    /// The reservation was used. Terminal; no slot held.
    Completed,
    /// The reservation was cancelled. No slot held.
    Cancelled,
}

impl FromStr for BookingStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Confirmed" => Ok(Self::Confirmed),
            "Completed" => Ok(Self::Completed),
            "Cancelled" => Ok(Self::Cancelled),
            _ => Err(DomainError::InvalidStatus(s.to_string())),
        }
    }
}

impl std::fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl BookingStatus {
    /// Converts this status to its string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Confirmed => "Confirmed",
            Self::Completed => "Completed",
            Self::Cancelled => "Cancelled",
        }
    }

    /// Returns whether a booking in this status holds a slot-unit.
    #[must_use]
    pub const fn holds_slot(self) -> bool {
        matches!(self, Self::Confirmed)
    }

    /// Returns whether this status is terminal.
    ///
    /// A terminal status permits no further transitions.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Completed)
    }

    /// Computes the slot counter adjustment for a transition from this
    /// status to `target`.
    ///
    /// The transition table:
    /// - Confirmed → Cancelled: release one slot (`Increment`)
    /// - Cancelled → Confirmed: hold one slot (`Decrement`)
    /// - Confirmed → Completed: counter-neutral
    /// - same → same: counter-neutral (idempotent)
    /// - Completed → anything else, Cancelled → Completed: rejected
    ///
    /// The caller must pass the status as persisted *before* the update;
    /// branching on anything else double-counts.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidStatusTransition` for transitions the
    /// table does not permit.
    pub const fn transition_to(self, target: Self) -> Result<SlotDelta, DomainError> {
        match (self, target) {
            (Self::Confirmed, Self::Confirmed)
            | (Self::Completed, Self::Completed)
            | (Self::Cancelled, Self::Cancelled)
            | (Self::Confirmed, Self::Completed) => Ok(SlotDelta::Neutral),
            (Self::Confirmed, Self::Cancelled) => Ok(SlotDelta::Increment),
            (Self::Cancelled, Self::Confirmed) => Ok(SlotDelta::Decrement),
            (Self::Completed, _) | (Self::Cancelled, Self::Completed) => {
                Err(DomainError::InvalidStatusTransition {
                    from: self,
                    to: target,
                })
            }
        }
    }
}

/// The slot counter adjustment implied by a booking operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotDelta {
    /// Hold one slot: the counter decreases by one.
    Decrement,
    /// Release one slot: the counter increases by one.
    Increment,
    /// No counter change.
    Neutral,
}

impl SlotDelta {
    /// Returns the signed integer adjustment.
    #[must_use]
    pub const fn as_i32(self) -> i32 {
        match self {
            Self::Decrement => -1,
            Self::Increment => 1,
            Self::Neutral => 0,
        }
    }
}

/// A reservation of one slot-unit at a lot for a date/time window.
///
/// `lot_id`, `date`, `time`, and `price` are immutable after creation;
/// only `status` may change, via [`BookingPatch`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Booking {
    /// Canonical identifier assigned by the database.
    /// `None` indicates the booking has not been persisted yet.
    pub booking_id: Option<i64>,
    /// The reserving account.
    pub account_id: i64,
    /// The referenced lot.
    pub lot_id: i64,
    /// The lot name, snapshotted at creation time.
    pub lot_name: String,
    /// The reservation date (ISO 8601 date string).
    pub date: String,
    /// The reservation time (HH:MM).
    pub time: String,
    /// The lifecycle status.
    pub status: BookingStatus,
    /// The price, fixed at creation.
    pub price: Decimal,
    /// Creation timestamp (ISO 8601).
    pub created_at: String,
}

impl Booking {
    /// Creates a new `Booking` without a persisted ID.
    ///
    /// The ID will be assigned by the persistence layer upon first save.
    #[must_use]
    #[allow(clippy::too_many_arguments)]
    pub const fn new(
        account_id: i64,
        lot_id: i64,
        lot_name: String,
        date: String,
        time: String,
        status: BookingStatus,
        price: Decimal,
        created_at: String,
    ) -> Self {
        Self {
            booking_id: None,
            account_id,
            lot_id,
            lot_name,
            date,
            time,
            status,
            price,
            created_at,
        }
    }

    /// Creates a `Booking` with an existing persisted ID.
    #[must_use]
    #[allow(clippy::too_many_arguments)]
    pub const fn with_id(
        booking_id: i64,
        account_id: i64,
        lot_id: i64,
        lot_name: String,
        date: String,
        time: String,
        status: BookingStatus,
        price: Decimal,
        created_at: String,
    ) -> Self {
        Self {
            booking_id: Some(booking_id),
            account_id,
            lot_id,
            lot_name,
            date,
            time,
            status,
            price,
            created_at,
        }
    }
}

/// Fields of a booking that are legally mutable after creation.
///
/// The update surface is deliberately narrow: everything else on a
/// booking is a creation-time snapshot. Unknown fields in an update
/// payload are rejected at the API boundary rather than merged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BookingPatch {
    /// The target status, if a transition is requested.
    pub status: Option<BookingStatus>,
}

impl BookingPatch {
    /// Returns whether the patch carries no changes.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.status.is_none()
    }
}
