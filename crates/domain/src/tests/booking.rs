// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{Booking, BookingPatch, BookingStatus, DomainError, SlotDelta};
use rust_decimal::Decimal;
use std::str::FromStr;

#[test]
fn test_status_round_trips_through_strings() {
    for status in [
        BookingStatus::Confirmed,
        BookingStatus::Completed,
        BookingStatus::Cancelled,
    ] {
        let parsed: BookingStatus = BookingStatus::from_str(status.as_str()).unwrap();
        assert_eq!(parsed, status);
    }
}

#[test]
fn test_unknown_status_string_is_rejected() {
    let result: Result<BookingStatus, DomainError> = BookingStatus::from_str("Pending");
    assert_eq!(
        result,
        Err(DomainError::InvalidStatus(String::from("Pending")))
    );
}

#[test]
fn test_only_confirmed_holds_a_slot() {
    assert!(BookingStatus::Confirmed.holds_slot());
    assert!(!BookingStatus::Completed.holds_slot());
    assert!(!BookingStatus::Cancelled.holds_slot());
}

#[test]
fn test_cancel_releases_one_slot() {
    let delta: SlotDelta = BookingStatus::Confirmed
        .transition_to(BookingStatus::Cancelled)
        .unwrap();
    assert_eq!(delta, SlotDelta::Increment);
    assert_eq!(delta.as_i32(), 1);
}

#[test]
fn test_reconfirm_holds_one_slot() {
    let delta: SlotDelta = BookingStatus::Cancelled
        .transition_to(BookingStatus::Confirmed)
        .unwrap();
    assert_eq!(delta, SlotDelta::Decrement);
    assert_eq!(delta.as_i32(), -1);
}

#[test]
fn test_completion_is_counter_neutral() {
    let delta: SlotDelta = BookingStatus::Confirmed
        .transition_to(BookingStatus::Completed)
        .unwrap();
    assert_eq!(delta, SlotDelta::Neutral);
}

#[test]
fn test_same_status_transition_is_neutral() {
    // Re-cancelling a cancelled booking must not release a second slot.
    for status in [
        BookingStatus::Confirmed,
        BookingStatus::Completed,
        BookingStatus::Cancelled,
    ] {
        assert_eq!(status.transition_to(status).unwrap(), SlotDelta::Neutral);
    }
}

#[test]
fn test_completed_is_terminal() {
    assert!(BookingStatus::Completed.is_terminal());
    assert_eq!(
        BookingStatus::Completed.transition_to(BookingStatus::Confirmed),
        Err(DomainError::InvalidStatusTransition {
            from: BookingStatus::Completed,
            to: BookingStatus::Confirmed,
        })
    );
    assert_eq!(
        BookingStatus::Completed.transition_to(BookingStatus::Cancelled),
        Err(DomainError::InvalidStatusTransition {
            from: BookingStatus::Completed,
            to: BookingStatus::Cancelled,
        })
    );
}

#[test]
fn test_cancelled_cannot_complete() {
    assert_eq!(
        BookingStatus::Cancelled.transition_to(BookingStatus::Completed),
        Err(DomainError::InvalidStatusTransition {
            from: BookingStatus::Cancelled,
            to: BookingStatus::Completed,
        })
    );
}

#[test]
fn test_booking_creation_without_id() {
    let booking: Booking = Booking::new(
        7,
        42,
        String::from("Central Garage"),
        String::from("2026-03-14"),
        String::from("09:30"),
        BookingStatus::Confirmed,
        Decimal::new(2000, 2),
        String::from("2026-03-01T12:00:00Z"),
    );

    assert_eq!(booking.booking_id, None);
    assert_eq!(booking.lot_name, "Central Garage");
    assert_eq!(booking.price, Decimal::new(2000, 2));
}

#[test]
fn test_booking_with_id_preserves_fields() {
    let booking: Booking = Booking::with_id(
        11,
        7,
        42,
        String::from("Central Garage"),
        String::from("2026-03-14"),
        String::from("09:30"),
        BookingStatus::Cancelled,
        Decimal::new(500, 2),
        String::from("2026-03-01T12:00:00Z"),
    );

    assert_eq!(booking.booking_id, Some(11));
    assert_eq!(booking.status, BookingStatus::Cancelled);
}

#[test]
fn test_empty_patch_reports_empty() {
    assert!(BookingPatch::default().is_empty());
    assert!(
        !BookingPatch {
            status: Some(BookingStatus::Cancelled),
        }
        .is_empty()
    );
}
