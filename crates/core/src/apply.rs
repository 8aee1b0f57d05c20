// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::CoreError;
use crate::plan::{BookingPlan, CounterOp, LedgerOp};
use parkhub_audit::{Action, Actor, AuditEvent, Cause, CounterSnapshot};
use parkhub_domain::{
    Booking, BookingPatch, BookingStatus, DeltaPolicy, ParkingLot, SlotDelta, apply_delta,
    validate_booking_fields,
};
use rust_decimal::Decimal;

/// Plans the creation of a booking against a lot.
///
/// The booking row is inserted with `initial_status`; if that status
/// holds a slot, the plan carries a conditional decrement of the lot's
/// counter. Planning pre-validates capacity against the loaded lot so
/// an obviously-full lot is rejected before any write, but the
/// authoritative check is the conditional SQL at execution time.
///
/// # Arguments
///
/// * `lot` - The lot as currently persisted
/// * `account_id` - The reserving account
/// * `date` - The reservation date (ISO 8601 date string)
/// * `time` - The reservation time (HH:MM)
/// * `price` - The price, fixed at creation
/// * `initial_status` - The initial status (normally `Confirmed`)
/// * `created_at` - Creation timestamp (ISO 8601)
/// * `actor` - The actor performing this action
/// * `cause` - The cause or reason for this action
///
/// # Errors
///
/// Returns an error if:
/// - A booking field fails validation
/// - The lot's counters are out of bounds
/// - The lot has no free slot and the initial status holds one
#[allow(clippy::too_many_arguments)]
pub fn plan_create(
    lot: &ParkingLot,
    account_id: i64,
    date: String,
    time: String,
    price: Decimal,
    initial_status: BookingStatus,
    created_at: String,
    actor: Actor,
    cause: Cause,
) -> Result<BookingPlan, CoreError> {
    let lot_id: i64 = lot.lot_id.ok_or(CoreError::Unpersisted { entity: "lot" })?;

    validate_booking_fields(&date, &time, price)?;
    lot.validate_counters()?;

    let before: CounterSnapshot = CounterSnapshot::new(lot.total_slots, lot.available_slots);

    let (counter_op, after) = if initial_status.holds_slot() {
        let next: i32 = apply_delta(
            lot.available_slots,
            lot.total_slots,
            -1,
            DeltaPolicy::Reject,
        )
        .map_err(parkhub_domain::DomainError::from)?;
        (
            CounterOp::ConditionalDecrement { lot_id },
            CounterSnapshot::new(lot.total_slots, next),
        )
    } else {
        (CounterOp::None, before)
    };

    let booking: Booking = Booking::new(
        account_id,
        lot_id,
        lot.name.clone(),
        date.clone(),
        time.clone(),
        initial_status,
        price,
        created_at,
    );

    let action: Action = Action::new(
        String::from("CreateBooking"),
        Some(format!(
            "Reserved 1 slot at '{}' for {date} {time} ({initial_status})",
            lot.name
        )),
    );
    let audit_event: AuditEvent = AuditEvent::new(actor, cause, action, before, after, Some(lot_id));

    Ok(BookingPlan {
        ledger_op: LedgerOp::Insert(booking),
        counter_op,
        audit_event,
    })
}

/// Plans an update to a booking's mutable fields.
///
/// The counter adjustment is derived from the transition table applied
/// to the status *as persisted* (`booking.status`) versus the patched
/// status. Branching on anything other than the persisted status would
/// double-count under retries.
///
/// `lot` is the referenced lot if it still exists. A releasing
/// transition against a vanished lot skips the counter; a holding
/// transition against a vanished lot is rejected.
///
/// # Errors
///
/// Returns an error if:
/// - The patch is empty
/// - The status transition is not permitted
/// - The transition must hold a slot but the lot is gone or full
pub fn plan_update(
    booking: &Booking,
    lot: Option<&ParkingLot>,
    patch: &BookingPatch,
    actor: Actor,
    cause: Cause,
) -> Result<BookingPlan, CoreError> {
    let booking_id: i64 = booking.booking_id.ok_or(CoreError::Unpersisted {
        entity: "booking",
    })?;

    let Some(new_status) = patch.status else {
        return Err(CoreError::EmptyPatch);
    };

    let delta: SlotDelta = booking.status.transition_to(new_status)?;

    let (counter_op, before, after, scope) = match delta {
        SlotDelta::Decrement => {
            let lot: &ParkingLot = lot.ok_or(CoreError::LotMissing {
                lot_id: booking.lot_id,
            })?;
            lot.validate_counters()?;
            let next: i32 = apply_delta(
                lot.available_slots,
                lot.total_slots,
                -1,
                DeltaPolicy::Reject,
            )
            .map_err(parkhub_domain::DomainError::from)?;
            (
                CounterOp::ConditionalDecrement {
                    lot_id: booking.lot_id,
                },
                CounterSnapshot::new(lot.total_slots, lot.available_slots),
                CounterSnapshot::new(lot.total_slots, next),
                Some(booking.lot_id),
            )
        }
        SlotDelta::Increment => lot.map_or(
            // Releasing against a vanished lot: nothing to compensate.
            (
                CounterOp::None,
                CounterSnapshot::new(0, 0),
                CounterSnapshot::new(0, 0),
                None,
            ),
            |lot| {
                let next: i32 = apply_delta(
                    lot.available_slots,
                    lot.total_slots,
                    1,
                    DeltaPolicy::Clamp,
                )
                .unwrap_or(lot.available_slots);
                (
                    CounterOp::ClampedIncrement {
                        lot_id: booking.lot_id,
                    },
                    CounterSnapshot::new(lot.total_slots, lot.available_slots),
                    CounterSnapshot::new(lot.total_slots, next),
                    Some(booking.lot_id),
                )
            },
        ),
        SlotDelta::Neutral => {
            let snapshot: CounterSnapshot = lot.map_or_else(
                || CounterSnapshot::new(0, 0),
                |lot| CounterSnapshot::new(lot.total_slots, lot.available_slots),
            );
            (
                CounterOp::None,
                snapshot,
                snapshot,
                lot.and_then(|l| l.lot_id),
            )
        }
    };

    let action: Action = Action::new(
        String::from("UpdateBooking"),
        Some(format!("Status {} -> {new_status}", booking.status)),
    );
    let audit_event: AuditEvent = AuditEvent::new(actor, cause, action, before, after, scope);

    Ok(BookingPlan {
        ledger_op: LedgerOp::SetStatus {
            booking_id,
            status: new_status,
        },
        counter_op,
        audit_event,
    })
}

/// Plans the deletion of a booking.
///
/// If the booking still holds a slot and the lot exists, the plan
/// carries a clamped increment as compensation. A vanished lot skips
/// the compensation; deleting an orphaned booking always succeeds.
///
/// # Errors
///
/// Returns an error only if the booking has no persisted ID.
pub fn plan_delete(
    booking: &Booking,
    lot: Option<&ParkingLot>,
    actor: Actor,
    cause: Cause,
) -> Result<BookingPlan, CoreError> {
    let booking_id: i64 = booking.booking_id.ok_or(CoreError::Unpersisted {
        entity: "booking",
    })?;

    let (counter_op, before, after, scope) = match (booking.status.holds_slot(), lot) {
        (true, Some(lot)) => {
            let next: i32 = apply_delta(
                lot.available_slots,
                lot.total_slots,
                1,
                DeltaPolicy::Clamp,
            )
            .unwrap_or(lot.available_slots);
            (
                CounterOp::ClampedIncrement {
                    lot_id: booking.lot_id,
                },
                CounterSnapshot::new(lot.total_slots, lot.available_slots),
                CounterSnapshot::new(lot.total_slots, next),
                Some(booking.lot_id),
            )
        }
        (false, Some(lot)) => {
            let snapshot: CounterSnapshot =
                CounterSnapshot::new(lot.total_slots, lot.available_slots);
            (CounterOp::None, snapshot, snapshot, Some(booking.lot_id))
        }
        (_, None) => (
            CounterOp::None,
            CounterSnapshot::new(0, 0),
            CounterSnapshot::new(0, 0),
            None,
        ),
    };

    let action: Action = Action::new(
        String::from("DeleteBooking"),
        Some(format!(
            "Removed booking {booking_id} ({})",
            booking.status
        )),
    );
    let audit_event: AuditEvent = AuditEvent::new(actor, cause, action, before, after, scope);

    Ok(BookingPlan {
        ledger_op: LedgerOp::Delete { booking_id },
        counter_op,
        audit_event,
    })
}

/// Plans a reconciliation of a lot's counter from its persisted
/// Confirmed-booking count.
///
/// `available_slots` is rederived as `total_slots - confirmed_count`,
/// clamped into `0..=total_slots`. The write is idempotent: replanning
/// from the same inputs produces the same counter value, which makes
/// this the recovery path for any out-of-band corruption.
///
/// # Errors
///
/// Returns an error if the lot has no persisted ID.
pub fn plan_reconcile(
    lot: &ParkingLot,
    confirmed_count: i64,
    actor: Actor,
    cause: Cause,
) -> Result<BookingPlan, CoreError> {
    let lot_id: i64 = lot.lot_id.ok_or(CoreError::Unpersisted { entity: "lot" })?;

    let held: i32 = i32::try_from(confirmed_count).unwrap_or(i32::MAX);
    let derived: i32 = lot
        .total_slots
        .saturating_sub(held)
        .clamp(0, lot.total_slots.max(0));

    let before: CounterSnapshot = CounterSnapshot::new(lot.total_slots, lot.available_slots);
    let after: CounterSnapshot = CounterSnapshot::new(lot.total_slots, derived);

    let action: Action = Action::new(
        String::from("ReconcileLot"),
        Some(format!(
            "available_slots {} -> {derived} ({confirmed_count} confirmed)",
            lot.available_slots
        )),
    );
    let audit_event: AuditEvent = AuditEvent::new(actor, cause, action, before, after, Some(lot_id));

    Ok(BookingPlan {
        ledger_op: LedgerOp::None,
        counter_op: CounterOp::SetAvailable {
            lot_id,
            available_slots: derived,
        },
        audit_event,
    })
}
