// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Booking plan execution.
//!
//! A [`BookingPlan`] bundles one booking-ledger write, one slot-counter
//! write, and one audit event. This module executes all three inside a
//! single database transaction: either everything commits or nothing
//! does, so callers never observe a booking without its counter
//! adjustment.
//!
//! The counter writes are single conditional statements. Two concurrent
//! plans racing for the last free slot serialize in the database: one
//! decrement matches a row, the other matches zero rows and the whole
//! transaction rolls back with `CapacityExceeded`.

use crate::backend::PersistenceBackend;
use crate::data_models::{NewAuditEvent, NewBooking};
use crate::diesel_schema::{audit_events, bookings, lots};
use crate::error::PersistenceError;
use diesel::Connection;
use diesel::prelude::*;
use diesel::{MysqlConnection, SqliteConnection};
use parkhub::{BookingPlan, CounterOp, LedgerOp};

/// The result of executing a booking plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlanOutcome {
    /// The booking the plan touched, if any. For inserts this is the
    /// freshly assigned row ID.
    pub booking_id: Option<i64>,
    /// The row ID of the persisted audit event.
    pub event_id: i64,
}

backend_fn! {

/// Execute a booking plan atomically.
///
/// # Errors
///
/// Returns an error if:
/// - The ledger write targets a booking that no longer exists
/// - A conditional decrement matches zero rows (`CapacityExceeded`,
///   or `NotFound` if the lot itself vanished)
/// - Any statement fails
///
/// On error the transaction rolls back completely.
pub fn execute_plan(
    conn: &mut _,
    plan: &BookingPlan,
    executed_at: &str,
) -> Result<PlanOutcome, PersistenceError> {
    conn.transaction::<PlanOutcome, PersistenceError, _>(|conn| {
        let booking_id: Option<i64> = match &plan.ledger_op {
            LedgerOp::Insert(booking) => {
                let record: NewBooking<'_> = NewBooking {
                    account_id: booking.account_id,
                    lot_id: booking.lot_id,
                    lot_name: &booking.lot_name,
                    date: &booking.date,
                    time: &booking.time,
                    status: booking.status.as_str(),
                    price: booking.price.to_string(),
                    created_at: &booking.created_at,
                };
                diesel::insert_into(bookings::table)
                    .values(&record)
                    .execute(conn)?;
                Some(conn.get_last_insert_rowid()?)
            }
            LedgerOp::SetStatus { booking_id, status } => {
                let rows: usize = diesel::update(
                    bookings::table.filter(bookings::booking_id.eq(*booking_id)),
                )
                .set(bookings::status.eq(status.as_str()))
                .execute(conn)?;
                if rows == 0 {
                    return Err(PersistenceError::NotFound(format!(
                        "Booking {booking_id} not found"
                    )));
                }
                Some(*booking_id)
            }
            LedgerOp::Delete { booking_id } => {
                let rows: usize = diesel::delete(
                    bookings::table.filter(bookings::booking_id.eq(*booking_id)),
                )
                .execute(conn)?;
                if rows == 0 {
                    return Err(PersistenceError::NotFound(format!(
                        "Booking {booking_id} not found"
                    )));
                }
                Some(*booking_id)
            }
            LedgerOp::None => None,
        };

        match plan.counter_op {
            CounterOp::ConditionalDecrement { lot_id } => {
                let rows: usize = diesel::update(
                    lots::table
                        .filter(lots::lot_id.eq(lot_id))
                        .filter(lots::available_slots.gt(0)),
                )
                .set((
                    lots::available_slots.eq(lots::available_slots - 1),
                    lots::updated_at.eq(executed_at),
                ))
                .execute(conn)?;
                if rows == 0 {
                    // Distinguish a vanished lot from an exhausted one.
                    let exists: i64 = lots::table
                        .filter(lots::lot_id.eq(lot_id))
                        .count()
                        .get_result(conn)?;
                    return Err(if exists == 0 {
                        PersistenceError::NotFound(format!("Lot {lot_id} not found"))
                    } else {
                        PersistenceError::CapacityExceeded { lot_id }
                    });
                }
            }
            CounterOp::ClampedIncrement { lot_id } => {
                // Zero affected rows is the clamp no-op: the counter is
                // already at total, or the lot vanished. Compensating
                // increments never fail the operation.
                diesel::update(
                    lots::table
                        .filter(lots::lot_id.eq(lot_id))
                        .filter(lots::available_slots.lt(lots::total_slots)),
                )
                .set((
                    lots::available_slots.eq(lots::available_slots + 1),
                    lots::updated_at.eq(executed_at),
                ))
                .execute(conn)?;
            }
            CounterOp::SetAvailable {
                lot_id,
                available_slots,
            } => {
                let rows: usize = diesel::update(lots::table.filter(lots::lot_id.eq(lot_id)))
                    .set((
                        lots::available_slots.eq(available_slots),
                        lots::updated_at.eq(executed_at),
                    ))
                    .execute(conn)?;
                if rows == 0 {
                    return Err(PersistenceError::NotFound(format!(
                        "Lot {lot_id} not found"
                    )));
                }
            }
            CounterOp::None => {}
        }

        let event = &plan.audit_event;
        let record: NewAuditEvent<'_> = NewAuditEvent {
            lot_id: event.lot_id,
            actor_id: &event.actor.id,
            actor_type: &event.actor.actor_type,
            cause_id: &event.cause.id,
            cause_description: &event.cause.description,
            action_name: &event.action.name,
            action_details: event.action.details.as_deref(),
            before_snapshot: event.before.render(),
            after_snapshot: event.after.render(),
            created_at: executed_at,
        };
        diesel::insert_into(audit_events::table)
            .values(&record)
            .execute(conn)?;
        let event_id: i64 = conn.get_last_insert_rowid()?;

        Ok(PlanOutcome {
            booking_id,
            event_id,
        })
    })
}

}
