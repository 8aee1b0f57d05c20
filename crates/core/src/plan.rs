// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use parkhub_audit::AuditEvent;
use parkhub_domain::{Booking, BookingStatus};

/// The slot-counter write the persistence layer must execute.
///
/// Every variant maps to a single conditional SQL statement; none of
/// them is a read-modify-write of a previously loaded value. This is
/// what keeps the counter correct under concurrent requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CounterOp {
    /// Decrement `available_slots` by one, only where a free slot
    /// exists. Zero affected rows means the lot filled up concurrently
    /// and the whole operation must fail with a capacity error.
    ConditionalDecrement {
        /// The lot whose counter is adjusted.
        lot_id: i64,
    },
    /// Increment `available_slots` by one, only where it is below
    /// `total_slots`. Zero affected rows is a clamp no-op, never an
    /// error: compensating increments must not fail the operation.
    ClampedIncrement {
        /// The lot whose counter is adjusted.
        lot_id: i64,
    },
    /// Overwrite `available_slots` with a value derived from the
    /// persisted Confirmed-booking count. Used only by reconciliation.
    SetAvailable {
        /// The lot whose counter is overwritten.
        lot_id: i64,
        /// The derived available-slot count.
        available_slots: i32,
    },
    /// No counter change.
    None,
}

/// The booking-ledger write the persistence layer must execute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LedgerOp {
    /// Insert a new booking row.
    Insert(Booking),
    /// Overwrite a booking's status.
    SetStatus {
        /// The booking to update.
        booking_id: i64,
        /// The new status.
        status: BookingStatus,
    },
    /// Remove a booking row.
    Delete {
        /// The booking to remove.
        booking_id: i64,
    },
    /// No ledger change (reconciliation).
    None,
}

/// The complete, not-yet-executed effect of one coordinator operation.
///
/// A plan is executed atomically: ledger write and counter write either
/// both commit or neither does.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingPlan {
    /// The booking-ledger write.
    pub ledger_op: LedgerOp,
    /// The slot-counter write.
    pub counter_op: CounterOp,
    /// The audit event recording this operation.
    pub audit_event: AuditEvent,
}
