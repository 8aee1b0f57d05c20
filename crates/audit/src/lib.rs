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
    clippy::all
)]

/// Represents the entity performing an action.
///
/// An actor is any identifiable entity that initiates a state change.
/// This is normally an authenticated account, but system processes
/// (e.g. reconciliation) also act.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Actor {
    /// The unique identifier for this actor (login name).
    pub id: String,
    /// The type of actor (e.g., "driver", "owner", "admin", "system").
    pub actor_type: String,
}

impl Actor {
    /// Creates a new Actor.
    ///
    /// # Arguments
    ///
    /// * `id` - The unique identifier for this actor
    /// * `actor_type` - The type of actor
    #[must_use]
    pub const fn new(id: String, actor_type: String) -> Self {
        Self { id, actor_type }
    }
}

/// Represents the reason or trigger for an action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cause {
    /// A unique identifier for this cause (e.g., request ID).
    pub id: String,
    /// A description of the cause.
    pub description: String,
}

impl Cause {
    /// Creates a new Cause.
    ///
    /// # Arguments
    ///
    /// * `id` - The unique identifier for this cause
    /// * `description` - A description of what triggered this action
    #[must_use]
    pub const fn new(id: String, description: String) -> Self {
        Self { id, description }
    }
}

/// Represents the specific action performed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Action {
    /// The name of the action (e.g., "`CreateBooking`", "`CancelBooking`").
    pub name: String,
    /// Optional additional details about the action.
    pub details: Option<String>,
}

impl Action {
    /// Creates a new Action.
    ///
    /// # Arguments
    ///
    /// * `name` - The name of the action
    /// * `details` - Optional additional details
    #[must_use]
    pub const fn new(name: String, details: Option<String>) -> Self {
        Self { name, details }
    }
}

/// A snapshot of a lot's slot counter at a point in time.
///
/// Counter snapshots bracket every coordinator operation so the audit
/// trail shows exactly how each operation moved the counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CounterSnapshot {
    /// The lot's total capacity.
    pub total_slots: i32,
    /// The lot's available slot count.
    pub available_slots: i32,
}

impl CounterSnapshot {
    /// Creates a new `CounterSnapshot`.
    #[must_use]
    pub const fn new(total_slots: i32, available_slots: i32) -> Self {
        Self {
            total_slots,
            available_slots,
        }
    }

    /// Renders the snapshot for storage.
    #[must_use]
    pub fn render(&self) -> String {
        format!(
            "total_slots={},available_slots={}",
            self.total_slots, self.available_slots
        )
    }
}

/// An immutable audit event recording one coordinator operation.
///
/// Every successful booking or lot mutation must produce exactly one
/// audit event. Events capture:
/// - Who performed the action (actor)
/// - Why it was performed (cause)
/// - What action was performed (action)
/// - The lot's counter before and after the operation
/// - The lot the operation was scoped to, if still known
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditEvent {
    /// The actor who initiated this state change.
    pub actor: Actor,
    /// The cause or reason for this state change.
    pub cause: Cause,
    /// The action that was performed.
    pub action: Action,
    /// The counter state before the operation.
    pub before: CounterSnapshot,
    /// The counter state after the operation.
    pub after: CounterSnapshot,
    /// The lot this operation was scoped to.
    ///
    /// `None` for operations against a lot that no longer exists
    /// (deleting an orphaned booking).
    pub lot_id: Option<i64>,
}

impl AuditEvent {
    /// Creates a new `AuditEvent`.
    ///
    /// Once created, an audit event is immutable.
    ///
    /// # Arguments
    ///
    /// * `actor` - The actor who initiated the change
    /// * `cause` - The reason for the change
    /// * `action` - The action that was performed
    /// * `before` - The counter state before the operation
    /// * `after` - The counter state after the operation
    /// * `lot_id` - The lot scope, if known
    #[must_use]
    pub const fn new(
        actor: Actor,
        cause: Cause,
        action: Action,
        before: CounterSnapshot,
        after: CounterSnapshot,
        lot_id: Option<i64>,
    ) -> Self {
        Self {
            actor,
            cause,
            action,
            before,
            after,
            lot_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_actor_creation_requires_all_fields() {
        let actor: Actor = Actor::new(String::from("driver-7"), String::from("driver"));

        assert_eq!(actor.id, "driver-7");
        assert_eq!(actor.actor_type, "driver");
    }

    #[test]
    fn test_cause_creation_requires_all_fields() {
        let cause: Cause = Cause::new(String::from("req-456"), String::from("Driver request"));

        assert_eq!(cause.id, "req-456");
        assert_eq!(cause.description, "Driver request");
    }

    #[test]
    fn test_action_creation_with_details() {
        let action: Action = Action::new(
            String::from("CreateBooking"),
            Some(String::from("Booked lot 42")),
        );

        assert_eq!(action.name, "CreateBooking");
        assert_eq!(action.details, Some(String::from("Booked lot 42")));
    }

    #[test]
    fn test_counter_snapshot_render() {
        let snapshot: CounterSnapshot = CounterSnapshot::new(10, 9);

        assert_eq!(snapshot.render(), "total_slots=10,available_slots=9");
    }

    #[test]
    fn test_audit_event_creation_requires_all_fields() {
        let actor: Actor = Actor::new(String::from("driver-7"), String::from("driver"));
        let cause: Cause = Cause::new(String::from("req-456"), String::from("Driver request"));
        let action: Action = Action::new(String::from("CreateBooking"), None);
        let before: CounterSnapshot = CounterSnapshot::new(10, 10);
        let after: CounterSnapshot = CounterSnapshot::new(10, 9);

        let event: AuditEvent = AuditEvent::new(
            actor.clone(),
            cause.clone(),
            action.clone(),
            before,
            after,
            Some(42),
        );

        assert_eq!(event.actor, actor);
        assert_eq!(event.cause, cause);
        assert_eq!(event.action, action);
        assert_eq!(event.before, before);
        assert_eq!(event.after, after);
        assert_eq!(event.lot_id, Some(42));
    }

    #[test]
    fn test_orphaned_scope_is_representable() {
        let event: AuditEvent = AuditEvent::new(
            Actor::new(String::from("driver-7"), String::from("driver")),
            Cause::new(String::from("req-1"), String::from("Cleanup")),
            Action::new(String::from("DeleteBooking"), None),
            CounterSnapshot::new(0, 0),
            CounterSnapshot::new(0, 0),
            None,
        );

        assert_eq!(event.lot_id, None);
    }
}
