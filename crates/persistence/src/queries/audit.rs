// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Audit trail queries.

use crate::data_models::AuditEventRecord;
use crate::diesel_schema::audit_events;
use crate::error::PersistenceError;
use diesel::prelude::*;
use diesel::{MysqlConnection, SqliteConnection};

/// Diesel Queryable struct for audit event rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = audit_events)]
struct AuditEventRow {
    event_id: i64,
    lot_id: Option<i64>,
    actor_id: String,
    actor_type: String,
    cause_id: String,
    cause_description: String,
    action_name: String,
    action_details: Option<String>,
    before_snapshot: String,
    after_snapshot: String,
    created_at: String,
}

impl From<AuditEventRow> for AuditEventRecord {
    fn from(row: AuditEventRow) -> Self {
        Self {
            event_id: row.event_id,
            lot_id: row.lot_id,
            actor_id: row.actor_id,
            actor_type: row.actor_type,
            cause_id: row.cause_id,
            cause_description: row.cause_description,
            action_name: row.action_name,
            action_details: row.action_details,
            before_snapshot: row.before_snapshot,
            after_snapshot: row.after_snapshot,
            created_at: row.created_at,
        }
    }
}

backend_fn! {

/// Retrieves the most recent audit events, newest first.
pub fn recent_events(
    conn: &mut _,
    limit: i64,
) -> Result<Vec<AuditEventRecord>, PersistenceError> {
    let rows: Vec<AuditEventRow> = audit_events::table
        .order(audit_events::event_id.desc())
        .limit(limit)
        .select(AuditEventRow::as_select())
        .load(conn)?;

    Ok(rows.into_iter().map(AuditEventRecord::from).collect())
}

}

backend_fn! {

/// Retrieves the audit timeline for a single lot, newest first.
pub fn events_for_lot(
    conn: &mut _,
    lot_id: i64,
    limit: i64,
) -> Result<Vec<AuditEventRecord>, PersistenceError> {
    let rows: Vec<AuditEventRow> = audit_events::table
        .filter(audit_events::lot_id.eq(lot_id))
        .order(audit_events::event_id.desc())
        .limit(limit)
        .select(AuditEventRow::as_select())
        .load(conn)?;

    Ok(rows.into_iter().map(AuditEventRecord::from).collect())
}

}
