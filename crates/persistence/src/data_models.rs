// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::diesel_schema::{accounts, audit_events, bookings, lots, sessions};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

/// Insertable account row.
#[derive(Insertable)]
#[diesel(table_name = accounts)]
pub struct NewAccount<'a> {
    pub login_name: &'a str,
    pub display_name: &'a str,
    pub password_hash: &'a str,
    pub role: &'a str,
    pub is_disabled: i32,
    pub created_at: &'a str,
}

/// Account data exposed to the API layer.
///
/// The password hash never leaves the persistence/auth boundary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountData {
    pub account_id: i64,
    pub login_name: String,
    pub display_name: String,
    pub password_hash: String,
    pub role: String,
    pub is_disabled: bool,
    pub created_at: String,
    pub last_login_at: Option<String>,
}

/// Insertable session row.
#[derive(Insertable)]
#[diesel(table_name = sessions)]
pub struct NewSession<'a> {
    pub session_token: &'a str,
    pub account_id: i64,
    pub created_at: &'a str,
    pub last_activity_at: &'a str,
    pub expires_at: &'a str,
}

/// Session data exposed to the API layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionData {
    pub session_id: i64,
    pub session_token: String,
    pub account_id: i64,
    pub created_at: String,
    pub last_activity_at: String,
    pub expires_at: String,
}

/// Insertable lot row.
#[derive(Insertable)]
#[diesel(table_name = lots)]
pub struct NewLot<'a> {
    pub name: &'a str,
    pub location: &'a str,
    pub longitude: Option<f64>,
    pub latitude: Option<f64>,
    pub total_slots: i32,
    pub available_slots: i32,
    pub price_per_hour: String,
    pub operating_hours: &'a str,
    pub owner_id: Option<i64>,
    pub created_at: &'a str,
    pub updated_at: &'a str,
}

/// Insertable booking row.
#[derive(Insertable)]
#[diesel(table_name = bookings)]
pub struct NewBooking<'a> {
    pub account_id: i64,
    pub lot_id: i64,
    pub lot_name: &'a str,
    pub date: &'a str,
    pub time: &'a str,
    pub status: &'a str,
    pub price: String,
    pub created_at: &'a str,
}

/// Insertable audit event row.
#[derive(Insertable)]
#[diesel(table_name = audit_events)]
pub struct NewAuditEvent<'a> {
    pub lot_id: Option<i64>,
    pub actor_id: &'a str,
    pub actor_type: &'a str,
    pub cause_id: &'a str,
    pub cause_description: &'a str,
    pub action_name: &'a str,
    pub action_details: Option<&'a str>,
    pub before_snapshot: String,
    pub after_snapshot: String,
    pub created_at: &'a str,
}

/// A persisted audit event, as returned to the API layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditEventRecord {
    pub event_id: i64,
    pub lot_id: Option<i64>,
    pub actor_id: String,
    pub actor_type: String,
    pub cause_id: String,
    pub cause_description: String,
    pub action_name: String,
    pub action_details: Option<String>,
    pub before_snapshot: String,
    pub after_snapshot: String,
    pub created_at: String,
}

/// Aggregate counts for the admin overview.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OverviewData {
    pub lot_count: i64,
    pub total_slots: i64,
    pub available_slots: i64,
    pub confirmed_bookings: i64,
    pub completed_bookings: i64,
    pub cancelled_bookings: i64,
}
