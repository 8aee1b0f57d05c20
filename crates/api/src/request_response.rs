// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API request and response data transfer objects.
//!
//! These DTOs are distinct from domain types and represent the API
//! contract. Update requests enumerate only the fields legally mutable
//! after creation; unknown fields are rejected at deserialization.

use rust_decimal::Decimal;

/// API request to log in.
#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoginRequest {
    /// The account login name.
    pub login_name: String,
    /// The password.
    pub password: String,
}

/// API response for a successful login.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct LoginResponse {
    /// The session token to present as `Authorization: Bearer <token>`.
    pub token: String,
    /// The account's role.
    pub role: String,
    /// A success message.
    pub message: String,
}

/// API response describing the authenticated principal.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct WhoAmIResponse {
    /// The canonical account identifier.
    pub account_id: i64,
    /// The login name.
    pub login_name: String,
    /// The role.
    pub role: String,
}

/// API request to create an account (admin only).
#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CreateAccountRequest {
    /// The login name (unique).
    pub login_name: String,
    /// The display name.
    pub display_name: String,
    /// The password.
    pub password: String,
    /// The password confirmation.
    pub confirmation: String,
    /// The role: "Driver", "Owner", or "Admin".
    pub role: String,
}

/// API response for a successful account creation.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct CreateAccountResponse {
    /// The canonical account identifier.
    pub account_id: i64,
    /// The login name.
    pub login_name: String,
    /// A success message.
    pub message: String,
}

/// Canonical booking projection.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct BookingInfo {
    /// The canonical booking identifier.
    pub booking_id: i64,
    /// The reserving account.
    pub account_id: i64,
    /// The referenced lot.
    pub lot_id: i64,
    /// The lot name, snapshotted at creation.
    pub lot_name: String,
    /// The reservation date (ISO 8601 date string).
    pub date: String,
    /// The reservation time (HH:MM).
    pub time: String,
    /// The lifecycle status.
    pub status: String,
    /// The price, fixed at creation.
    pub price: Decimal,
    /// Creation timestamp (ISO 8601).
    pub created_at: String,
}

/// API request to create a booking.
#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CreateBookingRequest {
    /// The lot to reserve at.
    pub lot_id: i64,
    /// The reservation date (ISO 8601 date string).
    pub date: String,
    /// The reservation time (HH:MM).
    pub time: String,
    /// The price. When absent, the lot's hourly rate is charged.
    pub price: Option<Decimal>,
    /// The initial status. Defaults to "Confirmed".
    pub status: Option<String>,
}

/// API response carrying a booking projection.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct BookingResponse {
    /// The booking projection.
    pub booking: BookingInfo,
    /// The event ID of the persisted audit event.
    pub event_id: i64,
    /// A success message.
    pub message: String,
}

/// API request to update a booking.
///
/// Only the status is mutable after creation.
#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UpdateBookingRequest {
    /// The target status: "Confirmed", "Completed", or "Cancelled".
    pub status: Option<String>,
}

/// API response for a successful booking deletion.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct DeleteBookingResponse {
    /// The deleted booking's identifier.
    pub booking_id: i64,
    /// The event ID of the persisted audit event.
    pub event_id: i64,
    /// A success message.
    pub message: String,
}

/// API response listing bookings.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ListBookingsResponse {
    /// The booking projections, newest first.
    pub bookings: Vec<BookingInfo>,
}

/// API response carrying a booking's QR payload.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct BookingQrResponse {
    /// The booking identifier.
    pub booking_id: i64,
    /// The payload string that was encoded.
    pub payload: String,
    /// The encoded bytes, as produced by the QR encoder.
    pub encoded: Vec<u8>,
}

/// Canonical lot projection.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct LotInfo {
    /// The canonical lot identifier.
    pub lot_id: i64,
    /// Display name.
    pub name: String,
    /// Free-text location description.
    pub location: String,
    /// Longitude, if the lot has a geocoordinate.
    pub longitude: Option<f64>,
    /// Latitude, if the lot has a geocoordinate.
    pub latitude: Option<f64>,
    /// Fixed total capacity.
    pub total_slots: i32,
    /// Live count of free slots.
    pub available_slots: i32,
    /// Price per hour.
    pub price_per_hour: Decimal,
    /// Free-text operating hours.
    pub operating_hours: String,
    /// The owning account, if any.
    pub owner_id: Option<i64>,
    /// Distance from the search point in kilometers.
    ///
    /// Present only in proximity search results.
    pub distance_km: Option<f64>,
}

/// API request to create a lot.
#[derive(Debug, Clone, PartialEq, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CreateLotRequest {
    /// Display name.
    pub name: String,
    /// Free-text location description.
    pub location: String,
    /// Longitude (must be paired with latitude).
    pub longitude: Option<f64>,
    /// Latitude (must be paired with longitude).
    pub latitude: Option<f64>,
    /// Fixed total capacity.
    pub total_slots: i32,
    /// Initial free-slot count. Defaults to `total_slots`.
    pub available_slots: Option<i32>,
    /// Price per hour.
    pub price_per_hour: Decimal,
    /// Free-text operating hours.
    pub operating_hours: String,
}

/// API response carrying a lot projection.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct LotResponse {
    /// The lot projection.
    pub lot: LotInfo,
    /// A success message.
    pub message: String,
}

/// API request to update a lot.
///
/// Only owner-editable fields appear here; the live counter is absent
/// on purpose (capacity changes rederive it).
#[derive(Debug, Clone, PartialEq, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UpdateLotRequest {
    /// New display name.
    pub name: Option<String>,
    /// New location description.
    pub location: Option<String>,
    /// New longitude (must be paired with latitude).
    pub longitude: Option<f64>,
    /// New latitude (must be paired with longitude).
    pub latitude: Option<f64>,
    /// New total capacity.
    pub total_slots: Option<i32>,
    /// New price per hour.
    pub price_per_hour: Option<Decimal>,
    /// New operating hours.
    pub operating_hours: Option<String>,
}

/// API response for a successful lot deletion.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct DeleteLotResponse {
    /// The deleted lot's identifier.
    pub lot_id: i64,
    /// A success message.
    pub message: String,
}

/// Search filter for the lot directory.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct NearFilter {
    /// Latitude of the search point.
    pub latitude: f64,
    /// Longitude of the search point.
    pub longitude: f64,
    /// Search radius in kilometers.
    pub radius_km: f64,
}

/// API response listing lots.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ListLotsResponse {
    /// The lot projections. Nearest first when a proximity filter was
    /// supplied.
    pub lots: Vec<LotInfo>,
}

/// API response for a successful reconciliation.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ReconcileResponse {
    /// The reconciled lot.
    pub lot_id: i64,
    /// The counter value before reconciliation.
    pub previous_available: i32,
    /// The counter value after reconciliation.
    pub corrected_available: i32,
    /// The Confirmed-booking count the counter was derived from.
    pub confirmed: i64,
    /// The event ID of the persisted audit event.
    pub event_id: i64,
}

/// API response for the admin overview.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct OverviewResponse {
    /// Number of lots in the directory.
    pub lot_count: i64,
    /// Sum of all lots' total slots.
    pub total_slots: i64,
    /// Sum of all lots' available slots.
    pub available_slots: i64,
    /// Number of Confirmed bookings.
    pub confirmed_bookings: i64,
    /// Number of Completed bookings.
    pub completed_bookings: i64,
    /// Number of Cancelled bookings.
    pub cancelled_bookings: i64,
}

/// A single audit event in the admin timeline.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct AuditEventInfo {
    /// The event ID.
    pub event_id: i64,
    /// The lot scope, if still known at the time of the operation.
    pub lot_id: Option<i64>,
    /// The actor ID.
    pub actor_id: String,
    /// The actor type.
    pub actor_type: String,
    /// The cause ID.
    pub cause_id: String,
    /// The cause description.
    pub cause_description: String,
    /// The action name.
    pub action_name: String,
    /// Optional action details.
    pub action_details: Option<String>,
    /// Counter state before the operation.
    pub before_snapshot: String,
    /// Counter state after the operation.
    pub after_snapshot: String,
    /// When the event was recorded.
    pub created_at: String,
}

/// API response for the admin audit timeline.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct AuditTimelineResponse {
    /// The audit events, newest first.
    pub events: Vec<AuditEventInfo>,
}

/// Per-row outcome of a CSV lot import or preview.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum CsvRowStatus {
    /// The row parsed and validated.
    Accepted,
    /// The row was rejected; see the message.
    Rejected,
}

/// One row of a CSV preview/import report.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct LotCsvRowResult {
    /// The 1-based data row number (excluding the header).
    pub row: usize,
    /// Whether the row was accepted.
    pub status: CsvRowStatus,
    /// The lot name, if the row parsed far enough to have one.
    pub name: Option<String>,
    /// Rejection reason, if any.
    pub message: Option<String>,
    /// The created lot's ID (import only).
    pub lot_id: Option<i64>,
}

/// API response for a CSV preview or import.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct LotsCsvResponse {
    /// Number of accepted rows.
    pub accepted: usize,
    /// Number of rejected rows.
    pub rejected: usize,
    /// Per-row outcomes, in input order.
    pub rows: Vec<LotCsvRowResult>,
}
