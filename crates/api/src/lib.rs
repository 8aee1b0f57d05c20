// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API boundary layer for the ParkHub reservation system.
//!
//! This crate translates transport-level requests into coordinator
//! plans and persistence calls, and translates every lower-layer error
//! into the API contract's error taxonomy. It owns authentication,
//! authorization, the password policy, and the adapter traits for the
//! external payment and QR collaborators.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]
#![allow(clippy::multiple_crate_versions)]

mod auth;
mod csv_import;
mod error;
mod handlers;
mod password_policy;
mod payment;
mod qr;
mod request_response;

#[cfg(test)]
mod tests;

pub use auth::{AuthenticatedPrincipal, AuthenticationService, AuthorizationService, Role};
pub use csv_import::{import_lots_csv, preview_lots_csv};
pub use error::{
    ApiError, AuthError, translate_core_error, translate_domain_error,
    translate_persistence_error,
};
pub use handlers::{
    audit_timeline, booking_qr, create_account, create_booking, create_lot, delete_booking,
    delete_lot, get_booking, get_lot, list_all_bookings, list_lot_bookings, list_my_bookings,
    login, logout, now_iso, overview, reconcile_lot, search_lots, update_booking, update_lot,
    whoami,
};
pub use password_policy::{PasswordPolicy, PasswordPolicyError};
pub use payment::{AlwaysAuthorize, AlwaysDecline, PaymentAuthorizer};
pub use qr::{QrEncoder, TextQr, booking_payload};
pub use request_response::{
    AuditEventInfo, AuditTimelineResponse, BookingInfo, BookingQrResponse, BookingResponse,
    CreateAccountRequest, CreateAccountResponse, CreateBookingRequest, CreateLotRequest,
    CsvRowStatus, DeleteBookingResponse, DeleteLotResponse, ListBookingsResponse,
    ListLotsResponse, LoginRequest, LoginResponse, LotCsvRowResult, LotInfo, LotResponse,
    LotsCsvResponse, NearFilter, OverviewResponse, ReconcileResponse, UpdateBookingRequest,
    UpdateLotRequest, WhoAmIResponse,
};
