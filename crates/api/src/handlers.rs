// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API handler functions for state-changing and read-only operations.
//!
//! Every state-changing booking handler follows the same shape:
//! authorize, load the currently-persisted booking/lot, let the core
//! plan the transition from the *persisted* state, then hand the plan
//! to persistence for atomic execution. Handlers never touch the slot
//! counter themselves.

use std::str::FromStr;

use parkhub::{plan_create, plan_delete, plan_reconcile, plan_update};
use parkhub_audit::Cause;
use parkhub_domain::{
    Booking, BookingPatch, BookingStatus, GeoPoint, LotPatch, ParkingLot, distance_km,
    validate_lot_fields,
};
use parkhub_persistence::{OverviewData, Persistence, PlanOutcome};
use rust_decimal::Decimal;
use tracing::info;

use crate::auth::{AuthenticatedPrincipal, AuthenticationService, AuthorizationService, Role};
use crate::error::{
    ApiError, translate_core_error, translate_domain_error, translate_persistence_error,
};
use crate::password_policy::PasswordPolicy;
use crate::payment::PaymentAuthorizer;
use crate::qr::{QrEncoder, booking_payload};
use crate::request_response::{
    AuditEventInfo, AuditTimelineResponse, BookingInfo, BookingQrResponse, BookingResponse,
    CreateAccountRequest, CreateAccountResponse, CreateBookingRequest, CreateLotRequest,
    DeleteBookingResponse, DeleteLotResponse, ListBookingsResponse, ListLotsResponse, LoginRequest,
    LoginResponse, LotInfo, LotResponse, NearFilter, OverviewResponse, ReconcileResponse,
    UpdateBookingRequest, UpdateLotRequest, WhoAmIResponse,
};

/// Formats the current UTC time as ISO 8601.
///
/// # Errors
///
/// Returns an internal error if formatting fails.
pub fn now_iso() -> Result<String, ApiError> {
    time::OffsetDateTime::now_utc()
        .format(&time::format_description::well_known::Iso8601::DEFAULT)
        .map_err(|e| ApiError::Internal {
            message: format!("Failed to format timestamp: {e}"),
        })
}

/// Converts a booking into its API projection.
fn booking_to_info(booking: &Booking) -> Result<BookingInfo, ApiError> {
    let booking_id: i64 = booking.booking_id.ok_or_else(|| ApiError::Internal {
        message: String::from("Booking projection without a persisted ID"),
    })?;
    Ok(BookingInfo {
        booking_id,
        account_id: booking.account_id,
        lot_id: booking.lot_id,
        lot_name: booking.lot_name.clone(),
        date: booking.date.clone(),
        time: booking.time.clone(),
        status: booking.status.as_str().to_string(),
        price: booking.price,
        created_at: booking.created_at.clone(),
    })
}

/// Converts a lot into its API projection.
fn lot_to_info(lot: &ParkingLot, lot_id: i64, distance: Option<f64>) -> LotInfo {
    LotInfo {
        lot_id,
        name: lot.name.clone(),
        location: lot.location.clone(),
        longitude: lot.coordinate.map(|c| c.longitude),
        latitude: lot.coordinate.map(|c| c.latitude),
        total_slots: lot.total_slots,
        available_slots: lot.available_slots,
        price_per_hour: lot.price_per_hour,
        operating_hours: lot.operating_hours.clone(),
        owner_id: lot.owner_id,
        distance_km: distance,
    }
}

/// Loads a booking or reports it missing.
fn require_booking(
    persistence: &mut Persistence,
    booking_id: i64,
) -> Result<Booking, ApiError> {
    persistence
        .get_booking(booking_id)
        .map_err(translate_persistence_error)?
        .ok_or_else(|| ApiError::ResourceNotFound {
            resource_type: String::from("Booking"),
            message: format!("Booking {booking_id} does not exist"),
        })
}

/// Loads a lot or reports it missing.
fn require_lot(persistence: &mut Persistence, lot_id: i64) -> Result<ParkingLot, ApiError> {
    persistence
        .get_lot(lot_id)
        .map_err(translate_persistence_error)?
        .ok_or_else(|| ApiError::ResourceNotFound {
            resource_type: String::from("Lot"),
            message: format!("Lot {lot_id} does not exist"),
        })
}

/// Builds a validated coordinate from an optional longitude/latitude
/// pair. Supplying only one half of the pair is an input error.
fn coordinate_from_parts(
    longitude: Option<f64>,
    latitude: Option<f64>,
) -> Result<Option<GeoPoint>, ApiError> {
    match (longitude, latitude) {
        (Some(longitude), Some(latitude)) => Ok(Some(
            GeoPoint::new(longitude, latitude).map_err(translate_domain_error)?,
        )),
        (None, None) => Ok(None),
        _ => Err(ApiError::InvalidInput {
            field: String::from("coordinate"),
            message: String::from("longitude and latitude must be supplied together"),
        }),
    }
}

// ---- Authentication ----

/// Logs an account in and returns a session token.
///
/// # Errors
///
/// Returns an error if the credentials are invalid or the account is
/// disabled.
pub fn login(
    persistence: &mut Persistence,
    request: &LoginRequest,
) -> Result<LoginResponse, ApiError> {
    let (token, principal) =
        AuthenticationService::login(persistence, &request.login_name, &request.password)?;

    info!(login_name = %principal.login_name, role = %principal.role, "Login");

    Ok(LoginResponse {
        token,
        role: principal.role.as_str().to_string(),
        message: format!("Logged in as {}", principal.login_name),
    })
}

/// Logs out by invalidating the session token.
///
/// # Errors
///
/// Returns an error if the session cannot be deleted.
pub fn logout(persistence: &mut Persistence, session_token: &str) -> Result<(), ApiError> {
    AuthenticationService::logout(persistence, session_token)?;
    Ok(())
}

/// Describes the authenticated principal.
#[must_use]
pub fn whoami(principal: &AuthenticatedPrincipal) -> WhoAmIResponse {
    WhoAmIResponse {
        account_id: principal.account_id,
        login_name: principal.login_name.clone(),
        role: principal.role.as_str().to_string(),
    }
}

/// Creates an account (admin only), enforcing the password policy.
///
/// # Errors
///
/// Returns an error if the principal is not an Admin, the password
/// violates policy, the role is unknown, or the login name is taken.
pub fn create_account(
    persistence: &mut Persistence,
    request: &CreateAccountRequest,
    principal: &AuthenticatedPrincipal,
) -> Result<CreateAccountResponse, ApiError> {
    AuthorizationService::authorize_create_account(principal)?;

    Role::parse(&request.role).map_err(|_| ApiError::InvalidInput {
        field: String::from("role"),
        message: format!("Unknown role: {}", request.role),
    })?;

    PasswordPolicy::default().validate(
        &request.password,
        &request.confirmation,
        &request.login_name,
        &request.display_name,
    )?;

    if request.login_name.trim().is_empty() {
        return Err(ApiError::InvalidInput {
            field: String::from("login_name"),
            message: String::from("Login name cannot be empty"),
        });
    }

    if persistence
        .get_account_by_login(&request.login_name)
        .map_err(translate_persistence_error)?
        .is_some()
    {
        return Err(ApiError::DomainRuleViolation {
            rule: String::from("unique_login_name"),
            message: format!("Login name '{}' is already in use", request.login_name),
        });
    }

    let now: String = now_iso()?;
    let account_id: i64 = persistence
        .create_account(
            &request.login_name,
            &request.display_name,
            &request.password,
            &request.role,
            &now,
        )
        .map_err(translate_persistence_error)?;

    info!(login_name = %request.login_name, role = %request.role, "Account created");

    Ok(CreateAccountResponse {
        account_id,
        login_name: request.login_name.clone(),
        message: format!("Account '{}' created", request.login_name),
    })
}

// ---- Bookings ----

/// Creates a booking for the authenticated principal.
///
/// The reserving account is always the resolved principal; clients
/// cannot book on behalf of someone else. Payment is authorized before
/// any write, and the slot decrement happens atomically with the
/// booking insert.
///
/// # Errors
///
/// Returns an error if the lot does not exist, a field fails
/// validation, the payment is declined, or the lot has no free slot.
pub fn create_booking(
    persistence: &mut Persistence,
    request: &CreateBookingRequest,
    principal: &AuthenticatedPrincipal,
    payment: &dyn PaymentAuthorizer,
    cause: Cause,
) -> Result<BookingResponse, ApiError> {
    let lot: ParkingLot = require_lot(persistence, request.lot_id)?;

    let initial_status: BookingStatus = match &request.status {
        Some(s) => BookingStatus::from_str(s).map_err(translate_domain_error)?,
        None => BookingStatus::Confirmed,
    };
    let price: Decimal = request.price.unwrap_or(lot.price_per_hour);

    if !payment.authorize(price) {
        return Err(ApiError::PaymentDeclined {
            message: format!("Charge of {price} was not authorized"),
        });
    }

    let now: String = now_iso()?;
    let plan = plan_create(
        &lot,
        principal.account_id,
        request.date.clone(),
        request.time.clone(),
        price,
        initial_status,
        now.clone(),
        principal.to_audit_actor(),
        cause,
    )
    .map_err(translate_core_error)?;

    let outcome: PlanOutcome = persistence
        .execute_plan(&plan, &now)
        .map_err(translate_persistence_error)?;
    let booking_id: i64 = outcome.booking_id.ok_or_else(|| ApiError::Internal {
        message: String::from("Plan execution returned no booking ID"),
    })?;

    info!(
        booking_id,
        lot_id = request.lot_id,
        account_id = principal.account_id,
        "Booking created"
    );

    let booking: Booking = require_booking(persistence, booking_id)?;
    Ok(BookingResponse {
        booking: booking_to_info(&booking)?,
        event_id: outcome.event_id,
        message: format!("Reserved 1 slot at '{}'", booking.lot_name),
    })
}

/// Updates a booking's status.
///
/// The counter adjustment derives from the status *as persisted* versus
/// the requested status; the handler only loads and delegates.
///
/// # Errors
///
/// Returns an error if the booking does not exist, the principal may
/// not access it, the transition is not permitted, or the lot has no
/// free slot for a re-confirmation.
pub fn update_booking(
    persistence: &mut Persistence,
    booking_id: i64,
    request: &UpdateBookingRequest,
    principal: &AuthenticatedPrincipal,
    cause: Cause,
) -> Result<BookingResponse, ApiError> {
    let booking: Booking = require_booking(persistence, booking_id)?;
    AuthorizationService::authorize_access_booking(principal, booking.account_id)?;

    let patch: BookingPatch = BookingPatch {
        status: match &request.status {
            Some(s) => Some(BookingStatus::from_str(s).map_err(translate_domain_error)?),
            None => None,
        },
    };

    let lot: Option<ParkingLot> = persistence
        .get_lot(booking.lot_id)
        .map_err(translate_persistence_error)?;

    let now: String = now_iso()?;
    let plan = plan_update(
        &booking,
        lot.as_ref(),
        &patch,
        principal.to_audit_actor(),
        cause,
    )
    .map_err(translate_core_error)?;

    let outcome: PlanOutcome = persistence
        .execute_plan(&plan, &now)
        .map_err(translate_persistence_error)?;

    info!(booking_id, status = ?patch.status, "Booking updated");

    let updated: Booking = require_booking(persistence, booking_id)?;
    Ok(BookingResponse {
        booking: booking_to_info(&updated)?,
        event_id: outcome.event_id,
        message: format!("Booking {booking_id} updated"),
    })
}

/// Deletes a booking, compensating the lot counter if it still held a
/// slot. Deleting a booking whose lot has vanished succeeds.
///
/// # Errors
///
/// Returns an error if the booking does not exist or the principal may
/// not access it.
pub fn delete_booking(
    persistence: &mut Persistence,
    booking_id: i64,
    principal: &AuthenticatedPrincipal,
    cause: Cause,
) -> Result<DeleteBookingResponse, ApiError> {
    let booking: Booking = require_booking(persistence, booking_id)?;
    AuthorizationService::authorize_access_booking(principal, booking.account_id)?;

    let lot: Option<ParkingLot> = persistence
        .get_lot(booking.lot_id)
        .map_err(translate_persistence_error)?;

    let now: String = now_iso()?;
    let plan = plan_delete(&booking, lot.as_ref(), principal.to_audit_actor(), cause)
        .map_err(translate_core_error)?;

    let outcome: PlanOutcome = persistence
        .execute_plan(&plan, &now)
        .map_err(translate_persistence_error)?;

    info!(booking_id, "Booking deleted");

    Ok(DeleteBookingResponse {
        booking_id,
        event_id: outcome.event_id,
        message: format!("Booking {booking_id} deleted"),
    })
}

/// Retrieves a booking projection.
///
/// # Errors
///
/// Returns an error if the booking does not exist or the principal may
/// not access it.
pub fn get_booking(
    persistence: &mut Persistence,
    booking_id: i64,
    principal: &AuthenticatedPrincipal,
) -> Result<BookingInfo, ApiError> {
    let booking: Booking = require_booking(persistence, booking_id)?;
    AuthorizationService::authorize_access_booking(principal, booking.account_id)?;
    booking_to_info(&booking)
}

/// Lists the principal's own bookings, newest first.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn list_my_bookings(
    persistence: &mut Persistence,
    principal: &AuthenticatedPrincipal,
) -> Result<ListBookingsResponse, ApiError> {
    let bookings: Vec<Booking> = persistence
        .list_bookings_by_account(principal.account_id)
        .map_err(translate_persistence_error)?;
    Ok(ListBookingsResponse {
        bookings: bookings
            .iter()
            .map(booking_to_info)
            .collect::<Result<_, _>>()?,
    })
}

/// Lists every booking in the ledger (admin only), newest first.
///
/// # Errors
///
/// Returns an error if the principal is not an Admin or the query fails.
pub fn list_all_bookings(
    persistence: &mut Persistence,
    principal: &AuthenticatedPrincipal,
) -> Result<ListBookingsResponse, ApiError> {
    AuthorizationService::authorize_list_all_bookings(principal)?;
    let bookings: Vec<Booking> = persistence
        .list_all_bookings()
        .map_err(translate_persistence_error)?;
    Ok(ListBookingsResponse {
        bookings: bookings
            .iter()
            .map(booking_to_info)
            .collect::<Result<_, _>>()?,
    })
}

/// Lists the bookings against a lot (the lot's owner or an admin),
/// newest first.
///
/// # Errors
///
/// Returns an error if the lot does not exist, the principal does not
/// manage it, or the query fails.
pub fn list_lot_bookings(
    persistence: &mut Persistence,
    lot_id: i64,
    principal: &AuthenticatedPrincipal,
) -> Result<ListBookingsResponse, ApiError> {
    let lot: ParkingLot = require_lot(persistence, lot_id)?;
    AuthorizationService::authorize_manage_lot(principal, &lot)?;

    let bookings: Vec<Booking> = persistence
        .list_bookings_for_lot(lot_id)
        .map_err(translate_persistence_error)?;
    Ok(ListBookingsResponse {
        bookings: bookings
            .iter()
            .map(booking_to_info)
            .collect::<Result<_, _>>()?,
    })
}

/// Produces the scannable reference for a booking.
///
/// # Errors
///
/// Returns an error if the booking does not exist or the principal may
/// not access it.
pub fn booking_qr(
    persistence: &mut Persistence,
    booking_id: i64,
    principal: &AuthenticatedPrincipal,
    encoder: &dyn QrEncoder,
) -> Result<BookingQrResponse, ApiError> {
    let booking: Booking = require_booking(persistence, booking_id)?;
    AuthorizationService::authorize_access_booking(principal, booking.account_id)?;

    let payload: String = booking_payload(booking_id);
    let encoded: Vec<u8> = encoder.encode(&payload);
    Ok(BookingQrResponse {
        booking_id,
        payload,
        encoded,
    })
}

// ---- Lot directory ----

/// Creates a lot (owner/admin).
///
/// Owner-created lots belong to their creator; admin-created lots are
/// unowned until assigned.
///
/// # Errors
///
/// Returns an error if the principal may not create lots or a field
/// fails validation.
pub fn create_lot(
    persistence: &mut Persistence,
    request: &CreateLotRequest,
    principal: &AuthenticatedPrincipal,
) -> Result<LotResponse, ApiError> {
    AuthorizationService::authorize_create_lot(principal)?;

    validate_lot_fields(
        &request.name,
        &request.location,
        request.total_slots,
        request.price_per_hour,
    )
    .map_err(translate_domain_error)?;
    if request.operating_hours.trim().is_empty() {
        return Err(ApiError::InvalidInput {
            field: String::from("operating_hours"),
            message: String::from("Operating hours cannot be empty"),
        });
    }

    let coordinate: Option<GeoPoint> =
        coordinate_from_parts(request.longitude, request.latitude)?;

    let owner_id: Option<i64> =
        (principal.role == Role::Owner).then_some(principal.account_id);

    let now: String = now_iso()?;
    let lot: ParkingLot = ParkingLot::new(
        request.name.clone(),
        request.location.clone(),
        coordinate,
        request.total_slots,
        request.available_slots,
        request.price_per_hour,
        request.operating_hours.clone(),
        owner_id,
        now,
    );
    lot.validate_counters().map_err(translate_domain_error)?;

    let lot_id: i64 = persistence
        .create_lot(&lot)
        .map_err(translate_persistence_error)?;

    info!(lot_id, name = %lot.name, "Lot created");

    Ok(LotResponse {
        lot: lot_to_info(&lot, lot_id, None),
        message: format!("Lot '{}' created", lot.name),
    })
}

/// Retrieves a lot projection.
///
/// # Errors
///
/// Returns an error if the lot does not exist.
pub fn get_lot(persistence: &mut Persistence, lot_id: i64) -> Result<LotInfo, ApiError> {
    let lot: ParkingLot = require_lot(persistence, lot_id)?;
    Ok(lot_to_info(&lot, lot_id, None))
}

/// Updates a lot's owner-editable fields (the lot's owner or an admin).
///
/// A capacity change rederives the live counter from the held-slot
/// count inside the database; this handler never writes a counter value
/// it previously read.
///
/// # Errors
///
/// Returns an error if the lot does not exist, the principal does not
/// manage it, or a patched field fails validation.
pub fn update_lot(
    persistence: &mut Persistence,
    lot_id: i64,
    request: &UpdateLotRequest,
    principal: &AuthenticatedPrincipal,
) -> Result<LotResponse, ApiError> {
    let lot: ParkingLot = require_lot(persistence, lot_id)?;
    AuthorizationService::authorize_manage_lot(principal, &lot)?;

    let patch: LotPatch = LotPatch {
        name: request.name.clone(),
        location: request.location.clone(),
        coordinate: coordinate_from_parts(request.longitude, request.latitude)?,
        total_slots: request.total_slots,
        price_per_hour: request.price_per_hour,
        operating_hours: request.operating_hours.clone(),
    };
    if patch.is_empty() {
        return Err(ApiError::InvalidInput {
            field: String::from("body"),
            message: String::from("Update carries no fields to change"),
        });
    }

    // Validate against a copy; the counter itself is rederived in the
    // database during execution.
    let mut patched: ParkingLot = lot.clone();
    patch.apply(&mut patched).map_err(translate_domain_error)?;

    let now: String = now_iso()?;
    persistence
        .update_lot(lot_id, &patched, patch.total_slots, &now)
        .map_err(translate_persistence_error)?;

    info!(lot_id, "Lot updated");

    let reloaded: ParkingLot = require_lot(persistence, lot_id)?;
    Ok(LotResponse {
        lot: lot_to_info(&reloaded, lot_id, None),
        message: format!("Lot {lot_id} updated"),
    })
}

/// Deletes a lot (the lot's owner or an admin).
///
/// Deletion is rejected while Confirmed bookings reference the lot;
/// only an admin may force it, orphaning those bookings.
///
/// # Errors
///
/// Returns an error if the lot does not exist, the principal does not
/// manage it, or active bookings block the deletion.
pub fn delete_lot(
    persistence: &mut Persistence,
    lot_id: i64,
    force: bool,
    principal: &AuthenticatedPrincipal,
) -> Result<DeleteLotResponse, ApiError> {
    let lot: ParkingLot = require_lot(persistence, lot_id)?;
    AuthorizationService::authorize_manage_lot(principal, &lot)?;
    if force {
        AuthorizationService::authorize_force_delete(principal)?;
    }

    persistence
        .delete_lot(lot_id, force)
        .map_err(translate_persistence_error)?;

    info!(lot_id, force, "Lot deleted");

    Ok(DeleteLotResponse {
        lot_id,
        message: format!("Lot {lot_id} deleted"),
    })
}

/// Searches the lot directory.
///
/// With a proximity filter, only lots with a geocoordinate inside the
/// radius are returned, nearest first. The text query filters on name
/// and location, case-insensitively. Both filters compose.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn search_lots(
    persistence: &mut Persistence,
    query: Option<&str>,
    near: Option<NearFilter>,
) -> Result<ListLotsResponse, ApiError> {
    let lots: Vec<ParkingLot> = persistence
        .list_lots()
        .map_err(translate_persistence_error)?;

    let needle: Option<String> = query.map(str::to_lowercase);
    let origin: Option<GeoPoint> = match near {
        Some(near) => {
            Some(GeoPoint::new(near.longitude, near.latitude).map_err(translate_domain_error)?)
        }
        None => None,
    };
    let mut results: Vec<LotInfo> = Vec::new();

    for lot in &lots {
        let Some(lot_id) = lot.lot_id else { continue };

        if let Some(needle) = &needle {
            let matches: bool = lot.name.to_lowercase().contains(needle)
                || lot.location.to_lowercase().contains(needle);
            if !matches {
                continue;
            }
        }

        if let (Some(near), Some(origin)) = (near, origin) {
            // Lots without a coordinate cannot be "nearby".
            let Some(coordinate) = lot.coordinate else {
                continue;
            };
            let distance: f64 = distance_km(origin, coordinate);
            if distance > near.radius_km {
                continue;
            }
            results.push(lot_to_info(lot, lot_id, Some(distance)));
        } else {
            results.push(lot_to_info(lot, lot_id, None));
        }
    }

    if near.is_some() {
        results.sort_by(|a, b| {
            a.distance_km
                .unwrap_or(f64::INFINITY)
                .total_cmp(&b.distance_km.unwrap_or(f64::INFINITY))
        });
    }

    Ok(ListLotsResponse { lots: results })
}

// ---- Admin ----

/// Rederives a lot's available-slot counter from its persisted
/// Confirmed bookings (admin only). Idempotent.
///
/// # Errors
///
/// Returns an error if the principal is not an Admin or the lot does
/// not exist.
pub fn reconcile_lot(
    persistence: &mut Persistence,
    lot_id: i64,
    principal: &AuthenticatedPrincipal,
    cause: Cause,
) -> Result<ReconcileResponse, ApiError> {
    AuthorizationService::authorize_reconcile(principal)?;

    let lot: ParkingLot = require_lot(persistence, lot_id)?;
    let confirmed: i64 = persistence
        .confirmed_count_for_lot(lot_id)
        .map_err(translate_persistence_error)?;

    let plan = plan_reconcile(&lot, confirmed, principal.to_audit_actor(), cause)
        .map_err(translate_core_error)?;
    let corrected_available: i32 = plan.audit_event.after.available_slots;

    let now: String = now_iso()?;
    let outcome: PlanOutcome = persistence
        .execute_plan(&plan, &now)
        .map_err(translate_persistence_error)?;

    info!(
        lot_id,
        previous = lot.available_slots,
        corrected = corrected_available,
        "Lot reconciled"
    );

    Ok(ReconcileResponse {
        lot_id,
        previous_available: lot.available_slots,
        corrected_available,
        confirmed,
        event_id: outcome.event_id,
    })
}

/// Computes the admin overview (admin only).
///
/// # Errors
///
/// Returns an error if the principal is not an Admin or the query fails.
pub fn overview(
    persistence: &mut Persistence,
    principal: &AuthenticatedPrincipal,
) -> Result<OverviewResponse, ApiError> {
    AuthorizationService::authorize_admin_read(principal)?;

    let data: OverviewData = persistence.overview().map_err(translate_persistence_error)?;
    Ok(OverviewResponse {
        lot_count: data.lot_count,
        total_slots: data.total_slots,
        available_slots: data.available_slots,
        confirmed_bookings: data.confirmed_bookings,
        completed_bookings: data.completed_bookings,
        cancelled_bookings: data.cancelled_bookings,
    })
}

/// Reads the audit timeline (admin only), optionally scoped to a lot.
///
/// # Errors
///
/// Returns an error if the principal is not an Admin or the query fails.
pub fn audit_timeline(
    persistence: &mut Persistence,
    lot_id: Option<i64>,
    limit: i64,
    principal: &AuthenticatedPrincipal,
) -> Result<AuditTimelineResponse, ApiError> {
    AuthorizationService::authorize_admin_read(principal)?;

    let records = match lot_id {
        Some(lot_id) => persistence.list_audit_events_for_lot(lot_id, limit),
        None => persistence.list_audit_events(limit),
    }
    .map_err(translate_persistence_error)?;

    Ok(AuditTimelineResponse {
        events: records
            .into_iter()
            .map(|r| AuditEventInfo {
                event_id: r.event_id,
                lot_id: r.lot_id,
                actor_id: r.actor_id,
                actor_type: r.actor_type,
                cause_id: r.cause_id,
                cause_description: r.cause_description,
                action_name: r.action_name,
                action_details: r.action_details,
                before_snapshot: r.before_snapshot,
                after_snapshot: r.after_snapshot,
                created_at: r.created_at,
            })
            .collect(),
    })
}
