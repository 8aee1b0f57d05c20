// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Bulk lot onboarding from CSV.
//!
//! Owners bring existing facility inventories as spreadsheets; this
//! module parses and validates them row by row. Preview reports what
//! would happen; import actually creates the accepted lots. A rejected
//! row never aborts the batch.
//!
//! Expected header: `name,location,longitude,latitude,total_slots,price_per_hour,operating_hours`
//! (`longitude`/`latitude` may be empty, together).

use parkhub_domain::{GeoPoint, ParkingLot, validate_lot_fields};
use parkhub_persistence::Persistence;
use rust_decimal::Decimal;
use std::str::FromStr;
use tracing::info;

use crate::auth::{AuthenticatedPrincipal, AuthorizationService, Role};
use crate::error::{ApiError, translate_persistence_error};
use crate::handlers::now_iso;
use crate::request_response::{CsvRowStatus, LotCsvRowResult, LotsCsvResponse};

/// Raw CSV row, prior to validation.
#[derive(Debug, serde::Deserialize)]
struct LotCsvRow {
    name: String,
    location: String,
    longitude: String,
    latitude: String,
    total_slots: String,
    price_per_hour: String,
    operating_hours: String,
}

/// A row that passed validation and is ready to insert.
struct ValidatedLot {
    name: String,
    location: String,
    coordinate: Option<GeoPoint>,
    total_slots: i32,
    price_per_hour: Decimal,
    operating_hours: String,
}

/// Validates one raw row.
fn validate_row(row: &LotCsvRow) -> Result<ValidatedLot, String> {
    let total_slots: i32 = row
        .total_slots
        .trim()
        .parse()
        .map_err(|_| format!("total_slots '{}' is not an integer", row.total_slots))?;

    let price_per_hour: Decimal = Decimal::from_str(row.price_per_hour.trim())
        .map_err(|_| format!("price_per_hour '{}' is not a decimal", row.price_per_hour))?;

    validate_lot_fields(&row.name, &row.location, total_slots, price_per_hour)
        .map_err(|e| e.to_string())?;

    if row.operating_hours.trim().is_empty() {
        return Err(String::from("operating_hours cannot be empty"));
    }

    let coordinate: Option<GeoPoint> = match (row.longitude.trim(), row.latitude.trim()) {
        ("", "") => None,
        (lng, lat) => {
            let longitude: f64 = lng
                .parse()
                .map_err(|_| format!("longitude '{lng}' is not a number"))?;
            let latitude: f64 = lat
                .parse()
                .map_err(|_| format!("latitude '{lat}' is not a number"))?;
            Some(GeoPoint::new(longitude, latitude).map_err(|e| e.to_string())?)
        }
    };

    Ok(ValidatedLot {
        name: row.name.trim().to_string(),
        location: row.location.trim().to_string(),
        coordinate,
        total_slots,
        price_per_hour,
        operating_hours: row.operating_hours.trim().to_string(),
    })
}

/// Parses CSV content into per-row validation results.
fn parse_rows(content: &str) -> Result<Vec<(usize, Result<ValidatedLot, String>)>, ApiError> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(content.as_bytes());

    let mut results: Vec<(usize, Result<ValidatedLot, String>)> = Vec::new();
    for (index, record) in reader.deserialize::<LotCsvRow>().enumerate() {
        let row_number: usize = index + 1;
        match record {
            Ok(row) => results.push((row_number, validate_row(&row))),
            Err(e) => results.push((row_number, Err(format!("Malformed row: {e}")))),
        }
    }
    Ok(results)
}

/// Previews a CSV lot batch without writing anything.
///
/// # Errors
///
/// Returns an error if the principal may not create lots.
pub fn preview_lots_csv(
    content: &str,
    principal: &AuthenticatedPrincipal,
) -> Result<LotsCsvResponse, ApiError> {
    AuthorizationService::authorize_create_lot(principal)?;

    let mut rows: Vec<LotCsvRowResult> = Vec::new();
    let mut accepted: usize = 0;
    let mut rejected: usize = 0;

    for (row_number, result) in parse_rows(content)? {
        match result {
            Ok(lot) => {
                accepted += 1;
                rows.push(LotCsvRowResult {
                    row: row_number,
                    status: CsvRowStatus::Accepted,
                    name: Some(lot.name),
                    message: None,
                    lot_id: None,
                });
            }
            Err(message) => {
                rejected += 1;
                rows.push(LotCsvRowResult {
                    row: row_number,
                    status: CsvRowStatus::Rejected,
                    name: None,
                    message: Some(message),
                    lot_id: None,
                });
            }
        }
    }

    Ok(LotsCsvResponse {
        accepted,
        rejected,
        rows,
    })
}

/// Imports a CSV lot batch, creating every accepted row.
///
/// Rejected rows are reported and skipped; they never abort the batch.
///
/// # Errors
///
/// Returns an error if the principal may not create lots or an insert
/// fails.
pub fn import_lots_csv(
    persistence: &mut Persistence,
    content: &str,
    principal: &AuthenticatedPrincipal,
) -> Result<LotsCsvResponse, ApiError> {
    AuthorizationService::authorize_create_lot(principal)?;

    let owner_id: Option<i64> = (principal.role == Role::Owner).then_some(principal.account_id);
    let now: String = now_iso()?;

    let mut rows: Vec<LotCsvRowResult> = Vec::new();
    let mut accepted: usize = 0;
    let mut rejected: usize = 0;

    for (row_number, result) in parse_rows(content)? {
        match result {
            Ok(validated) => {
                let lot: ParkingLot = ParkingLot::new(
                    validated.name.clone(),
                    validated.location,
                    validated.coordinate,
                    validated.total_slots,
                    None,
                    validated.price_per_hour,
                    validated.operating_hours,
                    owner_id,
                    now.clone(),
                );
                let lot_id: i64 = persistence
                    .create_lot(&lot)
                    .map_err(translate_persistence_error)?;
                accepted += 1;
                rows.push(LotCsvRowResult {
                    row: row_number,
                    status: CsvRowStatus::Accepted,
                    name: Some(validated.name),
                    message: None,
                    lot_id: Some(lot_id),
                });
            }
            Err(message) => {
                rejected += 1;
                rows.push(LotCsvRowResult {
                    row: row_number,
                    status: CsvRowStatus::Rejected,
                    name: None,
                    message: Some(message),
                    lot_id: None,
                });
            }
        }
    }

    info!(accepted, rejected, "CSV lot import finished");

    Ok(LotsCsvResponse {
        accepted,
        rejected,
        rows,
    })
}
