// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Lot directory queries.

use crate::data_models::OverviewData;
use crate::diesel_schema::{bookings, lots};
use crate::error::PersistenceError;
use diesel::prelude::*;
use diesel::{MysqlConnection, SqliteConnection};
use parkhub_domain::{GeoPoint, ParkingLot};
use rust_decimal::Decimal;
use std::str::FromStr;

/// Diesel Queryable struct for lot rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = lots)]
struct LotRow {
    lot_id: i64,
    name: String,
    location: String,
    longitude: Option<f64>,
    latitude: Option<f64>,
    total_slots: i32,
    available_slots: i32,
    price_per_hour: String,
    operating_hours: String,
    owner_id: Option<i64>,
    created_at: String,
    updated_at: String,
}

/// Converts a lot row into the domain type.
///
/// A stored price or coordinate that no longer parses indicates a
/// corrupted row and is surfaced as a serialization error rather than
/// silently dropped.
fn lot_from_row(row: LotRow) -> Result<ParkingLot, PersistenceError> {
    let price_per_hour: Decimal = Decimal::from_str(&row.price_per_hour).map_err(|e| {
        PersistenceError::SerializationError(format!(
            "Lot {}: bad price '{}': {e}",
            row.lot_id, row.price_per_hour
        ))
    })?;

    let coordinate: Option<GeoPoint> = match (row.longitude, row.latitude) {
        (Some(longitude), Some(latitude)) => {
            Some(GeoPoint::new(longitude, latitude).map_err(|e| {
                PersistenceError::SerializationError(format!(
                    "Lot {}: bad coordinate: {e}",
                    row.lot_id
                ))
            })?)
        }
        _ => None,
    };

    Ok(ParkingLot {
        lot_id: Some(row.lot_id),
        name: row.name,
        location: row.location,
        coordinate,
        total_slots: row.total_slots,
        available_slots: row.available_slots,
        price_per_hour,
        operating_hours: row.operating_hours,
        owner_id: row.owner_id,
        created_at: row.created_at,
        updated_at: row.updated_at,
    })
}

backend_fn! {

/// Retrieves a lot by ID.
///
/// # Errors
///
/// Returns an error if the database query fails.
/// Returns `Ok(None)` if the lot is not found.
pub fn lot_by_id(conn: &mut _, lot_id: i64) -> Result<Option<ParkingLot>, PersistenceError> {
    let result: Result<LotRow, diesel::result::Error> = lots::table
        .filter(lots::lot_id.eq(lot_id))
        .select(LotRow::as_select())
        .first(conn);

    match result {
        Ok(row) => Ok(Some(lot_from_row(row)?)),
        Err(diesel::result::Error::NotFound) => Ok(None),
        Err(e) => Err(PersistenceError::from(e)),
    }
}

}

backend_fn! {

/// Retrieves all lots, ordered by ID.
///
/// Text and proximity filtering happen in the API layer; the directory
/// is small enough that the contract is simply "all lots".
pub fn all_lots(conn: &mut _) -> Result<Vec<ParkingLot>, PersistenceError> {
    let rows: Vec<LotRow> = lots::table
        .order(lots::lot_id.asc())
        .select(LotRow::as_select())
        .load(conn)?;

    rows.into_iter().map(lot_from_row).collect()
}

}

backend_fn! {

/// Counts Confirmed bookings referencing a lot.
///
/// This is the ground truth the available-slot counter is reconciled
/// against.
pub fn confirmed_count_for_lot(conn: &mut _, lot_id: i64) -> Result<i64, PersistenceError> {
    Ok(bookings::table
        .filter(bookings::lot_id.eq(lot_id))
        .filter(bookings::status.eq("Confirmed"))
        .count()
        .get_result(conn)?)
}

}

backend_fn! {

/// Computes aggregate counts for the admin overview.
pub fn overview(conn: &mut _) -> Result<OverviewData, PersistenceError> {
    let lot_count: i64 = lots::table.count().get_result(conn)?;
    let total_slots: Option<i64> = lots::table
        .select(diesel::dsl::sum(lots::total_slots))
        .get_result(conn)?;
    let available_slots: Option<i64> = lots::table
        .select(diesel::dsl::sum(lots::available_slots))
        .get_result(conn)?;

    let confirmed_bookings: i64 = bookings::table
        .filter(bookings::status.eq("Confirmed"))
        .count()
        .get_result(conn)?;
    let completed_bookings: i64 = bookings::table
        .filter(bookings::status.eq("Completed"))
        .count()
        .get_result(conn)?;
    let cancelled_bookings: i64 = bookings::table
        .filter(bookings::status.eq("Cancelled"))
        .count()
        .get_result(conn)?;

    Ok(OverviewData {
        lot_count,
        total_slots: total_slots.unwrap_or(0),
        available_slots: available_slots.unwrap_or(0),
        confirmed_bookings,
        completed_bookings,
        cancelled_bookings,
    })
}

}
