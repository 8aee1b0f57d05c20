// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Booking ledger queries.

use crate::diesel_schema::bookings;
use crate::error::PersistenceError;
use diesel::prelude::*;
use diesel::{MysqlConnection, SqliteConnection};
use parkhub_domain::{Booking, BookingStatus};
use rust_decimal::Decimal;
use std::str::FromStr;

/// Diesel Queryable struct for booking rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = bookings)]
struct BookingRow {
    booking_id: i64,
    account_id: i64,
    lot_id: i64,
    lot_name: String,
    date: String,
    time: String,
    status: String,
    price: String,
    created_at: String,
}

/// Converts a booking row into the domain type.
fn booking_from_row(row: BookingRow) -> Result<Booking, PersistenceError> {
    let status: BookingStatus = BookingStatus::from_str(&row.status).map_err(|e| {
        PersistenceError::SerializationError(format!("Booking {}: {e}", row.booking_id))
    })?;
    let price: Decimal = Decimal::from_str(&row.price).map_err(|e| {
        PersistenceError::SerializationError(format!(
            "Booking {}: bad price '{}': {e}",
            row.booking_id, row.price
        ))
    })?;

    Ok(Booking::with_id(
        row.booking_id,
        row.account_id,
        row.lot_id,
        row.lot_name,
        row.date,
        row.time,
        status,
        price,
        row.created_at,
    ))
}

backend_fn! {

/// Retrieves a booking by ID.
///
/// # Errors
///
/// Returns an error if the database query fails.
/// Returns `Ok(None)` if the booking is not found.
pub fn booking_by_id(
    conn: &mut _,
    booking_id: i64,
) -> Result<Option<Booking>, PersistenceError> {
    let result: Result<BookingRow, diesel::result::Error> = bookings::table
        .filter(bookings::booking_id.eq(booking_id))
        .select(BookingRow::as_select())
        .first(conn);

    match result {
        Ok(row) => Ok(Some(booking_from_row(row)?)),
        Err(diesel::result::Error::NotFound) => Ok(None),
        Err(e) => Err(PersistenceError::from(e)),
    }
}

}

backend_fn! {

/// Retrieves all bookings made by an account, newest first.
pub fn bookings_by_account(
    conn: &mut _,
    account_id: i64,
) -> Result<Vec<Booking>, PersistenceError> {
    let rows: Vec<BookingRow> = bookings::table
        .filter(bookings::account_id.eq(account_id))
        .order(bookings::booking_id.desc())
        .select(BookingRow::as_select())
        .load(conn)?;

    rows.into_iter().map(booking_from_row).collect()
}

}

backend_fn! {

/// Retrieves all bookings referencing a lot, newest first.
pub fn bookings_for_lot(conn: &mut _, lot_id: i64) -> Result<Vec<Booking>, PersistenceError> {
    let rows: Vec<BookingRow> = bookings::table
        .filter(bookings::lot_id.eq(lot_id))
        .order(bookings::booking_id.desc())
        .select(BookingRow::as_select())
        .load(conn)?;

    rows.into_iter().map(booking_from_row).collect()
}

}

backend_fn! {

/// Retrieves every booking in the ledger, newest first.
pub fn all_bookings(conn: &mut _) -> Result<Vec<Booking>, PersistenceError> {
    let rows: Vec<BookingRow> = bookings::table
        .order(bookings::booking_id.desc())
        .select(BookingRow::as_select())
        .load(conn)?;

    rows.into_iter().map(booking_from_row).collect()
}

}
