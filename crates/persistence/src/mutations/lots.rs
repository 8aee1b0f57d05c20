// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Lot directory mutations.
//!
//! The slot counter columns are only ever adjusted through conditional
//! single-statement updates in this module and in `plan::execute_plan`.
//! Nothing here overwrites `available_slots` with a previously-read
//! value.

use crate::data_models::NewLot;
use crate::diesel_schema::{bookings, lots};
use crate::error::PersistenceError;
use diesel::Connection;
use diesel::dsl::sql;
use diesel::prelude::*;
use diesel::sql_types::Integer;
use diesel::{MysqlConnection, SqliteConnection};

backend_fn! {

/// Insert a new lot row.
///
/// # Backend-agnostic
///
/// This function uses Diesel DSL exclusively.
pub fn insert_lot(conn: &mut _, record: &NewLot<'_>) -> Result<(), PersistenceError> {
    diesel::insert_into(lots::table)
        .values(record)
        .execute(conn)?;
    Ok(())
}

}

backend_fn! {

/// Update a lot's owner-editable metadata, optionally resizing its
/// capacity, in one transaction.
///
/// A capacity resize preserves the held-slot count by deriving the new
/// `available_slots` inside the database (`new_total - held`, floored
/// at zero). No counter value read by the caller is ever written back.
#[allow(clippy::too_many_arguments)]
pub fn update_lot(
    conn: &mut _,
    lot_id: i64,
    name: &str,
    location: &str,
    longitude: Option<f64>,
    latitude: Option<f64>,
    price_per_hour: &str,
    operating_hours: &str,
    resize_to: Option<i32>,
    updated_at: &str,
) -> Result<(), PersistenceError> {
    conn.transaction::<(), PersistenceError, _>(|conn| {
        let rows: usize = diesel::update(lots::table.filter(lots::lot_id.eq(lot_id)))
            .set((
                lots::name.eq(name),
                lots::location.eq(location),
                lots::longitude.eq(longitude),
                lots::latitude.eq(latitude),
                lots::price_per_hour.eq(price_per_hour),
                lots::operating_hours.eq(operating_hours),
                lots::updated_at.eq(updated_at),
            ))
            .execute(conn)?;
        if rows == 0 {
            return Err(PersistenceError::NotFound(format!("Lot {lot_id} not found")));
        }

        if let Some(new_total) = resize_to {
            // The new available count is `new_total - held`, floored at
            // zero so shrinking below the held count cannot violate the
            // schema's bounds checks.
            // NOTE: raw SQL fragment (justified - Diesel DSL cannot
            // express bind-minus-column arithmetic in an assignment)
            diesel::update(lots::table.filter(lots::lot_id.eq(lot_id)))
                .set((
                    lots::available_slots.eq(sql::<Integer>("CASE WHEN ")
                        .bind::<Integer, _>(new_total)
                        .sql(" - (total_slots - available_slots) < 0 THEN 0 ELSE ")
                        .bind::<Integer, _>(new_total)
                        .sql(" - (total_slots - available_slots) END")),
                    lots::total_slots.eq(new_total),
                ))
                .execute(conn)?;
        }

        Ok(())
    })
}

}

backend_fn! {

/// Delete a lot row.
///
/// Deletion is rejected while Confirmed bookings reference the lot,
/// unless `force` is set. Forced deletion leaves those bookings
/// orphaned; they remain individually deletable.
pub fn delete_lot(conn: &mut _, lot_id: i64, force: bool) -> Result<(), PersistenceError> {
    conn.transaction::<(), PersistenceError, _>(|conn| {
        if !force {
            let confirmed: i64 = bookings::table
                .filter(bookings::lot_id.eq(lot_id))
                .filter(bookings::status.eq("Confirmed"))
                .count()
                .get_result(conn)?;
            if confirmed > 0 {
                return Err(PersistenceError::ActiveBookingsExist { lot_id, confirmed });
            }
        }

        let rows: usize =
            diesel::delete(lots::table.filter(lots::lot_id.eq(lot_id))).execute(conn)?;
        if rows == 0 {
            return Err(PersistenceError::NotFound(format!("Lot {lot_id} not found")));
        }
        Ok(())
    })
}

}

backend_fn! {

/// Overwrite a lot's available-slot counter.
///
/// Only reconciliation uses this; the value is derived from the
/// persisted Confirmed-booking count, never from a caller-held read.
pub fn set_available_slots(
    conn: &mut _,
    lot_id: i64,
    available_slots: i32,
    updated_at: &str,
) -> Result<usize, PersistenceError> {
    Ok(diesel::update(lots::table.filter(lots::lot_id.eq(lot_id)))
        .set((
            lots::available_slots.eq(available_slots),
            lots::updated_at.eq(updated_at),
        ))
        .execute(conn)?)
}

}
