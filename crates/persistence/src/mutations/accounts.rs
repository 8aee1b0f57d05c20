// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Account and session mutations.

use crate::data_models::{NewAccount, NewSession};
use crate::diesel_schema::{accounts, sessions};
use crate::error::PersistenceError;
use diesel::prelude::*;
use diesel::{MysqlConnection, SqliteConnection};

backend_fn! {

/// Insert a new account row.
///
/// # Backend-agnostic
///
/// This function uses Diesel DSL exclusively.
pub fn insert_account(conn: &mut _, record: &NewAccount<'_>) -> Result<(), PersistenceError> {
    diesel::insert_into(accounts::table)
        .values(record)
        .execute(conn)?;
    Ok(())
}

}

backend_fn! {

/// Update an account's last-login timestamp.
pub fn update_last_login(
    conn: &mut _,
    account_id: i64,
    at: &str,
) -> Result<(), PersistenceError> {
    diesel::update(accounts::table.filter(accounts::account_id.eq(account_id)))
        .set(accounts::last_login_at.eq(at))
        .execute(conn)?;
    Ok(())
}

}

backend_fn! {

/// Insert a new session row.
pub fn insert_session(conn: &mut _, record: &NewSession<'_>) -> Result<(), PersistenceError> {
    diesel::insert_into(sessions::table)
        .values(record)
        .execute(conn)?;
    Ok(())
}

}

backend_fn! {

/// Update a session's last-activity timestamp.
pub fn update_session_activity(
    conn: &mut _,
    session_id: i64,
    at: &str,
) -> Result<(), PersistenceError> {
    diesel::update(sessions::table.filter(sessions::session_id.eq(session_id)))
        .set(sessions::last_activity_at.eq(at))
        .execute(conn)?;
    Ok(())
}

}

backend_fn! {

/// Delete a session by token (logout).
pub fn delete_session(conn: &mut _, session_token: &str) -> Result<(), PersistenceError> {
    diesel::delete(sessions::table.filter(sessions::session_token.eq(session_token)))
        .execute(conn)?;
    Ok(())
}

}
