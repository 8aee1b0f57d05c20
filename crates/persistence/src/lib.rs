// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Persistence layer for the ParkHub reservation system.
//!
//! This crate provides database persistence for the lot directory, the
//! booking ledger, accounts, sessions, and the audit trail. It is built
//! on Diesel and supports multiple database backends.
//!
//! ## Database Backend Support
//!
//! ### Supported Backends
//!
//! - **`SQLite`** (default) — Used for development, unit tests, and integration tests
//! - **`MariaDB`/`MySQL`** — Validated via explicit opt-in tests
//!
//! `SQLite` support is always available and requires no external
//! infrastructure. `MySQL`/`MariaDB` support is compiled by default (no
//! feature flags) but validated only via explicit opt-in tests:
//!
//! ```bash
//! cargo xtask test-mariadb
//! ```
//!
//! ### Migration Strategy
//!
//! Due to `SQL` syntax differences between backends, we maintain separate
//! migration directories:
//!
//! - `migrations/` — `SQLite`-specific (default)
//! - `migrations_mysql/` — `MySQL`/`MariaDB`-specific
//!
//! Both produce identical schema semantics but use backend-appropriate
//! syntax. See the `backend` module for details.
//!
//! ## The Consistency Boundary
//!
//! A booking operation touches two records: the booking row and the
//! referenced lot's `available_slots` counter. This crate executes both
//! writes inside a single transaction ([`Persistence::execute_plan`])
//! and adjusts the counter exclusively through conditional
//! single-statement updates, so the counter can never drift from the
//! set of Confirmed bookings — even under concurrent requests racing
//! for the last free slot.
//!
//! ## Testing Philosophy
//!
//! - Standard tests (`cargo test`) run against `SQLite` only
//! - Backend validation tests are explicitly marked `#[ignore]`
//! - External database tests never run automatically
//! - All infrastructure is orchestrated by `xtask`, not embedded in tests

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

use diesel::{MysqlConnection, SqliteConnection};
use parkhub::BookingPlan;
use parkhub_domain::{Booking, ParkingLot};
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};

/// Atomic counter for generating unique in-memory database names.
///
/// This ensures deterministic test isolation by eliminating time-based collisions.
/// Each call to `new_in_memory()` receives a unique sequential ID.
static DB_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Macro to generate monomorphic backend-specific query/mutation functions.
///
/// This macro generates two separate functions from a single function body:
/// - One suffixed with `_sqlite` taking `&mut SqliteConnection`
/// - One suffixed with `_mysql` taking `&mut MysqlConnection`
///
/// This approach is required because Diesel's type system requires concrete
/// backend types at compile time and cannot handle generic backend functions.
///
/// # Constraints
///
/// - The macro ONLY duplicates function bodies and substitutes connection types
/// - No logic, branching, or dispatch occurs within the macro
/// - Backend dispatch happens exclusively in the Persistence adapter
/// - The generated functions are completely monomorphic
macro_rules! backend_fn {
    (
        $(#[$meta:meta])*
        $vis:vis fn $name:ident (
            $conn:ident : &mut _
            $(, $param:ident : $param_ty:ty)* $(,)?
        ) -> $ret:ty
        $body:block
    ) => {
        pastey::paste! {
            // Generate SQLite version
            $(#[$meta])*
            $vis fn [<$name _sqlite>] (
                $conn: &mut SqliteConnection
                $(, $param : $param_ty)*
            ) -> $ret
            $body

            // Generate MySQL version
            $(#[$meta])*
            $vis fn [<$name _mysql>] (
                $conn: &mut MysqlConnection
                $(, $param : $param_ty)*
            ) -> $ret
            $body
        }
    };
}

mod backend;
mod data_models;
mod diesel_schema;
mod error;
mod mutations;
mod queries;

#[cfg(test)]
mod tests;

pub use data_models::{AccountData, AuditEventRecord, OverviewData, SessionData};
pub use error::PersistenceError;
pub use mutations::PlanOutcome;

use data_models::{NewAccount, NewLot, NewSession};

/// Internal enum for backend-specific database connections.
///
/// This enum allows the persistence adapter to work with either `SQLite` or `MySQL`
/// backends while maintaining a single public API.
pub enum BackendConnection {
    Sqlite(SqliteConnection),
    Mysql(MysqlConnection),
}

/// Persistence adapter for lots, bookings, accounts, sessions, and the
/// audit trail.
///
/// This adapter is backend-agnostic and works with both `SQLite` and `MySQL`/`MariaDB`.
/// Backend selection happens once at construction time and is transparent to callers.
pub struct Persistence {
    pub(crate) conn: BackendConnection,
}

/// Dispatches a backend-generated function pair on the adapter's
/// connection.
macro_rules! dispatch {
    ($self:ident, $name:ident ( $($arg:expr),* $(,)? )) => {
        pastey::paste! {
            match &mut $self.conn {
                BackendConnection::Sqlite(conn) => [<$name _sqlite>](conn $(, $arg)*),
                BackendConnection::Mysql(conn) => [<$name _mysql>](conn $(, $arg)*),
            }
        }
    };
}

impl Persistence {
    /// Creates a new persistence adapter with an in-memory `SQLite` database.
    ///
    /// Each call receives a unique database instance via atomic counter,
    /// ensuring deterministic test isolation without time-based collisions.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be initialized.
    pub fn new_in_memory() -> Result<Self, PersistenceError> {
        // Create a unique shared in-memory database name per call so tests are isolated.
        // Use atomic counter instead of timestamp to eliminate race conditions.
        let db_id = DB_COUNTER.fetch_add(1, Ordering::SeqCst);
        let db_name = format!("memdb_test_{db_id}");
        let shared_memory_url = format!("file:{db_name}?mode=memory&cache=shared");

        let mut conn: SqliteConnection = backend::sqlite::initialize_database(&shared_memory_url)?;

        backend::sqlite::verify_foreign_key_enforcement(&mut conn)?;

        Ok(Self {
            conn: BackendConnection::Sqlite(conn),
        })
    }

    /// Creates a new persistence adapter with a file-based `SQLite` database.
    ///
    /// # Arguments
    ///
    /// * `path` - The path to the `SQLite` database file
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or initialized.
    pub fn new_with_file<P: AsRef<Path>>(path: P) -> Result<Self, PersistenceError> {
        let path_str = path.as_ref().to_str().ok_or_else(|| {
            PersistenceError::InitializationError("Invalid database path".to_string())
        })?;

        let mut conn: SqliteConnection = backend::sqlite::initialize_database(path_str)?;

        // Enable WAL mode for better read concurrency
        backend::sqlite::enable_wal_mode(&mut conn)?;

        backend::sqlite::verify_foreign_key_enforcement(&mut conn)?;

        Ok(Self {
            conn: BackendConnection::Sqlite(conn),
        })
    }

    /// Creates a new persistence adapter with a `MySQL`/`MariaDB` database.
    ///
    /// # Arguments
    ///
    /// * `database_url` - The `MySQL` connection URL
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be initialized.
    pub fn new_with_mysql(database_url: &str) -> Result<Self, PersistenceError> {
        let mut conn: MysqlConnection = backend::mysql::initialize_database(database_url)?;

        backend::mysql::verify_foreign_key_enforcement(&mut conn)?;

        Ok(Self {
            conn: BackendConnection::Mysql(conn),
        })
    }

    // ---- Booking coordinator ----

    /// Executes a booking plan atomically: ledger write, counter write,
    /// and audit event either all commit or none do.
    ///
    /// # Errors
    ///
    /// Returns `CapacityExceeded` if a conditional decrement matched no
    /// row, `NotFound` if a referenced row vanished, or a database error.
    pub fn execute_plan(
        &mut self,
        plan: &BookingPlan,
        executed_at: &str,
    ) -> Result<PlanOutcome, PersistenceError> {
        use mutations::plan::{execute_plan_mysql, execute_plan_sqlite};
        dispatch!(self, execute_plan(plan, executed_at))
    }

    // ---- Lot directory ----

    /// Retrieves a lot by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails. Returns `Ok(None)` if the
    /// lot does not exist.
    pub fn get_lot(&mut self, lot_id: i64) -> Result<Option<ParkingLot>, PersistenceError> {
        use queries::lots::{lot_by_id_mysql, lot_by_id_sqlite};
        dispatch!(self, lot_by_id(lot_id))
    }

    /// Retrieves all lots, ordered by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_lots(&mut self) -> Result<Vec<ParkingLot>, PersistenceError> {
        use queries::lots::{all_lots_mysql, all_lots_sqlite};
        dispatch!(self, all_lots())
    }

    /// Inserts a new lot and returns its assigned ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub fn create_lot(&mut self, lot: &ParkingLot) -> Result<i64, PersistenceError> {
        use backend::PersistenceBackend;
        use mutations::lots::{insert_lot_mysql, insert_lot_sqlite};

        let price: String = lot.price_per_hour.to_string();
        let record: NewLot<'_> = NewLot {
            name: &lot.name,
            location: &lot.location,
            longitude: lot.coordinate.map(|c| c.longitude),
            latitude: lot.coordinate.map(|c| c.latitude),
            total_slots: lot.total_slots,
            available_slots: lot.available_slots,
            price_per_hour: price,
            operating_hours: &lot.operating_hours,
            owner_id: lot.owner_id,
            created_at: &lot.created_at,
            updated_at: &lot.updated_at,
        };

        dispatch!(self, insert_lot(&record))?;

        match &mut self.conn {
            BackendConnection::Sqlite(conn) => conn.get_last_insert_rowid(),
            BackendConnection::Mysql(conn) => conn.get_last_insert_rowid(),
        }
    }

    /// Updates a lot's owner-editable metadata, optionally resizing its
    /// capacity.
    ///
    /// `lot` carries the already-validated patched metadata; the counter
    /// itself is rederived inside the database when `resize_to` is set.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the lot does not exist, or a database error.
    pub fn update_lot(
        &mut self,
        lot_id: i64,
        lot: &ParkingLot,
        resize_to: Option<i32>,
        updated_at: &str,
    ) -> Result<(), PersistenceError> {
        use mutations::lots::{update_lot_mysql, update_lot_sqlite};

        let price: String = lot.price_per_hour.to_string();
        dispatch!(
            self,
            update_lot(
                lot_id,
                &lot.name,
                &lot.location,
                lot.coordinate.map(|c| c.longitude),
                lot.coordinate.map(|c| c.latitude),
                &price,
                &lot.operating_hours,
                resize_to,
                updated_at,
            )
        )
    }

    /// Deletes a lot.
    ///
    /// # Errors
    ///
    /// Returns `ActiveBookingsExist` if Confirmed bookings still
    /// reference the lot and `force` is not set, `NotFound` if the lot
    /// does not exist, or a database error.
    pub fn delete_lot(&mut self, lot_id: i64, force: bool) -> Result<(), PersistenceError> {
        use mutations::lots::{delete_lot_mysql, delete_lot_sqlite};
        dispatch!(self, delete_lot(lot_id, force))
    }

    /// Counts Confirmed bookings referencing a lot.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn confirmed_count_for_lot(&mut self, lot_id: i64) -> Result<i64, PersistenceError> {
        use queries::lots::{confirmed_count_for_lot_mysql, confirmed_count_for_lot_sqlite};
        dispatch!(self, confirmed_count_for_lot(lot_id))
    }

    /// Computes aggregate counts for the admin overview.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn overview(&mut self) -> Result<OverviewData, PersistenceError> {
        use queries::lots::{overview_mysql, overview_sqlite};
        dispatch!(self, overview())
    }

    // ---- Booking ledger ----

    /// Retrieves a booking by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails. Returns `Ok(None)` if the
    /// booking does not exist.
    pub fn get_booking(&mut self, booking_id: i64) -> Result<Option<Booking>, PersistenceError> {
        use queries::bookings::{booking_by_id_mysql, booking_by_id_sqlite};
        dispatch!(self, booking_by_id(booking_id))
    }

    /// Retrieves all bookings made by an account, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_bookings_by_account(
        &mut self,
        account_id: i64,
    ) -> Result<Vec<Booking>, PersistenceError> {
        use queries::bookings::{bookings_by_account_mysql, bookings_by_account_sqlite};
        dispatch!(self, bookings_by_account(account_id))
    }

    /// Retrieves all bookings referencing a lot, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_bookings_for_lot(
        &mut self,
        lot_id: i64,
    ) -> Result<Vec<Booking>, PersistenceError> {
        use queries::bookings::{bookings_for_lot_mysql, bookings_for_lot_sqlite};
        dispatch!(self, bookings_for_lot(lot_id))
    }

    /// Retrieves every booking in the ledger, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_all_bookings(&mut self) -> Result<Vec<Booking>, PersistenceError> {
        use queries::bookings::{all_bookings_mysql, all_bookings_sqlite};
        dispatch!(self, all_bookings())
    }

    // ---- Accounts ----

    /// Creates an account with a bcrypt-hashed password and returns its
    /// assigned ID.
    ///
    /// # Errors
    ///
    /// Returns an error if hashing or the insert fails (including a
    /// duplicate login name).
    pub fn create_account(
        &mut self,
        login_name: &str,
        display_name: &str,
        password: &str,
        role: &str,
        created_at: &str,
    ) -> Result<i64, PersistenceError> {
        use backend::PersistenceBackend;
        use mutations::accounts::{insert_account_mysql, insert_account_sqlite};

        let password_hash: String = bcrypt::hash(password, bcrypt::DEFAULT_COST)
            .map_err(|e| PersistenceError::Other(format!("Password hashing failed: {e}")))?;

        let record: NewAccount<'_> = NewAccount {
            login_name,
            display_name,
            password_hash: &password_hash,
            role,
            is_disabled: 0,
            created_at,
        };

        dispatch!(self, insert_account(&record))?;

        match &mut self.conn {
            BackendConnection::Sqlite(conn) => conn.get_last_insert_rowid(),
            BackendConnection::Mysql(conn) => conn.get_last_insert_rowid(),
        }
    }

    /// Verifies an account's password.
    ///
    /// Returns the account on success, `Ok(None)` if the account does
    /// not exist or the password does not match. The caller cannot
    /// distinguish the two, which is deliberate.
    ///
    /// # Errors
    ///
    /// Returns an error if the query or hash verification fails.
    pub fn verify_account_password(
        &mut self,
        login_name: &str,
        password: &str,
    ) -> Result<Option<AccountData>, PersistenceError> {
        let Some(account) = self.get_account_by_login(login_name)? else {
            return Ok(None);
        };

        let matches: bool = bcrypt::verify(password, &account.password_hash)
            .map_err(|e| PersistenceError::Other(format!("Password verification failed: {e}")))?;

        Ok(matches.then_some(account))
    }

    /// Retrieves an account by login name.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_account_by_login(
        &mut self,
        login_name: &str,
    ) -> Result<Option<AccountData>, PersistenceError> {
        use queries::accounts::{account_by_login_mysql, account_by_login_sqlite};
        dispatch!(self, account_by_login(login_name))
    }

    /// Retrieves an account by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_account_by_id(
        &mut self,
        account_id: i64,
    ) -> Result<Option<AccountData>, PersistenceError> {
        use queries::accounts::{account_by_id_mysql, account_by_id_sqlite};
        dispatch!(self, account_by_id(account_id))
    }

    /// Counts all accounts.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn count_accounts(&mut self) -> Result<i64, PersistenceError> {
        use queries::accounts::{count_accounts_mysql, count_accounts_sqlite};
        dispatch!(self, count_accounts())
    }

    /// Updates an account's last-login timestamp.
    ///
    /// # Errors
    ///
    /// Returns an error if the update fails.
    pub fn update_last_login(&mut self, account_id: i64, at: &str) -> Result<(), PersistenceError> {
        use mutations::accounts::{update_last_login_mysql, update_last_login_sqlite};
        dispatch!(self, update_last_login(account_id, at))
    }

    // ---- Sessions ----

    /// Creates a session row.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub fn create_session(
        &mut self,
        session_token: &str,
        account_id: i64,
        created_at: &str,
        expires_at: &str,
    ) -> Result<(), PersistenceError> {
        use mutations::accounts::{insert_session_mysql, insert_session_sqlite};

        let record: NewSession<'_> = NewSession {
            session_token,
            account_id,
            created_at,
            last_activity_at: created_at,
            expires_at,
        };
        dispatch!(self, insert_session(&record))
    }

    /// Retrieves a session by token.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_session_by_token(
        &mut self,
        session_token: &str,
    ) -> Result<Option<SessionData>, PersistenceError> {
        use queries::accounts::{session_by_token_mysql, session_by_token_sqlite};
        dispatch!(self, session_by_token(session_token))
    }

    /// Updates a session's last-activity timestamp.
    ///
    /// # Errors
    ///
    /// Returns an error if the update fails.
    pub fn update_session_activity(
        &mut self,
        session_id: i64,
        at: &str,
    ) -> Result<(), PersistenceError> {
        use mutations::accounts::{update_session_activity_mysql, update_session_activity_sqlite};
        dispatch!(self, update_session_activity(session_id, at))
    }

    /// Deletes a session by token (logout).
    ///
    /// # Errors
    ///
    /// Returns an error if the delete fails.
    pub fn delete_session(&mut self, session_token: &str) -> Result<(), PersistenceError> {
        use mutations::accounts::{delete_session_mysql, delete_session_sqlite};
        dispatch!(self, delete_session(session_token))
    }

    // ---- Audit trail ----

    /// Retrieves the most recent audit events, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_audit_events(
        &mut self,
        limit: i64,
    ) -> Result<Vec<AuditEventRecord>, PersistenceError> {
        use queries::audit::{recent_events_mysql, recent_events_sqlite};
        dispatch!(self, recent_events(limit))
    }

    /// Retrieves the audit timeline for a single lot, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_audit_events_for_lot(
        &mut self,
        lot_id: i64,
        limit: i64,
    ) -> Result<Vec<AuditEventRecord>, PersistenceError> {
        use queries::audit::{events_for_lot_mysql, events_for_lot_sqlite};
        dispatch!(self, events_for_lot(lot_id, limit))
    }
}
