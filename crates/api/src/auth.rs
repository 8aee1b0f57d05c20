// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Authentication and authorization types and services.

use parkhub_audit::Actor;
use parkhub_domain::ParkingLot;
use parkhub_persistence::{AccountData, Persistence, PersistenceError, SessionData};
use time::{Duration, OffsetDateTime};

use crate::error::AuthError;

/// Principal roles for authorization.
///
/// Roles determine what actions an authenticated principal may perform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    /// Driver role: end users reserving slots.
    ///
    /// Drivers may search lots, create bookings, and manage (view,
    /// update, delete) their own bookings.
    Driver,
    /// Owner role: principals operating one or more lots.
    ///
    /// Owners may do everything drivers can, plus create lots and
    /// manage the lots they own, including viewing bookings against
    /// those lots.
    Owner,
    /// Admin role: operators with structural and corrective authority.
    ///
    /// Admins may perform any operation, including account creation,
    /// forced lot deletion, counter reconciliation, and reading the
    /// global ledger and audit trail.
    Admin,
}

impl Role {
    /// Parses a role from its stored string representation.
    ///
    /// # Errors
    ///
    /// Returns an error if the string is not a known role.
    pub fn parse(s: &str) -> Result<Self, AuthError> {
        match s {
            "Driver" => Ok(Self::Driver),
            "Owner" => Ok(Self::Owner),
            "Admin" => Ok(Self::Admin),
            _ => Err(AuthError::AuthenticationFailed {
                reason: format!("Invalid role: {s}"),
            }),
        }
    }

    /// Converts this role to its string representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Driver => "Driver",
            Self::Owner => "Owner",
            Self::Admin => "Admin",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// An authenticated principal with an associated role.
///
/// This is what the rest of the API layer sees after session
/// resolution: a stable account identity plus a role. Handlers trust
/// `account_id` for ownership checks and booking attribution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedPrincipal {
    /// The canonical account identifier.
    pub account_id: i64,
    /// The login name (used for audit attribution).
    pub login_name: String,
    /// The role assigned to this principal.
    pub role: Role,
}

impl AuthenticatedPrincipal {
    /// Creates a new authenticated principal.
    #[must_use]
    pub const fn new(account_id: i64, login_name: String, role: Role) -> Self {
        Self {
            account_id,
            login_name,
            role,
        }
    }

    /// Converts this principal into an audit Actor.
    #[must_use]
    pub fn to_audit_actor(&self) -> Actor {
        let actor_type: String = match self.role {
            Role::Driver => String::from("driver"),
            Role::Owner => String::from("owner"),
            Role::Admin => String::from("admin"),
        };
        Actor::new(self.login_name.clone(), actor_type)
    }
}

/// Authorization service for enforcing role-based access control.
pub struct AuthorizationService;

impl AuthorizationService {
    /// Checks if a principal may create a lot.
    ///
    /// Owners and Admins may create lots.
    ///
    /// # Errors
    ///
    /// Returns an error if the principal is a Driver.
    pub fn authorize_create_lot(principal: &AuthenticatedPrincipal) -> Result<(), AuthError> {
        match principal.role {
            Role::Owner | Role::Admin => Ok(()),
            Role::Driver => Err(AuthError::Unauthorized {
                action: String::from("create_lot"),
                required_role: String::from("Owner"),
            }),
        }
    }

    /// Checks if a principal may edit or delete a specific lot.
    ///
    /// Admins may manage any lot; Owners only lots they own.
    ///
    /// # Errors
    ///
    /// Returns an error if the principal does not manage this lot.
    pub fn authorize_manage_lot(
        principal: &AuthenticatedPrincipal,
        lot: &ParkingLot,
    ) -> Result<(), AuthError> {
        if principal.role == Role::Admin {
            return Ok(());
        }
        if principal.role == Role::Owner && lot.owner_id == Some(principal.account_id) {
            return Ok(());
        }
        Err(AuthError::Unauthorized {
            action: String::from("manage_lot"),
            required_role: String::from("Owner (of this lot)"),
        })
    }

    /// Checks if a principal may force-delete a lot with active bookings.
    ///
    /// Only Admins may force deletion.
    ///
    /// # Errors
    ///
    /// Returns an error if the principal is not an Admin.
    pub fn authorize_force_delete(principal: &AuthenticatedPrincipal) -> Result<(), AuthError> {
        match principal.role {
            Role::Admin => Ok(()),
            Role::Driver | Role::Owner => Err(AuthError::Unauthorized {
                action: String::from("force_delete_lot"),
                required_role: String::from("Admin"),
            }),
        }
    }

    /// Checks if a principal may access a specific booking.
    ///
    /// The booking's creator and Admins may access it.
    ///
    /// # Errors
    ///
    /// Returns an error if the booking belongs to someone else.
    pub fn authorize_access_booking(
        principal: &AuthenticatedPrincipal,
        booking_account_id: i64,
    ) -> Result<(), AuthError> {
        if principal.role == Role::Admin || principal.account_id == booking_account_id {
            return Ok(());
        }
        Err(AuthError::Unauthorized {
            action: String::from("access_booking"),
            required_role: String::from("Admin (or booking owner)"),
        })
    }

    /// Checks if a principal may list every booking in the ledger.
    ///
    /// Only Admins may read the global ledger.
    ///
    /// # Errors
    ///
    /// Returns an error if the principal is not an Admin.
    pub fn authorize_list_all_bookings(
        principal: &AuthenticatedPrincipal,
    ) -> Result<(), AuthError> {
        match principal.role {
            Role::Admin => Ok(()),
            Role::Driver | Role::Owner => Err(AuthError::Unauthorized {
                action: String::from("list_all_bookings"),
                required_role: String::from("Admin"),
            }),
        }
    }

    /// Checks if a principal may reconcile a lot's counter.
    ///
    /// Only Admins may reconcile.
    ///
    /// # Errors
    ///
    /// Returns an error if the principal is not an Admin.
    pub fn authorize_reconcile(principal: &AuthenticatedPrincipal) -> Result<(), AuthError> {
        match principal.role {
            Role::Admin => Ok(()),
            Role::Driver | Role::Owner => Err(AuthError::Unauthorized {
                action: String::from("reconcile_lot"),
                required_role: String::from("Admin"),
            }),
        }
    }

    /// Checks if a principal may create accounts.
    ///
    /// Only Admins may create accounts.
    ///
    /// # Errors
    ///
    /// Returns an error if the principal is not an Admin.
    pub fn authorize_create_account(principal: &AuthenticatedPrincipal) -> Result<(), AuthError> {
        match principal.role {
            Role::Admin => Ok(()),
            Role::Driver | Role::Owner => Err(AuthError::Unauthorized {
                action: String::from("create_account"),
                required_role: String::from("Admin"),
            }),
        }
    }

    /// Checks if a principal may read the admin overview and audit trail.
    ///
    /// Only Admins may.
    ///
    /// # Errors
    ///
    /// Returns an error if the principal is not an Admin.
    pub fn authorize_admin_read(principal: &AuthenticatedPrincipal) -> Result<(), AuthError> {
        match principal.role {
            Role::Admin => Ok(()),
            Role::Driver | Role::Owner => Err(AuthError::Unauthorized {
                action: String::from("admin_read"),
                required_role: String::from("Admin"),
            }),
        }
    }
}

/// Authentication service for session-based authentication.
pub struct AuthenticationService;

impl AuthenticationService {
    /// Default session expiration duration (30 days).
    const DEFAULT_SESSION_EXPIRATION: Duration = Duration::days(30);

    /// Authenticates an account by password and creates a session.
    ///
    /// # Arguments
    ///
    /// * `persistence` - The persistence layer
    /// * `login_name` - The account login name
    /// * `password` - The password to verify
    ///
    /// # Returns
    ///
    /// A tuple of (`session_token`, `authenticated_principal`).
    ///
    /// # Errors
    ///
    /// Returns an error if authentication fails.
    pub fn login(
        persistence: &mut Persistence,
        login_name: &str,
        password: &str,
    ) -> Result<(String, AuthenticatedPrincipal), AuthError> {
        let account: AccountData = persistence
            .verify_account_password(login_name, password)
            .map_err(|e| AuthError::AuthenticationFailed {
                reason: format!("Database error: {e}"),
            })?
            .ok_or_else(|| AuthError::AuthenticationFailed {
                reason: String::from("Unknown login name or wrong password"),
            })?;

        if account.is_disabled {
            return Err(AuthError::AuthenticationFailed {
                reason: String::from("Account is disabled"),
            });
        }

        let role: Role = Role::parse(&account.role)?;

        let session_token: String = Self::generate_session_token();

        let now: OffsetDateTime = OffsetDateTime::now_utc();
        let now_str: String = Self::format_timestamp(now)?;
        let expires_at: String = Self::format_timestamp(now + Self::DEFAULT_SESSION_EXPIRATION)?;

        persistence
            .create_session(&session_token, account.account_id, &now_str, &expires_at)
            .map_err(|e| AuthError::AuthenticationFailed {
                reason: format!("Failed to create session: {e}"),
            })?;

        persistence
            .update_last_login(account.account_id, &now_str)
            .map_err(|e| AuthError::AuthenticationFailed {
                reason: format!("Failed to update last login: {e}"),
            })?;

        let principal: AuthenticatedPrincipal =
            AuthenticatedPrincipal::new(account.account_id, account.login_name, role);

        Ok((session_token, principal))
    }

    /// Validates a session token and returns the authenticated principal.
    ///
    /// # Errors
    ///
    /// Returns an error if the session is invalid or expired, or the
    /// account is disabled.
    pub fn validate_session(
        persistence: &mut Persistence,
        session_token: &str,
    ) -> Result<AuthenticatedPrincipal, AuthError> {
        let session: SessionData = persistence
            .get_session_by_token(session_token)
            .map_err(Self::map_persistence_error)?
            .ok_or_else(|| AuthError::AuthenticationFailed {
                reason: String::from("Invalid session token"),
            })?;

        let expires_at: OffsetDateTime = OffsetDateTime::parse(
            &session.expires_at,
            &time::format_description::well_known::Iso8601::DEFAULT,
        )
        .map_err(|e| AuthError::AuthenticationFailed {
            reason: format!("Failed to parse session expiration: {e}"),
        })?;

        if OffsetDateTime::now_utc() > expires_at {
            return Err(AuthError::AuthenticationFailed {
                reason: String::from("Session expired"),
            });
        }

        let account: AccountData = persistence
            .get_account_by_id(session.account_id)
            .map_err(Self::map_persistence_error)?
            .ok_or_else(|| AuthError::AuthenticationFailed {
                reason: String::from("Account not found"),
            })?;

        if account.is_disabled {
            return Err(AuthError::AuthenticationFailed {
                reason: String::from("Account is disabled"),
            });
        }

        let role: Role = Role::parse(&account.role)?;

        let now_str: String = Self::format_timestamp(OffsetDateTime::now_utc())?;
        persistence
            .update_session_activity(session.session_id, &now_str)
            .map_err(Self::map_persistence_error)?;

        Ok(AuthenticatedPrincipal::new(
            account.account_id,
            account.login_name,
            role,
        ))
    }

    /// Logs out by deleting the session.
    ///
    /// # Errors
    ///
    /// Returns an error if the logout fails.
    pub fn logout(persistence: &mut Persistence, session_token: &str) -> Result<(), AuthError> {
        persistence
            .delete_session(session_token)
            .map_err(|e| AuthError::AuthenticationFailed {
                reason: format!("Failed to delete session: {e}"),
            })?;

        Ok(())
    }

    /// Generates a session token from two independent random draws.
    fn generate_session_token() -> String {
        format!(
            "session_{:016x}{:016x}",
            rand::random::<u64>(),
            rand::random::<u64>()
        )
    }

    /// Formats a timestamp as ISO 8601.
    fn format_timestamp(at: OffsetDateTime) -> Result<String, AuthError> {
        at.format(&time::format_description::well_known::Iso8601::DEFAULT)
            .map_err(|e| AuthError::AuthenticationFailed {
                reason: format!("Failed to format timestamp: {e}"),
            })
    }

    /// Maps persistence errors to authentication errors.
    fn map_persistence_error(err: PersistenceError) -> AuthError {
        match err {
            PersistenceError::SessionExpired(msg) | PersistenceError::SessionNotFound(msg) => {
                AuthError::AuthenticationFailed { reason: msg }
            }
            _ => AuthError::AuthenticationFailed {
                reason: format!("Database error: {err}"),
            },
        }
    }
}
