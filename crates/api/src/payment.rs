// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Payment authorization boundary.
//!
//! Settlement is out of scope; the booking flow only needs a yes/no
//! answer for a charge amount before it writes anything. A declined
//! authorization fails the creation with no side effects.

use rust_decimal::Decimal;

/// External payment authorizer.
pub trait PaymentAuthorizer {
    /// Returns whether a charge of `amount` is authorized.
    fn authorize(&self, amount: Decimal) -> bool;
}

/// Default authorizer: approves every non-negative charge.
///
/// Stands in for the real gateway in development and tests.
pub struct AlwaysAuthorize;

impl PaymentAuthorizer for AlwaysAuthorize {
    fn authorize(&self, amount: Decimal) -> bool {
        !amount.is_sign_negative()
    }
}

/// Authorizer that declines every charge. Test double.
pub struct AlwaysDecline;

impl PaymentAuthorizer for AlwaysDecline {
    fn authorize(&self, _amount: Decimal) -> bool {
        false
    }
}
