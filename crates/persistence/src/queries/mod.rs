// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Read-only query operations.
//!
//! All queries use Diesel DSL and are generated for both backends via
//! `backend_fn!`. Row-to-domain conversion (price strings, status
//! strings, coordinate pairs) happens here so callers only see domain
//! types.

pub mod accounts;
pub mod audit;
pub mod bookings;
pub mod lots;
