// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Slot counter bounds enforcement.
//!
//! A lot's available-slot counter must always satisfy
//! `0 <= available_slots <= total_slots`. This module is the single place
//! that rule is encoded; every counter adjustment goes through
//! [`apply_delta`].

/// Errors that can occur when adjusting a slot counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CapacityError {
    /// A decrement was requested but the lot has no free slot.
    Exceeded {
        /// The available slot count at the time of the request.
        available: i32,
    },
    /// The counter was already out of bounds before the adjustment.
    ///
    /// This indicates corrupted state and should never be observable when
    /// all writes go through the conditional storage updates.
    Underflow {
        /// The out-of-bounds available slot count.
        available: i32,
    },
    /// An increment would push the counter past the total under the
    /// `Reject` policy.
    Overflow {
        /// The counter value the increment would have produced.
        next: i32,
        /// The lot's total slot count.
        total: i32,
    },
}

impl std::fmt::Display for CapacityError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Exceeded { available } => {
                write!(f, "no free slot available (available={available})")
            }
            Self::Underflow { available } => {
                write!(f, "slot counter out of bounds (available={available})")
            }
            Self::Overflow { next, total } => {
                write!(f, "slot counter would exceed total ({next} > {total})")
            }
        }
    }
}

impl std::error::Error for CapacityError {}

/// Policy for handling a delta that would leave the counter out of bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeltaPolicy {
    /// Reject the adjustment with a [`CapacityError`].
    ///
    /// Used for decrements: a reservation against a full lot must fail.
    Reject,
    /// Clamp the result into `0..=total`.
    ///
    /// Used for compensating increments (cancellation, deletion), which
    /// must never fail the primary operation.
    Clamp,
}

/// Applies a delta to an available-slot counter, enforcing
/// `0 <= available + delta <= total`.
///
/// # Arguments
///
/// * `available` - The current available slot count
/// * `total` - The lot's total slot count
/// * `delta` - The adjustment to apply (typically -1 or +1)
/// * `policy` - How to handle an out-of-bounds result
///
/// # Returns
///
/// The new counter value.
///
/// # Errors
///
/// * `CapacityError::Underflow` if the counter was already out of bounds
/// * `CapacityError::Exceeded` if a decrement has no capacity to consume
/// * `CapacityError::Overflow` if an increment would exceed the total and
///   the policy is `Reject`
pub const fn apply_delta(
    available: i32,
    total: i32,
    delta: i32,
    policy: DeltaPolicy,
) -> Result<i32, CapacityError> {
    if available < 0 || available > total {
        return Err(CapacityError::Underflow { available });
    }

    let next: i32 = available + delta;

    if next < 0 {
        return match policy {
            DeltaPolicy::Reject => Err(CapacityError::Exceeded { available }),
            DeltaPolicy::Clamp => Ok(0),
        };
    }

    if next > total {
        return match policy {
            DeltaPolicy::Reject => Err(CapacityError::Overflow { next, total }),
            DeltaPolicy::Clamp => Ok(total),
        };
    }

    Ok(next)
}
