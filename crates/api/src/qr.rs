// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! QR encoding boundary.
//!
//! Image rendering is out of scope; the API only needs an opaque
//! `encode(payload) -> bytes` function to hand a scannable reference to
//! clients. The payload format is `parkhub:booking:<id>`.

/// External QR encoder.
pub trait QrEncoder {
    /// Encodes a payload string into an image (or other scannable
    /// representation) as raw bytes.
    fn encode(&self, payload: &str) -> Vec<u8>;
}

/// Default encoder: passes the payload through as UTF-8 bytes.
///
/// Stands in for a real image encoder in development and tests; clients
/// treat the bytes as opaque either way.
pub struct TextQr;

impl QrEncoder for TextQr {
    fn encode(&self, payload: &str) -> Vec<u8> {
        payload.as_bytes().to_vec()
    }
}

/// Builds the canonical QR payload for a booking.
#[must_use]
pub fn booking_payload(booking_id: i64) -> String {
    format!("parkhub:booking:{booking_id}")
}
