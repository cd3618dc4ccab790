//! Hanvon graphics tablet USB HID report decoding.
//!
//! Hanvon tablets (VID `0x0B57`) deliver fixed-length 10-byte reports on
//! their interrupt-in endpoint. The first byte is a report tag; the rest
//! of the frame is reinterpreted per tag and per product variant:
//!
//! | Tag    | Frame                                                        |
//! |--------|--------------------------------------------------------------|
//! | `0x01` | Pad buttons / wheel slider, up to two marker-gated banks     |
//! | `0x02` | Stylus position, tilt, pressure, pen buttons                 |
//! | other  | Ignored (no events)                                          |
//!
//! Two product families share the vendor ID but not the frame details:
//!
//! - **ArtMaster / Rollick** (AM1209, AM1107, AM0806, AM0605, RL0604):
//!   marker-gated button banks (`0x55` left, `0xAA` right), 10-bit
//!   pressure shifted out of a 16-bit field, pen tilt, wheel jump
//!   threshold 4. The right bank exists on AM1107/AM1209 only.
//! - **GraphicPal** (GP0806): single ungated button bank, full-width
//!   pressure, no tilt, wheel jump threshold 10.
//!
//! Both collapse into one decoder parameterized by [`TabletProfile`].
//! This crate is I/O-free: it maps raw bytes plus [`DecoderState`] to a
//! batch of [`TabletEvent`]s and never touches a device.
//!
//! ## Sources
//!
//! - `hanvon-linux` out-of-tree kernel driver by Ondra Havel (report
//!   layout, axis maxima, wheel threshold and sentinel behavior)
//! - USB descriptor captures for the GraphicPal family (provisional)

#![deny(unsafe_op_in_unsafe_fn)]
#![deny(clippy::unwrap_used)]

pub mod decoder;
pub mod events;
pub mod ids;
pub mod profile;
pub mod wheel;

pub use decoder::*;
pub use events::*;
pub use ids::*;
pub use profile::*;
pub use wheel::*;

use tablet_hid_common::HidCommonError;
use thiserror::Error;

/// Errors returned by Hanvon protocol operations.
#[derive(Error, Debug)]
pub enum HanvonError {
    #[error("Invalid report size: expected {expected}, got {actual}")]
    InvalidReportSize { expected: usize, actual: usize },

    #[error("Unsupported device: {vendor_id:04x}:{product_id:04x}")]
    UnsupportedDevice { vendor_id: u16, product_id: u16 },

    #[error("Report decode failed: {0}")]
    Decode(String),
}

/// Convenience result alias for Hanvon protocol operations.
pub type HanvonResult<T> = Result<T, HanvonError>;

impl From<HidCommonError> for HanvonError {
    fn from(e: HidCommonError) -> Self {
        HanvonError::Decode(e.to_string())
    }
}

/// Interrupt report length shared by all known Hanvon variants.
pub const REPORT_LEN: usize = 10;

/// Report tag for pad button / wheel slider frames.
pub const TAG_BUTTONS: u8 = 0x01;
/// Report tag for stylus position frames.
pub const TAG_POSITION: u8 = 0x02;

/// Upper-nibble signature marking a button-bank status byte; anything
/// else in a button frame is a slider position.
pub const BANK_STATUS_SIGNATURE: u8 = 0xA0;

/// Highest raw value of the wheel/slider strip. Positions above this are
/// not slider data and never move the wheel baseline.
pub const SLIDER_POSITION_MAX: u8 = 0x3F;

/// Marker byte gating the left button bank on the ArtMaster family.
pub const LEFT_BANK_MARKER: u8 = 0x55;
/// Marker byte gating the right button bank (AM1107/AM1209).
pub const RIGHT_BANK_MARKER: u8 = 0xAA;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constants() {
        assert_eq!(REPORT_LEN, 10);
        assert_eq!(SLIDER_POSITION_MAX, 0x3F);
        assert_eq!(BANK_STATUS_SIGNATURE & 0x0F, 0);
    }

    #[test]
    fn test_common_error_conversion() {
        let err: HanvonError =
            HidCommonError::InvalidReport("Unexpected end of data".to_string()).into();
        assert!(matches!(err, HanvonError::Decode(_)));
    }
}
