//! Normalized event model for decoded tablet reports.
//!
//! One decoded report yields an ordered batch of events forming one
//! atomic frame; the consumer terminates each frame with a sync marker
//! before the next report is processed.

use serde::{Deserialize, Serialize};

/// Which pad button bank a button belongs to.
///
/// The left bank exists on every variant; the right bank only on the
/// larger ArtMaster models (AM1107, AM1209).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PadBank {
    Left,
    Right,
}

/// Symbolic button identity.
///
/// Pad indices run 0..=3 per bank. Button frames drive indices 1..=3;
/// left index 0 is driven from the tool-identity bit of position frames
/// instead (an asymmetry of the wire protocol, preserved here).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ButtonId {
    /// Stylus tip contact (primary click).
    PenTip,
    /// Stylus barrel button (secondary click).
    PenBarrel,
    /// Pad button by bank and index.
    Pad { bank: PadBank, index: u8 },
}

/// One normalized event decoded from a raw report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TabletEvent {
    /// Absolute stylus position.
    Position { x: u16, y: u16 },
    /// Stylus tilt, only on tilt-capable profiles.
    Tilt { x: u8, y: u8 },
    /// Contact pressure, scaled to the profile's pressure range.
    Pressure(u16),
    /// Button edge or re-assertion; sinks must treat repeats as idempotent.
    Button { id: ButtonId, pressed: bool },
    /// Relative wheel motion from the slider strip.
    Wheel(i32),
}
