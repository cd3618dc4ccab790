//! Hanvon USB vendor and product ID constants.
//!
//! Hanvon (Hanwang Technology Co., Ltd.) graphics tablets enumerate under
//! VID `0x0B57`. ArtMaster/Rollick PIDs are confirmed by the
//! `hanvon-linux` out-of-tree kernel driver; the GraphicPal PID is from a
//! USB descriptor capture and is provisional.

/// Hanvon / Hanwang Technology USB Vendor ID.
pub const VENDOR_ID: u16 = 0x0B57;

/// Known Hanvon product IDs.
pub mod product_ids {
    // ── ArtMaster / Rollick family ──────────────────────────────────
    // Confirmed by the hanvon-linux driver device table.

    /// ArtMaster AM1209 (12" × 9").
    pub const AM1209: u16 = 0x8501;
    /// ArtMaster AM0806 (8" × 6").
    pub const AM0806: u16 = 0x8502;
    /// ArtMaster AM0605 (6" × 5").
    pub const AM0605: u16 = 0x8503;
    /// ArtMaster AM1107 (11" × 7").
    pub const AM1107: u16 = 0x8505;
    /// Rollick RL0604.
    pub const RL0604: u16 = 0x851F;

    // ── GraphicPal family ───────────────────────────────────────────
    // Provisional: from descriptor capture, not in the AM driver table.

    /// GraphicPal GP0806 (provisional PID).
    pub const GP0806: u16 = 0x8528;
}

/// Hanvon tablet variants distinguished by product ID.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum TabletModel {
    Am1209,
    Am1107,
    Am0806,
    Am0605,
    Rl0604,
    Gp0806,
}

impl TabletModel {
    /// Classify a product ID, or `None` for unknown products.
    pub fn from_pid(product_id: u16) -> Option<Self> {
        match product_id {
            product_ids::AM1209 => Some(Self::Am1209),
            product_ids::AM1107 => Some(Self::Am1107),
            product_ids::AM0806 => Some(Self::Am0806),
            product_ids::AM0605 => Some(Self::Am0605),
            product_ids::RL0604 => Some(Self::Rl0604),
            product_ids::GP0806 => Some(Self::Gp0806),
            _ => None,
        }
    }

    /// Human-readable device name, as advertised to the event sink.
    pub fn name(self) -> &'static str {
        match self {
            Self::Am1209 => "Hanvon ArtMaster AM1209",
            Self::Am1107 => "Hanvon ArtMaster AM1107",
            Self::Am0806 => "Hanvon ArtMaster AM0806",
            Self::Am0605 => "Hanvon ArtMaster AM0605",
            Self::Rl0604 => "Hanvon Rollick RL0604",
            Self::Gp0806 => "Hanvon GraphicPal GP0806",
        }
    }
}

/// Returns `true` if the VID/PID pair identifies a known Hanvon tablet.
pub fn is_hanvon_device(vendor_id: u16, product_id: u16) -> bool {
    vendor_id == VENDOR_ID && TabletModel::from_pid(product_id).is_some()
}
