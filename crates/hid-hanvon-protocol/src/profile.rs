//! Per-variant device profiles.
//!
//! A profile fixes everything the decoder needs to know about one
//! product variant: axis ranges, pressure field width, tilt support,
//! button bank gating, and the wheel jump threshold. Profiles are
//! selected once at attach time and never mutated afterwards.

use serde::{Deserialize, Serialize};

use crate::{HanvonError, HanvonResult, REPORT_LEN, TabletModel, ids};

/// ArtMaster maximum X coordinate.
pub const AM_MAX_ABS_X: u16 = 0x27DE;
/// ArtMaster maximum Y coordinate.
pub const AM_MAX_ABS_Y: u16 = 0x1CFE;
/// ArtMaster maximum X tilt.
pub const AM_MAX_TILT_X: u8 = 0x3F;
/// ArtMaster maximum Y tilt.
pub const AM_MAX_TILT_Y: u8 = 0x7F;
/// ArtMaster maximum pressure after the 6-bit shift (10-bit range).
pub const AM_MAX_PRESSURE: u16 = 0x0400;
/// ArtMaster wheel jump threshold.
pub const AM_WHEEL_THRESHOLD: i32 = 4;

/// GraphicPal maximum X coordinate (provisional capture).
pub const GP_MAX_ABS_X: u16 = 0x2454;
/// GraphicPal maximum Y coordinate (provisional capture).
pub const GP_MAX_ABS_Y: u16 = 0x1B40;
/// GraphicPal maximum pressure (full-width field).
pub const GP_MAX_PRESSURE: u16 = 0xFFFF;
/// GraphicPal wheel jump threshold.
pub const GP_WHEEL_THRESHOLD: i32 = 10;

/// Tilt axis maxima for tilt-capable variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TiltRange {
    pub x_max: u8,
    pub y_max: u8,
}

/// Immutable per-variant decode parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TabletProfile {
    pub model: TabletModel,
    /// Interrupt report length; decode rejects anything else.
    pub report_len: usize,
    pub x_max: u16,
    pub y_max: u16,
    /// Maximum pressure value after shifting.
    pub pressure_max: u16,
    /// Right shift applied to the raw 16-bit pressure field (6 for
    /// 10-bit profiles, 0 for full-width profiles).
    pub pressure_shift: u8,
    /// Tilt axis ranges, `None` on variants without tilt sensing.
    pub tilt: Option<TiltRange>,
    /// Marker byte gating the left bank status byte; `None` means the
    /// status byte is read unconditionally.
    pub left_bank_marker: Option<u8>,
    /// Whether a second, right-hand button bank exists.
    pub has_right_bank: bool,
    /// Whether the pad has a wheel/slider strip.
    pub has_wheel: bool,
    /// Slider deltas at or above this magnitude are treated as bounce
    /// and suppressed.
    pub wheel_jump_threshold: i32,
}

impl TabletProfile {
    /// Profile for a known model.
    pub fn for_model(model: TabletModel) -> Self {
        match model {
            TabletModel::Am1209 | TabletModel::Am1107 => Self {
                has_right_bank: true,
                ..Self::artmaster(model)
            },
            TabletModel::Am0806 | TabletModel::Am0605 | TabletModel::Rl0604 => {
                Self::artmaster(model)
            }
            TabletModel::Gp0806 => Self {
                model,
                report_len: REPORT_LEN,
                x_max: GP_MAX_ABS_X,
                y_max: GP_MAX_ABS_Y,
                pressure_max: GP_MAX_PRESSURE,
                pressure_shift: 0,
                tilt: None,
                left_bank_marker: None,
                has_right_bank: false,
                has_wheel: true,
                wheel_jump_threshold: GP_WHEEL_THRESHOLD,
            },
        }
    }

    /// Profile lookup from a USB identity pair.
    ///
    /// # Errors
    /// Returns `HanvonError::UnsupportedDevice` when the pair does not
    /// match any known Hanvon tablet.
    pub fn for_usb_ids(vendor_id: u16, product_id: u16) -> HanvonResult<Self> {
        if vendor_id != ids::VENDOR_ID {
            return Err(HanvonError::UnsupportedDevice {
                vendor_id,
                product_id,
            });
        }
        TabletModel::from_pid(product_id)
            .map(Self::for_model)
            .ok_or(HanvonError::UnsupportedDevice {
                vendor_id,
                product_id,
            })
    }

    fn artmaster(model: TabletModel) -> Self {
        Self {
            model,
            report_len: REPORT_LEN,
            x_max: AM_MAX_ABS_X,
            y_max: AM_MAX_ABS_Y,
            pressure_max: AM_MAX_PRESSURE,
            pressure_shift: 6,
            tilt: Some(TiltRange {
                x_max: AM_MAX_TILT_X,
                y_max: AM_MAX_TILT_Y,
            }),
            left_bank_marker: Some(crate::LEFT_BANK_MARKER),
            has_right_bank: false,
            has_wheel: true,
            wheel_jump_threshold: AM_WHEEL_THRESHOLD,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::product_ids;

    #[test]
    fn test_artmaster_profile() {
        let profile = TabletProfile::for_model(TabletModel::Am0806);
        assert_eq!(profile.report_len, 10);
        assert_eq!(profile.x_max, 0x27DE);
        assert_eq!(profile.pressure_shift, 6);
        assert_eq!(profile.wheel_jump_threshold, 4);
        assert_eq!(profile.left_bank_marker, Some(0x55));
        assert!(!profile.has_right_bank);
        assert!(profile.tilt.is_some());
    }

    #[test]
    fn test_right_bank_on_large_models_only() {
        assert!(TabletProfile::for_model(TabletModel::Am1209).has_right_bank);
        assert!(TabletProfile::for_model(TabletModel::Am1107).has_right_bank);
        assert!(!TabletProfile::for_model(TabletModel::Am0605).has_right_bank);
        assert!(!TabletProfile::for_model(TabletModel::Rl0604).has_right_bank);
        assert!(!TabletProfile::for_model(TabletModel::Gp0806).has_right_bank);
    }

    #[test]
    fn test_graphicpal_profile() {
        let profile = TabletProfile::for_model(TabletModel::Gp0806);
        assert_eq!(profile.pressure_shift, 0);
        assert_eq!(profile.pressure_max, 0xFFFF);
        assert_eq!(profile.wheel_jump_threshold, 10);
        assert_eq!(profile.left_bank_marker, None);
        assert!(profile.tilt.is_none());
    }

    #[test]
    fn test_usb_id_lookup() {
        let profile = TabletProfile::for_usb_ids(ids::VENDOR_ID, product_ids::AM1107)
            .expect("known device");
        assert_eq!(profile.model, TabletModel::Am1107);

        assert!(matches!(
            TabletProfile::for_usb_ids(ids::VENDOR_ID, 0x0001),
            Err(HanvonError::UnsupportedDevice { .. })
        ));
        assert!(matches!(
            TabletProfile::for_usb_ids(0x056A, product_ids::AM1107),
            Err(HanvonError::UnsupportedDevice { .. })
        ));
    }
}
