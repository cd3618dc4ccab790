//! Event delivery seam.
//!
//! The transfer loop pushes decoded events through an [`EventSink`].
//! Capabilities are declared once at attach time so the sink can set up
//! whatever backend it fronts before the first event arrives.

use hid_hanvon_protocol::{ButtonId, PadBank, TabletEvent, TabletProfile};
use tablet_hid_common::DeviceIdentity;

/// Absolute axes a Hanvon tablet can report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AbsAxis {
    X,
    Y,
    Pressure,
    TiltX,
    TiltY,
}

/// Declared range of one absolute axis.
///
/// `fuzz` is the noise window backends may use for input filtering; the
/// position axes carry a small one because the digitizer jitters at rest.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AbsAxisSpec {
    pub axis: AbsAxis,
    pub min: i32,
    pub max: i32,
    pub fuzz: i32,
}

/// Everything a sink needs to know about a device before events flow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Capabilities {
    /// Human-readable device name.
    pub name: String,
    /// Physical topology label, `<usb path>/input0`.
    pub phys: String,
    pub axes: Vec<AbsAxisSpec>,
    pub buttons: Vec<ButtonId>,
    /// Whether relative wheel events will be emitted.
    pub has_wheel: bool,
}

impl Capabilities {
    /// Derive the advertised capability set from a device profile.
    pub fn from_profile(profile: &TabletProfile, identity: &DeviceIdentity) -> Self {
        let mut axes = vec![
            AbsAxisSpec {
                axis: AbsAxis::X,
                min: 0,
                max: i32::from(profile.x_max),
                fuzz: 4,
            },
            AbsAxisSpec {
                axis: AbsAxis::Y,
                min: 0,
                max: i32::from(profile.y_max),
                fuzz: 4,
            },
            AbsAxisSpec {
                axis: AbsAxis::Pressure,
                min: 0,
                max: i32::from(profile.pressure_max),
                fuzz: 0,
            },
        ];
        if let Some(tilt) = profile.tilt {
            axes.push(AbsAxisSpec {
                axis: AbsAxis::TiltX,
                min: 0,
                max: i32::from(tilt.x_max),
                fuzz: 0,
            });
            axes.push(AbsAxisSpec {
                axis: AbsAxis::TiltY,
                min: 0,
                max: i32::from(tilt.y_max),
                fuzz: 0,
            });
        }

        let mut buttons = vec![ButtonId::PenTip, ButtonId::PenBarrel];
        for index in 0..=3 {
            buttons.push(ButtonId::Pad {
                bank: PadBank::Left,
                index,
            });
        }
        if profile.has_right_bank {
            for index in 0..=3 {
                buttons.push(ButtonId::Pad {
                    bank: PadBank::Right,
                    index,
                });
            }
        }

        Self {
            name: profile.model.name().to_string(),
            phys: identity.phys(),
            axes,
            buttons,
            has_wheel: profile.has_wheel,
        }
    }
}

/// Consumer of decoded tablet events.
///
/// `emit` receives the events of one frame in decode order; `sync`
/// closes the frame. Sinks must tolerate re-asserted button states and
/// empty frames (a `sync` with no preceding `emit`).
pub trait EventSink {
    fn declare(&mut self, capabilities: &Capabilities);
    fn emit(&mut self, event: TabletEvent);
    fn sync(&mut self);
}
