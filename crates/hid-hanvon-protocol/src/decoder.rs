//! Report decoding for Hanvon tablets.
//!
//! `decode` is the single entry point: one raw interrupt report plus the
//! per-device [`DecoderState`] in, one ordered event batch out. It is a
//! pure synchronous transform — no I/O, no blocking — and the only
//! allocation is the output batch.

use tablet_hid_common::ReportParser;

use crate::{
    BANK_STATUS_SIGNATURE, ButtonId, HanvonError, HanvonResult, PadBank, RIGHT_BANK_MARKER,
    SLIDER_POSITION_MAX, TAG_BUTTONS, TAG_POSITION, TabletEvent, TabletProfile, WheelTracker,
};

/// Last decoded axis values.
///
/// Position frames with a cleared proximity nibble update pressure only;
/// the remaining axes must be treated as unchanged, so the decoder keeps
/// the last full reading here.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AxisSnapshot {
    pub x: u16,
    pub y: u16,
    pub tilt_x: u8,
    pub tilt_y: u8,
    pub pressure: u16,
}

/// Mutable per-device decode state. One instance per attached tablet,
/// owned by that tablet's transfer loop.
#[derive(Debug, Clone)]
pub struct DecoderState {
    wheel: WheelTracker,
    snapshot: AxisSnapshot,
}

impl DecoderState {
    pub fn new(profile: &TabletProfile) -> Self {
        Self {
            wheel: WheelTracker::new(profile.wheel_jump_threshold),
            snapshot: AxisSnapshot::default(),
        }
    }

    /// Reset for a fresh open: wheel baseline back to the sentinel so
    /// the first slider reading cannot emit a spurious delta.
    pub fn reset(&mut self) {
        self.wheel.reset();
    }

    pub fn snapshot(&self) -> &AxisSnapshot {
        &self.snapshot
    }

    pub fn wheel(&self) -> &WheelTracker {
        &self.wheel
    }
}

/// Decode one raw report into a batch of normalized events.
///
/// Reports whose tag is neither a button nor a position frame decode to
/// an empty batch; that is not an error. The caller emits one frame-sync
/// marker after forwarding the batch.
///
/// # Errors
/// Returns `HanvonError::InvalidReportSize` when the buffer length does
/// not match the profile's report length; no events are produced and the
/// state is left untouched.
pub fn decode(
    profile: &TabletProfile,
    state: &mut DecoderState,
    report: &[u8],
) -> HanvonResult<Vec<TabletEvent>> {
    if report.len() != profile.report_len {
        return Err(HanvonError::InvalidReportSize {
            expected: profile.report_len,
            actual: report.len(),
        });
    }

    let mut events = Vec::new();
    match report[0] {
        TAG_BUTTONS => decode_button_frame(profile, state, report, &mut events),
        TAG_POSITION => decode_position_frame(profile, state, report, &mut events)?,
        _ => {}
    }
    Ok(events)
}

/// Button frame: up to two marker-gated banks, each sharing the same
/// status-byte interpretation.
fn decode_button_frame(
    profile: &TabletProfile,
    state: &mut DecoderState,
    report: &[u8],
    events: &mut Vec<TabletEvent>,
) {
    let left_gated = match profile.left_bank_marker {
        Some(marker) => report[1] == marker,
        None => true,
    };
    if left_gated {
        decode_bank(profile, state, PadBank::Left, report[2], events);
    }

    if profile.has_right_bank && report[3] == RIGHT_BANK_MARKER {
        decode_bank(profile, state, PadBank::Right, report[4], events);
    }
}

/// One bank status byte: either three button bits or a slider position.
///
/// Bit 0 is deliberately not decoded here; left index 0 is driven from
/// the tool-identity bit of position frames.
fn decode_bank(
    profile: &TabletProfile,
    state: &mut DecoderState,
    bank: PadBank,
    status: u8,
    events: &mut Vec<TabletEvent>,
) {
    if status & 0xF0 == BANK_STATUS_SIGNATURE {
        for (bit, index) in [(0x02u8, 1u8), (0x04, 2), (0x08, 3)] {
            events.push(TabletEvent::Button {
                id: ButtonId::Pad { bank, index },
                pressed: status & bit != 0,
            });
        }
    } else if profile.has_wheel && status <= SLIDER_POSITION_MAX {
        if let Some(diff) = state.wheel.observe(i32::from(status)) {
            events.push(TabletEvent::Wheel(diff));
        }
    }
}

/// Position frame: axes gated by the proximity nibble, pen buttons
/// re-asserted every frame.
fn decode_position_frame(
    profile: &TabletProfile,
    state: &mut DecoderState,
    report: &[u8],
    events: &mut Vec<TabletEvent>,
) -> HanvonResult<()> {
    let flags = report[1];

    if flags & 0xF0 != 0 {
        let mut parser = ReportParser::new(report);
        parser.skip(2);
        let x = parser.read_u16_be()?;
        let y = parser.read_u16_be()?;
        let pressure = parser.read_u16_be()? >> profile.pressure_shift;

        events.push(TabletEvent::Position { x, y });
        if profile.tilt.is_some() {
            // The tilt bytes overlap the pressure field: tilt-x shares
            // the pressure low byte on the wire.
            let tilt_x = report[7] & 0x3F;
            let tilt_y = report[8];
            events.push(TabletEvent::Tilt {
                x: tilt_x,
                y: tilt_y,
            });
            state.snapshot.tilt_x = tilt_x;
            state.snapshot.tilt_y = tilt_y;
        }
        events.push(TabletEvent::Pressure(pressure));

        state.snapshot.x = x;
        state.snapshot.y = y;
        state.snapshot.pressure = pressure;
    } else {
        // Pen lifted: force pressure to zero, keep position and tilt at
        // their last known values without re-emitting them.
        events.push(TabletEvent::Pressure(0));
        state.snapshot.pressure = 0;
    }

    events.push(TabletEvent::Button {
        id: ButtonId::PenTip,
        pressed: flags & 0x01 != 0,
    });
    events.push(TabletEvent::Button {
        id: ButtonId::PenBarrel,
        pressed: flags & 0x02 != 0,
    });
    events.push(TabletEvent::Button {
        id: ButtonId::Pad {
            bank: PadBank::Left,
            index: 0,
        },
        pressed: flags & 0x20 != 0,
    });
    Ok(())
}
