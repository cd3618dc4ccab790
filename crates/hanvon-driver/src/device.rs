//! Device lifecycle.
//!
//! A [`TabletDevice`] moves through attach, open, close, detach. Attach
//! validates the USB identity against the known device table and
//! declares capabilities to the sink; open spawns the reader thread;
//! close stops it and joins before returning, so no callback can fire
//! after close. The decoder state round-trips through the thread and a
//! re-open starts from a reset wheel baseline.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::JoinHandle;

use hid_hanvon_protocol::{DecoderState, TabletProfile};
use hidapi::HidApi;
use parking_lot::Mutex;
use tablet_hid_common::DeviceIdentity;
use tracing::{info, warn};

use crate::sink::{Capabilities, EventSink};
use crate::transfer::run_transfer_loop;
use crate::transport::{HidReportSource, ReportSource};
use crate::{DriverError, DriverResult};

/// Overrides the profile's wheel jump threshold when set to a positive
/// integer. Useful on worn slider strips that bounce more than stock.
pub const WHEEL_THRESHOLD_ENV: &str = "HANVON_WHEEL_JUMP_THRESHOLD";

/// One attached tablet and its reader thread.
pub struct TabletDevice {
    identity: DeviceIdentity,
    profile: TabletProfile,
    sink: Arc<Mutex<dyn EventSink + Send>>,
    state: Option<DecoderState>,
    stop: Arc<AtomicBool>,
    worker: Option<JoinHandle<DecoderState>>,
}

impl TabletDevice {
    /// Attach to an enumerated device: validate its identity, resolve
    /// the variant profile and declare capabilities to the sink.
    ///
    /// # Errors
    /// Returns `HanvonError::UnsupportedDevice` (via `Protocol`) when
    /// the identity is not a known Hanvon tablet.
    pub fn attach(
        identity: DeviceIdentity,
        sink: Arc<Mutex<dyn EventSink + Send>>,
    ) -> DriverResult<Self> {
        let mut profile = TabletProfile::for_usb_ids(identity.vendor_id, identity.product_id)?;

        if let Ok(raw) = std::env::var(WHEEL_THRESHOLD_ENV) {
            match raw.parse::<i32>() {
                Ok(threshold) if threshold > 0 => {
                    info!(threshold, "Wheel jump threshold overridden from environment");
                    profile.wheel_jump_threshold = threshold;
                }
                _ => warn!(value = %raw, "Ignoring invalid {WHEEL_THRESHOLD_ENV}"),
            }
        }

        let capabilities = Capabilities::from_profile(&profile, &identity);
        sink.lock().declare(&capabilities);
        info!(device = %identity, model = ?profile.model, "Attached tablet");

        let state = DecoderState::new(&profile);
        Ok(Self {
            identity,
            profile,
            sink,
            state: Some(state),
            stop: Arc::new(AtomicBool::new(false)),
            worker: None,
        })
    }

    pub fn identity(&self) -> &DeviceIdentity {
        &self.identity
    }

    pub fn profile(&self) -> &TabletProfile {
        &self.profile
    }

    pub fn is_open(&self) -> bool {
        self.worker.is_some()
    }

    /// Open the HID transport and start streaming events.
    ///
    /// # Errors
    /// Returns `DriverError::Setup` when the transport cannot be opened
    /// and `DriverError::AlreadyOpen` on a second open without a close.
    pub fn open(&mut self, api: &HidApi) -> DriverResult<()> {
        let source = HidReportSource::open(api, &self.identity)?;
        self.open_with(Box::new(source))
    }

    /// Start streaming from an arbitrary report source.
    pub fn open_with(&mut self, mut source: Box<dyn ReportSource>) -> DriverResult<()> {
        if self.worker.is_some() {
            return Err(DriverError::AlreadyOpen);
        }

        let mut state = self
            .state
            .take()
            .unwrap_or_else(|| DecoderState::new(&self.profile));
        // fresh wheel baseline on every open
        state.reset();

        self.stop.store(false, Ordering::Release);
        let profile = self.profile.clone();
        let sink = Arc::clone(&self.sink);
        let stop = Arc::clone(&self.stop);

        let worker = std::thread::Builder::new()
            .name(format!("hanvon-{}", self.identity))
            .spawn(move || run_transfer_loop(&profile, state, source.as_mut(), &sink, &stop))
            .map_err(|e| DriverError::Setup(format!("Failed to spawn reader thread: {e}")))?;

        self.worker = Some(worker);
        info!(device = %self.identity, "Opened tablet");
        Ok(())
    }

    /// Stop the reader thread and wait for it to finish. Idempotent;
    /// closing a device that is not open does nothing.
    pub fn close(&mut self) {
        self.stop.store(true, Ordering::Release);
        if let Some(worker) = self.worker.take() {
            match worker.join() {
                Ok(state) => self.state = Some(state),
                Err(_) => {
                    warn!(device = %self.identity, "Reader thread panicked");
                    self.state = Some(DecoderState::new(&self.profile));
                }
            }
            info!(device = %self.identity, "Closed tablet");
        }
    }

    /// Close and release the device.
    pub fn detach(mut self) {
        self.close();
    }
}

impl Drop for TabletDevice {
    fn drop(&mut self) {
        self.close();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{RecordingSink, ScriptedSource, Step};
    use hid_hanvon_protocol::{HanvonError, TabletEvent, TabletModel, ids::product_ids};

    fn recording_sink() -> Arc<Mutex<RecordingSink>> {
        Arc::new(Mutex::new(RecordingSink::default()))
    }

    fn attach(product_id: u16, sink: &Arc<Mutex<RecordingSink>>) -> TabletDevice {
        let identity = DeviceIdentity::new(0x0b57, product_id, "usb-test-1");
        let dyn_sink: Arc<Mutex<dyn EventSink + Send>> = sink.clone();
        TabletDevice::attach(identity, dyn_sink).expect("known device")
    }

    #[test]
    fn test_attach_declares_capabilities() {
        let sink = recording_sink();
        let device = attach(product_ids::AM1209, &sink);

        assert_eq!(device.profile().model, TabletModel::Am1209);
        let declared = &sink.lock().declared;
        assert_eq!(declared.len(), 1);
        assert_eq!(declared[0].name, "Hanvon ArtMaster AM1209");
        assert_eq!(declared[0].phys, "usb-test-1/input0");
    }

    #[test]
    fn test_attach_rejects_unknown_device() {
        let sink = recording_sink();
        let identity = DeviceIdentity::new(0x056A, 0x00DE, "usb-test-1");
        let dyn_sink: Arc<Mutex<dyn EventSink + Send>> = sink.clone();

        let result = TabletDevice::attach(identity, dyn_sink);
        assert!(matches!(
            result,
            Err(DriverError::Protocol(HanvonError::UnsupportedDevice { .. }))
        ));
        assert!(sink.lock().declared.is_empty());
    }

    #[test]
    fn test_open_streams_until_shutdown_then_close() {
        let sink = recording_sink();
        let mut device = attach(product_ids::AM0806, &sink);

        let mut report = vec![0u8; 10];
        report[0] = 0x02;
        report[1] = 0x80;
        report[3] = 0x42;
        device
            .open_with(Box::new(ScriptedSource::new(vec![
                Step::Report(report),
                Step::Shutdown,
            ])))
            .expect("open");
        assert!(device.is_open());

        device.close();
        assert!(!device.is_open());
        assert!(sink.lock().events.contains(&TabletEvent::Position {
            x: 0x0042,
            y: 0x0000
        }));
    }

    #[test]
    fn test_double_open_rejected() {
        let sink = recording_sink();
        let mut device = attach(product_ids::AM0605, &sink);

        device
            .open_with(Box::new(ScriptedSource::new(vec![])))
            .expect("first open");
        let second = device.open_with(Box::new(ScriptedSource::new(vec![])));
        assert!(matches!(second, Err(DriverError::AlreadyOpen)));
        device.close();
    }

    #[test]
    fn test_close_is_idempotent() {
        let sink = recording_sink();
        let mut device = attach(product_ids::RL0604, &sink);

        device.close(); // never opened
        device
            .open_with(Box::new(ScriptedSource::new(vec![])))
            .expect("open");
        device.close();
        device.close(); // second close is a no-op
        assert!(!device.is_open());
    }

    #[test]
    fn test_reopen_resets_wheel_baseline() {
        let sink = recording_sink();
        let mut device = attach(product_ids::AM0806, &sink);

        let wheel = |pos: u8| {
            let mut report = vec![0u8; 10];
            report[0] = 0x01;
            report[1] = 0x55;
            report[2] = pos;
            Step::Report(report)
        };

        device
            .open_with(Box::new(ScriptedSource::new(vec![wheel(5), wheel(8)])))
            .expect("first open");
        device.close();

        // the first reading of the new session must anchor silently even
        // though the previous session left the baseline at 8
        device
            .open_with(Box::new(ScriptedSource::new(vec![wheel(10), wheel(12)])))
            .expect("second open");
        device.close();

        let deltas: Vec<_> = sink
            .lock()
            .events
            .iter()
            .filter_map(|e| match e {
                TabletEvent::Wheel(d) => Some(*d),
                _ => None,
            })
            .collect();
        assert_eq!(deltas, vec![3, 2]);
    }

    #[test]
    fn test_wheel_threshold_env_override() {
        let sink = recording_sink();
        std::env::set_var(WHEEL_THRESHOLD_ENV, "9");
        let device = attach(product_ids::AM1107, &sink);
        std::env::remove_var(WHEEL_THRESHOLD_ENV);

        assert_eq!(device.profile().wheel_jump_threshold, 9);
    }
}
