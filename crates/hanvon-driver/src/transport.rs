//! HID transport seam.
//!
//! The transfer loop reads raw reports through [`ReportSource`] so the
//! real hidapi-backed transport and scripted test doubles are
//! interchangeable.

use hidapi::{HidApi, HidDevice};
use tablet_hid_common::DeviceIdentity;

use crate::{DriverError, DriverResult};

/// Result of one blocking read attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReadOutcome {
    /// A report of this many bytes landed in the buffer.
    Report(usize),
    /// The read timed out with no data; not an error.
    Idle,
    /// The source is finished and will never produce another report.
    Shutdown,
    /// A transient transport failure; the loop may retry.
    Failure(String),
}

/// Blocking source of raw interrupt reports.
pub trait ReportSource: Send {
    /// Read one report into `buffer`, waiting at most `timeout_ms`.
    fn read_report(&mut self, buffer: &mut [u8], timeout_ms: i32) -> ReadOutcome;
}

/// hidapi-backed transport for one open tablet.
pub struct HidReportSource {
    device: HidDevice,
}

impl HidReportSource {
    /// Open the interrupt endpoint of the tablet named by `identity`.
    ///
    /// # Errors
    /// Returns `DriverError::Setup` when the device is not enumerated or
    /// cannot be opened (typically permissions).
    pub fn open(api: &HidApi, identity: &DeviceIdentity) -> DriverResult<Self> {
        let info = api
            .device_list()
            .find(|info| {
                identity.matches(info.vendor_id(), info.product_id())
                    && (identity.path.is_empty()
                        || info.path().to_string_lossy() == identity.path)
            })
            .ok_or_else(|| {
                DriverError::Setup(format!("No HID device matching {identity}"))
            })?;
        let device = info
            .open_device(api)
            .map_err(|e| DriverError::Setup(format!("Failed to open {identity}: {e}")))?;
        Ok(Self { device })
    }
}

impl ReportSource for HidReportSource {
    fn read_report(&mut self, buffer: &mut [u8], timeout_ms: i32) -> ReadOutcome {
        match self.device.read_timeout(buffer, timeout_ms) {
            Ok(0) => ReadOutcome::Idle,
            Ok(n) => ReadOutcome::Report(n),
            Err(e) => ReadOutcome::Failure(e.to_string()),
        }
    }
}
