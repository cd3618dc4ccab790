//! Userspace driver runtime for Hanvon USB graphics tablets.
//!
//! Pairs the pure decoder from `hid-hanvon-protocol` with the pieces a
//! running driver needs: a HID transport, a per-device transfer loop on
//! a dedicated reader thread, capability advertisement, and device
//! lifecycle (attach, open, close, detach).
//!
//! Event delivery is pluggable through [`EventSink`]; the driver itself
//! has no opinion about where events go (an evdev bridge, a test
//! recorder, a protocol translator).

#![deny(unsafe_op_in_unsafe_fn)]
#![deny(clippy::unwrap_used)]

pub mod device;
pub mod sink;
pub mod transfer;
pub mod transport;

pub use device::TabletDevice;
pub use sink::{AbsAxis, AbsAxisSpec, Capabilities, EventSink};
pub use transport::{HidReportSource, ReadOutcome, ReportSource};

use hid_hanvon_protocol::HanvonError;
use thiserror::Error;

/// Errors surfaced by the driver runtime.
#[derive(Error, Debug)]
pub enum DriverError {
    #[error(transparent)]
    Protocol(#[from] HanvonError),

    #[error("HID transport setup failed: {0}")]
    Setup(String),

    #[error("Device is already open")]
    AlreadyOpen,
}

/// Convenience result alias for driver operations.
pub type DriverResult<T> = Result<T, DriverError>;

#[cfg(test)]
pub(crate) mod testing;
