//! Per-device transfer loop.
//!
//! One dedicated thread per open tablet: block on the transport, decode,
//! forward the frame, sync. The loop owns the decoder state and hands it
//! back when it exits so a later re-open resumes from a clean baseline.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use hid_hanvon_protocol::{DecoderState, TabletProfile, decode};
use parking_lot::Mutex;
use tracing::{debug, warn};

use crate::sink::EventSink;
use crate::transport::{ReadOutcome, ReportSource};

/// Poll timeout for one transport read. Short enough that a stop request
/// is honored promptly.
const READ_TIMEOUT_MS: i32 = 20;

/// Backoff after a transient transport failure.
const FAILURE_BACKOFF: Duration = Duration::from_millis(1);

/// Run the transfer loop until `stop` is set or the source shuts down.
///
/// Malformed reports are logged and dropped; the loop keeps running.
/// Every successfully decoded report closes a frame with `sync`, even
/// when it produced no events.
pub fn run_transfer_loop(
    profile: &TabletProfile,
    mut state: DecoderState,
    source: &mut dyn ReportSource,
    sink: &Arc<Mutex<dyn EventSink + Send>>,
    stop: &AtomicBool,
) -> DecoderState {
    let mut buffer = [0u8; 64];
    while !stop.load(Ordering::Acquire) {
        match source.read_report(&mut buffer, READ_TIMEOUT_MS) {
            ReadOutcome::Report(len) => {
                match decode(profile, &mut state, &buffer[..len]) {
                    Ok(events) => {
                        let mut sink = sink.lock();
                        for event in &events {
                            sink.emit(*event);
                        }
                        sink.sync();
                    }
                    Err(e) => {
                        warn!(model = ?profile.model, error = %e, "Dropping malformed report");
                    }
                }
            }
            ReadOutcome::Idle => {}
            ReadOutcome::Shutdown => {
                debug!(model = ?profile.model, "Report source shut down");
                break;
            }
            ReadOutcome::Failure(msg) => {
                warn!(model = ?profile.model, error = %msg, "Transport read failed");
                std::thread::sleep(FAILURE_BACKOFF);
            }
        }
    }
    state
}
