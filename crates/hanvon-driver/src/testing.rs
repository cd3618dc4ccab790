//! Scripted test doubles for the transport and sink seams.

use std::collections::VecDeque;

use hid_hanvon_protocol::TabletEvent;

use crate::sink::{Capabilities, EventSink};
use crate::transport::{ReadOutcome, ReportSource};

/// One scripted transport interaction.
#[derive(Debug, Clone)]
pub enum Step {
    Report(Vec<u8>),
    Idle,
    Shutdown,
    Failure(String),
}

/// Replays a fixed script of read outcomes, then shuts down.
pub struct ScriptedSource {
    script: VecDeque<Step>,
}

impl ScriptedSource {
    pub fn new(script: Vec<Step>) -> Self {
        Self {
            script: script.into(),
        }
    }
}

impl ReportSource for ScriptedSource {
    fn read_report(&mut self, buffer: &mut [u8], _timeout_ms: i32) -> ReadOutcome {
        match self.script.pop_front() {
            Some(Step::Report(bytes)) => {
                buffer[..bytes.len()].copy_from_slice(&bytes);
                ReadOutcome::Report(bytes.len())
            }
            Some(Step::Idle) => ReadOutcome::Idle,
            Some(Step::Shutdown) | None => ReadOutcome::Shutdown,
            Some(Step::Failure(msg)) => ReadOutcome::Failure(msg),
        }
    }
}

/// Records everything pushed through the sink.
#[derive(Debug, Clone, Default)]
pub struct RecordingSink {
    pub declared: Vec<Capabilities>,
    pub events: Vec<TabletEvent>,
    pub syncs: usize,
}

impl EventSink for RecordingSink {
    fn declare(&mut self, capabilities: &Capabilities) {
        self.declared.push(capabilities.clone());
    }

    fn emit(&mut self, event: TabletEvent) {
        self.events.push(event);
    }

    fn sync(&mut self) {
        self.syncs += 1;
    }
}
