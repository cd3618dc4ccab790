//! Common HID utilities for graphics-tablet protocol implementations
//!
//! This crate provides the small pieces shared across tablet protocol
//! and driver crates: a bounds-checked report cursor, a device identity
//! record, and a common error taxonomy.

#![deny(unsafe_op_in_unsafe_fn)]
#![deny(clippy::unwrap_used)]

pub mod device_info;
pub mod report_parser;

pub use device_info::*;
pub use report_parser::*;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum HidCommonError {
    #[error("Device not found: {0}")]
    DeviceNotFound(String),

    #[error("Failed to open device: {0}")]
    OpenError(String),

    #[error("Failed to read from device: {0}")]
    ReadError(String),

    #[error("Invalid report format: {0}")]
    InvalidReport(String),

    #[error("Device disconnected")]
    Disconnected,

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

pub type HidCommonResult<T> = Result<T, HidCommonError>;
