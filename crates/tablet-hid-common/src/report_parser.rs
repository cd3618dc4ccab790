//! HID report parsing utilities
//!
//! Tablet interrupt reports are short fixed-length frames with big-endian
//! multi-byte fields. The cursor borrows the report; the decode path must
//! not allocate per frame.

use crate::{HidCommonError, HidCommonResult};

/// Sequential bounds-checked reader over one raw report.
pub struct ReportParser<'a> {
    buffer: &'a [u8],
    position: usize,
}

impl<'a> ReportParser<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self {
            buffer: data,
            position: 0,
        }
    }

    pub fn remaining(&self) -> usize {
        self.buffer.len().saturating_sub(self.position)
    }

    /// # Errors
    /// Returns `HidCommonError::InvalidReport` when the report is exhausted.
    pub fn read_u8(&mut self) -> HidCommonResult<u8> {
        let Some(&value) = self.buffer.get(self.position) else {
            return Err(HidCommonError::InvalidReport(
                "Unexpected end of data".to_string(),
            ));
        };
        self.position += 1;
        Ok(value)
    }

    /// # Errors
    /// Returns `HidCommonError::InvalidReport` when fewer than two bytes remain.
    pub fn read_u16_be(&mut self) -> HidCommonResult<u16> {
        let hi = u16::from(self.read_u8()?);
        let lo = u16::from(self.read_u8()?);
        Ok((hi << 8) | lo)
    }

    /// # Errors
    /// Returns `HidCommonError::InvalidReport` when fewer than two bytes remain.
    pub fn read_u16_le(&mut self) -> HidCommonResult<u16> {
        let lo = u16::from(self.read_u8()?);
        let hi = u16::from(self.read_u8()?);
        Ok((hi << 8) | lo)
    }

    /// # Errors
    /// Returns `HidCommonError::InvalidReport` when the report is exhausted.
    pub fn peek_u8(&self) -> HidCommonResult<u8> {
        self.buffer.get(self.position).copied().ok_or_else(|| {
            HidCommonError::InvalidReport("Unexpected end of data".to_string())
        })
    }

    pub fn skip(&mut self, count: usize) {
        self.position = (self.position + count).min(self.buffer.len());
    }

    pub fn reset(&mut self) {
        self.position = 0;
    }

    pub fn slice(&self) -> &'a [u8] {
        self.buffer
    }
}
