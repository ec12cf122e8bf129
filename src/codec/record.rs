//! The hidden record and its size arithmetic.

use crate::config::{BITS_PER_BYTE, HEADER_BITS};
use std::borrow::Cow;

/// A hidden file: opaque name bytes plus content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HiddenFile {
    /// File name as stored; not required to be UTF-8.
    pub name: Vec<u8>,
    /// File content.
    pub payload: Vec<u8>,
}

impl HiddenFile {
    pub fn new(name: impl Into<Vec<u8>>, payload: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.into(),
            payload: payload.into(),
        }
    }

    /// Name for display, with invalid UTF-8 replaced.
    pub fn name_lossy(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.name)
    }

    /// Carrier samples this record occupies, or `None` on overflow.
    pub fn required_bits(&self) -> Option<usize> {
        required_bits(self.name.len(), self.payload.len())
    }
}

/// Decoded header fields of a record found in a carrier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordHeader {
    pub payload_len: u32,
    pub name_len: u8,
}

impl RecordHeader {
    pub fn required_bits(&self) -> Option<usize> {
        required_bits(usize::from(self.name_len), self.payload_len as usize)
    }
}

/// Total record bits for the given name and payload sizes.
pub fn required_bits(name_len: usize, payload_len: usize) -> Option<usize> {
    name_len
        .checked_add(payload_len)?
        .checked_mul(BITS_PER_BYTE)?
        .checked_add(HEADER_BITS)
}

/// Largest payload a carrier of `sample_count` samples can hold next to a
/// name of `name_len` bytes.
pub fn max_payload_len(sample_count: usize, name_len: usize) -> usize {
    sample_count
        .saturating_sub(HEADER_BITS)
        .saturating_sub(name_len.saturating_mul(BITS_PER_BYTE))
        / BITS_PER_BYTE
}
