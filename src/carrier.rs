//! In-memory PCM carrier: format header plus interleaved 16-bit samples.

use crate::codec::{self, HiddenFile};
use crate::config::REQUIRED_BITS_PER_SAMPLE;
use crate::error::{DecodeError, EncodeError, Error, Result};
use serde::Serialize;

/// Format fields reported by the container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PcmFormat {
    /// Interleaved channel count.
    pub channels: u16,
    /// Frames per second.
    pub sample_rate: u32,
    /// Always 16 for a carrier the codec accepts.
    pub bits_per_sample: u16,
}

impl PcmFormat {
    /// 16-bit format with the given layout.
    pub fn new(channels: u16, sample_rate: u32) -> Self {
        Self {
            channels,
            sample_rate,
            bits_per_sample: REQUIRED_BITS_PER_SAMPLE,
        }
    }

    pub fn bytes_per_sample(&self) -> u16 {
        self.bits_per_sample.div_ceil(8)
    }

    /// Bytes per frame (all channels).
    pub fn block_align(&self) -> u32 {
        u32::from(self.channels) * u32::from(self.bytes_per_sample())
    }

    pub fn byte_rate(&self) -> u64 {
        u64::from(self.sample_rate) * u64::from(self.block_align())
    }

    /// Check the format can be carried as `i16` samples.
    pub fn validate(&self) -> Result<()> {
        if self.bits_per_sample != REQUIRED_BITS_PER_SAMPLE {
            return Err(Error::UnsupportedFormat(format!(
                "{}-bit samples (only 16-bit PCM is supported)",
                self.bits_per_sample
            )));
        }
        if self.channels == 0 {
            return Err(Error::UnsupportedFormat("zero channels".to_string()));
        }
        Ok(())
    }
}

/// Decoded audio holding the hidden record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Carrier {
    format: PcmFormat,
    samples: Vec<i16>,
}

impl Carrier {
    pub fn new(format: PcmFormat, samples: Vec<i16>) -> Self {
        Self { format, samples }
    }

    pub fn format(&self) -> PcmFormat {
        self.format
    }

    /// Total samples across all channels; also the capacity in bits.
    pub fn sample_count(&self) -> usize {
        self.samples.len()
    }

    pub fn frame_count(&self) -> usize {
        match self.format.channels {
            0 => 0,
            channels => self.samples.len() / usize::from(channels),
        }
    }

    /// Playback length in seconds.
    pub fn duration_secs(&self) -> f64 {
        let per_second = u64::from(self.format.sample_rate) * u64::from(self.format.channels);
        if per_second == 0 {
            return 0.0;
        }
        self.samples.len() as f64 / per_second as f64
    }

    /// Least-significant bit of the sample at `index`.
    pub fn lsb(&self, index: usize) -> Option<bool> {
        self.samples.get(index).copied().map(codec::lsb)
    }

    /// Set the least-significant bit of the sample at `index`.
    ///
    /// Returns `false` if `index` is out of range.
    pub fn set_lsb(&mut self, index: usize, bit: bool) -> bool {
        match self.samples.get_mut(index) {
            Some(sample) => {
                *sample = codec::with_lsb(*sample, bit);
                true
            }
            None => false,
        }
    }

    pub fn samples(&self) -> &[i16] {
        &self.samples
    }

    pub fn samples_mut(&mut self) -> &mut [i16] {
        &mut self.samples
    }

    pub fn into_samples(self) -> Vec<i16> {
        self.samples
    }

    /// Payload bytes that fit next to a name of `name_len` bytes.
    pub fn capacity(&self, name_len: usize) -> usize {
        codec::max_payload_len(self.samples.len(), name_len)
    }

    /// Hide a file in this carrier; see [`codec::embed`].
    pub fn embed(&mut self, name: &[u8], payload: &[u8]) -> std::result::Result<(), EncodeError> {
        codec::embed(&mut self.samples, name, payload)
    }

    /// Recover the hidden file; see [`codec::extract`].
    pub fn extract(&self) -> std::result::Result<HiddenFile, DecodeError> {
        codec::extract(&self.samples)
    }
}
