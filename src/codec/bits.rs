//! LSB cursors over a 16-bit sample stream.
//!
//! Bit `i` of the stream is bit 0 of `samples[i]`. Multi-bit values are
//! written and read least-significant bit first.

/// Read the least-significant bit of a sample.
#[inline]
pub fn lsb(sample: i16) -> bool {
    sample & 1 == 1
}

/// Return `sample` with bit 0 replaced by `bit`; bits 1..15 are untouched.
#[inline]
pub fn with_lsb(sample: i16, bit: bool) -> i16 {
    if bit {
        sample | 1
    } else {
        sample & !1
    }
}

/// Sequential writer storing one bit per sample.
///
/// Callers must check that the stream is long enough before writing;
/// running past the end panics.
pub(crate) struct LsbWriter<'a> {
    samples: &'a mut [i16],
    position: usize,
}

impl<'a> LsbWriter<'a> {
    pub(crate) fn new(samples: &'a mut [i16]) -> Self {
        Self {
            samples,
            position: 0,
        }
    }

    /// Number of samples written so far.
    pub(crate) fn position(&self) -> usize {
        self.position
    }

    fn write_bit(&mut self, bit: bool) {
        let sample = &mut self.samples[self.position];
        *sample = with_lsb(*sample, bit);
        self.position += 1;
    }

    /// Write the low `width` bits of `value`, LSB first.
    pub(crate) fn write_bits(&mut self, value: u32, width: usize) {
        debug_assert!(width <= 32);
        for offset in 0..width {
            self.write_bit((value >> offset) & 1 == 1);
        }
    }

    pub(crate) fn write_bytes(&mut self, bytes: &[u8]) {
        for &byte in bytes {
            self.write_bits(u32::from(byte), 8);
        }
    }
}

/// Sequential reader, the mirror of [`LsbWriter`].
pub(crate) struct LsbReader<'a> {
    samples: &'a [i16],
    position: usize,
}

impl<'a> LsbReader<'a> {
    pub(crate) fn new(samples: &'a [i16]) -> Self {
        Self {
            samples,
            position: 0,
        }
    }

    pub(crate) fn position(&self) -> usize {
        self.position
    }

    /// Samples not yet consumed.
    pub(crate) fn remaining(&self) -> usize {
        self.samples.len() - self.position
    }

    fn read_bit(&mut self) -> bool {
        let bit = lsb(self.samples[self.position]);
        self.position += 1;
        bit
    }

    /// Read `width` bits into the low end of a `u32`, LSB first.
    pub(crate) fn read_bits(&mut self, width: usize) -> u32 {
        debug_assert!(width <= 32);
        (0..width).fold(0u32, |value, offset| {
            value | (u32::from(self.read_bit()) << offset)
        })
    }

    pub(crate) fn read_bytes(&mut self, len: usize) -> Vec<u8> {
        (0..len).map(|_| self.read_bits(8) as u8).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_lsb_keeps_high_bits() {
        assert_eq!(with_lsb(-32768, true), -32767);
        assert_eq!(with_lsb(-1, false), -2);
        assert_eq!(with_lsb(0x7ffe, true), 0x7fff);
        assert_eq!(with_lsb(0x1234, false), 0x1234);
    }

    #[test]
    fn test_byte_is_lsb_first() {
        let mut samples = [0i16; 8];
        LsbWriter::new(&mut samples).write_bytes(&[0b0000_0101]);

        assert_eq!(samples, [1, 0, 1, 0, 0, 0, 0, 0]);
    }

    #[test]
    fn test_read_back_u32() {
        let mut samples = [0x0f0i16; 40];
        let mut writer = LsbWriter::new(&mut samples);
        writer.write_bits(0xdead_beef, 32);
        writer.write_bits(0x5a, 8);
        assert_eq!(writer.position(), 40);

        let mut reader = LsbReader::new(&samples);
        assert_eq!(reader.read_bits(32), 0xdead_beef);
        assert_eq!(reader.read_bits(8), 0x5a);
        assert_eq!(reader.remaining(), 0);
    }

    #[test]
    fn test_partial_write_leaves_rest() {
        let mut samples = [7i16; 16];
        LsbWriter::new(&mut samples).write_bytes(&[0]);

        assert!(samples[..8].iter().all(|&s| s == 6));
        assert!(samples[8..].iter().all(|&s| s == 7));
    }
}
