//! Writes a hidden record into the carrier's LSB stream.

use crate::codec::bits::LsbWriter;
use crate::codec::record::{required_bits, HiddenFile};
use crate::config::{MAX_NAME_LENGTH, NAME_LENGTH_BITS, PAYLOAD_LENGTH_BITS};
use crate::error::EncodeError;

/// Embed `name` and `payload` into the least-significant bits of `samples`.
///
/// The record is laid out as payload length (32 bits), name length (8 bits),
/// name bytes, payload bytes, one bit per sample starting at `samples[0]`.
/// Every check runs before the first write, so on error `samples` is
/// exactly as it was.
///
/// # Errors
///
/// * [`EncodeError::EmptyName`] / [`EncodeError::NameTooLong`] - name outside 1..=255 bytes
/// * [`EncodeError::EmptyPayload`] / [`EncodeError::PayloadTooLarge`] - payload
///   empty or wider than the 32-bit length field
/// * [`EncodeError::CapacityExceeded`] - fewer samples than record bits
///
/// # Example
///
/// ```
/// use wav_lsb::codec::{embed, extract};
///
/// let mut samples = vec![0i16; 1000];
/// embed(&mut samples, b"a.txt", b"AB").unwrap();
///
/// let hidden = extract(&samples).unwrap();
/// assert_eq!(hidden.name, b"a.txt");
/// assert_eq!(hidden.payload, b"AB");
/// ```
pub fn embed(samples: &mut [i16], name: &[u8], payload: &[u8]) -> Result<(), EncodeError> {
    if name.is_empty() {
        return Err(EncodeError::EmptyName);
    }
    if name.len() > MAX_NAME_LENGTH {
        return Err(EncodeError::NameTooLong { len: name.len() });
    }
    if payload.is_empty() {
        return Err(EncodeError::EmptyPayload);
    }
    let payload_len = u32::try_from(payload.len())
        .map_err(|_| EncodeError::PayloadTooLarge { len: payload.len() })?;

    let available_bits = samples.len();
    let needed_bits = required_bits(name.len(), payload.len()).ok_or(
        EncodeError::CapacityExceeded {
            needed_bits: usize::MAX,
            available_bits,
        },
    )?;
    if needed_bits > available_bits {
        return Err(EncodeError::CapacityExceeded {
            needed_bits,
            available_bits,
        });
    }

    let mut writer = LsbWriter::new(samples);
    writer.write_bits(payload_len, PAYLOAD_LENGTH_BITS);
    writer.write_bits(name.len() as u32, NAME_LENGTH_BITS);
    writer.write_bytes(name);
    writer.write_bytes(payload);
    debug_assert_eq!(writer.position(), needed_bits);

    Ok(())
}

/// Embed a [`HiddenFile`]; see [`embed`].
pub fn embed_file(samples: &mut [i16], file: &HiddenFile) -> Result<(), EncodeError> {
    embed(samples, &file.name, &file.payload)
}
