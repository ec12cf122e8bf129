//! Recovers a hidden record from the carrier's LSB stream.

use crate::codec::bits::LsbReader;
use crate::codec::record::{HiddenFile, RecordHeader};
use crate::config::{
    BITS_PER_BYTE, HEADER_BITS, MAX_NAME_LENGTH, NAME_LENGTH_BITS, PAYLOAD_LENGTH_BITS,
};
use crate::error::DecodeError;

/// Read and validate the record header without consuming name or payload.
///
/// Runs the same checks as [`extract`], so an `Ok` header is guaranteed to
/// describe a record that lies entirely inside `samples`.
pub fn peek_header(samples: &[i16]) -> Result<RecordHeader, DecodeError> {
    read_header(&mut LsbReader::new(samples))
}

fn read_header(reader: &mut LsbReader<'_>) -> Result<RecordHeader, DecodeError> {
    let available_bits = reader.remaining();
    if available_bits < HEADER_BITS {
        return Err(DecodeError::NoHiddenData);
    }

    let payload_len = reader.read_bits(PAYLOAD_LENGTH_BITS);
    let name_len = reader.read_bits(NAME_LENGTH_BITS) as usize;

    let max_payload_len = (available_bits - HEADER_BITS) / BITS_PER_BYTE;
    if payload_len == 0 {
        return Err(DecodeError::NoHiddenData);
    }
    if payload_len as usize > max_payload_len {
        return Err(DecodeError::CorruptHeader {
            payload_len,
            max_payload_len,
        });
    }

    if name_len == 0 || name_len > MAX_NAME_LENGTH {
        return Err(DecodeError::InvalidNameLength { len: name_len });
    }

    let header = RecordHeader {
        payload_len,
        name_len: name_len as u8,
    };
    match header.required_bits() {
        Some(needed_bits) if needed_bits <= available_bits => Ok(header),
        needed => Err(DecodeError::Truncated {
            needed_bits: needed.unwrap_or(usize::MAX),
            available_bits,
        }),
    }
}

/// Extract the hidden record from `samples`.
///
/// Lengths are validated before any name or payload bit is read, so a
/// carrier that never had anything embedded (or was altered) yields an
/// error instead of an out-of-range read. Reading never modifies the
/// carrier.
///
/// # Errors
///
/// * [`DecodeError::NoHiddenData`] - zero payload length or carrier shorter than the header
/// * [`DecodeError::CorruptHeader`] - payload length beyond the carrier's capacity
/// * [`DecodeError::InvalidNameLength`] - name length of zero
/// * [`DecodeError::Truncated`] - name and payload together overrun the carrier
pub fn extract(samples: &[i16]) -> Result<HiddenFile, DecodeError> {
    let mut reader = LsbReader::new(samples);
    let header = read_header(&mut reader)?;

    let name = reader.read_bytes(usize::from(header.name_len));
    let payload = reader.read_bytes(header.payload_len as usize);
    debug_assert_eq!(Some(reader.position()), header.required_bits());

    Ok(HiddenFile { name, payload })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::bits::LsbWriter;
    use crate::codec::embed;

    fn carrier_with_header(len: usize, payload_len: u32, name_len: u32) -> Vec<i16> {
        let mut samples = vec![0i16; len];
        let mut writer = LsbWriter::new(&mut samples);
        writer.write_bits(payload_len, 32);
        writer.write_bits(name_len, 8);
        samples
    }

    #[test]
    fn test_extract_scenario() {
        let mut samples = vec![0i16; 1000];
        embed(&mut samples, b"a.txt", &[0x41, 0x42]).unwrap();

        let hidden = extract(&samples).unwrap();
        assert_eq!(hidden.name, b"a.txt");
        assert_eq!(hidden.payload, vec![0x41, 0x42]);
    }

    #[test]
    fn test_blank_carrier() {
        let samples = vec![0i16; 1000];
        assert_eq!(extract(&samples), Err(DecodeError::NoHiddenData));
    }

    #[test]
    fn test_short_carrier() {
        let samples = vec![-1i16; 39];
        assert_eq!(extract(&samples), Err(DecodeError::NoHiddenData));
        assert_eq!(extract(&[]), Err(DecodeError::NoHiddenData));
    }

    #[test]
    fn test_oversized_payload_length() {
        // all LSBs set: payload length u32::MAX
        let samples = vec![1i16; 1000];
        assert_eq!(
            extract(&samples),
            Err(DecodeError::CorruptHeader {
                payload_len: u32::MAX,
                max_payload_len: 120
            })
        );
    }

    #[test]
    fn test_payload_length_at_limit() {
        let samples = carrier_with_header(1000, 121, 1);
        assert!(matches!(
            extract(&samples),
            Err(DecodeError::CorruptHeader { payload_len: 121, .. })
        ));
    }

    #[test]
    fn test_zero_name_length() {
        let samples = carrier_with_header(1000, 4, 0);
        assert_eq!(
            extract(&samples),
            Err(DecodeError::InvalidNameLength { len: 0 })
        );
    }

    #[test]
    fn test_name_overruns_carrier() {
        // payload alone fits, name pushes the record past the end
        let samples = carrier_with_header(1000, 100, 255);
        assert_eq!(
            extract(&samples),
            Err(DecodeError::Truncated {
                needed_bits: 40 + 355 * 8,
                available_bits: 1000
            })
        );
    }

    #[test]
    fn test_peek_header() {
        let mut samples = vec![0i16; 500];
        embed(&mut samples, b"notes.md", &[9; 20]).unwrap();

        let header = peek_header(&samples).unwrap();
        assert_eq!(header.payload_len, 20);
        assert_eq!(header.name_len, 8);
        assert_eq!(header.required_bits(), Some(40 + 28 * 8));
    }
}
