//! Error types for wav-lsb.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for wav-lsb operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Reasons an embed is refused. The carrier is never modified when one is returned.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EncodeError {
    /// The hidden file needs a name of at least one byte.
    #[error("File name is empty")]
    EmptyName,

    /// Name does not fit the 8-bit length field.
    #[error("File name too long: {len} bytes (max 255)")]
    NameTooLong { len: usize },

    /// Nothing to hide.
    #[error("Payload is empty")]
    EmptyPayload,

    /// Payload does not fit the 32-bit length field.
    #[error("Payload too large for the length field: {len} bytes")]
    PayloadTooLarge { len: usize },

    /// The carrier has fewer samples than the record has bits.
    #[error("Payload too large for this carrier: need {needed_bits} samples, have {available_bits}")]
    CapacityExceeded {
        needed_bits: usize,
        available_bits: usize,
    },
}

/// Reasons a record could not be recovered from a carrier.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    /// Zero payload length, or a carrier too short to hold a header.
    #[error("No hidden data found")]
    NoHiddenData,

    /// Payload length larger than the carrier could ever hold.
    #[error("No hidden data or corrupted header: payload length {payload_len} exceeds capacity of {max_payload_len} bytes")]
    CorruptHeader {
        payload_len: u32,
        max_payload_len: usize,
    },

    /// Name length outside 1..=255.
    #[error("Invalid file name length: {len}")]
    InvalidNameLength { len: usize },

    /// Header is plausible but name and payload together run past the end.
    #[error("Hidden record truncated: need {needed_bits} samples, have {available_bits}")]
    Truncated {
        needed_bits: usize,
        available_bits: usize,
    },
}

/// Errors that can occur in wav-lsb operations.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error during file operations. The cause is the error's source.
    #[error("I/O error")]
    Io(#[from] std::io::Error),

    /// The WAV container could not be read or written.
    #[error("WAV error")]
    Wav(#[from] hound::Error),

    /// Audio that is not 16-bit integer PCM.
    #[error("Unsupported audio format: {0}")]
    UnsupportedFormat(String),

    /// Embedding was refused.
    #[error(transparent)]
    Encode(#[from] EncodeError),

    /// Extraction failed.
    #[error(transparent)]
    Decode(#[from] DecodeError),

    /// A file name that cannot be used as a hidden name or output file.
    #[error("Invalid file name: {0}")]
    InvalidFileName(String),

    /// Refusing to replace an existing file.
    #[error("Output file already exists: {0}")]
    OutputExists(PathBuf),

    /// The written carrier did not give back what was embedded.
    #[error("Verification failed for {0}: extracted record differs from the embedded one")]
    VerificationFailed(PathBuf),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Serialization(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codec_errors_convert() {
        let err: Error = EncodeError::NameTooLong { len: 300 }.into();
        assert!(matches!(err, Error::Encode(EncodeError::NameTooLong { len: 300 })));

        let err: Error = DecodeError::NoHiddenData.into();
        assert_eq!(err.to_string(), "No hidden data found");
    }

    #[test]
    fn test_capacity_message() {
        let err = EncodeError::CapacityExceeded {
            needed_bits: 840,
            available_bits: 10,
        };
        assert_eq!(
            err.to_string(),
            "Payload too large for this carrier: need 840 samples, have 10"
        );
    }

    #[test]
    fn test_wrapped_cause_reported_once() {
        let inner = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "no access");
        let err: Error = inner.into();
        assert_eq!(err.to_string(), "I/O error");

        let chained = format!("{:#}", anyhow::Error::new(err));
        assert_eq!(chained, "I/O error: no access");
        assert_eq!(chained.matches("no access").count(), 1);
    }
}
