//! Configuration constants and types for wav-lsb.

use serde::{Deserialize, Serialize};

/// Width of the payload length field (little-endian bit order).
pub const PAYLOAD_LENGTH_BITS: usize = 32;

/// Width of the name length field.
pub const NAME_LENGTH_BITS: usize = 8;

/// Bits consumed by the record header before the name bytes start.
pub const HEADER_BITS: usize = PAYLOAD_LENGTH_BITS + NAME_LENGTH_BITS;

/// Carrier samples used per hidden byte.
pub const BITS_PER_BYTE: usize = 8;

/// Longest file name the record can describe.
pub const MAX_NAME_LENGTH: usize = 255;

/// The only sample depth accepted from the container.
pub const REQUIRED_BITS_PER_SAMPLE: u16 = 16;

/// Name given to inline messages and stdin payloads when none is supplied.
pub const DEFAULT_MESSAGE_NAME: &str = "message.txt";

/// Runtime options for the file-level operations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StegoConfig {
    /// Replace existing output files instead of failing.
    pub overwrite: bool,

    /// Re-read the written carrier and check the record survived.
    pub verify: bool,
}

impl Default for StegoConfig {
    fn default() -> Self {
        Self {
            overwrite: false,
            verify: true,
        }
    }
}

impl StegoConfig {
    /// Create a configuration with explicit settings.
    pub fn new(overwrite: bool, verify: bool) -> Self {
        Self { overwrite, verify }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_width() {
        assert_eq!(HEADER_BITS, 40);
    }

    #[test]
    fn test_default_config() {
        let config = StegoConfig::default();
        assert!(!config.overwrite);
        assert!(config.verify);
    }

    #[test]
    fn test_config_json() {
        let config = StegoConfig::new(true, false);
        let json = serde_json::to_string(&config).unwrap();
        let restored: StegoConfig = serde_json::from_str(&json).unwrap();

        assert!(restored.overwrite);
        assert!(!restored.verify);
    }
}
