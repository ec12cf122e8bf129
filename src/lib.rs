//! wav-lsb
//!
//! Hides a small file in the least-significant bits of 16-bit PCM WAV audio
//! and recovers it byte for byte.
//!
//! # Architecture
//!
//! ```text
//! WAV file → Carrier (i16 samples) → codec::embed → Carrier' → WAV file
//! WAV file → Carrier → codec::extract → (name, payload) → output file
//! ```
//!
//! The [`codec`] is pure and has no knowledge of files; [`storage`] handles
//! the WAV container and the payload files; [`ops`] ties them together for
//! the command-line tool.
//!
//! # Example
//!
//! ```rust
//! use wav_lsb::{Carrier, PcmFormat};
//!
//! let mut carrier = Carrier::new(PcmFormat::new(1, 44100), vec![0; 1000]);
//! carrier.embed(b"a.txt", b"AB").unwrap();
//!
//! let hidden = carrier.extract().unwrap();
//! assert_eq!(hidden.name, b"a.txt");
//! assert_eq!(hidden.payload, b"AB");
//! ```

pub mod carrier;
pub mod codec;
pub mod config;
pub mod error;
pub mod ops;
pub mod storage;

pub use carrier::{Carrier, PcmFormat};
pub use codec::HiddenFile;
pub use config::StegoConfig;
pub use error::{DecodeError, EncodeError, Error, Result};
