//! LSB steganography over 16-bit PCM samples.
//!
//! One record is hidden per carrier, one bit per sample, starting at the
//! first sample:
//!
//! ```text
//! [32 bits] payload length (bytes)
//! [ 8 bits] name length (bytes, 1-255)
//! [N x 8  ] name bytes
//! [M x 8  ] payload bytes
//! ```
//!
//! Every field is stored least-significant bit first. Only bit 0 of a
//! sample is ever written.
//!
//! The functions here are pure: no I/O, no logging. Container handling lives
//! in [`crate::storage`].

mod bits;
mod decoder;
mod encoder;
mod record;

pub use bits::{lsb, with_lsb};
pub use decoder::{extract, peek_header};
pub use encoder::{embed, embed_file};
pub use record::{max_payload_len, required_bits, HiddenFile, RecordHeader};
