//! Storage layer around the codec.
//!
//! This module handles:
//! - Reading/writing 16-bit PCM WAV containers
//! - Loading files to hide
//! - Writing recovered files without escaping the output directory

mod files;
mod wav;

pub use files::{display_name, load_payload, safe_output_path, validate_name, write_recovered};
pub use wav::{
    create_carrier, read_carrier, read_carrier_from, write_carrier, write_carrier_to,
};
