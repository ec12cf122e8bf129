//! File-level operations: hide, reveal, inspect.

use crate::codec::{self, HiddenFile};
use crate::config::{StegoConfig, MAX_NAME_LENGTH};
use crate::error::{Error, Result};
use crate::storage::{create_carrier, read_carrier, validate_name, write_recovered};
use serde::Serialize;
use sha2::{Digest, Sha256};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Samples listed by [`inspect`].
const FIRST_SAMPLES: usize = 10;

/// Outcome of [`hide`].
#[derive(Debug, Clone, Serialize)]
pub struct HideReport {
    /// Written carrier.
    pub output: PathBuf,
    /// Hidden name (lossy UTF-8).
    pub name: String,
    /// Hidden payload size in bytes.
    pub payload_len: usize,
    /// Samples carrying the record.
    pub bits_used: usize,
    /// Samples in the carrier.
    pub capacity_bits: usize,
    /// SHA-256 of the payload, hex.
    pub sha256: String,
    /// Whether the written file was re-read and checked.
    pub verified: bool,
}

/// Outcome of [`reveal`].
#[derive(Debug, Clone, Serialize)]
pub struct RevealReport {
    pub output: PathBuf,
    pub name: String,
    pub payload_len: usize,
    pub sha256: String,
}

/// Record found by [`inspect`].
#[derive(Debug, Clone, Serialize)]
pub struct HiddenSummary {
    pub name: String,
    pub payload_len: u32,
}

/// Carrier details for the `info` command.
#[derive(Debug, Clone, Serialize)]
pub struct CarrierInfo {
    pub path: PathBuf,
    pub channels: u16,
    pub sample_rate: u32,
    pub bits_per_sample: u16,
    pub sample_count: usize,
    pub duration_secs: f64,
    /// Up to the first ten samples, for a quick look at the audio.
    pub first_samples: Vec<i16>,
    /// Largest payload with a one-byte name.
    pub max_payload_len: usize,
    /// Largest payload with a maximum-length name.
    pub min_payload_len: usize,
    /// Present when the header decodes to a plausible record.
    pub hidden: Option<HiddenSummary>,
}

/// Hex SHA-256 of `data`.
pub fn sha256_hex(data: &[u8]) -> String {
    hex::encode(Sha256::digest(data))
}

/// Hide `secret` in the WAV at `cover`, writing the result to `output`.
///
/// The cover file is never modified and an existing `output` is only replaced
/// with `config.overwrite`. The hidden name must be a plain file name (see
/// [`validate_name`]) so that [`reveal`] can write it back. With
/// `config.verify` the output is read back and must yield `secret` again;
/// if it does not, the output is removed.
pub fn hide(
    cover: &Path,
    secret: &HiddenFile,
    output: &Path,
    config: &StegoConfig,
) -> Result<HideReport> {
    validate_name(&secret.name)?;

    let mut carrier = read_carrier(cover)?;
    carrier.embed(&secret.name, &secret.payload)?;

    let bits_used = secret.required_bits().unwrap_or(usize::MAX);
    debug!(
        "Embedded {} bytes as {:?} using {} of {} samples",
        secret.payload.len(),
        secret.name_lossy(),
        bits_used,
        carrier.sample_count()
    );

    if config.overwrite && output.exists() {
        warn!("Overwriting {}", output.display());
    }
    create_carrier(output, &carrier, config.overwrite)?;

    if config.verify {
        verify_output(output, secret)?;
    }

    info!(
        "Hid {} ({} bytes) in {}",
        secret.name_lossy(),
        secret.payload.len(),
        output.display()
    );

    Ok(HideReport {
        output: output.to_path_buf(),
        name: secret.name_lossy().into_owned(),
        payload_len: secret.payload.len(),
        bits_used,
        capacity_bits: carrier.sample_count(),
        sha256: sha256_hex(&secret.payload),
        verified: config.verify,
    })
}

/// Check that `output` gives back `secret`, deleting it if not.
fn verify_output(output: &Path, secret: &HiddenFile) -> Result<()> {
    let err = match extract_file(output) {
        Ok(recovered) if recovered == *secret => {
            debug!("Verified {}", output.display());
            return Ok(());
        }
        Ok(_) => Error::VerificationFailed(output.to_path_buf()),
        Err(e) => e,
    };

    if let Err(e) = std::fs::remove_file(output) {
        warn!("Failed to remove {}: {}", output.display(), e);
    }
    Err(err)
}

/// Read the hidden file out of the WAV at `stego`.
pub fn extract_file(stego: &Path) -> Result<HiddenFile> {
    let carrier = read_carrier(stego)?;
    Ok(carrier.extract()?)
}

/// Extract the hidden file from `stego` and write it into `out_dir`.
pub fn reveal(stego: &Path, out_dir: &Path, config: &StegoConfig) -> Result<RevealReport> {
    let hidden = extract_file(stego)?;
    let output = write_recovered(out_dir, &hidden, config.overwrite)?;

    info!(
        "Recovered {} ({} bytes) to {}",
        hidden.name_lossy(),
        hidden.payload.len(),
        output.display()
    );

    Ok(RevealReport {
        output,
        name: hidden.name_lossy().into_owned(),
        payload_len: hidden.payload.len(),
        sha256: sha256_hex(&hidden.payload),
    })
}

/// Describe the WAV at `path` and whether it appears to carry a record.
pub fn inspect(path: &Path) -> Result<CarrierInfo> {
    let carrier = read_carrier(path)?;
    let format = carrier.format();

    let hidden = match codec::peek_header(carrier.samples()) {
        Ok(header) => {
            let file = carrier.extract()?;
            Some(HiddenSummary {
                name: file.name_lossy().into_owned(),
                payload_len: header.payload_len,
            })
        }
        Err(e) => {
            debug!("No record in {}: {}", path.display(), e);
            None
        }
    };

    Ok(CarrierInfo {
        path: path.to_path_buf(),
        channels: format.channels,
        sample_rate: format.sample_rate,
        bits_per_sample: format.bits_per_sample,
        sample_count: carrier.sample_count(),
        duration_secs: carrier.duration_secs(),
        first_samples: carrier.samples().iter().take(FIRST_SAMPLES).copied().collect(),
        max_payload_len: carrier.capacity(1),
        min_payload_len: carrier.capacity(MAX_NAME_LENGTH),
        hidden,
    })
}
