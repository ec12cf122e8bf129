//! WAV container read/write.

use crate::carrier::{Carrier, PcmFormat};
use crate::error::{Error, Result};
use crate::storage::files::open_output;
use hound::{SampleFormat, WavReader, WavSpec, WavWriter};
use std::io::{BufWriter, Read, Seek, Write};
use std::path::Path;
use tracing::debug;

impl TryFrom<WavSpec> for PcmFormat {
    type Error = Error;

    fn try_from(spec: WavSpec) -> Result<Self> {
        if spec.sample_format != SampleFormat::Int {
            return Err(Error::UnsupportedFormat(
                "floating-point samples (only 16-bit PCM is supported)".to_string(),
            ));
        }

        let format = PcmFormat {
            channels: spec.channels,
            sample_rate: spec.sample_rate,
            bits_per_sample: spec.bits_per_sample,
        };
        format.validate()?;
        Ok(format)
    }
}

impl From<PcmFormat> for WavSpec {
    fn from(format: PcmFormat) -> Self {
        WavSpec {
            channels: format.channels,
            sample_rate: format.sample_rate,
            bits_per_sample: format.bits_per_sample,
            sample_format: SampleFormat::Int,
        }
    }
}

/// Read a 16-bit PCM WAV file into a [`Carrier`].
pub fn read_carrier(path: &Path) -> Result<Carrier> {
    let carrier = decode(WavReader::open(path)?)?;
    debug!(
        "Read {} samples from {} ({} ch, {} Hz)",
        carrier.sample_count(),
        path.display(),
        carrier.format().channels,
        carrier.format().sample_rate
    );
    Ok(carrier)
}

/// Read a carrier from any WAV byte stream.
pub fn read_carrier_from<R: Read>(reader: R) -> Result<Carrier> {
    decode(WavReader::new(reader)?)
}

fn decode<R: Read>(mut reader: WavReader<R>) -> Result<Carrier> {
    let format = PcmFormat::try_from(reader.spec())?;
    let samples = reader
        .samples::<i16>()
        .collect::<std::result::Result<Vec<_>, _>>()?;

    Ok(Carrier::new(format, samples))
}

/// Write a carrier as a canonical PCM WAV file, replacing any existing file.
pub fn write_carrier(path: &Path, carrier: &Carrier) -> Result<()> {
    encode(WavWriter::create(path, carrier.format().into())?, carrier)?;
    debug!(
        "Wrote {} samples to {}",
        carrier.sample_count(),
        path.display()
    );
    Ok(())
}

/// Write a carrier to a new file at `path`.
///
/// Unlike [`write_carrier`], an existing file is only replaced when
/// `overwrite` is set; otherwise this fails with [`Error::OutputExists`]
/// without touching it.
pub fn create_carrier(path: &Path, carrier: &Carrier, overwrite: bool) -> Result<()> {
    let file = open_output(path, overwrite)?;
    write_carrier_to(BufWriter::new(file), carrier)?;
    debug!(
        "Created {} with {} samples",
        path.display(),
        carrier.sample_count()
    );
    Ok(())
}

/// Write a carrier to any seekable byte sink.
pub fn write_carrier_to<W: Write + Seek>(writer: W, carrier: &Carrier) -> Result<()> {
    encode(WavWriter::new(writer, carrier.format().into())?, carrier)
}

fn encode<W: Write + Seek>(mut writer: WavWriter<W>, carrier: &Carrier) -> Result<()> {
    for &sample in carrier.samples() {
        writer.write_sample(sample)?;
    }
    writer.finalize()?;
    Ok(())
}
