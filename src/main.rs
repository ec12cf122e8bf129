//! wav-lsb - hide a file inside 16-bit PCM WAV audio.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;
use wav_lsb::config::DEFAULT_MESSAGE_NAME;
use wav_lsb::{ops, storage, HiddenFile, StegoConfig};

#[derive(Parser)]
#[command(name = "wav-lsb")]
#[command(author, version)]
#[command(
    about = "Hide a file in the least-significant bits of a WAV file",
    long_about = "Hides a small file (name and content) in the least-significant bit of each sample of a 16-bit PCM WAV file, and recovers it exactly."
)]
struct Cli {
    /// Print reports as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Enable debug logging (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Hide a file or message in a WAV file
    Hide {
        /// 16-bit PCM WAV to hide the data in (left unchanged)
        cover: PathBuf,

        /// WAV file to write
        output: PathBuf,

        /// File to hide
        #[arg(long, conflicts_with = "message")]
        input: Option<PathBuf>,

        /// Text message to hide
        #[arg(long, conflicts_with = "input")]
        message: Option<String>,

        /// Name stored with the hidden data (default: input file name or message.txt)
        #[arg(long)]
        name: Option<String>,

        /// Overwrite the output file if it exists
        #[arg(long)]
        force: bool,

        /// Skip re-reading the output to check the hidden data
        #[arg(long)]
        no_verify: bool,
    },

    /// Recover a hidden file from a WAV file
    Reveal {
        /// WAV file carrying hidden data
        stego: PathBuf,

        /// Directory to write the recovered file into
        #[arg(long, default_value = ".", conflicts_with = "stdout")]
        output_dir: PathBuf,

        /// Write the recovered content to stdout instead (raw bytes, no report)
        #[arg(long, conflicts_with_all = ["output_dir", "force"])]
        stdout: bool,

        /// Overwrite an existing file of the same name
        #[arg(long)]
        force: bool,
    },

    /// Show format, capacity and any hidden record of a WAV file
    Info {
        /// WAV file to inspect
        wav: PathBuf,
    },
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();
}

fn run(cli: Cli) -> Result<()> {
    let json = cli.json;
    match cli.command {
        Commands::Hide {
            cover,
            output,
            input,
            message,
            name,
            force,
            no_verify,
        } => cmd_hide(
            &cover,
            &output,
            input,
            message,
            name,
            StegoConfig::new(force, !no_verify),
            json,
        ),

        Commands::Reveal {
            stego,
            output_dir,
            stdout,
            force,
        } => cmd_reveal(&stego, &output_dir, stdout, force, json),

        Commands::Info { wav } => cmd_info(&wav, json),
    }
}

fn print_json<T: Serialize>(report: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(report)?);
    Ok(())
}

fn cmd_hide(
    cover: &Path,
    output: &Path,
    input: Option<PathBuf>,
    message: Option<String>,
    name: Option<String>,
    config: StegoConfig,
    json: bool,
) -> Result<()> {
    let mut secret = match (input, message) {
        (Some(path), None) => storage::load_payload(&path)
            .with_context(|| format!("Failed to read {}", path.display()))?,
        (None, Some(text)) => HiddenFile::new(DEFAULT_MESSAGE_NAME, text),
        (None, None) => {
            let mut buffer = Vec::new();
            io::stdin().read_to_end(&mut buffer)?;
            HiddenFile::new(DEFAULT_MESSAGE_NAME, buffer)
        }
        (Some(_), Some(_)) => unreachable!(),
    };
    if let Some(name) = name {
        secret.name = name.into_bytes();
    }

    let report = ops::hide(cover, &secret, output, &config)
        .with_context(|| format!("Failed to hide data in {}", cover.display()))?;

    if json {
        return print_json(&report);
    }

    println!(
        "Hid {} ({} bytes) in {}",
        report.name,
        report.payload_len,
        report.output.display()
    );
    println!(
        "  Samples used:   {} of {} ({:.2}%)",
        report.bits_used,
        report.capacity_bits,
        report.bits_used as f64 / report.capacity_bits as f64 * 100.0
    );
    println!("  SHA-256:        {}", report.sha256);
    if report.verified {
        println!("✓ Hidden data verified");
    }

    Ok(())
}

fn cmd_reveal(stego: &Path, output_dir: &Path, stdout: bool, force: bool, json: bool) -> Result<()> {
    if stdout {
        if json {
            anyhow::bail!("--json cannot be combined with --stdout");
        }
        let hidden = ops::extract_file(stego)
            .with_context(|| format!("Failed to extract from {}", stego.display()))?;
        io::stdout().write_all(&hidden.payload)?;
        return Ok(());
    }

    let report = ops::reveal(stego, output_dir, &StegoConfig::new(force, false))
        .with_context(|| format!("Failed to extract from {}", stego.display()))?;

    if json {
        return print_json(&report);
    }

    println!(
        "Recovered {} ({} bytes) to {}",
        report.name,
        report.payload_len,
        report.output.display()
    );
    println!("  SHA-256:        {}", report.sha256);

    Ok(())
}

fn cmd_info(wav: &Path, json: bool) -> Result<()> {
    let info = ops::inspect(wav).with_context(|| format!("Failed to read {}", wav.display()))?;

    if json {
        return print_json(&info);
    }

    println!("WAV File Information");
    println!("====================");
    println!("File:             {}", info.path.display());
    println!("Channels:         {}", info.channels);
    println!("Sample rate:      {} Hz", info.sample_rate);
    println!("Bits per sample:  {}", info.bits_per_sample);
    println!("Total samples:    {}", info.sample_count);
    println!("Duration:         {:.2} seconds", info.duration_secs);
    println!(
        "First samples:    {}",
        info.first_samples
            .iter()
            .map(|s| s.to_string())
            .collect::<Vec<_>>()
            .join(" ")
    );
    println!();
    println!("Capacity:");
    println!("  Payload:        {} bytes (1-byte name)", info.max_payload_len);
    println!("  Payload:        {} bytes (255-byte name)", info.min_payload_len);
    println!();
    match info.hidden {
        Some(hidden) => println!(
            "Hidden data:      {} ({} bytes)",
            hidden.name, hidden.payload_len
        ),
        None => println!("Hidden data:      none found"),
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stdout_conflicts() {
        for args in [
            ["wav-lsb", "reveal", "x.wav", "--stdout", "--force"],
            ["wav-lsb", "reveal", "x.wav", "--stdout", "--output-dir=out"],
        ] {
            assert!(Cli::try_parse_from(args).is_err(), "accepted {:?}", args);
        }
        assert!(Cli::try_parse_from(["wav-lsb", "reveal", "x.wav", "--stdout"]).is_ok());
    }

    #[test]
    fn test_stdout_refuses_json() {
        let cli = Cli::try_parse_from(["wav-lsb", "--json", "reveal", "missing.wav", "--stdout"])
            .unwrap();
        let err = run(cli).unwrap_err();
        assert!(err.to_string().contains("--json"));
    }
}
