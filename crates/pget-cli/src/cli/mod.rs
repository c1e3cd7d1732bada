//! CLI for pget: thin glue around the parallel fetch engine.

mod progress;

use anyhow::{Context, Result};
use clap::Parser;
use pget_core::config::{self, PgetConfig};
use pget_core::stream::{DigestAlgorithm, DigestReader, ValidatingStream};
use pget_core::{FetchOptions, ParallelGetReader};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Downloads a single resource in parallel from one or more mirror URLs.
#[derive(Debug, Parser)]
#[command(name = "pget")]
#[command(about = "pget downloads a file in parallel from one or more supplied urls", long_about = None)]
pub struct Cli {
    /// Mirror URLs for the resource; all must serve identical content.
    #[arg(required = true, value_name = "URL")]
    pub urls: Vec<String>,

    /// Write the downloaded data to this file instead of stdout.
    #[arg(short, long, value_name = "PATH")]
    pub outfile: Option<PathBuf>,

    /// Number of concurrent fetch workers. Defaults to the number of urls.
    #[arg(short, long, value_name = "N")]
    pub threads: Option<usize>,

    /// Number of segments to split the download into. Defaults to the
    /// number of urls.
    #[arg(short, long, value_name = "N")]
    pub segments: Option<usize>,

    /// Expected checksum, hex encoded (SHA-256 unless configured otherwise).
    #[arg(short, long, value_name = "HEX")]
    pub checksum: Option<String>,
}

/// Run the download. Ok(true) = downloaded and valid, Ok(false) =
/// downloaded but validation failed, Err = fetch error.
pub fn run(cli: Cli) -> Result<bool> {
    let cfg = config::load_or_init().unwrap_or_else(|e| {
        tracing::warn!("config unavailable ({e:#}), using defaults");
        PgetConfig::default()
    });

    for raw in &cli.urls {
        url::Url::parse(raw).with_context(|| format!("invalid URL: {raw}"))?;
    }

    let options = FetchOptions {
        segment_count: cli.segments.or(cfg.default_segments),
        workers: cli.threads.or(cfg.default_workers),
    };
    let reader = ParallelGetReader::open(&cli.urls, &options)?;

    let finished = Arc::new(AtomicBool::new(false));
    progress::spawn(
        reader.progress_handle(),
        Duration::from_secs(cfg.progress_interval_secs.max(1)),
        Arc::clone(&finished),
    );

    let mut stream: Box<dyn ValidatingStream> = match parse_digest(&cfg, cli.checksum.as_deref())
    {
        Some((algorithm, expected)) => Box::new(DigestReader::new(reader, algorithm, expected)),
        None => Box::new(reader),
    };

    let result = drain(&mut stream, cli.outfile.as_deref());
    finished.store(true, Ordering::SeqCst);
    let close_result = stream.close();

    let valid = result?;
    close_result.context("failed to release download resources")?;
    Ok(valid)
}

/// Drain the composed stream to its sink, then check validity.
fn drain(stream: &mut Box<dyn ValidatingStream>, outfile: Option<&std::path::Path>) -> Result<bool> {
    match outfile {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("failed to create {}", path.display()))?;
            let mut out = BufWriter::new(file);
            io::copy(stream, &mut out).context("download failed")?;
            out.flush().context("failed to flush output file")?;
        }
        None => {
            let stdout = io::stdout();
            let mut out = stdout.lock();
            io::copy(stream, &mut out).context("download failed")?;
        }
    }

    let valid = stream.is_valid();
    if !valid {
        for message in stream.validation_errors() {
            eprintln!("WARNING: {message}");
        }
    }
    Ok(valid)
}

/// Decode the expected checksum and resolve the configured algorithm.
///
/// Invalid hex or an unsupported algorithm skips digest validation with a
/// warning rather than failing the download.
fn parse_digest(cfg: &PgetConfig, checksum: Option<&str>) -> Option<(DigestAlgorithm, Vec<u8>)> {
    let raw = checksum?;
    let expected = match hex::decode(raw) {
        Ok(bytes) => bytes,
        Err(_) => {
            tracing::warn!("invalid checksum (not hex encoded?), skipping validation");
            eprintln!("WARNING: invalid checksum (not hex encoded?), skipping checksum validation");
            return None;
        }
    };
    match DigestAlgorithm::parse(&cfg.digest_algorithm) {
        Ok(algorithm) => Some((algorithm, expected)),
        Err(e) => {
            tracing::warn!("{e}, skipping validation");
            eprintln!("WARNING: {e}, skipping checksum validation");
            None
        }
    }
}
