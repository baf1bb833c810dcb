//! lz8-cli - Command-line interface for the LZ8 codec
//!
//! Compresses and decompresses LZ8 streams. Both subcommands accept the
//! same format knobs; the two ends of a pipeline must be given identical
//! values because the stream itself carries no header.

use clap::{Args, Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use lz8::{decode_bytes, encode_bytes_with_stats, encode::trace_parse, CompressionStats, Config};
use std::fs;
use std::io::{self, Read, Write};
use std::path::PathBuf;
use std::time::Instant;

/// Inputs above this size get a progress bar.
const PROGRESS_THRESHOLD: usize = 64 * 1024;

#[derive(Parser)]
#[command(name = "lz8-cli")]
#[command(about = "A CLI tool for LZ8 compression and decompression")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose output (parse statistics, histograms)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Quiet mode (suppress non-error output)
    #[arg(short, long, global = true)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Compress a file or standard input
    Compress {
        #[command(flatten)]
        format: FormatOpts,

        /// Show the chosen parse walk on standard error
        #[arg(short = 'd', long)]
        debug: bool,

        /// Input file (standard input when omitted)
        input: Option<PathBuf>,

        /// Output file (standard output when omitted)
        output: Option<PathBuf>,

        /// Force overwrite of the output file
        #[arg(short, long)]
        force: bool,
    },

    /// Decompress a file or standard input
    Decompress {
        #[command(flatten)]
        format: FormatOpts,

        /// Input file (standard input when omitted)
        input: Option<PathBuf>,

        /// Output file (standard output when omitted)
        output: Option<PathBuf>,

        /// Force overwrite of the output file
        #[arg(short, long)]
        force: bool,
    },
}

/// Wire format knobs shared by both subcommands.
#[derive(Args, Clone, Copy)]
struct FormatOpts {
    /// Match offset bits (0-16)
    #[arg(short = 'o', long = "offset-bits", default_value_t = 8)]
    offset_bits: u8,

    /// Maximum literal run length (1-32895)
    #[arg(short = 'l', long = "max-literal", default_value_t = 255)]
    max_literal: u32,

    /// Maximum match run length (1-32895)
    #[arg(short = 'm', long = "max-match", default_value_t = 255)]
    max_match: u32,

    /// Use offsets relative to this base address instead of deltas
    #[arg(short = 'A', long = "address")]
    address: Option<u32>,

    /// Write the offset field even on zero-length matches
    #[arg(short = 'n', long = "zero-offset")]
    zero_offset: bool,

    /// Complement offset bytes
    #[arg(short = 'x', long = "exor")]
    exor: bool,
}

impl From<FormatOpts> for Config {
    fn from(opts: FormatOpts) -> Self {
        Config {
            bits_moff: opts.offset_bits,
            max_mlen: opts.max_match,
            max_llen: opts.max_literal,
            zero_offset: opts.zero_offset,
            offset_rel: opts.address,
            exor_offset: opts.exor,
        }
    }
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Compress {
            format,
            debug,
            input,
            output,
            force,
        } => compress(
            input.as_deref(),
            output.as_deref(),
            format.into(),
            debug,
            force,
            cli.verbose,
            cli.quiet,
        ),
        Commands::Decompress {
            format,
            input,
            output,
            force,
        } => decompress(
            input.as_deref(),
            output.as_deref(),
            format.into(),
            force,
            cli.verbose,
            cli.quiet,
        ),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn read_input(path: Option<&std::path::Path>) -> Result<Vec<u8>, Box<dyn std::error::Error>> {
    match path {
        Some(p) => {
            fs::read(p).map_err(|e| format!("can't open input file '{}': {}", p.display(), e).into())
        }
        None => {
            let mut data = Vec::new();
            io::stdin().lock().read_to_end(&mut data)?;
            Ok(data)
        }
    }
}

fn write_output(
    path: Option<&std::path::Path>,
    force: bool,
    bytes: &[u8],
) -> Result<(), Box<dyn std::error::Error>> {
    match path {
        Some(p) => {
            if p.exists() && !force {
                return Err(format!(
                    "Output file '{}' already exists. Use --force to overwrite",
                    p.display()
                )
                .into());
            }
            fs::write(p, bytes)
                .map_err(|e| format!("can't write output file '{}': {}", p.display(), e).into())
        }
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(bytes)?;
            stdout.flush()?;
            Ok(())
        }
    }
}

fn make_progress(len: u64, message: &'static str) -> ProgressBar {
    let pb = ProgressBar::new(len);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} {msg}")
            .unwrap()
            .progress_chars("#>-"),
    );
    pb.set_message(message);
    pb
}

fn compress(
    input: Option<&std::path::Path>,
    output: Option<&std::path::Path>,
    cfg: Config,
    debug: bool,
    force: bool,
    verbose: bool,
    quiet: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    cfg.validate()?;
    let start_time = Instant::now();
    let data = read_input(input)?;

    let progress = if !quiet && data.len() > PROGRESS_THRESHOLD {
        Some(make_progress(2, "Compressing..."))
    } else {
        None
    };

    if debug {
        let stderr = io::stderr();
        trace_parse(&data, &cfg, &mut stderr.lock())?;
    }

    if let Some(ref pb) = progress {
        pb.inc(1);
    }

    let (packed, stats) = encode_bytes_with_stats(&data, &cfg)?;

    if let Some(ref pb) = progress {
        pb.inc(1);
        pb.finish_with_message("Compression complete");
    }

    write_output(output, force, &packed)?;

    if !quiet {
        report_compression(&cfg, &stats, data.len(), packed.len(), verbose);
        eprintln!("  Time:   {:.2?}", start_time.elapsed());
    }

    Ok(())
}

fn report_compression(
    cfg: &Config,
    stats: &CompressionStats,
    input_size: usize,
    output_size: usize,
    verbose: bool,
) {
    let ratio = if input_size > 0 {
        100.0 * output_size as f64 / input_size as f64
    } else {
        100.0
    };
    eprintln!(
        "LZ8: max offset={}  max mlen={}  max llen={}  ratio: {} / {} = {:.2}%",
        cfg.max_off(),
        cfg.max_mlen,
        cfg.max_llen,
        output_size,
        input_size,
        ratio
    );

    if !verbose {
        return;
    }

    let total = 100.0 / input_size.max(1) as f64;
    eprintln!(
        "  Estimated size: {} bits ({} bits in the stream)",
        stats.estimated_bits,
        output_size * 8
    );
    eprintln!(
        "  Bytes encoded as matches:  {:6} ({:.1}%)",
        stats.match_bytes,
        total * stats.match_bytes as f64
    );
    eprintln!(
        "  Bytes encoded as literals: {:6} ({:.1}%)",
        stats.literal_bytes,
        total * stats.literal_bytes as f64
    );
    eprintln!("  Match overhead:   {:6} bits", stats.match_bits);
    eprintln!("  Literal overhead: {:6} bits", stats.literal_bits);

    eprintln!("value\t MOFF\t MLEN\t LLEN");
    let rows = stats
        .moff_hist
        .len()
        .max(stats.mlen_hist.len())
        .max(stats.llen_hist.len());
    for i in 0..rows {
        let moff = stats.moff_hist.get(i).copied().unwrap_or(0);
        let mlen = stats.mlen_hist.get(i).copied().unwrap_or(0);
        let llen = stats.llen_hist.get(i).copied().unwrap_or(0);
        if moff > 0 || mlen > 0 || llen > 0 {
            eprintln!("{}\t{:5}\t{:5}\t{:5}", i, moff, mlen, llen);
        }
    }
}

fn decompress(
    input: Option<&std::path::Path>,
    output: Option<&std::path::Path>,
    cfg: Config,
    force: bool,
    verbose: bool,
    quiet: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    cfg.validate()?;
    let start_time = Instant::now();
    let data = read_input(input)?;

    let progress = if !quiet && data.len() > PROGRESS_THRESHOLD {
        Some(make_progress(2, "Decompressing..."))
    } else {
        None
    };

    if let Some(ref pb) = progress {
        pb.inc(1);
    }

    let restored = decode_bytes(&data, &cfg)?;

    if let Some(ref pb) = progress {
        pb.inc(1);
        pb.finish_with_message("Decompression complete");
    }

    write_output(output, force, &restored)?;

    if !quiet {
        eprintln!(
            "LZ8: {} -> {} bytes in {:.2?}",
            data.len(),
            restored.len(),
            start_time.elapsed()
        );
        if verbose {
            eprintln!("  Output size: {}", restored.len());
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_round_trip() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempdir()?;
        let input_path = dir.path().join("input.txt");
        let packed_path = dir.path().join("packed.lz8");
        let output_path = dir.path().join("output.txt");

        let test_data = b"Hello, World! Hello, World! Hello, World!";
        fs::write(&input_path, test_data)?;

        let cfg = Config::default();
        compress(
            Some(&input_path),
            Some(&packed_path),
            cfg,
            false,
            false,
            false,
            true,
        )?;
        decompress(
            Some(&packed_path),
            Some(&output_path),
            cfg,
            false,
            false,
            true,
        )?;

        let result_data = fs::read(&output_path)?;
        assert_eq!(test_data, &result_data[..]);

        Ok(())
    }

    #[test]
    fn test_refuses_overwrite_without_force() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempdir()?;
        let input_path = dir.path().join("input.bin");
        let output_path = dir.path().join("output.lz8");

        fs::write(&input_path, b"payload")?;
        fs::write(&output_path, b"existing")?;

        let cfg = Config::default();
        let result = compress(
            Some(&input_path),
            Some(&output_path),
            cfg,
            false,
            false,
            false,
            true,
        );
        assert!(result.is_err());

        // With force the file is replaced
        compress(
            Some(&input_path),
            Some(&output_path),
            cfg,
            false,
            true,
            false,
            true,
        )?;
        assert_ne!(fs::read(&output_path)?, b"existing");

        Ok(())
    }

    #[test]
    fn test_mismatched_settings_are_rejected() {
        let cfg = Config {
            bits_moff: 4,
            offset_rel: Some(1),
            ..Config::default()
        };
        let result = compress(None, None, cfg, false, false, false, true);
        assert!(result.is_err());
    }
}
