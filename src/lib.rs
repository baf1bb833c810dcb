//! LZ8 - byte-aligned LZ77 codec for tiny fixed-function decoders
//!
//! This crate implements a deliberately simple compression format: the
//! stream is a sequence of alternating literal runs and back-references,
//! all fields are whole bytes, and the decoder fits in a few dozen machine
//! instructions on an 8-bit CPU. The encoder makes up for the format's
//! simplicity with a near-optimal parse: a backward dynamic program picks,
//! for every input position, the cheapest continuation under the exact
//! byte costs of the configured wire format.
//!
//! # Features
//!
//! - Near-optimal parsing (backward DP over every position)
//! - Configurable offset width (0 to 16 bits), run-length limits up to
//!   32895, address-relative and complemented offsets
//! - Matching streaming `Read`/`Write` adapters
//! - No in-band header: configuration travels out of band and must be
//!   identical on both ends
//!
//! # Example - round trip
//!
//! ```
//! use lz8::{decode_bytes, encode_bytes, Config};
//!
//! let cfg = Config::default();
//! let data = b"blue fish, red fish, old fish, new fish";
//! let packed = encode_bytes(data, &cfg)?;
//! assert!(packed.len() < data.len());
//! assert_eq!(decode_bytes(&packed, &cfg)?, data);
//! # Ok::<(), lz8::Lz8Error>(())
//! ```
//!
//! # Example - streaming adapters
//!
//! ```no_run
//! use lz8::{Config, Lz8Reader, Lz8Writer};
//! use std::io::{Read, Write};
//!
//! let cfg = Config { bits_moff: 16, ..Config::default() };
//!
//! let file = std::fs::File::create("payload.lz8")?;
//! let mut writer = Lz8Writer::new(file, cfg)?;
//! writer.write_all(&std::fs::read("payload.bin")?)?;
//! writer.finish()?;
//!
//! let mut reader = Lz8Reader::new(std::fs::File::open("payload.lz8")?, cfg)?;
//! let mut restored = Vec::new();
//! reader.read_to_end(&mut restored)?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]

// Public modules
pub mod common;
pub mod decode;
pub mod encode;
pub mod error;

// Async modules (only available with async feature)
#[cfg(feature = "async")]
pub mod async_batch;
#[cfg(feature = "async")]
pub mod async_convenience;

// Re-export commonly used types
pub use common::{
    CompressionStats, Config, Lz8Error, Result, MAX_INPUT_SIZE, MAX_OFFSET_BITS, MAX_RUN_LIMIT,
    MAX_WINDOW_SIZE,
};
pub use decode::Lz8Reader;
pub use encode::Lz8Writer;

// Re-export async types when async feature is enabled
#[cfg(feature = "async")]
pub use async_batch::AsyncBatchProcessor;
#[cfg(feature = "async")]
pub use async_convenience::*;

// Convenience functions

/// Compress data with the LZ8 near-optimal parser.
///
/// # Arguments
/// * `data` - The data to compress (at most [`MAX_INPUT_SIZE`] bytes)
/// * `cfg` - Wire format configuration; the decoder must use the same
///
/// # Returns
/// A vector containing the compressed stream
pub fn encode_bytes(data: &[u8], cfg: &Config) -> Result<Vec<u8>> {
    encode::encode_bytes(data, cfg)
}

/// Compress data and report statistics about the chosen parse.
pub fn encode_bytes_with_stats(data: &[u8], cfg: &Config) -> Result<(Vec<u8>, CompressionStats)> {
    encode::encode_bytes_with_stats(data, cfg)
}

/// Decompress an LZ8 stream.
///
/// # Arguments
/// * `data` - The compressed stream
/// * `cfg` - The configuration the stream was encoded with
///
/// # Returns
/// A vector containing the decompressed data
pub fn decode_bytes(data: &[u8], cfg: &Config) -> Result<Vec<u8>> {
    decode::decode_bytes(data, cfg)
}
