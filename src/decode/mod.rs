//! LZ8 decoding (decompression)
//!
//! The decoder is a straight loop over alternating literal and match
//! blocks, copying matches out of a ring buffer sized to the offset
//! window. It is deliberately simple; all of the format's intelligence
//! lives in the encoder.

mod reader;
mod state;

pub use reader::Lz8Reader;

use crate::{Config, Result};

/// Convenience function to decompress data in memory.
///
/// Truncated input is an error; use [`Lz8Reader`] to also recover the
/// bytes decoded before the truncation point.
pub fn decode_bytes(data: &[u8], cfg: &Config) -> Result<Vec<u8>> {
    let mut reader = Lz8Reader::new(std::io::Cursor::new(data), *cfg)?;
    reader.decode_to_end()
}
