//! Decoder window state and field-level input reading
//!
//! The decoder owns a ring buffer sized to the offset window; everything it
//! emits also lands in the ring so later matches can reference it. Input is
//! consumed byte-wise, which keeps the field readers trivial.

use crate::{Config, Lz8Error, Result};
use std::io::Read;

/// Ring buffer the decoder copies matches from.
#[derive(Debug)]
pub(super) struct Window {
    buf: Vec<u8>,
    mask: usize,
    pos: usize,
}

impl Window {
    pub fn new(cfg: &Config) -> Self {
        let mask = cfg.window_mask();
        Self {
            buf: vec![0; mask + 1],
            mask,
            pos: 0,
        }
    }

    /// Record one output byte.
    pub fn push(&mut self, x: u8) {
        self.buf[self.pos & self.mask] = x;
        self.pos += 1;
    }

    /// Total bytes produced so far.
    pub fn produced(&self) -> u64 {
        self.pos as u64
    }

    /// Window index a match starts copying from, given the raw offset
    /// field. In delta mode offset 0 means "one byte back"; in
    /// address-relative mode the field already names a window address.
    pub fn src_index(&self, off: usize, offset_rel: Option<u32>) -> usize {
        match offset_rel {
            None => self.pos.wrapping_sub(off).wrapping_add(self.mask),
            Some(base) => off + self.mask + 1 - base as usize,
        }
    }

    /// Read the window at `idx` (any wrapping is applied here).
    pub fn get(&self, idx: usize) -> u8 {
        self.buf[idx & self.mask]
    }
}

/// Read one byte; `None` on end of input.
pub(super) fn read_u8<R: Read>(r: &mut R) -> std::io::Result<Option<u8>> {
    let mut byte = [0u8; 1];
    loop {
        match r.read(&mut byte) {
            Ok(0) => return Ok(None),
            Ok(_) => return Ok(Some(byte[0])),
            Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
}

/// Read a length field under `limit`; `None` on clean end of input.
///
/// The second byte of the long form is mandatory once the first byte was
/// read; `produced` is only used to report where a truncated field sat.
pub(super) fn read_len<R: Read>(r: &mut R, limit: u32, produced: u64) -> Result<Option<u32>> {
    let c = match read_u8(r)? {
        None => return Ok(None),
        Some(c) => c as u32,
    };
    if limit < 256 || c < 128 {
        return Ok(Some(c));
    }
    match read_u8(r)? {
        None => Err(Lz8Error::TruncatedLength(produced)),
        Some(c2) => Ok(Some(c + ((c2 as u32) << 7))),
    }
}
