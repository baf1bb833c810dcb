//! Streaming decompression reader
//!
//! The stream is consumed as alternating literal and match blocks. End of
//! input at a length field is the normal way a stream ends; end of input
//! anywhere else is a truncation error. Bytes decoded before such an error
//! are handed to the caller first, so a truncated stream yields a prefix of
//! the original data and then the error.

use super::state::{read_len, read_u8, Window};
use crate::{Config, Lz8Error, Result};
use std::io::Read;

/// Streaming decompression reader implementing the Read trait.
#[derive(Debug)]
pub struct Lz8Reader<R: Read> {
    reader: R,
    cfg: Config,
    window: Window,
    out: Vec<u8>,
    out_pos: usize,
    finished: bool,
    pending_error: Option<Lz8Error>,
}

impl<R: Read> Lz8Reader<R> {
    /// Create a new reader for the given configuration.
    pub fn new(reader: R, cfg: Config) -> Result<Self> {
        cfg.validate()?;
        let window = Window::new(&cfg);
        Ok(Self {
            reader,
            cfg,
            window,
            out: Vec::new(),
            out_pos: 0,
            finished: false,
            pending_error: None,
        })
    }

    /// Total bytes decoded so far, including any not yet read out.
    pub fn produced(&self) -> u64 {
        self.window.produced()
    }

    /// Decode the whole remaining stream into one buffer.
    pub fn decode_to_end(&mut self) -> Result<Vec<u8>> {
        while !self.finished {
            self.expand()?;
        }
        if let Some(e) = self.pending_error.take() {
            return Err(e);
        }
        let mut out = std::mem::take(&mut self.out);
        if self.out_pos > 0 {
            out.drain(..self.out_pos);
            self.out_pos = 0;
        }
        Ok(out)
    }

    /// Decode block pairs until some output accumulates or the stream ends.
    fn expand(&mut self) -> Result<usize> {
        let mut written = 0usize;

        while written == 0 && !self.finished {
            // Literal block
            let produced = self.produced();
            let n = match read_len(&mut self.reader, self.cfg.max_llen, produced)? {
                None => {
                    self.finished = true;
                    break;
                }
                Some(n) => n,
            };
            for _ in 0..n {
                let x = read_u8(&mut self.reader)?
                    .ok_or_else(|| Lz8Error::TruncatedLiteral(self.window.produced()))?;
                self.window.push(x);
                self.out.push(x);
                written += 1;
            }

            // Match block
            let produced = self.produced();
            let n = match read_len(&mut self.reader, self.cfg.max_mlen, produced)? {
                None => {
                    self.finished = true;
                    break;
                }
                Some(n) => n,
            };
            if n > 0 || self.cfg.zero_offset {
                let mut off = 0usize;
                if self.cfg.bits_moff > 0 {
                    off = read_u8(&mut self.reader)?
                        .ok_or_else(|| Lz8Error::TruncatedOffset(self.window.produced()))?
                        as usize;
                }
                if self.cfg.bits_moff > 8 {
                    let hi = read_u8(&mut self.reader)?
                        .ok_or_else(|| Lz8Error::TruncatedOffset(self.window.produced()))?
                        as usize;
                    off += hi << 8;
                }
                if self.cfg.exor_offset {
                    off ^= self.cfg.window_mask();
                }
                let mut src = self.window.src_index(off, self.cfg.offset_rel);
                for _ in 0..n {
                    // Overlapping copies are the point: a one-byte distance
                    // replays the byte just written
                    let x = self.window.get(src);
                    self.window.push(x);
                    self.out.push(x);
                    src = src.wrapping_add(1);
                    written += 1;
                }
            }
        }

        Ok(written)
    }
}

impl<R: Read> Read for Lz8Reader<R> {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        if self.out_pos >= self.out.len() {
            self.out.clear();
            self.out_pos = 0;
            if !self.finished && self.pending_error.is_none() {
                if let Err(e) = self.expand() {
                    // Serve whatever was decoded before surfacing the error
                    self.pending_error = Some(e);
                    self.finished = true;
                }
            }
        }

        if self.out_pos >= self.out.len() {
            if let Some(e) = self.pending_error.take() {
                return Err(match e {
                    Lz8Error::Io(io_err) => io_err,
                    other => std::io::Error::new(std::io::ErrorKind::InvalidData, other),
                });
            }
            return Ok(0);
        }

        let available = self.out.len() - self.out_pos;
        let to_copy = buf.len().min(available);
        buf[..to_copy].copy_from_slice(&self.out[self.out_pos..self.out_pos + to_copy]);
        self.out_pos += to_copy;

        if self.out_pos >= self.out.len() {
            self.out.clear();
            self.out_pos = 0;
        }

        Ok(to_copy)
    }
}
