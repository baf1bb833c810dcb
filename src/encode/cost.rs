//! Byte-cost model for the optimal parser
//!
//! Every cost is expressed in bits and is always a multiple of 8. The
//! parser never inspects the wire format directly; all of its decisions
//! reduce to sums and comparisons of these three functions.

use crate::Config;

/// Sentinel cost for encodings that cannot be represented.
///
/// Large enough to dominate any real parse, small enough that a handful of
/// saturating additions stays far away from wrapping.
pub const INFEASIBLE: u32 = u32::MAX / 256;

/// Cost model derived from one configuration.
#[derive(Debug, Clone, Copy)]
pub struct CostModel {
    bits_moff: u8,
    max_off: u32,
    max_mlen: u32,
    max_llen: u32,
    zero_match_cost: u32,
}

impl CostModel {
    /// Derive the model from `cfg`.
    pub fn new(cfg: &Config) -> Self {
        let mut model = Self {
            bits_moff: cfg.bits_moff,
            max_off: cfg.max_off(),
            max_mlen: cfg.max_mlen,
            max_llen: cfg.max_llen,
            zero_match_cost: 0,
        };
        model.zero_match_cost =
            model.mlen_cost(0) + if cfg.zero_offset { model.moff_cost(1) } else { 0 };
        model
    }

    /// Bit cost of one zero-length match block, the separator inserted
    /// between adjacent literal blocks.
    pub fn zero_match_cost(&self) -> u32 {
        self.zero_match_cost
    }

    /// Bit cost of a match length field.
    pub fn mlen_cost(&self, l: u32) -> u32 {
        if l > self.max_mlen {
            INFEASIBLE
        } else if self.max_mlen > 255 && l > 127 {
            16
        } else {
            8
        }
    }

    /// Bit cost of a match offset field.
    pub fn moff_cost(&self, o: u32) -> u32 {
        if o < 1 || o > self.max_off {
            INFEASIBLE
        } else if self.bits_moff == 0 {
            0
        } else if self.bits_moff <= 8 {
            8
        } else {
            16
        }
    }

    /// Bit cost of a literal run of length `l`, including the zero-length
    /// match blocks needed to split runs longer than the wire maximum.
    pub fn llen_cost(&self, l: u32) -> u32 {
        if l == 0 {
            return 0;
        }
        let splits = (l - 1) / self.max_llen;
        let rest = l - splits * self.max_llen;
        let mut bits = splits * (8 + self.zero_match_cost);
        if self.max_llen > 255 && rest > 127 {
            bits += 8;
        }
        8 + bits
    }
}
