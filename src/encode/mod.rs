//! LZ8 encoding (compression)
//!
//! The encoder runs in three stages over one input buffer: a sliding-window
//! match search, a backward dynamic program that picks the cheapest parse
//! under the configured cost model, and a forward walk that emits the wire
//! stream.

mod cost;
mod matcher;
mod parser;
mod writer;

pub use writer::Lz8Writer;

use crate::{CompressionStats, Config, Lz8Error, Result, MAX_INPUT_SIZE};
use cost::CostModel;
use parser::ParseTable;
use std::io::Write;

/// Shortest match the parser will consider.
pub const MIN_MATCH_LEN: usize = 1;

/// How many literal extensions the parser examines per position.
///
/// Five is enough to reach every run length the cost model can prefer;
/// changing it changes the emitted bytes.
pub const LITERAL_JOIN_WINDOW: usize = 5;

/// Convenience function to compress data in memory.
pub fn encode_bytes(data: &[u8], cfg: &Config) -> Result<Vec<u8>> {
    encode_bytes_with_stats(data, cfg).map(|(out, _)| out)
}

/// Compress data in memory and report encoding statistics.
pub fn encode_bytes_with_stats(
    data: &[u8],
    cfg: &Config,
) -> Result<(Vec<u8>, CompressionStats)> {
    cfg.validate()?;
    if data.len() > MAX_INPUT_SIZE {
        return Err(Lz8Error::InputTooLarge {
            size: data.len(),
            max: MAX_INPUT_SIZE,
        });
    }
    let cost = CostModel::new(cfg);
    let table = ParseTable::build(data, cfg, &cost);
    let mut stats = CompressionStats::for_config(cfg);
    stats.estimated_bits = table.estimated_bits();
    let out = writer::emit(data, &table, cfg, &cost, &mut stats)?;
    Ok((out, stats))
}

/// Write the chosen emission walk to `sink`, one line per block.
///
/// Lines show the position, the block kind with its length, the block's
/// own bit cost, and the table's remaining-cost figure, with separator
/// blocks flagged where the emitter inserts them.
pub fn trace_parse<W: Write>(data: &[u8], cfg: &Config, sink: &mut W) -> Result<()> {
    cfg.validate()?;
    if data.len() > MAX_INPUT_SIZE {
        return Err(Lz8Error::InputTooLarge {
            size: data.len(),
            max: MAX_INPUT_SIZE,
        });
    }
    let cost = CostModel::new(cfg);
    let table = ParseTable::build(data, cfg, &cost);

    let mut in_literal = false;
    let mut pos = 0usize;
    while pos < data.len() {
        let cur = table.cell(pos);
        let extra = if in_literal { cost.zero_match_cost() } else { 0 };
        if cur.lbits.saturating_add(extra) <= cur.mbits {
            let len = cur.llen.min(cfg.max_llen);
            if in_literal {
                writeln!(
                    sink,
                    "[{pos:04X}] M0 separator (+{} bytes)",
                    cost.zero_match_cost() / 8
                )?;
            }
            writeln!(
                sink,
                "[{pos:04X}] L {len:5}        cost {:5} bits, {:6} remaining",
                cost.llen_cost(len) + 8 * len,
                cur.lbits
            )?;
            pos += len as usize;
            in_literal = true;
        } else {
            if !in_literal {
                writeln!(sink, "[{pos:04X}] L0 separator (+1 byte)")?;
            }
            writeln!(
                sink,
                "[{pos:04X}] M {:5} @{:<5} cost {:5} bits, {:6} remaining",
                cur.mlen,
                cur.mpos,
                cost.mlen_cost(cur.mlen) + cost.moff_cost(cur.mpos),
                cur.mbits
            )?;
            pos += cur.mlen as usize;
            in_literal = false;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_rejects_invalid_config() {
        let cfg = Config {
            bits_moff: 20,
            ..Config::default()
        };
        assert!(matches!(
            encode_bytes(b"x", &cfg),
            Err(Lz8Error::InvalidOffsetBits(20))
        ));
    }

    #[test]
    fn test_encode_rejects_oversized_input() {
        let data = vec![0u8; MAX_INPUT_SIZE + 1];
        assert!(matches!(
            encode_bytes(&data, &Config::default()),
            Err(Lz8Error::InputTooLarge { .. })
        ));
    }

    #[test]
    fn test_stats_account_for_every_input_byte() {
        let data = vec![0x55u8; 300];
        let (out, stats) = encode_bytes_with_stats(&data, &Config::default()).unwrap();
        assert_eq!(stats.literal_bytes + stats.match_bytes, data.len());
        assert_eq!(stats.literal_bytes, 1);
        assert_eq!(stats.match_bytes, 299);
        // Every output byte is either literal data or counted overhead
        assert_eq!(
            (stats.literal_bits + stats.match_bits) / 8 + stats.literal_bytes,
            out.len()
        );
        assert_eq!(stats.estimated_bits as usize, out.len() * 8);
        assert_eq!(stats.mlen_hist[255], 1);
        assert_eq!(stats.mlen_hist[44], 1);
        assert_eq!(stats.moff_hist[1], 2);
        assert_eq!(stats.llen_hist[0], 1);
        assert_eq!(stats.llen_hist[1], 1);
    }

    #[test]
    fn test_trace_lists_each_block() {
        let mut trace = Vec::new();
        trace_parse(&vec![0x55u8; 300], &Config::default(), &mut trace).unwrap();
        let text = String::from_utf8(trace).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        // L1, M255, L0 separator, M44
        assert_eq!(lines.len(), 4);
        assert!(lines[0].contains("L     1"));
        assert!(lines[1].contains("M   255"));
        assert!(lines[2].contains("L0 separator"));
        assert!(lines[3].contains("M    44"));
    }
}
