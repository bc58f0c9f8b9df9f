//! DEFLATE block emission (RFC 1951).
//!
//! Two block types are emitted: stored blocks (BTYPE=00) and fixed-Huffman
//! coded blocks (BTYPE=01). Fixed codes are fully specified by the RFC, so
//! every emitted block is decodable by construction; stored blocks double as
//! the byte-aligning sync marker when empty.

use crate::matcher::Token;
use crate::tables::{distance_to_code, fixed_litlen_lengths, length_to_code};
use gzflow_core::BitSink;
use std::sync::OnceLock;

/// Largest payload of a single stored block.
const MAX_STORED_BLOCK: usize = 65535;

/// A canonical Huffman code, pre-reversed for LSB-first emission.
#[derive(Debug, Clone, Copy, Default)]
struct Code {
    bits: u32,
    len: u8,
}

/// Build canonical codes from code lengths (RFC 1951 Section 3.2.2),
/// reversed for LSB-first output.
fn build_codes(lengths: &[u8], codes: &mut [Code]) {
    let mut bl_count = [0u32; 16];
    for &len in lengths {
        if len > 0 {
            bl_count[len as usize] += 1;
        }
    }

    let mut next_code = [0u32; 16];
    let mut code = 0u32;
    for bits in 1..16 {
        code = (code + bl_count[bits - 1]) << 1;
        next_code[bits] = code;
    }

    for (symbol, &len) in lengths.iter().enumerate() {
        if len > 0 && symbol < codes.len() {
            let assigned = next_code[len as usize];
            next_code[len as usize] += 1;
            codes[symbol] = Code {
                bits: reverse_bits(assigned, len),
                len,
            };
        }
    }
}

/// Reverse the low `length` bits of a value.
fn reverse_bits(mut value: u32, length: u8) -> u32 {
    let mut result = 0u32;
    for _ in 0..length {
        result = (result << 1) | (value & 1);
        value >>= 1;
    }
    result
}

/// Fixed literal/length codes, built once.
fn fixed_litlen_codes() -> &'static [Code; 288] {
    static CODES: OnceLock<[Code; 288]> = OnceLock::new();
    CODES.get_or_init(|| {
        let mut codes = [Code::default(); 288];
        build_codes(&fixed_litlen_lengths(), &mut codes);
        codes
    })
}

/// Write a stored (uncompressed) block sequence.
///
/// Data longer than a single stored block's 65535-byte cap is split across
/// several blocks; only the last carries the final-block flag when requested.
/// Empty data still emits one empty block, which is how both the sync marker
/// and the empty final block are produced.
pub fn write_stored(sink: &mut BitSink, data: &[u8], final_block: bool) {
    let mut offset = 0;
    loop {
        let remaining = data.len() - offset;
        let block_size = remaining.min(MAX_STORED_BLOCK);
        let is_last = offset + block_size >= data.len();

        sink.write_bit(final_block && is_last);
        sink.write_bits(0b00, 2); // BTYPE=00 (stored)
        sink.align_to_byte();

        let len = block_size as u16;
        sink.write_bits(len as u32, 16);
        sink.write_bits(!len as u32, 16);
        sink.write_bytes(&data[offset..offset + block_size]);

        offset += block_size;
        if is_last {
            break;
        }
    }
}

/// Write one fixed-Huffman coded block from match-finder tokens.
pub fn write_fixed(sink: &mut BitSink, tokens: &[Token], final_block: bool) {
    sink.write_bit(final_block);
    sink.write_bits(0b01, 2); // BTYPE=01 (fixed Huffman)

    let codes = fixed_litlen_codes();

    for token in tokens {
        match token {
            Token::Literal(byte) => {
                let code = codes[*byte as usize];
                sink.write_bits(code.bits, code.len);
            }
            Token::Match { length, distance } => {
                let (len_code, len_extra_bits, len_extra) = length_to_code(*length);
                let code = codes[len_code as usize];
                sink.write_bits(code.bits, code.len);
                if len_extra_bits > 0 {
                    sink.write_bits(len_extra as u32, len_extra_bits);
                }

                // Fixed distance codes are 5 bits each, emitted reversed.
                let (dist_code, dist_extra_bits, dist_extra) = distance_to_code(*distance);
                sink.write_bits(reverse_bits(dist_code as u32, 5), 5);
                if dist_extra_bits > 0 {
                    sink.write_bits(dist_extra as u32, dist_extra_bits);
                }
            }
        }
    }

    // End of block.
    let eob = codes[256];
    sink.write_bits(eob.bits, eob.len);
}
