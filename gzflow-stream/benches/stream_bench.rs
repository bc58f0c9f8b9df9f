//! Benchmarks for streaming compression throughput.

use gzflow_deflate::DeflateEngine;
use gzflow_stream::{CompressionSession, CompressionTier, FlushRequest, SegmentedBuffer};

fn main() {
    let test_cases = vec![
        ("small_random", generate_random(1024)),
        ("medium_random", generate_random(64 * 1024)),
        ("large_random", generate_random(256 * 1024)),
        ("small_repeated", generate_repeated(1024)),
        ("medium_repeated", generate_repeated(64 * 1024)),
        ("large_repeated", generate_repeated(256 * 1024)),
        ("small_text", generate_text_like(1024)),
        ("medium_text", generate_text_like(64 * 1024)),
        ("large_text", generate_text_like(256 * 1024)),
    ];

    println!("Streaming Compression Benchmarks");
    println!("=================================\n");

    for (name, data) in &test_cases {
        println!("Test: {} ({} bytes)", name, data.len());

        for tier in [
            CompressionTier::Fast,
            CompressionTier::Balanced,
            CompressionTier::Best,
        ] {
            let start = std::time::Instant::now();

            let mut session = CompressionSession::new(DeflateEngine::new());
            session.init(tier, 15, 3).expect("init failed");

            let mut input = SegmentedBuffer::new();
            for piece in data.chunks(8 * 1024) {
                input.push_segment(piece.to_vec());
            }

            let mut output = Vec::new();
            session
                .compress(&mut input, &mut output, FlushRequest::Finish)
                .expect("compress failed");

            let elapsed = start.elapsed();
            let throughput = data.len() as f64 / elapsed.as_secs_f64() / 1024.0 / 1024.0;
            let ratio = data.len() as f64 / output.len().max(1) as f64;

            println!(
                "  {:?}: {:6.2} MB/s, {:7} -> {:7} bytes, {:.2}x ratio, {:7.2} µs",
                tier,
                throughput,
                data.len(),
                output.len(),
                ratio,
                elapsed.as_micros()
            );
        }
        println!();
    }
}

fn generate_random(size: usize) -> Vec<u8> {
    // Simple xorshift PRNG for reproducible "random" data.
    let mut state = 0x2545F4914F6CDD1Du64;
    (0..size)
        .map(|_| {
            state ^= state << 13;
            state ^= state >> 7;
            state ^= state << 17;
            (state & 0xFF) as u8
        })
        .collect()
}

fn generate_repeated(size: usize) -> Vec<u8> {
    b"ABCDEFGH"
        .iter()
        .cycle()
        .take(size)
        .copied()
        .collect()
}

fn generate_text_like(size: usize) -> Vec<u8> {
    let words = [
        "the", "quick", "brown", "fox", "jumps", "over", "lazy", "dog", "compression", "stream",
    ];
    let mut out = Vec::with_capacity(size);
    let mut i = 0;
    while out.len() < size {
        out.extend_from_slice(words[i % words.len()].as_bytes());
        out.push(b' ');
        i += 1;
    }
    out.truncate(size);
    out
}
