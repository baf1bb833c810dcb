use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use lz8::{encode_bytes, Config};
use std::hint::black_box;
use std::time::Duration;

fn generate_test_data(size: usize, pattern: &str) -> Vec<u8> {
    match pattern {
        "text" => {
            let base = b"Lorem ipsum dolor sit amet, consectetur adipiscing elit. ";
            let mut data = Vec::with_capacity(size);
            while data.len() < size {
                data.extend_from_slice(base);
            }
            data.truncate(size);
            data
        }
        "binary" => (0..size).map(|i| ((i * 17 + 11) % 256) as u8).collect(),
        "repetitive" => {
            let pattern = b"ABCDEFGHIJ";
            let mut data = Vec::with_capacity(size);
            while data.len() < size {
                data.extend_from_slice(pattern);
            }
            data.truncate(size);
            data
        }
        "random" => {
            let mut state = 0x2545F491u32;
            (0..size)
                .map(|_| {
                    state ^= state << 13;
                    state ^= state >> 17;
                    state ^= state << 5;
                    (state >> 24) as u8
                })
                .collect()
        }
        _ => panic!("Unknown pattern: {pattern}"),
    }
}

fn compression_throughput(c: &mut Criterion) {
    let mut group = c.benchmark_group("compression_throughput");
    group.measurement_time(Duration::from_secs(10));
    group.sample_size(20);

    // The match search is O(input x window), so the wide window only runs
    // on the small sizes
    for size in [1024usize, 16 * 1024].iter() {
        let size_label = match *size {
            1024 => "1KB",
            16384 => "16KB",
            _ => "unknown",
        };

        for pattern in ["text", "binary", "repetitive", "random"].iter() {
            let data = generate_test_data(*size, pattern);

            for (cfg_label, cfg) in [
                ("o8", Config::default()),
                (
                    "o16",
                    Config {
                        bits_moff: 16,
                        ..Config::default()
                    },
                ),
            ] {
                let benchmark_id =
                    BenchmarkId::from_parameter(format!("{size_label}/{pattern}/{cfg_label}"));

                group.throughput(Throughput::Bytes(*size as u64));
                group.bench_with_input(benchmark_id, &data, |b, data| {
                    b.iter(|| {
                        encode_bytes(black_box(data), black_box(&cfg))
                            .expect("Compression failed")
                    });
                });
            }
        }
    }

    group.finish();
}

fn compression_full_cap(c: &mut Criterion) {
    let mut group = c.benchmark_group("compression_full_cap");
    group.measurement_time(Duration::from_secs(10));
    group.sample_size(10);

    // A full 128 KiB buffer, the largest input the encoder accepts
    let size = 128 * 1024;
    for pattern in ["text", "random"].iter() {
        let data = generate_test_data(size, pattern);
        let cfg = Config::default();
        let benchmark_id = BenchmarkId::from_parameter(format!("128KB/{pattern}/o8"));

        group.throughput(Throughput::Bytes(size as u64));
        group.bench_with_input(benchmark_id, &data, |b, data| {
            b.iter(|| encode_bytes(black_box(data), black_box(&cfg)).expect("Compression failed"));
        });
    }

    group.finish();
}

fn compression_window_cost(c: &mut Criterion) {
    let mut group = c.benchmark_group("compression_window_cost");
    group.measurement_time(Duration::from_secs(8));
    group.sample_size(20);

    // Sweep the offset width over the same input
    let data = generate_test_data(16 * 1024, "text");
    for bits_moff in [0u8, 4, 8, 12, 16] {
        let cfg = Config {
            bits_moff,
            ..Config::default()
        };
        let benchmark_id = BenchmarkId::from_parameter(format!("bits_moff_{bits_moff}"));

        group.throughput(Throughput::Bytes(data.len() as u64));
        group.bench_with_input(benchmark_id, &data, |b, data| {
            b.iter(|| encode_bytes(black_box(data), black_box(&cfg)).expect("Compression failed"));
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    compression_throughput,
    compression_full_cap,
    compression_window_cost
);
criterion_main!(benches);
