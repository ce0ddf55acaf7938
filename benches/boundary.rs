//! Criterion benchmarks for the C-ABI boundary.
//!
//! Run with:
//!   cargo bench --bench boundary
//!
//! Measures the full foreign-caller path (raw pointers through the
//! exported symbols), including the size query that a two-call usage
//! pattern pays before every allocation.

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use std::ptr;

use zstd_ffi::abi::{zstd_compress, zstd_decompress};

/// Compressible synthetic data of exactly `size` bytes.
fn synthetic_data(size: usize) -> Vec<u8> {
    const LOREM: &[u8] = b"Lorem ipsum dolor sit amet, consectetur adipiscing elit, \
        sed do eiusmod tempor incididunt ut labore et dolore magna aliqua. \
        Ut enim ad minim veniam, quis nostrud exercitation ullamco laboris nisi \
        ut aliquip ex ea commodo consequat. ";

    let mut out = Vec::with_capacity(size);
    while out.len() < size {
        let rem = size - out.len();
        out.extend_from_slice(&LOREM[..rem.min(LOREM.len())]);
    }
    out
}

fn query_compressed_size(input: &[u8], level: i32) -> usize {
    let mut required = 0usize;
    let rc = unsafe {
        zstd_compress(input.as_ptr(), input.len(), level, ptr::null_mut(), 0, &mut required)
    };
    assert_eq!(rc, 2);
    required
}

fn bench_boundary(c: &mut Criterion) {
    let mut group = c.benchmark_group("boundary");

    for &chunk_size in &[65_536usize, 262_144] {
        let chunk = synthetic_data(chunk_size);

        // ── compress at several levels ──────────────────────────────────────
        for &level in &[1i32, 3, 9] {
            let required = query_compressed_size(&chunk, level);
            let mut dst = vec![0u8; required];
            group.throughput(Throughput::Bytes(chunk_size as u64));
            group.bench_with_input(
                BenchmarkId::new(format!("compress_l{level}"), chunk_size),
                &chunk,
                |b, chunk| {
                    b.iter(|| {
                        let mut out_len = 0usize;
                        let rc = unsafe {
                            zstd_compress(
                                chunk.as_ptr(),
                                chunk.len(),
                                level,
                                dst.as_mut_ptr(),
                                dst.len(),
                                &mut out_len,
                            )
                        };
                        assert_eq!(rc, 0);
                        out_len
                    })
                },
            );
        }

        // ── size query alone (the first call of the two-call pattern) ───────
        group.throughput(Throughput::Bytes(chunk_size as u64));
        group.bench_with_input(
            BenchmarkId::new("compress_query", chunk_size),
            &chunk,
            |b, chunk| b.iter(|| query_compressed_size(chunk, 3)),
        );

        // ── decompress — pre-compress the chunk once, then benchmark ────────
        {
            let required = query_compressed_size(&chunk, 3);
            let mut compressed = vec![0u8; required];
            let mut clen = 0usize;
            let rc = unsafe {
                zstd_compress(
                    chunk.as_ptr(),
                    chunk.len(),
                    3,
                    compressed.as_mut_ptr(),
                    compressed.len(),
                    &mut clen,
                )
            };
            assert_eq!(rc, 0);
            compressed.truncate(clen);

            let mut dst = vec![0u8; chunk_size];
            group.throughput(Throughput::Bytes(chunk_size as u64));
            group.bench_with_input(
                BenchmarkId::new("decompress", chunk_size),
                &compressed,
                |b, compressed| {
                    b.iter(|| {
                        let mut out_len = 0usize;
                        let rc = unsafe {
                            zstd_decompress(
                                compressed.as_ptr(),
                                compressed.len(),
                                dst.as_mut_ptr(),
                                dst.len(),
                                &mut out_len,
                            )
                        };
                        assert_eq!(rc, 0);
                        out_len
                    })
                },
            );
        }
    }

    group.finish();
}

criterion_group!(benches, bench_boundary);
criterion_main!(benches);
