//! E2E Test Suite 01: Boundary Protocol
//!
//! Exercises the two exported C-ABI symbols through raw pointers, the way a
//! foreign caller would:
//! - query mode (null / zero-capacity destination) returning the exact size
//! - the query-then-allocate-then-execute two-call pattern
//! - exact-capacity boundary behaviour
//! - roundtrip fidelity across compression levels
//! - reentrancy from multiple threads

use std::ptr;

use zstd_ffi::abi::{zstd_compress, zstd_decompress};

/// Sentinel that no legitimate size in these tests can equal; lets a test
/// detect whether the callee wrote `*out_len` at all.
const UNWRITTEN: usize = usize::MAX;

fn compress(input: &[u8], level: i32, dst: Option<&mut [u8]>) -> (i32, usize) {
    let mut out_len = UNWRITTEN;
    let (out_ptr, cap) = match dst {
        Some(buf) => (buf.as_mut_ptr(), buf.len()),
        None => (ptr::null_mut(), 0),
    };
    let rc = unsafe {
        zstd_compress(input.as_ptr(), input.len(), level, out_ptr, cap, &mut out_len)
    };
    (rc, out_len)
}

fn decompress(input: &[u8], dst: Option<&mut [u8]>) -> (i32, usize) {
    let mut out_len = UNWRITTEN;
    let (out_ptr, cap) = match dst {
        Some(buf) => (buf.as_mut_ptr(), buf.len()),
        None => (ptr::null_mut(), 0),
    };
    let rc = unsafe {
        zstd_decompress(input.as_ptr(), input.len(), out_ptr, cap, &mut out_len)
    };
    (rc, out_len)
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 0: version constants agree with each other
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_version_constants() {
    assert_eq!(zstd_ffi::version_number(), zstd_ffi::ZSTD_FFI_VERSION_NUMBER);
    let expected = format!(
        "{}.{}.{}",
        zstd_ffi::ZSTD_FFI_VERSION_MAJOR,
        zstd_ffi::ZSTD_FFI_VERSION_MINOR,
        zstd_ffi::ZSTD_FFI_VERSION_RELEASE
    );
    assert_eq!(zstd_ffi::version_string(), expected);
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 1: concrete two-call scenario — 10,000 zero bytes, level 3
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_two_call_pattern_redundant_input() {
    let original = vec![0u8; 10_000];

    // Query: status 2, required size small thanks to the redundancy.
    let (rc, required) = compress(&original, 3, None);
    assert_eq!(rc, 2);
    assert!(required < 100, "10k zero bytes should compress tiny, got {required}");

    // Execute: status 0, output length within the queried size.
    let mut compressed = vec![0u8; required];
    let (rc, written) = compress(&original, 3, Some(&mut compressed));
    assert_eq!(rc, 0);
    assert!(written <= required);
    compressed.truncate(written);

    // Decompress query: status 2, original size recovered from the frame.
    let (rc, needed) = decompress(&compressed, None);
    assert_eq!(rc, 2);
    assert_eq!(needed, original.len());

    // Decompress execute: status 0, bytes identical.
    let mut decompressed = vec![0u8; needed];
    let (rc, written) = decompress(&compressed, Some(&mut decompressed));
    assert_eq!(rc, 0);
    assert_eq!(written, original.len());
    assert_eq!(decompressed, original);
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 2: query mode never touches a destination buffer
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_query_mode_leaves_destination_untouched() {
    let input = b"query mode must not write anywhere".repeat(10);

    // Zero capacity with a real pointer is still query mode; the canary
    // bytes must survive.
    let mut canary = vec![0xA5u8; 64];
    let mut out_len = UNWRITTEN;
    let rc = unsafe {
        zstd_compress(input.as_ptr(), input.len(), 3, canary.as_mut_ptr(), 0, &mut out_len)
    };
    assert_eq!(rc, 2);
    assert_ne!(out_len, UNWRITTEN);
    assert!(canary.iter().all(|&b| b == 0xA5));
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 3: exact-capacity boundary
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_capacity_boundary() {
    let original = b"boundary capacity test, somewhat compressible text. ".repeat(40);

    let (rc, required) = compress(&original, 3, None);
    assert_eq!(rc, 2);

    // Exactly the queried size succeeds.
    let mut exact = vec![0u8; required];
    let (rc, written) = compress(&original, 3, Some(&mut exact));
    assert_eq!(rc, 0);
    assert_eq!(written, required);

    // One byte smaller reports status 2 with the same required size.
    let mut short = vec![0u8; required - 1];
    let (rc, reported) = compress(&original, 3, Some(&mut short));
    assert_eq!(rc, 2);
    assert_eq!(reported, required);

    // Same for the decompression side.
    let compressed = &exact[..written];
    let mut short = vec![0u8; original.len() - 1];
    let (rc, reported) = decompress(compressed, Some(&mut short));
    assert_eq!(rc, 2);
    assert_eq!(reported, original.len());
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 4: roundtrip across compression levels
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_roundtrip_across_levels() {
    let original: Vec<u8> = (0u8..=255).cycle().take(8_192).collect();

    for level in [1, 3, 9, 19] {
        let (rc, required) = compress(&original, level, None);
        assert_eq!(rc, 2, "query failed at level {level}");

        let mut compressed = vec![0u8; required];
        let (rc, clen) = compress(&original, level, Some(&mut compressed));
        assert_eq!(rc, 0, "compress failed at level {level}");

        let mut decompressed = vec![0u8; original.len()];
        let (rc, dlen) = decompress(&compressed[..clen], Some(&mut decompressed));
        assert_eq!(rc, 0, "decompress failed at level {level}");
        assert_eq!(dlen, original.len());
        assert_eq!(decompressed, original, "roundtrip mismatch at level {level}");
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 5: idempotent sizing
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_query_is_idempotent() {
    let input = b"idempotent sizing input".repeat(100);

    let (rc, first) = compress(&input, 5, None);
    assert_eq!(rc, 2);
    for _ in 0..3 {
        let (rc, again) = compress(&input, 5, None);
        assert_eq!(rc, 2);
        assert_eq!(again, first);
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 6: output length may be below the supplied capacity
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_oversized_destination() {
    let original = b"oversized destination test. ".repeat(30);

    let mut compressed = vec![0u8; original.len() * 2];
    let (rc, written) = compress(&original, 3, Some(&mut compressed));
    assert_eq!(rc, 0);
    assert!(written < compressed.len());

    let mut decompressed = vec![0u8; original.len() * 2];
    let (rc, dlen) = decompress(&compressed[..written], Some(&mut decompressed));
    assert_eq!(rc, 0);
    assert_eq!(&decompressed[..dlen], &original[..]);
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 7: empty input is a valid degenerate case
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_empty_input_compresses() {
    // Non-null pointer with zero length.
    let empty: [u8; 0] = [];
    let (rc, required) = compress(&empty, 3, None);
    assert_eq!(rc, 2);
    assert!(required > 0); // the empty frame still has a header

    let mut compressed = vec![0u8; required];
    let (rc, written) = compress(&empty, 3, Some(&mut compressed));
    assert_eq!(rc, 0);
    assert_eq!(written, required);

    // Null pointer with zero length is equally valid.
    let mut out_len = UNWRITTEN;
    let rc = unsafe { zstd_compress(ptr::null(), 0, 3, ptr::null_mut(), 0, &mut out_len) };
    assert_eq!(rc, 2);
    assert_eq!(out_len, required);

    // The empty frame declares a content size of zero.
    let (rc, needed) = decompress(&compressed[..written], None);
    assert_eq!(rc, 2);
    assert_eq!(needed, 0);
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 8: concurrent callers share no state
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_concurrent_roundtrips() {
    let handles: Vec<_> = (0u8..8)
        .map(|seed| {
            std::thread::spawn(move || {
                let original = vec![seed; 4_096 + seed as usize * 257];

                let (rc, required) = compress(&original, 3, None);
                assert_eq!(rc, 2);

                let mut compressed = vec![0u8; required];
                let (rc, clen) = compress(&original, 3, Some(&mut compressed));
                assert_eq!(rc, 0);

                let mut decompressed = vec![0u8; original.len()];
                let (rc, dlen) = decompress(&compressed[..clen], Some(&mut decompressed));
                assert_eq!(rc, 0);
                assert_eq!(dlen, original.len());
                assert_eq!(decompressed, original);
            })
        })
        .collect();

    for handle in handles {
        handle.join().expect("worker thread panicked");
    }
}
