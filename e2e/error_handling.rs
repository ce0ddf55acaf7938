//! E2E Test Suite 02: Error Handling & Fault Containment
//!
//! Every failure mode the contract names, exercised through the C ABI:
//! - invalid pointer/length combinations (status 1, out-len untouched)
//! - codec rejections: garbage input, invalid level (status 3)
//! - capacity shortfall reporting (status 2 with the required size)
//! - the 2-then-3 path for a frame damaged only past its header
//!
//! None of these inputs may crash the process; a crash here is the one
//! defect the boundary exists to prevent.

use std::ptr;

use zstd_ffi::Status;
use zstd_ffi::abi::{zstd_compress, zstd_decompress};

const UNWRITTEN: usize = usize::MAX;

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
// Test 1: null input pointer with nonzero length — both operations,
//         regardless of destination state
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_null_input_with_nonzero_len_is_invalid() {
    let mut dst = vec![0u8; 128];

    // Query-mode destination.
    let mut out_len = UNWRITTEN;
    let rc = unsafe { zstd_compress(ptr::null(), 42, 3, ptr::null_mut(), 0, &mut out_len) };
    assert_eq!(rc, 1);
    assert_eq!(out_len, UNWRITTEN, "out_len must stay untouched on invalid args");

    let mut out_len = UNWRITTEN;
    let rc = unsafe { zstd_decompress(ptr::null(), 42, ptr::null_mut(), 0, &mut out_len) };
    assert_eq!(rc, 1);
    assert_eq!(out_len, UNWRITTEN);

    // Real destination.
    let mut out_len = UNWRITTEN;
    let rc = unsafe {
        zstd_compress(ptr::null(), 42, 3, dst.as_mut_ptr(), dst.len(), &mut out_len)
    };
    assert_eq!(rc, 1);
    assert_eq!(out_len, UNWRITTEN);

    let mut out_len = UNWRITTEN;
    let rc = unsafe {
        zstd_decompress(ptr::null(), 42, dst.as_mut_ptr(), dst.len(), &mut out_len)
    };
    assert_eq!(rc, 1);
    assert_eq!(out_len, UNWRITTEN);
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 2: null out_len pointer
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_null_out_len_is_invalid() {
    let input = b"valid input";
    let rc = unsafe {
        zstd_compress(input.as_ptr(), input.len(), 3, ptr::null_mut(), 0, ptr::null_mut())
    };
    assert_eq!(rc, 1);

    let rc = unsafe {
        zstd_decompress(input.as_ptr(), input.len(), ptr::null_mut(), 0, ptr::null_mut())
    };
    assert_eq!(rc, 1);
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 3: garbage decompression input — never a crash, always status 3
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_garbage_decompress_input() {
    let cases: &[&[u8]] = &[
        b"",                       // empty sequence
        &[0x2a],                   // a single byte
        &[1, 2, 3, 4, 5],          // short non-frame
        b"definitely not a zstd frame, just plain text bytes",
        &[0x28, 0xb5, 0x2f, 0xfd], // correct magic, nothing after it
    ];

    for case in cases {
        // Query mode: no size can be determined.
        let (rc, out_len) = decompress(case, None);
        assert_eq!(rc, 3, "query on {case:?}");
        assert_eq!(out_len, UNWRITTEN, "out_len must stay untouched on status 3");

        // Execute mode with an ample buffer: still a codec rejection.
        let mut dst = vec![0u8; 4_096];
        let (rc, out_len) = decompress(case, Some(&mut dst));
        assert_eq!(rc, 3, "execute on {case:?}");
        assert_eq!(out_len, UNWRITTEN);
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 4: frame damaged past the header — size query still answers (2),
//         the transform then fails (3)
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_truncated_frame_sizes_then_fails() {
    let original = b"tail truncation victim, repeated for bulk. ".repeat(200);
    let compressed = zstd::bulk::compress(&original[..], 3).unwrap();
    // Keep three quarters: enough for the header, not for the payload.
    let truncated = &compressed[..compressed.len() * 3 / 4];

    // The header survived, so the declared content size is still readable.
    let (rc, needed) = decompress(truncated, None);
    assert_eq!(rc, 2);
    assert_eq!(needed, original.len());

    // The transform itself hits the missing tail.
    let mut dst = vec![0u8; needed];
    let (rc, _) = decompress(truncated, Some(&mut dst));
    assert_eq!(rc, 3);
}

#[test]
fn test_corrupted_magic_fails_even_in_query_mode() {
    let compressed = zstd::bulk::compress(&b"magic corruption".repeat(50)[..], 3).unwrap();
    let mut corrupted = compressed.clone();
    corrupted[0] ^= 0xff;

    let (rc, _) = decompress(&corrupted, None);
    assert_eq!(rc, 3);

    let mut dst = vec![0u8; 4_096];
    let (rc, _) = decompress(&corrupted, Some(&mut dst));
    assert_eq!(rc, 3);
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 5: invalid compression level is a codec error, not invalid args
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_invalid_level_is_operation_error() {
    let input = b"level range is the codec's business";

    // Query mode.
    let mut out_len = UNWRITTEN;
    let rc = unsafe {
        zstd_compress(input.as_ptr(), input.len(), 9_999, ptr::null_mut(), 0, &mut out_len)
    };
    assert_eq!(rc, 3);
    assert_eq!(out_len, UNWRITTEN);

    // Execute mode.
    let mut dst = vec![0u8; 1_024];
    let mut out_len = UNWRITTEN;
    let rc = unsafe {
        zstd_compress(input.as_ptr(), input.len(), 9_999, dst.as_mut_ptr(), dst.len(), &mut out_len)
    };
    assert_eq!(rc, 3);
    assert_eq!(out_len, UNWRITTEN);
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 6: a frame with no declared content size cannot answer a size query
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_streaming_frame_without_content_size() {
    // The streaming encoder never learns the total input size, so the
    // frame header carries no content-size field.
    let original = b"streamed without a pledged size".repeat(20);
    let compressed = zstd::stream::encode_all(&original[..], 3).unwrap();

    let (rc, out_len) = decompress(&compressed, None);
    assert_eq!(rc, 3);
    assert_eq!(out_len, UNWRITTEN);
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 7: every return code maps onto the contract's closed set
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_return_codes_stay_in_contract() {
    let inputs: &[&[u8]] = &[b"", &[0u8; 1], b"plain", &[0x28, 0xb5, 0x2f, 0xfd, 0, 0]];

    for input in inputs {
        for cap in [0usize, 1, 64] {
            let mut dst = vec![0u8; cap.max(1)];
            let mut out_len = 0usize;
            let rc = unsafe {
                zstd_decompress(
                    input.as_ptr(),
                    input.len(),
                    if cap == 0 { ptr::null_mut() } else { dst.as_mut_ptr() },
                    cap,
                    &mut out_len,
                )
            };
            assert!(
                Status::from_c_int(rc).is_some(),
                "return code {rc} outside the contract"
            );
            assert_ne!(rc, 4, "no input may reach the fault path");
        }
    }
}
