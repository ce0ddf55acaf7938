//! C-ABI entry points — the two symbols declared in include/zstd_interface.h.
//!
//! Both operations share one protocol.  A null (or zero-capacity)
//! destination selects query mode: the exact output size is written to
//! `*out_len` and the call returns 2.  A real destination selects execute
//! mode: the transform writes into the caller's buffer, bounded by the
//! stated capacity, and returns 0 with the produced length, 2 with the
//! required length, or 3 on a codec failure.  Argument validation happens
//! before any codec interaction; everything after it runs under
//! `catch_unwind`, so a panic becomes return code 4 instead of an unwind
//! crossing into the foreign caller.
//!
//! The boundary is stateless and reentrant: codec contexts live on the
//! call stack, buffers stay owned by the caller, and nothing is retained
//! across calls.

use std::os::raw::c_int;
use std::panic::{self, AssertUnwindSafe};
use std::ptr;
use std::slice;

use crate::codec::{self, CodecError};
use crate::status::Status;

// ─── helpers ─────────────────────────────────────────────────────────────────

/// Runs `f`, converting an unwound panic into `InternalFault`.
fn contain(f: impl FnOnce() -> Status) -> Status {
    panic::catch_unwind(AssertUnwindSafe(f)).unwrap_or(Status::InternalFault)
}

/// Borrows the caller's input.  A null pointer is only reachable here with
/// `len == 0` (validation rejects the other combination), and the empty
/// slice must not go through `from_raw_parts` with a null base.
unsafe fn input_slice<'a>(ptr: *const u8, len: usize) -> &'a [u8] {
    if len == 0 {
        &[]
    } else {
        slice::from_raw_parts(ptr, len)
    }
}

/// The sizing/execution protocol shared by both operations.
///
/// `size_query` produces the exact output size without touching any
/// destination; `transform` writes into the destination slice and reports
/// capacity shortfall as [`CodecError::DstTooSmall`].  `*out_len` is
/// written on exactly the paths the contract specifies: success (bytes
/// produced) and too-small (bytes required).
unsafe fn run_two_phase(
    out_ptr: *mut u8,
    out_capacity: usize,
    out_len: *mut usize,
    size_query: impl FnOnce() -> Result<usize, CodecError>,
    transform: impl FnOnce(&mut [u8]) -> Result<usize, CodecError>,
) -> Status {
    if out_ptr.is_null() || out_capacity == 0 {
        // Query mode: report the size a retry needs, or 3 when the codec
        // cannot determine one.
        return match size_query() {
            Ok(required) => {
                ptr::write(out_len, required);
                Status::TooSmall
            }
            Err(_) => Status::OperationError,
        };
    }

    let dst = slice::from_raw_parts_mut(out_ptr, out_capacity);
    match transform(dst) {
        Ok(written) => {
            ptr::write(out_len, written);
            Status::Ok
        }
        Err(CodecError::DstTooSmall { required }) => {
            ptr::write(out_len, required);
            Status::TooSmall
        }
        Err(_) => Status::OperationError,
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// zstd_compress
//
// int zstd_compress(const unsigned char *input_ptr, size_t input_len,
//                   int level,
//                   unsigned char *out_ptr, size_t out_capacity,
//                   size_t *out_len);
// ─────────────────────────────────────────────────────────────────────────────

/// Compresses `input_ptr[0..input_len)` at `level` into
/// `out_ptr[0..out_capacity)`, or reports the exact compressed size when
/// the destination is null/zero-capacity.  Level validity is the codec's
/// call: out-of-range values return 3, not 1.
///
/// # Safety
/// `input_ptr` must be valid for `input_len` bytes (null only with
/// `input_len == 0`), `out_ptr` valid for `out_capacity` bytes when
/// non-null, and `out_len` valid for writes when non-null.  Invalid
/// combinations of null and nonzero length are rejected with return
/// code 1 before any buffer access.
#[no_mangle]
pub unsafe extern "C" fn zstd_compress(
    input_ptr: *const u8,
    input_len: usize,
    level: c_int,
    out_ptr: *mut u8,
    out_capacity: usize,
    out_len: *mut usize,
) -> c_int {
    if out_len.is_null() || (input_ptr.is_null() && input_len != 0) {
        return Status::InvalidArgs.as_c_int();
    }
    contain(|| unsafe {
        let input = input_slice(input_ptr, input_len);
        run_two_phase(
            out_ptr,
            out_capacity,
            out_len,
            || codec::compressed_size(input, level as i32),
            |dst| codec::compress_into(input, level as i32, dst),
        )
    })
    .as_c_int()
}

// ─────────────────────────────────────────────────────────────────────────────
// zstd_decompress
//
// int zstd_decompress(const unsigned char *input_ptr, size_t input_len,
//                     unsigned char *out_ptr, size_t out_capacity,
//                     size_t *out_len);
// ─────────────────────────────────────────────────────────────────────────────

/// Decompresses the frame in `input_ptr[0..input_len)` into
/// `out_ptr[0..out_capacity)`, or reports the frame's declared content
/// size when the destination is null/zero-capacity.  A frame whose header
/// cannot produce a size (malformed, or no content-size field) returns 3
/// even in query mode.
///
/// # Safety
/// Same requirements as [`zstd_compress`].
#[no_mangle]
pub unsafe extern "C" fn zstd_decompress(
    input_ptr: *const u8,
    input_len: usize,
    out_ptr: *mut u8,
    out_capacity: usize,
    out_len: *mut usize,
) -> c_int {
    if out_len.is_null() || (input_ptr.is_null() && input_len != 0) {
        return Status::InvalidArgs.as_c_int();
    }
    contain(|| unsafe {
        let input = input_slice(input_ptr, input_len);
        run_two_phase(
            out_ptr,
            out_capacity,
            out_len,
            || codec::decompressed_size(input),
            |dst| codec::decompress_into(input, dst),
        )
    })
    .as_c_int()
}
