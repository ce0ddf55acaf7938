// zstd-ffi — C-ABI boundary over the Zstandard codec.
//
// Two entry points, `zstd_compress` and `zstd_decompress`, declared in
// include/zstd_interface.h.  Each follows the same two-phase protocol:
// call with a null/zero destination to learn the exact output size
// (status 2), then call again with a buffer of that size to perform the
// transform (status 0).  Panics raised anywhere past argument validation
// are intercepted at the boundary and reported as status 4; a foreign
// caller never observes an unwind.

pub mod abi;
pub mod codec;
pub mod status;

pub use codec::{compress_into, compressed_size, decompress_into, decompressed_size, CodecError};
pub use status::Status;

// ── Version constants ─────────────────────────────────────────────────────────
pub const ZSTD_FFI_VERSION_MAJOR: u32 = 0;
pub const ZSTD_FFI_VERSION_MINOR: u32 = 3;
pub const ZSTD_FFI_VERSION_RELEASE: u32 = 0;
pub const ZSTD_FFI_VERSION_NUMBER: u32 =
    ZSTD_FFI_VERSION_MAJOR * 100 * 100 + ZSTD_FFI_VERSION_MINOR * 100 + ZSTD_FFI_VERSION_RELEASE;
pub const ZSTD_FFI_VERSION_STRING: &str = "0.3.0";

/// Returns the runtime version number.
pub fn version_number() -> u32 {
    ZSTD_FFI_VERSION_NUMBER
}

/// Returns the runtime version string.
pub fn version_string() -> &'static str {
    ZSTD_FFI_VERSION_STRING
}
