//! Safe one-shot layer over the `zstd` crate.
//!
//! Four functions back the two boundary operations: an exact size query and
//! a buffer-to-buffer transform, once for each direction.  Compression
//! pledges the content size into the frame header, which is what makes the
//! decompression size query exact rather than heuristic.
//!
//! Codec contexts are constructed per call; nothing here touches shared
//! mutable state, so every function is reentrant.

use std::fmt;

use zstd::bulk::Decompressor;
use zstd::zstd_safe;

// ─────────────────────────────────────────────────────────────────────────────
// Error type
// ─────────────────────────────────────────────────────────────────────────────

/// Errors surfaced by the codec layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CodecError {
    /// The destination buffer cannot hold the result; `required` is the
    /// exact capacity a retry needs.
    DstTooSmall { required: usize },
    /// The frame carries no content-size field, so the decompressed size
    /// cannot be determined without performing the transform.
    SizeUnknown,
    /// The codec rejected the input or parameters.
    Codec(String),
}

impl fmt::Display for CodecError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CodecError::DstTooSmall { required } => {
                write!(f, "destination too small: {required} bytes required")
            }
            CodecError::SizeUnknown => write!(f, "frame does not declare its content size"),
            CodecError::Codec(msg) => write!(f, "codec error: {msg}"),
        }
    }
}

impl std::error::Error for CodecError {}

// ─────────────────────────────────────────────────────────────────────────────
// Compression
// ─────────────────────────────────────────────────────────────────────────────

/// Runs the one-shot compression into a bound-sized scratch buffer.
///
/// libzstd clamps out-of-range levels instead of rejecting them, so the
/// level is checked against [`zstd::compression_level_range`] up front:
/// validity is still the codec's concept, but silent clamping would make
/// the boundary lie about what it was asked to do.
fn compress_scratch(input: &[u8], level: i32) -> Result<Vec<u8>, CodecError> {
    if !zstd::compression_level_range().contains(&level) {
        return Err(CodecError::Codec(format!(
            "compression level {level} outside supported range"
        )));
    }
    zstd::bulk::compress(input, level).map_err(|e| CodecError::Codec(e.to_string()))
}

/// Exact compressed size of `input` at `level`.
///
/// Obtained by running the real compression into a scratch buffer, so the
/// reported size is minimal, not the worst-case bound: a destination of
/// exactly this capacity always succeeds and one byte less never does.
/// Deterministic for identical input and level.
pub fn compressed_size(input: &[u8], level: i32) -> Result<usize, CodecError> {
    Ok(compress_scratch(input, level)?.len())
}

/// Compresses `input` at `level` into `dst`, returning the bytes written.
///
/// The transform runs into a scratch buffer first: libzstd's one-shot
/// call wants a worst-case-bound destination even when the actual output
/// is far smaller, and a destination sized by [`compressed_size`] sits
/// below that bound.  The result is copied out when it fits; otherwise
/// [`CodecError::DstTooSmall`] carries the exact size a retry needs.
pub fn compress_into(input: &[u8], level: i32, dst: &mut [u8]) -> Result<usize, CodecError> {
    let scratch = compress_scratch(input, level)?;
    let required = scratch.len();
    if required > dst.len() {
        return Err(CodecError::DstTooSmall { required });
    }
    dst[..required].copy_from_slice(&scratch);
    Ok(required)
}

// ─────────────────────────────────────────────────────────────────────────────
// Decompression
// ─────────────────────────────────────────────────────────────────────────────

/// Exact decompressed size recorded in the frame header of `input`.
///
/// Frames produced by [`compress_into`] always carry this field.  A frame
/// without one (e.g. produced by a streaming encoder with no pledged size)
/// yields [`CodecError::SizeUnknown`]; a missing, truncated, or invalid
/// header yields [`CodecError::Codec`].
pub fn decompressed_size(input: &[u8]) -> Result<usize, CodecError> {
    match zstd_safe::get_frame_content_size(input) {
        Ok(Some(size)) => usize::try_from(size)
            .map_err(|_| CodecError::Codec("content size exceeds address space".to_string())),
        Ok(None) => Err(CodecError::SizeUnknown),
        Err(_) => Err(CodecError::Codec("invalid or truncated frame header".to_string())),
    }
}

/// Decompresses the frame in `input` directly into `dst`.
///
/// Returns the number of bytes written.  Capacity shortfall is
/// disambiguated the same way as in [`compress_into`], via the frame's
/// declared content size; a corrupt stream whose header still parses is a
/// [`CodecError::Codec`] even when the destination was large enough.
pub fn decompress_into(input: &[u8], dst: &mut [u8]) -> Result<usize, CodecError> {
    // libzstd accepts an empty source as "zero frames, zero bytes out";
    // the contract calls it a malformed stream.
    if input.is_empty() {
        return Err(CodecError::Codec("empty input holds no frame".to_string()));
    }
    let mut decompressor = Decompressor::new().map_err(|e| CodecError::Codec(e.to_string()))?;
    match decompressor.decompress_to_buffer(input, dst) {
        Ok(written) => Ok(written),
        Err(err) => match decompressed_size(input) {
            Ok(required) if required > dst.len() => Err(CodecError::DstTooSmall { required }),
            _ => Err(CodecError::Codec(err.to_string())),
        },
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    const LEVEL: i32 = 3;

    #[test]
    fn roundtrip_typical_data() {
        let original = b"The quick brown fox jumps over the lazy dog. ".repeat(50);

        let required = compressed_size(&original, LEVEL).unwrap();
        let mut compressed = vec![0u8; required];
        let written = compress_into(&original, LEVEL, &mut compressed).unwrap();
        assert_eq!(written, required);

        let decompressed_len = decompressed_size(&compressed).unwrap();
        assert_eq!(decompressed_len, original.len());

        let mut decompressed = vec![0u8; decompressed_len];
        let written = decompress_into(&compressed, &mut decompressed).unwrap();
        assert_eq!(written, original.len());
        assert_eq!(decompressed, original);
    }

    #[test]
    fn sizing_is_exact_and_idempotent() {
        let input = vec![0u8; 10_000];

        let first = compressed_size(&input, LEVEL).unwrap();
        let second = compressed_size(&input, LEVEL).unwrap();
        assert_eq!(first, second);
        // Highly redundant input compresses far below its own length.
        assert!(first < input.len() / 10);

        // Exact capacity succeeds; one byte less reports the same size.
        let mut exact = vec![0u8; first];
        assert_eq!(compress_into(&input, LEVEL, &mut exact).unwrap(), first);

        let mut short = vec![0u8; first - 1];
        assert_eq!(
            compress_into(&input, LEVEL, &mut short),
            Err(CodecError::DstTooSmall { required: first })
        );
    }

    #[test]
    fn empty_input_compresses_to_valid_frame() {
        let required = compressed_size(&[], LEVEL).unwrap();
        assert!(required > 0); // minimal frame still has a header

        let mut compressed = vec![0u8; required];
        let written = compress_into(&[], LEVEL, &mut compressed).unwrap();
        assert_eq!(written, required);

        assert_eq!(decompressed_size(&compressed).unwrap(), 0);
    }

    #[test]
    fn execute_succeeds_with_exactly_queried_capacity() {
        // The two-call pattern at several levels: a destination of exactly
        // the queried size must hold the transform, with nothing to spare.
        let input = vec![0u8; 10_000];
        for level in [1, 3, 19] {
            let required = compressed_size(&input, level).unwrap();
            let mut dst = vec![0u8; required];
            assert_eq!(
                compress_into(&input, level, &mut dst),
                Ok(required),
                "exact capacity must succeed at level {level}"
            );
        }
    }

    #[test]
    fn invalid_level_is_codec_error() {
        let input = b"some bytes";
        let mut dst = vec![0u8; 256];
        match compress_into(input, 9_999, &mut dst) {
            Err(CodecError::Codec(_)) => {}
            other => panic!("expected codec error for invalid level, got {other:?}"),
        }
        match compressed_size(input, 9_999) {
            Err(CodecError::Codec(_)) => {}
            other => panic!("expected codec error for invalid level, got {other:?}"),
        }
    }

    #[test]
    fn level_range_edges() {
        // libzstd clamps instead of rejecting, so the range check is ours:
        // both ends of the supported range work, one past either end fails.
        let range = zstd::compression_level_range();
        let input = b"level range edge input".repeat(8);

        assert!(compressed_size(&input, *range.start()).is_ok());
        assert!(compressed_size(&input, *range.end()).is_ok());

        for bad in [*range.start() - 1, *range.end() + 1] {
            match compressed_size(&input, bad) {
                Err(CodecError::Codec(_)) => {}
                other => panic!("expected codec error for level {bad}, got {other:?}"),
            }
        }
    }

    #[test]
    fn garbage_input_fails_decompression() {
        for garbage in [&b""[..], &[0x2a][..], &[1, 2, 3, 4, 5][..]] {
            let mut dst = vec![0u8; 64];
            match decompress_into(garbage, &mut dst) {
                Err(CodecError::Codec(_)) => {}
                other => panic!("expected codec error for garbage input, got {other:?}"),
            }
            match decompressed_size(garbage) {
                Err(CodecError::Codec(_)) | Err(CodecError::SizeUnknown) => {}
                other => panic!("expected failure sizing garbage input, got {other:?}"),
            }
        }
    }

    #[test]
    fn truncated_frame_sizes_but_does_not_decompress() {
        let original = b"truncation test payload, repeated a few times. ".repeat(100);
        let compressed = zstd::bulk::compress(&original[..], LEVEL).unwrap();

        // Drop the last quarter: the header (and content size) stays intact.
        let truncated = &compressed[..compressed.len() * 3 / 4];
        assert_eq!(decompressed_size(truncated).unwrap(), original.len());

        let mut dst = vec![0u8; original.len()];
        match decompress_into(truncated, &mut dst) {
            Err(CodecError::Codec(_)) => {}
            other => panic!("expected codec error for truncated frame, got {other:?}"),
        }
    }

    #[test]
    fn decompress_short_destination_reports_required() {
        let original = vec![7u8; 4_096];
        let compressed = zstd::bulk::compress(&original[..], LEVEL).unwrap();

        let mut short = vec![0u8; original.len() - 1];
        assert_eq!(
            decompress_into(&compressed, &mut short),
            Err(CodecError::DstTooSmall { required: original.len() })
        );
    }
}
