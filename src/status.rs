//! Stable status codes returned across the C boundary.
//!
//! The five numeric values are part of the binding contract
//! (include/zstd_interface.h) and must never change: foreign callers build
//! their query-then-allocate retry loops on code 2 specifically.

use std::os::raw::c_int;

// ─────────────────────────────────────────────────────────────────────────────
// Status codes
// ─────────────────────────────────────────────────────────────────────────────

/// Outcome of a boundary call.  Exactly one is produced per call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum Status {
    /// Transform completed; `*out_len` holds the number of bytes written.
    Ok = 0,
    /// Structurally impossible pointer/length combination; `*out_len` untouched.
    InvalidArgs = 1,
    /// Size-query result, or destination capacity insufficient; `*out_len`
    /// holds the exact required size.  Not an error: this is the designed
    /// mechanism for discovering the buffer size before retrying.
    TooSmall = 2,
    /// The codec rejected the input or parameters (corrupt stream, invalid
    /// level, undeterminable size); `*out_len` untouched.
    OperationError = 3,
    /// A panic was intercepted at the boundary; `*out_len` untouched.
    InternalFault = 4,
}

impl Status {
    /// The raw code handed across the boundary.
    #[inline]
    pub const fn as_c_int(self) -> c_int {
        self as c_int
    }

    /// Converts a raw code back to a variant.  Returns `None` for values
    /// outside the contract, which a conforming boundary never produces.
    pub fn from_c_int(code: c_int) -> Option<Self> {
        match code {
            0 => Some(Status::Ok),
            1 => Some(Status::InvalidArgs),
            2 => Some(Status::TooSmall),
            3 => Some(Status::OperationError),
            4 => Some(Status::InternalFault),
            _ => None,
        }
    }

    /// Stable identifier for diagnostics on the Rust side of the boundary.
    pub fn name(&self) -> &'static str {
        match self {
            Status::Ok => "OK",
            Status::InvalidArgs => "INVALID_ARGS",
            Status::TooSmall => "TOO_SMALL",
            Status::OperationError => "OPERATION_ERROR",
            Status::InternalFault => "INTERNAL_FAULT",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// The numeric values are frozen by the binding contract.
    #[test]
    fn codes_are_stable() {
        assert_eq!(Status::Ok.as_c_int(), 0);
        assert_eq!(Status::InvalidArgs.as_c_int(), 1);
        assert_eq!(Status::TooSmall.as_c_int(), 2);
        assert_eq!(Status::OperationError.as_c_int(), 3);
        assert_eq!(Status::InternalFault.as_c_int(), 4);
    }

    #[test]
    fn from_c_int_roundtrip() {
        for code in 0..5 {
            let status = Status::from_c_int(code).expect("contract code must map");
            assert_eq!(status.as_c_int(), code);
        }
        assert!(Status::from_c_int(5).is_none());
        assert!(Status::from_c_int(-1).is_none());
    }

    #[test]
    fn names() {
        assert_eq!(Status::Ok.name(), "OK");
        assert_eq!(Status::InvalidArgs.name(), "INVALID_ARGS");
        assert_eq!(Status::TooSmall.name(), "TOO_SMALL");
        assert_eq!(Status::OperationError.name(), "OPERATION_ERROR");
        assert_eq!(Status::InternalFault.name(), "INTERNAL_FAULT");
    }
}
