//! Bridge error types

use thiserror::Error;

/// Errors that can occur when crossing the bridge
///
/// Bounds violations and lookup misses are not errors; they surface as `None`.
/// Double release and use-after-release cannot be expressed with these types
/// at all, so they have no variant either.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BridgeError {
    /// A raw pointer handed back as an owned handle was null
    #[error("Null handle for {type_name}")]
    NullHandle { type_name: &'static str },

    /// A value update tried to change the value's kind
    #[error("Value kind mismatch: expected {expected}, found {found}")]
    KindMismatch {
        expected: &'static str,
        found: &'static str,
    },

    /// A string buffer did not contain UTF-8
    #[error("String buffer is not valid UTF-8")]
    InvalidUtf8,

    /// A definition could not be decoded
    #[error("Failed to decode definition: {0}")]
    Decode(String),
}

pub type Result<T> = core::result::Result<T, BridgeError>;

/// Status code returned by fallible native entry points
///
/// Detail that does not fit in a code (a decode message, the kinds involved in
/// a mismatch) is recovered by the host side from out-parameters or by
/// querying the handles involved.
#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BridgeStatus {
    Ok = 0,
    NullHandle = 1,
    KindMismatch = 2,
    InvalidUtf8 = 3,
    Decode = 4,
}

impl BridgeStatus {
    pub fn is_ok(self) -> bool {
        self == BridgeStatus::Ok
    }
}

impl From<&BridgeError> for BridgeStatus {
    fn from(err: &BridgeError) -> Self {
        match err {
            BridgeError::NullHandle { .. } => BridgeStatus::NullHandle,
            BridgeError::KindMismatch { .. } => BridgeStatus::KindMismatch,
            BridgeError::InvalidUtf8 => BridgeStatus::InvalidUtf8,
            BridgeError::Decode(_) => BridgeStatus::Decode,
        }
    }
}
