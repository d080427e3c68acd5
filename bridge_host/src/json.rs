//! JSON definition loading

use core::ffi::c_void;
use core::ptr;

use bridge_core::{
    BridgeError, BridgeStatus, BridgeString, Bridged, Owned, Result, StrSlice, StringRef,
};
use tracing::warn;

pub(crate) type DecodeEntry = unsafe extern "C" fn(StrSlice, *mut *mut c_void) -> BridgeStatus;

/// Runs a native decoder and takes ownership of whatever it produced
pub(crate) fn decode<T: Bridged>(json: &str, entry: DecodeEntry) -> Result<Owned<T>> {
    let mut out: *mut c_void = ptr::null_mut();
    let status = unsafe { entry(StrSlice::from_str(json), &mut out) };
    match status {
        BridgeStatus::Ok => unsafe { Owned::from_raw(out) },
        BridgeStatus::Decode => {
            let message = unsafe { Owned::<BridgeString>::from_raw(out) }?;
            warn!(type_name = T::TYPE_NAME, error = message.as_str(), "definition rejected");
            Err(BridgeError::Decode(message.as_str().to_string()))
        }
        BridgeStatus::InvalidUtf8 => Err(BridgeError::InvalidUtf8),
        BridgeStatus::NullHandle => Err(BridgeError::NullHandle {
            type_name: T::TYPE_NAME,
        }),
        BridgeStatus::KindMismatch => Err(BridgeError::Decode(format!(
            "decoder returned unexpected status {status:?}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bridge_models::PropertyDef;

    unsafe extern "C" fn mismatched(_json: StrSlice, out: *mut *mut c_void) -> BridgeStatus {
        unsafe { out.write(ptr::null_mut()) };
        BridgeStatus::KindMismatch
    }

    unsafe extern "C" fn null_result(_json: StrSlice, out: *mut *mut c_void) -> BridgeStatus {
        unsafe { out.write(ptr::null_mut()) };
        BridgeStatus::NullHandle
    }

    #[test]
    fn test_unexpected_status_is_a_decode_error() {
        let err = decode::<PropertyDef>("{}", mismatched).unwrap_err();
        assert!(matches!(err, BridgeError::Decode(_)));
    }

    #[test]
    fn test_null_status_names_the_type() {
        let err = decode::<PropertyDef>("{}", null_result).unwrap_err();
        assert_eq!(
            err,
            BridgeError::NullHandle {
                type_name: "PropertyDef",
            }
        );
    }
}
