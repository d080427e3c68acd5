//! Strings across the bridge
//!
//! Strings travel in two shapes:
//!
//! - [`BridgeString`]: an owned buffer allocated by the native side. Passing
//!   one to an entry point transfers it; the receiver frees it once consumed.
//! - [`StrSlice`]: a borrowed `(ptr, len)` view, used for reads and lookups.

use core::ffi::c_void;
use core::ptr::NonNull;
use core::{fmt, slice, str};

use crate::error::{BridgeError, Result};
use crate::native;
use crate::ownership::{Borrowed, Owned};

/// Owned UTF-8 buffer living on the native side
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BridgeString(String);

crate::bridge_type!(BridgeString);

impl BridgeString {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }

    /// Allocates a native copy of `text` and takes ownership of it
    pub fn owned(text: &str) -> Owned<BridgeString> {
        unsafe { Owned::from_non_null(bridge_string_new(StrSlice::from_str(text))) }
    }
}

impl fmt::Display for BridgeString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Borrowed string view in C layout
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct StrSlice {
    pub ptr: *const u8,
    pub len: usize,
}

impl StrSlice {
    /// Views `text` without copying
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(text: &str) -> Self {
        Self {
            ptr: text.as_ptr(),
            len: text.len(),
        }
    }

    /// Returns the viewed bytes
    ///
    /// # Safety
    ///
    /// `ptr` must point at `len` readable bytes that outlive `'a`.
    pub unsafe fn as_bytes<'a>(&self) -> &'a [u8] {
        if self.len == 0 {
            return &[];
        }
        unsafe { slice::from_raw_parts(self.ptr, self.len) }
    }

    /// Returns the viewed text, checking that it is UTF-8
    ///
    /// # Safety
    ///
    /// See [`StrSlice::as_bytes`].
    pub unsafe fn to_str<'a>(&self) -> Result<&'a str> {
        str::from_utf8(unsafe { self.as_bytes() }).map_err(|_| BridgeError::InvalidUtf8)
    }

    /// Returns the viewed text without checking it
    ///
    /// # Safety
    ///
    /// See [`StrSlice::as_bytes`]; the bytes must also be UTF-8, which holds
    /// for every slice produced by [`StrSlice::from_str`].
    pub unsafe fn as_str_unchecked<'a>(&self) -> &'a str {
        unsafe { str::from_utf8_unchecked(self.as_bytes()) }
    }
}

/// Allocates a native string from a view
///
/// Bytes that are not UTF-8 are replaced rather than rejected.
///
/// # Safety
///
/// `text` must satisfy [`StrSlice::as_bytes`].
#[export_name = "__bridge__$RustString$new_with_str"]
pub unsafe extern "C" fn bridge_string_new(text: StrSlice) -> NonNull<c_void> {
    let bytes = unsafe { text.as_bytes() };
    native::export(BridgeString(String::from_utf8_lossy(bytes).into_owned()))
}

/// Views a native string
///
/// # Safety
///
/// `text` must be a live `BridgeString` handle.
#[export_name = "__bridge__$RustString$as_str"]
pub unsafe extern "C" fn bridge_string_as_str(text: *const c_void) -> StrSlice {
    StrSlice::from_str(unsafe { native::borrow::<BridgeString>(text) }.as_str())
}

/// Returns the byte length of a native string
///
/// # Safety
///
/// `text` must be a live `BridgeString` handle.
#[export_name = "__bridge__$RustString$len"]
pub unsafe extern "C" fn bridge_string_len(text: *const c_void) -> usize {
    unsafe { native::borrow::<BridgeString>(text) }.0.len()
}

/// Read access to a native string from any tier
pub trait StringRef: Borrowed<BridgeString> {
    fn as_str(&self) -> &str {
        unsafe { bridge_string_as_str(self.view().as_ptr()).as_str_unchecked() }
    }

    fn len(&self) -> usize {
        unsafe { bridge_string_len(self.view().as_ptr()) }
    }

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<B: Borrowed<BridgeString> + ?Sized> StringRef for B {}

/// Anything that can become an owned native string
///
/// Entry points that take a string argument accept this, so callers can pass
/// `&str`, `String`, or a string they already own on the native side.
pub trait IntoBridgeString {
    fn into_bridge_string(self) -> Owned<BridgeString>;
}

impl IntoBridgeString for &str {
    fn into_bridge_string(self) -> Owned<BridgeString> {
        BridgeString::owned(self)
    }
}

impl IntoBridgeString for String {
    fn into_bridge_string(self) -> Owned<BridgeString> {
        BridgeString::owned(&self)
    }
}

impl IntoBridgeString for &String {
    fn into_bridge_string(self) -> Owned<BridgeString> {
        BridgeString::owned(self)
    }
}

impl IntoBridgeString for Owned<BridgeString> {
    fn into_bridge_string(self) -> Owned<BridgeString> {
        self
    }
}
