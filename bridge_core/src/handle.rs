//! Opaque handle implementation
//!
//! A handle is the address of one object allocated by the native library.
//! The host never dereferences it; it only passes it back to entry points
//! registered for the handle's element type.
//!
//! ## Design Principles
//!
//! 1. **Typed**: `Handle<T>` carries `T` as a phantom, so a `Handle<Name>`
//!    cannot be passed where a `Handle<Value>` is expected
//! 2. **Non-null**: the null address is the "absent" sentinel and never a handle
//! 3. **Non-copyable**: duplicating an address is how double frees start
//! 4. **Single-threaded**: handles are `!Send` and `!Sync`
//!
//! ## Example
//!
//! ```
//! use bridge_core::{native, BridgeString, Handle};
//!
//! let raw = native::export(BridgeString::new("focal_length")).as_ptr();
//! let handle: Handle<BridgeString> = unsafe { Handle::from_raw(raw) }.unwrap();
//! assert_eq!(handle.type_name(), "BridgeString");
//!
//! // Hand it back to the native side to free it.
//! unsafe { native::release::<BridgeString>(handle.into_raw()) };
//! ```

use core::ffi::c_void;
use core::fmt;
use core::marker::PhantomData;
use core::ptr::NonNull;

/// A type the native library can hand out as an opaque handle
///
/// Implemented through [`bridge_type!`](crate::bridge_type), never by hand.
///
/// # Safety
///
/// `free` must accept exactly the addresses the native library exported for
/// `Self` and must release each of them.
pub unsafe trait Bridged: Sized + 'static {
    /// Name used in logs, audit counters and errors
    const TYPE_NAME: &'static str;

    /// Releases one object previously exported for `Self`
    ///
    /// # Safety
    ///
    /// `ptr` must be a live handle of `Self` that nothing else will release.
    unsafe extern "C" fn free(ptr: *mut c_void);
}

/// A typed opaque handle
///
/// `Handle<T>` does not release anything when dropped; wrap it in
/// [`Owned`](crate::Owned) for that.
#[must_use = "dropping a bare handle leaks the object behind it"]
pub struct Handle<T: Bridged> {
    ptr: NonNull<c_void>,
    _marker: PhantomData<*mut T>,
}

impl<T: Bridged> Handle<T> {
    /// Asserts that `ptr` is a live object of `T`
    ///
    /// Returns `None` for the null sentinel.
    ///
    /// # Safety
    ///
    /// A non-null `ptr` must have been exported by the native library for `T`
    /// and not yet released.
    pub unsafe fn from_raw(ptr: *mut c_void) -> Option<Self> {
        NonNull::new(ptr).map(|ptr| unsafe { Self::from_non_null(ptr) })
    }

    /// Same as [`Handle::from_raw`] for an address known to be non-null
    ///
    /// # Safety
    ///
    /// See [`Handle::from_raw`].
    pub unsafe fn from_non_null(ptr: NonNull<c_void>) -> Self {
        Self {
            ptr,
            _marker: PhantomData,
        }
    }

    /// Returns the address without giving it up
    pub fn as_ptr(&self) -> *mut c_void {
        self.ptr.as_ptr()
    }

    pub(crate) fn as_non_null(&self) -> NonNull<c_void> {
        self.ptr
    }

    /// Gives up the handle and returns its address
    pub fn into_raw(self) -> *mut c_void {
        self.ptr.as_ptr()
    }

    /// Returns the address as an integer, for logs
    pub fn addr(&self) -> usize {
        self.ptr.as_ptr() as usize
    }

    /// Returns the element type name
    pub fn type_name(&self) -> &'static str {
        T::TYPE_NAME
    }
}

impl<T: Bridged> PartialEq for Handle<T> {
    fn eq(&self, other: &Self) -> bool {
        self.ptr == other.ptr
    }
}

impl<T: Bridged> Eq for Handle<T> {}

impl<T: Bridged> fmt::Debug for Handle<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Handle")
            .field("type_name", &T::TYPE_NAME)
            .field("addr", &format_args!("{:#x}", self.addr()))
            .finish()
    }
}

impl<T: Bridged> fmt::Display for Handle<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Handle<{}>({:#x})", T::TYPE_NAME, self.addr())
    }
}
