//! Type descriptor registry
//!
//! A type becomes usable inside a [`ForeignVector`](crate::ForeignVector) by
//! supplying the seven vector entry points of [`Vectorizable`]. The registry
//! is the set of trait impls: resolution is static, per instantiation, and a
//! type is registered at most once because a trait can only be implemented
//! once per type.
//!
//! [`bridge_type!`](crate::bridge_type) performs the registration. The entry
//! points it emits are thin `extern "C"` shims over the generic algorithm in
//! [`native`](crate::native), so no vector logic is duplicated per type.

use core::ffi::c_void;
use core::ptr::NonNull;

use crate::handle::Bridged;

/// Vector entry points for one element type
///
/// `pop`, `get` and `get_mut` return null for "absent" (empty vector or index
/// out of bounds).
///
/// # Safety
///
/// Implementations must behave like the generic functions in
/// [`native`](crate::native) for `Vec<Self>`.
pub unsafe trait Vectorizable: Bridged {
    extern "C" fn vec_new() -> NonNull<c_void>;

    /// # Safety
    ///
    /// `vec` must be a live vector handle of `Self`.
    unsafe extern "C" fn vec_free(vec: *mut c_void);

    /// # Safety
    ///
    /// `vec` must be a live vector handle of `Self` and `value` an owned
    /// handle of `Self`, which the vector takes.
    unsafe extern "C" fn vec_push(vec: *mut c_void, value: *mut c_void);

    /// # Safety
    ///
    /// `vec` must be a live vector handle of `Self`.
    unsafe extern "C" fn vec_pop(vec: *mut c_void) -> *mut c_void;

    /// # Safety
    ///
    /// `vec` must be a live vector handle of `Self`.
    unsafe extern "C" fn vec_get(vec: *mut c_void, index: usize) -> *const c_void;

    /// # Safety
    ///
    /// `vec` must be a live vector handle of `Self`.
    unsafe extern "C" fn vec_get_mut(vec: *mut c_void, index: usize) -> *mut c_void;

    /// # Safety
    ///
    /// `vec` must be a live vector handle of `Self`.
    unsafe extern "C" fn vec_len(vec: *const c_void) -> usize;
}

/// Entry-point table for one element type, in C layout
///
/// Handed to a host runtime that cannot name Rust trait methods.
#[repr(C)]
#[derive(Clone, Copy)]
pub struct VectorVTable {
    pub free: unsafe extern "C" fn(*mut c_void),
    pub vec_new: extern "C" fn() -> NonNull<c_void>,
    pub vec_free: unsafe extern "C" fn(*mut c_void),
    pub vec_push: unsafe extern "C" fn(*mut c_void, *mut c_void),
    pub vec_pop: unsafe extern "C" fn(*mut c_void) -> *mut c_void,
    pub vec_get: unsafe extern "C" fn(*mut c_void, usize) -> *const c_void,
    pub vec_get_mut: unsafe extern "C" fn(*mut c_void, usize) -> *mut c_void,
    pub vec_len: unsafe extern "C" fn(*const c_void) -> usize,
}

impl VectorVTable {
    /// Builds the table for `T`
    pub fn of<T: Vectorizable>() -> Self {
        Self {
            free: T::free,
            vec_new: T::vec_new,
            vec_free: T::vec_free,
            vec_push: T::vec_push,
            vec_pop: T::vec_pop,
            vec_get: T::vec_get,
            vec_get_mut: T::vec_get_mut,
            vec_len: T::vec_len,
        }
    }
}

/// Registers a native type with the bridge
///
/// Implements [`Bridged`](crate::Bridged) and
/// [`Vectorizable`](crate::Vectorizable) for the type, backed by the generic
/// primitives in [`native`](crate::native).
///
/// ```
/// use bridge_core::{bridge_type, ForeignVector, Owned, native};
///
/// pub struct Sample(f64);
/// bridge_type!(Sample);
///
/// let mut samples = ForeignVector::<Sample>::new();
/// samples.push(unsafe { Owned::from_non_null(native::export(Sample(0.5))) });
/// assert_eq!(samples.len(), 1);
/// ```
#[macro_export]
macro_rules! bridge_type {
    ($ty:ident) => {
        $crate::bridge_type!($ty, ::core::stringify!($ty));
    };
    ($ty:ident, $name:expr) => {
        unsafe impl $crate::Bridged for $ty {
            const TYPE_NAME: &'static str = $name;

            unsafe extern "C" fn free(ptr: *mut ::core::ffi::c_void) {
                unsafe { $crate::native::release::<$ty>(ptr) }
            }
        }

        unsafe impl $crate::Vectorizable for $ty {
            extern "C" fn vec_new() -> ::core::ptr::NonNull<::core::ffi::c_void> {
                $crate::native::vec_new::<$ty>()
            }

            unsafe extern "C" fn vec_free(vec: *mut ::core::ffi::c_void) {
                unsafe { $crate::native::vec_free::<$ty>(vec) }
            }

            unsafe extern "C" fn vec_push(
                vec: *mut ::core::ffi::c_void,
                value: *mut ::core::ffi::c_void,
            ) {
                unsafe { $crate::native::vec_push::<$ty>(vec, value) }
            }

            unsafe extern "C" fn vec_pop(
                vec: *mut ::core::ffi::c_void,
            ) -> *mut ::core::ffi::c_void {
                unsafe { $crate::native::vec_pop::<$ty>(vec) }
            }

            unsafe extern "C" fn vec_get(
                vec: *mut ::core::ffi::c_void,
                index: usize,
            ) -> *const ::core::ffi::c_void {
                unsafe { $crate::native::vec_get::<$ty>(vec, index) }
            }

            unsafe extern "C" fn vec_get_mut(
                vec: *mut ::core::ffi::c_void,
                index: usize,
            ) -> *mut ::core::ffi::c_void {
                unsafe { $crate::native::vec_get_mut::<$ty>(vec, index) }
            }

            unsafe extern "C" fn vec_len(vec: *const ::core::ffi::c_void) -> usize {
                unsafe { $crate::native::vec_len::<$ty>(vec) }
            }
        }
    };
}
