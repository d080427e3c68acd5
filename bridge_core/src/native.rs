//! Native-side primitives
//!
//! These are the generic bodies behind every `extern "C"` entry point. The
//! native library boxes an object to export it, unboxes it to take it back,
//! and keeps vectors of bridged types as plain `Vec<T>` behind a box.
//!
//! Everything here traffics in raw addresses; the host side only reaches these
//! functions through [`Bridged`], [`Vectorizable`](crate::Vectorizable) and
//! the typed wrappers in [`ownership`](crate::ownership).

use core::ffi::c_void;
use core::ptr::{self, NonNull};

use tracing::{debug, trace, warn};

use crate::audit::{self, HandleEvent, HandleKind};
use crate::handle::Bridged;

/// Boxes `value` and hands its address to the host
pub fn export<T: Bridged>(value: T) -> NonNull<c_void> {
    let ptr = NonNull::from(Box::leak(Box::new(value))).cast::<c_void>();
    audit::record(T::TYPE_NAME, HandleKind::Object, HandleEvent::Exported);
    trace!(type_name = T::TYPE_NAME, addr = ptr.as_ptr() as usize, "exported handle");
    ptr
}

/// Exports `Some(value)`, or the null sentinel for `None`
pub fn export_optional<T: Bridged>(value: Option<T>) -> *mut c_void {
    value.map_or(ptr::null_mut(), |value| export(value).as_ptr())
}

/// Takes back ownership of an exported object without freeing it
///
/// # Safety
///
/// `ptr` must be a live handle of `T` exported by [`export`]; it is invalid
/// afterwards.
pub unsafe fn reclaim<T: Bridged>(ptr: *mut c_void) -> T {
    audit::record(T::TYPE_NAME, HandleKind::Object, HandleEvent::Reclaimed);
    trace!(type_name = T::TYPE_NAME, addr = ptr as usize, "reclaimed handle");
    *unsafe { Box::from_raw(ptr.cast::<T>()) }
}

/// Frees an exported object
///
/// A null `ptr` is tolerated and ignored.
///
/// # Safety
///
/// A non-null `ptr` must be a live handle of `T`; it is invalid afterwards.
pub unsafe fn release<T: Bridged>(ptr: *mut c_void) {
    if ptr.is_null() {
        warn!(type_name = T::TYPE_NAME, "release called with null handle");
        return;
    }
    audit::record(T::TYPE_NAME, HandleKind::Object, HandleEvent::Released);
    trace!(type_name = T::TYPE_NAME, addr = ptr as usize, "released handle");
    drop(unsafe { Box::from_raw(ptr.cast::<T>()) });
}

/// Borrows the object behind a handle
///
/// # Safety
///
/// `ptr` must point at a live `T` that is not mutably borrowed for `'a`.
pub unsafe fn borrow<'a, T>(ptr: *const c_void) -> &'a T {
    unsafe { &*ptr.cast::<T>() }
}

/// Mutably borrows the object behind a handle
///
/// # Safety
///
/// `ptr` must point at a live `T` that is not otherwise borrowed for `'a`.
pub unsafe fn borrow_mut<'a, T>(ptr: *mut c_void) -> &'a mut T {
    unsafe { &mut *ptr.cast::<T>() }
}

/// Hands out the address of an object owned by another native object
///
/// No ownership moves; the result is only valid while `value` is.
pub fn lend<T>(value: &T) -> NonNull<c_void> {
    NonNull::from(value).cast::<c_void>()
}

/// Mutable counterpart of [`lend`]
pub fn lend_mut<T>(value: &mut T) -> NonNull<c_void> {
    NonNull::from(value).cast::<c_void>()
}

/// Null-sentinel form of [`lend`]
pub fn lend_optional<T>(value: Option<&T>) -> *const c_void {
    value.map_or(ptr::null(), |value| lend(value).as_ptr().cast_const())
}

/// Null-sentinel form of [`lend_mut`]
pub fn lend_optional_mut<T>(value: Option<&mut T>) -> *mut c_void {
    value.map_or(ptr::null_mut(), |value| lend_mut(value).as_ptr())
}

/// Boxes an existing vector and hands its address to the host
pub fn export_vec<T: Bridged>(values: Vec<T>) -> NonNull<c_void> {
    let len = values.len();
    let ptr = NonNull::from(Box::leak(Box::new(values))).cast::<c_void>();
    audit::record(T::TYPE_NAME, HandleKind::Vector, HandleEvent::Exported);
    debug!(type_name = T::TYPE_NAME, len, "exported vector");
    ptr
}

/// Takes back a vector the host transferred in
///
/// # Safety
///
/// `vec` must be a live vector handle of `T`; it is invalid afterwards.
pub unsafe fn reclaim_vec<T: Bridged>(vec: *mut c_void) -> Vec<T> {
    audit::record(T::TYPE_NAME, HandleKind::Vector, HandleEvent::Reclaimed);
    let values = *unsafe { Box::from_raw(vec.cast::<Vec<T>>()) };
    debug!(type_name = T::TYPE_NAME, len = values.len(), "reclaimed vector");
    values
}

/// Allocates an empty vector
pub fn vec_new<T: Bridged>() -> NonNull<c_void> {
    export_vec::<T>(Vec::new())
}

/// Frees a vector and every element still in it
///
/// A null `vec` is tolerated and ignored.
///
/// # Safety
///
/// A non-null `vec` must be a live vector handle of `T`.
pub unsafe fn vec_free<T: Bridged>(vec: *mut c_void) {
    if vec.is_null() {
        warn!(type_name = T::TYPE_NAME, "vec_free called with null handle");
        return;
    }
    audit::record(T::TYPE_NAME, HandleKind::Vector, HandleEvent::Released);
    let values = unsafe { Box::from_raw(vec.cast::<Vec<T>>()) };
    debug!(type_name = T::TYPE_NAME, len = values.len(), "freed vector");
    drop(values);
}

/// Appends an owned element, taking its handle back
///
/// # Safety
///
/// `vec` must be a live vector handle of `T` and `value` a live handle of `T`
/// owned by the caller.
pub unsafe fn vec_push<T: Bridged>(vec: *mut c_void, value: *mut c_void) {
    let element = unsafe { reclaim::<T>(value) };
    unsafe { borrow_mut::<Vec<T>>(vec) }.push(element);
}

/// Removes the last element and exports it, or returns null when empty
///
/// # Safety
///
/// `vec` must be a live vector handle of `T`.
pub unsafe fn vec_pop<T: Bridged>(vec: *mut c_void) -> *mut c_void {
    export_optional(unsafe { borrow_mut::<Vec<T>>(vec) }.pop())
}

/// Lends the element at `index`, or returns null when out of bounds
///
/// # Safety
///
/// `vec` must be a live vector handle of `T`.
pub unsafe fn vec_get<T: Bridged>(vec: *mut c_void, index: usize) -> *const c_void {
    lend_optional(unsafe { borrow::<Vec<T>>(vec) }.get(index))
}

/// Mutable counterpart of [`vec_get`]
///
/// # Safety
///
/// `vec` must be a live vector handle of `T`.
pub unsafe fn vec_get_mut<T: Bridged>(vec: *mut c_void, index: usize) -> *mut c_void {
    lend_optional_mut(unsafe { borrow_mut::<Vec<T>>(vec) }.get_mut(index))
}

/// Returns the element count
///
/// # Safety
///
/// `vec` must be a live vector handle of `T`.
pub unsafe fn vec_len<T: Bridged>(vec: *const c_void) -> usize {
    unsafe { borrow::<Vec<T>>(vec) }.len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit;
    use crate::BridgeString;

    #[test]
    fn test_export_then_release_balances() {
        audit::reset();
        let ptr = export(BridgeString::new("zoom"));
        assert_eq!(audit::snapshot().live_for("BridgeString"), 1);
        unsafe { release::<BridgeString>(ptr.as_ptr()) };
        assert!(audit::snapshot().is_balanced());
    }

    #[test]
    fn test_reclaim_returns_value() {
        audit::reset();
        let ptr = export(BridgeString::new("dolly"));
        let value = unsafe { reclaim::<BridgeString>(ptr.as_ptr()) };
        assert_eq!(value.as_str(), "dolly");
        let counts = audit::counts("BridgeString", HandleKind::Object);
        assert_eq!(counts.reclaimed, 1);
        assert_eq!(counts.released, 0);
        assert_eq!(counts.live(), 0);
    }

    #[test]
    fn test_release_null_is_ignored() {
        audit::reset();
        unsafe { release::<BridgeString>(ptr::null_mut()) };
        unsafe { vec_free::<BridgeString>(ptr::null_mut()) };
        assert!(audit::snapshot().entries().is_empty());
    }

    #[test]
    fn test_vector_primitives() {
        audit::reset();
        let vec = vec_new::<BridgeString>().as_ptr();
        unsafe {
            vec_push::<BridgeString>(vec, export(BridgeString::new("a")).as_ptr());
            vec_push::<BridgeString>(vec, export(BridgeString::new("b")).as_ptr());
            assert_eq!(vec_len::<BridgeString>(vec), 2);
            assert!(vec_get::<BridgeString>(vec, 2).is_null());
            assert!(vec_get_mut::<BridgeString>(vec, 5).is_null());

            let first = borrow::<BridgeString>(vec_get::<BridgeString>(vec, 0));
            assert_eq!(first.as_str(), "a");

            let popped = vec_pop::<BridgeString>(vec);
            assert_eq!(reclaim::<BridgeString>(popped).as_str(), "b");
            assert_eq!(vec_len::<BridgeString>(vec), 1);

            vec_free::<BridgeString>(vec);
        }
        assert!(audit::snapshot().is_balanced());
    }

    #[test]
    fn test_pop_empty_returns_null() {
        let vec = vec_new::<BridgeString>().as_ptr();
        unsafe {
            assert!(vec_pop::<BridgeString>(vec).is_null());
            vec_free::<BridgeString>(vec);
        }
    }

    #[test]
    fn test_reclaim_vec_takes_elements() {
        audit::reset();
        let vec = export_vec(vec![BridgeString::new("x"), BridgeString::new("y")]);
        let values = unsafe { reclaim_vec::<BridgeString>(vec.as_ptr()) };
        assert_eq!(values.len(), 2);
        assert!(audit::snapshot().is_balanced());
    }
}
