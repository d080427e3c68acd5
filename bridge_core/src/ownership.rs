//! Reference tiers and ownership tracking
//!
//! Three capability levels wrap a handle:
//!
//! | Tier | Type | Can read | Can mutate | Releases |
//! |------|------|----------|------------|----------|
//! | owned | [`Owned<T>`] | yes | yes | yes, exactly once |
//! | mutable reference | [`RefMut<'a, T>`] | yes | yes | no |
//! | reference | [`Ref<'a, T>`] | yes | no | no |
//!
//! Narrowing goes one way only: `Owned` → `RefMut` → `Ref`. Going back up
//! requires [`Owned::from_raw`], which is `unsafe` because it re-asserts
//! ownership the type system can no longer check.
//!
//! An `Owned<T>` ends in exactly one of three ways:
//!
//! - [`Owned::release`]: the native `free` runs now,
//! - [`Owned::transfer_out`]: the raw handle moves to a new owner, no `free`,
//! - drop: the native `free` runs at scope end.
//!
//! Each consumes the value, so none of them can follow another.

use core::ffi::c_void;
use core::fmt;
use core::marker::PhantomData;
use core::mem::ManuallyDrop;
use core::ptr::NonNull;

use tracing::trace;

use crate::error::{BridgeError, Result};
use crate::handle::{Bridged, Handle};

mod sealed {
    pub trait Sealed {}
}

/// Any tier that can read a `T`: `Owned<T>`, `RefMut<T>` or `Ref<T>`
///
/// Domain accessors are written once against this trait and are then
/// available on every tier.
pub trait Borrowed<T: Bridged>: sealed::Sealed {
    /// Narrows to a read-only reference
    fn view(&self) -> Ref<'_, T>;
}

/// Any tier that can mutate a `T`: `Owned<T>` or `RefMut<T>`
pub trait BorrowedMut<T: Bridged>: Borrowed<T> {
    /// Narrows to a mutable reference
    fn view_mut(&mut self) -> RefMut<'_, T>;
}

/// Exclusive ownership of one foreign object
pub struct Owned<T: Bridged> {
    handle: Handle<T>,
}

impl<T: Bridged> Owned<T> {
    /// Takes ownership of a handle
    pub fn from_handle(handle: Handle<T>) -> Self {
        trace!(type_name = T::TYPE_NAME, addr = handle.addr(), "took ownership");
        Self { handle }
    }

    /// Re-asserts ownership of a raw address
    ///
    /// # Safety
    ///
    /// A non-null `ptr` must be a live object of `T` that nothing else owns.
    pub unsafe fn from_raw(ptr: *mut c_void) -> Result<Self> {
        unsafe { Handle::from_raw(ptr) }
            .map(Self::from_handle)
            .ok_or(BridgeError::NullHandle {
                type_name: T::TYPE_NAME,
            })
    }

    /// Same as [`Owned::from_raw`] for an address known to be non-null
    ///
    /// # Safety
    ///
    /// See [`Owned::from_raw`].
    pub unsafe fn from_non_null(ptr: NonNull<c_void>) -> Self {
        Self::from_handle(unsafe { Handle::from_non_null(ptr) })
    }

    /// Narrows to a read-only reference
    pub fn borrow(&self) -> Ref<'_, T> {
        Ref::new(self.handle.as_non_null())
    }

    /// Narrows to a mutable reference
    pub fn borrow_mut(&mut self) -> RefMut<'_, T> {
        RefMut::new(self.handle.as_non_null())
    }

    /// Gives up ownership without freeing
    ///
    /// The returned handle is meant for a native entry point that takes
    /// ownership (a constructor argument, a vector push).
    pub fn transfer_out(self) -> Handle<T> {
        let this = ManuallyDrop::new(self);
        trace!(
            type_name = T::TYPE_NAME,
            addr = this.handle.addr(),
            "transferred ownership out"
        );
        unsafe { Handle::from_non_null(this.handle.as_non_null()) }
    }

    /// Shorthand for `transfer_out().into_raw()`
    pub fn into_raw(self) -> *mut c_void {
        self.transfer_out().into_raw()
    }

    /// Frees the object now
    pub fn release(self) {
        drop(self);
    }

    /// Returns the underlying handle without giving it up
    pub fn handle(&self) -> &Handle<T> {
        &self.handle
    }

    /// Returns the address without giving it up
    pub fn as_ptr(&self) -> *mut c_void {
        self.handle.as_ptr()
    }
}

impl<T: Bridged> Drop for Owned<T> {
    fn drop(&mut self) {
        trace!(
            type_name = T::TYPE_NAME,
            addr = self.handle.addr(),
            "releasing owned handle"
        );
        unsafe { T::free(self.handle.as_ptr()) };
    }
}

impl<T: Bridged> sealed::Sealed for Owned<T> {}

impl<T: Bridged> Borrowed<T> for Owned<T> {
    fn view(&self) -> Ref<'_, T> {
        self.borrow()
    }
}

impl<T: Bridged> BorrowedMut<T> for Owned<T> {
    fn view_mut(&mut self) -> RefMut<'_, T> {
        self.borrow_mut()
    }
}

impl<T: Bridged> fmt::Debug for Owned<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Owned").field(&self.handle).finish()
    }
}

impl<T: Bridged> fmt::Display for Owned<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Owned<{}>({:#x})", T::TYPE_NAME, self.handle.addr())
    }
}

/// Mutable, non-owning borrow of a foreign object
///
/// Only one can be live per object: deriving it takes `&mut` of its source.
pub struct RefMut<'a, T: Bridged> {
    ptr: NonNull<c_void>,
    _marker: PhantomData<(&'a mut T, *mut ())>,
}

impl<'a, T: Bridged> RefMut<'a, T> {
    fn new(ptr: NonNull<c_void>) -> Self {
        Self {
            ptr,
            _marker: PhantomData,
        }
    }

    /// Wraps an address lent by the native side
    ///
    /// # Safety
    ///
    /// `ptr` must point at a live `T` that stays valid, and is not otherwise
    /// borrowed, for `'a`.
    pub unsafe fn from_non_null(ptr: NonNull<c_void>) -> Self {
        Self::new(ptr)
    }

    /// Null-sentinel form of [`RefMut::from_non_null`]
    ///
    /// # Safety
    ///
    /// See [`RefMut::from_non_null`].
    pub unsafe fn from_raw(ptr: *mut c_void) -> Option<Self> {
        NonNull::new(ptr).map(Self::new)
    }

    /// Narrows to a read-only reference
    pub fn as_ref(&self) -> Ref<'_, T> {
        Ref::new(self.ptr)
    }

    /// Narrows to a read-only reference for the rest of `'a`
    pub fn into_ref(self) -> Ref<'a, T> {
        Ref::new(self.ptr)
    }

    /// Reborrows for a shorter scope
    pub fn reborrow(&mut self) -> RefMut<'_, T> {
        RefMut::new(self.ptr)
    }

    /// Returns the address for a native call
    pub fn as_mut_ptr(&mut self) -> *mut c_void {
        self.ptr.as_ptr()
    }
}

impl<T: Bridged> sealed::Sealed for RefMut<'_, T> {}

impl<T: Bridged> Borrowed<T> for RefMut<'_, T> {
    fn view(&self) -> Ref<'_, T> {
        self.as_ref()
    }
}

impl<T: Bridged> BorrowedMut<T> for RefMut<'_, T> {
    fn view_mut(&mut self) -> RefMut<'_, T> {
        self.reborrow()
    }
}

impl<'a, T: Bridged> From<RefMut<'a, T>> for Ref<'a, T> {
    fn from(value: RefMut<'a, T>) -> Self {
        value.into_ref()
    }
}

impl<'a, T: Bridged> From<&'a mut Owned<T>> for RefMut<'a, T> {
    fn from(value: &'a mut Owned<T>) -> Self {
        value.borrow_mut()
    }
}

impl<T: Bridged> fmt::Debug for RefMut<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RefMut<{}>({:#x})", T::TYPE_NAME, self.ptr.as_ptr() as usize)
    }
}

/// Read-only, non-owning borrow of a foreign object
///
/// Any number may be live at once.
pub struct Ref<'a, T: Bridged> {
    ptr: NonNull<c_void>,
    _marker: PhantomData<(&'a T, *const ())>,
}

impl<'a, T: Bridged> Ref<'a, T> {
    fn new(ptr: NonNull<c_void>) -> Self {
        Self {
            ptr,
            _marker: PhantomData,
        }
    }

    /// Wraps an address lent by the native side
    ///
    /// # Safety
    ///
    /// `ptr` must point at a live `T` that stays valid, and is not mutably
    /// borrowed, for `'a`.
    pub unsafe fn from_non_null(ptr: NonNull<c_void>) -> Self {
        Self::new(ptr)
    }

    /// Null-sentinel form of [`Ref::from_non_null`]
    ///
    /// # Safety
    ///
    /// See [`Ref::from_non_null`].
    pub unsafe fn from_raw(ptr: *const c_void) -> Option<Self> {
        NonNull::new(ptr.cast_mut()).map(Self::new)
    }

    /// Returns the address for a native call
    pub fn as_ptr(&self) -> *const c_void {
        self.ptr.as_ptr().cast_const()
    }

    /// Checks if two references point at the same object
    pub fn ptr_eq(&self, other: &Ref<'_, T>) -> bool {
        self.ptr == other.ptr
    }
}

impl<T: Bridged> Clone for Ref<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: Bridged> Copy for Ref<'_, T> {}

impl<T: Bridged> sealed::Sealed for Ref<'_, T> {}

impl<T: Bridged> Borrowed<T> for Ref<'_, T> {
    fn view(&self) -> Ref<'_, T> {
        *self
    }
}

impl<'a, T: Bridged> From<&'a Owned<T>> for Ref<'a, T> {
    fn from(value: &'a Owned<T>) -> Self {
        value.borrow()
    }
}

impl<T: Bridged> fmt::Debug for Ref<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Ref<{}>({:#x})", T::TYPE_NAME, self.ptr.as_ptr() as usize)
    }
}
