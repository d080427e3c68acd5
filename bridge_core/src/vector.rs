//! Generic foreign vector
//!
//! An ordered, growable sequence of opaque objects of one element type,
//! stored on the native side. Ownership moves in on [`ForeignVector::push`]
//! and back out on [`ForeignVector::pop`]; indexed access only lends.
//!
//! Mutation is push/pop only. Inserting or removing in the middle would mean
//! shifting elements whose size the host does not know.

use core::ffi::c_void;
use core::fmt;
use core::iter::FusedIterator;
use core::marker::PhantomData;
use core::mem::ManuallyDrop;
use core::ptr::NonNull;

use tracing::debug;

use crate::error::{BridgeError, Result};
use crate::handle::Handle;
use crate::ownership::{Owned, Ref, RefMut};
use crate::vectorizable::Vectorizable;

/// Owned native vector of `T`
///
/// Dropping the vector frees every element still in it.
pub struct ForeignVector<T: Vectorizable> {
    ptr: NonNull<c_void>,
    _marker: PhantomData<(T, *mut ())>,
}

impl<T: Vectorizable> ForeignVector<T> {
    /// Allocates an empty vector
    pub fn new() -> Self {
        let ptr = T::vec_new();
        debug!(type_name = T::TYPE_NAME, "created foreign vector");
        Self {
            ptr,
            _marker: PhantomData,
        }
    }

    /// Re-asserts ownership of a raw vector address
    ///
    /// # Safety
    ///
    /// A non-null `ptr` must be a live vector of `T` that nothing else owns.
    pub unsafe fn from_raw(ptr: *mut c_void) -> Result<Self> {
        NonNull::new(ptr)
            .map(|ptr| unsafe { Self::from_non_null(ptr) })
            .ok_or(BridgeError::NullHandle {
                type_name: T::TYPE_NAME,
            })
    }

    /// Same as [`ForeignVector::from_raw`] for an address known to be non-null
    ///
    /// # Safety
    ///
    /// See [`ForeignVector::from_raw`].
    pub unsafe fn from_non_null(ptr: NonNull<c_void>) -> Self {
        Self {
            ptr,
            _marker: PhantomData,
        }
    }

    /// Appends `value`; the vector now owns it
    pub fn push(&mut self, value: Owned<T>) {
        let handle = value.transfer_out();
        unsafe { T::vec_push(self.ptr.as_ptr(), handle.into_raw()) };
    }

    /// Removes the last element and hands its ownership to the caller
    pub fn pop(&mut self) -> Option<Owned<T>> {
        let raw = unsafe { T::vec_pop(self.ptr.as_ptr()) };
        unsafe { Handle::from_raw(raw) }.map(Owned::from_handle)
    }

    /// Lends the element at `index`
    pub fn get(&self, index: usize) -> Option<Ref<'_, T>> {
        self.as_vec_ref().get(index)
    }

    /// Mutably lends the element at `index`
    pub fn get_mut(&mut self, index: usize) -> Option<RefMut<'_, T>> {
        unsafe { RefMut::from_raw(T::vec_get_mut(self.ptr.as_ptr(), index)) }
    }

    pub fn len(&self) -> usize {
        self.as_vec_ref().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Lends every element in index order
    pub fn iter(&self) -> Iter<'_, T> {
        self.as_vec_ref().iter()
    }

    /// Narrows to a read-only view
    pub fn as_vec_ref(&self) -> VecRef<'_, T> {
        VecRef {
            ptr: self.ptr,
            _marker: PhantomData,
        }
    }

    /// Gives up the vector without freeing it
    ///
    /// Meant for native entry points that take a whole vector.
    pub fn into_raw(self) -> *mut c_void {
        let this = ManuallyDrop::new(self);
        debug!(
            type_name = T::TYPE_NAME,
            len = this.len(),
            "transferred foreign vector out"
        );
        this.ptr.as_ptr()
    }

    /// Frees the vector and its elements now
    pub fn free(self) {
        drop(self);
    }
}

impl<T: Vectorizable> Default for ForeignVector<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Vectorizable> Drop for ForeignVector<T> {
    fn drop(&mut self) {
        debug!(type_name = T::TYPE_NAME, "freeing foreign vector");
        unsafe { T::vec_free(self.ptr.as_ptr()) };
    }
}

impl<T: Vectorizable> Extend<Owned<T>> for ForeignVector<T> {
    fn extend<I: IntoIterator<Item = Owned<T>>>(&mut self, iter: I) {
        for value in iter {
            self.push(value);
        }
    }
}

impl<T: Vectorizable> FromIterator<Owned<T>> for ForeignVector<T> {
    fn from_iter<I: IntoIterator<Item = Owned<T>>>(iter: I) -> Self {
        let mut vector = Self::new();
        vector.extend(iter);
        vector
    }
}

impl<'a, T: Vectorizable> IntoIterator for &'a ForeignVector<T> {
    type Item = Ref<'a, T>;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T: Vectorizable> fmt::Debug for ForeignVector<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ForeignVector")
            .field("type_name", &T::TYPE_NAME)
            .field("len", &self.len())
            .finish()
    }
}

/// Read-only view of a native vector
///
/// Either borrowed from a [`ForeignVector`] or lent by a native object that
/// owns the vector.
pub struct VecRef<'a, T: Vectorizable> {
    ptr: NonNull<c_void>,
    _marker: PhantomData<(&'a T, *const ())>,
}

impl<'a, T: Vectorizable> VecRef<'a, T> {
    /// Wraps a vector address lent by the native side
    ///
    /// # Safety
    ///
    /// `ptr` must be a live vector of `T` that is not mutated or freed for `'a`.
    pub unsafe fn from_non_null(ptr: NonNull<c_void>) -> Self {
        Self {
            ptr,
            _marker: PhantomData,
        }
    }

    pub fn get(&self, index: usize) -> Option<Ref<'a, T>> {
        unsafe { Ref::from_raw(T::vec_get(self.ptr.as_ptr(), index)) }
    }

    pub fn len(&self) -> usize {
        unsafe { T::vec_len(self.ptr.as_ptr().cast_const()) }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn iter(&self) -> Iter<'a, T> {
        Iter {
            vec: *self,
            front: 0,
            back: self.len(),
        }
    }
}

impl<T: Vectorizable> Clone for VecRef<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: Vectorizable> Copy for VecRef<'_, T> {}

impl<'a, T: Vectorizable> IntoIterator for VecRef<'a, T> {
    type Item = Ref<'a, T>;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T: Vectorizable> fmt::Debug for VecRef<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VecRef")
            .field("type_name", &T::TYPE_NAME)
            .field("len", &self.len())
            .finish()
    }
}

/// Iterator over the elements of a native vector
pub struct Iter<'a, T: Vectorizable> {
    vec: VecRef<'a, T>,
    front: usize,
    back: usize,
}

impl<'a, T: Vectorizable> Iterator for Iter<'a, T> {
    type Item = Ref<'a, T>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.front >= self.back {
            return None;
        }
        let item = self.vec.get(self.front);
        self.front += 1;
        item
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.back - self.front;
        (remaining, Some(remaining))
    }
}

impl<T: Vectorizable> DoubleEndedIterator for Iter<'_, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.front >= self.back {
            return None;
        }
        self.back -= 1;
        self.vec.get(self.back)
    }
}

impl<T: Vectorizable> ExactSizeIterator for Iter<'_, T> {}

impl<T: Vectorizable> FusedIterator for Iter<'_, T> {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::{self, HandleKind};
    use crate::{native, BridgeString, StringRef};
    use std::cell::Cell;

    thread_local! {
        static DROPPED: Cell<usize> = const { Cell::new(0) };
    }

    struct Tracked(&'static str);
    crate::bridge_type!(Tracked);

    impl Drop for Tracked {
        fn drop(&mut self) {
            DROPPED.with(|dropped| dropped.set(dropped.get() + 1));
        }
    }

    fn dropped() -> usize {
        DROPPED.with(Cell::get)
    }

    fn tracked(label: &'static str) -> Owned<Tracked> {
        unsafe { Owned::from_non_null(native::export(Tracked(label))) }
    }

    fn label(value: Ref<'_, Tracked>) -> &'static str {
        unsafe { native::borrow::<Tracked>(value.as_ptr()) }.0
    }

    #[test]
    fn test_push_pop_is_lifo() {
        let mut vector = ForeignVector::<BridgeString>::new();
        for text in ["a", "b", "c", "d"] {
            vector.push(BridgeString::owned(text));
        }
        let popped: Vec<String> = core::iter::from_fn(|| vector.pop())
            .map(|value| value.as_str().to_string())
            .collect();
        assert_eq!(popped, ["d", "c", "b", "a"]);
        assert_eq!(vector.len(), 0);
    }

    #[test]
    fn test_scenario_push_three_pop_all() {
        let mut vector = ForeignVector::<BridgeString>::new();
        assert!(vector.is_empty());
        vector.push(BridgeString::owned("A"));
        vector.push(BridgeString::owned("B"));
        vector.push(BridgeString::owned("C"));
        assert_eq!(vector.len(), 3);

        assert_eq!(vector.pop().unwrap().as_str(), "C");
        assert_eq!(vector.len(), 2);
        assert_eq!(vector.get(0).unwrap().as_str(), "A");
        assert_eq!(vector.get(1).unwrap().as_str(), "B");

        assert!(vector.pop().is_some());
        assert!(vector.pop().is_some());
        assert_eq!(vector.len(), 0);
        assert!(vector.pop().is_none());
    }

    #[test]
    fn test_pop_on_empty_leaves_length() {
        let mut vector = ForeignVector::<BridgeString>::new();
        assert!(vector.pop().is_none());
        assert_eq!(vector.len(), 0);
    }

    #[test]
    fn test_get_in_and_out_of_bounds() {
        let labels = ["x", "y", "z"];
        let mut vector: ForeignVector<BridgeString> =
            labels.into_iter().map(BridgeString::owned).collect();
        for (index, expected) in labels.into_iter().enumerate() {
            assert_eq!(vector.get(index).unwrap().as_str(), expected);
            assert_eq!(vector.get_mut(index).unwrap().as_str(), expected);
        }
        for index in [3, 4, usize::MAX] {
            assert!(vector.get(index).is_none());
            assert!(vector.get_mut(index).is_none());
        }
    }

    #[test]
    fn test_push_transfers_ownership() {
        audit::reset();
        let before = dropped();
        let mut vector = ForeignVector::<Tracked>::new();
        let value = tracked("lens");
        vector.push(value);
        // `value` is moved into the vector and cannot be used here.
        assert_eq!(vector.len(), 1);

        let counts = audit::counts("Tracked", HandleKind::Object);
        assert_eq!(counts.exported, 1);
        assert_eq!(counts.reclaimed, 1);
        assert_eq!(counts.released, 0);
        assert_eq!(dropped(), before);
    }

    #[test]
    fn test_drop_frees_resident_elements() {
        audit::reset();
        let before = dropped();
        {
            let mut vector = ForeignVector::<Tracked>::new();
            vector.push(tracked("a"));
            vector.push(tracked("b"));
            vector.push(tracked("c"));
            let popped = vector.pop();
            assert!(popped.is_some());
        }
        assert_eq!(dropped() - before, 3);
        assert!(audit::snapshot().is_balanced());
        assert_eq!(audit::counts("Tracked", HandleKind::Vector).released, 1);
    }

    #[test]
    fn test_get_mut_lends_slot() {
        let mut vector = ForeignVector::<Tracked>::new();
        vector.push(tracked("before"));
        {
            let mut slot = vector.get_mut(0).unwrap();
            unsafe { native::borrow_mut::<Tracked>(slot.as_mut_ptr()) }.0 = "after";
        }
        assert_eq!(label(vector.get(0).unwrap()), "after");
    }

    #[test]
    fn test_iter_in_index_order() {
        let vector: ForeignVector<Tracked> =
            ["one", "two", "three"].into_iter().map(tracked).collect();
        let labels: Vec<_> = vector.iter().map(label).collect();
        assert_eq!(labels, ["one", "two", "three"]);
        let reversed: Vec<_> = vector.iter().rev().map(label).collect();
        assert_eq!(reversed, ["three", "two", "one"]);
        assert_eq!(vector.iter().len(), 3);
    }

    #[test]
    fn test_into_raw_round_trip() {
        audit::reset();
        let mut vector = ForeignVector::<Tracked>::new();
        vector.push(tracked("kept"));
        let raw = vector.into_raw();
        assert_eq!(audit::counts("Tracked", HandleKind::Vector).live(), 1);

        let vector = unsafe { ForeignVector::<Tracked>::from_raw(raw) }.unwrap();
        assert_eq!(vector.len(), 1);
        vector.free();
        assert!(audit::snapshot().is_balanced());
    }

    #[test]
    fn test_from_raw_rejects_null() {
        let result = unsafe { ForeignVector::<Tracked>::from_raw(core::ptr::null_mut()) };
        assert_eq!(
            result.unwrap_err(),
            BridgeError::NullHandle {
                type_name: "Tracked"
            }
        );
    }
}
