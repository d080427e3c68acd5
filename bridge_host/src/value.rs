//! Property values
//!
//! A [`Value`] is a tagged union. Payload accessors return `None` when the
//! value holds a different kind, and [`ValueRefMut::update`] refuses to change
//! the kind of a value.

use bridge_core::{BridgeError, BridgeStatus, Borrowed, BorrowedMut, Owned, Ref, RefMut, Result};
use bridge_models::{ffi, Matrix44, Value, ValueKind, Vec3, Vec4};
use tracing::debug;

pub fn float(value: f64) -> Owned<Value> {
    unsafe { Owned::from_non_null(ffi::value_new_float(value)) }
}

pub fn vec3(x: f64, y: f64, z: f64) -> Owned<Value> {
    unsafe { Owned::from_non_null(ffi::value_new_vec3(x, y, z)) }
}

pub fn vec4(x: f64, y: f64, z: f64, w: f64) -> Owned<Value> {
    unsafe { Owned::from_non_null(ffi::value_new_vec4(x, y, z, w)) }
}

/// Creates a matrix value from row-major cells
pub fn matrix44(rows: [[f64; 4]; 4]) -> Owned<Value> {
    unsafe { Owned::from_non_null(ffi::value_new_matrix44(rows.as_ptr().cast::<f64>())) }
}

/// Read access to a [`Value`] from any tier
pub trait ValueRef: Borrowed<Value> {
    fn kind(&self) -> ValueKind {
        unsafe { ffi::value_kind(self.view().as_ptr()) }
    }

    fn as_f64(&self) -> Option<f64> {
        let mut out = 0.0;
        unsafe { ffi::value_as_f64(self.view().as_ptr(), &mut out) }.then_some(out)
    }

    fn as_vec3(&self) -> Option<Ref<'_, Vec3>> {
        unsafe { Ref::from_raw(ffi::value_as_vec3(self.view().as_ptr())) }
    }

    fn as_vec4(&self) -> Option<Ref<'_, Vec4>> {
        unsafe { Ref::from_raw(ffi::value_as_vec4(self.view().as_ptr())) }
    }

    fn as_matrix44(&self) -> Option<Ref<'_, Matrix44>> {
        unsafe { Ref::from_raw(ffi::value_as_matrix44(self.view().as_ptr())) }
    }

    /// Copies the value into a new, independently owned one
    fn to_owned_value(&self) -> Owned<Value> {
        unsafe { Owned::from_non_null(ffi::value_clone(self.view().as_ptr())) }
    }
}

impl<B: Borrowed<Value> + ?Sized> ValueRef for B {}

/// Write access to a [`Value`] from the tiers that allow it
pub trait ValueRefMut: BorrowedMut<Value> {
    fn as_vec3_mut(&mut self) -> Option<RefMut<'_, Vec3>> {
        unsafe { RefMut::from_raw(ffi::value_as_vec3_mut(self.view_mut().as_mut_ptr())) }
    }

    fn as_vec4_mut(&mut self) -> Option<RefMut<'_, Vec4>> {
        unsafe { RefMut::from_raw(ffi::value_as_vec4_mut(self.view_mut().as_mut_ptr())) }
    }

    fn as_matrix44_mut(&mut self) -> Option<RefMut<'_, Matrix44>> {
        unsafe { RefMut::from_raw(ffi::value_as_matrix44_mut(self.view_mut().as_mut_ptr())) }
    }

    /// Copies `other` into this value
    ///
    /// Fails with [`BridgeError::KindMismatch`] if the kinds differ; the value
    /// is left untouched.
    fn update<B: Borrowed<Value> + ?Sized>(&mut self, other: &B) -> Result<()> {
        let other = other.view();
        let status = unsafe { ffi::value_update(self.view_mut().as_mut_ptr(), other.as_ptr()) };
        match status {
            BridgeStatus::Ok => Ok(()),
            _ => {
                let expected = self.view().kind();
                let found = other.kind();
                debug!(%expected, %found, "value update rejected");
                Err(BridgeError::KindMismatch {
                    expected: expected.as_str(),
                    found: found.as_str(),
                })
            }
        }
    }
}

impl<B: BorrowedMut<Value> + ?Sized> ValueRefMut for B {}

/// Read access to a [`Vec3`]
pub trait Vec3Ref: Borrowed<Vec3> {
    fn x(&self) -> f64 {
        unsafe { ffi::vec3_x(self.view().as_ptr()) }
    }

    fn y(&self) -> f64 {
        unsafe { ffi::vec3_y(self.view().as_ptr()) }
    }

    fn z(&self) -> f64 {
        unsafe { ffi::vec3_z(self.view().as_ptr()) }
    }

    fn to_tuple(&self) -> (f64, f64, f64) {
        (self.x(), self.y(), self.z())
    }
}

impl<B: Borrowed<Vec3> + ?Sized> Vec3Ref for B {}

pub trait Vec3RefMut: BorrowedMut<Vec3> {
    fn set(&mut self, x: f64, y: f64, z: f64) {
        unsafe { ffi::vec3_set(self.view_mut().as_mut_ptr(), x, y, z) }
    }

    fn set_x(&mut self, x: f64) {
        let (_, y, z) = self.to_tuple();
        self.set(x, y, z);
    }

    fn set_y(&mut self, y: f64) {
        let (x, _, z) = self.to_tuple();
        self.set(x, y, z);
    }

    fn set_z(&mut self, z: f64) {
        let (x, y, _) = self.to_tuple();
        self.set(x, y, z);
    }
}

impl<B: BorrowedMut<Vec3> + ?Sized> Vec3RefMut for B {}

/// Read access to a [`Vec4`]
pub trait Vec4Ref: Borrowed<Vec4> {
    fn x(&self) -> f64 {
        unsafe { ffi::vec4_x(self.view().as_ptr()) }
    }

    fn y(&self) -> f64 {
        unsafe { ffi::vec4_y(self.view().as_ptr()) }
    }

    fn z(&self) -> f64 {
        unsafe { ffi::vec4_z(self.view().as_ptr()) }
    }

    fn w(&self) -> f64 {
        unsafe { ffi::vec4_w(self.view().as_ptr()) }
    }

    fn to_tuple(&self) -> (f64, f64, f64, f64) {
        (self.x(), self.y(), self.z(), self.w())
    }
}

impl<B: Borrowed<Vec4> + ?Sized> Vec4Ref for B {}

pub trait Vec4RefMut: BorrowedMut<Vec4> {
    fn set(&mut self, x: f64, y: f64, z: f64, w: f64) {
        unsafe { ffi::vec4_set(self.view_mut().as_mut_ptr(), x, y, z, w) }
    }

    fn set_w(&mut self, w: f64) {
        let (x, y, z, _) = self.to_tuple();
        self.set(x, y, z, w);
    }
}

impl<B: BorrowedMut<Vec4> + ?Sized> Vec4RefMut for B {}

/// Read access to a [`Matrix44`]
pub trait Matrix44Ref: Borrowed<Matrix44> {
    /// Cell at `row`, `col`; `None` outside the 4x4 range
    fn get(&self, row: usize, col: usize) -> Option<f64> {
        let mut out = 0.0;
        unsafe { ffi::matrix44_get(self.view().as_ptr(), row, col, &mut out) }.then_some(out)
    }

    fn rows(&self) -> [[f64; 4]; 4] {
        let mut rows = [[0.0; 4]; 4];
        for (r, row) in rows.iter_mut().enumerate() {
            for (c, cell) in row.iter_mut().enumerate() {
                *cell = self.get(r, c).unwrap_or_default();
            }
        }
        rows
    }
}

impl<B: Borrowed<Matrix44> + ?Sized> Matrix44Ref for B {}

pub trait Matrix44RefMut: BorrowedMut<Matrix44> {
    /// Overwrites one cell; false outside the 4x4 range
    fn set(&mut self, row: usize, col: usize, value: f64) -> bool {
        unsafe { ffi::matrix44_set(self.view_mut().as_mut_ptr(), row, col, value) }
    }
}

impl<B: BorrowedMut<Matrix44> + ?Sized> Matrix44RefMut for B {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_float_value() {
        let value = float(10.0);
        assert_eq!(value.kind(), ValueKind::Float);
        assert_eq!(value.as_f64(), Some(10.0));
        assert!(value.as_vec3().is_none());
        assert!(value.as_matrix44().is_none());
    }

    #[test]
    fn test_vec3_mutation_through_payload() {
        let mut value = vec3(0.0, 0.0, 0.0);
        {
            let mut payload = value.as_vec3_mut().unwrap();
            payload.set(1.0, 2.0, 3.0);
            payload.set_y(5.0);
        }
        let payload = value.as_vec3().unwrap();
        assert_eq!(payload.to_tuple(), (1.0, 5.0, 3.0));
    }

    #[test]
    fn test_vec4_payload() {
        let mut value = vec4(1.0, 2.0, 3.0, 4.0);
        value.as_vec4_mut().unwrap().set_w(9.0);
        let payload = value.as_vec4().unwrap();
        assert_eq!(payload.to_tuple(), (1.0, 2.0, 3.0, 9.0));
        assert!(value.as_vec3_mut().is_none());
    }

    #[test]
    fn test_matrix_payload() {
        let mut rows = [[0.0; 4]; 4];
        rows[1][2] = 6.0;
        let mut value = matrix44(rows);
        {
            let mut matrix = value.as_matrix44_mut().unwrap();
            assert!(matrix.set(3, 3, 1.0));
            assert!(!matrix.set(4, 0, 1.0));
        }
        let matrix = value.as_matrix44().unwrap();
        assert_eq!(matrix.get(1, 2), Some(6.0));
        assert_eq!(matrix.get(0, 4), None);
        assert_eq!(matrix.rows()[3][3], 1.0);
    }

    #[test]
    fn test_update() {
        let mut value = float(10.0);
        value.update(&float(20.0)).unwrap();
        assert_eq!(value.as_f64(), Some(20.0));

        let err = value.update(&vec3(1.0, 1.0, 1.0)).unwrap_err();
        assert_eq!(
            err,
            BridgeError::KindMismatch {
                expected: "Float",
                found: "Vec3",
            }
        );
        assert_eq!(value.as_f64(), Some(20.0));
    }

    #[test]
    fn test_to_owned_value_is_independent() {
        let original = vec3(1.0, 2.0, 3.0);
        let mut copy = original.to_owned_value();
        copy.as_vec3_mut().unwrap().set_x(7.0);

        let original_payload = original.as_vec3().unwrap();
        let copy_payload = copy.as_vec3().unwrap();
        assert_eq!(original_payload.x(), 1.0);
        assert_eq!(copy_payload.x(), 7.0);
    }
}
