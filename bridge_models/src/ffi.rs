//! Native entry points
//!
//! Every function here is `extern "C"` and exported under a
//! `__bridge__$Type$operation` symbol. Handles are raw addresses produced by
//! `bridge_core::native`:
//!
//! - parameters documented as *consumed* take ownership of the handle; the
//!   caller must not use or free it afterwards
//! - results documented as *lent* point into the object they were read from
//!   and are only valid while that object is alive and unmodified
//! - a null result means "absent" (lookup miss, wrong value kind)
//!
//! Vector operations are not listed here. They are reached through each
//! type's `Vectorizable` registration.

use core::ffi::c_void;
use core::ptr::NonNull;

use bridge_core::native;
use bridge_core::{BridgeStatus, BridgeString, StrSlice};
use tracing::warn;

use crate::controller::{ControllerDef, ControllerState};
use crate::name::Name;
use crate::property::PropertyDef;
use crate::value::{Matrix44, Value, ValueKind, Vec3, Vec4};

// Name

/// Creates a name from a string
///
/// # Safety
///
/// `text` must be a live `BridgeString` handle; it is consumed.
#[export_name = "__bridge__$Name$new"]
pub unsafe extern "C" fn name_new(text: *mut c_void) -> NonNull<c_void> {
    let text = unsafe { native::reclaim::<BridgeString>(text) };
    native::export(Name::from(text))
}

/// # Safety
///
/// `name` must be a live `Name` handle. The view is lent.
#[export_name = "__bridge__$Name$as_str"]
pub unsafe extern "C" fn name_as_str(name: *const c_void) -> StrSlice {
    StrSlice::from_str(unsafe { native::borrow::<Name>(name) }.as_str())
}

// Value

#[export_name = "__bridge__$Value$new_float"]
pub extern "C" fn value_new_float(value: f64) -> NonNull<c_void> {
    native::export(Value::Float(value))
}

#[export_name = "__bridge__$Value$new_vec3"]
pub extern "C" fn value_new_vec3(x: f64, y: f64, z: f64) -> NonNull<c_void> {
    native::export(Value::Vec3(Vec3 { x, y, z }))
}

#[export_name = "__bridge__$Value$new_vec4"]
pub extern "C" fn value_new_vec4(x: f64, y: f64, z: f64, w: f64) -> NonNull<c_void> {
    native::export(Value::Vec4(Vec4 { x, y, z, w }))
}

/// Creates a matrix value from 16 row-major cells
///
/// # Safety
///
/// `cells` must point at 16 readable `f64`s.
#[export_name = "__bridge__$Value$new_matrix44"]
pub unsafe extern "C" fn value_new_matrix44(cells: *const f64) -> NonNull<c_void> {
    let cells = unsafe { core::slice::from_raw_parts(cells, 16) };
    let mut rows = [[0.0; 4]; 4];
    for (row, chunk) in rows.iter_mut().zip(cells.chunks_exact(4)) {
        row.copy_from_slice(chunk);
    }
    native::export(Value::Matrix44(Matrix44(rows)))
}

/// Copies a value into a new owned handle
///
/// # Safety
///
/// `value` must be a live `Value` handle.
#[export_name = "__bridge__$Value$clone"]
pub unsafe extern "C" fn value_clone(value: *const c_void) -> NonNull<c_void> {
    native::export(unsafe { native::borrow::<Value>(value) }.clone())
}

/// # Safety
///
/// `value` must be a live `Value` handle.
#[export_name = "__bridge__$Value$kind"]
pub unsafe extern "C" fn value_kind(value: *const c_void) -> ValueKind {
    unsafe { native::borrow::<Value>(value) }.kind()
}

/// Writes the float payload to `out`; false if the value is not a float
///
/// # Safety
///
/// `value` must be a live `Value` handle and `out` writable.
#[export_name = "__bridge__$Value$as_f64"]
pub unsafe extern "C" fn value_as_f64(value: *const c_void, out: *mut f64) -> bool {
    match unsafe { native::borrow::<Value>(value) }.as_f64() {
        Some(float) => {
            unsafe { out.write(float) };
            true
        }
        None => false,
    }
}

/// Lends the `Vec3` payload, or null
///
/// # Safety
///
/// `value` must be a live `Value` handle.
#[export_name = "__bridge__$Value$as_vec3"]
pub unsafe extern "C" fn value_as_vec3(value: *const c_void) -> *const c_void {
    native::lend_optional(unsafe { native::borrow::<Value>(value) }.as_vec3())
}

/// # Safety
///
/// `value` must be a live `Value` handle that is not otherwise borrowed.
#[export_name = "__bridge__$Value$as_vec3_mut"]
pub unsafe extern "C" fn value_as_vec3_mut(value: *mut c_void) -> *mut c_void {
    native::lend_optional_mut(unsafe { native::borrow_mut::<Value>(value) }.as_vec3_mut())
}

/// # Safety
///
/// `value` must be a live `Value` handle.
#[export_name = "__bridge__$Value$as_vec4"]
pub unsafe extern "C" fn value_as_vec4(value: *const c_void) -> *const c_void {
    native::lend_optional(unsafe { native::borrow::<Value>(value) }.as_vec4())
}

/// # Safety
///
/// `value` must be a live `Value` handle that is not otherwise borrowed.
#[export_name = "__bridge__$Value$as_vec4_mut"]
pub unsafe extern "C" fn value_as_vec4_mut(value: *mut c_void) -> *mut c_void {
    native::lend_optional_mut(unsafe { native::borrow_mut::<Value>(value) }.as_vec4_mut())
}

/// # Safety
///
/// `value` must be a live `Value` handle.
#[export_name = "__bridge__$Value$as_matrix44"]
pub unsafe extern "C" fn value_as_matrix44(value: *const c_void) -> *const c_void {
    native::lend_optional(unsafe { native::borrow::<Value>(value) }.as_matrix44())
}

/// # Safety
///
/// `value` must be a live `Value` handle that is not otherwise borrowed.
#[export_name = "__bridge__$Value$as_matrix44_mut"]
pub unsafe extern "C" fn value_as_matrix44_mut(value: *mut c_void) -> *mut c_void {
    native::lend_optional_mut(unsafe { native::borrow_mut::<Value>(value) }.as_matrix44_mut())
}

/// Copies `other` into `value`
///
/// Returns [`BridgeStatus::KindMismatch`] and leaves `value` untouched if the
/// kinds differ.
///
/// # Safety
///
/// Both must be live, distinct `Value` handles; `value` must not be otherwise
/// borrowed.
#[export_name = "__bridge__$Value$update"]
pub unsafe extern "C" fn value_update(value: *mut c_void, other: *const c_void) -> BridgeStatus {
    let other = unsafe { native::borrow::<Value>(other) };
    match unsafe { native::borrow_mut::<Value>(value) }.update(other) {
        Ok(()) => BridgeStatus::Ok,
        Err(err) => {
            warn!(error = %err, "rejected value update");
            BridgeStatus::from(&err)
        }
    }
}

// Vec3 / Vec4

/// # Safety
///
/// `vec3` must be a live `Vec3` handle.
#[export_name = "__bridge__$Vec3$x"]
pub unsafe extern "C" fn vec3_x(vec3: *const c_void) -> f64 {
    unsafe { native::borrow::<Vec3>(vec3) }.x
}

/// # Safety
///
/// `vec3` must be a live `Vec3` handle.
#[export_name = "__bridge__$Vec3$y"]
pub unsafe extern "C" fn vec3_y(vec3: *const c_void) -> f64 {
    unsafe { native::borrow::<Vec3>(vec3) }.y
}

/// # Safety
///
/// `vec3` must be a live `Vec3` handle.
#[export_name = "__bridge__$Vec3$z"]
pub unsafe extern "C" fn vec3_z(vec3: *const c_void) -> f64 {
    unsafe { native::borrow::<Vec3>(vec3) }.z
}

/// # Safety
///
/// `vec3` must be a live `Vec3` handle that is not otherwise borrowed.
#[export_name = "__bridge__$Vec3$set"]
pub unsafe extern "C" fn vec3_set(vec3: *mut c_void, x: f64, y: f64, z: f64) {
    *unsafe { native::borrow_mut::<Vec3>(vec3) } = Vec3 { x, y, z };
}

/// # Safety
///
/// `vec4` must be a live `Vec4` handle.
#[export_name = "__bridge__$Vec4$x"]
pub unsafe extern "C" fn vec4_x(vec4: *const c_void) -> f64 {
    unsafe { native::borrow::<Vec4>(vec4) }.x
}

/// # Safety
///
/// `vec4` must be a live `Vec4` handle.
#[export_name = "__bridge__$Vec4$y"]
pub unsafe extern "C" fn vec4_y(vec4: *const c_void) -> f64 {
    unsafe { native::borrow::<Vec4>(vec4) }.y
}

/// # Safety
///
/// `vec4` must be a live `Vec4` handle.
#[export_name = "__bridge__$Vec4$z"]
pub unsafe extern "C" fn vec4_z(vec4: *const c_void) -> f64 {
    unsafe { native::borrow::<Vec4>(vec4) }.z
}

/// # Safety
///
/// `vec4` must be a live `Vec4` handle.
#[export_name = "__bridge__$Vec4$w"]
pub unsafe extern "C" fn vec4_w(vec4: *const c_void) -> f64 {
    unsafe { native::borrow::<Vec4>(vec4) }.w
}

/// # Safety
///
/// `vec4` must be a live `Vec4` handle that is not otherwise borrowed.
#[export_name = "__bridge__$Vec4$set"]
pub unsafe extern "C" fn vec4_set(vec4: *mut c_void, x: f64, y: f64, z: f64, w: f64) {
    *unsafe { native::borrow_mut::<Vec4>(vec4) } = Vec4 { x, y, z, w };
}

// Matrix44

/// Writes one cell to `out`; false if `row` or `col` is out of range
///
/// # Safety
///
/// `matrix` must be a live `Matrix44` handle and `out` writable.
#[export_name = "__bridge__$Matrix44$get"]
pub unsafe extern "C" fn matrix44_get(
    matrix: *const c_void,
    row: usize,
    col: usize,
    out: *mut f64,
) -> bool {
    match unsafe { native::borrow::<Matrix44>(matrix) }.get(row, col) {
        Some(cell) => {
            unsafe { out.write(cell) };
            true
        }
        None => false,
    }
}

/// Overwrites one cell; false if `row` or `col` is out of range
///
/// # Safety
///
/// `matrix` must be a live `Matrix44` handle that is not otherwise borrowed.
#[export_name = "__bridge__$Matrix44$set"]
pub unsafe extern "C" fn matrix44_set(
    matrix: *mut c_void,
    row: usize,
    col: usize,
    value: f64,
) -> bool {
    match unsafe { native::borrow_mut::<Matrix44>(matrix) }.get_mut(row, col) {
        Some(cell) => {
            *cell = value;
            true
        }
        None => false,
    }
}

// PropertyDef

/// # Safety
///
/// `name` must be a live `BridgeString` handle and `default_value` a live
/// `Value` handle; both are consumed.
#[export_name = "__bridge__$PropertyDef$new"]
pub unsafe extern "C" fn property_def_new(
    name: *mut c_void,
    default_value: *mut c_void,
) -> NonNull<c_void> {
    let name = unsafe { native::reclaim::<BridgeString>(name) };
    let default_value = unsafe { native::reclaim::<Value>(default_value) };
    native::export(PropertyDef::new(name, default_value))
}

/// # Safety
///
/// `def` must be a live `PropertyDef` handle. The result is lent.
#[export_name = "__bridge__$PropertyDef$name"]
pub unsafe extern "C" fn property_def_name(def: *const c_void) -> NonNull<c_void> {
    native::lend(unsafe { native::borrow::<PropertyDef>(def) }.name())
}

/// # Safety
///
/// `def` must be a live `PropertyDef` handle. The result is lent.
#[export_name = "__bridge__$PropertyDef$default_value"]
pub unsafe extern "C" fn property_def_default_value(def: *const c_void) -> NonNull<c_void> {
    native::lend(unsafe { native::borrow::<PropertyDef>(def) }.default_value())
}

/// # Safety
///
/// `def` must be a live `PropertyDef` handle that is not otherwise borrowed.
/// The result is lent.
#[export_name = "__bridge__$PropertyDef$default_value_mut"]
pub unsafe extern "C" fn property_def_default_value_mut(def: *mut c_void) -> NonNull<c_void> {
    native::lend_mut(unsafe { native::borrow_mut::<PropertyDef>(def) }.default_value_mut())
}

// ControllerDef

/// # Safety
///
/// `name` must be a live `BridgeString` handle and `properties` a live
/// vector of `PropertyDef`; both are consumed.
#[export_name = "__bridge__$ControllerDef$new"]
pub unsafe extern "C" fn controller_def_new(
    name: *mut c_void,
    properties: *mut c_void,
) -> NonNull<c_void> {
    let name = unsafe { native::reclaim::<BridgeString>(name) };
    let properties = unsafe { native::reclaim_vec::<PropertyDef>(properties) };
    native::export(ControllerDef::new(name, properties))
}

/// # Safety
///
/// `def` must be a live `ControllerDef` handle. The result is lent.
#[export_name = "__bridge__$ControllerDef$name"]
pub unsafe extern "C" fn controller_def_name(def: *const c_void) -> NonNull<c_void> {
    native::lend(unsafe { native::borrow::<ControllerDef>(def) }.name())
}

/// Lends the property named `name`, or null
///
/// # Safety
///
/// `def` must be a live `ControllerDef` handle and `name` a live `Name`
/// handle.
#[export_name = "__bridge__$ControllerDef$property"]
pub unsafe extern "C" fn controller_def_property(
    def: *const c_void,
    name: *const c_void,
) -> *const c_void {
    let name = unsafe { native::borrow::<Name>(name) };
    native::lend_optional(unsafe { native::borrow::<ControllerDef>(def) }.property(name))
}

/// Same as [`controller_def_property`] with the name given as a string view
///
/// # Safety
///
/// `def` must be a live `ControllerDef` handle and `name` valid UTF-8.
#[export_name = "__bridge__$ControllerDef$property_by_str"]
pub unsafe extern "C" fn controller_def_property_by_str(
    def: *const c_void,
    name: StrSlice,
) -> *const c_void {
    let name = unsafe { name.as_str_unchecked() };
    native::lend_optional(unsafe { native::borrow::<ControllerDef>(def) }.property(name))
}

/// # Safety
///
/// `def` must be a live `ControllerDef` handle that is not otherwise borrowed,
/// and `name` valid UTF-8.
#[export_name = "__bridge__$ControllerDef$property_mut"]
pub unsafe extern "C" fn controller_def_property_mut(
    def: *mut c_void,
    name: StrSlice,
) -> *mut c_void {
    let name = unsafe { name.as_str_unchecked() };
    let def = unsafe { native::borrow_mut::<ControllerDef>(def) };
    native::lend_optional_mut(def.property_mut(name))
}

/// Lends the property vector
///
/// # Safety
///
/// `def` must be a live `ControllerDef` handle. The result is lent and must
/// only be read.
#[export_name = "__bridge__$ControllerDef$properties"]
pub unsafe extern "C" fn controller_def_properties(def: *const c_void) -> NonNull<c_void> {
    native::lend(unsafe { native::borrow::<ControllerDef>(def) }.properties())
}

// ControllerState

/// # Safety
///
/// `def` must be a live `ControllerDef` handle; it is consumed.
#[export_name = "__bridge__$ControllerState$new"]
pub unsafe extern "C" fn controller_state_new(def: *mut c_void) -> NonNull<c_void> {
    let def = unsafe { native::reclaim::<ControllerDef>(def) };
    native::export(ControllerState::new(def))
}

/// # Safety
///
/// `state` must be a live `ControllerState` handle. The result is lent.
#[export_name = "__bridge__$ControllerState$name"]
pub unsafe extern "C" fn controller_state_name(state: *const c_void) -> NonNull<c_void> {
    native::lend(unsafe { native::borrow::<ControllerState>(state) }.name())
}

/// # Safety
///
/// `state` must be a live `ControllerState` handle. The result is lent.
#[export_name = "__bridge__$ControllerState$definition"]
pub unsafe extern "C" fn controller_state_definition(state: *const c_void) -> NonNull<c_void> {
    native::lend(unsafe { native::borrow::<ControllerState>(state) }.definition())
}

/// # Safety
///
/// `state` must be a live `ControllerState` handle.
#[export_name = "__bridge__$ControllerState$len"]
pub unsafe extern "C" fn controller_state_len(state: *const c_void) -> usize {
    unsafe { native::borrow::<ControllerState>(state) }.len()
}

/// Lends the current value of `name`, or null
///
/// # Safety
///
/// `state` must be a live `ControllerState` handle and `name` valid UTF-8.
#[export_name = "__bridge__$ControllerState$value"]
pub unsafe extern "C" fn controller_state_value(
    state: *const c_void,
    name: StrSlice,
) -> *const c_void {
    let name = unsafe { name.as_str_unchecked() };
    native::lend_optional(unsafe { native::borrow::<ControllerState>(state) }.value(name))
}

/// # Safety
///
/// `state` must be a live `ControllerState` handle that is not otherwise
/// borrowed, and `name` valid UTF-8.
#[export_name = "__bridge__$ControllerState$value_mut"]
pub unsafe extern "C" fn controller_state_value_mut(
    state: *mut c_void,
    name: StrSlice,
) -> *mut c_void {
    let name = unsafe { name.as_str_unchecked() };
    let state = unsafe { native::borrow_mut::<ControllerState>(state) };
    native::lend_optional_mut(state.value_mut(name))
}

/// # Safety
///
/// `state` must be a live `ControllerState` handle that is not otherwise
/// borrowed.
#[export_name = "__bridge__$ControllerState$reset"]
pub unsafe extern "C" fn controller_state_reset(state: *mut c_void) {
    unsafe { native::borrow_mut::<ControllerState>(state) }.reset();
}

/// # Safety
///
/// `state` must be a live `ControllerState` handle that is not otherwise
/// borrowed; `def` must be a live `ControllerDef` handle and is consumed.
#[export_name = "__bridge__$ControllerState$redefine"]
pub unsafe extern "C" fn controller_state_redefine(state: *mut c_void, def: *mut c_void) {
    let def = unsafe { native::reclaim::<ControllerDef>(def) };
    unsafe { native::borrow_mut::<ControllerState>(state) }.redefine(def);
}

// JSON

#[cfg(feature = "serde_support")]
unsafe fn decode_into<T>(json: StrSlice, out: *mut *mut c_void) -> BridgeStatus
where
    T: bridge_core::Bridged + serde::de::DeserializeOwned,
{
    let text = match unsafe { json.to_str() } {
        Ok(text) => text,
        Err(err) => {
            unsafe { out.write(core::ptr::null_mut()) };
            return BridgeStatus::from(&err);
        }
    };
    match serde_json::from_str::<T>(text) {
        Ok(value) => {
            unsafe { out.write(native::export(value).as_ptr()) };
            BridgeStatus::Ok
        }
        Err(err) => {
            warn!(type_name = T::TYPE_NAME, error = %err, "failed to decode definition");
            let message = BridgeString::new(err.to_string());
            unsafe { out.write(native::export(message).as_ptr()) };
            BridgeStatus::Decode
        }
    }
}

/// Decodes a property definition from JSON
///
/// On [`BridgeStatus::Ok`], `*out` is an owned `PropertyDef` handle. On
/// [`BridgeStatus::Decode`], `*out` is an owned `BridgeString` holding the
/// decoder's message. Otherwise `*out` is null.
///
/// # Safety
///
/// `json` must satisfy `StrSlice::as_bytes` and `out` must be writable.
#[cfg(feature = "serde_support")]
#[export_name = "__bridge__$PropertyDef$from_json"]
pub unsafe extern "C" fn property_def_from_json(
    json: StrSlice,
    out: *mut *mut c_void,
) -> BridgeStatus {
    unsafe { decode_into::<PropertyDef>(json, out) }
}

/// Decodes a controller definition from JSON
///
/// Same out-parameter contract as [`property_def_from_json`].
///
/// # Safety
///
/// `json` must satisfy `StrSlice::as_bytes` and `out` must be writable.
#[cfg(feature = "serde_support")]
#[export_name = "__bridge__$ControllerDef$from_json"]
pub unsafe extern "C" fn controller_def_from_json(
    json: StrSlice,
    out: *mut *mut c_void,
) -> BridgeStatus {
    unsafe { decode_into::<ControllerDef>(json, out) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bridge_core::audit;

    unsafe fn str_of<'a>(view: StrSlice) -> &'a str {
        unsafe { view.to_str() }.unwrap()
    }

    #[test]
    fn test_property_def_entry_points() {
        audit::reset();
        unsafe {
            let name = bridge_core::string::bridge_string_new(StrSlice::from_str("propertyA"));
            let def = property_def_new(name.as_ptr(), value_new_float(10.0).as_ptr());

            let def_name = property_def_name(def.as_ptr());
            assert_eq!(str_of(name_as_str(def_name.as_ptr())), "propertyA");

            let value = property_def_default_value(def.as_ptr());
            assert_eq!(value_kind(value.as_ptr()), ValueKind::Float);
            let mut out = 0.0;
            assert!(value_as_f64(value.as_ptr(), &mut out));
            assert_eq!(out, 10.0);
            assert!(value_as_vec3(value.as_ptr()).is_null());

            native::release::<PropertyDef>(def.as_ptr());
        }
        assert!(audit::snapshot().is_balanced());
    }

    #[test]
    fn test_value_update_status() {
        audit::reset();
        unsafe {
            let target = value_new_vec3(0.0, 0.0, 0.0).as_ptr();
            let float = value_new_float(1.0).as_ptr();
            let vec3 = value_new_vec3(1.0, 2.0, 3.0).as_ptr();

            assert_eq!(value_update(target, float), BridgeStatus::KindMismatch);
            assert_eq!(value_update(target, vec3), BridgeStatus::Ok);

            let payload = value_as_vec3(target);
            assert_eq!(
                (vec3_x(payload), vec3_y(payload), vec3_z(payload)),
                (1.0, 2.0, 3.0)
            );

            for ptr in [target, float, vec3] {
                native::release::<Value>(ptr);
            }
        }
        assert!(audit::snapshot().is_balanced());
    }

    #[test]
    fn test_matrix_entry_points() {
        let cells: [f64; 16] = core::array::from_fn(|i| i as f64);
        unsafe {
            let value = value_new_matrix44(cells.as_ptr()).as_ptr();
            let matrix = value_as_matrix44_mut(value);
            assert!(!matrix.is_null());

            let mut out = 0.0;
            assert!(matrix44_get(matrix, 1, 2, &mut out));
            assert_eq!(out, 6.0);
            assert!(matrix44_set(matrix, 3, 3, -1.0));
            assert!(!matrix44_set(matrix, 4, 0, 0.0));
            assert!(!matrix44_get(matrix, 0, 4, &mut out));

            assert_eq!(
                native::borrow::<Value>(value).as_matrix44().unwrap().rows()[3][3],
                -1.0
            );
            native::release::<Value>(value);
        }
    }

    #[test]
    fn test_controller_state_entry_points() {
        audit::reset();
        unsafe {
            let props = native::export_vec(vec![
                PropertyDef::new("propertyA", 10.0),
                PropertyDef::new("propertyB", Value::vec3()),
            ]);
            let name = bridge_core::string::bridge_string_new(StrSlice::from_str("controllerA"));
            let def = controller_def_new(name.as_ptr(), props.as_ptr());

            let hit = controller_def_property_by_str(def.as_ptr(), StrSlice::from_str("propertyB"));
            assert!(!hit.is_null());
            let miss = controller_def_property_by_str(def.as_ptr(), StrSlice::from_str("nope"));
            assert!(miss.is_null());

            let state = controller_state_new(def.as_ptr()).as_ptr();
            assert_eq!(controller_state_len(state), 2);

            let value = controller_state_value_mut(state, StrSlice::from_str("propertyA"));
            let twenty = value_new_float(20.0).as_ptr();
            assert_eq!(value_update(value, twenty), BridgeStatus::Ok);
            native::release::<Value>(twenty);

            controller_state_reset(state);
            let value = controller_state_value(state, StrSlice::from_str("propertyA"));
            let mut out = 0.0;
            assert!(value_as_f64(value, &mut out));
            assert_eq!(out, 10.0);

            native::release::<ControllerState>(state);
        }
        assert!(audit::snapshot().is_balanced());
    }

    #[cfg(feature = "serde_support")]
    #[test]
    fn test_from_json_reports_errors() {
        audit::reset();
        unsafe {
            let mut out: *mut c_void = core::ptr::null_mut();
            let status = property_def_from_json(
                StrSlice::from_str(r#"{"name": "propertyA", "default_value": 10.0}"#),
                &mut out,
            );
            assert_eq!(status, BridgeStatus::Ok);
            assert_eq!(native::reclaim::<PropertyDef>(out), PropertyDef::new("propertyA", 10.0));

            let status = controller_def_from_json(StrSlice::from_str("{\"name\": 3}"), &mut out);
            assert_eq!(status, BridgeStatus::Decode);
            let message = native::reclaim::<BridgeString>(out);
            assert!(!message.as_str().is_empty());
        }
        assert!(audit::snapshot().is_balanced());
    }
}
