//! Controller definitions

use bridge_core::{
    Borrowed, BorrowedMut, ForeignVector, IntoBridgeString, Owned, Ref, RefMut, StrSlice, VecRef,
};
use bridge_models::{ffi, ControllerDef, Name, PropertyDef};
use tracing::debug;

/// Creates a controller definition
///
/// The vector and every property in it move into the new definition.
pub fn new(
    name: impl IntoBridgeString,
    properties: ForeignVector<PropertyDef>,
) -> Owned<ControllerDef> {
    let name = name.into_bridge_string();
    debug!(properties = properties.len(), "creating controller definition");
    unsafe {
        Owned::from_non_null(ffi::controller_def_new(
            name.into_raw(),
            properties.into_raw(),
        ))
    }
}

/// Decodes a definition such as
/// `{"name": "controllerA", "properties": [{"name": "propertyA", "default_value": 10.0}]}`
#[cfg(feature = "serde_support")]
pub fn from_json(json: &str) -> bridge_core::Result<Owned<ControllerDef>> {
    crate::json::decode(json, ffi::controller_def_from_json)
}

/// Read access to a [`ControllerDef`] from any tier
pub trait ControllerDefRef: Borrowed<ControllerDef> {
    fn name(&self) -> Ref<'_, Name> {
        unsafe { Ref::from_non_null(ffi::controller_def_name(self.view().as_ptr())) }
    }

    /// First property whose name equals `name`
    fn property<N: Borrowed<Name> + ?Sized>(&self, name: &N) -> Option<Ref<'_, PropertyDef>> {
        unsafe {
            Ref::from_raw(ffi::controller_def_property(
                self.view().as_ptr(),
                name.view().as_ptr(),
            ))
        }
    }

    fn property_by_str(&self, name: &str) -> Option<Ref<'_, PropertyDef>> {
        unsafe {
            Ref::from_raw(ffi::controller_def_property_by_str(
                self.view().as_ptr(),
                StrSlice::from_str(name),
            ))
        }
    }

    fn properties(&self) -> VecRef<'_, PropertyDef> {
        unsafe { VecRef::from_non_null(ffi::controller_def_properties(self.view().as_ptr())) }
    }
}

impl<B: Borrowed<ControllerDef> + ?Sized> ControllerDefRef for B {}

pub trait ControllerDefRefMut: BorrowedMut<ControllerDef> {
    fn property_mut(&mut self, name: &str) -> Option<RefMut<'_, PropertyDef>> {
        unsafe {
            RefMut::from_raw(ffi::controller_def_property_mut(
                self.view_mut().as_mut_ptr(),
                StrSlice::from_str(name),
            ))
        }
    }
}

impl<B: BorrowedMut<ControllerDef> + ?Sized> ControllerDefRefMut for B {}
