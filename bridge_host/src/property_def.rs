//! Property definitions

use bridge_core::{Borrowed, BorrowedMut, IntoBridgeString, Owned, Ref, RefMut};
use bridge_models::{ffi, Name, PropertyDef, Value};

/// Creates a property definition
///
/// Both arguments are moved into the new definition.
pub fn new(name: impl IntoBridgeString, default_value: Owned<Value>) -> Owned<PropertyDef> {
    let name = name.into_bridge_string();
    unsafe {
        Owned::from_non_null(ffi::property_def_new(
            name.into_raw(),
            default_value.into_raw(),
        ))
    }
}

/// Decodes a definition such as `{"name": "propertyA", "default_value": 10.0}`
#[cfg(feature = "serde_support")]
pub fn from_json(json: &str) -> bridge_core::Result<Owned<PropertyDef>> {
    crate::json::decode(json, ffi::property_def_from_json)
}

/// Read access to a [`PropertyDef`] from any tier
pub trait PropertyDefRef: Borrowed<PropertyDef> {
    fn name(&self) -> Ref<'_, Name> {
        unsafe { Ref::from_non_null(ffi::property_def_name(self.view().as_ptr())) }
    }

    fn default_value(&self) -> Ref<'_, Value> {
        unsafe { Ref::from_non_null(ffi::property_def_default_value(self.view().as_ptr())) }
    }
}

impl<B: Borrowed<PropertyDef> + ?Sized> PropertyDefRef for B {}

pub trait PropertyDefRefMut: BorrowedMut<PropertyDef> {
    fn default_value_mut(&mut self) -> RefMut<'_, Value> {
        unsafe {
            RefMut::from_non_null(ffi::property_def_default_value_mut(
                self.view_mut().as_mut_ptr(),
            ))
        }
    }
}

impl<B: BorrowedMut<PropertyDef> + ?Sized> PropertyDefRefMut for B {}
