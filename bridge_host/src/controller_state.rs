//! Live controller state
//!
//! A [`ControllerState`] owns its definition and one current value per
//! property, seeded from the defaults.

use bridge_core::{Borrowed, BorrowedMut, Owned, Ref, RefMut, StrSlice};
use bridge_models::{ffi, ControllerDef, ControllerState, Name, Value};

/// Creates the state for `definition`, which moves into it
pub fn new(definition: Owned<ControllerDef>) -> Owned<ControllerState> {
    unsafe { Owned::from_non_null(ffi::controller_state_new(definition.into_raw())) }
}

pub trait ControllerStateRef: Borrowed<ControllerState> {
    fn name(&self) -> Ref<'_, Name> {
        unsafe { Ref::from_non_null(ffi::controller_state_name(self.view().as_ptr())) }
    }

    fn definition(&self) -> Ref<'_, ControllerDef> {
        unsafe { Ref::from_non_null(ffi::controller_state_definition(self.view().as_ptr())) }
    }

    fn len(&self) -> usize {
        unsafe { ffi::controller_state_len(self.view().as_ptr()) }
    }

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn value(&self, name: &str) -> Option<Ref<'_, Value>> {
        unsafe {
            Ref::from_raw(ffi::controller_state_value(
                self.view().as_ptr(),
                StrSlice::from_str(name),
            ))
        }
    }
}

impl<B: Borrowed<ControllerState> + ?Sized> ControllerStateRef for B {}

pub trait ControllerStateRefMut: BorrowedMut<ControllerState> {
    fn value_mut(&mut self, name: &str) -> Option<RefMut<'_, Value>> {
        unsafe {
            RefMut::from_raw(ffi::controller_state_value_mut(
                self.view_mut().as_mut_ptr(),
                StrSlice::from_str(name),
            ))
        }
    }

    /// Puts every value back to its default
    fn reset(&mut self) {
        unsafe { ffi::controller_state_reset(self.view_mut().as_mut_ptr()) }
    }

    /// Replaces the definition and reseeds every value from it
    fn redefine(&mut self, definition: Owned<ControllerDef>) {
        unsafe {
            ffi::controller_state_redefine(self.view_mut().as_mut_ptr(), definition.into_raw())
        }
    }
}

impl<B: BorrowedMut<ControllerState> + ?Sized> ControllerStateRefMut for B {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller_def::{self, ControllerDefRef};
    use crate::name::NameRef;
    use crate::property_def;
    use crate::value::{self, ValueRef, ValueRefMut, Vec3Ref, Vec3RefMut};
    use bridge_core::ForeignVector;

    fn definition(name: &str) -> Owned<ControllerDef> {
        let mut properties = ForeignVector::new();
        properties.push(property_def::new("propertyA", value::float(10.0)));
        properties.push(property_def::new("propertyB", value::vec3(0.0, 0.0, 0.0)));
        controller_def::new(name, properties)
    }

    #[test]
    fn test_state_seeds_defaults() {
        let state = new(definition("controllerA"));
        let name = state.name();
        assert_eq!(name.as_str(), "controllerA");
        assert_eq!(state.len(), 2);

        let value = state.value("propertyA").unwrap();
        assert_eq!(value.as_f64(), Some(10.0));
        assert!(state.value("missing").is_none());

        let def = state.definition();
        assert_eq!(def.properties().len(), 2);
    }

    #[test]
    fn test_mutate_then_reset() {
        let mut state = new(definition("controllerA"));
        state
            .value_mut("propertyB")
            .unwrap()
            .as_vec3_mut()
            .unwrap()
            .set(1.0, 2.0, 3.0);
        {
            let value = state.value("propertyB").unwrap();
            assert_eq!(value.as_vec3().unwrap().to_tuple(), (1.0, 2.0, 3.0));
        }

        state.reset();
        let value = state.value("propertyB").unwrap();
        assert_eq!(value.as_vec3().unwrap().to_tuple(), (0.0, 0.0, 0.0));
    }

    #[test]
    fn test_update_keeps_kind() {
        let mut state = new(definition("controllerA"));
        let mut current = state.value_mut("propertyA").unwrap();
        assert!(current.update(&value::vec3(1.0, 1.0, 1.0)).is_err());
        current.update(&value::float(42.0)).unwrap();
        assert_eq!(current.as_f64(), Some(42.0));
    }

    #[test]
    fn test_redefine() {
        let mut state = new(definition("controllerA"));
        let mut properties = ForeignVector::new();
        properties.push(property_def::new("scale", value::float(2.0)));
        state.redefine(controller_def::new("controllerB", properties));

        let name = state.name();
        assert_eq!(name.as_str(), "controllerB");
        assert_eq!(state.len(), 1);
        assert!(state.value("propertyA").is_none());
    }
}
