//! # Bridge Host
//!
//! The host-side view of the native object library.
//!
//! Native objects are only ever held as [`Owned`], [`RefMut`] or [`Ref`]
//! handles. Constructors live in one module per type and return `Owned`
//! handles; accessors are extension traits implemented for every tier that
//! can provide them, so `name()` works the same on an `Owned<PropertyDef>`
//! as on a `Ref<PropertyDef>` lent out of a vector.
//!
//! ## Example
//!
//! ```
//! use bridge_host::prelude::*;
//! use bridge_host::{controller_def, property_def, value};
//!
//! let mut properties = ForeignVector::new();
//! properties.push(property_def::new("propertyA", value::float(10.0)));
//! properties.push(property_def::new("propertyB", value::vec3(0.0, 0.0, 0.0)));
//!
//! let controller = controller_def::new("controllerA", properties);
//! let property = controller.property_by_str("propertyA").unwrap();
//! let default_value = property.default_value();
//! assert_eq!(default_value.as_f64(), Some(10.0));
//! ```
//!
//! ## Features
//!
//! - `serde_support` (default): `from_json` constructors for definitions

pub mod controller_def;
pub mod controller_state;
#[cfg(feature = "serde_support")]
mod json;
pub mod name;
pub mod property_def;
pub mod value;

pub use bridge_core::{
    audit, BridgeError, BridgeString, Borrowed, BorrowedMut, ForeignVector, Handle, HandleKind,
    IntoBridgeString, Owned, Ref, RefMut, Result, StringRef, VecRef,
};
pub use bridge_models::{
    ControllerDef, ControllerState, Matrix44, Name, PropertyDef, Value, ValueKind, Vec3, Vec4,
};

pub use controller_def::{ControllerDefRef, ControllerDefRefMut};
pub use controller_state::{ControllerStateRef, ControllerStateRefMut};
pub use name::NameRef;
pub use property_def::{PropertyDefRef, PropertyDefRefMut};
pub use value::{
    Matrix44Ref, Matrix44RefMut, ValueRef, ValueRefMut, Vec3Ref, Vec3RefMut, Vec4Ref, Vec4RefMut,
};

/// Handle types and every accessor trait
pub mod prelude {
    pub use crate::{
        Borrowed, BorrowedMut, ControllerDefRef, ControllerDefRefMut, ControllerStateRef,
        ControllerStateRefMut, ForeignVector, IntoBridgeString, Matrix44Ref, Matrix44RefMut,
        NameRef, Owned, PropertyDefRef, PropertyDefRefMut, Ref, RefMut, StringRef, ValueRef,
        ValueRefMut, Vec3Ref, Vec3RefMut, Vec4Ref, Vec4RefMut, VecRef,
    };
}
