//! # Bridge Models
//!
//! The native object library shared with the host runtime.
//!
//! Every type here is registered with the bridge (`bridge_type!`), so the host
//! can hold it as an opaque handle and keep it in a `ForeignVector`. The
//! host never sees these structs directly; it goes through the entry points
//! in [`ffi`].
//!
//! ## Types
//!
//! - [`Name`]: An identifier for properties and controllers
//! - [`Value`]: A property value (`Float`, `Vec3`, `Vec4`, `Matrix44`)
//! - [`PropertyDef`]: A named property with a default value
//! - [`ControllerDef`]: A named set of property definitions
//! - [`ControllerState`]: Live values for one controller definition
//!
//! ## Features
//!
//! - `serde_support` (default): serde derives and JSON definition loading

pub mod controller;
pub mod ffi;
pub mod name;
pub mod property;
pub mod value;

pub use controller::{ControllerDef, ControllerState};
pub use name::Name;
pub use property::PropertyDef;
pub use value::{Matrix44, Value, ValueKind, Vec3, Vec4};
