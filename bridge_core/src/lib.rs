//! # Bridge Core
//!
//! This crate defines the ownership model used to share opaque objects between
//! a native library (explicit ownership, explicit `free`) and a host runtime
//! that only ever sees handles.
//!
//! ## Philosophy
//!
//! - **Ownership is a type, not a flag**: releasing or transferring an owned
//!   handle consumes it, so a second release does not compile.
//! - **Borrows cannot outlive their source**: `Ref` and `RefMut` carry the
//!   lifetime of whatever they were derived from.
//! - **Handles are opaque**: the host never inspects the layout behind a handle.
//! - **One vector algorithm**: every bridgeable type shares the same generic
//!   vector implementation, registered once per type.
//!
//! ## Key Types
//!
//! - [`Handle<T>`]: A typed, non-copyable opaque address
//! - [`Owned<T>`]: Exclusive ownership of one handle, released on drop
//! - [`RefMut<'a, T>`]: Mutable, non-owning borrow
//! - [`Ref<'a, T>`]: Read-only, non-owning borrow
//! - [`ForeignVector<T>`]: Owned vector of opaque elements
//! - [`Vectorizable`]: The per-type vector entry points
//!
//! ## Threading
//!
//! Every handle type is `!Send` and `!Sync`. A foreign object is driven by one
//! thread for its whole life.

pub mod audit;
pub mod error;
pub mod handle;
pub mod native;
pub mod ownership;
pub mod string;
pub mod vector;
pub mod vectorizable;

pub use audit::{AuditSnapshot, HandleCounts, HandleEvent, HandleKind};
pub use error::{BridgeError, BridgeStatus, Result};
pub use handle::{Bridged, Handle};
pub use ownership::{Borrowed, BorrowedMut, Owned, Ref, RefMut};
pub use string::{BridgeString, IntoBridgeString, StrSlice, StringRef};
pub use vector::{ForeignVector, Iter, VecRef};
pub use vectorizable::{VectorVTable, Vectorizable};
