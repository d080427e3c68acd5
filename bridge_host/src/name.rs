//! Names

use bridge_core::{Borrowed, IntoBridgeString, Owned};
use bridge_models::{ffi, Name};

pub fn new(text: impl IntoBridgeString) -> Owned<Name> {
    let text = text.into_bridge_string();
    unsafe { Owned::from_non_null(ffi::name_new(text.into_raw())) }
}

/// Read access to a [`Name`] from any tier
pub trait NameRef: Borrowed<Name> {
    fn as_str(&self) -> &str {
        unsafe { ffi::name_as_str(self.view().as_ptr()).as_str_unchecked() }
    }
}

impl<B: Borrowed<Name> + ?Sized> NameRef for B {}
