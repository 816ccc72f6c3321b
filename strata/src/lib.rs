//! Strata's top level crate.
//! Reexports all others.

#![warn(
    missing_debug_implementations,
    missing_copy_implementations,
    missing_docs,
    trivial_casts,
    trivial_numeric_casts,
    unused_extern_crates,
    unused_import_braces,
    unused_qualifications
)]

#[cfg(feature = "command")]
#[doc(inline)]
pub use strata_command as command;

#[cfg(feature = "descriptor")]
#[doc(inline)]
pub use strata_descriptor as descriptor;

#[cfg(feature = "resource")]
#[doc(inline)]
pub use strata_resource as resource;

#[cfg(feature = "wsi")]
#[doc(inline)]
pub use strata_wsi as wsi;

#[doc(inline)]
pub use strata_core::*;
