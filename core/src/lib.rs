//! Crate that contains the native layer used by other strata crates.
//!
//! Native submission objects (`ID3D12GraphicsCommandList`, `ID3D11DeviceContext`, ...)
//! are represented by traits in the [`native`] module.
//! Handles passed through them are opaque [`handle`] newtypes
//! built by external collaborators.

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

#[macro_use]
mod slow;

mod backend;
mod error;
pub mod handle;
pub mod native;
mod types;

#[cfg(feature = "trace")]
pub mod trace;

pub use crate::{backend::*, error::*, handle::NativeView, types::*};
