//! Presentable surfaces as seen by command buffers.
//!
//! Swap chains are created elsewhere.
//! A render context wraps one and tells command buffers which view to render to
//! for the current frame, and how to move the back buffer in and out of the presentable state.

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

mod context;
mod dx11;
mod dx12;

pub use crate::{context::*, dx11::*, dx12::*};
