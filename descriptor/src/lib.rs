//! Descriptor tables addressed by shader stage, register kind and slot.
//!
//! Pipelines that read resources through descriptor tables come with one
//! [`DescriptorTable`] carved out of shader-visible heaps by whoever allocates them.
//! Binding a resource copies its CPU descriptor into the table slot
//! instead of switching heaps.

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

mod layout;
mod ranges;
mod table;

pub use crate::{layout::*, ranges::*, table::*};
