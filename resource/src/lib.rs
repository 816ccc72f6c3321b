//! This crate provides backend-tagged resource handles and the objects bound to command buffers:
//! view aggregates, pipelines, queries and offscreen render targets.
//!
//! Nothing here owns native objects.
//! Handles are produced by whoever creates the resources
//! and must outlive every value built from them.

#![forbid(overflowing_literals)]
#![warn(missing_copy_implementations)]
#![warn(missing_debug_implementations)]
#![warn(missing_docs)]
#![warn(path_statements)]
#![warn(trivial_bounds)]
#![warn(type_alias_bounds)]
#![warn(unconditional_recursion)]
#![warn(while_true)]
#![warn(unused)]
#![warn(bad_style)]
#![warn(future_incompatible)]
#![warn(rust_2018_compatibility)]
#![warn(rust_2018_idioms)]

mod array;
mod error;
mod resources;

pub mod pipeline;
pub mod query;
pub mod target;

pub use crate::{
    array::{ResourceArray, ViewArray},
    error::*,
    query::Query,
    resources::{Resource, ResourceKind},
    target::RenderTarget,
};
