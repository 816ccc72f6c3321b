//! Command buffers with one recording surface over two native submission models.
//!
//! [`CommandBuffer`] checks lifecycle state, resource kinds and feature support,
//! then hands every command to a [`RawCommandBuffer`] translator.
//! [`impls::dx12`] records into explicit command lists,
//! [`impls::dx11`] into immediate device contexts.

#![forbid(overflowing_literals)]
#![deny(missing_copy_implementations)]
#![deny(missing_debug_implementations)]
#![deny(missing_docs)]
#![deny(path_statements)]
#![deny(trivial_bounds)]
#![deny(type_alias_bounds)]
#![deny(unconditional_recursion)]
#![deny(while_true)]
// #![deny(unused)]
#![deny(bad_style)]
#![deny(future_incompatible)]
#![warn(rust_2018_compatibility)]
#![warn(rust_2018_idioms)]

mod buffer;
mod capability;
mod config;
mod encoder;
mod error;
mod persistent;
mod pool;
mod raw;

pub mod impls;

#[cfg(test)]
mod test;

pub use crate::{
    buffer::{CommandBuffer, RenderTargetBinding, State},
    capability::{Feature, Features},
    config::{ApiDependentState, Direct3D12State},
    encoder::{ClearState, DispatchCommand, DrawCommand, DrawIndexedCommand},
    error::{CommandError, ContractViolation},
    persistent::PersistentState,
    pool::{CommandPool, CommandPoolConfig, MAX_FRAMES_IN_FLIGHT},
    raw::RawCommandBuffer,
};
