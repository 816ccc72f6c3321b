//! Native submission objects.
//!
//! Each trait mirrors the part of a Direct3D interface strata records through.
//! Method names follow the native ones so translated call sequences can be
//! read side by side with the native API documentation.

pub mod d3d11;
pub mod d3d12;

use crate::error::NativeError;

/// GPU timeline fence.
///
/// Signaled by the queue side when submitted work completes.
pub trait Fence {
    /// Last value the GPU has signaled.
    fn completed_value(&self) -> u64;

    /// Block until the fence reaches `value`.
    fn wait(&mut self, value: u64) -> Result<(), NativeError>;
}

impl<'a, F> Fence for &'a mut F
where
    F: Fence + ?Sized,
{
    fn completed_value(&self) -> u64 {
        F::completed_value(&**self)
    }

    fn wait(&mut self, value: u64) -> Result<(), NativeError> {
        F::wait(&mut **self, value)
    }
}
