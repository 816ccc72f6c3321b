use strata_core::ColorRgba;

/// Values written by [`clear`](../struct.CommandBuffer.html#method.clear).
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde-1", derive(serde::Serialize, serde::Deserialize))]
pub struct ClearState {
    /// Color clear value.
    pub color: ColorRgba,

    /// Depth clear value.
    pub depth: f32,

    /// Stencil clear value.
    /// Only the low 8 bits reach the native call.
    pub stencil: u32,
}

impl ClearState {
    /// Stencil value as passed to native clears.
    pub fn native_stencil(&self) -> u8 {
        (self.stencil & 0xff) as u8
    }
}

impl Default for ClearState {
    fn default() -> Self {
        ClearState {
            color: [0.0, 0.0, 0.0, 0.0],
            depth: 1.0,
            stencil: 0,
        }
    }
}
