use crate::{
    handle::*,
    native::{d3d11, d3d12},
    NativeView,
};

/// Native API generation enumerator.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde-1", derive(serde::Serialize, serde::Deserialize))]
pub enum BackendKind {
    /// Direct3D 11 immediate context.
    Dx11,

    /// Direct3D 12 explicit command lists.
    Dx12,
}

impl BackendKind {
    /// Check which backend is it.
    pub fn which<B: Backend>() -> Self {
        B::KIND
    }
}

impl std::fmt::Display for BackendKind {
    fn fmt(&self, fmt: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        fmt.write_str(match self {
            BackendKind::Dx11 => "dx11",
            BackendKind::Dx12 => "dx12",
        })
    }
}

/// Unknown backend errors.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParseBackendError(String);

impl std::fmt::Display for ParseBackendError {
    fn fmt(&self, fmt: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(fmt, "Unknown backend \"{}\"", self.0)
    }
}

impl std::error::Error for ParseBackendError {}

impl std::str::FromStr for BackendKind {
    type Err = ParseBackendError;

    fn from_str(string: &str) -> Result<Self, ParseBackendError> {
        match string {
            "Dx11" | "dx11" => Ok(BackendKind::Dx11),
            "Dx12" | "dx12" => Ok(BackendKind::Dx12),
            _ => Err(ParseBackendError(string.to_string())),
        }
    }
}

/// Set of view types a native API generation uses to bind resources.
///
/// Resources, render contexts and command buffers are generic over it,
/// so views of one generation can't be passed to the other.
pub trait Backend: Copy + std::fmt::Debug + Eq + std::hash::Hash + Send + Sync + 'static {
    /// Which API generation this is.
    const KIND: BackendKind;

    /// Native object commands are recorded into.
    type Recorder: ?Sized;

    /// View of a vertex buffer.
    type VertexBufferView: NativeView;

    /// View of an index buffer.
    type IndexBufferView: NativeView;

    /// View of a constant buffer.
    type ConstantBufferView: NativeView;

    /// View of a storage (read-write structured) buffer.
    type StorageBufferView: NativeView;

    /// View of a stream output target.
    type StreamOutputView: NativeView;

    /// Shader resource view of a texture.
    type TextureView: NativeView;

    /// Sampler.
    type SamplerView: NativeView;

    /// Render target view.
    type RenderTargetView: NativeView;

    /// Depth-stencil view.
    type DepthStencilView: NativeView;

    /// Query or predicate.
    type QueryView: NativeView;
}

/// Direct3D 11 marker.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Dx11 {}

impl Backend for Dx11 {
    const KIND: BackendKind = BackendKind::Dx11;
    type Recorder = dyn d3d11::DeviceContext;
    type VertexBufferView = VertexBinding;
    type IndexBufferView = IndexBinding;
    type ConstantBufferView = BufferPtr;
    type StorageBufferView = UnorderedAccessViewPtr;
    type StreamOutputView = StreamOutputBinding;
    type TextureView = ShaderResourceViewPtr;
    type SamplerView = SamplerStatePtr;
    type RenderTargetView = RenderTargetViewPtr;
    type DepthStencilView = DepthStencilViewPtr;
    type QueryView = QueryPtr;
}

/// Direct3D 12 marker.
///
/// Everything bound through descriptor tables is represented by
/// the CPU descriptor that gets copied into the table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Dx12 {}

impl Backend for Dx12 {
    const KIND: BackendKind = BackendKind::Dx12;
    type Recorder = dyn d3d12::GraphicsCommandList;
    type VertexBufferView = VertexBufferView;
    type IndexBufferView = IndexBufferView;
    type ConstantBufferView = CpuDescriptorHandle;
    type StorageBufferView = CpuDescriptorHandle;
    type StreamOutputView = StreamOutputBufferView;
    type TextureView = CpuDescriptorHandle;
    type SamplerView = CpuDescriptorHandle;
    type RenderTargetView = CpuDescriptorHandle;
    type DepthStencilView = CpuDescriptorHandle;
    type QueryView = QueryHeapPtr;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_backend_kind() {
        assert_eq!("dx11".parse(), Ok(BackendKind::Dx11));
        assert_eq!("Dx12".parse(), Ok(BackendKind::Dx12));
        assert!("vulkan".parse::<BackendKind>().is_err());
        assert_eq!(BackendKind::which::<Dx12>().to_string(), "dx12");
    }
}
