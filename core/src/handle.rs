//! Opaque handles of native objects.
//!
//! Handles don't own the objects they refer to.
//! Whoever created the object keeps it alive for as long as handles to it are in use.

use crate::types::{DxgiFormat, IndexFormat};

/// Value that refers to a native view or object and can be null.
pub trait NativeView: Copy + std::fmt::Debug + PartialEq + 'static {
    /// Check if value refers to nothing.
    fn is_null(&self) -> bool;
}

macro_rules! native_handle {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
        #[repr(transparent)]
        pub struct $name(u64);

        impl $name {
            /// Null handle.
            pub const NULL: Self = $name(0);

            /// Wrap raw pointer value.
            pub const fn from_raw(raw: u64) -> Self {
                $name(raw)
            }

            /// Get raw pointer value.
            pub const fn raw(&self) -> u64 {
                self.0
            }
        }

        impl NativeView for $name {
            fn is_null(&self) -> bool {
                self.0 == 0
            }
        }
    };
}

native_handle!(
    /// `ID3D12Resource` / `ID3D11Resource`.
    ResourcePtr
);
native_handle!(
    /// `ID3D12DescriptorHeap`.
    DescriptorHeapPtr
);
native_handle!(
    /// `ID3D12RootSignature`.
    RootSignaturePtr
);
native_handle!(
    /// `ID3D12PipelineState`.
    PipelineStatePtr
);
native_handle!(
    /// `ID3D12CommandAllocator`.
    CommandAllocatorPtr
);
native_handle!(
    /// `ID3D12QueryHeap`.
    QueryHeapPtr
);
native_handle!(
    /// `ID3D11Buffer`.
    BufferPtr
);
native_handle!(
    /// `ID3D11ShaderResourceView`.
    ShaderResourceViewPtr
);
native_handle!(
    /// `ID3D11UnorderedAccessView`.
    UnorderedAccessViewPtr
);
native_handle!(
    /// `ID3D11SamplerState`.
    SamplerStatePtr
);
native_handle!(
    /// `ID3D11RenderTargetView`.
    RenderTargetViewPtr
);
native_handle!(
    /// `ID3D11DepthStencilView`.
    DepthStencilViewPtr
);
native_handle!(
    /// `ID3D11InputLayout`.
    InputLayoutPtr
);
native_handle!(
    /// Any `ID3D11*Shader`.
    ShaderPtr
);
native_handle!(
    /// `ID3D11RasterizerState`, `ID3D11BlendState` or `ID3D11DepthStencilState`.
    StateObjectPtr
);
native_handle!(
    /// `ID3D11Query` / `ID3D11Predicate`.
    QueryPtr
);

/// `D3D12_CPU_DESCRIPTOR_HANDLE`
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CpuDescriptorHandle {
    /// Address of the descriptor.
    pub ptr: usize,
}

impl CpuDescriptorHandle {
    /// Handle of the descriptor `index` places after this one
    /// in a heap with `increment` bytes between descriptors.
    pub fn offset(self, index: u32, increment: u32) -> Self {
        CpuDescriptorHandle {
            ptr: self.ptr + index as usize * increment as usize,
        }
    }
}

impl NativeView for CpuDescriptorHandle {
    fn is_null(&self) -> bool {
        self.ptr == 0
    }
}

/// `D3D12_GPU_DESCRIPTOR_HANDLE`
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GpuDescriptorHandle {
    /// Address of the descriptor.
    pub ptr: u64,
}

impl GpuDescriptorHandle {
    /// Handle of the descriptor `index` places after this one
    /// in a heap with `increment` bytes between descriptors.
    pub fn offset(self, index: u32, increment: u32) -> Self {
        GpuDescriptorHandle {
            ptr: self.ptr + u64::from(index) * u64::from(increment),
        }
    }
}

impl NativeView for GpuDescriptorHandle {
    fn is_null(&self) -> bool {
        self.ptr == 0
    }
}

/// `D3D12_VERTEX_BUFFER_VIEW`
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct VertexBufferView {
    /// GPU virtual address of the buffer.
    pub buffer_location: u64,
    /// Size of the view.
    pub size_in_bytes: u32,
    /// Size of one vertex.
    pub stride_in_bytes: u32,
}

impl NativeView for VertexBufferView {
    fn is_null(&self) -> bool {
        self.buffer_location == 0
    }
}

/// `D3D12_INDEX_BUFFER_VIEW`
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct IndexBufferView {
    /// GPU virtual address of the buffer.
    pub buffer_location: u64,
    /// Size of the view.
    pub size_in_bytes: u32,
    /// Index format.
    pub format: IndexFormat,
}

impl NativeView for IndexBufferView {
    fn is_null(&self) -> bool {
        self.buffer_location == 0
    }
}

/// `D3D12_STREAM_OUTPUT_BUFFER_VIEW`
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct StreamOutputBufferView {
    /// GPU virtual address of the buffer.
    pub buffer_location: u64,
    /// Size of the view.
    pub size_in_bytes: u64,
    /// GPU virtual address of the filled size counter.
    pub buffer_filled_size_location: u64,
}

impl NativeView for StreamOutputBufferView {
    fn is_null(&self) -> bool {
        self.buffer_location == 0
    }
}

/// Vertex buffer binding of the immediate context:
/// buffer with stride and offset.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct VertexBinding {
    /// Buffer.
    pub buffer: BufferPtr,
    /// Size of one vertex.
    pub stride: u32,
    /// Offset of the first vertex.
    pub offset: u32,
}

impl NativeView for VertexBinding {
    fn is_null(&self) -> bool {
        self.buffer.is_null()
    }
}

/// Index buffer binding of the immediate context.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct IndexBinding {
    /// Buffer.
    pub buffer: BufferPtr,
    /// Index format.
    pub format: IndexFormat,
    /// Offset of the first index.
    pub offset: u32,
}

impl NativeView for IndexBinding {
    fn is_null(&self) -> bool {
        self.buffer.is_null()
    }
}

/// Stream output target of the immediate context.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct StreamOutputBinding {
    /// Buffer.
    pub buffer: BufferPtr,
    /// Offset to start writing at.
    pub offset: u32,
}

impl NativeView for StreamOutputBinding {
    fn is_null(&self) -> bool {
        self.buffer.is_null()
    }
}

/// Multisampled surface and the format used to resolve it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ResolveTarget {
    /// Multisampled resource.
    pub resource: ResourcePtr,
    /// Format used to resolve.
    pub format: DxgiFormat,
}
