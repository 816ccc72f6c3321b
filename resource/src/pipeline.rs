//! Pipeline objects built by external collaborators and bound by command buffers.

use {
    strata_core::{
        handle::{InputLayoutPtr, PipelineStatePtr, RootSignaturePtr, ShaderPtr, StateObjectPtr},
        PrimitiveTopology, ShaderStage,
    },
    strata_descriptor::DescriptorTable,
};

/// Graphics pipeline of the explicit model.
///
/// Root signature, pipeline state and topology are always bound together.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Dx12GraphicsPipeline {
    /// Root signature.
    pub root_signature: RootSignaturePtr,

    /// Pipeline state object.
    pub pipeline_state: PipelineStatePtr,

    /// Primitive topology.
    pub topology: PrimitiveTopology,

    /// Descriptor table for resources the pipeline reads, if it reads any.
    pub table: Option<DescriptorTable>,
}

/// Compute pipeline of the explicit model.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Dx12ComputePipeline {
    /// Root signature.
    pub root_signature: RootSignaturePtr,

    /// Pipeline state object.
    pub pipeline_state: PipelineStatePtr,

    /// Descriptor table for resources the pipeline reads, if it reads any.
    pub table: Option<DescriptorTable>,
}

/// Graphics pipeline of the immediate model.
///
/// State objects are set on the context one by one.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Dx11GraphicsPipeline {
    /// Input layout.
    pub input_layout: InputLayoutPtr,

    /// Shader per graphics stage, null when the stage is unused.
    pub shaders: [ShaderPtr; 5],

    /// Rasterizer state.
    pub rasterizer: StateObjectPtr,

    /// Blend state.
    pub blend: StateObjectPtr,

    /// Depth-stencil state.
    pub depth_stencil: StateObjectPtr,

    /// Stencil reference value used with the depth-stencil state.
    pub stencil_ref: u32,

    /// Primitive topology.
    pub topology: PrimitiveTopology,
}

impl Dx11GraphicsPipeline {
    /// Shader bound to a graphics `stage`.
    /// Always null for the compute stage.
    pub fn shader(&self, stage: ShaderStage) -> ShaderPtr {
        self.shaders
            .get(stage.index())
            .cloned()
            .unwrap_or(ShaderPtr::NULL)
    }
}

/// Compute pipeline of the immediate model.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Dx11ComputePipeline {
    /// Compute shader.
    pub shader: ShaderPtr,
}
