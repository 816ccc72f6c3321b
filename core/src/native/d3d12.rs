//! Explicit command-list model.
//!
//! Recording objects start open after creation, must be closed before submission
//! and lose every piece of pipeline state when reset.

use crate::{
    error::NativeError,
    handle::*,
    types::{ColorRgba, DepthStencilClearFlags, DxgiFormat, PrimitiveTopology, ResourceState, Scissor, Viewport},
};

/// `D3D12_DESCRIPTOR_HEAP_TYPE`
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DescriptorHeapType {
    /// Constant buffer, shader resource and unordered access views.
    CbvSrvUav,
    /// Samplers.
    Sampler,
    /// Render target views.
    Rtv,
    /// Depth stencil views.
    Dsv,
}

/// `D3D12_RESOURCE_TRANSITION_BARRIER`
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TransitionBarrier {
    /// Resource changing state.
    pub resource: ResourcePtr,
    /// Subresource index or [`ALL_SUBRESOURCES`](#associatedconstant.ALL_SUBRESOURCES).
    pub subresource: u32,
    /// State before the barrier.
    pub before: ResourceState,
    /// State after the barrier.
    pub after: ResourceState,
}

impl TransitionBarrier {
    /// `D3D12_RESOURCE_BARRIER_ALL_SUBRESOURCES`
    pub const ALL_SUBRESOURCES: u32 = 0xffff_ffff;

    /// Transition of all subresources.
    pub fn new(resource: ResourcePtr, before: ResourceState, after: ResourceState) -> Self {
        TransitionBarrier {
            resource,
            subresource: Self::ALL_SUBRESOURCES,
            before,
            after,
        }
    }
}

/// `ID3D12Device` part used to create recording objects and copy descriptors.
pub trait Device {
    /// Recording object created by this device.
    type CommandList: GraphicsCommandList + 'static;

    /// `CreateCommandAllocator` for direct command lists.
    fn create_command_allocator(&self) -> Result<CommandAllocatorPtr, NativeError>;

    /// `CreateCommandList` for direct command lists.
    /// Returned list is open for recording.
    fn create_command_list(
        &self,
        allocator: CommandAllocatorPtr,
        initial: Option<PipelineStatePtr>,
    ) -> Result<Self::CommandList, NativeError>;

    /// `GetDescriptorHandleIncrementSize`
    fn descriptor_handle_increment_size(&self, heap_type: DescriptorHeapType) -> u32;

    /// `CopyDescriptorsSimple`
    fn copy_descriptors_simple(
        &self,
        count: u32,
        dst: CpuDescriptorHandle,
        src: CpuDescriptorHandle,
        heap_type: DescriptorHeapType,
    );
}

/// `ID3D12GraphicsCommandList`
pub trait GraphicsCommandList {
    /// `Reset`
    fn reset(
        &mut self,
        allocator: CommandAllocatorPtr,
        initial: Option<PipelineStatePtr>,
    ) -> Result<(), NativeError>;

    /// `Close`
    fn close(&mut self) -> Result<(), NativeError>;

    /// `RSSetViewports`
    fn rs_set_viewports(&mut self, viewports: &[Viewport]);

    /// `RSSetScissorRects`
    fn rs_set_scissor_rects(&mut self, rects: &[Scissor]);

    /// `ClearRenderTargetView`
    fn clear_render_target_view(&mut self, rtv: CpuDescriptorHandle, color: ColorRgba);

    /// `ClearDepthStencilView`
    fn clear_depth_stencil_view(
        &mut self,
        dsv: CpuDescriptorHandle,
        flags: DepthStencilClearFlags,
        depth: f32,
        stencil: u8,
    );

    /// `OMSetRenderTargets`
    fn om_set_render_targets(
        &mut self,
        rtvs: &[CpuDescriptorHandle],
        dsv: Option<CpuDescriptorHandle>,
    );

    /// `IASetVertexBuffers`
    fn ia_set_vertex_buffers(&mut self, start_slot: u32, views: &[VertexBufferView]);

    /// `IASetIndexBuffer`
    fn ia_set_index_buffer(&mut self, view: &IndexBufferView);

    /// `IASetPrimitiveTopology`
    fn ia_set_primitive_topology(&mut self, topology: PrimitiveTopology);

    /// `SetDescriptorHeaps`
    fn set_descriptor_heaps(&mut self, heaps: &[DescriptorHeapPtr]);

    /// `SetGraphicsRootSignature`
    fn set_graphics_root_signature(&mut self, root_signature: RootSignaturePtr);

    /// `SetComputeRootSignature`
    fn set_compute_root_signature(&mut self, root_signature: RootSignaturePtr);

    /// `SetPipelineState`
    fn set_pipeline_state(&mut self, pipeline_state: PipelineStatePtr);

    /// `SetGraphicsRootDescriptorTable`
    fn set_graphics_root_descriptor_table(&mut self, parameter: u32, base: GpuDescriptorHandle);

    /// `SetComputeRootDescriptorTable`
    fn set_compute_root_descriptor_table(&mut self, parameter: u32, base: GpuDescriptorHandle);

    /// `ResourceBarrier` with transition barriers.
    /// Fails when the debug layer rejects the transition.
    fn resource_barrier(&mut self, barriers: &[TransitionBarrier]) -> Result<(), NativeError>;

    /// `ResolveSubresource`
    fn resolve_subresource(
        &mut self,
        dst: ResourcePtr,
        dst_subresource: u32,
        src: ResourcePtr,
        src_subresource: u32,
        format: DxgiFormat,
    );

    /// `DrawInstanced`
    fn draw_instanced(
        &mut self,
        vertex_count_per_instance: u32,
        instance_count: u32,
        start_vertex: u32,
        start_instance: u32,
    );

    /// `DrawIndexedInstanced`
    fn draw_indexed_instanced(
        &mut self,
        index_count_per_instance: u32,
        instance_count: u32,
        start_index: u32,
        base_vertex: i32,
        start_instance: u32,
    );

    /// `Dispatch`
    fn dispatch(&mut self, x: u32, y: u32, z: u32);
}

/// `IDXGISwapChain3` part used by the render context.
pub trait SwapChain {
    /// Number of back buffers.
    fn buffer_count(&self) -> u32;

    /// `GetCurrentBackBufferIndex`
    fn current_back_buffer_index(&self) -> u32;

    /// `GetBuffer`
    fn back_buffer(&self, index: u32) -> Result<ResourcePtr, NativeError>;

    /// `Present`
    fn present(&mut self, sync_interval: u32) -> Result<(), NativeError>;
}
