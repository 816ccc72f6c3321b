//! Immediate-context model.
//!
//! State set on the context stays in effect until overwritten.
//! There is no reset and hazards between usages are tracked by the driver.

use crate::{
    error::NativeError,
    handle::*,
    types::{ColorRgba, DepthStencilClearFlags, DxgiFormat, PrimitiveTopology, Scissor, ShaderStage, Viewport},
};

/// `ID3D11DeviceContext`
///
/// Per-stage entry points (`VSSetConstantBuffers`, `PSSetConstantBuffers`, ...)
/// are folded into single methods taking the stage.
pub trait DeviceContext {
    /// `RSSetViewports`
    fn rs_set_viewports(&mut self, viewports: &[Viewport]);

    /// `RSSetScissorRects`
    fn rs_set_scissor_rects(&mut self, rects: &[Scissor]);

    /// `RSSetState`
    fn rs_set_state(&mut self, state: StateObjectPtr);

    /// `ClearRenderTargetView`
    fn clear_render_target_view(&mut self, rtv: RenderTargetViewPtr, color: ColorRgba);

    /// `ClearDepthStencilView`
    fn clear_depth_stencil_view(
        &mut self,
        dsv: DepthStencilViewPtr,
        flags: DepthStencilClearFlags,
        depth: f32,
        stencil: u8,
    );

    /// `OMSetRenderTargets`
    fn om_set_render_targets(
        &mut self,
        rtvs: &[RenderTargetViewPtr],
        dsv: Option<DepthStencilViewPtr>,
    );

    /// `OMSetBlendState`
    fn om_set_blend_state(&mut self, state: StateObjectPtr, sample_mask: u32);

    /// `OMSetDepthStencilState`
    fn om_set_depth_stencil_state(&mut self, state: StateObjectPtr, stencil_ref: u32);

    /// `IASetVertexBuffers`
    fn ia_set_vertex_buffers(&mut self, start_slot: u32, bindings: &[VertexBinding]);

    /// `IASetIndexBuffer`
    fn ia_set_index_buffer(&mut self, binding: &IndexBinding);

    /// `IASetInputLayout`
    fn ia_set_input_layout(&mut self, layout: InputLayoutPtr);

    /// `IASetPrimitiveTopology`
    fn ia_set_primitive_topology(&mut self, topology: PrimitiveTopology);

    /// `VSSetShader`, `PSSetShader`, ...
    fn set_shader(&mut self, stage: ShaderStage, shader: ShaderPtr);

    /// `VSSetConstantBuffers`, `PSSetConstantBuffers`, ...
    fn set_constant_buffers(&mut self, stage: ShaderStage, start_slot: u32, buffers: &[BufferPtr]);

    /// `VSSetShaderResources`, `PSSetShaderResources`, ...
    fn set_shader_resources(
        &mut self,
        stage: ShaderStage,
        start_slot: u32,
        views: &[ShaderResourceViewPtr],
    );

    /// `VSSetSamplers`, `PSSetSamplers`, ...
    fn set_samplers(&mut self, stage: ShaderStage, start_slot: u32, samplers: &[SamplerStatePtr]);

    /// `CSSetUnorderedAccessViews`
    fn cs_set_unordered_access_views(&mut self, start_slot: u32, views: &[UnorderedAccessViewPtr]);

    /// `SOSetTargets`
    fn so_set_targets(&mut self, targets: &[StreamOutputBinding]);

    /// `Draw`
    fn draw(&mut self, vertex_count: u32, start_vertex: u32);

    /// `DrawInstanced`
    fn draw_instanced(
        &mut self,
        vertex_count_per_instance: u32,
        instance_count: u32,
        start_vertex: u32,
        start_instance: u32,
    );

    /// `DrawIndexed`
    fn draw_indexed(&mut self, index_count: u32, start_index: u32, base_vertex: i32);

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

    /// `Begin`
    fn begin(&mut self, query: QueryPtr);

    /// `End`
    fn end(&mut self, query: QueryPtr);

    /// `GetData` for 64 bit results.
    /// `Ok(None)` is `S_FALSE`: the result is not available yet.
    fn get_data(&mut self, query: QueryPtr) -> Result<Option<u64>, NativeError>;

    /// `SetPredication`
    fn set_predication(&mut self, predicate: Option<QueryPtr>, value: bool);

    /// `ResolveSubresource`
    fn resolve_subresource(
        &mut self,
        dst: ResourcePtr,
        dst_subresource: u32,
        src: ResourcePtr,
        src_subresource: u32,
        format: DxgiFormat,
    );
}

/// `IDXGISwapChain` part used by the render context.
pub trait SwapChain {
    /// `Present`
    fn present(&mut self, sync_interval: u32) -> Result<(), NativeError>;
}
