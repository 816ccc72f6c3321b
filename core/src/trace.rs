//! Native implementation that records calls instead of executing them.
//!
//! Every native object created here appends to a shared [`Trace`].
//! Used to test translation and to dump command streams while debugging.
//! Any call can be made to fail with [`Trace::fail`].

use {
    crate::{
        error::{HResult, NativeError},
        handle::*,
        native::{d3d11, d3d12, Fence},
        types::*,
    },
    parking_lot::Mutex,
    std::{collections::HashMap, sync::Arc},
};

/// Recorded explicit command-list model call.
#[derive(Clone, Debug, PartialEq)]
#[allow(missing_docs)]
pub enum Dx12Call {
    CreateCommandAllocator(CommandAllocatorPtr),
    CreateCommandList {
        allocator: CommandAllocatorPtr,
        initial: Option<PipelineStatePtr>,
    },
    CopyDescriptorsSimple {
        count: u32,
        dst: CpuDescriptorHandle,
        src: CpuDescriptorHandle,
        heap_type: d3d12::DescriptorHeapType,
    },
    Reset {
        allocator: CommandAllocatorPtr,
        initial: Option<PipelineStatePtr>,
    },
    Close,
    RsSetViewports(Vec<Viewport>),
    RsSetScissorRects(Vec<Scissor>),
    ClearRenderTargetView {
        rtv: CpuDescriptorHandle,
        color: ColorRgba,
    },
    ClearDepthStencilView {
        dsv: CpuDescriptorHandle,
        flags: DepthStencilClearFlags,
        depth: f32,
        stencil: u8,
    },
    OmSetRenderTargets {
        rtvs: Vec<CpuDescriptorHandle>,
        dsv: Option<CpuDescriptorHandle>,
    },
    IaSetVertexBuffers {
        start_slot: u32,
        views: Vec<VertexBufferView>,
    },
    IaSetIndexBuffer(IndexBufferView),
    IaSetPrimitiveTopology(PrimitiveTopology),
    SetDescriptorHeaps(Vec<DescriptorHeapPtr>),
    SetGraphicsRootSignature(RootSignaturePtr),
    SetComputeRootSignature(RootSignaturePtr),
    SetPipelineState(PipelineStatePtr),
    SetGraphicsRootDescriptorTable {
        parameter: u32,
        base: GpuDescriptorHandle,
    },
    SetComputeRootDescriptorTable {
        parameter: u32,
        base: GpuDescriptorHandle,
    },
    ResourceBarrier(Vec<d3d12::TransitionBarrier>),
    ResolveSubresource {
        dst: ResourcePtr,
        dst_subresource: u32,
        src: ResourcePtr,
        src_subresource: u32,
        format: DxgiFormat,
    },
    DrawInstanced {
        vertex_count_per_instance: u32,
        instance_count: u32,
        start_vertex: u32,
        start_instance: u32,
    },
    DrawIndexedInstanced {
        index_count_per_instance: u32,
        instance_count: u32,
        start_index: u32,
        base_vertex: i32,
        start_instance: u32,
    },
    Dispatch {
        x: u32,
        y: u32,
        z: u32,
    },
    Present {
        sync_interval: u32,
    },
}

/// Recorded immediate-context model call.
#[derive(Clone, Debug, PartialEq)]
#[allow(missing_docs)]
pub enum Dx11Call {
    RsSetViewports(Vec<Viewport>),
    RsSetScissorRects(Vec<Scissor>),
    RsSetState(StateObjectPtr),
    ClearRenderTargetView {
        rtv: RenderTargetViewPtr,
        color: ColorRgba,
    },
    ClearDepthStencilView {
        dsv: DepthStencilViewPtr,
        flags: DepthStencilClearFlags,
        depth: f32,
        stencil: u8,
    },
    OmSetRenderTargets {
        rtvs: Vec<RenderTargetViewPtr>,
        dsv: Option<DepthStencilViewPtr>,
    },
    OmSetBlendState {
        state: StateObjectPtr,
        sample_mask: u32,
    },
    OmSetDepthStencilState {
        state: StateObjectPtr,
        stencil_ref: u32,
    },
    IaSetVertexBuffers {
        start_slot: u32,
        bindings: Vec<VertexBinding>,
    },
    IaSetIndexBuffer(IndexBinding),
    IaSetInputLayout(InputLayoutPtr),
    IaSetPrimitiveTopology(PrimitiveTopology),
    SetShader {
        stage: ShaderStage,
        shader: ShaderPtr,
    },
    SetConstantBuffers {
        stage: ShaderStage,
        start_slot: u32,
        buffers: Vec<BufferPtr>,
    },
    SetShaderResources {
        stage: ShaderStage,
        start_slot: u32,
        views: Vec<ShaderResourceViewPtr>,
    },
    SetSamplers {
        stage: ShaderStage,
        start_slot: u32,
        samplers: Vec<SamplerStatePtr>,
    },
    CsSetUnorderedAccessViews {
        start_slot: u32,
        views: Vec<UnorderedAccessViewPtr>,
    },
    SoSetTargets(Vec<StreamOutputBinding>),
    Draw {
        vertex_count: u32,
        start_vertex: u32,
    },
    DrawInstanced {
        vertex_count_per_instance: u32,
        instance_count: u32,
        start_vertex: u32,
        start_instance: u32,
    },
    DrawIndexed {
        index_count: u32,
        start_index: u32,
        base_vertex: i32,
    },
    DrawIndexedInstanced {
        index_count_per_instance: u32,
        instance_count: u32,
        start_index: u32,
        base_vertex: i32,
        start_instance: u32,
    },
    Dispatch {
        x: u32,
        y: u32,
        z: u32,
    },
    Begin(QueryPtr),
    End(QueryPtr),
    GetData(QueryPtr),
    SetPredication {
        predicate: Option<QueryPtr>,
        value: bool,
    },
    ResolveSubresource {
        dst: ResourcePtr,
        dst_subresource: u32,
        src: ResourcePtr,
        src_subresource: u32,
        format: DxgiFormat,
    },
    Present {
        sync_interval: u32,
    },
}

#[derive(Debug)]
struct TraceLog<C> {
    calls: Vec<C>,
    failures: HashMap<&'static str, HResult>,
    query_results: HashMap<QueryPtr, u64>,
    next_handle: u64,
}

/// Shared log of recorded native calls.
///
/// Clones refer to the same log.
#[derive(Debug)]
pub struct Trace<C> {
    log: Arc<Mutex<TraceLog<C>>>,
}

impl<C> Clone for Trace<C> {
    fn clone(&self) -> Self {
        Trace {
            log: self.log.clone(),
        }
    }
}

impl<C> Default for Trace<C> {
    fn default() -> Self {
        Trace {
            log: Arc::new(Mutex::new(TraceLog {
                calls: Vec::new(),
                failures: HashMap::new(),
                query_results: HashMap::new(),
                next_handle: 0x1000,
            })),
        }
    }
}

impl<C> Trace<C>
where
    C: Clone,
{
    /// Create empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of all calls recorded so far.
    pub fn calls(&self) -> Vec<C> {
        self.log.lock().calls.clone()
    }

    /// Take all calls recorded so far, leaving the log empty.
    pub fn take(&self) -> Vec<C> {
        std::mem::replace(&mut self.log.lock().calls, Vec::new())
    }

    /// Forget recorded calls.
    pub fn clear(&self) {
        self.log.lock().calls.clear();
    }

    /// Number of recorded calls.
    pub fn len(&self) -> usize {
        self.log.lock().calls.len()
    }

    /// Check if nothing was recorded.
    pub fn is_empty(&self) -> bool {
        self.log.lock().calls.is_empty()
    }

    /// Make every following call named `call` fail with `code`.
    pub fn fail(&self, call: &'static str, code: HResult) {
        self.log.lock().failures.insert(call, code);
    }

    /// Let call named `call` succeed again.
    pub fn heal(&self, call: &'static str) {
        self.log.lock().failures.remove(call);
    }

    /// Make the result of `query` available.
    pub fn set_query_result(&self, query: QueryPtr, value: u64) {
        self.log.lock().query_results.insert(query, value);
    }

    fn record(&self, call: C) {
        self.log.lock().calls.push(call);
    }

    fn check(&self, call: &'static str) -> Result<(), NativeError> {
        let code = self.log.lock().failures.get(call).cloned();
        match code {
            Some(code) => NativeError::check(call, code),
            None => Ok(()),
        }
    }

    fn next_handle(&self) -> u64 {
        let mut log = self.log.lock();
        log.next_handle += 1;
        log.next_handle
    }

    fn query_result(&self, query: QueryPtr) -> Option<u64> {
        self.log.lock().query_results.get(&query).cloned()
    }
}

/// Device that creates [`TraceCommandList`]s.
#[derive(Clone, Debug)]
pub struct TraceDevice {
    trace: Trace<Dx12Call>,
}

impl TraceDevice {
    /// Distance between RTV and DSV descriptors.
    pub const RTV_INCREMENT: u32 = 32;
    /// Distance between CBV, SRV and UAV descriptors.
    pub const CBV_SRV_UAV_INCREMENT: u32 = 64;
    /// Distance between sampler descriptors.
    pub const SAMPLER_INCREMENT: u32 = 16;

    /// Create device recording into `trace`.
    pub fn new(trace: &Trace<Dx12Call>) -> Self {
        TraceDevice {
            trace: trace.clone(),
        }
    }

    /// Log this device records into.
    pub fn trace(&self) -> &Trace<Dx12Call> {
        &self.trace
    }
}

impl d3d12::Device for TraceDevice {
    type CommandList = TraceCommandList;

    fn create_command_allocator(&self) -> Result<CommandAllocatorPtr, NativeError> {
        self.trace.check("CreateCommandAllocator")?;
        let allocator = CommandAllocatorPtr::from_raw(self.trace.next_handle());
        self.trace
            .record(Dx12Call::CreateCommandAllocator(allocator));
        Ok(allocator)
    }

    fn create_command_list(
        &self,
        allocator: CommandAllocatorPtr,
        initial: Option<PipelineStatePtr>,
    ) -> Result<TraceCommandList, NativeError> {
        self.trace.check("CreateCommandList")?;
        self.trace
            .record(Dx12Call::CreateCommandList { allocator, initial });
        Ok(TraceCommandList {
            trace: self.trace.clone(),
            open: true,
        })
    }

    fn descriptor_handle_increment_size(&self, heap_type: d3d12::DescriptorHeapType) -> u32 {
        match heap_type {
            d3d12::DescriptorHeapType::CbvSrvUav => Self::CBV_SRV_UAV_INCREMENT,
            d3d12::DescriptorHeapType::Sampler => Self::SAMPLER_INCREMENT,
            d3d12::DescriptorHeapType::Rtv | d3d12::DescriptorHeapType::Dsv => {
                Self::RTV_INCREMENT
            }
        }
    }

    fn copy_descriptors_simple(
        &self,
        count: u32,
        dst: CpuDescriptorHandle,
        src: CpuDescriptorHandle,
        heap_type: d3d12::DescriptorHeapType,
    ) {
        self.trace.record(Dx12Call::CopyDescriptorsSimple {
            count,
            dst,
            src,
            heap_type,
        });
    }
}

/// Command list recording into a [`Trace`].
///
/// Mimics the native open/closed rule:
/// `Reset` fails on an open list and `Close` fails on a closed one.
#[derive(Debug)]
pub struct TraceCommandList {
    trace: Trace<Dx12Call>,
    open: bool,
}

impl TraceCommandList {
    /// Check if list is open for recording.
    pub fn is_open(&self) -> bool {
        self.open
    }
}

impl d3d12::GraphicsCommandList for TraceCommandList {
    fn reset(
        &mut self,
        allocator: CommandAllocatorPtr,
        initial: Option<PipelineStatePtr>,
    ) -> Result<(), NativeError> {
        self.trace.record(Dx12Call::Reset { allocator, initial });
        self.trace.check("Reset")?;
        if self.open {
            return Err(NativeError::new("Reset", HResult::FAIL));
        }
        self.open = true;
        Ok(())
    }

    fn close(&mut self) -> Result<(), NativeError> {
        self.trace.record(Dx12Call::Close);
        self.trace.check("Close")?;
        if !self.open {
            return Err(NativeError::new("Close", HResult::FAIL));
        }
        self.open = false;
        Ok(())
    }

    fn rs_set_viewports(&mut self, viewports: &[Viewport]) {
        self.trace.record(Dx12Call::RsSetViewports(viewports.to_vec()));
    }

    fn rs_set_scissor_rects(&mut self, rects: &[Scissor]) {
        self.trace.record(Dx12Call::RsSetScissorRects(rects.to_vec()));
    }

    fn clear_render_target_view(&mut self, rtv: CpuDescriptorHandle, color: ColorRgba) {
        self.trace
            .record(Dx12Call::ClearRenderTargetView { rtv, color });
    }

    fn clear_depth_stencil_view(
        &mut self,
        dsv: CpuDescriptorHandle,
        flags: DepthStencilClearFlags,
        depth: f32,
        stencil: u8,
    ) {
        self.trace.record(Dx12Call::ClearDepthStencilView {
            dsv,
            flags,
            depth,
            stencil,
        });
    }

    fn om_set_render_targets(
        &mut self,
        rtvs: &[CpuDescriptorHandle],
        dsv: Option<CpuDescriptorHandle>,
    ) {
        self.trace.record(Dx12Call::OmSetRenderTargets {
            rtvs: rtvs.to_vec(),
            dsv,
        });
    }

    fn ia_set_vertex_buffers(&mut self, start_slot: u32, views: &[VertexBufferView]) {
        self.trace.record(Dx12Call::IaSetVertexBuffers {
            start_slot,
            views: views.to_vec(),
        });
    }

    fn ia_set_index_buffer(&mut self, view: &IndexBufferView) {
        self.trace.record(Dx12Call::IaSetIndexBuffer(*view));
    }

    fn ia_set_primitive_topology(&mut self, topology: PrimitiveTopology) {
        self.trace
            .record(Dx12Call::IaSetPrimitiveTopology(topology));
    }

    fn set_descriptor_heaps(&mut self, heaps: &[DescriptorHeapPtr]) {
        self.trace
            .record(Dx12Call::SetDescriptorHeaps(heaps.to_vec()));
    }

    fn set_graphics_root_signature(&mut self, root_signature: RootSignaturePtr) {
        self.trace
            .record(Dx12Call::SetGraphicsRootSignature(root_signature));
    }

    fn set_compute_root_signature(&mut self, root_signature: RootSignaturePtr) {
        self.trace
            .record(Dx12Call::SetComputeRootSignature(root_signature));
    }

    fn set_pipeline_state(&mut self, pipeline_state: PipelineStatePtr) {
        self.trace
            .record(Dx12Call::SetPipelineState(pipeline_state));
    }

    fn set_graphics_root_descriptor_table(&mut self, parameter: u32, base: GpuDescriptorHandle) {
        self.trace
            .record(Dx12Call::SetGraphicsRootDescriptorTable { parameter, base });
    }

    fn set_compute_root_descriptor_table(&mut self, parameter: u32, base: GpuDescriptorHandle) {
        self.trace
            .record(Dx12Call::SetComputeRootDescriptorTable { parameter, base });
    }

    fn resource_barrier(
        &mut self,
        barriers: &[d3d12::TransitionBarrier],
    ) -> Result<(), NativeError> {
        self.trace.check("ResourceBarrier")?;
        self.trace
            .record(Dx12Call::ResourceBarrier(barriers.to_vec()));
        Ok(())
    }

    fn resolve_subresource(
        &mut self,
        dst: ResourcePtr,
        dst_subresource: u32,
        src: ResourcePtr,
        src_subresource: u32,
        format: DxgiFormat,
    ) {
        self.trace.record(Dx12Call::ResolveSubresource {
            dst,
            dst_subresource,
            src,
            src_subresource,
            format,
        });
    }

    fn draw_instanced(
        &mut self,
        vertex_count_per_instance: u32,
        instance_count: u32,
        start_vertex: u32,
        start_instance: u32,
    ) {
        self.trace.record(Dx12Call::DrawInstanced {
            vertex_count_per_instance,
            instance_count,
            start_vertex,
            start_instance,
        });
    }

    fn draw_indexed_instanced(
        &mut self,
        index_count_per_instance: u32,
        instance_count: u32,
        start_index: u32,
        base_vertex: i32,
        start_instance: u32,
    ) {
        self.trace.record(Dx12Call::DrawIndexedInstanced {
            index_count_per_instance,
            instance_count,
            start_index,
            base_vertex,
            start_instance,
        });
    }

    fn dispatch(&mut self, x: u32, y: u32, z: u32) {
        self.trace.record(Dx12Call::Dispatch { x, y, z });
    }
}

/// Immediate context recording into a [`Trace`].
#[derive(Clone, Debug)]
pub struct TraceContext {
    trace: Trace<Dx11Call>,
}

impl TraceContext {
    /// Create context recording into `trace`.
    pub fn new(trace: &Trace<Dx11Call>) -> Self {
        TraceContext {
            trace: trace.clone(),
        }
    }
}

impl d3d11::DeviceContext for TraceContext {
    fn rs_set_viewports(&mut self, viewports: &[Viewport]) {
        self.trace.record(Dx11Call::RsSetViewports(viewports.to_vec()));
    }

    fn rs_set_scissor_rects(&mut self, rects: &[Scissor]) {
        self.trace.record(Dx11Call::RsSetScissorRects(rects.to_vec()));
    }

    fn rs_set_state(&mut self, state: StateObjectPtr) {
        self.trace.record(Dx11Call::RsSetState(state));
    }

    fn clear_render_target_view(&mut self, rtv: RenderTargetViewPtr, color: ColorRgba) {
        self.trace
            .record(Dx11Call::ClearRenderTargetView { rtv, color });
    }

    fn clear_depth_stencil_view(
        &mut self,
        dsv: DepthStencilViewPtr,
        flags: DepthStencilClearFlags,
        depth: f32,
        stencil: u8,
    ) {
        self.trace.record(Dx11Call::ClearDepthStencilView {
            dsv,
            flags,
            depth,
            stencil,
        });
    }

    fn om_set_render_targets(
        &mut self,
        rtvs: &[RenderTargetViewPtr],
        dsv: Option<DepthStencilViewPtr>,
    ) {
        self.trace.record(Dx11Call::OmSetRenderTargets {
            rtvs: rtvs.to_vec(),
            dsv,
        });
    }

    fn om_set_blend_state(&mut self, state: StateObjectPtr, sample_mask: u32) {
        self.trace
            .record(Dx11Call::OmSetBlendState { state, sample_mask });
    }

    fn om_set_depth_stencil_state(&mut self, state: StateObjectPtr, stencil_ref: u32) {
        self.trace
            .record(Dx11Call::OmSetDepthStencilState { state, stencil_ref });
    }

    fn ia_set_vertex_buffers(&mut self, start_slot: u32, bindings: &[VertexBinding]) {
        self.trace.record(Dx11Call::IaSetVertexBuffers {
            start_slot,
            bindings: bindings.to_vec(),
        });
    }

    fn ia_set_index_buffer(&mut self, binding: &IndexBinding) {
        self.trace.record(Dx11Call::IaSetIndexBuffer(*binding));
    }

    fn ia_set_input_layout(&mut self, layout: InputLayoutPtr) {
        self.trace.record(Dx11Call::IaSetInputLayout(layout));
    }

    fn ia_set_primitive_topology(&mut self, topology: PrimitiveTopology) {
        self.trace
            .record(Dx11Call::IaSetPrimitiveTopology(topology));
    }

    fn set_shader(&mut self, stage: ShaderStage, shader: ShaderPtr) {
        self.trace.record(Dx11Call::SetShader { stage, shader });
    }

    fn set_constant_buffers(&mut self, stage: ShaderStage, start_slot: u32, buffers: &[BufferPtr]) {
        self.trace.record(Dx11Call::SetConstantBuffers {
            stage,
            start_slot,
            buffers: buffers.to_vec(),
        });
    }

    fn set_shader_resources(
        &mut self,
        stage: ShaderStage,
        start_slot: u32,
        views: &[ShaderResourceViewPtr],
    ) {
        self.trace.record(Dx11Call::SetShaderResources {
            stage,
            start_slot,
            views: views.to_vec(),
        });
    }

    fn set_samplers(&mut self, stage: ShaderStage, start_slot: u32, samplers: &[SamplerStatePtr]) {
        self.trace.record(Dx11Call::SetSamplers {
            stage,
            start_slot,
            samplers: samplers.to_vec(),
        });
    }

    fn cs_set_unordered_access_views(&mut self, start_slot: u32, views: &[UnorderedAccessViewPtr]) {
        self.trace.record(Dx11Call::CsSetUnorderedAccessViews {
            start_slot,
            views: views.to_vec(),
        });
    }

    fn so_set_targets(&mut self, targets: &[StreamOutputBinding]) {
        self.trace.record(Dx11Call::SoSetTargets(targets.to_vec()));
    }

    fn draw(&mut self, vertex_count: u32, start_vertex: u32) {
        self.trace.record(Dx11Call::Draw {
            vertex_count,
            start_vertex,
        });
    }

    fn draw_instanced(
        &mut self,
        vertex_count_per_instance: u32,
        instance_count: u32,
        start_vertex: u32,
        start_instance: u32,
    ) {
        self.trace.record(Dx11Call::DrawInstanced {
            vertex_count_per_instance,
            instance_count,
            start_vertex,
            start_instance,
        });
    }

    fn draw_indexed(&mut self, index_count: u32, start_index: u32, base_vertex: i32) {
        self.trace.record(Dx11Call::DrawIndexed {
            index_count,
            start_index,
            base_vertex,
        });
    }

    fn draw_indexed_instanced(
        &mut self,
        index_count_per_instance: u32,
        instance_count: u32,
        start_index: u32,
        base_vertex: i32,
        start_instance: u32,
    ) {
        self.trace.record(Dx11Call::DrawIndexedInstanced {
            index_count_per_instance,
            instance_count,
            start_index,
            base_vertex,
            start_instance,
        });
    }

    fn dispatch(&mut self, x: u32, y: u32, z: u32) {
        self.trace.record(Dx11Call::Dispatch { x, y, z });
    }

    fn begin(&mut self, query: QueryPtr) {
        self.trace.record(Dx11Call::Begin(query));
    }

    fn end(&mut self, query: QueryPtr) {
        self.trace.record(Dx11Call::End(query));
    }

    fn get_data(&mut self, query: QueryPtr) -> Result<Option<u64>, NativeError> {
        self.trace.record(Dx11Call::GetData(query));
        self.trace.check("GetData")?;
        Ok(self.trace.query_result(query))
    }

    fn set_predication(&mut self, predicate: Option<QueryPtr>, value: bool) {
        self.trace
            .record(Dx11Call::SetPredication { predicate, value });
    }

    fn resolve_subresource(
        &mut self,
        dst: ResourcePtr,
        dst_subresource: u32,
        src: ResourcePtr,
        src_subresource: u32,
        format: DxgiFormat,
    ) {
        self.trace.record(Dx11Call::ResolveSubresource {
            dst,
            dst_subresource,
            src,
            src_subresource,
            format,
        });
    }
}

/// Swap chain recording presents into a [`Trace`].
#[derive(Debug)]
pub struct TraceSwapChain<C> {
    trace: Trace<C>,
    buffers: Vec<ResourcePtr>,
    current: u32,
}

impl<C> TraceSwapChain<C>
where
    C: Clone,
{
    /// Create swap chain with `count` back buffers.
    pub fn new(trace: &Trace<C>, count: u32) -> Self {
        TraceSwapChain {
            buffers: (0..count)
                .map(|_| ResourcePtr::from_raw(trace.next_handle()))
                .collect(),
            trace: trace.clone(),
            current: 0,
        }
    }

    /// Back buffer handles in swap order.
    pub fn buffers(&self) -> &[ResourcePtr] {
        &self.buffers
    }

    fn advance(&mut self) {
        if !self.buffers.is_empty() {
            self.current = (self.current + 1) % self.buffers.len() as u32;
        }
    }
}

impl d3d12::SwapChain for TraceSwapChain<Dx12Call> {
    fn buffer_count(&self) -> u32 {
        self.buffers.len() as u32
    }

    fn current_back_buffer_index(&self) -> u32 {
        self.current
    }

    fn back_buffer(&self, index: u32) -> Result<ResourcePtr, NativeError> {
        self.trace.check("GetBuffer")?;
        self.buffers
            .get(index as usize)
            .cloned()
            .ok_or_else(|| NativeError::new("GetBuffer", HResult::INVALID_ARG))
    }

    fn present(&mut self, sync_interval: u32) -> Result<(), NativeError> {
        self.trace.record(Dx12Call::Present { sync_interval });
        self.trace.check("Present")?;
        self.advance();
        Ok(())
    }
}

impl d3d11::SwapChain for TraceSwapChain<Dx11Call> {
    fn present(&mut self, sync_interval: u32) -> Result<(), NativeError> {
        self.trace.record(Dx11Call::Present { sync_interval });
        self.trace.check("Present")?;
        self.advance();
        Ok(())
    }
}

/// Fence advanced by hand.
///
/// Waiting for a value the fence hasn't reached yet completes it,
/// as if the GPU caught up.
#[derive(Clone, Debug, Default)]
pub struct TraceFence {
    completed: u64,
    waits: Vec<u64>,
    failure: Option<HResult>,
}

impl TraceFence {
    /// Create fence with zero completed value.
    pub fn new() -> Self {
        Self::default()
    }

    /// Signal `value` from the GPU side.
    pub fn signal(&mut self, value: u64) {
        self.completed = self.completed.max(value);
    }

    /// Values waited for, in order. Values already reached are not recorded.
    pub fn waits(&self) -> &[u64] {
        &self.waits
    }

    /// Make following waits fail with `code`, or succeed again with `None`.
    pub fn fail(&mut self, code: Option<HResult>) {
        self.failure = code;
    }
}

impl Fence for TraceFence {
    fn completed_value(&self) -> u64 {
        self.completed
    }

    fn wait(&mut self, value: u64) -> Result<(), NativeError> {
        if let Some(code) = self.failure {
            return NativeError::check("SetEventOnCompletion", code);
        }
        if self.completed < value {
            self.waits.push(value);
            self.completed = value;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use {super::*, crate::native::d3d12::{Device, GraphicsCommandList, SwapChain}};

    #[test]
    fn command_list_follows_open_closed_rule() {
        let trace = Trace::new();
        let device = TraceDevice::new(&trace);
        let allocator = device.create_command_allocator().unwrap();
        let mut list = device.create_command_list(allocator, None).unwrap();

        assert!(list.is_open());
        assert!(list.reset(allocator, None).is_err());
        list.close().unwrap();
        assert!(list.close().is_err());
        list.reset(allocator, None).unwrap();
        assert!(list.is_open());
    }

    #[test]
    fn injected_failure_is_reported() {
        let trace = Trace::new();
        let device = TraceDevice::new(&trace);
        let allocator = device.create_command_allocator().unwrap();
        let mut list = device.create_command_list(allocator, None).unwrap();
        list.close().unwrap();

        trace.fail("Reset", HResult::DEVICE_REMOVED);
        let error = list.reset(allocator, None).unwrap_err();
        assert_eq!(error.code, HResult::DEVICE_REMOVED);

        trace.heal("Reset");
        list.reset(allocator, None).unwrap();
    }

    #[test]
    fn swap_chain_rotates_back_buffers() {
        let trace = Trace::<Dx12Call>::new();
        let mut swap_chain = TraceSwapChain::new(&trace, 2);
        assert_eq!(swap_chain.current_back_buffer_index(), 0);
        swap_chain.present(1).unwrap();
        assert_eq!(swap_chain.current_back_buffer_index(), 1);
        swap_chain.present(1).unwrap();
        assert_eq!(swap_chain.current_back_buffer_index(), 0);
        assert_eq!(
            trace.calls(),
            vec![
                Dx12Call::Present { sync_interval: 1 },
                Dx12Call::Present { sync_interval: 1 }
            ]
        );
    }

    #[test]
    fn fence_wait_catches_up() {
        let mut fence = TraceFence::new();
        fence.signal(2);
        fence.wait(1).unwrap();
        fence.wait(5).unwrap();
        assert_eq!(fence.completed_value(), 5);
        assert_eq!(fence.waits(), &[5]);
    }
}
