//! Translation onto the explicit command-list model.

use {
    crate::{
        capability::{Feature, Features},
        encoder::{DispatchCommand, DrawCommand, DrawIndexedCommand},
        error::{CommandError, ContractViolation},
        raw::RawCommandBuffer,
    },
    smallvec::SmallVec,
    strata_core::{
        handle::{
            CommandAllocatorPtr, CpuDescriptorHandle, IndexBufferView, PipelineStatePtr,
            StreamOutputBufferView, VertexBufferView,
        },
        native::d3d12::{DescriptorHeapType, Device, GraphicsCommandList},
        ColorRgba, DepthStencilClearFlags, Dx12, NativeError, PrimitiveTopology,
        RenderConditionMode, Scissor, ShaderStageFlags, Viewport,
    },
    strata_descriptor::{DescriptorTable, RegisterKind},
    strata_resource::{
        pipeline::{Dx12ComputePipeline, Dx12GraphicsPipeline},
        Query,
    },
};

/// Translator recording into a graphics command list.
///
/// Resources read by shaders are bound by writing their descriptors into
/// the descriptor table of the bound pipeline.
/// Heaps and root tables are set once per pipeline bind.
#[derive(derivative::Derivative)]
#[derivative(Debug(bound = ""))]
pub struct Dx12CommandList<D: Device> {
    #[derivative(Debug = "ignore")]
    device: D,
    #[derivative(Debug = "ignore")]
    list: D::CommandList,
    allocator: CommandAllocatorPtr,
    rtv_increment: u32,
    graphics_table: Option<DescriptorTable>,
    compute_table: Option<DescriptorTable>,
}

impl<D> Dx12CommandList<D>
where
    D: Device,
{
    /// Create command allocator and command list.
    ///
    /// The list is closed right away, so it has to be reset before recording
    /// like any list that was submitted.
    pub fn new(device: D) -> Result<Self, NativeError> {
        let allocator = device.create_command_allocator()?;
        let mut list = device.create_command_list(allocator, None)?;
        list.close()?;
        let rtv_increment = device.descriptor_handle_increment_size(DescriptorHeapType::Rtv);

        log::debug!("Created command list with {:?}", allocator);
        Ok(Dx12CommandList {
            device,
            list,
            allocator,
            rtv_increment,
            graphics_table: None,
            compute_table: None,
        })
    }

    /// Allocator created with the list.
    pub fn allocator(&self) -> CommandAllocatorPtr {
        self.allocator
    }

    /// Device the list was created from.
    pub fn device(&self) -> &D {
        &self.device
    }

    /// Native command list.
    pub fn list(&self) -> &D::CommandList {
        &self.list
    }

    /// Descriptor table of the bound graphics pipeline.
    pub fn graphics_table(&self) -> Option<&DescriptorTable> {
        self.graphics_table.as_ref()
    }

    /// Descriptor table of the bound compute pipeline.
    pub fn compute_table(&self) -> Option<&DescriptorTable> {
        self.compute_table.as_ref()
    }

    fn write_table(
        &self,
        stages: ShaderStageFlags,
        kind: RegisterKind,
        first_slot: u32,
        descriptors: &[CpuDescriptorHandle],
    ) -> Result<(), CommandError> {
        let mut writes = SmallVec::<[(&DescriptorTable, ShaderStageFlags); 2]>::new();
        let graphics = stages & ShaderStageFlags::GRAPHICS;
        if !graphics.is_empty() {
            let table = self
                .graphics_table
                .as_ref()
                .ok_or(ContractViolation::NoDescriptorTable)?;
            writes.push((table, graphics));
        }
        let compute = stages & ShaderStageFlags::COMPUTE;
        if !compute.is_empty() {
            let table = self
                .compute_table
                .as_ref()
                .ok_or(ContractViolation::NoDescriptorTable)?;
            writes.push((table, compute));
        }

        // Nothing is copied unless every register exists in both tables.
        for &(table, stages) in &writes {
            for stage in stages.stages() {
                for index in 0..descriptors.len() as u32 {
                    table.cpu_handle(stage, kind, first_slot + index)?;
                }
            }
        }

        for (table, stages) in writes {
            table.write(&self.device, stages, kind, first_slot, descriptors)?;
        }
        Ok(())
    }

    fn install_table(&mut self, table: &DescriptorTable, compute: bool) {
        self.list.set_descriptor_heaps(&table.heaps());
        for (parameter, base) in table.root_tables() {
            if compute {
                self.list.set_compute_root_descriptor_table(parameter, base);
            } else {
                self.list.set_graphics_root_descriptor_table(parameter, base);
            }
        }
    }
}

fn not_implemented(feature: Feature) -> Result<(), CommandError> {
    Err(CommandError::NotImplemented(feature))
}

impl<D> RawCommandBuffer<Dx12> for Dx12CommandList<D>
where
    D: Device,
{
    type GraphicsPipeline = Dx12GraphicsPipeline;
    type ComputePipeline = Dx12ComputePipeline;

    fn features(&self) -> Features {
        Features::empty()
    }

    fn discards_state_on_reset(&self) -> bool {
        true
    }

    fn recorder(&mut self) -> &mut (dyn GraphicsCommandList + 'static) {
        &mut self.list
    }

    fn reset(
        &mut self,
        allocator: CommandAllocatorPtr,
        initial: Option<PipelineStatePtr>,
    ) -> Result<(), NativeError> {
        self.graphics_table = None;
        self.compute_table = None;
        self.list.reset(allocator, initial)
    }

    fn finish(&mut self) -> Result<(), NativeError> {
        self.list.close()
    }

    fn set_viewports(&mut self, viewports: &[Viewport]) {
        self.list.rs_set_viewports(viewports);
    }

    fn set_scissors(&mut self, scissors: &[Scissor]) {
        self.list.rs_set_scissor_rects(scissors);
    }

    fn bind_render_targets(
        &mut self,
        colors: &[CpuDescriptorHandle],
        depth_stencil: Option<CpuDescriptorHandle>,
    ) {
        self.list.om_set_render_targets(colors, depth_stencil);
    }

    fn target_view(
        &self,
        colors: &[CpuDescriptorHandle],
        index: u32,
    ) -> Option<CpuDescriptorHandle> {
        // Targets of one binding are consecutive descriptors of the RTV heap.
        if index as usize >= colors.len() {
            return None;
        }
        colors
            .first()
            .map(|base| base.offset(index, self.rtv_increment))
    }

    fn clear_render_target(&mut self, view: CpuDescriptorHandle, color: ColorRgba) {
        self.list.clear_render_target_view(view, color);
    }

    fn clear_depth_stencil(
        &mut self,
        view: CpuDescriptorHandle,
        flags: DepthStencilClearFlags,
        depth: f32,
        stencil: u8,
    ) {
        self.list
            .clear_depth_stencil_view(view, flags, depth, stencil);
    }

    fn bind_vertex_buffers(
        &mut self,
        first_slot: u32,
        views: &[VertexBufferView],
    ) -> Result<(), CommandError> {
        log::trace!("Bind {} vertex buffers at {}", views.len(), first_slot);
        self.list.ia_set_vertex_buffers(first_slot, views);
        Ok(())
    }

    fn bind_index_buffer(&mut self, view: IndexBufferView) -> Result<(), CommandError> {
        log::trace!("Bind index buffer {:?}", view);
        self.list.ia_set_index_buffer(&view);
        Ok(())
    }

    fn bind_constant_buffers(
        &mut self,
        stages: ShaderStageFlags,
        first_slot: u32,
        views: &[CpuDescriptorHandle],
    ) -> Result<(), CommandError> {
        self.write_table(stages, RegisterKind::ConstantBuffer, first_slot, views)
    }

    fn bind_storage_buffers(
        &mut self,
        stages: ShaderStageFlags,
        first_slot: u32,
        views: &[CpuDescriptorHandle],
    ) -> Result<(), CommandError> {
        self.write_table(stages, RegisterKind::UnorderedAccess, first_slot, views)
    }

    fn bind_textures(
        &mut self,
        stages: ShaderStageFlags,
        first_slot: u32,
        views: &[CpuDescriptorHandle],
    ) -> Result<(), CommandError> {
        self.write_table(stages, RegisterKind::ShaderResource, first_slot, views)
    }

    fn bind_samplers(
        &mut self,
        stages: ShaderStageFlags,
        first_slot: u32,
        views: &[CpuDescriptorHandle],
    ) -> Result<(), CommandError> {
        self.write_table(stages, RegisterKind::Sampler, first_slot, views)
    }

    fn bind_stream_output_buffers(
        &mut self,
        _views: &[StreamOutputBufferView],
    ) -> Result<(), CommandError> {
        not_implemented(Feature::StreamOutput)
    }

    fn begin_stream_output(&mut self, _topology: PrimitiveTopology) -> Result<(), CommandError> {
        not_implemented(Feature::StreamOutput)
    }

    fn end_stream_output(&mut self) -> Result<(), CommandError> {
        not_implemented(Feature::StreamOutput)
    }

    fn bind_graphics_pipeline(
        &mut self,
        pipeline: &Dx12GraphicsPipeline,
    ) -> Result<(), CommandError> {
        self.list
            .set_graphics_root_signature(pipeline.root_signature);
        self.list.set_pipeline_state(pipeline.pipeline_state);
        self.list.ia_set_primitive_topology(pipeline.topology);
        if let Some(table) = &pipeline.table {
            self.install_table(table, false);
        }
        self.graphics_table = pipeline.table;
        Ok(())
    }

    fn bind_compute_pipeline(
        &mut self,
        pipeline: &Dx12ComputePipeline,
    ) -> Result<(), CommandError> {
        self.list
            .set_compute_root_signature(pipeline.root_signature);
        self.list.set_pipeline_state(pipeline.pipeline_state);
        if let Some(table) = &pipeline.table {
            self.install_table(table, true);
        }
        self.compute_table = pipeline.table;
        Ok(())
    }

    fn begin_query(&mut self, _query: &Query<Dx12>) -> Result<(), CommandError> {
        not_implemented(Feature::Query)
    }

    fn end_query(&mut self, _query: &Query<Dx12>) -> Result<(), CommandError> {
        not_implemented(Feature::Query)
    }

    fn query_result(&mut self, _query: &Query<Dx12>) -> Result<Option<u64>, CommandError> {
        Err(CommandError::NotImplemented(Feature::Query))
    }

    fn begin_render_condition(
        &mut self,
        _query: &Query<Dx12>,
        _mode: RenderConditionMode,
    ) -> Result<(), CommandError> {
        not_implemented(Feature::RenderCondition)
    }

    fn end_render_condition(&mut self) -> Result<(), CommandError> {
        not_implemented(Feature::RenderCondition)
    }

    fn draw(&mut self, command: DrawCommand) {
        self.list.draw_instanced(
            command.vertex_count,
            command.instance_count,
            command.first_vertex,
            command.first_instance,
        );
    }

    fn draw_indexed(&mut self, command: DrawIndexedCommand) {
        self.list.draw_indexed_instanced(
            command.index_count,
            command.instance_count,
            command.first_index,
            command.vertex_offset,
            command.first_instance,
        );
    }

    fn dispatch(&mut self, command: DispatchCommand) {
        self.list.dispatch(command.x, command.y, command.z);
    }
}
