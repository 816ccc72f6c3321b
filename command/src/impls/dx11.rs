//! Translation onto the immediate-context model.

use {
    crate::{
        capability::Features,
        encoder::{DispatchCommand, DrawCommand, DrawIndexedCommand},
        error::CommandError,
        raw::RawCommandBuffer,
    },
    strata_core::{
        handle::{
            BufferPtr, CommandAllocatorPtr, DepthStencilViewPtr, IndexBinding, PipelineStatePtr,
            RenderTargetViewPtr, SamplerStatePtr, ShaderResourceViewPtr, StreamOutputBinding,
            UnorderedAccessViewPtr, VertexBinding,
        },
        native::d3d11::DeviceContext,
        ColorRgba, DepthStencilClearFlags, Dx11, NativeError, PrimitiveTopology,
        RenderConditionMode, Scissor, ShaderStage, ShaderStageFlags, Viewport,
    },
    strata_resource::{
        pipeline::{Dx11ComputePipeline, Dx11GraphicsPipeline},
        Query,
    },
};

/// Sample mask enabling all samples.
const ALL_SAMPLES: u32 = 0xffff_ffff;

/// Translator recording into a device context.
///
/// The context keeps state until overwritten and has nothing to reset or close,
/// so lifecycle calls only move the command buffer between states.
#[derive(derivative::Derivative)]
#[derivative(Debug(bound = ""))]
pub struct Dx11Context<C> {
    #[derivative(Debug = "ignore")]
    context: C,
}

impl<C> Dx11Context<C>
where
    C: DeviceContext + 'static,
{
    /// Wrap device context.
    pub fn new(context: C) -> Self {
        Dx11Context { context }
    }

    /// Native device context.
    pub fn context(&self) -> &C {
        &self.context
    }

    /// Unwrap device context.
    pub fn into_context(self) -> C {
        self.context
    }
}

impl<C> RawCommandBuffer<Dx11> for Dx11Context<C>
where
    C: DeviceContext + 'static,
{
    type GraphicsPipeline = Dx11GraphicsPipeline;
    type ComputePipeline = Dx11ComputePipeline;

    fn features(&self) -> Features {
        Features::all()
    }

    fn discards_state_on_reset(&self) -> bool {
        false
    }

    fn recorder(&mut self) -> &mut (dyn DeviceContext + 'static) {
        &mut self.context
    }

    fn reset(
        &mut self,
        _allocator: CommandAllocatorPtr,
        _initial: Option<PipelineStatePtr>,
    ) -> Result<(), NativeError> {
        Ok(())
    }

    fn finish(&mut self) -> Result<(), NativeError> {
        Ok(())
    }

    fn set_viewports(&mut self, viewports: &[Viewport]) {
        self.context.rs_set_viewports(viewports);
    }

    fn set_scissors(&mut self, scissors: &[Scissor]) {
        self.context.rs_set_scissor_rects(scissors);
    }

    fn bind_render_targets(
        &mut self,
        colors: &[RenderTargetViewPtr],
        depth_stencil: Option<DepthStencilViewPtr>,
    ) {
        self.context.om_set_render_targets(colors, depth_stencil);
    }

    fn target_view(
        &self,
        colors: &[RenderTargetViewPtr],
        index: u32,
    ) -> Option<RenderTargetViewPtr> {
        colors.get(index as usize).cloned()
    }

    fn clear_render_target(&mut self, view: RenderTargetViewPtr, color: ColorRgba) {
        self.context.clear_render_target_view(view, color);
    }

    fn clear_depth_stencil(
        &mut self,
        view: DepthStencilViewPtr,
        flags: DepthStencilClearFlags,
        depth: f32,
        stencil: u8,
    ) {
        self.context
            .clear_depth_stencil_view(view, flags, depth, stencil);
    }

    fn bind_vertex_buffers(
        &mut self,
        first_slot: u32,
        views: &[VertexBinding],
    ) -> Result<(), CommandError> {
        log::trace!("Bind {} vertex buffers at {}", views.len(), first_slot);
        self.context.ia_set_vertex_buffers(first_slot, views);
        Ok(())
    }

    fn bind_index_buffer(&mut self, view: IndexBinding) -> Result<(), CommandError> {
        log::trace!("Bind index buffer {:?}", view);
        self.context.ia_set_index_buffer(&view);
        Ok(())
    }

    fn bind_constant_buffers(
        &mut self,
        stages: ShaderStageFlags,
        first_slot: u32,
        views: &[BufferPtr],
    ) -> Result<(), CommandError> {
        for stage in stages.stages() {
            self.context.set_constant_buffers(stage, first_slot, views);
        }
        Ok(())
    }

    fn bind_storage_buffers(
        &mut self,
        stages: ShaderStageFlags,
        first_slot: u32,
        views: &[UnorderedAccessViewPtr],
    ) -> Result<(), CommandError> {
        // Graphics stages get UAVs together with render targets, which isn't exposed.
        if stages != ShaderStageFlags::COMPUTE {
            return Err(CommandError::invalid_argument(format!(
                "Storage buffers can be bound to the compute stage only, not {:?}",
                stages
            )));
        }
        self.context.cs_set_unordered_access_views(first_slot, views);
        Ok(())
    }

    fn bind_textures(
        &mut self,
        stages: ShaderStageFlags,
        first_slot: u32,
        views: &[ShaderResourceViewPtr],
    ) -> Result<(), CommandError> {
        for stage in stages.stages() {
            self.context.set_shader_resources(stage, first_slot, views);
        }
        Ok(())
    }

    fn bind_samplers(
        &mut self,
        stages: ShaderStageFlags,
        first_slot: u32,
        views: &[SamplerStatePtr],
    ) -> Result<(), CommandError> {
        for stage in stages.stages() {
            self.context.set_samplers(stage, first_slot, views);
        }
        Ok(())
    }

    fn bind_stream_output_buffers(
        &mut self,
        views: &[StreamOutputBinding],
    ) -> Result<(), CommandError> {
        log::trace!("Bind {} stream output targets", views.len());
        self.context.so_set_targets(views);
        Ok(())
    }

    fn begin_stream_output(&mut self, topology: PrimitiveTopology) -> Result<(), CommandError> {
        // Bound targets receive output of every draw until unbound.
        log::trace!("Begin stream output of {:?}", topology);
        Ok(())
    }

    fn end_stream_output(&mut self) -> Result<(), CommandError> {
        self.context.so_set_targets(&[]);
        Ok(())
    }

    fn bind_graphics_pipeline(
        &mut self,
        pipeline: &Dx11GraphicsPipeline,
    ) -> Result<(), CommandError> {
        self.context.ia_set_input_layout(pipeline.input_layout);
        self.context.ia_set_primitive_topology(pipeline.topology);
        for stage in ShaderStageFlags::GRAPHICS.stages() {
            self.context.set_shader(stage, pipeline.shader(stage));
        }
        self.context.rs_set_state(pipeline.rasterizer);
        self.context.om_set_blend_state(pipeline.blend, ALL_SAMPLES);
        self.context
            .om_set_depth_stencil_state(pipeline.depth_stencil, pipeline.stencil_ref);
        Ok(())
    }

    fn bind_compute_pipeline(
        &mut self,
        pipeline: &Dx11ComputePipeline,
    ) -> Result<(), CommandError> {
        self.context.set_shader(ShaderStage::Compute, pipeline.shader);
        Ok(())
    }

    fn begin_query(&mut self, query: &Query<Dx11>) -> Result<(), CommandError> {
        self.context.begin(query.raw());
        Ok(())
    }

    fn end_query(&mut self, query: &Query<Dx11>) -> Result<(), CommandError> {
        self.context.end(query.raw());
        Ok(())
    }

    fn query_result(&mut self, query: &Query<Dx11>) -> Result<Option<u64>, CommandError> {
        Ok(self.context.get_data(query.raw())?)
    }

    fn begin_render_condition(
        &mut self,
        query: &Query<Dx11>,
        mode: RenderConditionMode,
    ) -> Result<(), CommandError> {
        // Draws are skipped when the predicate equals the value.
        // A predicate is `true` when any sample passed, so normal modes skip on `false`.
        self.context
            .set_predication(Some(query.raw()), mode.is_inverted());
        Ok(())
    }

    fn end_render_condition(&mut self) -> Result<(), CommandError> {
        self.context.set_predication(None, false);
        Ok(())
    }

    fn draw(&mut self, command: DrawCommand) {
        if command.is_single_instance() {
            self.context
                .draw(command.vertex_count, command.first_vertex);
        } else {
            self.context.draw_instanced(
                command.vertex_count,
                command.instance_count,
                command.first_vertex,
                command.first_instance,
            );
        }
    }

    fn draw_indexed(&mut self, command: DrawIndexedCommand) {
        if command.is_single_instance() {
            self.context.draw_indexed(
                command.index_count,
                command.first_index,
                command.vertex_offset,
            );
        } else {
            self.context.draw_indexed_instanced(
                command.index_count,
                command.instance_count,
                command.first_index,
                command.vertex_offset,
                command.first_instance,
            );
        }
    }

    fn dispatch(&mut self, command: DispatchCommand) {
        self.context.dispatch(command.x, command.y, command.z);
    }
}
