use {
    crate::{
        capability::Features,
        encoder::{DispatchCommand, DrawCommand, DrawIndexedCommand},
        error::CommandError,
    },
    strata_core::{
        handle::{CommandAllocatorPtr, PipelineStatePtr},
        Backend, ColorRgba, DepthStencilClearFlags, NativeError, PrimitiveTopology,
        RenderConditionMode, Scissor, ShaderStageFlags, Viewport,
    },
    strata_resource::Query,
};

/// Translator of uniform commands onto one native submission model.
///
/// [`CommandBuffer`](struct.CommandBuffer.html) validates state, resource kinds and features
/// before calling into the translator.
/// Translators only reject arguments the native model can't express,
/// and must do so before making any native call.
pub trait RawCommandBuffer<B: Backend>: std::fmt::Debug {
    /// Graphics pipeline object of the model.
    type GraphicsPipeline: std::fmt::Debug;

    /// Compute pipeline object of the model.
    type ComputePipeline: std::fmt::Debug;

    /// Features the translator supports.
    fn features(&self) -> Features;

    /// Check if native reset discards pipeline state,
    /// including viewports and scissors.
    fn discards_state_on_reset(&self) -> bool;

    /// Native recording object.
    fn recorder(&mut self) -> &mut B::Recorder;

    /// Reset native object and start recording with `allocator`.
    fn reset(
        &mut self,
        allocator: CommandAllocatorPtr,
        initial: Option<PipelineStatePtr>,
    ) -> Result<(), NativeError>;

    /// Finish recording.
    fn finish(&mut self) -> Result<(), NativeError>;

    /// Set viewports.
    fn set_viewports(&mut self, viewports: &[Viewport]);

    /// Set scissor rectangles.
    fn set_scissors(&mut self, scissors: &[Scissor]);

    /// Bind render targets.
    fn bind_render_targets(
        &mut self,
        colors: &[B::RenderTargetView],
        depth_stencil: Option<B::DepthStencilView>,
    );

    /// View of color target `index` of render targets bound from `colors`.
    fn target_view(
        &self,
        colors: &[B::RenderTargetView],
        index: u32,
    ) -> Option<B::RenderTargetView>;

    /// Clear color target.
    fn clear_render_target(&mut self, view: B::RenderTargetView, color: ColorRgba);

    /// Clear depth and/or stencil.
    fn clear_depth_stencil(
        &mut self,
        view: B::DepthStencilView,
        flags: DepthStencilClearFlags,
        depth: f32,
        stencil: u8,
    );

    /// Bind vertex buffers to consecutive input slots.
    fn bind_vertex_buffers(
        &mut self,
        first_slot: u32,
        views: &[B::VertexBufferView],
    ) -> Result<(), CommandError>;

    /// Bind index buffer.
    fn bind_index_buffer(&mut self, view: B::IndexBufferView) -> Result<(), CommandError>;

    /// Bind constant buffers to consecutive registers of `stages`.
    fn bind_constant_buffers(
        &mut self,
        stages: ShaderStageFlags,
        first_slot: u32,
        views: &[B::ConstantBufferView],
    ) -> Result<(), CommandError>;

    /// Bind storage buffers to consecutive registers of `stages`.
    fn bind_storage_buffers(
        &mut self,
        stages: ShaderStageFlags,
        first_slot: u32,
        views: &[B::StorageBufferView],
    ) -> Result<(), CommandError>;

    /// Bind textures to consecutive registers of `stages`.
    fn bind_textures(
        &mut self,
        stages: ShaderStageFlags,
        first_slot: u32,
        views: &[B::TextureView],
    ) -> Result<(), CommandError>;

    /// Bind samplers to consecutive registers of `stages`.
    fn bind_samplers(
        &mut self,
        stages: ShaderStageFlags,
        first_slot: u32,
        views: &[B::SamplerView],
    ) -> Result<(), CommandError>;

    /// Bind stream output targets, replacing all bound ones.
    fn bind_stream_output_buffers(
        &mut self,
        views: &[B::StreamOutputView],
    ) -> Result<(), CommandError>;

    /// Start section of draws writing to stream output.
    fn begin_stream_output(&mut self, topology: PrimitiveTopology) -> Result<(), CommandError>;

    /// End stream output section.
    fn end_stream_output(&mut self) -> Result<(), CommandError>;

    /// Bind graphics pipeline.
    fn bind_graphics_pipeline(
        &mut self,
        pipeline: &Self::GraphicsPipeline,
    ) -> Result<(), CommandError>;

    /// Bind compute pipeline.
    fn bind_compute_pipeline(&mut self, pipeline: &Self::ComputePipeline)
        -> Result<(), CommandError>;

    /// Begin query.
    fn begin_query(&mut self, query: &Query<B>) -> Result<(), CommandError>;

    /// End query.
    fn end_query(&mut self, query: &Query<B>) -> Result<(), CommandError>;

    /// Fetch query result. `None` if not available yet.
    fn query_result(&mut self, query: &Query<B>) -> Result<Option<u64>, CommandError>;

    /// Gate following draws on result of `query`.
    fn begin_render_condition(
        &mut self,
        query: &Query<B>,
        mode: RenderConditionMode,
    ) -> Result<(), CommandError>;

    /// Stop gating draws.
    fn end_render_condition(&mut self) -> Result<(), CommandError>;

    /// Draw.
    fn draw(&mut self, command: DrawCommand);

    /// Draw indexed.
    fn draw_indexed(&mut self, command: DrawIndexedCommand);

    /// Dispatch compute work.
    fn dispatch(&mut self, command: DispatchCommand);
}
