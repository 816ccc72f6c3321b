//! Command buffer shared by all backends.

mod binding;
mod state;

use {
    crate::{
        capability::{Feature, Features},
        config::ApiDependentState,
        encoder::{ClearState, DispatchCommand, DrawCommand, DrawIndexedCommand},
        error::{CommandError, ContractViolation},
        persistent::PersistentState,
        raw::RawCommandBuffer,
    },
    strata_core::{
        handle::{CommandAllocatorPtr, PipelineStatePtr},
        native::Fence,
        Backend, ClearFlags, ColorRgba, DepthStencilClearFlags, PrimitiveTopology,
        RenderConditionMode, ResourceState, Scissor, ShaderStageFlags, Viewport,
    },
    strata_resource::{Query, RenderTarget, Resource, ResourceArray},
    strata_wsi::RenderContext,
    thread_profiler::profile_scope,
};

pub use self::{binding::*, state::*};

/// Command buffer recording uniform commands onto a native submission object.
///
/// Every recording call checks, in order, that the buffer is recording,
/// that resources are of the expected kind and that the backend supports the feature.
/// Failed checks record nothing.
///
/// Buffer must be [disposed](#method.dispose) instead of dropped.
#[derive(derivative::Derivative)]
#[derivative(Debug(bound = "R: std::fmt::Debug"))]
pub struct CommandBuffer<B: Backend, R> {
    raw: R,
    state: State,
    allocator: Option<CommandAllocatorPtr>,
    submission: u64,
    clear: ClearState,
    persistent: PersistentState,
    binding: Option<RenderTargetBinding<B>>,
    config: ApiDependentState,
    relevant: relevant::Relevant,
}

impl<B, R> CommandBuffer<B, R>
where
    B: Backend,
    R: RawCommandBuffer<B>,
{
    /// Wrap translator. Its native object must not be recording.
    pub fn new(raw: R) -> Self {
        log::debug!(
            "Create {} command buffer, missing features: {:?}",
            B::KIND,
            raw.features().missing().collect::<Vec<_>>()
        );

        CommandBuffer {
            raw,
            state: State::Initial,
            allocator: None,
            submission: 0,
            clear: ClearState::default(),
            persistent: PersistentState::new(),
            binding: None,
            config: ApiDependentState::default(),
            relevant: relevant::Relevant,
        }
    }

    /// Get translator.
    pub fn raw(&self) -> &R {
        &self.raw
    }

    /// Get lifecycle state.
    pub fn state(&self) -> State {
        self.state
    }

    /// Features the backend translates.
    /// Calls using other features fail with `NotImplemented`.
    pub fn features(&self) -> Features {
        self.raw.features()
    }

    /// Allocator the buffer records with, or recorded with until the device is done.
    pub fn allocator(&self) -> Option<CommandAllocatorPtr> {
        self.allocator
    }

    /// Fence value of the last submission.
    pub fn submission(&self) -> u64 {
        self.submission
    }

    /// Values used by [`clear`](#method.clear).
    pub fn clear_state(&self) -> &ClearState {
        &self.clear
    }

    /// Viewports and scissors last set.
    pub fn persistent_state(&self) -> &PersistentState {
        &self.persistent
    }

    /// Currently bound render targets.
    pub fn render_target_binding(&self) -> Option<&RenderTargetBinding<B>> {
        self.binding.as_ref()
    }

    /// Backend specific options.
    pub fn api_dependent_state(&self) -> &ApiDependentState {
        &self.config
    }

    fn ensure_recording(&self) -> Result<(), CommandError> {
        if self.state != State::Recording {
            return Err(ContractViolation::NotRecording { state: self.state }.into());
        }
        Ok(())
    }

    fn require(&self, feature: Feature) -> Result<(), CommandError> {
        if !self.raw.features().supports(feature) {
            log::warn!("Feature `{}` is not implemented by {}", feature, B::KIND);
            return Err(CommandError::NotImplemented(feature));
        }
        Ok(())
    }

    /// Native failure while recording leaves the native object in unknown state.
    /// Recording is aborted and the buffer must be reset.
    fn abort_on_native<T>(&mut self, result: Result<T, CommandError>) -> Result<T, CommandError> {
        if let Err(CommandError::Native(error)) = &result {
            if self.state == State::Recording {
                log::error!("Recording aborted by native failure: {}", error);
                self.state = State::Invalid;
                self.binding = None;
            }
        }
        result
    }

    fn invalid_transition(&self, operation: &'static str) -> CommandError {
        ContractViolation::InvalidTransition {
            operation,
            state: self.state,
        }
        .into()
    }

    /// Set backend specific options.
    /// Allowed in any state. Takes effect on the next reset.
    pub fn set_graphics_api_dependent_state(&mut self, state: &ApiDependentState) {
        log::trace!("Set API dependent state {:?}", state);
        self.config = *state;
    }

    /// Reset native object and start recording.
    ///
    /// Viewports and scissors set before the reset are submitted again
    /// if the native model forgot them and automatic submission isn't disabled.
    ///
    /// If the native reset fails, the buffer is left in initial state.
    pub fn reset_command_list(
        &mut self,
        allocator: CommandAllocatorPtr,
        initial: Option<PipelineStatePtr>,
    ) -> Result<(), CommandError> {
        profile_scope!("reset_command_list");

        if !self.state.is_resettable() {
            return Err(self.invalid_transition("reset"));
        }

        if let Err(error) = self.raw.reset(allocator, initial) {
            log::error!("Failed to reset command buffer: {}", error);
            self.state = State::Initial;
            self.allocator = None;
            return Err(error.into());
        }

        self.state = State::Recording;
        self.allocator = Some(allocator);

        if self.raw.discards_state_on_reset() {
            self.binding = None;
            if self.config.direct3d12.disable_auto_state_submission {
                log::trace!("Automatic state submission is disabled");
            } else {
                self.persistent.resubmit::<B, _>(&mut self.raw);
            }
        }

        log::debug!("Command buffer reset with {:?}", allocator);
        Ok(())
    }

    /// Finish recording.
    ///
    /// If the native object fails to close, the buffer becomes invalid.
    pub fn finish(&mut self) -> Result<(), CommandError> {
        if self.state != State::Recording {
            return Err(self.invalid_transition("finish"));
        }

        match self.raw.finish() {
            Ok(()) => {
                self.state = State::Executable;
                log::debug!("Command buffer finished");
                Ok(())
            }
            Err(error) => {
                log::error!("Failed to finish command buffer: {}", error);
                self.state = State::Invalid;
                Err(error.into())
            }
        }
    }

    /// Mark buffer submitted.
    /// Device signals `fence_value` when done with it.
    pub fn mark_submitted(&mut self, fence_value: u64) -> Result<(), CommandError> {
        if self.state != State::Executable {
            return Err(self.invalid_transition("submit"));
        }
        self.state = State::Pending;
        self.submission = fence_value;
        log::debug!("Command buffer submitted, fence value {}", fence_value);
        Ok(())
    }

    /// Wait for the device to finish with the last submission.
    /// Pending buffer returns to initial state. Buffers that aren't pending are left as is.
    pub fn sync_gpu<F>(&mut self, fence: &mut F) -> Result<(), CommandError>
    where
        F: Fence + ?Sized,
    {
        profile_scope!("sync_gpu");

        match self.state {
            State::Pending => {
                if fence.completed_value() < self.submission {
                    log::trace!("Wait for fence value {}", self.submission);
                    fence.wait(self.submission)?;
                }
                self.state = State::Initial;
                self.allocator = None;
                Ok(())
            }
            State::Recording => Err(self.invalid_transition("sync")),
            State::Initial | State::Executable | State::Invalid => Ok(()),
        }
    }

    /// Dispose of command buffer releasing translator.
    /// The device must not be reading the buffer.
    pub fn dispose(self) -> R {
        strata_core::strata_slow_assert_ne!(
            self.state,
            State::Pending,
            "Command buffer disposed while device may read it"
        );
        self.relevant.dispose();
        self.raw
    }

    /// Set single viewport.
    pub fn set_viewport(&mut self, viewport: Viewport) -> Result<(), CommandError> {
        self.set_viewport_array(&[viewport])
    }

    /// Replace all viewports.
    pub fn set_viewport_array(&mut self, viewports: &[Viewport]) -> Result<(), CommandError> {
        self.ensure_recording()?;
        self.persistent.set_viewports(viewports)?;
        self.persistent.submit_viewports::<B, _>(&mut self.raw);
        Ok(())
    }

    /// Set single scissor rectangle.
    pub fn set_scissor(&mut self, scissor: Scissor) -> Result<(), CommandError> {
        self.set_scissor_array(&[scissor])
    }

    /// Replace all scissor rectangles.
    pub fn set_scissor_array(&mut self, scissors: &[Scissor]) -> Result<(), CommandError> {
        self.ensure_recording()?;
        self.persistent.set_scissors(scissors)?;
        self.persistent.submit_scissors::<B, _>(&mut self.raw);
        Ok(())
    }

    /// Set color used by [`clear`](#method.clear). Allowed in any state.
    pub fn set_clear_color(&mut self, color: ColorRgba) {
        self.clear.color = color;
    }

    /// Set depth used by [`clear`](#method.clear). Allowed in any state.
    pub fn set_clear_depth(&mut self, depth: f32) {
        self.clear.depth = depth;
    }

    /// Set stencil used by [`clear`](#method.clear). Allowed in any state.
    pub fn set_clear_stencil(&mut self, stencil: u32) {
        self.clear.stencil = stencil;
    }

    /// Bind the surface of `context` as render target.
    ///
    /// Surfaces rendered to directly are transitioned from present state first.
    /// If the transition fails, recording is aborted and the buffer becomes invalid.
    /// Multisampled surfaces are rendered through their multisample target,
    /// which never leaves render target state.
    pub fn set_render_context<C>(&mut self, context: &C) -> Result<(), CommandError>
    where
        C: RenderContext<B> + ?Sized,
    {
        self.ensure_recording()?;

        let requires_transition = !context.has_multi_sampling();
        if requires_transition {
            let result = context
                .transition_render_target(
                    self.raw.recorder(),
                    ResourceState::Present,
                    ResourceState::RenderTarget,
                )
                .map_err(CommandError::from);
            self.abort_on_native(result)?;
        }

        let colors = [context.current_render_target()];
        let depth_stencil = context.depth_stencil();
        log::trace!("Bind render context {:?}", context);
        self.raw.bind_render_targets(&colors, depth_stencil);
        self.binding = Some(RenderTargetBinding::new(
            &colors,
            depth_stencil,
            requires_transition,
        ));
        Ok(())
    }

    /// Bind offscreen render targets.
    pub fn set_render_target(&mut self, target: &RenderTarget<B>) -> Result<(), CommandError> {
        self.ensure_recording()?;
        self.require(Feature::OffscreenRenderTarget)?;

        log::trace!("Bind {} offscreen render targets", target.colors().len());
        self.raw
            .bind_render_targets(target.colors(), target.depth_stencil());
        self.binding = Some(RenderTargetBinding::new(
            target.colors(),
            target.depth_stencil(),
            false,
        ));
        Ok(())
    }

    /// Make the surface of `context` presentable again
    /// and forget the bound render targets.
    pub fn prepare_present<C>(&mut self, context: &C) -> Result<(), CommandError>
    where
        C: RenderContext<B> + ?Sized,
    {
        profile_scope!("prepare_present");

        self.ensure_recording()?;
        let result = context
            .prepare_present(self.raw.recorder())
            .map_err(CommandError::from);
        self.abort_on_native(result)?;
        self.binding = None;
        Ok(())
    }

    /// Clear bound render targets with values of the clear state.
    ///
    /// Every color target is cleared if `flags` has `COLOR`.
    /// Depth and stencil are cleared with a single native call.
    pub fn clear(&mut self, flags: ClearFlags) -> Result<(), CommandError> {
        self.ensure_recording()?;

        let binding = self
            .binding
            .as_ref()
            .ok_or(ContractViolation::NoRenderTarget)?;
        let depth_stencil_flags = DepthStencilClearFlags::from_clear_flags(flags);
        let depth_stencil = if depth_stencil_flags.is_empty() {
            None
        } else {
            Some(
                binding
                    .depth_stencil()
                    .ok_or(ContractViolation::NoDepthStencil)?,
            )
        };

        log::trace!("Clear {:?}", flags);
        if flags.contains(ClearFlags::COLOR) {
            for &view in binding.colors() {
                self.raw.clear_render_target(view, self.clear.color);
            }
        }
        if let Some(view) = depth_stencil {
            self.raw.clear_depth_stencil(
                view,
                depth_stencil_flags,
                self.clear.depth,
                self.clear.native_stencil(),
            );
        }
        Ok(())
    }

    /// Clear color target `index` of the bound render targets with `color`.
    pub fn clear_target(&mut self, index: u32, color: ColorRgba) -> Result<(), CommandError> {
        self.ensure_recording()?;

        let binding = self
            .binding
            .as_ref()
            .ok_or(ContractViolation::NoRenderTarget)?;
        let view = self
            .raw
            .target_view(binding.colors(), index)
            .ok_or_else(|| {
                CommandError::invalid_argument(format!(
                    "Target index {} is out of {} bound targets",
                    index,
                    binding.colors().len()
                ))
            })?;

        log::trace!("Clear target {}", index);
        self.raw.clear_render_target(view, color);
        Ok(())
    }

    /// Bind vertex buffer to input `slot`.
    pub fn set_vertex_buffer(
        &mut self,
        resource: &Resource<B>,
        slot: u32,
    ) -> Result<(), CommandError> {
        self.ensure_recording()?;
        let view = resource.as_vertex_buffer()?;
        let result = self.raw.bind_vertex_buffers(slot, &[view]);
        self.abort_on_native(result)
    }

    /// Bind vertex buffers to input slots starting from `first_slot`.
    pub fn set_vertex_buffer_array(
        &mut self,
        array: &ResourceArray<B>,
        first_slot: u32,
    ) -> Result<(), CommandError> {
        self.ensure_recording()?;
        let views = array.as_vertex_buffers()?;
        let result = self.raw.bind_vertex_buffers(first_slot, views);
        self.abort_on_native(result)
    }

    /// Bind index buffer.
    pub fn set_index_buffer(&mut self, resource: &Resource<B>) -> Result<(), CommandError> {
        self.ensure_recording()?;
        let view = resource.as_index_buffer()?;
        let result = self.raw.bind_index_buffer(view);
        self.abort_on_native(result)
    }

    /// Bind constant buffer to register `slot` of `stages`.
    pub fn set_constant_buffer(
        &mut self,
        resource: &Resource<B>,
        slot: u32,
        stages: ShaderStageFlags,
    ) -> Result<(), CommandError> {
        self.ensure_recording()?;
        let view = resource.as_constant_buffer()?;
        check_stages(stages)?;
        let result = self.raw.bind_constant_buffers(stages, slot, &[view]);
        self.abort_on_native(result)
    }

    /// Bind constant buffers to registers of `stages` starting from `first_slot`.
    pub fn set_constant_buffer_array(
        &mut self,
        array: &ResourceArray<B>,
        first_slot: u32,
        stages: ShaderStageFlags,
    ) -> Result<(), CommandError> {
        self.ensure_recording()?;
        let views = array.as_constant_buffers()?;
        check_stages(stages)?;
        let result = self.raw.bind_constant_buffers(stages, first_slot, views);
        self.abort_on_native(result)
    }

    /// Bind storage buffer to register `slot` of `stages`.
    pub fn set_storage_buffer(
        &mut self,
        resource: &Resource<B>,
        slot: u32,
        stages: ShaderStageFlags,
    ) -> Result<(), CommandError> {
        self.ensure_recording()?;
        let view = resource.as_storage_buffer()?;
        check_stages(stages)?;
        let result = self.raw.bind_storage_buffers(stages, slot, &[view]);
        self.abort_on_native(result)
    }

    /// Bind storage buffers to registers of `stages` starting from `first_slot`.
    pub fn set_storage_buffer_array(
        &mut self,
        array: &ResourceArray<B>,
        first_slot: u32,
        stages: ShaderStageFlags,
    ) -> Result<(), CommandError> {
        self.ensure_recording()?;
        let views = array.as_storage_buffers()?;
        check_stages(stages)?;
        let result = self.raw.bind_storage_buffers(stages, first_slot, views);
        self.abort_on_native(result)
    }

    /// Bind texture to register `slot` of `stages`.
    pub fn set_texture(
        &mut self,
        resource: &Resource<B>,
        slot: u32,
        stages: ShaderStageFlags,
    ) -> Result<(), CommandError> {
        self.ensure_recording()?;
        let view = resource.as_texture()?;
        check_stages(stages)?;
        let result = self.raw.bind_textures(stages, slot, &[view]);
        self.abort_on_native(result)
    }

    /// Bind textures to registers of `stages` starting from `first_slot`.
    pub fn set_texture_array(
        &mut self,
        array: &ResourceArray<B>,
        first_slot: u32,
        stages: ShaderStageFlags,
    ) -> Result<(), CommandError> {
        self.ensure_recording()?;
        let views = array.as_textures()?;
        check_stages(stages)?;
        let result = self.raw.bind_textures(stages, first_slot, views);
        self.abort_on_native(result)
    }

    /// Bind sampler to register `slot` of `stages`.
    pub fn set_sampler(
        &mut self,
        resource: &Resource<B>,
        slot: u32,
        stages: ShaderStageFlags,
    ) -> Result<(), CommandError> {
        self.ensure_recording()?;
        let view = resource.as_sampler()?;
        check_stages(stages)?;
        let result = self.raw.bind_samplers(stages, slot, &[view]);
        self.abort_on_native(result)
    }

    /// Bind samplers to registers of `stages` starting from `first_slot`.
    pub fn set_sampler_array(
        &mut self,
        array: &ResourceArray<B>,
        first_slot: u32,
        stages: ShaderStageFlags,
    ) -> Result<(), CommandError> {
        self.ensure_recording()?;
        let views = array.as_samplers()?;
        check_stages(stages)?;
        let result = self.raw.bind_samplers(stages, first_slot, views);
        self.abort_on_native(result)
    }

    /// Bind stream output target, replacing all bound ones.
    pub fn set_stream_output_buffer(&mut self, resource: &Resource<B>) -> Result<(), CommandError> {
        self.ensure_recording()?;
        let view = resource.as_stream_output_buffer()?;
        self.require(Feature::StreamOutput)?;
        let result = self.raw.bind_stream_output_buffers(&[view]);
        self.abort_on_native(result)
    }

    /// Bind stream output targets, replacing all bound ones.
    pub fn set_stream_output_buffer_array(
        &mut self,
        array: &ResourceArray<B>,
    ) -> Result<(), CommandError> {
        self.ensure_recording()?;
        let views = array.as_stream_output_buffers()?;
        self.require(Feature::StreamOutput)?;
        let result = self.raw.bind_stream_output_buffers(views);
        self.abort_on_native(result)
    }

    /// Start writing primitives of following draws to stream output targets.
    pub fn begin_stream_output(&mut self, topology: PrimitiveTopology) -> Result<(), CommandError> {
        self.ensure_recording()?;
        self.require(Feature::StreamOutput)?;
        let result = self.raw.begin_stream_output(topology);
        self.abort_on_native(result)
    }

    /// Stop writing to stream output targets.
    pub fn end_stream_output(&mut self) -> Result<(), CommandError> {
        self.ensure_recording()?;
        self.require(Feature::StreamOutput)?;
        let result = self.raw.end_stream_output();
        self.abort_on_native(result)
    }

    /// Bind graphics pipeline.
    pub fn set_graphics_pipeline(
        &mut self,
        pipeline: &R::GraphicsPipeline,
    ) -> Result<(), CommandError> {
        self.ensure_recording()?;
        log::trace!("Bind graphics pipeline {:?}", pipeline);
        let result = self.raw.bind_graphics_pipeline(pipeline);
        self.abort_on_native(result)
    }

    /// Bind compute pipeline.
    pub fn set_compute_pipeline(&mut self, pipeline: &R::ComputePipeline) -> Result<(), CommandError> {
        self.ensure_recording()?;
        log::trace!("Bind compute pipeline {:?}", pipeline);
        let result = self.raw.bind_compute_pipeline(pipeline);
        self.abort_on_native(result)
    }

    /// Begin query.
    pub fn begin_query(&mut self, query: &Query<B>) -> Result<(), CommandError> {
        self.ensure_recording()?;
        self.require(Feature::Query)?;
        let result = self.raw.begin_query(query);
        self.abort_on_native(result)
    }

    /// End query.
    pub fn end_query(&mut self, query: &Query<B>) -> Result<(), CommandError> {
        self.ensure_recording()?;
        self.require(Feature::Query)?;
        let result = self.raw.end_query(query);
        self.abort_on_native(result)
    }

    /// Fetch result of a query.
    /// Returns `None` until the result is available.
    /// Allowed in any state.
    pub fn query_result(&mut self, query: &Query<B>) -> Result<Option<u64>, CommandError> {
        self.require(Feature::Query)?;
        let result = self.raw.query_result(query);
        self.abort_on_native(result)
    }

    /// Execute following commands only if `query` result satisfies `mode`.
    /// Query must be a predicate.
    pub fn begin_render_condition(
        &mut self,
        query: &Query<B>,
        mode: RenderConditionMode,
    ) -> Result<(), CommandError> {
        self.ensure_recording()?;
        self.require(Feature::RenderCondition)?;
        if !query.is_predicate() {
            return Err(CommandError::invalid_argument(format!(
                "{:?} query can't be used as predicate",
                query.query_type()
            )));
        }
        let result = self.raw.begin_render_condition(query, mode);
        self.abort_on_native(result)
    }

    /// Execute following commands unconditionally.
    pub fn end_render_condition(&mut self) -> Result<(), CommandError> {
        self.ensure_recording()?;
        self.require(Feature::RenderCondition)?;
        let result = self.raw.end_render_condition();
        self.abort_on_native(result)
    }

    /// Draw `vertex_count` vertices starting from `first_vertex`.
    pub fn draw(&mut self, vertex_count: u32, first_vertex: u32) -> Result<(), CommandError> {
        self.draw_with(DrawCommand {
            vertex_count,
            first_vertex,
            ..DrawCommand::default()
        })
    }

    /// Draw `instance_count` instances.
    pub fn draw_instanced(
        &mut self,
        vertex_count: u32,
        first_vertex: u32,
        instance_count: u32,
    ) -> Result<(), CommandError> {
        self.draw_with(DrawCommand {
            vertex_count,
            first_vertex,
            instance_count,
            ..DrawCommand::default()
        })
    }

    /// Draw `instance_count` instances starting from `first_instance`.
    pub fn draw_instanced_with_offset(
        &mut self,
        vertex_count: u32,
        first_vertex: u32,
        instance_count: u32,
        first_instance: u32,
    ) -> Result<(), CommandError> {
        self.draw_with(DrawCommand {
            vertex_count,
            instance_count,
            first_vertex,
            first_instance,
        })
    }

    /// Draw.
    pub fn draw_with(&mut self, command: DrawCommand) -> Result<(), CommandError> {
        self.ensure_recording()?;
        self.raw.draw(command);
        Ok(())
    }

    /// Draw `index_count` indices starting from `first_index`.
    pub fn draw_indexed(&mut self, index_count: u32, first_index: u32) -> Result<(), CommandError> {
        self.draw_indexed_with(DrawIndexedCommand {
            index_count,
            first_index,
            ..DrawIndexedCommand::default()
        })
    }

    /// Draw indexed with `vertex_offset` added to every index.
    pub fn draw_indexed_with_offset(
        &mut self,
        index_count: u32,
        first_index: u32,
        vertex_offset: i32,
    ) -> Result<(), CommandError> {
        self.draw_indexed_with(DrawIndexedCommand {
            index_count,
            first_index,
            vertex_offset,
            ..DrawIndexedCommand::default()
        })
    }

    /// Draw `instance_count` instances indexed.
    pub fn draw_indexed_instanced(
        &mut self,
        index_count: u32,
        instance_count: u32,
        first_index: u32,
    ) -> Result<(), CommandError> {
        self.draw_indexed_with(DrawIndexedCommand {
            index_count,
            instance_count,
            first_index,
            ..DrawIndexedCommand::default()
        })
    }

    /// Draw `instance_count` instances indexed, with both offsets.
    pub fn draw_indexed_instanced_with_offset(
        &mut self,
        index_count: u32,
        instance_count: u32,
        first_index: u32,
        vertex_offset: i32,
        first_instance: u32,
    ) -> Result<(), CommandError> {
        self.draw_indexed_with(DrawIndexedCommand {
            index_count,
            instance_count,
            first_index,
            vertex_offset,
            first_instance,
        })
    }

    /// Draw indexed.
    pub fn draw_indexed_with(&mut self, command: DrawIndexedCommand) -> Result<(), CommandError> {
        self.ensure_recording()?;
        self.raw.draw_indexed(command);
        Ok(())
    }

    /// Dispatch compute work.
    /// Group counts are not validated against device limits.
    pub fn dispatch(&mut self, x: u32, y: u32, z: u32) -> Result<(), CommandError> {
        self.ensure_recording()?;
        self.raw.dispatch(DispatchCommand { x, y, z });
        Ok(())
    }
}

fn check_stages(stages: ShaderStageFlags) -> Result<(), CommandError> {
    if stages.is_empty() {
        return Err(CommandError::invalid_argument("No shader stages to bind to"));
    }
    Ok(())
}
