use strata_core::{Backend, Extent2d, NativeError, ResourceState};

/// Presentable surface a command buffer can render to.
pub trait RenderContext<B: Backend>: std::fmt::Debug {
    /// View to render to this frame.
    /// This is the multisampled target if multi-sampling is enabled.
    fn current_render_target(&self) -> B::RenderTargetView;

    /// Depth-stencil view that goes with the render target.
    fn depth_stencil(&self) -> Option<B::DepthStencilView>;

    /// Check if rendering goes to a multisampled target that gets resolved
    /// into the back buffer.
    fn has_multi_sampling(&self) -> bool;

    /// Size of the surface.
    fn extent(&self) -> Extent2d;

    /// Record transition of the current back buffer between usage states.
    fn transition_render_target(
        &self,
        recorder: &mut B::Recorder,
        before: ResourceState,
        after: ResourceState,
    ) -> Result<(), NativeError>;

    /// Record whatever makes the frame presentable:
    /// resolve of the multisampled target or transition back to the present state.
    fn prepare_present(&self, recorder: &mut B::Recorder) -> Result<(), NativeError>;
}
