use {
    smallvec::SmallVec,
    strata_core::{Backend, MAX_RENDER_TARGETS},
};

/// Render targets bound to a command buffer.
#[derive(derivative::Derivative)]
#[derivative(Clone(bound = ""), Debug(bound = ""), PartialEq(bound = ""))]
pub struct RenderTargetBinding<B: Backend> {
    colors: SmallVec<[B::RenderTargetView; MAX_RENDER_TARGETS]>,
    depth_stencil: Option<B::DepthStencilView>,
    requires_transition: bool,
}

impl<B> RenderTargetBinding<B>
where
    B: Backend,
{
    pub(crate) fn new(
        colors: &[B::RenderTargetView],
        depth_stencil: Option<B::DepthStencilView>,
        requires_transition: bool,
    ) -> Self {
        RenderTargetBinding {
            colors: colors.iter().cloned().collect(),
            depth_stencil,
            requires_transition,
        }
    }

    /// Color views, one per target index.
    pub fn colors(&self) -> &[B::RenderTargetView] {
        &self.colors
    }

    /// Depth-stencil view.
    pub fn depth_stencil(&self) -> Option<B::DepthStencilView> {
        self.depth_stencil
    }

    /// Check if the target is a presentable surface that was transitioned
    /// to render target state when bound, and must be transitioned back before present.
    pub fn requires_transition(&self) -> bool {
        self.requires_transition
    }
}
