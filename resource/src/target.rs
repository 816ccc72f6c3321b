//! Offscreen render targets.

use {
    crate::error::RenderTargetError,
    smallvec::SmallVec,
    strata_core::{Backend, Extent2d, NativeView, MAX_RENDER_TARGETS},
};

/// Set of color views and an optional depth-stencil view
/// rendered to together, outside of any swap chain.
#[derive(derivative::Derivative)]
#[derivative(Clone(bound = ""), Debug(bound = ""), PartialEq(bound = ""))]
pub struct RenderTarget<B: Backend> {
    colors: SmallVec<[B::RenderTargetView; MAX_RENDER_TARGETS]>,
    depth_stencil: Option<B::DepthStencilView>,
    extent: Extent2d,
}

impl<B> RenderTarget<B>
where
    B: Backend,
{
    /// Create render target from views of attachments of `extent` size.
    pub fn new(
        colors: &[B::RenderTargetView],
        depth_stencil: Option<B::DepthStencilView>,
        extent: Extent2d,
    ) -> Result<Self, RenderTargetError> {
        if colors.is_empty() && depth_stencil.is_none() {
            return Err(RenderTargetError::NoAttachments);
        }
        if colors.len() > MAX_RENDER_TARGETS {
            return Err(RenderTargetError::TooManyColorAttachments {
                count: colors.len(),
                limit: MAX_RENDER_TARGETS,
            });
        }
        if let Some(index) = colors.iter().position(NativeView::is_null) {
            return Err(RenderTargetError::NullView { index });
        }
        if depth_stencil.map_or(false, |view| view.is_null()) {
            return Err(RenderTargetError::NullDepthStencil);
        }

        Ok(RenderTarget {
            colors: colors.iter().cloned().collect(),
            depth_stencil,
            extent,
        })
    }

    /// Color views in attachment order.
    pub fn colors(&self) -> &[B::RenderTargetView] {
        &self.colors
    }

    /// Depth-stencil view.
    pub fn depth_stencil(&self) -> Option<B::DepthStencilView> {
        self.depth_stencil
    }

    /// Size of the attachments.
    pub fn extent(&self) -> Extent2d {
        self.extent
    }
}

#[cfg(test)]
mod tests {
    use {
        super::*,
        strata_core::{
            handle::{DepthStencilViewPtr, RenderTargetViewPtr},
            Dx11,
        },
    };

    const EXTENT: Extent2d = Extent2d {
        width: 64,
        height: 64,
    };

    #[test]
    fn depth_only_target() {
        let target =
            RenderTarget::<Dx11>::new(&[], Some(DepthStencilViewPtr::from_raw(1)), EXTENT).unwrap();
        assert!(target.colors().is_empty());
        assert_eq!(target.extent(), EXTENT);
    }

    #[test]
    fn invalid_attachments() {
        assert_eq!(
            RenderTarget::<Dx11>::new(&[], None, EXTENT),
            Err(RenderTargetError::NoAttachments)
        );
        assert_eq!(
            RenderTarget::<Dx11>::new(&[RenderTargetViewPtr::NULL], None, EXTENT),
            Err(RenderTargetError::NullView { index: 0 })
        );
        assert_eq!(
            RenderTarget::<Dx11>::new(&[RenderTargetViewPtr::from_raw(1); 9], None, EXTENT),
            Err(RenderTargetError::TooManyColorAttachments { count: 9, limit: 8 })
        );
    }
}
