use {
    crate::context::RenderContext,
    strata_core::{
        handle::{DepthStencilViewPtr, RenderTargetViewPtr, ResolveTarget, ResourcePtr},
        native::d3d11::{DeviceContext, SwapChain},
        Dx11, Extent2d, NativeError, ResourceState,
    },
};

/// Multisampled color target rendered to instead of the back buffer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Dx11Multisample {
    /// Multisampled resource and its resolve format.
    pub target: ResolveTarget,

    /// Render target view of the resource.
    pub rtv: RenderTargetViewPtr,
}

/// Configuration of [`Dx11RenderContext`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Dx11RenderContextDesc {
    /// Back buffer resource.
    pub back_buffer: ResourcePtr,

    /// Render target view of the back buffer.
    pub back_buffer_rtv: RenderTargetViewPtr,

    /// Depth-stencil view.
    pub depth_stencil: Option<DepthStencilViewPtr>,

    /// Multisampled target.
    pub multisample: Option<Dx11Multisample>,

    /// Surface size.
    pub extent: Extent2d,

    /// Sync interval used on present.
    pub sync_interval: u32,
}

/// Render context over a blt-model swap chain.
///
/// The back buffer never changes and the driver tracks its usage,
/// so transitions record nothing.
#[derive(derivative::Derivative)]
#[derivative(Debug(bound = ""))]
pub struct Dx11RenderContext<S> {
    #[derivative(Debug = "ignore")]
    swap_chain: S,
    desc: Dx11RenderContextDesc,
}

impl<S> Dx11RenderContext<S>
where
    S: SwapChain,
{
    /// Wrap swap chain.
    pub fn new(swap_chain: S, desc: Dx11RenderContextDesc) -> Self {
        Dx11RenderContext { swap_chain, desc }
    }

    /// Present the back buffer.
    pub fn present(&mut self) -> Result<(), NativeError> {
        self.swap_chain.present(self.desc.sync_interval)
    }

    /// Unwrap swap chain.
    pub fn into_swap_chain(self) -> S {
        self.swap_chain
    }
}

impl<S> RenderContext<Dx11> for Dx11RenderContext<S>
where
    S: SwapChain,
{
    fn current_render_target(&self) -> RenderTargetViewPtr {
        match self.desc.multisample {
            Some(multisample) => multisample.rtv,
            None => self.desc.back_buffer_rtv,
        }
    }

    fn depth_stencil(&self) -> Option<DepthStencilViewPtr> {
        self.desc.depth_stencil
    }

    fn has_multi_sampling(&self) -> bool {
        self.desc.multisample.is_some()
    }

    fn extent(&self) -> Extent2d {
        self.desc.extent
    }

    fn transition_render_target(
        &self,
        _recorder: &mut (dyn DeviceContext + 'static),
        _before: ResourceState,
        _after: ResourceState,
    ) -> Result<(), NativeError> {
        Ok(())
    }

    fn prepare_present(
        &self,
        recorder: &mut (dyn DeviceContext + 'static),
    ) -> Result<(), NativeError> {
        if let Some(multisample) = self.desc.multisample {
            recorder.resolve_subresource(
                self.desc.back_buffer,
                0,
                multisample.target.resource,
                0,
                multisample.target.format,
            );
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use {
        super::*,
        strata_core::{
            trace::{Dx11Call, Trace, TraceContext, TraceSwapChain},
            DxgiFormat,
        },
    };

    #[test]
    fn transitions_record_nothing() {
        let trace = Trace::<Dx11Call>::new();
        let context = Dx11RenderContext::new(
            TraceSwapChain::new(&trace, 1),
            Dx11RenderContextDesc {
                back_buffer_rtv: RenderTargetViewPtr::from_raw(5),
                ..Default::default()
            },
        );
        let mut device_context = TraceContext::new(&trace);

        context
            .transition_render_target(
                &mut device_context,
                ResourceState::Present,
                ResourceState::RenderTarget,
            )
            .unwrap();
        context.prepare_present(&mut device_context).unwrap();
        assert!(trace.is_empty());
        assert_eq!(context.current_render_target(), RenderTargetViewPtr::from_raw(5));
    }

    #[test]
    fn multisampled_target_is_resolved() {
        let trace = Trace::<Dx11Call>::new();
        let back_buffer = ResourcePtr::from_raw(1);
        let source = ResourcePtr::from_raw(2);
        let mut context = Dx11RenderContext::new(
            TraceSwapChain::new(&trace, 1),
            Dx11RenderContextDesc {
                back_buffer,
                back_buffer_rtv: RenderTargetViewPtr::from_raw(5),
                multisample: Some(Dx11Multisample {
                    target: ResolveTarget {
                        resource: source,
                        format: DxgiFormat::B8G8R8A8_UNORM,
                    },
                    rtv: RenderTargetViewPtr::from_raw(6),
                }),
                sync_interval: 0,
                ..Default::default()
            },
        );
        let mut device_context = TraceContext::new(&trace);

        assert!(context.has_multi_sampling());
        assert_eq!(context.current_render_target(), RenderTargetViewPtr::from_raw(6));
        context.prepare_present(&mut device_context).unwrap();
        context.present().unwrap();
        assert_eq!(
            trace.calls(),
            vec![
                Dx11Call::ResolveSubresource {
                    dst: back_buffer,
                    dst_subresource: 0,
                    src: source,
                    src_subresource: 0,
                    format: DxgiFormat::B8G8R8A8_UNORM,
                },
                Dx11Call::Present { sync_interval: 0 },
            ]
        );
    }
}
