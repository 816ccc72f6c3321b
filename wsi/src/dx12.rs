use {
    crate::context::RenderContext,
    smallvec::SmallVec,
    strata_core::{
        handle::{CpuDescriptorHandle, ResolveTarget, ResourcePtr},
        native::d3d12::{GraphicsCommandList, SwapChain, TransitionBarrier},
        Dx12, Extent2d, HResult, NativeError, ResourceState,
    },
};

/// Multisampled color target rendered to instead of the back buffer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Dx12Multisample {
    /// Multisampled resource and its resolve format.
    pub target: ResolveTarget,

    /// Render target view of the resource.
    pub rtv: CpuDescriptorHandle,
}

/// Configuration of [`Dx12RenderContext`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Dx12RenderContextDesc {
    /// First RTV of the back buffers. Back buffer `i` uses the descriptor `i` places after it.
    pub rtv_heap_start: CpuDescriptorHandle,

    /// RTV heap descriptor increment.
    pub rtv_increment: u32,

    /// Depth-stencil view.
    pub depth_stencil: Option<CpuDescriptorHandle>,

    /// Multisampled target.
    pub multisample: Option<Dx12Multisample>,

    /// Surface size.
    pub extent: Extent2d,

    /// Sync interval used on present.
    pub sync_interval: u32,
}

/// Render context over a flip-model swap chain.
#[derive(derivative::Derivative)]
#[derivative(Debug(bound = ""))]
pub struct Dx12RenderContext<S> {
    #[derivative(Debug = "ignore")]
    swap_chain: S,
    back_buffers: SmallVec<[ResourcePtr; 4]>,
    current: u32,
    desc: Dx12RenderContextDesc,
}

impl<S> Dx12RenderContext<S>
where
    S: SwapChain,
{
    /// Wrap swap chain.
    pub fn new(swap_chain: S, desc: Dx12RenderContextDesc) -> Result<Self, NativeError> {
        let back_buffers = (0..swap_chain.buffer_count())
            .map(|index| swap_chain.back_buffer(index))
            .collect::<Result<SmallVec<_>, _>>()?;
        let current = checked_index(&swap_chain, back_buffers.len())?;

        log::debug!(
            "Render context over {} back buffers, multisampled: {}",
            back_buffers.len(),
            desc.multisample.is_some()
        );

        Ok(Dx12RenderContext {
            swap_chain,
            back_buffers,
            current,
            desc,
        })
    }

    /// Present current back buffer and move to the next one.
    pub fn present(&mut self) -> Result<(), NativeError> {
        self.swap_chain.present(self.desc.sync_interval)?;
        self.current = checked_index(&self.swap_chain, self.back_buffers.len())?;
        log::trace!("Presented, next back buffer {}", self.current);
        Ok(())
    }

    /// Index of the back buffer rendered to this frame.
    pub fn current_back_buffer_index(&self) -> u32 {
        self.current
    }

    /// Back buffer rendered to this frame.
    pub fn current_back_buffer(&self) -> Option<ResourcePtr> {
        self.back_buffers.get(self.current as usize).cloned()
    }

    fn back_buffer(&self) -> Result<ResourcePtr, NativeError> {
        self.current_back_buffer()
            .ok_or_else(|| NativeError::new("GetBuffer", HResult::INVALID_ARG))
    }

    /// Unwrap swap chain.
    pub fn into_swap_chain(self) -> S {
        self.swap_chain
    }
}

/// Index of the current back buffer, checked against the buffers fetched at creation.
fn checked_index<S>(swap_chain: &S, count: usize) -> Result<u32, NativeError>
where
    S: SwapChain,
{
    let index = swap_chain.current_back_buffer_index();
    if index as usize >= count {
        log::error!("Back buffer index {} is out of {} buffers", index, count);
        return Err(NativeError::new(
            "GetCurrentBackBufferIndex",
            HResult::INVALID_ARG,
        ));
    }
    Ok(index)
}

impl<S> RenderContext<Dx12> for Dx12RenderContext<S>
where
    S: SwapChain,
{
    fn current_render_target(&self) -> CpuDescriptorHandle {
        match self.desc.multisample {
            Some(multisample) => multisample.rtv,
            None => self
                .desc
                .rtv_heap_start
                .offset(self.current, self.desc.rtv_increment),
        }
    }

    fn depth_stencil(&self) -> Option<CpuDescriptorHandle> {
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
        recorder: &mut (dyn GraphicsCommandList + 'static),
        before: ResourceState,
        after: ResourceState,
    ) -> Result<(), NativeError> {
        recorder.resource_barrier(&[TransitionBarrier::new(
            self.back_buffer()?,
            before,
            after,
        )])
    }

    fn prepare_present(
        &self,
        recorder: &mut (dyn GraphicsCommandList + 'static),
    ) -> Result<(), NativeError> {
        let back_buffer = self.back_buffer()?;
        match self.desc.multisample {
            Some(multisample) => {
                let source = multisample.target.resource;
                recorder.resource_barrier(&[
                    TransitionBarrier::new(
                        back_buffer,
                        ResourceState::Present,
                        ResourceState::ResolveDest,
                    ),
                    TransitionBarrier::new(
                        source,
                        ResourceState::RenderTarget,
                        ResourceState::ResolveSource,
                    ),
                ])?;
                recorder.resolve_subresource(
                    back_buffer,
                    0,
                    source,
                    0,
                    multisample.target.format,
                );
                recorder.resource_barrier(&[
                    TransitionBarrier::new(
                        back_buffer,
                        ResourceState::ResolveDest,
                        ResourceState::Present,
                    ),
                    TransitionBarrier::new(
                        source,
                        ResourceState::ResolveSource,
                        ResourceState::RenderTarget,
                    ),
                ])
            }
            None => self.transition_render_target(
                recorder,
                ResourceState::RenderTarget,
                ResourceState::Present,
            ),
        }
    }
}
