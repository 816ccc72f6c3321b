//! Command buffers recorded into the tracing native implementation.

#![allow(dead_code)]

mod dx12;

use {
    crate::{
        buffer::{CommandBuffer, State},
        impls::{dx11::Dx11Context, dx12::Dx12CommandList},
    },
    strata_core::{
        trace::{Dx11Call, Dx12Call, Trace, TraceContext, TraceDevice, TraceFence},
        Dx11, Dx12, Extent2d, Scissor, Viewport,
    },
};

type Dx12Buffer = CommandBuffer<Dx12, Dx12CommandList<TraceDevice>>;
type Dx11Buffer = CommandBuffer<Dx11, Dx11Context<TraceContext>>;

const EXTENT: Extent2d = Extent2d {
    width: 1280,
    height: 720,
};

fn init_log() {
    let _ = env_logger::try_init();
}

/// Command buffer over a freshly created and closed command list.
/// Creation calls are not left in the trace.
fn dx12_buffer() -> (Trace<Dx12Call>, Dx12Buffer) {
    init_log();
    let trace = Trace::new();
    let list = Dx12CommandList::new(TraceDevice::new(&trace)).unwrap();
    trace.clear();
    (trace, CommandBuffer::new(list))
}

fn dx11_buffer() -> (Trace<Dx11Call>, Dx11Buffer) {
    init_log();
    let trace = Trace::new();
    let context = Dx11Context::new(TraceContext::new(&trace));
    (trace, CommandBuffer::new(context))
}

/// Start recording with the list's own allocator.
fn begin_dx12(buffer: &mut Dx12Buffer) {
    let allocator = buffer.raw().allocator();
    buffer.reset_command_list(allocator, None).unwrap();
}

fn begin_dx11(buffer: &mut Dx11Buffer) {
    let allocator = strata_core::handle::CommandAllocatorPtr::from_raw(1);
    buffer.reset_command_list(allocator, None).unwrap();
}

/// Finish, submit and wait for the buffer, leaving it ready for reset.
fn complete<B, R>(buffer: &mut CommandBuffer<B, R>, fence: &mut TraceFence, value: u64)
where
    B: strata_core::Backend,
    R: crate::raw::RawCommandBuffer<B>,
{
    buffer.finish().unwrap();
    buffer.mark_submitted(value).unwrap();
    buffer.sync_gpu(fence).unwrap();
    assert_eq!(buffer.state(), State::Initial);
}

fn split_viewports() -> [Viewport; 2] {
    [
        Viewport::new(0.0, 0.0, 640.0, 720.0),
        Viewport::new(640.0, 0.0, 640.0, 720.0),
    ]
}

fn full_scissor() -> Scissor {
    Scissor::new(0, 0, EXTENT.width as i32, EXTENT.height as i32)
}
