use {
    super::*,
    crate::{
        capability::{Feature, Features},
        encoder::{DrawCommand, DrawIndexedCommand},
        error::{CommandError, ContractViolation},
        ApiDependentState, Direct3D12State,
    },
    strata_core::{
        handle::{
            CpuDescriptorHandle, DescriptorHeapPtr, GpuDescriptorHandle, IndexBufferView,
            PipelineStatePtr, QueryHeapPtr, ResourcePtr, RootSignaturePtr, VertexBufferView,
        },
        native::d3d12::{DescriptorHeapType, TransitionBarrier},
        trace::{TraceFence, TraceSwapChain},
        ClearFlags, DepthStencilClearFlags, HResult, IndexFormat, PrimitiveTopology, QueryType,
        ResourceState, ShaderStage, ShaderStageFlags,
    },
    strata_descriptor::{DescriptorTable, HeapRegion, RegisterKind, TableLayout},
    strata_resource::{
        pipeline::{Dx12ComputePipeline, Dx12GraphicsPipeline},
        Query, RenderTarget, Resource, ResourceArray, ResourceKind, TypeMismatch,
    },
    strata_wsi::{Dx12Multisample, Dx12RenderContext, Dx12RenderContextDesc},
};

const RTV_HEAP_START: CpuDescriptorHandle = CpuDescriptorHandle { ptr: 0x4000 };
const DSV: CpuDescriptorHandle = CpuDescriptorHandle { ptr: 0x5000 };

fn render_context(
    trace: &Trace<Dx12Call>,
    multisample: Option<Dx12Multisample>,
) -> Dx12RenderContext<TraceSwapChain<Dx12Call>> {
    Dx12RenderContext::new(
        TraceSwapChain::new(trace, 2),
        Dx12RenderContextDesc {
            rtv_heap_start: RTV_HEAP_START,
            rtv_increment: TraceDevice::RTV_INCREMENT,
            depth_stencil: Some(DSV),
            multisample,
            extent: EXTENT,
            sync_interval: 1,
        },
    )
    .unwrap()
}

fn heap_region(heap: u64, root_parameter: u32, increment: u32) -> HeapRegion {
    HeapRegion {
        heap: DescriptorHeapPtr::from_raw(heap),
        cpu_start: CpuDescriptorHandle {
            ptr: heap as usize * 0x10_0000,
        },
        gpu_start: GpuDescriptorHandle {
            ptr: heap * 0x100_0000,
        },
        increment,
        root_parameter,
    }
}

fn graphics_table() -> DescriptorTable {
    let layout = TableLayout::new()
        .with(ShaderStageFlags::GRAPHICS, RegisterKind::ShaderResource, 2)
        .with(ShaderStageFlags::PIXEL, RegisterKind::ConstantBuffer, 1)
        .with(ShaderStageFlags::PIXEL, RegisterKind::Sampler, 1);
    DescriptorTable::new(
        layout,
        Some(heap_region(1, 0, TraceDevice::CBV_SRV_UAV_INCREMENT)),
        Some(heap_region(2, 1, TraceDevice::SAMPLER_INCREMENT)),
    )
    .unwrap()
}

fn graphics_pipeline(table: Option<DescriptorTable>) -> Dx12GraphicsPipeline {
    Dx12GraphicsPipeline {
        root_signature: RootSignaturePtr::from_raw(0x10),
        pipeline_state: PipelineStatePtr::from_raw(0x11),
        topology: PrimitiveTopology::TriangleList,
        table,
    }
}

fn texture(ptr: usize) -> Resource<Dx12> {
    Resource::Texture(CpuDescriptorHandle { ptr })
}

fn vertex_buffer(buffer_location: u64) -> VertexBufferView {
    VertexBufferView {
        buffer_location,
        size_in_bytes: 1024,
        stride_in_bytes: 32,
    }
}

#[test]
fn recording_requires_reset() {
    let (trace, mut buffer) = dx12_buffer();
    assert_eq!(buffer.state(), State::Initial);

    assert_eq!(
        buffer.draw(3, 0),
        Err(CommandError::ContractViolation(ContractViolation::NotRecording {
            state: State::Initial
        }))
    );
    assert!(trace.is_empty());

    let allocator = buffer.raw().allocator();
    buffer
        .reset_command_list(allocator, Some(PipelineStatePtr::from_raw(0x20)))
        .unwrap();
    assert_eq!(buffer.state(), State::Recording);
    assert_eq!(buffer.allocator(), Some(allocator));

    // Nothing was set yet, so nothing is resubmitted.
    assert_eq!(
        trace.take(),
        vec![Dx12Call::Reset {
            allocator,
            initial: Some(PipelineStatePtr::from_raw(0x20)),
        }]
    );

    buffer.draw(3, 0).unwrap();
    buffer.finish().unwrap();
    assert_eq!(buffer.state(), State::Executable);
    assert_eq!(
        buffer.dispatch(1, 1, 1),
        Err(CommandError::ContractViolation(ContractViolation::NotRecording {
            state: State::Executable
        }))
    );
    buffer.dispose();
}

#[test]
fn viewports_and_scissors_survive_reset() {
    let (trace, mut buffer) = dx12_buffer();
    let mut fence = TraceFence::new();

    begin_dx12(&mut buffer);
    buffer.set_viewport_array(&split_viewports()).unwrap();
    buffer.set_scissor(full_scissor()).unwrap();
    complete(&mut buffer, &mut fence, 1);
    assert_eq!(fence.waits(), &[1]);

    trace.clear();
    begin_dx12(&mut buffer);
    assert_eq!(
        trace.take(),
        vec![
            Dx12Call::Reset {
                allocator: buffer.raw().allocator(),
                initial: None,
            },
            Dx12Call::RsSetViewports(split_viewports().to_vec()),
            Dx12Call::RsSetScissorRects(vec![full_scissor()]),
        ]
    );

    buffer.finish().unwrap();
    buffer.dispose();
}

#[test]
fn disabled_auto_submission_skips_resubmit() {
    let (trace, mut buffer) = dx12_buffer();
    let mut fence = TraceFence::new();

    buffer.set_graphics_api_dependent_state(&ApiDependentState {
        direct3d12: Direct3D12State {
            disable_auto_state_submission: true,
        },
    });

    begin_dx12(&mut buffer);
    buffer.set_viewport(split_viewports()[0]).unwrap();
    buffer.set_scissor(full_scissor()).unwrap();
    complete(&mut buffer, &mut fence, 1);

    trace.clear();
    begin_dx12(&mut buffer);
    assert_eq!(
        trace.take(),
        vec![Dx12Call::Reset {
            allocator: buffer.raw().allocator(),
            initial: None,
        }]
    );
    assert_eq!(buffer.persistent_state().viewports(), &split_viewports()[..1]);

    buffer.finish().unwrap();
    buffer.dispose();
}

#[test]
fn draw_shortcuts_match_general_form() {
    let (trace, mut buffer) = dx12_buffer();
    begin_dx12(&mut buffer);
    trace.clear();

    buffer.draw(3, 6).unwrap();
    buffer
        .draw_with(DrawCommand {
            vertex_count: 3,
            instance_count: 1,
            first_vertex: 6,
            first_instance: 0,
        })
        .unwrap();
    let draw = Dx12Call::DrawInstanced {
        vertex_count_per_instance: 3,
        instance_count: 1,
        start_vertex: 6,
        start_instance: 0,
    };
    assert_eq!(trace.take(), vec![draw.clone(), draw]);

    buffer.draw_instanced(4, 0, 10).unwrap();
    buffer.draw_instanced_with_offset(4, 0, 10, 0).unwrap();
    let draw = Dx12Call::DrawInstanced {
        vertex_count_per_instance: 4,
        instance_count: 10,
        start_vertex: 0,
        start_instance: 0,
    };
    assert_eq!(trace.take(), vec![draw.clone(), draw]);

    buffer.draw_indexed(36, 12).unwrap();
    buffer.draw_indexed_with_offset(36, 12, 0).unwrap();
    buffer.draw_indexed_instanced(36, 1, 12).unwrap();
    buffer
        .draw_indexed_instanced_with_offset(36, 1, 12, 0, 0)
        .unwrap();
    buffer
        .draw_indexed_with(DrawIndexedCommand {
            index_count: 36,
            first_index: 12,
            ..DrawIndexedCommand::default()
        })
        .unwrap();
    let draw = Dx12Call::DrawIndexedInstanced {
        index_count_per_instance: 36,
        instance_count: 1,
        start_index: 12,
        base_vertex: 0,
        start_instance: 0,
    };
    assert_eq!(trace.take(), vec![draw; 5]);

    buffer.draw_indexed_instanced_with_offset(6, 2, 0, -4, 1).unwrap();
    assert_eq!(
        trace.take(),
        vec![Dx12Call::DrawIndexedInstanced {
            index_count_per_instance: 6,
            instance_count: 2,
            start_index: 0,
            base_vertex: -4,
            start_instance: 1,
        }]
    );

    buffer.finish().unwrap();
    buffer.dispose();
}

#[test]
fn mismatched_kind_records_nothing() {
    let (trace, mut buffer) = dx12_buffer();
    begin_dx12(&mut buffer);
    trace.clear();

    assert_eq!(
        buffer.set_vertex_buffer(&texture(0xA000), 0),
        Err(CommandError::ContractViolation(ContractViolation::TypeMismatch(
            TypeMismatch {
                expected: ResourceKind::VertexBuffer,
                found: ResourceKind::Texture,
            }
        )))
    );

    let samplers = ResourceArray::new(&[
        Resource::<Dx12>::Sampler(CpuDescriptorHandle { ptr: 0xB000 }),
        Resource::Sampler(CpuDescriptorHandle { ptr: 0xB010 }),
    ])
    .unwrap();
    match buffer.set_texture_array(&samplers, 0, ShaderStageFlags::PIXEL) {
        Err(CommandError::ContractViolation(ContractViolation::TypeMismatch(mismatch))) => {
            assert_eq!(mismatch.expected, ResourceKind::Texture);
            assert_eq!(mismatch.found, ResourceKind::Sampler);
        }
        other => panic!("Unexpected result {:?}", other),
    }
    assert!(trace.is_empty());

    buffer.finish().unwrap();
    buffer.dispose();
}

#[test]
fn input_assembler_bindings() {
    let (trace, mut buffer) = dx12_buffer();
    begin_dx12(&mut buffer);
    trace.clear();

    let vertices = ResourceArray::new(&[
        Resource::<Dx12>::VertexBuffer(vertex_buffer(0x1_0000)),
        Resource::VertexBuffer(vertex_buffer(0x2_0000)),
    ])
    .unwrap();
    buffer.set_vertex_buffer_array(&vertices, 1).unwrap();

    let indices = IndexBufferView {
        buffer_location: 0x3_0000,
        size_in_bytes: 256,
        format: IndexFormat::U16,
    };
    buffer.set_index_buffer(&Resource::IndexBuffer(indices)).unwrap();

    assert_eq!(
        trace.take(),
        vec![
            Dx12Call::IaSetVertexBuffers {
                start_slot: 1,
                views: vec![vertex_buffer(0x1_0000), vertex_buffer(0x2_0000)],
            },
            Dx12Call::IaSetIndexBuffer(indices),
        ]
    );

    buffer.finish().unwrap();
    buffer.dispose();
}

#[test]
fn plain_surface_is_transitioned_once() {
    let (trace, mut buffer) = dx12_buffer();
    let context = render_context(&trace, None);
    let back_buffer = context.current_back_buffer().unwrap();
    begin_dx12(&mut buffer);
    trace.clear();

    buffer.set_render_context(&context).unwrap();
    assert_eq!(
        trace.take(),
        vec![
            Dx12Call::ResourceBarrier(vec![TransitionBarrier::new(
                back_buffer,
                ResourceState::Present,
                ResourceState::RenderTarget,
            )]),
            Dx12Call::OmSetRenderTargets {
                rtvs: vec![RTV_HEAP_START],
                dsv: Some(DSV),
            },
        ]
    );
    let binding = buffer.render_target_binding().unwrap();
    assert!(binding.requires_transition());
    assert_eq!(binding.colors(), &[RTV_HEAP_START]);

    buffer.prepare_present(&context).unwrap();
    assert_eq!(
        trace.take(),
        vec![Dx12Call::ResourceBarrier(vec![TransitionBarrier::new(
            back_buffer,
            ResourceState::RenderTarget,
            ResourceState::Present,
        )])]
    );
    assert!(buffer.render_target_binding().is_none());

    buffer.finish().unwrap();
    buffer.dispose();
}

#[test]
fn multisampled_surface_is_not_transitioned() {
    let (trace, mut buffer) = dx12_buffer();
    let msaa_rtv = CpuDescriptorHandle { ptr: 0x6000 };
    let context = render_context(
        &trace,
        Some(Dx12Multisample {
            target: strata_core::handle::ResolveTarget {
                resource: ResourcePtr::from_raw(0x77),
                format: strata_core::DxgiFormat::R8G8B8A8_UNORM,
            },
            rtv: msaa_rtv,
        }),
    );
    begin_dx12(&mut buffer);
    trace.clear();

    buffer.set_render_context(&context).unwrap();
    assert_eq!(
        trace.take(),
        vec![Dx12Call::OmSetRenderTargets {
            rtvs: vec![msaa_rtv],
            dsv: Some(DSV),
        }]
    );
    assert!(!buffer.render_target_binding().unwrap().requires_transition());

    buffer.finish().unwrap();
    buffer.dispose();
}

#[test]
fn failed_transition_binds_nothing() {
    let (trace, mut buffer) = dx12_buffer();
    let context = render_context(&trace, None);
    begin_dx12(&mut buffer);
    trace.clear();

    trace.fail("ResourceBarrier", HResult::DEVICE_REMOVED);
    match buffer.set_render_context(&context) {
        Err(CommandError::Native(error)) => {
            assert_eq!(error.call, "ResourceBarrier");
            assert_eq!(error.code, HResult::DEVICE_REMOVED);
        }
        other => panic!("Unexpected result {:?}", other),
    }
    assert!(trace.is_empty());
    assert!(buffer.render_target_binding().is_none());
    assert_eq!(buffer.state(), State::Invalid);

    trace.heal("ResourceBarrier");
    assert_eq!(
        buffer.draw(3, 0),
        Err(CommandError::ContractViolation(
            ContractViolation::NotRecording {
                state: State::Invalid
            }
        ))
    );
    assert_eq!(
        buffer.finish(),
        Err(CommandError::ContractViolation(
            ContractViolation::InvalidTransition {
                operation: "finish",
                state: State::Invalid,
            }
        ))
    );
    assert!(trace.is_empty());

    begin_dx12(&mut buffer);
    assert_eq!(buffer.state(), State::Recording);
    buffer.finish().unwrap();
    buffer.dispose();
}

#[test]
fn failed_present_preparation_aborts_recording() {
    let (trace, mut buffer) = dx12_buffer();
    let context = render_context(&trace, None);
    begin_dx12(&mut buffer);
    buffer.set_render_context(&context).unwrap();
    trace.clear();

    trace.fail("ResourceBarrier", HResult::DEVICE_REMOVED);
    match buffer.prepare_present(&context) {
        Err(CommandError::Native(error)) => assert_eq!(error.call, "ResourceBarrier"),
        other => panic!("Unexpected result {:?}", other),
    }
    assert_eq!(buffer.state(), State::Invalid);
    assert!(buffer.render_target_binding().is_none());

    trace.heal("ResourceBarrier");
    match buffer.clear(ClearFlags::COLOR) {
        Err(CommandError::ContractViolation(ContractViolation::NotRecording { .. })) => {}
        other => panic!("Unexpected result {:?}", other),
    }
    assert!(buffer.finish().is_err());
    assert!(trace.is_empty());
    buffer.dispose();
}

#[test]
fn clear_uses_clear_state() {
    let (trace, mut buffer) = dx12_buffer();
    let context = render_context(&trace, None);
    begin_dx12(&mut buffer);

    assert_eq!(
        buffer.clear(ClearFlags::COLOR),
        Err(CommandError::ContractViolation(
            ContractViolation::NoRenderTarget
        ))
    );

    buffer.set_render_context(&context).unwrap();
    buffer.set_clear_color([0.1, 0.2, 0.3, 1.0]);
    buffer.set_clear_depth(0.5);
    buffer.set_clear_stencil(0x1ff);
    trace.clear();

    buffer.clear(ClearFlags::COLOR).unwrap();
    assert_eq!(
        trace.take(),
        vec![Dx12Call::ClearRenderTargetView {
            rtv: RTV_HEAP_START,
            color: [0.1, 0.2, 0.3, 1.0],
        }]
    );

    buffer.clear(ClearFlags::DEPTH | ClearFlags::STENCIL).unwrap();
    assert_eq!(
        trace.take(),
        vec![Dx12Call::ClearDepthStencilView {
            dsv: DSV,
            flags: DepthStencilClearFlags::DEPTH | DepthStencilClearFlags::STENCIL,
            depth: 0.5,
            stencil: 0xff,
        }]
    );

    buffer.clear(ClearFlags::STENCIL).unwrap();
    assert_eq!(
        trace.take(),
        vec![Dx12Call::ClearDepthStencilView {
            dsv: DSV,
            flags: DepthStencilClearFlags::STENCIL,
            depth: 0.5,
            stencil: 0xff,
        }]
    );

    buffer.finish().unwrap();
    buffer.dispose();
}

#[test]
fn depth_clear_requires_depth_stencil_view() {
    let (trace, mut buffer) = dx12_buffer();
    let context = Dx12RenderContext::new(
        TraceSwapChain::new(&trace, 2),
        Dx12RenderContextDesc {
            rtv_heap_start: RTV_HEAP_START,
            rtv_increment: TraceDevice::RTV_INCREMENT,
            extent: EXTENT,
            ..Default::default()
        },
    )
    .unwrap();
    begin_dx12(&mut buffer);
    buffer.set_render_context(&context).unwrap();
    trace.clear();

    assert_eq!(
        buffer.clear(ClearFlags::ALL),
        Err(CommandError::ContractViolation(
            ContractViolation::NoDepthStencil
        ))
    );
    assert!(trace.is_empty());

    buffer.finish().unwrap();
    buffer.dispose();
}

#[test]
fn clear_target_addresses_bound_views() {
    let (trace, mut buffer) = dx12_buffer();
    let mut context = render_context(&trace, None);
    context.present().unwrap();
    begin_dx12(&mut buffer);
    buffer.set_render_context(&context).unwrap();
    trace.clear();

    let rtv = RTV_HEAP_START.offset(1, TraceDevice::RTV_INCREMENT);
    buffer.clear_target(0, [1.0, 0.0, 0.0, 1.0]).unwrap();
    assert_eq!(
        trace.take(),
        vec![Dx12Call::ClearRenderTargetView {
            rtv,
            color: [1.0, 0.0, 0.0, 1.0],
        }]
    );

    match buffer.clear_target(1, [0.0; 4]) {
        Err(CommandError::InvalidArgument(_)) => {}
        other => panic!("Unexpected result {:?}", other),
    }
    assert!(trace.is_empty());

    buffer.finish().unwrap();
    buffer.dispose();
}

#[test]
fn pipeline_installs_descriptor_table() {
    let (trace, mut buffer) = dx12_buffer();
    let table = graphics_table();
    begin_dx12(&mut buffer);
    trace.clear();

    buffer
        .set_graphics_pipeline(&graphics_pipeline(Some(table)))
        .unwrap();
    assert_eq!(
        trace.take(),
        vec![
            Dx12Call::SetGraphicsRootSignature(RootSignaturePtr::from_raw(0x10)),
            Dx12Call::SetPipelineState(PipelineStatePtr::from_raw(0x11)),
            Dx12Call::IaSetPrimitiveTopology(PrimitiveTopology::TriangleList),
            Dx12Call::SetDescriptorHeaps(vec![
                DescriptorHeapPtr::from_raw(1),
                DescriptorHeapPtr::from_raw(2),
            ]),
            Dx12Call::SetGraphicsRootDescriptorTable {
                parameter: 0,
                base: GpuDescriptorHandle { ptr: 0x100_0000 },
            },
            Dx12Call::SetGraphicsRootDescriptorTable {
                parameter: 1,
                base: GpuDescriptorHandle { ptr: 0x200_0000 },
            },
        ]
    );
    assert_eq!(buffer.raw().graphics_table(), Some(&table));

    let src = CpuDescriptorHandle { ptr: 0xA000 };
    buffer
        .set_texture(&texture(src.ptr), 1, ShaderStageFlags::VERTEX | ShaderStageFlags::PIXEL)
        .unwrap();
    buffer
        .set_sampler(
            &Resource::Sampler(CpuDescriptorHandle { ptr: 0xB000 }),
            0,
            ShaderStageFlags::PIXEL,
        )
        .unwrap();
    assert_eq!(
        trace.take(),
        vec![
            Dx12Call::CopyDescriptorsSimple {
                count: 1,
                dst: table
                    .cpu_handle(ShaderStage::Vertex, RegisterKind::ShaderResource, 1)
                    .unwrap(),
                src,
                heap_type: DescriptorHeapType::CbvSrvUav,
            },
            Dx12Call::CopyDescriptorsSimple {
                count: 1,
                dst: table
                    .cpu_handle(ShaderStage::Pixel, RegisterKind::ShaderResource, 1)
                    .unwrap(),
                src,
                heap_type: DescriptorHeapType::CbvSrvUav,
            },
            Dx12Call::CopyDescriptorsSimple {
                count: 1,
                dst: table
                    .cpu_handle(ShaderStage::Pixel, RegisterKind::Sampler, 0)
                    .unwrap(),
                src: CpuDescriptorHandle { ptr: 0xB000 },
                heap_type: DescriptorHeapType::Sampler,
            },
        ]
    );

    buffer.finish().unwrap();
    buffer.dispose();
}

#[test]
fn table_bindings_are_checked_before_copy() {
    let (trace, mut buffer) = dx12_buffer();
    let mut fence = TraceFence::new();
    begin_dx12(&mut buffer);
    trace.clear();

    assert_eq!(
        buffer.set_texture(&texture(0xA000), 0, ShaderStageFlags::PIXEL),
        Err(CommandError::ContractViolation(
            ContractViolation::NoDescriptorTable
        ))
    );

    buffer
        .set_graphics_pipeline(&graphics_pipeline(Some(graphics_table())))
        .unwrap();
    trace.clear();

    // Slot 2 is past the two declared texture registers.
    match buffer.set_texture(&texture(0xA000), 2, ShaderStageFlags::PIXEL) {
        Err(CommandError::InvalidArgument(_)) => {}
        other => panic!("Unexpected result {:?}", other),
    }
    // Graphics stages are fine, but no compute pipeline is bound.
    assert_eq!(
        buffer.set_texture(
            &texture(0xA000),
            0,
            ShaderStageFlags::PIXEL | ShaderStageFlags::COMPUTE
        ),
        Err(CommandError::ContractViolation(
            ContractViolation::NoDescriptorTable
        ))
    );
    match buffer.set_constant_buffer(
        &Resource::ConstantBuffer(CpuDescriptorHandle { ptr: 0xC000 }),
        0,
        ShaderStageFlags::empty(),
    ) {
        Err(CommandError::InvalidArgument(_)) => {}
        other => panic!("Unexpected result {:?}", other),
    }
    assert!(trace.is_empty());

    // Tables are forgotten together with the rest of the list state.
    complete(&mut buffer, &mut fence, 1);
    begin_dx12(&mut buffer);
    assert!(buffer.raw().graphics_table().is_none());
    assert_eq!(
        buffer.set_texture(&texture(0xA000), 0, ShaderStageFlags::PIXEL),
        Err(CommandError::ContractViolation(
            ContractViolation::NoDescriptorTable
        ))
    );

    buffer.finish().unwrap();
    buffer.dispose();
}

#[test]
fn compute_pipeline_binds_storage_buffers() {
    let (trace, mut buffer) = dx12_buffer();
    let layout =
        TableLayout::new().with(ShaderStageFlags::COMPUTE, RegisterKind::UnorderedAccess, 4);
    let table = DescriptorTable::new(
        layout,
        Some(heap_region(3, 2, TraceDevice::CBV_SRV_UAV_INCREMENT)),
        None,
    )
    .unwrap();
    let pipeline = Dx12ComputePipeline {
        root_signature: RootSignaturePtr::from_raw(0x30),
        pipeline_state: PipelineStatePtr::from_raw(0x31),
        table: Some(table),
    };
    begin_dx12(&mut buffer);
    trace.clear();

    buffer.set_compute_pipeline(&pipeline).unwrap();
    let storage = ResourceArray::new(&[
        Resource::<Dx12>::StorageBuffer(CpuDescriptorHandle { ptr: 0xD000 }),
        Resource::StorageBuffer(CpuDescriptorHandle { ptr: 0xD040 }),
    ])
    .unwrap();
    buffer
        .set_storage_buffer_array(&storage, 2, ShaderStageFlags::COMPUTE)
        .unwrap();
    buffer.dispatch(8, 8, 1).unwrap();

    let calls = trace.take();
    assert_eq!(
        &calls[..4],
        &[
            Dx12Call::SetComputeRootSignature(RootSignaturePtr::from_raw(0x30)),
            Dx12Call::SetPipelineState(PipelineStatePtr::from_raw(0x31)),
            Dx12Call::SetDescriptorHeaps(vec![DescriptorHeapPtr::from_raw(3)]),
            Dx12Call::SetComputeRootDescriptorTable {
                parameter: 2,
                base: GpuDescriptorHandle { ptr: 0x300_0000 },
            },
        ]
    );
    assert_eq!(
        &calls[4..],
        &[
            Dx12Call::CopyDescriptorsSimple {
                count: 1,
                dst: table
                    .cpu_handle(ShaderStage::Compute, RegisterKind::UnorderedAccess, 2)
                    .unwrap(),
                src: CpuDescriptorHandle { ptr: 0xD000 },
                heap_type: DescriptorHeapType::CbvSrvUav,
            },
            Dx12Call::CopyDescriptorsSimple {
                count: 1,
                dst: table
                    .cpu_handle(ShaderStage::Compute, RegisterKind::UnorderedAccess, 3)
                    .unwrap(),
                src: CpuDescriptorHandle { ptr: 0xD040 },
                heap_type: DescriptorHeapType::CbvSrvUav,
            },
            Dx12Call::Dispatch { x: 8, y: 8, z: 1 },
        ]
    );

    buffer.finish().unwrap();
    buffer.dispose();
}

#[test]
fn unimplemented_features_fail_every_time() {
    let (trace, mut buffer) = dx12_buffer();
    assert_eq!(buffer.features(), Features::empty());
    begin_dx12(&mut buffer);
    trace.clear();

    let target = RenderTarget::<Dx12>::new(&[CpuDescriptorHandle { ptr: 0x7000 }], None, EXTENT)
        .unwrap();
    let query = Query::<Dx12>::new(QueryHeapPtr::from_raw(0x40), QueryType::AnySamplesPassed);
    for _ in 0..2 {
        assert_eq!(
            buffer.set_render_target(&target),
            Err(CommandError::NotImplemented(Feature::OffscreenRenderTarget))
        );
        assert_eq!(
            buffer.begin_stream_output(PrimitiveTopology::PointList),
            Err(CommandError::NotImplemented(Feature::StreamOutput))
        );
        assert_eq!(
            buffer.begin_query(&query),
            Err(CommandError::NotImplemented(Feature::Query))
        );
        assert_eq!(
            buffer.query_result(&query),
            Err(CommandError::NotImplemented(Feature::Query))
        );
        assert_eq!(
            buffer.begin_render_condition(&query, strata_core::RenderConditionMode::Wait),
            Err(CommandError::NotImplemented(Feature::RenderCondition))
        );
    }
    assert!(trace.is_empty());

    buffer.finish().unwrap();
    buffer.dispose();
}

#[test]
fn failed_reset_leaves_buffer_initial() {
    let (trace, mut buffer) = dx12_buffer();
    let allocator = buffer.raw().allocator();

    trace.fail("Reset", HResult::OUT_OF_MEMORY);
    match buffer.reset_command_list(allocator, None) {
        Err(CommandError::Native(error)) => assert_eq!(error.code, HResult::OUT_OF_MEMORY),
        other => panic!("Unexpected result {:?}", other),
    }
    assert_eq!(buffer.state(), State::Initial);
    assert_eq!(buffer.allocator(), None);

    trace.heal("Reset");
    buffer.reset_command_list(allocator, None).unwrap();
    assert_eq!(buffer.state(), State::Recording);

    buffer.finish().unwrap();
    buffer.dispose();
}

#[test]
fn failed_close_invalidates_buffer() {
    let (trace, mut buffer) = dx12_buffer();
    begin_dx12(&mut buffer);

    trace.fail("Close", HResult::INVALID_ARG);
    match buffer.finish() {
        Err(CommandError::Native(error)) => assert_eq!(error.call, "Close"),
        other => panic!("Unexpected result {:?}", other),
    }
    assert_eq!(buffer.state(), State::Invalid);
    assert_eq!(
        buffer.mark_submitted(1),
        Err(CommandError::ContractViolation(
            ContractViolation::InvalidTransition {
                operation: "submit",
                state: State::Invalid,
            }
        ))
    );
    buffer.dispose();
}

#[test]
fn lifecycle_transitions() {
    let (_trace, mut buffer) = dx12_buffer();
    let mut fence = TraceFence::new();

    assert_eq!(
        buffer.finish(),
        Err(CommandError::ContractViolation(
            ContractViolation::InvalidTransition {
                operation: "finish",
                state: State::Initial,
            }
        ))
    );
    // Nothing to wait for.
    buffer.sync_gpu(&mut fence).unwrap();

    begin_dx12(&mut buffer);
    let allocator = buffer.raw().allocator();
    assert_eq!(
        buffer.reset_command_list(allocator, None),
        Err(CommandError::ContractViolation(
            ContractViolation::InvalidTransition {
                operation: "reset",
                state: State::Recording,
            }
        ))
    );
    assert_eq!(
        buffer.sync_gpu(&mut fence),
        Err(CommandError::ContractViolation(
            ContractViolation::InvalidTransition {
                operation: "sync",
                state: State::Recording,
            }
        ))
    );

    buffer.finish().unwrap();
    buffer.mark_submitted(7).unwrap();
    assert_eq!(buffer.state(), State::Pending);
    assert_eq!(buffer.submission(), 7);
    assert_eq!(
        buffer.reset_command_list(allocator, None),
        Err(CommandError::ContractViolation(
            ContractViolation::InvalidTransition {
                operation: "reset",
                state: State::Pending,
            }
        ))
    );

    // Device already passed the submission.
    fence.signal(9);
    buffer.sync_gpu(&mut fence).unwrap();
    assert!(fence.waits().is_empty());
    assert_eq!(buffer.state(), State::Initial);
    assert_eq!(buffer.allocator(), None);

    buffer.dispose();
}

#[test]
fn failed_wait_keeps_buffer_pending() {
    let (_trace, mut buffer) = dx12_buffer();
    let mut fence = TraceFence::new();
    begin_dx12(&mut buffer);
    buffer.finish().unwrap();
    buffer.mark_submitted(1).unwrap();

    fence.fail(Some(HResult::DEVICE_REMOVED));
    match buffer.sync_gpu(&mut fence) {
        Err(CommandError::Native(error)) => assert_eq!(error.call, "SetEventOnCompletion"),
        other => panic!("Unexpected result {:?}", other),
    }
    assert_eq!(buffer.state(), State::Pending);

    fence.fail(None);
    buffer.sync_gpu(&mut fence).unwrap();
    assert_eq!(fence.waits(), &[1]);
    buffer.dispose();
}
