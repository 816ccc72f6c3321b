use {
    crate::{layout::TableLayout, ranges::RegisterKind},
    failure::Fail,
    smallvec::SmallVec,
    strata_core::{
        handle::{CpuDescriptorHandle, DescriptorHeapPtr, GpuDescriptorHandle},
        native::d3d12::{DescriptorHeapType, Device},
        ShaderStage, ShaderStageFlags,
    },
};

/// Error of addressing a descriptor table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Fail)]
pub enum TableError {
    /// Stage declares no registers of the kind.
    #[fail(display = "Stage {:?} declares no {:?} registers", stage, kind)]
    KindAbsent {
        /// Stage addressed.
        stage: ShaderStage,
        /// Register kind addressed.
        kind: RegisterKind,
    },

    /// Register index is past the declared range.
    #[fail(
        display = "Register {} of kind {:?} is out of range for stage {:?} declaring {}",
        slot, kind, stage, count
    )]
    SlotOutOfRange {
        /// Stage addressed.
        stage: ShaderStage,
        /// Register kind addressed.
        kind: RegisterKind,
        /// Register addressed.
        slot: u32,
        /// Number of registers declared.
        count: u32,
    },

    /// Layout has descriptors for a heap but no region of it was given.
    #[fail(display = "Layout needs a {:?} heap region", _0)]
    MissingHeap(DescriptorHeapType),
}

/// Part of a shader-visible descriptor heap reserved for one table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct HeapRegion {
    /// Heap the region belongs to.
    pub heap: DescriptorHeapPtr,

    /// CPU handle of the first descriptor of the region.
    pub cpu_start: CpuDescriptorHandle,

    /// GPU handle of the first descriptor of the region.
    pub gpu_start: GpuDescriptorHandle,

    /// `GetDescriptorHandleIncrementSize` of the heap type.
    pub increment: u32,

    /// Root parameter index of the table in the root signature.
    pub root_parameter: u32,
}

/// Descriptor table of a pipeline.
///
/// Binding a resource writes its descriptor into the slot addressed by
/// (stage, register kind, register).
/// Descriptors are read by the GPU when the recorded commands execute,
/// so rewriting a slot affects every draw of the list not yet executed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct DescriptorTable {
    layout: TableLayout,
    views: Option<HeapRegion>,
    samplers: Option<HeapRegion>,
}

impl DescriptorTable {
    /// Create table from regions of the CBV/SRV/UAV and sampler heaps.
    pub fn new(
        layout: TableLayout,
        views: Option<HeapRegion>,
        samplers: Option<HeapRegion>,
    ) -> Result<Self, TableError> {
        let total = layout.total();
        if total.views() > 0 && views.is_none() {
            return Err(TableError::MissingHeap(DescriptorHeapType::CbvSrvUav));
        }
        if total.samplers() > 0 && samplers.is_none() {
            return Err(TableError::MissingHeap(DescriptorHeapType::Sampler));
        }

        Ok(DescriptorTable {
            layout,
            views,
            samplers,
        })
    }

    /// Layout of the table.
    pub fn layout(&self) -> &TableLayout {
        &self.layout
    }

    /// Heaps to install with `SetDescriptorHeaps`.
    pub fn heaps(&self) -> SmallVec<[DescriptorHeapPtr; 2]> {
        self.regions().map(|region| region.heap).collect()
    }

    /// Root parameters to point at the table's regions.
    pub fn root_tables(&self) -> SmallVec<[(u32, GpuDescriptorHandle); 2]> {
        self.regions()
            .map(|region| (region.root_parameter, region.gpu_start))
            .collect()
    }

    /// CPU handle of the descriptor for register `slot` of `kind` in `stage`.
    pub fn cpu_handle(
        &self,
        stage: ShaderStage,
        kind: RegisterKind,
        slot: u32,
    ) -> Result<CpuDescriptorHandle, TableError> {
        let offset = self.layout.offset(stage, kind, slot)?;
        let region = self.region(kind)?;
        Ok(region.cpu_start.offset(offset, region.increment))
    }

    /// Copy `descriptors` into consecutive registers starting at `start_slot`
    /// of each of the `stages`.
    ///
    /// All destinations are checked before anything is written.
    pub fn write<D>(
        &self,
        device: &D,
        stages: ShaderStageFlags,
        kind: RegisterKind,
        start_slot: u32,
        descriptors: &[CpuDescriptorHandle],
    ) -> Result<(), TableError>
    where
        D: Device + ?Sized,
    {
        let mut copies = SmallVec::<[_; 16]>::new();
        for stage in stages.stages() {
            for (index, &src) in descriptors.iter().enumerate() {
                let dst = self.cpu_handle(stage, kind, start_slot + index as u32)?;
                copies.push((dst, src));
            }
        }

        let heap_type = if kind.is_sampler() {
            DescriptorHeapType::Sampler
        } else {
            DescriptorHeapType::CbvSrvUav
        };

        log::trace!(
            "Write {} {:?} descriptors for {:?} at register {}",
            descriptors.len(),
            kind,
            stages,
            start_slot
        );
        for (dst, src) in copies {
            device.copy_descriptors_simple(1, dst, src, heap_type);
        }
        Ok(())
    }

    fn region(&self, kind: RegisterKind) -> Result<&HeapRegion, TableError> {
        if kind.is_sampler() {
            self.samplers
                .as_ref()
                .ok_or(TableError::MissingHeap(DescriptorHeapType::Sampler))
        } else {
            self.views
                .as_ref()
                .ok_or(TableError::MissingHeap(DescriptorHeapType::CbvSrvUav))
        }
    }

    fn regions(&self) -> impl Iterator<Item = &HeapRegion> {
        self.views.iter().chain(self.samplers.iter())
    }
}
