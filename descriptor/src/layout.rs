use {
    crate::{ranges::*, table::TableError},
    strata_core::{ShaderStage, ShaderStageFlags},
};

/// Shape of a pipeline's descriptor table, as declared by its root signature.
///
/// Descriptors are laid out stage by stage in pipeline order,
/// and by register kind within a stage.
/// Samplers are laid out the same way in a separate sampler heap.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde-1", derive(serde::Serialize, serde::Deserialize))]
pub struct TableLayout {
    stages: [DescriptorRanges; ShaderStage::COUNT],
}

impl TableLayout {
    /// Layout without descriptors.
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare `count` registers of `kind` for each of the `stages`.
    pub fn with(mut self, stages: ShaderStageFlags, kind: RegisterKind, count: u32) -> Self {
        for stage in stages.stages() {
            let ranges = &mut self.stages[stage.index()];
            *ranges = ranges.with(kind, count);
        }
        self
    }

    /// Ranges declared for `stage`.
    pub fn ranges(&self, stage: ShaderStage) -> &DescriptorRanges {
        &self.stages[stage.index()]
    }

    /// Sum of ranges of all stages.
    pub fn total(&self) -> DescriptorRanges {
        self.stages
            .iter()
            .fold(DescriptorRanges::zero(), |acc, &ranges| acc + ranges)
    }

    /// Check if layout declares no descriptors.
    pub fn is_empty(&self) -> bool {
        self.total() == DescriptorRanges::zero()
    }

    /// Position of the descriptor for register `slot` of `kind` in `stage`,
    /// counted from the start of the table's part of the heap that holds `kind`.
    pub fn offset(&self, stage: ShaderStage, kind: RegisterKind, slot: u32) -> Result<u32, TableError> {
        let ranges = self.ranges(stage);
        let count = ranges.count(kind);
        if count == 0 {
            return Err(TableError::KindAbsent { stage, kind });
        }
        if slot >= count {
            return Err(TableError::SlotOutOfRange {
                stage,
                kind,
                slot,
                count,
            });
        }

        let before: u32 = ShaderStage::ALL
            .iter()
            .take_while(|&&s| s != stage)
            .map(|&s| {
                let ranges = self.ranges(s);
                if kind.is_sampler() {
                    ranges.samplers()
                } else {
                    ranges.views()
                }
            })
            .sum();

        Ok(before + ranges.offset(kind) + slot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layout() -> TableLayout {
        TableLayout::new()
            .with(ShaderStageFlags::VERTEX, RegisterKind::ConstantBuffer, 2)
            .with(ShaderStageFlags::PIXEL, RegisterKind::ConstantBuffer, 1)
            .with(ShaderStageFlags::PIXEL, RegisterKind::ShaderResource, 4)
            .with(ShaderStageFlags::PIXEL, RegisterKind::Sampler, 2)
    }

    #[test]
    fn stage_major_offsets() {
        let layout = layout();
        assert_eq!(layout.offset(ShaderStage::Vertex, RegisterKind::ConstantBuffer, 1), Ok(1));
        assert_eq!(layout.offset(ShaderStage::Pixel, RegisterKind::ConstantBuffer, 0), Ok(2));
        assert_eq!(layout.offset(ShaderStage::Pixel, RegisterKind::ShaderResource, 3), Ok(6));
        assert_eq!(layout.offset(ShaderStage::Pixel, RegisterKind::Sampler, 1), Ok(1));
        assert_eq!(layout.total().views(), 7);
    }

    #[test]
    fn undeclared_registers_are_rejected() {
        let layout = layout();
        assert_eq!(
            layout.offset(ShaderStage::Vertex, RegisterKind::Sampler, 0),
            Err(TableError::KindAbsent {
                stage: ShaderStage::Vertex,
                kind: RegisterKind::Sampler,
            })
        );
        assert_eq!(
            layout.offset(ShaderStage::Pixel, RegisterKind::ShaderResource, 4),
            Err(TableError::SlotOutOfRange {
                stage: ShaderStage::Pixel,
                kind: RegisterKind::ShaderResource,
                slot: 4,
                count: 4,
            })
        );
    }
}
